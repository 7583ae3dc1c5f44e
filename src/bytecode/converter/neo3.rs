//! Translation into NEO 3 code.
//!
//! Covers the subset that maps onto slot-based frames: constants, locals,
//! arithmetic, comparisons, lists, control flow and calls between methods of
//! the same module. Interop calls need a different binding model and are
//! reported as unsupported.

use crate::bytecode::compile_error::CompileError;
use crate::bytecode::converter::{Converter, Outcome};
use crate::bytecode::emitter::{Callee, Emitter};
use crate::bytecode::token::Token;
use crate::lang::instruction::Operand;
use crate::lang::opcode::{Compare, PyOp};
use crate::vm::neo3::*;

/// Largest argument or local count `INITSLOT` can encode.
const SLOT_LIMIT: usize = u8::MAX as usize;

pub struct Neo3Converter;

impl Converter for Neo3Converter {
    fn begin_method(&self, em: &mut Emitter<'_>) -> Result<(), CompileError> {
        let (locals, args) = (em.scope().local_count(), em.scope().arg_count());
        for count in [locals, args] {
            if count > SLOT_LIMIT {
                return Err(CompileError::FrameTooLarge {
                    method: em.method_name().to_string(),
                    slots: count,
                    limit: SLOT_LIMIT,
                });
            }
        }
        if locals + args > 0 {
            em.emit_with(INITSLOT, &[locals as u8, args as u8]);
        }
        Ok(())
    }

    fn translate(&self, em: &mut Emitter<'_>, token: &Token, prev: Option<&Token>) -> Outcome {
        use PyOp::*;

        let op = token.opcode();
        match op {
            Nop | SetupLoop | PopBlock | ExtendedArg => em.emit(NOP),
            PopTop => return Outcome::Elided,

            DupTop => em.emit(DUP),
            DupTopTwo => {
                em.emit(OVER);
                em.emit(OVER);
            }
            RotTwo => em.emit(SWAP),
            RotThree => em.emit(ROT),

            UnaryNegative => em.emit(NEGATE),
            UnaryNot => em.emit(NOT),
            UnaryInvert => em.emit(INVERT),

            BinaryAdd | InplaceAdd => em.emit(ADD),
            BinarySubtract | InplaceSubtract => em.emit(SUB),
            BinaryMultiply | InplaceMultiply => em.emit(MUL),
            BinaryFloorDivide | InplaceFloorDivide | BinaryTrueDivide | InplaceTrueDivide => {
                em.emit(DIV)
            }
            BinaryModulo | InplaceModulo => em.emit(MOD),
            BinaryLshift | InplaceLshift => em.emit(SHL),
            BinaryRshift | InplaceRshift => em.emit(SHR),
            BinaryAnd | InplaceAnd => em.emit(AND),
            BinaryOr | InplaceOr => em.emit(OR),
            BinaryXor | InplaceXor => em.emit(XOR),

            CompareOp => return compare(em, token.operand()),

            LoadConst => return load_const(em, token.operand()),
            LoadFast | LoadName | LoadGlobal => {
                let Some(name) = token.operand().as_str() else {
                    return Outcome::unsupported("name operand expected");
                };
                match em.scope().slot(name) {
                    Some(slot) => slot_op(em, slot, [LDARG0, LDARG], [LDLOC0, LDLOC]),
                    None => {
                        em.push_callee(name);
                        return Outcome::Elided;
                    }
                }
            }
            LoadAttr | LoadMethod => {
                let Some(attr) = token.operand().as_str() else {
                    return Outcome::unsupported("attribute name expected");
                };
                if em.qualify_callee(attr, prev) {
                    return Outcome::Elided;
                }
                return Outcome::unsupported(format!("attribute '{}' of a computed value", attr));
            }
            StoreFast | StoreName | StoreGlobal => {
                let Some(name) = token.operand().as_str() else {
                    return Outcome::unsupported("name operand expected");
                };
                match em.scope().slot(name) {
                    Some(slot) => slot_op(em, slot, [STARG0, STARG], [STLOC0, STLOC]),
                    None => return Outcome::unsupported(format!("'{}' is not a local", name)),
                }
            }

            BinarySubscr => {
                if prev.is_some_and(|p| p.opcode() == BuildSlice) {
                    return Outcome::unsupported("slicing");
                }
                em.emit(PICKITEM);
            }
            StoreSubscr => {
                em.emit(ROT);
                em.emit(SETITEM);
            }
            DeleteSubscr => em.emit(REMOVE),
            BuildList | BuildTuple => match token.operand().as_int() {
                Some(0) => em.emit(NEWARRAY0),
                Some(n) if n > 0 => {
                    push_int(em, n);
                    em.emit(PACK);
                }
                _ => return Outcome::unsupported("element count expected"),
            },
            BuildMap => match token.operand().as_int() {
                Some(0) | None => em.emit(NEWMAP),
                Some(_) => return Outcome::unsupported("map literals with entries"),
            },

            CallFunction | CallMethod => {
                let argc = token.operand().as_int().unwrap_or(0);
                return call(em, argc);
            }
            ReturnValue => em.emit(RET),

            JumpForward | JumpAbsolute | BreakLoop | PopJumpIfFalse | PopJumpIfTrue
            | JumpIfFalseOrPop | JumpIfTrueOrPop => return jump(em, token),

            RaiseVarargs => em.emit(THROW),

            Drop => em.emit(DROP),
            Roll => em.emit(ROLL),

            UnaryPositive | BinaryPower | InplacePower | BuildConstKeyMap | BuildSlice
            | CallFunctionKw | GetIter | ForIter | YieldValue | FromAltStack | XSwap => {
                return Outcome::unsupported(format!("{} has no NEO 3 equivalent", op));
            }
        }
        Outcome::Emitted
    }
}

fn jump(em: &mut Emitter<'_>, token: &Token) -> Outcome {
    let Some(label) = token.jump_label() else {
        return Outcome::unsupported("jump without a target label");
    };
    match token.opcode() {
        PyOp::PopJumpIfFalse => em.emit_jump(JMPIFNOT_L, label),
        PyOp::PopJumpIfTrue => em.emit_jump(JMPIF_L, label),
        PyOp::JumpIfFalseOrPop => {
            em.emit(DUP);
            em.emit_jump(JMPIFNOT_L, label);
            em.emit(DROP);
        }
        PyOp::JumpIfTrueOrPop => {
            em.emit(DUP);
            em.emit_jump(JMPIF_L, label);
            em.emit(DROP);
        }
        _ => em.emit_jump(JMP_L, label),
    }
    Outcome::Emitted
}

fn compare(em: &mut Emitter<'_>, operand: &Operand) -> Outcome {
    let Operand::Compare(kind) = operand else {
        return Outcome::unsupported("comparison kind expected");
    };
    match kind {
        Compare::Gt => em.emit(GT),
        Compare::Ge => em.emit(GE),
        Compare::Lt => em.emit(LT),
        Compare::Le => em.emit(LE),
        Compare::Eq | Compare::Is => em.emit(EQUAL),
        Compare::Ne | Compare::IsNot => em.emit(NOTEQUAL),
        Compare::In => {
            em.emit(SWAP);
            em.emit(HASKEY);
        }
        Compare::NotIn => {
            em.emit(SWAP);
            em.emit(HASKEY);
            em.emit(NOT);
        }
        Compare::ExceptionMatch => return Outcome::unsupported("exception matching"),
    }
    Outcome::Emitted
}

fn load_const(em: &mut Emitter<'_>, operand: &Operand) -> Outcome {
    match operand {
        Operand::None => em.emit(PUSHNULL),
        Operand::Bool(b) => em.emit(if *b { PUSH1 } else { PUSH0 }),
        Operand::Int(n) => push_int(em, *n),
        Operand::Str(s) => push_data(em, s.as_bytes()),
        Operand::Bytes(b) => push_data(em, b),
        Operand::Label(_) | Operand::Compare(_) => {
            return Outcome::unsupported("constant of this kind");
        }
    }
    Outcome::Emitted
}

fn call(em: &mut Emitter<'_>, argc: i64) -> Outcome {
    let Some(name) = em.take_callee() else {
        return Outcome::unsupported("call target is not a named function");
    };
    let index = match em.resolve_callee(&name) {
        Some(Callee::Method(index)) => index,
        Some(Callee::Syscall(_)) | Some(Callee::AppCall(_)) => {
            return Outcome::unsupported(format!("interop call to '{}'", name));
        }
        None => return Outcome::unsupported(format!("unknown call target '{}'", name)),
    };
    match argc {
        i64::MIN..=1 => {}
        2 => em.emit(SWAP),
        3 => em.emit(REVERSE3),
        4 => em.emit(REVERSE4),
        n => {
            push_int(em, n);
            em.emit(REVERSEN);
        }
    }
    em.emit_call(CALL_L, index);
    Outcome::Emitted
}

/// Emit an argument or local slot access. `arg_ops`/`loc_ops` hold the
/// slot-0 short form and the long form taking an index byte.
fn slot_op(em: &mut Emitter<'_>, slot: usize, arg_ops: [u8; 2], loc_ops: [u8; 2]) {
    let ([short, long], index) = if em.scope().is_arg(slot) {
        (arg_ops, slot)
    } else {
        (loc_ops, slot - em.scope().arg_count())
    };
    if index <= 6 {
        em.emit(short + index as u8);
    } else {
        em.emit_with(long, &[index as u8]);
    }
}

fn push_int(em: &mut Emitter<'_>, n: i64) {
    if let Some(op) = push_small(n) {
        em.emit(op);
    } else if let Ok(v) = i8::try_from(n) {
        em.emit_with(PUSHINT8, &v.to_le_bytes());
    } else if let Ok(v) = i16::try_from(n) {
        em.emit_with(PUSHINT16, &v.to_le_bytes());
    } else if let Ok(v) = i32::try_from(n) {
        em.emit_with(PUSHINT32, &v.to_le_bytes());
    } else {
        em.emit_with(PUSHINT64, &n.to_le_bytes());
    }
}

fn push_data(em: &mut Emitter<'_>, data: &[u8]) {
    let len = data.len();
    let (op, mut operand) = if len <= 0xFF {
        (PUSHDATA1, vec![len as u8])
    } else if len <= 0xFFFF {
        (PUSHDATA2, (len as u16).to_le_bytes().to_vec())
    } else {
        (PUSHDATA4, (len as u32).to_le_bytes().to_vec())
    };
    operand.extend_from_slice(data);
    em.emit_with(op, &operand);
}
