//! Translation into NEO 2.x code.
//!
//! Locals live in an array kept on the alt stack for the lifetime of the
//! method: the prologue builds it, loads and stores index into it, and
//! `RETURN_VALUE` drops it again.

use crate::bytecode::compile_error::CompileError;
use crate::bytecode::converter::{Converter, Outcome, int_to_bytes, var_bytes};
use crate::bytecode::emitter::{Callee, Emitter};
use crate::bytecode::token::Token;
use crate::lang::instruction::Operand;
use crate::lang::opcode::{Compare, PyOp};
use crate::vm::neo2::*;

pub struct Neo2Converter;

impl Converter for Neo2Converter {
    fn begin_method(&self, em: &mut Emitter<'_>) -> Result<(), CompileError> {
        let (slots, args) = (em.scope().len(), em.scope().arg_count());
        if slots == 0 {
            return Ok(());
        }
        push_int(em, slots as i64);
        em.emit(NEWARRAY);
        em.emit(TOALTSTACK);
        // Arguments arrive with the first one on top.
        for slot in 0..args {
            store_slot(em, slot);
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
                    Some(slot) => load_slot(em, slot),
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
                    Some(slot) => store_slot(em, slot),
                    None => return Outcome::unsupported(format!("'{}' is not a local", name)),
                }
            }

            BinarySubscr => match prev {
                Some(p) if p.opcode() == BuildSlice => {
                    if em.size_of(p.index) == 0 {
                        return Outcome::unsupported("subscript by a slice that was not converted");
                    }
                    em.emit(SUBSTR);
                }
                _ => em.emit(PICKITEM),
            },
            BuildSlice => match token.operand().as_int() {
                // [s, start, end] -> [s, start, end - start]
                Some(2) => {
                    em.emit(OVER);
                    em.emit(SUB);
                }
                _ => return Outcome::unsupported("slices with a step"),
            },
            StoreSubscr => {
                em.emit(ROT);
                em.emit(SETITEM);
            }
            DeleteSubscr => em.emit(REMOVE),
            BuildList | BuildTuple => match token.operand().as_int() {
                Some(0) => {
                    em.emit(PUSH0);
                    em.emit(NEWARRAY);
                }
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
            ReturnValue => {
                if !em.scope().is_empty() {
                    em.emit(FROMALTSTACK);
                    em.emit(DROP);
                }
                em.emit(RET);
            }

            JumpForward | JumpAbsolute | BreakLoop | PopJumpIfFalse | PopJumpIfTrue
            | JumpIfFalseOrPop | JumpIfTrueOrPop => return jump(em, token),

            RaiseVarargs => em.emit(THROW),

            FromAltStack => em.emit(FROMALTSTACK),
            Drop => em.emit(DROP),
            XSwap => em.emit(XSWAP),
            Roll => em.emit(ROLL),

            UnaryPositive | BinaryPower | InplacePower | BuildConstKeyMap | CallFunctionKw
            | GetIter | ForIter | YieldValue => {
                return Outcome::unsupported(format!("{} has no NEO 2 equivalent", op));
            }
        }
        Outcome::Emitted
    }
}

fn jump(em: &mut Emitter<'_>, token: &Token) -> Outcome {
    let Some(label) = token.jump_label() else {
        return match token.opcode() {
            PyOp::BreakLoop => Outcome::unsupported("break without a loop exit label"),
            _ => Outcome::unsupported("jump without a target label"),
        };
    };
    match token.opcode() {
        PyOp::PopJumpIfFalse => em.emit_jump(JMPIFNOT, label),
        PyOp::PopJumpIfTrue => {
            em.emit(NOT);
            em.emit_jump(JMPIFNOT, label);
        }
        PyOp::JumpIfFalseOrPop => {
            em.emit(DUP);
            em.emit_jump(JMPIFNOT, label);
            em.emit(DROP);
        }
        PyOp::JumpIfTrueOrPop => {
            em.emit(DUP);
            em.emit(NOT);
            em.emit_jump(JMPIFNOT, label);
            em.emit(DROP);
        }
        _ => em.emit_jump(JMP, label),
    }
    Outcome::Emitted
}

fn compare(em: &mut Emitter<'_>, operand: &Operand) -> Outcome {
    let Operand::Compare(kind) = operand else {
        return Outcome::unsupported("comparison kind expected");
    };
    match kind {
        Compare::Gt => em.emit(GT),
        Compare::Ge => em.emit(GTE),
        Compare::Lt => em.emit(LT),
        Compare::Le => em.emit(LTE),
        Compare::Eq | Compare::Is => em.emit(EQUAL),
        Compare::Ne | Compare::IsNot => em.emit(NUMNOTEQUAL),
        // `k in c` leaves [k, c]; HASKEY wants the container below the key.
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
        Operand::None => em.emit(PUSH0),
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

/// Reverse the top `argc` items so the first argument ends up on top, then
/// dispatch on the pending callee.
fn call(em: &mut Emitter<'_>, argc: i64) -> Outcome {
    let Some(name) = em.take_callee() else {
        return Outcome::unsupported("call target is not a named function");
    };
    if argc == 2 {
        em.emit(SWAP);
    } else {
        for depth in 1..argc.max(0) {
            push_int(em, depth);
            em.emit(ROLL);
        }
    }
    match em.resolve_callee(&name) {
        Some(Callee::Method(index)) => em.emit_call(CALL, index),
        Some(Callee::Syscall(api)) => em.emit_with(SYSCALL, &var_bytes(api.as_bytes())),
        Some(Callee::AppCall(hash)) => em.emit_with(APPCALL, &hash),
        None => return Outcome::unsupported(format!("unknown call target '{}'", name)),
    }
    Outcome::Emitted
}

fn load_slot(em: &mut Emitter<'_>, slot: usize) {
    em.emit(DUPFROMALTSTACK);
    push_int(em, slot as i64);
    em.emit(PICKITEM);
}

// [v] -> [] with frame[slot] = v
fn store_slot(em: &mut Emitter<'_>, slot: usize) {
    em.emit(DUPFROMALTSTACK);
    push_int(em, slot as i64);
    em.emit(PUSH2);
    em.emit(ROLL);
    em.emit(SETITEM);
}

fn push_int(em: &mut Emitter<'_>, n: i64) {
    match push_small(n) {
        Some(op) => em.emit(op),
        None => push_data(em, &int_to_bytes(n)),
    }
}

fn push_data(em: &mut Emitter<'_>, data: &[u8]) {
    let len = data.len();
    if len == 0 {
        em.emit(PUSH0);
    } else if len <= PUSHBYTES75 as usize {
        em.emit_with(len as u8, data);
    } else if len <= 0xFF {
        let mut operand = vec![len as u8];
        operand.extend_from_slice(data);
        em.emit_with(PUSHDATA1, &operand);
    } else if len <= 0xFFFF {
        let mut operand = (len as u16).to_le_bytes().to_vec();
        operand.extend_from_slice(data);
        em.emit_with(PUSHDATA2, &operand);
    } else {
        let mut operand = (len as u32).to_le_bytes().to_vec();
        operand.extend_from_slice(data);
        em.emit_with(PUSHDATA4, &operand);
    }
}
