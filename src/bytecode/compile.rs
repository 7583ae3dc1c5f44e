use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::bytecode::compile_error::{CompileError, UnsupportedOpcode};
use crate::bytecode::converter::Outcome;
use crate::bytecode::dialect::{self, DEFAULT_TARGET, Dialect};
use crate::bytecode::emitter::{Callee, EmittedMethod, Emitter};
use crate::bytecode::ir::{CompiledModule, MethodInfo, TokenInfo};
use crate::bytecode::resolver;
use crate::bytecode::token::{Token, TokenArena};
use crate::lang::opcode::PyOp;
use crate::lang::program::{SourceMethod, SourceModule};
use crate::lang::scope::Binding;

/// Knobs for one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Target VM version; the major number picks the dialect.
    pub target: String,
    /// Overrides the module's own entry method.
    pub entry: Option<String>,
    /// Fail instead of returning best-effort output with warnings.
    pub strict: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            entry: None,
            strict: false,
        }
    }
}

/// Read-only state shared by every method of one compilation.
pub struct ModuleContext<'m> {
    dialect: &'static Dialect,
    /// Method name -> emission index.
    methods: HashMap<&'m str, usize>,
    externals: HashMap<&'m str, Callee<'m>>,
}

impl<'m> ModuleContext<'m> {
    fn new(
        dialect: &'static Dialect,
        module: &'m SourceModule,
        order: &[&'m SourceMethod],
    ) -> Result<Self, CompileError> {
        let mut methods = HashMap::new();
        for (index, &method) in order.iter().enumerate() {
            // first definition wins
            methods.entry(method.name.as_str()).or_insert(index);
        }

        let mut externals = HashMap::new();
        for (name, binding) in &module.bindings {
            let callee = match binding {
                Binding::Syscall(api) => Callee::Syscall(api.as_str()),
                Binding::AppCall(hash) => Callee::AppCall(parse_script_hash(name, hash)?),
            };
            externals.insert(name.as_str(), callee);
        }

        Ok(Self {
            dialect,
            methods,
            externals,
        })
    }

    pub fn dialect(&self) -> &'static Dialect {
        self.dialect
    }

    /// Module methods shadow external bindings of the same name.
    pub fn resolve_callee(&self, name: &str) -> Option<Callee<'m>> {
        if let Some(&index) = self.methods.get(name) {
            return Some(Callee::Method(index));
        }
        self.externals.get(name).copied()
    }
}

fn parse_script_hash(name: &str, hash: &str) -> Result<[u8; 20], CompileError> {
    let bytes = hex::decode(hash.trim_start_matches("0x"))
        .map_err(|e| CompileError::invalid_binding(name, format!("script hash is not hex: {}", e)))?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        CompileError::invalid_binding(name, format!("script hash must be 20 bytes, got {}", len))
    })
}

pub struct Compiler {
    options: CompileOptions,
    dialect: &'static Dialect,
}

impl Compiler {
    /// Fails with `InvalidDialect` before anything is emitted.
    pub fn new(options: CompileOptions) -> Result<Self, CompileError> {
        let dialect = dialect::select(&options.target)?;
        Ok(Self { options, dialect })
    }

    pub fn dialect(&self) -> &'static Dialect {
        self.dialect
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Translate every method of `module` into one image.
    ///
    /// Phase 1 emits each method with zeroed jump operands; phase 2 lays the
    /// methods out (entry first, then declaration order) and patches them.
    /// Unsupported instructions are skipped and reported in `warnings`.
    pub fn compile_module(&self, module: &SourceModule) -> Result<CompiledModule, CompileError> {
        let entry = self.options.entry.as_deref().unwrap_or(&module.entry);
        let entry_method = module
            .method(entry)
            .ok_or_else(|| CompileError::UnknownEntry {
                name: entry.to_string(),
            })?;

        let mut order = vec![entry_method];
        order.extend(module.methods.iter().filter(|m| m.name != entry));

        let ctx = ModuleContext::new(self.dialect, module, &order)?;

        let mut warnings = Vec::new();
        let mut emitted = Vec::with_capacity(order.len());
        for method in &order {
            emitted.push(self.emit_method(&ctx, method, &mut warnings)?);
        }

        if self.options.strict && !warnings.is_empty() {
            return Err(CompileError::Unsupported {
                count: warnings.len(),
                first: warnings[0].to_string(),
            });
        }

        let resolved = resolver::resolve(&emitted)?;

        let methods: Vec<MethodInfo> = emitted
            .iter()
            .enumerate()
            .map(|(index, m)| method_info(index, m, &resolved.addresses))
            .collect();

        info!(
            module = %module.name,
            dialect = self.dialect.name,
            methods = methods.len(),
            bytes = resolved.image.len(),
            warnings = warnings.len(),
            "module compiled"
        );

        Ok(CompiledModule {
            name: module.name.clone(),
            dialect: self.dialect.name,
            entry: entry.to_string(),
            image: resolved.image,
            methods,
            warnings,
        })
    }

    fn emit_method(
        &self,
        ctx: &ModuleContext<'_>,
        method: &SourceMethod,
        warnings: &mut Vec<UnsupportedOpcode>,
    ) -> Result<EmittedMethod, CompileError> {
        let converter = self.dialect.converter;
        let arena = TokenArena::from_elements(&method.name, &method.body, method.start_line)?;
        let mut em = Emitter::new(ctx, method)?;

        converter.begin_method(&mut em)?;

        let mut prev: Option<&Token> = None;
        for token in arena.iter() {
            let mark = em.begin_token(token.index);
            if let Some(p) = prev.filter(|_| !keeps_callee(token)) {
                if let Some(pending) = em.abandon_callee(p) {
                    let reason = format!("'{}' is not a local and is not called", pending.name);
                    warnings.push(warning_at(method, &arena, pending.token, reason));
                }
            }
            if let Outcome::Unsupported(reason) = converter.translate(&mut em, token, prev) {
                em.rollback(mark);
                warnings.push(warning_at(method, &arena, token.index, reason));
            }
            prev = Some(token);
        }

        for pending in em.pending_callees() {
            let reason = format!("'{}' is not a local and is never called", pending.name);
            warnings.push(warning_at(method, &arena, pending.token, reason));
        }

        let emitted = em.finish(arena);
        debug!(
            method = %emitted.name,
            tokens = emitted.arena.len(),
            bytes = emitted.code.len(),
            fixups = emitted.fixups.len(),
            "method emitted"
        );
        Ok(emitted)
    }
}

/// Whether `token` may follow a pending callee without consuming its value:
/// it pushes something new, performs the call, or does nothing.
fn keeps_callee(token: &Token) -> bool {
    use PyOp::*;

    match token.opcode() {
        LoadConst | LoadFast | LoadName | LoadGlobal | LoadAttr | LoadMethod | CallFunction
        | CallFunctionKw | CallMethod | Nop | ExtendedArg => true,
        BuildList | BuildTuple | BuildMap => matches!(token.operand().as_int(), Some(0) | None),
        _ => false,
    }
}

fn warning_at(
    method: &SourceMethod,
    arena: &TokenArena,
    index: usize,
    reason: String,
) -> UnsupportedOpcode {
    let (opcode, operand, line) = match arena.get(index) {
        Some(t) => (t.opcode(), t.operand().to_string(), t.line()),
        None => (PyOp::Nop, String::new(), method.start_line),
    };
    let warning = UnsupportedOpcode {
        opcode,
        operand,
        method: method.name.clone(),
        line,
        method_line: method.start_line,
        reason,
    };
    warn!(
        method = %warning.method,
        line = warning.line,
        opcode = %warning.opcode,
        operand = %warning.operand,
        "{}",
        warning.reason
    );
    warning
}

fn method_info(index: usize, m: &EmittedMethod, addresses: &resolver::AddressMap) -> MethodInfo {
    let tokens = m
        .arena
        .iter()
        .map(|t| {
            let start = m.token_offsets.get(t.index).copied().unwrap_or(0);
            let end = m
                .token_offsets
                .get(t.index + 1)
                .copied()
                .unwrap_or(m.code.len());
            TokenInfo {
                index: t.index,
                address: addresses.token(index, t.index),
                size: end.saturating_sub(start),
                line: t.line(),
                role: t.role,
                text: t.to_string(),
            }
        })
        .collect();

    MethodInfo {
        name: m.name.clone(),
        address: addresses.method(index).unwrap_or(0),
        length: m.code.len(),
        args: m.args.clone(),
        start_line: m.start_line,
        tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::disasm::decode;
    use crate::bytecode::token::JumpRole;
    use crate::lang::instruction::{Element, Instruction, LabelId, Operand};
    use crate::lang::opcode::{Compare, PyOp};

    fn ins(op: PyOp, operand: Operand, line: u32) -> Element {
        Instruction::new(op, operand, line).into()
    }

    fn int(n: i64, line: u32) -> Element {
        ins(PyOp::LoadConst, Operand::Int(n), line)
    }

    fn bare(op: PyOp, line: u32) -> Element {
        Instruction::bare(op, line).into()
    }

    fn name(op: PyOp, name: &str, line: u32) -> Element {
        ins(op, Operand::Str(name.to_string()), line)
    }

    fn jump(op: PyOp, label: u32, line: u32) -> Element {
        ins(op, Operand::Label(LabelId(label)), line)
    }

    fn label(id: u32) -> Element {
        Element::Label(LabelId(id))
    }

    fn module_of(body: Vec<Element>) -> SourceModule {
        SourceModule::new("test", "Main").with_method(SourceMethod::new("Main", body))
    }

    fn compile_with(target: &str, module: &SourceModule) -> Result<CompiledModule, CompileError> {
        let options = CompileOptions {
            target: target.to_string(),
            ..CompileOptions::default()
        };
        Compiler::new(options)?.compile_module(module)
    }

    fn compile(module: &SourceModule) -> CompiledModule {
        compile_with(DEFAULT_TARGET, module).unwrap()
    }

    fn mnemonics(target: &str, module: &CompiledModule) -> Vec<&'static str> {
        let catalog = dialect::select(target).unwrap().catalog;
        decode(catalog, &module.image, 0)
            .iter()
            .map(|d| d.mnemonic)
            .collect()
    }

    /// `if 1 > 2: return 99` / `return 0`
    fn branch_program() -> SourceModule {
        module_of(vec![
            int(1, 1),
            int(2, 1),
            ins(PyOp::CompareOp, Operand::Compare(Compare::Gt), 1),
            jump(PyOp::PopJumpIfFalse, 0, 1),
            int(99, 2),
            bare(PyOp::ReturnValue, 2),
            label(0),
            int(0, 3),
            bare(PyOp::ReturnValue, 3),
        ])
    }

    // =========================================================================
    // End to end
    // =========================================================================

    #[test]
    fn test_branch_program_neo2() {
        let module = compile(&branch_program());

        assert_eq!(
            mnemonics("2.9.0", &module),
            vec!["PUSH1", "PUSH2", "GT", "JMPIFNOT", "PUSHBYTES1", "RET", "NOP", "PUSH0", "RET"]
        );
        assert_eq!(
            module.image,
            vec![0x51, 0x52, 0xA0, 0x64, 0x06, 0x00, 0x01, 0x63, 0x66, 0x61, 0x00, 0x66]
        );
        assert!(!module.has_warnings());
        assert_eq!(module.dialect, "neo2");
    }

    #[test]
    fn test_branch_program_neo3() {
        let module = compile_with("3.0.0", &branch_program()).unwrap();

        assert_eq!(
            mnemonics("3.0.0", &module),
            vec!["PUSH1", "PUSH2", "GT", "JMPIFNOT_L", "PUSHINT8", "RET", "NOP", "PUSH0", "RET"]
        );
        // JMPIFNOT_L at 3, label NOP at 11
        assert_eq!(&module.image[3..8], &[0x27, 0x08, 0x00, 0x00, 0x00]);
        assert_eq!(module.dialect, "neo3");
    }

    #[test]
    fn test_token_addresses_and_roles() {
        let module = compile(&branch_program());
        let main = module.method("Main").unwrap();

        assert_eq!(main.tokens.len(), 9);
        assert_eq!(main.tokens[3].role, JumpRole::Source(LabelId(0)));
        assert_eq!(main.tokens[3].address, 3);
        assert_eq!(main.tokens[3].size, 3);
        assert_eq!(main.tokens[6].role, JumpRole::Target(LabelId(0)));
        assert_eq!(main.tokens[6].address, 9);
        // label takes the line of the element before it
        assert_eq!(main.tokens[6].line, 2);
    }

    // =========================================================================
    // Jump linkage
    // =========================================================================

    /// Every jump source lands exactly on the first byte of its target token.
    fn assert_jumps_round_trip(target: &str, module: &CompiledModule) {
        let catalog = dialect::select(target).unwrap().catalog;
        for m in &module.methods {
            let code = module.code_of(&m.name).unwrap();
            let decoded = decode(catalog, code, m.address);
            for token in &m.tokens {
                let JumpRole::Source(label) = token.role else {
                    continue;
                };
                let target_token = m
                    .tokens
                    .iter()
                    .find(|t| t.role == JumpRole::Target(label))
                    .unwrap();
                let jump = decoded
                    .iter()
                    .filter(|d| d.address >= token.address && d.address < token.address + token.size)
                    .find_map(|d| d.jump_target())
                    .unwrap();
                assert_eq!(jump, target_token.address, "{} in {}", label, m.name);
            }
        }
    }

    fn loop_program() -> SourceModule {
        // i = 10
        // while i > 0: i = i - 1
        // return i
        let body = vec![
            int(10, 1),
            name(PyOp::StoreFast, "i", 1),
            bare(PyOp::SetupLoop, 2),
            label(0),
            name(PyOp::LoadFast, "i", 2),
            int(0, 2),
            ins(PyOp::CompareOp, Operand::Compare(Compare::Gt), 2),
            jump(PyOp::PopJumpIfFalse, 2, 2),
            name(PyOp::LoadFast, "i", 3),
            int(1, 3),
            bare(PyOp::BinarySubtract, 3),
            name(PyOp::StoreFast, "i", 3),
            jump(PyOp::JumpAbsolute, 0, 3),
            label(2),
            bare(PyOp::PopBlock, 3),
            name(PyOp::LoadFast, "i", 4),
            bare(PyOp::ReturnValue, 4),
        ];
        SourceModule::new("loop", "Main")
            .with_method(SourceMethod::new("Main", body).with_locals(&["i"]))
    }

    #[test]
    fn test_jump_round_trip_neo2() {
        let module = compile(&loop_program());
        assert!(!module.has_warnings(), "{:?}", module.warnings);
        assert_jumps_round_trip("2.9.0", &module);
    }

    #[test]
    fn test_jump_round_trip_neo3() {
        let module = compile_with("3.0.0", &loop_program()).unwrap();
        assert!(!module.has_warnings(), "{:?}", module.warnings);
        assert_jumps_round_trip("3.0.0", &module);
    }

    #[test]
    fn test_conditional_variants_round_trip() {
        let module = compile(&module_of(vec![
            int(1, 1),
            jump(PyOp::PopJumpIfTrue, 0, 1),
            int(1, 2),
            jump(PyOp::JumpIfFalseOrPop, 0, 2),
            int(1, 3),
            jump(PyOp::JumpIfTrueOrPop, 0, 3),
            label(0),
            bare(PyOp::ReturnValue, 4),
        ]));

        assert_eq!(
            mnemonics("2.9.0", &module),
            vec![
                "PUSH1", "NOT", "JMPIFNOT", "PUSH1", "DUP", "JMPIFNOT", "DROP", "PUSH1", "DUP",
                "NOT", "JMPIFNOT", "DROP", "NOP", "RET"
            ]
        );
        assert_jumps_round_trip("2.9.0", &module);
    }

    // =========================================================================
    // Fixup widths
    // =========================================================================

    fn forward_jump_over(nops: usize) -> SourceModule {
        let mut body = vec![jump(PyOp::JumpForward, 0, 1)];
        body.extend((0..nops).map(|_| bare(PyOp::Nop, 2)));
        body.push(label(0));
        body.push(bare(PyOp::ReturnValue, 3));
        module_of(body)
    }

    fn backward_jump_over(nops: usize) -> SourceModule {
        let mut body = vec![label(0)];
        body.extend((0..nops).map(|_| bare(PyOp::Nop, 2)));
        body.push(jump(PyOp::JumpAbsolute, 0, 3));
        module_of(body)
    }

    #[test]
    fn test_largest_forward_offset_fits() {
        // JMP (3 bytes) + 32764 NOPs puts the label at 32767
        let module = compile(&forward_jump_over(32764));
        assert_eq!(&module.image[..3], &[0x62, 0xFF, 0x7F]);
    }

    #[test]
    fn test_forward_offset_overflow() {
        let err = compile_with(DEFAULT_TARGET, &forward_jump_over(32765)).unwrap_err();
        match err {
            CompileError::FixupOverflow {
                method,
                line,
                offset,
                width,
            } => {
                assert_eq!(method, "Main");
                assert_eq!(line, 1);
                assert_eq!(offset, 32768);
                assert_eq!(width, 2);
            }
            other => panic!("expected FixupOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_backward_offset_boundary() {
        // label NOP + n NOPs, the jump sits at n + 1
        let module = compile(&backward_jump_over(32767));
        let at = module.image.len() - 3;
        assert_eq!(&module.image[at..], &[0x62, 0x00, 0x80]);

        let err = compile_with(DEFAULT_TARGET, &backward_jump_over(32768)).unwrap_err();
        assert!(matches!(err, CompileError::FixupOverflow { offset: -32769, .. }));
    }

    #[test]
    fn test_neo3_long_jumps_do_not_overflow() {
        let module = compile_with("3.0.0", &forward_jump_over(40000)).unwrap();
        assert_eq!(&module.image[..5], &[0x23, 0x45, 0x9C, 0x00, 0x00]);
    }

    // =========================================================================
    // Unsupported instructions
    // =========================================================================

    #[test]
    fn test_unsupported_opcode_is_a_warning() {
        let module = compile(&module_of(vec![
            int(2, 3),
            int(3, 3),
            bare(PyOp::BinaryPower, 4),
            bare(PyOp::ReturnValue, 5),
        ]));

        assert_eq!(module.warnings.len(), 1);
        let warning = &module.warnings[0];
        assert_eq!(warning.opcode, PyOp::BinaryPower);
        assert_eq!(warning.line, 4);
        assert_eq!(warning.method, "Main");
        assert_eq!(mnemonics("2.9.0", &module), vec!["PUSH2", "PUSH3", "RET"]);
    }

    #[test]
    fn test_unsupported_call_leaves_no_bytes() {
        // unknown(1, 2): the argument SWAP is rolled back with the call
        let module = compile(&module_of(vec![
            name(PyOp::LoadGlobal, "unknown", 1),
            int(1, 1),
            int(2, 1),
            ins(PyOp::CallFunction, Operand::Int(2), 1),
            bare(PyOp::ReturnValue, 2),
        ]));

        assert_eq!(module.warnings.len(), 1);
        assert!(module.warnings[0].reason.contains("unknown"));
        assert_eq!(mnemonics("2.9.0", &module), vec!["PUSH1", "PUSH2", "RET"]);
        assert_eq!(module.method("Main").unwrap().tokens[3].size, 0);
    }

    #[test]
    fn test_strict_mode_rejects_warnings() {
        let module = module_of(vec![bare(PyOp::GetIter, 7), bare(PyOp::ReturnValue, 8)]);
        let options = CompileOptions {
            strict: true,
            ..CompileOptions::default()
        };

        let err = Compiler::new(options).unwrap().compile_module(&module).unwrap_err();
        match err {
            CompileError::Unsupported { count, first } => {
                assert_eq!(count, 1);
                assert!(first.contains("GET_ITER"));
                assert!(first.contains("line 7"));
            }
            other => panic!("expected Unsupported, got {:?}", other),
        }
    }

    // =========================================================================
    // Comparisons
    // =========================================================================

    #[test]
    fn test_every_comparison_maps_or_warns() {
        for kind in Compare::ALL {
            let module = compile(&module_of(vec![
                int(1, 1),
                int(2, 1),
                ins(PyOp::CompareOp, Operand::Compare(kind), 1),
                bare(PyOp::ReturnValue, 1),
            ]));
            let ops = mnemonics("2.9.0", &module);
            let middle = &ops[2..ops.len() - 1];

            let expected: &[&str] = match kind {
                Compare::Gt => &["GT"],
                Compare::Ge => &["GTE"],
                Compare::Lt => &["LT"],
                Compare::Le => &["LTE"],
                Compare::Eq | Compare::Is => &["EQUAL"],
                Compare::Ne | Compare::IsNot => &["NUMNOTEQUAL"],
                Compare::In => &["SWAP", "HASKEY"],
                Compare::NotIn => &["SWAP", "HASKEY", "NOT"],
                Compare::ExceptionMatch => &[],
            };
            assert_eq!(middle, expected, "{}", kind.symbol());
            assert_eq!(module.has_warnings(), kind == Compare::ExceptionMatch);
        }
    }

    // =========================================================================
    // Calls and frames
    // =========================================================================

    fn call_program() -> SourceModule {
        let main = SourceMethod::new(
            "Main",
            vec![
                name(PyOp::LoadGlobal, "add", 1),
                int(1, 1),
                int(2, 1),
                ins(PyOp::CallFunction, Operand::Int(2), 1),
                bare(PyOp::ReturnValue, 1),
            ],
        );
        let add = SourceMethod::new(
            "add",
            vec![
                name(PyOp::LoadFast, "a", 4),
                name(PyOp::LoadFast, "b", 4),
                bare(PyOp::BinaryAdd, 4),
                bare(PyOp::ReturnValue, 4),
            ],
        )
        .with_args(&["a", "b"]);
        SourceModule::new("calls", "Main")
            .with_method(add)
            .with_method(main)
    }

    #[test]
    fn test_internal_call_targets_method_start() {
        let module = compile(&call_program());

        // entry first regardless of declaration order
        assert_eq!(module.methods[0].name, "Main");
        assert_eq!(module.address_of("Main"), Some(0));
        let add = module.address_of("add").unwrap();

        let ops = decode(&crate::vm::neo2::CATALOG, &module.image, 0);
        let call = ops.iter().find(|d| d.mnemonic == "CALL").unwrap();
        assert_eq!(call.jump_target(), Some(add));
        assert_eq!(ops[2].mnemonic, "SWAP");
    }

    #[test]
    fn test_neo2_frame_prologue_and_epilogue() {
        let module = compile(&call_program());
        let code = module.code_of("add").unwrap();
        let ops: Vec<_> = decode(&crate::vm::neo2::CATALOG, code, 0)
            .iter()
            .map(|d| d.mnemonic)
            .collect();

        assert_eq!(
            &ops[..13],
            &[
                "PUSH2", "NEWARRAY", "TOALTSTACK",
                "DUPFROMALTSTACK", "PUSH0", "PUSH2", "ROLL", "SETITEM",
                "DUPFROMALTSTACK", "PUSH1", "PUSH2", "ROLL", "SETITEM",
            ]
        );
        assert_eq!(&ops[ops.len() - 3..], &["FROMALTSTACK", "DROP", "RET"]);
    }

    #[test]
    fn test_neo3_frame_uses_slots() {
        let module = compile_with("3.0.0", &call_program()).unwrap();
        let code = module.code_of("add").unwrap();

        // INITSLOT 0 locals 2 args ; LDARG0 ; LDARG1 ; ADD ; RET
        assert_eq!(code, &[0x57, 0x00, 0x02, 0x78, 0x79, 0x9E, 0x40]);
    }

    #[test]
    fn test_syscall_and_appcall_bindings() {
        let hash = "00112233445566778899aabbccddeeff00112233";
        let module = module_of(vec![
            name(PyOp::LoadGlobal, "Runtime", 1),
            name(PyOp::LoadMethod, "Notify", 1),
            int(5, 1),
            ins(PyOp::CallMethod, Operand::Int(1), 1),
            bare(PyOp::PopTop, 1),
            name(PyOp::LoadGlobal, "Token", 2),
            ins(PyOp::CallFunction, Operand::Int(0), 2),
            bare(PyOp::ReturnValue, 2),
        ])
        .with_binding("Runtime.Notify", Binding::Syscall("Neo.Runtime.Notify".into()))
        .with_binding("Token", Binding::AppCall(hash.into()));

        let compiled = compile(&module);
        assert!(!compiled.has_warnings(), "{:?}", compiled.warnings);

        let ops = decode(&crate::vm::neo2::CATALOG, &compiled.image, 0);
        assert_eq!(ops[1].mnemonic, "SYSCALL");
        assert_eq!(&ops[1].operand[1..], &b"Neo.Runtime.Notify"[..]);
        assert_eq!(ops[2].mnemonic, "APPCALL");
        assert_eq!(hex::encode(&ops[2].operand), hash);
    }

    #[test]
    fn test_invalid_appcall_hash() {
        let module = module_of(vec![bare(PyOp::ReturnValue, 1)])
            .with_binding("Token", Binding::AppCall("abcd".into()));

        let err = compile_with(DEFAULT_TARGET, &module).unwrap_err();
        assert!(matches!(err, CompileError::InvalidBinding { ref name, .. } if name == "Token"));
    }

    #[test]
    fn test_neo3_rejects_interop_calls() {
        let module = module_of(vec![
            name(PyOp::LoadGlobal, "Notify", 1),
            ins(PyOp::CallFunction, Operand::Int(0), 1),
            bare(PyOp::ReturnValue, 1),
        ])
        .with_binding("Notify", Binding::Syscall("System.Runtime.Notify".into()));

        let compiled = compile_with("3.0.0", &module).unwrap();
        assert_eq!(compiled.warnings.len(), 1);
        assert_eq!(compiled.image, vec![0x40]);
    }

    // =========================================================================
    // Selection and entry
    // =========================================================================

    #[test]
    fn test_invalid_dialect_fails_before_emission() {
        let options = CompileOptions {
            target: "1.0".into(),
            ..CompileOptions::default()
        };
        assert!(matches!(
            Compiler::new(options),
            Err(CompileError::InvalidDialect { .. })
        ));
    }

    #[test]
    fn test_unknown_entry() {
        let module = SourceModule::new("m", "Missing");
        let err = compile_with(DEFAULT_TARGET, &module).unwrap_err();
        assert_eq!(
            err,
            CompileError::UnknownEntry {
                name: "Missing".into()
            }
        );
    }

    #[test]
    fn test_entry_override() {
        let options = CompileOptions {
            entry: Some("add".into()),
            ..CompileOptions::default()
        };
        let module = Compiler::new(options)
            .unwrap()
            .compile_module(&call_program())
            .unwrap();

        assert_eq!(module.entry, "add");
        assert_eq!(module.methods[0].name, "add");
        assert_eq!(module.abi().entrypoint, "add");
    }

    // =========================================================================
    // Single instructions (neo2)
    // =========================================================================

    fn single_on(target: &str, mut body: Vec<Element>) -> Vec<&'static str> {
        body.push(bare(PyOp::ReturnValue, 9));
        let module = compile_with(target, &module_of(body)).unwrap();
        assert!(!module.has_warnings(), "{:?}", module.warnings);
        let mut ops = mnemonics(target, &module);
        ops.pop();
        ops
    }

    fn single(body: Vec<Element>) -> Vec<&'static str> {
        single_on(DEFAULT_TARGET, body)
    }

    #[test]
    fn test_constants() {
        assert_eq!(single(vec![ins(PyOp::LoadConst, Operand::None, 1)]), vec!["PUSH0"]);
        assert_eq!(single(vec![ins(PyOp::LoadConst, Operand::Bool(true), 1)]), vec!["PUSH1"]);
        assert_eq!(single(vec![int(-1, 1)]), vec!["PUSHM1"]);
        assert_eq!(single(vec![int(16, 1)]), vec!["PUSH16"]);
        assert_eq!(single(vec![int(17, 1)]), vec!["PUSHBYTES1"]);
        assert_eq!(single(vec![int(1000, 1)]), vec!["PUSHBYTES2"]);
        assert_eq!(single(vec![name(PyOp::LoadConst, "", 1)]), vec!["PUSH0"]);
        assert_eq!(single(vec![name(PyOp::LoadConst, &"x".repeat(75), 1)]), vec!["PUSHBYTES75"]);
        assert_eq!(single(vec![name(PyOp::LoadConst, &"x".repeat(76), 1)]), vec!["PUSHDATA1"]);
        assert_eq!(single(vec![name(PyOp::LoadConst, &"x".repeat(256), 1)]), vec!["PUSHDATA2"]);
    }

    #[test]
    fn test_stack_and_arithmetic() {
        assert_eq!(single(vec![bare(PyOp::DupTopTwo, 1)]), vec!["OVER", "OVER"]);
        assert_eq!(single(vec![bare(PyOp::RotTwo, 1)]), vec!["SWAP"]);
        assert_eq!(single(vec![bare(PyOp::RotThree, 1)]), vec!["ROT"]);
        assert_eq!(single(vec![bare(PyOp::InplaceAdd, 1)]), vec!["ADD"]);
        assert_eq!(single(vec![bare(PyOp::BinaryFloorDivide, 1)]), vec!["DIV"]);
        assert_eq!(single(vec![bare(PyOp::UnaryNot, 1)]), vec!["NOT"]);
        assert_eq!(single(vec![bare(PyOp::BinaryLshift, 1)]), vec!["SHL"]);
        assert_eq!(single(vec![bare(PyOp::PopTop, 1)]), Vec::<&str>::new());
        assert_eq!(single(vec![bare(PyOp::SetupLoop, 1)]), vec!["NOP"]);
        assert_eq!(single(vec![bare(PyOp::RaiseVarargs, 1)]), vec!["THROW"]);
    }

    #[test]
    fn test_containers() {
        let sized = |op, n| ins(op, Operand::Int(n), 1);
        assert_eq!(single(vec![sized(PyOp::BuildList, 0)]), vec!["PUSH0", "NEWARRAY"]);
        assert_eq!(single(vec![sized(PyOp::BuildTuple, 3)]), vec!["PUSH3", "PACK"]);
        assert_eq!(single(vec![sized(PyOp::BuildMap, 0)]), vec!["NEWMAP"]);
        assert_eq!(single(vec![bare(PyOp::BinarySubscr, 1)]), vec!["PICKITEM"]);
        assert_eq!(
            single(vec![sized(PyOp::BuildSlice, 2), bare(PyOp::BinarySubscr, 1)]),
            vec!["OVER", "SUB", "SUBSTR"]
        );
        assert_eq!(single(vec![bare(PyOp::StoreSubscr, 1)]), vec!["ROT", "SETITEM"]);
        assert_eq!(single(vec![bare(PyOp::DeleteSubscr, 1)]), vec!["REMOVE"]);
    }

    #[test]
    fn test_unsupported_containers() {
        let module = compile(&module_of(vec![
            ins(PyOp::BuildMap, Operand::Int(2), 1),
            ins(PyOp::BuildSlice, Operand::Int(3), 2),
            bare(PyOp::BuildConstKeyMap, 3),
            bare(PyOp::ReturnValue, 4),
        ]));
        let lines: Vec<_> = module.warnings.iter().map(|w| w.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn test_many_arguments_are_rolled() {
        let mut body = vec![name(PyOp::LoadGlobal, "Main", 1)];
        body.extend((1..=3).map(|n| int(n, 1)));
        body.push(ins(PyOp::CallFunction, Operand::Int(3), 1));
        let ops = single(body);

        assert_eq!(
            ops,
            vec!["PUSH1", "PUSH2", "PUSH3", "PUSH1", "ROLL", "PUSH2", "ROLL", "CALL"]
        );
    }

    #[test]
    fn test_front_end_stack_ops_pass_through() {
        assert_eq!(
            single(vec![
                bare(PyOp::FromAltStack, 1),
                bare(PyOp::Drop, 1),
                bare(PyOp::XSwap, 1),
                bare(PyOp::Roll, 1),
            ]),
            vec!["FROMALTSTACK", "DROP", "XSWAP", "ROLL"]
        );
    }

    #[test]
    fn test_slice_subscript_after_rejected_slice() {
        let module = compile(&module_of(vec![
            ins(PyOp::BuildSlice, Operand::Int(3), 1),
            bare(PyOp::BinarySubscr, 2),
            bare(PyOp::ReturnValue, 3),
        ]));

        let lines: Vec<_> = module.warnings.iter().map(|w| w.line).collect();
        assert_eq!(lines, vec![1, 2]);
        assert_eq!(mnemonics("2.9.0", &module), vec!["RET"]);
    }

    // =========================================================================
    // Pending names
    // =========================================================================

    #[test]
    fn test_stored_global_name_is_reported() {
        // x = LIMIT; return x
        let module = compile(&SourceModule::new("m", "Main").with_method(
            SourceMethod::new(
                "Main",
                vec![
                    name(PyOp::LoadGlobal, "LIMIT", 1),
                    name(PyOp::StoreFast, "x", 1),
                    name(PyOp::LoadFast, "x", 2),
                    bare(PyOp::ReturnValue, 2),
                ],
            )
            .with_locals(&["x"]),
        ));

        assert_eq!(module.warnings.len(), 1);
        let warning = &module.warnings[0];
        assert_eq!(warning.opcode, PyOp::LoadGlobal);
        assert_eq!(warning.line, 1);
        assert!(warning.reason.contains("'LIMIT'"));
    }

    #[test]
    fn test_name_never_called_is_reported_at_method_end() {
        let module = compile(&module_of(vec![
            name(PyOp::LoadGlobal, "LIMIT", 3),
            int(1, 3),
            bare(PyOp::BinaryAdd, 3),
            bare(PyOp::ReturnValue, 4),
        ]));

        assert_eq!(module.warnings.len(), 1);
        assert_eq!(module.warnings[0].line, 3);
        assert!(module.warnings[0].reason.contains("never called"));
    }

    #[test]
    fn test_attribute_of_local_is_not_a_callee() {
        // helper(a.b)
        let main = SourceMethod::new(
            "Main",
            vec![
                name(PyOp::LoadGlobal, "helper", 1),
                name(PyOp::LoadFast, "a", 1),
                name(PyOp::LoadAttr, "b", 2),
                ins(PyOp::CallFunction, Operand::Int(1), 3),
                bare(PyOp::ReturnValue, 3),
            ],
        )
        .with_args(&["a"]);
        let helper = SourceMethod::new(
            "helper",
            vec![name(PyOp::LoadFast, "x", 5), bare(PyOp::ReturnValue, 5)],
        )
        .with_args(&["x"]);
        let module = compile(
            &SourceModule::new("m", "Main")
                .with_method(main)
                .with_method(helper),
        );

        assert_eq!(module.warnings.len(), 1, "{:?}", module.warnings);
        assert_eq!(module.warnings[0].opcode, PyOp::LoadAttr);
        assert_eq!(module.warnings[0].line, 2);
        let call = decode(&crate::vm::neo2::CATALOG, &module.image, 0)
            .into_iter()
            .find(|d| d.mnemonic == "CALL")
            .unwrap();
        assert_eq!(call.jump_target(), module.address_of("helper"));
    }

    // =========================================================================
    // Malformed methods
    // =========================================================================

    #[test]
    fn test_repeated_argument_names() {
        let module = SourceModule::new("m", "Main").with_method(
            SourceMethod::new("Main", vec![bare(PyOp::ReturnValue, 1)]).with_args(&["a", "a"]),
        );

        for target in ["2.9.0", "3.0.0"] {
            let err = compile_with(target, &module).unwrap_err();
            assert!(
                matches!(err, CompileError::DuplicateArgument { ref name, .. } if name == "a"),
                "{:?}",
                err
            );
        }
    }

    #[test]
    fn test_label_defined_twice_is_an_error() {
        let module = module_of(vec![
            label(1),
            bare(PyOp::Nop, 1),
            label(1),
            bare(PyOp::ReturnValue, 2),
        ]);

        let err = compile_with(DEFAULT_TARGET, &module).unwrap_err();
        assert!(matches!(err, CompileError::DuplicateLabel { ref label, .. } if label == "L1"));
    }

    // =========================================================================
    // neo3 mapping
    // =========================================================================

    fn single3(body: Vec<Element>) -> Vec<&'static str> {
        single_on("3.0.0", body)
    }

    #[test]
    fn test_neo3_every_comparison_maps_or_warns() {
        for kind in Compare::ALL {
            let module = compile_with(
                "3.0.0",
                &module_of(vec![
                    int(1, 1),
                    int(2, 1),
                    ins(PyOp::CompareOp, Operand::Compare(kind), 1),
                    bare(PyOp::ReturnValue, 1),
                ]),
            )
            .unwrap();
            let ops = mnemonics("3.0.0", &module);
            let middle = &ops[2..ops.len() - 1];

            let expected: &[&str] = match kind {
                Compare::Gt => &["GT"],
                Compare::Ge => &["GE"],
                Compare::Lt => &["LT"],
                Compare::Le => &["LE"],
                Compare::Eq | Compare::Is => &["EQUAL"],
                Compare::Ne | Compare::IsNot => &["NOTEQUAL"],
                Compare::In => &["SWAP", "HASKEY"],
                Compare::NotIn => &["SWAP", "HASKEY", "NOT"],
                Compare::ExceptionMatch => &[],
            };
            assert_eq!(middle, expected, "{}", kind.symbol());
            assert_eq!(module.has_warnings(), kind == Compare::ExceptionMatch);
        }
    }

    #[test]
    fn test_neo3_constants() {
        assert_eq!(single3(vec![ins(PyOp::LoadConst, Operand::None, 1)]), vec!["PUSHNULL"]);
        assert_eq!(single3(vec![ins(PyOp::LoadConst, Operand::Bool(false), 1)]), vec!["PUSH0"]);
        assert_eq!(single3(vec![int(-1, 1)]), vec!["PUSHM1"]);
        assert_eq!(single3(vec![int(16, 1)]), vec!["PUSH16"]);
        assert_eq!(single3(vec![int(17, 1)]), vec!["PUSHINT8"]);
        assert_eq!(single3(vec![int(-128, 1)]), vec!["PUSHINT8"]);
        assert_eq!(single3(vec![int(128, 1)]), vec!["PUSHINT16"]);
        assert_eq!(single3(vec![int(-32768, 1)]), vec!["PUSHINT16"]);
        assert_eq!(single3(vec![int(32768, 1)]), vec!["PUSHINT32"]);
        assert_eq!(single3(vec![int(i32::MAX as i64 + 1, 1)]), vec!["PUSHINT64"]);
        assert_eq!(single3(vec![name(PyOp::LoadConst, "", 1)]), vec!["PUSHDATA1"]);
        assert_eq!(single3(vec![name(PyOp::LoadConst, &"x".repeat(256), 1)]), vec!["PUSHDATA2"]);
    }

    #[test]
    fn test_neo3_push_int_operands() {
        let body = vec![int(300, 1), bare(PyOp::ReturnValue, 1)];
        let module = compile_with("3.0.0", &module_of(body)).unwrap();
        assert_eq!(module.image, vec![0x01, 0x2C, 0x01, 0x40]);
    }

    #[test]
    fn test_neo3_containers_and_stack_ops() {
        let sized = |op, n| ins(op, Operand::Int(n), 1);
        assert_eq!(single3(vec![sized(PyOp::BuildList, 0)]), vec!["NEWARRAY0"]);
        assert_eq!(single3(vec![sized(PyOp::BuildTuple, 3)]), vec!["PUSH3", "PACK"]);
        assert_eq!(single3(vec![sized(PyOp::BuildMap, 0)]), vec!["NEWMAP"]);
        assert_eq!(single3(vec![bare(PyOp::BinarySubscr, 1)]), vec!["PICKITEM"]);
        assert_eq!(single3(vec![bare(PyOp::StoreSubscr, 1)]), vec!["ROT", "SETITEM"]);
        assert_eq!(single3(vec![bare(PyOp::Drop, 1), bare(PyOp::Roll, 1)]), vec!["DROP", "ROLL"]);
    }

    #[test]
    fn test_neo3_rejects_alt_stack_ops() {
        let module = compile_with(
            "3.0.0",
            &module_of(vec![
                bare(PyOp::FromAltStack, 1),
                bare(PyOp::XSwap, 2),
                bare(PyOp::ReturnValue, 3),
            ]),
        )
        .unwrap();

        let lines: Vec<_> = module.warnings.iter().map(|w| w.line).collect();
        assert_eq!(lines, vec![1, 2]);
        assert_eq!(module.image, vec![0x40]);
    }

    #[test]
    fn test_neo3_many_arguments_are_reversed() {
        let call_with = |argc: i64| {
            let mut body = vec![name(PyOp::LoadGlobal, "Main", 1)];
            body.extend((1..=argc).map(|n| int(n, 1)));
            body.push(ins(PyOp::CallFunction, Operand::Int(argc), 1));
            let mut ops = single3(body);
            ops.drain(..argc as usize);
            ops
        };

        assert_eq!(call_with(1), vec!["CALL_L"]);
        assert_eq!(call_with(2), vec!["SWAP", "CALL_L"]);
        assert_eq!(call_with(3), vec!["REVERSE3", "CALL_L"]);
        assert_eq!(call_with(4), vec!["REVERSE4", "CALL_L"]);
        assert_eq!(call_with(5), vec!["PUSH5", "REVERSEN", "CALL_L"]);
    }

    fn wide_method(args: usize, locals: usize, body: Vec<Element>) -> SourceModule {
        let mut method = SourceMethod::new("Main", body);
        method.args = (0..args).map(|i| format!("a{}", i)).collect();
        method.locals = (0..locals).map(|i| format!("l{}", i)).collect();
        SourceModule::new("wide", "Main").with_method(method)
    }

    #[test]
    fn test_neo3_slot_long_forms() {
        let module = compile_with(
            "3.0.0",
            &wide_method(
                8,
                8,
                vec![
                    name(PyOp::LoadFast, "a6", 1),
                    name(PyOp::LoadFast, "a7", 1),
                    name(PyOp::StoreFast, "a7", 1),
                    name(PyOp::LoadFast, "l7", 2),
                    name(PyOp::StoreFast, "l0", 2),
                    bare(PyOp::ReturnValue, 3),
                ],
            ),
        )
        .unwrap();

        // INITSLOT 8 8 ; LDARG6 ; LDARG 7 ; STARG 7 ; LDLOC 7 ; STLOC0 ; RET
        assert_eq!(
            module.image,
            vec![0x57, 8, 8, 0x7E, 0x7F, 7, 0x87, 7, 0x6F, 7, 0x70, 0x40]
        );
    }

    #[test]
    fn test_neo3_frame_too_large() {
        let body = || vec![bare(PyOp::ReturnValue, 1)];
        assert!(compile_with("3.0.0", &wide_method(0, 255, body())).is_ok());

        let err = compile_with("3.0.0", &wide_method(0, 256, body())).unwrap_err();
        assert_eq!(
            err,
            CompileError::FrameTooLarge {
                method: "Main".into(),
                slots: 256,
                limit: 255
            }
        );
    }

    #[test]
    fn test_neo3_conditional_jumps() {
        let module = compile_with(
            "3.0.0",
            &module_of(vec![
                int(1, 1),
                jump(PyOp::PopJumpIfTrue, 0, 1),
                int(1, 2),
                jump(PyOp::JumpIfTrueOrPop, 0, 2),
                int(1, 3),
                jump(PyOp::JumpIfFalseOrPop, 0, 3),
                label(0),
                bare(PyOp::ReturnValue, 4),
            ]),
        )
        .unwrap();

        assert_eq!(
            mnemonics("3.0.0", &module),
            vec![
                "PUSH1", "JMPIF_L", "PUSH1", "DUP", "JMPIF_L", "DROP", "PUSH1", "DUP",
                "JMPIFNOT_L", "DROP", "NOP", "RET"
            ]
        );
        assert_jumps_round_trip("3.0.0", &module);
    }
}
