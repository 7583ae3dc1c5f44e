use tracing::trace;

use crate::bytecode::compile::ModuleContext;
use crate::bytecode::compile_error::CompileError;
use crate::bytecode::dialect::Dialect;
use crate::bytecode::token::{Token, TokenArena};
use crate::lang::instruction::LabelId;
use crate::lang::program::SourceMethod;
use crate::lang::scope::Scope;

/// Width of a reserved jump/call operand. Always little-endian, signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpWidth {
    /// 2 bytes (`i16`).
    Short,
    /// 4 bytes (`i32`).
    Long,
}

impl JumpWidth {
    pub fn bytes(self) -> usize {
        match self {
            JumpWidth::Short => 2,
            JumpWidth::Long => 4,
        }
    }

    /// Encode `offset`, or `None` if it does not fit.
    pub fn encode(self, offset: i64) -> Option<Vec<u8>> {
        match self {
            JumpWidth::Short => i16::try_from(offset).ok().map(|v| v.to_le_bytes().to_vec()),
            JumpWidth::Long => i32::try_from(offset).ok().map(|v| v.to_le_bytes().to_vec()),
        }
    }
}

/// What a fixup points at once the layout is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixupTarget {
    /// A label of the same method.
    Label(LabelId),
    /// The first byte of a method, by emission index.
    Method(usize),
}

/// Deferred patch of a reserved operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixup {
    /// Token that emitted the jump.
    pub token: usize,
    /// Offset of the jump opcode within the method buffer.
    pub origin: usize,
    /// Offset of the reserved operand within the method buffer.
    pub at: usize,
    pub width: JumpWidth,
    pub target: FixupTarget,
}

/// How a call target resolved at module level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callee<'m> {
    Method(usize),
    Syscall(&'m str),
    AppCall([u8; 20]),
}

/// A name loaded from outside the local scope. It produces no code and must
/// be consumed by a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCallee {
    /// Dotted name, qualified by the attribute loads that follow it.
    pub name: String,
    /// Token that loaded the name.
    pub token: usize,
    /// Last token that loaded or qualified it.
    last: usize,
}

/// Buffer position to roll back to when a token turns out unsupported.
#[derive(Debug, Clone, Copy)]
pub struct Mark {
    len: usize,
    fixups: usize,
}

/// Result of phase 1 for one method: code with reserved operands still zero.
#[derive(Debug, Clone)]
pub struct EmittedMethod {
    pub name: String,
    pub args: Vec<String>,
    pub start_line: u32,
    pub arena: TokenArena,
    pub code: Vec<u8>,
    /// Start of each token's code, relative to the method.
    pub token_offsets: Vec<usize>,
    pub fixups: Vec<Fixup>,
}

/// Accumulates one method's target code.
pub struct Emitter<'a> {
    ctx: &'a ModuleContext<'a>,
    method: &'a SourceMethod,
    scope: Scope,
    buf: Vec<u8>,
    token_offsets: Vec<usize>,
    fixups: Vec<Fixup>,
    callees: Vec<PendingCallee>,
    token: usize,
}

impl<'a> Emitter<'a> {
    pub fn new(
        ctx: &'a ModuleContext<'a>,
        method: &'a SourceMethod,
    ) -> Result<Self, CompileError> {
        Ok(Self {
            ctx,
            method,
            scope: method.scope()?,
            buf: Vec::new(),
            token_offsets: Vec::with_capacity(method.body.len()),
            fixups: Vec::new(),
            callees: Vec::new(),
            token: 0,
        })
    }

    pub fn dialect(&self) -> &'static Dialect {
        self.ctx.dialect()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn method_name(&self) -> &str {
        &self.method.name
    }

    /// Running address, relative to the start of the method.
    pub fn address(&self) -> usize {
        self.buf.len()
    }

    pub fn code(&self) -> &[u8] {
        &self.buf
    }

    /// Record the start of token `index` and return a rollback mark.
    pub fn begin_token(&mut self, index: usize) -> Mark {
        self.token = index;
        self.token_offsets.push(self.buf.len());
        Mark {
            len: self.buf.len(),
            fixups: self.fixups.len(),
        }
    }

    /// Bytes emitted so far for token `index`.
    pub fn size_of(&self, index: usize) -> usize {
        let Some(&start) = self.token_offsets.get(index) else {
            return 0;
        };
        let end = self
            .token_offsets
            .get(index + 1)
            .copied()
            .unwrap_or(self.buf.len());
        end.saturating_sub(start)
    }

    /// Drop everything emitted since `mark`.
    pub fn rollback(&mut self, mark: Mark) {
        self.buf.truncate(mark.len);
        self.fixups.truncate(mark.fixups);
    }

    pub fn emit(&mut self, op: u8) {
        self.trace_op(op);
        self.buf.push(op);
    }

    pub fn emit_with(&mut self, op: u8, operand: &[u8]) {
        self.trace_op(op);
        self.buf.push(op);
        self.buf.extend_from_slice(operand);
    }

    /// Emit a jump to `label` with a zeroed operand and register its fixup.
    pub fn emit_jump(&mut self, op: u8, label: LabelId) {
        self.emit_fixup(op, FixupTarget::Label(label));
    }

    /// Emit an internal call to the method at emission index `method`.
    pub fn emit_call(&mut self, op: u8, method: usize) {
        self.emit_fixup(op, FixupTarget::Method(method));
    }

    fn emit_fixup(&mut self, op: u8, target: FixupTarget) {
        let width = self.dialect().jump_width;
        let origin = self.buf.len();
        self.emit(op);
        let at = self.buf.len();
        self.buf.resize(at + width.bytes(), 0);
        self.fixups.push(Fixup {
            token: self.token,
            origin,
            at,
            width,
            target,
        });
    }

    // -------------------------------------------------------------------------
    // Pending callees: names loaded from outside the local scope wait here
    // until the call instruction that consumes them.
    // -------------------------------------------------------------------------

    pub fn push_callee(&mut self, name: &str) {
        self.callees.push(PendingCallee {
            name: name.to_string(),
            token: self.token,
            last: self.token,
        });
    }

    /// Append `.attr` to the innermost pending callee, but only when `prev`
    /// is the token that loaded or last qualified it.
    pub fn qualify_callee(&mut self, attr: &str, prev: Option<&Token>) -> bool {
        let token = self.token;
        match (self.callees.last_mut(), prev) {
            (Some(pending), Some(prev)) if pending.last == prev.index => {
                pending.name.push('.');
                pending.name.push_str(attr);
                pending.last = token;
                true
            }
            _ => false,
        }
    }

    pub fn take_callee(&mut self) -> Option<String> {
        self.callees.pop().map(|p| p.name)
    }

    /// Remove the innermost pending callee if `prev` produced it, for a token
    /// that consumes the value a call target never pushed.
    pub fn abandon_callee(&mut self, prev: &Token) -> Option<PendingCallee> {
        if self.callees.last().is_some_and(|p| p.last == prev.index) {
            self.callees.pop()
        } else {
            None
        }
    }

    /// Callees still waiting for a call, innermost last.
    pub fn pending_callees(&self) -> &[PendingCallee] {
        &self.callees
    }

    pub fn resolve_callee(&self, name: &str) -> Option<Callee<'a>> {
        self.ctx.resolve_callee(name)
    }

    /// Close the method. Pending callees are dropped; report them first.
    pub fn finish(self, arena: TokenArena) -> EmittedMethod {
        EmittedMethod {
            name: self.method.name.clone(),
            args: self.method.args.clone(),
            start_line: self.method.start_line,
            arena,
            code: self.buf,
            token_offsets: self.token_offsets,
            fixups: self.fixups,
        }
    }

    fn trace_op(&self, op: u8) {
        trace!(
            method = %self.method.name,
            token = self.token,
            address = self.buf.len(),
            op = self.dialect().catalog.mnemonic_of(op).unwrap_or("?"),
            "emit"
        );
    }
}
