use serde::Serialize;
use thiserror::Error;

use crate::lang::opcode::PyOp;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// A patched jump offset does not fit the operand reserved for it.
    #[error(
        "compile error: jump offset {offset} in '{method}' (line {line}) does not fit a {width}-byte operand\n  hint: split the method; jump widths are never promoted"
    )]
    FixupOverflow {
        method: String,
        line: u32,
        offset: i64,
        width: usize,
    },

    /// A fixup whose target does not exist in the module.
    #[error("compile error: internal error: unresolved fixup in '{method}' to {target}")]
    UnresolvedFixup { method: String, target: String },

    /// The same reserved operand was patched twice.
    #[error("compile error: internal error: operand at {at} in '{method}' patched twice")]
    DoublePatch { method: String, at: usize },

    #[error(
        "compile error: no target dialect registered for version '{requested}'\n  hint: use a 2.x or 3.x version string"
    )]
    InvalidDialect { requested: String },

    #[error("compile error: entry method '{name}' is not defined in the module")]
    UnknownEntry { name: String },

    #[error("compile error: binding '{name}' is invalid: {reason}")]
    InvalidBinding { name: String, reason: String },

    #[error("compile error: argument '{name}' of '{method}' is declared twice")]
    DuplicateArgument { method: String, name: String },

    /// Two label elements with the same id in one method.
    #[error(
        "compile error: label {label} is defined twice in '{method}'\n  hint: label ids must be unique per method"
    )]
    DuplicateLabel { method: String, label: String },

    #[error(
        "compile error: method '{method}' needs {slots} slots, more than the {limit} the target supports"
    )]
    FrameTooLarge {
        method: String,
        slots: usize,
        limit: usize,
    },

    /// Best-effort output rejected because strict mode is on.
    #[error("compile error: {count} unsupported instruction(s), first: {first}")]
    Unsupported { count: usize, first: String },

    #[error("compile error: cannot load {format} module: {message}")]
    Load {
        format: &'static str,
        message: String,
    },
}

impl CompileError {
    pub fn overflow(method: &str, line: u32, offset: i64, width: usize) -> Self {
        CompileError::FixupOverflow {
            method: method.to_string(),
            line,
            offset,
            width,
        }
    }

    pub fn unresolved(method: &str, target: impl std::fmt::Display) -> Self {
        CompileError::UnresolvedFixup {
            method: method.to_string(),
            target: target.to_string(),
        }
    }

    pub fn invalid_dialect(requested: &str) -> Self {
        CompileError::InvalidDialect {
            requested: requested.to_string(),
        }
    }

    pub fn invalid_binding(name: &str, reason: impl Into<String>) -> Self {
        CompileError::InvalidBinding {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn load(format: &'static str, err: impl std::fmt::Display) -> Self {
        CompileError::Load {
            format,
            message: err.to_string(),
        }
    }

    /// True for conditions that indicate a bug rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CompileError::UnresolvedFixup { .. } | CompileError::DoublePatch { .. }
        )
    }
}

/// Warning raised when a source instruction has no mapping in the active
/// dialect. The instruction contributes no bytes; compilation continues.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsupportedOpcode {
    pub opcode: PyOp,
    pub operand: String,
    pub method: String,
    /// Line of the instruction.
    pub line: u32,
    /// First line of the owning method.
    pub method_line: u32,
    pub reason: String,
}

impl std::fmt::Display for UnsupportedOpcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "op not converted: {}", self.opcode)?;
        if !self.operand.is_empty() {
            write!(f, " {}", self.operand)?;
        }
        write!(
            f,
            " in '{}' at line {} (method starts at line {}): {}",
            self.method, self.line, self.method_line, self.reason
        )
    }
}
