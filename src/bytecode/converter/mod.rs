//! Per-dialect translation of single source instructions.
//!
//! A converter never fails the compilation for an instruction it cannot map:
//! it answers [`Outcome::Unsupported`] and the driver rolls back whatever was
//! emitted for that token and records a warning.

pub mod neo2;
pub mod neo3;

use crate::bytecode::compile_error::CompileError;
use crate::bytecode::emitter::Emitter;
use crate::bytecode::token::Token;

/// Result of translating one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// One or more target instructions were written.
    Emitted,
    /// Valid instruction with no target code (`POP_TOP`, name loads that only
    /// feed a later call).
    Elided,
    /// No mapping in this dialect; the reason ends up in the warning.
    Unsupported(String),
}

impl Outcome {
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Outcome::Unsupported(reason.into())
    }
}

pub trait Converter: Sync {
    /// Emit the method prologue, before the first token.
    fn begin_method(&self, _em: &mut Emitter<'_>) -> Result<(), CompileError> {
        Ok(())
    }

    /// Translate `token`. `prev` is the token emitted just before it, if any.
    fn translate(&self, em: &mut Emitter<'_>, token: &Token, prev: Option<&Token>) -> Outcome;
}

/// Minimal little-endian two's-complement encoding. Zero encodes as no bytes.
pub fn int_to_bytes(n: i64) -> Vec<u8> {
    if n == 0 {
        return Vec::new();
    }
    let mut out = n.to_le_bytes().to_vec();
    while out.len() > 1 {
        let last = out[out.len() - 1];
        let sign_of_prev = out[out.len() - 2] & 0x80;
        let redundant = (last == 0x00 && sign_of_prev == 0) || (last == 0xFF && sign_of_prev != 0);
        if !redundant {
            break;
        }
        out.pop();
    }
    out
}

/// Variable-length prefix (`0xFD`/`0xFE`/`0xFF` markers) followed by `data`.
pub fn var_bytes(data: &[u8]) -> Vec<u8> {
    let len = data.len();
    let mut out = Vec::with_capacity(len + 9);
    if len < 0xFD {
        out.push(len as u8);
    } else if len <= 0xFFFF {
        out.push(0xFD);
        out.extend_from_slice(&(len as u16).to_le_bytes());
    } else if len <= 0xFFFF_FFFF {
        out.push(0xFE);
        out.extend_from_slice(&(len as u32).to_le_bytes());
    } else {
        out.push(0xFF);
        out.extend_from_slice(&(len as u64).to_le_bytes());
    }
    out.extend_from_slice(data);
    out
}
