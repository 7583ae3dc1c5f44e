//! Phase 2: lay methods out back to back and patch every reserved operand.

use std::collections::HashSet;

use tracing::debug;

use crate::bytecode::compile_error::CompileError;
use crate::bytecode::emitter::{EmittedMethod, FixupTarget};

/// Final addresses, separate from the tokens they describe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressMap {
    /// Absolute start of each method, by emission index.
    pub bases: Vec<usize>,
    /// Absolute start of each token, by emission index then token index.
    pub tokens: Vec<Vec<usize>>,
}

impl AddressMap {
    pub fn method(&self, method: usize) -> Option<usize> {
        self.bases.get(method).copied()
    }

    /// Address of a token. Tokens that produced no entry report 0.
    pub fn token(&self, method: usize, token: usize) -> usize {
        self.tokens
            .get(method)
            .and_then(|t| t.get(token))
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct Resolved {
    pub image: Vec<u8>,
    pub addresses: AddressMap,
}

/// Concatenate `methods` in order and patch all fixups.
///
/// Offsets are measured from the jump opcode byte to the first byte of the
/// target. Fixups are patched in emission order; any failure aborts with no
/// partial image.
pub fn resolve(methods: &[EmittedMethod]) -> Result<Resolved, CompileError> {
    let mut bases = Vec::with_capacity(methods.len());
    let mut next = 0usize;
    for m in methods {
        bases.push(next);
        next += m.code.len();
    }

    let mut image = Vec::with_capacity(next);
    let mut tokens = Vec::with_capacity(methods.len());
    for (m, base) in methods.iter().zip(&bases) {
        image.extend_from_slice(&m.code);
        tokens.push(m.token_offsets.iter().map(|off| base + off).collect());
    }

    let mut patched = HashSet::new();
    for (m, &base) in methods.iter().zip(&bases) {
        for fixup in &m.fixups {
            let target = match fixup.target {
                FixupTarget::Label(label) => m
                    .arena
                    .target_of(label)
                    .and_then(|idx| m.token_offsets.get(idx))
                    .map(|off| base + off)
                    .ok_or_else(|| CompileError::unresolved(&m.name, label))?,
                FixupTarget::Method(index) => *bases
                    .get(index)
                    .ok_or_else(|| CompileError::unresolved(&m.name, format!("method #{}", index)))?,
            };

            let origin = base + fixup.origin;
            let offset = target as i64 - origin as i64;
            let line = m
                .arena
                .get(fixup.token)
                .map(|t| t.line())
                .unwrap_or(m.start_line);
            let bytes = fixup
                .width
                .encode(offset)
                .ok_or_else(|| CompileError::overflow(&m.name, line, offset, fixup.width.bytes()))?;

            let at = base + fixup.at;
            if !patched.insert(at) {
                return Err(CompileError::DoublePatch {
                    method: m.name.clone(),
                    at,
                });
            }
            image[at..at + bytes.len()].copy_from_slice(&bytes);
        }
        debug!(method = %m.name, base, fixups = m.fixups.len(), "resolved");
    }

    Ok(Resolved {
        image,
        addresses: AddressMap { bases, tokens },
    })
}
