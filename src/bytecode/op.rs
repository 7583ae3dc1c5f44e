use once_cell::sync::OnceCell;
use std::collections::HashMap;

// =============================================================================
// OpcodeCatalog - target VM mnemonics <-> byte values
// =============================================================================

/// How many operand bytes follow an opcode in the instruction stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSpec {
    None,
    /// Exactly `n` bytes.
    Fixed(usize),
    /// A little-endian length of the given width, then that many bytes.
    Prefixed(usize),
    /// A variable-length integer length, then that many bytes.
    VarBytes,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    pub mnemonic: &'static str,
    pub byte: u8,
    pub operand: OperandSpec,
}

impl OpInfo {
    pub const fn new(mnemonic: &'static str, byte: u8, operand: OperandSpec) -> Self {
        Self {
            mnemonic,
            byte,
            operand,
        }
    }

    pub const fn bare(mnemonic: &'static str, byte: u8) -> Self {
        Self::new(mnemonic, byte, OperandSpec::None)
    }
}

/// Static bidirectional table for one VM generation.
///
/// Entries are fixed at compile time; the lookup indexes are built once on
/// first use and only read afterwards, so one catalog can be shared by any
/// number of compilation runs.
pub struct Catalog {
    name: &'static str,
    entries: &'static [OpInfo],
    by_mnemonic: OnceCell<HashMap<&'static str, usize>>,
    by_byte: OnceCell<HashMap<u8, usize>>,
}

impl Catalog {
    pub const fn new(name: &'static str, entries: &'static [OpInfo]) -> Self {
        Self {
            name,
            entries,
            by_mnemonic: OnceCell::new(),
            by_byte: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn entries(&self) -> &'static [OpInfo] {
        self.entries
    }

    pub fn byte_of(&self, mnemonic: &str) -> Option<u8> {
        let index = self.by_mnemonic.get_or_init(|| {
            self.entries
                .iter()
                .enumerate()
                .map(|(i, e)| (e.mnemonic, i))
                .collect()
        });
        index.get(mnemonic).map(|&i| self.entries[i].byte)
    }

    /// Reverse lookup, for diagnostics and disassembly only.
    pub fn info(&self, byte: u8) -> Option<&'static OpInfo> {
        let index = self.by_byte.get_or_init(|| {
            self.entries
                .iter()
                .enumerate()
                .map(|(i, e)| (e.byte, i))
                .collect()
        });
        index.get(&byte).map(|&i| &self.entries[i])
    }

    pub fn mnemonic_of(&self, byte: u8) -> Option<&'static str> {
        self.info(byte).map(|e| e.mnemonic)
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("name", &self.name)
            .field("entries", &self.entries.len())
            .finish()
    }
}
