//! Target dialects and their selection by version string.

use crate::bytecode::compile_error::CompileError;
use crate::bytecode::converter::Converter;
use crate::bytecode::converter::neo2::Neo2Converter;
use crate::bytecode::converter::neo3::Neo3Converter;
use crate::bytecode::emitter::JumpWidth;
use crate::bytecode::op::Catalog;
use crate::vm;

/// Everything that differs between target VM versions.
pub struct Dialect {
    pub name: &'static str,
    pub catalog: &'static Catalog,
    pub converter: &'static dyn Converter,
    /// Width reserved for every jump and call operand. Never promoted.
    pub jump_width: JumpWidth,
}

impl std::fmt::Debug for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialect")
            .field("name", &self.name)
            .field("jump_width", &self.jump_width)
            .finish()
    }
}

pub static NEO2: Dialect = Dialect {
    name: "neo2",
    catalog: &vm::neo2::CATALOG,
    converter: &Neo2Converter,
    jump_width: JumpWidth::Short,
};

pub static NEO3: Dialect = Dialect {
    name: "neo3",
    catalog: &vm::neo3::CATALOG,
    converter: &Neo3Converter,
    jump_width: JumpWidth::Long,
};

pub const DEFAULT_TARGET: &str = "2.9.0";

/// Pick the dialect for a target version: `2.*` is NEO 2, `3.*` is NEO 3.
pub fn select(version: &str) -> Result<&'static Dialect, CompileError> {
    let major = version.trim().split('.').next().unwrap_or("");
    match major {
        "2" => Ok(&NEO2),
        "3" => Ok(&NEO3),
        _ => Err(CompileError::invalid_dialect(version)),
    }
}
