//! # neocast
//!
//! Translates decoded source-VM bytecode (the stack bytecode a scripting
//! language compiler produces) into a loadable image for a NEO virtual
//! machine generation.
//!
//! The pipeline per module is strictly two-phase:
//!
//! 1. **Emission** - every method's instructions are wrapped into tokens and
//!    handed to the dialect's converter, which appends target opcodes to a
//!    per-method buffer and records fixups for every jump and internal call.
//! 2. **Resolution** - once every method is sized, the module layout is fixed
//!    and each fixup is patched with its signed, little-endian offset.

pub mod bytecode;
pub mod driver;
pub mod frontend;
pub mod lang;
pub mod vm;

pub use bytecode::compile::{CompileOptions, Compiler};
pub use bytecode::compile_error::{CompileError, UnsupportedOpcode};
pub use bytecode::ir::CompiledModule;
