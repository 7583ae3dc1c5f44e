pub mod compile;
pub mod compile_error;
pub mod converter;
pub mod dialect;
pub mod disasm;
pub mod emitter;
pub mod ir;
pub mod op;
pub mod resolver;
pub mod token;

pub use compile::{CompileOptions, Compiler};
pub use ir::CompiledModule;
