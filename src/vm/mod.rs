//! Target virtual machine generations: one opcode catalog per generation.

pub mod neo2;
pub mod neo3;
