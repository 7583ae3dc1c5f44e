//! # Source instruction model
//!
//! This module defines the decoded source bytecode handed over by the
//! front-end: opcodes, operands, labels, per-method scope tables and the
//! module-level bindings used to resolve call targets.
//!
//! ## Conventions
//!
//! - Instructions are immutable once decoded.
//! - Labels are zero-width markers, scoped to the method that declares them.
//! - Slot indices in a scope are positional: arguments first, then locals.

pub mod instruction;
pub mod opcode;
pub mod program;
pub mod scope;
