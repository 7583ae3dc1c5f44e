use serde::{Deserialize, Serialize};

use crate::bytecode::compile_error::CompileError;

/// Local-scope table of one method: name -> slot index.
///
/// Slots are positional, arguments first. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    names: Vec<String>,
    args: usize,
}

impl Scope {
    /// Build the table for `method`. A local that repeats an argument keeps
    /// the argument's slot; a repeated argument is an error.
    pub fn new(method: &str, args: &[String], locals: &[String]) -> Result<Self, CompileError> {
        let mut names: Vec<String> = Vec::with_capacity(args.len() + locals.len());
        for name in args {
            if names.contains(name) {
                return Err(CompileError::DuplicateArgument {
                    method: method.to_string(),
                    name: name.clone(),
                });
            }
            names.push(name.clone());
        }
        for name in locals {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Ok(Self {
            names,
            args: args.len(),
        })
    }

    pub fn slot(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn is_arg(&self, slot: usize) -> bool {
        slot < self.args
    }

    pub fn arg_count(&self) -> usize {
        self.args
    }

    pub fn local_count(&self) -> usize {
        self.names.len() - self.args
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Module-level binding of a name that is not a method of the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    /// Interop service, called by its api name (`Runtime.Notify`).
    Syscall(String),
    /// Another deployed contract, by script hash (40 hex chars).
    AppCall(String),
}
