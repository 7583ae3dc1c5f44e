use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bytecode::compile_error::CompileError;
use crate::lang::instruction::Element;
use crate::lang::scope::{Binding, Scope};

/// One method as decoded by the front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMethod {
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub locals: Vec<String>,
    #[serde(default)]
    pub start_line: u32,
    pub body: Vec<Element>,
}

impl SourceMethod {
    pub fn new(name: impl Into<String>, body: Vec<Element>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            locals: Vec::new(),
            start_line: 1,
            body,
        }
    }

    pub fn with_args(mut self, args: &[&str]) -> Self {
        self.args = args.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_locals(mut self, locals: &[&str]) -> Self {
        self.locals = locals.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn scope(&self) -> Result<Scope, CompileError> {
        Scope::new(&self.name, &self.args, &self.locals)
    }
}

/// A decoded module: the unit of one compilation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceModule {
    pub name: String,
    /// Name of the entry method. Emitted first, at address 0.
    pub entry: String,
    pub methods: Vec<SourceMethod>,
    /// Names resolvable at module level that are not methods.
    #[serde(default)]
    pub bindings: BTreeMap<String, Binding>,
}

impl SourceModule {
    pub fn new(name: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry: entry.into(),
            methods: Vec::new(),
            bindings: BTreeMap::new(),
        }
    }

    pub fn with_method(mut self, method: SourceMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_binding(mut self, name: impl Into<String>, binding: Binding) -> Self {
        self.bindings.insert(name.into(), binding);
        self
    }

    pub fn method(&self, name: &str) -> Option<&SourceMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn from_json(source: &str) -> Result<Self, CompileError> {
        serde_json::from_str(source).map_err(|e| CompileError::load("json", e))
    }

    pub fn from_postcard(bytes: &[u8]) -> Result<Self, CompileError> {
        postcard::from_bytes(bytes).map_err(|e| CompileError::load("postcard", e))
    }

    pub fn to_postcard(&self) -> Result<Vec<u8>, CompileError> {
        postcard::to_allocvec(self).map_err(|e| CompileError::load("postcard", e))
    }
}
