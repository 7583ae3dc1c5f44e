use serde::Serialize;

use crate::bytecode::compile_error::UnsupportedOpcode;
use crate::bytecode::token::JumpRole;

/// A translated module: one flat image plus per-method metadata.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledModule {
    pub name: String,
    /// Name of the dialect the image targets (`neo2`, `neo3`).
    pub dialect: &'static str,
    pub entry: String,
    #[serde(with = "hex_bytes")]
    pub image: Vec<u8>,
    /// In image order; the entry method comes first.
    pub methods: Vec<MethodInfo>,
    /// Instructions that were skipped. Non-empty means best-effort output.
    pub warnings: Vec<UnsupportedOpcode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodInfo {
    pub name: String,
    pub address: usize,
    pub length: usize,
    pub args: Vec<String>,
    pub start_line: u32,
    pub tokens: Vec<TokenInfo>,
}

/// Resolved view of one token.
#[derive(Debug, Clone, Serialize)]
pub struct TokenInfo {
    pub index: usize,
    /// Absolute address of the first byte this token produced.
    pub address: usize,
    /// Bytes produced. Zero for elided and unsupported tokens.
    pub size: usize,
    pub line: u32,
    pub role: JumpRole,
    /// Source instruction as text.
    pub text: String,
}

/// Address range of one token, for source-level debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugEntry {
    pub method: String,
    pub start: usize,
    /// Inclusive.
    pub end: usize,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Abi {
    pub entrypoint: String,
    pub functions: Vec<AbiFunction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbiFunction {
    pub name: String,
    pub address: usize,
    pub parameters: Vec<String>,
}

impl CompiledModule {
    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn address_of(&self, name: &str) -> Option<usize> {
        self.method(name).map(|m| m.address)
    }

    /// Code of one method, sliced out of the image.
    pub fn code_of(&self, name: &str) -> Option<&[u8]> {
        let m = self.method(name)?;
        self.image.get(m.address..m.address + m.length)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.image)
    }

    /// One entry per token that produced code, in address order.
    pub fn debug_map(&self) -> Vec<DebugEntry> {
        self.methods
            .iter()
            .flat_map(|m| {
                m.tokens.iter().filter(|t| t.size > 0).map(|t| DebugEntry {
                    method: m.name.clone(),
                    start: t.address,
                    end: t.address + t.size - 1,
                    line: t.line,
                })
            })
            .collect()
    }

    pub fn abi(&self) -> Abi {
        Abi {
            entrypoint: self.entry.clone(),
            functions: self
                .methods
                .iter()
                .map(|m| AbiFunction {
                    name: m.name.clone(),
                    address: m.address,
                    parameters: m.args.clone(),
                })
                .collect(),
        }
    }
}

mod hex_bytes {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }
}
