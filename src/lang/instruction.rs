use serde::{Deserialize, Serialize};

use crate::lang::opcode::{Compare, PyOp};

/// Identifier of a label inside one method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelId(pub u32);

impl std::fmt::Display for LabelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Typed operand of a source instruction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    #[default]
    None,
    Int(i64),
    Bool(bool),
    Str(String),
    Bytes(Vec<u8>),
    /// Reference to a label: the instruction is a jump source.
    Label(LabelId),
    Compare(Compare),
}

impl Operand {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Operand::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Operand::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<LabelId> {
        match self {
            Operand::Label(l) => Some(*l),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Int(n) => write!(f, "{}", n),
            Operand::Bool(b) => write!(f, "{}", b),
            Operand::Str(s) => write!(f, "{:?}", s),
            Operand::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Operand::Label(l) => write!(f, "{}", l),
            Operand::Compare(c) => write!(f, "{}", c.symbol()),
        }
    }
}

/// One decoded source instruction. Never mutated after decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: PyOp,
    #[serde(default)]
    pub operand: Operand,
    #[serde(default)]
    pub line: u32,
}

impl Instruction {
    pub fn new(opcode: PyOp, operand: Operand, line: u32) -> Self {
        Self {
            opcode,
            operand,
            line,
        }
    }

    /// Instruction without operand.
    pub fn bare(opcode: PyOp, line: u32) -> Self {
        Self::new(opcode, Operand::None, line)
    }

    pub fn nop(line: u32) -> Self {
        Self::bare(PyOp::Nop, line)
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.operand {
            Operand::None => write!(f, "{}", self.opcode),
            ref operand => write!(f, "{} {}", self.opcode, operand),
        }
    }
}

/// Element of a method body as the front-end emits it: either a real
/// instruction or a label marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Instr(Instruction),
    Label(LabelId),
}

impl From<Instruction> for Element {
    fn from(instr: Instruction) -> Self {
        Element::Instr(instr)
    }
}
