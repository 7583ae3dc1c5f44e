use std::collections::HashMap;

use serde::Serialize;

use crate::bytecode::compile_error::CompileError;
use crate::lang::instruction::{Element, Instruction, LabelId, Operand};
use crate::lang::opcode::PyOp;

/// Part a token plays in jump linkage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpRole {
    None,
    /// The instruction's operand names a label.
    Source(LabelId),
    /// The token marks a label position; it materializes as a `NOP`.
    Target(LabelId),
}

/// One source instruction in the context of its method.
///
/// Tokens carry no addresses: those live in the address table produced by
/// resolution, indexed by `(method, token index)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub index: usize,
    pub instruction: Instruction,
    pub role: JumpRole,
}

impl Token {
    /// Wrap one element. A label becomes a `NOP` on `fallback_line`.
    pub fn new(element: &Element, index: usize, fallback_line: u32) -> Self {
        match element {
            Element::Label(label) => Self {
                index,
                instruction: Instruction::nop(fallback_line),
                role: JumpRole::Target(*label),
            },
            Element::Instr(instr) => Self {
                index,
                instruction: instr.clone(),
                role: instr.operand.as_label().map_or(JumpRole::None, JumpRole::Source),
            },
        }
    }

    pub fn opcode(&self) -> PyOp {
        self.instruction.opcode
    }

    pub fn operand(&self) -> &Operand {
        &self.instruction.operand
    }

    pub fn line(&self) -> u32 {
        self.instruction.line
    }

    pub fn jump_label(&self) -> Option<LabelId> {
        match self.role {
            JumpRole::Source(label) => Some(label),
            _ => None,
        }
    }

}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.role {
            JumpRole::Target(label) => write!(f, "{}:", label),
            _ => write!(f, "{}", self.instruction),
        }
    }
}

/// All tokens of one method, in source order, plus the label index.
#[derive(Debug, Clone, Default)]
pub struct TokenArena {
    tokens: Vec<Token>,
    labels: HashMap<LabelId, usize>,
}

impl TokenArena {
    /// Tokenize the body of `method`. Each label id may be defined once.
    pub fn from_elements(
        method: &str,
        elements: &[Element],
        start_line: u32,
    ) -> Result<Self, CompileError> {
        let mut tokens = Vec::with_capacity(elements.len());
        let mut labels = HashMap::new();
        let mut last_line = start_line;

        for (index, element) in elements.iter().enumerate() {
            let token = Token::new(element, index, last_line);
            if let JumpRole::Target(label) = token.role {
                if labels.insert(label, index).is_some() {
                    return Err(CompileError::DuplicateLabel {
                        method: method.to_string(),
                        label: label.to_string(),
                    });
                }
            }
            last_line = token.line();
            tokens.push(token);
        }

        Ok(Self { tokens, labels })
    }

    /// Index of the JUMP_TARGET token for `label`.
    pub fn target_of(&self, label: LabelId) -> Option<usize> {
        self.labels.get(&label).copied()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
