use std::collections::HashMap;

use crate::bytecode::ir::CompiledModule;
use crate::bytecode::op::{Catalog, OperandSpec};

/// One decoded target instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub address: usize,
    pub byte: u8,
    /// `"???"` for bytes the catalog does not know.
    pub mnemonic: &'static str,
    pub operand: Vec<u8>,
}

impl Decoded {
    pub fn size(&self) -> usize {
        1 + self.operand.len()
    }

    /// Relative offset carried by a jump or call, if this is one.
    pub fn jump_offset(&self) -> Option<i64> {
        if !(self.mnemonic.starts_with("JMP") || matches!(self.mnemonic, "CALL" | "CALL_L")) {
            return None;
        }
        match self.operand.len() {
            1 => Some(self.operand[0] as i8 as i64),
            2 => Some(i16::from_le_bytes([self.operand[0], self.operand[1]]) as i64),
            4 => {
                let bytes = [self.operand[0], self.operand[1], self.operand[2], self.operand[3]];
                Some(i32::from_le_bytes(bytes) as i64)
            }
            _ => None,
        }
    }

    /// Absolute address a jump or call lands on.
    pub fn jump_target(&self) -> Option<usize> {
        let target = self.address as i64 + self.jump_offset()?;
        usize::try_from(target).ok()
    }
}

/// Decode `bytes` linearly. Addresses are relative to `base`.
///
/// Truncated operands at the end of the buffer are returned short rather than
/// rejected.
pub fn decode(catalog: &Catalog, bytes: &[u8], base: usize) -> Vec<Decoded> {
    let mut out = Vec::new();
    let mut pc = 0;

    while pc < bytes.len() {
        let byte = bytes[pc];
        let (mnemonic, spec) = match catalog.info(byte) {
            Some(info) => (info.mnemonic, info.operand),
            None => ("???", OperandSpec::None),
        };
        let rest = &bytes[pc + 1..];
        let len = match spec {
            OperandSpec::None => 0,
            OperandSpec::Fixed(n) => n,
            OperandSpec::Prefixed(width) => width.saturating_add(read_le(rest, width)),
            OperandSpec::VarBytes => {
                let (prefix, len) = read_var_len(rest);
                prefix.saturating_add(len)
            }
        }
        .min(rest.len());
        let operand = rest[..len].to_vec();
        out.push(Decoded {
            address: base + pc,
            byte,
            mnemonic,
            operand,
        });
        pc += 1 + len;
    }

    out
}

fn read_le(bytes: &[u8], width: usize) -> usize {
    bytes
        .iter()
        .take(width)
        .rev()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize)
}

fn read_var_len(bytes: &[u8]) -> (usize, usize) {
    match bytes.first() {
        None => (0, 0),
        Some(0xFD) => (3, read_le(&bytes[1..], 2)),
        Some(0xFE) => (5, read_le(&bytes[1..], 4)),
        Some(0xFF) => (9, read_le(&bytes[1..], 8)),
        Some(&n) => (1, n as usize),
    }
}

fn collect_jump_targets(code: &[Decoded]) -> Vec<usize> {
    let mut targets = Vec::new();

    for ins in code {
        if let Some(target) = ins.jump_target() {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
    }

    targets
}

// =============================================================================
// String output
// =============================================================================

/// Disassemble a raw buffer.
pub fn disassemble_to_string(catalog: &Catalog, bytes: &[u8]) -> String {
    format_code(&decode(catalog, bytes, 0))
}

/// Disassemble every method of a module, each under its own header.
pub fn disassemble_module(catalog: &Catalog, module: &CompiledModule) -> String {
    let mut output = String::new();

    for m in &module.methods {
        let code = module.code_of(&m.name).unwrap_or_default();
        output.push_str("════════════════════════════════════════\n");
        output.push_str(&format!(" {} @ {:04} ({} bytes)\n", m.name, m.address, m.length));
        output.push_str("════════════════════════════════════════\n");
        output.push_str(&format_code(&decode(catalog, code, m.address)));
        output.push('\n');
    }

    output
}

pub fn print_module(catalog: &Catalog, module: &CompiledModule) {
    println!("=== {} ({}) ===\n", module.name, catalog.name());
    print!("{}", disassemble_module(catalog, module));
}

fn format_code(code: &[Decoded]) -> String {
    let mut output = String::new();
    let jump_targets = collect_jump_targets(code);

    for ins in code {
        let is_target = jump_targets.contains(&ins.address);
        if is_target {
            output.push_str("      ┌──────────────────────────────────\n");
        }

        output.push_str(&format!("{:04} ", ins.address));
        output.push_str(if is_target { "► " } else { "  " });
        output.push_str(&format_ins(ins));
        output.push('\n');
    }

    output
}

fn format_ins(ins: &Decoded) -> String {
    if let (Some(offset), Some(target)) = (ins.jump_offset(), ins.jump_target()) {
        let direction = if offset < 0 { "↑" } else { "↓" };
        return format!("{:<11} {:+} {} (→ {:04})", ins.mnemonic, offset, direction, target);
    }
    if ins.operand.is_empty() {
        ins.mnemonic.to_string()
    } else {
        format!("{:<11} 0x{}", ins.mnemonic, hex::encode(&ins.operand))
    }
}

// =============================================================================
// Statistics
// =============================================================================

pub fn op_counts(code: &[Decoded]) -> HashMap<&'static str, usize> {
    let mut counts = HashMap::new();
    for ins in code {
        *counts.entry(ins.mnemonic).or_insert(0) += 1;
    }
    counts
}

pub fn print_stats(catalog: &Catalog, module: &CompiledModule) {
    println!("=== IMAGE STATISTICS ===\n");

    let code = decode(catalog, &module.image, 0);
    let total = code.len();

    println!("Methods:      {}", module.methods.len());
    println!("Bytes:        {}", module.image.len());
    println!("Instructions: {}", total);
    println!("Warnings:     {}", module.warnings.len());
    println!();

    println!("Op frequency:");
    let counts = op_counts(&code);
    let mut counts: Vec<_> = counts.iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

    for (op, count) in counts.iter().take(10) {
        let pct = (**count as f64 / total as f64) * 100.0;
        println!("  {:<14} {:>4} ({:>5.1}%)", op, count, pct);
    }
}
