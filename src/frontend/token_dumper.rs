use crate::bytecode::ir::{CompiledModule, MethodInfo, TokenInfo};
use crate::bytecode::token::JumpRole;

/// Prints each method's token stream with its resolved addresses.
pub struct TokenDumper {
    pub color: bool,
    pub show_debug_repr: bool, // if false, prints the source text of each token
}

impl Default for TokenDumper {
    fn default() -> Self {
        Self {
            color: true,
            show_debug_repr: true,
        }
    }
}

impl TokenDumper {
    // ANSI colors
    const RESET: &'static str = "\x1b[0m";
    const DIM: &'static str = "\x1b[2m";
    const YEL: &'static str = "\x1b[33m";
    const CYN: &'static str = "\x1b[36m";
    const MAG: &'static str = "\x1b[35m";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.show_debug_repr = false;
        self
    }

    pub fn dump(&self, module: &CompiledModule) {
        print!("{}", self.render(module));
    }

    pub fn render(&self, module: &CompiledModule) -> String {
        let mut out = String::new();
        for m in &module.methods {
            self.render_method(m, &mut out);
        }
        out
    }

    fn render_method(&self, m: &MethodInfo, out: &mut String) {
        out.push_str(&format!(
            "-- {} @ {:04} ({} tokens, {} bytes) --\n",
            m.name,
            m.address,
            m.tokens.len(),
            m.length
        ));
        for t in &m.tokens {
            self.render_one(t, out);
        }
    }

    fn render_one(&self, t: &TokenInfo, out: &mut String) {
        let kind = self.kind(t);
        let colr = if self.color { self.color(t) } else { "" };
        let reset = if self.color { Self::RESET } else { "" };

        if self.show_debug_repr {
            out.push_str(&format!(
                "[{:03}] {:04} +{:<2} L{:<4} {}{:<6} {:?}{}\n",
                t.index, t.address, t.size, t.line, colr, kind, t.role, reset
            ));
        } else {
            out.push_str(&format!(
                "[{:03}] {:04} +{:<2} L{:<4} {}{:<6} {}{}\n",
                t.index, t.address, t.size, t.line, colr, kind, t.text, reset
            ));
        }
    }

    fn kind(&self, t: &TokenInfo) -> &'static str {
        match t.role {
            JumpRole::Source(_) => "JUMP",
            JumpRole::Target(_) => "LABEL",
            JumpRole::None if t.size == 0 => "EMPTY",
            JumpRole::None => "CODE",
        }
    }

    fn color(&self, t: &TokenInfo) -> &'static str {
        match t.role {
            JumpRole::Source(_) => Self::MAG,
            JumpRole::Target(_) => Self::YEL,
            JumpRole::None if t.size == 0 => Self::DIM,
            JumpRole::None => Self::CYN,
        }
    }
}
