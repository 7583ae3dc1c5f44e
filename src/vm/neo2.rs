//! NEO 2.x opcode catalog.
//!
//! Jumps and calls carry a 2-byte little-endian signed offset measured from
//! the opcode byte of the jump itself.

use crate::bytecode::op::{Catalog, OpInfo, OperandSpec};

/// An empty array of bytes is pushed onto the stack.
pub const PUSH0: u8 = 0x00;
pub const PUSHBYTES1: u8 = 0x01;
pub const PUSHBYTES75: u8 = 0x4B;
/// The next byte contains the number of bytes to be pushed.
pub const PUSHDATA1: u8 = 0x4C;
/// The next two bytes contain the number of bytes to be pushed.
pub const PUSHDATA2: u8 = 0x4D;
/// The next four bytes contain the number of bytes to be pushed.
pub const PUSHDATA4: u8 = 0x4E;
/// The number -1 is pushed onto the stack.
pub const PUSHM1: u8 = 0x4F;
pub const PUSH1: u8 = 0x51;
pub const PUSH2: u8 = 0x52;
pub const PUSH16: u8 = 0x60;
/// Does nothing. Also the materialized form of a label.
pub const NOP: u8 = 0x61;
/// Unconditional jump, 2-byte signed offset from the opcode byte.
pub const JMP: u8 = 0x62;
pub const JMPIF: u8 = 0x63;
pub const JMPIFNOT: u8 = 0x64;
/// Call within the script, 2-byte signed offset.
pub const CALL: u8 = 0x65;
pub const RET: u8 = 0x66;
/// Call another contract by its 20-byte script hash.
pub const APPCALL: u8 = 0x67;
/// Call an interop service by name.
pub const SYSCALL: u8 = 0x68;
pub const TAILCALL: u8 = 0x69;
pub const DUPFROMALTSTACK: u8 = 0x6A;
pub const TOALTSTACK: u8 = 0x6B;
pub const FROMALTSTACK: u8 = 0x6C;
pub const XDROP: u8 = 0x6D;
pub const XSWAP: u8 = 0x72;
pub const XTUCK: u8 = 0x73;
pub const DEPTH: u8 = 0x74;
pub const DROP: u8 = 0x75;
pub const DUP: u8 = 0x76;
pub const NIP: u8 = 0x77;
pub const OVER: u8 = 0x78;
pub const PICK: u8 = 0x79;
pub const ROLL: u8 = 0x7A;
pub const ROT: u8 = 0x7B;
pub const SWAP: u8 = 0x7C;
pub const TUCK: u8 = 0x7D;
pub const CAT: u8 = 0x7E;
pub const SUBSTR: u8 = 0x7F;
pub const LEFT: u8 = 0x80;
pub const RIGHT: u8 = 0x81;
pub const SIZE: u8 = 0x82;
pub const INVERT: u8 = 0x83;
pub const AND: u8 = 0x84;
pub const OR: u8 = 0x85;
pub const XOR: u8 = 0x86;
pub const EQUAL: u8 = 0x87;
pub const INC: u8 = 0x8B;
pub const DEC: u8 = 0x8C;
pub const SIGN: u8 = 0x8D;
pub const NEGATE: u8 = 0x8F;
pub const ABS: u8 = 0x90;
pub const NOT: u8 = 0x91;
pub const NZ: u8 = 0x92;
pub const ADD: u8 = 0x93;
pub const SUB: u8 = 0x94;
pub const MUL: u8 = 0x95;
pub const DIV: u8 = 0x96;
pub const MOD: u8 = 0x97;
pub const SHL: u8 = 0x98;
pub const SHR: u8 = 0x99;
pub const BOOLAND: u8 = 0x9A;
pub const BOOLOR: u8 = 0x9B;
pub const NUMEQUAL: u8 = 0x9C;
pub const NUMNOTEQUAL: u8 = 0x9E;
pub const LT: u8 = 0x9F;
pub const GT: u8 = 0xA0;
pub const LTE: u8 = 0xA1;
pub const GTE: u8 = 0xA2;
pub const MIN: u8 = 0xA3;
pub const MAX: u8 = 0xA4;
pub const WITHIN: u8 = 0xA5;
pub const SHA1: u8 = 0xA7;
pub const SHA256: u8 = 0xA8;
pub const HASH160: u8 = 0xA9;
pub const HASH256: u8 = 0xAA;
pub const CHECKSIG: u8 = 0xAC;
pub const VERIFY: u8 = 0xAD;
pub const CHECKMULTISIG: u8 = 0xAE;
pub const ARRAYSIZE: u8 = 0xC0;
pub const PACK: u8 = 0xC1;
pub const UNPACK: u8 = 0xC2;
pub const PICKITEM: u8 = 0xC3;
pub const SETITEM: u8 = 0xC4;
pub const NEWARRAY: u8 = 0xC5;
pub const NEWSTRUCT: u8 = 0xC6;
pub const NEWMAP: u8 = 0xC7;
pub const APPEND: u8 = 0xC8;
pub const REVERSE: u8 = 0xC9;
pub const REMOVE: u8 = 0xCA;
pub const HASKEY: u8 = 0xCB;
pub const KEYS: u8 = 0xCC;
pub const VALUES: u8 = 0xCD;
pub const CALL_I: u8 = 0xE0;
pub const CALL_E: u8 = 0xE1;
pub const CALL_ED: u8 = 0xE2;
pub const CALL_ET: u8 = 0xE3;
pub const CALL_EDT: u8 = 0xE4;
pub const THROW: u8 = 0xF0;
pub const THROWIFNOT: u8 = 0xF1;

pub static CATALOG: Catalog = Catalog::new(
    "neo2",
    &[
        OpInfo::bare("PUSH0", 0x00),
        OpInfo::new("PUSHBYTES1", 0x01, OperandSpec::Fixed(1)),
        OpInfo::new("PUSHBYTES2", 0x02, OperandSpec::Fixed(2)),
        OpInfo::new("PUSHBYTES3", 0x03, OperandSpec::Fixed(3)),
        OpInfo::new("PUSHBYTES4", 0x04, OperandSpec::Fixed(4)),
        OpInfo::new("PUSHBYTES5", 0x05, OperandSpec::Fixed(5)),
        OpInfo::new("PUSHBYTES6", 0x06, OperandSpec::Fixed(6)),
        OpInfo::new("PUSHBYTES7", 0x07, OperandSpec::Fixed(7)),
        OpInfo::new("PUSHBYTES8", 0x08, OperandSpec::Fixed(8)),
        OpInfo::new("PUSHBYTES9", 0x09, OperandSpec::Fixed(9)),
        OpInfo::new("PUSHBYTES10", 0x0A, OperandSpec::Fixed(10)),
        OpInfo::new("PUSHBYTES11", 0x0B, OperandSpec::Fixed(11)),
        OpInfo::new("PUSHBYTES12", 0x0C, OperandSpec::Fixed(12)),
        OpInfo::new("PUSHBYTES13", 0x0D, OperandSpec::Fixed(13)),
        OpInfo::new("PUSHBYTES14", 0x0E, OperandSpec::Fixed(14)),
        OpInfo::new("PUSHBYTES15", 0x0F, OperandSpec::Fixed(15)),
        OpInfo::new("PUSHBYTES16", 0x10, OperandSpec::Fixed(16)),
        OpInfo::new("PUSHBYTES17", 0x11, OperandSpec::Fixed(17)),
        OpInfo::new("PUSHBYTES18", 0x12, OperandSpec::Fixed(18)),
        OpInfo::new("PUSHBYTES19", 0x13, OperandSpec::Fixed(19)),
        OpInfo::new("PUSHBYTES20", 0x14, OperandSpec::Fixed(20)),
        OpInfo::new("PUSHBYTES21", 0x15, OperandSpec::Fixed(21)),
        OpInfo::new("PUSHBYTES22", 0x16, OperandSpec::Fixed(22)),
        OpInfo::new("PUSHBYTES23", 0x17, OperandSpec::Fixed(23)),
        OpInfo::new("PUSHBYTES24", 0x18, OperandSpec::Fixed(24)),
        OpInfo::new("PUSHBYTES25", 0x19, OperandSpec::Fixed(25)),
        OpInfo::new("PUSHBYTES26", 0x1A, OperandSpec::Fixed(26)),
        OpInfo::new("PUSHBYTES27", 0x1B, OperandSpec::Fixed(27)),
        OpInfo::new("PUSHBYTES28", 0x1C, OperandSpec::Fixed(28)),
        OpInfo::new("PUSHBYTES29", 0x1D, OperandSpec::Fixed(29)),
        OpInfo::new("PUSHBYTES30", 0x1E, OperandSpec::Fixed(30)),
        OpInfo::new("PUSHBYTES31", 0x1F, OperandSpec::Fixed(31)),
        OpInfo::new("PUSHBYTES32", 0x20, OperandSpec::Fixed(32)),
        OpInfo::new("PUSHBYTES33", 0x21, OperandSpec::Fixed(33)),
        OpInfo::new("PUSHBYTES34", 0x22, OperandSpec::Fixed(34)),
        OpInfo::new("PUSHBYTES35", 0x23, OperandSpec::Fixed(35)),
        OpInfo::new("PUSHBYTES36", 0x24, OperandSpec::Fixed(36)),
        OpInfo::new("PUSHBYTES37", 0x25, OperandSpec::Fixed(37)),
        OpInfo::new("PUSHBYTES38", 0x26, OperandSpec::Fixed(38)),
        OpInfo::new("PUSHBYTES39", 0x27, OperandSpec::Fixed(39)),
        OpInfo::new("PUSHBYTES40", 0x28, OperandSpec::Fixed(40)),
        OpInfo::new("PUSHBYTES41", 0x29, OperandSpec::Fixed(41)),
        OpInfo::new("PUSHBYTES42", 0x2A, OperandSpec::Fixed(42)),
        OpInfo::new("PUSHBYTES43", 0x2B, OperandSpec::Fixed(43)),
        OpInfo::new("PUSHBYTES44", 0x2C, OperandSpec::Fixed(44)),
        OpInfo::new("PUSHBYTES45", 0x2D, OperandSpec::Fixed(45)),
        OpInfo::new("PUSHBYTES46", 0x2E, OperandSpec::Fixed(46)),
        OpInfo::new("PUSHBYTES47", 0x2F, OperandSpec::Fixed(47)),
        OpInfo::new("PUSHBYTES48", 0x30, OperandSpec::Fixed(48)),
        OpInfo::new("PUSHBYTES49", 0x31, OperandSpec::Fixed(49)),
        OpInfo::new("PUSHBYTES50", 0x32, OperandSpec::Fixed(50)),
        OpInfo::new("PUSHBYTES51", 0x33, OperandSpec::Fixed(51)),
        OpInfo::new("PUSHBYTES52", 0x34, OperandSpec::Fixed(52)),
        OpInfo::new("PUSHBYTES53", 0x35, OperandSpec::Fixed(53)),
        OpInfo::new("PUSHBYTES54", 0x36, OperandSpec::Fixed(54)),
        OpInfo::new("PUSHBYTES55", 0x37, OperandSpec::Fixed(55)),
        OpInfo::new("PUSHBYTES56", 0x38, OperandSpec::Fixed(56)),
        OpInfo::new("PUSHBYTES57", 0x39, OperandSpec::Fixed(57)),
        OpInfo::new("PUSHBYTES58", 0x3A, OperandSpec::Fixed(58)),
        OpInfo::new("PUSHBYTES59", 0x3B, OperandSpec::Fixed(59)),
        OpInfo::new("PUSHBYTES60", 0x3C, OperandSpec::Fixed(60)),
        OpInfo::new("PUSHBYTES61", 0x3D, OperandSpec::Fixed(61)),
        OpInfo::new("PUSHBYTES62", 0x3E, OperandSpec::Fixed(62)),
        OpInfo::new("PUSHBYTES63", 0x3F, OperandSpec::Fixed(63)),
        OpInfo::new("PUSHBYTES64", 0x40, OperandSpec::Fixed(64)),
        OpInfo::new("PUSHBYTES65", 0x41, OperandSpec::Fixed(65)),
        OpInfo::new("PUSHBYTES66", 0x42, OperandSpec::Fixed(66)),
        OpInfo::new("PUSHBYTES67", 0x43, OperandSpec::Fixed(67)),
        OpInfo::new("PUSHBYTES68", 0x44, OperandSpec::Fixed(68)),
        OpInfo::new("PUSHBYTES69", 0x45, OperandSpec::Fixed(69)),
        OpInfo::new("PUSHBYTES70", 0x46, OperandSpec::Fixed(70)),
        OpInfo::new("PUSHBYTES71", 0x47, OperandSpec::Fixed(71)),
        OpInfo::new("PUSHBYTES72", 0x48, OperandSpec::Fixed(72)),
        OpInfo::new("PUSHBYTES73", 0x49, OperandSpec::Fixed(73)),
        OpInfo::new("PUSHBYTES74", 0x4A, OperandSpec::Fixed(74)),
        OpInfo::new("PUSHBYTES75", 0x4B, OperandSpec::Fixed(75)),
        OpInfo::new("PUSHDATA1", 0x4C, OperandSpec::Prefixed(1)),
        OpInfo::new("PUSHDATA2", 0x4D, OperandSpec::Prefixed(2)),
        OpInfo::new("PUSHDATA4", 0x4E, OperandSpec::Prefixed(4)),
        OpInfo::bare("PUSHM1", 0x4F),
        OpInfo::bare("PUSH1", 0x51),
        OpInfo::bare("PUSH2", 0x52),
        OpInfo::bare("PUSH3", 0x53),
        OpInfo::bare("PUSH4", 0x54),
        OpInfo::bare("PUSH5", 0x55),
        OpInfo::bare("PUSH6", 0x56),
        OpInfo::bare("PUSH7", 0x57),
        OpInfo::bare("PUSH8", 0x58),
        OpInfo::bare("PUSH9", 0x59),
        OpInfo::bare("PUSH10", 0x5A),
        OpInfo::bare("PUSH11", 0x5B),
        OpInfo::bare("PUSH12", 0x5C),
        OpInfo::bare("PUSH13", 0x5D),
        OpInfo::bare("PUSH14", 0x5E),
        OpInfo::bare("PUSH15", 0x5F),
        OpInfo::bare("PUSH16", 0x60),
        OpInfo::bare("NOP", 0x61),
        OpInfo::new("JMP", 0x62, OperandSpec::Fixed(2)),
        OpInfo::new("JMPIF", 0x63, OperandSpec::Fixed(2)),
        OpInfo::new("JMPIFNOT", 0x64, OperandSpec::Fixed(2)),
        OpInfo::new("CALL", 0x65, OperandSpec::Fixed(2)),
        OpInfo::bare("RET", 0x66),
        OpInfo::new("APPCALL", 0x67, OperandSpec::Fixed(20)),
        OpInfo::new("SYSCALL", 0x68, OperandSpec::VarBytes),
        OpInfo::new("TAILCALL", 0x69, OperandSpec::Fixed(20)),
        OpInfo::bare("DUPFROMALTSTACK", 0x6A),
        OpInfo::bare("TOALTSTACK", 0x6B),
        OpInfo::bare("FROMALTSTACK", 0x6C),
        OpInfo::bare("XDROP", 0x6D),
        OpInfo::bare("XSWAP", 0x72),
        OpInfo::bare("XTUCK", 0x73),
        OpInfo::bare("DEPTH", 0x74),
        OpInfo::bare("DROP", 0x75),
        OpInfo::bare("DUP", 0x76),
        OpInfo::bare("NIP", 0x77),
        OpInfo::bare("OVER", 0x78),
        OpInfo::bare("PICK", 0x79),
        OpInfo::bare("ROLL", 0x7A),
        OpInfo::bare("ROT", 0x7B),
        OpInfo::bare("SWAP", 0x7C),
        OpInfo::bare("TUCK", 0x7D),
        OpInfo::bare("CAT", 0x7E),
        OpInfo::bare("SUBSTR", 0x7F),
        OpInfo::bare("LEFT", 0x80),
        OpInfo::bare("RIGHT", 0x81),
        OpInfo::bare("SIZE", 0x82),
        OpInfo::bare("INVERT", 0x83),
        OpInfo::bare("AND", 0x84),
        OpInfo::bare("OR", 0x85),
        OpInfo::bare("XOR", 0x86),
        OpInfo::bare("EQUAL", 0x87),
        OpInfo::bare("INC", 0x8B),
        OpInfo::bare("DEC", 0x8C),
        OpInfo::bare("SIGN", 0x8D),
        OpInfo::bare("NEGATE", 0x8F),
        OpInfo::bare("ABS", 0x90),
        OpInfo::bare("NOT", 0x91),
        OpInfo::bare("NZ", 0x92),
        OpInfo::bare("ADD", 0x93),
        OpInfo::bare("SUB", 0x94),
        OpInfo::bare("MUL", 0x95),
        OpInfo::bare("DIV", 0x96),
        OpInfo::bare("MOD", 0x97),
        OpInfo::bare("SHL", 0x98),
        OpInfo::bare("SHR", 0x99),
        OpInfo::bare("BOOLAND", 0x9A),
        OpInfo::bare("BOOLOR", 0x9B),
        OpInfo::bare("NUMEQUAL", 0x9C),
        OpInfo::bare("NUMNOTEQUAL", 0x9E),
        OpInfo::bare("LT", 0x9F),
        OpInfo::bare("GT", 0xA0),
        OpInfo::bare("LTE", 0xA1),
        OpInfo::bare("GTE", 0xA2),
        OpInfo::bare("MIN", 0xA3),
        OpInfo::bare("MAX", 0xA4),
        OpInfo::bare("WITHIN", 0xA5),
        OpInfo::bare("SHA1", 0xA7),
        OpInfo::bare("SHA256", 0xA8),
        OpInfo::bare("HASH160", 0xA9),
        OpInfo::bare("HASH256", 0xAA),
        OpInfo::bare("CHECKSIG", 0xAC),
        OpInfo::bare("VERIFY", 0xAD),
        OpInfo::bare("CHECKMULTISIG", 0xAE),
        OpInfo::bare("ARRAYSIZE", 0xC0),
        OpInfo::bare("PACK", 0xC1),
        OpInfo::bare("UNPACK", 0xC2),
        OpInfo::bare("PICKITEM", 0xC3),
        OpInfo::bare("SETITEM", 0xC4),
        OpInfo::bare("NEWARRAY", 0xC5),
        OpInfo::bare("NEWSTRUCT", 0xC6),
        OpInfo::bare("NEWMAP", 0xC7),
        OpInfo::bare("APPEND", 0xC8),
        OpInfo::bare("REVERSE", 0xC9),
        OpInfo::bare("REMOVE", 0xCA),
        OpInfo::bare("HASKEY", 0xCB),
        OpInfo::bare("KEYS", 0xCC),
        OpInfo::bare("VALUES", 0xCD),
        OpInfo::new("CALL_I", 0xE0, OperandSpec::Fixed(4)),
        OpInfo::new("CALL_E", 0xE1, OperandSpec::Fixed(22)),
        OpInfo::new("CALL_ED", 0xE2, OperandSpec::Fixed(2)),
        OpInfo::new("CALL_ET", 0xE3, OperandSpec::Fixed(22)),
        OpInfo::new("CALL_EDT", 0xE4, OperandSpec::Fixed(2)),
        OpInfo::bare("THROW", 0xF0),
        OpInfo::bare("THROWIFNOT", 0xF1),
    ],
);

/// Opcode pushing the small integer `n` (`-1..=16`), if there is one.
pub fn push_small(n: i64) -> Option<u8> {
    match n {
        -1 => Some(PUSHM1),
        0 => Some(PUSH0),
        1..=16 => Some(PUSH1 + (n - 1) as u8),
        _ => None,
    }
}
