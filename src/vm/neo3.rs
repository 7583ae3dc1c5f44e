//! NEO 3.x opcode catalog.
//!
//! Only the long (`_L`) jump forms are emitted; their operand is a 4-byte
//! little-endian signed offset from the opcode byte.

use crate::bytecode::op::{Catalog, OpInfo, OperandSpec};

pub const PUSHINT8: u8 = 0x00;
pub const PUSHINT16: u8 = 0x01;
pub const PUSHINT32: u8 = 0x02;
pub const PUSHINT64: u8 = 0x03;
pub const PUSHNULL: u8 = 0x0B;
pub const PUSHDATA1: u8 = 0x0C;
pub const PUSHDATA2: u8 = 0x0D;
pub const PUSHDATA4: u8 = 0x0E;
pub const PUSHM1: u8 = 0x0F;
pub const PUSH0: u8 = 0x10;
pub const PUSH1: u8 = 0x11;
pub const PUSH16: u8 = 0x20;
pub const NOP: u8 = 0x21;
/// Unconditional jump, 4-byte signed offset from the opcode byte.
pub const JMP_L: u8 = 0x23;
pub const JMPIF_L: u8 = 0x25;
pub const JMPIFNOT_L: u8 = 0x27;
pub const CALL_L: u8 = 0x35;
pub const CALLA: u8 = 0x36;
pub const ABORT: u8 = 0x37;
pub const ASSERT: u8 = 0x38;
pub const THROW: u8 = 0x3A;
pub const RET: u8 = 0x40;
/// Call an interop service by its 4-byte id.
pub const SYSCALL: u8 = 0x41;
pub const DEPTH: u8 = 0x43;
pub const DROP: u8 = 0x45;
pub const NIP: u8 = 0x46;
pub const XDROP: u8 = 0x48;
pub const CLEAR: u8 = 0x49;
pub const DUP: u8 = 0x4A;
pub const OVER: u8 = 0x4B;
pub const PICK: u8 = 0x4D;
pub const TUCK: u8 = 0x4E;
pub const SWAP: u8 = 0x50;
pub const ROT: u8 = 0x51;
pub const ROLL: u8 = 0x52;
pub const REVERSE3: u8 = 0x53;
pub const REVERSE4: u8 = 0x54;
pub const REVERSEN: u8 = 0x55;
pub const INITSSLOT: u8 = 0x56;
/// Initialize the local and argument slots: local count, then argument count.
pub const INITSLOT: u8 = 0x57;
pub const LDLOC0: u8 = 0x68;
pub const LDLOC1: u8 = 0x69;
pub const LDLOC2: u8 = 0x6A;
pub const LDLOC3: u8 = 0x6B;
pub const LDLOC4: u8 = 0x6C;
pub const LDLOC5: u8 = 0x6D;
pub const LDLOC6: u8 = 0x6E;
pub const LDLOC: u8 = 0x6F;
pub const STLOC0: u8 = 0x70;
pub const STLOC1: u8 = 0x71;
pub const STLOC2: u8 = 0x72;
pub const STLOC3: u8 = 0x73;
pub const STLOC4: u8 = 0x74;
pub const STLOC5: u8 = 0x75;
pub const STLOC6: u8 = 0x76;
pub const STLOC: u8 = 0x77;
pub const LDARG0: u8 = 0x78;
pub const LDARG1: u8 = 0x79;
pub const LDARG2: u8 = 0x7A;
pub const LDARG3: u8 = 0x7B;
pub const LDARG4: u8 = 0x7C;
pub const LDARG5: u8 = 0x7D;
pub const LDARG6: u8 = 0x7E;
pub const LDARG: u8 = 0x7F;
pub const STARG0: u8 = 0x80;
pub const STARG1: u8 = 0x81;
pub const STARG2: u8 = 0x82;
pub const STARG3: u8 = 0x83;
pub const STARG4: u8 = 0x84;
pub const STARG5: u8 = 0x85;
pub const STARG6: u8 = 0x86;
pub const STARG: u8 = 0x87;
pub const NEWBUFFER: u8 = 0x88;
pub const MEMCPY: u8 = 0x89;
pub const CAT: u8 = 0x8B;
pub const SUBSTR: u8 = 0x8C;
pub const LEFT: u8 = 0x8D;
pub const RIGHT: u8 = 0x8E;
pub const INVERT: u8 = 0x90;
pub const AND: u8 = 0x91;
pub const OR: u8 = 0x92;
pub const XOR: u8 = 0x93;
pub const EQUAL: u8 = 0x97;
pub const NOTEQUAL: u8 = 0x98;
pub const SIGN: u8 = 0x99;
pub const ABS: u8 = 0x9A;
pub const NEGATE: u8 = 0x9B;
pub const INC: u8 = 0x9C;
pub const DEC: u8 = 0x9D;
pub const ADD: u8 = 0x9E;
pub const SUB: u8 = 0x9F;
pub const MUL: u8 = 0xA0;
pub const DIV: u8 = 0xA1;
pub const MOD: u8 = 0xA2;
pub const SHL: u8 = 0xA8;
pub const SHR: u8 = 0xA9;
pub const NOT: u8 = 0xAA;
pub const BOOLAND: u8 = 0xAB;
pub const BOOLOR: u8 = 0xAC;
pub const NZ: u8 = 0xB1;
pub const NUMEQUAL: u8 = 0xB3;
pub const NUMNOTEQUAL: u8 = 0xB4;
pub const LT: u8 = 0xB5;
pub const LE: u8 = 0xB6;
pub const GT: u8 = 0xB7;
pub const GE: u8 = 0xB8;
pub const MIN: u8 = 0xB9;
pub const MAX: u8 = 0xBA;
pub const WITHIN: u8 = 0xBB;
pub const PACK: u8 = 0xC0;
pub const UNPACK: u8 = 0xC1;
pub const NEWARRAY0: u8 = 0xC2;
pub const NEWARRAY: u8 = 0xC3;
pub const NEWARRAY_T: u8 = 0xC4;
pub const NEWSTRUCT0: u8 = 0xC5;
pub const NEWSTRUCT: u8 = 0xC6;
pub const NEWMAP: u8 = 0xC8;
pub const SIZE: u8 = 0xCA;
pub const HASKEY: u8 = 0xCB;
pub const KEYS: u8 = 0xCC;
pub const VALUES: u8 = 0xCD;
pub const PICKITEM: u8 = 0xCE;
pub const APPEND: u8 = 0xCF;
pub const SETITEM: u8 = 0xD0;
pub const REVERSEITEMS: u8 = 0xD1;
pub const REMOVE: u8 = 0xD2;
pub const CLEARITEMS: u8 = 0xD3;
pub const ISNULL: u8 = 0xD8;
pub const ISTYPE: u8 = 0xD9;
pub const CONVERT: u8 = 0xDB;

pub static CATALOG: Catalog = Catalog::new(
    "neo3",
    &[
        OpInfo::new("PUSHINT8", 0x00, OperandSpec::Fixed(1)),
        OpInfo::new("PUSHINT16", 0x01, OperandSpec::Fixed(2)),
        OpInfo::new("PUSHINT32", 0x02, OperandSpec::Fixed(4)),
        OpInfo::new("PUSHINT64", 0x03, OperandSpec::Fixed(8)),
        OpInfo::new("PUSHINT128", 0x04, OperandSpec::Fixed(16)),
        OpInfo::new("PUSHINT256", 0x05, OperandSpec::Fixed(32)),
        OpInfo::new("PUSHA", 0x0A, OperandSpec::Fixed(4)),
        OpInfo::bare("PUSHNULL", 0x0B),
        OpInfo::new("PUSHDATA1", 0x0C, OperandSpec::Prefixed(1)),
        OpInfo::new("PUSHDATA2", 0x0D, OperandSpec::Prefixed(2)),
        OpInfo::new("PUSHDATA4", 0x0E, OperandSpec::Prefixed(4)),
        OpInfo::bare("PUSHM1", 0x0F),
        OpInfo::bare("PUSH0", 0x10),
        OpInfo::bare("PUSH1", 0x11),
        OpInfo::bare("PUSH2", 0x12),
        OpInfo::bare("PUSH3", 0x13),
        OpInfo::bare("PUSH4", 0x14),
        OpInfo::bare("PUSH5", 0x15),
        OpInfo::bare("PUSH6", 0x16),
        OpInfo::bare("PUSH7", 0x17),
        OpInfo::bare("PUSH8", 0x18),
        OpInfo::bare("PUSH9", 0x19),
        OpInfo::bare("PUSH10", 0x1A),
        OpInfo::bare("PUSH11", 0x1B),
        OpInfo::bare("PUSH12", 0x1C),
        OpInfo::bare("PUSH13", 0x1D),
        OpInfo::bare("PUSH14", 0x1E),
        OpInfo::bare("PUSH15", 0x1F),
        OpInfo::bare("PUSH16", 0x20),
        OpInfo::bare("NOP", 0x21),
        OpInfo::new("JMP", 0x22, OperandSpec::Fixed(1)),
        OpInfo::new("JMP_L", 0x23, OperandSpec::Fixed(4)),
        OpInfo::new("JMPIF", 0x24, OperandSpec::Fixed(1)),
        OpInfo::new("JMPIF_L", 0x25, OperandSpec::Fixed(4)),
        OpInfo::new("JMPIFNOT", 0x26, OperandSpec::Fixed(1)),
        OpInfo::new("JMPIFNOT_L", 0x27, OperandSpec::Fixed(4)),
        OpInfo::new("JMPEQ", 0x28, OperandSpec::Fixed(1)),
        OpInfo::new("JMPEQ_L", 0x29, OperandSpec::Fixed(4)),
        OpInfo::new("JMPNE", 0x2A, OperandSpec::Fixed(1)),
        OpInfo::new("JMPNE_L", 0x2B, OperandSpec::Fixed(4)),
        OpInfo::new("JMPGT", 0x2C, OperandSpec::Fixed(1)),
        OpInfo::new("JMPGT_L", 0x2D, OperandSpec::Fixed(4)),
        OpInfo::new("JMPGE", 0x2E, OperandSpec::Fixed(1)),
        OpInfo::new("JMPGE_L", 0x2F, OperandSpec::Fixed(4)),
        OpInfo::new("JMPLT", 0x30, OperandSpec::Fixed(1)),
        OpInfo::new("JMPLT_L", 0x31, OperandSpec::Fixed(4)),
        OpInfo::new("JMPLE", 0x32, OperandSpec::Fixed(1)),
        OpInfo::new("JMPLE_L", 0x33, OperandSpec::Fixed(4)),
        OpInfo::new("CALL", 0x34, OperandSpec::Fixed(1)),
        OpInfo::new("CALL_L", 0x35, OperandSpec::Fixed(4)),
        OpInfo::bare("CALLA", 0x36),
        OpInfo::bare("ABORT", 0x37),
        OpInfo::bare("ASSERT", 0x38),
        OpInfo::bare("THROW", 0x3A),
        OpInfo::bare("RET", 0x40),
        OpInfo::new("SYSCALL", 0x41, OperandSpec::Fixed(4)),
        OpInfo::bare("DEPTH", 0x43),
        OpInfo::bare("DROP", 0x45),
        OpInfo::bare("NIP", 0x46),
        OpInfo::bare("XDROP", 0x48),
        OpInfo::bare("CLEAR", 0x49),
        OpInfo::bare("DUP", 0x4A),
        OpInfo::bare("OVER", 0x4B),
        OpInfo::bare("PICK", 0x4D),
        OpInfo::bare("TUCK", 0x4E),
        OpInfo::bare("SWAP", 0x50),
        OpInfo::bare("ROT", 0x51),
        OpInfo::bare("ROLL", 0x52),
        OpInfo::bare("REVERSE3", 0x53),
        OpInfo::bare("REVERSE4", 0x54),
        OpInfo::bare("REVERSEN", 0x55),
        OpInfo::new("INITSSLOT", 0x56, OperandSpec::Fixed(1)),
        OpInfo::new("INITSLOT", 0x57, OperandSpec::Fixed(2)),
        OpInfo::bare("LDSFLD0", 0x58),
        OpInfo::bare("LDSFLD1", 0x59),
        OpInfo::bare("LDSFLD2", 0x5A),
        OpInfo::bare("LDSFLD3", 0x5B),
        OpInfo::bare("LDSFLD4", 0x5C),
        OpInfo::bare("LDSFLD5", 0x5D),
        OpInfo::bare("LDSFLD6", 0x5E),
        OpInfo::new("LDSFLD", 0x5F, OperandSpec::Fixed(1)),
        OpInfo::bare("STSFLD0", 0x60),
        OpInfo::bare("STSFLD1", 0x61),
        OpInfo::bare("STSFLD2", 0x62),
        OpInfo::bare("STSFLD3", 0x63),
        OpInfo::bare("STSFLD4", 0x64),
        OpInfo::bare("STSFLD5", 0x65),
        OpInfo::bare("STSFLD6", 0x66),
        OpInfo::new("STSFLD", 0x67, OperandSpec::Fixed(1)),
        OpInfo::bare("LDLOC0", 0x68),
        OpInfo::bare("LDLOC1", 0x69),
        OpInfo::bare("LDLOC2", 0x6A),
        OpInfo::bare("LDLOC3", 0x6B),
        OpInfo::bare("LDLOC4", 0x6C),
        OpInfo::bare("LDLOC5", 0x6D),
        OpInfo::bare("LDLOC6", 0x6E),
        OpInfo::new("LDLOC", 0x6F, OperandSpec::Fixed(1)),
        OpInfo::bare("STLOC0", 0x70),
        OpInfo::bare("STLOC1", 0x71),
        OpInfo::bare("STLOC2", 0x72),
        OpInfo::bare("STLOC3", 0x73),
        OpInfo::bare("STLOC4", 0x74),
        OpInfo::bare("STLOC5", 0x75),
        OpInfo::bare("STLOC6", 0x76),
        OpInfo::new("STLOC", 0x77, OperandSpec::Fixed(1)),
        OpInfo::bare("LDARG0", 0x78),
        OpInfo::bare("LDARG1", 0x79),
        OpInfo::bare("LDARG2", 0x7A),
        OpInfo::bare("LDARG3", 0x7B),
        OpInfo::bare("LDARG4", 0x7C),
        OpInfo::bare("LDARG5", 0x7D),
        OpInfo::bare("LDARG6", 0x7E),
        OpInfo::new("LDARG", 0x7F, OperandSpec::Fixed(1)),
        OpInfo::bare("STARG0", 0x80),
        OpInfo::bare("STARG1", 0x81),
        OpInfo::bare("STARG2", 0x82),
        OpInfo::bare("STARG3", 0x83),
        OpInfo::bare("STARG4", 0x84),
        OpInfo::bare("STARG5", 0x85),
        OpInfo::bare("STARG6", 0x86),
        OpInfo::new("STARG", 0x87, OperandSpec::Fixed(1)),
        OpInfo::bare("NEWBUFFER", 0x88),
        OpInfo::bare("MEMCPY", 0x89),
        OpInfo::bare("CAT", 0x8B),
        OpInfo::bare("SUBSTR", 0x8C),
        OpInfo::bare("LEFT", 0x8D),
        OpInfo::bare("RIGHT", 0x8E),
        OpInfo::bare("INVERT", 0x90),
        OpInfo::bare("AND", 0x91),
        OpInfo::bare("OR", 0x92),
        OpInfo::bare("XOR", 0x93),
        OpInfo::bare("EQUAL", 0x97),
        OpInfo::bare("NOTEQUAL", 0x98),
        OpInfo::bare("SIGN", 0x99),
        OpInfo::bare("ABS", 0x9A),
        OpInfo::bare("NEGATE", 0x9B),
        OpInfo::bare("INC", 0x9C),
        OpInfo::bare("DEC", 0x9D),
        OpInfo::bare("ADD", 0x9E),
        OpInfo::bare("SUB", 0x9F),
        OpInfo::bare("MUL", 0xA0),
        OpInfo::bare("DIV", 0xA1),
        OpInfo::bare("MOD", 0xA2),
        OpInfo::bare("SHL", 0xA8),
        OpInfo::bare("SHR", 0xA9),
        OpInfo::bare("NOT", 0xAA),
        OpInfo::bare("BOOLAND", 0xAB),
        OpInfo::bare("BOOLOR", 0xAC),
        OpInfo::bare("NZ", 0xB1),
        OpInfo::bare("NUMEQUAL", 0xB3),
        OpInfo::bare("NUMNOTEQUAL", 0xB4),
        OpInfo::bare("LT", 0xB5),
        OpInfo::bare("LE", 0xB6),
        OpInfo::bare("GT", 0xB7),
        OpInfo::bare("GE", 0xB8),
        OpInfo::bare("MIN", 0xB9),
        OpInfo::bare("MAX", 0xBA),
        OpInfo::bare("WITHIN", 0xBB),
        OpInfo::bare("PACK", 0xC0),
        OpInfo::bare("UNPACK", 0xC1),
        OpInfo::bare("NEWARRAY0", 0xC2),
        OpInfo::bare("NEWARRAY", 0xC3),
        OpInfo::new("NEWARRAY_T", 0xC4, OperandSpec::Fixed(1)),
        OpInfo::bare("NEWSTRUCT0", 0xC5),
        OpInfo::bare("NEWSTRUCT", 0xC6),
        OpInfo::bare("NEWMAP", 0xC8),
        OpInfo::bare("SIZE", 0xCA),
        OpInfo::bare("HASKEY", 0xCB),
        OpInfo::bare("KEYS", 0xCC),
        OpInfo::bare("VALUES", 0xCD),
        OpInfo::bare("PICKITEM", 0xCE),
        OpInfo::bare("APPEND", 0xCF),
        OpInfo::bare("SETITEM", 0xD0),
        OpInfo::bare("REVERSEITEMS", 0xD1),
        OpInfo::bare("REMOVE", 0xD2),
        OpInfo::bare("CLEARITEMS", 0xD3),
        OpInfo::bare("ISNULL", 0xD8),
        OpInfo::new("ISTYPE", 0xD9, OperandSpec::Fixed(1)),
        OpInfo::new("CONVERT", 0xDB, OperandSpec::Fixed(1)),
    ],
);

/// Opcode pushing the small integer `n` (`-1..=16`), if there is one.
pub fn push_small(n: i64) -> Option<u8> {
    match n {
        -1 => Some(PUSHM1),
        0..=16 => Some(PUSH0 + n as u8),
        _ => None,
    }
}
