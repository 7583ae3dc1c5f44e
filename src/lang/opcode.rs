use serde::{Deserialize, Serialize};

/// Source-side opcode tag, as decoded by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PyOp {
    Nop,

    // stack
    PopTop,
    RotTwo,
    RotThree,
    DupTop,
    DupTopTwo,

    // unary
    UnaryPositive,
    UnaryNegative,
    UnaryNot,
    UnaryInvert,

    // binary
    BinaryPower,
    BinaryMultiply,
    BinaryModulo,
    BinaryAdd,
    BinarySubtract,
    BinarySubscr,
    BinaryFloorDivide,
    BinaryTrueDivide,
    BinaryLshift,
    BinaryRshift,
    BinaryAnd,
    BinaryXor,
    BinaryOr,

    // in-place
    InplaceAdd,
    InplaceSubtract,
    InplaceMultiply,
    InplaceFloorDivide,
    InplaceTrueDivide,
    InplaceModulo,
    InplacePower,
    InplaceLshift,
    InplaceRshift,
    InplaceAnd,
    InplaceXor,
    InplaceOr,

    CompareOp,

    // names
    LoadConst,
    LoadFast,
    LoadName,
    LoadGlobal,
    LoadAttr,
    LoadMethod,
    StoreFast,
    StoreName,
    StoreGlobal,

    // containers
    StoreSubscr,
    DeleteSubscr,
    BuildList,
    BuildTuple,
    BuildMap,
    BuildConstKeyMap,
    BuildSlice,

    // calls
    CallFunction,
    CallFunctionKw,
    CallMethod,
    ReturnValue,

    // control flow
    JumpForward,
    JumpAbsolute,
    PopJumpIfFalse,
    PopJumpIfTrue,
    JumpIfFalseOrPop,
    JumpIfTrueOrPop,

    // blocks & loops
    SetupLoop,
    BreakLoop,
    PopBlock,
    GetIter,
    ForIter,

    YieldValue,
    RaiseVarargs,
    ExtendedArg,

    // injected by the front-end when lowering loops; passed through as-is
    #[serde(rename = "FROMALTSTACK")]
    FromAltStack,
    Drop,
    #[serde(rename = "XSWAP")]
    XSwap,
    Roll,
}

impl PyOp {
    pub fn name(self) -> &'static str {
        match self {
            PyOp::Nop => "NOP",
            PyOp::PopTop => "POP_TOP",
            PyOp::RotTwo => "ROT_TWO",
            PyOp::RotThree => "ROT_THREE",
            PyOp::DupTop => "DUP_TOP",
            PyOp::DupTopTwo => "DUP_TOP_TWO",
            PyOp::UnaryPositive => "UNARY_POSITIVE",
            PyOp::UnaryNegative => "UNARY_NEGATIVE",
            PyOp::UnaryNot => "UNARY_NOT",
            PyOp::UnaryInvert => "UNARY_INVERT",
            PyOp::BinaryPower => "BINARY_POWER",
            PyOp::BinaryMultiply => "BINARY_MULTIPLY",
            PyOp::BinaryModulo => "BINARY_MODULO",
            PyOp::BinaryAdd => "BINARY_ADD",
            PyOp::BinarySubtract => "BINARY_SUBTRACT",
            PyOp::BinarySubscr => "BINARY_SUBSCR",
            PyOp::BinaryFloorDivide => "BINARY_FLOOR_DIVIDE",
            PyOp::BinaryTrueDivide => "BINARY_TRUE_DIVIDE",
            PyOp::BinaryLshift => "BINARY_LSHIFT",
            PyOp::BinaryRshift => "BINARY_RSHIFT",
            PyOp::BinaryAnd => "BINARY_AND",
            PyOp::BinaryXor => "BINARY_XOR",
            PyOp::BinaryOr => "BINARY_OR",
            PyOp::InplaceAdd => "INPLACE_ADD",
            PyOp::InplaceSubtract => "INPLACE_SUBTRACT",
            PyOp::InplaceMultiply => "INPLACE_MULTIPLY",
            PyOp::InplaceFloorDivide => "INPLACE_FLOOR_DIVIDE",
            PyOp::InplaceTrueDivide => "INPLACE_TRUE_DIVIDE",
            PyOp::InplaceModulo => "INPLACE_MODULO",
            PyOp::InplacePower => "INPLACE_POWER",
            PyOp::InplaceLshift => "INPLACE_LSHIFT",
            PyOp::InplaceRshift => "INPLACE_RSHIFT",
            PyOp::InplaceAnd => "INPLACE_AND",
            PyOp::InplaceXor => "INPLACE_XOR",
            PyOp::InplaceOr => "INPLACE_OR",
            PyOp::CompareOp => "COMPARE_OP",
            PyOp::LoadConst => "LOAD_CONST",
            PyOp::LoadFast => "LOAD_FAST",
            PyOp::LoadName => "LOAD_NAME",
            PyOp::LoadGlobal => "LOAD_GLOBAL",
            PyOp::LoadAttr => "LOAD_ATTR",
            PyOp::LoadMethod => "LOAD_METHOD",
            PyOp::StoreFast => "STORE_FAST",
            PyOp::StoreName => "STORE_NAME",
            PyOp::StoreGlobal => "STORE_GLOBAL",
            PyOp::StoreSubscr => "STORE_SUBSCR",
            PyOp::DeleteSubscr => "DELETE_SUBSCR",
            PyOp::BuildList => "BUILD_LIST",
            PyOp::BuildTuple => "BUILD_TUPLE",
            PyOp::BuildMap => "BUILD_MAP",
            PyOp::BuildConstKeyMap => "BUILD_CONST_KEY_MAP",
            PyOp::BuildSlice => "BUILD_SLICE",
            PyOp::CallFunction => "CALL_FUNCTION",
            PyOp::CallFunctionKw => "CALL_FUNCTION_KW",
            PyOp::CallMethod => "CALL_METHOD",
            PyOp::ReturnValue => "RETURN_VALUE",
            PyOp::JumpForward => "JUMP_FORWARD",
            PyOp::JumpAbsolute => "JUMP_ABSOLUTE",
            PyOp::PopJumpIfFalse => "POP_JUMP_IF_FALSE",
            PyOp::PopJumpIfTrue => "POP_JUMP_IF_TRUE",
            PyOp::JumpIfFalseOrPop => "JUMP_IF_FALSE_OR_POP",
            PyOp::JumpIfTrueOrPop => "JUMP_IF_TRUE_OR_POP",
            PyOp::SetupLoop => "SETUP_LOOP",
            PyOp::BreakLoop => "BREAK_LOOP",
            PyOp::PopBlock => "POP_BLOCK",
            PyOp::GetIter => "GET_ITER",
            PyOp::ForIter => "FOR_ITER",
            PyOp::YieldValue => "YIELD_VALUE",
            PyOp::RaiseVarargs => "RAISE_VARARGS",
            PyOp::ExtendedArg => "EXTENDED_ARG",
            PyOp::FromAltStack => "FROMALTSTACK",
            PyOp::Drop => "DROP",
            PyOp::XSwap => "XSWAP",
            PyOp::Roll => "ROLL",
        }
    }
}

impl std::fmt::Display for PyOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparator sub-kind carried by `COMPARE_OP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compare {
    Lt,
    Le,
    Eq,
    Ne,
    Gt,
    Ge,
    In,
    NotIn,
    Is,
    IsNot,
    ExceptionMatch,
}

impl Compare {
    pub const ALL: [Compare; 11] = [
        Compare::Lt,
        Compare::Le,
        Compare::Eq,
        Compare::Ne,
        Compare::Gt,
        Compare::Ge,
        Compare::In,
        Compare::NotIn,
        Compare::Is,
        Compare::IsNot,
        Compare::ExceptionMatch,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Compare::Lt => "<",
            Compare::Le => "<=",
            Compare::Eq => "==",
            Compare::Ne => "!=",
            Compare::Gt => ">",
            Compare::Ge => ">=",
            Compare::In => "in",
            Compare::NotIn => "not in",
            Compare::Is => "is",
            Compare::IsNot => "is not",
            Compare::ExceptionMatch => "exception match",
        }
    }
}
