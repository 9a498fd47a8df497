use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Basic (two-operand) opcodes, carrying their encoded values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum BasicOp {
    SET = 0x1,
    ADD,
    SUB,
    MUL,
    DIV,
    MOD,
    SHL,
    SHR,
    AND,
    BOR,
    XOR,
    IFE,
    IFN,
    IFG,
    IFB,
}

impl BasicOp {
    pub fn parse(s: &str) -> Result<Self, String> {
        s.parse::<Self>().map_err(|_| format!("Undefined opcode: {s}"))
    }
}

/// Non-basic (one-operand) opcodes, encoded in the A field of the word.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum NonBasicOp {
    JSR = 0x1,
}

impl NonBasicOp {
    pub fn parse(s: &str) -> Result<Self, String> {
        s.parse::<Self>().map_err(|_| format!("Undefined opcode: {s}"))
    }
}

/// Assembler directives. `DAT` embeds raw words with no opcode semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum Directive {
    DAT,
}

impl Directive {
    pub fn parse(s: &str) -> Result<Self, String> {
        s.parse::<Self>().map_err(|_| format!("Undefined directive: {s}"))
    }
}
