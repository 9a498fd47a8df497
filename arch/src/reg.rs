use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// General purpose registers, in operand tag order.
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
pub enum Reg {
    A,
    B,
    C,
    X,
    Y,
    Z,
    I,
    J,
}

impl Reg {
    pub fn parse(s: &str) -> Result<Self, String> {
        s.parse::<Self>().map_err(|_| format!("Unknown register name: {s}"))
    }
}

/// System registers: stack pointer, program counter, overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum SysReg {
    SP,
    PC,
    O,
}

impl SysReg {
    pub fn parse(s: &str) -> Result<Self, String> {
        s.parse::<Self>().map_err(|_| format!("Unknown system register name: {s}"))
    }
}

/// Stack operations usable as operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum StackOp {
    POP,
    PEEK,
    PUSH,
}

impl StackOp {
    pub fn parse(s: &str) -> Result<Self, String> {
        s.parse::<Self>().map_err(|_| format!("Unknown stack operation: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_tag_order() {
        assert_eq!(u8::from(Reg::A), 0);
        assert_eq!(u8::from(Reg::J), 7);
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!(Reg::parse("X").is_ok());
        assert!(Reg::parse("x").is_err());
        assert!(SysReg::parse("PC").is_ok());
        assert!(StackOp::parse("PEEK").is_ok());
    }
}
