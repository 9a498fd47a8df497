use color_print::cformat;

use crate::labels::{Labels, UndeclaredLabel};
use crate::reg::{Reg, StackOp, SysReg};

// ----------------------------------------------------------------------------
// Operand type tags
// ----------------------------------------------------------------------------

/// The 6-bit operand tag fields. Register-relative tags are base values with
/// the register number added in.
pub mod tag {
    pub const REG: u16 = 0x00;
    pub const REG_DEREF: u16 = 0x08;
    pub const REG_OFFSET: u16 = 0x10;
    pub const POP: u16 = 0x18;
    pub const PEEK: u16 = 0x19;
    pub const PUSH: u16 = 0x1A;
    pub const SP: u16 = 0x1B;
    pub const PC: u16 = 0x1C;
    pub const OF: u16 = 0x1D;
    pub const ADDR: u16 = 0x1E;
    pub const NEXT: u16 = 0x1F;
    pub const INLINE: u16 = 0x20;
    /// Largest literal that fits in the inline tag range.
    pub const INLINE_MAX: u16 = 0x1F;
}

// ----------------------------------------------------------------------------
// Value
// ----------------------------------------------------------------------------

/// A word value that may still be a symbolic label reference. Resolution is
/// deferred to encode time so forward references stay legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Literal(u16),
    Label(String),
}

impl Value {
    pub fn resolve(&self, labels: &Labels) -> Result<u16, UndeclaredLabel> {
        match self {
            Value::Literal(v) => Ok(*v),
            Value::Label(name) => labels.get(name).ok_or_else(|| UndeclaredLabel(name.clone())),
        }
    }

    pub fn cformat(&self) -> String {
        match self {
            Value::Literal(v) => cformat!("<y>0x{:0>4X}</>", v),
            Value::Label(name) => cformat!("<g,u>{}</>", name),
        }
    }
}

// ----------------------------------------------------------------------------
// Operand
// ----------------------------------------------------------------------------

/// One instruction operand. The variant fixes both the tag bit pattern and
/// whether the operand consumes a trailing word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// `A`
    Reg(Reg),
    /// `[A]`
    RegDeref(Reg),
    /// `[value + A]`, one trailing word
    RegOffset(Reg, Value),
    Pop,
    Peek,
    Push,
    Sp,
    Pc,
    Of,
    /// `[value]`, one trailing word
    AddrDeref(Value),
    /// Full literal in the next word
    Literal(Value),
    /// Small literal packed into the tag, 0..=31
    Inline(u16),
}

impl Operand {
    /// Literal operand for a bare numeric term: inlined when the magnitude
    /// fits, next-word form otherwise. Bracketed and label-valued literals
    /// never come through here.
    pub fn literal(value: u16) -> Operand {
        if value <= tag::INLINE_MAX {
            Operand::Inline(value)
        } else {
            Operand::Literal(Value::Literal(value))
        }
    }

    pub fn tag(&self) -> u16 {
        match self {
            Operand::Reg(r) => tag::REG + *r as u16,
            Operand::RegDeref(r) => tag::REG_DEREF + *r as u16,
            Operand::RegOffset(r, _) => tag::REG_OFFSET + *r as u16,
            Operand::Pop => tag::POP,
            Operand::Peek => tag::PEEK,
            Operand::Push => tag::PUSH,
            Operand::Sp => tag::SP,
            Operand::Pc => tag::PC,
            Operand::Of => tag::OF,
            Operand::AddrDeref(_) => tag::ADDR,
            Operand::Literal(_) => tag::NEXT,
            Operand::Inline(v) => tag::INLINE + v,
        }
    }

    /// The unresolved trailing word, when this operand carries one.
    pub fn trailing_value(&self) -> Option<&Value> {
        match self {
            Operand::RegOffset(_, v) | Operand::AddrDeref(v) | Operand::Literal(v) => Some(v),
            _ => None,
        }
    }

    /// Trailing word count. Depends only on the variant, never on a label's
    /// eventual value.
    pub fn extra_words(&self) -> u16 {
        match self.trailing_value() {
            Some(_) => 1,
            None => 0,
        }
    }

    /// The resolved trailing word, when this operand carries one.
    pub fn trailing(&self, labels: &Labels) -> Result<Option<u16>, UndeclaredLabel> {
        match self.trailing_value() {
            Some(value) => Ok(Some(value.resolve(labels)?)),
            None => Ok(None),
        }
    }

    /// Rebuild an operand from its tag field and trailing word.
    pub fn decode(tag_field: u16, next: Option<u16>) -> Result<Operand, String> {
        let reg = |base: u16| {
            Reg::try_from((tag_field - base) as u8).map_err(|err| err.to_string())
        };
        let word = || {
            next.map(Value::Literal)
                .ok_or_else(|| format!("Tag 0x{tag_field:02X} expects a trailing word"))
        };
        match tag_field {
            0x00..=0x07 => Ok(Operand::Reg(reg(tag::REG)?)),
            0x08..=0x0F => Ok(Operand::RegDeref(reg(tag::REG_DEREF)?)),
            0x10..=0x17 => Ok(Operand::RegOffset(reg(tag::REG_OFFSET)?, word()?)),
            tag::POP => Ok(Operand::Pop),
            tag::PEEK => Ok(Operand::Peek),
            tag::PUSH => Ok(Operand::Push),
            tag::SP => Ok(Operand::Sp),
            tag::PC => Ok(Operand::Pc),
            tag::OF => Ok(Operand::Of),
            tag::ADDR => Ok(Operand::AddrDeref(word()?)),
            tag::NEXT => Ok(Operand::Literal(word()?)),
            0x20..=0x3F => Ok(Operand::Inline(tag_field - tag::INLINE)),
            _ => Err(format!("Unknown operand tag 0x{tag_field:02X}")),
        }
    }

    pub fn cformat(&self) -> String {
        match self {
            Operand::Reg(r) => cformat!("<b>{}</>", r),
            Operand::RegDeref(r) => cformat!("<b>[{}]</>", r),
            Operand::RegOffset(r, v) => cformat!("[{} + <b>{}</>]", v.cformat(), r),
            Operand::Pop => cformat!("<m>POP</>"),
            Operand::Peek => cformat!("<m>PEEK</>"),
            Operand::Push => cformat!("<m>PUSH</>"),
            Operand::Sp => cformat!("<m>SP</>"),
            Operand::Pc => cformat!("<m>PC</>"),
            Operand::Of => cformat!("<m>O</>"),
            Operand::AddrDeref(v) => format!("[{}]", v.cformat()),
            Operand::Literal(v) => v.cformat(),
            Operand::Inline(v) => cformat!("<y>{}</>", v),
        }
    }
}

impl From<SysReg> for Operand {
    fn from(reg: SysReg) -> Operand {
        match reg {
            SysReg::SP => Operand::Sp,
            SysReg::PC => Operand::Pc,
            SysReg::O => Operand::Of,
        }
    }
}

impl From<StackOp> for Operand {
    fn from(op: StackOp) -> Operand {
        match op {
            StackOp::POP => Operand::Pop,
            StackOp::PEEK => Operand::Peek,
            StackOp::PUSH => Operand::Push,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_roundtrip {
        ($name:ident, $operand:expr) => {
            #[test]
            fn $name() {
                let operand = $operand;
                let next = operand.trailing(&Labels::new()).unwrap();
                let decoded = Operand::decode(operand.tag(), next).unwrap();
                assert_eq!(decoded, operand);
            }
        };
    }

    test_roundtrip!(reg, Operand::Reg(Reg::C));
    test_roundtrip!(reg_deref, Operand::RegDeref(Reg::J));
    test_roundtrip!(reg_offset, Operand::RegOffset(Reg::I, Value::Literal(0x1234)));
    test_roundtrip!(pop, Operand::Pop);
    test_roundtrip!(peek, Operand::Peek);
    test_roundtrip!(push, Operand::Push);
    test_roundtrip!(sp, Operand::Sp);
    test_roundtrip!(pc, Operand::Pc);
    test_roundtrip!(of, Operand::Of);
    test_roundtrip!(addr_deref, Operand::AddrDeref(Value::Literal(0x8000)));
    test_roundtrip!(next_word, Operand::Literal(Value::Literal(0x0040)));
    test_roundtrip!(inline_zero, Operand::Inline(0));
    test_roundtrip!(inline_max, Operand::Inline(31));

    #[test]
    fn literal_picks_inline_by_magnitude() {
        assert_eq!(Operand::literal(0), Operand::Inline(0));
        assert_eq!(Operand::literal(31), Operand::Inline(31));
        assert_eq!(Operand::literal(32), Operand::Literal(Value::Literal(32)));
        assert_eq!(Operand::literal(0xFFFF), Operand::Literal(Value::Literal(0xFFFF)));
    }

    #[test]
    fn extra_words_follow_the_variant() {
        assert_eq!(Operand::Reg(Reg::A).extra_words(), 0);
        assert_eq!(Operand::Inline(5).extra_words(), 0);
        assert_eq!(Operand::Pop.extra_words(), 0);
        assert_eq!(Operand::Literal(Value::Label("x".to_string())).extra_words(), 1);
        assert_eq!(Operand::AddrDeref(Value::Literal(2)).extra_words(), 1);
        assert_eq!(Operand::RegOffset(Reg::B, Value::Literal(2)).extra_words(), 1);
    }

    #[test]
    fn label_value_resolution() {
        let mut labels = Labels::new();
        labels.insert("start".to_string(), 0x10);
        assert_eq!(Value::Label("start".to_string()).resolve(&labels), Ok(0x10));
        assert_eq!(
            Value::Label("end".to_string()).resolve(&labels),
            Err(UndeclaredLabel("end".to_string()))
        );
    }

    #[test]
    fn rejects_out_of_range_tags() {
        assert!(Operand::decode(0x40, None).is_err());
        assert!(Operand::decode(tag::NEXT, None).is_err());
    }
}
