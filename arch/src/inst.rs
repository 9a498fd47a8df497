use color_print::cformat;

use crate::labels::{Labels, UndeclaredLabel};
use crate::op::{BasicOp, NonBasicOp};
use crate::operand::{Operand, Value};

// ----------------------------------------------------------------------------
// Word format
// ----------------------------------------------------------------------------

// Basic:     bits [0,4) opcode, [4,10) operand A tag, [10,16) operand B tag.
// Non-basic: bits [0,4) zero,   [4,10) opcode,        [10,16) operand A tag.

fn enc_format(op: u16, a: u16, b: u16) -> u16 {
    (op & 0xF) | (a & 0x3F) << 4 | (b & 0x3F) << 10
}

fn dec_format(word: u16) -> (u16, u16, u16) {
    (word & 0xF, (word >> 4) & 0x3F, (word >> 10) & 0x3F)
}

fn field_width(tag: u16) -> usize {
    matches!(tag, 0x10..=0x17 | 0x1E | 0x1F) as usize
}

// ----------------------------------------------------------------------------
// Instruction
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    Basic { op: BasicOp, a: Operand, b: Operand },
    NonBasic { op: NonBasicOp, a: Operand },
    Data(Vec<Value>),
}

impl Inst {
    /// Word count, known before any label is resolved.
    pub fn word_size(&self) -> u16 {
        match self {
            Inst::Basic { a, b, .. } => 1 + a.extra_words() + b.extra_words(),
            Inst::NonBasic { a, .. } => 1 + a.extra_words(),
            Inst::Data(values) => values.len() as u16,
        }
    }

    /// Encode into output words, resolving label references against the
    /// final table. Trailing words follow in A-then-B order.
    pub fn encode(&self, labels: &Labels) -> Result<Vec<u16>, UndeclaredLabel> {
        let mut words = Vec::with_capacity(self.word_size() as usize);
        match self {
            Inst::Basic { op, a, b } => {
                words.push(enc_format(*op as u16, a.tag(), b.tag()));
                if let Some(word) = a.trailing(labels)? {
                    words.push(word);
                }
                if let Some(word) = b.trailing(labels)? {
                    words.push(word);
                }
            }
            Inst::NonBasic { op, a } => {
                words.push(enc_format(0, *op as u16, a.tag()));
                if let Some(word) = a.trailing(labels)? {
                    words.push(word);
                }
            }
            Inst::Data(values) => {
                for value in values {
                    words.push(value.resolve(labels)?);
                }
            }
        }
        Ok(words)
    }

    /// Read one instruction back from a word stream. Returns the instruction
    /// and the number of words consumed. Data blocks carry no opcode word
    /// and are not recoverable.
    pub fn decode(words: &[u16]) -> Result<(Inst, usize), String> {
        let word = *words.first().ok_or("Empty word stream")?;
        let (op, field_a, field_b) = dec_format(word);
        let mut used = 1;
        if op == 0 {
            let op = NonBasicOp::try_from(field_a as u8).map_err(|err| err.to_string())?;
            let a = decode_operand(field_b, words, &mut used)?;
            Ok((Inst::NonBasic { op, a }, used))
        } else {
            let op = BasicOp::try_from(op as u8).map_err(|err| err.to_string())?;
            let a = decode_operand(field_a, words, &mut used)?;
            let b = decode_operand(field_b, words, &mut used)?;
            Ok((Inst::Basic { op, a, b }, used))
        }
    }

    pub fn cformat(&self) -> String {
        match self {
            Inst::Basic { op, a, b } => {
                cformat!("<r>{:<4}</> {}, {}", op, a.cformat(), b.cformat())
            }
            Inst::NonBasic { op, a } => cformat!("<r>{:<4}</> {}", op, a.cformat()),
            Inst::Data(values) => {
                let items: Vec<String> = values.iter().map(|v| v.cformat()).collect();
                cformat!("<r>{:<4}</> {}", "DAT", items.join(", "))
            }
        }
    }
}

fn decode_operand(tag: u16, words: &[u16], used: &mut usize) -> Result<Operand, String> {
    let next = if field_width(tag) == 1 {
        let word = *words.get(*used).ok_or("Truncated word stream")?;
        *used += 1;
        Some(word)
    } else {
        None
    };
    Operand::decode(tag, next)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
