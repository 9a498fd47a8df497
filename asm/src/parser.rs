use arch::inst::Inst;
use arch::labels::Labels;
use arch::op::{BasicOp, NonBasicOp};
use arch::operand::{Operand, Value};
use arch::reg::{Reg, StackOp, SysReg};

use crate::emit;
use crate::error::{Error, SyntaxError};
use crate::lexer::Lexer;
use crate::token::TokenKind;

/// Recursive-descent assembler over the token stream.
///
/// Pass one (`parse`) builds the instruction sequence and the label table,
/// advancing the running word offset by each instruction's `word_size()` —
/// sizes never depend on a label's eventual value, so offsets are final
/// after a single forward pass. Pass two (`generated_code`) encodes against
/// the completed table; undeclared label references surface only there.
#[derive(Debug)]
pub struct Parser {
    lexer: Lexer,
    pos: u16,
    instructions: Vec<Inst>,
    labels: Labels,
}

impl Parser {
    pub fn from_str(source: &str) -> Self {
        Parser {
            lexer: Lexer::new(source),
            pos: 0,
            instructions: Vec::new(),
            labels: Labels::new(),
        }
    }

    pub fn from_path(path: &str) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path)
            .map_err(|err| Error::SourceNotFound(path.to_string(), err))?;
        Ok(Self::from_str(&source))
    }

    pub fn instructions(&self) -> &[Inst] {
        &self.instructions
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn size(&self) -> usize {
        self.instructions.len()
    }

    pub fn word_count(&self) -> u16 {
        self.pos
    }

    /// Release the built program and rewind the lexer.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.instructions.clear();
        self.labels.clear();
        self.lexer.reset();
    }

    fn syntax(&self, kind: SyntaxError) -> Error {
        Error::at(self.lexer.line(), kind)
    }

    // ------------------------------------------------------------------------
    // Pass one: grammar
    // ------------------------------------------------------------------------

    pub fn parse(&mut self) -> Result<(), Error> {
        self.lexer.next();
        while self.lexer.has_next() {
            self.statement()?;
        }
        Ok(())
    }

    // statement := [":" name] opcode
    fn statement(&mut self) -> Result<(), Error> {
        if self.lexer.kind() == TokenKind::LabelHeader {
            self.lexer.next();
            if self.lexer.kind() != TokenKind::Name {
                return Err(self.syntax(SyntaxError::ExpectingLabelName));
            }
            let name = self.lexer.text().to_string();
            if self.labels.insert(name.clone(), self.pos).is_some() {
                return Err(self.syntax(SyntaxError::RedefinedLabel(name)));
            }
            self.lexer.next();
        }
        let inst = self.opcode()?;
        self.pos += inst.word_size();
        self.instructions.push(inst);
        Ok(())
    }

    // opcode := basic-op operand "," operand | non-basic-op operand | "DAT" data
    fn opcode(&mut self) -> Result<Inst, Error> {
        match self.lexer.kind() {
            TokenKind::BasicOp => {
                let op = BasicOp::parse(self.lexer.text())
                    .map_err(|_| self.syntax(SyntaxError::ExpectingOpcode))?;
                self.lexer.next();
                let a = self.operand()?;
                if self.lexer.kind() != TokenKind::Separator {
                    return Err(self.syntax(SyntaxError::ExpectingSeparator));
                }
                self.lexer.next();
                let b = self.operand()?;
                Ok(Inst::Basic { op, a, b })
            }
            TokenKind::NonBasicOp => {
                let op = NonBasicOp::parse(self.lexer.text())
                    .map_err(|_| self.syntax(SyntaxError::ExpectingOpcode))?;
                self.lexer.next();
                let a = self.operand()?;
                Ok(Inst::NonBasic { op, a })
            }
            TokenKind::Directive => {
                self.lexer.next();
                self.data()
            }
            _ => Err(self.syntax(SyntaxError::ExpectingOpcode)),
        }
    }

    // operand := "[" expression "]" | term
    fn operand(&mut self) -> Result<Operand, Error> {
        if self.lexer.kind() == TokenKind::OpenBracket {
            self.lexer.next();
            let operand = self.expression()?;
            if self.lexer.kind() != TokenKind::CloseBracket {
                return Err(self.syntax(SyntaxError::ExpectingCloseBracket));
            }
            self.lexer.next();
            Ok(operand)
        } else {
            self.term()
        }
    }

    // expression := register | value ["+" register]
    //
    // Only used inside brackets. `value + register` is the single supported
    // address computation; bracketed literals keep the full-word form no
    // matter their magnitude.
    fn expression(&mut self) -> Result<Operand, Error> {
        match self.lexer.kind() {
            TokenKind::Register => {
                let reg = self.reg()?;
                self.lexer.next();
                Ok(Operand::RegDeref(reg))
            }
            TokenKind::Numeric | TokenKind::HexNumeric | TokenKind::Name => {
                let value = self.value()?;
                self.lexer.next();
                if self.lexer.kind() == TokenKind::Addition {
                    self.lexer.next();
                    if self.lexer.kind() != TokenKind::Register {
                        return Err(self.syntax(SyntaxError::ExpectingRegister));
                    }
                    let reg = self.reg()?;
                    self.lexer.next();
                    Ok(Operand::RegOffset(reg, value))
                } else {
                    Ok(Operand::AddrDeref(value))
                }
            }
            _ => Err(self.syntax(SyntaxError::InvalidExpression)),
        }
    }

    // term := name | numeric | register | system-register | stack-op
    fn term(&mut self) -> Result<Operand, Error> {
        let operand = match self.lexer.kind() {
            // labels always take the next-word form; their value is unknown
            // while sizes are being fixed
            TokenKind::Name => Operand::Literal(Value::Label(self.lexer.text().to_string())),
            TokenKind::Numeric | TokenKind::HexNumeric => Operand::literal(self.number()?),
            TokenKind::Register => Operand::Reg(self.reg()?),
            TokenKind::SysRegister => SysReg::parse(self.lexer.text())
                .map_err(|_| self.syntax(SyntaxError::InvalidOperand))?
                .into(),
            TokenKind::StackOp => StackOp::parse(self.lexer.text())
                .map_err(|_| self.syntax(SyntaxError::InvalidOperand))?
                .into(),
            _ => return Err(self.syntax(SyntaxError::InvalidOperand)),
        };
        self.lexer.next();
        Ok(operand)
    }

    // data := data-term {"," data-term}
    fn data(&mut self) -> Result<Inst, Error> {
        let mut values = Vec::new();
        self.data_term(&mut values)?;
        while self.lexer.kind() == TokenKind::Separator {
            self.lexer.next();
            self.data_term(&mut values)?;
        }
        Ok(Inst::Data(values))
    }

    // data-term := numeric | string | name
    fn data_term(&mut self, values: &mut Vec<Value>) -> Result<(), Error> {
        match self.lexer.kind() {
            TokenKind::Numeric | TokenKind::HexNumeric => {
                values.push(Value::Literal(self.number()?));
            }
            TokenKind::Name => values.push(Value::Label(self.lexer.text().to_string())),
            TokenKind::Str => {
                for ch in self.lexer.text().chars() {
                    values.push(Value::Literal(ch as u16));
                }
            }
            _ => return Err(self.syntax(SyntaxError::InvalidDataValue)),
        }
        self.lexer.next();
        Ok(())
    }

    fn reg(&self) -> Result<Reg, Error> {
        Reg::parse(self.lexer.text()).map_err(|_| self.syntax(SyntaxError::InvalidOperand))
    }

    /// Current numeric token as a 16-bit value. Inlining decisions happen on
    /// the parsed magnitude, decimal and hex alike.
    fn number(&self) -> Result<u16, Error> {
        let text = self.lexer.text();
        let radix = if self.lexer.kind() == TokenKind::HexNumeric { 16 } else { 10 };
        u16::from_str_radix(text, radix)
            .map_err(|_| self.syntax(SyntaxError::InvalidNumber(text.to_string())))
    }

    /// Current token as an unresolved value, numeric or label.
    fn value(&self) -> Result<Value, Error> {
        match self.lexer.kind() {
            TokenKind::Name => Ok(Value::Label(self.lexer.text().to_string())),
            _ => Ok(Value::Literal(self.number()?)),
        }
    }

    // ------------------------------------------------------------------------
    // Pass two: encoding
    // ------------------------------------------------------------------------

    /// Encode every instruction against the completed label table and
    /// concatenate the output words.
    pub fn generated_code(&self) -> Result<Vec<u16>, Error> {
        let mut words = Vec::with_capacity(self.pos as usize);
        for inst in &self.instructions {
            words.extend(inst.encode(&self.labels)?);
        }
        Ok(words)
    }

    /// Diagnostic listing: counts header plus the hex word dump.
    pub fn dump(&self) -> Result<String, Error> {
        let words = self.generated_code()?;
        Ok(emit::hex_dump(&words, self.instructions.len(), self.labels.len()))
    }
}
