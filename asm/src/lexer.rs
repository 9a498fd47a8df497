use arch::op::{BasicOp, Directive, NonBasicOp};
use arch::reg::{Reg, StackOp, SysReg};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

const COMMENT: char = ';';
const HEX_MARK: char = 'x';
const LABEL_HEADER: char = ':';
const OPEN_BRACKET: char = '[';
const CLOSE_BRACKET: char = ']';
const SEPARATOR: char = ',';
const ADDITION: char = '+';
const QUOTE: char = '"';

/// One-token lexer over a character cursor. `next()` advances the current
/// token; there is no lookahead buffer beyond it.
#[derive(Debug)]
pub struct Lexer {
    cursor: Cursor,
    kind: TokenKind,
    text: String,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer { cursor: Cursor::new(source), kind: TokenKind::Begin, text: String::new() }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line(&self) -> usize {
        self.cursor.line()
    }

    pub fn token(&self) -> Token {
        Token::new(&self.text, self.kind, self.cursor.line())
    }

    /// False once the end-of-stream token has been produced.
    pub fn has_next(&self) -> bool {
        self.kind != TokenKind::End
    }

    pub fn reset(&mut self) {
        self.cursor.reset();
        self.kind = TokenKind::Begin;
        self.text.clear();
    }

    /// Advance to the next token.
    pub fn next(&mut self) {
        self.skip_whitespace();
        if !self.cursor.good() {
            self.text.clear();
            self.kind = TokenKind::End;
            return;
        }
        let ch = self.cursor.peek();
        if ch.is_ascii_alphabetic() {
            self.phrase();
        } else if ch.is_ascii_digit() {
            self.number();
        } else {
            self.symbol();
        }
    }

    // Comments run to the end of the line; comments and whitespace may
    // alternate.
    fn skip_whitespace(&mut self) {
        while self.cursor.good() && self.cursor.peek().is_whitespace() {
            self.cursor.advance();
        }
        if self.cursor.good() && self.cursor.peek() == COMMENT {
            while self.cursor.good() && self.cursor.peek() != '\n' {
                self.cursor.advance();
            }
            self.skip_whitespace();
        }
    }

    fn phrase(&mut self) {
        self.text.clear();
        while self.cursor.good() {
            let ch = self.cursor.peek();
            if !ch.is_ascii_alphanumeric() && ch != '_' {
                break;
            }
            self.text.push(ch);
            self.cursor.advance();
        }
        self.kind = classify(&self.text);
    }

    fn number(&mut self) {
        self.text.clear();
        self.kind = TokenKind::Numeric;
        self.text.push(self.cursor.peek());
        self.cursor.advance();
        // a hex marker directly after the first digit discards the prefix
        // and switches to a hex digit run
        if self.cursor.good() && self.cursor.peek() == HEX_MARK {
            self.cursor.advance();
            self.text.clear();
            self.kind = TokenKind::HexNumeric;
            while self.cursor.good() && self.cursor.peek().is_ascii_hexdigit() {
                self.text.push(self.cursor.peek());
                self.cursor.advance();
            }
        } else {
            while self.cursor.good() && self.cursor.peek().is_ascii_digit() {
                self.text.push(self.cursor.peek());
                self.cursor.advance();
            }
        }
    }

    fn symbol(&mut self) {
        let ch = self.cursor.peek();
        self.text.clear();
        match ch {
            CLOSE_BRACKET => {
                self.text.push(ch);
                self.kind = TokenKind::CloseBracket;
            }
            LABEL_HEADER => {
                self.text.push(ch);
                self.kind = TokenKind::LabelHeader;
            }
            OPEN_BRACKET => {
                self.text.push(ch);
                self.kind = TokenKind::OpenBracket;
            }
            SEPARATOR => {
                self.text.push(ch);
                self.kind = TokenKind::Separator;
            }
            ADDITION => {
                self.text.push(ch);
                self.kind = TokenKind::Addition;
            }
            QUOTE => {
                self.kind = TokenKind::Str;
                while let Some(ch) = self.cursor.advance() {
                    if ch == QUOTE {
                        break;
                    }
                    self.text.push(ch);
                }
            }
            _ => {
                self.text.push(ch);
                self.kind = TokenKind::Unknown;
            }
        }
        self.cursor.advance();
    }
}

/// Fixed-priority classification over the closed symbol sets. The sets are
/// disjoint and case-sensitive; lookup goes through the compiled `from_str`
/// matches of the `arch` enums.
fn classify(text: &str) -> TokenKind {
    if Reg::parse(text).is_ok() {
        TokenKind::Register
    } else if SysReg::parse(text).is_ok() {
        TokenKind::SysRegister
    } else if StackOp::parse(text).is_ok() {
        TokenKind::StackOp
    } else if BasicOp::parse(text).is_ok() {
        TokenKind::BasicOp
    } else if NonBasicOp::parse(text).is_ok() {
        TokenKind::NonBasicOp
    } else if Directive::parse(text).is_ok() {
        TokenKind::Directive
    } else {
        TokenKind::Name
    }
}
