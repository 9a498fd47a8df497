use dasm16::lexer::Lexer;
use dasm16::token::TokenKind::{self, *};

fn first(code: &str) -> (TokenKind, String, usize) {
    let mut lexer = Lexer::new(code);
    lexer.next();
    (lexer.kind(), lexer.text().to_string(), lexer.line())
}

macro_rules! case {
    ($name:ident, $code:expr, $kind:expr, $text:expr) => {
        #[test]
        fn $name() {
            let (kind, text, _) = first($code);
            assert_eq!(kind, $kind);
            assert_eq!(text, $text);
        }
    };
}

// ---- Phrases ----
case!(register_a, "A", Register, "A");
case!(register_j, "J", Register, "J");
case!(sys_sp, "SP", SysRegister, "SP");
case!(sys_pc, "PC", SysRegister, "PC");
case!(sys_overflow, "O", SysRegister, "O");
case!(stack_pop, "POP", StackOp, "POP");
case!(stack_peek, "PEEK", StackOp, "PEEK");
case!(stack_push, "PUSH", StackOp, "PUSH");
case!(basic_set, "SET", BasicOp, "SET");
case!(basic_ifb, "IFB", BasicOp, "IFB");
case!(non_basic_jsr, "JSR", NonBasicOp, "JSR");
case!(directive_dat, "DAT", Directive, "DAT");
case!(lowercase_is_a_name, "set", Name, "set");
case!(name_plain, "loop", Name, "loop");
case!(name_with_digits, "loop2", Name, "loop2");
case!(name_with_underscore, "main_loop", Name, "main_loop");

// ---- Numbers ----
case!(numeric, "42", Numeric, "42");
case!(numeric_zero, "0", Numeric, "0");
case!(hex, "0x1F", HexNumeric, "1F");
case!(hex_uppercase_digits, "0xBEEF", HexNumeric, "BEEF");
case!(hex_marker_discards_prefix, "3x12", HexNumeric, "12");

// ---- Symbols ----
case!(label_header, ":", LabelHeader, ":");
case!(open_bracket, "[", OpenBracket, "[");
case!(close_bracket, "]", CloseBracket, "]");
case!(separator, ",", Separator, ",");
case!(addition, "+", Addition, "+");
case!(string, "\"hi\"", Str, "hi");
case!(unknown, "$", Unknown, "$");

#[test]
fn walks_a_statement() {
    let mut lexer = Lexer::new(":start SET A, 5 ; boot");
    let mut kinds = Vec::new();
    lexer.next();
    while lexer.has_next() {
        kinds.push(lexer.kind());
        lexer.next();
    }
    assert_eq!(kinds, vec![LabelHeader, Name, BasicOp, Register, Separator, Numeric]);
}

#[test]
fn counts_lines() {
    let mut lexer = Lexer::new("SET\n\nADD ; comment\nSUB");
    lexer.next();
    assert_eq!((lexer.text().to_string(), lexer.line()), ("SET".to_string(), 1));
    lexer.next();
    assert_eq!((lexer.text().to_string(), lexer.line()), ("ADD".to_string(), 3));
    lexer.next();
    assert_eq!((lexer.text().to_string(), lexer.line()), ("SUB".to_string(), 4));
}

#[test]
fn comment_only_source_is_empty() {
    let mut lexer = Lexer::new("; nothing here\n  ; or here");
    lexer.next();
    assert_eq!(lexer.kind(), End);
    assert!(!lexer.has_next());
}

#[test]
fn begin_state_before_first_next() {
    let lexer = Lexer::new("SET");
    assert_eq!(lexer.kind(), Begin);
    assert!(lexer.has_next());
}

#[test]
fn reset_rewinds_the_stream() {
    let mut lexer = Lexer::new("SET A");
    lexer.next();
    lexer.next();
    lexer.reset();
    assert_eq!(lexer.kind(), Begin);
    lexer.next();
    assert_eq!(lexer.kind(), BasicOp);
    assert_eq!(lexer.text(), "SET");
}

#[test]
fn bracketed_expression_tokens() {
    let mut lexer = Lexer::new("[0x10 + I]");
    let mut seen = Vec::new();
    lexer.next();
    while lexer.has_next() {
        seen.push((lexer.kind(), lexer.text().to_string()));
        lexer.next();
    }
    assert_eq!(
        seen,
        vec![
            (OpenBracket, "[".to_string()),
            (HexNumeric, "10".to_string()),
            (Addition, "+".to_string()),
            (Register, "I".to_string()),
            (CloseBracket, "]".to_string()),
        ]
    );
}
