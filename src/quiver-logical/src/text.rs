//! Textual expression format.
//!
//! The serialized form is what [`LogicalExpr`]'s `Display` prints: binary
//! nodes fully parenthesized, strings single-quoted, typed nulls as `NULL`.
//! The parser accepts that form plus ordinary operator precedence:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := INT | FLOAT | 'NULL' | 'TRUE' | 'FALSE' | STRING
//!         | IDENT '(' [expr (',' expr)*] ')' | IDENT | '(' expr ')'
//!         | '-' (INT | FLOAT)
//! ```
//!
//! Nulls and unregistered identifiers take the parser's default type.

use std::collections::HashMap;

use common_error::{QuiverError, QuiverResult};
use quiver_core::{DataType, Value};

use crate::expr::{BinaryOp, LogicalExpr};

/// Parse an expression with the default parser (unregistered columns and
/// nulls are `Int64`).
pub fn parse(text: &str) -> QuiverResult<LogicalExpr> {
    ExprParser::new().parse(text)
}

/// Serialize an expression to its deterministic textual form.
pub fn serialize(expr: &LogicalExpr) -> String {
    expr.to_string()
}

/// Configurable expression parser.
#[derive(Debug, Clone)]
pub struct ExprParser {
    columns: HashMap<String, DataType>,
    default_type: DataType,
}

impl Default for ExprParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprParser {
    /// Create a parser whose default type is `Int64`.
    pub fn new() -> Self {
        Self {
            columns: HashMap::new(),
            default_type: DataType::Int64,
        }
    }

    /// Register the type of a column.
    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.columns.insert(name.into(), data_type);
        self
    }

    /// Set the type given to nulls and unregistered columns.
    #[must_use]
    pub const fn with_default_type(mut self, data_type: DataType) -> Self {
        self.default_type = data_type;
        self
    }

    /// Type the parser assigns to `NULL`.
    pub const fn default_type(&self) -> DataType {
        self.default_type
    }

    /// Parse `text` into an expression tree.
    pub fn parse(&self, text: &str) -> QuiverResult<LogicalExpr> {
        let tokens = tokenize(text)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            options: self,
        };
        let expr = parser.parse_expr()?;
        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(QuiverError::parse(format!(
                "unexpected {} at offset {}",
                token.kind, token.offset
            ))),
        }
    }
}

// ============================================================================
// Lexer
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number { text: String, is_float: bool },
    Ident(String),
    Str(String),
    Op(BinaryOp),
    LParen,
    RParen,
    Comma,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number { text, .. } => write!(f, "number '{text}'"),
            Self::Ident(name) => write!(f, "identifier '{name}'"),
            Self::Str(_) => write!(f, "string literal"),
            Self::Op(op) => write!(f, "'{op}'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::Comma => write!(f, "','"),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

fn tokenize(text: &str) -> QuiverResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        let kind = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '(' => {
                chars.next();
                TokenKind::LParen
            }
            ')' => {
                chars.next();
                TokenKind::RParen
            }
            ',' => {
                chars.next();
                TokenKind::Comma
            }
            '+' | '-' | '*' | '/' => {
                chars.next();
                match BinaryOp::from_symbol(c) {
                    Some(op) => TokenKind::Op(op),
                    None => return Err(QuiverError::internal("unknown operator symbol")),
                }
            }
            '\'' => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some((_, '\'')) => {
                            if matches!(chars.peek(), Some((_, '\''))) {
                                chars.next();
                                value.push('\'');
                            } else {
                                break;
                            }
                        }
                        Some((_, ch)) => value.push(ch),
                        None => {
                            return Err(QuiverError::parse(format!(
                                "unterminated string literal at offset {offset}"
                            )))
                        }
                    }
                }
                TokenKind::Str(value)
            }
            c if c.is_ascii_digit() => {
                let mut text = String::new();
                let mut is_float = false;
                while let Some(&(_, ch)) = chars.peek() {
                    match ch {
                        '0'..='9' => text.push(ch),
                        '.' if !is_float => {
                            is_float = true;
                            text.push(ch);
                        }
                        'e' | 'E' => {
                            is_float = true;
                            text.push(ch);
                            chars.next();
                            if let Some(&(_, sign @ ('+' | '-'))) = chars.peek() {
                                text.push(sign);
                                chars.next();
                            }
                            continue;
                        }
                        _ => break,
                    }
                    chars.next();
                }
                TokenKind::Number { text, is_float }
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        name.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                TokenKind::Ident(name)
            }
            other => {
                return Err(QuiverError::parse(format!(
                    "unexpected character '{other}' at offset {offset}"
                )))
            }
        };
        tokens.push(Token { kind, offset });
    }

    Ok(tokens)
}

// ============================================================================
// Parser
// ============================================================================

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    options: &'a ExprParser,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| &t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> QuiverResult<()> {
        match self.next() {
            Some(token) if &token.kind == kind => Ok(()),
            Some(token) => Err(QuiverError::parse(format!(
                "expected {kind}, found {} at offset {}",
                token.kind, token.offset
            ))),
            None => Err(QuiverError::parse(format!(
                "expected {kind}, found end of input"
            ))),
        }
    }

    fn peek_op(&self, ops: [BinaryOp; 2]) -> Option<BinaryOp> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Op(op),
                ..
            }) if ops.contains(op) => Some(*op),
            _ => None,
        }
    }

    fn parse_expr(&mut self) -> QuiverResult<LogicalExpr> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.peek_op([BinaryOp::Add, BinaryOp::Subtract]) {
            self.pos += 1;
            let right = self.parse_term()?;
            left = LogicalExpr::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> QuiverResult<LogicalExpr> {
        let mut left = self.parse_factor()?;
        while let Some(op) = self.peek_op([BinaryOp::Multiply, BinaryOp::Divide]) {
            self.pos += 1;
            let right = self.parse_factor()?;
            left = LogicalExpr::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> QuiverResult<LogicalExpr> {
        let Some(token) = self.next() else {
            return Err(QuiverError::parse("unexpected end of input"));
        };

        match token.kind {
            TokenKind::Number { text, is_float } => parse_number(&text, is_float, false),
            TokenKind::Str(s) => Ok(LogicalExpr::Literal(Value::String(s))),
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Op(BinaryOp::Subtract) => match self.next() {
                Some(Token {
                    kind: TokenKind::Number { text, is_float },
                    ..
                }) => parse_number(&text, is_float, true),
                Some(Token {
                    kind: TokenKind::Ident(name),
                    ..
                }) if name.eq_ignore_ascii_case("inf") => {
                    Ok(LogicalExpr::Literal(Value::Float64(f64::NEG_INFINITY)))
                }
                _ => Err(QuiverError::parse(format!(
                    "unary '-' must precede a numeric literal (offset {})",
                    token.offset
                ))),
            },
            TokenKind::Ident(name) => self.parse_identifier(name),
            other => Err(QuiverError::parse(format!(
                "unexpected {other} at offset {}",
                token.offset
            ))),
        }
    }

    fn parse_identifier(&mut self, name: String) -> QuiverResult<LogicalExpr> {
        if self.eat(&TokenKind::LParen) {
            let mut args = Vec::new();
            if !self.eat(&TokenKind::RParen) {
                loop {
                    args.push(self.parse_expr()?);
                    if self.eat(&TokenKind::RParen) {
                        break;
                    }
                    self.expect(&TokenKind::Comma)?;
                }
            }
            return Ok(LogicalExpr::function(name, args));
        }

        let keyword = match name.to_ascii_uppercase().as_str() {
            "NULL" => Some(Value::Null(self.options.default_type)),
            "TRUE" => Some(Value::Bool(true)),
            "FALSE" => Some(Value::Bool(false)),
            "NAN" => Some(Value::Float64(f64::NAN)),
            "INF" => Some(Value::Float64(f64::INFINITY)),
            _ => None,
        };
        if let Some(value) = keyword {
            return Ok(LogicalExpr::Literal(value));
        }

        let data_type = self
            .options
            .columns
            .get(&name)
            .copied()
            .unwrap_or(self.options.default_type);
        Ok(LogicalExpr::column(name, data_type))
    }
}

fn parse_number(digits: &str, is_float: bool, negative: bool) -> QuiverResult<LogicalExpr> {
    let text = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    let value = if is_float {
        text.parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| QuiverError::parse(format!("invalid float literal '{text}': {e}")))?
    } else {
        text.parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| QuiverError::parse(format!("invalid integer literal '{text}': {e}")))?
    };
    Ok(LogicalExpr::Literal(value))
}
