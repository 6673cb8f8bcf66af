use airstorm_core::{err, Error, RawRecord, Result, Value};

use std::{cmp::Ordering, iter::Peekable, str::Chars};

/// A parsed filter formula.
///
/// Supports `OR`, `AND`, `NOT`, `RECORD_ID()`, `TRUE()`, `FALSE()`, `{Field}`
/// references, quoted strings, numbers and the comparison operators
/// `= != < > <= >=`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Value(Value),
    Field(String),
    RecordId,
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Compare(CmpOp, Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CmpOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LParen,
    RParen,
    Comma,
    Str(String),
    Num(Value),
    Field(String),
    Ident(String),
    Op(CmpOp),
}

impl Expr {
    pub(crate) fn parse(src: &str) -> Result<Expr> {
        let tokens = tokenize(src)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.expr()?;

        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(err!("unexpected {token:?} in formula `{src}`")),
        }
    }

    /// Returns `true` if the formula evaluates to a truthy value for `record`.
    pub(crate) fn matches(&self, record: &RawRecord) -> bool {
        truthy(&self.eval(record))
    }

    fn eval(&self, record: &RawRecord) -> Value {
        match self {
            Expr::Value(value) => value.clone(),
            Expr::Field(name) => record.field(name).cloned().unwrap_or_default(),
            Expr::RecordId => Value::String(record.id.clone()),
            Expr::Not(expr) => Value::Bool(!truthy(&expr.eval(record))),
            Expr::And(exprs) => Value::Bool(exprs.iter().all(|e| truthy(&e.eval(record)))),
            Expr::Or(exprs) => Value::Bool(exprs.iter().any(|e| truthy(&e.eval(record)))),
            Expr::Compare(op, lhs, rhs) => {
                let ordering = compare(&lhs.eval(record), &rhs.eval(record));
                Value::Bool(match op {
                    CmpOp::Eq => ordering == Ordering::Equal,
                    CmpOp::Ne => ordering != Ordering::Equal,
                    CmpOp::Lt => ordering == Ordering::Less,
                    CmpOp::Gt => ordering == Ordering::Greater,
                    CmpOp::Le => ordering != Ordering::Greater,
                    CmpOp::Ge => ordering != Ordering::Less,
                })
            }
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::I64(value) => *value != 0,
        Value::F64(value) => *value != 0.0,
        Value::String(value) => !value.is_empty(),
        Value::List(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Numbers compare numerically, everything else by its text.
fn compare(lhs: &Value, rhs: &Value) -> Ordering {
    match (number(lhs), number(rhs)) {
        (Some(lhs), Some(rhs)) => lhs.total_cmp(&rhs),
        _ => lhs.to_string().cmp(&rhs.to_string()),
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::I64(value) => Some(*value as f64),
        Value::F64(value) => Some(*value),
        _ => None,
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn expr(&mut self) -> Result<Expr> {
        let lhs = self.term()?;

        let Some(Token::Op(op)) = self.peek() else {
            return Ok(lhs);
        };
        let op = *op;
        self.pos += 1;

        let rhs = self.term()?;
        Ok(Expr::Compare(op, Box::new(lhs), Box::new(rhs)))
    }

    fn term(&mut self) -> Result<Expr> {
        match self.advance()? {
            Token::Str(value) => Ok(Expr::Value(Value::String(value))),
            Token::Num(value) => Ok(Expr::Value(value)),
            Token::Field(name) => Ok(Expr::Field(name)),
            Token::LParen => {
                let expr = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Token::Ident(name) => self.call(&name),
            token => Err(err!("unexpected {token:?} in formula")),
        }
    }

    fn call(&mut self, name: &str) -> Result<Expr> {
        self.expect(Token::LParen)?;
        let args = self.args()?;

        let arity = |n: usize| -> Result<()> {
            if args.len() == n {
                Ok(())
            } else {
                Err(err!("{name}() takes {n} arguments, got {}", args.len()))
            }
        };

        match name.to_ascii_uppercase().as_str() {
            "OR" => Ok(Expr::Or(args)),
            "AND" => Ok(Expr::And(args)),
            "NOT" => {
                arity(1)?;
                let mut args = args;
                Ok(Expr::Not(Box::new(args.remove(0))))
            }
            "RECORD_ID" => {
                arity(0)?;
                Ok(Expr::RecordId)
            }
            "TRUE" => {
                arity(0)?;
                Ok(Expr::Value(Value::Bool(true)))
            }
            "FALSE" => {
                arity(0)?;
                Ok(Expr::Value(Value::Bool(false)))
            }
            _ => Err(Error::unsupported_feature(format!(
                "formula function {name}() is not supported by the memory driver"
            ))),
        }
    }

    fn args(&mut self) -> Result<Vec<Expr>> {
        let mut args = vec![];

        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(args);
        }

        loop {
            args.push(self.expr()?);

            match self.advance()? {
                Token::Comma => continue,
                Token::RParen => return Ok(args),
                token => return Err(err!("expected `,` or `)`, got {token:?}")),
            }
        }
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        let token = self.advance()?;
        if token == expected {
            Ok(())
        } else {
            Err(err!("expected {expected:?}, got {token:?}"))
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Result<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| err!("unexpected end of formula"))?;
        self.pos += 1;
        Ok(token)
    }
}

fn tokenize(src: &str) -> Result<Vec<Token>> {
    let mut tokens = vec![];
    let mut chars = src.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '\'' | '"' => {
                chars.next();
                tokens.push(Token::Str(quoted(&mut chars, c)?));
            }
            '{' => {
                chars.next();
                let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                tokens.push(Token::Field(name));
            }
            '=' => {
                chars.next();
                tokens.push(Token::Op(CmpOp::Eq));
            }
            '!' | '<' | '>' => {
                chars.next();
                let eq = chars.next_if_eq(&'=').is_some();
                let op = match (c, eq) {
                    ('!', true) => CmpOp::Ne,
                    ('<', true) => CmpOp::Le,
                    ('>', true) => CmpOp::Ge,
                    ('<', false) if chars.next_if_eq(&'>').is_some() => CmpOp::Ne,
                    ('<', false) => CmpOp::Lt,
                    ('>', false) => CmpOp::Gt,
                    _ => return Err(err!("unexpected `{c}` in formula `{src}`")),
                };
                tokens.push(Token::Op(op));
            }
            c if c.is_ascii_digit() || c == '-' || c == '.' => {
                let mut text = String::new();
                text.push(c);
                chars.next();
                while let Some(c) = chars.next_if(|c| c.is_ascii_digit() || *c == '.') {
                    text.push(c);
                }
                tokens.push(Token::Num(number_token(&text)?));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(c) = chars.next_if(|c| c.is_alphanumeric() || *c == '_') {
                    name.push(c);
                }
                tokens.push(Token::Ident(name));
            }
            _ => return Err(err!("unexpected `{c}` in formula `{src}`")),
        }
    }

    Ok(tokens)
}

fn quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> Result<String> {
    let mut value = String::new();

    loop {
        match chars.next() {
            Some('\\') => match chars.next() {
                Some(c) => value.push(c),
                None => break,
            },
            Some(c) if c == quote => return Ok(value),
            Some(c) => value.push(c),
            None => break,
        }
    }

    Err(err!("unterminated string in formula"))
}

fn number_token(text: &str) -> Result<Value> {
    if let Ok(value) = text.parse::<i64>() {
        return Ok(Value::I64(value));
    }

    text.parse::<f64>()
        .map(Value::F64)
        .map_err(|_| err!("invalid number `{text}` in formula"))
}
