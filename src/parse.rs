use std::fmt::Display;
use std::iter::Peekable;
use std::slice;

use miette::Diagnostic;
use thiserror::Error;

use crate::lex::Token;

#[derive(Error, Debug, Diagnostic)]
pub enum ParseError {
    #[error("dangling operator `{op}`")]
    #[diagnostic(help("binary operators need a number on both sides"))]
    DanglingOperator { op: char },

    #[error("unexpected end of expression")]
    #[diagnostic(help("expressions have the shape `number (operator number)*`"))]
    UnexpectedEnd,

    #[error("unexpected token {token}")]
    #[diagnostic(help("only numbers joined by `+ - / * < >` are accepted here"))]
    UnexpectedToken { token: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Greater,
    Less,
}

impl Op {
    fn as_char(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Star => '*',
            Op::Slash => '/',
            Op::Greater => '>',
            Op::Less => '<',
        }
    }
}

impl TryFrom<char> for Op {
    type Error = ParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(Op::Plus),
            '-' => Ok(Op::Minus),
            '*' => Ok(Op::Star),
            '/' => Ok(Op::Slash),
            '>' => Ok(Op::Greater),
            '<' => Ok(Op::Less),
            _ => Err(ParseError::UnexpectedToken {
                token: Token::Operation(c).to_string(),
            }),
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An expression tree. Binary nodes exclusively own their children; the
/// grammar admits no sharing and no cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Binary(Op, Box<Expr>, Box<Expr>),
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Expr::Binary(op, left, right) => write!(f, "{left}{op}{right}"),
        }
    }
}

/// Parse a token sequence into an expression tree.
///
/// The accepted grammar is a flat chain `number (operator number)*`. The
/// tree binds `*` and `/` ahead of `+ - > <` and groups left-to-right
/// within a tier, so rendering it back with [`Expr::fmt`] reproduces the
/// operator/operand order of the input exactly. Anything outside that
/// shape fails, including leftover tokens after a complete expression.
pub fn parse(tokens: &[Token<'_>]) -> Result<Expr, ParseError> {
    let mut parser = Parser {
        tokens: tokens.iter().peekable(),
    };
    let expr = parser.parse_within(0)?;

    match parser.tokens.next() {
        Some(token) => Err(ParseError::UnexpectedToken {
            token: token.to_string(),
        }),
        None => Ok(expr),
    }
}

struct Parser<'t, 'src> {
    tokens: Peekable<slice::Iter<'t, Token<'src>>>,
}

impl<'t, 'src> Parser<'t, 'src> {
    fn parse_within(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.operand()?;

        while let Some(Token::Operation(c)) = self.tokens.peek() {
            let op = Op::try_from(*c)?;
            let (l_bp, r_bp) = infix_binding_power(op);
            if l_bp < min_bp {
                break;
            }
            self.tokens.next();

            let rhs = self.parse_within(r_bp).map_err(|e| match e {
                ParseError::UnexpectedEnd => ParseError::DanglingOperator { op: op.as_char() },
                other => other,
            })?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }

        Ok(lhs)
    }

    fn operand(&mut self) -> Result<Expr, ParseError> {
        match self.tokens.next() {
            Some(Token::Number(n)) => Ok(Expr::Number(*n)),
            Some(Token::Operation(c)) => Err(ParseError::DanglingOperator { op: *c }),
            Some(token) => Err(ParseError::UnexpectedToken {
                token: token.to_string(),
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

fn infix_binding_power(op: Op) -> (u8, u8) {
    match op {
        Op::Plus | Op::Minus | Op::Greater | Op::Less => (1, 2),
        Op::Star | Op::Slash => (3, 4),
    }
}
