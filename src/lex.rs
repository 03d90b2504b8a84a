use std::fmt::Display;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Reserved words. These lex as [`Token::Identifier`] while free-form names
/// lex as [`Token::Keyword`]; the mapping is inverted on purpose and callers
/// depend on it staying that way.
const RESERVED: [&str; 3] = ["func", "if", "else"];

#[derive(Error, Debug, Diagnostic)]
#[error("malformed numeric literal `{literal}`")]
#[diagnostic(help("a digit-led lexeme must parse as a floating-point number"))]
pub struct NumberParseError {
    #[source_code]
    src: NamedSource<String>,

    #[label("this numeric literal")]
    bad_bit: SourceSpan,

    pub literal: String,
}

impl NumberParseError {
    pub fn line(&self) -> usize {
        self.src.inner()[..=self.bad_bit.offset()].lines().count()
    }
}

/// A lexical unit. Equality is structural: kind and payload must both match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'src> {
    Unknown(char),
    LeftBracket,
    RightBracket,
    Comma,
    Number(f64),
    Keyword(&'src str),
    Identifier(&'src str),
    Operation(char),
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Unknown(c) => write!(f, "UNKNOWN {c}"),
            Token::LeftBracket => write!(f, "LEFT_BRACKET ("),
            Token::RightBracket => write!(f, "RIGHT_BRACKET )"),
            Token::Comma => write!(f, "COMMA ,"),
            Token::Number(n) => write!(f, "NUMBER {n}"),
            Token::Keyword(name) => write!(f, "KEYWORD {name}"),
            Token::Identifier(name) => write!(f, "IDENTIFIER {name}"),
            Token::Operation(c) => write!(f, "OPERATION {c}"),
        }
    }
}

/// Lex `input` to completion. Unknown characters become [`Token::Unknown`]
/// rather than stopping the scan; only a malformed numeric literal fails.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, NumberParseError> {
    Lexer::new(None, input).collect()
}

pub struct Lexer<'src> {
    filename: Option<&'src str>,
    whole: &'src str,
    rest: &'src str,
    byte: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(filename: Option<&'src str>, input: &'src str) -> Self {
        Lexer {
            filename,
            whole: input,
            rest: input,
            byte: 0,
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, NumberParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut chars = self.rest.chars();
            let c = chars.next()?;
            let cur = self.rest;
            self.rest = chars.as_str();
            self.byte += c.len_utf8();

            enum Start {
                Word,
                Number,
            }

            let started = match c {
                '(' => return Some(Ok(Token::LeftBracket)),
                ')' => return Some(Ok(Token::RightBracket)),
                ',' => return Some(Ok(Token::Comma)),
                '+' | '-' | '/' | '*' | '<' | '>' => return Some(Ok(Token::Operation(c))),
                'a'..='z' | 'A'..='Z' => Start::Word,
                '0'..='9' => Start::Number,
                ' ' | '\r' | '\t' | '\n' => continue, // Skip whitespace
                c => return Some(Ok(Token::Unknown(c))),
            };

            match started {
                Start::Word => {
                    let first_non_word = cur
                        .find(|c| !matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_'))
                        .unwrap_or(cur.len());

                    let literal = &cur[..first_non_word];

                    let extra_bytes = literal.len() - c.len_utf8();
                    self.byte += extra_bytes;
                    self.rest = &self.rest[extra_bytes..];

                    return Some(Ok(if RESERVED.contains(&literal) {
                        Token::Identifier(literal)
                    } else {
                        Token::Keyword(literal)
                    }));
                }
                Start::Number => {
                    let literal = number_lexeme(cur);

                    let extra_bytes = literal.len() - c.len_utf8();
                    self.byte += extra_bytes;
                    self.rest = &self.rest[extra_bytes..];

                    let n = match literal.parse() {
                        Ok(n) => n,
                        Err(_) => {
                            return Some(Err(NumberParseError {
                                src: NamedSource::new(
                                    self.filename.unwrap_or("<input>"),
                                    self.whole.to_string(),
                                ),
                                bad_bit: SourceSpan::from(self.byte - literal.len()..self.byte),
                                literal: literal.to_string(),
                            }));
                        }
                    };

                    return Some(Ok(Token::Number(n)));
                }
            }
        }
    }
}

/// Maximal floating-point lexeme at the start of `input`: integer digits, an
/// optional fraction, an optional signed exponent. A `.` or `e` that is not
/// followed by a digit stays unconsumed.
fn number_lexeme(input: &str) -> &str {
    let bytes = input.as_bytes();

    let mut end = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }

    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end += 2;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        if bytes.get(exponent).is_some_and(u8::is_ascii_digit) {
            end = exponent + 1;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
        }
    }

    &input[..end]
}
