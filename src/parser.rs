use crate::{
    ast::{CompareOp, Comparison, Connective, Expr, Literal, Segment, Term, Token},
    lexer::{LexError, Lexer},
};
use std::fmt;
use std::mem;

/// Syntax errors: the query text does not fully match the grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Lexical error in the query text
    Lex(LexError),

    /// A token the grammar does not allow at this position
    UnexpectedToken {
        expected: &'static str,
        found: Token,
    },

    /// Input left over after a complete expression
    TrailingInput(Token),

    /// Left-hand path token that does not decompose into segments
    InvalidPath { token: String, message: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::UnexpectedToken { expected, found } => {
                write!(f, "Expected {}, got {:?}", expected, found)
            }
            ParseError::TrailingInput(token) => {
                write!(f, "Unexpected input after expression: {:?}", token)
            }
            ParseError::InvalidPath { token, message } => {
                write!(f, "Invalid path '{}': {}", token, message)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(ParseError::UnexpectedToken {
                expected: description,
                found: self.current_token.clone(),
            });
        }
        self.advance()
    }

    /// Parse a complete query expression; trailing tokens are an error.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        match self.current_token {
            Token::Eof => Ok(expr),
            ref token => Err(ParseError::TrailingInput(token.clone())),
        }
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(&Token::Or) {
            self.advance()?;
            let right = self.parse_and()?;

            left = Expr::Binary {
                op: Connective::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;

        while self.check(&Token::And) {
            self.advance()?;
            let right = self.parse_factor()?;

            left = Expr::Binary {
                op: Connective::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parse a grouped sub-expression or a single term.
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        if self.check(&Token::LParen) {
            self.advance()?;
            let expr = self.parse_expression()?;
            self.expect(Token::RParen, "')'")?;
            return Ok(expr);
        }
        self.parse_term().map(Expr::Term)
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        let path_token = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Word(word) => {
                self.advance()?;
                word
            }
            token => {
                return Err(ParseError::UnexpectedToken {
                    expected: "path or '('",
                    found: token,
                });
            }
        };

        let path = parse_path(&path_token)?;

        let op = match self.current_token {
            Token::Eq => Some(CompareOp::Eq),
            Token::NotEq => Some(CompareOp::NotEq),
            Token::Lt => Some(CompareOp::Lt),
            Token::LtEq => Some(CompareOp::LtEq),
            Token::Gt => Some(CompareOp::Gt),
            Token::GtEq => Some(CompareOp::GtEq),
            Token::Contains => Some(CompareOp::Contains),
            Token::NotContains => Some(CompareOp::NotContains),
            _ => None,
        };

        let comparison = match op {
            None => None,
            Some(op) => {
                self.advance()?;
                let literal = match mem::replace(&mut self.current_token, Token::Eof) {
                    Token::Word(word) => {
                        self.advance()?;
                        Literal::from_word(word)
                    }
                    Token::Str(s) => {
                        self.advance()?;
                        Literal::String(s)
                    }
                    token => {
                        return Err(ParseError::UnexpectedToken {
                            expected: "literal",
                            found: token,
                        });
                    }
                };
                Some(Comparison { op, literal })
            }
        };

        Ok(Term { path, comparison })
    }
}

/// Decompose a left-hand path token into ordered traversal segments.
///
/// Independent grammar entry point: `ident ('.' ident | '[' digits ']')*`
/// where an identifier starts with a letter or underscore. The identifiers
/// `length`, `any`, and `all` classify as pseudo-segments, and `get_*`
/// classifies as a dereference; everything else is a field lookup.
///
/// # Examples
///
/// ```
/// use sift_lang::{parse_path, Segment};
///
/// let segments = parse_path("note_list.any.get_note.gramps_id").unwrap();
/// assert_eq!(
///     segments,
///     vec![
///         Segment::Field("note_list".to_string()),
///         Segment::Any,
///         Segment::Deref("note".to_string()),
///         Segment::Field("gramps_id".to_string()),
///     ]
/// );
/// ```
pub fn parse_path(token: &str) -> Result<Vec<Segment>, ParseError> {
    let invalid = |message: &str| ParseError::InvalidPath {
        token: token.to_string(),
        message: message.to_string(),
    };

    let chars: Vec<char> = token.chars().collect();
    let mut position = 0;

    let read_identifier = |position: &mut usize| -> Option<String> {
        let first = *chars.get(*position)?;
        if !first.is_ascii_alphabetic() && first != '_' {
            return None;
        }
        let mut name = String::new();
        while let Some(&ch) = chars.get(*position) {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                name.push(ch);
                *position += 1;
            } else {
                break;
            }
        }
        Some(name)
    };

    let first = read_identifier(&mut position)
        .ok_or_else(|| invalid("path must start with an identifier"))?;
    let mut segments = vec![classify(first)];

    while position < chars.len() {
        match chars[position] {
            '.' => {
                position += 1;
                let name = read_identifier(&mut position)
                    .ok_or_else(|| invalid("expected identifier after '.'"))?;
                segments.push(classify(name));
            }
            '[' => {
                position += 1;
                let mut digits = String::new();
                while let Some(&ch) = chars.get(position) {
                    if ch.is_ascii_digit() {
                        digits.push(ch);
                        position += 1;
                    } else {
                        break;
                    }
                }
                if digits.is_empty() {
                    return Err(invalid("expected integer index inside '[]'"));
                }
                if chars.get(position) != Some(&']') {
                    return Err(invalid("unclosed index bracket"));
                }
                position += 1;
                let index = digits
                    .parse::<usize>()
                    .map_err(|_| invalid("index out of range"))?;
                segments.push(Segment::Index(index));
            }
            _ => return Err(invalid("unexpected character in path")),
        }
    }

    Ok(segments)
}

fn classify(name: String) -> Segment {
    if name == "length" {
        return Segment::Length;
    }
    if name == "any" {
        return Segment::Any;
    }
    if name == "all" {
        return Segment::All;
    }
    if let Some(category) = name.strip_prefix("get_") {
        if !category.is_empty() {
            return Segment::Deref(category.to_string());
        }
    }
    Segment::Field(name)
}
