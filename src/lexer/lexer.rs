use crate::{
    errors::errors::{Error, ErrorImpl},
    SourceLoc,
};

use super::tokens::{Kind, Token, RESERVED_LOOKUP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InIdent,
    InNumLit,
    InStringLit,
    InStringEscape,
    HaveEq,
    HaveLt,
    HaveGt,
    HaveAnd,
    HaveOr,
    HaveTimes,
    InExchange,
}

/// Pull-based scanner over one source buffer. Each call to [`Scanner::next_token`]
/// runs the state machine from `Start` until a token (or a lexical error)
/// falls out; after the input is exhausted every further call yields `Eof`.
///
/// Lookahead is exactly the current character; end of input is an explicit
/// `None` from [`Scanner::current`], not a sentinel byte.
pub struct Scanner<'s> {
    source: &'s str,
    bytes: &'s [u8],
    pos: usize,
    line: u32,
    column: u32,
}

impl<'s> Scanner<'s> {
    pub fn new(source: &'s str) -> Self {
        Scanner {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn current(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn loc(&self) -> SourceLoc {
        SourceLoc {
            line: self.line,
            column: self.column,
        }
    }

    fn bump(&mut self) {
        if self.current() == Some(b'\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    fn make(&self, kind: Kind, start: usize, length: usize, loc: SourceLoc) -> Token<'s> {
        Token::new(kind, start, length, loc, self.source)
    }

    /// Consumes one character and produces a single-character token.
    fn single(&mut self, kind: Kind, start: usize, loc: SourceLoc) -> Token<'s> {
        self.bump();
        self.make(kind, start, 1, loc)
    }

    pub fn next_token(&mut self) -> Result<Token<'s>, Error> {
        let mut state = State::Start;
        let mut token_start = self.pos;
        let mut start_loc = self.loc();

        loop {
            match state {
                State::Start => {
                    token_start = self.pos;
                    start_loc = self.loc();

                    let Some(ch) = self.current() else {
                        return Ok(self.make(Kind::Eof, token_start, 0, start_loc));
                    };

                    match ch {
                        // SP | CR | LF | TAB | FF
                        b' ' | b'\r' | b'\n' | b'\t' | 12 => self.bump(),

                        b'1'..=b'9' => {
                            state = State::InNumLit;
                            self.bump();
                        }
                        // A leading zero is always the complete literal `0`.
                        b'0' => return Ok(self.single(Kind::NumLit, token_start, start_loc)),

                        b'"' => {
                            state = State::InStringLit;
                            self.bump();
                        }

                        b'.' => return Ok(self.single(Kind::Dot, token_start, start_loc)),
                        b',' => return Ok(self.single(Kind::Comma, token_start, start_loc)),
                        b'?' => return Ok(self.single(Kind::Question, token_start, start_loc)),
                        b':' => return Ok(self.single(Kind::Colon, token_start, start_loc)),
                        b'(' => return Ok(self.single(Kind::LParen, token_start, start_loc)),
                        b')' => return Ok(self.single(Kind::RParen, token_start, start_loc)),
                        b'[' => return Ok(self.single(Kind::LSquare, token_start, start_loc)),
                        b']' => return Ok(self.single(Kind::RSquare, token_start, start_loc)),
                        b'{' => return Ok(self.single(Kind::LCurly, token_start, start_loc)),
                        b'}' => return Ok(self.single(Kind::RCurly, token_start, start_loc)),
                        b'!' => return Ok(self.single(Kind::Bang, token_start, start_loc)),
                        b'+' => return Ok(self.single(Kind::Plus, token_start, start_loc)),
                        b'-' => return Ok(self.single(Kind::Minus, token_start, start_loc)),
                        b'/' => return Ok(self.single(Kind::Div, token_start, start_loc)),
                        b'%' => return Ok(self.single(Kind::Mod, token_start, start_loc)),

                        b'=' => {
                            state = State::HaveEq;
                            self.bump();
                        }
                        b'<' => {
                            state = State::HaveLt;
                            self.bump();
                        }
                        b'>' => {
                            state = State::HaveGt;
                            self.bump();
                        }
                        b'&' => {
                            state = State::HaveAnd;
                            self.bump();
                        }
                        b'|' => {
                            state = State::HaveOr;
                            self.bump();
                        }
                        b'*' => {
                            state = State::HaveTimes;
                            self.bump();
                        }

                        // ~ comment, through end of line
                        b'~' => {
                            self.bump();
                            while let Some(c) = self.current() {
                                let newline = c == b'\n';
                                self.bump();
                                if newline {
                                    break;
                                }
                            }
                        }

                        _ if is_ident_start(ch) => {
                            state = State::InIdent;
                            self.bump();
                        }

                        _ => {
                            return Err(Error::new(
                                ErrorImpl::UnrecognizedCharacter {
                                    ch: self.source[self.pos..].chars().next().unwrap_or('\0'),
                                },
                                start_loc,
                            ))
                        }
                    }
                }
                State::HaveEq => {
                    if self.current() == Some(b'=') {
                        self.bump();
                        return Ok(self.make(Kind::Eq, token_start, 2, start_loc));
                    }
                    return Ok(self.make(Kind::Assign, token_start, 1, start_loc));
                }
                State::HaveLt => match self.current() {
                    Some(b'=') => {
                        self.bump();
                        return Ok(self.make(Kind::Le, token_start, 2, start_loc));
                    }
                    Some(b'-') => {
                        state = State::InExchange;
                        self.bump();
                    }
                    _ => return Ok(self.make(Kind::Lt, token_start, 1, start_loc)),
                },
                State::InExchange => {
                    if self.current() == Some(b'>') {
                        self.bump();
                        return Ok(self.make(Kind::Exchange, token_start, 3, start_loc));
                    }
                    return Err(Error::new(ErrorImpl::IncompleteExchange, start_loc));
                }
                State::HaveGt => {
                    if self.current() == Some(b'=') {
                        self.bump();
                        return Ok(self.make(Kind::Ge, token_start, 2, start_loc));
                    }
                    return Ok(self.make(Kind::Gt, token_start, 1, start_loc));
                }
                State::HaveAnd => {
                    if self.current() == Some(b'&') {
                        self.bump();
                        return Ok(self.make(Kind::And, token_start, 2, start_loc));
                    }
                    return Ok(self.make(Kind::BitAnd, token_start, 1, start_loc));
                }
                State::HaveOr => {
                    if self.current() == Some(b'|') {
                        self.bump();
                        return Ok(self.make(Kind::Or, token_start, 2, start_loc));
                    }
                    return Ok(self.make(Kind::BitOr, token_start, 1, start_loc));
                }
                State::HaveTimes => {
                    if self.current() == Some(b'*') {
                        self.bump();
                        return Ok(self.make(Kind::Exp, token_start, 2, start_loc));
                    }
                    return Ok(self.make(Kind::Times, token_start, 1, start_loc));
                }
                State::InNumLit => match self.current() {
                    Some(c) if c.is_ascii_digit() => self.bump(),
                    _ => {
                        let length = self.pos - token_start;
                        let literal = &self.source[token_start..self.pos];
                        if literal.parse::<i32>().is_err() {
                            return Err(Error::new(
                                ErrorImpl::NumberTooLarge {
                                    literal: literal.to_string(),
                                },
                                start_loc,
                            ));
                        }
                        return Ok(self.make(Kind::NumLit, token_start, length, start_loc));
                    }
                },
                State::InStringLit => match self.current() {
                    None => return Err(Error::new(ErrorImpl::UnterminatedString, start_loc)),
                    Some(b'\n') | Some(b'\r') => {
                        return Err(Error::new(ErrorImpl::NewlineInString, self.loc()))
                    }
                    Some(b'\\') => {
                        state = State::InStringEscape;
                        self.bump();
                    }
                    Some(b'"') => {
                        let length = self.pos - token_start + 1;
                        self.bump();
                        return Ok(self.make(Kind::StringLit, token_start, length, start_loc));
                    }
                    Some(_) => self.bump(),
                },
                State::InStringEscape => match self.current() {
                    Some(c) if is_escape_char(c) => {
                        state = State::InStringLit;
                        self.bump();
                    }
                    Some(_) => {
                        return Err(Error::new(
                            ErrorImpl::InvalidEscape {
                                ch: self.source[self.pos..].chars().next().unwrap_or('\0'),
                            },
                            self.loc(),
                        ))
                    }
                    None => return Err(Error::new(ErrorImpl::UnterminatedString, start_loc)),
                },
                State::InIdent => match self.current() {
                    Some(c) if is_ident_continue(c) => self.bump(),
                    _ => {
                        let length = self.pos - token_start;
                        let text = &self.source[token_start..self.pos];
                        let kind = RESERVED_LOOKUP.get(text).copied().unwrap_or(Kind::Ident);
                        return Ok(self.make(kind, token_start, length, start_loc));
                    }
                },
            }
        }
    }
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_ident_continue(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

fn is_escape_char(ch: u8) -> bool {
    matches!(ch, b'b' | b't' | b'n' | b'r' | b'"' | b'\\')
}

/// Scans the whole input eagerly. The parser pulls tokens one at a time via
/// [`Scanner::next_token`]; this is the convenience used by tests.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, Error> {
    let mut scanner = Scanner::new(source);
    let mut tokens = vec![];
    loop {
        let token = scanner.next_token()?;
        let done = token.kind == Kind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
