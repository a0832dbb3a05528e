//! Recursive-descent parser.
//!
//! Pulls tokens from the [`Scanner`] one at a time (single-token lookahead,
//! no backtracking) and builds the AST bottom-up. Expression precedence is
//! encoded as one function per level; see `expr.rs`. The first token that
//! fails an expectation aborts the parse.

use crate::{
    ast::{
        ast::{Block, Declaration, Dimension, NameDef, Program},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    expect_kind,
    lexer::{
        lexer::Scanner,
        tokens::{Kind, Token},
    },
};

use super::{expr::parse_expr, stmt::parse_stmt};

pub struct Parser<'s> {
    scanner: Scanner<'s>,
    current: Token<'s>,
}

impl<'s> Parser<'s> {
    pub fn new(mut scanner: Scanner<'s>) -> Result<Self, Error> {
        let current = scanner.next_token()?;
        Ok(Parser { scanner, current })
    }

    pub fn current_token(&self) -> &Token<'s> {
        &self.current
    }

    pub fn current_kind(&self) -> Kind {
        self.current.kind
    }

    /// Advances to the next token and returns the previous one.
    pub fn advance(&mut self) -> Result<Token<'s>, Error> {
        let previous = self.current;
        self.current = self.scanner.next_token()?;
        Ok(previous)
    }

    pub fn expect(&mut self, expected: Kind) -> Result<Token<'s>, Error> {
        if self.current.kind == expected {
            self.advance()
        } else {
            Err(expect_kind!(expected.lexeme(), self.current))
        }
    }

    pub fn is_kind(&self, kinds: &[Kind]) -> bool {
        kinds.contains(&self.current.kind)
    }
}

/// The reserved word introducing a type, if this token kind is one.
pub fn type_of_kind(kind: Kind) -> Option<Type> {
    match kind {
        Kind::ResImage => Some(Type::Image),
        Kind::ResPixel => Some(Type::Pixel),
        Kind::ResInt => Some(Type::Int),
        Kind::ResString => Some(Type::String),
        Kind::ResVoid => Some(Type::Void),
        _ => None,
    }
}

fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    match type_of_kind(parser.current_kind()) {
        Some(ty) => {
            parser.advance()?;
            Ok(ty)
        }
        None => Err(Error::new(
            ErrorImpl::ExpectedType {
                found: format!("{}", parser.current_token()),
            },
            parser.current_token().loc,
        )),
    }
}

/// `<type> [w,h]? <ident>` - the dimension comes between type and name.
fn parse_name_def(parser: &mut Parser) -> Result<NameDef, Error> {
    let loc = parser.current_token().loc;
    let ty = parse_type(parser)?;

    let dimension = if parser.current_kind() == Kind::LSquare {
        Some(parse_dimension(parser)?)
    } else {
        None
    };

    let name = parser.expect(Kind::Ident)?.text().to_string();

    Ok(NameDef {
        ty,
        name,
        dimension,
        loc,
    })
}

fn parse_dimension(parser: &mut Parser) -> Result<Dimension, Error> {
    parser.expect(Kind::LSquare)?;
    let width = parse_expr(parser)?;
    parser.expect(Kind::Comma)?;
    let height = parse_expr(parser)?;
    parser.expect(Kind::RSquare)?;
    Ok(Dimension { width, height })
}

fn parse_declaration(parser: &mut Parser) -> Result<Declaration, Error> {
    let name_def = parse_name_def(parser)?;

    let initializer = if parser.current_kind() == Kind::Assign {
        parser.advance()?;
        Some(parse_expr(parser)?)
    } else {
        None
    };

    Ok(Declaration {
        name_def,
        initializer,
    })
}

/// `{ (<declaration> .)* (<statement> .)* }`
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    parser.expect(Kind::LCurly)?;

    let mut declarations = vec![];
    while type_of_kind(parser.current_kind()).is_some() {
        declarations.push(parse_declaration(parser)?);
        parser.expect(Kind::Dot)?;
    }

    let mut statements = vec![];
    while parser.current_kind() != Kind::RCurly {
        statements.push(parse_stmt(parser)?);
        parser.expect(Kind::Dot)?;
    }

    parser.expect(Kind::RCurly)?;

    Ok(Block {
        declarations,
        statements,
    })
}

fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    let loc = parser.current_token().loc;
    let return_type = parse_type(parser)?;
    let name = parser.expect(Kind::Ident)?.text().to_string();

    parser.expect(Kind::LParen)?;
    let mut params = vec![];
    if parser.current_kind() != Kind::RParen {
        loop {
            params.push(parse_name_def(parser)?);
            if parser.current_kind() == Kind::Comma {
                parser.advance()?;
            } else {
                break;
            }
        }
    }
    parser.expect(Kind::RParen)?;

    let block = parse_block(parser)?;

    Ok(Program {
        return_type,
        name,
        params,
        block,
        loc,
    })
}

/// Parses one whole program from the scanner's token stream. Trailing input
/// after the closing brace is a syntax error.
pub fn parse(scanner: Scanner) -> Result<Program, Error> {
    let mut parser = Parser::new(scanner)?;
    let program = parse_program(&mut parser)?;
    parser.expect(Kind::Eof)?;
    Ok(program)
}
