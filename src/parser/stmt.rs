//! Statement grammar. Every statement is terminated by `.` in the block,
//! which `parser::parse_block` consumes.

use crate::{
    ast::ast::{
        AssignmentStatement, LValue, ReturnStatement, Statement, WhileStatement, WriteStatement,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Kind,
};

use super::{
    expr::{parse_channel_selector, parse_expr, parse_pixel_selector},
    parser::{parse_block, Parser},
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    match parser.current_kind() {
        Kind::Ident => parse_assignment(parser),
        Kind::ResWrite => parse_write(parser),
        Kind::ResWhile => parse_while(parser),
        Kind::Colon => parse_return(parser),
        _ => Err(Error::new(
            ErrorImpl::ExpectedStatement {
                found: format!("{}", parser.current_token()),
            },
            parser.current_token().loc,
        )),
    }
}

fn parse_assignment(parser: &mut Parser) -> Result<Statement, Error> {
    let lvalue = parse_lvalue(parser)?;
    parser.expect(Kind::Assign)?;
    let value = parse_expr(parser)?;
    Ok(Statement::Assign(AssignmentStatement { lvalue, value }))
}

/// `<ident> [x,y]? :chan?` - selector order mirrors postfix expressions.
fn parse_lvalue(parser: &mut Parser) -> Result<LValue, Error> {
    let token = parser.expect(Kind::Ident)?;
    let name = token.text().to_string();

    let pixel = if parser.current_kind() == Kind::LSquare {
        Some(parse_pixel_selector(parser)?)
    } else {
        None
    };
    let channel = if parser.current_kind() == Kind::Colon {
        Some(parse_channel_selector(parser)?)
    } else {
        None
    };

    Ok(LValue {
        name,
        pixel,
        channel,
        loc: token.loc,
    })
}

fn parse_write(parser: &mut Parser) -> Result<Statement, Error> {
    let loc = parser.expect(Kind::ResWrite)?.loc;
    let value = parse_expr(parser)?;
    Ok(Statement::Write(WriteStatement { value, loc }))
}

fn parse_while(parser: &mut Parser) -> Result<Statement, Error> {
    let loc = parser.expect(Kind::ResWhile)?.loc;
    let guard = parse_expr(parser)?;
    let body = parse_block(parser)?;
    Ok(Statement::While(WhileStatement { guard, body, loc }))
}

fn parse_return(parser: &mut Parser) -> Result<Statement, Error> {
    let loc = parser.expect(Kind::Colon)?.loc;
    let value = parse_expr(parser)?;
    Ok(Statement::Return(ReturnStatement { value, loc }))
}
