//! Expression grammar, one function per precedence level.
//!
//! From loosest to tightest binding: conditional, or, and, comparison,
//! power, additive, multiplicative, unary, postfix, primary. All binary
//! levels left-associate by looping except power, which right-associates
//! by recursing into itself on the right-hand side.

use crate::{
    ast::{
        ast::{Channel, PixelSelector},
        expressions::{BinaryOp, Expr, ExprKind, PixelFunc, PredeclaredVar, UnaryOp},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Kind,
    SourceLoc,
};

use super::parser::Parser;

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.current_kind() == Kind::ResIf {
        parse_conditional(parser)
    } else {
        parse_or(parser)
    }
}

/// `if <guard> ? <true> ? <false>` - note the two question marks, there is
/// no `else` keyword.
fn parse_conditional(parser: &mut Parser) -> Result<Expr, Error> {
    let loc = parser.expect(Kind::ResIf)?.loc;
    let guard = parse_expr(parser)?;
    parser.expect(Kind::Question)?;
    let true_case = parse_expr(parser)?;
    parser.expect(Kind::Question)?;
    let false_case = parse_expr(parser)?;
    Ok(Expr {
        kind: ExprKind::Conditional {
            guard: Box::new(guard),
            true_case: Box::new(true_case),
            false_case: Box::new(false_case),
        },
        loc,
    })
}

fn binary_op_of(kind: Kind) -> BinaryOp {
    match kind {
        Kind::Or => BinaryOp::Or,
        Kind::BitOr => BinaryOp::BitOr,
        Kind::And => BinaryOp::And,
        Kind::BitAnd => BinaryOp::BitAnd,
        Kind::Lt => BinaryOp::Lt,
        Kind::Gt => BinaryOp::Gt,
        Kind::Eq => BinaryOp::Eq,
        Kind::Le => BinaryOp::Le,
        Kind::Ge => BinaryOp::Ge,
        Kind::Exp => BinaryOp::Exp,
        Kind::Plus => BinaryOp::Plus,
        Kind::Minus => BinaryOp::Minus,
        Kind::Times => BinaryOp::Times,
        Kind::Div => BinaryOp::Div,
        Kind::Mod => BinaryOp::Mod,
        _ => unreachable!("caller matched an operator kind"),
    }
}

/// Folds `<next> (<op> <next>)*` into a left-leaning chain.
fn parse_left_assoc(
    parser: &mut Parser,
    ops: &[Kind],
    next: fn(&mut Parser) -> Result<Expr, Error>,
) -> Result<Expr, Error> {
    let mut left = next(parser)?;
    while parser.is_kind(ops) {
        let op_token = parser.advance()?;
        let right = next(parser)?;
        let loc = left.loc;
        left = Expr {
            kind: ExprKind::Binary {
                op: binary_op_of(op_token.kind),
                left: Box::new(left),
                right: Box::new(right),
            },
            loc,
        };
    }
    Ok(left)
}

fn parse_or(parser: &mut Parser) -> Result<Expr, Error> {
    parse_left_assoc(parser, &[Kind::Or, Kind::BitOr], parse_and)
}

fn parse_and(parser: &mut Parser) -> Result<Expr, Error> {
    parse_left_assoc(parser, &[Kind::And, Kind::BitAnd], parse_comparison)
}

fn parse_comparison(parser: &mut Parser) -> Result<Expr, Error> {
    parse_left_assoc(
        parser,
        &[Kind::Lt, Kind::Gt, Kind::Eq, Kind::Le, Kind::Ge],
        parse_power,
    )
}

/// `**` binds tighter than comparison and right-associates.
fn parse_power(parser: &mut Parser) -> Result<Expr, Error> {
    let left = parse_additive(parser)?;
    if parser.current_kind() == Kind::Exp {
        parser.advance()?;
        let right = parse_power(parser)?;
        let loc = left.loc;
        return Ok(Expr {
            kind: ExprKind::Binary {
                op: BinaryOp::Exp,
                left: Box::new(left),
                right: Box::new(right),
            },
            loc,
        });
    }
    Ok(left)
}

fn parse_additive(parser: &mut Parser) -> Result<Expr, Error> {
    parse_left_assoc(parser, &[Kind::Plus, Kind::Minus], parse_multiplicative)
}

fn parse_multiplicative(parser: &mut Parser) -> Result<Expr, Error> {
    parse_left_assoc(parser, &[Kind::Times, Kind::Div, Kind::Mod], parse_unary)
}

fn parse_unary(parser: &mut Parser) -> Result<Expr, Error> {
    let op = match parser.current_kind() {
        Kind::Bang => Some(UnaryOp::Bang),
        Kind::Minus => Some(UnaryOp::Minus),
        Kind::ResSin => Some(UnaryOp::Sin),
        Kind::ResCos => Some(UnaryOp::Cos),
        Kind::ResAtan => Some(UnaryOp::Atan),
        _ => None,
    };
    match op {
        Some(op) => {
            let loc = parser.advance()?.loc;
            let operand = parse_unary(parser)?;
            Ok(Expr {
                kind: ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                loc,
            })
        }
        None => parse_postfix(parser),
    }
}

/// A primary optionally followed by `[x,y]` and/or `:red|:grn|:blu`. A bare
/// primary is returned as-is rather than wrapped in a selector-less postfix
/// node.
fn parse_postfix(parser: &mut Parser) -> Result<Expr, Error> {
    let primary = parse_primary(parser)?;

    let pixel = if parser.current_kind() == Kind::LSquare {
        Some(Box::new(parse_pixel_selector(parser)?))
    } else {
        None
    };
    let channel = if parser.current_kind() == Kind::Colon {
        Some(parse_channel_selector(parser)?)
    } else {
        None
    };

    if pixel.is_none() && channel.is_none() {
        return Ok(primary);
    }
    let loc = primary.loc;
    Ok(Expr {
        kind: ExprKind::Postfix {
            primary: Box::new(primary),
            pixel,
            channel,
        },
        loc,
    })
}

fn parse_primary(parser: &mut Parser) -> Result<Expr, Error> {
    let loc = parser.current_token().loc;
    let kind = match parser.current_kind() {
        Kind::StringLit => {
            let token = parser.advance()?;
            ExprKind::StringLit(token.string_value())
        }
        Kind::NumLit => {
            let token = parser.advance()?;
            ExprKind::NumLit(token.num_value())
        }
        Kind::Ident => {
            let token = parser.advance()?;
            ExprKind::Ident(token.text().to_string())
        }
        Kind::LParen => {
            parser.advance()?;
            let inner = parse_expr(parser)?;
            parser.expect(Kind::RParen)?;
            return Ok(inner);
        }
        Kind::ResZ => {
            parser.advance()?;
            ExprKind::Z
        }
        Kind::ResRand => {
            parser.advance()?;
            ExprKind::Rand
        }
        Kind::ResX => {
            parser.advance()?;
            ExprKind::PredeclaredVar(PredeclaredVar::X)
        }
        Kind::ResY => {
            parser.advance()?;
            ExprKind::PredeclaredVar(PredeclaredVar::Y)
        }
        Kind::ResA => {
            parser.advance()?;
            ExprKind::PredeclaredVar(PredeclaredVar::A)
        }
        Kind::ResR => {
            parser.advance()?;
            ExprKind::PredeclaredVar(PredeclaredVar::R)
        }
        Kind::LSquare => return parse_expanded_pixel(parser, loc),
        Kind::ResXCart => return parse_pixel_func(parser, PixelFunc::XCart, loc),
        Kind::ResYCart => return parse_pixel_func(parser, PixelFunc::YCart, loc),
        Kind::ResAPolar => return parse_pixel_func(parser, PixelFunc::APolar, loc),
        Kind::ResRPolar => return parse_pixel_func(parser, PixelFunc::RPolar, loc),
        _ => {
            return Err(Error::new(
                ErrorImpl::ExpectedExpression {
                    found: format!("{}", parser.current_token()),
                },
                loc,
            ))
        }
    };
    Ok(Expr { kind, loc })
}

/// `[ <red> , <grn> , <blu> ]` in primary position.
fn parse_expanded_pixel(parser: &mut Parser, loc: SourceLoc) -> Result<Expr, Error> {
    parser.expect(Kind::LSquare)?;
    let red = parse_expr(parser)?;
    parser.expect(Kind::Comma)?;
    let grn = parse_expr(parser)?;
    parser.expect(Kind::Comma)?;
    let blu = parse_expr(parser)?;
    parser.expect(Kind::RSquare)?;
    Ok(Expr {
        kind: ExprKind::ExpandedPixel {
            red: Box::new(red),
            grn: Box::new(grn),
            blu: Box::new(blu),
        },
        loc,
    })
}

fn parse_pixel_func(parser: &mut Parser, func: PixelFunc, loc: SourceLoc) -> Result<Expr, Error> {
    parser.advance()?;
    let selector = parse_pixel_selector(parser)?;
    Ok(Expr {
        kind: ExprKind::PixelFunc {
            func,
            selector: Box::new(selector),
        },
        loc,
    })
}

/// `[ <x> , <y> ]` - shared by postfix expressions, lvalues and the pixel
/// functions.
pub fn parse_pixel_selector(parser: &mut Parser) -> Result<PixelSelector, Error> {
    parser.expect(Kind::LSquare)?;
    let x = parse_expr(parser)?;
    parser.expect(Kind::Comma)?;
    let y = parse_expr(parser)?;
    parser.expect(Kind::RSquare)?;
    Ok(PixelSelector { x, y })
}

/// `: red | : grn | : blu`
pub fn parse_channel_selector(parser: &mut Parser) -> Result<Channel, Error> {
    parser.expect(Kind::Colon)?;
    let channel = match parser.current_kind() {
        Kind::ResRed => Channel::Red,
        Kind::ResGrn => Channel::Grn,
        Kind::ResBlu => Channel::Blu,
        _ => {
            return Err(crate::expect_kind!(
                "`red`, `grn`, or `blu`",
                parser.current_token()
            ))
        }
    };
    parser.advance()?;
    Ok(channel)
}
