//! Expression lowering.
//!
//! Every rule dispatches on the inferred operand types from the checked
//! tree, not on syntax: the same source operator becomes plain Java
//! arithmetic for ints, a `PixelOps`/`ImageOps` call for pixels and images.
//! Boolean results are materialized as `1`/`0` ints.

use crate::{
    ast::{
        ast::Channel,
        expressions::{BinaryOp, PixelFunc, UnaryOp},
        types::Type,
    },
    type_checker::typed_ast::{TypedExpr, TypedExprKind, TypedPixelSelector},
};

use super::codegen::Generator;

pub(super) fn gen_expr(gen: &mut Generator, expr: &TypedExpr) -> String {
    match &expr.kind {
        TypedExprKind::Binary { op, left, right } => {
            let lhs = gen_expr(gen, left);
            let rhs = gen_expr(gen, right);
            gen_binary(gen, *op, left.ty, right.ty, &lhs, &rhs)
        }
        TypedExprKind::Unary { op, operand } => {
            let value = gen_expr(gen, operand);
            match (op, operand.ty) {
                (UnaryOp::Bang, Type::Pixel) => {
                    gen.import("runtime.PixelOps");
                    format!("PixelOps.complement({value})")
                }
                (UnaryOp::Bang, _) => format!("(({value} == 0) ? 1 : 0)"),
                (UnaryOp::Minus, _) => format!("(-{value})"),
                (UnaryOp::Sin, _) => format!("((int) Math.sin({value}))"),
                (UnaryOp::Cos, _) => format!("((int) Math.cos({value}))"),
                (UnaryOp::Atan, _) => format!("((int) Math.atan({value}))"),
            }
        }
        TypedExprKind::Postfix {
            primary,
            pixel,
            channel,
        } => {
            let value = gen_expr(gen, primary);
            let pixel = pixel
                .as_ref()
                .map(|selector| gen_selector_components(gen, selector));
            match (primary.ty, pixel, channel) {
                (Type::Image, Some((x, y)), None) => {
                    gen.import("runtime.ImageOps");
                    format!("ImageOps.getRGB({value}, {x}, {y})")
                }
                (Type::Image, None, Some(channel)) => {
                    gen.import("runtime.ImageOps");
                    format!("ImageOps.extract{}({value})", channel_suffix(*channel))
                }
                (Type::Image, Some((x, y)), Some(channel)) => {
                    gen.import("runtime.ImageOps");
                    gen.import("runtime.PixelOps");
                    format!(
                        "PixelOps.{}(ImageOps.getRGB({value}, {x}, {y}))",
                        channel_getter(*channel)
                    )
                }
                (Type::Pixel, None, Some(channel)) => {
                    gen.import("runtime.PixelOps");
                    format!("PixelOps.{}({value})", channel_getter(*channel))
                }
                _ => unreachable!("checker admits no other selector combination"),
            }
        }
        TypedExprKind::Conditional {
            guard,
            true_case,
            false_case,
        } => {
            let guard = gen_expr(gen, guard);
            let true_case = gen_expr(gen, true_case);
            let false_case = gen_expr(gen, false_case);
            format!("(({guard} != 0) ? {true_case} : {false_case})")
        }
        TypedExprKind::StringLit(value) => java_string_literal(value),
        TypedExprKind::NumLit(value) => value.to_string(),
        TypedExprKind::Ident { java_name } => java_name.clone(),
        TypedExprKind::Z => String::from("255"),
        TypedExprKind::Rand => String::from("((int) Math.floor(Math.random() * 256))"),
        TypedExprKind::PixelFunc { func, selector } => {
            let (first, second) = gen_selector_components(gen, selector);
            match func {
                PixelFunc::XCart => format!("((int) Math.round({second} * Math.cos({first})))"),
                PixelFunc::YCart => format!("((int) Math.round({second} * Math.sin({first})))"),
                PixelFunc::APolar => format!("((int) Math.round(Math.atan2({second}, {first})))"),
                PixelFunc::RPolar => format!("((int) Math.round(Math.hypot({first}, {second})))"),
            }
        }
        TypedExprKind::ExpandedPixel { red, grn, blu } => {
            let red = gen_expr(gen, red);
            let grn = gen_expr(gen, grn);
            let blu = gen_expr(gen, blu);
            gen.import("runtime.PixelOps");
            format!("PixelOps.pack({red}, {grn}, {blu})")
        }
        TypedExprKind::PredeclaredVar(var) => String::from(var.name()),
    }
}

fn gen_binary(
    gen: &mut Generator,
    op: BinaryOp,
    left_ty: Type,
    right_ty: Type,
    lhs: &str,
    rhs: &str,
) -> String {
    use BinaryOp::*;
    match op {
        And | Or => {
            let sym = op.symbol();
            format!("((({lhs} != 0) {sym} ({rhs} != 0)) ? 1 : 0)")
        }
        Lt | Gt | Le | Ge => {
            let sym = op.symbol();
            format!("(({lhs} {sym} {rhs}) ? 1 : 0)")
        }
        Eq => match left_ty {
            Type::String => format!("(({lhs}.equals({rhs})) ? 1 : 0)"),
            Type::Image => {
                gen.import("runtime.ImageOps");
                format!("((ImageOps.equals({lhs}, {rhs})) ? 1 : 0)")
            }
            _ => format!("(({lhs} == {rhs}) ? 1 : 0)"),
        },
        Exp => match (left_ty, right_ty) {
            (Type::Int, Type::Int) => format!("((int) Math.pow({lhs}, {rhs}))"),
            (Type::Pixel, Type::Int) => {
                gen.import("runtime.ImageOps");
                format!("ImageOps.binaryPackedPixelScalarOp({}, {lhs}, {rhs})", op_tag(op))
            }
            _ => unreachable!("checker admits only int and pixel bases for **"),
        },
        BitAnd | BitOr => {
            gen.import("runtime.ImageOps");
            format!("ImageOps.binaryPackedPixelPixelOp({}, {lhs}, {rhs})", op_tag(op))
        }
        Plus | Minus | Times | Div | Mod => match (left_ty, right_ty) {
            (Type::Int, Type::Int) | (Type::String, Type::String) => {
                format!("({lhs} {} {rhs})", op.symbol())
            }
            (Type::Pixel, Type::Pixel) => {
                gen.import("runtime.ImageOps");
                format!("ImageOps.binaryPackedPixelPixelOp({}, {lhs}, {rhs})", op_tag(op))
            }
            (Type::Pixel, Type::Int) => {
                gen.import("runtime.ImageOps");
                format!("ImageOps.binaryPackedPixelScalarOp({}, {lhs}, {rhs})", op_tag(op))
            }
            (Type::Image, Type::Image) => {
                gen.import("runtime.ImageOps");
                format!("ImageOps.binaryImageImageOp({}, {lhs}, {rhs})", op_tag(op))
            }
            (Type::Image, Type::Int) => {
                gen.import("runtime.ImageOps");
                format!("ImageOps.binaryImageScalarOp({}, {lhs}, {rhs})", op_tag(op))
            }
            _ => unreachable!("checker admits no other arithmetic operand pair"),
        },
    }
}

fn op_tag(op: BinaryOp) -> &'static str {
    use BinaryOp::*;
    match op {
        Plus => "ImageOps.OP.PLUS",
        Minus => "ImageOps.OP.MINUS",
        Times => "ImageOps.OP.TIMES",
        Div => "ImageOps.OP.DIV",
        Mod => "ImageOps.OP.MOD",
        Exp => "ImageOps.OP.EXP",
        BitAnd => "ImageOps.OP.BITAND",
        BitOr => "ImageOps.OP.BITOR",
        _ => unreachable!("no runtime tag for {op:?}"),
    }
}

fn gen_selector_components(
    gen: &mut Generator,
    selector: &TypedPixelSelector,
) -> (String, String) {
    let x = gen_expr(gen, &selector.x);
    let y = gen_expr(gen, &selector.y);
    (x, y)
}

pub(super) fn channel_suffix(channel: Channel) -> &'static str {
    match channel {
        Channel::Red => "Red",
        Channel::Grn => "Grn",
        Channel::Blu => "Blu",
    }
}

pub(super) fn channel_getter(channel: Channel) -> &'static str {
    match channel {
        Channel::Red => "red",
        Channel::Grn => "grn",
        Channel::Blu => "blu",
    }
}

fn java_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
