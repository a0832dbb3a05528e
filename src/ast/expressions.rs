use crate::SourceLoc;

use super::ast::{Channel, PixelSelector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    BitOr,
    And,
    BitAnd,
    Lt,
    Gt,
    Eq,
    Le,
    Ge,
    Exp,
    Plus,
    Minus,
    Times,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::BitOr => "|",
            BinaryOp::And => "&&",
            BinaryOp::BitAnd => "&",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Eq => "==",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Exp => "**",
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Times => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Bang,
    Minus,
    Sin,
    Cos,
    Atan,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Bang => "!",
            UnaryOp::Minus => "-",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Atan => "atan",
        }
    }
}

/// The named pixel functions applied to a `[a, b]` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFunc {
    XCart,
    YCart,
    APolar,
    RPolar,
}

/// The implicitly declared coordinate variables usable in any expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredeclaredVar {
    X,
    Y,
    A,
    R,
}

impl PredeclaredVar {
    pub fn name(&self) -> &'static str {
        match self {
            PredeclaredVar::X => "x",
            PredeclaredVar::Y => "y",
            PredeclaredVar::A => "a",
            PredeclaredVar::R => "r",
        }
    }
}

/// An expression node. The parser attaches no type information; typing lives
/// exclusively in the checked tree (`type_checker::typed_ast`).
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub loc: SourceLoc,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// A primary expression followed by an optional pixel selector and/or
    /// channel selector (`img[e1,e2]:red`).
    Postfix {
        primary: Box<Expr>,
        pixel: Option<Box<PixelSelector>>,
        channel: Option<Channel>,
    },
    Conditional {
        guard: Box<Expr>,
        true_case: Box<Expr>,
        false_case: Box<Expr>,
    },
    StringLit(String),
    NumLit(i32),
    Ident(String),
    /// The constant `Z` (always 255).
    Z,
    Rand,
    PixelFunc {
        func: PixelFunc,
        selector: Box<PixelSelector>,
    },
    /// `[r, g, b]` - builds a packed pixel from three channel expressions.
    ExpandedPixel {
        red: Box<Expr>,
        grn: Box<Expr>,
        blu: Box<Expr>,
    },
    PredeclaredVar(PredeclaredVar),
}
