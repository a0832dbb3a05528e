//! The checked tree handed to code generation.
//!
//! Only a successful `type_checker::check` call produces a
//! [`CheckedProgram`], and every expression node carries its `Type` as a
//! plain field, so code generation can never observe an untyped or ill-typed
//! node. Identifiers carry their scope-qualified Java name instead of the
//! source name.

use crate::ast::{
    ast::Channel,
    expressions::{BinaryOp, PixelFunc, PredeclaredVar, UnaryOp},
    types::Type,
};

#[derive(Debug, Clone)]
pub struct CheckedProgram {
    pub return_type: Type,
    pub name: String,
    pub params: Vec<TypedNameDef>,
    pub block: TypedBlock,
}

#[derive(Debug, Clone)]
pub struct TypedNameDef {
    pub ty: Type,
    pub java_name: String,
    pub dimension: Option<TypedDimension>,
}

#[derive(Debug, Clone)]
pub struct TypedDimension {
    pub width: TypedExpr,
    pub height: TypedExpr,
}

#[derive(Debug, Clone)]
pub struct TypedBlock {
    pub declarations: Vec<TypedDeclaration>,
    pub statements: Vec<TypedStatement>,
}

#[derive(Debug, Clone)]
pub struct TypedDeclaration {
    pub name_def: TypedNameDef,
    pub initializer: Option<TypedExpr>,
}

#[derive(Debug, Clone)]
pub enum TypedStatement {
    Assign { lvalue: TypedLValue, value: TypedExpr },
    Write { value: TypedExpr },
    While { guard: TypedExpr, body: TypedBlock },
    Return { value: TypedExpr },
}

/// A checked assignment target.
///
/// `declared` is the type of the underlying variable; `ty` is the effective
/// target type after applying the selectors (an `image` target with pixel
/// and channel selectors assigns an `int`). A pixel selector here is a pair
/// of coordinate variable names that the lowering turns into loop variables.
#[derive(Debug, Clone)]
pub struct TypedLValue {
    pub declared: Type,
    pub ty: Type,
    pub java_name: String,
    pub pixel: Option<(String, String)>,
    pub channel: Option<Channel>,
}

#[derive(Debug, Clone)]
pub struct TypedPixelSelector {
    pub x: TypedExpr,
    pub y: TypedExpr,
}

#[derive(Debug, Clone)]
pub struct TypedExpr {
    pub ty: Type,
    pub kind: TypedExprKind,
}

#[derive(Debug, Clone)]
pub enum TypedExprKind {
    Binary {
        op: BinaryOp,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<TypedExpr>,
    },
    Postfix {
        primary: Box<TypedExpr>,
        pixel: Option<Box<TypedPixelSelector>>,
        channel: Option<Channel>,
    },
    Conditional {
        guard: Box<TypedExpr>,
        true_case: Box<TypedExpr>,
        false_case: Box<TypedExpr>,
    },
    StringLit(String),
    NumLit(i32),
    Ident {
        java_name: String,
    },
    Z,
    Rand,
    PixelFunc {
        func: PixelFunc,
        selector: Box<TypedPixelSelector>,
    },
    ExpandedPixel {
        red: Box<TypedExpr>,
        grn: Box<TypedExpr>,
        blu: Box<TypedExpr>,
    },
    PredeclaredVar(PredeclaredVar),
}
