//! Structural AST node types.
//!
//! The tree is a closed set of owned structs and enums; each compilation
//! pass is an exhaustive match over them. Nodes own their children and the
//! names/values they carry, so the tree outlives the token stream it was
//! built from.

use crate::SourceLoc;

use super::{expressions::Expr, types::Type};

/// `<type> <ident> ( <params> ) <block>` - one whole compilation unit.
#[derive(Debug, Clone)]
pub struct Program {
    pub return_type: Type,
    pub name: String,
    pub params: Vec<NameDef>,
    pub block: Block,
    pub loc: SourceLoc,
}

/// `{ <declaration>. * <statement>. * }` - declarations strictly precede
/// statements.
#[derive(Debug, Clone)]
pub struct Block {
    pub declarations: Vec<Declaration>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone)]
pub struct Declaration {
    pub name_def: NameDef,
    pub initializer: Option<Expr>,
}

/// `<type> [w,h]? <ident>` - the dimension sits between type and name.
#[derive(Debug, Clone)]
pub struct NameDef {
    pub ty: Type,
    pub name: String,
    pub dimension: Option<Dimension>,
    pub loc: SourceLoc,
}

#[derive(Debug, Clone)]
pub struct Dimension {
    pub width: Expr,
    pub height: Expr,
}

#[derive(Debug, Clone)]
pub struct PixelSelector {
    pub x: Expr,
    pub y: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Grn,
    Blu,
}

#[derive(Debug, Clone)]
pub enum Statement {
    Assign(AssignmentStatement),
    Write(WriteStatement),
    While(WhileStatement),
    Return(ReturnStatement),
}

#[derive(Debug, Clone)]
pub struct AssignmentStatement {
    pub lvalue: LValue,
    pub value: Expr,
}

#[derive(Debug, Clone)]
pub struct WriteStatement {
    pub value: Expr,
    pub loc: SourceLoc,
}

#[derive(Debug, Clone)]
pub struct WhileStatement {
    pub guard: Expr,
    pub body: Block,
    pub loc: SourceLoc,
}

/// `: <expr>` - a return statement has no keyword, only the leading colon.
#[derive(Debug, Clone)]
pub struct ReturnStatement {
    pub value: Expr,
    pub loc: SourceLoc,
}

/// Assignment target: an identifier plus optional pixel and channel
/// selectors.
#[derive(Debug, Clone)]
pub struct LValue {
    pub name: String,
    pub pixel: Option<PixelSelector>,
    pub channel: Option<Channel>,
    pub loc: SourceLoc,
}
