//! Type checking pass.
//!
//! One traversal over the parsed tree, post-order for expressions, that
//! resolves names against a scope stack and rebuilds the program as a
//! [`CheckedProgram`] in which every expression carries its type. The first
//! violated rule aborts the pass.
//!
//! Scope handling: the program's parameters and top-level block share one
//! scope; each while body pushes a fresh one. Scopes are numbered, and a
//! name declared in scope `n > 0` resolves to the Java local `name_<n>`, so
//! shadowed declarations lower to distinct locals.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::{
            AssignmentStatement, Block, Declaration, Dimension, LValue, NameDef, PixelSelector,
            Program, ReturnStatement, Statement, WhileStatement, WriteStatement,
        },
        expressions::{BinaryOp, Expr, ExprKind, UnaryOp},
        types::Type,
    },
    check,
    errors::errors::{Error, ErrorImpl},
    SourceLoc,
};

use super::typed_ast::{
    CheckedProgram, TypedBlock, TypedDeclaration, TypedDimension, TypedExpr, TypedExprKind,
    TypedLValue, TypedNameDef, TypedPixelSelector, TypedStatement,
};

struct Entry {
    ty: Type,
    java_name: String,
}

struct Scope {
    serial: u32,
    entries: HashMap<String, Entry>,
}

/// Stack of lexical scopes with serial-numbered Java name qualification.
struct SymbolTable {
    scopes: Vec<Scope>,
    next_serial: u32,
}

impl SymbolTable {
    fn new() -> Self {
        SymbolTable {
            scopes: vec![],
            next_serial: 0,
        }
    }

    fn push_scope(&mut self) {
        self.scopes.push(Scope {
            serial: self.next_serial,
            entries: HashMap::new(),
        });
        self.next_serial += 1;
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Declares `name` in the innermost scope and returns its Java name.
    fn insert(&mut self, name: &str, ty: Type, loc: SourceLoc) -> Result<String, Error> {
        let scope = self.scopes.last_mut().unwrap();
        check!(
            !scope.entries.contains_key(name),
            loc,
            ErrorImpl::AlreadyDeclared {
                name: name.to_string(),
            }
        );
        let java_name = if scope.serial == 0 {
            name.to_string()
        } else {
            format!("{name}_{}", scope.serial)
        };
        scope.entries.insert(
            name.to_string(),
            Entry {
                ty,
                java_name: java_name.clone(),
            },
        );
        Ok(java_name)
    }

    fn lookup(&self, name: &str) -> Option<&Entry> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.entries.get(name))
    }
}

struct Checker {
    table: SymbolTable,
    return_type: Type,
}

/// Checks one parsed program and produces the typed tree consumed by code
/// generation.
pub fn check(program: &Program) -> Result<CheckedProgram, Error> {
    let mut checker = Checker {
        table: SymbolTable::new(),
        return_type: program.return_type,
    };
    checker.table.push_scope();

    let params = program
        .params
        .iter()
        .map(|param| checker.check_name_def(param))
        .collect::<Result<Vec<_>, _>>()?;

    // The top-level block shares the parameter scope.
    let block = checker.check_block_in_current_scope(&program.block)?;
    checker.table.pop_scope();

    Ok(CheckedProgram {
        return_type: program.return_type,
        name: program.name.clone(),
        params,
        block,
    })
}

impl Checker {
    fn check_block(&mut self, block: &Block) -> Result<TypedBlock, Error> {
        self.table.push_scope();
        let checked = self.check_block_in_current_scope(block);
        self.table.pop_scope();
        checked
    }

    fn check_block_in_current_scope(&mut self, block: &Block) -> Result<TypedBlock, Error> {
        let declarations = block
            .declarations
            .iter()
            .map(|declaration| self.check_declaration(declaration))
            .collect::<Result<Vec<_>, _>>()?;
        let statements = block
            .statements
            .iter()
            .map(|statement| self.check_statement(statement))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TypedBlock {
            declarations,
            statements,
        })
    }

    fn check_name_def(&mut self, name_def: &NameDef) -> Result<TypedNameDef, Error> {
        check!(
            name_def.ty != Type::Void,
            name_def.loc,
            ErrorImpl::VoidVariable {
                name: name_def.name.clone(),
            }
        );

        let dimension = match &name_def.dimension {
            Some(dimension) => {
                check!(
                    name_def.ty == Type::Image,
                    name_def.loc,
                    ErrorImpl::DimensionOnNonImage {
                        name: name_def.name.clone(),
                        ty: name_def.ty,
                    }
                );
                Some(self.check_dimension(dimension)?)
            }
            None => None,
        };

        let java_name = self
            .table
            .insert(&name_def.name, name_def.ty, name_def.loc)?;

        Ok(TypedNameDef {
            ty: name_def.ty,
            java_name,
            dimension,
        })
    }

    fn check_dimension(&mut self, dimension: &Dimension) -> Result<TypedDimension, Error> {
        let width = self.check_component(&dimension.width, "dimension")?;
        let height = self.check_component(&dimension.height, "dimension")?;
        Ok(TypedDimension { width, height })
    }

    /// Checks a selector/dimension/channel component expression that must
    /// be int.
    fn check_component(&mut self, expr: &Expr, what: &'static str) -> Result<TypedExpr, Error> {
        let checked = self.check_expr(expr)?;
        check!(
            checked.ty == Type::Int,
            expr.loc,
            ErrorImpl::ComponentNotInt {
                what,
                found: checked.ty,
            }
        );
        Ok(checked)
    }

    fn check_pixel_selector(
        &mut self,
        selector: &PixelSelector,
    ) -> Result<TypedPixelSelector, Error> {
        let x = self.check_component(&selector.x, "pixel selector")?;
        let y = self.check_component(&selector.y, "pixel selector")?;
        Ok(TypedPixelSelector { x, y })
    }

    fn check_declaration(&mut self, declaration: &Declaration) -> Result<TypedDeclaration, Error> {
        // The initializer is checked before the name is declared, so a
        // declaration cannot refer to itself.
        let initializer = declaration
            .initializer
            .as_ref()
            .map(|init| self.check_expr(init))
            .transpose()?;

        let name_def = self.check_name_def(&declaration.name_def)?;
        let loc = declaration.name_def.loc;

        if name_def.ty == Type::Image {
            // The lowering needs an allocation size: either a dimension, or
            // an initializer it can take one from. A pixel initializer only
            // fills, so it needs the dimension too.
            let fills_only = matches!(&initializer, Some(init) if init.ty == Type::Pixel);
            check!(
                name_def.dimension.is_some() || (initializer.is_some() && !fills_only),
                loc,
                ErrorImpl::ImageWithoutSize {
                    name: declaration.name_def.name.clone(),
                }
            );
        }

        if let Some(init) = &initializer {
            check!(
                Type::assignment_compatible(name_def.ty, init.ty),
                loc,
                ErrorImpl::NotAssignmentCompatible {
                    target: name_def.ty,
                    rhs: init.ty,
                }
            );
        }

        Ok(TypedDeclaration {
            name_def,
            initializer,
        })
    }

    fn check_statement(&mut self, statement: &Statement) -> Result<TypedStatement, Error> {
        match statement {
            Statement::Assign(assign) => self.check_assignment(assign),
            Statement::Write(write) => self.check_write(write),
            Statement::While(while_stmt) => self.check_while(while_stmt),
            Statement::Return(ret) => self.check_return(ret),
        }
    }

    fn check_assignment(&mut self, assign: &AssignmentStatement) -> Result<TypedStatement, Error> {
        let lvalue = self.check_lvalue(&assign.lvalue)?;
        let value = self.check_expr(&assign.value)?;
        // A channel-only image target is overwritten by a channel
        // extraction of the source, so only an image source fits it; the
        // general image conversions have no meaning there.
        let channel_overwrite = lvalue.declared == Type::Image
            && lvalue.pixel.is_none()
            && lvalue.channel.is_some();
        let compatible = if channel_overwrite {
            value.ty == Type::Image
        } else {
            Type::assignment_compatible(lvalue.ty, value.ty)
        };
        check!(
            compatible,
            assign.lvalue.loc,
            ErrorImpl::NotAssignmentCompatible {
                target: lvalue.ty,
                rhs: value.ty,
            }
        );
        Ok(TypedStatement::Assign { lvalue, value })
    }

    /// Resolves an assignment target. Mirrors the postfix selector table,
    /// driven by the declared type of the identifier.
    fn check_lvalue(&mut self, lvalue: &LValue) -> Result<TypedLValue, Error> {
        let entry = self.table.lookup(&lvalue.name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UndeclaredIdentifier {
                    name: lvalue.name.clone(),
                },
                lvalue.loc,
            )
        })?;
        let declared = entry.ty;
        let java_name = entry.java_name.clone();

        let pixel = lvalue
            .pixel
            .as_ref()
            .map(|selector| Self::lvalue_selector_vars(selector, lvalue.loc))
            .transpose()?;

        let ty = match (declared, &pixel, lvalue.channel) {
            (Type::Image, None, None) => Type::Image,
            (Type::Image, Some(_), None) => Type::Pixel,
            (Type::Image, Some(_), Some(_)) => Type::Int,
            (Type::Image, None, Some(_)) => Type::Image,
            (Type::Pixel, None, None) => Type::Pixel,
            (Type::Pixel, None, Some(_)) => Type::Int,
            (Type::String, None, None) => Type::String,
            (Type::Int, None, None) => Type::Int,
            _ => {
                return Err(Error::new(
                    ErrorImpl::InvalidSelector { on: declared },
                    lvalue.loc,
                ))
            }
        };

        Ok(TypedLValue {
            declared,
            ty,
            java_name,
            pixel,
            channel: lvalue.channel,
        })
    }

    /// An lvalue pixel selector ranges over the whole image, so its
    /// components are coordinate variable binders rather than values, and
    /// the two binders become distinct loop variables.
    fn lvalue_selector_vars(
        selector: &PixelSelector,
        loc: SourceLoc,
    ) -> Result<(String, String), Error> {
        let var_name = |expr: &Expr| match &expr.kind {
            ExprKind::PredeclaredVar(var) => Some(var.name().to_string()),
            _ => None,
        };
        match (var_name(&selector.x), var_name(&selector.y)) {
            (Some(x), Some(y)) if x != y => Ok((x, y)),
            _ => Err(Error::new(ErrorImpl::SelectorComponentNotVar, loc)),
        }
    }

    fn check_write(&mut self, write: &WriteStatement) -> Result<TypedStatement, Error> {
        let value = self.check_expr(&write.value)?;
        Ok(TypedStatement::Write { value })
    }

    fn check_while(&mut self, while_stmt: &WhileStatement) -> Result<TypedStatement, Error> {
        // The guard is checked before the body is ever visited.
        let guard = self.check_expr(&while_stmt.guard)?;
        check!(
            guard.ty == Type::Int,
            while_stmt.guard.loc,
            ErrorImpl::GuardNotInt { found: guard.ty }
        );
        let body = self.check_block(&while_stmt.body)?;
        Ok(TypedStatement::While { guard, body })
    }

    fn check_return(&mut self, ret: &ReturnStatement) -> Result<TypedStatement, Error> {
        let value = self.check_expr(&ret.value)?;
        check!(
            Type::assignment_compatible(self.return_type, value.ty),
            ret.loc,
            ErrorImpl::ReturnTypeMismatch {
                expected: self.return_type,
                found: value.ty,
            }
        );
        Ok(TypedStatement::Return { value })
    }

    fn check_expr(&mut self, expr: &Expr) -> Result<TypedExpr, Error> {
        match &expr.kind {
            ExprKind::Binary { op, left, right } => {
                let left = self.check_expr(left)?;
                let right = self.check_expr(right)?;
                let ty = Self::binary_result(*op, left.ty, right.ty).ok_or_else(|| {
                    Error::new(
                        ErrorImpl::IncompatibleOperands {
                            op: op.symbol(),
                            left: left.ty,
                            right: right.ty,
                        },
                        expr.loc,
                    )
                })?;
                Ok(TypedExpr {
                    ty,
                    kind: TypedExprKind::Binary {
                        op: *op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                })
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.check_expr(operand)?;
                let ty = match (op, operand.ty) {
                    (UnaryOp::Bang, Type::Int) => Type::Int,
                    (UnaryOp::Bang, Type::Pixel) => Type::Pixel,
                    (UnaryOp::Minus, Type::Int)
                    | (UnaryOp::Sin, Type::Int)
                    | (UnaryOp::Cos, Type::Int)
                    | (UnaryOp::Atan, Type::Int) => Type::Int,
                    _ => {
                        return Err(Error::new(
                            ErrorImpl::InvalidUnaryOperand {
                                op: op.symbol(),
                                operand: operand.ty,
                            },
                            expr.loc,
                        ))
                    }
                };
                Ok(TypedExpr {
                    ty,
                    kind: TypedExprKind::Unary {
                        op: *op,
                        operand: Box::new(operand),
                    },
                })
            }
            ExprKind::Postfix {
                primary,
                pixel,
                channel,
            } => {
                let primary = self.check_expr(primary)?;
                let pixel = pixel
                    .as_ref()
                    .map(|selector| self.check_pixel_selector(selector))
                    .transpose()?;
                let ty = match (primary.ty, &pixel, channel) {
                    (Type::Image, Some(_), None) => Type::Pixel,
                    (Type::Image, None, Some(_)) => Type::Image,
                    (Type::Image, Some(_), Some(_)) => Type::Int,
                    (Type::Pixel, None, Some(_)) => Type::Int,
                    _ => {
                        return Err(Error::new(
                            ErrorImpl::InvalidSelector { on: primary.ty },
                            expr.loc,
                        ))
                    }
                };
                Ok(TypedExpr {
                    ty,
                    kind: TypedExprKind::Postfix {
                        primary: Box::new(primary),
                        pixel: pixel.map(Box::new),
                        channel: *channel,
                    },
                })
            }
            ExprKind::Conditional {
                guard,
                true_case,
                false_case,
            } => {
                let guard = self.check_expr(guard)?;
                check!(
                    guard.ty == Type::Int,
                    expr.loc,
                    ErrorImpl::GuardNotInt { found: guard.ty }
                );
                let true_case = self.check_expr(true_case)?;
                let false_case = self.check_expr(false_case)?;
                check!(
                    true_case.ty == false_case.ty,
                    expr.loc,
                    ErrorImpl::ConditionalArmMismatch {
                        true_case: true_case.ty,
                        false_case: false_case.ty,
                    }
                );
                Ok(TypedExpr {
                    ty: true_case.ty,
                    kind: TypedExprKind::Conditional {
                        guard: Box::new(guard),
                        true_case: Box::new(true_case),
                        false_case: Box::new(false_case),
                    },
                })
            }
            ExprKind::StringLit(value) => Ok(TypedExpr {
                ty: Type::String,
                kind: TypedExprKind::StringLit(value.clone()),
            }),
            ExprKind::NumLit(value) => Ok(TypedExpr {
                ty: Type::Int,
                kind: TypedExprKind::NumLit(*value),
            }),
            ExprKind::Ident(name) => {
                let entry = self.table.lookup(name).ok_or_else(|| {
                    Error::new(
                        ErrorImpl::UndeclaredIdentifier { name: name.clone() },
                        expr.loc,
                    )
                })?;
                Ok(TypedExpr {
                    ty: entry.ty,
                    kind: TypedExprKind::Ident {
                        java_name: entry.java_name.clone(),
                    },
                })
            }
            ExprKind::Z => Ok(TypedExpr {
                ty: Type::Int,
                kind: TypedExprKind::Z,
            }),
            ExprKind::Rand => Ok(TypedExpr {
                ty: Type::Int,
                kind: TypedExprKind::Rand,
            }),
            ExprKind::PixelFunc { func, selector } => {
                let selector = self.check_pixel_selector(selector)?;
                Ok(TypedExpr {
                    ty: Type::Int,
                    kind: TypedExprKind::PixelFunc {
                        func: *func,
                        selector: Box::new(selector),
                    },
                })
            }
            ExprKind::ExpandedPixel { red, grn, blu } => {
                let red = self.check_component(red, "channel")?;
                let grn = self.check_component(grn, "channel")?;
                let blu = self.check_component(blu, "channel")?;
                Ok(TypedExpr {
                    ty: Type::Pixel,
                    kind: TypedExprKind::ExpandedPixel {
                        red: Box::new(red),
                        grn: Box::new(grn),
                        blu: Box::new(blu),
                    },
                })
            }
            ExprKind::PredeclaredVar(var) => Ok(TypedExpr {
                ty: Type::Int,
                kind: TypedExprKind::PredeclaredVar(*var),
            }),
        }
    }

    /// Operator typing table. `None` means the pair is not accepted.
    fn binary_result(op: BinaryOp, left: Type, right: Type) -> Option<Type> {
        use BinaryOp::*;
        use Type::*;
        match op {
            BitAnd | BitOr => match (left, right) {
                (Pixel, Pixel) => Some(Pixel),
                _ => None,
            },
            And | Or | Lt | Gt | Le | Ge => match (left, right) {
                (Int, Int) => Some(Int),
                _ => None,
            },
            Eq => match (left, right) {
                (Int, Int) | (Pixel, Pixel) | (Image, Image) | (String, String) => Some(Int),
                _ => None,
            },
            Exp => match (left, right) {
                (Int, Int) => Some(Int),
                (Pixel, Int) => Some(Pixel),
                _ => None,
            },
            Plus => match (left, right) {
                (Int, Int) => Some(Int),
                (Pixel, Pixel) => Some(Pixel),
                (Image, Image) => Some(Image),
                (String, String) => Some(String),
                _ => None,
            },
            Minus => match (left, right) {
                (Int, Int) => Some(Int),
                (Pixel, Pixel) => Some(Pixel),
                (Image, Image) => Some(Image),
                _ => None,
            },
            Times | Div | Mod => match (left, right) {
                (Int, Int) => Some(Int),
                (Pixel, Pixel) => Some(Pixel),
                (Image, Image) => Some(Image),
                (Pixel, Int) => Some(Pixel),
                (Image, Int) => Some(Image),
                _ => None,
            },
        }
    }
}
