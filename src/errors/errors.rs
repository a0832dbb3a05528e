use std::fmt::Display;

use thiserror::Error;

use crate::{ast::types::Type, SourceLoc};

/// Which pipeline stage produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lexical => write!(f, "lexical"),
            Stage::Syntax => write!(f, "syntax"),
            Stage::Semantic => write!(f, "semantic"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    loc: SourceLoc,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, loc: SourceLoc) -> Self {
        Error {
            internal_error: error_impl,
            loc,
        }
    }

    pub fn loc(&self) -> SourceLoc {
        self.loc
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn stage(&self) -> Stage {
        match &self.internal_error {
            ErrorImpl::UnrecognizedCharacter { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::NewlineInString
            | ErrorImpl::InvalidEscape { .. }
            | ErrorImpl::NumberTooLarge { .. }
            | ErrorImpl::IncompleteExchange => Stage::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedExpression { .. }
            | ErrorImpl::ExpectedStatement { .. }
            | ErrorImpl::ExpectedType { .. } => Stage::Syntax,
            ErrorImpl::UndeclaredIdentifier { .. }
            | ErrorImpl::AlreadyDeclared { .. }
            | ErrorImpl::VoidVariable { .. }
            | ErrorImpl::ImageWithoutSize { .. }
            | ErrorImpl::DimensionOnNonImage { .. }
            | ErrorImpl::SelectorComponentNotVar
            | ErrorImpl::NotAssignmentCompatible { .. }
            | ErrorImpl::IncompatibleOperands { .. }
            | ErrorImpl::InvalidUnaryOperand { .. }
            | ErrorImpl::GuardNotInt { .. }
            | ErrorImpl::ConditionalArmMismatch { .. }
            | ErrorImpl::InvalidSelector { .. }
            | ErrorImpl::ComponentNotInt { .. }
            | ErrorImpl::ReturnTypeMismatch { .. } => Stage::Semantic,
        }
    }

    pub fn error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognizedCharacter { .. } => "UnrecognizedCharacter",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::NewlineInString => "NewlineInString",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::NumberTooLarge { .. } => "NumberTooLarge",
            ErrorImpl::IncompleteExchange => "IncompleteExchange",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::ExpectedStatement { .. } => "ExpectedStatement",
            ErrorImpl::ExpectedType { .. } => "ExpectedType",
            ErrorImpl::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            ErrorImpl::AlreadyDeclared { .. } => "AlreadyDeclared",
            ErrorImpl::VoidVariable { .. } => "VoidVariable",
            ErrorImpl::ImageWithoutSize { .. } => "ImageWithoutSize",
            ErrorImpl::DimensionOnNonImage { .. } => "DimensionOnNonImage",
            ErrorImpl::SelectorComponentNotVar => "SelectorComponentNotVar",
            ErrorImpl::NotAssignmentCompatible { .. } => "NotAssignmentCompatible",
            ErrorImpl::IncompatibleOperands { .. } => "IncompatibleOperands",
            ErrorImpl::InvalidUnaryOperand { .. } => "InvalidUnaryOperand",
            ErrorImpl::GuardNotInt { .. } => "GuardNotInt",
            ErrorImpl::ConditionalArmMismatch { .. } => "ConditionalArmMismatch",
            ErrorImpl::InvalidSelector { .. } => "InvalidSelector",
            ErrorImpl::ComponentNotInt { .. } => "ComponentNotInt",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} error at {}:{}: {}",
            self.stage(),
            self.loc.line,
            self.loc.column,
            self.internal_error
        )
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognized character {ch:?}")]
    UnrecognizedCharacter { ch: char },
    #[error("string literal is missing a closing quote")]
    UnterminatedString,
    #[error("raw line break inside string literal")]
    NewlineInString,
    #[error("invalid escape sequence \\{ch}")]
    InvalidEscape { ch: char },
    #[error("numeric literal {literal:?} does not fit in an int")]
    NumberTooLarge { literal: String },
    #[error("incomplete exchange operator, expected `<->`")]
    IncompleteExchange,
    #[error("expected {expected} but found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("expected an expression but found {found}")]
    ExpectedExpression { found: String },
    #[error("expected a statement but found {found}")]
    ExpectedStatement { found: String },
    #[error("expected a type but found {found}")]
    ExpectedType { found: String },
    #[error("identifier {name:?} is not declared")]
    UndeclaredIdentifier { name: String },
    #[error("{name:?} is already declared in this scope")]
    AlreadyDeclared { name: String },
    #[error("variable {name:?} may not have type void")]
    VoidVariable { name: String },
    #[error("image {name:?} needs a dimension or an initializer")]
    ImageWithoutSize { name: String },
    #[error("only image variables take a dimension, {name:?} is {ty}")]
    DimensionOnNonImage { name: String, ty: Type },
    #[error("pixel selector in an assignment target must use coordinate variables")]
    SelectorComponentNotVar,
    #[error("a {rhs} value cannot be assigned to a {target} target")]
    NotAssignmentCompatible { target: Type, rhs: Type },
    #[error("operator {op} cannot combine {left} and {right}")]
    IncompatibleOperands {
        op: &'static str,
        left: Type,
        right: Type,
    },
    #[error("operator {op} cannot be applied to {operand}")]
    InvalidUnaryOperand { op: &'static str, operand: Type },
    #[error("guard must be int, found {found}")]
    GuardNotInt { found: Type },
    #[error("conditional arms have different types: {true_case} and {false_case}")]
    ConditionalArmMismatch { true_case: Type, false_case: Type },
    #[error("invalid pixel/channel selector on a {on} value")]
    InvalidSelector { on: Type },
    #[error("{what} component must be int, found {found}")]
    ComponentNotInt { what: &'static str, found: Type },
    #[error("cannot return {found} from a program declared {expected}")]
    ReturnTypeMismatch { expected: Type, found: Type },
}
