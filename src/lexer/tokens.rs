use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::SourceLoc;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Kind> = {
        let mut map = HashMap::new();
        map.insert("image", Kind::ResImage);
        map.insert("pixel", Kind::ResPixel);
        map.insert("int", Kind::ResInt);
        map.insert("string", Kind::ResString);
        map.insert("void", Kind::ResVoid);
        map.insert("nil", Kind::ResNil);
        map.insert("load", Kind::ResLoad);
        map.insert("display", Kind::ResDisplay);
        map.insert("write", Kind::ResWrite);
        map.insert("x", Kind::ResX);
        map.insert("y", Kind::ResY);
        map.insert("a", Kind::ResA);
        map.insert("r", Kind::ResR);
        map.insert("X", Kind::ResCapX);
        map.insert("Y", Kind::ResCapY);
        map.insert("Z", Kind::ResZ);
        map.insert("x_cart", Kind::ResXCart);
        map.insert("y_cart", Kind::ResYCart);
        map.insert("a_polar", Kind::ResAPolar);
        map.insert("r_polar", Kind::ResRPolar);
        map.insert("rand", Kind::ResRand);
        map.insert("sin", Kind::ResSin);
        map.insert("cos", Kind::ResCos);
        map.insert("atan", Kind::ResAtan);
        map.insert("if", Kind::ResIf);
        map.insert("while", Kind::ResWhile);
        map.insert("red", Kind::ResRed);
        map.insert("grn", Kind::ResGrn);
        map.insert("blu", Kind::ResBlu);
        map
    };
}

/// Closed set of lexeme categories. Reserved words carry a `Res` prefix;
/// every other variant is an operator, separator, literal, or `Eof`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Kind {
    Eof,
    NumLit,
    StringLit,
    Ident,

    Dot,
    Comma,
    Question,
    Colon,
    LParen,
    RParen,
    LSquare,
    RSquare,
    LCurly,
    RCurly,

    Assign, // =
    Eq,     // ==
    Bang,   // !

    Lt,
    Le,
    Gt,
    Ge,
    Exchange, // <->

    And,    // &&
    BitAnd, // &
    Or,     // ||
    BitOr,  // |

    Plus,
    Minus,
    Times,
    Exp, // **
    Div,
    Mod,

    // Reserved
    ResImage,
    ResPixel,
    ResInt,
    ResString,
    ResVoid,
    ResNil,
    ResLoad,
    ResDisplay,
    ResWrite,
    ResX,
    ResY,
    ResA,
    ResR,
    ResCapX,
    ResCapY,
    ResZ,
    ResXCart,
    ResYCart,
    ResAPolar,
    ResRPolar,
    ResRand,
    ResSin,
    ResCos,
    ResAtan,
    ResIf,
    ResWhile,
    ResRed,
    ResGrn,
    ResBlu,
}

impl Kind {
    pub fn lexeme(&self) -> &'static str {
        match self {
            Kind::Eof => "end of input",
            Kind::NumLit => "number literal",
            Kind::StringLit => "string literal",
            Kind::Ident => "identifier",
            Kind::Dot => "`.`",
            Kind::Comma => "`,`",
            Kind::Question => "`?`",
            Kind::Colon => "`:`",
            Kind::LParen => "`(`",
            Kind::RParen => "`)`",
            Kind::LSquare => "`[`",
            Kind::RSquare => "`]`",
            Kind::LCurly => "`{`",
            Kind::RCurly => "`}`",
            Kind::Assign => "`=`",
            Kind::Eq => "`==`",
            Kind::Bang => "`!`",
            Kind::Lt => "`<`",
            Kind::Le => "`<=`",
            Kind::Gt => "`>`",
            Kind::Ge => "`>=`",
            Kind::Exchange => "`<->`",
            Kind::And => "`&&`",
            Kind::BitAnd => "`&`",
            Kind::Or => "`||`",
            Kind::BitOr => "`|`",
            Kind::Plus => "`+`",
            Kind::Minus => "`-`",
            Kind::Times => "`*`",
            Kind::Exp => "`**`",
            Kind::Div => "`/`",
            Kind::Mod => "`%`",
            Kind::ResImage => "`image`",
            Kind::ResPixel => "`pixel`",
            Kind::ResInt => "`int`",
            Kind::ResString => "`string`",
            Kind::ResVoid => "`void`",
            Kind::ResNil => "`nil`",
            Kind::ResLoad => "`load`",
            Kind::ResDisplay => "`display`",
            Kind::ResWrite => "`write`",
            Kind::ResX => "`x`",
            Kind::ResY => "`y`",
            Kind::ResA => "`a`",
            Kind::ResR => "`r`",
            Kind::ResCapX => "`X`",
            Kind::ResCapY => "`Y`",
            Kind::ResZ => "`Z`",
            Kind::ResXCart => "`x_cart`",
            Kind::ResYCart => "`y_cart`",
            Kind::ResAPolar => "`a_polar`",
            Kind::ResRPolar => "`r_polar`",
            Kind::ResRand => "`rand`",
            Kind::ResSin => "`sin`",
            Kind::ResCos => "`cos`",
            Kind::ResAtan => "`atan`",
            Kind::ResIf => "`if`",
            Kind::ResWhile => "`while`",
            Kind::ResRed => "`red`",
            Kind::ResGrn => "`grn`",
            Kind::ResBlu => "`blu`",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}

/// One token: a category tag plus a view into the source buffer. Tokens do
/// not copy their text; `text()` reslices the shared input.
#[derive(Debug, Clone, Copy)]
pub struct Token<'s> {
    pub kind: Kind,
    pub start: usize,
    pub length: usize,
    pub loc: SourceLoc,
    source: &'s str,
}

impl<'s> Token<'s> {
    pub fn new(kind: Kind, start: usize, length: usize, loc: SourceLoc, source: &'s str) -> Self {
        Token {
            kind,
            start,
            length,
            loc,
            source,
        }
    }

    pub fn text(&self) -> &'s str {
        &self.source[self.start..self.start + self.length]
    }

    /// Value of a `NumLit` token. The scanner has already rejected literals
    /// outside the `i32` range, so parsing here cannot fail.
    pub fn num_value(&self) -> i32 {
        debug_assert_eq!(self.kind, Kind::NumLit);
        self.text().parse().unwrap_or(0)
    }

    /// Value of a `StringLit` token with the quotes stripped and escape
    /// sequences decoded. The scanner has already rejected invalid escapes.
    pub fn string_value(&self) -> String {
        debug_assert_eq!(self.kind, Kind::StringLit);
        let raw = &self.text()[1..self.length - 1];
        let mut value = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                match chars.next() {
                    Some('b') => value.push('\u{8}'),
                    Some('t') => value.push('\t'),
                    Some('n') => value.push('\n'),
                    Some('r') => value.push('\r'),
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),
                    _ => unreachable!("scanner admits only valid escapes"),
                }
            } else {
                value.push(ch);
            }
        }
        value
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            Kind::Ident | Kind::NumLit | Kind::StringLit => {
                write!(f, "{} ({})", self.kind, self.text())
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
