use std::fmt::Display;

/// The static types of the language. `Void` is only valid as a program
/// return type, never for a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    String,
    Pixel,
    Image,
    Void,
}

pub const ALL_TYPES: [Type; 5] = [Type::Int, Type::String, Type::Pixel, Type::Image, Type::Void];

impl Type {
    /// The directional implicit-conversion predicate: may a `rhs` value flow
    /// into a `target` of this type? Both the type checker and the code
    /// generator consult this single table; it is deliberately asymmetric
    /// (e.g. `INT` flows into a `PIXEL` target and vice versa, but `IMAGE`
    /// flows into `STRING` and never back).
    pub fn assignment_compatible(target: Type, rhs: Type) -> bool {
        match target {
            Type::Image => matches!(rhs, Type::Image | Type::Pixel | Type::String),
            Type::Pixel => matches!(rhs, Type::Pixel | Type::Int),
            Type::Int => matches!(rhs, Type::Int | Type::Pixel),
            Type::String => matches!(
                rhs,
                Type::String | Type::Int | Type::Pixel | Type::Image
            ),
            Type::Void => false,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::String => write!(f, "string"),
            Type::Pixel => write!(f, "pixel"),
            Type::Image => write!(f, "image"),
            Type::Void => write!(f, "void"),
        }
    }
}
