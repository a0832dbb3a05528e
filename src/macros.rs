//! Utility macros for the compiler.
//!
//! - `check!` - raises a semantic error unless a condition holds; the type
//!   checker's guard clauses all go through it.
//! - `expect_kind!` - asserts the kind of the current token inside the
//!   parser and produces an `UnexpectedToken` error otherwise.

/// Returns early with `Error::new($err, $loc)` unless `$cond` holds.
#[macro_export]
macro_rules! check {
    ($cond:expr, $loc:expr, $err:expr) => {
        if !$cond {
            return Err($crate::errors::errors::Error::new($err, $loc));
        }
    };
}

/// Builds an `UnexpectedToken` syntax error from an expectation and the
/// token actually seen.
#[macro_export]
macro_rules! expect_kind {
    ($expected:expr, $token:expr) => {
        $crate::errors::errors::Error::new(
            $crate::errors::errors::ErrorImpl::UnexpectedToken {
                expected: String::from($expected),
                found: format!("{}", $token.kind),
            },
            $token.loc,
        )
    };
}
