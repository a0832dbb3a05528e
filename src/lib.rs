use crate::errors::errors::Error;

pub mod ast;
pub mod codegen;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

/// A line/column position in the source text. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLoc {
    pub line: u32,
    pub column: u32,
}

impl SourceLoc {
    pub fn start() -> Self {
        SourceLoc { line: 1, column: 1 }
    }
}

/// Runs the whole pipeline over one in-memory program: scan, parse, type
/// check, generate. Returns the generated Java translation unit.
pub fn compile(source: &str) -> Result<String, Error> {
    let scanner = lexer::lexer::Scanner::new(source);
    let program = parser::parser::parse(scanner)?;
    let checked = type_checker::type_checker::check(&program)?;
    Ok(codegen::codegen::generate(&checked))
}

/// Renders a caret diagnostic for `error` against the source it came from.
///
/// ```text
/// Error: UnexpectedToken (expected `.` but found `}`)
/// -> blur.pix
///    |
///  4 | write a }
///    | --------^
/// ```
pub fn display_error(error: &Error, source: &str, file: &str) {
    let loc = error.loc();
    let line_text = source
        .lines()
        .nth(loc.line as usize - 1)
        .unwrap_or_default();

    let line_string = loc.line.to_string();
    let padding = line_string.len() + 2;

    println!("Error: {} ({})", error.error_name(), error.message());
    println!("-> {}", file);
    println!("{:>padding$}", "|");

    let trimmed = line_text.trim_start();
    let removed = line_text.len() - trimmed.len();
    println!("{} | {}", line_string, trimmed.trim_end());

    let arrows = (loc.column as usize).saturating_sub(removed).max(1);
    println!("{:>padding$} {:->arrows$}", "|", "^");
}
