pub mod expr;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
