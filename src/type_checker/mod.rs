pub mod type_checker;
pub mod typed_ast;

#[cfg(test)]
mod tests;
