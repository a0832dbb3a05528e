pub mod ast;
pub mod expressions;
pub mod types;
