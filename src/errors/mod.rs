//! Error types shared by every compilation stage.
//!
//! A failure anywhere in the pipeline is an [`errors::Error`]: a concrete
//! [`errors::ErrorImpl`] variant plus the source location it was raised at.
//! [`errors::Stage`] classifies the failure as lexical, syntax, or semantic.

pub mod errors;
