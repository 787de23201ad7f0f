//! Format string tokenization and specifier classification.
//!
//! This module turns raw printf-style text into [`FormatString`] parts. It does
//! not assign final positions; see [`crate::analysis`] for that.

pub mod ast;
mod classify;
mod tokenizer;

pub use ast::*;
pub use tokenizer::{tokenize, tokenize_with};
