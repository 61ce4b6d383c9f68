//! Code generator for render function expression trees
//!
//! This module takes the expression tree attached to a transformed root and
//! prints it as source text.

pub mod config;
pub mod generator;

pub use config::{CodegenConfig, QuoteStyle};
pub use generator::{generate, generate_with_config, CodeWriter};
