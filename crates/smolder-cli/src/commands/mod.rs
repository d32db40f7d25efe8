//! Command implementations.

pub mod validate;

pub use validate::execute as validate_execute;
