//! Tree-walking evaluator for the rill language.
//!
//! Feed a parsed [`rill_parser::ast::Program`] to an [`Evaluator`] and get a
//! single [`object::Object`] back; runtime failures arrive as
//! `Object::Error` values rather than panics.

pub mod builtin;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod object;

pub use environment::Environment;
pub use evaluator::Evaluator;
