//! In-process adapters for the packaging ports.

pub mod validator;

pub use validator::{ScriptedValidator, ValidatorBehavior};
