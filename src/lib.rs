pub mod configuration;
mod files;
mod generator;
pub mod grammar;
mod syntax;

pub use generator::{Iskierka, Options};
pub use grammar::generation::{Pair, RecursionLimit};

/// extension of iskierka rule files
pub const EXTENSION: &str = "iski";

/// name of the root variable, evaluation always starts here
pub const ROOT: &str = "output";

/// default cap on nested variable evaluations, protects against
/// stack exhaustion on self-referential grammars
pub const DEFAULT_RECURSION_LEVEL_LIMIT: i64 = 2048;
