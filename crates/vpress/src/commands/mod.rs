//! CLI command implementations.

pub mod check;
pub mod generate;

pub use check::CheckArgs;
pub use generate::GenerateArgs;
