//! Command handlers, one module per subcommand family.

pub mod affine;
pub mod analyze;
pub mod vigenere;
