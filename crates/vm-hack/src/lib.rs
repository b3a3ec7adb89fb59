//! Translator from Hack VM code to symbolic Hack assembly.
//!
//! The pipeline is two stages: [`vm::parse_module`] turns `.vm` source into
//! typed [`vm::VmInstruction`]s, and [`translate::translate`] lowers the
//! parsed modules into a single [`hack::AsmInstruction`] stream ready to be
//! rendered line by line.

pub mod error;
pub mod hack;
pub mod translate;
pub mod vm;

/// Test harness module for writing unit and integration tests.
///
/// This module is only available when running tests or when the
/// `test-harness` feature is enabled.
#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use error::{Error, Result};
pub use hack::AsmInstruction;
pub use translate::{TranslationContext, translate};
pub use vm::{SourceModule, VmInstruction, parse_module};
