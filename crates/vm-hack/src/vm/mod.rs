//! The input model: Hack VM instructions and their recognition from
//! already-cleaned source lines.

mod display;
mod instruction;
pub mod parser;

pub use instruction::{ArithmeticOp, Segment, VmInstruction};
pub use parser::parse_module;

/// One input module: a `.vm` file reduced to its base name and its
/// instruction stream in source-line order.
#[derive(Debug, Clone)]
pub struct SourceModule {
    pub name: String,
    pub instructions: Vec<VmInstruction>,
}
