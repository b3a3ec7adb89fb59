//! The Hack assembly model: symbolic instructions and the reserved symbols
//! the translated code shares with the downstream assembler and runtime.

mod display;
mod instruction;

pub use instruction::{Address, AsmInstruction, Comp, Dest, Jump};

/// Stack pointer; always one past the logical top of stack.
pub const SP: &str = "SP";
/// Base pointer of the `local` segment.
pub const LCL: &str = "LCL";
/// Base pointer of the `argument` segment.
pub const ARG: &str = "ARG";
/// Base pointer of the `this` segment.
pub const THIS: &str = "THIS";
/// Base pointer of the `that` segment.
pub const THAT: &str = "THAT";

/// Scratch register staging a pop target address across the SP decrement.
pub const POP_SCRATCH: &str = "R13";
/// Scratch register holding the end-of-frame address during a return.
pub const FRAME_END: &str = "R14";
/// Scratch register holding the recovered return address during a return.
pub const RETURN_ADDRESS: &str = "R15";

/// Largest value an `@` instruction can load (15-bit immediate).
pub const ADDRESS_MAX: u16 = 32767;

/// First RAM address of the `temp` segment.
pub const TEMP_BASE: u16 = 5;
/// Initial stack pointer value installed by the bootstrap sequence.
pub const STACK_BASE: u16 = 256;

/// Entry function invoked by the bootstrap sequence.
pub const ENTRY_FUNCTION: &str = "Sys.init";
/// Terminal label the program self-jumps to after all module bodies.
pub const HALT_LABEL: &str = "HALT";
