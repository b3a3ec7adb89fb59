//! VM-to-assembly translation driver.
//!
//! [`translate`] walks the parsed modules in the order given, compiles
//! every instruction through [`codegen`], and frames the stream with a
//! bootstrap preamble (multi-module programs only) and a halt epilogue.

mod codegen;
mod labels;
mod segment;

use crate::error::Result;
use crate::hack::AsmInstruction;
use crate::vm::{SourceModule, VmInstruction};

pub use labels::LabelAllocator;

/// Where the translator currently is in the source: which module, and
/// which function body (if any). Labels are qualified against this.
#[derive(Debug, Clone)]
pub struct TranslationContext {
    module: String,
    function: Option<String>,
}

impl TranslationContext {
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            function: None,
        }
    }

    /// Context for driver-synthesized instructions that belong to no
    /// source module (the bootstrap preamble and the halt epilogue).
    #[must_use]
    fn synthetic() -> Self {
        Self::new("")
    }

    pub fn enter_function(&mut self, name: impl Into<String>) {
        self.function = Some(name.into());
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Expand a user label to its globally unique assembler symbol.
    ///
    /// Inside a function body the label is scoped to that function; code
    /// before any `function` declaration gets a module-level scope so two
    /// modules can both use, say, `LOOP`.
    #[must_use]
    pub fn qualify(&self, label: &str) -> String {
        match &self.function {
            Some(function) => format!("{}.{function}${label}", self.module),
            None => format!("{}${label}", self.module),
        }
    }

    /// The name return-address labels are minted under at a call site.
    #[must_use]
    pub fn caller_name(&self) -> &str {
        self.function.as_deref().unwrap_or("Bootstrap")
    }
}

/// Translate a whole program.
///
/// Modules are compiled in the order given. With more than one module the
/// output starts by setting SP to 256 and calling `Sys.init`; a single
/// module is assumed to be a self-contained fragment and runs as-is. The
/// stream always ends with the halt loop.
pub fn translate(modules: &[SourceModule]) -> Result<Vec<AsmInstruction>> {
    let mut output = Vec::new();
    let mut labels = LabelAllocator::new();
    let synthetic = TranslationContext::synthetic();

    if modules.len() > 1 {
        tracing::debug!("emitting bootstrap preamble");
        output.extend(codegen::compile_instruction(
            &VmInstruction::Bootstrap,
            &synthetic,
            &mut labels,
        )?);
    }

    for module in modules {
        tracing::debug!(
            module = %module.name,
            instructions = module.instructions.len(),
            "translating module"
        );
        let mut ctx = TranslationContext::new(&module.name);
        for instruction in &module.instructions {
            if let VmInstruction::Function(name, locals) = instruction {
                tracing::debug!(function = %name, locals, "entering function");
                ctx.enter_function(name);
            }
            output.extend(codegen::compile_instruction(instruction, &ctx, &mut labels)?);
        }
    }

    output.extend(codegen::compile_instruction(
        &VmInstruction::Halt,
        &synthetic,
        &mut labels,
    )?);
    Ok(output)
}
