use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use vm_hack::{SourceModule, parse_module, translate};

#[derive(Parser)]
#[command(name = "vm-hack")]
#[command(about = "Hack VM to Hack assembly translator")]
struct Cli {
    #[arg(help = "Input .vm file, or a directory of .vm files")]
    input: PathBuf,

    #[arg(short, long, help = "Output .asm file (defaults next to the input)")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let inputs = collect_inputs(&cli.input)?;
    let modules = parse_inputs(&inputs)?;

    let instructions = translate(&modules)
        .with_context(|| format!("Failed to translate {}", cli.input.display()))?;

    let output = match cli.output {
        Some(path) => path,
        None => default_output(&cli.input)?,
    };

    let mut text = String::new();
    for instruction in &instructions {
        text.push_str(&instruction.to_string());
        text.push('\n');
    }
    fs::write(&output, &text)
        .with_context(|| format!("Failed to write output to {}", output.display()))?;

    println!(
        "Translated {} module(s) -> {} ({} lines)",
        modules.len(),
        output.display(),
        instructions.len()
    );

    Ok(())
}

/// Resolve the input path to the list of `.vm` files to translate. A
/// directory contributes all of its `.vm` files, sorted by name so the
/// output is deterministic.
fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(input)
            .with_context(|| format!("Failed to read directory {}", input.display()))?
        {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "vm") {
                files.push(path);
            }
        }
        if files.is_empty() {
            anyhow::bail!("no .vm files found in {}", input.display());
        }
        files.sort();
        Ok(files)
    } else {
        Ok(vec![input.to_path_buf()])
    }
}

fn parse_inputs(paths: &[PathBuf]) -> Result<Vec<SourceModule>> {
    let mut modules = Vec::new();
    for path in paths {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", path.display()))?;
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        tracing::debug!(module = %name, path = %path.display(), "parsing module");
        let module =
            parse_module(&name, &source).with_context(|| format!("in {}", path.display()))?;
        modules.push(module);
    }
    Ok(modules)
}

/// Sibling `.asm` for a file input; `<dir>/<dir>.asm` for a directory.
fn default_output(input: &Path) -> Result<PathBuf> {
    if input.is_dir() {
        let name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no directory name", input.display()))?;
        Ok(input.join(format!("{name}.asm")))
    } else {
        Ok(input.with_extension("asm"))
    }
}
