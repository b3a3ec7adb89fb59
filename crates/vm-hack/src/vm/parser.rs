//! Line recognition: turns cleaned `.vm` source into [`VmInstruction`]s.
//!
//! The lexical conventions match the course toolchain: `//` starts a
//! comment, blank lines are skipped, tokens are whitespace-separated.

use crate::error::{Error, Result};

use super::{SourceModule, VmInstruction};

/// Parse one module's source text.
///
/// `name` is the module base name (the `.vm` file stem); it namespaces the
/// module's static slots and user labels during translation.
pub fn parse_module(name: &str, source: &str) -> Result<SourceModule> {
    let mut instructions = Vec::new();
    for line in source.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }
        instructions.push(parse_line(line)?);
    }
    Ok(SourceModule {
        name: name.to_string(),
        instructions,
    })
}

fn strip_comment(line: &str) -> &str {
    line.split_once("//").map_or(line, |(code, _)| code)
}

fn parse_line(line: &str) -> Result<VmInstruction> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&keyword, args)) = tokens.split_first() else {
        return Err(Error::UnrecognizedInstruction(line.to_string()));
    };

    match keyword {
        "push" | "pop" => {
            let [segment, index] = args else {
                return Err(malformed(line));
            };
            let segment = segment.parse()?;
            let index = parse_number(index, line)?;
            if keyword == "push" {
                Ok(VmInstruction::Push(segment, index))
            } else {
                Ok(VmInstruction::Pop(segment, index))
            }
        }
        "label" | "goto" | "if-goto" => {
            let [name] = args else {
                return Err(malformed(line));
            };
            let name = (*name).to_string();
            match keyword {
                "label" => Ok(VmInstruction::Label(name)),
                "goto" => Ok(VmInstruction::Goto(name)),
                _ => Ok(VmInstruction::IfGoto(name)),
            }
        }
        "function" | "call" => {
            let [name, count] = args else {
                return Err(malformed(line));
            };
            let name = (*name).to_string();
            let count = parse_number(count, line)?;
            if keyword == "function" {
                Ok(VmInstruction::Function(name, count))
            } else {
                Ok(VmInstruction::Call(name, count))
            }
        }
        "return" => {
            if args.is_empty() {
                Ok(VmInstruction::Return)
            } else {
                Err(malformed(line))
            }
        }
        mnemonic if args.is_empty() => Ok(VmInstruction::Arithmetic(mnemonic.parse()?)),
        mnemonic if mnemonic.parse::<super::ArithmeticOp>().is_ok() => Err(malformed(line)),
        _ => Err(Error::UnrecognizedInstruction(line.to_string())),
    }
}

fn parse_number(token: &str, line: &str) -> Result<u16> {
    token
        .parse()
        .map_err(|_| Error::MalformedInstruction(line.to_string()))
}

fn malformed(line: &str) -> Error {
    Error::MalformedInstruction(line.to_string())
}
