//! Segment resolver: emits the addressing recipe for a (segment, index)
//! slot without touching the stack. Both entry points leave their result
//! in the D register.

use crate::error::{Error, Result};
use crate::hack::{ADDRESS_MAX, ARG, Comp, Dest, LCL, TEMP_BASE, THAT, THIS};
use crate::vm::Segment;

use super::codegen::AsmEmitter;

/// Emit code reading the slot's value into D (the push side).
pub(super) fn emit_value_read(
    e: &mut AsmEmitter,
    segment: Segment,
    index: u16,
    module: &str,
) -> Result<()> {
    match segment {
        Segment::Constant => {
            e.address_value(address_literal(Some(index), segment, index)?);
            e.assign(Dest::D, Comp::A);
        }
        Segment::Local | Segment::Argument | Segment::This | Segment::That => {
            emit_base_offset(e, segment, index, Dest::A)?;
            e.assign(Dest::D, Comp::M);
        }
        Segment::Temp => {
            e.address_value(address_literal(TEMP_BASE.checked_add(index), segment, index)?);
            e.assign(Dest::D, Comp::M);
        }
        Segment::Pointer => {
            e.address(pointer_register(index)?);
            e.assign(Dest::D, Comp::M);
        }
        Segment::Static => {
            e.address(static_symbol(module, index));
            e.assign(Dest::D, Comp::M);
        }
    }
    Ok(())
}

/// Emit code computing the slot's address into D (the pop side).
///
/// `constant` has no address and is rejected; `pointer` resolves to the
/// `THIS`/`THAT` register itself, not to the memory it points at.
pub(super) fn emit_target_address(
    e: &mut AsmEmitter,
    segment: Segment,
    index: u16,
    module: &str,
) -> Result<()> {
    match segment {
        Segment::Constant => {
            return Err(Error::UnknownSegment(format!("pop constant {index}")));
        }
        Segment::Local | Segment::Argument | Segment::This | Segment::That => {
            emit_base_offset(e, segment, index, Dest::D)?;
        }
        Segment::Temp => {
            e.address_value(address_literal(TEMP_BASE.checked_add(index), segment, index)?);
            e.assign(Dest::D, Comp::A);
        }
        Segment::Pointer => {
            e.address(pointer_register(index)?);
            e.assign(Dest::D, Comp::A);
        }
        Segment::Static => {
            e.address(static_symbol(module, index));
            e.assign(Dest::D, Comp::A);
        }
    }
    Ok(())
}

/// Base-pointer indirection shared by the four indirect segments:
/// `dest = *BASE + index` where `dest` is A (for a subsequent read) or D
/// (when the address itself is the result).
fn emit_base_offset(e: &mut AsmEmitter, segment: Segment, index: u16, dest: Dest) -> Result<()> {
    e.address(base_pointer(segment));
    e.assign(Dest::D, Comp::M);
    e.address_value(address_literal(Some(index), segment, index)?);
    e.assign(dest, Comp::DPlusA);
    Ok(())
}

/// Numeric literals travel through `@` instructions, which carry a 15-bit
/// immediate; anything larger cannot be addressed.
fn address_literal(value: Option<u16>, segment: Segment, index: u16) -> Result<u16> {
    value
        .filter(|value| *value <= ADDRESS_MAX)
        .ok_or_else(|| Error::UnknownSegment(format!("{segment} {index}")))
}

fn base_pointer(segment: Segment) -> &'static str {
    match segment {
        Segment::Local => LCL,
        Segment::Argument => ARG,
        Segment::This => THIS,
        Segment::That => THAT,
        _ => unreachable!("segment {segment} has no base pointer"),
    }
}

fn pointer_register(index: u16) -> Result<&'static str> {
    match index {
        0 => Ok(THIS),
        1 => Ok(THAT),
        _ => Err(Error::UnknownSegment(format!("pointer {index}"))),
    }
}

/// The assembler-level symbol backing `static <index>` of `module`.
pub(super) fn static_symbol(module: &str, index: u16) -> String {
    format!("{module}.{index}")
}
