//! The instruction compiler: one code-generation rule per VM instruction
//! kind. Every rule is a pure function of (instruction, context, label
//! allocator) and never looks ahead or behind in the instruction stream.

use crate::error::{Error, Result};
use crate::hack::{
    ADDRESS_MAX, ARG, AsmInstruction, Comp, Dest, ENTRY_FUNCTION, FRAME_END, HALT_LABEL, Jump,
    LCL, POP_SCRATCH, RETURN_ADDRESS, SP, STACK_BASE, THAT, THIS,
};
use crate::vm::{ArithmeticOp, Segment, VmInstruction};

use super::labels::LabelAllocator;
use super::{TranslationContext, segment};

/// The caller name used for return-address labels emitted outside any
/// function body (only the bootstrap call site qualifies).
const BOOTSTRAP_CALLER: &str = "Bootstrap";

/// The four caller pointers saved below the return address, keyed by their
/// negative offset from the frame end (the callee's LCL). Return walks the
/// slots back in this order, nearest to the frame end first.
const SAVED_SEGMENTS: [(&str, u16); 4] = [(THAT, 1), (THIS, 2), (ARG, 3), (LCL, 4)];

/// Negative offset of the saved return address from the frame end.
const RETURN_ADDRESS_OFFSET: u16 = 5;

/// Translate one instruction into its assembly sequence.
pub(super) fn compile_instruction(
    instruction: &VmInstruction,
    ctx: &TranslationContext,
    labels: &mut LabelAllocator,
) -> Result<Vec<AsmInstruction>> {
    let mut e = AsmEmitter::new();
    e.comment(instruction.to_string());
    match instruction {
        VmInstruction::Arithmetic(op) => compile_arithmetic(&mut e, *op, labels),
        VmInstruction::Push(segment, index) => {
            compile_push(&mut e, *segment, *index, ctx.module())?;
        }
        VmInstruction::Pop(segment, index) => {
            compile_pop(&mut e, *segment, *index, ctx.module())?;
        }
        VmInstruction::Label(name) => e.label(ctx.qualify(name)),
        VmInstruction::Goto(name) => {
            e.address(ctx.qualify(name));
            e.jump(Comp::Zero, Jump::Jmp);
        }
        VmInstruction::IfGoto(name) => {
            e.pop_into(Dest::D);
            e.address(ctx.qualify(name));
            e.jump(Comp::D, Jump::Jne);
        }
        VmInstruction::Function(name, locals) => compile_function(&mut e, name, *locals)?,
        VmInstruction::Call(name, args) => {
            compile_call(&mut e, labels, ctx.caller_name(), name, *args)?;
        }
        VmInstruction::Return => compile_return(&mut e),
        VmInstruction::Bootstrap => compile_bootstrap(&mut e, labels)?,
        VmInstruction::Halt => compile_halt(&mut e),
    }
    Ok(e.into_lines())
}

fn compile_arithmetic(e: &mut AsmEmitter, op: ArithmeticOp, labels: &mut LabelAllocator) {
    match op {
        ArithmeticOp::Add => binary(e, Comp::DPlusA),
        ArithmeticOp::Sub => binary(e, Comp::AMinusD),
        ArithmeticOp::And => binary(e, Comp::DAndA),
        ArithmeticOp::Or => binary(e, Comp::DOrA),
        ArithmeticOp::Neg => unary(e, Comp::NegD),
        ArithmeticOp::Not => unary(e, Comp::NotD),
        ArithmeticOp::Eq => comparison(e, labels, Jump::Jeq),
        ArithmeticOp::Gt => comparison(e, labels, Jump::Jgt),
        ArithmeticOp::Lt => comparison(e, labels, Jump::Jlt),
    }
}

fn unary(e: &mut AsmEmitter, comp: Comp) {
    e.pop_into(Dest::D);
    e.assign(Dest::D, comp);
    e.push_d();
}

/// Binary operand order: y (popped first) in D, x (popped second) in A.
fn binary(e: &mut AsmEmitter, comp: Comp) {
    e.pop_into(Dest::D);
    e.pop_into(Dest::A);
    e.assign(Dest::D, comp);
    e.push_d();
}

/// Comparisons compute x - y and branch on the matching condition; the
/// pushed result is all-ones for true, zero for false.
fn comparison(e: &mut AsmEmitter, labels: &mut LabelAllocator, jump: Jump) {
    let pair = labels.comparison_pair();
    e.pop_into(Dest::D);
    e.pop_into(Dest::A);
    e.assign(Dest::D, Comp::AMinusD);
    e.address(&pair.if_true);
    e.jump(Comp::D, jump);
    e.push_comp(Comp::Zero);
    e.address(&pair.end);
    e.jump(Comp::Zero, Jump::Jmp);
    e.label(pair.if_true);
    e.push_comp(Comp::NegOne);
    e.label(pair.end);
}

fn compile_push(e: &mut AsmEmitter, segment: Segment, index: u16, module: &str) -> Result<()> {
    segment::emit_value_read(e, segment, index, module)?;
    e.push_d();
    Ok(())
}

/// Pop stages the target address in a scratch register because computing
/// it clobbers D, which must then receive the popped value.
fn compile_pop(e: &mut AsmEmitter, segment: Segment, index: u16, module: &str) -> Result<()> {
    segment::emit_target_address(e, segment, index, module)?;
    e.address(POP_SCRATCH);
    e.assign(Dest::M, Comp::D);
    e.pop_into(Dest::D);
    e.address(POP_SCRATCH);
    e.assign(Dest::A, Comp::M);
    e.assign(Dest::M, Comp::D);
    Ok(())
}

/// A function declaration names its entry point and materializes `locals`
/// zero-initialized slots through the ordinary push machinery.
fn compile_function(e: &mut AsmEmitter, name: &str, locals: u16) -> Result<()> {
    e.label(name);
    for _ in 0..locals {
        compile_push(e, Segment::Constant, 0, "")?;
    }
    Ok(())
}

fn compile_call(
    e: &mut AsmEmitter,
    labels: &mut LabelAllocator,
    caller: &str,
    callee: &str,
    args: u16,
) -> Result<()> {
    // The ARG displacement is loaded by a single `@` instruction, which
    // caps the argument count at ADDRESS_MAX - 5.
    let displacement = RETURN_ADDRESS_OFFSET
        .checked_add(args)
        .filter(|displacement| *displacement <= ADDRESS_MAX)
        .ok_or_else(|| Error::MalformedInstruction(format!("call {callee} {args}")))?;

    let return_label = labels.return_address(caller);

    // Push the frame: return address, then the caller's four base pointers.
    e.address(&return_label);
    e.assign(Dest::D, Comp::A);
    e.push_d();
    for (pointer, _) in SAVED_SEGMENTS.iter().rev() {
        e.address(*pointer);
        e.assign(Dest::D, Comp::M);
        e.push_d();
    }

    // ARG = SP - 5 - args: the first pushed argument, below the new frame.
    e.address_value(displacement);
    e.assign(Dest::D, Comp::A);
    e.address(SP);
    e.assign(Dest::D, Comp::MMinusD);
    e.address(ARG);
    e.assign(Dest::M, Comp::D);

    // LCL = SP: the callee's locals start at the current top of stack.
    e.address(SP);
    e.assign(Dest::D, Comp::M);
    e.address(LCL);
    e.assign(Dest::M, Comp::D);

    e.address(callee);
    e.jump(Comp::Zero, Jump::Jmp);
    e.label(return_label);
    Ok(())
}

fn compile_return(e: &mut AsmEmitter) {
    // FRAME_END = LCL.
    e.address(LCL);
    e.assign(Dest::D, Comp::M);
    e.address(FRAME_END);
    e.assign(Dest::M, Comp::D);

    // Recover the return address before the stack below it is reclaimed.
    read_frame_slot(e, RETURN_ADDRESS_OFFSET);
    e.address(RETURN_ADDRESS);
    e.assign(Dest::M, Comp::D);

    // *ARG = pop(): the result lands in the caller's stack slot.
    e.pop_into(Dest::D);
    e.address(ARG);
    e.assign(Dest::A, Comp::M);
    e.assign(Dest::M, Comp::D);

    // SP = ARG + 1: reclaim the callee's stack and arguments in one step.
    e.address(ARG);
    e.assign(Dest::D, Comp::MPlusOne);
    e.address(SP);
    e.assign(Dest::M, Comp::D);

    for (pointer, offset) in SAVED_SEGMENTS {
        read_frame_slot(e, offset);
        e.address(pointer);
        e.assign(Dest::M, Comp::D);
    }

    e.address(RETURN_ADDRESS);
    e.assign(Dest::A, Comp::M);
    e.jump(Comp::Zero, Jump::Jmp);
}

/// D = *(FRAME_END - offset).
fn read_frame_slot(e: &mut AsmEmitter, offset: u16) {
    e.address(FRAME_END);
    e.assign(Dest::D, Comp::M);
    e.address_value(offset);
    e.assign(Dest::A, Comp::DMinusA);
    e.assign(Dest::D, Comp::M);
}

/// SP = 256, then call the program entry function with zero arguments.
fn compile_bootstrap(e: &mut AsmEmitter, labels: &mut LabelAllocator) -> Result<()> {
    e.address_value(STACK_BASE);
    e.assign(Dest::D, Comp::A);
    e.address(SP);
    e.assign(Dest::M, Comp::D);
    compile_call(e, labels, BOOTSTRAP_CALLER, ENTRY_FUNCTION, 0)
}

/// Deterministic landing point: a label with an unconditional self-jump.
fn compile_halt(e: &mut AsmEmitter) {
    e.label(HALT_LABEL);
    e.address(HALT_LABEL);
    e.jump(Comp::Zero, Jump::Jmp);
}

/// Accumulates assembly lines; the stack idioms below are the emission
/// primitives every higher-level rule is built from.
pub(super) struct AsmEmitter {
    lines: Vec<AsmInstruction>,
}

impl AsmEmitter {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn into_lines(self) -> Vec<AsmInstruction> {
        self.lines
    }

    pub fn address(&mut self, symbol: impl Into<String>) {
        self.lines.push(AsmInstruction::symbol(symbol));
    }

    pub fn address_value(&mut self, value: u16) {
        self.lines.push(AsmInstruction::value(value));
    }

    pub fn assign(&mut self, dest: Dest, comp: Comp) {
        self.lines.push(AsmInstruction::Compute {
            dest: Some(dest),
            comp,
            jump: None,
        });
    }

    pub fn jump(&mut self, comp: Comp, jump: Jump) {
        self.lines.push(AsmInstruction::Compute {
            dest: None,
            comp,
            jump: Some(jump),
        });
    }

    pub fn label(&mut self, name: impl Into<String>) {
        self.lines.push(AsmInstruction::Label(name.into()));
    }

    pub fn comment(&mut self, text: impl Into<String>) {
        self.lines.push(AsmInstruction::Comment(text.into()));
    }

    pub fn increment_sp(&mut self) {
        self.address(SP);
        self.assign(Dest::M, Comp::MPlusOne);
    }

    pub fn decrement_sp(&mut self) {
        self.address(SP);
        self.assign(Dest::M, Comp::MMinusOne);
    }

    /// Pop the top of stack into `dest`: SP--, then `dest = *SP`.
    pub fn pop_into(&mut self, dest: Dest) {
        self.decrement_sp();
        self.address(SP);
        self.assign(Dest::A, Comp::M);
        self.assign(dest, Comp::M);
    }

    /// Push the D register: `*SP = D`, then SP++.
    pub fn push_d(&mut self) {
        self.push_comp(Comp::D);
    }

    /// Push a computed value: `*SP = comp`, then SP++.
    pub fn push_comp(&mut self, comp: Comp) {
        self.address(SP);
        self.assign(Dest::A, Comp::M);
        self.assign(Dest::M, comp);
        self.increment_sp();
    }
}
