use std::fmt;

use super::{ArithmeticOp, Segment, VmInstruction};

impl fmt::Display for VmInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmInstruction::Arithmetic(op) => write!(f, "{op}"),
            VmInstruction::Push(segment, index) => write!(f, "push {segment} {index}"),
            VmInstruction::Pop(segment, index) => write!(f, "pop {segment} {index}"),
            VmInstruction::Label(name) => write!(f, "label {name}"),
            VmInstruction::Goto(name) => write!(f, "goto {name}"),
            VmInstruction::IfGoto(name) => write!(f, "if-goto {name}"),
            VmInstruction::Function(name, locals) => write!(f, "function {name} {locals}"),
            VmInstruction::Call(name, args) => write!(f, "call {name} {args}"),
            VmInstruction::Return => write!(f, "return"),
            VmInstruction::Bootstrap => write!(f, "bootstrap"),
            VmInstruction::Halt => write!(f, "halt"),
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Neg => "neg",
            ArithmeticOp::And => "and",
            ArithmeticOp::Or => "or",
            ArithmeticOp::Not => "not",
            ArithmeticOp::Eq => "eq",
            ArithmeticOp::Gt => "gt",
            ArithmeticOp::Lt => "lt",
        };
        write!(f, "{text}")
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Segment::Constant => "constant",
            Segment::Local => "local",
            Segment::Argument => "argument",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Temp => "temp",
            Segment::Pointer => "pointer",
            Segment::Static => "static",
        };
        write!(f, "{text}")
    }
}
