use std::str::FromStr;

use crate::error::Error;

/// One Hack VM instruction, immutable once parsed.
///
/// `Bootstrap` and `Halt` are synthesized by the translation driver and
/// never appear in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmInstruction {
    Arithmetic(ArithmeticOp),
    Push(Segment, u16),
    Pop(Segment, u16),
    Label(String),
    Goto(String),
    IfGoto(String),
    Function(String, u16),
    Call(String, u16),
    Return,
    Bootstrap,
    Halt,
}

/// Arithmetic and logical stack operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Neg,
    And,
    Or,
    Not,
    Eq,
    Gt,
    Lt,
}

impl FromStr for ArithmeticOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "sub" => Ok(Self::Sub),
            "neg" => Ok(Self::Neg),
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            "not" => Ok(Self::Not),
            "eq" => Ok(Self::Eq),
            "gt" => Ok(Self::Gt),
            "lt" => Ok(Self::Lt),
            other => Err(Error::UnknownOperation(other.to_string())),
        }
    }
}

/// Logical memory segments addressable by `push` and `pop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Constant,
    Local,
    Argument,
    This,
    That,
    Temp,
    Pointer,
    Static,
}

impl FromStr for Segment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constant" => Ok(Self::Constant),
            "local" => Ok(Self::Local),
            "argument" => Ok(Self::Argument),
            "this" => Ok(Self::This),
            "that" => Ok(Self::That),
            "temp" => Ok(Self::Temp),
            "pointer" => Ok(Self::Pointer),
            "static" => Ok(Self::Static),
            other => Err(Error::UnknownSegment(other.to_string())),
        }
    }
}
