use std::fmt;

use super::{Address, AsmInstruction, Comp, Dest, Jump};

impl fmt::Display for AsmInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmInstruction::Address(address) => write!(f, "@{address}"),
            AsmInstruction::Compute { dest, comp, jump } => {
                if let Some(dest) = dest {
                    write!(f, "{dest}=")?;
                }
                write!(f, "{comp}")?;
                if let Some(jump) = jump {
                    write!(f, ";{jump}")?;
                }
                Ok(())
            }
            AsmInstruction::Label(name) => write!(f, "({name})"),
            AsmInstruction::Comment(text) => write!(f, "// {text}"),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Value(value) => write!(f, "{value}"),
            Address::Symbol(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Dest::M => "M",
            Dest::D => "D",
            Dest::MD => "MD",
            Dest::A => "A",
            Dest::AM => "AM",
            Dest::AD => "AD",
            Dest::AMD => "AMD",
        };
        write!(f, "{text}")
    }
}

impl fmt::Display for Comp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Comp::Zero => "0",
            Comp::One => "1",
            Comp::NegOne => "-1",
            Comp::D => "D",
            Comp::A => "A",
            Comp::NotD => "!D",
            Comp::NotA => "!A",
            Comp::NegD => "-D",
            Comp::NegA => "-A",
            Comp::DPlusOne => "D+1",
            Comp::APlusOne => "A+1",
            Comp::DMinusOne => "D-1",
            Comp::AMinusOne => "A-1",
            Comp::DPlusA => "D+A",
            Comp::DMinusA => "D-A",
            Comp::AMinusD => "A-D",
            Comp::DAndA => "D&A",
            Comp::DOrA => "D|A",
            Comp::M => "M",
            Comp::NotM => "!M",
            Comp::NegM => "-M",
            Comp::MPlusOne => "M+1",
            Comp::MMinusOne => "M-1",
            Comp::DPlusM => "D+M",
            Comp::DMinusM => "D-M",
            Comp::MMinusD => "M-D",
            Comp::DAndM => "D&M",
            Comp::DOrM => "D|M",
        };
        write!(f, "{text}")
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Jump::Jgt => "JGT",
            Jump::Jeq => "JEQ",
            Jump::Jge => "JGE",
            Jump::Jlt => "JLT",
            Jump::Jne => "JNE",
            Jump::Jle => "JLE",
            Jump::Jmp => "JMP",
        };
        write!(f, "{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_lines() {
        assert_eq!(AsmInstruction::value(256).to_string(), "@256");
        assert_eq!(AsmInstruction::symbol("SP").to_string(), "@SP");
        assert_eq!(AsmInstruction::symbol("Main.2").to_string(), "@Main.2");
    }

    #[test]
    fn compute_lines() {
        let line = AsmInstruction::Compute {
            dest: Some(Dest::M),
            comp: Comp::MMinusOne,
            jump: None,
        };
        assert_eq!(line.to_string(), "M=M-1");

        let line = AsmInstruction::Compute {
            dest: None,
            comp: Comp::D,
            jump: Some(Jump::Jne),
        };
        assert_eq!(line.to_string(), "D;JNE");

        let line = AsmInstruction::Compute {
            dest: Some(Dest::AMD),
            comp: Comp::DPlusA,
            jump: Some(Jump::Jmp),
        };
        assert_eq!(line.to_string(), "AMD=D+A;JMP");
    }

    #[test]
    fn label_and_comment_lines() {
        assert_eq!(
            AsmInstruction::Label("Main.loop$TOP".into()).to_string(),
            "(Main.loop$TOP)"
        );
        assert_eq!(
            AsmInstruction::Comment("push constant 7".into()).to_string(),
            "// push constant 7"
        );
    }

    #[test]
    fn jump_conditions() {
        assert!(Jump::Jgt.taken(1));
        assert!(!Jump::Jgt.taken(0));
        assert!(Jump::Jeq.taken(0));
        assert!(!Jump::Jeq.taken(-1));
        assert!(Jump::Jlt.taken(-1));
        assert!(!Jump::Jlt.taken(0));
        assert!(Jump::Jne.taken(-5));
        assert!(!Jump::Jne.taken(0));
        assert!(Jump::Jmp.taken(0));
    }
}
