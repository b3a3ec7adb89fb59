/// One line of symbolic Hack assembly.
///
/// Lines are produced by the instruction compiler and never mutated;
/// ownership moves straight into the output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmInstruction {
    /// `@value` or `@symbol` — loads the A register.
    Address(Address),
    /// `dest=comp;jump` with the dest and jump clauses optional.
    Compute {
        dest: Option<Dest>,
        comp: Comp,
        jump: Option<Jump>,
    },
    /// `(name)` — declares a label at the next instruction's address.
    Label(String),
    /// `// text` — stripped by the assembler, kept for readability.
    Comment(String),
}

impl AsmInstruction {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Address(Address::Symbol(name.into()))
    }

    #[must_use]
    pub const fn value(value: u16) -> Self {
        Self::Address(Address::Value(value))
    }
}

/// Target of an `@` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// Numeric constant for an `@` instruction. The code generator only
    /// emits values in the 15-bit range, 0..=32767.
    Value(u16),
    /// Symbolic name resolved by the assembler (label, base pointer, or
    /// an assembler-allocated variable).
    Symbol(String),
}

/// Destination clause of a C-instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dest {
    M,
    D,
    MD,
    A,
    AM,
    AD,
    AMD,
}

impl Dest {
    #[must_use]
    pub const fn writes_a(self) -> bool {
        matches!(self, Self::A | Self::AM | Self::AD | Self::AMD)
    }

    #[must_use]
    pub const fn writes_d(self) -> bool {
        matches!(self, Self::D | Self::MD | Self::AD | Self::AMD)
    }

    #[must_use]
    pub const fn writes_m(self) -> bool {
        matches!(self, Self::M | Self::MD | Self::AM | Self::AMD)
    }
}

/// Computation clause of a C-instruction: the full set the Hack ALU offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comp {
    Zero,
    One,
    NegOne,
    D,
    A,
    NotD,
    NotA,
    NegD,
    NegA,
    DPlusOne,
    APlusOne,
    DMinusOne,
    AMinusOne,
    DPlusA,
    DMinusA,
    AMinusD,
    DAndA,
    DOrA,
    M,
    NotM,
    NegM,
    MPlusOne,
    MMinusOne,
    DPlusM,
    DMinusM,
    MMinusD,
    DAndM,
    DOrM,
}

/// Jump clause of a C-instruction; the condition applies to the computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    Jgt,
    Jeq,
    Jge,
    Jlt,
    Jne,
    Jle,
    Jmp,
}

impl Jump {
    /// Whether the jump is taken for the given computation result.
    #[must_use]
    pub const fn taken(self, value: i16) -> bool {
        match self {
            Self::Jgt => value > 0,
            Self::Jeq => value == 0,
            Self::Jge => value >= 0,
            Self::Jlt => value < 0,
            Self::Jne => value != 0,
            Self::Jle => value <= 0,
            Self::Jmp => true,
        }
    }
}
