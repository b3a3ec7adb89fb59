//! Test harness for vm-hack unit and integration tests.
//!
//! Provides a small Hack machine emulator that executes the symbolic
//! assembly produced by [`crate::translate`], so tests can assert on the
//! observable machine state (RAM, the stack) instead of on instruction
//! text. Only available when running tests or when the `test-harness`
//! feature is enabled.
//!
//! # Example
//!
//! ```rust
//! use vm_hack::test_harness::run_single_module;
//!
//! let machine = run_single_module("push constant 2\npush constant 3\nadd\n");
//! assert_eq!(machine.stack_top(), 5);
//! ```

#![allow(
    clippy::must_use_candidate,
    clippy::missing_panics_doc,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use std::collections::HashMap;

use crate::hack::{Address, AsmInstruction, Comp, Dest, HALT_LABEL, Jump};
use crate::translate::translate;
use crate::vm::parse_module;

const RAM_WORDS: usize = 32_768;
const FIRST_VARIABLE_ADDRESS: i16 = 16;
const STEP_BUDGET: usize = 1_000_000;

/// Parse and translate the given `(module name, source)` pairs.
pub fn translate_modules(sources: &[(&str, &str)]) -> Vec<AsmInstruction> {
    let modules: Vec<_> = sources
        .iter()
        .map(|(name, source)| parse_module(name, source).expect("source must parse"))
        .collect();
    translate(&modules).expect("translation must succeed")
}

/// Translate a single module and run it to the halt loop.
///
/// Single-module programs get no bootstrap, so the stack pointer is seeded
/// to 256 before execution.
pub fn run_single_module(source: &str) -> HackMachine {
    let mut machine = HackMachine::load(&translate_modules(&[("Test", source)]));
    machine.set_ram(0, 256);
    machine.run();
    machine
}

/// Translate a multi-module program and run it to the halt loop. The
/// bootstrap preamble initializes the stack pointer and calls `Sys.init`.
pub fn run_program(sources: &[(&str, &str)]) -> HackMachine {
    let mut machine = HackMachine::load(&translate_modules(sources));
    machine.run();
    machine
}

/// An executable Hack machine image: resolved instructions plus 32K of RAM.
pub struct HackMachine {
    instructions: Vec<Resolved>,
    halt_pc: Option<usize>,
    ram: Vec<i16>,
    a: i16,
    d: i16,
    pc: usize,
}

/// One executable instruction after symbol resolution. Labels and comments
/// occupy no slots.
#[derive(Debug, Clone, Copy)]
enum Resolved {
    Load(i16),
    Compute {
        dest: Option<Dest>,
        comp: Comp,
        jump: Option<Jump>,
    },
}

impl HackMachine {
    /// Assemble the symbolic program into an executable image.
    ///
    /// Resolution is two-pass: labels map to the index of the following
    /// instruction, predefined register names map to their RAM addresses,
    /// and any remaining symbol is allocated a fresh RAM variable slot
    /// starting at address 16.
    pub fn load(program: &[AsmInstruction]) -> Self {
        let mut labels: HashMap<&str, i16> = HashMap::new();
        let mut index = 0i16;
        for line in program {
            match line {
                AsmInstruction::Label(name) => {
                    labels.insert(name, index);
                }
                AsmInstruction::Comment(_) => {}
                _ => index += 1,
            }
        }

        let mut symbols = predefined_symbols();
        let mut next_variable = FIRST_VARIABLE_ADDRESS;
        let mut instructions = Vec::new();
        for line in program {
            match line {
                AsmInstruction::Label(_) | AsmInstruction::Comment(_) => {}
                AsmInstruction::Address(Address::Value(value)) => {
                    instructions.push(Resolved::Load(*value as i16));
                }
                AsmInstruction::Address(Address::Symbol(name)) => {
                    let value = if let Some(target) = labels.get(name.as_str()) {
                        *target
                    } else {
                        *symbols.entry(name.clone()).or_insert_with(|| {
                            let address = next_variable;
                            next_variable += 1;
                            address
                        })
                    };
                    instructions.push(Resolved::Load(value));
                }
                AsmInstruction::Compute { dest, comp, jump } => {
                    instructions.push(Resolved::Compute {
                        dest: *dest,
                        comp: *comp,
                        jump: *jump,
                    });
                }
            }
        }

        Self {
            instructions,
            halt_pc: labels.get(HALT_LABEL).map(|pc| *pc as usize),
            ram: vec![0; RAM_WORDS],
            a: 0,
            d: 0,
            pc: 0,
        }
    }

    pub fn set_ram(&mut self, address: usize, value: i16) {
        self.ram[address] = value;
    }

    pub fn ram(&self, address: usize) -> i16 {
        self.ram[address]
    }

    /// The stack pointer (RAM[0]).
    pub fn sp(&self) -> i16 {
        self.ram[0]
    }

    /// The topmost stack value.
    pub fn stack_top(&self) -> i16 {
        self.ram[(self.sp() - 1) as usize]
    }

    /// Execute until the halt loop is reached, panicking if the program
    /// runs away instead of terminating.
    pub fn run(&mut self) {
        for _ in 0..STEP_BUDGET {
            if Some(self.pc) == self.halt_pc || self.pc >= self.instructions.len() {
                return;
            }
            self.step();
        }
        panic!("program did not reach the halt loop within {STEP_BUDGET} steps");
    }

    fn step(&mut self) {
        match self.instructions[self.pc] {
            Resolved::Load(value) => {
                self.a = value;
                self.pc += 1;
            }
            Resolved::Compute { dest, comp, jump } => {
                let address = (self.a as u16 as usize) % RAM_WORDS;
                let value = eval(comp, self.d, self.a, self.ram[address]);
                if let Some(dest) = dest {
                    if dest.writes_m() {
                        self.ram[address] = value;
                    }
                    if dest.writes_a() {
                        self.a = value;
                    }
                    if dest.writes_d() {
                        self.d = value;
                    }
                }
                match jump {
                    Some(jump) if jump.taken(value) => self.pc = self.a as u16 as usize,
                    _ => self.pc += 1,
                }
            }
        }
    }
}

/// The Hack ALU, on wrapping 16-bit two's complement words.
fn eval(comp: Comp, d: i16, a: i16, m: i16) -> i16 {
    match comp {
        Comp::Zero => 0,
        Comp::One => 1,
        Comp::NegOne => -1,
        Comp::D => d,
        Comp::A => a,
        Comp::M => m,
        Comp::NotD => !d,
        Comp::NotA => !a,
        Comp::NotM => !m,
        Comp::NegD => d.wrapping_neg(),
        Comp::NegA => a.wrapping_neg(),
        Comp::NegM => m.wrapping_neg(),
        Comp::DPlusOne => d.wrapping_add(1),
        Comp::APlusOne => a.wrapping_add(1),
        Comp::MPlusOne => m.wrapping_add(1),
        Comp::DMinusOne => d.wrapping_sub(1),
        Comp::AMinusOne => a.wrapping_sub(1),
        Comp::MMinusOne => m.wrapping_sub(1),
        Comp::DPlusA => d.wrapping_add(a),
        Comp::DPlusM => d.wrapping_add(m),
        Comp::DMinusA => d.wrapping_sub(a),
        Comp::DMinusM => d.wrapping_sub(m),
        Comp::AMinusD => a.wrapping_sub(d),
        Comp::MMinusD => m.wrapping_sub(d),
        Comp::DAndA => d & a,
        Comp::DAndM => d & m,
        Comp::DOrA => d | a,
        Comp::DOrM => d | m,
    }
}

fn predefined_symbols() -> HashMap<String, i16> {
    let mut symbols = HashMap::new();
    for (name, address) in [
        ("SP", 0),
        ("LCL", 1),
        ("ARG", 2),
        ("THIS", 3),
        ("THAT", 4),
        ("SCREEN", 16_384),
        ("KBD", 24_576),
    ] {
        symbols.insert(name.to_string(), address);
    }
    for register in 0..16 {
        symbols.insert(format!("R{register}"), register);
    }
    symbols
}
