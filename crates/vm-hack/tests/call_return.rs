//! The calling convention end to end: frame layout, argument passing,
//! caller state restoration, nesting, and recursion.

use vm_hack::test_harness::{run_program, translate_modules};
use vm_hack::{AsmInstruction, VmInstruction, parse_module};

#[test]
fn call_leaves_one_return_value() {
    let sources = [
        ("Main", "function Main.answer 0\npush constant 42\nreturn\n"),
        ("Sys", "function Sys.init 0\ncall Main.answer 0\n"),
    ];
    let machine = run_program(&sources);
    assert_eq!(machine.stack_top(), 42);
    // Bootstrap frame (5 words) plus the single return value.
    assert_eq!(machine.sp(), 262);
}

#[test]
fn arguments_reach_the_callee() {
    let sources = [
        (
            "Main",
            "function Main.diff 0\npush argument 0\npush argument 1\nsub\nreturn\n",
        ),
        (
            "Sys",
            "function Sys.init 0\npush constant 50\npush constant 8\ncall Main.diff 2\n",
        ),
    ];
    let machine = run_program(&sources);
    assert_eq!(machine.stack_top(), 42);
}

#[test]
fn locals_are_zero_initialized() {
    let sources = [
        (
            "Main",
            "function Main.sumLocals 3\npush local 0\npush local 1\nadd\npush local 2\nadd\nreturn\n",
        ),
        ("Sys", "function Sys.init 0\ncall Main.sumLocals 0\n"),
    ];
    let machine = run_program(&sources);
    assert_eq!(machine.stack_top(), 0);
}

#[test]
fn caller_locals_survive_a_call() {
    let sources = [
        (
            "Main",
            "function Main.clobber 2\npush constant 5\npop local 0\npush constant 6\npop local 1\npush constant 0\nreturn\n",
        ),
        (
            "Sys",
            "\
function Sys.init 1
push constant 99
pop local 0
call Main.clobber 0
pop temp 0
push local 0
",
        ),
    ];
    let machine = run_program(&sources);
    assert_eq!(machine.stack_top(), 99);
}

#[test]
fn this_and_that_are_restored() {
    let sources = [
        (
            "Main",
            "\
function Main.rebind 0
push constant 9000
pop pointer 0
push constant 9100
pop pointer 1
push constant 0
return
",
        ),
        (
            "Sys",
            "\
function Sys.init 0
push constant 3000
pop pointer 0
push constant 3010
pop pointer 1
call Main.rebind 0
pop temp 0
push pointer 0
push pointer 1
add
",
        ),
    ];
    let machine = run_program(&sources);
    assert_eq!(machine.stack_top(), 6010);
}

#[test]
fn nested_calls() {
    let sources = [
        (
            "Main",
            "\
function Main.outer 0
push argument 0
call Main.inner 1
push constant 1
add
return
function Main.inner 0
push argument 0
push argument 0
add
return
",
        ),
        (
            "Sys",
            "function Sys.init 0\npush constant 20\ncall Main.outer 1\n",
        ),
    ];
    let machine = run_program(&sources);
    assert_eq!(machine.stack_top(), 41);
}

#[test]
fn recursion() {
    // sum(n) = n + sum(n - 1), sum(0) = 0.
    let sources = [
        (
            "Main",
            "\
function Main.sum 0
push argument 0
if-goto RECURSE
push constant 0
return
label RECURSE
push argument 0
push argument 0
push constant 1
sub
call Main.sum 1
add
return
",
        ),
        (
            "Sys",
            "function Sys.init 0\npush constant 10\ncall Main.sum 1\n",
        ),
    ];
    let machine = run_program(&sources);
    assert_eq!(machine.stack_top(), 55);
}

#[test]
fn return_value_replaces_the_arguments() {
    // Two arguments in, one value out: SP ends one above where the first
    // argument was pushed.
    let sources = [
        ("Main", "function Main.second 0\npush argument 1\nreturn\n"),
        (
            "Sys",
            "function Sys.init 0\npush constant 7\npush constant 8\ncall Main.second 2\n",
        ),
    ];
    let machine = run_program(&sources);
    assert_eq!(machine.stack_top(), 8);
    assert_eq!(machine.sp(), 262);
}

#[test]
fn repeated_call_sites_get_distinct_return_labels() {
    let module = parse_module(
        "Main",
        "function Main.main 0\ncall Main.f 0\ncall Main.f 0\nreturn\nfunction Main.f 0\npush constant 0\nreturn\n",
    )
    .unwrap();
    let other = parse_module("Sys", "function Sys.init 0\nreturn\n").unwrap();
    let lines = vm_hack::translate(&[module, other]).unwrap();
    let return_labels: Vec<_> = lines
        .iter()
        .filter_map(|l| match l {
            AsmInstruction::Label(name) if name.contains("$ret.") => Some(name.clone()),
            _ => None,
        })
        .collect();
    // Two sites in Main.main plus the bootstrap call.
    assert_eq!(return_labels.len(), 3);
    let unique: std::collections::HashSet<_> = return_labels.iter().collect();
    assert_eq!(unique.len(), 3);
    assert!(return_labels.contains(&"Bootstrap$ret.0".to_string()));
    assert!(return_labels.contains(&"Main.main$ret.1".to_string()));
    assert!(return_labels.contains(&"Main.main$ret.2".to_string()));
}

#[test]
fn every_translated_instruction_carries_its_source_line() {
    let module = parse_module("Main", "push constant 1\npush constant 2\nadd\n").unwrap();
    let lines = vm_hack::translate(std::slice::from_ref(&module)).unwrap();
    let comments: Vec<_> = lines
        .iter()
        .filter_map(|l| match l {
            AsmInstruction::Comment(text) => Some(text.as_str()),
            _ => None,
        })
        .collect();
    let expected: Vec<String> = module
        .instructions
        .iter()
        .map(ToString::to_string)
        .chain([VmInstruction::Halt.to_string()])
        .collect();
    assert_eq!(comments, expected);
}

#[test]
fn deep_call_chain_unwinds_cleanly() {
    // Each level adds one; twenty frames deep and all the way back.
    let sources = [
        (
            "Main",
            "\
function Main.depth 0
push argument 0
push constant 20
lt
if-goto DEEPER
push argument 0
return
label DEEPER
push argument 0
push constant 1
add
call Main.depth 1
return
",
        ),
        (
            "Sys",
            "function Sys.init 0\npush constant 0\ncall Main.depth 1\n",
        ),
    ];
    let machine = run_program(&sources);
    assert_eq!(machine.stack_top(), 20);
}

#[test]
fn function_entry_is_a_plain_label() {
    let lines = translate_modules(&[
        ("Main", "function Main.f 0\nreturn\n"),
        ("Sys", "function Sys.init 0\nreturn\n"),
    ]);
    assert!(
        lines
            .iter()
            .any(|l| matches!(l, AsmInstruction::Label(name) if name == "Main.f"))
    );
}
