//! Branching behavior: label scoping, goto, and the popping semantics of
//! if-goto.

use vm_hack::test_harness::{run_program, run_single_module};

#[test]
fn goto_skips_straight_line_code() {
    let machine = run_single_module(
        "push constant 1\ngoto SKIP\npush constant 99\nlabel SKIP\npush constant 2\nadd\n",
    );
    assert_eq!(machine.stack_top(), 3);
    assert_eq!(machine.sp(), 257);
}

#[test]
fn if_goto_pops_its_condition() {
    // The false condition is consumed either way.
    let machine = run_single_module("push constant 0\nif-goto NEVER\npush constant 1\nlabel NEVER\n");
    assert_eq!(machine.sp(), 257);
    assert_eq!(machine.stack_top(), 1);
}

#[test]
fn if_goto_branches_on_any_nonzero_value() {
    let taken = run_single_module(
        "push constant 5\nneg\nif-goto TAKEN\npush constant 0\ngoto END\nlabel TAKEN\npush constant 1\nlabel END\n",
    );
    assert_eq!(taken.stack_top(), 1);

    let not_taken = run_single_module(
        "push constant 0\nif-goto TAKEN\npush constant 0\ngoto END\nlabel TAKEN\npush constant 1\nlabel END\n",
    );
    assert_eq!(not_taken.stack_top(), 0);
}

#[test]
fn counted_loop_accumulates() {
    // sum = 5 + 4 + 3 + 2 + 1 using statics for the accumulator and counter.
    let source = "\
push constant 0
pop static 0
push constant 5
pop static 1
label LOOP
push static 1
if-goto BODY
goto END
label BODY
push static 0
push static 1
add
pop static 0
push static 1
push constant 1
sub
pop static 1
goto LOOP
label END
push static 0
";
    let machine = run_single_module(source);
    assert_eq!(machine.stack_top(), 15);
}

#[test]
fn same_label_in_two_functions() {
    // Both functions declare END; each goto must bind to its own.
    let sources = [
        (
            "Main",
            "\
function Main.first 0
goto END
label END
push constant 10
return
function Main.second 0
goto END
label END
push constant 20
return
",
        ),
        (
            "Sys",
            "function Sys.init 0\ncall Main.first 0\ncall Main.second 0\nadd\n",
        ),
    ];
    let machine = run_program(&sources);
    assert_eq!(machine.stack_top(), 30);
}

#[test]
fn backward_and_forward_jumps_mix() {
    // Countdown loop with an early exit through a forward jump.
    let source = "\
push constant 3
pop static 0
label AGAIN
push static 0
push constant 0
eq
if-goto DONE
push static 0
push constant 1
sub
pop static 0
goto AGAIN
label DONE
push constant 1
";
    let machine = run_single_module(source);
    assert_eq!(machine.stack_top(), 1);
    assert_eq!(machine.ram(16), 0);
}
