mod common;
use cabsi::lang::ErrorCode;
use cabsi::mach::Value;
use common::*;

#[test]
fn test_goto_into_gap_lands_on_next_line() {
    let (out, r) = exec("10 GOTO 20\n30 PUSH \"thirty\"\n40 PRINT\n50 EXIT\n");
    assert_eq!(out, "thirty\n");
    assert!(r.is_killed());
}

#[test]
fn test_goto_past_end_finishes_normally() {
    let (out, r) = exec("10 GOTO 60\n30 PUSH 1\n50 PRINT\n");
    assert_eq!(out, "");
    assert!(!r.is_killed());
    assert!(r.faults().is_empty());
}

#[test]
fn test_goto_without_target_finishes() {
    let (out, r) = exec("10 GOTO\n20 PUSH 1\n30 PRINT\n");
    assert_eq!(out, "");
    assert!(!r.is_killed());
}

#[test]
fn test_gosub_returns_past_caller() {
    let (out, r) = exec(
        r#"10 GOSUB 100
20 PUSH "WORLD"
30 PRINT
90 EXIT
100 PUSH "HELLO"
110 PRINT
120 RETURN
"#,
    );
    assert_eq!(out, "HELLO\nWORLD\n");
    assert!(r.call_stack().is_empty());
}

#[test]
fn test_nested_gosub() {
    let (out, _) = exec(
        "10 GOSUB 100\n20 EXIT\n\
         100 PUSH 1\n110 GOSUB 200\n120 PRINT\n130 RETURN\n\
         200 INC\n210 RETURN\n",
    );
    assert_eq!(out, "2\n");
}

#[test]
fn test_return_without_gosub() {
    let (out, r) = exec("10 RETURN\n20 PUSH 1\n30 PRINT\n");
    assert_eq!(out, "");
    assert!(r.is_killed());
    assert_eq!(r.faults()[0].code(), ErrorCode::ReturnWithoutGosub);
}

#[test]
fn test_unbounded_recursion_overflows() {
    let (_, r) = exec("10 GOSUB 10\n");
    assert!(r.is_killed());
    assert_eq!(r.faults()[0].code(), ErrorCode::StackOverflow);
}

#[test]
fn test_countdown_with_jp() {
    let (out, r) = exec(
        "10 PUSH 3\n20 DUP\n30 PRINT\n40 DEC\n50 JP 20\n60 PUSH \"done\"\n70 PRINT\n",
    );
    assert_eq!(out, "3\n2\n1\ndone\n");
    assert_eq!(r.stack(), &[Value::Integer(0)]);
}

#[test]
fn test_conditional_jumps_do_not_consume() {
    let cases = [
        ("JP", 1, true),
        ("JP", 0, false),
        ("JNP", 0, true),
        ("JNP", 1, false),
        ("JN", -1, true),
        ("JN", 0, false),
        ("JNN", 0, true),
        ("JNN", -1, false),
        ("JZ", 0, true),
        ("JZ", 2, false),
    ];
    for (mnemonic, top, fires) in cases.iter() {
        let src = format!(
            "10 PUSH {}\n20 {} 40\n30 PUSH \"fell\"\n40 PUSH \"end\"\n",
            top, mnemonic
        );
        let (_, r) = exec(&src);
        let expected_len = if *fires { 2 } else { 3 };
        assert_eq!(r.stack().len(), expected_len, "{} {}", mnemonic, top);
        assert_eq!(r.stack()[0], Value::Integer(*top as i64));
    }
}

#[test]
fn test_conditional_jump_on_text_never_fires() {
    let (_, r) = exec("10 PUSH \"0\"\n20 JZ 40\n30 PUSH 1\n40 SIZE\n");
    assert_eq!(r.stack().len(), 3);
}

#[test]
fn test_jnl_pops_null_only() {
    let (out, r) = exec("10 PUSH NULL\n20 JNL 40\n30 PUSH \"no\"\n40 PUSH \"yes\"\n50 PRINT\n");
    assert_eq!(out, "yes\n");
    assert!(r.stack().is_empty());

    let (out, r) = exec("10 PUSH 5\n20 JNL 40\n30 PUSH \"no\"\n40 EXIT\n");
    assert_eq!(out, "");
    assert_eq!(r.stack(), &[Value::Integer(5), Value::Text("no".into())]);
}

#[test]
fn test_jump_to_peeked_reference() {
    let (out, r) = exec("10 PUSH 50\n20 GOTO @1\n30 PUSH \"skipped\"\n40 PRINT\n50 PUSH \"here\"\n60 PRINT\n");
    assert_eq!(out, "here\n");
    assert_eq!(r.stack(), &[Value::Integer(50)]);
}

#[test]
fn test_jump_to_removed_reference() {
    let (_, r) = exec("10 PUSH 40, 1\n20 GOTO $2\n30 PUSH 99\n40 SIZE\n");
    assert_eq!(r.stack(), &[Value::Integer(1), Value::Integer(1)]);
}

#[test]
fn test_bad_reference_ends_program() {
    let (out, r) = exec("10 PUSH 1\n20 GOTO @5\n30 PRINT\n");
    assert_eq!(out, "");
    assert!(!r.is_killed());
    assert_eq!(r.stack(), &[Value::Integer(1)]);
}
