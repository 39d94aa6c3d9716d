mod common;
use cabsi::lang::Opcode;
use cabsi::mach::{CancellationToken, FnSink, Runtime, StrSource, Value};
use common::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[test]
fn test_override_replaces_builtin() {
    let (mut r, out) = runtime("10 PUSH 2, 3\n20 ADD\n30 PRINT\n", "");
    r.set_handler(Opcode::Add, |r| {
        let (b, a) = (r.pop()?, r.pop()?);
        match (a, b) {
            (Value::Integer(a), Value::Integer(b)) => r.push(Value::Integer(a * 10 + b)),
            _ => r.push(Value::Null),
        }
    });
    r.run().unwrap();
    assert_eq!(out.contents(), "23\n");
}

#[test]
fn test_override_can_be_removed() {
    let (mut r, out) = runtime("10 PUSH 1\n20 PRINT\n", "");
    r.set_handler(Opcode::Print, |r| r.write("overridden\n"));
    assert!(r.remove_handler(Opcode::Print).is_some());
    r.run().unwrap();
    assert_eq!(out.contents(), "1\n");
}

#[test]
fn test_override_installed_during_run() {
    let (mut r, out) = runtime("10 PUSH 1\n20 PRINT\n30 PUSH 2\n40 PRINT\n", "");
    r.step().unwrap();
    r.step().unwrap();
    r.set_handler(Opcode::Print, |r| {
        let val = r.pop()?;
        r.write(&format!("<{}>\n", val))
    });
    r.run().unwrap();
    assert_eq!(out.contents(), "1\n<2>\n");
}

#[test]
fn test_override_sees_current_instruction() {
    let (mut r, _) = runtime("10 PUSH 1\n70 EXIT\n", "");
    let seen = Rc::new(RefCell::new(vec![]));
    let seen_moved = seen.clone();
    r.set_handler(Opcode::Exit, move |r| {
        if let Some(i) = r.instruction() {
            seen_moved.borrow_mut().push(i.line_number());
        }
        Ok(())
    });
    r.run().unwrap();
    assert_eq!(*seen.borrow(), vec![70]);
    assert!(!r.is_killed());
}

#[test]
fn test_cooperative_completion_is_not_kill() {
    let (mut r, out) = runtime("10 PUSH 2,3\n20 ADD\n30 PRINT\n", "");
    let token = CancellationToken::new();
    let killed = r.run_cooperatively(Duration::from_millis(1), &token).unwrap();
    assert!(!killed);
    assert_eq!(out.contents(), "5\n");
}

#[test]
fn test_cooperative_exit_is_kill() {
    let (mut r, _) = runtime("10 EXIT\n20 PUSH 1\n", "");
    let token = CancellationToken::new();
    assert!(r.run_cooperatively(Duration::from_millis(0), &token).unwrap());
    assert!(r.stack().is_empty());
}

#[test]
fn test_cancel_at_step_boundary() {
    let (mut r, _) = runtime("10 PUSH 1\n20 GOTO 10\n", "");
    let token = CancellationToken::new();
    let cancel = token.clone();
    r.set_handler(Opcode::Goto, move |r| {
        if r.stack().len() == 3 {
            cancel.cancel();
        }
        r.jump_to_line(10, true);
        Ok(())
    });
    let killed = r.run_cooperatively(Duration::from_millis(0), &token).unwrap();
    assert!(killed);
    assert_eq!(r.stack().len(), 3);
}

#[test]
fn test_cancel_from_another_thread() {
    let (mut r, _) = runtime("10 PUSH 1\n20 POP\n30 GOTO 10\n", "");
    let token = CancellationToken::new();
    let cancel = token.clone();
    let handle = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        cancel.cancel();
    });
    let killed = r.run_cooperatively(Duration::from_millis(1), &token).unwrap();
    handle.join().unwrap();
    assert!(killed);
}

#[test]
fn test_callback_sink() {
    let fragments = Rc::new(RefCell::new(vec![]));
    let moved = fragments.clone();
    let mut r = Runtime::from_source("10 PUSH \"a\", \"b\"\n20 PRINT\n30 PRINT\n")
        .with_source(StrSource::new(""))
        .with_sink(FnSink::new(move |s: &str| moved.borrow_mut().push(s.to_string())));
    r.run().unwrap();
    assert_eq!(*fragments.borrow(), vec!["b\n", "a\n"]);
}

#[test]
fn test_instances_are_independent() {
    let src = "10 GETW\n20 PRINT\n";
    let (mut a, out_a) = runtime(src, "left");
    let (mut b, out_b) = runtime(src, "right");
    a.step().unwrap();
    b.run().unwrap();
    a.run().unwrap();
    assert_eq!(out_a.contents(), "left\n");
    assert_eq!(out_b.contents(), "right\n");
}
