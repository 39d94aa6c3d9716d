use super::io::{Input, ReadSource, Sink, Source, WriteSink};
use super::{LineIndex, Stack, Value};
use crate::error;
use crate::lang::{tokenize, Error, ErrorCode, Instruction, LineNumber, Opcode, Program};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

mod dispatch;

type Result<T> = std::result::Result<T, Error>;

/// A per-instance opcode implementation, consulted before the built-in one.
pub type Handler = Rc<dyn Fn(&mut Runtime) -> Result<()>>;

/// Cancels a cooperative run at the next step boundary.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// ## Virtual machine
///
/// One runtime executes one program once. It owns its stacks and its
/// I/O handles; separate runtimes share nothing.

pub struct Runtime {
    program: Program,
    index: LineIndex,
    pc: usize,
    branched: bool,
    killed: bool,
    instruction: Option<Rc<Instruction>>,
    stack: Stack<Value>,
    registers: Stack<Value>,
    calls: Stack<LineNumber>,
    input: Input,
    output: Box<dyn Sink>,
    overrides: HashMap<Opcode, Handler>,
    faults: Vec<Error>,
}

impl Runtime {
    /// Bound to this process's stdin and stdout.
    pub fn new(program: Program) -> Runtime {
        let index = LineIndex::new(&program);
        Runtime {
            program,
            index,
            pc: 0,
            branched: false,
            killed: false,
            instruction: None,
            stack: Stack::new("OPERAND STACK FULL"),
            registers: Stack::new("REGISTER STACK FULL"),
            calls: Stack::new("TOO MANY GOSUBS"),
            input: Input::new(Box::new(ReadSource::stdin())),
            output: Box::new(WriteSink::stdout()),
            overrides: HashMap::new(),
            faults: vec![],
        }
    }

    pub fn from_source(source: &str) -> Runtime {
        Runtime::new(tokenize(source))
    }

    /// Run source text to completion on stdin and stdout. Returns
    /// whether the run was killed rather than falling off the end.
    pub fn interpret(source: &str) -> Result<bool> {
        let mut runtime = Runtime::from_source(source);
        runtime.run()?;
        Ok(runtime.is_killed())
    }

    pub fn with_source<S: Source + 'static>(mut self, source: S) -> Runtime {
        self.input = Input::new(Box::new(source));
        self
    }

    pub fn with_sink<S: Sink + 'static>(mut self, sink: S) -> Runtime {
        self.output = Box::new(sink);
        self
    }

    pub fn set_handler<F>(&mut self, opcode: Opcode, handler: F)
    where
        F: Fn(&mut Runtime) -> Result<()> + 'static,
    {
        self.overrides.insert(opcode, Rc::new(handler));
    }

    pub fn remove_handler(&mut self, opcode: Opcode) -> Option<Handler> {
        self.overrides.remove(&opcode)
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    /// The instruction being executed, or last executed.
    pub fn instruction(&self) -> Option<&Instruction> {
        self.instruction.as_deref()
    }

    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }

    pub fn registers(&self) -> &[Value] {
        self.registers.as_slice()
    }

    pub fn call_stack(&self) -> &[LineNumber] {
        self.calls.as_slice()
    }

    /// Faults that ended the run, in order.
    pub fn faults(&self) -> &[Error] {
        &self.faults
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    pub fn is_running(&self) -> bool {
        !self.killed && self.pc < self.program.len()
    }

    /// Stop for good. There is no resume.
    pub fn kill(&mut self) {
        self.killed = true;
        self.pc = self.program.len();
    }

    pub fn run(&mut self) -> Result<()> {
        while self.is_running() {
            self.step()?;
        }
        self.output.flush()?;
        debug!(killed = self.killed, "run finished");
        Ok(())
    }

    /// Run one step at a time, sleeping `delay` between steps and
    /// checking `cancel` before each one. Returns whether the run was
    /// killed, by cancellation, `EXIT` or a fault.
    pub fn run_cooperatively(
        &mut self,
        delay: Duration,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        loop {
            if cancel.is_cancelled() && !self.killed {
                debug!(pc = self.pc, "run cancelled");
                self.kill();
            }
            if !self.is_running() {
                break;
            }
            self.step()?;
            if !delay.is_zero() && self.is_running() {
                self.output.flush()?;
                std::thread::sleep(delay);
            }
        }
        self.output.flush()?;
        debug!(killed = self.killed, "run finished");
        Ok(self.killed)
    }

    /// Execute the instruction at the pointer and advance past it,
    /// unless it jumped.
    pub fn step(&mut self) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }
        let instruction = match self.program.get(self.pc) {
            Some(instruction) => Rc::clone(instruction),
            None => return Ok(()),
        };
        let line = instruction.line_number();
        let mnemonic = instruction.mnemonic();
        trace!(pc = self.pc, line, mnemonic, "step");
        self.instruction = Some(Rc::clone(&instruction));
        self.branched = false;

        let result = match instruction.opcode() {
            None => {
                warn!(line, mnemonic, "unimplemented instruction");
                Ok(())
            }
            Some(opcode) => match self.overrides.get(&opcode).cloned() {
                Some(handler) => handler(self),
                None => match dispatch::builtin(opcode) {
                    Some(builtin) => builtin(self),
                    None => {
                        warn!(line, mnemonic, "unimplemented instruction");
                        Ok(())
                    }
                },
            },
        };

        if let Err(error) = result {
            let error = match error.line_number() {
                Some(_) => error,
                None => error.in_line_number(line),
            };
            self.kill();
            if !error.is_fault() {
                return Err(error);
            }
            if error.code() != ErrorCode::StackUnderflow {
                tracing::error!(line, mnemonic, error = %error, "run aborted");
            }
            self.faults.push(error);
            return Ok(());
        }
        if !self.branched && !self.killed {
            self.pc += 1;
        }
        Ok(())
    }

    /// Move the pointer to `target`, or the first line after it. With
    /// `decrement` the automatic advance that ends the current step is
    /// cancelled, so the next fetch lands on the resolved line.
    pub fn jump_to_line(&mut self, target: i64, decrement: bool) {
        match self.index.resolve(target) {
            Some(position) => {
                self.pc = position;
                self.branched = decrement;
            }
            None => {
                warn!(line = target, "cannot jump to line");
                self.jump_to_end();
            }
        }
    }

    fn jump_to_end(&mut self) {
        self.pc = self.program.len();
        self.branched = true;
    }

    /// Resolve `@n` (peek) or `$n` (remove) against the operand stack,
    /// 1-indexed from the top. Other tokens come back unchanged as text.
    pub fn resolve_reference(&mut self, token: &str) -> Option<Value> {
        let token = token.trim();
        let depth = |s: &str| s.trim().parse::<usize>().ok();
        if let Some(rest) = token.strip_prefix('@') {
            return self.stack.peek(depth(rest)?).cloned();
        }
        if let Some(rest) = token.strip_prefix('$') {
            return self.stack.remove(depth(rest)?);
        }
        Some(Value::Text(token.to_string()))
    }

    pub fn push(&mut self, val: Value) -> Result<()> {
        self.stack.push(val)
    }

    pub fn pop(&mut self) -> Result<Value> {
        self.require(1)?;
        self.stack.pop()
    }

    /// Write program output.
    pub fn write(&mut self, s: &str) -> Result<()> {
        Ok(self.output.write_str(s)?)
    }

    /// Fail with a stack underflow unless the operand stack holds `n` entries.
    pub fn require(&self, n: usize) -> Result<()> {
        self.check_depth("OPERAND", self.stack.len(), n)
    }

    pub fn require_registers(&self, n: usize) -> Result<()> {
        self.check_depth("REGISTER", self.registers.len(), n)
    }

    fn check_depth(&self, which: &str, actual: usize, expected: usize) -> Result<()> {
        if actual >= expected {
            return Ok(());
        }
        let (mnemonic, line) = match &self.instruction {
            Some(i) => (i.mnemonic(), i.line_number()),
            None => ("", 0),
        };
        tracing::error!(
            opcode = mnemonic,
            line,
            expected,
            actual,
            stack = which,
            "stack underflow"
        );
        Err(error!(StackUnderflow, line; format!(
            "{} EXPECTED {} ENTRIES ON {} STACK, GOT {}",
            mnemonic, expected, which, actual
        )))
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("pc", &self.pc)
            .field("killed", &self.killed)
            .field("stack", &self.stack)
            .field("registers", &self.registers)
            .field("calls", &self.calls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::{Capture, StrSource};

    fn runtime(src: &str) -> (Runtime, Capture) {
        let capture = Capture::new();
        let r = Runtime::from_source(src)
            .with_source(StrSource::new(""))
            .with_sink(capture.clone());
        (r, capture)
    }

    #[test]
    fn test_reference_peek_and_remove() {
        let (mut r, _) = runtime("");
        for n in &[10, 20, 30] {
            r.push(Value::Integer(*n)).unwrap();
        }
        assert_eq!(r.resolve_reference("@2"), Some(Value::Integer(20)));
        assert_eq!(r.stack().len(), 3);
        assert_eq!(r.resolve_reference("$2"), Some(Value::Integer(20)));
        assert_eq!(r.stack(), &[Value::Integer(10), Value::Integer(30)]);
    }

    #[test]
    fn test_reference_out_of_range() {
        let (mut r, _) = runtime("");
        r.push(Value::Integer(1)).unwrap();
        assert_eq!(r.resolve_reference("@0"), None);
        assert_eq!(r.resolve_reference("@2"), None);
        assert_eq!(r.resolve_reference("$x"), None);
        assert_eq!(r.resolve_reference("40"), Some(Value::Text("40".into())));
        assert_eq!(r.stack().len(), 1);
    }

    #[test]
    fn test_step_advances_one() {
        let (mut r, _) = runtime("10 PUSH 1\n20 PUSH 2\n");
        r.step().unwrap();
        assert_eq!(r.pc(), 1);
        assert_eq!(r.instruction().unwrap().line_number(), 10);
        r.step().unwrap();
        assert!(!r.is_running());
        assert!(!r.is_killed());
        r.step().unwrap();
        assert_eq!(r.stack().len(), 2);
    }

    #[test]
    fn test_jump_without_decrement() {
        let (mut r, _) = runtime("10 PUSH 1\n20 PUSH 2\n30 PUSH 3\n");
        r.jump_to_line(15, false);
        assert_eq!(r.pc(), 1);
        r.jump_to_line(99, true);
        assert!(!r.is_running());
    }

    #[test]
    fn test_kill_is_final() {
        let (mut r, _) = runtime("10 PUSH 1\n");
        r.kill();
        r.run().unwrap();
        assert!(r.stack().is_empty());
        assert!(r.is_killed());
    }

    #[test]
    fn test_cancelled_before_start() {
        let (mut r, out) = runtime("10 PUSH 1\n20 PRINT\n");
        let token = CancellationToken::new();
        token.cancel();
        assert!(r.run_cooperatively(Duration::from_millis(0), &token).unwrap());
        assert_eq!(out.contents(), "");
    }
}
