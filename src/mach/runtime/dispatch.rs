use super::{Result, Runtime};
use crate::error;
use crate::lang::Opcode;
use crate::mach::{parse_literal, Operation, Value};
use tracing::{info, warn};

pub(super) type Builtin = fn(&mut Runtime) -> Result<()>;

/// The default handler for every opcode.
pub(super) fn builtin(opcode: Opcode) -> Option<Builtin> {
    use Opcode::*;
    let f: Builtin = match opcode {
        Push => Runtime::op_push,
        Input => Runtime::op_input,
        Getc => Runtime::op_getc,
        Getl => Runtime::op_getl,
        Getw => Runtime::op_getw,

        Rot => Runtime::op_rot,
        Dup => Runtime::op_dup,
        Pop => Runtime::op_pop,
        Swap => Runtime::op_swap,
        Over => Runtime::op_over,
        Yeet => Runtime::op_yeet,
        Yoink => Runtime::op_yoink,
        Size => Runtime::op_size,
        Rsize => Runtime::op_rsize,

        Goto => Runtime::op_goto,
        Jp => |r| r.jump_if(|n| n > 0.0),
        Jnp => |r| r.jump_if(|n| n <= 0.0),
        Jn => |r| r.jump_if(|n| n < 0.0),
        Jnn => |r| r.jump_if(|n| n >= 0.0),
        Jz => |r| r.jump_if(|n| n == 0.0),
        Jnl => Runtime::op_jnl,
        Gosub => Runtime::op_gosub,
        Return => Runtime::op_return,

        Inc => |r| r.unary(Operation::increment),
        Dec => |r| r.unary(Operation::decrement),
        Add => |r| r.binary(Operation::add),
        Sub => |r| r.binary(Operation::subtract),
        Mul => |r| r.binary(Operation::multiply),
        Div => |r| r.binary(Operation::divide),
        Mod => |r| r.binary(Operation::modulus),
        Divmod => Runtime::op_divmod,

        Makei => |r| r.unary(|v| Ok(Operation::make_int(v))),
        Makef => |r| r.unary(|v| Ok(Operation::make_float(v))),
        Makes => |r| r.unary(|v| Ok(Operation::make_string(v))),
        Ord => |r| r.unary(|v| Ok(Operation::ord(v))),
        Chr => |r| r.unary(|v| Ok(Operation::chr(v))),

        Eq => |r| r.binary(|l, rhs| Ok(Operation::equal(&l, &rhs))),
        Less => |r| r.binary(|l, rhs| Operation::less(&l, &rhs)),
        More => |r| r.binary(|l, rhs| Operation::more(&l, &rhs)),
        Lesseq => |r| r.binary(|l, rhs| Operation::less_equal(&l, &rhs)),
        Moreeq => |r| r.binary(|l, rhs| Operation::more_equal(&l, &rhs)),

        Debug => Runtime::op_debug,
        Exit => Runtime::op_exit,
        Print => Runtime::op_print,
    };
    Some(f)
}

impl Runtime {
    fn param(&self, index: usize) -> Option<String> {
        self.instruction
            .as_ref()
            .and_then(|i| i.param(index))
            .map(|s| s.to_string())
    }

    /// Replace the top value. Nothing changes if `f` fails.
    fn unary<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn(Value) -> Result<Value>,
    {
        self.require(1)?;
        let val = match self.stack.last() {
            Some(val) => val.clone(),
            None => return Err(error!(InternalError)),
        };
        let result = f(val)?;
        self.stack.pop()?;
        self.push(result)
    }

    /// Replace the top two values, older one on the left. Nothing
    /// changes if `f` fails.
    fn binary<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn(Value, Value) -> Result<Value>,
    {
        self.require(2)?;
        let (lhs, rhs) = match (self.stack.peek(2), self.stack.peek(1)) {
            (Some(lhs), Some(rhs)) => (lhs.clone(), rhs.clone()),
            _ => return Err(error!(InternalError)),
        };
        let result = f(lhs, rhs)?;
        self.stack.pop_2()?;
        self.push(result)
    }

    fn jump_target(&mut self) -> Option<i64> {
        let param = self.param(0)?;
        self.resolve_reference(&param)?.as_line_number()
    }

    /// Jump to the target in the first parameter. A target that cannot
    /// be worked out ends the program.
    fn jump(&mut self) {
        match self.jump_target() {
            Some(target) => self.jump_to_line(target, true),
            None => {
                warn!(param = ?self.param(0), "cannot jump to line");
                self.jump_to_end();
            }
        }
    }

    /// Peek at the top value and jump if it is a number passing `test`.
    fn jump_if<F>(&mut self, test: F) -> Result<()>
    where
        F: Fn(f64) -> bool,
    {
        self.require(1)?;
        let fire = match self.stack.last().and_then(|v| v.as_f64()) {
            Some(n) => test(n),
            None => false,
        };
        if fire {
            self.jump();
        }
        Ok(())
    }

    fn flush_output(&mut self) -> Result<()> {
        Ok(self.output.flush()?)
    }

    fn op_push(&mut self) -> Result<()> {
        let instruction = match &self.instruction {
            Some(i) => i.clone(),
            None => return Err(error!(InternalError)),
        };
        let vals = instruction
            .params()
            .iter()
            .map(|param| parse_literal(param))
            .collect::<Result<Vec<Value>>>()?;
        self.stack.push_all(vals)
    }

    fn op_input(&mut self) -> Result<()> {
        self.require(1)?;
        let prompt = self.stack.pop()?;
        self.flush_output()?;
        self.input.prompt(&prompt.to_string())?;
        let val = match self.input.read_line()? {
            Some(line) => parse_literal(&line)?,
            None => Value::Null,
        };
        self.push(val)
    }

    fn op_getc(&mut self) -> Result<()> {
        self.flush_output()?;
        let val = match self.input.read_char()? {
            Some(ch) => Value::Text(ch.to_string()),
            None => Value::Null,
        };
        self.push(val)
    }

    fn op_getl(&mut self) -> Result<()> {
        self.flush_output()?;
        let val = match self.input.read_line()? {
            Some(line) => Value::Text(line),
            None => Value::Null,
        };
        self.push(val)
    }

    fn op_getw(&mut self) -> Result<()> {
        self.flush_output()?;
        let val = match self.input.read_word()? {
            Some(word) => Value::Text(word),
            None => Value::Null,
        };
        self.push(val)
    }

    fn op_rot(&mut self) -> Result<()> {
        self.require(3)?;
        let mut abc = self.stack.pop_n(3)?;
        abc.rotate_left(1);
        for val in abc {
            self.push(val)?;
        }
        Ok(())
    }

    fn op_dup(&mut self) -> Result<()> {
        self.require(1)?;
        let val = self.stack.peek(1).cloned().unwrap_or(Value::Null);
        self.push(val)
    }

    fn op_pop(&mut self) -> Result<()> {
        self.pop()?;
        Ok(())
    }

    fn op_swap(&mut self) -> Result<()> {
        self.require(2)?;
        let (a, b) = self.stack.pop_2()?;
        self.push(b)?;
        self.push(a)
    }

    fn op_over(&mut self) -> Result<()> {
        self.require(2)?;
        let val = self.stack.peek(2).cloned().unwrap_or(Value::Null);
        self.push(val)
    }

    fn op_yeet(&mut self) -> Result<()> {
        self.require(1)?;
        let val = self.stack.peek(1).cloned().unwrap_or(Value::Null);
        self.registers.push(val)?;
        self.stack.pop()?;
        Ok(())
    }

    fn op_yoink(&mut self) -> Result<()> {
        self.require_registers(1)?;
        let val = self.registers.peek(1).cloned().unwrap_or(Value::Null);
        self.push(val)?;
        self.registers.pop()?;
        Ok(())
    }

    fn op_size(&mut self) -> Result<()> {
        let len = self.stack.len() as i64;
        self.push(Value::Integer(len))
    }

    fn op_rsize(&mut self) -> Result<()> {
        let len = self.registers.len() as i64;
        self.push(Value::Integer(len))
    }

    fn op_goto(&mut self) -> Result<()> {
        self.jump();
        Ok(())
    }

    fn op_jnl(&mut self) -> Result<()> {
        self.require(1)?;
        if self.stack.last().map_or(false, |v| v.is_null()) {
            self.stack.pop()?;
            self.jump();
        }
        Ok(())
    }

    fn op_gosub(&mut self) -> Result<()> {
        let line = match &self.instruction {
            Some(i) => i.line_number(),
            None => return Err(error!(InternalError)),
        };
        self.calls.push(line)?;
        self.jump();
        Ok(())
    }

    fn op_return(&mut self) -> Result<()> {
        let line = match self.calls.pop() {
            Ok(line) => line,
            Err(_) => return Err(error!(ReturnWithoutGosub)),
        };
        self.jump_to_line(i64::from(line) + 1, true);
        Ok(())
    }

    fn op_divmod(&mut self) -> Result<()> {
        self.require(2)?;
        let (lhs, rhs) = match (self.stack.peek(2), self.stack.peek(1)) {
            (Some(lhs), Some(rhs)) => (lhs.clone(), rhs.clone()),
            _ => return Err(error!(InternalError)),
        };
        let quotient = Operation::divide(lhs.clone(), rhs.clone())?;
        let remainder = Operation::modulus(lhs, rhs)?;
        self.stack.pop_2()?;
        self.push(quotient)?;
        self.push(remainder)
    }

    fn op_debug(&mut self) -> Result<()> {
        let (line, mnemonic) = match &self.instruction {
            Some(i) => (i.line_number(), i.mnemonic().to_string()),
            None => (0, String::new()),
        };
        info!(
            target: "cabsi::debug",
            pc = self.pc,
            line,
            mnemonic = mnemonic.as_str(),
            stack = ?self.stack.as_slice(),
            registers = ?self.registers.as_slice(),
            "debug"
        );
        Ok(())
    }

    fn op_exit(&mut self) -> Result<()> {
        self.kill();
        Ok(())
    }

    fn op_print(&mut self) -> Result<()> {
        let val = self.pop()?;
        self.write(&format!("{}\n", val))
    }
}
