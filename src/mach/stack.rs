use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector
///
/// Depths are 1-indexed from the top: depth 1 is the most recent push.

pub struct Stack<T> {
    overflow_message: &'static str,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(overflow_message: &'static str) -> Stack<T> {
        Stack {
            overflow_message,
            vec: vec![],
        }
    }
    fn max_len(&self) -> usize {
        u16::max_value() as usize
    }
    fn underflow_error(&self, expected: usize) -> Error {
        error!(StackUnderflow; format!("EXPECTED {} ENTRIES, GOT {}", expected, self.vec.len()))
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn as_slice(&self) -> &[T] {
        &self.vec
    }
    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }
    fn index_of(&self, depth: usize) -> Option<usize> {
        if depth == 0 || depth > self.vec.len() {
            None
        } else {
            Some(self.vec.len() - depth)
        }
    }
    pub fn peek(&self, depth: usize) -> Option<&T> {
        self.index_of(depth).map(|idx| &self.vec[idx])
    }
    /// Splice out the entry at `depth`, shifting the ones above it down.
    pub fn remove(&mut self, depth: usize) -> Option<T> {
        self.index_of(depth).map(|idx| self.vec.remove(idx))
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        if self.vec.len() >= self.max_len() {
            return Err(error!(StackOverflow; self.overflow_message));
        }
        self.vec.push(val);
        Ok(())
    }
    /// Push every value or none of them.
    pub fn push_all(&mut self, vals: Vec<T>) -> Result<()> {
        if self.vec.len() + vals.len() > self.max_len() {
            return Err(error!(StackOverflow; self.overflow_message));
        }
        self.vec.extend(vals);
        Ok(())
    }
    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error(1)),
        }
    }
    pub fn pop_2(&mut self) -> Result<(T, T)> {
        if self.vec.len() < 2 {
            return Err(self.underflow_error(2));
        }
        let two = self.pop()?;
        let one = self.pop()?;
        Ok((one, two))
    }
    pub fn pop_n(&mut self, len: usize) -> Result<Vec<T>> {
        if len > self.vec.len() {
            Err(self.underflow_error(len))
        } else {
            let range = (self.vec.len() - len)..;
            Ok(self.vec.drain(range).collect())
        }
    }
}
