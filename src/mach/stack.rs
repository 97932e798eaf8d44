use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Size limited vector

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
    pub fn clear(&mut self) {
        self.vec.clear()
    }
    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        if self.vec.len() >= self.max_len() {
            return Err(error!(OutOfMemory; self.overflow_message));
        }
        self.vec.push(val);
        Ok(())
    }
    pub fn pop(&mut self) -> Option<T> {
        self.vec.pop()
    }
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, f: F) {
        self.vec.retain(f)
    }
}
