/*!
# Rust Language Module

This Rust module turns source text into a program: line numbers,
mnemonics and raw parameter text.

*/

pub type LineNumber = u32;

#[macro_use]
mod error;
mod instruction;
mod lex;
mod opcode;
mod program;

pub use error::Error;
pub use error::ErrorCode;
pub use instruction::Instruction;
pub use lex::split_params;
pub use lex::tokenize;
pub use opcode::Opcode;
pub use program::Program;
