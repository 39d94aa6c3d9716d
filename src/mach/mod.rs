/*!
## Rust Machine Module

This Rust module is the virtual machine: values, stacks, jump
resolution, host I/O and the interpreter loop.

*/

mod io;
mod operation;
mod resolve;
mod runtime;
mod stack;
mod val;

pub use io::Capture;
pub use io::FnSink;
pub use io::Input;
pub use io::ReadSource;
pub use io::Sink;
pub use io::Source;
pub use io::StrSource;
pub use io::WriteSink;
pub use operation::Operation;
pub use resolve::LineIndex;
pub use runtime::CancellationToken;
pub use runtime::Handler;
pub use runtime::Runtime;
pub use stack::Stack;
pub use val::parse_literal;
pub use val::Value;
