//! # CABSI
//!
//! A line-numbered stack machine language.
//!
//! Source text is tokenized into a [`Program`](lang::Program) and run by a
//! [`Runtime`](mach::Runtime), which owns an operand stack, a register
//! stack and a call stack, and talks to its host through a character
//! [`Source`](mach::Source) and an output [`Sink`](mach::Sink).
//!
//! ```
//! use cabsi::mach::{Capture, Runtime, StrSource};
//!
//! let output = Capture::new();
//! let mut runtime = Runtime::from_source("10 PUSH 2,3\n20 ADD\n30 PRINT\n")
//!     .with_source(StrSource::new(""))
//!     .with_sink(output.clone());
//! runtime.run().unwrap();
//! assert_eq!(output.contents(), "5\n");
//! ```

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/instructions.rs"]
#[allow(non_snake_case)]
pub mod __Instructions;

pub mod lang;
pub mod mach;
