//! # CABSI
//!
//! Runs one program file to completion.
//!

mod term;

fn main() {
    term::main();
}
