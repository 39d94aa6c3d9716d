#![allow(dead_code)]
use cabsi::mach::{Capture, Runtime, StrSource};

pub fn runtime(src: &str, input: &str) -> (Runtime, Capture) {
    let output = Capture::new();
    let runtime = Runtime::from_source(src)
        .with_source(StrSource::new(input))
        .with_sink(output.clone());
    (runtime, output)
}

pub fn exec(src: &str) -> (String, Runtime) {
    exec_with_input(src, "")
}

pub fn exec_with_input(src: &str, input: &str) -> (String, Runtime) {
    let (mut runtime, output) = runtime(src, input);
    runtime.run().unwrap();
    (output.contents(), runtime)
}
