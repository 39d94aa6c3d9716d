extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use ansi_term::Style;
use cabsi::error;
use cabsi::lang::Error;
use cabsi::mach::{CancellationToken, Runtime, Source};
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::collections::VecDeque;
use std::io::{self, IsTerminal};
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

pub fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let filename = match std::env::args().nth(1) {
        Some(filename) => filename,
        None => {
            eprintln!("usage: cabsi <file>");
            std::process::exit(2);
        }
    };

    let cancel = CancellationToken::new();
    let cancel_moved = cancel.clone();
    ctrlc::set_handler(move || {
        cancel_moved.cancel();
    })
    .expect("Error setting Ctrl-C handler");

    if let Err(error) = main_loop(&filename, &cancel) {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
        std::process::exit(1);
    }
}

fn main_loop(filename: &str, cancel: &CancellationToken) -> Result<(), Error> {
    let source = load(filename)?;
    let mut runtime = Runtime::from_source(&source);
    if io::stdin().is_terminal() {
        runtime = runtime.with_source(LineSource::new(cancel.clone())?);
    }
    runtime.run_cooperatively(Duration::from_millis(0), cancel)?;
    Ok(())
}

fn load(filename: &str) -> Result<String, Error> {
    match std::fs::read_to_string(filename) {
        Ok(source) => Ok(source),
        Err(error) => Err(error!(IoError; format!("{}: {}", filename, error))),
    }
}

/// Terminal input through the line editor. `INPUT` prompts are shown
/// on the line being edited.
struct LineSource {
    interface: Interface<DefaultTerminal>,
    cancel: CancellationToken,
    line: VecDeque<char>,
    prompt: String,
    eof: bool,
}

impl LineSource {
    fn new(cancel: CancellationToken) -> io::Result<LineSource> {
        let interface = Interface::new("cabsi")?;
        interface.set_report_signal(Signal::Interrupt, true);
        Ok(LineSource {
            interface,
            cancel,
            line: VecDeque::new(),
            prompt: String::new(),
            eof: false,
        })
    }
}

impl Source for LineSource {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        if self.line.is_empty() && !self.eof {
            self.interface.set_prompt(&self.prompt)?;
            self.prompt.clear();
            match self.interface.read_line()? {
                ReadResult::Input(string) => {
                    self.line.extend(string.chars());
                    self.line.push_back('\n');
                }
                ReadResult::Signal(Signal::Interrupt) => {
                    self.interface.set_buffer("")?;
                    self.cancel.cancel();
                    self.eof = true;
                }
                ReadResult::Signal(_) | ReadResult::Eof => self.eof = true,
            }
        }
        Ok(self.line.pop_front())
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.prompt = prompt.to_string();
        Ok(())
    }
}
