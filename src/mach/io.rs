use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

/// A host-supplied stream of characters.
pub trait Source {
    /// Next character, or `None` at end of input. May block.
    fn read_char(&mut self) -> io::Result<Option<char>>;

    /// Offered before a line is requested for `INPUT`. Sources that
    /// cannot show a prompt ignore it.
    fn prompt(&mut self, _prompt: &str) -> io::Result<()> {
        Ok(())
    }
}

/// A host-supplied destination for program output.
pub trait Sink {
    fn write_str(&mut self, s: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Characters from a string supplied up front.
#[derive(Debug, Default)]
pub struct StrSource {
    chars: VecDeque<char>,
}

impl StrSource {
    pub fn new(s: &str) -> StrSource {
        StrSource {
            chars: s.chars().collect(),
        }
    }
}

impl Source for StrSource {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.pop_front())
    }
}

/// Characters from any buffered reader, pulled one line at a time.
pub struct ReadSource<R> {
    reader: R,
    line: VecDeque<char>,
}

impl<R: BufRead> ReadSource<R> {
    pub fn new(reader: R) -> ReadSource<R> {
        ReadSource {
            reader,
            line: VecDeque::new(),
        }
    }
}

impl ReadSource<io::BufReader<io::Stdin>> {
    pub fn stdin() -> Self {
        ReadSource::new(io::BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> Source for ReadSource<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        if self.line.is_empty() {
            let mut s = String::new();
            if self.reader.read_line(&mut s)? == 0 {
                return Ok(None);
            }
            self.line.extend(s.chars());
        }
        Ok(self.line.pop_front())
    }
}

/// Output to any writer, flushed on request.
pub struct WriteSink<W> {
    writer: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(writer: W) -> WriteSink<W> {
        WriteSink { writer }
    }
}

impl WriteSink<io::Stdout> {
    pub fn stdout() -> Self {
        WriteSink::new(io::stdout())
    }
}

impl<W: Write> Sink for WriteSink<W> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.writer.write_all(s.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Output handed to a callback one fragment at a time.
pub struct FnSink<F> {
    callback: F,
}

impl<F: FnMut(&str)> FnSink<F> {
    pub fn new(callback: F) -> FnSink<F> {
        FnSink { callback }
    }
}

impl<F: FnMut(&str)> Sink for FnSink<F> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        (self.callback)(s);
        Ok(())
    }
}

/// Output collected into a string that stays readable after the
/// sink has been handed to a runtime.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    buffer: Rc<RefCell<String>>,
}

impl Capture {
    pub fn new() -> Capture {
        Capture::default()
    }

    pub fn contents(&self) -> String {
        self.buffer.borrow().clone()
    }

    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.borrow_mut())
    }
}

impl Sink for Capture {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.buffer.borrow_mut().push_str(s);
        Ok(())
    }
}

/// ## Input with pushback
///
/// Characters given back with `unread` are delivered again, most recent
/// first, before the source is consulted.

pub struct Input {
    source: Box<dyn Source>,
    pushback: Vec<char>,
}

impl Input {
    pub fn new(source: Box<dyn Source>) -> Input {
        Input {
            source,
            pushback: vec![],
        }
    }

    pub fn read_char(&mut self) -> io::Result<Option<char>> {
        match self.pushback.pop() {
            Some(ch) => Ok(Some(ch)),
            None => self.source.read_char(),
        }
    }

    pub fn unread(&mut self, ch: char) {
        self.pushback.push(ch)
    }

    pub fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.source.prompt(prompt)
    }

    /// One line without its terminator, or `None` if input ended first.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let mut any = false;
        while let Some(ch) = self.read_char()? {
            any = true;
            if ch == '\n' {
                break;
            }
            line.push(ch);
        }
        if !any {
            return Ok(None);
        }
        if line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// One whitespace-delimited word. The delimiter is pushed back.
    pub fn read_word(&mut self) -> io::Result<Option<String>> {
        let mut word = String::new();
        loop {
            match self.read_char()? {
                None => return Ok(None),
                Some(ch) if ch.is_whitespace() => continue,
                Some(ch) => {
                    word.push(ch);
                    break;
                }
            }
        }
        while let Some(ch) = self.read_char()? {
            if ch.is_whitespace() {
                self.unread(ch);
                break;
            }
            word.push(ch);
        }
        Ok(Some(word))
    }
}
