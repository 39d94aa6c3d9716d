use super::LineNumber;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: Option<LineNumber>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> Option<LineNumber> {
        self.line_number
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    /// Faults end the run cleanly instead of propagating out of it.
    pub fn is_fault(&self) -> bool {
        use ErrorCode::*;
        match self.code {
            StackUnderflow | StackOverflow | TypeMismatch | ReturnWithoutGosub => true,
            SyntaxError | IoError | InternalError => false,
        }
    }

    pub fn in_line_number(self, line: LineNumber) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: Some(line),
            ..self
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.into(),
            ..self
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        error!(IoError; error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SyntaxError = 2,
    ReturnWithoutGosub = 3,
    StackOverflow = 7,
    TypeMismatch = 13,
    StackUnderflow = 22,
    IoError = 57,
    InternalError = 51,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let code_str = match self.code {
            SyntaxError => "SYNTAX ERROR",
            ReturnWithoutGosub => "RETURN WITHOUT GOSUB",
            StackOverflow => "STACK OVERFLOW",
            TypeMismatch => "TYPE MISMATCH",
            StackUnderflow => "STACK UNDERFLOW",
            IoError => "I/O ERROR",
            InternalError => "INTERNAL ERROR",
        };
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" {}", line_number));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if suffix.is_empty() {
            write!(f, "{}", code_str)
        } else if self.line_number.is_some() {
            write!(f, "{} IN{}", code_str, suffix)
        } else {
            write!(f, "{}{}", code_str, suffix)
        }
    }
}
