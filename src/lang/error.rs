use super::{Column, LineNumber};

#[derive(Clone, PartialEq)]
pub struct Error {
    code: u16,
    line_number: LineNumber,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr;  $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
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
            code: code as u16,
            line_number: None,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn is_direct(&self) -> bool {
        self.line_number.is_none()
    }

    /// Tags the error with a program line. An error already
    /// tagged keeps its original line.
    pub fn in_line_number(self, line: LineNumber) -> Error {
        if self.line_number.is_some() {
            return self;
        }
        Error {
            line_number: line,
            ..self
        }
    }

    pub fn in_column(self, column: &Column) -> Error {
        if self.column != (0..0) {
            return self;
        }
        Error {
            column: column.clone(),
            ..self
        }
    }

    pub fn message<S: AsRef<str>>(self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            message: message.as_ref().to_string(),
            ..self
        }
    }
}

pub enum ErrorCode {
    NextWithoutFor = 1,
    SyntaxError = 2,
    ReturnWithoutGosub = 3,
    OutOfData = 4,
    IllegalFunctionCall = 5,
    Overflow = 6,
    OutOfMemory = 7,
    UndefinedLine = 8,
    DivisionByZero = 11,
    TypeMismatch = 13,
    Break = 21,
    InternalError = 51,
    BadFileNumber = 52,
    FileNotFound = 53,
    BadFileMode = 54,
    FileAlreadyOpen = 55,
    DiskIoError = 57,
    InputPastEnd = 62,
    DirectStatementInFile = 66,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            1 => "NEXT WITHOUT FOR",
            2 => "SYNTAX ERROR",
            3 => "RETURN WITHOUT GOSUB",
            4 => "OUT OF DATA",
            5 => "ILLEGAL FUNCTION CALL",
            6 => "OVERFLOW",
            7 => "OUT OF MEMORY",
            8 => "UNDEFINED LINE",
            11 => "DIVISION BY ZERO",
            13 => "TYPE MISMATCH",
            21 => "BREAK",
            51 => "INTERNAL ERROR",
            52 => "BAD FILE NUMBER",
            53 => "FILE NOT FOUND",
            54 => "BAD FILE MODE",
            55 => "FILE ALREADY OPEN",
            57 => "DISK I/O ERROR",
            62 => "INPUT PAST END",
            66 => "DIRECT STATEMENT IN FILE",
            _ => "",
        };
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" IN {}", line_number));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if code_str.is_empty() {
            write!(f, "PROGRAM ERROR {}{}", self.code, suffix)
        } else {
            write!(f, "{}{}", code_str, suffix)
        }
    }
}
