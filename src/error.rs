use std::error::Error as StdError;
use std::fmt;
use std::io;

use crate::frame::FrameTag;
use crate::opcode::Opcode;

/// A fatal runtime diagnostic.
///
/// Every variant maps to one exit status of the closed taxonomy via
/// [`Fault::code`]; the interpreter reports the `Display` text on stderr and
/// terminates with that status.
#[derive(Debug)]
pub enum Fault {
    /// A `LABEL` name was introduced twice.
    DuplicateLabel(String),
    /// A jump or call names a label the program never defines.
    UndefinedLabel(String),
    /// `DEFVAR` re-declared a name inside the same frame.
    Redefined(String),
    /// An operand or value violates an instruction's type contract.
    BadType { expected: &'static str, found: String },
    /// Read or write of a name never declared in its frame.
    UndeclaredVariable(String),
    /// `TF` is absent, or `LF` was dereferenced with an empty local stack.
    MissingFrame(FrameTag),
    /// A value-consuming read hit a declared but never assigned slot.
    UnsetVariable(String),
    /// `POPS` or a stack-variant opcode popped an empty data stack.
    EmptyDataStack,
    /// `RETURN` with no matching `CALL` on the call stack.
    EmptyCallStack,
    DivisionByZero,
    /// `EXIT` operand outside `0..=49`.
    BadExitValue(i64),
    /// `FLOAT2INT` operand with no i64 counterpart.
    BadIntConversion(f64),
    /// String index outside `0..len`.
    IndexOutOfRange { index: i64, len: usize },
    /// `SETCHAR` replacement string was empty.
    EmptyReplacement,
    /// `INT2CHAR` operand is not a Unicode scalar value.
    BadCodepoint(i64),
    /// A backslash not followed by exactly three decimal digits.
    BadEscape(String),
    /// Literal text does not parse as its declared lexical type.
    BadLiteral { kind: &'static str, text: String },
    /// Declared arity of an opcode does not match its argument count.
    ArityMismatch { opcode: Opcode, expected: usize, found: usize },
    /// The `READ` channel failed below the framing layer.
    Input(io::Error),
    /// The `WRITE` channel rejected output.
    Output(io::Error),
}

impl Fault {
    /// The process exit status this fault terminates with.
    pub fn code(&self) -> i32 {
        match self {
            Fault::DuplicateLabel(_) | Fault::UndefinedLabel(_) | Fault::Redefined(_) => 52,
            Fault::BadType { .. } => 53,
            Fault::UndeclaredVariable(_) => 54,
            Fault::MissingFrame(_) => 55,
            Fault::UnsetVariable(_) | Fault::EmptyDataStack | Fault::EmptyCallStack => 56,
            Fault::DivisionByZero | Fault::BadExitValue(_) | Fault::BadIntConversion(_) => 57,
            Fault::IndexOutOfRange { .. }
            | Fault::EmptyReplacement
            | Fault::BadCodepoint(_)
            | Fault::BadEscape(_) => 58,
            Fault::BadLiteral { .. } | Fault::ArityMismatch { .. } => 32,
            Fault::Input(_) => 11,
            Fault::Output(_) => 12,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Fault::DuplicateLabel(name) => write!(f, "Label \"{}\" is already defined.", name),
            Fault::UndefinedLabel(name) => write!(f, "Label \"{}\" is not defined.", name),
            Fault::Redefined(name) => write!(f, "Variable \"{}\" is already defined.", name),
            Fault::BadType { expected, found } => {
                write!(f, "Expected {}, found {}.", expected, found)
            }
            Fault::UndeclaredVariable(name) => {
                write!(f, "Variable \"{}\" is not defined.", name)
            }
            Fault::MissingFrame(tag) => match tag {
                FrameTag::TF => f.write_str("Temporary frame does not exist."),
                _ => f.write_str("Local frame stack is empty."),
            },
            Fault::UnsetVariable(name) => {
                write!(f, "Variable \"{}\" has no value.", name)
            }
            Fault::EmptyDataStack => f.write_str("Data stack is empty."),
            Fault::EmptyCallStack => f.write_str("Call stack is empty."),
            Fault::DivisionByZero => f.write_str("Division by zero."),
            Fault::BadExitValue(value) => {
                write!(f, "Exit value {} is outside 0..=49.", value)
            }
            Fault::BadIntConversion(value) => {
                write!(f, "Float {} cannot be converted to an integer.", value)
            }
            Fault::IndexOutOfRange { index, len } => {
                write!(f, "Index {} is out of range for a string of length {}.", index, len)
            }
            Fault::EmptyReplacement => f.write_str("Replacement string is empty."),
            Fault::BadCodepoint(value) => {
                write!(f, "{} is not a valid Unicode codepoint.", value)
            }
            Fault::BadEscape(text) => {
                write!(f, "Malformed escape sequence in \"{}\".", text)
            }
            Fault::BadLiteral { kind, text } => {
                write!(f, "Failed to parse \"{}\" as a {} literal.", text, kind)
            }
            Fault::ArityMismatch { opcode, expected, found } => {
                write!(f, "{} takes {} argument(s), found {}.", opcode, expected, found)
            }
            Fault::Input(err) => write!(f, "Reading input failed: {}", err),
            Fault::Output(err) => write!(f, "Writing output failed: {}", err),
        }
    }
}

impl StdError for Fault {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Fault::Input(err) | Fault::Output(err) => Some(err),
            _ => None,
        }
    }
}
