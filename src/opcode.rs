use strum::{Display, EnumString};

/// Instruction set of the IPPcode23 language.
///
/// Mnemonics are matched case-insensitively when parsed from source text.
/// The `*S` variants operate on the data stack instead of named operands;
/// `DPRINT` and `BREAK` are accepted debug instructions with no observable
/// effect.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Opcode {
    // Frames and data movement
    MOVE,
    CREATEFRAME,
    PUSHFRAME,
    POPFRAME,
    DEFVAR,
    // Calls
    CALL,
    RETURN,
    // Data stack
    PUSHS,
    POPS,
    // Arithmetic
    ADD,
    SUB,
    MUL,
    IDIV,
    // Comparisons
    LT,
    GT,
    EQ,
    // Logic
    AND,
    OR,
    NOT,
    // Conversions
    INT2CHAR,
    STRI2INT,
    INT2FLOAT,
    FLOAT2INT,
    // I/O
    READ,
    WRITE,
    // Strings
    CONCAT,
    STRLEN,
    GETCHAR,
    SETCHAR,
    // Type inspection
    TYPE,
    // Control flow
    LABEL,
    JUMP,
    JUMPIFEQ,
    JUMPIFNEQ,
    EXIT,
    // Debug
    DPRINT,
    BREAK,
    // Stack variants
    CLEARS,
    ADDS,
    SUBS,
    MULS,
    IDIVS,
    LTS,
    GTS,
    EQS,
    ANDS,
    ORS,
    NOTS,
    INT2CHARS,
    STRI2INTS,
    JUMPIFEQS,
    JUMPIFNEQS,
}

impl Opcode {
    /// The number of `argN` elements the opcode takes.
    pub fn arity(self) -> usize {
        use self::Opcode::*;

        match self {
            CREATEFRAME | PUSHFRAME | POPFRAME | RETURN | BREAK | CLEARS | ADDS | SUBS | MULS
            | IDIVS | LTS | GTS | EQS | ANDS | ORS | NOTS | INT2CHARS | STRI2INTS => 0,
            DEFVAR | CALL | PUSHS | POPS | WRITE | LABEL | JUMP | EXIT | DPRINT | JUMPIFEQS
            | JUMPIFNEQS => 1,
            MOVE | NOT | INT2CHAR | READ | STRLEN | TYPE | INT2FLOAT | FLOAT2INT => 2,
            ADD | SUB | MUL | IDIV | LT | GT | EQ | AND | OR | STRI2INT | CONCAT | GETCHAR
            | SETCHAR | JUMPIFEQ | JUMPIFNEQ => 3,
        }
    }
}
