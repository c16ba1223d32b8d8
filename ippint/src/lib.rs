//! XML frontend for the [ippvm](../ippvm/index.html) virtual machine.
//!
//! The main function provided by this crate is [`load_program`](fn.load_program.html),
//! which accepts the XML representation of an IPPcode23 program and outputs a
//! validated [`Program`](../ippvm/program/struct.Program.html) ready for
//! execution. The crate also carries the `ippint` command line interpreter.
//!
//! # Program format
//!
//! The document element is `<program language="IPPcode23">`; the language
//! attribute is matched case-insensitively and the optional `name` and
//! `description` attributes are allowed. Every child is an
//! `<instruction order=".." opcode="..">` element whose order is a unique
//! positive integer; instructions execute in ascending order of that
//! attribute. Arguments are `<arg1>`, `<arg2>` and `<arg3>` children with a
//! `type` attribute, numbered without duplicates or gaps.
//!
//! ## Operand types
//!
//! Type     | Payload
//! ---------|----------------------------------------------------------
//! `int`    | integer literal; decimal, `0x` hex or `0o` octal, signed
//! `bool`   | `true` or `false`
//! `string` | text with `\DDD` escapes, one decimal codepoint per escape
//! `nil`    | the literal `nil`
//! `float`  | decimal or hexadecimal (`0x1.8p+0`) notation
//! `var`    | `<FRAME>@<name>` with FRAME one of `GF`, `LF`, `TF`
//! `label`  | jump target name
//! `type`   | type name used by `READ`
//! `symb`   | accepted by the format, behaves as a string literal
//!
//! ## Opcodes
//!
//! Arity | Mnemonics
//! ------|--------------------------------------------------------------
//! 0     | `CREATEFRAME` `PUSHFRAME` `POPFRAME` `RETURN` `BREAK` `CLEARS` `ADDS` `SUBS` `MULS` `IDIVS` `LTS` `GTS` `EQS` `ANDS` `ORS` `NOTS` `INT2CHARS` `STRI2INTS`
//! 1     | `DEFVAR` `CALL` `PUSHS` `POPS` `WRITE` `LABEL` `JUMP` `EXIT` `DPRINT` `JUMPIFEQS` `JUMPIFNEQS`
//! 2     | `MOVE` `NOT` `INT2CHAR` `READ` `STRLEN` `TYPE` `INT2FLOAT` `FLOAT2INT`
//! 3     | `ADD` `SUB` `MUL` `IDIV` `LT` `GT` `EQ` `AND` `OR` `STRI2INT` `CONCAT` `GETCHAR` `SETCHAR` `JUMPIFEQ` `JUMPIFNEQ`
//!
//! Mnemonics are matched case-insensitively.

mod error;
mod structure;
mod xml;


use log::debug;

use ippvm::Program;

pub use crate::error::LoadError;

/// Parses and validates an XML source document into an executable program.
pub fn load_program(source: &str) -> Result<Program, LoadError> {
    let root = xml::parse_document(source)?;
    let instructions = structure::build_instructions(&root)?;
    debug!("loaded {} instruction(s)", instructions.len());
    Ok(Program::new(instructions)?)
}
