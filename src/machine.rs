use std::io::{BufRead, Write};

use log::{debug, trace};
use num_integer::Integer;

use crate::error::Fault;
use crate::frame::{FrameStore, FrameTag};
use crate::io::LineInput;
use crate::literal;
use crate::opcode::Opcode;
use crate::program::{Instruction, LiteralKind, Operand, Program};
use crate::value::Value;

/// Where execution continues after an instruction.
enum Flow {
    Next,
    Jump(usize),
    Exit(i32),
}

/// The interpreter: frame store, data and call stacks, program counter and
/// the two I/O channels. `READ` consumes `input` line by line; `WRITE`
/// appends to `output`.
pub struct Machine<'p, R, W> {
    program: &'p Program,
    frames: FrameStore,
    data_stack: Vec<Value>,
    call_stack: Vec<usize>,
    input: LineInput<R>,
    output: W,
    pc: usize,
}

impl<'p, R: BufRead, W: Write> Machine<'p, R, W> {
    pub fn new(program: &'p Program, input: R, output: W) -> Machine<'p, R, W> {
        Machine {
            program,
            frames: FrameStore::new(),
            data_stack: Vec::new(),
            call_stack: Vec::new(),
            input: LineInput::new(input),
            output,
            pc: 0,
        }
    }

    /// Runs the program to completion and returns the process exit status:
    /// the `EXIT` operand, or 0 when the program counter runs off the end.
    pub fn run(&mut self) -> Result<i32, Fault> {
        let program = self.program;

        while self.pc < program.len() {
            let instruction = program.instruction(self.pc);
            trace!("{:04}: {}", self.pc, instruction.opcode);

            match self.exec(instruction)? {
                Flow::Next => self.pc += 1,
                // A jump lands on the target and the post-increment moves
                // past it, so execution resumes right after the label.
                Flow::Jump(target) => self.pc = target + 1,
                Flow::Exit(status) => {
                    self.output.flush().map_err(Fault::Output)?;
                    return Ok(status);
                }
            }
        }

        self.output.flush().map_err(Fault::Output)?;
        Ok(0)
    }

    fn exec(&mut self, instruction: &Instruction) -> Result<Flow, Fault> {
        let args = &instruction.args;

        match instruction.opcode {
            Opcode::MOVE => {
                let value = self.resolve(&args[1])?;
                self.assign(&args[0], value)?;
            }
            Opcode::CREATEFRAME => self.frames.create_temporary(),
            Opcode::PUSHFRAME => self.frames.push_temporary()?,
            Opcode::POPFRAME => self.frames.pop_local()?,
            Opcode::DEFVAR => {
                let (tag, name) = var_operand(&args[0])?;
                self.frames.define(tag, name)?;
            }

            Opcode::CALL => {
                let target = self.program.label(label_operand(&args[0])?)?;
                self.call_stack.push(self.pc);
                return Ok(Flow::Jump(target));
            }
            Opcode::RETURN => {
                let target = self.call_stack.pop().ok_or(Fault::EmptyCallStack)?;
                return Ok(Flow::Jump(target));
            }

            Opcode::PUSHS => {
                let value = self.resolve(&args[0])?;
                self.data_stack.push(value);
            }
            Opcode::POPS => {
                let value = self.pop()?;
                self.assign(&args[0], value)?;
            }

            Opcode::ADD | Opcode::SUB | Opcode::MUL | Opcode::IDIV => {
                let a = self.int_arg(&args[1])?;
                let b = self.int_arg(&args[2])?;
                let result = arith(instruction.opcode, a, b)?;
                self.assign(&args[0], Value::Int(result))?;
            }

            Opcode::LT | Opcode::GT => {
                let a = self.resolve(&args[1])?;
                let b = self.resolve(&args[2])?;
                let result = compare(instruction.opcode, &a, &b)?;
                self.assign(&args[0], Value::Bool(result))?;
            }
            Opcode::EQ => {
                let a = self.resolve(&args[1])?;
                let b = self.resolve(&args[2])?;
                let result = equal(&a, &b)?;
                self.assign(&args[0], Value::Bool(result))?;
            }

            Opcode::AND => {
                let a = self.bool_arg(&args[1])?;
                let b = self.bool_arg(&args[2])?;
                self.assign(&args[0], Value::Bool(a && b))?;
            }
            Opcode::OR => {
                let a = self.bool_arg(&args[1])?;
                let b = self.bool_arg(&args[2])?;
                self.assign(&args[0], Value::Bool(a || b))?;
            }
            Opcode::NOT => {
                let a = self.bool_arg(&args[1])?;
                self.assign(&args[0], Value::Bool(!a))?;
            }

            Opcode::INT2CHAR => {
                let code = self.int_arg(&args[1])?;
                self.assign(&args[0], Value::Str(codepoint(code)?.to_string()))?;
            }
            Opcode::STRI2INT => {
                let text = self.str_arg(&args[1])?;
                let index = self.int_arg(&args[2])?;
                let c = char_at(&text, index)?;
                self.assign(&args[0], Value::Int(i64::from(c as u32)))?;
            }
            Opcode::INT2FLOAT => {
                let value = self.int_arg(&args[1])?;
                self.assign(&args[0], Value::Float(value as f64))?;
            }
            Opcode::FLOAT2INT => {
                let value = self.float_arg(&args[1])?;
                self.assign(&args[0], Value::Int(float_to_int(value)?))?;
            }

            Opcode::READ => {
                let requested = type_operand(&args[1])?;
                let value = match self.input.next_line()? {
                    None => Value::Nil,
                    Some(line) => match requested {
                        "int" => line.trim().parse::<i64>().map(Value::Int).unwrap_or(Value::Nil),
                        "bool" => Value::Bool(line.trim().eq_ignore_ascii_case("true")),
                        "string" => Value::Str(line),
                        _ => Value::Nil,
                    },
                };
                self.assign(&args[0], value)?;
            }
            Opcode::WRITE => {
                let value = self.resolve(&args[0])?;
                write!(self.output, "{}", value).map_err(Fault::Output)?;
            }

            Opcode::CONCAT => {
                let mut text = self.str_arg(&args[1])?;
                text.push_str(&self.str_arg(&args[2])?);
                self.assign(&args[0], Value::Str(text))?;
            }
            Opcode::STRLEN => {
                let text = self.str_arg(&args[1])?;
                self.assign(&args[0], Value::Int(text.chars().count() as i64))?;
            }
            Opcode::GETCHAR => {
                let text = self.str_arg(&args[1])?;
                let index = self.int_arg(&args[2])?;
                let c = char_at(&text, index)?;
                self.assign(&args[0], Value::Str(c.to_string()))?;
            }
            Opcode::SETCHAR => {
                let current = self.str_arg(&args[0])?;
                let index = self.int_arg(&args[1])?;
                let replacement = self.str_arg(&args[2])?;
                let c = replacement.chars().next().ok_or(Fault::EmptyReplacement)?;
                char_at(&current, index)?;

                let mut updated = String::with_capacity(current.len());
                for (position, original) in current.chars().enumerate() {
                    updated.push(if position as i64 == index { c } else { original });
                }
                self.assign(&args[0], Value::Str(updated))?;
            }

            Opcode::TYPE => {
                let name = match &args[1] {
                    Operand::Var { frame, name } => match self.frames.peek(*frame, name)? {
                        Some(value) => value.type_name().to_string(),
                        None => String::new(),
                    },
                    other => other.kind_name().to_string(),
                };
                self.assign(&args[0], Value::Str(name))?;
            }

            Opcode::LABEL => {}
            Opcode::JUMP => {
                let target = self.program.label(label_operand(&args[0])?)?;
                return Ok(Flow::Jump(target));
            }
            Opcode::JUMPIFEQ | Opcode::JUMPIFNEQ => {
                // The label is checked even when the jump is not taken.
                let target = self.program.label(label_operand(&args[0])?)?;
                let a = self.resolve(&args[1])?;
                let b = self.resolve(&args[2])?;
                let taken = equal(&a, &b)? == (instruction.opcode == Opcode::JUMPIFEQ);
                if taken {
                    return Ok(Flow::Jump(target));
                }
            }
            Opcode::EXIT => {
                let status = self.int_arg(&args[0])?;
                if !(0..=49).contains(&status) {
                    return Err(Fault::BadExitValue(status));
                }
                return Ok(Flow::Exit(status as i32));
            }

            Opcode::DPRINT => trace!("DPRINT {:?}", args[0]),
            Opcode::BREAK => debug!(
                "BREAK at {}: gf={} lf-depth={} tf={} stack={} calls={}",
                self.pc,
                self.frames.frame(FrameTag::GF).map(|f| f.len()).unwrap_or(0),
                self.frames.local_depth(),
                self.frames.has_temporary(),
                self.data_stack.len(),
                self.call_stack.len(),
            ),

            Opcode::CLEARS => self.data_stack.clear(),
            Opcode::ADDS | Opcode::SUBS | Opcode::MULS | Opcode::IDIVS => {
                let b = self.pop_int()?;
                let a = self.pop_int()?;
                let opcode = match instruction.opcode {
                    Opcode::ADDS => Opcode::ADD,
                    Opcode::SUBS => Opcode::SUB,
                    Opcode::MULS => Opcode::MUL,
                    _ => Opcode::IDIV,
                };
                self.data_stack.push(Value::Int(arith(opcode, a, b)?));
            }
            Opcode::LTS | Opcode::GTS => {
                let b = self.pop()?;
                let a = self.pop()?;
                let opcode = if instruction.opcode == Opcode::LTS { Opcode::LT } else { Opcode::GT };
                self.data_stack.push(Value::Bool(compare(opcode, &a, &b)?));
            }
            Opcode::EQS => {
                let b = self.pop()?;
                let a = self.pop()?;
                self.data_stack.push(Value::Bool(equal(&a, &b)?));
            }
            Opcode::ANDS => {
                let b = self.pop_bool()?;
                let a = self.pop_bool()?;
                self.data_stack.push(Value::Bool(a && b));
            }
            Opcode::ORS => {
                let b = self.pop_bool()?;
                let a = self.pop_bool()?;
                self.data_stack.push(Value::Bool(a || b));
            }
            Opcode::NOTS => {
                let a = self.pop_bool()?;
                self.data_stack.push(Value::Bool(!a));
            }
            Opcode::INT2CHARS => {
                let code = self.pop_int()?;
                self.data_stack.push(Value::Str(codepoint(code)?.to_string()));
            }
            Opcode::STRI2INTS => {
                let index = self.pop_int()?;
                let text = self.pop_str()?;
                let c = char_at(&text, index)?;
                self.data_stack.push(Value::Int(i64::from(c as u32)));
            }
            Opcode::JUMPIFEQS | Opcode::JUMPIFNEQS => {
                let target = self.program.label(label_operand(&args[0])?)?;
                let b = self.pop()?;
                let a = self.pop()?;
                let taken = equal(&a, &b)? == (instruction.opcode == Opcode::JUMPIFEQS);
                if taken {
                    return Ok(Flow::Jump(target));
                }
            }
        }

        Ok(Flow::Next)
    }

    /// Resolves an operand to a value: literals parse their text, variable
    /// references read their slot (an unset slot is a value-missing fault).
    fn resolve(&self, operand: &Operand) -> Result<Value, Fault> {
        match operand {
            Operand::Literal { kind, text } => literal_value(*kind, text),
            Operand::Var { frame, name } => self.frames.get(*frame, name),
            other => Err(Fault::BadType { expected: "symb", found: other.kind_name().to_string() }),
        }
    }

    fn int_arg(&self, operand: &Operand) -> Result<i64, Fault> {
        match self.resolve(operand)? {
            Value::Int(value) => Ok(value),
            other => Err(Fault::BadType { expected: "int", found: other.type_name().to_string() }),
        }
    }

    fn bool_arg(&self, operand: &Operand) -> Result<bool, Fault> {
        match self.resolve(operand)? {
            Value::Bool(value) => Ok(value),
            other => Err(Fault::BadType { expected: "bool", found: other.type_name().to_string() }),
        }
    }

    fn str_arg(&self, operand: &Operand) -> Result<String, Fault> {
        match self.resolve(operand)? {
            Value::Str(value) => Ok(value),
            other => {
                Err(Fault::BadType { expected: "string", found: other.type_name().to_string() })
            }
        }
    }

    fn float_arg(&self, operand: &Operand) -> Result<f64, Fault> {
        match self.resolve(operand)? {
            Value::Float(value) => Ok(value),
            other => {
                Err(Fault::BadType { expected: "float", found: other.type_name().to_string() })
            }
        }
    }

    fn assign(&mut self, operand: &Operand, value: Value) -> Result<(), Fault> {
        let (tag, name) = var_operand(operand)?;
        self.frames.set(tag, name, value)
    }

    fn pop(&mut self) -> Result<Value, Fault> {
        self.data_stack.pop().ok_or(Fault::EmptyDataStack)
    }

    fn pop_int(&mut self) -> Result<i64, Fault> {
        match self.pop()? {
            Value::Int(value) => Ok(value),
            other => Err(Fault::BadType { expected: "int", found: other.type_name().to_string() }),
        }
    }

    fn pop_bool(&mut self) -> Result<bool, Fault> {
        match self.pop()? {
            Value::Bool(value) => Ok(value),
            other => Err(Fault::BadType { expected: "bool", found: other.type_name().to_string() }),
        }
    }

    fn pop_str(&mut self) -> Result<String, Fault> {
        match self.pop()? {
            Value::Str(value) => Ok(value),
            other => {
                Err(Fault::BadType { expected: "string", found: other.type_name().to_string() })
            }
        }
    }
}

fn literal_value(kind: LiteralKind, text: &str) -> Result<Value, Fault> {
    match kind {
        LiteralKind::Int => literal::parse_int(text).map(Value::Int),
        LiteralKind::Bool => literal::parse_bool(text).map(Value::Bool),
        LiteralKind::Float => literal::parse_float(text).map(Value::Float),
        LiteralKind::String => literal::decode_escapes(text).map(Value::Str),
        LiteralKind::Nil => {
            if text.is_empty() || text == "nil" {
                Ok(Value::Nil)
            } else {
                Err(Fault::BadLiteral { kind: "nil", text: text.to_string() })
            }
        }
    }
}

fn var_operand(operand: &Operand) -> Result<(FrameTag, &str), Fault> {
    match operand {
        Operand::Var { frame, name } => Ok((*frame, name)),
        other => Err(Fault::BadType { expected: "var", found: other.kind_name().to_string() }),
    }
}

fn label_operand(operand: &Operand) -> Result<&str, Fault> {
    match operand {
        Operand::Label(name) => Ok(name),
        other => Err(Fault::BadType { expected: "label", found: other.kind_name().to_string() }),
    }
}

fn type_operand(operand: &Operand) -> Result<&str, Fault> {
    match operand {
        Operand::Type(name) => Ok(name),
        other => Err(Fault::BadType { expected: "type", found: other.kind_name().to_string() }),
    }
}

/// Integer arithmetic with wrapping overflow. `IDIV` is floor division, per
/// the source language; the `i64::MIN / -1` case wraps like the rest.
fn arith(opcode: Opcode, a: i64, b: i64) -> Result<i64, Fault> {
    Ok(match opcode {
        Opcode::ADD => a.wrapping_add(b),
        Opcode::SUB => a.wrapping_sub(b),
        Opcode::MUL => a.wrapping_mul(b),
        _ => {
            if b == 0 {
                return Err(Fault::DivisionByZero);
            }
            if b == -1 {
                a.wrapping_neg()
            } else {
                a.div_floor(&b)
            }
        }
    })
}

/// `LT`/`GT` ordering: operand types must match and be int, string or bool.
fn compare(opcode: Opcode, a: &Value, b: &Value) -> Result<bool, Fault> {
    let ordering = match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Str(x), Value::Str(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => {
            return Err(Fault::BadType {
                expected: "two int, string or bool operands of the same type",
                found: format!("{} and {}", a.type_name(), b.type_name()),
            });
        }
    };
    Ok(if opcode == Opcode::LT {
        ordering == std::cmp::Ordering::Less
    } else {
        ordering == std::cmp::Ordering::Greater
    })
}

/// `EQ` semantics: `nil` compares equal only to `nil` and is tolerated
/// against any type; otherwise the types must match.
fn equal(a: &Value, b: &Value) -> Result<bool, Fault> {
    match (a, b) {
        (Value::Nil, Value::Nil) => Ok(true),
        (Value::Nil, _) | (_, Value::Nil) => Ok(false),
        (Value::Int(x), Value::Int(y)) => Ok(x == y),
        (Value::Str(x), Value::Str(y)) => Ok(x == y),
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        _ => Err(Fault::BadType {
            expected: "two operands of the same type",
            found: format!("{} and {}", a.type_name(), b.type_name()),
        }),
    }
}

fn char_at(text: &str, index: i64) -> Result<char, Fault> {
    let out_of_range = || Fault::IndexOutOfRange { index, len: text.chars().count() };
    if index < 0 {
        return Err(out_of_range());
    }
    text.chars().nth(index as usize).ok_or_else(out_of_range)
}

fn codepoint(code: i64) -> Result<char, Fault> {
    if code < 0 || code > 0x10_ffff {
        return Err(Fault::BadCodepoint(code));
    }
    std::char::from_u32(code as u32).ok_or(Fault::BadCodepoint(code))
}

fn float_to_int(value: f64) -> Result<i64, Fault> {
    if !value.is_finite() {
        return Err(Fault::BadIntConversion(value));
    }
    let truncated = value.trunc();
    if truncated < i64::min_value() as f64 || truncated >= i64::max_value() as f64 {
        return Err(Fault::BadIntConversion(value));
    }
    Ok(truncated as i64)
}
