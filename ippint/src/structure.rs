//! Validation of the element tree against the program format.
//!
//! Everything here reports the xml-structure diagnostic: wrong element or
//! attribute shape, unparsable or duplicate orders, unknown opcodes, arity
//! violations and malformed operand references.

use std::collections::HashSet;
use std::str::FromStr;

use ippvm::{FrameTag, Instruction, LiteralKind, Opcode, Operand};

use crate::error::LoadError;
use crate::xml::Element;

fn structure(message: String) -> LoadError {
    LoadError::Structure(message)
}

/// Checks the whole document shape and returns the instruction vector,
/// sorted by the `order` attribute.
pub fn build_instructions(root: &Element) -> Result<Vec<Instruction>, LoadError> {
    check_root(root)?;

    let mut instructions = Vec::with_capacity(root.children.len());
    let mut seen_orders = HashSet::new();

    for child in &root.children {
        let instruction = build_instruction(child)?;
        if !seen_orders.insert(instruction.order) {
            return Err(structure(format!("duplicate instruction order {}", instruction.order)));
        }
        instructions.push(instruction);
    }

    instructions.sort_by_key(|instruction| instruction.order);
    Ok(instructions)
}

fn check_root(root: &Element) -> Result<(), LoadError> {
    if root.name != "program" {
        return Err(structure(format!("document element is <{}>, expected <program>", root.name)));
    }

    let mut has_language = false;
    for (key, _) in &root.attributes {
        match key.as_str() {
            "language" => has_language = true,
            "name" | "description" => {}
            other => {
                return Err(structure(format!("unexpected <program> attribute \"{}\"", other)));
            }
        }
    }
    if !has_language {
        return Err(structure("<program> has no language attribute".to_string()));
    }

    let language = root.attribute("language").unwrap_or_default();
    if !language.eq_ignore_ascii_case("IPPcode23") {
        return Err(structure(format!("language is \"{}\", expected \"IPPcode23\"", language)));
    }
    Ok(())
}

fn build_instruction(element: &Element) -> Result<Instruction, LoadError> {
    if element.name != "instruction" {
        return Err(structure(format!("unexpected element <{}>", element.name)));
    }
    for (key, _) in &element.attributes {
        match key.as_str() {
            "order" | "opcode" => {}
            other => {
                return Err(structure(format!("unexpected <instruction> attribute \"{}\"", other)));
            }
        }
    }

    let order_text = element
        .attribute("order")
        .ok_or_else(|| structure("<instruction> has no order attribute".to_string()))?;
    let opcode_text = element
        .attribute("opcode")
        .ok_or_else(|| structure("<instruction> has no opcode attribute".to_string()))?;

    let order: i64 = order_text
        .trim()
        .parse()
        .map_err(|_| structure(format!("order \"{}\" is not an integer", order_text)))?;
    if order < 1 {
        return Err(structure(format!("order {} is not positive", order)));
    }

    let opcode = Opcode::from_str(opcode_text.trim())
        .map_err(|_| structure(format!("unknown opcode \"{}\"", opcode_text)))?;

    // Arguments may appear in any document order; place them by tag and
    // reject duplicates and gaps afterwards.
    let mut slots: [Option<Operand>; 3] = [None, None, None];
    let mut count = 0;
    for argument in &element.children {
        let position = match argument.name.as_str() {
            "arg1" => 0,
            "arg2" => 1,
            "arg3" => 2,
            other => return Err(structure(format!("unexpected element <{}>", other))),
        };
        if !argument.children.is_empty() {
            return Err(structure(format!("<{}> cannot have child elements", argument.name)));
        }
        for (key, _) in &argument.attributes {
            if key != "type" {
                return Err(structure(format!("unexpected <{}> attribute \"{}\"", argument.name, key)));
            }
        }
        let kind = argument
            .attribute("type")
            .ok_or_else(|| structure(format!("<{}> has no type attribute", argument.name)))?;

        if slots[position].is_some() {
            return Err(structure(format!("duplicate <{}> element", argument.name)));
        }
        slots[position] = Some(operand(kind, argument.text.trim())?);
        count += 1;
    }

    let mut args = Vec::with_capacity(count);
    for slot in slots.iter_mut().take(count) {
        match slot.take() {
            Some(operand) => args.push(operand),
            None => return Err(structure("argument numbering has gaps".to_string())),
        }
    }

    if args.len() != opcode.arity() {
        return Err(structure(format!(
            "{} takes {} argument(s), found {}",
            opcode,
            opcode.arity(),
            args.len()
        )));
    }

    Ok(Instruction { order, opcode, args })
}

fn operand(kind: &str, text: &str) -> Result<Operand, LoadError> {
    match kind {
        "var" => {
            let (frame, name) = text.split_once('@').ok_or_else(|| {
                structure(format!("variable operand \"{}\" has no frame prefix", text))
            })?;
            let frame = FrameTag::from_str(frame)
                .map_err(|_| structure(format!("\"{}\" is not a frame tag", frame)))?;
            Ok(Operand::Var { frame, name: name.to_string() })
        }
        "label" => Ok(Operand::Label(text.to_string())),
        "type" => Ok(Operand::Type(text.to_string())),
        // Accepted by the format; behaves as a string literal.
        "symb" => Ok(Operand::Literal { kind: LiteralKind::String, text: text.to_string() }),
        other => match LiteralKind::from_str(other) {
            Ok(kind) => Ok(Operand::Literal { kind, text: text.to_string() }),
            Err(_) => Err(structure(format!("\"{}\" is not an operand type", other))),
        },
    }
}
