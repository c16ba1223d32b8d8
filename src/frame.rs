use indexmap::IndexMap;
use strum::{Display, EnumString};

use crate::error::Fault;
use crate::value::Value;

/// Frame selector of a variable operand. `LF` always refers to the topmost
/// local frame; `TF` to the single temporary-frame register.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumString)]
pub enum FrameTag {
    GF,
    LF,
    TF,
}

/// One scope: an insertion-ordered mapping from names to slots. A slot of
/// `None` is a declared but never assigned variable, distinct from
/// `Some(Value::Nil)`.
#[derive(Debug, Default)]
pub struct Frame {
    slots: IndexMap<String, Option<Value>>,
}

impl Frame {
    pub fn define(&mut self, name: &str) -> Result<(), Fault> {
        if self.slots.contains_key(name) {
            return Err(Fault::Redefined(name.to_string()));
        }
        self.slots.insert(name.to_string(), None);
        Ok(())
    }

    pub fn set(&mut self, name: &str, value: Value) -> Result<(), Fault> {
        match self.slots.get_mut(name) {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => Err(Fault::UndeclaredVariable(name.to_string())),
        }
    }

    pub fn slot(&self, name: &str) -> Result<&Option<Value>, Fault> {
        self.slots
            .get(name)
            .ok_or_else(|| Fault::UndeclaredVariable(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// The three frame kinds of the language: the global frame, the LIFO stack
/// of local frames, and the temporary-frame register which starts absent.
#[derive(Debug, Default)]
pub struct FrameStore {
    global: Frame,
    locals: Vec<Frame>,
    temporary: Option<Frame>,
}

impl FrameStore {
    pub fn new() -> FrameStore {
        FrameStore::default()
    }

    /// `CREATEFRAME`: unconditionally replaces `TF` with a fresh frame.
    pub fn create_temporary(&mut self) {
        self.temporary = Some(Frame::default());
    }

    /// `PUSHFRAME`: moves `TF` onto the local stack, leaving `TF` absent.
    pub fn push_temporary(&mut self) -> Result<(), Fault> {
        match self.temporary.take() {
            Some(frame) => {
                self.locals.push(frame);
                Ok(())
            }
            None => Err(Fault::MissingFrame(FrameTag::TF)),
        }
    }

    /// `POPFRAME`: moves the topmost local frame back into `TF`.
    pub fn pop_local(&mut self) -> Result<(), Fault> {
        match self.locals.pop() {
            Some(frame) => {
                self.temporary = Some(frame);
                Ok(())
            }
            None => Err(Fault::MissingFrame(FrameTag::LF)),
        }
    }

    pub fn frame(&self, tag: FrameTag) -> Result<&Frame, Fault> {
        match tag {
            FrameTag::GF => Ok(&self.global),
            FrameTag::LF => self.locals.last().ok_or(Fault::MissingFrame(FrameTag::LF)),
            FrameTag::TF => self.temporary.as_ref().ok_or(Fault::MissingFrame(FrameTag::TF)),
        }
    }

    pub fn frame_mut(&mut self, tag: FrameTag) -> Result<&mut Frame, Fault> {
        match tag {
            FrameTag::GF => Ok(&mut self.global),
            FrameTag::LF => self
                .locals
                .last_mut()
                .ok_or(Fault::MissingFrame(FrameTag::LF)),
            FrameTag::TF => self.temporary.as_mut().ok_or(Fault::MissingFrame(FrameTag::TF)),
        }
    }

    pub fn define(&mut self, tag: FrameTag, name: &str) -> Result<(), Fault> {
        self.frame_mut(tag)?.define(name)
    }

    pub fn set(&mut self, tag: FrameTag, name: &str, value: Value) -> Result<(), Fault> {
        self.frame_mut(tag)?.set(name, value)
    }

    /// Value-consuming read; an unset slot is a value-missing fault.
    pub fn get(&self, tag: FrameTag, name: &str) -> Result<Value, Fault> {
        match self.frame(tag)?.slot(name)? {
            Some(value) => Ok(value.clone()),
            None => Err(Fault::UnsetVariable(name.to_string())),
        }
    }

    /// Non-raising read used by `TYPE`: an unset slot is `None`.
    pub fn peek(&self, tag: FrameTag, name: &str) -> Result<Option<Value>, Fault> {
        Ok(self.frame(tag)?.slot(name)?.clone())
    }

    pub fn local_depth(&self) -> usize {
        self.locals.len()
    }

    pub fn has_temporary(&self) -> bool {
        self.temporary.is_some()
    }
}
