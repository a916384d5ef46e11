use std::fmt;

pub const I32: u8 = 0x7f;
pub const I64: u8 = 0x7e;
pub const F32: u8 = 0x7d;
pub const F64: u8 = 0x7c;
pub const ANYFUNC: u8 = 0x70;
pub const FUNC: u8 = 0x60;

/// Value types are kept even when the byte is not one we know, the
/// reader only cares about arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
    Unknown(u8),
}

impl ValueType {
    pub fn from_byte(byte: u8) -> ValueType {
        match byte {
            I32 => ValueType::I32,
            I64 => ValueType::I64,
            F32 => ValueType::F32,
            F64 => ValueType::F64,
            other => ValueType::Unknown(other),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ValueType::I32 => write!(f, "i32"),
            ValueType::I64 => write!(f, "i64"),
            ValueType::F32 => write!(f, "f32"),
            ValueType::F64 => write!(f, "f64"),
            ValueType::Unknown(byte) => write!(f, "bad_type(0x{:02x})", byte),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalKind {
    Function,
    Table,
    Memory,
    Global,
}

impl ExternalKind {
    pub fn from_byte(byte: u8) -> Option<ExternalKind> {
        match byte {
            0 => Some(ExternalKind::Function),
            1 => Some(ExternalKind::Table),
            2 => Some(ExternalKind::Memory),
            3 => Some(ExternalKind::Global),
            _ => None,
        }
    }
}

impl fmt::Display for ExternalKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            ExternalKind::Function => "function",
            ExternalKind::Table => "table",
            ExternalKind::Memory => "memory",
            ExternalKind::Global => "global",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizableLimits {
    pub initial: u32,
    pub maximum: Option<u32>,
}

impl fmt::Display for ResizableLimits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "initial:{}", self.initial)?;
        match self.maximum {
            Some(maximum) => write!(f, " max:{}", maximum),
            None => write!(f, " max:none"),
        }
    }
}
