use crate::tree::language_types::ValueType;

/// Function signature; `returns` holds at most one entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionType {
    pub params: Vec<ValueType>,
    pub returns: Vec<ValueType>,
}
