use crate::tree::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Function {
    pub type_index: u32,
}

/// Debug name attached to a function index by the `name` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionName {
    pub index: u32,
    pub name: Span,
}
