use crate::tree::language_types::ExternalKind;
use crate::tree::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Import {
    pub module: Span,
    pub field: Span,
    pub kind: ExternalKind,
    /// Position in the index space of `kind`.
    pub index: u32,
}
