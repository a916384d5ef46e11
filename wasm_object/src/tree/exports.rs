use crate::tree::language_types::ExternalKind;
use crate::tree::Span;

/// Only function and global exports are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Export {
    pub name: Span,
    pub kind: ExternalKind,
    pub index: u32,
}
