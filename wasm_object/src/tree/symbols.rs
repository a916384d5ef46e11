use crate::tree::Span;

/// Everything known about one name, gathered from the import, export and
/// linking sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: Span,
    pub flags: u32,
    pub imports: Vec<u32>,
    pub exports: Vec<u32>,
    pub in_linking: bool,
}

impl Symbol {
    pub fn new(name: Span) -> Symbol {
        Symbol {
            name,
            flags: 0,
            imports: vec![],
            exports: vec![],
            in_linking: false,
        }
    }
}
