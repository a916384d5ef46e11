use std::str;

pub mod data;
pub mod exports;
pub mod functions;
pub mod globals;
pub mod imports;
pub mod language_types;
pub mod relocs;
pub mod section;
pub mod symbols;
pub mod types;

use self::data::DataSegment;
use self::exports::Export;
use self::functions::{Function, FunctionName};
use self::globals::Global;
use self::imports::Import;
use self::language_types::ResizableLimits;
use self::relocs::Reloc;
use self::section::{CustomSection, SectionId, NUM_SECTIONS};
use self::symbols::Symbol;
use self::types::FunctionType;

/// A `[begin, end)` range of the module's byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Span {
        Span { begin, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// A parsed object file. Every name and payload is a `Span` into `binary`.
#[derive(Debug, Default)]
pub struct Module {
    pub binary: Vec<u8>,
    pub version: u32,
    pub sections: [Option<Span>; NUM_SECTIONS],
    pub function_types: Vec<FunctionType>,
    pub imports: Vec<Import>,
    pub num_imported_functions: u32,
    pub functions: Vec<Function>,
    pub tables: Vec<ResizableLimits>,
    pub memories: Vec<ResizableLimits>,
    pub num_imported_globals: u32,
    pub globals: Vec<Global>,
    pub exports: Vec<Export>,
    /// Function index for every table slot, no holes.
    pub elements: Vec<u32>,
    pub data_segments: Vec<DataSegment>,
    pub relocs: Vec<Reloc>,
    /// Sorted by name.
    pub symbols: Vec<Symbol>,
    pub data_size: u32,
    pub data_alignment: u32,
    pub function_names: Vec<FunctionName>,
    pub custom_sections: Vec<CustomSection>,
}

impl Module {
    pub fn bytes(&self, span: Span) -> &[u8] {
        self.binary.get(span.begin..span.end).unwrap_or(&[])
    }

    /// Names were checked to be utf-8 while parsing.
    pub fn name(&self, span: Span) -> &str {
        str::from_utf8(self.bytes(span)).unwrap_or("")
    }

    pub fn section(&self, id: SectionId) -> Option<&[u8]> {
        self.sections[id as usize].map(|span| self.bytes(span))
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols
            .binary_search_by(|symbol| self.name(symbol.name).cmp(name))
            .ok()
            .map(|index| &self.symbols[index])
    }

    pub fn data(&self, segment: &DataSegment) -> &[u8] {
        let begin = segment.data_begin;
        self.bytes(Span::new(begin, begin + segment.size as usize))
    }

    pub fn num_local_functions(&self) -> usize {
        self.functions.len() - self.num_imported_functions as usize
    }

    pub fn custom_section(&self, name: &str) -> Option<&[u8]> {
        self.custom_sections
            .iter()
            .find(|section| self.name(section.name) == name)
            .map(|section| self.bytes(section.payload))
    }
}
