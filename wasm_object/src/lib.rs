//! Reader for relocatable WebAssembly object files.
//!
//! Decodes the standard sections plus the `linking`, `reloc.*` and `name`
//! custom sections a compiler emits for modules meant to be linked. Code
//! bodies are left as opaque bytes, addressed only by relocation offsets.

#[macro_use]
extern crate log;

use std::path::Path;

pub mod file;
pub mod parser;
pub mod trace;
pub mod tree;

#[cfg(test)]
mod fixtures;

pub use parser::{read_module_with_trace, ParseError};
pub use trace::{LogTrace, Trace};
pub use tree::section::SectionId;
pub use tree::{Module, Span};

/// Parses an in-memory object file, tracing to the `log` facade.
pub fn read_module(binary: Vec<u8>) -> Result<Module, ParseError> {
    read_module_with_trace(binary, &mut LogTrace)
}

pub fn read_module_file<P: AsRef<Path>>(path: P, trace: &mut dyn Trace) -> Result<Module, ParseError> {
    let binary = file::WasmFile::open(path)?.read()?;
    read_module_with_trace(binary, trace)
}
