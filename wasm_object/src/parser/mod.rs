use byteorder::{LittleEndian, ReadBytesExt};
use leb::{LebError, ReadLEB};

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::io;
use std::io::Cursor;

use crate::trace::Trace;
use crate::tree::language_types::ExternalKind;
use crate::tree::section::{CustomSection, SectionId};
use crate::tree::symbols::Symbol;
use crate::tree::{Module, Span};

mod code_section;
mod data_section;
mod elements_section;
mod exports_section;
mod functions_section;
mod globals_section;
mod imports_section;
mod linking_section;
mod memory_section;
mod name_section;
mod reloc_section;
mod start_section;
mod tables_section;
mod types_section;
pub mod utils;

use self::utils::Reader;

const MAGIC_NUMBER: u32 = 0x6d736100;
const VERSION: u32 = 1;

const RELOC_PREFIX: &str = "reloc.";
const LINKING: &str = "linking";
const NAME: &str = "name";

#[derive(Debug)]
pub enum ParseError {
    NotWasm,
    UnsupportedModuleVersion(u32),
    UnexpectedEnd,
    MalformedVaruint,
    InvalidUtf8,
    UnknownSectionId(u32),
    SectionPastEnd,
    SectionOutOfOrder(SectionId),
    SectionMalformed(&'static str),
    InvalidTypeForm(u8),
    TooManyReturns,
    NonExistentType(u32),
    UnknownImportKind(u8),
    TableNotAnyfunc,
    ImportedGlobalNotI32,
    GlobalNotI32,
    MultipleTables,
    MultipleMemories,
    InvalidExportIndex(ExternalKind, u32),
    StartUnsupported,
    TableIndexNotZero,
    MemoryIndexNotZero,
    InvalidElementFunction(u32),
    HoleInTable(usize),
    DataPastEnd,
    SegmentsNotContiguous,
    InitExprNotI32Const,
    InitExprMissingEnd,
    UnsupportedRelocSection(u32),
    UnknownRelocKind(u32),
    UnknownLinkingSubsection(u8),
    SymbolNotInLinking(String),
    InvalidNameIndex(u32),
    Io(io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::NotWasm => write!(f, "not a wasm file"),
            ParseError::UnsupportedModuleVersion(version) => write!(f, "unsupported wasm version {}", version),
            ParseError::UnexpectedEnd => write!(f, "unexpected end of section"),
            ParseError::MalformedVaruint => write!(f, "malformed varuint"),
            ParseError::InvalidUtf8 => write!(f, "name is not valid utf-8"),
            ParseError::UnknownSectionId(id) => write!(f, "unknown section id {}", id),
            ParseError::SectionPastEnd => write!(f, "section extends past file end"),
            ParseError::SectionOutOfOrder(id) => write!(f, "{} section out of order", id.name()),
            ParseError::SectionMalformed(name) => write!(f, "{} section malformed", name),
            ParseError::InvalidTypeForm(form) => write!(f, "invalid form in type: 0x{:02x}", form),
            ParseError::TooManyReturns => write!(f, "multiple return types"),
            ParseError::NonExistentType(index) => write!(f, "function type {} doesn't exist", index),
            ParseError::UnknownImportKind(kind) => write!(f, "unknown import kind {}", kind),
            ParseError::TableNotAnyfunc => write!(f, "table is not anyfunc"),
            ParseError::ImportedGlobalNotI32 => write!(f, "imported global is not i32"),
            ParseError::GlobalNotI32 => write!(f, "global is not i32"),
            ParseError::MultipleTables => write!(f, "multiple tables"),
            ParseError::MultipleMemories => write!(f, "multiple memories"),
            ParseError::InvalidExportIndex(kind, index) => {
                write!(f, "export has invalid {} index {}", kind, index)
            }
            ParseError::StartUnsupported => write!(f, "start section unsupported"),
            ParseError::TableIndexNotZero => write!(f, "elem table index not 0"),
            ParseError::MemoryIndexNotZero => write!(f, "data memory index not 0"),
            ParseError::InvalidElementFunction(index) => write!(f, "elem has invalid function index {}", index),
            ParseError::HoleInTable(index) => write!(f, "hole in table at index {}", index),
            ParseError::DataPastEnd => write!(f, "data segment extends past section end"),
            ParseError::SegmentsNotContiguous => write!(f, "segments not contiguous"),
            ParseError::InitExprNotI32Const => write!(f, "init_expr is not i32.const"),
            ParseError::InitExprMissingEnd => write!(f, "init_expr missing end"),
            ParseError::UnsupportedRelocSection(id) => write!(f, "unsupported reloc section id {}", id),
            ParseError::UnknownRelocKind(kind) => write!(f, "unknown reloc type {}", kind),
            ParseError::UnknownLinkingSubsection(kind) => write!(f, "unhandled linking subsection {}", kind),
            ParseError::SymbolNotInLinking(ref name) => {
                write!(f, "symbol {} is exported, but not in linking section", name)
            }
            ParseError::InvalidNameIndex(index) => write!(f, "invalid function index {} in name", index),
            ParseError::Io(ref e) => write!(f, "{}", e),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ParseError::Io(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> ParseError {
        ParseError::Io(err)
    }
}

impl From<LebError> for ParseError {
    fn from(err: LebError) -> ParseError {
        match err {
            LebError::UnexpectedEnd => ParseError::UnexpectedEnd,
            LebError::Overflow => ParseError::MalformedVaruint,
            LebError::Io(e) => ParseError::Io(e),
        }
    }
}

/// Builds a `Module` one section at a time.
///
/// The builder only borrows the buffer, so it cannot release a module by
/// itself; `read_module_with_trace` hands the bytes to the finished module.
pub(crate) struct ModuleBuilder<'a, 't> {
    binary: &'a [u8],
    pos: usize,
    last_section: Option<SectionId>,
    module: Module,
    symbols: BTreeMap<&'a str, Symbol>,
    has_linking: bool,
    trace: &'t mut dyn Trace,
}

impl<'a, 't> ModuleBuilder<'a, 't> {
    pub fn new(binary: &'a [u8], trace: &'t mut dyn Trace) -> ModuleBuilder<'a, 't> {
        ModuleBuilder {
            binary,
            pos: 0,
            last_section: None,
            module: Module::default(),
            symbols: BTreeMap::new(),
            has_linking: false,
            trace,
        }
    }

    pub fn read_header(&mut self) -> Result<(), ParseError> {
        let mut reader = Cursor::new(self.binary);
        let magic_number = reader.read_u32::<LittleEndian>().map_err(|_| ParseError::NotWasm)?;
        if magic_number != MAGIC_NUMBER {
            return Err(ParseError::NotWasm);
        }
        let version = reader.read_u32::<LittleEndian>().map_err(|_| ParseError::NotWasm)?;
        if version != VERSION {
            return Err(ParseError::UnsupportedModuleVersion(version));
        }
        self.module.version = version;
        self.pos = reader.position() as usize;
        Ok(())
    }

    /// Reads the next section, returning `false` once the buffer is exhausted.
    pub fn read_section(&mut self) -> Result<bool, ParseError> {
        if self.pos >= self.binary.len() {
            return Ok(false);
        }
        let mut header = Cursor::new(self.binary);
        header.set_position(self.pos as u64);
        let id = header.read_u8().map_err(|_| ParseError::UnexpectedEnd)?;
        let id = SectionId::from_u32(id as u32).ok_or(ParseError::UnknownSectionId(id as u32))?;
        let length = header.read_varuint32()? as usize;
        let begin = header.position() as usize;
        let end = begin
            .checked_add(length)
            .filter(|&end| end <= self.binary.len())
            .ok_or(ParseError::SectionPastEnd)?;

        // reads inside a section can never run past its end
        let binary = self.binary;
        let mut reader = Cursor::new(&binary[..end]);
        reader.set_position(begin as u64);

        if id != SectionId::Custom {
            if self.last_section.map_or(false, |last| id <= last) {
                return Err(ParseError::SectionOutOfOrder(id));
            }
            self.last_section = Some(id);
            self.module.sections[id as usize] = Some(Span::new(begin, end));
            debug!("Parsing {} section, {} bytes", id.name(), length);
            self.trace(id.name().to_string());
        }
        match id {
            SectionId::Custom => self.read_custom_section(&mut reader)?,
            SectionId::Type => self.read_types(&mut reader)?,
            SectionId::Import => self.read_imports(&mut reader)?,
            SectionId::Function => self.read_functions(&mut reader)?,
            SectionId::Table => self.read_tables(&mut reader)?,
            SectionId::Memory => self.read_memories(&mut reader)?,
            SectionId::Global => self.read_globals(&mut reader)?,
            SectionId::Export => self.read_exports(&mut reader)?,
            SectionId::Start => self.read_start(&mut reader)?,
            SectionId::Element => self.read_elements(&mut reader)?,
            SectionId::Code => self.read_code(&mut reader)?,
            SectionId::Data => self.read_data(&mut reader)?,
        }
        if id != SectionId::Custom && reader.position() as usize != end {
            return Err(ParseError::SectionMalformed(id.name()));
        }
        // custom handlers may stop anywhere, the next header is always at `end`
        self.pos = end;
        Ok(true)
    }

    fn read_custom_section(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        let (name_span, name) = utils::read_string(reader)?;
        let payload = Span::new(reader.position() as usize, utils::end_of(reader));
        self.module.custom_sections.push(CustomSection { name: name_span, payload });
        debug!("Parsing custom section {}, {} bytes", name, payload.len());
        if name.starts_with(RELOC_PREFIX) {
            self.read_relocs(name, reader)
        } else if name == LINKING {
            self.has_linking = true;
            self.read_linking(reader)
        } else if name == NAME {
            self.read_names(reader)
        } else {
            self.trace(format!("custom {} skipped", name));
            Ok(())
        }
    }

    /// Checks that every exported name was declared in the linking section
    /// and releases the module, still without its bytes.
    pub(crate) fn finish(mut self) -> Result<Module, ParseError> {
        if self.has_linking {
            let unlisted = self
                .symbols
                .iter()
                .find(|&(_, symbol)| !symbol.in_linking && !symbol.exports.is_empty());
            if let Some((name, _)) = unlisted {
                return Err(ParseError::SymbolNotInLinking(name.to_string()));
            }
        }
        self.module.symbols = self.symbols.into_values().collect();
        info!(
            "Parsed module: {} types, {} functions ({} imported), {} globals, {} exports, {} relocs, {} symbols",
            self.module.function_types.len(),
            self.module.functions.len(),
            self.module.num_imported_functions,
            self.module.globals.len(),
            self.module.exports.len(),
            self.module.relocs.len(),
            self.module.symbols.len()
        );
        Ok(self.module)
    }

    fn trace(&mut self, line: String) {
        self.trace.line(line);
    }

    fn symbol(&mut self, name: &'a str, span: Span) -> &mut Symbol {
        self.symbols.entry(name).or_insert_with(|| Symbol::new(span))
    }
}

/// Parses a whole object file, handing the bytes over to the result.
pub fn read_module_with_trace(binary: Vec<u8>, trace: &mut dyn Trace) -> Result<Module, ParseError> {
    info!("Attempting to parse WebAssembly object, {} bytes", binary.len());
    let module = {
        let mut builder = ModuleBuilder::new(&binary, trace);
        builder.read_header()?;
        while builder.read_section()? {}
        builder.finish()?
    };
    Ok(Module { binary, ..module })
}
