use crate::parser::utils::{read_string, read_u8, read_varuint32, Reader};
use crate::parser::{ModuleBuilder, ParseError};
use crate::tree::exports::Export;
use crate::tree::language_types::ExternalKind;

impl<'a, 't> ModuleBuilder<'a, 't> {
    /// Only locally defined functions and globals may be exported; table and
    /// memory exports are read and dropped.
    pub(super) fn read_exports(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        let count = read_varuint32(reader)?;
        for _ in 0..count {
            let (name_span, name) = read_string(reader)?;
            let kind = ExternalKind::from_byte(read_u8(reader)?);
            let index = read_varuint32(reader)?;
            let (kind, first, end) = match kind {
                Some(ExternalKind::Function) => (
                    ExternalKind::Function,
                    self.module.num_imported_functions,
                    self.module.functions.len(),
                ),
                Some(ExternalKind::Global) => (
                    ExternalKind::Global,
                    self.module.num_imported_globals,
                    self.module.globals.len(),
                ),
                _ => {
                    self.trace(format!("[---] skipped {}", name));
                    continue;
                }
            };
            if index < first || index as usize >= end {
                return Err(ParseError::InvalidExportIndex(kind, index));
            }
            let tag = if kind == ExternalKind::Function { "func" } else { "global" };
            self.trace(format!("[{:03}] {} {}", index, tag, name));
            let export_index = self.module.exports.len() as u32;
            self.symbol(name, name_span).exports.push(export_index);
            self.module.exports.push(Export {
                name: name_span,
                kind,
                index,
            });
        }
        Ok(())
    }
}
