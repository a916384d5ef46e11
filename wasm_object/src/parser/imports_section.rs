use crate::parser::utils::{read_limits, read_string, read_u8, read_varuint32, Reader};
use crate::parser::{ModuleBuilder, ParseError};
use crate::tree::functions::Function;
use crate::tree::globals::Global;
use crate::tree::imports::Import;
use crate::tree::language_types::{ExternalKind, ANYFUNC, I32};

const STACK_POINTER: &str = "__stack_pointer";

impl<'a, 't> ModuleBuilder<'a, 't> {
    pub(super) fn read_imports(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        let count = read_varuint32(reader)?;
        for _ in 0..count {
            let (module_span, module_name) = read_string(reader)?;
            let (field_span, field) = read_string(reader)?;
            let kind_byte = read_u8(reader)?;
            let kind = ExternalKind::from_byte(kind_byte).ok_or(ParseError::UnknownImportKind(kind_byte))?;
            let index = match kind {
                ExternalKind::Function => {
                    let type_index = read_varuint32(reader)?;
                    if type_index as usize >= self.module.function_types.len() {
                        return Err(ParseError::NonExistentType(type_index));
                    }
                    let index = self.module.functions.len();
                    self.trace(format!("[{:03}] func {}.{} type {}", index, module_name, field, type_index));
                    self.module.num_imported_functions += 1;
                    self.module.functions.push(Function { type_index });
                    index
                }
                ExternalKind::Table => {
                    if read_u8(reader)? != ANYFUNC {
                        return Err(ParseError::TableNotAnyfunc);
                    }
                    if !self.module.tables.is_empty() {
                        return Err(ParseError::MultipleTables);
                    }
                    let limits = read_limits(reader)?;
                    self.trace(format!("[000] table {}.{} {}", module_name, field, limits));
                    self.module.tables.push(limits);
                    0
                }
                ExternalKind::Memory => {
                    if !self.module.memories.is_empty() {
                        return Err(ParseError::MultipleMemories);
                    }
                    let limits = read_limits(reader)?;
                    self.trace(format!("[000] memory {}.{} {}", module_name, field, limits));
                    self.module.memories.push(limits);
                    0
                }
                ExternalKind::Global => {
                    if read_u8(reader)? != I32 {
                        return Err(ParseError::ImportedGlobalNotI32);
                    }
                    let mutable = read_u8(reader)? != 0;
                    let index = self.module.globals.len();
                    self.trace(format!(
                        "[{:03}] global {}.{}{}",
                        index,
                        module_name,
                        field,
                        if mutable { " mut" } else { "" }
                    ));
                    self.module.num_imported_globals += 1;
                    self.module.globals.push(Global {
                        is_stack_pointer: field == STACK_POINTER,
                        mutable,
                        init: 0,
                    });
                    index
                }
            };
            let import_index = self.module.imports.len() as u32;
            self.symbol(field, field_span).imports.push(import_index);
            self.module.imports.push(Import {
                module: module_span,
                field: field_span,
                kind,
                index: index as u32,
            });
        }
        Ok(())
    }
}
