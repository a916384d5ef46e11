use crate::parser::utils::{end_of, position, read_varint32, read_varuint32, Reader};
use crate::parser::{ModuleBuilder, ParseError};
use crate::tree::relocs::{Reloc, RelocKind};
use crate::tree::section::SectionId;

impl<'a, 't> ModuleBuilder<'a, 't> {
    pub(super) fn read_relocs(&mut self, name: &str, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        self.trace(name.to_string());
        let section_id = read_varuint32(reader)?;
        let section = match SectionId::from_u32(section_id) {
            Some(id @ SectionId::Code) | Some(id @ SectionId::Data) => id,
            _ => return Err(ParseError::UnsupportedRelocSection(section_id)),
        };
        let count = read_varuint32(reader)?;
        self.trace(format!("{} relocs", count));
        for i in 0..count {
            let kind = read_varuint32(reader)?;
            let kind = RelocKind::from_u32(kind).ok_or(ParseError::UnknownRelocKind(kind))?;
            let offset = read_varuint32(reader)?;
            let index = read_varuint32(reader)?;
            let addend = if kind.has_addend() { Some(read_varint32(reader)?) } else { None };
            match addend {
                Some(addend) => self.trace(format!(
                    "[{:03}] {} offset:{} index:{} addend:{}",
                    i, kind, offset, index, addend
                )),
                None => self.trace(format!("[{:03}] {} offset:{} index:{}", i, kind, offset, index)),
            }
            self.module.relocs.push(Reloc {
                section,
                kind,
                offset,
                index,
                addend,
            });
        }
        if position(reader) != end_of(reader) {
            return Err(ParseError::SectionMalformed("reloc"));
        }
        Ok(())
    }
}
