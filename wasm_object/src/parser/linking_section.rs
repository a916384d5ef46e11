use crate::parser::utils::{end_of, position, read_string, read_u8, read_varuint32, Reader};
use crate::parser::{ModuleBuilder, ParseError};

const SYMBOL_INFO: u8 = 0x2;
const DATA_SIZE: u8 = 0x3;
const DATA_ALIGNMENT: u8 = 0x4;
const SEGMENT_INFO: u8 = 0x5;

impl<'a, 't> ModuleBuilder<'a, 't> {
    pub(super) fn read_linking(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        self.trace("linking".to_string());
        let end = end_of(reader);
        while position(reader) < end {
            let kind = read_u8(reader)?;
            let len = read_varuint32(reader)? as usize;
            let sub_end = position(reader)
                .checked_add(len)
                .filter(|&sub_end| sub_end <= end)
                .ok_or(ParseError::SectionMalformed("linking"))?;
            match kind {
                SYMBOL_INFO => self.read_symbol_info(reader)?,
                DATA_SIZE => {
                    self.module.data_size = read_varuint32(reader)?;
                    self.trace(format!("data size {}", self.module.data_size));
                }
                DATA_ALIGNMENT => {
                    self.module.data_alignment = read_varuint32(reader)?;
                    self.trace(format!("data alignment {}", self.module.data_alignment));
                }
                SEGMENT_INFO => self.read_segment_info(reader)?,
                _ => return Err(ParseError::UnknownLinkingSubsection(kind)),
            }
            if position(reader) != sub_end {
                return Err(ParseError::SectionMalformed("linking"));
            }
        }
        Ok(())
    }

    fn read_symbol_info(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        let count = read_varuint32(reader)?;
        for _ in 0..count {
            let (span, name) = read_string(reader)?;
            let flags = read_varuint32(reader)?;
            self.trace(format!("symbol {} flags={}", name, flags));
            let symbol = self.symbol(name, span);
            symbol.flags = flags;
            symbol.in_linking = true;
        }
        Ok(())
    }

    // TODO: attach alignment and flags to the data segments once the linker needs them
    fn read_segment_info(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        let count = read_varuint32(reader)?;
        for _ in 0..count {
            let (_, name) = read_string(reader)?;
            let alignment = read_varuint32(reader)?;
            let flags = read_varuint32(reader)?;
            self.trace(format!("segment {} alignment={} flags={}", name, alignment, flags));
        }
        Ok(())
    }
}
