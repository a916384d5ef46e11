use crate::parser::utils::{read_init_expr_i32, read_varuint32, skip, Reader};
use crate::parser::{ModuleBuilder, ParseError};
use crate::tree::data::DataSegment;

impl<'a, 't> ModuleBuilder<'a, 't> {
    /// Payloads stay in the buffer. Segments must tile memory from address 0
    /// in ascending order.
    pub(super) fn read_data(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        let count = read_varuint32(reader)?;
        for i in 0..count {
            if read_varuint32(reader)? != 0 {
                return Err(ParseError::MemoryIndexNotZero);
            }
            let offset = read_init_expr_i32(reader)?;
            let size = read_varuint32(reader)?;
            let data_begin = skip(reader, size as usize).map_err(|_| ParseError::DataPastEnd)?;
            self.trace(format!("[{:03}] data offset:{} size:{}", i, offset, size));
            self.module.data_segments.push(DataSegment {
                offset,
                size,
                data_begin,
            });
        }
        let mut next = 0u64;
        for segment in &self.module.data_segments {
            if segment.offset as u64 != next {
                return Err(ParseError::SegmentsNotContiguous);
            }
            next += segment.size as u64;
        }
        Ok(())
    }
}
