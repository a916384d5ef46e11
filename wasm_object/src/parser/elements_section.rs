use std::collections::BTreeMap;

use crate::parser::utils::{read_init_expr_i32, read_varuint32, Reader};
use crate::parser::{ModuleBuilder, ParseError};

impl<'a, 't> ModuleBuilder<'a, 't> {
    /// Segments may arrive in any order, but together they must fill the
    /// table from slot 0 without gaps.
    pub(super) fn read_elements(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        // sparse until every segment is in, offsets come straight from the input
        let mut slots: BTreeMap<u32, u32> = BTreeMap::new();
        let count = read_varuint32(reader)?;
        for _ in 0..count {
            if read_varuint32(reader)? != 0 {
                return Err(ParseError::TableIndexNotZero);
            }
            let offset = read_init_expr_i32(reader)?;
            let num = read_varuint32(reader)?;
            for j in 0..num {
                let slot = offset.checked_add(j).ok_or(ParseError::SectionMalformed("elem"))?;
                let function = read_varuint32(reader)?;
                if function as usize >= self.module.functions.len() {
                    return Err(ParseError::InvalidElementFunction(function));
                }
                self.trace(format!("[{:03}] = func {}", slot, function));
                slots.insert(slot, function);
            }
        }
        let hole = slots.keys().enumerate().find(|&(expected, &slot)| expected as u64 != slot as u64);
        if let Some((expected, _)) = hole {
            return Err(ParseError::HoleInTable(expected));
        }
        self.module.elements = slots.into_values().collect();
        Ok(())
    }
}
