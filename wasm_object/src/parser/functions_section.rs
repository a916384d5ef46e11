use crate::parser::utils::{read_varuint32, Reader};
use crate::parser::{ModuleBuilder, ParseError};
use crate::tree::functions::Function;

impl<'a, 't> ModuleBuilder<'a, 't> {
    pub(super) fn read_functions(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        let count = read_varuint32(reader)?;
        for _ in 0..count {
            let type_index = read_varuint32(reader)?;
            if type_index as usize >= self.module.function_types.len() {
                return Err(ParseError::NonExistentType(type_index));
            }
            self.trace(format!("[{:03}] func type {}", self.module.functions.len(), type_index));
            self.module.functions.push(Function { type_index });
        }
        Ok(())
    }
}
