use crate::parser::utils::{read_u8, read_varuint32, Reader};
use crate::parser::{ModuleBuilder, ParseError};
use crate::tree::language_types::{ValueType, FUNC};
use crate::tree::types::FunctionType;

fn list(types: &[ValueType]) -> String {
    types.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ")
}

impl<'a, 't> ModuleBuilder<'a, 't> {
    pub(super) fn read_types(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        let count = read_varuint32(reader)?;
        for i in 0..count {
            let form = read_u8(reader)?;
            if form != FUNC {
                return Err(ParseError::InvalidTypeForm(form));
            }
            let param_count = read_varuint32(reader)?;
            let mut params = vec![];
            for _ in 0..param_count {
                params.push(ValueType::from_byte(read_u8(reader)?));
            }
            let return_count = read_varuint32(reader)?;
            if return_count > 1 {
                return Err(ParseError::TooManyReturns);
            }
            let mut returns = vec![];
            if return_count == 1 {
                returns.push(ValueType::from_byte(read_u8(reader)?));
            }
            self.trace(format!("[{:03}] type ({}) -> ({})", i, list(&params), list(&returns)));
            self.module.function_types.push(FunctionType { params, returns });
        }
        Ok(())
    }
}
