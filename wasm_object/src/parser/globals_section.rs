use crate::parser::utils::{read_init_expr_i32, read_u8, read_varuint32, Reader};
use crate::parser::{ModuleBuilder, ParseError};
use crate::tree::globals::Global;
use crate::tree::language_types::I32;

impl<'a, 't> ModuleBuilder<'a, 't> {
    /// Local globals have no names yet, so none of them is ever the stack pointer.
    pub(super) fn read_globals(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        let count = read_varuint32(reader)?;
        for _ in 0..count {
            if read_u8(reader)? != I32 {
                return Err(ParseError::GlobalNotI32);
            }
            let mutable = read_u8(reader)? != 0;
            let init = read_init_expr_i32(reader)?;
            self.trace(format!(
                "[{:03}] global{} = {}",
                self.module.globals.len(),
                if mutable { " mut" } else { "" },
                init
            ));
            self.module.globals.push(Global {
                is_stack_pointer: false,
                mutable,
                init,
            });
        }
        Ok(())
    }
}
