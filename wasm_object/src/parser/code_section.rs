use crate::parser::utils::{end_of, position, skip, Reader};
use crate::parser::{ModuleBuilder, ParseError};

impl<'a, 't> ModuleBuilder<'a, 't> {
    /// Function bodies stay opaque; relocations address them by offset.
    pub(super) fn read_code(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        let remaining = end_of(reader) - position(reader);
        skip(reader, remaining)?;
        Ok(())
    }
}
