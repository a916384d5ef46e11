use crate::parser::utils::Reader;
use crate::parser::{ModuleBuilder, ParseError};

impl<'a, 't> ModuleBuilder<'a, 't> {
    /// Objects handed to the linker may not name a start function.
    pub(super) fn read_start(&mut self, _reader: &mut Reader<'a>) -> Result<(), ParseError> {
        Err(ParseError::StartUnsupported)
    }
}
