use crate::parser::utils::{read_limits, read_varuint32, Reader};
use crate::parser::{ModuleBuilder, ParseError};

impl<'a, 't> ModuleBuilder<'a, 't> {
    pub(super) fn read_memories(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        let count = read_varuint32(reader)?;
        for _ in 0..count {
            if !self.module.memories.is_empty() {
                return Err(ParseError::MultipleMemories);
            }
            let limits = read_limits(reader)?;
            self.trace(format!("[000] memory {}", limits));
            self.module.memories.push(limits);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{payload, ModuleWriter};
    use crate::read_module;
    use crate::ParseError;

    #[test]
    fn imported_or_declared_memory_alone_is_fine() {
        let imported = payload().varuint(1).name("env").name("__linear_memory").byte(2).limits(1, None);
        let module = read_module(ModuleWriter::new().section(2, imported).finish()).unwrap();
        assert_eq!(module.memories.len(), 1);

        let declared = payload().varuint(1).limits(2, Some(16));
        let module = read_module(ModuleWriter::new().section(5, declared).finish()).unwrap();
        assert_eq!(module.memories[0].maximum, Some(16));
    }

    #[test]
    fn imported_and_declared_memory_conflict() {
        let imported = payload().varuint(1).name("env").name("__linear_memory").byte(2).limits(1, None);
        let declared = payload().varuint(1).limits(1, None);
        let bytes = ModuleWriter::new().section(2, imported).section(5, declared).finish();
        let err = read_module(bytes).unwrap_err();
        assert!(matches!(err, ParseError::MultipleMemories));
        assert_eq!(err.to_string(), "multiple memories");
    }
}
