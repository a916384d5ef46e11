use crate::parser::utils::{read_limits, read_u8, read_varuint32, Reader};
use crate::parser::{ModuleBuilder, ParseError};
use crate::tree::language_types::ANYFUNC;

impl<'a, 't> ModuleBuilder<'a, 't> {
    pub(super) fn read_tables(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        let count = read_varuint32(reader)?;
        for _ in 0..count {
            if read_u8(reader)? != ANYFUNC {
                return Err(ParseError::TableNotAnyfunc);
            }
            if !self.module.tables.is_empty() {
                return Err(ParseError::MultipleTables);
            }
            let limits = read_limits(reader)?;
            self.trace(format!("[000] table {}", limits));
            self.module.tables.push(limits);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{payload, ModuleWriter};
    use crate::read_module;
    use crate::tree::language_types::ResizableLimits;
    use crate::ParseError;

    fn table() -> crate::fixtures::Payload {
        payload().varuint(1).byte(0x70).limits(3, Some(3))
    }

    #[test]
    fn standalone_table() {
        let module = read_module(ModuleWriter::new().section(4, table()).finish()).unwrap();
        assert_eq!(module.tables, vec![ResizableLimits { initial: 3, maximum: Some(3) }]);
    }

    #[test]
    fn imported_and_declared_table_conflict() {
        let imports = payload().varuint(1).name("env").name("t").byte(1).byte(0x70).limits(1, None);
        let bytes = ModuleWriter::new().section(2, imports).section(4, table()).finish();
        let err = read_module(bytes).unwrap_err();
        assert!(matches!(err, ParseError::MultipleTables));
        assert_eq!(err.to_string(), "multiple tables");
    }

    #[test]
    fn two_declared_tables_conflict() {
        let body = payload().varuint(2).byte(0x70).limits(1, None).byte(0x70).limits(1, None);
        let bytes = ModuleWriter::new().section(4, body).finish();
        assert!(matches!(read_module(bytes), Err(ParseError::MultipleTables)));
    }
}
