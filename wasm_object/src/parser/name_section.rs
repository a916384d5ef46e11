use crate::parser::utils::{end_of, position, read_string, read_u8, read_varuint32, Reader};
use crate::parser::{ModuleBuilder, ParseError};
use crate::tree::functions::FunctionName;

const FUNCTION_NAMES: u8 = 1;

impl<'a, 't> ModuleBuilder<'a, 't> {
    /// Debug names. Only function names are kept; the module name and local
    /// names are skipped.
    pub(super) fn read_names(&mut self, reader: &mut Reader<'a>) -> Result<(), ParseError> {
        self.trace("name".to_string());
        let end = end_of(reader);
        while position(reader) < end {
            let kind = read_u8(reader)?;
            let len = read_varuint32(reader)? as usize;
            let sub_end = position(reader)
                .checked_add(len)
                .filter(|&sub_end| sub_end <= end)
                .ok_or(ParseError::SectionMalformed("name"))?;
            if kind == FUNCTION_NAMES {
                let count = read_varuint32(reader)?;
                for _ in 0..count {
                    let index = read_varuint32(reader)?;
                    let (span, name) = read_string(reader)?;
                    if index as usize >= self.module.functions.len() {
                        return Err(ParseError::InvalidNameIndex(index));
                    }
                    self.trace(format!("[{:03}] name {}", index, name));
                    self.module.function_names.push(FunctionName { index, name: span });
                }
                if position(reader) != sub_end {
                    return Err(ParseError::SectionMalformed("name"));
                }
            } else {
                reader.set_position(sub_end as u64);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{function_imports, functions, payload, types, ModuleWriter};
    use crate::read_module;
    use crate::ParseError;

    fn with_names(names: crate::fixtures::Payload) -> Vec<u8> {
        ModuleWriter::new()
            .section(1, types(1))
            .section(2, function_imports(1))
            .section(3, functions(1))
            .custom("name", names)
            .finish()
    }

    #[test]
    fn function_names_are_recorded() {
        let names = payload()
            .subsection(0, payload().name("object"))
            .subsection(1, payload().varuint(2).varuint(0).name("puts").varuint(1).name("main"))
            .subsection(2, payload().varuint(0));
        let module = read_module(with_names(names)).unwrap();
        let recorded: Vec<(u32, &str)> = module
            .function_names
            .iter()
            .map(|f| (f.index, module.name(f.name)))
            .collect();
        assert_eq!(recorded, vec![(0, "puts"), (1, "main")]);
    }

    #[test]
    fn name_for_missing_function_fails() {
        let names = payload().subsection(1, payload().varuint(1).varuint(2).name("ghost"));
        let err = read_module(with_names(names)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNameIndex(2)));
    }

    #[test]
    fn subsection_cannot_leave_the_section() {
        let names = payload().byte(0).varuint(40).byte(0);
        let err = read_module(with_names(names)).unwrap_err();
        assert_eq!(err.to_string(), "name section malformed");
    }
}
