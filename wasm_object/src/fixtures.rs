use leb::{write_varint32, write_varuint32};

/// Section payload under construction.
#[derive(Default)]
pub struct Payload(Vec<u8>);

pub fn payload() -> Payload {
    Payload::default()
}

impl Payload {
    pub fn byte(mut self, byte: u8) -> Payload {
        self.0.push(byte);
        self
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Payload {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn varuint(mut self, value: u32) -> Payload {
        write_varuint32(&mut self.0, value);
        self
    }

    pub fn varint(mut self, value: i32) -> Payload {
        write_varint32(&mut self.0, value);
        self
    }

    pub fn name(self, name: &str) -> Payload {
        self.varuint(name.len() as u32).bytes(name.as_bytes())
    }

    pub fn i32_const(self, value: i32) -> Payload {
        self.byte(0x41).varint(value).byte(0x0b)
    }

    pub fn limits(self, initial: u32, maximum: Option<u32>) -> Payload {
        match maximum {
            Some(maximum) => self.byte(1).varuint(initial).varuint(maximum),
            None => self.byte(0).varuint(initial),
        }
    }

    /// A typed, length-prefixed subsection as used by `linking` and `name`.
    pub fn subsection(self, kind: u8, body: Payload) -> Payload {
        self.byte(kind).varuint(body.0.len() as u32).bytes(&body.0)
    }
}

pub struct ModuleWriter {
    bytes: Vec<u8>,
}

impl ModuleWriter {
    pub fn new() -> ModuleWriter {
        ModuleWriter {
            bytes: vec![0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00],
        }
    }

    pub fn section(mut self, id: u8, body: Payload) -> ModuleWriter {
        self.bytes.push(id);
        write_varuint32(&mut self.bytes, body.0.len() as u32);
        self.bytes.extend_from_slice(&body.0);
        self
    }

    pub fn custom(self, name: &str, body: Payload) -> ModuleWriter {
        self.section(0, payload().name(name).bytes(&body.0))
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

// Common building blocks for tests across sections.

pub fn types(count: u32) -> Payload {
    let mut body = payload().varuint(count);
    for _ in 0..count {
        body = body.byte(0x60).varuint(0).varuint(0);
    }
    body
}

pub fn function_imports(count: u32) -> Payload {
    let mut body = payload().varuint(count);
    for i in 0..count {
        body = body.name("env").name(&format!("imported{}", i)).byte(0).varuint(0);
    }
    body
}

pub fn functions(count: u32) -> Payload {
    let mut body = payload().varuint(count);
    for _ in 0..count {
        body = body.varuint(0);
    }
    body
}

pub fn function_exports(entries: &[(&str, u32)]) -> Payload {
    let mut body = payload().varuint(entries.len() as u32);
    for &(name, index) in entries {
        body = body.name(name).byte(0).varuint(index);
    }
    body
}

pub fn symbol_info(names: &[&str]) -> Payload {
    let mut body = payload().varuint(names.len() as u32);
    for name in names {
        body = body.name(name).varuint(0);
    }
    payload().subsection(2, body)
}
