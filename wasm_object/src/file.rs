use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::{ErrorKind, SeekFrom};
use std::path::Path;

/// An open object file. The handle is closed when this is dropped.
pub struct WasmFile {
    file: File,
}

impl WasmFile {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<WasmFile> {
        let path = path.as_ref();
        debug!("Opening {}", path.display());
        let file = File::open(path)
            .map_err(|e| io::Error::new(e.kind(), format!("can not open {}: {}", path.display(), e)))?;
        Ok(WasmFile { file })
    }

    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<WasmFile> {
        let path = path.as_ref();
        debug!("Creating {}", path.display());
        let file = File::create(path)
            .map_err(|e| io::Error::new(e.kind(), format!("can not create {}: {}", path.display(), e)))?;
        Ok(WasmFile { file })
    }

    pub fn size(&mut self) -> io::Result<u64> {
        let size = self.file.seek(SeekFrom::End(0))?;
        self.file.seek(SeekFrom::Start(0))?;
        Ok(size)
    }

    /// Reads the whole file, failing if fewer bytes arrive than `size` reported.
    pub fn read(&mut self) -> io::Result<Vec<u8>> {
        let size = self.size()? as usize;
        let mut buffer = vec![0; size];
        self.file
            .read_exact(&mut buffer)
            .map_err(|e| io::Error::new(ErrorKind::UnexpectedEof, format!("read failed: {}", e)))?;
        Ok(buffer)
    }

    pub fn write(&mut self, buffer: &[u8]) -> io::Result<()> {
        self.file
            .write_all(buffer)
            .map_err(|e| io::Error::new(e.kind(), format!("write failed: {}", e)))?;
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn scratch(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("wasm_object-{}-{}", std::process::id(), name))
    }

    #[test]
    fn write_then_read_whole_file() {
        let path = scratch("roundtrip.o");
        {
            let mut file = WasmFile::create(&path).unwrap();
            file.write(&[0, 0x61, 0x73, 0x6d, 1, 0, 0, 0]).unwrap();
        }
        let mut file = WasmFile::open(&path).unwrap();
        assert_eq!(file.size().unwrap(), 8);
        assert_eq!(file.read().unwrap(), vec![0, 0x61, 0x73, 0x6d, 1, 0, 0, 0]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn open_missing_file_names_it() {
        let path = scratch("missing.o");
        let err = WasmFile::open(&path).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("can not open"));
    }
}
