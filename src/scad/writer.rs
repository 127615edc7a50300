use std::{fs::File, io::{BufWriter, Write}, path::{Path, PathBuf}};

use anyhow::Result;

use crate::error::ScadError;

/// Buffered writer for a `.scad` file. Creates the file, or truncates an existing one.
pub(crate) struct ScadWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for ScadWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl ScadWriter {
    pub(crate) fn new(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| ScadError::io(path, e))?;
        Ok(Self { path: path.to_path_buf(), writer: BufWriter::new(file) })
    }

    /// Write a complete script and flush it. Returns the number of characters written.
    pub(crate) fn write_script(mut self, code: &str) -> Result<usize> {
        self.write_all(code.as_bytes())
            .and_then(|_| self.flush())
            .map_err(|e| ScadError::io(&self.path, e))?;
        Ok(code.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.scad");
        std::fs::write(&path, "stale content that is longer than the script").unwrap();

        let written = ScadWriter::new(&path).unwrap().write_script("polygon(p);\n").unwrap();
        assert_eq!(written, 12);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "polygon(p);\n");
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScadWriter::new(&dir.path().join("no/such/dir/model.scad")).err().unwrap();
        assert_eq!(ScadError::kind_of(&err), Some(ErrorKind::Io));
    }
}
