use super::listing::io_error;
use crate::error;
use crate::lang::{ast::FileMode, Error};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

enum Stream {
    Input(BufReader<File>),
    Output(BufWriter<File>),
}

/// ## Open file channels
///
/// Channels are small integers chosen by the program. Dropping the table
/// flushes and closes everything.

#[derive(Default)]
pub struct Files {
    streams: HashMap<i32, Stream>,
}

impl std::fmt::Debug for Files {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut open: Vec<&i32> = self.streams.keys().collect();
        open.sort();
        write!(f, "Files {:?}", open)
    }
}

impl Files {
    pub fn open(&mut self, channel: i32, filename: &str, mode: FileMode) -> Result<()> {
        if self.streams.contains_key(&channel) {
            return Err(error!(FileAlreadyOpen));
        }
        let stream = match mode {
            FileMode::Input => Stream::Input(BufReader::new(
                File::open(filename).map_err(io_error)?,
            )),
            FileMode::Output => Stream::Output(BufWriter::new(
                File::create(filename).map_err(io_error)?,
            )),
        };
        debug!(channel, filename, ?mode, "open");
        self.streams.insert(channel, stream);
        Ok(())
    }

    pub fn close(&mut self, channel: i32) -> Result<()> {
        match self.streams.remove(&channel) {
            Some(Stream::Output(mut w)) => {
                debug!(channel, "close");
                w.flush().map_err(io_error)
            }
            Some(Stream::Input(_)) => {
                debug!(channel, "close");
                Ok(())
            }
            None => Err(error!(BadFileNumber)),
        }
    }

    pub fn close_all(&mut self) {
        for (_, stream) in self.streams.drain() {
            if let Stream::Output(mut w) = stream {
                let _ = w.flush();
            }
        }
    }

    pub fn write(&mut self, channel: i32, text: &str) -> Result<()> {
        match self.streams.get_mut(&channel) {
            Some(Stream::Output(w)) => w.write_all(text.as_bytes()).map_err(io_error),
            Some(Stream::Input(_)) => Err(error!(BadFileMode)),
            None => Err(error!(BadFileNumber)),
        }
    }

    /// Read up to the next `,` `:` `;` or newline. Carriage returns are
    /// dropped.
    pub fn read_field(&mut self, channel: i32) -> Result<String> {
        let reader = match self.streams.get_mut(&channel) {
            Some(Stream::Input(r)) => r,
            Some(Stream::Output(_)) => return Err(error!(BadFileMode)),
            None => return Err(error!(BadFileNumber)),
        };
        let mut field: Vec<u8> = vec![];
        loop {
            let byte = match reader.fill_buf().map_err(io_error)?.first() {
                Some(b) => *b,
                None if field.is_empty() => return Err(error!(InputPastEnd)),
                None => break,
            };
            reader.consume(1);
            match byte {
                b',' | b':' | b';' | b'\n' => break,
                b'\r' => {}
                _ => field.push(byte),
            }
        }
        Ok(String::from_utf8_lossy(&field).into_owned())
    }
}

impl Drop for Files {
    fn drop(&mut self) {
        self.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp(name: &str) -> String {
        let mut path = std::env::temp_dir();
        path.push(format!("kbasic_{}_{}", std::process::id(), name));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_write_then_read_fields() {
        let path = temp("fields.txt");
        let mut files = Files::default();
        files.open(1, &path, FileMode::Output).unwrap();
        files.write(1, "ab,12;x\r\nlast").unwrap();
        assert_eq!(files.read_field(1).unwrap_err().code(), 54);
        files.close(1).unwrap();
        files.open(2, &path, FileMode::Input).unwrap();
        assert_eq!(files.read_field(2).unwrap(), "ab");
        assert_eq!(files.read_field(2).unwrap(), "12");
        assert_eq!(files.read_field(2).unwrap(), "x");
        assert_eq!(files.read_field(2).unwrap(), "last");
        assert_eq!(files.read_field(2).unwrap_err().code(), 62);
        drop(files);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_channel_errors() {
        let path = temp("channels.txt");
        let mut files = Files::default();
        assert_eq!(files.close(3).unwrap_err().code(), 52);
        files.open(3, &path, FileMode::Output).unwrap();
        assert_eq!(
            files.open(3, &path, FileMode::Output).unwrap_err().code(),
            55
        );
        assert_eq!(
            files
                .open(4, &temp("missing.txt"), FileMode::Input)
                .unwrap_err()
                .code(),
            53
        );
        files.close(3).unwrap();
        let _ = std::fs::remove_file(&path);
    }
}
