//! Output sinks: filesystem path or caller-owned fixed-capacity buffer.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Where encoded bytes go.
///
/// The buffer variant wraps a caller-owned region whose capacity is fixed
/// at call time. Writing is all-or-nothing: if the data does not fit, the
/// region is left untouched and the write fails with
/// [`Error::BufferTooSmall`]. The region is never grown and never overrun.
pub enum OutputSink<'a> {
    /// Create or truncate the file at this path.
    File(&'a Path),
    /// Write into this region; capacity is the slice length.
    Buffer(&'a mut [u8]),
}

impl OutputSink<'_> {
    /// Write the full encoded result, returning the number of bytes
    /// written.
    pub fn write(&mut self, data: &[u8]) -> Result<u64> {
        match self {
            OutputSink::File(path) => {
                fs::write(path, data)?;
                Ok(data.len() as u64)
            }
            OutputSink::Buffer(buffer) => {
                if data.len() > buffer.len() {
                    return Err(Error::BufferTooSmall {
                        needed: data.len(),
                        capacity: buffer.len(),
                    });
                }
                buffer[..data.len()].copy_from_slice(data);
                Ok(data.len() as u64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_write_fits() {
        let mut region = [0u8; 8];
        let written = OutputSink::Buffer(&mut region).write(b"abc").unwrap();
        assert_eq!(written, 3);
        assert_eq!(&region[..3], b"abc");
        assert_eq!(&region[3..], &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn buffer_exact_capacity() {
        let mut region = [0u8; 4];
        let written = OutputSink::Buffer(&mut region).write(b"wxyz").unwrap();
        assert_eq!(written, 4);
        assert_eq!(&region, b"wxyz");
    }

    #[test]
    fn buffer_too_small_is_all_or_nothing() {
        let mut region = [0xAB_u8; 4];
        let err = OutputSink::Buffer(&mut region).write(b"toolarge").unwrap_err();
        assert!(matches!(
            err,
            Error::BufferTooSmall {
                needed: 8,
                capacity: 4
            }
        ));
        // not a single byte may have been written
        assert_eq!(region, [0xAB; 4]);
    }

    #[test]
    fn file_write_creates_and_truncates() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.bin");

        OutputSink::File(&path).write(b"first contents").unwrap();
        let written = OutputSink::File(&path).write(b"second").unwrap();
        assert_eq!(written, 6);
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn file_write_unwritable_path_is_io_error() {
        let err = OutputSink::File(Path::new("/nonexistent-dir/out.bin"))
            .write(b"data")
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
