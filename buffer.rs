use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Error;

/// Half-open byte range into the corpus buffer.
///
/// A span never owns bytes; it is only meaningful together with the
/// buffer it was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    /// Resolve the span against its buffer.
    pub fn bytes<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.start..self.start + self.len]
    }
}

/// The whole corpus, read into a single allocation up front.
///
/// The scan folds lowercase letters to uppercase in place, so after the
/// first pass this holds normalized scratch, not the original file
/// contents. Spans compare by plain byte equality over these bytes.
#[derive(Debug)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    /// Read an entire file into one allocation sized from its metadata.
    ///
    /// Fails if the file cannot be opened or yields fewer bytes than its
    /// reported size.
    pub fn load(path: &Path) -> Result<ByteBuffer, Error> {
        let io_err = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size = file.metadata().map_err(io_err)?.len() as usize;

        let mut data = Vec::new();
        data.try_reserve_exact(size).map_err(|_| Error::OutOfMemory {
            what: "corpus buffer",
            requested: size,
        })?;
        data.resize(size, 0);
        file.read_exact(&mut data).map_err(io_err)?;

        Ok(ByteBuffer { data })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
