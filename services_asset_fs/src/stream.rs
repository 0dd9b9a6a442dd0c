//! Buffered asset streams

use services_storage::ByteStream;
use std::io::{self, BufRead, Cursor, Read, Seek, SeekFrom};

/// A fully buffered asset
///
/// Supports reading, seeking and line access over bytes that were read
/// from the tree in one piece.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStream {
    cursor: Cursor<Vec<u8>>,
}

impl MemoryStream {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Total size in bytes
    pub fn size(&self) -> usize {
        self.cursor.get_ref().len()
    }

    /// Current read position
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    pub fn is_end_of_file(&self) -> bool {
        self.position() >= self.size() as u64
    }

    /// Whole buffer, independent of the read position
    pub fn as_bytes(&self) -> &[u8] {
        self.cursor.get_ref()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.cursor.into_inner()
    }
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl BufRead for MemoryStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt)
    }
}

impl Seek for MemoryStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl ByteStream for MemoryStream {
    fn available(&mut self) -> io::Result<usize> {
        let remaining = (self.size() as u64).saturating_sub(self.position());
        Ok(remaining as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_position() {
        let mut stream = MemoryStream::new(b"0123456789".to_vec());
        assert_eq!(stream.size(), 10);
        assert_eq!(stream.position(), 0);

        let mut buf = [0u8; 4];
        stream.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"0123");
        assert_eq!(stream.position(), 4);
        assert_eq!(stream.available().unwrap(), 6);
    }

    #[test]
    fn test_seek_modes() {
        let mut stream = MemoryStream::new(b"0123456789".to_vec());
        assert_eq!(stream.seek(SeekFrom::End(-2)).unwrap(), 8);
        assert_eq!(stream.seek(SeekFrom::Current(-3)).unwrap(), 5);
        assert_eq!(stream.seek(SeekFrom::Start(1)).unwrap(), 1);

        let mut rest = Vec::new();
        stream.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"123456789");
        assert!(stream.is_end_of_file());
    }

    #[test]
    fn test_seek_past_end_reads_nothing() {
        let mut stream = MemoryStream::new(b"abc".to_vec());
        stream.seek(SeekFrom::Start(10)).unwrap();
        assert!(stream.is_end_of_file());
        assert_eq!(stream.available().unwrap(), 0);
        let mut buf = [0u8; 2];
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_lines() {
        let stream = MemoryStream::new(b"first\nsecond\nlast".to_vec());
        let lines: Vec<String> = stream.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["first", "second", "last"]);
    }

    #[test]
    fn test_empty_stream() {
        let stream = MemoryStream::default();
        assert_eq!(stream.size(), 0);
        assert!(stream.is_end_of_file());
        assert!(stream.into_inner().is_empty());
    }
}
