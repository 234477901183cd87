use crate::types::RawLine;
use std::io::{ErrorKind, Read};
use tracing::warn;

/// Default number of bytes pulled from the source per read
pub const DEFAULT_CHUNK_SIZE: usize = 4096;
/// Largest chunk requested in one read (16 MiB)
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Line stream over a byte reader
///
/// Reads the source in fixed-size chunks and yields newline-terminated lines
/// (terminator stripped) in order. A trailing partial line is carried across
/// reads until its terminator arrives; one that never does is dropped when the
/// source ends. Read failures end the stream like end-of-input.
pub struct LineStream<R> {
    reader: R,
    chunk_size: usize,
    buffer: Vec<u8>,
    /// Bytes of `buffer` already handed out as lines
    consumed: usize,
    /// Bytes of `buffer` after `consumed` known to contain no terminator
    scanned: usize,
    next_ordinal: usize,
    pub eof: bool,
}

impl<R: Read> LineStream<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    /// Chunk sizes outside `1..=MAX_CHUNK_SIZE` are clamped into that range
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.clamp(1, MAX_CHUNK_SIZE),
            buffer: Vec::new(),
            consumed: 0,
            scanned: 0,
            next_ordinal: 1,
            eof: false,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Ordinal the next yielded line will carry
    pub fn next_ordinal(&self) -> usize {
        self.next_ordinal
    }

    /// Take the next complete line out of the buffer, if there is one
    fn take_buffered_line(&mut self) -> Option<RawLine> {
        let pending = &self.buffer[self.consumed + self.scanned..];
        match pending.iter().position(|&b| b == b'\n') {
            Some(offset) => {
                let line_end = self.consumed + self.scanned + offset;
                let bytes = self.buffer[self.consumed..line_end].to_vec();
                self.consumed = line_end + 1;
                self.scanned = 0;

                let line = RawLine::new(self.next_ordinal, bytes);
                self.next_ordinal += 1;
                Some(line)
            }
            None => {
                self.scanned = self.buffer.len() - self.consumed;
                None
            }
        }
    }

    /// Append one chunk from the reader; false once the source is exhausted
    fn fill_buffer(&mut self) -> bool {
        if self.consumed > 0 {
            self.buffer.drain(..self.consumed);
            self.consumed = 0;
        }

        let start = self.buffer.len();
        self.buffer.resize(start + self.chunk_size, 0);

        loop {
            match self.reader.read(&mut self.buffer[start..]) {
                Ok(0) => {
                    self.buffer.truncate(start);
                    return false;
                }
                Ok(read) => {
                    self.buffer.truncate(start + read);
                    return true;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    warn!(
                        "read failed after line {}: {}",
                        self.next_ordinal - 1,
                        err
                    );
                    self.buffer.truncate(start);
                    return false;
                }
            }
        }
    }
}

impl<R: Read> Iterator for LineStream<R> {
    type Item = RawLine;

    fn next(&mut self) -> Option<RawLine> {
        loop {
            if let Some(line) = self.take_buffered_line() {
                return Some(line);
            }
            if self.eof || !self.fill_buffer() {
                self.eof = true;
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn collect_lines(data: &[u8], chunk_size: usize) -> Vec<Vec<u8>> {
        LineStream::with_chunk_size(data, chunk_size)
            .map(|line| line.bytes)
            .collect()
    }

    /// Reader that yields its data and then fails
    struct FailingReader<'a> {
        data: &'a [u8],
    }

    impl Read for FailingReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::Other, "device gone"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_lines_and_ordinals() {
        let lines: Vec<RawLine> = LineStream::new(&b"alpha\nbeta\n\ngamma\n"[..]).collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], RawLine::new(1, b"alpha".to_vec()));
        assert_eq!(lines[1], RawLine::new(2, b"beta".to_vec()));
        assert_eq!(lines[2], RawLine::new(3, Vec::new()));
        assert_eq!(lines[3], RawLine::new(4, b"gamma".to_vec()));
    }

    #[test]
    fn test_unterminated_tail_is_dropped() {
        assert_eq!(collect_lines(b"one\ntwo", 4096), vec![b"one".to_vec()]);
        assert!(collect_lines(b"no terminator", 3).is_empty());
        assert!(collect_lines(b"", 16).is_empty());
    }

    #[test]
    fn test_chunk_size_invariance() {
        let data = b"#airframe_info\n2025-03-17, 09:59:11,  -05:00,\n\nshort\nx\n";
        let expected = collect_lines(data, 4096);
        for chunk_size in 1..=data.len() + 2 {
            assert_eq!(
                collect_lines(data, chunk_size),
                expected,
                "chunk size {chunk_size}"
            );
        }
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let stream = LineStream::with_chunk_size(&b"a\n"[..], 0);
        assert_eq!(stream.chunk_size(), 1);
        assert_eq!(stream.count(), 1);
    }

    #[test]
    fn test_huge_chunk_size_is_clamped() {
        let stream = LineStream::with_chunk_size(&b"a\nb\n"[..], usize::MAX);
        assert_eq!(stream.chunk_size(), MAX_CHUNK_SIZE);
        assert_eq!(stream.count(), 2);
    }

    #[test]
    fn test_carriage_return_is_kept() {
        assert_eq!(collect_lines(b"a\r\nb\r\n", 2), vec![b"a\r".to_vec(), b"b\r".to_vec()]);
    }

    #[test]
    fn test_read_error_ends_stream() {
        let reader = FailingReader {
            data: b"first\nsecond\nthird",
        };
        let mut stream = LineStream::with_chunk_size(reader, 4);
        assert_eq!(stream.next().map(|l| l.bytes), Some(b"first".to_vec()));
        assert_eq!(stream.next().map(|l| l.bytes), Some(b"second".to_vec()));
        assert_eq!(stream.next(), None);
        assert!(stream.eof);
        assert_eq!(stream.next(), None);
    }
}
