use std::io::{BufRead, Read};

use super::PipelineError;

/// Splits a byte stream into lines under a fixed buffer limit.
///
/// `\n` ends a line and a `\r` right before it is dropped as well. A last
/// line without a terminator is still returned. Content that is not valid
/// UTF-8 becomes one U+FFFD per offending byte. A line of `max_line_bytes` bytes or more
/// (terminator excluded) fails with `LineTooLong`, and the reader yields
/// nothing after an error.
pub struct LineReader<R> {
    inner: R,
    max_line_bytes: usize,
    buf: Vec<u8>,
    lines_read: usize,
    done: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R, max_line_bytes: usize) -> Self {
        Self {
            inner,
            max_line_bytes: max_line_bytes.max(1),
            buf: Vec::new(),
            lines_read: 0,
            done: false,
        }
    }

    pub fn read_line(&mut self) -> Result<Option<String>, PipelineError> {
        if self.done {
            return Ok(None);
        }
        self.buf.clear();
        let n = match (&mut self.inner)
            .take(self.max_line_bytes as u64)
            .read_until(b'\n', &mut self.buf)
        {
            Ok(n) => n,
            Err(e) => {
                self.done = true;
                return Err(PipelineError::Read(e));
            }
        };
        if n == 0 {
            self.done = true;
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        } else if n == self.max_line_bytes {
            self.done = true;
            return Err(PipelineError::LineTooLong {
                line: self.lines_read + 1,
                limit: self.max_line_bytes,
            });
        } else {
            // Short read without a terminator only happens at end of input.
            self.done = true;
        }

        self.lines_read += 1;
        Ok(Some(decode_per_byte(&self.buf)))
    }
}

/// Lossy UTF-8 decoding that replaces every invalid byte with its own
/// U+FFFD, rather than one per invalid sequence.
fn decode_per_byte(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                out.push(char::REPLACEMENT_CHARACTER);
                bytes = &rest[1..];
            }
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}
