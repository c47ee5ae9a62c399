//! The byte sink for drawing operators.

use std::io;

use pdf_writer::Content;

/// The content stream of a page.
///
/// Drawing operators are written as raw bytes, either through the
/// [`io::Write`] implementation or by pushing a finished [`Content`] buffer.
/// The stream is compressed when the document is written, depending on the
/// serialize settings.
#[derive(Debug, Default, Clone)]
pub struct ContentStream {
    buf: Vec<u8>,
}

impl ContentStream {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append the operators of a content buffer.
    pub fn push_content(&mut self, content: Content) {
        if !self.buf.is_empty() && !self.buf.ends_with(b"\n") {
            self.buf.push(b'\n');
        }
        self.buf.extend(content.finish());
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl io::Write for ContentStream {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn write_and_push() {
        let mut stream = ContentStream::new();
        write!(stream, "0 0 m 10 10 l S").unwrap();

        let mut content = Content::new();
        content.save_state();
        content.restore_state();
        stream.push_content(content);

        assert!(stream.as_bytes().starts_with(b"0 0 m 10 10 l S\nq\nQ"));
    }
}
