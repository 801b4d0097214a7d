use std::fmt::Display;
use std::io::{self, BufRead, BufReader, ErrorKind, Lines, Read, Write};
use tracing::instrument;

/// A line oriented io interface.
#[derive(Debug)]
pub struct Io<W: Write, R: Read> {
    writer: W,
    reader: Lines<BufReader<R>>,
}

impl<W: Write, R: Read> Io<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Io {
            writer,
            reader: BufReader::new(reader).lines(),
        }
    }

    /// Receive a line, failing with [`ErrorKind::UnexpectedEof`] once the input is exhausted.
    #[instrument(level = "trace", skip(self), ret, err)]
    pub fn recv(&mut self) -> io::Result<String> {
        self.reader.next().ok_or(ErrorKind::UnexpectedEof)?
    }

    /// Send a message followed by a line break.
    #[instrument(level = "trace", skip(self, msg), err)]
    pub fn send<T: Display>(&mut self, msg: T) -> io::Result<()> {
        writeln!(&mut self.writer, "{}", msg)
    }

    /// Send a message without a trailing line break.
    #[instrument(level = "trace", skip(self, msg), err)]
    pub fn prompt<T: Display>(&mut self, msg: T) -> io::Result<()> {
        write!(&mut self.writer, "{}", msg)?;
        self.flush()
    }

    /// Flush the internal buffers.
    #[instrument(level = "trace", skip(self), err)]
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
