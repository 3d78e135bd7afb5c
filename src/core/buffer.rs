/*!
Segmented byte buffers and the source/sink abstractions used by the
streaming layer.

Data moving through the facade is staged in a [`SegmentBuffer`]: an
ordered queue of contiguous memory regions. Sources append to the tail,
sinks drain the head, and the update pipeline walks the regions in order
without ever flattening them into a single allocation.
*/

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use bytes::Bytes;

use crate::core::error::Result;

const DEFAULT_READ_SEGMENT: usize = 8 * 1024;

/// An ordered queue of contiguous byte regions with a known total length.
#[derive(Debug, Default)]
pub struct SegmentBuffer {
    segments: VecDeque<Bytes>,
    len: usize,
}

impl SegmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of queued bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Queue a contiguous region at the tail. Empty regions are dropped.
    pub fn push_segment(&mut self, segment: Bytes) {
        if segment.is_empty() {
            return;
        }
        self.len += segment.len();
        self.segments.push_back(segment);
    }

    /// Copy `data` into a fresh region at the tail.
    pub fn write_slice(&mut self, data: &[u8]) {
        self.push_segment(Bytes::copy_from_slice(data));
    }

    /// The queued regions, in order.
    pub fn segments(&self) -> impl Iterator<Item = &[u8]> {
        self.segments.iter().map(|segment| segment.as_ref())
    }

    /// The regions covering bytes `[offset, len)`, in order, with the
    /// first one trimmed to start at `offset`.
    pub fn segments_from(&self, offset: usize) -> impl Iterator<Item = &[u8]> {
        let mut skip = offset.min(self.len);
        self.segments.iter().filter_map(move |segment| {
            if skip >= segment.len() {
                skip -= segment.len();
                None
            } else {
                let start = skip;
                skip = 0;
                Some(&segment.as_ref()[start..])
            }
        })
    }

    /// Fails unless at least `count` bytes are queued.
    pub fn require(&self, count: usize) -> Result<()> {
        if self.len < count {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("buffer holds {} bytes, {count} required", self.len),
            )
            .into());
        }
        Ok(())
    }

    /// Drop the first `count` queued bytes.
    pub fn consume(&mut self, count: usize) -> Result<()> {
        self.take(count)?;
        Ok(())
    }

    /// Remove the first `count` queued bytes, returned as whole or split
    /// regions in their original order.
    pub fn take(&mut self, count: usize) -> Result<Vec<Bytes>> {
        self.require(count)?;
        let mut taken = Vec::new();
        let mut remaining = count;
        while remaining > 0 {
            match self.segments.front_mut() {
                Some(segment) if segment.len() <= remaining => {
                    remaining -= segment.len();
                    self.len -= segment.len();
                    if let Some(segment) = self.segments.pop_front() {
                        taken.push(segment);
                    }
                }
                Some(segment) => {
                    taken.push(segment.split_to(remaining));
                    self.len -= remaining;
                    remaining = 0;
                }
                None => break,
            }
        }
        Ok(taken)
    }

    /// Flatten the queued bytes into one allocation, without consuming.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for segment in &self.segments {
            out.extend_from_slice(segment);
        }
        out
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.len = 0;
    }
}

/// A producer of bytes.
pub trait ByteSource {
    /// Read at most `byte_count` bytes, appending them to the tail of
    /// `buf`. Returns the number of bytes produced by this call, or `None`
    /// at the end of the stream.
    fn read_at_most(&mut self, buf: &mut SegmentBuffer, byte_count: usize) -> Result<Option<usize>>;

    /// Release the source. Safe to call more than once.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A consumer of bytes.
pub trait ByteSink {
    /// Remove exactly `byte_count` bytes from the head of `buf` and write
    /// them out.
    fn write(&mut self, buf: &mut SegmentBuffer, byte_count: usize) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Release the sink. Safe to call more than once.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Adapts any [`Read`] implementation to [`ByteSource`].
pub struct ReaderSource<R> {
    reader: R,
}

impl<R> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_at_most(&mut self, buf: &mut SegmentBuffer, byte_count: usize) -> Result<Option<usize>> {
        if byte_count == 0 {
            return Ok(Some(0));
        }
        let mut chunk = vec![0u8; byte_count.min(DEFAULT_READ_SEGMENT)];
        let read = self.reader.read(&mut chunk)?;
        if read == 0 {
            return Ok(None);
        }
        chunk.truncate(read);
        buf.push_segment(Bytes::from(chunk));
        Ok(Some(read))
    }
}

/// Adapts any [`Write`] implementation to [`ByteSink`].
pub struct WriterSink<W> {
    writer: W,
}

impl<W> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ByteSink for WriterSink<W> {
    fn write(&mut self, buf: &mut SegmentBuffer, byte_count: usize) -> Result<()> {
        buf.require(byte_count)?;
        // Consume region by region, each only after the writer accepted
        // it, so a mid-stream failure leaves the unwritten tail queued.
        let mut remaining = byte_count;
        while remaining > 0 {
            let written = match buf.segments().next() {
                Some(segment) => {
                    let take = remaining.min(segment.len());
                    self.writer.write_all(&segment[..take])?;
                    take
                }
                None => break,
            };
            buf.consume(written)?;
            remaining -= written;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// A sink that throws written bytes away. Used when a stream is driven
/// only for its update side effects.
#[derive(Debug, Default)]
pub struct DiscardingSink;

impl ByteSink for DiscardingSink {
    fn write(&mut self, buf: &mut SegmentBuffer, byte_count: usize) -> Result<()> {
        buf.consume(byte_count)
    }
}
