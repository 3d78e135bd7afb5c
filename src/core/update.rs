/*!
The incremental update pipeline.

An [`UpdateFunction`] feeds successive byte ranges into a running
cryptographic accumulator (digest, MAC or cipher state). The wrappers here
turn any [`ByteSource`] or [`ByteSink`] into a transparent relay that also
drives the accumulator with every byte that passes through, so hashing or
MACing a stream costs no second copy of the payload.

The correctness contract is order and completeness: the concatenation of
all ranges handed to `update` equals the bytes of the underlying stream
exactly, regardless of how reads and writes are chunked. The accumulator
is exclusively owned by one stream and must not be fed concurrently.
*/

use crate::core::buffer::{ByteSink, ByteSource, DiscardingSink, SegmentBuffer};
use crate::core::error::{Error, Result};

const DRAIN_CHUNK: usize = 8 * 1024;
const DRAIN_MAX_IDLE_READS: u32 = 1024;

/// Checks the half-open range `[start, end)` against a buffer length.
pub fn check_range(len: usize, start: usize, end: usize) -> Result<()> {
    if start > end || end > len {
        return Err(Error::InvalidRange { start, end, len });
    }
    Ok(())
}

/// Incremental consumer of byte ranges backing one streaming operation.
pub trait UpdateFunction {
    /// Feed the half-open range `[start, end)` of `source` into the
    /// accumulator. Requires `start <= end <= source.len()`.
    fn update(&mut self, source: &[u8], start: usize, end: usize) -> Result<()>;

    /// Feed a whole slice.
    fn update_all(&mut self, source: &[u8]) -> Result<()> {
        self.update(source, 0, source.len())
    }
}

impl<F: UpdateFunction + ?Sized> UpdateFunction for &mut F {
    fn update(&mut self, source: &[u8], start: usize, end: usize) -> Result<()> {
        (**self).update(source, start, end)
    }
}

impl<F: UpdateFunction + ?Sized> UpdateFunction for Box<F> {
    fn update(&mut self, source: &[u8], start: usize, end: usize) -> Result<()> {
        (**self).update(source, start, end)
    }
}

/// Wrap `source` so every byte it produces is also fed into `function`.
pub fn updating_source<S, F>(source: S, function: F) -> UpdatingSource<S, F>
where
    S: ByteSource,
    F: UpdateFunction,
{
    UpdatingSource {
        source,
        function,
        closed: false,
    }
}

/// Wrap `sink` so every byte written through it is also fed into
/// `function` before being forwarded.
pub fn updating_sink<S, F>(sink: S, function: F) -> UpdatingSink<S, F>
where
    S: ByteSink,
    F: UpdateFunction,
{
    UpdatingSink {
        sink,
        function,
        closed: false,
    }
}

/// Pull `source` to end-of-stream, feeding every byte into `function` and
/// discarding the payload. Returns the number of bytes seen.
///
/// Zero-byte reads must be transient: a source that keeps producing
/// nothing without ending the stream fails after a bounded number of
/// attempts instead of spinning.
pub fn drain_source<S, F>(source: S, function: F) -> Result<u64>
where
    S: ByteSource,
    F: UpdateFunction,
{
    let mut wrapped = updating_source(source, function);
    let mut staging = SegmentBuffer::new();
    let mut sink = DiscardingSink;
    let mut total = 0u64;
    let mut idle_reads = 0u32;
    loop {
        match wrapped.read_at_most(&mut staging, DRAIN_CHUNK)? {
            None => break,
            Some(0) => {
                idle_reads += 1;
                if idle_reads >= DRAIN_MAX_IDLE_READS {
                    return Err(Error::Internal(
                        "source produced no bytes over repeated reads without ending".into(),
                    ));
                }
            }
            Some(read) => {
                idle_reads = 0;
                total += read as u64;
                let queued = staging.len();
                sink.write(&mut staging, queued)?;
            }
        }
    }
    wrapped.close()?;
    Ok(total)
}

/// A source relay that feeds newly produced bytes into an accumulator.
pub struct UpdatingSource<S, F> {
    source: S,
    function: F,
    closed: bool,
}

impl<S, F> UpdatingSource<S, F> {
    pub fn into_parts(self) -> (S, F) {
        (self.source, self.function)
    }
}

impl<S: ByteSource, F: UpdateFunction> ByteSource for UpdatingSource<S, F> {
    fn read_at_most(&mut self, buf: &mut SegmentBuffer, byte_count: usize) -> Result<Option<usize>> {
        let queued_before = buf.len();
        let produced = self.source.read_at_most(buf, byte_count)?;
        if let Some(read) = produced {
            // Only the bytes this read produced are new; anything queued
            // before it has already been seen. A read producing nothing
            // makes no update call at all.
            if read > 0 {
                for segment in buf.segments_from(queued_before) {
                    self.function.update(segment, 0, segment.len())?;
                }
            }
        }
        Ok(produced)
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.source.close()
    }
}

/// A sink relay that feeds written bytes into an accumulator before
/// forwarding them.
pub struct UpdatingSink<S, F> {
    sink: S,
    function: F,
    closed: bool,
}

impl<S, F> UpdatingSink<S, F> {
    pub fn into_parts(self) -> (S, F) {
        (self.sink, self.function)
    }
}

impl<S: ByteSink, F: UpdateFunction> ByteSink for UpdatingSink<S, F> {
    fn write(&mut self, buf: &mut SegmentBuffer, byte_count: usize) -> Result<()> {
        buf.require(byte_count)?;

        // Surface exactly the first `byte_count` queued bytes, walking the
        // regions in order. The counter resets on every write call; bytes
        // beyond it stay queued and are surfaced by a later write.
        let mut consumed = 0usize;
        for segment in buf.segments() {
            if consumed == byte_count {
                break;
            }
            let to_update = (byte_count - consumed).min(segment.len());
            self.function.update(segment, 0, to_update)?;
            consumed += to_update;
        }

        self.sink.write(buf, byte_count)
    }

    fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.sink.close()
    }
}
