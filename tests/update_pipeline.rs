//! Integration tests for the streaming update pipeline: ordering,
//! chunking invariance, partial consumption and resource handling.

use crypto_facade::{
    updating_sink, updating_source, ByteSink, ByteSource, Result, SegmentBuffer, UpdateFunction,
};

/// Records every range handed to `update` as an owned chunk.
#[derive(Default)]
struct Recorder {
    calls: Vec<Vec<u8>>,
}

impl Recorder {
    fn concatenated(&self) -> Vec<u8> {
        self.calls.iter().flatten().copied().collect()
    }
}

impl UpdateFunction for Recorder {
    fn update(&mut self, source: &[u8], start: usize, end: usize) -> Result<()> {
        assert!(start <= end && end <= source.len());
        self.calls.push(source[start..end].to_vec());
        Ok(())
    }
}

/// Fails every update call.
struct FailingFunction;

impl UpdateFunction for FailingFunction {
    fn update(&mut self, _source: &[u8], _start: usize, _end: usize) -> Result<()> {
        Err(crypto_facade::Error::Internal("update rejected".into()))
    }
}

/// Produces a fixed script of chunks, one per read; an empty chunk is a
/// read that produces no data, and the script's end is end-of-stream.
struct ScriptedSource {
    chunks: std::vec::IntoIter<Vec<u8>>,
    closed: u32,
}

impl ScriptedSource {
    fn new(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            chunks: chunks.into_iter(),
            closed: 0,
        }
    }
}

impl ByteSource for ScriptedSource {
    fn read_at_most(&mut self, buf: &mut SegmentBuffer, _byte_count: usize) -> Result<Option<usize>> {
        match self.chunks.next() {
            None => Ok(None),
            Some(chunk) => {
                let produced = chunk.len();
                buf.write_slice(&chunk);
                Ok(Some(produced))
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        self.closed += 1;
        Ok(())
    }
}

/// Counts writes and close calls, recording forwarded byte counts.
#[derive(Default)]
struct CountingSink {
    writes: Vec<usize>,
    closed: u32,
}

impl ByteSink for CountingSink {
    fn write(&mut self, buf: &mut SegmentBuffer, byte_count: usize) -> Result<()> {
        self.writes.push(byte_count);
        buf.consume(byte_count)
    }

    fn close(&mut self) -> Result<()> {
        self.closed += 1;
        Ok(())
    }
}

#[test]
fn test_source_with_empty_middle_read() {
    // Chunks of 4, 0 and 6 bytes: exactly two update calls, 10 bytes
    // total, original order.
    let source = ScriptedSource::new(vec![b"abcd".to_vec(), Vec::new(), b"efghij".to_vec()]);
    let mut wrapped = updating_source(source, Recorder::default());
    let mut staging = SegmentBuffer::new();

    assert_eq!(wrapped.read_at_most(&mut staging, 1024).unwrap(), Some(4));
    assert_eq!(wrapped.read_at_most(&mut staging, 1024).unwrap(), Some(0));
    assert_eq!(wrapped.read_at_most(&mut staging, 1024).unwrap(), Some(6));
    assert_eq!(wrapped.read_at_most(&mut staging, 1024).unwrap(), None);

    let (_, recorder) = wrapped.into_parts();
    assert_eq!(recorder.calls.len(), 2);
    assert_eq!(recorder.concatenated(), b"abcdefghij");
}

#[test]
fn test_zero_byte_read_makes_no_update_call() {
    let source = ScriptedSource::new(vec![Vec::new()]);
    let mut wrapped = updating_source(source, Recorder::default());
    let mut staging = SegmentBuffer::new();

    assert_eq!(wrapped.read_at_most(&mut staging, 1024).unwrap(), Some(0));
    assert_eq!(wrapped.read_at_most(&mut staging, 1024).unwrap(), None);

    let (_, recorder) = wrapped.into_parts();
    assert!(recorder.calls.is_empty());
}

#[test]
fn test_source_updates_only_newly_produced_bytes() {
    // Pre-queued bytes in the staging buffer were produced by an earlier
    // read and must not be fed again.
    let mut staging = SegmentBuffer::new();
    staging.write_slice(b"stale");

    let source = ScriptedSource::new(vec![b"fresh!".to_vec()]);
    let mut wrapped = updating_source(source, Recorder::default());
    assert_eq!(wrapped.read_at_most(&mut staging, 1024).unwrap(), Some(6));

    let (_, recorder) = wrapped.into_parts();
    assert_eq!(recorder.calls, vec![b"fresh!".to_vec()]);
}

#[test]
fn test_hello_world_through_sink_in_two_writes() {
    // The 13 bytes arrive in writes of 5 and 8; the accumulator sees all
    // of them, in order, with no loss or duplication.
    let mut wrapped = updating_sink(CountingSink::default(), Recorder::default());
    let mut staging = SegmentBuffer::new();

    staging.write_slice(b"Hello");
    wrapped.write(&mut staging, 5).unwrap();
    staging.write_slice(b", World!");
    wrapped.write(&mut staging, 8).unwrap();

    let (sink, recorder) = wrapped.into_parts();
    assert_eq!(recorder.concatenated(), b"Hello, World!");
    assert_eq!(sink.writes, vec![5, 8]);
}

#[test]
fn test_partial_write_surfaces_only_the_prefix() {
    // Seven bytes are queued across two segments but only five are
    // written; the update calls must cover exactly those five, in
    // segment order.
    let mut wrapped = updating_sink(CountingSink::default(), Recorder::default());
    let mut staging = SegmentBuffer::new();
    staging.write_slice(b"abc");
    staging.write_slice(b"defg");

    wrapped.write(&mut staging, 5).unwrap();
    assert_eq!(staging.len(), 2);

    // The remainder surfaces on the next write; the consumed counter
    // restarts rather than carrying over.
    wrapped.write(&mut staging, 2).unwrap();

    let (_, recorder) = wrapped.into_parts();
    assert_eq!(recorder.calls[0], b"abc");
    assert_eq!(recorder.calls[1], b"de");
    assert_eq!(recorder.calls[2], b"fg");
    assert_eq!(recorder.concatenated(), b"abcdefg");
}

#[test]
fn test_write_larger_than_queued_fails_without_updates() {
    let mut wrapped = updating_sink(CountingSink::default(), Recorder::default());
    let mut staging = SegmentBuffer::new();
    staging.write_slice(b"abc");

    assert!(wrapped.write(&mut staging, 4).is_err());

    let (sink, recorder) = wrapped.into_parts();
    assert!(recorder.calls.is_empty());
    assert!(sink.writes.is_empty());
}

#[test]
fn test_update_failure_aborts_before_forwarding() {
    let mut wrapped = updating_sink(CountingSink::default(), FailingFunction);
    let mut staging = SegmentBuffer::new();
    staging.write_slice(b"abc");

    assert!(wrapped.write(&mut staging, 3).is_err());

    let (sink, _) = wrapped.into_parts();
    assert!(sink.writes.is_empty());
    // The queued bytes are exactly as the failed write left them.
    assert_eq!(staging.to_vec(), b"abc");
}

#[test]
fn test_close_forwards_exactly_once() {
    let mut wrapped_source = updating_source(
        ScriptedSource::new(Vec::new()),
        Recorder::default(),
    );
    wrapped_source.close().unwrap();
    wrapped_source.close().unwrap();
    let (source, _) = wrapped_source.into_parts();
    assert_eq!(source.closed, 1);

    let mut wrapped_sink = updating_sink(CountingSink::default(), Recorder::default());
    wrapped_sink.close().unwrap();
    wrapped_sink.close().unwrap();
    let (sink, _) = wrapped_sink.into_parts();
    assert_eq!(sink.closed, 1);
}

mod chunking_invariance {
    use super::*;
    use proptest::prelude::*;

    fn partition(data: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
        let mut chunks = Vec::new();
        let mut rest = data;
        for cut in cuts {
            let take = cut % (rest.len() + 1);
            let (chunk, tail) = rest.split_at(take);
            chunks.push(chunk.to_vec());
            rest = tail;
        }
        chunks.push(rest.to_vec());
        chunks
    }

    proptest! {
        #[test]
        fn test_source_sees_every_byte_once_in_order(
            data in prop::collection::vec(any::<u8>(), 0..512),
            cuts in prop::collection::vec(any::<usize>(), 0..8),
        ) {
            let chunks = partition(&data, &cuts);
            let mut wrapped = updating_source(ScriptedSource::new(chunks), Recorder::default());
            let mut staging = SegmentBuffer::new();
            while wrapped.read_at_most(&mut staging, 1024).unwrap().is_some() {}
            let (_, recorder) = wrapped.into_parts();
            prop_assert_eq!(recorder.concatenated(), data);
        }

        #[test]
        fn test_sink_sees_every_byte_once_in_order(
            data in prop::collection::vec(any::<u8>(), 0..512),
            cuts in prop::collection::vec(any::<usize>(), 0..8),
        ) {
            let chunks = partition(&data, &cuts);
            let mut wrapped = updating_sink(CountingSink::default(), Recorder::default());
            let mut staging = SegmentBuffer::new();
            for chunk in chunks {
                staging.write_slice(&chunk);
                let queued = staging.len();
                wrapped.write(&mut staging, queued).unwrap();
            }
            let (_, recorder) = wrapped.into_parts();
            prop_assert_eq!(recorder.concatenated(), data);
        }
    }
}
