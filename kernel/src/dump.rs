//! Dump sinks: where `dump` sends the stored states.
//!
//! The table guarantees call order only: buckets in map iteration order, states
//! head-to-tail within a bucket. Per-state encoding belongs to the sink and the
//! state type.
//!
//! # Frame format
//!
//! [`FrameWriter`] emits one frame per state:
//! `[priority:i32le][len:u32le][bytes:len]`, where `bytes` is the state's
//! [`EncodeState`] output.

use std::convert::Infallible;
use std::io::{Read, Write};

use crate::state::{EncodeState, Priority};

/// Frame header size: priority (4) + length (4).
pub const FRAME_HEADER_SIZE: usize = 8;

/// Receives states during a dump.
pub trait StateSink<S: ?Sized> {
    /// Error reported by the sink and propagated by `dump` unchanged.
    type Error;

    /// Accept one state stored under `priority`.
    ///
    /// # Errors
    ///
    /// Sink-specific; aborts the dump.
    fn accept(&mut self, priority: Priority, state: &S) -> Result<(), Self::Error>;
}

/// Records the priority of every state it receives.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollectSink {
    pub priorities: Vec<Priority>,
}

impl<S: ?Sized> StateSink<S> for CollectSink {
    type Error = Infallible;

    fn accept(&mut self, priority: Priority, _state: &S) -> Result<(), Infallible> {
        self.priorities.push(priority);
        Ok(())
    }
}

/// Errors while writing or reading dump frames.
#[derive(Debug)]
pub enum FrameError {
    /// The underlying writer or reader failed.
    Io(std::io::Error),
    /// A state encoding does not fit the `u32` length field.
    StateTooLarge { len: usize },
    /// Input ended inside a frame.
    Truncated { offset: usize },
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "dump I/O failed: {e}"),
            Self::StateTooLarge { len } => {
                write!(f, "state encoding of {len} bytes exceeds u32::MAX")
            }
            Self::Truncated { offset } => write!(f, "dump truncated inside frame at byte {offset}"),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FrameError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Encode one frame into `out`.
///
/// # Errors
///
/// Returns [`FrameError::StateTooLarge`] if the encoding exceeds `u32::MAX`
/// bytes; `out` is left as it was.
pub fn encode_frame<S: EncodeState + ?Sized>(
    priority: Priority,
    state: &S,
    out: &mut Vec<u8>,
) -> Result<(), FrameError> {
    let start = out.len();
    out.extend_from_slice(&priority.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    state.encode(out);
    let body_len = out.len() - start - FRAME_HEADER_SIZE;
    let Ok(len) = u32::try_from(body_len) else {
        out.truncate(start);
        return Err(FrameError::StateTooLarge { len: body_len });
    };
    out[start + 4..start + FRAME_HEADER_SIZE].copy_from_slice(&len.to_le_bytes());
    Ok(())
}

/// Streams frames to an [`std::io::Write`].
pub struct FrameWriter<W: Write> {
    inner: W,
    /// Reusable frame buffer; a frame reaches `inner` only once fully encoded.
    scratch: Vec<u8>,
    frames: u64,
}

impl<W: Write> FrameWriter<W> {
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            scratch: Vec::with_capacity(256),
            frames: 0,
        }
    }

    /// Frames written so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Flush and return the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Io`] if the flush fails.
    pub fn finish(mut self) -> Result<W, FrameError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<S: EncodeState + ?Sized, W: Write> StateSink<S> for FrameWriter<W> {
    type Error = FrameError;

    fn accept(&mut self, priority: Priority, state: &S) -> Result<(), FrameError> {
        self.scratch.clear();
        encode_frame(priority, state, &mut self.scratch)?;
        self.inner.write_all(&self.scratch)?;
        self.frames += 1;
        Ok(())
    }
}

/// A decoded dump frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub priority: Priority,
    pub bytes: Vec<u8>,
}

/// Read every frame from `reader` until end of input.
///
/// # Errors
///
/// Returns [`FrameError::Io`] on read failure and [`FrameError::Truncated`]
/// if the input ends inside a frame.
pub fn read_frames<R: Read>(mut reader: R) -> Result<Vec<Frame>, FrameError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;

    let mut frames = Vec::new();
    let mut offset = 0;
    while offset < buf.len() {
        let Some(header) = buf.get(offset..offset + FRAME_HEADER_SIZE) else {
            return Err(FrameError::Truncated { offset });
        };
        let priority = Priority::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
        let body_start = offset + FRAME_HEADER_SIZE;
        let Some(bytes) = buf.get(body_start..body_start + len) else {
            return Err(FrameError::Truncated { offset });
        };
        frames.push(Frame {
            priority,
            bytes: bytes.to_vec(),
        });
        offset = body_start + len;
    }
    Ok(frames)
}
