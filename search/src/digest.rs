//! `DigestSink`: SHA-256 hash chain over dump frames.
//!
//! Each state is framed exactly as `FrameWriter` writes it to disk, then folded
//! into a running chain:
//!
//! ```text
//! h0 = SHA256(DOMAIN_DUMP_DIGEST)
//! hi = SHA256(DOMAIN_DUMP_CHAIN || h(i-1) || frame_i)
//! ```
//!
//! The digest binds both content and dump order. Two tables with the same
//! states and the same insertion history produce the same digest; the digest
//! of a frame file written by `FrameWriter` can be recomputed from the file.

use sha2::{Digest, Sha256};

use boundq_kernel::dump::{encode_frame, FrameError, StateSink};
use boundq_kernel::state::{EncodeState, Priority};

/// Domain prefix seeding the chain.
pub const DOMAIN_DUMP_DIGEST: &[u8] = b"BOUNDQ::DUMP_DIGEST::V1\0";

/// Domain prefix for each chain step. Distinct from the seed domain.
pub const DOMAIN_DUMP_CHAIN: &[u8] = b"BOUNDQ::DUMP_CHAIN::V1\0";

/// Final digest of a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpDigest {
    pub chain_hash: [u8; 32],
    pub frames: u64,
}

impl DumpDigest {
    /// `"sha256:<lowercase hex>"`.
    #[must_use]
    pub fn to_content_hash(&self) -> String {
        format!("sha256:{}", hex::encode(self.chain_hash))
    }
}

/// Sink folding every frame into the chain.
pub struct DigestSink {
    chain_hash: [u8; 32],
    frames: u64,
    scratch: Vec<u8>,
}

impl DigestSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            chain_hash: raw_hash(&[DOMAIN_DUMP_DIGEST]),
            frames: 0,
            scratch: Vec::with_capacity(64),
        }
    }

    /// Fold one already-encoded frame into the chain.
    pub fn absorb_frame(&mut self, frame: &[u8]) {
        self.chain_hash = raw_hash(&[DOMAIN_DUMP_CHAIN, &self.chain_hash[..], frame]);
        self.frames += 1;
    }

    #[must_use]
    pub fn finish(self) -> DumpDigest {
        DumpDigest {
            chain_hash: self.chain_hash,
            frames: self.frames,
        }
    }
}

impl Default for DigestSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EncodeState + ?Sized> StateSink<S> for DigestSink {
    type Error = FrameError;

    fn accept(&mut self, priority: Priority, state: &S) -> Result<(), FrameError> {
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        let encoded = encode_frame(priority, state, &mut scratch);
        if encoded.is_ok() {
            self.absorb_frame(&scratch);
        }
        self.scratch = scratch;
        encoded
    }
}

fn raw_hash(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}
