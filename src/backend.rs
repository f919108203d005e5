use crate::alignment::{Hypothesis, WordSpan};
use crate::buffer::AudioFrameBuffer;
use crate::error::Result;
use crate::session::SessionState;

/// An immutable, shareable acoustic-model resource.
///
/// A model bundles everything decoding needs — loaded resources, the word
/// symbol table, and tuning parameters — and is expensive to construct.
/// Once built it is never mutated, which is what makes it safe to reference
/// from any number of concurrent sessions (`Send + Sync` is part of the
/// contract). The model must outlive every session bound to it, which the
/// session lifetime enforces.
///
/// The GMM and NNet3 variants differ only in construction parameters and in
/// scoring internals; the session protocol is identical, so callers never
/// branch on backend type beyond choosing a constructor.
pub trait AcousticModel: Send + Sync {
    /// Per-utterance decoding state bound to this model.
    type Session<'a>: DecodingSession
    where
        Self: 'a;

    /// The sample rate this model expects audio at, in Hz.
    fn sample_rate(&self) -> f32;

    /// Allocate fresh decoding state for one utterance.
    ///
    /// Never fails short of allocator exhaustion; all fallible work happened
    /// at model construction.
    fn start_session(&self) -> Self::Session<'_>;
}

/// The mutable, per-utterance decoding state machine.
///
/// Sessions advance through `Fresh -> Decoding -> Finalized` and are driven
/// by one caller at a time: every mutation goes through `&mut self`, so a
/// session shared across threads needs external serialization (a mutex
/// around the session), never internal locking.
///
/// Decode calls must arrive in the temporal order the audio was produced;
/// the session has no way to reorder or deduplicate chunks.
pub trait DecodingSession {
    /// Append one chunk of audio and advance the search state.
    ///
    /// With `finalize == true` the backend additionally flushes whatever
    /// trailing context it holds and moves the session to
    /// [`SessionState::Finalized`], after which every further decode fails
    /// with [`crate::Error::AlreadyFinalized`].
    ///
    /// Rejected calls (`Shape` at buffer construction, `RateMismatch`,
    /// `AlreadyFinalized`) leave the session unchanged.
    fn decode(&mut self, buffer: &AudioFrameBuffer<'_>, finalize: bool) -> Result<()>;

    /// The current best transcript and confidence. Pure read, valid in every
    /// state; best-effort/empty before any audio has been decoded.
    fn hypothesis(&self) -> Hypothesis;

    /// Word-level timing for everything past the backend's stable-decision
    /// boundary. Pure read; complete and immutable after finalization.
    fn word_alignment(&self) -> Vec<WordSpan>;

    /// Where the session is in its life-cycle.
    fn state(&self) -> SessionState;

    /// Total samples consumed by successful decode calls. Monotone.
    fn samples_consumed(&self) -> u64;
}
