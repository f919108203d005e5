//! High-level recognition driver.
//!
//! We expose a single ergonomic entry point (`Recognizer`) that owns a
//! long-lived acoustic model and drives the per-utterance session protocol
//! for the caller:
//! - the model is constructed once (expensive) and reused across utterances;
//! - each call allocates a fresh session, streams audio through it in
//!   fixed-size chunks, and finalizes;
//! - callers that want partial results hook a callback that fires after
//!   every chunk.
//!
//! Callers that need finer control over chunk pacing or finalization work
//! with [`crate::backend::DecodingSession`] directly; this module is the
//! convenience layer on top of it.

use std::io::Read;

use tracing::debug;

use crate::alignment::{Hypothesis, WordSpan};
use crate::backend::{AcousticModel, DecodingSession};
use crate::buffer::AudioFrameBuffer;
use crate::error::Result;
use crate::wav;

/// Default streaming chunk size, in samples (64 ms at 16 kHz).
const DEFAULT_CHUNK_SAMPLES: usize = 1024;

/// The final output of one recognized utterance.
#[derive(Debug, Clone)]
pub struct Recognition {
    /// Final transcript and confidence.
    pub hypothesis: Hypothesis,
    /// Complete word-level timing alignment.
    pub alignment: Vec<WordSpan>,
}

/// Owns an acoustic model and runs complete utterances through it.
pub struct Recognizer<M: AcousticModel> {
    model: M,
    chunk_samples: usize,
}

impl<M: AcousticModel> Recognizer<M> {
    /// Wrap an already-constructed model.
    pub fn new(model: M) -> Self {
        Self {
            model,
            chunk_samples: DEFAULT_CHUNK_SAMPLES,
        }
    }

    /// Override the streaming chunk size. Values below 1 are clamped up.
    pub fn with_chunk_samples(mut self, chunk_samples: usize) -> Self {
        self.chunk_samples = chunk_samples.max(1);
        self
    }

    /// Access the wrapped model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Give the model back, e.g. to bind sessions to it directly.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Recognize one utterance from a raw sample buffer.
    ///
    /// The samples are fed through a fresh session in chunks, exactly as a
    /// live stream would arrive, then finalized.
    pub fn recognize(&self, sample_rate: f32, samples: &[f32]) -> Result<Recognition> {
        self.recognize_with_partials(sample_rate, samples, |_| {})
    }

    /// Like [`Recognizer::recognize`], invoking `on_partial` with the
    /// current hypothesis after every decoded chunk.
    pub fn recognize_with_partials(
        &self,
        sample_rate: f32,
        samples: &[f32],
        mut on_partial: impl FnMut(&Hypothesis),
    ) -> Result<Recognition> {
        let mut session = self.model.start_session();

        for chunk in samples.chunks(self.chunk_samples) {
            let buffer = AudioFrameBuffer::new(sample_rate, chunk)?;
            session.decode(&buffer, false)?;

            let partial = session.hypothesis();
            debug!(
                likelihood = partial.likelihood,
                text = %partial.text,
                "partial hypothesis"
            );
            on_partial(&partial);
        }

        // Flush trailing context with an empty finalizing chunk. This also
        // covers zero-length input: Fresh -> Finalized is a legal transition.
        let tail = AudioFrameBuffer::new(sample_rate, &[])?;
        session.decode(&tail, true)?;

        Ok(Recognition {
            hypothesis: session.hypothesis(),
            alignment: session.word_alignment(),
        })
    }

    /// Recognize a mono 16-bit PCM WAV stream.
    ///
    /// The WAV's own sample rate is used; if it differs from the model's
    /// configured rate the first decode fails with
    /// [`crate::Error::RateMismatch`].
    pub fn recognize_wav<R: Read>(&self, reader: R) -> Result<Recognition> {
        let (samples, sample_rate) = wav::samples_from_wav_reader(reader)?;
        self.recognize(sample_rate, &samples)
    }
}
