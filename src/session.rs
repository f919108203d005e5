//! Shared per-utterance session state.
//!
//! Both backend session types delegate to [`SessionCore`], which owns the
//! streaming protocol itself: the `Fresh -> Decoding -> Finalized` state
//! machine, the reject-before-mutate validation order, the monotone
//! samples-consumed counter, and the word commit policy. Backends differ only
//! in construction parameters and in how long words are held back before
//! they are committed.

use tracing::{debug, trace};

use crate::alignment::{Hypothesis, WordSpan};
use crate::buffer::AudioFrameBuffer;
use crate::engine::{FrameAnalyzer, WordEvent};
use crate::error::{Error, Result};
use crate::symbols::WordSymbolTable;

/// Life-cycle state of a decoding session.
///
/// `Finalized` is terminal: no decode call ever leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No audio has been decoded yet.
    Fresh,
    /// At least one non-final decode has been applied.
    Decoding,
    /// A `finalize == true` decode has flushed trailing context.
    Finalized,
}

/// A decoded word pinned to its frame span. Times are derived on read.
#[derive(Debug, Clone)]
struct DecodedWord {
    word: String,
    start_frame: u64,
    end_frame: u64,
}

/// Scale applied when mapping a speech run's mean energy onto the spoken
/// vocabulary. Quantization keeps labeling deterministic for equal audio.
const LABEL_ENERGY_QUANTA: f32 = 4096.0;

pub(crate) struct SessionCore<'m> {
    symbols: &'m WordSymbolTable,
    expected_rate: f32,
    acoustic_scale: f64,
    /// Frames a word must trail the analysis frontier by before it is
    /// reported as committed. Zero means words commit as soon as they close.
    commit_lag_frames: u64,
    state: SessionState,
    samples_consumed: u64,
    analyzer: FrameAnalyzer,
    words: Vec<DecodedWord>,
}

impl<'m> SessionCore<'m> {
    pub(crate) fn new(
        symbols: &'m WordSymbolTable,
        expected_rate: f32,
        acoustic_scale: f64,
        commit_lag_frames: u64,
    ) -> Self {
        Self {
            symbols,
            expected_rate,
            acoustic_scale,
            commit_lag_frames,
            state: SessionState::Fresh,
            samples_consumed: 0,
            analyzer: FrameAnalyzer::new(expected_rate),
            words: Vec::new(),
        }
    }

    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    pub(crate) fn samples_consumed(&self) -> u64 {
        self.samples_consumed
    }

    /// Apply one chunk of audio, optionally finalizing the utterance.
    ///
    /// Validation happens before any mutation, in a fixed order: finalized
    /// state first, then rate. A rejected call leaves every observable of the
    /// session untouched, so the caller may correct the input and retry.
    pub(crate) fn decode(&mut self, buffer: &AudioFrameBuffer<'_>, finalize: bool) -> Result<()> {
        if self.state == SessionState::Finalized {
            return Err(Error::AlreadyFinalized);
        }
        if buffer.sample_rate() != self.expected_rate {
            return Err(Error::RateMismatch {
                expected: self.expected_rate,
                got: buffer.sample_rate(),
            });
        }

        let mut events = Vec::new();
        self.analyzer.push(buffer.samples(), &mut events);
        self.samples_consumed += buffer.len() as u64;

        if finalize {
            self.analyzer.flush(&mut events);
        }
        self.absorb(events);

        trace!(
            samples = buffer.len(),
            total = self.samples_consumed,
            finalize,
            words = self.words.len(),
            "decoded chunk"
        );

        self.state = if finalize {
            debug!(
                samples = self.samples_consumed,
                words = self.words.len(),
                "session finalized"
            );
            SessionState::Finalized
        } else {
            SessionState::Decoding
        };

        Ok(())
    }

    /// Current best hypothesis. Pure read; empty in `Fresh`.
    pub(crate) fn hypothesis(&self) -> Hypothesis {
        if self.state == SessionState::Fresh {
            return Hypothesis::empty();
        }

        let mut text = String::new();
        for decoded in &self.words {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&decoded.word);
        }

        Hypothesis {
            text,
            likelihood: self.analyzer.score() * self.acoustic_scale,
        }
    }

    /// Timing for words past the stable-decision boundary. Pure read.
    ///
    /// Before finalization only committed words are returned; entries already
    /// returned never change on later calls. After finalization the alignment
    /// is complete and immutable.
    pub(crate) fn word_alignment(&self) -> Vec<WordSpan> {
        let spf = self.analyzer.seconds_per_frame();
        let frontier = self.analyzer.frontier();

        self.words
            .iter()
            .filter(|decoded| {
                self.state == SessionState::Finalized
                    || decoded.end_frame + self.commit_lag_frames <= frontier
            })
            .map(|decoded| WordSpan {
                word: decoded.word.clone(),
                start_seconds: decoded.start_frame as f32 * spf,
                end_seconds: decoded.end_frame as f32 * spf,
            })
            .collect()
    }

    /// Label fresh word events and append them to the running hypothesis.
    fn absorb(&mut self, events: Vec<WordEvent>) {
        for event in events {
            let label = (event.mean_rms * LABEL_ENERGY_QUANTA) as usize;
            self.words.push(DecodedWord {
                word: self.symbols.spoken_word(label).to_owned(),
                start_frame: event.start_frame,
                end_frame: event.end_frame,
            });
        }
    }
}
