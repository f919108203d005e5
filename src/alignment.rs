use serde::Serialize;

/// The transcript hypothesis a session holds at one moment in time.
///
/// Produced fresh on every extraction call; partial before finalization,
/// final after. `likelihood` is a cumulative log-probability-derived score —
/// it grows (in magnitude) with the number of frames decoded, so comparing
/// likelihoods across sessions of different lengths is not meaningful
/// without normalization, which this crate does not define.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Hypothesis {
    /// Best-effort transcript, words joined by single spaces.
    pub text: String,
    /// Cumulative log-likelihood-derived confidence.
    pub likelihood: f64,
}

impl Hypothesis {
    pub(crate) fn empty() -> Self {
        Self {
            text: String::new(),
            likelihood: 0.0,
        }
    }
}

/// One word of the timing alignment.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct WordSpan {
    /// The decoded word.
    pub word: String,
    /// Start of the word in seconds from the beginning of the utterance.
    pub start_seconds: f32,
    /// End of the word in seconds from the beginning of the utterance.
    pub end_seconds: f32,
}
