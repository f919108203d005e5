//! Deterministic frame analysis the decoding sessions run on.
//!
//! This module stands in for the heavyweight search machinery a production
//! acoustic backend wires in underneath the session protocol. The contract it
//! must honor is the one the sessions expose:
//! - results depend only on the concatenated sample stream, never on how the
//!   caller chunked it (a carry buffer absorbs partial frames at chunk
//!   boundaries);
//! - analysis advances monotonically and never rewinds;
//! - the cumulative score grows with the number of frames analyzed.

/// Frames per second of audio. Frames are 10 ms, the usual ASR hop size.
pub(crate) const FRAMES_PER_SECOND: f32 = 100.0;

/// RMS energy at or above which a frame counts as speech.
const SPEECH_RMS_THRESHOLD: f32 = 0.015;

/// Floor applied to per-frame RMS before taking the log score.
const SCORE_RMS_FLOOR: f32 = 1e-4;

/// Minimum speech-run length, in frames, for the run to surface as a word.
/// Shorter bursts are treated as transient noise.
const MIN_RUN_FRAMES: u64 = 3;

/// A contiguous speech region that has been closed off by silence (or by a
/// flush) and is ready to be labeled as a word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WordEvent {
    pub start_frame: u64,
    pub end_frame: u64,
    /// Mean per-frame RMS over the run; drives deterministic word labeling.
    pub mean_rms: f32,
}

#[derive(Debug, Clone, Copy)]
struct SpeechRun {
    start_frame: u64,
    frames: u64,
    rms_sum: f64,
}

/// Incremental frame/energy analyzer.
///
/// Samples are cut into fixed-length frames; each frame is scored and
/// classified as speech or silence; contiguous speech runs become
/// [`WordEvent`]s once silence closes them (or when the stream is flushed).
#[derive(Debug)]
pub(crate) struct FrameAnalyzer {
    frame_len: usize,
    sample_rate: f32,
    carry: Vec<f32>,
    frontier: u64,
    score: f64,
    run: Option<SpeechRun>,
}

impl FrameAnalyzer {
    pub(crate) fn new(sample_rate: f32) -> Self {
        // One frame per 10 ms of audio at the session's rate.
        let frame_len = ((sample_rate / FRAMES_PER_SECOND).round() as usize).max(1);
        Self {
            frame_len,
            sample_rate,
            carry: Vec::new(),
            frontier: 0,
            score: 0.0,
            run: None,
        }
    }

    /// Number of frames fully analyzed so far.
    pub(crate) fn frontier(&self) -> u64 {
        self.frontier
    }

    /// Cumulative log-energy score over all analyzed frames.
    pub(crate) fn score(&self) -> f64 {
        self.score
    }

    /// Seconds spanned by one frame. Derived from the actual frame length,
    /// so rounding at odd sample rates cannot skew alignment times.
    pub(crate) fn seconds_per_frame(&self) -> f32 {
        self.frame_len as f32 / self.sample_rate
    }

    /// Consume a chunk of samples, emitting any speech runs that silence has
    /// closed off. Whole frames are analyzed immediately; a trailing partial
    /// frame is carried until the next chunk (or [`FrameAnalyzer::flush`]).
    pub(crate) fn push(&mut self, samples: &[f32], events: &mut Vec<WordEvent>) {
        self.carry.extend_from_slice(samples);

        let carry = std::mem::take(&mut self.carry);
        let mut consumed = 0;
        while carry.len() - consumed >= self.frame_len {
            let frame = &carry[consumed..consumed + self.frame_len];
            self.analyze_frame(frame, events);
            consumed += self.frame_len;
        }
        self.carry = carry;
        self.carry.drain(..consumed);
    }

    /// Flush trailing context at end of utterance: analyze the leftover
    /// partial frame, then close any speech run still open.
    pub(crate) fn flush(&mut self, events: &mut Vec<WordEvent>) {
        if !self.carry.is_empty() {
            let frame = std::mem::take(&mut self.carry);
            self.analyze_frame(&frame, events);
        }

        if let Some(run) = self.run.take() {
            Self::close_run(run, &mut *events);
        }
    }

    fn analyze_frame(&mut self, frame: &[f32], events: &mut Vec<WordEvent>) {
        let energy: f64 = frame.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
        let rms = (energy / frame.len() as f64).sqrt() as f32;

        self.score += f64::from(rms.max(SCORE_RMS_FLOOR)).ln();

        if rms >= SPEECH_RMS_THRESHOLD {
            match self.run.as_mut() {
                Some(run) => {
                    run.frames += 1;
                    run.rms_sum += f64::from(rms);
                }
                None => {
                    self.run = Some(SpeechRun {
                        start_frame: self.frontier,
                        frames: 1,
                        rms_sum: f64::from(rms),
                    });
                }
            }
        } else if let Some(run) = self.run.take() {
            Self::close_run(run, events);
        }

        self.frontier += 1;
    }

    fn close_run(run: SpeechRun, events: &mut Vec<WordEvent>) {
        if run.frames < MIN_RUN_FRAMES {
            return;
        }
        events.push(WordEvent {
            start_frame: run.start_frame,
            end_frame: run.start_frame + run.frames,
            mean_rms: (run.rms_sum / run.frames as f64) as f32,
        });
    }
}
