//! `kaldine` — a streaming speech-to-text session library.
//!
//! This crate is the boundary contract for online decoding: audio arrives in
//! sequential buffers and the session incrementally produces a best-effort
//! transcript, a confidence score, and word-level timing. Two acoustic-model
//! backends — classical statistical (GMM) and neural (NNet3) — share an
//! identical life-cycle, so callers switch backends without changing
//! integration code.
//!
//! The split is:
//! - an [`AcousticModel`](backend::AcousticModel) is immutable, expensive to
//!   build, and safely shared by many sessions;
//! - a [`DecodingSession`](backend::DecodingSession) is cheap, mutable,
//!   per-utterance state that advances through `Fresh -> Decoding ->
//!   Finalized` and never rewinds.
//!
//! ```no_run
//! use kaldine::backend::{AcousticModel, DecodingSession};
//! use kaldine::backends::gmm::{GmmModelConfig, GmmOnlineModel};
//! use kaldine::buffer::AudioFrameBuffer;
//!
//! let model = GmmOnlineModel::new(GmmModelConfig::from_directory("models/en"))?;
//! let mut session = model.start_session();
//!
//! let chunk = vec![0.0f32; 1024];
//! let buffer = AudioFrameBuffer::new(16_000.0, &chunk)?;
//! session.decode(&buffer, false)?;
//! session.decode(&AudioFrameBuffer::new(16_000.0, &[])?, true)?;
//!
//! let hypothesis = session.hypothesis();
//! println!("{} ({})", hypothesis.text, hypothesis.likelihood);
//! # Ok::<(), kaldine::Error>(())
//! ```

// High-level API (most consumers should start here).
pub mod recognizer;

// The model/session capability traits and their concrete backends.
pub mod backend;
pub mod backends;

// Streaming input and result data structures.
pub mod alignment;
pub mod buffer;

// Shared session state machine.
pub mod session;

// Model resources.
pub mod symbols;

// Audio ingestion.
pub mod wav;

// Logging configuration and control.
pub mod logging;

pub mod error;

// Internal decoding engine; not part of the public contract.
mod engine;

pub use alignment::{Hypothesis, WordSpan};
pub use buffer::AudioFrameBuffer;
pub use error::{Error, Result};
pub use session::SessionState;
