//! The classical statistical (GMM) acoustic-model backend.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::alignment::{Hypothesis, WordSpan};
use crate::backend::{AcousticModel, DecodingSession};
use crate::backends::{require_resource, silence_tolerance_frames, validate_common_params};
use crate::buffer::AudioFrameBuffer;
use crate::error::Result;
use crate::session::{SessionCore, SessionState};
use crate::symbols::WordSymbolTable;

/// Construction parameters for a [`GmmOnlineModel`].
///
/// Numeric defaults follow the usual online-decoding settings; the resource
/// paths have no defaults and must all resolve to real files.
#[derive(Debug, Clone)]
pub struct GmmModelConfig {
    /// Sample rate the model was trained for, in Hz.
    pub sample_rate: f32,
    /// Main decoding beam width.
    pub beam: f32,
    /// Upper bound on active search states.
    pub max_active: u32,
    /// Lower bound on active search states.
    pub min_active: u32,
    /// Lattice generation beam.
    pub lattice_beam: f32,
    /// Endpointing: seconds of trailing silence before a word commits.
    pub silence_tolerance: f32,

    /// Acoustic model parameters.
    pub acoustic_model: PathBuf,
    /// Transition model.
    pub transition_model: PathBuf,
    /// Decoding graph (HCLG).
    pub decoding_graph: PathBuf,
    /// Word symbol table (`words.txt`).
    pub word_symbols: PathBuf,
}

impl GmmModelConfig {
    /// Map a conventional model directory onto explicit resource paths,
    /// with default tuning.
    pub fn from_directory(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            sample_rate: 16_000.0,
            beam: 7.0,
            max_active: 7_000,
            min_active: 200,
            lattice_beam: 8.0,
            silence_tolerance: 0.5,
            acoustic_model: dir.join("am/final.mdl"),
            transition_model: dir.join("am/final.trans"),
            decoding_graph: dir.join("graph/HCLG.fst"),
            word_symbols: dir.join("graph/words.txt"),
        }
    }
}

/// An immutable GMM acoustic model, shared by any number of sessions.
#[derive(Debug)]
pub struct GmmOnlineModel {
    config: GmmModelConfig,
    symbols: WordSymbolTable,
}

impl GmmOnlineModel {
    /// Construct a model, loading and validating every resource up front.
    ///
    /// Construction is atomic: validation failures surface as
    /// [`crate::Error::InvalidParameter`] or [`crate::Error::ResourceLoad`]
    /// and leave no partially-initialized model behind.
    pub fn new(config: GmmModelConfig) -> Result<Self> {
        validate_common_params(
            config.sample_rate,
            config.beam,
            config.max_active,
            config.min_active,
            config.lattice_beam,
            config.silence_tolerance,
        )?;

        for path in [
            &config.acoustic_model,
            &config.transition_model,
            &config.decoding_graph,
        ] {
            require_resource(path)?;
        }
        let symbols = WordSymbolTable::from_file(&config.word_symbols)?;

        info!(
            acoustic_model = %config.acoustic_model.display(),
            graph = %config.decoding_graph.display(),
            words = symbols.spoken_len(),
            "initialized GMM online model"
        );

        Ok(Self { config, symbols })
    }

    /// The configuration this model was built from.
    pub fn config(&self) -> &GmmModelConfig {
        &self.config
    }

    /// The loaded word symbol table.
    pub fn word_symbols(&self) -> &WordSymbolTable {
        &self.symbols
    }
}

impl AcousticModel for GmmOnlineModel {
    type Session<'a> = GmmOnlineSession<'a>;

    fn sample_rate(&self) -> f32 {
        self.config.sample_rate
    }

    fn start_session(&self) -> GmmOnlineSession<'_> {
        GmmOnlineSession {
            core: SessionCore::new(
                &self.symbols,
                self.config.sample_rate,
                1.0,
                silence_tolerance_frames(self.config.silence_tolerance),
            ),
        }
    }
}

/// Per-utterance decoding state for the GMM backend.
///
/// Words commit once the configured endpointing silence has elapsed after
/// them; finalization commits everything.
pub struct GmmOnlineSession<'m> {
    core: SessionCore<'m>,
}

impl DecodingSession for GmmOnlineSession<'_> {
    fn decode(&mut self, buffer: &AudioFrameBuffer<'_>, finalize: bool) -> Result<()> {
        self.core.decode(buffer, finalize)
    }

    fn hypothesis(&self) -> Hypothesis {
        self.core.hypothesis()
    }

    fn word_alignment(&self) -> Vec<WordSpan> {
        self.core.word_alignment()
    }

    fn state(&self) -> SessionState {
        self.core.state()
    }

    fn samples_consumed(&self) -> u64 {
        self.core.samples_consumed()
    }
}
