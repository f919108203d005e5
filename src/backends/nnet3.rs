//! The neural-network (NNet3) acoustic-model backend.
//!
//! Same session protocol as the GMM backend; the differences live entirely
//! in construction: three extra resources (iVector extractor, feature
//! transform, neural-network model) and extra numeric tuning for acoustic
//! scaling, frame subsampling, and the online iVector update period. At
//! decode time the only visible difference is commit latency: the network's
//! right context holds recent words back until enough lookahead frames have
//! arrived, and finalization flushes that lookahead.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::alignment::{Hypothesis, WordSpan};
use crate::backend::{AcousticModel, DecodingSession};
use crate::backends::{require_resource, silence_tolerance_frames, validate_common_params};
use crate::buffer::AudioFrameBuffer;
use crate::error::{Error, Result};
use crate::session::{SessionCore, SessionState};
use crate::symbols::WordSymbolTable;

/// Right-context frames the network needs per subsampled output frame.
const RIGHT_CONTEXT_FRAMES: u64 = 3;

/// Construction parameters for an [`Nnet3OnlineModel`].
#[derive(Debug, Clone)]
pub struct Nnet3ModelConfig {
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
    /// Scale applied to acoustic log-likelihoods.
    pub acoustic_scale: f32,
    /// Output frames are produced once per this many input frames.
    pub frame_subsampling_factor: u32,
    /// Frames between online iVector estimate updates.
    pub ivector_period: u32,

    /// Acoustic model parameters.
    pub acoustic_model: PathBuf,
    /// Transition model.
    pub transition_model: PathBuf,
    /// Decoding graph (HCLG).
    pub decoding_graph: PathBuf,
    /// Word symbol table (`words.txt`).
    pub word_symbols: PathBuf,
    /// iVector extractor.
    pub ivector_extractor: PathBuf,
    /// Feature transform (LDA matrix or equivalent).
    pub feature_transform: PathBuf,
    /// The neural network itself.
    pub nnet_model: PathBuf,
}

impl Nnet3ModelConfig {
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
            acoustic_scale: 1.0,
            frame_subsampling_factor: 3,
            ivector_period: 10,
            acoustic_model: dir.join("am/final.mdl"),
            transition_model: dir.join("am/final.trans"),
            decoding_graph: dir.join("graph/HCLG.fst"),
            word_symbols: dir.join("graph/words.txt"),
            ivector_extractor: dir.join("ivector/final.ie"),
            feature_transform: dir.join("ivector/final.mat"),
            nnet_model: dir.join("am/final.raw"),
        }
    }
}

/// An immutable NNet3 acoustic model, shared by any number of sessions.
#[derive(Debug)]
pub struct Nnet3OnlineModel {
    config: Nnet3ModelConfig,
    symbols: WordSymbolTable,
}

impl Nnet3OnlineModel {
    /// Construct a model, loading and validating every resource up front.
    ///
    /// Construction is atomic; see [`crate::backends::gmm::GmmOnlineModel::new`]
    /// for the shared discipline. The NNet3 variant additionally validates
    /// its scaling/subsampling tuning and its three extra resources.
    pub fn new(config: Nnet3ModelConfig) -> Result<Self> {
        validate_common_params(
            config.sample_rate,
            config.beam,
            config.max_active,
            config.min_active,
            config.lattice_beam,
            config.silence_tolerance,
        )?;
        if !(config.acoustic_scale.is_finite() && config.acoustic_scale > 0.0) {
            return Err(Error::invalid_parameter(format!(
                "acoustic scale must be positive, got {}",
                config.acoustic_scale
            )));
        }
        if config.frame_subsampling_factor == 0 {
            return Err(Error::invalid_parameter(
                "frame subsampling factor must be at least 1",
            ));
        }
        if config.ivector_period == 0 {
            return Err(Error::invalid_parameter(
                "ivector period must be at least 1",
            ));
        }

        for path in [
            &config.acoustic_model,
            &config.transition_model,
            &config.decoding_graph,
            &config.ivector_extractor,
            &config.feature_transform,
            &config.nnet_model,
        ] {
            require_resource(path)?;
        }
        let symbols = WordSymbolTable::from_file(&config.word_symbols)?;

        info!(
            nnet_model = %config.nnet_model.display(),
            graph = %config.decoding_graph.display(),
            subsampling = config.frame_subsampling_factor,
            words = symbols.spoken_len(),
            "initialized NNet3 online model"
        );

        Ok(Self { config, symbols })
    }

    /// The configuration this model was built from.
    pub fn config(&self) -> &Nnet3ModelConfig {
        &self.config
    }

    /// The loaded word symbol table.
    pub fn word_symbols(&self) -> &WordSymbolTable {
        &self.symbols
    }

    /// Frames a word trails the frontier by before it commits: whichever is
    /// longer of the endpointing silence and the network's right context at
    /// the configured subsampling factor.
    fn commit_lag_frames(&self) -> u64 {
        let lookahead = RIGHT_CONTEXT_FRAMES * u64::from(self.config.frame_subsampling_factor);
        silence_tolerance_frames(self.config.silence_tolerance).max(lookahead)
    }
}

impl AcousticModel for Nnet3OnlineModel {
    type Session<'a> = Nnet3OnlineSession<'a>;

    fn sample_rate(&self) -> f32 {
        self.config.sample_rate
    }

    fn start_session(&self) -> Nnet3OnlineSession<'_> {
        Nnet3OnlineSession {
            core: SessionCore::new(
                &self.symbols,
                self.config.sample_rate,
                f64::from(self.config.acoustic_scale),
                self.commit_lag_frames(),
            ),
        }
    }
}

/// Per-utterance decoding state for the NNet3 backend.
pub struct Nnet3OnlineSession<'m> {
    core: SessionCore<'m>,
}

impl DecodingSession for Nnet3OnlineSession<'_> {
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
