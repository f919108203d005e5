//! Shared fixtures: throwaway model directories and synthetic audio.

// Not every suite uses every fixture.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use kaldine::backends::gmm::{GmmModelConfig, GmmOnlineModel};
use kaldine::backends::nnet3::{Nnet3ModelConfig, Nnet3OnlineModel};
use tempfile::TempDir;

pub const RATE: f32 = 16_000.0;

const WORDS_TXT: &str = "<eps> 0\nhello 1\nworld 2\nagain 3\n#0 4\n<s> 5\n</s> 6\n";

fn write(path: &Path, contents: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Lay out a minimal GMM model directory with placeholder resources.
pub fn gmm_model_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("am/final.mdl"), b"acoustic model");
    write(&dir.path().join("am/final.trans"), b"transition model");
    write(&dir.path().join("graph/HCLG.fst"), b"decoding graph");
    write(&dir.path().join("graph/words.txt"), WORDS_TXT.as_bytes());
    dir
}

/// Lay out a minimal NNet3 model directory with placeholder resources.
pub fn nnet3_model_dir() -> TempDir {
    let dir = gmm_model_dir();
    write(&dir.path().join("ivector/final.ie"), b"ivector extractor");
    write(&dir.path().join("ivector/final.mat"), b"feature transform");
    write(&dir.path().join("am/final.raw"), b"nnet model");
    dir
}

pub fn gmm_model(dir: &TempDir) -> GmmOnlineModel {
    GmmOnlineModel::new(GmmModelConfig::from_directory(dir.path())).unwrap()
}

pub fn nnet3_model(dir: &TempDir) -> Nnet3OnlineModel {
    Nnet3OnlineModel::new(Nnet3ModelConfig::from_directory(dir.path())).unwrap()
}

/// `seconds` of silence at the fixture rate.
pub fn silence(seconds: f32) -> Vec<f32> {
    vec![0.0; (RATE * seconds) as usize]
}

/// `seconds` of a sine burst loud enough to register as speech.
pub fn tone(seconds: f32, amplitude: f32) -> Vec<f32> {
    let len = (RATE * seconds) as usize;
    (0..len)
        .map(|i| amplitude * (i as f32 * 0.1).sin())
        .collect()
}

/// A short utterance: two bursts separated and bounded by silence.
pub fn two_word_utterance() -> Vec<f32> {
    let mut samples = silence(0.2);
    samples.extend(tone(0.3, 0.5));
    samples.extend(silence(0.3));
    samples.extend(tone(0.25, 0.8));
    samples.extend(silence(0.6));
    samples
}
