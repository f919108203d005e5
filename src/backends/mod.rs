//! Concrete acoustic-model backends.

pub mod gmm;
pub mod nnet3;

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Validate one configured resource path: it must exist, be a regular file,
/// and be non-empty. Content-level validation (e.g. the word symbol table)
/// happens where the resource is actually parsed.
pub(crate) fn require_resource(path: &Path) -> Result<()> {
    let meta = fs::metadata(path).map_err(|err| Error::resource_load(path, err.to_string()))?;

    if !meta.is_file() {
        return Err(Error::resource_load(path, "not a regular file"));
    }
    if meta.len() == 0 {
        return Err(Error::resource_load(path, "file is empty"));
    }

    Ok(())
}

/// Validate the numeric tuning shared by both backends.
pub(crate) fn validate_common_params(
    sample_rate: f32,
    beam: f32,
    max_active: u32,
    min_active: u32,
    lattice_beam: f32,
    silence_tolerance: f32,
) -> Result<()> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(Error::invalid_parameter(format!(
            "sample rate must be positive and finite, got {sample_rate}"
        )));
    }
    if !(beam.is_finite() && beam > 0.0) {
        return Err(Error::invalid_parameter(format!(
            "beam must be positive, got {beam}"
        )));
    }
    if max_active == 0 {
        return Err(Error::invalid_parameter("max_active must be positive"));
    }
    if min_active > max_active {
        return Err(Error::invalid_parameter(format!(
            "min_active ({min_active}) must not exceed max_active ({max_active})"
        )));
    }
    if !(lattice_beam.is_finite() && lattice_beam > 0.0) {
        return Err(Error::invalid_parameter(format!(
            "lattice beam must be positive, got {lattice_beam}"
        )));
    }
    if !(silence_tolerance.is_finite() && silence_tolerance >= 0.0) {
        return Err(Error::invalid_parameter(format!(
            "silence tolerance must be non-negative, got {silence_tolerance}"
        )));
    }

    Ok(())
}

/// Convert an endpointing silence tolerance in seconds into a commit lag in
/// analysis frames.
pub(crate) fn silence_tolerance_frames(silence_tolerance: f32) -> u64 {
    (silence_tolerance * crate::engine::FRAMES_PER_SECOND).round() as u64
}
