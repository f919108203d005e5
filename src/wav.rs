use std::io::Read;

use hound::{SampleFormat, WavReader};

use crate::backend::DecodingSession;
use crate::buffer::AudioFrameBuffer;
use crate::error::{Error, Result};

/// Load WAV audio from a reader and return normalized samples plus the
/// container's sample rate.
///
/// Format requirements:
/// - mono (1 channel)
/// - 16-bit integer PCM
///
/// Samples are normalized to `[-1.0, 1.0]`. The sample rate is returned
/// rather than enforced here: whether it is acceptable is the bound model's
/// decision, and a mismatch surfaces as [`Error::RateMismatch`] at decode
/// time — never as a silent resample.
pub fn samples_from_wav_reader<R>(reader: R) -> Result<(Vec<f32>, f32)>
where
    R: Read,
{
    let mut reader = WavReader::new(reader)
        .map_err(|err| Error::wav(format!("failed to read WAV header: {err}")))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(Error::wav(format!(
            "expected mono WAV (1 channel), got {} channels",
            spec.channels
        )));
    }
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(Error::wav(format!(
            "expected 16-bit integer PCM, got {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let mut samples = Vec::with_capacity(reader.len() as usize);
    for sample in reader.samples::<i16>() {
        let pcm = sample.map_err(|err| Error::wav(format!("failed to read sample: {err}")))?;
        samples.push(pcm as f32 / i16::MAX as f32);
    }

    Ok((samples, spec.sample_rate as f32))
}

/// Decode an entire WAV file through a session in one finalizing call.
///
/// After this returns, the session is finalized and its hypothesis and
/// alignment are complete.
pub fn decode_wav<R, S>(session: &mut S, reader: R) -> Result<()>
where
    R: Read,
    S: DecodingSession,
{
    let (samples, sample_rate) = samples_from_wav_reader(reader)?;
    let buffer = AudioFrameBuffer::new(sample_rate, &samples)?;
    session.decode(&buffer, true)
}
