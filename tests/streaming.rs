//! Streaming-buffer contract: chunking transparency and end-to-end flows.

mod common;

use common::*;
use kaldine::backend::{AcousticModel, DecodingSession};
use kaldine::recognizer::Recognizer;
use kaldine::{AudioFrameBuffer, Hypothesis, WordSpan};

fn decode_in_chunks<M: AcousticModel>(
    model: &M,
    samples: &[f32],
    chunk: usize,
) -> anyhow::Result<(Hypothesis, Vec<WordSpan>)> {
    let mut session = model.start_session();
    for piece in samples.chunks(chunk) {
        session.decode(&AudioFrameBuffer::new(RATE, piece)?, false)?;
    }
    session.decode(&AudioFrameBuffer::new(RATE, &[])?, true)?;
    Ok((session.hypothesis(), session.word_alignment()))
}

fn decode_whole<M: AcousticModel>(
    model: &M,
    samples: &[f32],
) -> anyhow::Result<(Hypothesis, Vec<WordSpan>)> {
    let mut session = model.start_session();
    session.decode(&AudioFrameBuffer::new(RATE, samples)?, true)?;
    Ok((session.hypothesis(), session.word_alignment()))
}

#[test]
fn gmm_chunking_is_transparent() -> anyhow::Result<()> {
    let dir = gmm_model_dir();
    let model = gmm_model(&dir);
    let samples = two_word_utterance();

    let whole = decode_whole(&model, &samples)?;
    assert!(!whole.0.text.is_empty());
    assert_eq!(whole.1.len(), 2);

    for chunk in [1, 13, 160, 1024, 4096] {
        let split = decode_in_chunks(&model, &samples, chunk)?;
        assert_eq!(split, whole, "results diverged at chunk size {chunk}");
    }
    Ok(())
}

#[test]
fn nnet3_chunking_is_transparent() -> anyhow::Result<()> {
    let dir = nnet3_model_dir();
    let model = nnet3_model(&dir);
    let samples = two_word_utterance();

    let whole = decode_whole(&model, &samples)?;
    for chunk in [7, 512, 2048] {
        let split = decode_in_chunks(&model, &samples, chunk)?;
        assert_eq!(split, whole, "results diverged at chunk size {chunk}");
    }
    Ok(())
}

#[test]
fn one_second_of_silence_decodes_to_nothing() -> anyhow::Result<()> {
    // GMM at 16 kHz, beam 10, silence tolerance 0.5.
    let dir = gmm_model_dir();
    let mut config = kaldine::backends::gmm::GmmModelConfig::from_directory(dir.path());
    config.beam = 10.0;
    config.silence_tolerance = 0.5;
    let model = kaldine::backends::gmm::GmmOnlineModel::new(config)?;

    let mut session = model.start_session();
    let samples = silence(1.0);
    session.decode(&AudioFrameBuffer::new(16_000.0, &samples)?, true)?;

    assert_eq!(session.hypothesis().text, "");
    assert!(session.word_alignment().is_empty());
    Ok(())
}

#[test]
fn alignment_covers_only_decoded_audio() -> anyhow::Result<()> {
    let dir = gmm_model_dir();
    let model = gmm_model(&dir);
    let samples = two_word_utterance();
    let duration = samples.len() as f32 / RATE;

    let (_, alignment) = decode_whole(&model, &samples)?;
    for span in &alignment {
        assert!(span.start_seconds >= 0.0);
        assert!(span.end_seconds <= duration);
        assert!(span.start_seconds < span.end_seconds);
    }
    for pair in alignment.windows(2) {
        assert!(pair[0].end_seconds <= pair[1].start_seconds);
    }
    Ok(())
}

#[test]
fn likelihood_accumulates_with_decoded_frames() -> anyhow::Result<()> {
    let dir = gmm_model_dir();
    let model = gmm_model(&dir);

    let short = decode_whole(&model, &silence(0.5))?.0.likelihood;
    let long = decode_whole(&model, &silence(1.5))?.0.likelihood;
    assert!(long < short, "longer audio must accumulate more log mass");
    Ok(())
}

#[test]
fn recognizer_streams_partials_and_finalizes() -> anyhow::Result<()> {
    let dir = gmm_model_dir();
    let recognizer = Recognizer::new(gmm_model(&dir));
    let samples = two_word_utterance();

    let mut partials = Vec::new();
    let recognition =
        recognizer.recognize_with_partials(RATE, &samples, |hyp| partials.push(hyp.clone()))?;

    assert_eq!(partials.len(), samples.len().div_ceil(1024));
    // Partial transcripts only ever grow.
    for pair in partials.windows(2) {
        assert!(pair[1].text.len() >= pair[0].text.len());
    }
    assert_eq!(recognition.alignment.len(), 2);
    assert_eq!(
        recognition.hypothesis.text,
        partials.last().unwrap().text,
        "final text must match the last partial (all words were closed by silence)"
    );
    Ok(())
}

#[test]
fn recognizer_decodes_wav_input() -> anyhow::Result<()> {
    use std::io::Cursor;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: RATE as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for sample in two_word_utterance() {
            writer.write_sample((sample * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
    }

    let dir = gmm_model_dir();
    let recognizer = Recognizer::new(gmm_model(&dir));
    let recognition = recognizer.recognize_wav(Cursor::new(cursor.into_inner()))?;

    assert_eq!(recognition.alignment.len(), 2);
    assert!(!recognition.hypothesis.text.is_empty());
    Ok(())
}

#[test]
fn decode_wav_finalizes_a_session() -> anyhow::Result<()> {
    use std::io::Cursor;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: RATE as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for sample in silence(0.5) {
            writer.write_sample((sample * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
    }

    let dir = gmm_model_dir();
    let model = gmm_model(&dir);
    let mut session = model.start_session();
    kaldine::wav::decode_wav(&mut session, Cursor::new(cursor.into_inner()))?;

    assert_eq!(session.state(), kaldine::SessionState::Finalized);
    assert_eq!(session.samples_consumed(), 8_000);
    Ok(())
}
