use crate::error::{Error, Result};

/// A validated, non-owning view over one chunk of streaming audio.
///
/// This is the unit of input to [`crate::backend::DecodingSession::decode`]:
/// a contiguous slice of single-precision mono samples plus the rate they
/// were captured at. The view is consumed synchronously by one decode call
/// and never retained by the session afterward.
///
/// Validation happens here, at the boundary, before any decoding work:
/// - the buffer must be exactly one-dimensional ([`AudioFrameBuffer::from_shape`]);
/// - the sample rate must be positive and finite.
#[derive(Debug, Clone, Copy)]
pub struct AudioFrameBuffer<'a> {
    sample_rate: f32,
    samples: &'a [f32],
}

impl<'a> AudioFrameBuffer<'a> {
    /// Wrap a flat slice of samples. Slices are one-dimensional by
    /// construction, so only the sample rate needs checking.
    pub fn new(sample_rate: f32, samples: &'a [f32]) -> Result<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(Error::invalid_parameter(format!(
                "sample rate must be positive and finite, got {sample_rate}"
            )));
        }

        Ok(Self {
            sample_rate,
            samples,
        })
    }

    /// Wrap a raw buffer described by an explicit shape, as handed over by
    /// numeric-array interop.
    ///
    /// Any rank other than 1 is rejected with [`Error::Shape`], as is a shape
    /// that disagrees with the slice length. Nothing downstream ever sees a
    /// multi-dimensional buffer.
    pub fn from_shape(sample_rate: f32, samples: &'a [f32], shape: &[usize]) -> Result<Self> {
        if shape.len() != 1 {
            return Err(Error::Shape {
                shape: shape.to_vec(),
            });
        }
        if shape[0] != samples.len() {
            return Err(Error::Shape {
                shape: shape.to_vec(),
            });
        }

        Self::new(sample_rate, samples)
    }

    /// The rate the samples were captured at, in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// The underlying samples.
    pub fn samples(&self) -> &'a [f32] {
        self.samples
    }

    /// Number of frames (samples, since the view is mono).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of this chunk in seconds.
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_flat_slices() {
        let samples = vec![0.0f32; 160];
        let buffer = AudioFrameBuffer::new(16_000.0, &samples).unwrap();
        assert_eq!(buffer.len(), 160);
        assert_eq!(buffer.sample_rate(), 16_000.0);
        assert!((buffer.duration_seconds() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn rejects_non_positive_rates() {
        let samples = vec![0.0f32; 16];
        assert!(matches!(
            AudioFrameBuffer::new(0.0, &samples),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            AudioFrameBuffer::new(-16_000.0, &samples),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            AudioFrameBuffer::new(f32::NAN, &samples),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_rank_two_shapes() {
        let samples = vec![0.0f32; 200];
        let err = AudioFrameBuffer::from_shape(16_000.0, &samples, &[100, 2]).unwrap_err();
        assert!(matches!(err, Error::Shape { ref shape } if shape == &[100, 2]));
    }

    #[test]
    fn rejects_shape_length_disagreement() {
        let samples = vec![0.0f32; 200];
        assert!(matches!(
            AudioFrameBuffer::from_shape(16_000.0, &samples, &[100]),
            Err(Error::Shape { .. })
        ));
    }

    #[test]
    fn accepts_rank_one_shapes() {
        let samples = vec![0.0f32; 200];
        let buffer = AudioFrameBuffer::from_shape(16_000.0, &samples, &[200]).unwrap();
        assert_eq!(buffer.len(), 200);
    }

    #[test]
    fn empty_buffers_are_valid() {
        let buffer = AudioFrameBuffer::new(16_000.0, &[]).unwrap();
        assert!(buffer.is_empty());
    }
}
