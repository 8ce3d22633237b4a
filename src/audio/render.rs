//! Offline rendering
//!
//! Renders tone graphs to PCM so cues can be auditioned outside a browser,
//! and exports the result as WAV.

use std::cell::RefCell;
use std::f64::consts::PI;
use std::path::Path;
use std::rc::Rc;

use hound::{SampleFormat, WavSpec, WavWriter};

use super::backend::AudioBackend;
use super::tone::{FilterKind, FilterSpec, ToneGraph};
use crate::engine::Millis;
use crate::error::{PortfolioError, Result};

/// Default render rate (Hz)
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Lowest rate accepted for export (Hz)
pub const MIN_SAMPLE_RATE: u32 = 1000;

/// Normalized biquad coefficients (Audio EQ Cookbook)
#[derive(Debug, Clone, Copy)]
struct BiquadCoeffs {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl BiquadCoeffs {
    fn calculate(spec: &FilterSpec, sample_rate: f64) -> Self {
        let nyquist = (sample_rate / 2.0 - 1.0).max(20.0);
        let freq = spec.frequency.clamp(20.0, nyquist);
        let q = spec.q.clamp(0.1, 30.0);

        let w0 = 2.0 * PI * freq / sample_rate;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * q);

        let (b0, b1, b2, a0, a1, a2) = match spec.kind {
            FilterKind::LowPass => (
                (1.0 - cos_w0) / 2.0,
                1.0 - cos_w0,
                (1.0 - cos_w0) / 2.0,
                1.0 + alpha,
                -2.0 * cos_w0,
                1.0 - alpha,
            ),
            // Constant 0 dB peak gain
            FilterKind::BandPass => (
                alpha,
                0.0,
                -alpha,
                1.0 + alpha,
                -2.0 * cos_w0,
                1.0 - alpha,
            ),
        };

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct BiquadState {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadState {
    fn process(&mut self, input: f64, c: &BiquadCoeffs) -> f64 {
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;
        output
    }
}

/// Sine-oscillator renderer for tone graphs
#[derive(Debug, Clone, Copy)]
pub struct OfflineRenderer {
    sample_rate: u32,
}

impl Default for OfflineRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl OfflineRenderer {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Render one graph to mono samples covering `0..graph.stop`
    pub fn render(&self, graph: &ToneGraph) -> Vec<f32> {
        let sr = self.sample_rate as f64;
        let total = (graph.stop * sr).ceil().max(0.0) as usize;
        let mut samples = vec![0.0f32; total];

        let coeffs = graph.filter.as_ref().map(|spec| BiquadCoeffs::calculate(spec, sr));
        let mut state = BiquadState::default();
        let mut phase = 0.0f64;

        for (n, sample) in samples.iter_mut().enumerate() {
            let t = n as f64 / sr;
            if t < graph.start {
                continue;
            }
            let raw = phase.sin();
            phase = (phase + 2.0 * PI * graph.frequency_at(t) / sr) % (2.0 * PI);

            let filtered = match &coeffs {
                Some(c) => state.process(raw, c),
                None => raw,
            };
            *sample = (filtered * graph.gain_at(t)) as f32;
        }

        samples
    }

    /// Render a list of `(offset_ms, graph)` pairs into one buffer
    pub fn mixdown(&self, tones: &[(Millis, ToneGraph)]) -> Vec<f32> {
        let mut out = Vec::new();
        for (at, graph) in tones {
            mix_into(&mut out, self.offset_samples(*at), &self.render(graph));
        }
        out
    }

    fn offset_samples(&self, at: Millis) -> usize {
        (at * self.sample_rate as u64 / 1000) as usize
    }
}

fn mix_into(out: &mut Vec<f32>, offset: usize, samples: &[f32]) {
    if out.len() < offset + samples.len() {
        out.resize(offset + samples.len(), 0.0);
    }
    for (dst, src) in out[offset..].iter_mut().zip(samples) {
        *dst += *src;
    }
}

/// Backend that renders everything it plays into one shared buffer
///
/// Clones share the buffer.
#[derive(Debug, Clone)]
pub struct MixdownBackend {
    renderer: OfflineRenderer,
    buffer: Rc<RefCell<Vec<f32>>>,
}

impl MixdownBackend {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            renderer: OfflineRenderer::new(sample_rate),
            buffer: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.renderer.sample_rate()
    }

    /// Copy of the mixed samples
    pub fn samples(&self) -> Vec<f32> {
        self.buffer.borrow().clone()
    }
}

impl AudioBackend for MixdownBackend {
    fn play(&mut self, at: Millis, graph: ToneGraph) {
        let offset = self.renderer.offset_samples(at);
        let rendered = self.renderer.render(&graph);
        mix_into(&mut self.buffer.borrow_mut(), offset, &rendered);
    }
}

/// Reject rates below [`MIN_SAMPLE_RATE`]
///
/// # Errors
/// * `UnsupportedFormat` - if `sample_rate` is too low
pub fn check_sample_rate(sample_rate: u32) -> Result<()> {
    if sample_rate < MIN_SAMPLE_RATE {
        return Err(PortfolioError::UnsupportedFormat {
            format: format!("{} Hz sample rate (minimum {} Hz)", sample_rate, MIN_SAMPLE_RATE),
        });
    }
    Ok(())
}

/// Write mono samples to a WAV file at 16 or 32 bits
///
/// # Errors
/// * `UnsupportedFormat` - for any other bit depth, or a sample rate below
///   [`MIN_SAMPLE_RATE`]
/// * `Wav` - if the file cannot be written
pub fn export_wav(samples: &[f32], path: &Path, sample_rate: u32, bit_depth: u16) -> Result<()> {
    check_sample_rate(sample_rate)?;
    let sample_format = match bit_depth {
        16 => SampleFormat::Int,
        32 => SampleFormat::Float,
        _ => {
            return Err(PortfolioError::UnsupportedFormat {
                format: format!("{}-bit audio (only 16, 32 supported)", bit_depth),
            })
        }
    };

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: bit_depth,
        sample_format,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        if bit_depth == 16 {
            let scaled = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
            writer.write_sample(scaled)?;
        } else {
            writer.write_sample(sample)?;
        }
    }
    writer.finalize()?;

    Ok(())
}
