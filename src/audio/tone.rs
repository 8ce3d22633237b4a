//! Tone descriptions
//!
//! A [`ToneRequest`] is the four numbers a caller asks for; a [`ToneGraph`]
//! is the oscillator → (filter) → gain chain built from it, with the same
//! automation model the browser's audio parameters use.

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, Result};

/// Level every tone decays towards
pub const GAIN_FLOOR: f64 = 0.001;

/// Smallest value an exponential ramp may start from or end on
///
/// Exponential interpolation is undefined through zero, so both endpoints
/// are clamped to this.
pub const RAMP_EPSILON: f64 = 1e-4;

/// Parameters for a single synthesized tone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneRequest {
    /// Frequency at the start of the sweep (Hz)
    pub start_freq: f64,
    /// Frequency at the end of the sweep (Hz)
    pub end_freq: f64,
    /// Initial amplitude (linear)
    pub volume: f64,
    /// Length of the tone in seconds
    pub duration: f64,
}

impl ToneRequest {
    /// Create a validated tone request
    ///
    /// # Errors
    /// * `InvalidTone` - if any parameter is zero, negative or not finite
    pub fn new(start_freq: f64, end_freq: f64, volume: f64, duration: f64) -> Result<Self> {
        let request = Self::unchecked(start_freq, end_freq, volume, duration);
        request.validate()?;
        Ok(request)
    }

    /// Build a request from catalog constants known to be positive
    pub(crate) fn unchecked(start_freq: f64, end_freq: f64, volume: f64, duration: f64) -> Self {
        Self {
            start_freq,
            end_freq,
            volume,
            duration,
        }
    }

    /// Check that every parameter is a positive, finite number
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("start_freq", self.start_freq),
            ("end_freq", self.end_freq),
            ("volume", self.volume),
            ("duration", self.duration),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(PortfolioError::InvalidTone {
                    reason: format!("{} must be positive, got {}", name, value),
                });
            }
        }
        Ok(())
    }

    /// Duration in whole milliseconds, rounded up
    pub fn duration_ms(&self) -> u64 {
        (self.duration * 1000.0).ceil() as u64
    }
}

/// One automation event on an audio parameter
///
/// Times are seconds relative to the tone's start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Automation {
    /// Jump to `value` at `at`
    SetValue { at: f64, value: f64 },
    /// Ramp linearly from the previous point to `value`, arriving at `end`
    LinearRamp { end: f64, value: f64 },
    /// Ramp exponentially from the previous point to `value`, arriving at `end`
    ExponentialRamp { end: f64, value: f64 },
}

impl Automation {
    /// Time at which this event takes (or finishes taking) effect
    pub fn time(&self) -> f64 {
        match *self {
            Automation::SetValue { at, .. } => at,
            Automation::LinearRamp { end, .. } | Automation::ExponentialRamp { end, .. } => end,
        }
    }

    /// Target value of this event
    pub fn value(&self) -> f64 {
        match *self {
            Automation::SetValue { value, .. }
            | Automation::LinearRamp { value, .. }
            | Automation::ExponentialRamp { value, .. } => value,
        }
    }
}

/// An automatable parameter (oscillator frequency or gain)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Param {
    events: Vec<Automation>,
}

impl Param {
    /// Create a parameter with no automation
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a jump to `value` at `at`
    pub fn set(&mut self, at: f64, value: f64) -> &mut Self {
        self.insert(Automation::SetValue { at, value })
    }

    /// Schedule a linear ramp to `value` arriving at `end`
    pub fn linear_to(&mut self, end: f64, value: f64) -> &mut Self {
        self.insert(Automation::LinearRamp { end, value })
    }

    /// Schedule an exponential ramp to `value` arriving at `end`
    ///
    /// `value` is clamped to [`RAMP_EPSILON`].
    pub fn exponential_to(&mut self, end: f64, value: f64) -> &mut Self {
        self.insert(Automation::ExponentialRamp {
            end,
            value: value.max(RAMP_EPSILON),
        })
    }

    /// Automation events in evaluation order
    pub fn events(&self) -> &[Automation] {
        &self.events
    }

    /// Evaluate the parameter at `t` seconds after the tone starts
    pub fn value_at(&self, t: f64) -> f64 {
        let Some(first) = self.events.first() else {
            return 0.0;
        };

        let mut prev_time = 0.0;
        let mut prev_value = first.value();

        for event in &self.events {
            match *event {
                Automation::SetValue { at, value } => {
                    if t < at {
                        return prev_value;
                    }
                    prev_time = at;
                    prev_value = value;
                }
                Automation::LinearRamp { end, value } => {
                    if t < end {
                        return lerp(prev_time, prev_value, end, value, t);
                    }
                    prev_time = end;
                    prev_value = value;
                }
                Automation::ExponentialRamp { end, value } => {
                    if t < end {
                        return exp_interp(prev_time, prev_value, end, value, t);
                    }
                    prev_time = end;
                    prev_value = value;
                }
            }
        }

        prev_value
    }

    // Keeps events sorted by time; an event sharing a time with an existing
    // one goes after it.
    fn insert(&mut self, event: Automation) -> &mut Self {
        let position = self
            .events
            .iter()
            .position(|existing| existing.time() > event.time())
            .unwrap_or(self.events.len());
        self.events.insert(position, event);
        self
    }
}

fn lerp(t0: f64, v0: f64, t1: f64, v1: f64, t: f64) -> f64 {
    if t <= t0 || t1 <= t0 {
        return v0;
    }
    v0 + (v1 - v0) * (t - t0) / (t1 - t0)
}

/// Ratio-preserving interpolation between two positive points
fn exp_interp(t0: f64, v0: f64, t1: f64, v1: f64, t: f64) -> f64 {
    if t <= t0 || t1 <= t0 {
        return v0;
    }
    let v0 = v0.max(RAMP_EPSILON);
    let v1 = v1.max(RAMP_EPSILON);
    v0 * (v1 / v0).powf((t - t0) / (t1 - t0))
}

/// Filter shapes a tone graph may insert between oscillator and gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    LowPass,
    BandPass,
}

/// Biquad filter settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub kind: FilterKind,
    /// Cutoff or centre frequency (Hz)
    pub frequency: f64,
    pub q: f64,
}

/// Oscillator → (filter) → gain chain for one tone
///
/// Graphs are built fresh for every tone and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneGraph {
    pub frequency: Param,
    pub gain: Param,
    pub filter: Option<FilterSpec>,
    /// Oscillator start (seconds from scheduling)
    pub start: f64,
    /// Oscillator stop (seconds from scheduling)
    pub stop: f64,
}

impl ToneGraph {
    /// The base tone: exponential sweep and exponential decay to
    /// [`GAIN_FLOOR`] over the request's duration
    pub fn from_request(request: &ToneRequest) -> Self {
        let mut frequency = Param::new();
        frequency
            .set(0.0, request.start_freq)
            .exponential_to(request.duration, request.end_freq);

        let mut gain = Param::new();
        gain.set(0.0, request.volume)
            .exponential_to(request.duration, GAIN_FLOOR);

        Self {
            frequency,
            gain,
            filter: None,
            start: 0.0,
            stop: request.duration,
        }
    }

    /// Frequency in Hz at `t` seconds
    pub fn frequency_at(&self, t: f64) -> f64 {
        self.frequency.value_at(t)
    }

    /// Linear gain at `t` seconds (zero outside start..stop)
    pub fn gain_at(&self, t: f64) -> f64 {
        if t < self.start || t >= self.stop {
            return 0.0;
        }
        self.gain.value_at(t)
    }

    /// Length of the tone in seconds
    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }
}
