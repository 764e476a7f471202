//! Time-varying inlet values.
//!
//! A schedule is a list of breakpoints `(time_i, value_i, span_i)`. Before
//! `time_i` the previous value holds; over `[time_i, time_i + span_i)` the
//! value ramps linearly from the previous value to `value_i`; from
//! `time_i + span_i` on it is `value_i`. A zero span gives a step.
//!
//! Queries walk forward from a cursor that only ever advances, so evaluating
//! a long simulation costs O(1) per call amortized. The cursor assumes one
//! logical timeline: querying an earlier time after a later one returns the
//! later state.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{ConfigError, ConfigResult};
use crate::field::FieldAccessor;
use crate::geometry::FacePoint;

use super::{InputSample, InputSource};

/// Parallel schedule lists as supplied by the host.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScheduleConfig {
    /// Value reached at each breakpoint.
    pub input_vals: Vec<f64>,
    /// Breakpoint times, non-decreasing.
    pub input_times: Vec<f64>,
    /// Ramp duration per breakpoint; empty means all zero (steps).
    pub time_spans: Vec<f64>,
}

impl ScheduleConfig {
    /// Pure step function.
    pub fn steps(input_times: Vec<f64>, input_vals: Vec<f64>) -> Self {
        Self {
            input_vals,
            input_times,
            time_spans: Vec::new(),
        }
    }

    /// Set ramp durations.
    pub fn with_time_spans(mut self, time_spans: Vec<f64>) -> Self {
        self.time_spans = time_spans;
        self
    }
}

/// Validated schedule with a forward-only cursor.
#[derive(Debug)]
pub struct InputSchedule {
    times: Vec<f64>,
    values: Vec<f64>,
    spans: Vec<f64>,
    slopes: Vec<f64>,
    initial: f64,
    cursor: AtomicUsize,
}

impl InputSchedule {
    /// Validate the lists and precompute ramp slopes.
    ///
    /// `initial` is the value before the first breakpoint. An empty schedule
    /// holds `initial` forever.
    ///
    /// # Errors
    /// - `LengthMismatch` if `input_times` or a non-empty `time_spans` differ
    ///   in length from `input_vals`
    /// - `NonMonotonicSchedule` if `input_times` decreases
    /// - `NegativeTimeSpan` for a negative ramp duration
    pub fn new(config: &ScheduleConfig, initial: f64) -> ConfigResult<Self> {
        let n = config.input_vals.len();
        if config.input_times.len() != n {
            return Err(ConfigError::length_mismatch("input_times", n, config.input_times.len()));
        }
        if !config.time_spans.is_empty() && config.time_spans.len() != n {
            return Err(ConfigError::length_mismatch("time_spans", n, config.time_spans.len()));
        }

        let (times, values, spans) = if n == 0 {
            log::debug!("empty input schedule, holding initial value {initial}");
            (vec![0.0], vec![initial], vec![0.0])
        } else {
            let spans = if config.time_spans.is_empty() {
                vec![0.0; n]
            } else {
                config.time_spans.clone()
            };
            (config.input_times.clone(), config.input_vals.clone(), spans)
        };

        for (index, pair) in times.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(ConfigError::NonMonotonicSchedule {
                    index: index + 1,
                    time: pair[1],
                });
            }
        }
        if let Some((index, &span)) = spans.iter().enumerate().find(|(_, s)| **s < 0.0) {
            return Err(ConfigError::NegativeTimeSpan { index, span });
        }

        let slopes = values
            .iter()
            .zip(&spans)
            .enumerate()
            .map(|(i, (&value, &span))| {
                let previous = if i == 0 { initial } else { values[i - 1] };
                if span > 0.0 {
                    (value - previous) / span
                } else {
                    0.0
                }
            })
            .collect();

        Ok(Self {
            times,
            values,
            spans,
            slopes,
            initial,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: an empty configuration is seeded with one entry.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Value before the first breakpoint.
    pub fn initial(&self) -> f64 {
        self.initial
    }

    /// Index of the first breakpoint not yet passed.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    /// Start a new timeline from the beginning.
    pub fn rewind(&self) {
        self.cursor.store(0, Ordering::Relaxed);
    }

    #[inline]
    fn settled(&self, index: usize) -> f64 {
        if index == 0 {
            self.initial
        } else {
            self.values[index - 1]
        }
    }

    /// Inlet value at `time`, advancing the cursor past completed breakpoints.
    pub fn value_at(&self, time: f64) -> f64 {
        let mut index = self.cursor.load(Ordering::Relaxed);
        let mut ramp = None;

        while index < self.times.len() {
            let start = self.times[index];
            if time >= start + self.spans[index] {
                index += 1;
            } else {
                if time >= start {
                    ramp = Some(self.settled(index) + self.slopes[index] * (time - start));
                }
                break;
            }
        }

        self.cursor.fetch_max(index, Ordering::Relaxed);
        ramp.unwrap_or_else(|| self.settled(index))
    }
}

/// Input source driven by an [`InputSchedule`] and the point's time.
#[derive(Debug)]
pub struct ScheduledInput {
    schedule: InputSchedule,
}

impl ScheduledInput {
    /// # Errors
    /// Any error from [`InputSchedule::new`].
    pub fn new(config: &ScheduleConfig, initial: f64) -> ConfigResult<Self> {
        Ok(Self {
            schedule: InputSchedule::new(config, initial)?,
        })
    }

    pub fn schedule(&self) -> &InputSchedule {
        &self.schedule
    }
}

impl InputSource for ScheduledInput {
    fn sample(&self, _fields: &dyn FieldAccessor, point: &FacePoint) -> InputSample {
        InputSample::fixed(self.schedule.value_at(point.time))
    }

    fn coupled_field(&self) -> Option<&str> {
        None
    }
}
