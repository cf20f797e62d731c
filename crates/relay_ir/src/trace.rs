//! Per-signal simulation traces.
//!
//! A [`Trace`] pairs a signal name with an ordered sequence of boolean
//! values, one per simulation cycle. Traces come in two flavors with the
//! same representation: input traces supplied with the circuit, and
//! output traces recorded by the simulator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An error raised when parsing a trace from its `'0'`/`'1'` string form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid trace character {found:?} for signal {signal} at cycle {cycle}")]
pub struct ParseTraceError {
    /// The signal the trace belongs to.
    pub signal: String,
    /// The cycle index (string position) of the offending character.
    pub cycle: usize,
    /// The character that is neither `'0'` nor `'1'`.
    pub found: char,
}

/// A signal name plus one boolean value per simulation cycle.
///
/// The leftmost character of the textual form is cycle 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// The name of the traced signal.
    pub signal: String,
    /// The per-cycle values, index 0 first.
    pub values: Vec<bool>,
}

impl Trace {
    /// Creates a trace from an explicit value sequence.
    pub fn new(signal: impl Into<String>, values: Vec<bool>) -> Trace {
        Trace {
            signal: signal.into(),
            values,
        }
    }

    /// Parses a trace from a string of `'0'` and `'1'` characters.
    ///
    /// The leftmost character becomes cycle 0. Any other character is
    /// rejected with a [`ParseTraceError`] naming the position.
    pub fn from_bits(signal: impl Into<String>, bits: &str) -> Result<Trace, ParseTraceError> {
        let signal = signal.into();
        let mut values = Vec::with_capacity(bits.len());
        for (cycle, c) in bits.chars().enumerate() {
            match c {
                '0' => values.push(false),
                '1' => values.push(true),
                found => {
                    return Err(ParseTraceError {
                        signal,
                        cycle,
                        found,
                    })
                }
            }
        }
        Ok(Trace { signal, values })
    }

    /// Renders the value sequence as a `'0'`/`'1'` string in cycle order.
    pub fn bits(&self) -> String {
        self.values.iter().map(|&v| if v { '1' } else { '0' }).collect()
    }

    /// Returns the number of recorded cycles.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the trace holds no cycles at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Renders the trace as `<bits> <signal>`, the line format of the
/// simulation output listing.
impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.bits(), self.signal)
    }
}
