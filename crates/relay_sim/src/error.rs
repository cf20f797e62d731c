//! Simulation error types.
//!
//! All failures during simulation setup or execution are variants of
//! [`SimError`]. Every variant is fatal for the run: errors propagate
//! unchanged to the driver's caller and are never caught or retried
//! internally, so no output traces are meaningful after a failure.

/// Errors that can occur during simulation setup or execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// A referenced signal name has no current binding.
    #[error("undefined signal: {name}")]
    UndefinedSignal {
        /// The signal name that was read before ever being set.
        name: String,
    },

    /// A function call names a definition that does not exist.
    #[error("undefined function: {name}")]
    UndefinedFunction {
        /// The function name with no matching definition.
        name: String,
    },

    /// A function call supplies the wrong number of arguments.
    #[error("arity mismatch calling {name}: expected {expected} arguments, got {given}")]
    ArityMismatch {
        /// The function being called.
        name: String,
        /// The number of formal parameters the definition declares.
        expected: usize,
        /// The number of arguments the call supplied.
        given: usize,
    },

    /// The supplied input traces do not all share one length.
    #[error("inconsistent trace length for {signal}: expected {expected} cycles, found {found}")]
    InconsistentTraceLength {
        /// The first input trace whose length disagrees.
        signal: String,
        /// The length established by the preceding traces.
        expected: usize,
        /// The length of the disagreeing trace.
        found: usize,
    },

    /// An input signal has no supplied trace, or an empty one.
    #[error("missing simulation input for signal {signal}")]
    MissingSimulationInput {
        /// The input signal without usable trace data.
        signal: String,
    },

    /// A requested cycle index exceeds a trace's recorded length.
    #[error("cycle {cycle} out of range for signal {signal} (trace length {length})")]
    CycleOutOfRange {
        /// The trace's signal name.
        signal: String,
        /// The cycle index that was requested.
        cycle: usize,
        /// The trace's actual length.
        length: usize,
    },

    /// The simulation length cannot be determined: the circuit has no
    /// input traces and the configuration gives no explicit cycle count.
    #[error("simulation length is unknown: no input traces and no explicit cycle count")]
    UnknownSimLength,
}
