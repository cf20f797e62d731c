//! Cycle-stepping simulator core for the Relay hardware simulator.
//!
//! This crate consumes a fully-parsed [`Circuit`](relay_ir::Circuit) from
//! `relay_ir` and executes it cycle by cycle: inputs are loaded from their
//! traces, latches present their previous-cycle state through primed
//! (`name'`) environment slots, and every update equation is re-evaluated
//! in declaration order. There is no event scheduling, no delta-cycle
//! convergence, and no combinational-loop detection; signals are
//! recomputed in a single fixed pass per cycle.
//!
//! # Usage
//!
//! ```ignore
//! use relay_sim::{simulate, SimConfig};
//!
//! let result = simulate(&circuit, &SimConfig::default())?;
//! for trace in result.inputs.iter().chain(&result.outputs) {
//!     println!("{trace}");
//! }
//! ```
//!
//! # Modules
//!
//! - `error` — the fatal [`SimError`] taxonomy
//! - `env` — the mutable signal [`Environment`] with scoped derivation
//! - `eval` — expression evaluation and function-call resolution
//! - `kernel` — the per-cycle [`CycleStepper`]
//!
//! A run is strictly single-threaded: each cycle depends on the mutated
//! state of the previous one. Independent circuits may be simulated
//! concurrently, one stepper and environment per run.

#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod eval;
pub mod kernel;

use relay_ir::Circuit;

pub use env::Environment;
pub use error::SimError;
pub use eval::eval;
pub use kernel::{CycleStepper, SimConfig, SimResult, StepResult};

/// High-level entry point: runs a circuit to completion.
///
/// Initializes cycle 0 and steps through every remaining cycle, returning
/// the input traces unchanged alongside the recorded output traces. Any
/// failure aborts the run immediately; no partial output is returned.
pub fn simulate(circuit: &Circuit, config: &SimConfig) -> Result<SimResult, SimError> {
    let mut stepper = CycleStepper::new(circuit, config)?;
    stepper.initialize()?;
    while stepper.step()? == StepResult::Continued {}
    Ok(stepper.into_result())
}
