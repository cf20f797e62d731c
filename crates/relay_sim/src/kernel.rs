//! The cycle stepper: per-cycle state advancement for one circuit.
//!
//! [`CycleStepper`] owns the run's [`Environment`] and output traces.
//! Construction validates the input traces and fixes the simulation
//! length; [`initialize`](CycleStepper::initialize) executes cycle 0 and
//! [`step`](CycleStepper::step) advances one cycle at a time until the
//! length is exhausted. Cycles advance strictly forward; no transition
//! skips or revisits a cycle.

use relay_ir::{Circuit, Trace};

use crate::env::Environment;
use crate::error::SimError;
use crate::eval::eval;

/// Configuration for a simulation run.
#[derive(Debug, Clone, Default)]
pub struct SimConfig {
    /// Explicit cycle count, used only when the circuit supplies no
    /// input traces (their common length otherwise fixes the run).
    pub cycles: Option<usize>,
}

/// The result of a completed simulation run.
///
/// Input traces are returned unchanged; output traces are filled with
/// one value per cycle, in output-declaration order. No partial result
/// exists: a failed run yields an error instead.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimResult {
    /// The number of cycles simulated.
    pub cycles: usize,
    /// The input traces, exactly as supplied.
    pub inputs: Vec<Trace>,
    /// The recorded output traces.
    pub outputs: Vec<Trace>,
}

/// The result of a single stepping call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// A cycle was executed; more remain possible.
    Continued,
    /// All cycles have been executed.
    Done,
}

/// Environment slot name for a latch's previous-cycle value.
fn primed(latch: &str) -> String {
    format!("{latch}'")
}

/// Per-run stepping state for one circuit.
///
/// Each run owns its environment exclusively; simulating several
/// circuits concurrently requires one stepper per run.
#[derive(Debug)]
pub struct CycleStepper<'a> {
    circuit: &'a Circuit,
    env: Environment,
    outputs: Vec<Trace>,
    cycles: usize,
    /// The next cycle to execute; 0 means `initialize` has not run yet.
    next_cycle: usize,
}

impl<'a> CycleStepper<'a> {
    /// Creates a stepper for the circuit, validating its input traces.
    ///
    /// All input traces must share one non-zero length, which becomes
    /// the simulation length; with no input traces at all, the length
    /// must come from `config.cycles`. Every declared input signal must
    /// have a trace. Violations fail here, before any cycle executes.
    pub fn new(circuit: &'a Circuit, config: &SimConfig) -> Result<CycleStepper<'a>, SimError> {
        let cycles = if circuit.siminputs.is_empty() {
            match config.cycles {
                Some(n) if n > 0 => n,
                _ => return Err(SimError::UnknownSimLength),
            }
        } else {
            let expected = circuit.siminputs[0].len();
            for trace in &circuit.siminputs[1..] {
                if trace.len() != expected {
                    return Err(SimError::InconsistentTraceLength {
                        signal: trace.signal.clone(),
                        expected,
                        found: trace.len(),
                    });
                }
            }
            if expected == 0 {
                return Err(SimError::MissingSimulationInput {
                    signal: circuit.siminputs[0].signal.clone(),
                });
            }
            expected
        };

        for input in &circuit.inputs {
            if circuit.siminput(input).is_none() {
                return Err(SimError::MissingSimulationInput {
                    signal: input.clone(),
                });
            }
        }

        let outputs = circuit
            .outputs
            .iter()
            .map(|name| Trace::new(name.clone(), Vec::with_capacity(cycles)))
            .collect();

        Ok(CycleStepper {
            circuit,
            env: Environment::new(&circuit.definitions),
            outputs,
            cycles,
            next_cycle: 0,
        })
    }

    /// Returns the simulation length fixed at construction.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Reads the current value of a signal from the run's environment.
    pub fn signal(&self, name: &str) -> Result<bool, SimError> {
        self.env.get(name)
    }

    /// Executes cycle 0.
    ///
    /// Loads each input's first value, initializes every latch's primed
    /// slot to `false`, runs all updates in declared order, and records
    /// the outputs. Must be called exactly once, before any `step`.
    pub fn initialize(&mut self) -> Result<(), SimError> {
        debug_assert_eq!(self.next_cycle, 0, "initialize runs exactly once");

        for trace in &self.circuit.siminputs {
            self.env.set(trace.signal.clone(), trace.values[0]);
        }
        for latch in &self.circuit.latches {
            self.env.set(primed(latch), false);
        }
        self.run_updates()?;
        self.snapshot()?;
        self.next_cycle = 1;
        Ok(())
    }

    /// Executes the next cycle, or reports that the run is complete.
    ///
    /// Latch outputs are propagated first: each primed slot takes the
    /// base signal's value as computed at the end of the previous cycle,
    /// before this cycle's inputs land. Then inputs are loaded, updates
    /// re-run in the same declared order as cycle 0, and outputs
    /// recorded.
    pub fn step(&mut self) -> Result<StepResult, SimError> {
        debug_assert!(self.next_cycle > 0, "initialize must run before stepping");
        if self.next_cycle >= self.cycles {
            return Ok(StepResult::Done);
        }
        let cycle = self.next_cycle;

        for latch in &self.circuit.latches {
            let value = self.env.get(latch)?;
            self.env.set(primed(latch), value);
        }
        for trace in &self.circuit.siminputs {
            // Lengths were validated at construction; this guards the
            // trace data having changed out from under us.
            if cycle >= trace.len() {
                return Err(SimError::CycleOutOfRange {
                    signal: trace.signal.clone(),
                    cycle,
                    length: trace.len(),
                });
            }
            self.env.set(trace.signal.clone(), trace.values[cycle]);
        }
        self.run_updates()?;
        self.snapshot()?;
        self.next_cycle += 1;
        Ok(StepResult::Continued)
    }

    /// Evaluates every update in declared order, writing each result
    /// into the environment as it goes. Single pass: an update sees the
    /// values written by earlier updates of the same cycle, never later
    /// ones.
    fn run_updates(&mut self) -> Result<(), SimError> {
        for update in &self.circuit.updates {
            let value = eval(&update.expr, &self.env)?;
            self.env.set(update.target.clone(), value);
        }
        Ok(())
    }

    /// Records the current value of each output signal into its trace.
    fn snapshot(&mut self) -> Result<(), SimError> {
        for i in 0..self.outputs.len() {
            let value = self.env.get(self.outputs[i].signal.as_str())?;
            self.outputs[i].values.push(value);
        }
        Ok(())
    }

    /// Consumes the stepper, yielding the run's result.
    pub fn into_result(self) -> SimResult {
        SimResult {
            cycles: self.cycles,
            inputs: self.circuit.siminputs.clone(),
            outputs: self.outputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_ir::{Expr, Update};

    fn wire_circuit(siminputs: Vec<Trace>) -> Circuit {
        // Out = In
        Circuit {
            name: "wire".into(),
            inputs: vec!["In".into()],
            outputs: vec!["Out".into()],
            latches: Vec::new(),
            definitions: Vec::new(),
            updates: vec![Update {
                target: "Out".into(),
                expr: Expr::signal("In"),
            }],
            siminputs,
        }
    }

    #[test]
    fn length_comes_from_input_traces() {
        let circuit = wire_circuit(vec![Trace::from_bits("In", "1010").unwrap()]);
        let stepper = CycleStepper::new(&circuit, &SimConfig::default()).unwrap();
        assert_eq!(stepper.cycles(), 4);
    }

    #[test]
    fn inconsistent_lengths_fail_before_any_cycle() {
        let circuit = wire_circuit(vec![
            Trace::from_bits("In", "101").unwrap(),
            Trace::from_bits("Other", "1010").unwrap(),
        ]);
        let err = CycleStepper::new(&circuit, &SimConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SimError::InconsistentTraceLength {
                signal: "Other".into(),
                expected: 3,
                found: 4,
            }
        );
    }

    #[test]
    fn empty_traces_fail() {
        let circuit = wire_circuit(vec![Trace::from_bits("In", "").unwrap()]);
        let err = CycleStepper::new(&circuit, &SimConfig::default()).unwrap_err();
        assert_eq!(err, SimError::MissingSimulationInput { signal: "In".into() });
    }

    #[test]
    fn declared_input_without_trace_fails() {
        let circuit = wire_circuit(vec![Trace::from_bits("Other", "101").unwrap()]);
        let err = CycleStepper::new(&circuit, &SimConfig::default()).unwrap_err();
        assert_eq!(err, SimError::MissingSimulationInput { signal: "In".into() });
    }

    #[test]
    fn no_inputs_requires_explicit_cycles() {
        let mut circuit = wire_circuit(Vec::new());
        circuit.inputs.clear();
        circuit.updates.clear();
        circuit.outputs.clear();

        let err = CycleStepper::new(&circuit, &SimConfig::default()).unwrap_err();
        assert_eq!(err, SimError::UnknownSimLength);
        let err = CycleStepper::new(&circuit, &SimConfig { cycles: Some(0) }).unwrap_err();
        assert_eq!(err, SimError::UnknownSimLength);
        let stepper = CycleStepper::new(&circuit, &SimConfig { cycles: Some(4) }).unwrap();
        assert_eq!(stepper.cycles(), 4);
    }

    #[test]
    fn initialize_runs_cycle_zero() {
        let circuit = wire_circuit(vec![Trace::from_bits("In", "10").unwrap()]);
        let mut stepper = CycleStepper::new(&circuit, &SimConfig::default()).unwrap();
        stepper.initialize().unwrap();
        assert_eq!(stepper.signal("In"), Ok(true));
        assert_eq!(stepper.signal("Out"), Ok(true));
    }

    #[test]
    fn latch_primed_slot_starts_false() {
        let circuit = Circuit {
            name: "latched".into(),
            inputs: vec!["In".into()],
            outputs: vec!["Out".into()],
            latches: vec!["L".into()],
            definitions: Vec::new(),
            updates: vec![
                Update {
                    target: "L".into(),
                    expr: Expr::signal("In"),
                },
                Update {
                    target: "Out".into(),
                    expr: Expr::signal("L'"),
                },
            ],
            siminputs: vec![Trace::from_bits("In", "11").unwrap()],
        };
        let mut stepper = CycleStepper::new(&circuit, &SimConfig::default()).unwrap();
        stepper.initialize().unwrap();
        assert_eq!(stepper.signal("L'"), Ok(false));
        assert_eq!(stepper.signal("Out"), Ok(false));

        // Cycle 1: the primed slot picks up cycle 0's latch input.
        assert_eq!(stepper.step().unwrap(), StepResult::Continued);
        assert_eq!(stepper.signal("L'"), Ok(true));
        assert_eq!(stepper.signal("Out"), Ok(true));
    }

    #[test]
    fn step_reports_done_after_last_cycle() {
        let circuit = wire_circuit(vec![Trace::from_bits("In", "10").unwrap()]);
        let mut stepper = CycleStepper::new(&circuit, &SimConfig::default()).unwrap();
        stepper.initialize().unwrap();
        assert_eq!(stepper.step().unwrap(), StepResult::Continued);
        assert_eq!(stepper.step().unwrap(), StepResult::Done);
        assert_eq!(stepper.step().unwrap(), StepResult::Done);

        let result = stepper.into_result();
        assert_eq!(result.cycles, 2);
        assert_eq!(result.outputs[0].bits(), "10");
    }

    #[test]
    fn updates_see_earlier_writes_in_same_pass() {
        // A = In; B = A  — B reads the value A received this cycle.
        let circuit = Circuit {
            name: "chain".into(),
            inputs: vec!["In".into()],
            outputs: vec!["B".into()],
            latches: Vec::new(),
            definitions: Vec::new(),
            updates: vec![
                Update {
                    target: "A".into(),
                    expr: Expr::signal("In"),
                },
                Update {
                    target: "B".into(),
                    expr: Expr::signal("A"),
                },
            ],
            siminputs: vec![Trace::from_bits("In", "101").unwrap()],
        };
        let mut stepper = CycleStepper::new(&circuit, &SimConfig::default()).unwrap();
        stepper.initialize().unwrap();
        while stepper.step().unwrap() == StepResult::Continued {}
        assert_eq!(stepper.into_result().outputs[0].bits(), "101");
    }

    #[test]
    fn update_reading_later_write_fails_on_first_cycle() {
        // B = A; A = In — B reads A before anything has written it.
        let circuit = Circuit {
            name: "backward".into(),
            inputs: vec!["In".into()],
            outputs: vec!["B".into()],
            latches: Vec::new(),
            definitions: Vec::new(),
            updates: vec![
                Update {
                    target: "B".into(),
                    expr: Expr::signal("A"),
                },
                Update {
                    target: "A".into(),
                    expr: Expr::signal("In"),
                },
            ],
            siminputs: vec![Trace::from_bits("In", "1").unwrap()],
        };
        let mut stepper = CycleStepper::new(&circuit, &SimConfig::default()).unwrap();
        assert_eq!(
            stepper.initialize().unwrap_err(),
            SimError::UndefinedSignal { name: "A".into() }
        );
    }

    #[test]
    fn sim_result_serde_roundtrip() {
        let circuit = wire_circuit(vec![Trace::from_bits("In", "10").unwrap()]);
        let mut stepper = CycleStepper::new(&circuit, &SimConfig::default()).unwrap();
        stepper.initialize().unwrap();
        while stepper.step().unwrap() == StepResult::Continued {}
        let result = stepper.into_result();

        let json = serde_json::to_string(&result).unwrap();
        let restored: SimResult = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, result);
    }
}
