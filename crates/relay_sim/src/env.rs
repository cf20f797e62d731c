//! The mutable signal environment.
//!
//! An [`Environment`] maps signal names to their current boolean values
//! and carries a shared, immutable registry of function definitions.
//! Each simulation run owns exactly one root environment; function-call
//! evaluation derives short-lived child environments from it.

use std::collections::HashMap;
use std::sync::Arc;

use relay_ir::Definition;

use crate::error::SimError;

/// A mutable name-to-value mapping plus the definition registry.
///
/// The registry is built once per run and shared between the root
/// environment and every derived child via [`Arc`]; definitions are
/// immutable, so concurrent runs of independent circuits may share one
/// registry safely. Bindings, by contrast, are owned per environment.
#[derive(Debug, Clone)]
pub struct Environment {
    bindings: HashMap<String, bool>,
    definitions: Arc<HashMap<String, Definition>>,
}

impl Environment {
    /// Creates an empty environment seeded with the given definitions.
    ///
    /// Duplicate definition names collapse to the last occurrence,
    /// matching flat-namespace lookup by exact name.
    pub fn new(definitions: &[Definition]) -> Environment {
        let registry = definitions
            .iter()
            .map(|d| (d.name.clone(), d.clone()))
            .collect();
        Environment {
            bindings: HashMap::new(),
            definitions: Arc::new(registry),
        }
    }

    /// Reads the current value of a signal.
    ///
    /// Fails with [`SimError::UndefinedSignal`] if the name has never
    /// been set in this environment.
    pub fn get(&self, name: &str) -> Result<bool, SimError> {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| SimError::UndefinedSignal {
                name: name.to_string(),
            })
    }

    /// Stores or overwrites a signal value.
    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.bindings.insert(name.into(), value);
    }

    /// Looks up a function definition by exact name.
    ///
    /// Fails with [`SimError::UndefinedFunction`] if absent.
    pub fn definition(&self, name: &str) -> Result<&Definition, SimError> {
        self.definitions
            .get(name)
            .ok_or_else(|| SimError::UndefinedFunction {
                name: name.to_string(),
            })
    }

    /// Derives a child environment for a function-call evaluation.
    ///
    /// The child starts as a full copy of the current bindings, so it
    /// sees every signal value visible to the caller, and shares the
    /// definition registry. Writes to the child never propagate back:
    /// parameter bindings stay local to the call and are discarded with
    /// the child when the call returns.
    pub fn derive(&self) -> Environment {
        Environment {
            bindings: self.bindings.clone(),
            definitions: Arc::clone(&self.definitions),
        }
    }
}
