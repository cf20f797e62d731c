//! The top-level circuit container.
//!
//! A [`Circuit`] is the aggregate root produced by the parser: signal
//! declarations, function [`Definition`]s, [`Update`] equations, and the
//! input [`Trace`]s to simulate against. It is immutable once built;
//! output traces and the simulation length are derived by the simulator,
//! not stored here.

use crate::expr::Expr;
use crate::trace::Trace;
use serde::{Deserialize, Serialize};

/// A named boolean function: `def xor(A, B) = A * /B + /A * B`.
///
/// Definitions form a flat, non-recursive namespace keyed by name.
/// Parameter names are not required to be distinct; when they collide,
/// the rightmost binding shadows the earlier ones at call time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// The function name.
    pub name: String,
    /// The formal parameter names, in declaration order.
    pub params: Vec<String>,
    /// The function body.
    pub body: Expr,
}

/// One line of the update section: `Out = xor(In1, In2)`.
///
/// Updates are re-evaluated every cycle in declaration order; an update
/// may read signals written by earlier updates in the same pass, never
/// by later ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// The signal being assigned.
    pub target: String,
    /// The expression computing its new value.
    pub expr: Expr,
}

/// A complete circuit description plus its simulation inputs.
///
/// Latches are identified by base name; the simulator materializes two
/// environment slots per latch, `<name>` (the value written during the
/// current cycle) and `<name>'` (the value as of the end of the previous
/// cycle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// The circuit name.
    pub name: String,
    /// Input signal names, in declaration order.
    pub inputs: Vec<String>,
    /// Output signal names, in declaration order.
    pub outputs: Vec<String>,
    /// Latch base names, in declaration order.
    pub latches: Vec<String>,
    /// Function definitions.
    pub definitions: Vec<Definition>,
    /// Update equations, in declaration order.
    pub updates: Vec<Update>,
    /// One input trace per input signal.
    pub siminputs: Vec<Trace>,
}

impl Circuit {
    /// Looks up a function definition by name.
    ///
    /// On duplicate names the last declaration wins, matching the
    /// flat-namespace lookup the simulator performs.
    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.iter().rev().find(|d| d.name == name)
    }

    /// Looks up the input trace supplied for a signal, if any.
    pub fn siminput(&self, signal: &str) -> Option<&Trace> {
        self.siminputs.iter().find(|t| t.signal == signal)
    }
}
