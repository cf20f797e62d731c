//! RelayIR — the circuit entity graph for the Relay hardware simulator.
//!
//! This crate defines the fully-parsed form of a hardware description:
//! a [`Circuit`] with its input/output/latch signal names, named function
//! [`Definition`]s, per-signal [`Update`] equations, and input [`Trace`]s.
//! Boolean expressions are represented by the [`Expr`] tree.
//!
//! The parser that produces these values is an external collaborator;
//! this crate is pure data and carries no evaluation logic. Simulation
//! lives in `relay_sim`.

#![warn(missing_docs)]

pub mod circuit;
pub mod expr;
pub mod trace;

pub use circuit::{Circuit, Definition, Update};
pub use expr::Expr;
pub use trace::{ParseTraceError, Trace};
