//! Boolean expression trees.
//!
//! [`Expr`] represents the right-hand side of an update equation or the
//! body of a function definition. Expressions are immutable owned trees:
//! no sharing between updates or definitions, no cycles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A boolean expression over named signals.
///
/// Signals are referenced by name; name resolution happens at evaluation
/// time against the simulation environment, never at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A reference to a signal by name.
    Signal(String),
    /// Conjunction (`a * b`).
    And(Box<Expr>, Box<Expr>),
    /// Disjunction (`a + b`).
    Or(Box<Expr>, Box<Expr>),
    /// Negation (`/a`).
    Not(Box<Expr>),
    /// Application of a named function definition (`f(a, b)`).
    Call {
        /// The function name.
        name: String,
        /// The argument expressions, in declaration order.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Creates a signal reference.
    pub fn signal(name: impl Into<String>) -> Expr {
        Expr::Signal(name.into())
    }

    /// Creates a conjunction of two expressions.
    pub fn and(lhs: Expr, rhs: Expr) -> Expr {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    /// Creates a disjunction of two expressions.
    pub fn or(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Creates a negation.
    pub fn not(operand: Expr) -> Expr {
        Expr::Not(Box::new(operand))
    }

    /// Creates a function call.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    // Precedence levels for rendering: disjunction binds loosest,
    // then conjunction, then negation. Atoms never need parentheses.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Or(_, _) => 0,
            Expr::And(_, _) => 1,
            Expr::Not(_) => 2,
            Expr::Signal(_) | Expr::Call { .. } => 3,
        }
    }

    fn fmt_with_parent(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        let prec = self.precedence();
        if prec < parent {
            write!(f, "(")?;
        }
        match self {
            Expr::Signal(name) => write!(f, "{name}")?,
            Expr::And(lhs, rhs) => {
                lhs.fmt_with_parent(f, prec)?;
                write!(f, " * ")?;
                rhs.fmt_with_parent(f, prec)?;
            }
            Expr::Or(lhs, rhs) => {
                lhs.fmt_with_parent(f, prec)?;
                write!(f, " + ")?;
                rhs.fmt_with_parent(f, prec)?;
            }
            Expr::Not(operand) => {
                write!(f, "/")?;
                operand.fmt_with_parent(f, prec)?;
            }
            Expr::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_with_parent(f, 0)?;
                }
                write!(f, ")")?;
            }
        }
        if prec < parent {
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Renders the expression in the concrete hw-language syntax:
/// `*` for conjunction, `+` for disjunction, `/` for prefix negation.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_parent(f, 0)
    }
}
