//! Expression evaluation and function-call resolution.
//!
//! [`eval`] recursively evaluates an [`Expr`] tree against an
//! [`Environment`]. Function-call expressions are resolved by binding the
//! evaluated arguments to the definition's formal parameters in a derived
//! child environment (call-by-value, statically scoped).

use relay_ir::Expr;

use crate::env::Environment;
use crate::error::SimError;

/// Evaluates a boolean expression against the environment.
///
/// Evaluation is pure apart from environment reads. Both operands of a
/// connective are evaluated unconditionally, so an undefined signal
/// surfaces no matter where it sits in the tree.
pub fn eval(expr: &Expr, env: &Environment) -> Result<bool, SimError> {
    match expr {
        Expr::Signal(name) => env.get(name),
        Expr::And(lhs, rhs) => {
            let l = eval(lhs, env)?;
            let r = eval(rhs, env)?;
            Ok(l && r)
        }
        Expr::Or(lhs, rhs) => {
            let l = eval(lhs, env)?;
            let r = eval(rhs, env)?;
            Ok(l || r)
        }
        Expr::Not(operand) => Ok(!eval(operand, env)?),
        Expr::Call { name, args } => apply(name, args, env),
    }
}

/// Resolves a function call: looks up the definition, checks arity,
/// evaluates the arguments in the caller's environment, and evaluates
/// the body in a derived child with the parameters bound.
///
/// Parameters are bound left to right, so a duplicated parameter name is
/// shadowed by its rightmost binding rather than rejected. The child
/// environment is dropped when the call returns; its bindings are never
/// observable in the caller. Recursive definitions are not guarded
/// against and will exhaust the stack.
fn apply(name: &str, args: &[Expr], env: &Environment) -> Result<bool, SimError> {
    let def = env.definition(name)?;
    if args.len() != def.params.len() {
        return Err(SimError::ArityMismatch {
            name: name.to_string(),
            expected: def.params.len(),
            given: args.len(),
        });
    }

    // Arguments are evaluated in the caller's environment, not the
    // child scope: call-by-value.
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(eval(arg, env)?);
    }

    let mut child = env.derive();
    for (param, value) in def.params.iter().zip(values) {
        child.set(param.clone(), value);
    }
    eval(&def.body, &child)
}
