// Domain service interface for MIP engines
// The exact solver only talks to this trait, concrete engines live in `crate::engine`

use super::models::{CoveringProgram, ProgramSolution};

/// Error types for the engine layer
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid program: {0}")]
    InvalidProgram(String),

    #[error("Engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("Engine execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Contract every MIP engine adapter follows.
///
/// Adapters build one column per variable, one row per covering constraint,
/// minimise the weighted sum and report the status, objective and column values.
pub trait MipEngine: Send + Sync {
    /// Solve a covering program
    fn solve(&self, program: &CoveringProgram) -> Result<ProgramSolution>;

    /// Validate a program without solving it
    fn validate(&self, program: &CoveringProgram) -> Result<()> {
        let mut errors = Vec::new();

        if program.variables.is_empty() {
            errors.push("Program must have at least one variable".to_string());
        }

        let num_vars = program.num_variables();

        for (i, var) in program.variables.iter().enumerate() {
            if !var.cost.is_finite() {
                errors.push(format!("Variable {} '{}' has non-finite cost", i, var.name));
            }
        }

        for (i, constraint) in program.constraints.iter().enumerate() {
            if constraint.terms.is_empty() {
                errors.push(format!("Constraint {} '{}' has no terms", i, constraint.name));
            }
            if let Some(&bad) = constraint.terms.iter().find(|&&t| t >= num_vars) {
                errors.push(format!(
                    "Constraint {} references variable {} but program has {} variables",
                    i, bad, num_vars
                ));
            }
            if !constraint.demand.is_finite() {
                errors.push(format!("Constraint {} has non-finite demand", i));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EngineError::InvalidProgram(errors.join("; ")))
        }
    }

    /// Get the name of this engine
    fn name(&self) -> &str;
}
