// Shared translation of a covering program into good_lp terms,
// used by every engine that goes through good_lp

use std::time::Duration;

use good_lp::variable::UnsolvedProblem;
use good_lp::{
    variable, Constraint, Expression, ProblemVariables, ResolutionError,
    Solution as GoodLpSolutionTrait, Variable as GoodLpVariable,
};

use log::warn;

use crate::domain::{
    engine_service::{EngineError, Result},
    models::{CoveringProgram, ProgramSolution},
    value_objects::ExactStatus,
};

pub(crate) struct GoodLpModel {
    pub(crate) problem: UnsolvedProblem,
    pub(crate) columns: Vec<GoodLpVariable>,
    pub(crate) rows: Vec<Constraint>,
}

/// Binary columns with their costs as the minimised objective, one `>=` row
/// per covering constraint
pub(crate) fn build(program: &CoveringProgram) -> GoodLpModel {
    let mut vars = ProblemVariables::new();
    let columns: Vec<GoodLpVariable> = program
        .variables
        .iter()
        .map(|_| vars.add(variable().binary()))
        .collect();

    let mut objective: Expression = 0.into();
    for (var, &column) in program.variables.iter().zip(&columns) {
        objective += var.cost * column;
    }

    let rows = program
        .constraints
        .iter()
        .map(|constraint| {
            let mut lhs = Expression::with_capacity(constraint.terms.len());
            for &term in &constraint.terms {
                lhs.add_mul(1.0, columns[term]);
            }
            lhs.geq(constraint.demand)
        })
        .collect();

    GoodLpModel {
        problem: vars.minimise(objective),
        columns,
        rows,
    }
}

/// Maps a good_lp outcome onto a [`ProgramSolution`].
///
/// A returned solution is always reported as optimal, even past the limit. An
/// engine error after the limit expired is read as the engine stopping on it.
pub(crate) fn interpret<S: GoodLpSolutionTrait>(
    program: &CoveringProgram,
    columns: &[GoodLpVariable],
    outcome: std::result::Result<S, ResolutionError>,
    elapsed: Duration,
) -> Result<ProgramSolution> {
    let statistics = program.statistics(elapsed);
    let limit = program.config.time_limit;
    let limit_reached = limit.is_some_and(|limit| elapsed >= limit);

    match outcome {
        Ok(sol) => {
            if limit_reached {
                warn!(
                    "'{}' solved in {:?}, over the {:?} limit",
                    program.name, elapsed, limit
                );
            }
            let variable_values: Vec<f64> = columns.iter().map(|&var| sol.value(var)).collect();
            let objective = program.objective(&variable_values);

            let mut solution = ProgramSolution::optimal(objective, variable_values);
            solution.statistics = statistics;
            solution.message = format!("Optimal solution found for '{}'", program.name);
            Ok(solution)
        }
        Err(ResolutionError::Infeasible) => Ok(ProgramSolution::new(
            ExactStatus::Infeasible,
            "Program is infeasible: no selection satisfies every covering row",
        )
        .with_statistics(statistics)),
        Err(ResolutionError::Unbounded) => Ok(ProgramSolution::new(
            ExactStatus::Unbounded,
            "Program is unbounded: objective can be decreased infinitely",
        )
        .with_statistics(statistics)),
        Err(_) if limit_reached => Ok(ProgramSolution::timed_out(limit).with_statistics(statistics)),
        Err(e) => Err(EngineError::ExecutionFailed(format!("{:?}", e))),
    }
}

#[cfg(all(test, feature = "microlp"))]
mod tests {
    use super::*;
    use crate::domain::{BinaryVariable, CoverConstraint, EngineConfig};
    use good_lp::{solvers::microlp, SolverModel};

    fn one_column(time_limit: Option<Duration>) -> CoveringProgram {
        let mut program = CoveringProgram::new("one").with_config(EngineConfig {
            time_limit,
            verbose: false,
        });
        let x = program.add_variable(BinaryVariable::new("x"));
        program.add_constraint(CoverConstraint::new(vec![x]));
        program
    }

    fn stopped<S>(
        _like: &std::result::Result<S, ResolutionError>,
        e: ResolutionError,
    ) -> std::result::Result<S, ResolutionError> {
        Err(e)
    }

    fn solve(
        program: &CoveringProgram,
    ) -> (Vec<GoodLpVariable>, std::result::Result<impl GoodLpSolutionTrait, ResolutionError>) {
        let model = build(program);
        let mut lp_model = model.problem.using(microlp::microlp);
        for row in model.rows {
            lp_model = lp_model.with(row);
        }
        (model.columns, lp_model.solve())
    }

    #[test]
    fn solution_past_the_limit_stays_optimal() {
        let program = one_column(Some(Duration::ZERO));
        let (columns, outcome) = solve(&program);

        let solution = interpret(&program, &columns, outcome, Duration::from_secs(1)).unwrap();
        assert_eq!(solution.status, ExactStatus::Optimal);
        assert_eq!(solution.variable_values.len(), 1);
        assert!(solution.variable_values[0] > 0.5);
        assert_eq!(solution.objective_value, Some(program.objective(&solution.variable_values)));
    }

    #[test]
    fn engine_stop_past_the_limit_is_a_timeout() {
        let program = one_column(Some(Duration::from_millis(10)));
        let (columns, outcome) = solve(&program);
        let outcome = stopped(&outcome, ResolutionError::Other("stopped"));

        let solution = interpret(&program, &columns, outcome, Duration::from_secs(1)).unwrap();
        assert_eq!(solution.status, ExactStatus::TimedOut);
        assert!(solution.variable_values.is_empty());
    }

    #[test]
    fn engine_stop_within_the_limit_is_an_error() {
        let program = one_column(None);
        let (columns, outcome) = solve(&program);
        let outcome = stopped(&outcome, ResolutionError::Other("stopped"));

        let err = interpret(&program, &columns, outcome, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, EngineError::ExecutionFailed(_)));
    }

    #[test]
    fn infeasible_is_reported_regardless_of_limit() {
        let program = one_column(Some(Duration::ZERO));
        let (columns, outcome) = solve(&program);
        let outcome = stopped(&outcome, ResolutionError::Infeasible);

        let solution = interpret(&program, &columns, outcome, Duration::from_secs(1)).unwrap();
        assert_eq!(solution.status, ExactStatus::Infeasible);
    }
}
