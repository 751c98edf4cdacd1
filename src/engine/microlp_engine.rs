use crate::domain::{
    engine_service::{MipEngine, Result},
    models::{CoveringProgram, ProgramSolution},
};
use crate::engine::{deadline, good_lp_model};
use good_lp::{solvers::microlp, SolverModel};
use std::time::Instant;

/// Pure Rust branch and bound through good_lp.
///
/// microlp has no time limit of its own. With a limit configured the solve runs
/// on a worker thread and is abandoned once the limit expires.
pub struct MicroLpEngine;

impl MicroLpEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MicroLpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MipEngine for MicroLpEngine {
    fn solve(&self, program: &CoveringProgram) -> Result<ProgramSolution> {
        self.validate(program)?;

        match program.config.time_limit {
            Some(limit) => {
                let owned = program.clone();
                let start_time = Instant::now();
                let solution = deadline::solve_with_deadline(limit, move || run(&owned))?;
                Ok(solution.with_statistics(program.statistics(start_time.elapsed())))
            }
            None => run(program),
        }
    }

    fn name(&self) -> &str {
        "microlp"
    }
}

fn run(program: &CoveringProgram) -> Result<ProgramSolution> {
    let start_time = Instant::now();
    let model = good_lp_model::build(program);

    let mut lp_model = model.problem.using(microlp::microlp);
    for row in model.rows {
        lp_model = lp_model.with(row);
    }

    let outcome = lp_model.solve();
    good_lp_model::interpret(program, &model.columns, outcome, start_time.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BinaryVariable, CoverConstraint, EngineConfig, ExactStatus};
    use std::time::Duration;

    #[test]
    fn solves_small_covering_program() {
        // x0 covers rows 0 and 1, x1 covers row 1, x2 covers rows 1 and 2
        let mut program = CoveringProgram::new("small");
        for name in ["x0", "x1", "x2"] {
            program.add_variable(BinaryVariable::new(name));
        }
        program.add_constraint(CoverConstraint::new(vec![0]));
        program.add_constraint(CoverConstraint::new(vec![0, 1, 2]));
        program.add_constraint(CoverConstraint::new(vec![2]));

        let solution = MicroLpEngine::new().solve(&program).unwrap();
        assert_eq!(solution.status, ExactStatus::Optimal);
        assert!((solution.objective_value.unwrap() - 2.0).abs() < 1e-6);
        assert!(solution.variable_values[0] > 0.5);
        assert!(solution.variable_values[1] < 0.5);
        assert!(solution.variable_values[2] > 0.5);
        assert_eq!(solution.statistics.num_nonzeros, 5);
    }

    #[test]
    fn generous_limit_keeps_the_optimum() {
        let mut program = CoveringProgram::new("one").with_config(EngineConfig {
            time_limit: Some(Duration::from_secs(60)),
            verbose: false,
        });
        let x = program.add_variable(BinaryVariable::new("x"));
        program.add_constraint(CoverConstraint::new(vec![x]));

        let solution = MicroLpEngine::new().solve(&program).unwrap();
        assert_eq!(solution.status, ExactStatus::Optimal);
        assert!(solution.variable_values[0] > 0.5);
        assert_eq!(solution.statistics.num_variables, 1);
    }

    #[test]
    fn expired_limit_returns_promptly() {
        // 400 elements, 60 overlapping subsets: far more than microlp proves in a millisecond
        let mut program = CoveringProgram::new("large").with_config(EngineConfig {
            time_limit: Some(Duration::from_millis(1)),
            verbose: false,
        });
        for i in 0..60 {
            program.add_variable(BinaryVariable::new(format!("x{i}")));
        }
        for e in 0..400usize {
            let terms = (0..60).filter(|s| (e * 7 + s * 13) % 9 < 2).collect();
            program.add_constraint(CoverConstraint::new(terms));
        }

        let started = Instant::now();
        let solution = MicroLpEngine::new().solve(&program).unwrap();
        assert!(started.elapsed() < Duration::from_secs(10));
        // a lucky worker may still finish first; either way the answer is consistent
        match solution.status {
            ExactStatus::TimedOut => assert!(solution.variable_values.is_empty()),
            ExactStatus::Optimal => assert_eq!(solution.variable_values.len(), 60),
            other => panic!("unexpected status {other}"),
        }
    }
}
