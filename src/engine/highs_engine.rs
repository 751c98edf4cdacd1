// HiGHS engine adapter
// Translates a covering program into a HiGHS RowProblem

use crate::domain::{
    engine_service::{EngineError, MipEngine, Result},
    models::{CoveringProgram, ProgramSolution},
    value_objects::ExactStatus,
};
use log::debug;
use std::time::Instant;

pub struct HighsEngine;

impl HighsEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MipEngine for HighsEngine {
    fn solve(&self, program: &CoveringProgram) -> Result<ProgramSolution> {
        // Validate first
        self.validate(program)?;

        let start_time = Instant::now();

        // Use HiGHS RowProblem (add columns first, then rows)
        use highs::{HighsModelStatus, RowProblem, Sense};

        let mut pb = RowProblem::default();

        let cols: Vec<_> = program
            .variables
            .iter()
            .map(|var| pb.add_integer_column(var.cost, 0.0..=1.0))
            .collect();

        for constraint in &program.constraints {
            let terms: Vec<_> = constraint.terms.iter().map(|&t| (cols[t], 1.0)).collect();
            pb.add_row(constraint.demand.., &terms);
        }

        let mut model = pb.optimise(Sense::Minimise);
        model.set_option("output_flag", program.config.verbose);
        if let Some(limit) = program.config.time_limit {
            model.set_option("time_limit", limit.as_secs_f64());
        }

        debug!("HiGHS solving '{}'", program.name);
        let solved = model.solve();
        let statistics = program.statistics(start_time.elapsed());

        match solved.status() {
            HighsModelStatus::Optimal => {
                let solution_data = solved.get_solution();
                let variable_values = solution_data.columns().to_vec();
                let objective = program.objective(&variable_values);

                let mut solution = ProgramSolution::optimal(objective, variable_values);
                solution.statistics = statistics;
                solution.message = format!("Optimal solution found for '{}'", program.name);
                Ok(solution)
            }
            HighsModelStatus::Infeasible => Ok(ProgramSolution::new(
                ExactStatus::Infeasible,
                "Program is infeasible: no selection satisfies every covering row",
            )
            .with_statistics(statistics)),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                Ok(ProgramSolution::new(
                    ExactStatus::Unbounded,
                    "Program is unbounded: objective can be decreased infinitely",
                )
                .with_statistics(statistics))
            }
            HighsModelStatus::ReachedTimeLimit => {
                Ok(ProgramSolution::timed_out(program.config.time_limit).with_statistics(statistics))
            }
            HighsModelStatus::ReachedIterationLimit => Ok(ProgramSolution::new(
                ExactStatus::NotSolved,
                "HiGHS reached its iteration limit",
            )
            .with_statistics(statistics)),
            status => Err(EngineError::ExecutionFailed(format!(
                "HiGHS returned status: {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
