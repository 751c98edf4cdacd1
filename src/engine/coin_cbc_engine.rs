use crate::domain::{
    engine_service::{MipEngine, Result},
    models::{CoveringProgram, ProgramSolution},
};
use crate::engine::good_lp_model;
use good_lp::{solvers::coin_cbc, SolverModel};
use log::debug;
use std::time::Instant;

/// COIN-OR CBC through good_lp
pub struct CoinCbcEngine;

impl CoinCbcEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MipEngine for CoinCbcEngine {
    fn solve(&self, program: &CoveringProgram) -> Result<ProgramSolution> {
        // Validate first
        self.validate(program)?;

        let start_time = Instant::now();
        let model = good_lp_model::build(program);

        let mut lp_model = model.problem.using(coin_cbc::coin_cbc);
        lp_model.set_parameter("log", if program.config.verbose { "1" } else { "0" });
        if let Some(limit) = program.config.time_limit {
            let seconds = format!("{}", limit.as_secs_f64());
            lp_model.set_parameter("seconds", &seconds);
        }

        for row in model.rows {
            lp_model = lp_model.with(row);
        }

        debug!("CBC solving '{}'", program.name);
        let outcome = lp_model.solve();
        good_lp_model::interpret(program, &model.columns, outcome, start_time.elapsed())
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }
}
