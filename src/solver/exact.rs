use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};

use crate::domain::{
    BinaryVariable, Cover, CoverConstraint, CoveringProgram, EngineBackend, EngineConfig,
    EngineError, ExactStatus, Instance, MipEngine, Result, SolverResult, SubsetKey,
};
use crate::engine::EngineFactory;

/// Column values above this are read as a selected subset
pub const SELECTION_THRESHOLD: f64 = 0.5;

/// Configuration for the exact solver
#[derive(Debug, Clone, Default)]
pub struct ExactConfig {
    pub backend: EngineBackend,
    pub time_limit: Option<Duration>,
    pub verbose: bool,
}

impl ExactConfig {
    pub fn with_backend(mut self, backend: EngineBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Solves an instance to optimality as a 0/1 covering program.
///
/// One binary column per subset (ascending key order), unit costs, and one
/// `>= 1` row per universe element listing the subsets that contain it.
pub struct ExactSolver {
    engine: Arc<dyn MipEngine>,
    config: ExactConfig,
}

impl ExactSolver {
    pub fn new(engine: Arc<dyn MipEngine>) -> Self {
        Self {
            engine,
            config: ExactConfig::default(),
        }
    }

    /// Creates a solver backed by the engine named in `config`
    pub fn from_config(config: ExactConfig) -> Result<Self> {
        let engine = EngineFactory::create(config.backend)?;
        Ok(Self { engine, config })
    }

    pub fn with_config(mut self, config: ExactConfig) -> Self {
        self.config = config;
        self
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn config(&self) -> &ExactConfig {
        &self.config
    }

    /// Builds the covering program. Column `i` belongs to the `i`-th key
    /// returned alongside it.
    pub fn formulate(&self, instance: &Instance) -> (CoveringProgram, Vec<SubsetKey>) {
        let mut program = CoveringProgram::new("set_cover").with_config(EngineConfig {
            time_limit: self.config.time_limit,
            verbose: self.config.verbose,
        });

        let mut columns = Vec::with_capacity(instance.num_subsets());
        // members[e - 1]: columns of the subsets containing element e
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); instance.universe_size()];

        for (key, subset) in instance.subsets() {
            let column = program.add_variable(BinaryVariable::new(format!("subset_{}", key)));
            columns.push(key);
            for &element in subset.members() {
                members[element - 1].push(column);
            }
        }

        for (element, terms) in instance.universe().zip(members) {
            program.add_constraint(CoverConstraint::new(terms).with_name(format!("element_{}", element)));
        }

        (program, columns)
    }

    pub fn solve(&self, instance: &Instance) -> Result<SolverResult> {
        let (program, columns) = self.formulate(instance);
        debug!(
            "exact: {} columns, {} rows, {} nonzeros on {}",
            program.num_variables(),
            program.num_constraints(),
            program.num_nonzeros(),
            self.engine.name()
        );

        let solution = self.engine.solve(&program)?;
        debug!(
            "exact: {} after {:?} ({})",
            solution.status, solution.statistics.solve_time, solution.message
        );

        let cover = if solution.is_optimal() {
            if solution.variable_values.len() != columns.len() {
                return Err(EngineError::ExecutionFailed(format!(
                    "engine returned {} column values for {} subsets",
                    solution.variable_values.len(),
                    columns.len()
                ))
                .into());
            }
            let cover: Cover = columns
                .iter()
                .zip(&solution.variable_values)
                .filter(|&(_, &value)| value > SELECTION_THRESHOLD)
                .map(|(&key, _)| key)
                .collect();

            let uncovered = instance.uncovered_by(&cover);
            if !uncovered.is_empty() {
                error!(
                    "{} reported an optimal selection leaving {} elements uncovered",
                    self.engine.name(),
                    uncovered.len()
                );
                return Err(EngineError::ExecutionFailed(format!(
                    "optimal selection leaves {} elements uncovered",
                    uncovered.len()
                ))
                .into());
            }
            cover
        } else {
            Cover::new()
        };

        Ok(SolverResult {
            status: solution.status,
            objective_value: solution.objective_value.filter(|_| solution.status == ExactStatus::Optimal),
            cover,
            time_limit: self.config.time_limit,
            statistics: solution.statistics,
        })
    }
}

/// Solves `instance` exactly with the default engine
pub fn exact(instance: &Instance) -> Result<SolverResult> {
    ExactSolver::from_config(ExactConfig::default())?.solve(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine_service;
    use crate::domain::{ProgramSolution, SetCoverError};
    use std::sync::Mutex;

    /// Engine returning a canned answer and remembering the program it saw
    struct ScriptedEngine {
        answer: ProgramSolution,
        seen: Mutex<Option<CoveringProgram>>,
    }

    impl ScriptedEngine {
        fn new(answer: ProgramSolution) -> Arc<Self> {
            Arc::new(Self {
                answer,
                seen: Mutex::new(None),
            })
        }
    }

    impl MipEngine for ScriptedEngine {
        fn solve(&self, program: &CoveringProgram) -> engine_service::Result<ProgramSolution> {
            self.validate(program)?;
            *self.seen.lock().unwrap() = Some(program.clone());
            Ok(self.answer.clone())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn ring() -> Instance {
        Instance::from_subsets(
            4,
            [(1, vec![1, 2]), (2, vec![2, 3]), (3, vec![3, 4]), (4, vec![1, 4])],
        )
        .unwrap()
    }

    #[test]
    fn formulation_has_one_row_per_element() {
        let instance = Instance::from_subsets(3, [(10, vec![1, 2, 2]), (20, vec![2, 3])]).unwrap();
        let solver = ExactSolver::new(ScriptedEngine::new(ProgramSolution::new(
            ExactStatus::NotSolved,
            "",
        )));
        let (program, columns) = solver.formulate(&instance);

        assert_eq!(columns, vec![10, 20]);
        assert_eq!(program.num_variables(), 2);
        assert!(program.variables.iter().all(|v| v.cost == 1.0));
        let rows: Vec<_> = program.constraints.iter().map(|c| c.terms.clone()).collect();
        assert_eq!(rows, vec![vec![0], vec![0, 1], vec![1]]);
        assert!(program.constraints.iter().all(|c| c.demand == 1.0));
        assert_eq!(program.constraints[2].name, "element_3");
    }

    #[test]
    fn near_one_values_are_selected() {
        let engine = ScriptedEngine::new(ProgramSolution::optimal(
            2.0,
            vec![0.999_999_9, 1e-9, 1.000_000_2, -1e-12],
        ));
        let result = ExactSolver::new(engine.clone()).solve(&ring()).unwrap();

        assert_eq!(result.status, ExactStatus::Optimal);
        assert_eq!(result.cover, Cover::from_iter([1, 3]));
        assert_eq!(result.objective_value, Some(2.0));
        assert_eq!(result.len(), 2);
        assert!(engine.seen.lock().unwrap().is_some());
    }

    #[test]
    fn infeasible_answer_keeps_status_and_empty_cover() {
        let engine = ScriptedEngine::new(ProgramSolution::new(ExactStatus::Infeasible, "no"));
        let result = ExactSolver::new(engine).solve(&ring()).unwrap();

        assert_eq!(result.status, ExactStatus::Infeasible);
        assert!(result.cover.is_empty());
        assert_eq!(result.objective_value, None);
        assert!(matches!(result.into_cover(), Err(SetCoverError::Infeasible(_))));
    }

    #[test]
    fn time_limit_is_forwarded_and_reported() {
        let limit = Duration::from_millis(250);
        let engine = ScriptedEngine::new(ProgramSolution::timed_out(Some(limit)));
        let solver = ExactSolver::new(engine.clone())
            .with_config(ExactConfig::default().with_time_limit(limit));
        let result = solver.solve(&ring()).unwrap();

        let seen = engine.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.config.time_limit, Some(limit));
        assert_eq!(result.status, ExactStatus::TimedOut);
        assert!(matches!(
            result.into_cover(),
            Err(SetCoverError::TimedOut { limit: Some(l) }) if l == limit
        ));
    }

    #[test]
    fn invalid_witness_is_an_error() {
        let engine = ScriptedEngine::new(ProgramSolution::optimal(1.0, vec![1.0, 0.0, 0.0, 0.0]));
        let err = ExactSolver::new(engine).solve(&ring()).unwrap_err();
        assert!(matches!(err, SetCoverError::Engine(EngineError::ExecutionFailed(_))));
    }

    #[test]
    fn short_value_vector_is_an_error() {
        let engine = ScriptedEngine::new(ProgramSolution::optimal(1.0, vec![1.0]));
        let err = ExactSolver::new(engine).solve(&ring()).unwrap_err();
        assert!(matches!(err, SetCoverError::Engine(EngineError::ExecutionFailed(_))));
    }
}
