use std::time::Duration;

use super::value_objects::ExactStatus;

/// 0/1 decision variable of a covering program
#[derive(Debug, Clone)]
pub struct BinaryVariable {
    pub name: String,
    pub cost: f64,
}

impl BinaryVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cost: 1.0,
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }
}

/// Covering row: `sum(x[i] for i in terms) >= demand`
#[derive(Debug, Clone)]
pub struct CoverConstraint {
    pub name: String,
    /// Indices into `CoveringProgram::variables`
    pub terms: Vec<usize>,
    pub demand: f64,
}

impl CoverConstraint {
    pub fn new(terms: Vec<usize>) -> Self {
        Self {
            name: String::new(),
            terms,
            demand: 1.0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_demand(mut self, demand: f64) -> Self {
        self.demand = demand;
        self
    }
}

/// Limits passed down to the engine
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub time_limit: Option<Duration>,
    pub verbose: bool,
}

/// Minimisation program over binary variables with covering rows
#[derive(Debug, Clone)]
pub struct CoveringProgram {
    pub name: String,
    pub variables: Vec<BinaryVariable>,
    pub constraints: Vec<CoverConstraint>,
    pub config: EngineConfig,
}

impl CoveringProgram {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            config: EngineConfig::default(),
        }
    }

    /// Adds a variable and returns its column index
    pub fn add_variable(&mut self, variable: BinaryVariable) -> usize {
        self.variables.push(variable);
        self.variables.len() - 1
    }

    pub fn add_constraint(&mut self, constraint: CoverConstraint) {
        self.constraints.push(constraint);
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn num_nonzeros(&self) -> usize {
        self.constraints.iter().map(|c| c.terms.len()).sum()
    }

    /// Objective value of an assignment
    pub fn objective(&self, values: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .map(|(var, value)| var.cost * value)
            .sum()
    }

    pub fn statistics(&self, solve_time: Duration) -> EngineStatistics {
        EngineStatistics {
            solve_time,
            num_variables: self.num_variables(),
            num_constraints: self.num_constraints(),
            num_nonzeros: self.num_nonzeros(),
        }
    }
}

/// Statistics about the engine call
#[derive(Debug, Clone, Default)]
pub struct EngineStatistics {
    pub solve_time: Duration,
    pub num_variables: usize,
    pub num_constraints: usize,
    pub num_nonzeros: usize,
}

/// Raw engine answer for a covering program
#[derive(Debug, Clone)]
pub struct ProgramSolution {
    pub status: ExactStatus,
    pub objective_value: Option<f64>,
    pub variable_values: Vec<f64>,
    pub message: String,
    pub statistics: EngineStatistics,
}

impl ProgramSolution {
    pub fn new(status: ExactStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            objective_value: None,
            variable_values: Vec::new(),
            message: message.into(),
            statistics: EngineStatistics::default(),
        }
    }

    pub fn optimal(value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            status: ExactStatus::Optimal,
            objective_value: Some(value),
            variable_values,
            message: "Optimal solution found".to_string(),
            statistics: EngineStatistics::default(),
        }
    }

    pub fn timed_out(limit: Option<Duration>) -> Self {
        Self::new(
            ExactStatus::TimedOut,
            format!("Time limit of {:?} reached before optimality was proven", limit),
        )
    }

    pub fn with_statistics(mut self, statistics: EngineStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn is_optimal(&self) -> bool {
        self.status == ExactStatus::Optimal
    }
}
