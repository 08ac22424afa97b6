//! Scenario runner for batches of independent calculations
//!
//! Every scenario owns its inputs and builds its own calculator, so batches
//! run in parallel with no shared state.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{CalculatorError, LoadError};
use crate::inputs::{load_scenarios, RetirementInputs};
use crate::projection::{calculate, PlanSummary, RetirementPlan};

/// Named set of inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub inputs: RetirementInputs,
}

impl Scenario {
    pub fn new(name: impl Into<String>, inputs: RetirementInputs) -> Self {
        Self {
            name: name.into(),
            inputs,
        }
    }
}

/// Result of one scenario; a failed scenario does not abort the batch
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<RetirementPlan, CalculatorError>,
}

impl ScenarioOutcome {
    pub fn summary(&self) -> Option<PlanSummary> {
        self.result.as_ref().ok().map(RetirementPlan::summary)
    }
}

/// Batch runner over a list of scenarios
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv("scenarios.csv")?;
/// for outcome in runner.run_all() {
///     println!("{}: {:?}", outcome.name, outcome.summary());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    scenarios: Vec<Scenario>,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scenarios(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    /// Create runner by loading scenarios from a CSV file
    pub fn from_csv<P: AsRef<std::path::Path>>(path: P) -> Result<Self, LoadError> {
        Ok(Self {
            scenarios: load_scenarios(path)?,
        })
    }

    pub fn add(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Run a single scenario
    pub fn run(scenario: &Scenario) -> ScenarioOutcome {
        ScenarioOutcome {
            name: scenario.name.clone(),
            result: calculate(&scenario.inputs),
        }
    }

    /// Run every scenario in parallel, preserving input order
    pub fn run_all(&self) -> Vec<ScenarioOutcome> {
        info!("running {} scenario(s)", self.scenarios.len());
        self.scenarios.par_iter().map(Self::run).collect()
    }

    /// Run one base scenario against several values of a single parameter
    ///
    /// Each value maps to its earliest retirement year (`Ok(None)` when no
    /// year works) or to the error that stopped the calculation.
    pub fn sweep<F>(
        base: &RetirementInputs,
        values: &[f64],
        apply: F,
    ) -> Vec<(f64, Result<Option<u32>, CalculatorError>)>
    where
        F: Fn(&mut RetirementInputs, f64) + Sync,
    {
        values
            .par_iter()
            .map(|&value| {
                let mut inputs = base.clone();
                apply(&mut inputs, value);
                (value, calculate(&inputs).map(|plan| plan.retirement_year))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    #[test]
    fn test_run_all_preserves_order_and_isolates_failures() {
        let mut runner = ScenarioRunner::new();
        runner.add(Scenario::new("base", RetirementInputs::default()));
        runner.add(Scenario::new(
            "bad",
            RetirementInputs {
                years_to_live: 0,
                ..RetirementInputs::default()
            },
        ));
        runner.add(Scenario::new(
            "rich",
            RetirementInputs {
                current_savings: 1e8,
                ..RetirementInputs::default()
            },
        ));

        let outcomes = runner.run_all();
        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["base", "bad", "rich"]);

        assert!(outcomes[0].result.is_ok());
        assert!(matches!(outcomes[1].result, Err(CalculatorError::Configuration(_))));
        assert!(outcomes[1].summary().is_none());
        assert_eq!(outcomes[2].summary().unwrap().retirement_year, Some(0));
    }

    #[test]
    fn test_higher_growth_never_delays_retirement() {
        let rates = [0.02, 0.04, 0.06, 0.08];
        let results = ScenarioRunner::sweep(&RetirementInputs::default(), &rates, |inputs, rate| {
            inputs.pre_retirement_growth_rate = rate;
        });

        assert_eq!(results.len(), rates.len());
        let years: Vec<u32> = results
            .iter()
            .map(|(_, year)| year.clone().unwrap().unwrap_or(u32::MAX))
            .collect();
        assert!(years.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_sweep_keeps_errors_apart_from_infeasible() {
        let base = RetirementInputs::default();

        let horizons = ScenarioRunner::sweep(&base, &[0.0, 60.0], |inputs, years| {
            inputs.years_to_live = years as u32;
        });
        assert_eq!(
            horizons[0].1,
            Err(CalculatorError::Configuration(ConfigurationError::InvalidHorizon(0)))
        );
        assert!(matches!(horizons[1].1, Ok(Some(_))));

        let incomes = ScenarioRunner::sweep(&base, &[1e12], |inputs, income| {
            inputs.net_retirement_income = income;
        });
        assert_eq!(incomes[0].1, Ok(None));
    }
}
