use factory_sim::{FactoryConfig, ReportError, Simulation, Statistics};
use log::{error, info};
use rayon::prelude::*;

/// One factory layout to evaluate.
#[derive(Debug, Clone)]
struct Scenario {
    product_type: &'static str,
    machines: u32,
    operators: u32,
    horizon: f64,
}

impl Scenario {
    fn report_name(&self) -> String {
        format!(
            "scenario_{}_machines_{}_operators_{}.txt",
            self.product_type, self.machines, self.operators
        )
    }

    fn config(&self) -> FactoryConfig {
        FactoryConfig::new()
            .with_capacity("machines", self.machines)
            .with_capacity("operators", self.operators)
            .without_arrivals()
            .with_arrival_rate(self.product_type, 1.0)
            .with_horizon(self.horizon)
    }

    fn run(&self) -> Result<Statistics, ReportError> {
        let mut sim = Simulation::new(self.config())?;
        info!("{}: seed {}", self.report_name(), sim.seed());
        let stats = sim.run_simulation(self.horizon, self.report_name())?;
        Ok(stats.clone())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .format_timestamp(None)
        .init();

    let scenarios = vec![
        Scenario {
            product_type: "ProductA",
            machines: 10,
            operators: 5,
            horizon: 1000.0,
        },
        Scenario {
            product_type: "ProductB",
            machines: 8,
            operators: 6,
            horizon: 1000.0,
        },
        Scenario {
            product_type: "ProductA",
            machines: 12,
            operators: 7,
            horizon: 1000.0,
        },
    ];

    // Each run owns its own simulation, so they can go in parallel.
    let results: Vec<(Scenario, Result<Statistics, ReportError>)> = scenarios
        .into_par_iter()
        .map(|scenario| {
            let result = scenario.run();
            (scenario, result)
        })
        .collect();

    let mut failures = 0;
    for (scenario, result) in &results {
        match result {
            Ok(stats) => println!(
                "{:<45} arrived {:>5}  finished {:>5}  dropped {:>5}",
                scenario.report_name(),
                stats.raw_material_count,
                stats.finished_count,
                stats.dropped_count
            ),
            Err(e) => {
                error!("{} failed: {}", scenario.report_name(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} scenarios failed", failures, results.len()).into());
    }
    Ok(())
}
