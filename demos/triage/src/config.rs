//! Parameter loading: JSON file first, then command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use vrad_core::SimulationParameters;

/// Values given on the command line.  `None` keeps the file/default value.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Overrides {
    pub seed:                Option<u64>,
    pub duration_hours:      Option<f64>,
    pub radiologists:        Option<u32>,
    pub cutoff:              Option<u32>,
    pub specialist_fraction: Option<f64>,
    pub verbose:             bool,
}

impl Overrides {
    pub fn apply(&self, params: &mut SimulationParameters) {
        if let Some(seed) = self.seed {
            params.seed = seed;
        }
        if let Some(hours) = self.duration_hours {
            params.sim_duration = hours * 60.0;
        }
        if let Some(n) = self.radiologists {
            params.num_radiologists = n;
        }
        if let Some(m) = self.cutoff {
            params.cutoff_multiplier = m;
        }
        if let Some(f) = self.specialist_fraction {
            params.specialist_fraction = f;
        }
        params.verbose |= self.verbose;
    }
}

/// Read parameters from a JSON file.  Missing fields take their defaults.
pub fn load_params(path: &Path) -> Result<SimulationParameters> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading parameter file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parsing parameter file {}", path.display()))
}

/// Defaults or `path`, then `overrides`, then validation.
pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<SimulationParameters> {
    let mut params = match path {
        Some(p) => load_params(p)?,
        None => SimulationParameters::default(),
    };
    overrides.apply(&mut params);
    params.validate()?;
    Ok(params)
}
