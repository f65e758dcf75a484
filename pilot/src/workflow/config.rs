use anyhow::Context;
use pilotcore::prelude::{PilotConfig, StrategyKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Run configuration for one piloting session, loadable from YAML.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub max_airspeed: f32,
    pub tree_lidar_radius: f32,
    pub site_lidar_radius: f32,
    pub site_radius: f32,
    pub half_width: f32,
    pub strategy: StrategyKind,
}

impl Default for RunConfig {
    fn default() -> Self {
        let core = PilotConfig::default();
        Self {
            max_airspeed: core.max_airspeed,
            tree_lidar_radius: core.tree_lidar_radius,
            site_lidar_radius: core.site_lidar_radius,
            site_radius: core.site_radius,
            half_width: core.half_width,
            strategy: StrategyKind::default(),
        }
    }
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading run config {}", path_ref.display()))?;
        let config: RunConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing run config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn to_pilot_config(&self, log_trees: bool, log_sites: bool) -> PilotConfig {
        PilotConfig {
            max_airspeed: self.max_airspeed,
            tree_lidar_radius: self.tree_lidar_radius,
            site_lidar_radius: self.site_lidar_radius,
            site_radius: self.site_radius,
            half_width: self.half_width,
            log_trees,
            log_sites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_matches_core_defaults() {
        let cfg = RunConfig::default();
        let pilot = cfg.to_pilot_config(true, false);
        assert_eq!(pilot.max_airspeed, 30.0);
        assert_eq!(pilot.site_radius, 5.0);
        assert!(pilot.log_trees);
        assert!(!pilot.log_sites);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"max_airspeed: 25.0\nstrategy: bearing\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = RunConfig::load(&path).unwrap();
        assert_eq!(cfg.max_airspeed, 25.0);
        assert_eq!(cfg.strategy, StrategyKind::Bearing);
        // Unlisted fields keep their defaults.
        assert_eq!(cfg.half_width, 25.0);
    }
}
