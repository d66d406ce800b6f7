/*!
Configuration of an encoding, and of the otter_sat solver.

All configuration is contained within [Config].
A [Planner](crate::planner::Planner) holds a config, and clones the relevant parts when creating solvers.
*/

mod config_option;
pub use config_option::ConfigOption;

/// Representation for the probability of choosing `true`
pub type PolarityLean = f64;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The probability of valuing an atom `true` when the otter_sat solver makes a decision.
    pub polarity_lean: ConfigOption<PolarityLean>,

    /// Seed for the source of randomness used by the otter_sat solver.
    pub random_seed: ConfigOption<u64>,

    /// The time limit for a solve, with zero for no limit.
    pub time_limit: ConfigOption<std::time::Duration>,

    /// The largest horizon tried by a horizon search.
    pub max_horizon: ConfigOption<usize>,

    /// Write a legend of the variables of an encoding as comments of a DIMACS file.
    pub dimacs_comments: ConfigOption<bool>,
}

impl Default for Config {
    /// The default config is deterministic: decisions always lean false and the seed is fixed.
    fn default() -> Self {
        Config {
            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            random_seed: ConfigOption {
                name: "random_seed",
                min: u64::MIN,
                max: u64::MAX,
                value: 0,
            },

            time_limit: ConfigOption {
                name: "time_limit",
                min: std::time::Duration::from_secs(0),
                max: std::time::Duration::MAX,
                value: std::time::Duration::from_secs(0),
            },

            max_horizon: ConfigOption {
                name: "max_horizon",
                min: 1,
                max: 256,
                value: 8,
            },

            dimacs_comments: ConfigOption {
                name: "dimacs_comments",
                min: false,
                max: true,
                value: true,
            },
        }
    }
}

impl Config {
    /// The time limit, if some limit is set.
    pub fn time_limit(&self) -> Option<std::time::Duration> {
        match self.time_limit.value.is_zero() {
            true => None,
            false => Some(self.time_limit.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_set() {
        let mut config = Config::default();
        assert!(config.polarity_lean.set(0.5).is_ok());
        assert_eq!(config.polarity_lean.value, 0.5);

        assert_eq!(config.polarity_lean.set(1.5), Err(1.5));
        assert_eq!(config.polarity_lean.value, 0.5);

        assert!(config.max_horizon.set(0).is_err());
        assert_eq!(config.max_horizon.value, 8);
    }

    #[test]
    fn zero_time_limit_is_none() {
        let mut config = Config::default();
        assert_eq!(config.time_limit(), None);

        config.time_limit.value = std::time::Duration::from_millis(10);
        assert_eq!(config.time_limit(), Some(std::time::Duration::from_millis(10)));
    }
}
