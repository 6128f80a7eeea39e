//! `[log]` section configuration.
//!
//! ```toml
//! [log]
//! skip_prefixes = ["hint:"]   # output lines starting with these are not logged
//! ```

use serde::{Deserialize, Serialize};

use crate::utils::exec::FilterRule;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Line prefixes hidden from the log. Step outcomes are unaffected.
    pub skip_prefixes: Vec<String>,
}

impl LogConfig {
    pub fn filter(&self) -> FilterRule {
        FilterRule::new(self.skip_prefixes.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_log_config() {
        let config = test_parse_config("[log]\nskip_prefixes = [\"hint:\", \"remote:\"]");
        let filter = config.log.filter();
        assert_eq!(filter.apply("hint: x\nok\nremote: y"), "ok");
    }

    #[test]
    fn test_log_config_defaults() {
        let config = test_parse_config("");
        assert!(config.log.skip_prefixes.is_empty());
    }
}
