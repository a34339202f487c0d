//! Functions for loading dispatch settings.

use std::env;

use crate::errors::*;

/// Comma separated layer names, outermost first.
pub const ENV_LAYERS: &str = "GL_DISPATCH_LAYERS";
/// Resolves every driver function at setup if set to a true value.
pub const ENV_EAGER: &str = "GL_DISPATCH_EAGER";

/// A structure containing configuration data of the dispatch system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The layers attached to every context created by the system, outermost first.
    pub layers: Vec<String>,
    /// Resolves every driver function at setup instead of on first use.
    pub eager_resolve: bool,
}

impl Settings {
    /// Loads settings from JSON, missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Settings> {
        Ok(::serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(::serde_json::to_string_pretty(self)?)
    }

    /// Overrides fields with the environment variables `ENV_LAYERS` and `ENV_EAGER`
    /// when they are set.
    pub fn apply_env(&mut self) -> Result<()> {
        for key in &[ENV_LAYERS, ENV_EAGER] {
            if let Ok(value) = env::var(key) {
                self.apply(key, &value)?;
            }
        }

        Ok(())
    }

    /// Overrides the field named by the environment variable `key` with `value`.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            ENV_LAYERS => {
                self.layers = value
                    .split(',')
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .map(|v| v.to_owned())
                    .collect();
            }
            ENV_EAGER => {
                self.eager_resolve = parse_bool(value)
                    .ok_or_else(|| Error::Settings(format!("{}={} is not a bool", key, value)))?;
            }
            _ => return Err(Error::Settings(format!("unknown key {}", key))),
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn json() {
        let settings = Settings::from_json(r#"{ "layers": ["log", "statistics"] }"#).unwrap();
        assert_eq!(settings.layers, vec!["log", "statistics"]);
        assert!(!settings.eager_resolve);

        let text = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&text).unwrap(), settings);
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());

        match Settings::from_json(r#"{ "layers": 1 }"#) {
            Err(Error::Settings(_)) => {}
            v => panic!("unexpected {:?}", v),
        }
    }

    #[test]
    fn apply() {
        let mut settings = Settings::default();
        settings.apply(ENV_LAYERS, " log, ,statistics ").unwrap();
        assert_eq!(settings.layers, vec!["log", "statistics"]);

        settings.apply(ENV_EAGER, "Yes").unwrap();
        assert!(settings.eager_resolve);
        settings.apply(ENV_EAGER, "0").unwrap();
        assert!(!settings.eager_resolve);

        assert!(settings.apply(ENV_EAGER, "maybe").is_err());
        assert!(settings.apply("PATH", "/bin").is_err());
    }
}
