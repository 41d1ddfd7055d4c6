use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "NOTES_MODULE_PORT";
    pub const HOST: &str = "NOTES_HOST";
    /// Connection string for the note store. A filesystem path, a
    /// `sqlite://`-prefixed path, or `:memory:`.
    pub const DATABASE_URL: &str = "NOTES_DATABASE_URL";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 9110;
    pub const HOST: &str = "127.0.0.1";
    pub const DATABASE_URL: &str = "./.db/notes.db";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub database_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: defaults::PORT,
            host: defaults::HOST.to_string(),
            database_url: defaults::DATABASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Unset or empty
    /// values, and ports that don't parse, fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = get(env_vars::PORT)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults::PORT);

        let host = get(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_string());

        let database_url =
            get(env_vars::DATABASE_URL).unwrap_or_else(|| defaults::DATABASE_URL.to_string());

        Self {
            port,
            host,
            database_url,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:9110");
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (env_vars::PORT, "8088"),
            (env_vars::HOST, "0.0.0.0"),
            (env_vars::DATABASE_URL, "sqlite:///tmp/n.db"),
        ]));
        assert_eq!(config.port, 8088);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.database_url, "sqlite:///tmp/n.db");
    }

    #[test]
    fn bad_port_falls_back() {
        let config = Config::from_lookup(lookup_from(&[(env_vars::PORT, "not-a-port")]));
        assert_eq!(config.port, defaults::PORT);

        let config = Config::from_lookup(lookup_from(&[(env_vars::DATABASE_URL, "  ")]));
        assert_eq!(config.database_url, defaults::DATABASE_URL);
    }
}
