use log::LevelFilter;
use nhl_api::client::{API_STATS, API_WEB};

pub const DEFAULT_CONCURRENCY: usize = 8;

/// Runtime settings: environment first, then command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_level: LevelFilter,
    pub fetch_concurrency: usize,
    pub api_web: String,
    pub api_stats: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Warn,
            fetch_concurrency: DEFAULT_CONCURRENCY,
            api_web: API_WEB.to_owned(),
            api_stats: API_STATS.to_owned(),
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = non_empty("NHLPBP_LOG") {
            match raw.trim().parse() {
                Ok(level) => settings.log_level = level,
                Err(_) => eprintln!("ignoring NHLPBP_LOG={raw:?}: not a log level"),
            }
        }
        if let Some(raw) = non_empty("NHLPBP_CONCURRENCY") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => settings.fetch_concurrency = n,
                _ => eprintln!("ignoring NHLPBP_CONCURRENCY={raw:?}: expected a positive integer"),
            }
        }
        if let Some(url) = non_empty("NHLPBP_API_WEB") {
            settings.api_web = url;
        }
        if let Some(url) = non_empty("NHLPBP_API_STATS") {
            settings.api_stats = url;
        }
        settings
    }

    pub fn with_log_level(mut self, level: Option<LevelFilter>) -> Self {
        if let Some(level) = level {
            self.log_level = level;
        }
        self
    }

    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Self {
        if let Some(n) = concurrency.filter(|&n| n > 0) {
            self.fetch_concurrency = n;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(Settings::from_lookup(lookup(&[])), Settings::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let s = Settings::from_lookup(lookup(&[
            ("NHLPBP_LOG", "debug"),
            ("NHLPBP_CONCURRENCY", "3"),
            ("NHLPBP_API_WEB", "http://localhost:9000"),
        ]));
        assert_eq!(s.log_level, LevelFilter::Debug);
        assert_eq!(s.fetch_concurrency, 3);
        assert_eq!(s.api_web, "http://localhost:9000");
        assert_eq!(s.api_stats, API_STATS);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let s = Settings::from_lookup(lookup(&[
            ("NHLPBP_LOG", "loud"),
            ("NHLPBP_CONCURRENCY", "0"),
        ]));
        assert_eq!(s.log_level, LevelFilter::Warn);
        assert_eq!(s.fetch_concurrency, DEFAULT_CONCURRENCY);
    }

    #[test]
    fn command_line_wins_over_environment() {
        let s = Settings::from_lookup(lookup(&[
            ("NHLPBP_LOG", "info"),
            ("NHLPBP_CONCURRENCY", "3"),
        ]))
        .with_log_level(Some(LevelFilter::Trace))
        .with_concurrency(Some(16));
        assert_eq!(s.log_level, LevelFilter::Trace);
        assert_eq!(s.fetch_concurrency, 16);

        let unchanged = Settings::default().with_log_level(None).with_concurrency(Some(0));
        assert_eq!(unchanged, Settings::default());
    }
}
