// config.rs - tracker tuning, resolved from defaults, a JSON file, env and CLI
//
// Resolution order, later sources win:
// - defaults for the user agent given with --user-agent (Firefox gets a 50 ms throttle)
// - JSON file: --config <path>, else VIMEO360_CONFIG, else assets/tracker.json
//   next to the executable or in the working directory
// - Env: VIMEO360_THROTTLE_MS
// - CLI: --throttle-ms <ms>

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_KEY_PRESS_INCREMENT: f64 = 5.0;

/// Throttle applied where mousemove fires fast enough to flood the player.
pub const FIREFOX_THROTTLE_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Minimum gap between camera writes. `0` disables throttling.
    pub input_throttle_ms: u64,
    /// Degrees moved per arrow-key press.
    pub key_press_increment: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            input_throttle_ms: 0,
            key_press_increment: DEFAULT_KEY_PRESS_INCREMENT,
        }
    }
}

impl TrackerConfig {
    /// Defaults for a browser identified by its user-agent string.
    pub fn for_user_agent(user_agent: &str) -> Self {
        let input_throttle_ms = if user_agent.to_ascii_lowercase().contains("firefox") {
            FIREFOX_THROTTLE_MS
        } else {
            0
        };
        Self {
            input_throttle_ms,
            ..Self::default()
        }
    }

    pub fn input_throttle(&self) -> Option<Duration> {
        (self.input_throttle_ms > 0).then(|| Duration::from_millis(self.input_throttle_ms))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves the config from the process's CLI arguments and environment.
    pub fn resolve_from_args() -> Result<Self, ConfigError> {
        let args: Vec<String> = std::env::args().collect();
        Self::resolve(&args, |name| std::env::var(name).ok())
    }

    pub fn resolve(
        args: &[String],
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match flag_value(args, "--user-agent") {
            Some(ua) => Self::for_user_agent(ua),
            None => Self::default(),
        };

        let explicit = flag_value(args, "--config")
            .map(PathBuf::from)
            .or_else(|| env("VIMEO360_CONFIG").filter(|v| !v.trim().is_empty()).map(PathBuf::from));
        match explicit {
            Some(path) => config = Self::load(&path)?,
            None => {
                if let Some(path) = find_config_file() {
                    log::debug!("loading tracker config from {}", path.display());
                    config = Self::load(&path)?;
                }
            }
        }

        if let Some(v) = env("VIMEO360_THROTTLE_MS").filter(|v| !v.trim().is_empty()) {
            config.input_throttle_ms = parse_millis("VIMEO360_THROTTLE_MS", &v)?;
        }
        if let Some(v) = flag_value(args, "--throttle-ms") {
            config.input_throttle_ms = parse_millis("--throttle-ms", v)?;
        }

        Ok(config)
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let mut it = args.iter();
    while let Some(a) = it.next() {
        if a == flag {
            return it.next().map(String::as_str);
        }
    }
    None
}

fn parse_millis(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}

/// Find assets/tracker.json by searching:
/// 1) <exe_dir>/assets/tracker.json
/// 2) ./assets/tracker.json
fn find_config_file() -> Option<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let p = dir.join("assets").join("tracker.json");
            if p.exists() {
                return Some(p);
            }
        }
    }

    let p = PathBuf::from("assets").join("tracker.json");
    if p.exists() {
        return Some(p);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("vimeo360_input")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn firefox_gets_the_throttle() {
        let firefox = "Mozilla/5.0 (X11; Linux x86_64; rv:119.0) Gecko/20100101 Firefox/119.0";
        let chrome = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0 Safari/537.36";

        assert_eq!(TrackerConfig::for_user_agent(firefox).input_throttle_ms, 50);
        assert_eq!(TrackerConfig::for_user_agent("FIREFOX").input_throttle_ms, 50);
        assert_eq!(TrackerConfig::for_user_agent(chrome).input_throttle_ms, 0);
        assert_eq!(TrackerConfig::for_user_agent(chrome).input_throttle(), None);
    }

    #[test]
    fn missing_json_fields_fall_back_to_defaults() {
        let config: TrackerConfig = serde_json::from_str(r#"{ "input_throttle_ms": 20 }"#).unwrap();
        assert_eq!(config.input_throttle(), Some(Duration::from_millis(20)));
        assert_eq!(config.key_press_increment, DEFAULT_KEY_PRESS_INCREMENT);
    }

    #[test]
    fn cli_beats_env_beats_user_agent() {
        let vars: HashMap<&str, &str> = [("VIMEO360_THROTTLE_MS", "30")].into();
        let env = |name: &str| vars.get(name).map(|v| v.to_string());

        let config = TrackerConfig::resolve(&args(&["--user-agent", "Firefox"]), no_env).unwrap();
        assert_eq!(config.input_throttle_ms, 50);

        let config = TrackerConfig::resolve(&args(&["--user-agent", "Firefox"]), &env).unwrap();
        assert_eq!(config.input_throttle_ms, 30);

        let config = TrackerConfig::resolve(&args(&["--throttle-ms", "5"]), &env).unwrap();
        assert_eq!(config.input_throttle_ms, 5);
    }

    #[test]
    fn rejects_garbage_throttle_values() {
        let err = TrackerConfig::resolve(&args(&["--throttle-ms", "soon"]), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { name: "--throttle-ms", .. }));
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let err = TrackerConfig::resolve(
            &args(&["--config", "/definitely/not/here/tracker.json"]),
            no_env,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
