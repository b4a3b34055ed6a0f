use crate::error::ConfigResult;
use log::LevelFilter;
use serde::de;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::read_to_string;
use std::path::Path;

pub const DEFAULT_ROLLING_LOG_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TracerConfig {
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    masked_params: Vec<String>,
    #[serde(default)]
    logger: Option<LoggerDescriptor>,
}

impl TracerConfig {
    pub fn load(config_path: impl AsRef<Path>) -> ConfigResult<TracerConfig> {
        let config_str = read_to_string(config_path)?;
        TracerConfig::from_yaml_str(&config_str)
    }

    pub fn from_yaml_str(config_str: &str) -> ConfigResult<TracerConfig> {
        Ok(serde_yaml::from_str(config_str)?)
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn masked_params(&self) -> &[String] {
        &self.masked_params
    }

    pub fn logger(&self) -> Option<&LoggerDescriptor> {
        self.logger.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggerDescriptor {
    #[serde(default = "default_level")]
    level: LevelFilter,
    #[serde(default)]
    log_file_path: Option<String>,
    #[serde(
        default = "default_rolling_file_size",
        deserialize_with = "deserialize_limit"
    )]
    rolling_file_size: u64,
}

impl Default for LoggerDescriptor {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            log_file_path: None,
            rolling_file_size: DEFAULT_ROLLING_LOG_FILE_SIZE,
        }
    }
}

impl LoggerDescriptor {
    pub fn new(level: LevelFilter, log_file_path: Option<String>, rolling_file_size: u64) -> Self {
        Self {
            level,
            log_file_path,
            rolling_file_size,
        }
    }

    pub fn get_level(&self) -> LevelFilter {
        self.level
    }

    pub fn get_log_file_path(&self) -> Option<&str> {
        self.log_file_path.as_deref()
    }

    pub fn get_rolling_file_size(&self) -> u64 {
        self.rolling_file_size
    }
}

fn default_level() -> LevelFilter {
    DEFAULT_LOG_LEVEL
}

fn default_rolling_file_size() -> u64 {
    DEFAULT_ROLLING_LOG_FILE_SIZE
}

fn deserialize_limit<'de, D>(d: D) -> Result<u64, D::Error>
where
    D: de::Deserializer<'de>,
{
    struct V;

    impl<'de2> de::Visitor<'de2> for V {
        type Value = u64;

        fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
            fmt.write_str("a size")
        }

        fn visit_u64<E>(self, v: u64) -> Result<u64, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<u64, E>
        where
            E: de::Error,
        {
            u64::try_from(v)
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &"a non-negative number"))
        }

        fn visit_str<E>(self, v: &str) -> Result<u64, E>
        where
            E: de::Error,
        {
            parse_byte_size(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &"a byte size"))
        }
    }

    d.deserialize_any(V)
}

/// Parses `10`, `10b`, `10kb`, `10 MiB` and so on into a byte count.
fn parse_byte_size(v: &str) -> Option<u64> {
    let (number, unit) = match v.find(|c: char| !c.is_ascii_digit()) {
        Some(n) => (v[..n].trim(), v[n..].trim()),
        None => (v.trim(), ""),
    };
    let number = number.parse::<u64>().ok()?;

    let shift = match unit.to_ascii_lowercase().as_str() {
        "" | "b" => 0,
        "kb" | "kib" => 10,
        "mb" | "mib" => 20,
        "gb" | "gib" => 30,
        "tb" | "tib" => 40,
        _ => return None,
    };

    number.checked_mul(1u64 << shift)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::{fs, io::Write};

    #[test]
    fn test_full_config() {
        let config = TracerConfig::from_yaml_str(
            r#"
target: my_app::auth
masked_params:
  - password
  - pw
logger:
  level: info
  log_file_path: log/trace
  rolling_file_size: 2 KiB
"#,
        )
        .unwrap();

        assert_eq!(Some("my_app::auth"), config.target());
        assert_eq!(&["password".to_string(), "pw".to_string()], config.masked_params());
        let logger = config.logger().unwrap();
        assert_eq!(LevelFilter::Info, logger.get_level());
        assert_eq!(Some("log/trace"), logger.get_log_file_path());
        assert_eq!(2048, logger.get_rolling_file_size());
    }

    #[test]
    fn test_defaults() {
        let config = TracerConfig::from_yaml_str("masked_params: [secret]").unwrap();
        assert_eq!(None, config.target());
        assert!(config.logger().is_none());

        let config = TracerConfig::from_yaml_str("logger: {}").unwrap();
        assert_eq!(&LoggerDescriptor::default(), config.logger().unwrap());
    }

    #[test]
    fn test_bad_format() {
        let err = TracerConfig::from_yaml_str("masked_params: password: pw").unwrap_err();
        assert!(matches!(err, ConfigError::BadFormat(_)));

        let err = TracerConfig::from_yaml_str("logger:\n  rolling_file_size: 3 parsecs").unwrap_err();
        assert!(matches!(err, ConfigError::BadFormat(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("logtracer-config-{}.yml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"target: from_file\nmasked_params: [token]\n").unwrap();

        let config = TracerConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(Some("from_file"), config.target());
        assert_eq!(&["token".to_string()], config.masked_params());

        assert!(matches!(TracerConfig::load(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_parse_byte_size() {
        assert_eq!(Some(10), parse_byte_size("10"));
        assert_eq!(Some(10), parse_byte_size("10b"));
        assert_eq!(Some(10 * 1024), parse_byte_size("10kb"));
        assert_eq!(Some(3 << 20), parse_byte_size("3 MiB"));
        assert_eq!(Some(1 << 30), parse_byte_size("1GB"));
        assert_eq!(Some(1 << 40), parse_byte_size("1tb"));
        assert_eq!(None, parse_byte_size("kb"));
        assert_eq!(None, parse_byte_size("1pb"));
        assert_eq!(None, parse_byte_size(&format!("{}tb", u64::MAX)));
    }
}
