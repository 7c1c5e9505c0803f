use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use directories::BaseDirs;
use log::warn;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};

use crate::keywords::Keywords;
use crate::parse_date::ParseOptions;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `board.toml` and its JSON fallback copy.
    pub data_dir: PathBuf,
    /// Year given to dates typed without one (`Feb 6`). Defaults to the current year.
    pub default_year: Option<i32>,
    /// Zone the board is planned in; decides where "this week" begins.
    /// Falls back to the machine's local zone.
    pub timezone: Option<Tz>,
    /// Store dates as `Fri Feb 6 2026` instead of `Fri Feb 6`.
    pub date_with_year: bool,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    default_year: Option<i32>,
    timezone: Option<String>,
    date_with_year: Option<bool>,
    /// Optional table:
    /// [synonyms]
    /// febr = "february"
    /// mittag = "noon"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native), apply defaults,
    /// and extend the global Keywords registry with user-defined synonyms if present.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|e| {
            warn!("ignoring config file: {e:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let timezone = file_config
            .timezone
            .as_deref()
            .and_then(Self::parse_timezone);

        let data_dir = file_config
            .data_dir
            .unwrap_or_else(Self::default_data_dir);

        // Extend global keyword registry once at startup.
        Self::load_synonyms(&file_config.synonyms);

        Self {
            data_dir,
            default_year: file_config.default_year,
            timezone,
            date_with_year: file_config.date_with_year.unwrap_or(false),
        }
    }

    /// Date parsing options for input typed right now.
    pub fn parse_options(&self) -> ParseOptions {
        self.parse_options_at(Utc::now())
    }

    /// Date parsing options as of `now`: the configured default year, or the
    /// year `now` falls in within the board's zone.
    pub fn parse_options_at(&self, now: DateTime<Utc>) -> ParseOptions {
        let year = self
            .default_year
            .unwrap_or_else(|| self.today(now).year());
        ParseOptions::with_year(year)
    }

    /// The calendar day `now` falls on in the board's zone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        match self.timezone {
            Some(tz) => now.with_timezone(&tz).date_naive(),
            None => now.with_timezone(&Local).date_naive(),
        }
    }

    /// Parse an IANA zone name such as `America/New_York`.
    fn parse_timezone(name: &str) -> Option<Tz> {
        match name.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(_) => {
                warn!("unknown timezone '{name}', using the local zone");
                None
            }
        }
    }

    /// Default data root: `{data_dir}/storyboard`
    /// - macOS:   `~/Library/Application Support/storyboard`
    /// - Linux:   `$XDG_DATA_HOME/storyboard` or `~/.local/share/storyboard`
    /// - Windows: `%APPDATA%\storyboard`
    fn default_data_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            let mut p = base.data_dir().to_path_buf();
            p.push("storyboard");
            p
        } else {
            PathBuf::from("./storyboard")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("storyboard")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("storyboard").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global Keywords registry.
    /// Omits aliases the registry already knows, canonical names ("march") and
    /// abbreviations ("mar") alike, since stored dates are written with them.
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        match synonyms {
            Some(map) if !map.is_empty() => {
                let pairs: Vec<(String, String)> = map
                    .iter()
                    .filter(|(alias, _)| match Keywords::lookup(alias) {
                        Some(existing) => {
                            warn!(
                                "ignoring synonym '{alias}': it already means {}",
                                existing.as_ref()
                            );
                            false
                        }
                        None => true,
                    })
                    .map(|(a, t)| (a.clone(), t.clone()))
                    .collect();

                if !pairs.is_empty() {
                    Keywords::extend(&pairs);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::keywords::{Keyword, Keywords};
    use crate::parse_date::{CanonicalDate, format_date, parse_date};
    use chrono::TimeZone;
    use std::path::Path;

    /// Test helper to create a default `Config` for testing purposes.
    ///
    /// This is the single source of truth for test configuration.
    /// If you add a field to `Config`, you only need to update it here.
    pub(crate) fn mk_config(data_dir: PathBuf) -> Config {
        Config {
            data_dir,
            default_year: Some(2026),
            timezone: Some(chrono_tz::UTC),
            date_with_year: false,
        }
    }

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("storyboard")
                .join("config.toml");
            let expected_native = b.config_dir().join("storyboard").join("config.toml");
            let c = Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_all_keys() {
        let toml = r#"
            data_dir = "/tmp/my-board"
            default_year = 2026
            timezone = "America/New_York"
            date_with_year = true
        "#;
        let config = Config::from_file_config(Config::parse_file(toml).unwrap());
        assert_eq!(config.data_dir, Path::new("/tmp/my-board"));
        assert_eq!(config.default_year, Some(2026));
        assert_eq!(config.timezone, Some(chrono_tz::America::New_York));
        assert!(config.date_with_year);
        assert_eq!(config.parse_options().default_year, 2026);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_file_config(Config::parse_file("").unwrap());
        assert!(config.data_dir.ends_with("storyboard"));
        assert_eq!(config.default_year, None);
        assert_eq!(config.timezone, None);
        assert!(!config.date_with_year);
    }

    #[test]
    fn unknown_timezone_falls_back_to_local() {
        let config = Config::from_file_config(
            Config::parse_file(r#"timezone = "Mars/Olympus_Mons""#).unwrap(),
        );
        assert_eq!(config.timezone, None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Config::parse_file("default_year = \"soon\"").is_err());
    }

    #[test]
    fn today_follows_configured_zone() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 2, 0, 0).unwrap();
        let mut config = mk_config(PathBuf::from("/tmp"));
        assert_eq!(config.today(now), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        config.timezone = Some(chrono_tz::America::Los_Angeles);
        assert_eq!(config.today(now), NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
    }

    #[test]
    fn default_year_follows_the_board_zone() {
        // 20:00 on New Year's Eve in UTC is already New Year's Day in Tokyo.
        let now = Utc.with_ymd_and_hms(2026, 12, 31, 20, 0, 0).unwrap();
        let mut config = mk_config(PathBuf::from("/tmp"));
        config.default_year = None;
        assert_eq!(config.parse_options_at(now).default_year, 2026);
        config.timezone = Some(chrono_tz::Asia::Tokyo);
        assert_eq!(config.parse_options_at(now).default_year, 2027);
        config.default_year = Some(2030);
        assert_eq!(config.parse_options_at(now).default_year, 2030);
    }

    #[test]
    fn parse_file_accepts_synonyms_and_extends_registry() {
        let toml = r#"
            [synonyms]
            janv = "january"
            FEVR = "feb"
        "#;

        let fc = Config::parse_file(toml).unwrap();
        assert!(fc.synonyms.is_some());

        Config::load_synonyms(&fc.synonyms);

        assert_eq!(Keywords::month("janv"), Some(1));
        assert_eq!(Keywords::month("fevr"), Some(2));
    }

    #[test]
    fn parse_file_no_accepts_canonical_synonyms() {
        let toml = r#"
            [synonyms]
            march = "may"
            mai = "may"
        "#;

        let fc = Config::parse_file(toml).unwrap();
        Config::load_synonyms(&fc.synonyms);

        assert!(Keywords::matches(Keyword::March, "march"));
        assert!(Keywords::matches(Keyword::May, "mai"));
    }

    #[test]
    fn synonyms_cannot_shadow_abbreviations() {
        let toml = r#"
            [synonyms]
            mar = "may"
            Thu = "friday"
        "#;

        let fc = Config::parse_file(toml).unwrap();
        Config::load_synonyms(&fc.synonyms);

        assert_eq!(Keywords::month("mar"), Some(3));
        assert!(Keywords::matches(Keyword::Thursday, "thu"));
        let march_5 = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let stored = format_date(&CanonicalDate::Date(march_5));
        assert_eq!(stored, "Thu Mar 5");
        assert_eq!(
            parse_date(&stored, ParseOptions::with_year(2026)).unwrap(),
            CanonicalDate::Date(march_5)
        );
    }
}
