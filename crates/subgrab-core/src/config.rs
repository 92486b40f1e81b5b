use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::vfs::DEFAULT_MAX_ENTRY_BYTES;

/// HTTP parameters for the direct-URL source (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent sent with every request.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 120,
            user_agent: "Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.1; Trident/6.0)".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/subgrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubgrabConfig {
    /// Plugin id used in `plugin://<addon_id>/` listing URLs.
    pub addon_id: String,
    /// Where downloads are saved; defaults to `~/.cache/subgrab/temp`.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    /// Pause in milliseconds between saving an archive and opening it.
    pub settle_delay_ms: u64,
    /// How many archive-in-archive levels are opened.
    pub max_archive_depth: usize,
    /// Largest single archive entry read into memory.
    pub max_entry_bytes: u64,
    /// Directory names never descended into when walking archives.
    pub skip_dirs: Vec<String>,
    /// Optional HTTP settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

impl Default for SubgrabConfig {
    fn default() -> Self {
        Self {
            addon_id: "service.subtitles.subgrab".to_string(),
            temp_dir: None,
            settle_delay_ms: 500,
            max_archive_depth: 4,
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
            skip_dirs: vec!["__MACOSX".to_string(), ".git".to_string()],
            http: None,
        }
    }
}

impl SubgrabConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn http(&self) -> HttpConfig {
        self.http.clone().unwrap_or_default()
    }

    /// Configured temp dir, or the XDG cache location.
    pub fn resolve_temp_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.temp_dir {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("subgrab")?;
        Ok(xdg_dirs.get_cache_home().join("subgrab").join("temp"))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("subgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SubgrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SubgrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SubgrabConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = SubgrabConfig::default();
        assert_eq!(cfg.settle_delay(), Duration::from_millis(500));
        assert_eq!(cfg.max_archive_depth, 4);
        assert_eq!(cfg.max_entry_bytes, 64 * 1024 * 1024);
        assert_eq!(cfg.skip_dirs, vec!["__MACOSX", ".git"]);
        assert!(cfg.temp_dir.is_none());
        assert_eq!(cfg.http().timeout_secs, 120);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = SubgrabConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SubgrabConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.addon_id, cfg.addon_id);
        assert_eq!(parsed.settle_delay_ms, cfg.settle_delay_ms);
        assert_eq!(parsed.skip_dirs, cfg.skip_dirs);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            addon_id = "service.subtitles.test"
            temp_dir = "/var/tmp/subs"
            settle_delay_ms = 0
            max_archive_depth = 1
            max_entry_bytes = 1048576
            skip_dirs = ["__MACOSX"]

            [http]
            connect_timeout_secs = 5
            timeout_secs = 30
            user_agent = "subgrab-test"
        "#;
        let cfg: SubgrabConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.addon_id, "service.subtitles.test");
        assert_eq!(cfg.temp_dir.as_deref(), Some(std::path::Path::new("/var/tmp/subs")));
        assert_eq!(cfg.resolve_temp_dir().unwrap(), PathBuf::from("/var/tmp/subs"));
        assert_eq!(cfg.settle_delay(), Duration::ZERO);
        assert_eq!(cfg.max_archive_depth, 1);
        let http = cfg.http();
        assert_eq!(http.connect_timeout_secs, 5);
        assert_eq!(http.user_agent, "subgrab-test");
    }

    #[test]
    fn config_toml_without_http_section() {
        let toml = r#"
            addon_id = "x"
            settle_delay_ms = 100
            max_archive_depth = 2
            max_entry_bytes = 1024
            skip_dirs = []
        "#;
        let cfg: SubgrabConfig = toml::from_str(toml).unwrap();
        assert!(cfg.http.is_none());
        assert!(cfg.skip_dirs.is_empty());
        assert_eq!(cfg.http().connect_timeout_secs, 15);
    }
}
