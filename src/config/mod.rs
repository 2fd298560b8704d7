use anyhow::{Context, Result};
use config::{Config, File};
use log::{debug, info, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub url: String,
    pub reconnect_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:8069".to_string(),
            reconnect_delay_ms: 100,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PanelConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub sensor_max: u16,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            canvas_width: 96,
            canvas_height: 640,
            sensor_max: 1024,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(rename = "SERVER", default)]
    pub server: ServerConfig,
    #[serde(rename = "PANEL", default)]
    pub panel: PanelConfig,
    #[serde(rename = "LOGGING", default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            panel: PanelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_file("config.ini")
    }

    pub fn get_log_level(&self) -> LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info, // Default to Info if invalid
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(
                File::with_name(config_path.to_str().unwrap_or(""))
                    .format(config::FileFormat::Ini),
            )
            .build()
            .context(format!(
                "Failed to load config from {}",
                config_path.display()
            ))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize config")?;

        Ok(app_config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_path = path.as_ref();

        let mut config_str = String::new();

        // SERVER section
        config_str.push_str(&format!(
            "[SERVER]\nurl = {}\nreconnect_delay_ms = {}\n\n",
            self.server.url, self.server.reconnect_delay_ms
        ));

        // PANEL section
        config_str.push_str(&format!(
            "[PANEL]\ncanvas_width = {}\ncanvas_height = {}\nsensor_max = {}\n\n",
            self.panel.canvas_width, self.panel.canvas_height, self.panel.sensor_max
        ));

        // LOGGING section
        config_str.push_str(&format!("[LOGGING]\nlevel = {}\n", self.logging.level));

        fs::write(config_path, config_str).context(format!(
            "Failed to save config to {}",
            config_path.display()
        ))?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.url, "ws://127.0.0.1:8069");
        assert_eq!(config.server.reconnect_delay_ms, 100);
        assert_eq!(config.panel.canvas_width, 96);
        assert_eq!(config.panel.canvas_height, 640);
        assert_eq!(config.panel.sensor_max, 1024);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = "[SERVER]\nurl = \"ws://dash.local:9000\"\nreconnect_delay_ms = 250\n\n[PANEL]\ncanvas_width = 128\ncanvas_height = 800\nsensor_max = 4096\n\n[LOGGING]\nlevel = \"debug\"\n";

        temp_file.write_all(config_content.as_bytes()).unwrap();
        let config_path = temp_file.path();

        let config = AppConfig::from_file(config_path).unwrap();

        assert_eq!(config.server.url, "ws://dash.local:9000");
        assert_eq!(config.server.reconnect_delay_ms, 250);
        assert_eq!(config.panel.canvas_width, 128);
        assert_eq!(config.panel.canvas_height, 800);
        assert_eq!(config.panel.sensor_max, 4096);
        assert_eq!(config.get_log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = "[SERVER]\nurl = \"ws://10.0.0.5:8069\"\nreconnect_delay_ms = 100\n";

        temp_file.write_all(config_content.as_bytes()).unwrap();
        let config = AppConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.server.url, "ws://10.0.0.5:8069");
        assert_eq!(config.panel.canvas_height, 640);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_config() {
        let mut config = AppConfig::default();
        config.server.url = "ws://saved:1234".to_string();
        config.server.reconnect_delay_ms = 500;
        config.panel.sensor_max = 2048;
        config.logging.level = "warn".to_string();

        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        config.save(config_path).unwrap();

        let loaded_config = AppConfig::from_file(config_path).unwrap();

        assert_eq!(loaded_config.server.url, "ws://saved:1234");
        assert_eq!(loaded_config.server.reconnect_delay_ms, 500);
        assert_eq!(loaded_config.panel.sensor_max, 2048);
        assert_eq!(loaded_config.get_log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_invalid_log_level_defaults_to_info() {
        let mut config = AppConfig::default();
        config.logging.level = "verbose".to_string();
        assert_eq!(config.get_log_level(), LevelFilter::Info);
    }
}
