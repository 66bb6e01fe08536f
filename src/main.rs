mod data;
mod errors;
mod etl;
mod shape;

use std::env;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use serde::Deserialize;
use structured_logger::json::new_writer;
use structured_logger::Builder;

use crate::errors::{Error, ErrorKind, Result};
use crate::etl::osm_to_json::OsmToJsonEtl;
use crate::etl::Etl;

const DEFAULT_CONFIG_PATH: &str = "config.json";

fn default_skip_invalid_elements() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct UserConfig {
    pub data_path: String,
    /// Defaults to `<data_path>.json`.
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub pretty: bool,
    /// Rebuild even if the output file already exists.
    #[serde(default)]
    pub force: bool,
    #[serde(default = "default_skip_invalid_elements")]
    pub skip_invalid_elements: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl UserConfig {
    pub fn output_path(&self) -> PathBuf {
        match &self.output_path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(format!("{}.json", self.data_path)),
        }
    }
}

fn load_user_config(path: &str) -> Result<UserConfig> {
    let file = File::open(path).map_err(|err| {
        Error::new(ErrorKind::Config, format!("Could not open config file {path}: {err}"))
    })?;
    serde_json::from_reader(file).map_err(|err| {
        Error::new(ErrorKind::Config, format!("Could not parse config {path}: {err}"))
    })
}

fn setup_logging(level: &str) {
    Builder::with_level(level)
        .with_target_writer("*", new_writer(io::stdout()))
        .init();
}

fn main() -> Result<()> {
    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let user_config = load_user_config(&config_path)?;
    setup_logging(&user_config.log_level);

    let mut etl = OsmToJsonEtl::new(&user_config);
    if user_config.force {
        etl.clean()?;
    }
    etl.process()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn config_defaults() {
        let config: UserConfig = serde_json::from_str(r#"{"data_path": "kyoto_japan.osm"}"#).unwrap();
        assert!(!config.pretty);
        assert!(!config.force);
        assert!(config.skip_invalid_elements);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.output_path(), PathBuf::from("kyoto_japan.osm.json"));
    }

    #[test]
    fn explicit_output_path() {
        let config: UserConfig = serde_json::from_str(
            r#"{"data_path": "kyoto_japan.osm.xz", "output_path": "out/kyoto.json", "pretty": true}"#
        ).unwrap();
        assert!(config.pretty);
        assert_eq!(config.output_path(), PathBuf::from("out/kyoto.json"));
    }

    #[test]
    fn config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = load_user_config(missing.to_str().unwrap()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{\"pretty\": true}").unwrap();
        let err = load_user_config(broken.to_str().unwrap()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
    }
}
