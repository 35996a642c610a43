use std::path::{Path, PathBuf};

use anyhow::format_err;
use serde::Deserialize;

use crate::errors::*;

pub const CONFIG_ENV: &str = "MOBILENET_CLASSIFIER_CONFIG";
pub const CONFIG_FILE: &str = "mobilenet-classifier.toml";

/// Paths and graph bindings of a classification run.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: PathBuf,
    #[serde(default = "default_labels")]
    pub labels: PathBuf,
    #[serde(default = "default_input_node")]
    pub input_node: String,
    #[serde(default = "default_output_node")]
    pub output_node: String,
    #[serde(default = "default_input_side")]
    pub input_height: usize,
    #[serde(default = "default_input_side")]
    pub input_width: usize,
}

fn default_model() -> PathBuf {
    PathBuf::from("mobilenet_v2_1.4_224_frozen.pb")
}

fn default_labels() -> PathBuf {
    PathBuf::from("imagenet_labels.txt")
}

fn default_input_node() -> String {
    "input".to_string()
}

fn default_output_node() -> String {
    "MobilenetV2/Predictions/Reshape_1".to_string()
}

fn default_input_side() -> usize {
    224
}

impl Default for Config {
    fn default() -> Config {
        Config {
            model: default_model(),
            labels: default_labels(),
            input_node: default_input_node(),
            output_node: default_output_node(),
            input_height: default_input_side(),
            input_width: default_input_side(),
        }
    }
}

/// Names of the graph nodes a session feeds and fetches, and the spatial
/// size the input node expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeBinding {
    pub input: String,
    pub output: String,
    pub height: usize,
    pub width: usize,
}

impl Config {
    pub fn from_toml_str(text: &str) -> ClassifyResult<Config> {
        let config: Config =
            toml::from_str(text).kind(ErrorKind::Config, "Parsing Configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects input sizes that would produce an empty tensor.
    pub fn validate(&self) -> ClassifyResult<()> {
        if self.input_height == 0 || self.input_width == 0 {
            return Err(ClassifyError::new(
                ErrorKind::Config,
                "Parsing Configuration",
                format_err!(
                    "Input size must be positive, got {}x{}",
                    self.input_height,
                    self.input_width
                ),
            ));
        }
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> ClassifyResult<Config> {
        let text = fs_err::read_to_string(path.as_ref())
            .kind(ErrorKind::Config, "Reading Configuration File")?;
        Config::from_toml_str(&text)
    }

    /// Defaults, then the configuration file if any, then the process
    /// environment.
    pub fn from_env() -> ClassifyResult<Config> {
        let mut config = match config_path() {
            Some(path) => {
                log::info!("Reading configuration from {path:?}");
                Config::read(path)?
            }
            None => Config::default(),
        };
        config.override_with(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Applies `MOBILENET_*` overrides looked up through `var`.
    pub fn override_with(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(model) = var("MOBILENET_MODEL") {
            self.model = model.into();
        }
        if let Some(labels) = var("MOBILENET_LABELS") {
            self.labels = labels.into();
        }
        if let Some(input) = var("MOBILENET_INPUT_NODE") {
            self.input_node = input;
        }
        if let Some(output) = var("MOBILENET_OUTPUT_NODE") {
            self.output_node = output;
        }
    }

    pub fn binding(&self) -> NodeBinding {
        NodeBinding {
            input: self.input_node.clone(),
            output: self.output_node.clone(),
            height: self.input_height,
            width: self.input_width,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(c) = std::env::var(CONFIG_ENV) {
        Some(PathBuf::from(c))
    } else if Path::new(CONFIG_FILE).exists() {
        Some(PathBuf::from(CONFIG_FILE))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_target_mobilenet_v2() {
        let config = Config::default();
        assert_eq!(config.input_node, "input");
        assert_eq!(config.output_node, "MobilenetV2/Predictions/Reshape_1");
        assert_eq!((config.input_height, config.input_width), (224, 224));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            model = "/models/mobilenet.pb"
            output_node = "probs"
            "#,
        )
        .unwrap();
        assert_eq!(config.model, PathBuf::from("/models/mobilenet.pb"));
        assert_eq!(config.output_node, "probs");
        assert_eq!(config.labels, default_labels());
        assert_eq!(config.input_width, 224);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("modle = \"typo.pb\"").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
    }

    #[test]
    fn zero_input_sides_are_rejected() {
        let err = Config::from_toml_str("input_height = 0").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
        assert!(err.details().contains("0x224"));
        let err = Config::from_toml_str("input_width = 0").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
        assert!(Config::from_toml_str("input_height = 96\ninput_width = 128").is_ok());
    }

    #[test]
    fn zero_sized_file_is_rejected_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mobilenet-classifier.toml");
        std::fs::write(&path, "input_width = 0\n").unwrap();
        let err = Config::read(&path).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::read("/definitely/not/here.toml").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
        assert!(err.details().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn environment_overrides_file() {
        let env: HashMap<&str, &str> =
            [("MOBILENET_LABELS", "/tmp/labels.txt"), ("MOBILENET_INPUT_NODE", "image")].into();
        let mut config = Config::from_toml_str("labels = \"from_file.txt\"").unwrap();
        config.override_with(|name| env.get(name).map(|s| s.to_string()));
        assert_eq!(config.labels, PathBuf::from("/tmp/labels.txt"));
        assert_eq!(config.input_node, "image");
        assert_eq!(config.model, default_model());
        let binding = config.binding();
        assert_eq!(binding.input, "image");
        assert_eq!(binding.output, default_output_node());
    }
}
