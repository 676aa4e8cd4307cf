use serde_derive::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct GeneratorConfig {
    pub source: SourceConfig,

    #[serde(default)]
    pub output: OutputOptions,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SourceConfig {
    pub directory: String,

    #[serde(default)]
    pub quiet: bool,

    #[serde(default)]
    pub recursion_limit: Option<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OutputOptions {
    pub pairs: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self { pairs: 10 }
    }
}

pub enum ConfigReadError {
    ReadError(std::io::Error),
    ParseError(toml::de::Error),
}

pub fn load_config<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<GeneratorConfig, ConfigReadError> {
    let config = std::fs::read_to_string(path).map_err(ConfigReadError::ReadError)?;

    toml::from_str::<GeneratorConfig>(&config).map_err(ConfigReadError::ParseError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: GeneratorConfig = toml::from_str(
            r#"
            [source]
            directory = "rules"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.directory, "rules");
        assert!(!config.source.quiet);
        assert_eq!(config.source.recursion_limit, None);
        assert_eq!(config.output.pairs, 10);
    }

    #[test]
    fn full_config_round_trips() {
        let config: GeneratorConfig = toml::from_str(
            r#"
            [source]
            directory = "rules"
            quiet = true
            recursion_limit = 64

            [output]
            pairs = 100
            "#,
        )
        .unwrap();

        assert!(config.source.quiet);
        assert_eq!(config.source.recursion_limit, Some(64));
        assert_eq!(config.output.pairs, 100);
    }
}
