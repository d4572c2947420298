//! Settings for a compilation run.
use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;

use crate::def::{DEFAULT_BLOCK_SIZES, MAX_CODEPOINT};

/// Optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "ucd_compiler.toml";

trait Validatable {
  fn validate(&self) -> Result<(), ConfigError>;
}

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
  /// Directory holding the Unicode data files.
  pub tables_dir: PathBuf,
  /// Artifact receiving the compiled tables.
  pub tables_output: PathBuf,
  /// Artifact receiving the property value enumerations.
  pub properties_output: PathBuf,
  /// Size of the codepoint domain.
  pub max_codepoint: u32,
  /// Candidate block sizes tried by the two stage compressor.
  pub block_sizes: Vec<usize>,
  /// Whether candidate block sizes are compressed on worker threads.
  pub parallel_search: bool,
}

impl Validatable for Settings {
  fn validate(&self) -> Result<(), ConfigError> {
    if self.block_sizes.is_empty() {
      return Err(ConfigError::Message("block_sizes must not be empty".to_owned()));
    }
    if let Some(size) = self.block_sizes.iter().find(|size| !size.is_power_of_two()) {
      return Err(ConfigError::Message(format!("block size {} is not a power of two", size)));
    }
    let smallest = self.block_sizes.iter().copied().min().unwrap_or(1);
    if self.max_codepoint == 0 || self.max_codepoint as usize % smallest != 0 {
      return Err(ConfigError::Message(format!(
        "max_codepoint {:#x} must be a non zero multiple of {}",
        self.max_codepoint, smallest
      )));
    }
    return Ok(());
  }
}

impl Settings {
  /// Layers the built-in defaults, the settings file and `UCD_COMPILER_*`
  /// environment variables, in that order.
  pub fn new(config_path: Option<&Path>) -> Result<Self, ConfigError> {
    let env = Environment::with_prefix("UCD_COMPILER")
      .prefix_separator("_")
      .separator("__")
      .list_separator(",")
      .try_parsing(true)
      .with_list_parse_key("block_sizes");

    let mut cfg_builder = Config::builder();
    cfg_builder = cfg_builder.set_default("tables_dir", "Unicode.tables")?;
    cfg_builder = cfg_builder.set_default("tables_output", "ucd_tables.rs")?;
    cfg_builder = cfg_builder.set_default("properties_output", "ucd_properties.rs")?;
    cfg_builder = cfg_builder.set_default("max_codepoint", MAX_CODEPOINT as i64)?;
    cfg_builder = cfg_builder.set_default(
      "block_sizes",
      DEFAULT_BLOCK_SIZES.iter().map(|size| *size as i64).collect::<Vec<i64>>(),
    )?;
    cfg_builder = cfg_builder.set_default("parallel_search", true)?;

    cfg_builder = match config_path {
      Some(path) => cfg_builder.add_source(File::from(path)),
      None => cfg_builder.add_source(File::new(CONFIG_FILE, FileFormat::Toml).required(false)),
    };
    cfg_builder = cfg_builder.add_source(env);

    let cfg = cfg_builder.build()?;
    let settings: Settings = cfg.try_deserialize()?;
    settings.validate()?;
    return Ok(settings);
  }

  /// Settings for an in-memory run over `tables_dir`, without consulting
  /// files or the environment.
  pub fn with_tables_dir(tables_dir: impl Into<PathBuf>) -> Self {
    let tables_dir = tables_dir.into();
    return Settings {
      tables_output: tables_dir.join("ucd_tables.rs"),
      properties_output: tables_dir.join("ucd_properties.rs"),
      tables_dir,
      max_codepoint: MAX_CODEPOINT,
      block_sizes: DEFAULT_BLOCK_SIZES.to_vec(),
      parallel_search: true,
    };
  }
}
