//! Configuration for cmodel conversions.
//!
//! The defaults live in `defaults/cmodel.default.toml` and are compiled in. [`Loader`] stacks
//! user files and flag overrides on them; [`ConversionConfig::editor_context`] turns the result
//! into the editor context a conversion starts from.

use cmodel_dom::format::SegmentFormat;
use cmodel_dom::{DarkColorRegistry, EditorContext};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

const DEFAULT_TOML: &str = include_str!("../defaults/cmodel.default.toml");

/// Top-level configuration consumed by cmodel applications.
#[derive(Debug, Clone, Deserialize)]
pub struct CmodelConfig {
    pub conversion: ConversionConfig,
    pub output: OutputConfig,
    pub log: LogConfig,
}

/// Editor settings every conversion starts from.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    pub dark_mode: bool,
    pub default_format: DefaultFormatConfig,
}

/// Segment format text gets when nothing else applies. Empty strings are unset.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultFormatConfig {
    pub font_family: String,
    pub font_size: String,
    pub text_color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl From<&DefaultFormatConfig> for SegmentFormat {
    fn from(config: &DefaultFormatConfig) -> Self {
        let mut format = SegmentFormat::default();
        format.font_family.font_family = non_empty(&config.font_family);
        format.font_size.font_size = non_empty(&config.font_size);
        format.text_color.text_color = non_empty(&config.text_color);
        format
    }
}

impl ConversionConfig {
    /// Editor context for one conversion. Dark mode gets a fresh in-memory color registry.
    pub fn editor_context(&self) -> EditorContext {
        let context = EditorContext::new().with_default_format((&self.default_format).into());
        if self.dark_mode {
            context.with_dark_mode(Rc::new(RefCell::new(DarkColorRegistry::default())))
        } else {
            context
        }
    }
}

/// Layers `cmodel.toml` files and CLI flags over the embedded defaults.
///
/// Later layers win. Every method consumes the loader so calls chain from [`Loader::new`].
#[derive(Debug, Clone)]
pub struct Loader {
    layers: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            layers: Config::builder().add_source(defaults),
        }
    }

    fn layer_toml(self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        Self {
            layers: self.layers.add_source(file),
        }
    }

    /// Adds a file that must exist; [`Loader::build`] fails otherwise.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_toml(path.as_ref(), true)
    }

    /// Adds a file that is skipped when absent, such as `cmodel.toml` in the working directory.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer_toml(path.as_ref(), false)
    }

    /// Sets one dotted key (`conversion.dark_mode`) above every file layer.
    pub fn set_override<V>(self, key: &str, value: V) -> Result<Self, ConfigError>
    where
        V: Into<ValueKind>,
    {
        let layers = self.layers.set_override(key, value)?;
        Ok(Self { layers })
    }

    /// Forces dark mode on. Leaves the file layers alone when `enabled` is false.
    pub fn with_dark_mode(self, enabled: bool) -> Result<Self, ConfigError> {
        if enabled {
            self.set_override("conversion.dark_mode", true)
        } else {
            Ok(self)
        }
    }

    pub fn build(self) -> Result<CmodelConfig, ConfigError> {
        let merged = self.layers.build()?;
        merged.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults with nothing layered on top.
pub fn load_defaults() -> Result<CmodelConfig, ConfigError> {
    Loader::default().build()
}
