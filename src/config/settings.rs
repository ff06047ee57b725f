//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::footprint::{ConnectorSpec, ConnectorSpecBuilder, PadDimensions, RowTwoPlacement};
use crate::kicad::writer::DEFAULT_MODEL_DIR;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Pad dimensions.
    #[serde(default)]
    pub pads: PadsConfig,

    /// Layout defaults.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Style settings.
    #[serde(default)]
    pub style: StyleConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Returns a connector builder seeded with the configured pad
    /// dimensions and layout defaults.
    #[must_use]
    pub fn spec_builder(&self) -> ConnectorSpecBuilder {
        ConnectorSpec::builder()
            .pitch(self.layout.pitch)
            .row_two(self.layout.row_two)
            .through_hole_pad(self.pads.through_hole)
            .smd_pad(self.pads.smd)
            .strain_relief_pad(self.pads.strain_relief)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spec_builder()
            .build()
            .map_err(|e| ConfigError::ValidationError {
                message: e.to_string(),
            })?;

        let style = [
            ("silkscreen_line_width", self.style.silkscreen_line_width),
            ("courtyard_line_width", self.style.courtyard_line_width),
        ];
        for (name, value) in style {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValidationError {
                    message: format!("style.{name} must be a positive number, got {value}"),
                });
            }
        }

        let margins = [
            ("silkscreen_clearance", self.style.silkscreen_clearance),
            ("courtyard_margin", self.style.courtyard_margin),
        ];
        for (name, value) in margins {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::ValidationError {
                    message: format!("style.{name} must not be negative, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Pad dimensions for each pad kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PadsConfig {
    /// Through-hole pins. Default: 1.35 x 1.35 mm, 0.8 mm drill.
    #[serde(default = "PadDimensions::default_through_hole")]
    pub through_hole: PadDimensions,

    /// SMD pads. Default: 1.00 x 3.20 mm.
    #[serde(default = "PadDimensions::default_smd")]
    pub smd: PadDimensions,

    /// Strain-relief clips. Default: 1.5 x 1.5 mm, 0.95 mm drill.
    #[serde(default = "PadDimensions::default_strain_relief")]
    pub strain_relief: PadDimensions,
}

impl Default for PadsConfig {
    fn default() -> Self {
        Self {
            through_hole: PadDimensions::default_through_hole(),
            smd: PadDimensions::default_smd(),
            strain_relief: PadDimensions::default_strain_relief(),
        }
    }
}

/// Layout defaults applied when the command line does not override them.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Pin pitch in mm.
    /// Default: 2.00
    #[serde(default = "default_pitch")]
    pub pitch: f64,

    /// Second-row placement: "reference" or "aligned".
    #[serde(default)]
    pub row_two: RowTwoPlacement,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pitch: default_pitch(),
            row_two: RowTwoPlacement::default(),
        }
    }
}

const fn default_pitch() -> f64 {
    crate::footprint::spec::DEFAULT_PITCH
}

/// Output file settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory footprints are written to (usually a `.pretty` folder).
    /// Default: current directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// 3D model directory used in the model link. `null` omits the link.
    #[serde(default = "default_model_dir")]
    pub model_dir: Option<String>,

    /// Replace existing footprint files.
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            model_dir: default_model_dir(),
            overwrite: false,
        }
    }
}

fn default_model_dir() -> Option<String> {
    Some(DEFAULT_MODEL_DIR.to_string())
}

/// Outline style for generated footprints.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Silkscreen line width in mm.
    #[serde(default = "default_silkscreen_width")]
    pub silkscreen_line_width: f64,

    /// Gap between copper and silkscreen in mm.
    #[serde(default = "default_silkscreen_clearance")]
    pub silkscreen_clearance: f64,

    /// Courtyard line width in mm.
    #[serde(default = "default_courtyard_width")]
    pub courtyard_line_width: f64,

    /// Courtyard margin in mm (added around the copper).
    #[serde(default = "default_courtyard_margin")]
    pub courtyard_margin: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            silkscreen_line_width: default_silkscreen_width(),
            silkscreen_clearance: default_silkscreen_clearance(),
            courtyard_line_width: default_courtyard_width(),
            courtyard_margin: default_courtyard_margin(),
        }
    }
}

const fn default_silkscreen_width() -> f64 {
    0.12
}

const fn default_silkscreen_clearance() -> f64 {
    0.2
}

const fn default_courtyard_width() -> f64 {
    0.05
}

const fn default_courtyard_margin() -> f64 {
    0.25
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
