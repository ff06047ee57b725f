//! ltek-footprint: KiCad footprint generator for Harwin LTek connectors
//!
//! Given a pin count, row count, pitch and mount style, this library lays
//! out every pad of the connector and renders the result as `.kicad_mod`
//! footprint text.
//!
//! # Architecture
//!
//! Pad layout is a pure function over an immutable [`footprint::ConnectorSpec`].
//! Text rendering and file output are separate steps that consume the
//! resulting [`footprint::PadRecord`] list.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Error types
//! - [`footprint`] — Connector parameters and pad layout
//! - [`kicad`] — `.kicad_mod` writing and reading

pub mod config;
pub mod error;
pub mod footprint;
pub mod kicad;

pub use error::Error;

use footprint::{compute_pads, ConnectorSpec};
use kicad::FootprintDocument;

/// Lays out a connector and assembles its footprint document.
///
/// # Errors
///
/// Returns an error if the connector cannot be laid out.
pub fn generate(spec: &ConnectorSpec, cfg: &config::Config) -> Result<FootprintDocument, Error> {
    let pads = compute_pads(spec)?;
    Ok(FootprintDocument::new(
        spec,
        pads,
        &cfg.style,
        cfg.output.model_dir.as_deref(),
    ))
}
