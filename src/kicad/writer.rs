//! `.kicad_mod` text writer.
//!
//! Pads are rendered one per line in the order KiCad expects:
//!
//! ```text
//! (pad {id} {smd|thru_hole} {rect|circle} (at x y) (size w h) [(drill d)] (layers ...))
//! ```
//!
//! [`FootprintDocument`] wraps the pads with the header, description, tags,
//! reference/value text, outline and 3D model link.

use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::{KicadError, KicadResult};
use super::sexp::escape;
use crate::config::StyleConfig;
use crate::footprint::{format_mm, naming, ConnectorSpec, MountType, PadRecord, Point};

/// File format version written into the footprint header.
pub const FORMAT_VERSION: u32 = 20_221_018;

/// Generator name written into the footprint header.
pub const GENERATOR: &str = "ltek_footprint";

/// Default 3D model directory variable.
pub const DEFAULT_MODEL_DIR: &str = "${KICAD6_3DMODEL_DIR}/Connector_Harwin.3dshapes";

/// Renders a single pad line.
#[must_use]
pub fn pad_line(pad: &PadRecord) -> String {
    let mut line = format!(
        "(pad {id} {mount} {shape} (at {x} {y}) (size {w} {h})",
        id = pad.id,
        mount = pad.mount_type.token(),
        shape = pad.shape.token(),
        x = format_mm(pad.position.x),
        y = format_mm(pad.position.y),
        w = format_mm(pad.size.width),
        h = format_mm(pad.size.height),
    );
    if let Some(drill) = pad.drill {
        let _ = write!(line, " (drill {})", format_mm(drill));
    }
    let _ = write!(line, " (layers {}))", pad.layers.layer_names().join(" "));
    line
}

/// Axis-aligned rectangle in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum X (mm).
    pub min_x: f64,
    /// Minimum Y (mm).
    pub min_y: f64,
    /// Maximum X (mm).
    pub max_x: f64,
    /// Maximum Y (mm).
    pub max_y: f64,
}

impl Bounds {
    /// Returns the smallest rectangle containing every pad's copper.
    ///
    /// Returns `None` for an empty pad list.
    #[must_use]
    pub fn of_pads(pads: &[PadRecord]) -> Option<Self> {
        pads.iter()
            .map(|pad| {
                let half_w = pad.size.width / 2.0;
                let half_h = pad.size.height / 2.0;
                Self {
                    min_x: pad.position.x - half_w,
                    min_y: pad.position.y - half_h,
                    max_x: pad.position.x + half_w,
                    max_y: pad.position.y + half_h,
                }
            })
            .reduce(|a, b| Self {
                min_x: a.min_x.min(b.min_x),
                min_y: a.min_y.min(b.min_y),
                max_x: a.max_x.max(b.max_x),
                max_y: a.max_y.max(b.max_y),
            })
    }

    /// Grows the rectangle by `margin` on every side.
    #[must_use]
    pub fn expand(self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Snaps the rectangle outwards onto a grid.
    #[must_use]
    pub fn snap_outwards(self, grid: f64) -> Self {
        Self {
            min_x: (self.min_x / grid).floor() * grid,
            min_y: (self.min_y / grid).floor() * grid,
            max_x: (self.max_x / grid).ceil() * grid,
            max_y: (self.max_y / grid).ceil() * grid,
        }
    }

    /// Returns the centre point.
    #[must_use]
    pub fn centre(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Courtyard grid in mm.
const COURTYARD_GRID: f64 = 0.05;

/// Silkscreen and courtyard outlines around the pads.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    /// Silkscreen rectangle.
    pub silkscreen: Bounds,
    /// Silkscreen line width (mm).
    pub silkscreen_width: f64,
    /// Courtyard rectangle.
    pub courtyard: Bounds,
    /// Courtyard line width (mm).
    pub courtyard_width: f64,
}

impl Outline {
    /// Computes the outline around a pad list.
    #[must_use]
    pub fn around(pads: &[PadRecord], style: &StyleConfig) -> Option<Self> {
        let copper = Bounds::of_pads(pads)?;
        Some(Self {
            silkscreen: copper.expand(style.silkscreen_clearance + style.silkscreen_line_width / 2.0),
            silkscreen_width: style.silkscreen_line_width,
            courtyard: copper
                .expand(style.courtyard_margin)
                .snap_outwards(COURTYARD_GRID),
            courtyard_width: style.courtyard_line_width,
        })
    }
}

/// A complete footprint ready to be rendered as `.kicad_mod` text.
#[derive(Debug, Clone)]
pub struct FootprintDocument {
    /// Footprint name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Space-separated keywords.
    pub tags: String,
    /// Placement attribute.
    pub attribute: MountType,
    /// Pads in emission order.
    pub pads: Vec<PadRecord>,
    /// Outline, absent when there are no pads.
    pub outline: Option<Outline>,
    /// 3D model path, if any.
    pub model: Option<String>,
}

impl FootprintDocument {
    /// Assembles a document for a laid-out connector.
    #[must_use]
    pub fn new(
        spec: &ConnectorSpec,
        pads: Vec<PadRecord>,
        style: &StyleConfig,
        model_dir: Option<&str>,
    ) -> Self {
        let name = naming::spec_name(spec);
        let outline = Outline::around(&pads, style);
        let model = model_dir.map(|dir| format!("{}/{name}.wrl", dir.trim_end_matches('/')));
        let attribute = if spec.is_surface_mount() {
            MountType::SurfaceMount
        } else {
            MountType::ThroughHole
        };

        Self {
            description: naming::description(spec),
            tags: naming::tags(spec),
            name,
            attribute,
            pads,
            outline,
            model,
        }
    }

    /// Renders the `.kicad_mod` text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "(footprint \"{}\"", escape(&self.name));
        let _ = writeln!(out, "  (version {FORMAT_VERSION})");
        let _ = writeln!(out, "  (generator {GENERATOR})");
        out.push_str("  (layer \"F.Cu\")\n");
        let _ = writeln!(out, "  (descr \"{}\")", escape(&self.description));
        let _ = writeln!(out, "  (tags \"{}\")", escape(&self.tags));
        let _ = writeln!(out, "  (attr {})", self.attribute.attribute_token());

        self.render_text(&mut out);

        if let Some(outline) = &self.outline {
            render_rect(&mut out, &outline.silkscreen, outline.silkscreen_width, "F.SilkS");
            render_rect(&mut out, &outline.courtyard, outline.courtyard_width, "F.CrtYd");
        }

        for pad in &self.pads {
            let _ = writeln!(out, "  {}", pad_line(pad));
        }

        if let Some(model) = &self.model {
            let _ = writeln!(out, "  (model \"{}\"", escape(model));
            out.push_str("    (offset (xyz 0 0 0))\n");
            out.push_str("    (scale (xyz 1 1 1))\n");
            out.push_str("    (rotate (xyz 0 0 0))\n");
            out.push_str("  )\n");
        }

        out.push_str(")\n");
        out
    }

    fn render_text(&self, out: &mut String) {
        let (centre, above, below) = self.outline.as_ref().map_or((Point::default(), -3.0, 3.0), |o| {
            (
                o.silkscreen.centre(),
                o.courtyard.min_y - 1.0,
                o.courtyard.max_y + 1.0,
            )
        });
        let x = format_mm(centre.x);

        let _ = writeln!(
            out,
            "  (fp_text reference \"REF**\" (at {x} {}) (layer \"F.SilkS\")",
            format_mm(above)
        );
        out.push_str("    (effects (font (size 1 1) (thickness 0.15)))\n  )\n");
        let _ = writeln!(
            out,
            "  (fp_text value \"{}\" (at {x} {}) (layer \"F.Fab\")",
            escape(&self.name),
            format_mm(below)
        );
        out.push_str("    (effects (font (size 1 1) (thickness 0.15)))\n  )\n");
    }
}

fn render_rect(out: &mut String, rect: &Bounds, width: f64, layer: &str) {
    let _ = writeln!(
        out,
        "  (fp_rect (start {} {}) (end {} {}) (stroke (width {}) (type solid)) (fill none) (layer \"{layer}\"))",
        format_mm(rect.min_x),
        format_mm(rect.min_y),
        format_mm(rect.max_x),
        format_mm(rect.max_y),
        format_mm(width),
    );
}

/// Returns the `.kicad_mod` path for a footprint name inside `dir`.
#[must_use]
pub fn footprint_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.kicad_mod"))
}

/// Writes footprint text to disk.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the file exists and `overwrite` is `false`, or if
/// the directory or file cannot be written.
pub fn write_footprint_file(path: &Path, contents: &str, overwrite: bool) -> KicadResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| KicadError::file_write(parent, e))?;
    }

    debug!(path = %path.display(), bytes = contents.len(), overwrite, "Writing footprint");
    if overwrite {
        fs::write(path, contents).map_err(|e| KicadError::file_write(path, e))?;
    } else {
        // `create_new` fails atomically if the file appeared in the meantime.
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => KicadError::AlreadyExists {
                    path: path.to_path_buf(),
                },
                _ => KicadError::file_write(path, e),
            })?;
        file.write_all(contents.as_bytes())
            .map_err(|e| KicadError::file_write(path, e))?;
    }
    info!(path = %path.display(), "Footprint written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::{compute_pads, PadId, PadShape, Size};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn through_hole_pad_line() {
        let pad = PadRecord::through_hole(
            PadId::Number(1),
            PadShape::Rectangle,
            Point::new(0.0, 0.0),
            Size::new(1.35, 1.35),
            0.8,
        );
        assert_eq!(
            pad_line(&pad),
            "(pad 1 thru_hole rect (at 0 0) (size 1.35 1.35) (drill 0.8) (layers *.Cu *.Mask))"
        );
    }

    #[test]
    fn smd_pad_line_has_no_drill() {
        let pad = PadRecord::smd(3, Point::new(0.0, 2.0), Size::new(1.0, 3.2));
        assert_eq!(
            pad_line(&pad),
            "(pad 3 smd rect (at 0 2) (size 1 3.2) (layers F.Cu F.Paste F.Mask))"
        );
    }

    #[test]
    fn anonymous_pad_line() {
        let pad = PadRecord::through_hole(
            PadId::Anonymous,
            PadShape::Circle,
            Point::new(-2.25, -2.375),
            Size::new(1.5, 1.5),
            0.95,
        );
        assert!(pad_line(&pad).starts_with("(pad \"\" thru_hole circle (at -2.25 -2.375)"));
    }

    #[test]
    fn bounds_cover_all_pads() {
        let spec = ConnectorSpec::builder().pins(3).build().unwrap();
        let pads = compute_pads(&spec).unwrap();
        let bounds = Bounds::of_pads(&pads).unwrap();

        assert!(approx_eq(bounds.min_x, -3.0));
        assert!(approx_eq(bounds.max_x, 7.0));
        assert!(approx_eq(bounds.min_y, -3.125));
        assert!(approx_eq(bounds.max_y, 3.125));
        assert!(Bounds::of_pads(&[]).is_none());
    }

    #[test]
    fn courtyard_snaps_to_grid() {
        let spec = ConnectorSpec::builder().pins(2).strain_relief(false).build().unwrap();
        let pads = compute_pads(&spec).unwrap();
        let outline = Outline::around(&pads, &StyleConfig::default()).unwrap();

        // Copper spans -0.675..2.675, plus 0.25 margin.
        assert!(approx_eq(outline.courtyard.min_x, -0.95));
        assert!(approx_eq(outline.courtyard.max_x, 2.95));
        assert!(outline.silkscreen.min_x < -0.675);
    }

    #[test]
    fn document_contains_all_sections() {
        let spec = ConnectorSpec::builder().pins(4).rows(2).build().unwrap();
        let pads = compute_pads(&spec).unwrap();
        let pad_count = pads.len();
        let doc = FootprintDocument::new(&spec, pads, &StyleConfig::default(), Some(DEFAULT_MODEL_DIR));
        let text = doc.render();

        assert!(text.starts_with("(footprint \"Harwin_LTek-Male_4\""));
        assert!(text.contains("(attr through_hole)"));
        assert!(!text.contains("(attr thru_hole)"));
        assert!(text.contains("(descr \"Harwin LTek male connector, 4 pins"));
        assert!(text.contains("(layer \"F.CrtYd\")"));
        assert!(text.contains("Connector_Harwin.3dshapes/Harwin_LTek-Male_4.wrl"));
        assert_eq!(text.matches("\n  (pad ").count(), pad_count);
        assert!(text.ends_with(")\n"));
    }

    #[test]
    fn write_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = footprint_path(dir.path(), "Harwin_LTek-Male_2");

        write_footprint_file(&path, "first", false).unwrap();
        let err = write_footprint_file(&path, "second", false).unwrap_err();
        assert!(matches!(err, KicadError::AlreadyExists { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");

        write_footprint_file(&path, "second", true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn overwrite_replaces_longer_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = footprint_path(dir.path(), "Harwin_LTek-Male_2");

        write_footprint_file(&path, "a much longer first footprint", false).unwrap();
        write_footprint_file(&path, "short", true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn existing_file_is_reported_not_clobbered() {
        let dir = tempfile::tempdir().unwrap();
        let path = footprint_path(dir.path(), "Harwin_LTek-Male_4");
        std::fs::write(&path, "hand edited").unwrap();

        let err = write_footprint_file(&path, "generated", false).unwrap_err();
        assert!(matches!(err, KicadError::AlreadyExists { path: ref p } if p == &path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hand edited");
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = footprint_path(&dir.path().join("Connector_Harwin.pretty"), "X");
        write_footprint_file(&path, "(footprint \"X\")\n", false).unwrap();
        assert!(path.exists());
    }
}
