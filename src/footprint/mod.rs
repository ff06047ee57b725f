//! Pad layout for Harwin LTek connector footprints.
//!
//! This module turns a small set of connector parameters into the ordered
//! list of pads that make up a footprint:
//!
//! - [`spec`] — The immutable [`ConnectorSpec`] and its builder
//! - [`layout`] — The pad layout engine ([`compute_pads`])
//! - [`naming`] — Part names, descriptions and keyword tags
//! - [`error`] — Layout error types
//!
//! Pin 1 always sits at the footprint origin. Row one runs along +X, row two
//! sits one pitch along +Y.
//!
//! # Example
//!
//! ```
//! use ltek_footprint::footprint::{compute_pads, ConnectorSpec, PadId};
//!
//! let spec = ConnectorSpec::builder().pins(4).strain_relief(false).build()?;
//! let pads = compute_pads(&spec)?;
//!
//! assert_eq!(pads.len(), 4);
//! assert_eq!(pads[0].id, PadId::Number(1));
//! # Ok::<(), ltek_footprint::footprint::LayoutError>(())
//! ```

pub mod error;
pub mod layout;
pub mod naming;
pub mod spec;

pub use error::{LayoutError, LayoutResult};
pub use layout::compute_pads;
pub use spec::{ConnectorSpec, ConnectorSpecBuilder, PadDimensions, RowCount, RowTwoPlacement};

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a pad is attached to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountType {
    /// Surface mount pad on the top copper.
    SurfaceMount,
    /// Plated through-hole pin.
    ThroughHole,
}

impl MountType {
    /// Returns the KiCad pad type token.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::SurfaceMount => "smd",
            Self::ThroughHole => "thru_hole",
        }
    }

    /// Returns the KiCad footprint `attr` token.
    ///
    /// Footprint attributes spell through-hole out in full, unlike pad types.
    #[must_use]
    pub const fn attribute_token(self) -> &'static str {
        match self {
            Self::SurfaceMount => "smd",
            Self::ThroughHole => "through_hole",
        }
    }

    /// Parses a KiCad pad type token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "smd" => Some(Self::SurfaceMount),
            "thru_hole" => Some(Self::ThroughHole),
            _ => None,
        }
    }
}

/// Copper shape of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadShape {
    /// Rectangular pad.
    Rectangle,
    /// Circular pad.
    Circle,
}

impl PadShape {
    /// Returns the KiCad pad shape token.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Rectangle => "rect",
            Self::Circle => "circle",
        }
    }

    /// Parses a KiCad pad shape token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "rect" => Some(Self::Rectangle),
            "circle" => Some(Self::Circle),
            _ => None,
        }
    }
}

/// The set of board layers a pad lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSet {
    /// Front copper, paste and mask.
    SurfaceMountCopperStack,
    /// All copper layers and both masks.
    ThroughHoleCopperStack,
}

impl LayerSet {
    /// Returns the layer set that goes with a mount type.
    #[must_use]
    pub const fn for_mount(mount_type: MountType) -> Self {
        match mount_type {
            MountType::SurfaceMount => Self::SurfaceMountCopperStack,
            MountType::ThroughHole => Self::ThroughHoleCopperStack,
        }
    }

    /// Returns the KiCad layer names in this set.
    #[must_use]
    pub const fn layer_names(self) -> &'static [&'static str] {
        match self {
            Self::SurfaceMountCopperStack => &["F.Cu", "F.Paste", "F.Mask"],
            Self::ThroughHoleCopperStack => &["*.Cu", "*.Mask"],
        }
    }

    /// Finds the layer set matching a list of KiCad layer names.
    #[must_use]
    pub fn from_layer_names<S: AsRef<str>>(names: &[S]) -> Option<Self> {
        [Self::SurfaceMountCopperStack, Self::ThroughHoleCopperStack]
            .into_iter()
            .find(|set| {
                let expected = set.layer_names();
                expected.len() == names.len()
                    && expected.iter().zip(names).all(|(e, n)| *e == n.as_ref())
            })
    }
}

/// Pad designator.
///
/// Strain-relief holes are mechanical only and carry no number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadId {
    /// Electrically numbered pad (1-based).
    Number(u32),
    /// Unnumbered mounting pad.
    Anonymous,
}

impl PadId {
    /// Returns the pad number, if any.
    #[must_use]
    pub const fn number(self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(n),
            Self::Anonymous => None,
        }
    }

    /// Returns `true` for unnumbered pads.
    #[must_use]
    pub const fn is_anonymous(self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl fmt::Display for PadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Anonymous => write!(f, "\"\""),
        }
    }
}

/// Formats a length in mm with at most 6 decimals and no trailing zeros.
///
/// # Examples
///
/// ```
/// use ltek_footprint::footprint::format_mm;
///
/// assert_eq!(format_mm(2.0), "2");
/// assert_eq!(format_mm(-2.375), "-2.375");
/// assert_eq!(format_mm(0.1 + 0.2), "0.3");
/// ```
#[must_use]
pub fn format_mm(value: f64) -> String {
    let mut s = format!("{value:.6}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// A 2D point in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pad size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Size along X (mm).
    pub width: f64,
    /// Size along Y (mm).
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One pad of a generated footprint.
///
/// Fields are declared in the order KiCad writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadRecord {
    /// Pad designator.
    pub id: PadId,

    /// SMD or through-hole.
    pub mount_type: MountType,

    /// Copper shape.
    pub shape: PadShape,

    /// Pad centre (mm).
    pub position: Point,

    /// Copper size (mm).
    pub size: Size,

    /// Drill diameter (mm). `None` for SMD pads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drill: Option<f64>,

    /// Layers the pad is placed on.
    pub layers: LayerSet,
}

impl PadRecord {
    /// Creates a numbered SMD pad.
    #[must_use]
    pub const fn smd(number: u32, position: Point, size: Size) -> Self {
        Self {
            id: PadId::Number(number),
            mount_type: MountType::SurfaceMount,
            shape: PadShape::Rectangle,
            position,
            size,
            drill: None,
            layers: LayerSet::for_mount(MountType::SurfaceMount),
        }
    }

    /// Creates a through-hole pad.
    #[must_use]
    pub const fn through_hole(
        id: PadId,
        shape: PadShape,
        position: Point,
        size: Size,
        drill: f64,
    ) -> Self {
        Self {
            id,
            mount_type: MountType::ThroughHole,
            shape,
            position,
            size,
            drill: Some(drill),
            layers: LayerSet::for_mount(MountType::ThroughHole),
        }
    }
}
