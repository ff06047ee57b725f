//! Connector parameters.
//!
//! A [`ConnectorSpec`] is built once per footprint through
//! [`ConnectorSpecBuilder`], which supplies the Harwin LTek defaults for
//! anything left unset. Built specs cannot be modified.

use serde::{Deserialize, Serialize};

use super::error::{LayoutError, LayoutResult};

/// Default number of pins.
pub const DEFAULT_PINS: u32 = 2;

/// Default pin pitch in mm.
pub const DEFAULT_PITCH: f64 = 2.00;

/// Copper and drill dimensions for one kind of pad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PadDimensions {
    /// Pad width in mm.
    pub width: f64,

    /// Pad height in mm.
    pub height: f64,

    /// Drill diameter in mm. `None` for SMD pads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drill: Option<f64>,
}

impl PadDimensions {
    /// Creates through-hole pad dimensions.
    #[must_use]
    pub const fn through_hole(width: f64, height: f64, drill: f64) -> Self {
        Self {
            width,
            height,
            drill: Some(drill),
        }
    }

    /// Creates SMD pad dimensions.
    #[must_use]
    pub const fn smd(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            drill: None,
        }
    }

    /// Default through-hole pin: 1.35 x 1.35 mm, 0.8 mm drill.
    #[must_use]
    pub const fn default_through_hole() -> Self {
        Self::through_hole(1.35, 1.35, 0.8)
    }

    /// Default SMD pad: 1.00 x 3.20 mm.
    #[must_use]
    pub const fn default_smd() -> Self {
        Self::smd(1.00, 3.20)
    }

    /// Default strain-relief clip: 1.5 x 1.5 mm, 0.95 mm drill.
    #[must_use]
    pub const fn default_strain_relief() -> Self {
        Self::through_hole(1.5, 1.5, 0.95)
    }

    fn validate(&self, name: &'static str, needs_drill: bool) -> LayoutResult<()> {
        check_positive(name, self.width)?;
        check_positive(name, self.height)?;
        match (self.drill, needs_drill) {
            (Some(drill), true) => {
                check_positive(name, drill)?;
                if drill >= self.width.min(self.height) {
                    return Err(LayoutError::configuration(format!(
                        "{name}: drill {drill} does not fit in a {} x {} pad",
                        self.width, self.height
                    )));
                }
                Ok(())
            }
            (None, true) => Err(LayoutError::configuration(format!(
                "{name}: a drill diameter is required"
            ))),
            (Some(_), false) => Err(LayoutError::configuration(format!(
                "{name}: SMD pads cannot have a drill"
            ))),
            (None, false) => Ok(()),
        }
    }
}

fn check_positive(name: &'static str, value: f64) -> LayoutResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::invalid_dimension(name, value))
    }
}

/// Number of pin rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowCount {
    /// One row of pins along X.
    #[default]
    Single,
    /// Two rows, the second one pitch along +Y.
    Double,
}

impl RowCount {
    /// Returns the number of rows.
    #[must_use]
    pub const fn get(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

impl TryFrom<u32> for RowCount {
    type Error = LayoutError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Single),
            2 => Ok(Self::Double),
            other => Err(LayoutError::configuration(format!(
                "LTek connectors have 1 or 2 rows, not {other}"
            ))),
        }
    }
}

/// Where the second row's pads are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowTwoPlacement {
    /// Legacy placement: the first row-two pad is emitted before row one,
    /// then one row-two pad per row-one pad, all at `(0, pitch)`.
    #[default]
    Reference,
    /// Each row-two pad is emitted once, directly below its row-one partner
    /// at `(i * pitch, pitch)`.
    Aligned,
}

/// Parameters of one connector footprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorSpec {
    pin_count: u32,
    rows: RowCount,
    pitch: f64,
    vertical: bool,
    strain_relief: bool,
    surface_mount: bool,
    through_hole_pad: PadDimensions,
    smd_pad: PadDimensions,
    strain_relief_pad: PadDimensions,
    row_two: RowTwoPlacement,
}

impl ConnectorSpec {
    /// Starts a builder populated with the LTek defaults.
    #[must_use]
    pub fn builder() -> ConnectorSpecBuilder {
        ConnectorSpecBuilder::default()
    }

    /// Total pins across all rows.
    #[must_use]
    pub const fn pin_count(&self) -> u32 {
        self.pin_count
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> RowCount {
        self.rows
    }

    /// Pin pitch in mm.
    #[must_use]
    pub const fn pitch(&self) -> f64 {
        self.pitch
    }

    /// `true` for vertical parts, `false` for right-angle.
    #[must_use]
    pub const fn is_vertical(&self) -> bool {
        self.vertical
    }

    /// Whether the four strain-relief clips are added.
    #[must_use]
    pub const fn has_strain_relief(&self) -> bool {
        self.strain_relief
    }

    /// `true` for SMD pads, `false` for through-hole pins.
    #[must_use]
    pub const fn is_surface_mount(&self) -> bool {
        self.surface_mount
    }

    /// Dimensions of the numbered pads for the selected mount style.
    #[must_use]
    pub const fn pad(&self) -> PadDimensions {
        if self.surface_mount {
            self.smd_pad
        } else {
            self.through_hole_pad
        }
    }

    /// Dimensions of the strain-relief clips.
    #[must_use]
    pub const fn strain_relief_pad(&self) -> PadDimensions {
        self.strain_relief_pad
    }

    /// Row-two placement mode.
    #[must_use]
    pub const fn row_two(&self) -> RowTwoPlacement {
        self.row_two
    }
}

/// Builder for [`ConnectorSpec`].
#[derive(Debug, Clone)]
pub struct ConnectorSpecBuilder {
    pin_count: u32,
    rows: u32,
    pitch: f64,
    vertical: bool,
    strain_relief: bool,
    surface_mount: bool,
    through_hole_pad: PadDimensions,
    smd_pad: PadDimensions,
    strain_relief_pad: PadDimensions,
    row_two: RowTwoPlacement,
}

impl Default for ConnectorSpecBuilder {
    fn default() -> Self {
        Self {
            pin_count: DEFAULT_PINS,
            rows: 1,
            pitch: DEFAULT_PITCH,
            vertical: true,
            strain_relief: true,
            surface_mount: false,
            through_hole_pad: PadDimensions::default_through_hole(),
            smd_pad: PadDimensions::default_smd(),
            strain_relief_pad: PadDimensions::default_strain_relief(),
            row_two: RowTwoPlacement::default(),
        }
    }
}

impl ConnectorSpecBuilder {
    /// Sets the total pin count.
    #[must_use]
    pub const fn pins(mut self, pin_count: u32) -> Self {
        self.pin_count = pin_count;
        self
    }

    /// Sets the number of rows (1 or 2).
    #[must_use]
    pub const fn rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    /// Sets the pin pitch in mm.
    #[must_use]
    pub const fn pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch;
        self
    }

    /// Selects vertical (`true`) or right-angle (`false`) mounting.
    #[must_use]
    pub const fn vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    /// Enables or disables the strain-relief clips.
    #[must_use]
    pub const fn strain_relief(mut self, strain_relief: bool) -> Self {
        self.strain_relief = strain_relief;
        self
    }

    /// Selects SMD pads (`true`) or through-hole pins (`false`).
    #[must_use]
    pub const fn surface_mount(mut self, surface_mount: bool) -> Self {
        self.surface_mount = surface_mount;
        self
    }

    /// Overrides the through-hole pin dimensions.
    #[must_use]
    pub const fn through_hole_pad(mut self, dims: PadDimensions) -> Self {
        self.through_hole_pad = dims;
        self
    }

    /// Overrides the SMD pad dimensions.
    #[must_use]
    pub const fn smd_pad(mut self, dims: PadDimensions) -> Self {
        self.smd_pad = dims;
        self
    }

    /// Overrides the strain-relief clip dimensions.
    #[must_use]
    pub const fn strain_relief_pad(mut self, dims: PadDimensions) -> Self {
        self.strain_relief_pad = dims;
        self
    }

    /// Selects how the second row is placed.
    #[must_use]
    pub const fn row_two(mut self, placement: RowTwoPlacement) -> Self {
        self.row_two = placement;
        self
    }

    /// Validates the parameters and builds the spec.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pin count is zero
    /// - The row count is not 1 or 2
    /// - The pitch or any pad dimension is not a positive finite number
    /// - A through-hole or strain-relief pad has no drill, or its drill does not fit
    /// - An SMD pad has a drill
    pub fn build(self) -> LayoutResult<ConnectorSpec> {
        if self.pin_count == 0 {
            return Err(LayoutError::configuration("pin count must be at least 1"));
        }
        let rows = RowCount::try_from(self.rows)?;
        check_positive("pitch", self.pitch)?;

        self.through_hole_pad.validate("through_hole_pad", true)?;
        self.smd_pad.validate("smd_pad", false)?;
        self.strain_relief_pad.validate("strain_relief_pad", true)?;

        Ok(ConnectorSpec {
            pin_count: self.pin_count,
            rows,
            pitch: self.pitch,
            vertical: self.vertical,
            strain_relief: self.strain_relief,
            surface_mount: self.surface_mount,
            through_hole_pad: self.through_hole_pad,
            smd_pad: self.smd_pad,
            strain_relief_pad: self.strain_relief_pad,
            row_two: self.row_two,
        })
    }
}
