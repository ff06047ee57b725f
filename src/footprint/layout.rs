//! Pad layout engine.
//!
//! Pin 1 is placed at the origin and row one runs along +X at one pitch per
//! pin. Two-row parts number row one `1..=n` and row two `n+1..=2n`, where
//! `n` is half the pin count. Strain-relief clips are four unnumbered
//! through-hole pads around the pin field.

use tracing::{debug, trace};

use super::error::{LayoutError, LayoutResult};
use super::spec::{ConnectorSpec, RowCount, RowTwoPlacement};
use super::{MountType, PadId, PadRecord, PadShape, Point, Size};

/// Distance of the strain-relief clips from the outer pins along X (mm).
pub const STRAIN_RELIEF_X_OFFSET: f64 = 2.25;

/// Distance between the upper and lower strain-relief clips (mm).
pub const STRAIN_RELIEF_Y_SPAN: f64 = 4.75;

/// Computes the ordered pad list for a connector.
///
/// # Errors
///
/// Returns an error if:
/// - The connector is right-angle (no geometry is defined for it)
/// - An SMD connector does not have exactly two rows
/// - A two-row connector has an odd pin count
pub fn compute_pads(spec: &ConnectorSpec) -> LayoutResult<Vec<PadRecord>> {
    if !spec.is_vertical() {
        return Err(LayoutError::configuration(
            "right-angle LTek footprints are not supported",
        ));
    }

    let mount_type = if spec.is_surface_mount() {
        MountType::SurfaceMount
    } else {
        MountType::ThroughHole
    };

    if mount_type == MountType::SurfaceMount && spec.rows() != RowCount::Double {
        return Err(LayoutError::configuration(format!(
            "SMD vertical LTek connectors have 2 rows, not {}",
            spec.rows().get()
        )));
    }

    let pins_per_row = pins_per_row(spec)?;
    let pitch = spec.pitch();

    debug!(
        pins = spec.pin_count(),
        rows = spec.rows().get(),
        pitch,
        mount = mount_type.token(),
        "Laying out pads"
    );

    let mut layout = PadEmitter::new(spec, mount_type);

    let double = spec.rows() == RowCount::Double;
    let reference = spec.row_two() == RowTwoPlacement::Reference;

    if double && reference {
        layout.push_numbered(pins_per_row + 1, Point::new(0.0, pitch));
    }

    let mut last_x = 0.0;
    for i in 0..pins_per_row {
        let x = f64::from(i) * pitch;
        layout.push_numbered(i + 1, Point::new(x, 0.0));

        if double {
            let row_two_x = if reference { 0.0 } else { x };
            layout.push_numbered(pins_per_row + i + 1, Point::new(row_two_x, pitch));
        }
        last_x = x;
    }

    if spec.has_strain_relief() {
        layout.push_strain_relief(last_x);
    }

    let pads = layout.finish();
    debug!(count = pads.len(), "Pad layout complete");
    Ok(pads)
}

/// Returns the number of numbered pins in row one.
fn pins_per_row(spec: &ConnectorSpec) -> LayoutResult<u32> {
    let pins = spec.pin_count();
    match spec.rows() {
        RowCount::Single => Ok(pins),
        RowCount::Double if pins % 2 == 0 => Ok(pins / 2),
        RowCount::Double => Err(LayoutError::UnevenRowSplit { pin_count: pins }),
    }
}

/// Accumulates pads in emission order.
struct PadEmitter<'a> {
    spec: &'a ConnectorSpec,
    mount_type: MountType,
    pads: Vec<PadRecord>,
}

impl<'a> PadEmitter<'a> {
    fn new(spec: &'a ConnectorSpec, mount_type: MountType) -> Self {
        // Reference row two repeats one pad ahead of row one.
        let repeated = usize::from(
            spec.rows() == RowCount::Double && spec.row_two() == RowTwoPlacement::Reference,
        );
        let strain = if spec.has_strain_relief() { 4 } else { 0 };
        let capacity = spec.pin_count() as usize + repeated + strain;
        Self {
            spec,
            mount_type,
            pads: Vec::with_capacity(capacity),
        }
    }

    /// Pushes a numbered pin.
    ///
    /// SMD pads are always rectangular. Through-hole pin 1 is square so it
    /// can be told apart on the board; the rest are round.
    fn push_numbered(&mut self, number: u32, position: Point) {
        let dims = self.spec.pad();
        let size = Size::new(dims.width, dims.height);

        let pad = match self.mount_type {
            MountType::SurfaceMount => PadRecord::smd(number, position, size),
            MountType::ThroughHole => {
                let shape = if number == 1 {
                    PadShape::Rectangle
                } else {
                    PadShape::Circle
                };
                // Drill presence is checked when the spec is built.
                PadRecord::through_hole(
                    PadId::Number(number),
                    shape,
                    position,
                    size,
                    dims.drill.unwrap_or_default(),
                )
            }
        };

        trace!(number, x = position.x, y = position.y, "Pad");
        self.pads.push(pad);
    }

    /// Pushes the four strain-relief clips around the pin field.
    fn push_strain_relief(&mut self, last_x: f64) {
        let dims = self.spec.strain_relief_pad();
        let size = Size::new(dims.width, dims.height);
        let drill = dims.drill.unwrap_or_default();
        let shape = match self.mount_type {
            MountType::SurfaceMount => PadShape::Rectangle,
            MountType::ThroughHole => PadShape::Circle,
        };

        let x_plus = last_x + STRAIN_RELIEF_X_OFFSET;
        let x_minus = -STRAIN_RELIEF_X_OFFSET;
        let y_plus = STRAIN_RELIEF_Y_SPAN / 2.0;
        let y_minus = -(STRAIN_RELIEF_Y_SPAN / 2.0);

        for (x, y) in [
            (x_minus, y_plus),
            (x_minus, y_minus),
            (x_plus, y_plus),
            (x_plus, y_minus),
        ] {
            trace!(x, y, "Strain relief pad");
            self.pads.push(PadRecord::through_hole(
                PadId::Anonymous,
                shape,
                Point::new(x, y),
                size,
                drill,
            ));
        }
    }

    fn finish(self) -> Vec<PadRecord> {
        self.pads
    }
}
