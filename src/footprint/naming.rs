//! Footprint names, descriptions and keyword tags.
//!
//! # Name Format
//!
//! `Harwin_LTek-Male_{PINS}`, e.g. `Harwin_LTek-Male_10`.

use super::format_mm;
use super::spec::{ConnectorSpec, RowCount};

/// Generates the footprint name.
///
/// # Examples
///
/// ```
/// use ltek_footprint::footprint::naming::part_name;
///
/// assert_eq!(part_name(10), "Harwin_LTek-Male_10");
/// ```
#[must_use]
pub fn part_name(pins: u32) -> String {
    format!("Harwin_LTek-Male_{pins}")
}

/// Generates the name for a spec.
#[must_use]
pub fn spec_name(spec: &ConnectorSpec) -> String {
    part_name(spec.pin_count())
}

/// Generates the one-line footprint description.
#[must_use]
pub fn description(spec: &ConnectorSpec) -> String {
    let rows = match spec.rows() {
        RowCount::Single => "single row",
        RowCount::Double => "dual row",
    };
    let orientation = if spec.is_vertical() {
        "vertical"
    } else {
        "right angle"
    };
    let mount = if spec.is_surface_mount() {
        "SMD"
    } else {
        "through hole"
    };
    let strain = if spec.has_strain_relief() {
        ", with strain relief clips"
    } else {
        ""
    };

    format!(
        "Harwin LTek male connector, {pins} pins, {pitch}mm pitch, {rows}, {orientation}, {mount}{strain}",
        pins = spec.pin_count(),
        pitch = format_mm(spec.pitch()),
    )
}

/// Generates the keyword tags.
#[must_use]
pub fn tags(spec: &ConnectorSpec) -> String {
    let mut tags = vec!["connector", "Harwin", "LTek"];
    tags.push(if spec.is_vertical() {
        "vertical"
    } else {
        "horizontal"
    });
    if spec.is_surface_mount() {
        tags.push("SMD");
    } else {
        tags.push("THT");
    }
    tags.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_format() {
        assert_eq!(part_name(2), "Harwin_LTek-Male_2");
        let spec = ConnectorSpec::builder().pins(6).build().unwrap();
        assert_eq!(spec_name(&spec), "Harwin_LTek-Male_6");
    }

    #[test]
    fn description_mentions_parameters() {
        let spec = ConnectorSpec::builder()
            .pins(8)
            .rows(2)
            .surface_mount(true)
            .build()
            .unwrap();
        let descr = description(&spec);
        assert_eq!(
            descr,
            "Harwin LTek male connector, 8 pins, 2mm pitch, dual row, vertical, SMD, with strain relief clips"
        );
    }

    #[test]
    fn tags_for_through_hole() {
        let spec = ConnectorSpec::builder().build().unwrap();
        assert_eq!(tags(&spec), "connector Harwin LTek vertical THT");
    }
}
