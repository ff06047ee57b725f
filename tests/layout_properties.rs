//! Property tests for the pad layout engine.
//!
//! These tests check the layout invariants across a range of connector
//! configurations rather than single hand-picked cases.

use ltek_footprint::footprint::{
    compute_pads, ConnectorSpec, LayerSet, LayoutError, MountType, PadId, PadRecord, PadShape,
    RowTwoPlacement,
};

/// Helper to compare floats with tolerance.
fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

fn numbered(pads: &[PadRecord]) -> impl Iterator<Item = &PadRecord> {
    pads.iter().filter(|p| !p.id.is_anonymous())
}

fn anonymous(pads: &[PadRecord]) -> Vec<&PadRecord> {
    pads.iter().filter(|p| p.id.is_anonymous()).collect()
}

/// Every valid configuration the generator supports.
fn valid_specs() -> Vec<ConnectorSpec> {
    let mut specs = Vec::new();
    for pins in [2, 4, 6, 10, 20] {
        for strain in [false, true] {
            for placement in [RowTwoPlacement::Reference, RowTwoPlacement::Aligned] {
                specs.push(
                    ConnectorSpec::builder()
                        .pins(pins)
                        .strain_relief(strain)
                        .row_two(placement)
                        .build()
                        .unwrap(),
                );
                specs.push(
                    ConnectorSpec::builder()
                        .pins(pins)
                        .rows(2)
                        .strain_relief(strain)
                        .row_two(placement)
                        .build()
                        .unwrap(),
                );
                specs.push(
                    ConnectorSpec::builder()
                        .pins(pins)
                        .rows(2)
                        .surface_mount(true)
                        .strain_relief(strain)
                        .row_two(placement)
                        .build()
                        .unwrap(),
                );
            }
        }
    }
    specs
}

#[test]
fn test_pad_one_at_origin() {
    for spec in valid_specs() {
        let pads = compute_pads(&spec).unwrap();
        let ones: Vec<_> = pads.iter().filter(|p| p.id == PadId::Number(1)).collect();

        assert_eq!(ones.len(), 1, "{spec:?}");
        assert!(approx_eq(ones[0].position.x, 0.0, 1e-9));
        assert!(approx_eq(ones[0].position.y, 0.0, 1e-9));
    }
}

#[test]
fn test_every_pin_is_numbered() {
    for spec in valid_specs() {
        let pads = compute_pads(&spec).unwrap();
        let mut ids: Vec<u32> = numbered(&pads).filter_map(|p| p.id.number()).collect();
        ids.sort_unstable();
        ids.dedup();

        let expected: Vec<u32> = (1..=spec.pin_count()).collect();
        assert_eq!(ids, expected, "{spec:?}");
    }
}

#[test]
fn test_single_row_through_hole_geometry() {
    let spec = ConnectorSpec::builder()
        .pins(6)
        .pitch(2.5)
        .strain_relief(false)
        .build()
        .unwrap();
    let pads = compute_pads(&spec).unwrap();

    assert_eq!(pads.len(), 6);
    for (i, pad) in pads.iter().enumerate() {
        let n = u32::try_from(i).unwrap();
        assert_eq!(pad.id, PadId::Number(n + 1));
        assert!(approx_eq(pad.position.x, f64::from(n) * 2.5, 1e-9));
        assert!(approx_eq(pad.position.y, 0.0, 1e-9));
        let expected_shape = if i == 0 {
            PadShape::Rectangle
        } else {
            PadShape::Circle
        };
        assert_eq!(pad.shape, expected_shape);
    }
}

#[test]
fn test_reference_row_two_stays_at_first_column() {
    let spec = ConnectorSpec::builder()
        .pins(4)
        .rows(2)
        .strain_relief(false)
        .build()
        .unwrap();
    let pads = compute_pads(&spec).unwrap();

    let row_two: Vec<_> = pads
        .iter()
        .filter(|p| p.id.number().is_some_and(|n| n > 2))
        .collect();
    assert_eq!(row_two.len(), 3);
    for pad in row_two {
        assert!(approx_eq(pad.position.x, 0.0, 1e-9));
        assert!(approx_eq(pad.position.y, 2.0, 1e-9));
    }
}

#[test]
fn test_aligned_row_two_mirrors_row_one() {
    let spec = ConnectorSpec::builder()
        .pins(8)
        .rows(2)
        .strain_relief(false)
        .row_two(RowTwoPlacement::Aligned)
        .build()
        .unwrap();
    let pads = compute_pads(&spec).unwrap();

    assert_eq!(pads.len(), 8);
    for n in 1..=4 {
        let top = pads.iter().find(|p| p.id == PadId::Number(n)).unwrap();
        let bottom = pads.iter().find(|p| p.id == PadId::Number(n + 4)).unwrap();
        assert!(approx_eq(top.position.x, bottom.position.x, 1e-9));
        assert!(approx_eq(bottom.position.y - top.position.y, 2.0, 1e-9));
    }
}

#[test]
fn test_strain_relief_adds_four_symmetric_pads() {
    for spec in valid_specs().into_iter().filter(ConnectorSpec::has_strain_relief) {
        let pads = compute_pads(&spec).unwrap();
        let clips = anonymous(&pads);
        assert_eq!(clips.len(), 4, "{spec:?}");

        let last_x = numbered(&pads)
            .filter(|p| approx_eq(p.position.y, 0.0, 1e-9))
            .map(|p| p.position.x)
            .fold(f64::MIN, f64::max);

        let mut xs: Vec<f64> = clips.iter().map(|p| p.position.x).collect();
        xs.sort_by(f64::total_cmp);
        assert!(approx_eq(xs[0], -2.25, 1e-9));
        assert!(approx_eq(xs[3], last_x + 2.25, 1e-9));

        let ys: f64 = clips.iter().map(|p| p.position.y).sum();
        assert!(approx_eq(ys, 0.0, 1e-9));
        assert!(clips.iter().all(|p| approx_eq(p.position.y.abs(), 2.375, 1e-9)));

        let expected_shape = if spec.is_surface_mount() {
            PadShape::Rectangle
        } else {
            PadShape::Circle
        };
        for clip in clips {
            assert_eq!(clip.mount_type, MountType::ThroughHole);
            assert_eq!(clip.layers, LayerSet::ThroughHoleCopperStack);
            assert_eq!(clip.shape, expected_shape);
            assert_eq!(clip.drill, Some(0.95));
        }
    }
}

#[test]
fn test_no_strain_relief_means_no_anonymous_pads() {
    for spec in valid_specs().into_iter().filter(|s| !s.has_strain_relief()) {
        let pads = compute_pads(&spec).unwrap();
        assert!(anonymous(&pads).is_empty());
    }
}

#[test]
fn test_numbered_pads_follow_mount_style() {
    for spec in valid_specs() {
        let pads = compute_pads(&spec).unwrap();
        for pad in numbered(&pads) {
            if spec.is_surface_mount() {
                assert_eq!(pad.mount_type, MountType::SurfaceMount);
                assert_eq!(pad.layers, LayerSet::SurfaceMountCopperStack);
                assert_eq!(pad.drill, None);
            } else {
                assert_eq!(pad.mount_type, MountType::ThroughHole);
                assert_eq!(pad.layers, LayerSet::ThroughHoleCopperStack);
                assert_eq!(pad.drill, Some(0.8));
            }
        }
    }
}

#[test]
fn test_smd_requires_two_rows() {
    for pins in [1, 2, 5] {
        let spec = ConnectorSpec::builder()
            .pins(pins)
            .surface_mount(true)
            .build()
            .unwrap();
        assert!(matches!(
            compute_pads(&spec),
            Err(LayoutError::Configuration { .. })
        ));
    }
}

#[test]
fn test_odd_pins_rejected_for_two_rows() {
    for smd in [false, true] {
        let spec = ConnectorSpec::builder()
            .pins(7)
            .rows(2)
            .surface_mount(smd)
            .build()
            .unwrap();
        assert_eq!(
            compute_pads(&spec),
            Err(LayoutError::UnevenRowSplit { pin_count: 7 })
        );
    }
}

#[test]
fn test_layout_is_deterministic() {
    for spec in valid_specs() {
        assert_eq!(compute_pads(&spec), compute_pads(&spec));
    }
}
