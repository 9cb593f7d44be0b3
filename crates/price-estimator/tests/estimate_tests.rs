//! End-to-end tests for the quote pipeline.

use approx::assert_relative_eq;
use mesh_analysis::{Point3d, TriangleMesh};
use price_estimator::*;
use print_types::{MaterialKind, PrintConfig};

/// Outward-wound box spanning the origin to (w, h, d).
fn make_box_mesh(w: f64, h: f64, d: f64) -> TriangleMesh {
    let v = vec![
        Point3d::new(0.0, 0.0, 0.0),
        Point3d::new(w, 0.0, 0.0),
        Point3d::new(w, h, 0.0),
        Point3d::new(0.0, h, 0.0),
        Point3d::new(0.0, 0.0, d),
        Point3d::new(w, 0.0, d),
        Point3d::new(w, h, d),
        Point3d::new(0.0, h, d),
    ];
    TriangleMesh::indexed(
        v,
        vec![
            0, 2, 1, 0, 3, 2, 4, 5, 6, 4, 6, 7, 0, 1, 5, 0, 5, 4, 3, 7, 6, 3, 6, 2, 0, 4, 7, 0,
            7, 3, 1, 2, 6, 1, 6, 5,
        ],
    )
}

#[test]
fn storefront_scenario_50_cm3_pla() {
    // 50 x 40 x 25 mm = 50,000 mm³
    let mesh = make_box_mesh(50.0, 40.0, 25.0);
    let config = PrintConfig::new(MaterialKind::Pla, 20, 0.2);
    let quote = estimate(&mesh, &config, &PricingConfig::storefront()).unwrap();

    assert_relative_eq!(quote.statistics.volume_cubic_mm, 50_000.0, epsilon = 1e-6);
    assert_eq!(quote.statistics.triangle_count, 12);
    assert_relative_eq!(quote.estimate.weight_grams, 22.32, epsilon = 1e-6);
    assert_eq!(quote.estimate.print_time_hours, 6);
    assert_eq!(quote.estimate.material_cost, 45);
    assert_eq!(quote.estimate.print_cost, 300);
    assert_eq!(quote.estimate.setup_fee, 50);
    assert_eq!(quote.estimate.total_cost, 395);
}

#[test]
fn petg_costs_more_than_pla() {
    let mesh = make_box_mesh(50.0, 40.0, 25.0);
    let pricing = PricingConfig::default();
    let pla = estimate(&mesh, &PrintConfig::new(MaterialKind::Pla, 20, 0.2), &pricing).unwrap();
    let petg = estimate(&mesh, &PrintConfig::new(MaterialKind::Petg, 20, 0.2), &pricing).unwrap();
    assert!(petg.estimate.weight_grams > pla.estimate.weight_grams);
    assert!(petg.estimate.total_cost > pla.estimate.total_cost);
}

#[test]
fn repeated_estimates_are_bit_identical() {
    let mesh = make_box_mesh(33.3, 12.7, 81.9);
    let config = PrintConfig::new(MaterialKind::Tpu, 37, 0.16);
    let pricing = PricingConfig::default();
    let a = estimate(&mesh, &config, &pricing).unwrap();
    let b = estimate(&mesh, &config, &pricing).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        a.estimate.weight_grams.to_bits(),
        b.estimate.weight_grams.to_bits()
    );
    assert_eq!(
        a.statistics.volume_cubic_mm.to_bits(),
        b.statistics.volume_cubic_mm.to_bits()
    );
}

#[test]
fn unknown_material_name_never_produces_estimate() {
    let err: EstimateError = "nylon".parse::<MaterialKind>().unwrap_err().into();
    assert_eq!(err, EstimateError::UnknownMaterial { name: "nylon".into() });
}

#[test]
fn material_missing_from_catalogue_fails_whole_pipeline() {
    let mesh = make_box_mesh(10.0, 10.0, 10.0);
    let mut pricing = PricingConfig::default();
    pricing.materials.remove(&MaterialKind::Petg);
    let result = estimate(&mesh, &PrintConfig::new(MaterialKind::Petg, 20, 0.2), &pricing);
    assert!(matches!(result, Err(EstimateError::UnknownMaterial { .. })));
}

#[test]
fn invalid_layer_height_fails_before_analysis() {
    // Empty mesh would be EmptyMesh; configuration is checked first.
    let config = PrintConfig::new(MaterialKind::Pla, 20, 0.0);
    let result = estimate(&TriangleMesh::default(), &config, &PricingConfig::default());
    assert!(matches!(result, Err(EstimateError::InvalidConfiguration { .. })));
}

#[test]
fn infill_above_100_is_rejected() {
    let mesh = make_box_mesh(10.0, 10.0, 10.0);
    let config = PrintConfig::new(MaterialKind::Pla, 120, 0.2);
    assert!(estimate(&mesh, &config, &PricingConfig::default()).is_err());
}

#[test]
fn tiny_part_bills_one_hour() {
    let mesh = make_box_mesh(2.0, 2.0, 2.0);
    let quote = estimate(&mesh, &PrintConfig::default(), &PricingConfig::default()).unwrap();
    assert_eq!(quote.estimate.print_time_hours, 1);
    assert_eq!(quote.estimate.material_cost, 0);
    assert_eq!(quote.estimate.total_cost, 100);
}

#[test]
fn estimator_with_custom_rates() {
    let pricing = PricingConfig::from_json(r#"{"rate_per_hour": 80, "setup_fee": 0}"#).unwrap();
    let estimator = PriceEstimator::new(pricing).unwrap();
    let mesh = make_box_mesh(50.0, 40.0, 25.0);
    let est = estimator
        .quote(&mesh, &PrintConfig::new(MaterialKind::Pla, 20, 0.2))
        .unwrap()
        .estimate;
    assert_eq!(est.print_cost, 480);
    assert_eq!(est.total_cost, 45 + 480);
}

#[test]
fn enormous_part_is_out_of_range_not_saturated() {
    // 1e8 mm cube: the machine time no longer fits a u32 hour count.
    let mesh = make_box_mesh(1.0e8, 1.0e8, 1.0e8);
    let config = PrintConfig::new(MaterialKind::Pla, 20, 0.2);
    let err = estimate(&mesh, &config, &PricingConfig::default()).unwrap_err();
    assert!(matches!(err, EstimateError::OutOfRange { .. }), "{err:?}");
}

#[test]
fn currency_overflow_is_an_error() {
    let mesh = make_box_mesh(50.0, 40.0, 25.0);
    let pricing = PricingConfig {
        rate_per_hour: u64::MAX / 4,
        ..PricingConfig::default()
    };
    let err = estimate(&mesh, &PrintConfig::default(), &pricing).unwrap_err();
    assert!(matches!(
        err,
        EstimateError::OutOfRange {
            quantity: "print cost",
            ..
        }
    ));
}

#[test]
fn struct_literal_pricing_is_validated_by_pipeline() {
    let mesh = make_box_mesh(50.0, 40.0, 25.0);
    let pricing = PricingConfig {
        reference_layer_height_mm: -0.2,
        ..PricingConfig::default()
    };
    let err = estimate(&mesh, &PrintConfig::default(), &pricing).unwrap_err();
    assert!(matches!(err, EstimateError::InvalidConfiguration { .. }));
}
