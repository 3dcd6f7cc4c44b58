use healthy_swap::nutrition::{Band, NutrientKind, band};

#[test]
fn test_fat_band_edges() {
    assert_eq!(band(NutrientKind::Fat, Some(2.9)), Band::Low);
    assert_eq!(band(NutrientKind::Fat, Some(3.0)), Band::Moderate);
    assert_eq!(band(NutrientKind::Fat, Some(19.9)), Band::Moderate);
    assert_eq!(band(NutrientKind::Fat, Some(20.0)), Band::High);
    assert_eq!(band(NutrientKind::Fat, None), Band::Unknown);
}

#[test]
fn test_each_nutrient_uses_its_own_thresholds() {
    let cases = [
        (NutrientKind::SaturatedFat, 1.49, 1.5, 4.99, 5.0),
        (NutrientKind::Salt, 0.29, 0.3, 1.49, 1.5),
        (NutrientKind::Sugar, 4.99, 5.0, 12.49, 12.5),
    ];

    for (kind, low, moderate_start, moderate_end, high) in cases {
        assert_eq!(band(kind, Some(low)), Band::Low, "{kind:?}");
        assert_eq!(band(kind, Some(moderate_start)), Band::Moderate, "{kind:?}");
        assert_eq!(band(kind, Some(moderate_end)), Band::Moderate, "{kind:?}");
        assert_eq!(band(kind, Some(high)), Band::High, "{kind:?}");
        assert_eq!(band(kind, None), Band::Unknown, "{kind:?}");
    }
}

#[test]
fn test_zero_is_low_and_nan_is_unknown() {
    assert_eq!(band(NutrientKind::Sugar, Some(0.0)), Band::Low);
    assert_eq!(band(NutrientKind::Salt, Some(f64::NAN)), Band::Unknown);
}

#[test]
fn test_indicator_urls() {
    assert_eq!(
        Band::Low.indicator_url().as_deref(),
        Some("https://static.openfoodfacts.org/images/misc/low_30.png")
    );
    assert_eq!(
        Band::High.indicator_url().as_deref(),
        Some("https://static.openfoodfacts.org/images/misc/high_30.png")
    );
    assert_eq!(Band::Unknown.indicator_url(), None);
}
