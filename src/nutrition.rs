//! Traffic-light banding of the four nutrients shown on a product page.
//!
//! Thresholds are grams per 100 g. A value below `low_below` is low, a value
//! at or above `high_from` is high, anything in between is moderate.

use serde::Serialize;

use crate::models::Product;

const INDICATOR_BASE_URL: &str = "https://static.openfoodfacts.org/images/misc/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKind {
    Fat,
    SaturatedFat,
    Salt,
    Sugar,
}

impl NutrientKind {
    pub const ALL: [NutrientKind; 4] = [
        NutrientKind::Fat,
        NutrientKind::SaturatedFat,
        NutrientKind::Salt,
        NutrientKind::Sugar,
    ];

    /// `(low_below, high_from)`
    pub const fn thresholds(self) -> (f64, f64) {
        match self {
            NutrientKind::Fat => (3.0, 20.0),
            NutrientKind::SaturatedFat => (1.5, 5.0),
            NutrientKind::Salt => (0.3, 1.5),
            NutrientKind::Sugar => (5.0, 12.5),
        }
    }

    pub fn value_of(self, product: &Product) -> Option<f64> {
        match self {
            NutrientKind::Fat => product.fat,
            NutrientKind::SaturatedFat => product.saturated_fat,
            NutrientKind::Salt => product.salt,
            NutrientKind::Sugar => product.sugar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Moderate,
    High,
    Unknown,
}

impl Band {
    /// Indicator image for the band, `None` when nothing should be shown.
    pub fn indicator_url(self) -> Option<String> {
        let file = match self {
            Band::Low => "low_30.png",
            Band::Moderate => "moderate_30.png",
            Band::High => "high_30.png",
            Band::Unknown => return None,
        };

        Some(format!("{INDICATOR_BASE_URL}{file}"))
    }
}

pub fn band(kind: NutrientKind, value: Option<f64>) -> Band {
    let Some(value) = value.filter(|v| !v.is_nan()) else {
        return Band::Unknown;
    };

    let (low_below, high_from) = kind.thresholds();

    if value < low_below {
        Band::Low
    } else if value < high_from {
        Band::Moderate
    } else {
        Band::High
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NutrientLevel {
    pub nutrient: NutrientKind,
    pub value: Option<f64>,
    pub band: Band,
    pub indicator_url: Option<String>,
}

/// The four banded nutrients of one product, in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct NutrientLevels(pub Vec<NutrientLevel>);

impl NutrientLevels {
    pub fn of(product: &Product) -> Self {
        Self(
            NutrientKind::ALL
                .into_iter()
                .map(|nutrient| {
                    let value = nutrient.value_of(product);
                    let band = band(nutrient, value);
                    NutrientLevel {
                        nutrient,
                        value,
                        band,
                        indicator_url: band.indicator_url(),
                    }
                })
                .collect(),
        )
    }
}
