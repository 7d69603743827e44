//! Preset price bands offered as quick filters.

use serde::Serialize;

use crate::query::PriceRange;

/// Named inclusive price band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBand {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
}

impl PriceBand {
    pub const fn new(label: &'static str, min: f64, max: f64) -> Self {
        Self { label, min, max }
    }

    pub fn range(&self) -> PriceRange {
        // Bands are finite constants, never NaN.
        PriceRange::new(self.min, self.max).unwrap_or_default()
    }
}

/// Band covering every preset; selecting it clears the price filter.
pub const DEFAULT_PRICE_BAND: PriceBand = PriceBand::new("All prices", 1.0, 7999.0);

pub const PRICE_BANDS: [PriceBand; 5] = [
    PriceBand::new("$1 - $100", 1.0, 100.0),
    PriceBand::new("$101 - $500", 101.0, 500.0),
    PriceBand::new("$501 - $1000", 501.0, 1000.0),
    PriceBand::new("$1001 - $2000", 1001.0, 2000.0),
    PriceBand::new("$2001 - $7999", 2001.0, 7999.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_ordered_and_inside_default() {
        for pair in PRICE_BANDS.windows(2) {
            assert!(pair[0].max < pair[1].min);
        }
        for band in &PRICE_BANDS {
            assert!(band.min >= DEFAULT_PRICE_BAND.min);
            assert!(band.max <= DEFAULT_PRICE_BAND.max);
        }
    }

    #[test]
    fn band_range_is_inclusive() {
        let range = PRICE_BANDS[1].range();
        assert!(range.contains(101.0));
        assert!(range.contains(500.0));
        assert!(!range.contains(500.5));
    }

    #[test]
    fn default_band_spans_every_preset() {
        let all = DEFAULT_PRICE_BAND.range();
        assert!(PRICE_BANDS.iter().all(|b| all.contains(b.min) && all.contains(b.max)));
        assert!(!all.contains(0.5));
    }
}
