//! Nominal mass per metre of reinforcing bar

/// kg/m for the standard commercial diameters (steel density 7850 kg/m³)
const UNIT_WEIGHTS: [(u32, f64); 13] = [
    (8, 0.395),
    (10, 0.617),
    (12, 0.888),
    (14, 1.208),
    (16, 1.580),
    (18, 2.000),
    (20, 2.470),
    (22, 2.984),
    (24, 3.551),
    (25, 3.853),
    (26, 4.168),
    (28, 4.834),
    (32, 6.313),
];

/// Mass per metre for a diameter, `None` when the diameter is not standard
pub fn unit_weight_kg_per_m(diameter_mm: u32) -> Option<f64> {
    UNIT_WEIGHTS
        .iter()
        .find(|(d, _)| *d == diameter_mm)
        .map(|&(_, w)| w)
}

/// Diameters that have a unit weight
pub fn standard_diameters() -> impl Iterator<Item = u32> {
    UNIT_WEIGHTS.iter().map(|&(d, _)| d)
}
