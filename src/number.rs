//! Numeric formatting for markup and data tables.
//!
//! Coordinates are emitted with Rust's shortest round-trip `f64` formatting,
//! so reading a table back yields the exact value that was plotted. Non-finite
//! samples are spelled the way PGFPlots' table parser expects (`nan`, `inf`),
//! which pairs with `unbounded coords = jump` on mesh surfaces.

pub fn fmt(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    x.to_string()
}

/// Comma-separated list, as used by `xtick = {...}` options.
pub fn fmt_list(values: &[f64]) -> String {
    values.iter().map(|&v| fmt(v)).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_parse() {
        for x in [0.1, 1.0 / 3.0, -2.5e-9, 123456.789, f64::MIN_POSITIVE] {
            assert_eq!(fmt(x).parse::<f64>().unwrap(), x);
        }
    }

    #[test]
    fn non_finite_spelling() {
        assert_eq!(fmt(f64::NAN), "nan");
        assert_eq!(fmt(f64::INFINITY), "inf");
        assert_eq!(fmt(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn integral_values_stay_short() {
        assert_eq!(fmt(45.0), "45");
        assert_eq!(fmt(-0.5), "-0.5");
    }

    #[test]
    fn lists_are_comma_separated() {
        assert_eq!(fmt_list(&[0.0, 0.5, 1.0]), "0, 0.5, 1");
        assert_eq!(fmt_list(&[]), "");
    }
}
