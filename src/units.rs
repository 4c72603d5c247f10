//! Field normalization and financial derivation.
//!
//! This module centralizes all the "dirty" field handling so the rest of the
//! code can assume clean, typed values: currency strings with arbitrary
//! symbol noise become `f64`s, the two competing tax fields collapse into one
//! choice, and the derived metrics (total cost, price per area, ROI) are
//! computed independently of each other so one missing field never blanks
//! out the whole row.

use num_format::{Locale, ToFormattedString};

use crate::model::{RawUnitRow, TaxKind, UnitRecord};

/// Parse a free-form numeric field by keeping only ASCII digits and the
/// decimal point, in their original order, and parsing the survivors.
///
/// Returns `None` for empty or fully non-numeric input — absence, not an
/// error. This is lossy by design: it handles "$1,234.56"-style input and
/// makes no attempt at locale-aware separators, so "1.200,50" would
/// misparse. That single-format assumption is a documented constraint on the
/// input data.
pub fn normalize_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Bedroom count from a typology string like "2 bedrooms": the first
/// character if it is an ASCII digit, otherwise empty. Multi-digit counts
/// are deliberately not parsed ("10 bedrooms" yields "1") to stay
/// compatible with existing report consumers.
pub fn bedrooms(typology: &str) -> String {
    match typology.chars().next() {
        Some(c) if c.is_ascii_digit() => c.to_string(),
        _ => String::new(),
    }
}

/// The resolved tax add-on for one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct TaxChoice {
    pub kind: TaxKind,
    /// Original raw text of the chosen field, shown verbatim in the report.
    pub display: String,
    pub amount: f64,
}

/// Pick which of the two tax fields to display. Fixed business priority,
/// not a magnitude comparison: VAT wins whenever it normalizes to a value
/// strictly greater than zero, regardless of the transfer fee; otherwise the
/// transfer fee wins if positive; otherwise neither applies.
pub fn resolve_tax(vat_raw: &str, transfer_fee_raw: &str) -> TaxChoice {
    let vat = normalize_numeric(vat_raw).unwrap_or(0.0);
    let fee = normalize_numeric(transfer_fee_raw).unwrap_or(0.0);

    if vat > 0.0 {
        TaxChoice {
            kind: TaxKind::Vat,
            display: vat_raw.trim().to_string(),
            amount: vat,
        }
    } else if fee > 0.0 {
        TaxChoice {
            kind: TaxKind::TransferFee,
            display: transfer_fee_raw.trim().to_string(),
            amount: fee,
        }
    } else {
        TaxChoice {
            kind: TaxKind::None,
            display: String::new(),
            amount: 0.0,
        }
    }
}

/// Derived financial metrics. `None` means "could not compute"; a computed
/// zero stays `Some(0.0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Metrics {
    pub total_cost: Option<f64>,
    pub price_per_area: Option<f64>,
    pub roi_percent: Option<f64>,
}

/// Compute the three derived metrics. Each is independent: a missing rental
/// rate does not block the price per area, and a zero covered area only
/// disables the division that needs it. The asking price is the anchor —
/// when it fails to normalize, none of the metrics are meaningful and all
/// three come back `None`.
pub fn derive_metrics(
    asking_price_raw: &str,
    total_area_raw: &str,
    rental_rate_raw: &str,
    tax_amount: f64,
) -> Metrics {
    let Some(asking) = normalize_numeric(asking_price_raw) else {
        return Metrics::default();
    };

    let total_cost = Some(asking + tax_amount);

    let price_per_area = normalize_numeric(total_area_raw)
        .filter(|area| *area > 0.0)
        .map(|area| asking / area);

    let roi_percent = if asking > 0.0 {
        normalize_numeric(rental_rate_raw).map(|rent| rent * 12.0 / asking * 100.0)
    } else {
        None
    };

    Metrics {
        total_cost,
        price_per_area,
        roi_percent,
    }
}

/// Monetary display: thousands-grouped integer, no fractional part.
/// Unavailable values render as the empty string.
pub fn format_money(value: Option<f64>) -> String {
    match value {
        Some(v) => (v.round() as i64).to_formatted_string(&Locale::en),
        None => String::new(),
    }
}

/// ROI display: one decimal place with a trailing percent sign.
pub fn format_roi(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => String::new(),
    }
}

fn field(raw: &Option<String>) -> String {
    raw.as_deref().unwrap_or("").trim().to_string()
}

/// Assemble one display-ready record from a raw row. Never fails: malformed
/// fields degrade to empty derived values and the row keeps its place in the
/// batch.
pub fn build_unit_record(row: &RawUnitRow) -> UnitRecord {
    let typology = field(&row.typology);
    let asking_price = field(&row.asking_price);
    let total_covered_area = field(&row.total_covered_area);
    let rental_rate = field(&row.rental_rate);

    let tax = resolve_tax(
        row.vat.as_deref().unwrap_or(""),
        row.transfer_fee.as_deref().unwrap_or(""),
    );
    let metrics = derive_metrics(&asking_price, &total_covered_area, &rental_rate, tax.amount);

    UnitRecord {
        unit_id: field(&row.unit_id),
        floor: field(&row.floor),
        bedrooms: bedrooms(&typology),
        internal_area: field(&row.internal_area),
        total_covered_area,
        asking_price,
        tax_kind: tax.kind,
        tax_display: tax.display,
        total_cost: metrics.total_cost,
        price_per_area: metrics.price_per_area,
        roi_percent: metrics.roi_percent,
        total_cost_display: format_money(metrics.total_cost),
        price_per_area_display: format_money(metrics.price_per_area),
        roi_display: format_roi(metrics.roi_percent),
        rental_rate,
    }
}

/// Build the full record batch, preserving input order. Rows are never
/// dropped here — parse problems stay local to the affected fields.
pub fn build_unit_records(rows: &[RawUnitRow]) -> Vec<UnitRecord> {
    rows.iter().map(build_unit_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_symbol_noise() {
        assert_eq!(normalize_numeric("€300,000"), Some(300000.0));
        assert_eq!(normalize_numeric("$1,234.56"), Some(1234.56));
        assert_eq!(normalize_numeric(" 120 m² "), Some(120.0));
        assert_eq!(normalize_numeric("15%"), Some(15.0));
    }

    #[test]
    fn normalize_absent_on_empty_or_non_numeric() {
        assert_eq!(normalize_numeric(""), None);
        assert_eq!(normalize_numeric("N/A"), None);
        assert_eq!(normalize_numeric("€ --"), None);
        // A bare dot survives the filter but does not parse.
        assert_eq!(normalize_numeric("."), None);
    }

    #[test]
    fn bedrooms_needs_leading_digit() {
        assert_eq!(bedrooms("2 bedrooms"), "2");
        assert_eq!(bedrooms("Studio"), "");
        assert_eq!(bedrooms(""), "");
        // Compatibility quirk: only the first digit is taken.
        assert_eq!(bedrooms("10 bedrooms"), "1");
    }

    #[test]
    fn tax_absence_yields_none() {
        let choice = resolve_tax("", "");
        assert_eq!(choice.kind, TaxKind::None);
        assert_eq!(choice.display, "");
        assert_eq!(choice.amount, 0.0);
    }

    #[test]
    fn vat_priority_beats_larger_transfer_fee() {
        let choice = resolve_tax("15%", "€5,000");
        assert_eq!(choice.kind, TaxKind::Vat);
        assert_eq!(choice.display, "15%");
        assert_eq!(choice.amount, 15.0);
    }

    #[test]
    fn transfer_fee_when_vat_unparseable() {
        let choice = resolve_tax("exempt", "€5,000");
        assert_eq!(choice.kind, TaxKind::TransferFee);
        assert_eq!(choice.amount, 5000.0);
    }

    #[test]
    fn metrics_worked_example() {
        let m = derive_metrics("€300,000", "120", "€1,000", 45000.0);
        assert_eq!(m.total_cost, Some(345000.0));
        assert_eq!(m.price_per_area, Some(2500.0));
        assert_eq!(m.roi_percent, Some(4.0));
        assert_eq!(format_roi(m.roi_percent), "4.0%");
        assert_eq!(format_money(m.total_cost), "345,000");
    }

    #[test]
    fn zero_area_disables_only_price_per_area() {
        let m = derive_metrics("€300,000", "0", "€1,000", 0.0);
        assert_eq!(m.total_cost, Some(300000.0));
        assert_eq!(m.price_per_area, None);
        assert_eq!(m.roi_percent, Some(4.0));
    }

    #[test]
    fn missing_asking_price_blanks_all_metrics() {
        let m = derive_metrics("", "120", "€1,000", 100.0);
        assert_eq!(m, Metrics::default());
        assert_eq!(format_money(m.total_cost), "");
        assert_eq!(format_roi(m.roi_percent), "");
    }

    #[test]
    fn missing_rental_rate_keeps_other_metrics() {
        let m = derive_metrics("€300,000", "120", "", 0.0);
        assert_eq!(m.total_cost, Some(300000.0));
        assert_eq!(m.price_per_area, Some(2500.0));
        assert_eq!(m.roi_percent, None);
    }

    #[test]
    fn computed_zero_is_not_unavailable() {
        // Zero rent is a legitimate value and must not collapse into "".
        let m = derive_metrics("€300,000", "120", "0", 0.0);
        assert_eq!(m.roi_percent, Some(0.0));
        assert_eq!(format_roi(m.roi_percent), "0.0%");
    }

    #[test]
    fn record_builder_keeps_malformed_rows() {
        let row = RawUnitRow {
            unit_id: Some("A101".into()),
            typology: Some("garbage".into()),
            asking_price: Some("call us".into()),
            ..Default::default()
        };
        let rec = build_unit_record(&row);
        assert_eq!(rec.unit_id, "A101");
        assert_eq!(rec.bedrooms, "");
        assert_eq!(rec.total_cost_display, "");
        assert_eq!(rec.price_per_area_display, "");
        assert_eq!(rec.roi_display, "");
    }
}
