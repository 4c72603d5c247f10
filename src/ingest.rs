//! Input sources: CSV listings and extraction-collaborator JSON.
//!
//! Both sources produce the same `ReportInput`. Batch-level failures (file
//! missing, malformed CSV, invalid JSON document) are fatal; anything below
//! that degrades locally. When the extraction payload is missing its
//! description or units, deterministic placeholder content is substituted
//! and logged so it is never silently mistaken for real data.

use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::model::{RawUnitRow, ReportInput, UnitRecord};
use crate::units::build_unit_records;

/// Read the units CSV and build the normalized record batch. Tolerates a
/// leading UTF-8 byte-order marker. A file with rows but no recognizable
/// header is fatal; a header-only file is a valid empty batch.
pub fn load_csv(path: &Path) -> Result<Vec<UnitRecord>, Error> {
    let bytes = std::fs::read(path)?;
    let bytes = strip_bom(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    if reader.headers()?.is_empty() {
        return Err(Error::EmptyHeader);
    }

    let mut rows: Vec<RawUnitRow> = Vec::new();
    let mut skipped = 0usize;
    for result in reader.deserialize::<RawUnitRow>() {
        match result {
            Ok(row) => rows.push(row),
            // A structurally broken line (e.g. stray quote) loses that line
            // only, not the batch.
            Err(e) => {
                skipped += 1;
                log::warn!("skipping unreadable CSV record: {e}");
            }
        }
    }
    if skipped > 0 {
        log::warn!("{skipped} CSV record(s) skipped as unreadable");
    }

    Ok(build_unit_records(&rows))
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes)
}

/// Shape of the extraction collaborator's output file. Both keys are
/// optional — the pipeline upstream makes no guarantees.
#[derive(Deserialize)]
struct ExtractionPayload {
    #[serde(default)]
    description: Option<Vec<String>>,
    #[serde(default)]
    units: Option<serde_json::Value>,
}

const MAX_DESCRIPTION_LINES: usize = 5;

/// Load a brochure-extraction JSON file. The document itself must be valid
/// JSON (fatal otherwise); missing or unusable `description`/`units` fall
/// back to placeholder content.
pub fn load_extraction(path: &Path) -> Result<ReportInput, Error> {
    let bytes = std::fs::read(path)?;
    let payload: ExtractionPayload = serde_json::from_slice(strip_bom(&bytes))?;

    let description = match payload.description {
        Some(lines) if !lines.is_empty() => {
            lines.into_iter().take(MAX_DESCRIPTION_LINES).collect()
        }
        _ => {
            log::warn!("extraction payload has no description — using placeholder text");
            placeholder_description()
        }
    };

    let units = match payload.units {
        Some(serde_json::Value::Array(values)) if !values.is_empty() => {
            let rows: Vec<RawUnitRow> = values
                .into_iter()
                .filter_map(|v| match serde_json::from_value::<RawUnitRow>(v) {
                    Ok(row) => Some(row),
                    Err(e) => {
                        log::warn!("skipping malformed extracted unit: {e}");
                        None
                    }
                })
                .collect();
            if rows.is_empty() {
                log::warn!("no usable extracted units — using placeholder units");
                placeholder_units()
            } else {
                rows
            }
        }
        _ => {
            log::warn!("extraction payload has no unit list — using placeholder units");
            placeholder_units()
        }
    };

    Ok(ReportInput {
        description,
        units: build_unit_records(&units),
    })
}

/// Deterministic stand-in description, used when the extraction step fails
/// or returns nothing. Always paired with a warning log.
pub fn placeholder_description() -> Vec<String> {
    [
        "This premium investment property offers an exceptional opportunity in an excellent location.",
        "Features include modern amenities and high-quality finishes throughout the development.",
        "Ideal for investors looking for strong returns in a growing market with high demand.",
        "The property offers versatile options suitable for various residential requirements.",
        "Secure this opportunity to acquire a property with significant appreciation potential.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Deterministic stand-in unit rows for the same situation.
pub fn placeholder_units() -> Vec<RawUnitRow> {
    let unit = |id: &str, floor: &str, typ: &str, area: &str, price: &str, rent: &str| RawUnitRow {
        unit_id: Some(id.into()),
        floor: Some(floor.into()),
        typology: Some(typ.into()),
        internal_area: Some(area.into()),
        total_covered_area: Some(area.into()),
        asking_price: Some(price.into()),
        rental_rate: Some(rent.into()),
        ..Default::default()
    };
    vec![
        unit("A101", "1", "2 bedrooms", "1,250", "$750,000", "$2,800"),
        unit("B205", "2", "3 bedrooms", "1,800", "$1,050,000", "$3,900"),
        unit("C103", "1", "1 bedroom", "950", "$580,000", "$2,100"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("unitdeck-ingest-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    const CSV_HEADER: &str = "Unit ID,Floor,Typology,Internal Area,Total Covered Area,Asking Price,VAT,Transfer Fee,Rental Rate\n";

    #[test]
    fn csv_with_bom_parses() {
        let mut data = b"\xef\xbb\xbf".to_vec();
        data.extend_from_slice(CSV_HEADER.as_bytes());
        data.extend_from_slice(b"A101,1,2 bedrooms,85,120,\"\xe2\x82\xac300,000\",15%,,\"\xe2\x82\xac1,000\"\n");
        let path = write_temp("bom.csv", &data);

        let records = load_csv(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].unit_id, "A101");
        assert_eq!(records[0].bedrooms, "2");
        assert_eq!(records[0].roi_display, "4.0%");
    }

    #[test]
    fn header_only_csv_is_valid_empty_batch() {
        let path = write_temp("empty.csv", CSV_HEADER.as_bytes());
        let records = load_csv(&path).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn missing_csv_is_fatal() {
        let path = std::path::Path::new("/nonexistent/units.csv");
        assert!(matches!(load_csv(path), Err(Error::Io(_))));
    }

    #[test]
    fn extraction_with_loose_keys() {
        let json = br#"{
            "description": ["Line one", "Line two"],
            "units": [
                {"unit_id": "A101", "asking_price": "$750,000", "total_covered_area": "1,250"},
                {"Unit ID": "B205", "Asking Price": "$1,050,000"}
            ]
        }"#;
        let path = write_temp("extract.json", json);
        let input = load_extraction(&path).unwrap();
        assert_eq!(input.description.len(), 2);
        assert_eq!(input.units.len(), 2);
        assert_eq!(input.units[0].unit_id, "A101");
        assert_eq!(input.units[1].unit_id, "B205");
        assert_eq!(input.units[0].price_per_area_display, "600");
    }

    #[test]
    fn extraction_without_units_uses_placeholders() {
        let path = write_temp("bare.json", br#"{"description": ["Only text"]}"#);
        let input = load_extraction(&path).unwrap();
        assert_eq!(input.units.len(), 3);
        assert_eq!(input.units[0].unit_id, "A101");
    }

    #[test]
    fn invalid_extraction_json_is_fatal() {
        let path = write_temp("broken.json", b"not json at all");
        assert!(matches!(load_extraction(&path), Err(Error::Extraction(_))));
    }
}
