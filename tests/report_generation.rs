use std::io::Write;
use std::path::PathBuf;

use unitdeck::{ReportConfig, ReportInput};

const CSV_HEADER: &str = "Unit ID,Floor,Typology,Internal Area,Total Covered Area,Asking Price,VAT,Transfer Fee,Rental Rate\n";

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("unitdeck-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(name: &str, bytes: &[u8]) -> PathBuf {
    let path = temp_dir().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(bytes).unwrap();
    path
}

fn ten_row_csv() -> Vec<u8> {
    let mut data = String::from(CSV_HEADER);
    for i in 1..=10u32 {
        // Row 3 has no asking price; everything else is well-formed.
        let price = if i == 3 { "" } else { "€300,000" };
        data.push_str(&format!(
            "A{i:03},{f},2 bedrooms,85,120,{price},15%,,\"€1,000\"\n",
            f = i % 4,
        ));
    }
    data.into_bytes()
}

#[test]
fn batch_keeps_rows_with_local_failures() {
    let path = write_file("ten_rows.csv", &ten_row_csv());
    let records = unitdeck::load_csv(&path).unwrap();

    assert_eq!(records.len(), 10);

    // Row 3 degrades to empty derived fields but keeps its place and its
    // pass-through values.
    let broken = &records[2];
    assert_eq!(broken.unit_id, "A003");
    assert_eq!(broken.total_cost_display, "");
    assert_eq!(broken.price_per_area_display, "");
    assert_eq!(broken.roi_display, "");

    for (i, rec) in records.iter().enumerate() {
        if i == 2 {
            continue;
        }
        assert_eq!(rec.bedrooms, "2", "row {i}");
        // 300000 + 15 (VAT normalizes to 15) → 300,015
        assert_eq!(rec.total_cost_display, "300,015", "row {i}");
        assert_eq!(rec.price_per_area_display, "2,500", "row {i}");
        assert_eq!(rec.roi_display, "4.0%", "row {i}");
    }
}

#[test]
fn csv_to_pdf_end_to_end() {
    let input = write_file("units.csv", &ten_row_csv());
    let output = temp_dir().join("report.pdf");

    unitdeck::generate_from_csv(&input, &output, &ReportConfig::default()).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF-"), "not a PDF header");
    assert!(bytes.len() > 1000, "suspiciously small PDF: {}", bytes.len());

    // Single page document.
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Count 1"));
}

#[test]
fn extraction_payload_to_pdf() {
    let json = br#"{
        "description": ["A fine development.", "Close to everything."],
        "units": [
            {"unit_id": "A101", "typology": "2 bedrooms",
             "total_covered_area": "1,250", "asking_price": "$750,000",
             "rental_rate": "$2,800"}
        ]
    }"#;
    let input = write_file("brochure.json", json);
    let output = temp_dir().join("brochure.pdf");

    unitdeck::generate_from_extraction(&input, &output, &ReportConfig::default()).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn missing_source_is_fatal_and_leaves_no_artifact() {
    let input = temp_dir().join("does_not_exist.csv");
    let output = temp_dir().join("never_written.pdf");

    let result = unitdeck::generate_from_csv(&input, &output, &ReportConfig::default());
    assert!(result.is_err());
    assert!(!output.exists(), "partial artifact left behind");
}

#[test]
fn oversized_batch_still_renders() {
    // More rows than the table can show; rendering truncates, not fails.
    let mut data = String::from(CSV_HEADER);
    for i in 1..=40u32 {
        data.push_str(&format!("U{i},1,1 bedroom,50,70,\"€100,000\",,,\n"));
    }
    let input = write_file("oversized.csv", data.as_bytes());
    let records = unitdeck::load_csv(&input).unwrap();
    assert_eq!(records.len(), 40);

    let report = ReportInput {
        description: Vec::new(),
        units: records,
    };
    let bytes = unitdeck::render_report(&report, &ReportConfig::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}
