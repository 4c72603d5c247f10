mod error;
mod fonts;
mod ingest;
mod model;
mod pdf;
mod units;

pub use error::Error;
pub use ingest::{load_csv, load_extraction, placeholder_description, placeholder_units};
pub use model::{
    FooterInfo, RawUnitRow, ReportConfig, ReportInput, ReportStyle, TaxKind, UnitRecord,
};
pub use pdf::{CENTER_K, ColumnLayout, ColumnSpec, PlannedColumn, center_text, plan_columns};
pub use units::{
    Metrics, TaxChoice, build_unit_record, build_unit_records, derive_metrics, normalize_numeric,
    resolve_tax,
};

use std::path::Path;
use std::time::Instant;

/// Render a report from pre-built input, returning the PDF bytes.
pub fn render_report(input: &ReportInput, config: &ReportConfig) -> Result<Vec<u8>, Error> {
    pdf::render(input, config)
}

/// Generate a report page from a units CSV. The output file is written only
/// after rendering succeeds, so a failure never leaves a partial artifact
/// behind.
pub fn generate_from_csv(input: &Path, output: &Path, config: &ReportConfig) -> Result<(), Error> {
    let t0 = Instant::now();

    let units = ingest::load_csv(input)?;
    let t_load = t0.elapsed();

    let report = ReportInput {
        description: Vec::new(),
        units,
    };
    let bytes = pdf::render(&report, config)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: load={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_load.as_secs_f64() * 1000.0,
        (t_render - t_load).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

/// Generate a report page from a brochure-extraction JSON payload
/// (description lines plus loosely keyed unit objects).
pub fn generate_from_extraction(
    input: &Path,
    output: &Path,
    config: &ReportConfig,
) -> Result<(), Error> {
    let t0 = Instant::now();

    let report = ingest::load_extraction(input)?;
    let t_load = t0.elapsed();

    let bytes = pdf::render(&report, config)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: load={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_load.as_secs_f64() * 1000.0,
        (t_render - t_load).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}
