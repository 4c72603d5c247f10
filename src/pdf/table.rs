//! The units comparison table: header row plus one row per unit, laid out
//! with the proportional column planner and centered cell text.

use pdf_writer::{Content, Name, Str};

use crate::fonts::{FontEntry, to_winansi_bytes};
use crate::model::{ReportStyle, UnitRecord};

use super::layout::{ColumnSpec, center_text, plan_columns};
use super::set_fill;

/// Rows that fit the fixed content area on letter paper. Longer batches are
/// truncated, not paginated.
pub(super) const MAX_UNIT_ROWS: usize = 16;

const HEADER_ROW_H: f32 = 20.0;
const DATA_ROW_H: f32 = 18.0;

/// Column set for the comparison table. Nominal widths are relative; the
/// planner scales them to the page's content width.
const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("Unit", 30.0),
    ColumnSpec::new("Floor", 24.0),
    ColumnSpec::new("Beds", 22.0),
    ColumnSpec::new("Int. m2", 32.0),
    ColumnSpec::new("Total m2", 34.0),
    ColumnSpec::new("Price", 44.0),
    ColumnSpec::new("Tax", 40.0),
    ColumnSpec::new("Total Cost", 46.0),
    ColumnSpec::new("Price/m2", 36.0),
    ColumnSpec::new("Rent", 36.0),
    ColumnSpec::new("ROI", 26.0),
];

fn cell_values(unit: &UnitRecord) -> [&str; 11] {
    [
        &unit.unit_id,
        &unit.floor,
        &unit.bedrooms,
        &unit.internal_area,
        &unit.total_covered_area,
        &unit.asking_price,
        &unit.tax_display,
        &unit.total_cost_display,
        &unit.price_per_area_display,
        &unit.rental_rate,
        &unit.roi_display,
    ]
}

/// Pre-truncate a string so its rendered width fits the cell. The centering
/// routine itself never clamps, so overly long values are cut here, with an
/// ellipsis when anything was removed.
fn fit_text(text: &str, font: &FontEntry, font_size: f32, max_width: f32) -> String {
    if font.text_width(text, font_size) <= max_width {
        return text.to_string();
    }
    let ellipsis_w = font.text_width("…", font_size);
    let mut out = String::new();
    let mut width = 0.0;
    for ch in text.chars() {
        let w = font.text_width(ch.encode_utf8(&mut [0; 4]), font_size);
        if width + w + ellipsis_w > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

fn draw_centered(
    content: &mut Content,
    font: &FontEntry,
    font_size: f32,
    text: &str,
    cell_left: f32,
    cell_width: f32,
    cell_top: f32,
    cell_bottom: f32,
) {
    if text.is_empty() {
        return;
    }
    let fitted = fit_text(text, font, font_size, cell_width - 4.0);
    let text_w = font.text_width(&fitted, font_size);
    let (x, y) = center_text(cell_left, cell_width, cell_top, cell_bottom, text_w, font_size);
    content
        .begin_text()
        .set_font(Name(font.pdf_name.as_bytes()), font_size)
        .next_line(x, y)
        .show(Str(&to_winansi_bytes(&fitted)))
        .end_text();
}

/// Render the table starting at `table_top`; returns the y of its bottom
/// edge. Column geometry is planned once and shared by the header and every
/// data row.
pub(super) fn render_units_table(
    content: &mut Content,
    units: &[UnitRecord],
    style: &ReportStyle,
    regular: &FontEntry,
    bold: &FontEntry,
    table_top: f32,
) -> f32 {
    let content_width = style.page_width - 2.0 * style.margin;
    let layout = plan_columns(COLUMNS, content_width, style.margin);

    let shown = if units.len() > MAX_UNIT_ROWS {
        log::warn!(
            "unit table truncated: {} rows, showing first {MAX_UNIT_ROWS}",
            units.len()
        );
        &units[..MAX_UNIT_ROWS]
    } else {
        units
    };

    // Header row: primary-color band with white labels.
    let header_bottom = table_top - HEADER_ROW_H;
    set_fill(content, style.primary_color);
    content.rect(style.margin, header_bottom, content_width, HEADER_ROW_H);
    content.fill_nonzero();

    set_fill(content, [0xff, 0xff, 0xff]);
    for col in &layout.columns {
        draw_centered(
            content,
            bold,
            style.table_size,
            col.label,
            col.x,
            col.width,
            table_top,
            header_bottom,
        );
    }

    let mut row_top = header_bottom;
    for (i, unit) in shown.iter().enumerate() {
        let row_bottom = row_top - DATA_ROW_H;

        // Alternating row background for readability.
        if i % 2 == 1 {
            set_fill(content, style.background_color);
            content.rect(style.margin, row_bottom, content_width, DATA_ROW_H);
            content.fill_nonzero();
        }

        set_fill(content, style.primary_color);
        for (col, value) in layout.columns.iter().zip(cell_values(unit)) {
            draw_centered(
                content,
                regular,
                style.table_size,
                value,
                col.x,
                col.width,
                row_top,
                row_bottom,
            );
        }

        // Row separator in the secondary color.
        content.save_state();
        content.set_line_width(0.5);
        let [r, g, b] = style.secondary_color;
        content.set_stroke_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        content.move_to(style.margin, row_bottom);
        content.line_to(layout.right_edge(), row_bottom);
        content.stroke();
        content.restore_state();

        row_top = row_bottom;
    }

    log::debug!(
        "units table: {} rows rendered, bottom at y={:.1}",
        shown.len(),
        row_top
    );

    row_top
}
