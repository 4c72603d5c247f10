//! Table geometry: proportional column planning and in-cell text centering.

/// A named column with its desired relative width before scaling.
#[derive(Clone, Debug)]
pub struct ColumnSpec {
    pub label: &'static str,
    pub nominal: f32,
}

impl ColumnSpec {
    pub const fn new(label: &'static str, nominal: f32) -> Self {
        Self { label, nominal }
    }
}

/// A column after planning: absolute left edge and final width.
#[derive(Clone, Debug)]
pub struct PlannedColumn {
    pub label: &'static str,
    pub x: f32,
    pub width: f32,
}

/// Column geometry for one table, computed once and reused for the header
/// row and every data row.
#[derive(Clone, Debug)]
pub struct ColumnLayout {
    pub columns: Vec<PlannedColumn>,
    pub total_width: f32,
}

impl ColumnLayout {
    pub fn right_edge(&self) -> f32 {
        self.columns
            .last()
            .map(|c| c.x + c.width)
            .unwrap_or(self.total_width)
    }
}

/// Scale nominal widths so the final widths sum to `total_width` exactly.
///
/// Each column gets `floor(nominal * scale)`; the rounding remainder goes to
/// the last column, which keeps every other column's truncation error below
/// one point while guaranteeing the exact total. Order is preserved and
/// offsets are a running prefix sum from `left`.
pub fn plan_columns(specs: &[ColumnSpec], total_width: f32, left: f32) -> ColumnLayout {
    let nominal_sum: f32 = specs.iter().map(|s| s.nominal).sum();
    if specs.is_empty() || nominal_sum <= 0.0 {
        return ColumnLayout {
            columns: Vec::new(),
            total_width,
        };
    }

    let scale = total_width / nominal_sum;
    let mut widths: Vec<f32> = specs.iter().map(|s| (s.nominal * scale).floor()).collect();

    let assigned: f32 = widths.iter().sum();
    let remainder = total_width - assigned;
    if let Some(last) = widths.last_mut() {
        *last += remainder;
    }

    let mut x = left;
    let columns = specs
        .iter()
        .zip(widths)
        .map(|(spec, width)| {
            let col = PlannedColumn {
                label: spec.label,
                x,
                width,
            };
            x += width;
            col
        })
        .collect();

    ColumnLayout {
        columns,
        total_width,
    }
}

/// Vertical centering correction: a font's nominal size overstates its
/// visual height (ascenders/descenders), so the baseline sits this fraction
/// of the font size above the geometric center offset. One constant for the
/// whole report; do not re-derive per call site.
pub const CENTER_K: f32 = 0.3;

/// Draw origin that centers `text_width`-wide text in the given cell on both
/// axes. Deliberately unclamped: text wider than the cell gets a negative
/// x offset and overflows symmetrically — pre-truncating long strings is the
/// caller's responsibility.
pub fn center_text(
    cell_left: f32,
    cell_width: f32,
    cell_top: f32,
    cell_bottom: f32,
    text_width: f32,
    font_size: f32,
) -> (f32, f32) {
    let x = cell_left + (cell_width - text_width) / 2.0;
    let cell_height = cell_top - cell_bottom;
    let y = cell_bottom + (cell_height - font_size) / 2.0 + font_size * CENTER_K;
    (x, y)
}
