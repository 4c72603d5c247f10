use serde::Deserialize;

/// One raw listing row as it arrives from the CSV or the extraction
/// collaborator. Every field is optional free-form text: the extraction
/// pipeline makes no promises about which keys are present, and CSV exports
/// routinely carry currency symbols, unit suffixes and thousands separators.
/// Field names match the CSV headers; the snake_case aliases cover the
/// extraction collaborator, which emits loosely keyed JSON objects.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawUnitRow {
    #[serde(default, rename = "Unit ID", alias = "unit_id")]
    pub unit_id: Option<String>,
    #[serde(default, rename = "Floor", alias = "floor")]
    pub floor: Option<String>,
    #[serde(default, rename = "Typology", alias = "typology")]
    pub typology: Option<String>,
    #[serde(default, rename = "Internal Area", alias = "internal_area")]
    pub internal_area: Option<String>,
    #[serde(default, rename = "Total Covered Area", alias = "total_covered_area")]
    pub total_covered_area: Option<String>,
    #[serde(default, rename = "Asking Price", alias = "asking_price")]
    pub asking_price: Option<String>,
    #[serde(default, rename = "VAT", alias = "vat")]
    pub vat: Option<String>,
    #[serde(default, rename = "Transfer Fee", alias = "transfer_fee")]
    pub transfer_fee: Option<String>,
    #[serde(default, rename = "Rental Rate", alias = "rental_rate")]
    pub rental_rate: Option<String>,
}

/// Which of the two mutually exclusive cost add-ons applies to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaxKind {
    Vat,
    TransferFee,
    None,
}

impl TaxKind {
    pub fn label(self) -> &'static str {
        match self {
            TaxKind::Vat => "VAT",
            TaxKind::TransferFee => "Transfer Fee",
            TaxKind::None => "",
        }
    }
}

/// A normalized, display-ready unit record. Built once per input row and
/// never mutated afterwards. Derived metrics are `None` when they could not
/// be computed; a computed zero stays `Some(0.0)` so "zero" and "unavailable"
/// remain distinguishable downstream.
#[derive(Clone, Debug)]
pub struct UnitRecord {
    pub unit_id: String,
    pub floor: String,
    pub bedrooms: String,
    pub internal_area: String,
    pub total_covered_area: String,
    pub asking_price: String,
    pub tax_kind: TaxKind,
    pub tax_display: String,
    pub total_cost: Option<f64>,
    pub price_per_area: Option<f64>,
    pub roi_percent: Option<f64>,
    pub total_cost_display: String,
    pub price_per_area_display: String,
    pub roi_display: String,
    pub rental_rate: String,
}

/// Description lines plus unit rows — the full payload the renderer consumes.
pub struct ReportInput {
    pub description: Vec<String>,
    pub units: Vec<UnitRecord>,
}

pub type Rgb = [u8; 3];

/// Visual configuration for the rendered page. An explicit value passed into
/// the renderer rather than process-wide constants, so two reports with
/// different branding can be generated from the same process.
#[derive(Clone, Debug)]
pub struct ReportStyle {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    /// Fraction of the page height reserved for the header banner.
    pub header_frac: f32,
    pub primary_color: Rgb,
    pub secondary_color: Rgb,
    pub background_color: Rgb,
    pub title_size: f32,
    pub body_size: f32,
    pub table_size: f32,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            // US letter in points
            page_width: 612.0,
            page_height: 792.0,
            margin: 50.0,
            header_frac: 0.15,
            primary_color: [0x18, 0x66, 0x85],
            secondary_color: [0x50, 0xad, 0xc9],
            background_color: [0xe2, 0xec, 0xf4],
            title_size: 24.0,
            body_size: 10.0,
            table_size: 8.0,
        }
    }
}

/// Footer contact block. The left column is the address, the middle column
/// is centered on the page, the right column is right-aligned at the margin.
#[derive(Clone, Debug)]
pub struct FooterInfo {
    pub company: String,
    pub address: Vec<String>,
    pub center: Vec<String>,
    pub right: Vec<String>,
}

impl Default for FooterInfo {
    fn default() -> Self {
        Self {
            company: "COMPANY NAME".into(),
            address: vec![
                "123 Business Avenue, Suite 500".into(),
                "New York, NY 10001".into(),
            ],
            center: vec!["Tel: (555) 123-4567".into(), "info@companyname.com".into()],
            right: vec!["www.companyname.com".into(), "LinkedIn: @companyname".into()],
        }
    }
}

/// Everything that varies between two report generations: title, optional
/// banner image, footer contact details and the style object.
#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub title: String,
    pub header_image: Option<std::path::PathBuf>,
    pub footer: FooterInfo,
    pub style: ReportStyle,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Investment Opportunity".into(),
            header_image: None,
            footer: FooterInfo::default(),
            style: ReportStyle::default(),
        }
    }
}
