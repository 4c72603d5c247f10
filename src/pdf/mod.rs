//! One-page report rendering via pdf-writer.
//!
//! The page is assembled top-down: banner image (or a placeholder band),
//! centered title, property description block, the units comparison table,
//! and the company footer. All geometry comes from the `ReportStyle` passed
//! in — nothing here reads process-wide state.

mod layout;
mod table;

pub use layout::{CENTER_K, ColumnLayout, ColumnSpec, PlannedColumn, center_text, plan_columns};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::error::Error;
use crate::fonts::{FontEntry, FontVariant, register_font, to_winansi_bytes};
use crate::model::{ReportConfig, ReportInput, Rgb};

use table::render_units_table;

pub(crate) fn set_fill(content: &mut Content, [r, g, b]: Rgb) {
    content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
}

fn set_stroke(content: &mut Content, [r, g, b]: Rgb) {
    content.set_stroke_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
}

/// Center-crop the banner to the header area's aspect ratio: a
/// proportionally wider image loses its sides, a taller one loses top and
/// bottom, so the banner always fills the header without distortion.
fn crop_to_ratio(img: image::DynamicImage, target_ratio: f32) -> image::DynamicImage {
    let (w, h) = (img.width() as f32, img.height() as f32);
    if w / h > target_ratio {
        let crop_w = (h * target_ratio).round() as u32;
        let left = (img.width() - crop_w) / 2;
        img.crop_imm(left, 0, crop_w, img.height())
    } else {
        let crop_h = (w / target_ratio).round() as u32;
        let top = (img.height() - crop_h) / 2;
        img.crop_imm(0, top, img.width(), crop_h)
    }
}

/// Decode, crop and embed the banner as a Flate-compressed RGB XObject.
/// Returns `None` (after logging) when the image cannot be used, so the
/// caller can draw the placeholder band instead.
fn embed_header_image(
    pdf: &mut Pdf,
    path: &std::path::Path,
    target_ratio: f32,
    xobj_ref: Ref,
) -> Option<()> {
    let img = match image::open(path) {
        Ok(img) => img,
        Err(e) => {
            log::warn!(
                "header image {} unusable ({e}) — substituting placeholder band",
                path.display()
            );
            return None;
        }
    };

    let rgb = crop_to_ratio(img, target_ratio).to_rgb8();
    let (w, h) = (rgb.width(), rgb.height());
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(rgb.as_raw(), 6);

    let mut xobj = pdf.image_xobject(xobj_ref, &compressed);
    xobj.filter(Filter::FlateDecode);
    xobj.width(w as i32);
    xobj.height(h as i32);
    xobj.color_space().device_rgb();
    xobj.bits_per_component(8);
    Some(())
}

fn draw_text(content: &mut Content, font: &FontEntry, size: f32, x: f32, y: f32, text: &str) {
    content
        .begin_text()
        .set_font(Name(font.pdf_name.as_bytes()), size)
        .next_line(x, y)
        .show(Str(&to_winansi_bytes(text)))
        .end_text();
}

fn draw_text_centered(
    content: &mut Content,
    font: &FontEntry,
    size: f32,
    center_x: f32,
    y: f32,
    text: &str,
) {
    let w = font.text_width(text, size);
    draw_text(content, font, size, center_x - w / 2.0, y, text);
}

fn draw_text_right(
    content: &mut Content,
    font: &FontEntry,
    size: f32,
    right_x: f32,
    y: f32,
    text: &str,
) {
    let w = font.text_width(text, size);
    draw_text(content, font, size, right_x - w, y, text);
}

/// Render the full report page and return the finished PDF bytes.
pub fn render(input: &ReportInput, config: &ReportConfig) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let style = &config.style;

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let page_id = alloc();
    let content_id = alloc();

    let regular = register_font(&mut pdf, FontVariant::Regular, "F1".into(), alloc());
    let bold = register_font(&mut pdf, FontVariant::Bold, "F2".into(), alloc());

    let header_height = style.page_height * style.header_frac;
    let header_ratio = style.page_width / header_height;

    // Banner image, if configured and decodable.
    let image_ref = alloc();
    let header_image = config
        .header_image
        .as_deref()
        .and_then(|path| embed_header_image(&mut pdf, path, header_ratio, image_ref));

    let mut content = Content::new();

    // White page background.
    set_fill(&mut content, [0xff, 0xff, 0xff]);
    content.rect(0.0, 0.0, style.page_width, style.page_height);
    content.fill_nonzero();

    // Header area: full-bleed banner, or a flat band in the secondary color
    // when no image is available.
    let header_bottom = style.page_height - header_height;
    if header_image.is_some() {
        content.save_state();
        content.transform([
            style.page_width,
            0.0,
            0.0,
            header_height,
            0.0,
            header_bottom,
        ]);
        content.x_object(Name(b"Im1"));
        content.restore_state();
    } else {
        set_fill(&mut content, style.secondary_color);
        content.rect(0.0, header_bottom, style.page_width, header_height);
        content.fill_nonzero();
    }

    // Title, centered below the header.
    set_fill(&mut content, style.primary_color);
    draw_text_centered(
        &mut content,
        &bold,
        style.title_size,
        style.page_width / 2.0,
        header_bottom - 40.0,
        &config.title,
    );

    // Description block.
    let mut cursor_y = header_bottom - 80.0;
    if !input.description.is_empty() {
        draw_text(
            &mut content,
            &bold,
            12.0,
            style.margin,
            cursor_y,
            "Property Overview",
        );
        cursor_y -= 20.0;
        for line in &input.description {
            draw_text(&mut content, &regular, style.body_size, style.margin + 20.0, cursor_y, line);
            cursor_y -= 15.0;
        }
        cursor_y -= 10.0;
    }

    // Units table.
    draw_text(&mut content, &bold, 12.0, style.margin, cursor_y, "Available Units");
    let table_top = cursor_y - 10.0;
    render_units_table(&mut content, &input.units, style, &regular, &bold, table_top);

    // Footer: separator, company name, three contact columns.
    let footer_top = 40.0;
    content.save_state();
    content.set_line_width(0.75);
    set_stroke(&mut content, style.secondary_color);
    content.move_to(style.margin, footer_top + 10.0);
    content.line_to(style.page_width - style.margin, footer_top + 10.0);
    content.stroke();
    content.restore_state();

    set_fill(&mut content, style.primary_color);
    draw_text(
        &mut content,
        &bold,
        9.0,
        style.margin,
        footer_top - 10.0,
        &config.footer.company,
    );

    set_fill(&mut content, style.secondary_color);
    let center_x = style.page_width / 2.0;
    for (i, line) in config.footer.address.iter().enumerate() {
        let y = footer_top - 22.0 - 10.0 * i as f32;
        draw_text(&mut content, &regular, 8.0, style.margin, y, line);
    }
    for (i, line) in config.footer.center.iter().enumerate() {
        let y = footer_top - 22.0 - 10.0 * i as f32;
        draw_text_centered(&mut content, &regular, 8.0, center_x, y, line);
    }
    for (i, line) in config.footer.right.iter().enumerate() {
        let y = footer_top - 22.0 - 10.0 * i as f32;
        draw_text_right(&mut content, &regular, 8.0, style.page_width - style.margin, y, line);
    }

    // Assemble the document.
    let raw = content.finish();
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
    pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);

    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, style.page_width, style.page_height))
            .parent(pages_id)
            .contents(content_id);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            fonts.pair(Name(b"F1"), regular.font_ref);
            fonts.pair(Name(b"F2"), bold.font_ref);
        }
        if header_image.is_some() {
            resources.x_objects().pair(Name(b"Im1"), image_ref);
        }
    }

    log::info!(
        "Rendered report: {} unit(s), {} description line(s), {:.1}ms",
        input.units.len(),
        input.description.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(pdf.finish())
}
