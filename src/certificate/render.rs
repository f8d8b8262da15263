use printpdf::{
    path::PaintMode, BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference,
    Rect, Rgb,
};
use time::Date;
use tracing::debug;

use super::layout::{
    CertificateLayout, CertificateRequest, Rgb8, Weight, BACKGROUND, BORDER_INSET,
    BORDER_THICKNESS_PT, NAVY, PAGE_HEIGHT, PAGE_WIDTH,
};

/// Draws the certificate and returns the PDF bytes.
pub fn render(req: &CertificateRequest, date: Date) -> anyhow::Result<Vec<u8>> {
    let layout = CertificateLayout::new(req, date);

    let (doc, page, layer) = PdfDocument::new(
        "Certificate of Achievement",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "certificate",
    );
    let canvas = doc.get_page(page).get_layer(layer);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    canvas.set_fill_color(color(BACKGROUND));
    canvas.add_rect(
        Rect::new(Mm(0.0), Mm(0.0), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT)).with_mode(PaintMode::Fill),
    );

    canvas.set_outline_color(color(NAVY));
    canvas.set_outline_thickness(BORDER_THICKNESS_PT);
    canvas.add_rect(
        Rect::new(
            Mm(BORDER_INSET),
            Mm(BORDER_INSET),
            Mm(PAGE_WIDTH - BORDER_INSET),
            Mm(PAGE_HEIGHT - BORDER_INSET),
        )
        .with_mode(PaintMode::Stroke),
    );

    draw_texts(&canvas, &layout, &regular, &bold);

    let u = layout.title_underline;
    canvas.set_fill_color(color(NAVY));
    canvas.add_rect(
        Rect::new(Mm(u.x1), Mm(u.y - 0.25), Mm(u.x2), Mm(u.y + 0.25)).with_mode(PaintMode::Fill),
    );

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    debug!(size = bytes.len(), "certificate rendered");
    Ok(bytes)
}

fn draw_texts(
    canvas: &PdfLayerReference,
    layout: &CertificateLayout,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for item in &layout.texts {
        let font = match item.weight {
            Weight::Regular => regular,
            Weight::Bold => bold,
        };
        canvas.set_fill_color(color(item.color));
        canvas.use_text(item.text.clone(), item.size, Mm(item.x), Mm(item.y), font);
    }
}

fn color(c: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(c.0) / 255.0,
        f32::from(c.1) / 255.0,
        f32::from(c.2) / 255.0,
        None,
    ))
}
