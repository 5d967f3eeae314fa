//! Invoice as a single A4 PDF page, drawn with `printpdf`.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
};

use crate::error::{InvoiceError, InvoiceResult};
use crate::models::Invoice;

use super::INVOICE_TABLE_HEADERS;
use super::money::{invoice_table_rows, total_lines};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const ROW_HEIGHT: f32 = 8.0;
const COLUMN_WIDTHS: [f32; 5] = [10.0, 80.0, 20.0, 40.0, 40.0];
const CELL_PADDING: f32 = 1.5;
const TEXT_SIZE: f32 = 10.0;

/// Renders the invoice as pdf bytes.
///
/// Layout: a centered bold "INVOICE" title, the date and department lines, a
/// bordered line-item table and the three total lines.
pub fn render_invoice_pdf(invoice: &Invoice) -> InvoiceResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}", invoice.department),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| InvoiceError::export("pdf", e))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| InvoiceError::export("pdf", e))?;

    let mut y = PAGE_HEIGHT - 20.0;
    layer.use_text("INVOICE", 16.0, Mm(PAGE_WIDTH / 2.0 - 12.0), Mm(y), &font_bold);
    y -= 12.0;

    layer.use_text(
        format!("Date: {}", invoice.date.format("%Y-%m-%d")),
        TEXT_SIZE,
        Mm(MARGIN),
        Mm(y),
        &font,
    );
    y -= ROW_HEIGHT;
    layer.use_text(
        format!("Department: {}", invoice.department),
        TEXT_SIZE,
        Mm(MARGIN),
        Mm(y),
        &font,
    );
    y -= ROW_HEIGHT + 4.0;

    table_row(&layer, &font_bold, INVOICE_TABLE_HEADERS.iter().copied(), y);
    y -= ROW_HEIGHT;
    for row in invoice_table_rows(invoice) {
        table_row(&layer, &font, row.iter().map(String::as_str), y);
        y -= ROW_HEIGHT;
    }

    y -= 6.0;
    for line in total_lines(invoice)? {
        layer.use_text(line, TEXT_SIZE, Mm(MARGIN), Mm(y), &font);
        y -= ROW_HEIGHT;
    }

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| InvoiceError::export("pdf", e))?;
    writer
        .into_inner()
        .map_err(|e| InvoiceError::export("pdf", e))
}

/// Draws one bordered table row whose top edge is at `top`.
fn table_row<'a>(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    cells: impl Iterator<Item = &'a str>,
    top: f32,
) {
    let bottom = top - ROW_HEIGHT;
    let mut x = MARGIN;

    for (text, width) in cells.zip(COLUMN_WIDTHS) {
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x), Mm(top)), false),
                (Point::new(Mm(x + width), Mm(top)), false),
                (Point::new(Mm(x + width), Mm(bottom)), false),
                (Point::new(Mm(x), Mm(bottom)), false),
            ],
            is_closed: true,
        });

        if !text.is_empty() {
            layer.use_text(
                text,
                TEXT_SIZE,
                Mm(x + CELL_PADDING),
                Mm(bottom + 2.5),
                font,
            );
        }
        x += width;
    }
}
