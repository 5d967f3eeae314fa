//! Invoice as a minimal WordprocessingML package.
//!
//! The package holds three parts: content types, the package relationships
//! and the document body. Runs use direct formatting so no styles part is
//! needed.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{InvoiceError, InvoiceResult};
use crate::models::Invoice;

use super::INVOICE_TABLE_HEADERS;
use super::money::{invoice_table_rows, total_lines};

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Renders the invoice as docx bytes.
///
/// Layout: a bold "INVOICE" title, the date and upper-cased department, a
/// bordered line-item table, a blank paragraph and the three total lines.
pub fn render_invoice_docx(invoice: &Invoice) -> InvoiceResult<Vec<u8>> {
    let document = document_xml(invoice)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::<()>::default().compression_method(CompressionMethod::Deflated);

    for (name, body) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", PACKAGE_RELS_XML),
        ("word/document.xml", document.as_str()),
    ] {
        zip.start_file(name, options)
            .map_err(|e| InvoiceError::export("docx", e))?;
        zip.write_all(body.as_bytes())
            .map_err(|e| InvoiceError::export("docx", e))?;
    }

    let cursor = zip.finish().map_err(|e| InvoiceError::export("docx", e))?;
    Ok(cursor.into_inner())
}

fn document_xml(invoice: &Invoice) -> InvoiceResult<String> {
    let mut body = String::new();

    body.push_str(&paragraph("INVOICE", Some(32), true));
    body.push_str(&paragraph(
        &format!("Date: {}", invoice.date.format("%Y-%m-%d")),
        None,
        false,
    ));
    body.push_str(&paragraph(
        &format!("Department: {}", invoice.department.to_uppercase()),
        None,
        false,
    ));

    body.push_str(&line_item_table(invoice));

    body.push_str(&paragraph("", None, false));
    for line in total_lines(invoice)? {
        body.push_str(&paragraph(&line, None, false));
    }

    Ok(format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{DOCUMENT_NS}"><w:body>{body}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    ))
}

fn line_item_table(invoice: &Invoice) -> String {
    let border = |side: &str| format!(r#"<w:{side} w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#);
    let borders: String = ["top", "left", "bottom", "right", "insideH", "insideV"]
        .iter()
        .map(|side| border(*side))
        .collect();

    let mut xml = format!(
        r#"<w:tbl><w:tblPr><w:tblW w:w="0" w:type="auto"/><w:tblBorders>{borders}</w:tblBorders></w:tblPr>"#
    );

    xml.push_str(&table_row(INVOICE_TABLE_HEADERS.iter().copied(), true));
    for row in invoice_table_rows(invoice) {
        xml.push_str(&table_row(row.iter().map(String::as_str), false));
    }

    xml.push_str("</w:tbl>");
    xml
}

fn table_row<'a>(cells: impl Iterator<Item = &'a str>, bold: bool) -> String {
    let cells: String = cells
        .map(|text| format!("<w:tc>{}</w:tc>", paragraph(text, None, bold)))
        .collect();
    format!("<w:tr>{cells}</w:tr>")
}

/// A paragraph with one run. `size` is in half-points.
fn paragraph(text: &str, size: Option<u32>, bold: bool) -> String {
    if text.is_empty() {
        return "<w:p/>".to_string();
    }

    let mut props = String::new();
    if bold {
        props.push_str("<w:b/>");
    }
    if let Some(size) = size {
        props.push_str(&format!(r#"<w:sz w:val="{size}"/>"#));
    }
    let run_props = if props.is_empty() {
        String::new()
    } else {
        format!("<w:rPr>{props}</w:rPr>")
    };

    format!(
        r#"<w:p><w:r>{run_props}<w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape(text)
    )
}
