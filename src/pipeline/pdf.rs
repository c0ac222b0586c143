//! PDF serialisation of a rendered [`Document`] via `lopdf`.
//!
//! The output uses only the standard-14 Type1 fonts with WinAnsiEncoding, so
//! nothing is embedded. Each page gets one FlateDecode content stream; all
//! pages share a single resources dictionary. No timestamps are written,
//! which keeps the bytes identical for identical input.

use super::metrics::encode_winansi;
use crate::document::{Document, Primitive};
use crate::error::Summary2PdfError;
use crate::style::{Font, Rgb};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, ObjectId, Stream, StringFormat};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Value written to the `/Producer` info entry.
pub const PRODUCER: &str = concat!("summary2pdf ", env!("CARGO_PKG_VERSION"));

fn pdf_err(e: impl std::fmt::Display) -> Summary2PdfError {
    Summary2PdfError::PdfWrite(e.to_string())
}

/// Serialise `doc` to PDF 1.7 bytes.
pub fn to_pdf_bytes(doc: &Document) -> Result<Vec<u8>, Summary2PdfError> {
    let mut pdf = lopdf::Document::with_version("1.7");
    let pages_id = pdf.new_object_id();

    // Resource names are assigned in font order so output is stable.
    let mut font_names: BTreeMap<Font, String> = BTreeMap::new();
    let mut font_dict = lopdf::Dictionary::new();
    for (i, font) in doc.fonts().into_iter().enumerate() {
        let name = format!("F{}", i + 1);
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        font_dict.set(name.as_bytes().to_vec(), font_id);
        font_names.insert(font, name);
    }
    let resources_id = pdf.add_object(dictionary! { "Font" => font_dict });

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let mut ops = Vec::new();
        let primitives = page
            .blocks
            .iter()
            .flat_map(|b| b.primitives.iter())
            .chain(page.furniture.iter());
        for prim in primitives {
            emit(&mut ops, prim, doc.height, &font_names)?;
        }
        let content = Content { operations: ops };

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&content.encode().map_err(pdf_err)?)
            .map_err(pdf_err)?;
        let compressed = encoder.finish().map_err(pdf_err)?;
        let content_id =
            pdf.add_object(Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed));

        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), doc.width.into(), doc.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    pdf.trailer.set("Root", catalog_id);

    let mut info = dictionary! {
        "Producer" => Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal),
    };
    if let Some(ref title) = doc.title {
        info.set("Title", text_string(title));
    }
    let info_id = pdf.add_object(info);
    pdf.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes).map_err(pdf_err)?;
    debug!(
        "Serialised {} page(s), {} font(s), {} bytes",
        page_ids.len(),
        font_names.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Serialise `doc` and write it to `path` atomically (temp file + rename).
///
/// Parent directories are created as needed. Returns the number of bytes
/// written.
pub fn write_pdf(doc: &Document, path: impl AsRef<Path>) -> Result<u64, Summary2PdfError> {
    let path = path.as_ref();
    let bytes = to_pdf_bytes(doc)?;
    let write_err = |e| Summary2PdfError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&bytes).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(bytes.len() as u64)
}

/// A PDF text string: literal for ASCII, otherwise UTF-16BE with a BOM.
fn text_string(s: &str) -> Object {
    if s.is_ascii() {
        return Object::String(s.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(s.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

// ── Content stream operators ─────────────────────────────────────────────

fn color_operands(c: Rgb) -> Vec<Object> {
    c.unit().into_iter().map(Object::from).collect()
}

fn emit(
    ops: &mut Vec<Operation>,
    prim: &Primitive,
    page_height: f32,
    fonts: &BTreeMap<Font, String>,
) -> Result<(), Summary2PdfError> {
    match prim {
        Primitive::Fill { rect, color } => {
            ops.push(Operation::new("rg", color_operands(*color)));
            ops.push(Operation::new(
                "re",
                vec![
                    rect.x.into(),
                    (page_height - rect.bottom()).into(),
                    rect.width.into(),
                    rect.height.into(),
                ],
            ));
            ops.push(Operation::new("f", vec![]));
        }
        Primitive::Rule {
            x1,
            y1,
            x2,
            y2,
            thickness,
            color,
        } => {
            ops.push(Operation::new("w", vec![(*thickness).into()]));
            ops.push(Operation::new("RG", color_operands(*color)));
            ops.push(Operation::new("m", vec![(*x1).into(), (page_height - y1).into()]));
            ops.push(Operation::new("l", vec![(*x2).into(), (page_height - y2).into()]));
            ops.push(Operation::new("S", vec![]));
        }
        Primitive::Text {
            x,
            baseline,
            text,
            font,
            size,
            color,
            word_spacing,
        } => {
            let name = fonts.get(font).ok_or_else(|| {
                Summary2PdfError::Internal(format!("font {} missing from resources", font.base_name()))
            })?;
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![Object::Name(name.as_bytes().to_vec()), (*size).into()],
            ));
            ops.push(Operation::new("rg", color_operands(*color)));
            ops.push(Operation::new("Tw", vec![(*word_spacing).into()]));
            ops.push(Operation::new(
                "Td",
                vec![(*x).into(), (page_height - baseline).into()],
            ));
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(encode_winansi(text), StringFormat::Literal)],
            ));
            ops.push(Operation::new("ET", vec![]));
        }
    }
    Ok(())
}
