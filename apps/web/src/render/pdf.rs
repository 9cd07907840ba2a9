//! Serializes laid-out pages into a PDF document with `lopdf`.
//!
//! Object graph: Catalog → Pages → Page* (shared Resources → TrueType Font →
//! FontDescriptor → FontFile2). Each page has one content stream with one
//! `BT … ET` block per line.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::render::font::{encode_win_ansi, EmbeddedFont, FIRST_CHAR, LAST_CHAR};
use crate::render::layout::{PageGeometry, PlacedLine};
use crate::render::RenderError;

/// Resource name the content streams use for the embedded font.
const FONT_RESOURCE: &str = "F1";
/// Nonsymbolic: the font uses the standard Latin character set.
const FONT_FLAGS: i64 = 32;
const FONT_STEM_V: i64 = 80;

/// Builds the PDF for `pages` and returns the serialized bytes.
pub fn write_pdf(
    pages: &[Vec<PlacedLine>],
    geometry: &PageGeometry,
    font: &EmbeddedFont,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = add_font(&mut doc, font);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => Object::Reference(font_id),
        },
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(geometry.width),
        Object::Real(geometry.height),
    ];

    let mut kids = Vec::with_capacity(pages.len());
    for lines in pages {
        let content = page_content(lines)
            .encode()
            .map_err(|e| RenderError::Pdf(format!("content stream encoding failed: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| RenderError::Pdf(format!("failed to save PDF: {e}")))?;
    Ok(output)
}

fn add_font(doc: &mut Document, font: &EmbeddedFont) -> lopdf::ObjectId {
    let font_file_id = doc.add_object(Stream::new(
        dictionary! {
            "Length1" => Object::Integer(font.program.len() as i64),
        },
        font.program.clone(),
    ));

    let base_font = Object::Name(font.base_name.as_bytes().to_vec());
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => base_font.clone(),
        "Flags" => Object::Integer(FONT_FLAGS),
        "FontBBox" => font.bbox.iter().copied().map(Object::Integer).collect::<Vec<_>>(),
        "ItalicAngle" => Object::Integer(0),
        "Ascent" => Object::Integer(font.ascent),
        "Descent" => Object::Integer(font.descent),
        "CapHeight" => Object::Integer(font.cap_height),
        "StemV" => Object::Integer(FONT_STEM_V),
        "FontFile2" => Object::Reference(font_file_id),
    });

    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => base_font,
        "FirstChar" => Object::Integer(i64::from(FIRST_CHAR)),
        "LastChar" => Object::Integer(i64::from(LAST_CHAR)),
        "Widths" => font.widths.iter().copied().map(Object::Integer).collect::<Vec<_>>(),
        "Encoding" => "WinAnsiEncoding",
        "FontDescriptor" => Object::Reference(descriptor_id),
    })
}

fn page_content(lines: &[PlacedLine]) -> Content {
    let mut operations = Vec::with_capacity(lines.len() * 4);
    for line in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![
                Object::Name(FONT_RESOURCE.as_bytes().to_vec()),
                Object::Real(line.font_size),
            ],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Real(line.x), Object::Real(line.y)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&line.text),
                StringFormat::Hexadecimal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}
