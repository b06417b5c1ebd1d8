use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

use super::canvas::{Color, Mark, Page};
use super::fonts::{Font, encode_win_ansi};
use super::logo::Logo;
use crate::core::InvoiceError;

/// Resource name of the logo XObject.
const LOGO_NAME: &str = "Im1";

/// Serialize a laid-out page to PDF bytes.
///
/// Image marks are drawn only when `logo` is given. The output carries no
/// timestamps or random IDs, so equal input gives byte-identical output.
pub fn write_pdf(
    page: &Page,
    logo: Option<&Logo>,
    title: &str,
) -> Result<Vec<u8>, InvoiceError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    // 1. Fonts
    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }

    let mut resources = dictionary! {
        "Font" => Object::Dictionary(fonts),
    };

    // 2. Logo XObject
    if let Some(logo) = logo {
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => Object::Integer(logo.width as i64),
                "Height" => Object::Integer(logo.height as i64),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => Object::Integer(8),
            },
            logo.rgb.clone(),
        );
        let image_id = doc.add_object(image);
        resources.set(
            "XObject",
            dictionary! { LOGO_NAME => Object::Reference(image_id) },
        );
    }

    // 3. Page content
    let content = Content {
        operations: page_operations(page, logo.is_some()),
    };
    let encoded = content
        .encode()
        .map_err(|e| InvoiceError::Render(format!("failed to encode content stream: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "Contents" => Object::Reference(content_id),
        "Resources" => Object::Dictionary(resources),
        "MediaBox" => vec![0.into(), 0.into(), page.width.into(), page.height.into()],
    });

    // 4. Page tree, info and catalog
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(concat!("gst-invoice ", env!("CARGO_PKG_VERSION"))),
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| InvoiceError::Render(format!("failed to save PDF: {e}")))?;

    Ok(output)
}

/// Translate the display list into content stream operators.
fn page_operations(page: &Page, with_logo: bool) -> Vec<Operation> {
    let mut ops = Vec::new();
    for mark in &page.marks {
        match mark {
            Mark::Text {
                x,
                y,
                font,
                size,
                color,
                text,
            } => {
                ops.push(fill_color(*color));
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![font.resource_name().into(), (*size).into()],
                ));
                ops.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            Mark::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                ops.push(Operation::new("q", vec![]));
                if let Some(color) = fill {
                    ops.push(fill_color(*color));
                }
                if let Some(stroke) = stroke {
                    let Color { r, g, b } = stroke.color;
                    ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
                    ops.push(Operation::new("w", vec![stroke.width.into()]));
                }
                ops.push(Operation::new(
                    "re",
                    vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()],
                ));
                let paint = match (fill.is_some(), stroke.is_some()) {
                    (true, true) => "B",
                    (true, false) => "f",
                    (false, true) => "S",
                    (false, false) => "n",
                };
                ops.push(Operation::new(paint, vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            Mark::Image {
                x,
                y,
                width,
                height,
            } => {
                if !with_logo {
                    continue;
                }
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        (*width).into(),
                        0.into(),
                        0.into(),
                        (*height).into(),
                        (*x).into(),
                        (*y).into(),
                    ],
                ));
                ops.push(Operation::new("Do", vec![Object::Name(LOGO_NAME.into())]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

fn fill_color(color: Color) -> Operation {
    Operation::new("rg", vec![color.r.into(), color.g.into(), color.b.into()])
}
