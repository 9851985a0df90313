//! PDF renderer – takes a [`LayoutConfig`] plus the normalized thumbnails and
//! produces PDF bytes using `printpdf` (v0.8 ops-based API).

use printpdf::*;

use crate::error::{Result, SheetError};
use crate::layout_config::{LayoutConfig, PageDrawCommand};
use crate::normalizer::NormalizedThumbnail;

/// A printpdf XObject together with the pixel dimensions of the source image.
struct ImageResource {
    xobj_id: XObjectId,
    px_width: u32,
    px_height: u32,
}

/// Render a LayoutConfig into PDF bytes.
///
/// `thumbnails` must be in the order the paginator numbered them; an
/// `Image` command pointing past the end is an error.
pub fn render_pdf(config: &LayoutConfig, thumbnails: &[NormalizedThumbnail]) -> Result<Vec<u8>> {
    let page_w = Mm(config.page_width_pt * 0.352778); // pt → mm
    let page_h = Mm(config.page_height_pt * 0.352778);

    let mut doc = PdfDocument::new(&config.title);

    // ── Register every thumbnail once ─────────────────────────────────────
    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let mut resources = Vec::with_capacity(thumbnails.len());
    for thumb in thumbnails {
        let raw = RawImage::decode_from_bytes(&thumb.jpeg, &mut warnings).map_err(|e| {
            SheetError::Pdf(format!(
                "cannot embed '{}': {e}",
                thumb.output_path.display()
            ))
        })?;
        resources.push(ImageResource {
            xobj_id: doc.add_image(&raw),
            px_width: thumb.width,
            px_height: thumb.height,
        });
    }
    for w in &warnings {
        log::debug!("printpdf: {w:?}");
    }

    // ── Render pages ──────────────────────────────────────────────────────
    let mut pages = Vec::new();
    for commands in config.pages() {
        let mut ops = Vec::new();
        for cmd in commands {
            render_command(&mut ops, cmd, &resources)?;
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // Ensure at least one page.
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    log::info!("Rendering {} page(s), {} image(s)", pages.len(), resources.len());
    doc.with_pages(pages);
    let bytes = doc.save(&PdfSaveOptions::default(), &mut Vec::new());

    Ok(bytes)
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String so
/// printpdf writes the bytes unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, so each glyph is one byte 0x00–0xFF).
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{201A}' => 0x82, // single low-9 quote
            '\u{201E}' => 0x84, // double low-9 quote
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{2122}' => 0x99, // trademark
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: any byte >= 0x80 makes the string non-UTF-8 on purpose. The
    // String is only handed to printpdf, which writes its bytes unchanged
    // into the PDF stream where WinAnsiEncoding decodes them.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}

fn render_command(
    ops: &mut Vec<Op>,
    cmd: &PageDrawCommand,
    images: &[ImageResource],
) -> Result<()> {
    match cmd {
        PageDrawCommand::Label {
            text,
            x,
            y,
            font_size,
        } => {
            let font = BuiltinFont::Helvetica;
            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point { x: Pt(*x), y: Pt(*y) },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(*font_size),
                font,
            });
            ops.push(Op::SetFillColor {
                col: Color::Rgb(Rgb {
                    r: 0.0,
                    g: 0.0,
                    b: 0.0,
                    icc_profile: None,
                }),
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(to_winlatin(text))],
                font,
            });
            ops.push(Op::EndTextSection);
        }
        PageDrawCommand::Image {
            item,
            x,
            y,
            width,
            height,
        } => {
            let res = images.get(*item).ok_or_else(|| {
                SheetError::Pdf(format!(
                    "image command refers to thumbnail #{item}, only {} registered",
                    images.len()
                ))
            })?;

            // At dpi=72 printpdf renders 1 px = 1 pt, so
            // scale = desired_pt / px_dim.
            let scale_x = if res.px_width > 0 {
                width / res.px_width as f32
            } else {
                1.0
            };
            let scale_y = if res.px_height > 0 {
                height / res.px_height as f32
            } else {
                1.0
            };

            ops.push(Op::UseXobject {
                id: res.xobj_id.clone(),
                transform: XObjectTransform {
                    translate_x: Some(Pt(*x)),
                    translate_y: Some(Pt(*y)),
                    dpi: Some(72.0),
                    scale_x: Some(scale_x),
                    scale_y: Some(scale_y),
                    rotate: None,
                },
            });
        }
        PageDrawCommand::PageBreak => {}
    }
    Ok(())
}
