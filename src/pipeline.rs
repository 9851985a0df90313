//! Pipeline – ties together scanning, normalization, pagination and
//! rendering into a single function call.

use std::fs;
use std::path::PathBuf;

use crate::error::{Result, SheetError};
use crate::layout_config::LayoutConfig;
use crate::normalizer::{ImageNormalizer, NormalizedThumbnail};
use crate::pagination::{GridConfig, GridPaginator};
use crate::render::render_pdf;
use crate::scanner::{scan_directory, FolderGroups, ImageRecord};

/// Configuration for the contact-sheet pipeline.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// Root of the image tree (default: `image/`).
    pub input_dir: PathBuf,
    /// Where thumbnails are written (default: `output_images/`).
    pub output_dir: PathBuf,
    /// Where the PDF is written (default: `pdf/bukbir.pdf`).
    pub pdf_path: PathBuf,
    /// Document title embedded in the PDF metadata.
    pub title: String,
    pub grid: GridConfig,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("image"),
            output_dir: PathBuf::from("output_images"),
            pdf_path: PathBuf::from("pdf/bukbir.pdf"),
            title: "bukbir".to_string(),
            grid: GridConfig::default(),
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub pdf_path: PathBuf,
    pub pages: usize,
    pub thumbnails: usize,
    pub bytes: usize,
}

/// Normalize every record, folder by folder. The first failure aborts the
/// batch; thumbnails already written stay on disk.
pub fn normalize_all(
    groups: &FolderGroups<ImageRecord>,
    normalizer: &ImageNormalizer,
) -> Result<FolderGroups<NormalizedThumbnail>> {
    groups.try_map(|record| normalizer.normalize(record))
}

/// Thumbnails + PDF bytes for already scanned records.
///
/// Creates the output directory, writes one thumbnail per record, then lays
/// out and renders. Returns `(pdf_bytes, layout)`.
pub fn generate_pdf(
    groups: &FolderGroups<ImageRecord>,
    config: &SheetConfig,
) -> Result<(Vec<u8>, LayoutConfig)> {
    // 1. Output directory
    fs::create_dir_all(&config.output_dir)
        .map_err(|e| SheetError::io(&config.output_dir, e))?;

    // 2. Normalize
    let normalizer = ImageNormalizer::new(&config.output_dir);
    let thumbnails = normalize_all(groups, &normalizer)?;
    log::info!(
        "Wrote {} thumbnail(s) to '{}'",
        thumbnails.item_count(),
        config.output_dir.display()
    );

    // 3. Paginate
    let mut layout = GridPaginator::new(config.grid.clone()).paginate(&thumbnails);
    layout.title = config.title.clone();
    log::trace!("Layout:\n{}", layout.to_json());

    // 4. Render
    let ordered: Vec<NormalizedThumbnail> = thumbnails.items().cloned().collect();
    let bytes = render_pdf(&layout, &ordered)?;

    Ok((bytes, layout))
}

/// Full run: scan `input_dir`, generate, and write the PDF (creating its
/// parent directory if needed).
pub fn run(config: &SheetConfig) -> Result<SheetSummary> {
    let groups = scan_directory(&config.input_dir);
    let (bytes, layout) = generate_pdf(&groups, config)?;

    if let Some(parent) = config.pdf_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| SheetError::io(parent, e))?;
        }
    }
    fs::write(&config.pdf_path, &bytes).map_err(|e| SheetError::io(&config.pdf_path, e))?;

    Ok(SheetSummary {
        pdf_path: config.pdf_path.clone(),
        pages: layout.pages().len().max(1),
        thumbnails: layout.image_count(),
        bytes: bytes.len(),
    })
}
