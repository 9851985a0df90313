//! # contact-sheet – folder-grouped thumbnail grids on PDF
//!
//! This crate turns a directory tree of images into a PDF contact sheet.
//! The pipeline stages are:
//!
//! 1. **Scan** – walk the tree, group files by parent folder ([`scanner`])
//! 2. **Normalize** – EXIF-orient and resize each image to a 300×400
//!    thumbnail written to disk ([`normalizer`])
//! 3. **Paginate** – place thumbnails in a grid, one page per folder
//!    ([`pagination`])
//! 4. **Render** – emit PDF bytes via printpdf ([`render`])

pub mod error;
pub mod layout_config;
pub mod normalizer;
pub mod pagination;
pub mod pipeline;
pub mod render;
pub mod scanner;

// Re-exports for convenience
pub use error::{Result, SheetError};
pub use pipeline::{generate_pdf, run, SheetConfig, SheetSummary};
