//! Layout config – the intermediate representation between pagination and
//! PDF rendering. This is the "frozen" structure that encodes exactly what
//! goes on each page.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner of
//! the page.

use serde::{Deserialize, Serialize};

/// A complete document layout ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Document title embedded in the PDF metadata.
    #[serde(default = "LayoutConfig::default_title")]
    pub title: String,
    /// Width of each page in PDF points (1 pt = 1/72 inch).
    pub page_width_pt: f32,
    /// Height of each page in PDF points.
    pub page_height_pt: f32,
    /// Drawing instructions in emission order, pages delimited by
    /// [`PageDrawCommand::PageBreak`].
    pub commands: Vec<PageDrawCommand>,
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PageDrawCommand {
    /// Plain text; `(x, y)` is the start of the baseline.
    Label {
        text: String,
        x: f32,
        y: f32,
        font_size: f32,
    },
    /// A thumbnail; `(x, y)` is its bottom-left corner.
    Image {
        /// Index into the folder-ordered list of thumbnails.
        item: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// End the current page.
    PageBreak,
}

impl LayoutConfig {
    /// Create an empty A4 layout config.
    pub fn a4() -> Self {
        Self {
            title: Self::default_title(),
            page_width_pt: 595.0,
            page_height_pt: 842.0,
            commands: Vec::new(),
        }
    }

    fn default_title() -> String {
        "contact sheet".to_string()
    }

    /// Split the command list into pages. Commands after the last page break
    /// form a final page only when there are any.
    pub fn pages(&self) -> Vec<&[PageDrawCommand]> {
        let mut pages = Vec::new();
        let mut start = 0;
        for (i, cmd) in self.commands.iter().enumerate() {
            if *cmd == PageDrawCommand::PageBreak {
                pages.push(&self.commands[start..i]);
                start = i + 1;
            }
        }
        if start < self.commands.len() {
            pages.push(&self.commands[start..]);
        }
        pages
    }

    /// Number of image placements across all pages.
    pub fn image_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PageDrawCommand::Image { .. }))
            .count()
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}
