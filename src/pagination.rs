//! Pagination – lays thumbnails out in a left-to-right, top-to-bottom grid,
//! one page per folder.
//!
//! Handles:
//! - A label at the top margin of every folder page
//! - Row wrapping once the next thumbnail would exceed the available width
//! - An unconditional page break after every folder, empty or not
//!
//! Vertical overflow inside a folder is *not* paginated: rows keep going
//! below the bottom margin and are only reported with a warning.

use crate::layout_config::{LayoutConfig, PageDrawCommand};
use crate::scanner::FolderGroups;

/// Page geometry in PDF points.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub spacing: f32,
    pub thumbnail_width: f32,
    pub thumbnail_height: f32,
    pub label_font_size: f32,
    /// Prepended to the folder name in each page label.
    pub label_prefix: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 20.0,
            spacing: 10.0,
            thumbnail_width: 80.0,
            thumbnail_height: 108.0,
            label_font_size: 12.0,
            label_prefix: "Folder: ".to_string(),
        }
    }
}

impl GridConfig {
    /// Width available to a row: page width minus both side margins.
    pub fn available_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Bottom edge of the first row of thumbnails.
    pub fn first_row_y(&self) -> f32 {
        self.page_height - self.margin - self.spacing - self.thumbnail_height
    }
}

/// Mutable placement state for one folder.
#[derive(Debug, Clone)]
struct PageCursor<'a> {
    x: f32,
    y: f32,
    row_width_used: f32,
    folder_key: &'a str,
}

impl<'a> PageCursor<'a> {
    fn start(config: &GridConfig, folder_key: &'a str) -> Self {
        Self {
            x: config.margin,
            y: config.first_row_y(),
            row_width_used: 0.0,
            folder_key,
        }
    }

    /// Move to the next row if another thumbnail would not fit.
    /// Returns whether a wrap happened.
    fn wrap_if_needed(&mut self, config: &GridConfig) -> bool {
        if self.row_width_used + config.thumbnail_width <= config.available_width() {
            return false;
        }
        self.y -= config.thumbnail_height + config.spacing;
        self.x = config.margin;
        self.row_width_used = 0.0;
        true
    }

    fn advance(&mut self, config: &GridConfig) {
        let step = config.thumbnail_width + config.spacing;
        self.x += step;
        self.row_width_used += step;
    }
}

/// Converts folder groups into draw commands.
#[derive(Debug, Clone, Default)]
pub struct GridPaginator {
    config: GridConfig,
}

impl GridPaginator {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    /// Lay out every item of every folder.
    ///
    /// `Image` commands number items in folder order (see
    /// [`FolderGroups::items`]). Every item is placed exactly once.
    pub fn paginate<T>(&self, groups: &FolderGroups<T>) -> LayoutConfig {
        let cfg = &self.config;
        let mut layout = LayoutConfig {
            page_width_pt: cfg.page_width,
            page_height_pt: cfg.page_height,
            ..LayoutConfig::a4()
        };
        let mut next_item = 0usize;

        for (folder, items) in groups.iter() {
            layout.commands.push(PageDrawCommand::Label {
                text: format!("{}{}", cfg.label_prefix, folder),
                x: cfg.margin,
                y: cfg.page_height - cfg.margin,
                font_size: cfg.label_font_size,
            });

            let mut cursor = PageCursor::start(cfg, folder);
            for _ in items {
                if cursor.wrap_if_needed(cfg) && cursor.y < cfg.margin {
                    log::warn!(
                        "Folder '{}': row at y={} runs past the bottom margin",
                        cursor.folder_key,
                        cursor.y
                    );
                }
                layout.commands.push(PageDrawCommand::Image {
                    item: next_item,
                    x: cursor.x,
                    y: cursor.y,
                    width: cfg.thumbnail_width,
                    height: cfg.thumbnail_height,
                });
                next_item += 1;
                cursor.advance(cfg);
            }

            layout.commands.push(PageDrawCommand::PageBreak);
        }

        layout
    }
}
