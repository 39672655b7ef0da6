//! Output rendering and formatting

use crate::error::AppError;
use crate::services::PageView;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use serde::Serialize;
use std::io;

/// Column headers, in display order.
pub const COLUMNS: [&str; 3] = ["Repository", "Commit", "Status"];

/// Output renderer for the build list
#[derive(Debug, Clone, Copy)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool) -> Self {
        Self { json_output }
    }

    /// Print the page to stdout
    pub fn render_page(&self, page: &PageView) -> io::Result<()> {
        let output = self.format_page(page).map_err(io::Error::other)?;
        println!("{output}");
        Ok(())
    }

    /// Print an error to stderr in the current output format
    pub fn render_error(&self, err: &AppError) {
        if self.json_output {
            match serde_json::to_string(err) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{err}"),
            }
        } else {
            eprintln!("[ERROR] {err}");
        }
    }

    /// Format the page without printing it
    pub fn format_page(&self, page: &PageView) -> Result<String, AppError> {
        if self.json_output {
            encode_json(page)
        } else {
            Ok(format_table(page))
        }
    }
}

/// Pretty JSON for output. A failure here is ours, not the server's.
fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to encode output: {}", e)))
}

fn format_table(page: &PageView) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            COLUMNS
                .iter()
                .map(|name| Cell::new(name).add_attribute(Attribute::Bold)),
        );

    for build in &page.rows {
        table.add_row(build.cells());
    }

    format!("{table}\n{}", footer(page))
}

/// `Rows per page: 5  6-10 of 12  (page 2/3)`
fn footer(page: &PageView) -> String {
    format!(
        "Rows per page: {}  {}  (page {}/{})",
        page.rows_per_page,
        page.label,
        page.page + 1,
        page.page_count
    )
}
