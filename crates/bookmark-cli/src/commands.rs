use std::io::Write;

use anyhow::Result;
use bookmark_core::export;
use bookmark_core::AddOutcome;
use bookmark_core::App;
use bookmark_core::Category;

use crate::messages;

pub fn add(app: &App, category: Option<String>) -> Result<()> {
    let category = Category::new(category.unwrap_or_default());

    match app.add_current_dir(category)? {
        AddOutcome::Added(bookmark) => messages::success(&format!(
            "Added bookmark: {} [{}]",
            bookmark.folder, bookmark.category
        )),
        AddOutcome::AlreadyExists(existing) => messages::warning(&format!(
            "Bookmark already exists: {} [{}]",
            existing.folder, existing.category
        )),
    }

    Ok(())
}

/// Writes the matching bookmarks as a pretty JSON array.
pub fn export<W: Write>(
    app: &App,
    category: Option<String>,
    filter: Option<String>,
    out: &mut W,
) -> Result<()> {
    let category = category.map(Category::new);
    let bookmarks = export::collect(app.store(), category.as_ref(), filter.as_deref())?;
    log::debug!("exporting {} bookmarks", bookmarks.len());

    out.write_all(export::to_json(&bookmarks)?.as_bytes())?;
    out.flush()?;

    Ok(())
}
