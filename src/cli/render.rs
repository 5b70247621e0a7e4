//! Plain-text rendering of the view state.

use std::fmt::Write;

use crate::view::ViewState;

/// Render the view as a block of text, one item per line.
pub fn render(view: &ViewState, page_size: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Search: {:?}", view.query());

    let Some(result) = view.result.as_ref() else {
        let _ = writeln!(out, "Loading ...");
        return out;
    };

    if result.is_empty() {
        let _ = writeln!(out, "No results found");
        return out;
    }

    let pagination = view.pagination(page_size);
    let first = pagination.map_or(1, |p| p.first_item());
    for (idx, item) in result.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}. {} - {} ({})",
            first.saturating_add(idx as u64),
            item.title,
            item.description,
            item.image_ref
        );
    }

    if let Some(pagination) = pagination {
        let mut controls = Vec::new();
        if pagination.has_previous() {
            controls.push("[b] previous");
        }
        if pagination.has_next() {
            controls.push("[n] next");
        }
        let _ = write!(
            out,
            "{} | {}",
            pagination.info_label(),
            pagination.page_label()
        );
        if !controls.is_empty() {
            let _ = write!(out, " | {}", controls.join("  "));
        }
        out.push('\n');
    }

    out
}
