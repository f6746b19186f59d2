//! Plain text rendering for generated lists.

use crate::error::{Error, Result};
use crate::list::ListOutput;

use super::RenderOptions;

/// Convert a generated list to plain text.
///
/// Offsets from the indentation table are mapped to character columns, so
/// numbers and titles line up the way a layout engine would place them.
pub fn to_text(list: &ListOutput, options: &RenderOptions) -> Result<String> {
    if options.column_width <= 0.0 || !options.column_width.is_finite() {
        return Err(Error::Render(format!(
            "column width must be positive, got {}",
            options.column_width
        )));
    }
    let columns = |offset: f32| (offset / options.column_width).round().max(0.0) as usize;

    let mut output = String::new();
    if options.include_title && !list.title.is_empty() {
        output.push_str(&list.title);
        output.push_str("\n\n");
    }

    for row in &list.rows {
        let indent = list.indents.get(row.iterator_depth);
        let mut line = " ".repeat(columns(indent.number));
        line.push_str(&row.numbers);

        let text_column = columns(indent.text);
        let used = line.chars().count();
        if used < text_column {
            line.push_str(&" ".repeat(text_column - used));
        } else if !row.numbers.is_empty() {
            line.push(' ');
        }
        line.push_str(&row.text);

        if list.show_pages {
            let used = line.chars().count() + 1;
            let page_len = row.page.chars().count();
            let fill = options.line_width.saturating_sub(used + page_len + 1);
            line.push(' ');
            if let Some(leader) = options.leader {
                line.extend(std::iter::repeat(leader).take(fill));
            } else {
                line.push_str(&" ".repeat(fill));
            }
            line.push(' ');
            line.push_str(&row.page);
        }

        output.push_str(line.trim_end());
        output.push('\n');
    }

    Ok(output)
}
