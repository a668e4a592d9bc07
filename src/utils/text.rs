use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Fit a listing title into a table column.
///
/// Runs of whitespace (titles often carry newlines or tabs) collapse to a
/// single space. A title wider than `max_width` columns is cut on a character
/// boundary and ends in `…`; wide (CJK) characters count as two columns.
pub fn fit_item_name(name: &str, max_width: usize) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.width() <= max_width {
        return collapsed;
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let kept: String = collapsed
        .chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= budget
        })
        .collect();

    format!("{}{}", kept.trim_end(), ELLIPSIS)
}
