use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal cells needed to show `s`
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Largest char boundary at or below `offset`, clamped to the string length
pub fn floor_char_boundary(s: &str, offset: usize) -> usize {
    let mut i = offset.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Byte offset of the grapheme after the one at `offset`; None at the end
pub fn next_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let rest = s.get(offset..)?;
    let first = rest.graphemes(true).next()?;
    Some(offset + first.len())
}

/// Byte offset where the grapheme ending at `offset` starts; None at 0
pub fn prev_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let head = s.get(..offset)?;
    let last = head.graphemes(true).next_back()?;
    Some(offset - last.len())
}

/// Cells from the start of `s` to the caret at `offset`
pub fn caret_column(s: &str, offset: usize) -> usize {
    display_width(&s[..floor_char_boundary(s, offset)])
}

/// Cut `s` to at most `max_cells`, ending in `…` when something was dropped
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = display_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}
