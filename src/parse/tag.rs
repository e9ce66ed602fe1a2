use std::ops::Range;

use serde::{Deserialize, Serialize};

/// What a tag refers to, decided by its sigil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// `#name` / `#[name]`
    Project,
    /// `@name` / `@[name]`
    User,
}

impl TagKind {
    pub fn sigil(self) -> char {
        match self {
            TagKind::Project => '#',
            TagKind::User => '@',
        }
    }

    pub fn from_sigil(c: char) -> Option<TagKind> {
        match c {
            '#' => Some(TagKind::Project),
            '@' => Some(TagKind::User),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TagKind::Project => "project",
            TagKind::User => "user",
        }
    }
}

/// Lexical form of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagForm {
    /// Ends at the next space
    Simple,
    /// `[...]`, ends after the next `]`
    Bracketed,
}

impl TagForm {
    /// Bytes between the tag start and the first query byte
    fn marker_len(self) -> usize {
        match self {
            TagForm::Simple => 1,
            TagForm::Bracketed => 2,
        }
    }
}

/// The tag the caret currently sits in.
///
/// `span` covers the whole tag as it exists in the buffer (for bracketed tags,
/// including the closing `]` if there is one). `query` only covers what lies
/// between the opening marker and the caret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub kind: TagKind,
    pub form: TagForm,
    pub span: Range<usize>,
    pub query: String,
}

impl Tag {
    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}

/// Find the tag around `caret` in `buffer`.
///
/// The nearest `#` or `@` strictly before the caret opens the candidate tag;
/// the caret has to lie inside that tag's extent for it to count. Offsets are
/// byte offsets. A caret past the end or inside a multi-byte char locates
/// nothing.
pub fn locate_tag(buffer: &str, caret: usize) -> Option<Tag> {
    let before = buffer.get(..caret)?;
    let start = before.rfind(['#', '@'])?;
    let kind = TagKind::from_sigil(buffer[start..].chars().next()?)?;

    let form = if buffer[start + 1..].starts_with('[') {
        TagForm::Bracketed
    } else {
        TagForm::Simple
    };
    let end = tag_end(buffer, start, form);

    if caret > end {
        return None;
    }

    let query_start = start + form.marker_len();
    // A caret between the sigil and `[` is before the query: empty, not "["
    let query =buffer.get(query_start..caret).unwrap_or("").to_string();

    Some(Tag {
        kind,
        form,
        span: start..end,
        query,
    })
}

/// Exclusive end of the tag opening at `start`
pub(crate) fn tag_end(buffer: &str, start: usize, form: TagForm) -> usize {
    let rest = &buffer[start..];
    match form {
        TagForm::Bracketed => rest.find(']').map_or(buffer.len(), |i| start + i + 1),
        TagForm::Simple => rest.find(' ').map_or(buffer.len(), |i| start + i),
    }
}

/// Render `name` as a bracketed tag of the given kind: `#[name]` / `@[name]`
pub fn bracketed(kind: TagKind, name: &str) -> String {
    format!("{}[{}]", kind.sigil(), name)
}

/// Replace `tag` in `buffer` with the bracketed form of `name`.
///
/// Returns the new buffer and the caret position just past the inserted `]`.
/// The sigil is kept; the result is always bracketed.
pub fn replace_tag(buffer: &str, tag: &Tag, name: &str) -> (String, usize) {
    let insert = bracketed(tag.kind, name);
    let mut out = String::with_capacity(buffer.len() + insert.len());
    out.push_str(&buffer[..tag.start()]);
    out.push_str(&insert);
    let caret = out.len();
    out.push_str(&buffer[tag.end()..]);
    (out, caret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_tag_at_caret_zero_or_empty_buffer() {
        assert_eq!(locate_tag("", 0), None);
        assert_eq!(locate_tag("#proj", 0), None);
        assert_eq!(locate_tag("plain text", 5), None);
    }

    #[test]
    fn simple_tag_stops_at_space() {
        let tag = locate_tag("foo #bar baz", 8).unwrap();
        assert_eq!(tag.kind, TagKind::Project);
        assert_eq!(tag.form, TagForm::Simple);
        assert_eq!(tag.query, "bar");
        assert_eq!(tag.span, 4..8);
    }

    #[test]
    fn query_is_caret_bounded() {
        let tag = locate_tag("foo #barbell", 7).unwrap();
        assert_eq!(tag.query, "ba");
        assert_eq!(tag.span, 4..12);
    }

    #[test]
    fn caret_right_after_sigil() {
        let tag = locate_tag("ask @", 5).unwrap();
        assert_eq!(tag.kind, TagKind::User);
        assert_eq!(tag.query, "");
        assert_eq!(tag.span, 4..5);
    }

    #[test]
    fn unterminated_bracket_runs_to_end() {
        let buf = "foo #[bar baz";
        let tag = locate_tag(buf, buf.len()).unwrap();
        assert_eq!(tag.form, TagForm::Bracketed);
        assert_eq!(tag.query, "bar baz");
        assert_eq!(tag.span, 4..buf.len());

        // Mid-tag caret: spaces are fine inside brackets
        let tag = locate_tag(buf, 10).unwrap();
        assert_eq!(tag.query, "bar ");
        assert_eq!(tag.span, 4..13);
    }

    #[test]
    fn closed_bracket_includes_bracket() {
        let tag = locate_tag("#[abc] more", 6).unwrap();
        assert_eq!(tag.span, 0..6);
        assert_eq!(tag.query, "abc]");
    }

    #[test]
    fn caret_past_closed_bracket() {
        assert_eq!(locate_tag("#[abc] more", 10), None);
    }

    #[test]
    fn caret_between_sigil_and_bracket() {
        let tag = locate_tag("#[abc]", 1).unwrap();
        assert_eq!(tag.form, TagForm::Bracketed);
        assert_eq!(tag.query, "");
        assert_eq!(tag.span, 0..6);

        let tag = locate_tag("ask @[", 5).unwrap();
        assert_eq!(tag.kind, TagKind::User);
        assert_eq!(tag.query, "");
    }

    #[test]
    fn space_after_simple_tag_dismisses() {
        assert_eq!(locate_tag("#foo ", 5), None);
    }

    #[test]
    fn later_marker_wins() {
        let tag = locate_tag("#foo @bar", 9).unwrap();
        assert_eq!(tag.kind, TagKind::User);
        assert_eq!(tag.query, "bar");
        assert_eq!(tag.span, 5..9);

        let tag = locate_tag("@[Ann Lee] #op", 14).unwrap();
        assert_eq!(tag.kind, TagKind::Project);
        assert_eq!(tag.query, "op");
    }

    #[test]
    fn caret_out_of_range_or_mid_char() {
        assert_eq!(locate_tag("#ab", 10), None);
        // 'é' is two bytes at offset 1..3
        assert_eq!(locate_tag("#é", 2), None);
        let tag = locate_tag("#é", 3).unwrap();
        assert_eq!(tag.query, "é");
    }

    #[test]
    fn locate_is_pure() {
        let buf = "Fix the @joh bug";
        assert_eq!(locate_tag(buf, 12), locate_tag(buf, 12));
    }

    #[test]
    fn replace_simple_with_bracketed() {
        let buf = "Fix the @joh bug";
        let tag = locate_tag(buf, 12).unwrap();
        assert_eq!(tag.span, 8..12);
        let (out, caret) = replace_tag(buf, &tag, "John");
        assert_eq!(out, "Fix the @[John] bug");
        assert_eq!(caret, 15);
    }

    #[test]
    fn replace_existing_bracketed_tag() {
        let buf = "#[Old Name] rest";
        let tag = locate_tag(buf, 4).unwrap();
        let (out, caret) = replace_tag(buf, &tag, "Optics Lab");
        assert_eq!(out, "#[Optics Lab] rest");
        assert_eq!(&out[..caret], "#[Optics Lab]");
    }

    #[test]
    fn replace_unterminated_at_end() {
        let buf = "see #[opt";
        let tag = locate_tag(buf, buf.len()).unwrap();
        let (out, caret) = replace_tag(buf, &tag, "Optics");
        assert_eq!(out, "see #[Optics]");
        assert_eq!(caret, out.len());
    }
}
