use std::ops::Range;

use serde::Serialize;

use super::tag::{TagForm, TagKind, tag_end};

/// A tag found in a finished task description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRef {
    pub kind: TagKind,
    pub form: TagForm,
    /// Name without sigil or brackets
    pub name: String,
    /// Byte range of the whole tag, sigil and brackets included
    pub span: Range<usize>,
}

/// Find every `#`/`@` tag in `text`, left to right.
///
/// Uses the same extents as the autocomplete locator: simple tags stop at the
/// next space, bracketed ones after the next `]` (or at the end of the text).
/// A sigil with an empty name is plain text.
pub fn extract_tags(text: &str) -> Vec<TagRef> {
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(found) = text[pos..].find(['#', '@']) {
        let start = pos + found;
        // Sigils are ASCII, so the byte after one is a char boundary
        let Some(kind) = TagKind::from_sigil(text.as_bytes()[start] as char) else {
            break;
        };
        let form = if text[start + 1..].starts_with('[') {
            TagForm::Bracketed
        } else {
            TagForm::Simple
        };
        let end = tag_end(text, start, form);

        let name = match form {
            TagForm::Bracketed => {
                let inner = &text[start + 2..end];
                inner.strip_suffix(']').unwrap_or(inner)
            }
            TagForm::Simple => &text[start + 1..end],
        };

        if name.trim().is_empty() {
            pos = start + 1;
            continue;
        }

        tags.push(TagRef {
            kind,
            form,
            name: name.to_string(),
            span: start..end,
        });
        pos = end;
    }

    tags
}

/// Names of all tags of one kind, in order of appearance
pub fn tag_names(text: &str, kind: TagKind) -> Vec<String> {
    extract_tags(text)
        .into_iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.name)
        .collect()
}

/// Render bracketed tags as `#Name` / `@Name` for plain-text display.
/// Simple tags are left as typed.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for tag in extract_tags(text) {
        if tag.form != TagForm::Bracketed {
            continue;
        }
        out.push_str(&text[last..tag.span.start]);
        out.push(tag.kind.sigil());
        out.push_str(&tag.name);
        last = tag.span.end;
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_both_forms() {
        let text = "Order lenses for #[Optics Lab] ask @[Ann Lee] or @bob";
        let tags = extract_tags(text);
        assert_eq!(tags.len(), 3);

        assert_eq!(tags[0].kind, TagKind::Project);
        assert_eq!(tags[0].name, "Optics Lab");
        assert_eq!(&text[tags[0].span.clone()], "#[Optics Lab]");

        assert_eq!(tags[1].kind, TagKind::User);
        assert_eq!(tags[1].name, "Ann Lee");

        assert_eq!(tags[2].form, TagForm::Simple);
        assert_eq!(tags[2].name, "bob");
    }

    #[test]
    fn bare_sigils_are_text() {
        assert!(extract_tags("email me @ noon, item # 4").is_empty());
        assert!(extract_tags("#[] nothing").is_empty());
    }

    #[test]
    fn unterminated_bracket_runs_to_end() {
        let tags = extract_tags("see #[Optics Lab");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "Optics Lab");
        assert_eq!(tags[0].span, 4..16);
    }

    #[test]
    fn names_by_kind() {
        let text = "@[Ann] and @[Bo] on #[Rig]";
        assert_eq!(tag_names(text, TagKind::User), vec!["Ann", "Bo"]);
        assert_eq!(tag_names(text, TagKind::Project), vec!["Rig"]);
    }

    #[test]
    fn strip_bracketed_tags() {
        assert_eq!(
            strip_tags("Fix the @[John Smith] bug in #[Rig]"),
            "Fix the @John Smith bug in #Rig"
        );
        assert_eq!(strip_tags("no tags here"), "no tags here");
        assert_eq!(strip_tags("keep #simple"), "keep #simple");
    }
}
