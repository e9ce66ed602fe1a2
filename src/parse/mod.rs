pub mod description;
pub mod tag;

pub use description::{TagRef, extract_tags, strip_tags, tag_names};
pub use tag::{Tag, TagForm, TagKind, bracketed, locate_tag, replace_tag};
