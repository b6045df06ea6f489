//! Derived-field normalizer.
//!
//! Runs right before a category or post is persisted and fills the fields an
//! administrator left blank. Explicit values are never overwritten, so running
//! it twice is a no-op.

use super::{Category, Post};

/// Characters of the title copied into an empty `meta_title`.
pub const META_TITLE_LEN: usize = 60;

/// Characters of the content copied into an empty `meta_description`.
pub const META_DESCRIPTION_LEN: usize = 155;

/// Lowercase, transliterate letters to ASCII, and collapse every run of
/// non-alphanumeric characters into a single hyphen.
///
/// Symbols are blanked first; transliteration would otherwise spell them out
/// (`❤` as "heart").
pub fn slugify(input: &str) -> String {
    let letters: String = input
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    slug::slugify(letters)
}

/// Hard truncation to `max` characters. No ellipsis, no word boundaries.
pub fn truncate_chars(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        Some((idx, _)) => input[..idx].to_string(),
        None => input.to_string(),
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// Fill derived fields that are still empty.
pub trait Normalize {
    fn normalize(&mut self);
}

impl Normalize for Category {
    fn normalize(&mut self) {
        if self.slug.is_empty() {
            self.slug = slugify(&self.name);
        }
    }
}

impl Normalize for Post {
    fn normalize(&mut self) {
        if self.slug.is_empty() {
            self.slug = slugify(&self.title);
        }
        if is_blank(&self.meta_title) {
            self.meta_title = Some(truncate_chars(&self.title, META_TITLE_LEN));
        }
        if is_blank(&self.meta_description) && !self.content.is_empty() {
            self.meta_description = Some(truncate_chars(&self.content, META_DESCRIPTION_LEN));
        }
    }
}
