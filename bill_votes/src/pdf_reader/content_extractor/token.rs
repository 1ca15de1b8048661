use crate::data::VoteValue;

/// A decoded text run and its place in the page's reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToken {
    pub position: usize,
    pub text: String,
}

impl TextToken {
    pub fn new(position: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

pub fn tokens_from_texts<I, S>(texts: I) -> Vec<TextToken>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    texts
        .into_iter()
        .enumerate()
        .map(|(position, text)| TextToken::new(position, text))
        .collect()
}

pub fn is_vote_value(text: &str) -> bool {
    VoteValue::from_abbreviation(text).is_some()
}

pub fn is_digit_leading(text: &str) -> bool {
    text.chars().next().map_or(false, |c| c.is_ascii_digit())
}

fn is_dash_char(c: char) -> bool {
    !c.is_ascii_digit() && !c.is_ascii_alphabetic()
}

/// A lone separator glyph, e.g. "-" or "–".
pub fn is_dash(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => is_dash_char(c),
        _ => false,
    }
}

/// Leading ASCII digits after any leading whitespace, like `"12"` in `" 12 Yeas"`.
pub fn leading_number(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(text.len(), |(idx, _)| idx);
    text[..end].parse().ok()
}
