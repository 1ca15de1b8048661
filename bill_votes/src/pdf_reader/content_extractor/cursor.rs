use crate::pdf_reader::content_extractor::token::TextToken;

/// Forward-only view over a token stream. Lookahead never moves the cursor;
/// only `advance` does.
#[derive(Debug, Clone, Copy)]
pub struct TokenCursor<'a> {
    tokens: &'a [TextToken],
    position: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [TextToken]) -> Self {
        Self::at(tokens, 0)
    }

    pub fn at(tokens: &'a [TextToken], position: usize) -> Self {
        Self {
            tokens,
            position: position.min(tokens.len()),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn peek(&self, offset: usize) -> Option<&'a str> {
        self.tokens
            .get(self.position + offset)
            .map(TextToken::as_str)
    }

    /// Tokens `[position + from, position + to)`, clamped to the stream.
    pub fn window(&self, from: usize, to: usize) -> &'a [TextToken] {
        let len = self.tokens.len();
        let start = (self.position + from).min(len);
        let end = (self.position + to).clamp(start, len);
        &self.tokens[start..end]
    }

    pub fn advance(&mut self, n: usize) {
        self.position = (self.position + n).min(self.tokens.len());
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

/// Index of the first token whose text starts with `prefix`.
pub fn find_starting_with(tokens: &[TextToken], prefix: &str) -> Option<usize> {
    tokens
        .iter()
        .position(|token| token.as_str().starts_with(prefix))
}
