use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "ini.pest"]
pub struct IniParser;

/// A single classified line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// 1-based position of the line in its source
    pub line: usize,

    pub kind: TokenKind,
}

/// What a line turned out to be
///
/// Blank lines never produce a token, so there is no variant for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Section header: [name]
    Section { name: String },

    /// Assignment: key = value
    KeyValue { key: String, value: String },

    /// Comment line: ; text
    Comment,

    /// Anything the grammar does not accept
    Malformed,
}

impl Token {
    fn new(line: usize, kind: TokenKind) -> Self {
        Self { line, kind }
    }
}

impl IniParser {
    /// Classify one line of text.
    ///
    /// Returns `None` for empty or whitespace-only lines. Every other line yields a
    /// token; lines that do not match the grammar come back as [`TokenKind::Malformed`].
    pub fn classify(line: &str, line_number: usize) -> Option<Token> {
        if line.trim().is_empty() {
            return None;
        }

        let kind = match IniParser::parse(Rule::line, line) {
            Ok(mut pairs) => pairs
                .next()
                .and_then(|pair| pair.into_inner().next())
                .and_then(Self::token_kind)
                .unwrap_or(TokenKind::Malformed),
            Err(_) => TokenKind::Malformed,
        };

        Some(Token::new(line_number, kind))
    }

    fn token_kind(pair: pest::iterators::Pair<Rule>) -> Option<TokenKind> {
        match pair.as_rule() {
            Rule::section => {
                let name = Self::trimmed_text(pair.into_inner().next()?)?;
                Some(TokenKind::Section { name })
            }

            Rule::key_value => {
                let mut inner = pair.into_inner();
                let key = Self::trimmed_text(inner.next()?)?;
                let value = Self::trimmed_text(inner.next()?)?;
                Some(TokenKind::KeyValue { key, value })
            }

            Rule::comment => Some(TokenKind::Comment),

            _ => None,
        }
    }

    // `text` may be all whitespace; such a name/key/value is rejected.
    fn trimmed_text(pair: pest::iterators::Pair<Rule>) -> Option<String> {
        let trimmed = pair.as_str().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Ordered tokens collected from one parsing session
#[derive(Debug, Default, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify every line, numbering them from 1
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut stream = Self::new();
        for (idx, line) in lines.into_iter().enumerate() {
            stream.feed(line, idx + 1);
        }
        stream
    }

    /// Classify a line and keep its token, if it produced one
    pub fn feed(&mut self, line: &str, line_number: usize) {
        if let Some(token) = IniParser::classify(line, line_number) {
            self.tokens.push(token);
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
