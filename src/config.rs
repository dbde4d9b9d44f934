use crate::error::{ConfigError, ParseResult};
use crate::parser::{Token, TokenKind, TokenStream};
use indexmap::IndexMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Index;
use std::path::Path;
use tracing::{debug, error, warn};

/// Name of the implicit section holding keys that appear before any header
pub const DEFAULT_SECTION: &str = "";

/// Byte order mark some editors put at the start of UTF-8 files
const BOM: char = '\u{FEFF}';

type Section = IndexMap<String, String>;

/// Main configuration store
///
/// Sections and the keys inside them keep their insertion order, which is also the
/// order they are written back out in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// section name -> (key -> raw value)
    sections: IndexMap<String, Section>,

    /// Load behaviour
    options: ConfigOptions,
}

/// Configuration options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOptions {
    /// Fail the load on a malformed line instead of warning and skipping it
    pub strict: bool,
}

impl Config {
    /// Create an empty configuration holding only the default section
    pub fn new() -> Self {
        Self::with_options(ConfigOptions::default())
    }

    /// Create an empty configuration with custom options
    pub fn with_options(options: ConfigOptions) -> Self {
        let mut sections = IndexMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), Section::new());

        Self { sections, options }
    }

    /// Create a configuration from a file
    pub fn from_path(path: impl AsRef<Path>) -> ParseResult<Self> {
        let mut config = Self::new();
        config.load(path)?;
        Ok(config)
    }

    /// Options this configuration was created with
    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// Load a configuration file into this store
    ///
    /// On a duplicate section or key the load stops and the store is left holding
    /// whatever was folded in before the failing line.
    pub fn load(&mut self, path: impl AsRef<Path>) -> ParseResult<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ConfigError::io(path, e))?;

        let mut stream = TokenStream::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| ConfigError::io(path, e))?;
            let text = if idx == 0 {
                line.strip_prefix(BOM).unwrap_or(line.as_str())
            } else {
                line.as_str()
            };
            stream.feed(text, idx + 1);
        }

        debug!(path = %path.display(), tokens = stream.len(), "classified configuration file");
        self.fold(stream)
    }

    /// Parse configuration text into this store
    pub fn parse(&mut self, input: &str) -> ParseResult<()> {
        let input = input.strip_prefix(BOM).unwrap_or(input);
        let stream = TokenStream::from_lines(input.lines());
        debug!(tokens = stream.len(), "classified configuration text");
        self.fold(stream)
    }

    fn fold(&mut self, stream: TokenStream) -> ParseResult<()> {
        let mut current = DEFAULT_SECTION.to_string();

        for token in stream {
            let Token { line, kind } = token;
            match kind {
                TokenKind::Comment => {}

                TokenKind::Malformed => {
                    warn!(line, "Syntax error on line {}", line);
                    if self.options.strict {
                        return Err(ConfigError::malformed(line));
                    }
                }

                TokenKind::Section { name } => {
                    self.add_section(&name).map_err(|e| Self::report(e, line))?;
                    current = name;
                }

                TokenKind::KeyValue { key, value } => {
                    self.add_key(&current, &key, &value).map_err(|e| Self::report(e, line))?;
                }
            }
        }

        Ok(())
    }

    fn report(err: ConfigError, line: usize) -> ConfigError {
        let err = err.at_line(line);
        error!(line, "{}", err);
        err
    }

    /// Write the serialized configuration to a file, replacing its contents
    pub fn save(&self, path: impl AsRef<Path>) -> ParseResult<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), sections = self.sections.len(), "saving configuration");
        std::fs::write(path, self.serialize()).map_err(|e| ConfigError::io(path, e))
    }

    /// Add an empty section
    pub fn add_section(&mut self, name: &str) -> ParseResult<()> {
        if self.sections.contains_key(name) {
            return Err(ConfigError::duplicate_section(name, None));
        }

        self.sections.insert(name.to_string(), Section::new());
        Ok(())
    }

    /// Add a key that must not already exist in `section`
    ///
    /// Keys and values are stored as given. Surrounding whitespace or any of
    /// `[ ] ; =` will not read back unchanged after [`Config::save`].
    pub fn add_key(&mut self, section: &str, key: &str, value: &str) -> ParseResult<()> {
        let keys = self.section_mut(section)?;
        if keys.contains_key(key) {
            return Err(ConfigError::duplicate_key(section, key, None));
        }

        keys.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Set a key, overwriting any existing value
    ///
    /// Like [`Config::add_key`], the key and value are not checked against the file
    /// syntax.
    pub fn set_key(&mut self, section: &str, key: &str, value: &str) -> ParseResult<()> {
        // An existing key keeps its position
        self.section_mut(section)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Get the raw value of a key
    pub fn get_key(&self, section: &str, key: &str) -> ParseResult<&str> {
        self.section(section)?
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::unknown_key(section, key))
    }

    /// Check if a section exists
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Check if a key exists; the section itself must exist
    pub fn has_key(&self, section: &str, key: &str) -> ParseResult<bool> {
        Ok(self.section(section)?.contains_key(key))
    }

    /// All section names in insertion order, the default section included
    pub fn list_sections(&self) -> Vec<&str> {
        self.sections.keys().map(|s| s.as_str()).collect()
    }

    /// All keys of a section in insertion order
    pub fn list_keys(&self, section: &str) -> ParseResult<Vec<&str>> {
        Ok(self.section(section)?.keys().map(|k| k.as_str()).collect())
    }

    /// Remove a section
    ///
    /// The default section is only emptied, never removed. Removing a section that
    /// does not exist does nothing.
    pub fn delete_section(&mut self, name: &str) {
        if name == DEFAULT_SECTION {
            if let Some(keys) = self.sections.get_mut(DEFAULT_SECTION) {
                keys.clear();
            }
        } else {
            self.sections.shift_remove(name);
        }
    }

    /// Remove a key if present; the section itself must exist
    pub fn delete_key(&mut self, section: &str, key: &str) -> ParseResult<()> {
        self.section_mut(section)?.shift_remove(key);
        Ok(())
    }

    /// Render the configuration as INI text
    pub fn serialize(&self) -> String {
        let mut output = String::new();

        for (name, keys) in &self.sections {
            if name != DEFAULT_SECTION {
                output.push('[');
                output.push_str(name);
                output.push_str("]\n");
            }

            for (key, value) in keys {
                output.push_str(key);
                output.push('=');
                output.push_str(value);
                output.push('\n');
            }
        }

        output
    }

    fn section(&self, name: &str) -> ParseResult<&Section> {
        self.sections
            .get(name)
            .ok_or_else(|| ConfigError::unknown_section(name))
    }

    fn section_mut(&mut self, name: &str) -> ParseResult<&mut Section> {
        self.sections
            .get_mut(name)
            .ok_or_else(|| ConfigError::unknown_section(name))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Read access by `(section, key)`; panics if either is missing
impl<'a> Index<(&'a str, &'a str)> for Config {
    type Output = str;

    fn index(&self, (section, key): (&'a str, &'a str)) -> &str {
        match self.get_key(section, key) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}
