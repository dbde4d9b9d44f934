//! Checks the diagnostics emitted through `tracing` while loading.

use inistore::{Config, ConfigError};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// Run `f` with a subscriber that records warnings and errors
fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, captured.text())
}

#[test]
fn test_malformed_line_warns_and_continues() {
    let (result, logs) = capture(|| {
        let mut config = Config::new();
        config
            .parse("a=1\ngarbage text without equals or brackets\nb=2\n")
            .map(|_| config)
    });

    let config = result.unwrap();
    assert_eq!(config.list_keys("").unwrap(), vec!["a", "b"]);
    assert!(logs.contains("WARN"), "logs: {}", logs);
    assert!(logs.contains("Syntax error on line 2"), "logs: {}", logs);
}

#[test]
fn test_duplicate_section_reported_before_failure() {
    let (result, logs) = capture(|| {
        let mut config = Config::new();
        config.parse("[a]\n[a]\n")
    });

    assert!(matches!(
        result.unwrap_err(),
        ConfigError::DuplicateSection { line: Some(2), .. }
    ));
    assert!(logs.contains("ERROR"), "logs: {}", logs);
    assert!(
        logs.contains("Duplicate section \"a\" on line 2"),
        "logs: {}",
        logs
    );
}

#[test]
fn test_duplicate_key_reported_before_failure() {
    let (result, logs) = capture(|| {
        let mut config = Config::new();
        config.parse("k=1\n; c\nk=2\n")
    });

    assert!(matches!(
        result.unwrap_err(),
        ConfigError::DuplicateKey { line: Some(3), .. }
    ));
    assert!(
        logs.contains("Duplicate key \"k\" in section \"\" on line 3"),
        "logs: {}",
        logs
    );
}

#[test]
fn test_clean_input_is_quiet() {
    let (result, logs) = capture(|| {
        let mut config = Config::new();
        config.parse("; comment\n\na=1\n[s]\nb=2\n")
    });

    result.unwrap();
    assert!(logs.is_empty(), "logs: {}", logs);
}
