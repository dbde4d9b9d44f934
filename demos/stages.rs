//! Walks through the store API in stages and prints the configuration after each one.
//!
//! Pass an INI file path to also load and print it:
//!
//! ```text
//! cargo run --example stages -- path/to/file.ini
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG` to change their level.

use inistore::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::new();
    config.add_section("test")?;
    config.add_key("", "key1", "val1")?;
    config.add_key("test", "key2", "val2")?;
    print_config(&config, "Stage 1");

    config.delete_key("", "key1")?;
    config.set_key("test", "key2", "val3")?;
    print_config(&config, "Stage 2");

    config.delete_section("test");
    print_config(&config, "Stage 3");

    if let Some(path) = std::env::args().nth(1) {
        let loaded = Config::from_path(&path)?;
        print_config(&loaded, "Parse");
    }

    Ok(())
}

fn print_config(config: &Config, title: &str) {
    println!("\n===============");
    println!("{}", title);
    println!("===============");
    print!("{}", config);
    println!("===============");
}
