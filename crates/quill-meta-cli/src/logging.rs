//! Stderr logging.
//!
//! Filter priority:
//!
//! 1. **`QUILL_META_LOG`** - a bare level (`debug`) applies to `quill_meta` targets only, anything
//!    with directive syntax is used as-is;
//! 2. **`RUST_LOG`** - used directly;
//! 3. **Default** - `warn`.

use std::env;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Fails if one is already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(create_filter())
        .with_writer(std::io::stderr)
        .try_init()
}

fn create_filter() -> EnvFilter {
    if let Ok(value) = env::var("QUILL_META_LOG") {
        return expand_quill_log(&value);
    }
    if let Ok(value) = env::var("RUST_LOG") {
        return EnvFilter::new(value);
    }
    EnvFilter::new("warn")
}

fn expand_quill_log(value: &str) -> EnvFilter {
    EnvFilter::new(expand_directives(value))
}

fn expand_directives(value: &str) -> String {
    let value = value.trim();
    if value.contains(['=', ',', ':']) {
        value.to_string()
    } else {
        format!("warn,quill_meta={value}")
    }
}
