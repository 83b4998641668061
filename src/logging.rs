//! Tracing subscriber setup shared by the server and the admin CLI.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `level` is an `EnvFilter` directive string such as `info` or
/// `shorty=debug,tower_http=info`; an unparsable value falls back to `info`.
/// `format` is `json` for one JSON object per line, anything else for
/// human-readable text.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(level: &str, format: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if format == "json" {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.with_target(true).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init("shorty=debug", "text");
        assert!(init("info", "json").is_err());
    }
}
