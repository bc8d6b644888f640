//! Browser console logging.
//!
//! The core crate logs through the `log` facade; `console_log` forwards those
//! records to `console.error` / `console.warn` / `console.info` /
//! `console.debug` by level.

use log::{Level, LevelFilter};
use wasm_bindgen::prelude::*;

/// Level used until the host asks for another one.
pub const DEFAULT_LEVEL: Level = Level::Warn;

/// Route `log` records to the console. Installing twice only updates the
/// level.
pub fn install(level: Level) {
    if console_log::init_with_level(level).is_err() {
        log::set_max_level(level.to_level_filter());
        log::debug!("Console logger already installed");
    }
}

/// Change the console log level (`"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"` or `"trace"`).
///
/// # Example (TypeScript)
///
/// ```typescript
/// set_log_level("debug"); // show gesture and animation lifecycle
/// ```
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = parse_level(level).map_err(|e| JsValue::from_str(&e))?;
    log::set_max_level(filter);
    Ok(())
}

fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level
        .parse::<LevelFilter>()
        .map_err(|e| format!("Invalid log level '{}': {}", level, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Ok(LevelFilter::Debug));
        assert_eq!(parse_level("WARN"), Ok(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Ok(LevelFilter::Off));
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_default_level_hides_lifecycle_logs() {
        assert_eq!(DEFAULT_LEVEL.to_level_filter(), LevelFilter::Warn);
        assert!(Level::Debug.to_level_filter() > DEFAULT_LEVEL.to_level_filter());
    }
}

// ============================================================================
// WASM-specific tests
// ============================================================================
