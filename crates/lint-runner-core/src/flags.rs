//! Disable / CI switches passed explicitly into a run.

use std::collections::HashMap;

use crate::config::EnvNames;

/// Per-run switches that the original tooling read from the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFlags {
    /// Skip linting entirely.
    pub disabled: bool,
    /// Continuous-integration context: use `--no-cache` instead of a cache path.
    pub ci: bool,
}

impl RunFlags {
    /// Creates flags from explicit values.
    #[must_use]
    pub fn new(disabled: bool, ci: bool) -> Self {
        Self { disabled, ci }
    }

    /// Reads the flags from a variable map using the configured names.
    ///
    /// The map is supplied by the caller; the process environment is never
    /// consulted here.
    #[must_use]
    pub fn from_vars(vars: &HashMap<String, String>, names: &EnvNames) -> Self {
        let lookup = |name: &str| vars.get(name).map(String::as_str);
        Self {
            disabled: is_truthy(lookup(&names.disable)),
            ci: is_truthy(lookup(&names.ci)),
        }
    }
}

/// Interprets a boolean-like variable value.
///
/// Unset, empty, `0`, `false`, `no` and `off` (any case) are false; every
/// other value is true.
#[must_use]
pub fn is_truthy(value: Option<&str>) -> bool {
    let Some(value) = value.map(str::trim) else {
        return false;
    };
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no")
        || value.eq_ignore_ascii_case("off"))
}
