//! Property-test run profile read from the environment.
//!
//! Suites call [`ProptestRunProfile::load`] with their own default case count;
//! CI raises or lowers it through `CROWD_PBT_CASES` without touching code.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const CROWD_PBT_CASES_ENV_KEY: &str = "CROWD_PBT_CASES";

/// Resolved case budget for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
}

impl ProptestRunProfile {
    /// Loads the profile, falling back to `default_cases` when the override is
    /// absent or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use crowd_test_support::ci::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32) -> Self {
        let cases = match env::var(CROWD_PBT_CASES_ENV_KEY) {
            Ok(raw) => parse_cases(&raw).unwrap_or_else(|reason| {
                tracing::warn!(
                    env = CROWD_PBT_CASES_ENV_KEY,
                    raw = %raw,
                    reason = %reason,
                    "ignoring invalid property-test case override",
                );
                default_cases
            }),
            Err(_) => default_cases,
        };
        Self {
            cases: cases.max(1),
        }
    }

    /// Number of cases each property should run.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("case count must be positive".to_owned());
    }
    Ok(parsed)
}
