//! Property-test run profile shared by the Tyro property suites.
//!
//! `TYRO_PBT_CASES` raises or lowers the case count (nightly CI raises it)
//! and `TYRO_PBT_FORK` runs cases in subprocesses. Malformed overrides are
//! logged and ignored.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const TYRO_PBT_CASES_ENV_KEY: &str = "TYRO_PBT_CASES";
/// Environment variable toggling forked case execution.
pub const TYRO_PBT_FORK_ENV_KEY: &str = "TYRO_PBT_FORK";

/// Case count and fork mode resolved for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the overrides, falling back to `default_cases` and
    /// `default_fork` for missing or malformed values.
    ///
    /// # Examples
    ///
    /// ```
    /// use tyro_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(48, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(TYRO_PBT_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(TYRO_PBT_FORK_ENV_KEY, default_fork, parse_switch),
        }
    }

    /// Cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Result<T, String>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(env = key, raw = %raw, reason = %reason, "ignoring malformed property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_switch(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard};

    use rstest::{fixture, rstest};

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Holds the environment lock and restores both keys on drop.
    struct ScopedEnv {
        saved: Vec<(&'static str, Option<String>)>,
        _lock: MutexGuard<'static, ()>,
    }

    impl ScopedEnv {
        fn put(&mut self, key: &'static str, value: Option<&str>) {
            // SAFETY: every test touching these keys holds ENV_LOCK.
            unsafe {
                match value {
                    Some(value) => env::set_var(key, value),
                    None => env::remove_var(key),
                }
            }
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for (key, original) in std::mem::take(&mut self.saved) {
                self.put(key, original.as_deref());
            }
        }
    }

    #[fixture]
    fn clean_env() -> ScopedEnv {
        let lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let saved = [TYRO_PBT_CASES_ENV_KEY, TYRO_PBT_FORK_ENV_KEY]
            .into_iter()
            .map(|key| (key, env::var(key).ok()))
            .collect();
        let mut scoped = ScopedEnv { saved, _lock: lock };
        scoped.put(TYRO_PBT_CASES_ENV_KEY, None);
        scoped.put(TYRO_PBT_FORK_ENV_KEY, None);
        scoped
    }

    #[rstest]
    fn defaults_apply_without_overrides(clean_env: ScopedEnv) {
        let _env = clean_env;
        assert_eq!(
            ProptestRunProfile::load(48, false),
            ProptestRunProfile {
                cases: 48,
                fork: false
            }
        );
    }

    #[rstest]
    #[case::single("1", 1)]
    #[case::padded(" 256 ", 256)]
    #[case::nightly("25000", 25_000)]
    #[case::zero("0", 48)]
    #[case::negative("-3", 48)]
    #[case::garbage("many", 48)]
    fn case_overrides(mut clean_env: ScopedEnv, #[case] raw: &str, #[case] expected: u32) {
        clean_env.put(TYRO_PBT_CASES_ENV_KEY, Some(raw));
        assert_eq!(ProptestRunProfile::load(48, false).cases(), expected);
    }

    #[rstest]
    #[case::on("on", false, true)]
    #[case::upper("TRUE", false, true)]
    #[case::digit("1", false, true)]
    #[case::off("off", true, false)]
    #[case::no("no", true, false)]
    #[case::empty("", true, true)]
    #[case::unknown("maybe", false, false)]
    fn fork_overrides(
        mut clean_env: ScopedEnv,
        #[case] raw: &str,
        #[case] default: bool,
        #[case] expected: bool,
    ) {
        clean_env.put(TYRO_PBT_FORK_ENV_KEY, Some(raw));
        assert_eq!(ProptestRunProfile::load(48, default).fork(), expected);
    }
}
