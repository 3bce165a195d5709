//! Shell settings read from the environment

use crate::filter::DEFAULT_SEED;
use crate::io::PgmEncoding;
use tracing::warn;

/// Environment variable holding the quickselect seed.
pub const SEED_VAR: &str = "PGMFILTER_SEED";

/// Environment variable selecting the output encoding.
pub const ENCODING_VAR: &str = "PGMFILTER_ENCODING";

/// Settings shared by every command of a shell session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellSettings {
    /// Seed of the median filter's pivot RNG
    pub seed: u64,
    /// Encoding of written images
    pub encoding: PgmEncoding,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            encoding: PgmEncoding::Ascii,
        }
    }
}

impl ShellSettings {
    /// Read settings from `PGMFILTER_SEED` and `PGMFILTER_ENCODING`.
    ///
    /// Unset variables keep their default. Unparsable values are reported
    /// and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(value) = lookup(SEED_VAR) {
            match value.trim().parse::<u64>() {
                Ok(seed) => settings.seed = seed,
                Err(_) => warn!(%value, "ignoring invalid {}", SEED_VAR),
            }
        }
        if let Some(value) = lookup(ENCODING_VAR) {
            match PgmEncoding::from_name(&value) {
                Some(encoding) => settings.encoding = encoding,
                None => warn!(%value, "ignoring invalid {}", ENCODING_VAR),
            }
        }
        settings
    }
}
