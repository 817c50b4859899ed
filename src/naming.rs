//! File-name construction for group artifacts.
//!
//! Names are `{prefix}_{sanitize(key)}.{ext}`. [`sanitize`] replaces the
//! characters that break paths and truncates to a bounded length, which is lossy:
//! two keys that only differ past the limit produce the same name.
//!
//! Under [`NamingPolicy::Legacy`] the second file silently overwrites the first.
//! [`NamingPolicy::Disambiguate`] appends a short hash of the full key whenever a
//! name was already taken by a different key in the same output set, repeating
//! until the name is free, so distinct keys always get distinct names.

use crate::record::GroupKey;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Length limit for owner/zoning/route/municipality/neighborhood keys.
pub const CATEGORY_KEY_LIMIT: usize = 50;
/// Length limit for each endpoint of an address-range file name.
pub const RANGE_ENDPOINT_LIMIT: usize = 30;
/// Length limit for year-built keys.
pub const YEAR_KEY_LIMIT: usize = 20;

/// Replace space, `/` and `\` with `_`, then keep at most `max_len` characters.
///
/// ```
/// use parcelbeam::naming::sanitize;
/// assert_eq!(sanitize("CITY OF CORAL/GABLES", 50), "CITY_OF_CORAL_GABLES");
/// assert_eq!(sanitize("abcdef", 3), "abc");
/// ```
#[must_use]
pub fn sanitize(key: &str, max_len: usize) -> String {
    key.chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .take(max_len)
        .collect()
}

/// First 8 hex digits of the SHA-256 of `key`.
#[must_use]
pub fn short_hash(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    let mut out = String::with_capacity(8);
    for byte in &digest[..4] {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// How to handle two keys that sanitize to the same name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum NamingPolicy {
    /// Keep the sanitized name; later groups overwrite earlier ones.
    #[default]
    Legacy,
    /// Append `_{short_hash(key)}` when the name is already taken.
    Disambiguate,
}

/// Hands out file names for one output set (one directory, one export).
#[derive(Debug, Default)]
pub struct FileNamer {
    policy: NamingPolicy,
    used: HashMap<String, GroupKey>,
}

impl FileNamer {
    #[must_use]
    pub fn new(policy: NamingPolicy) -> Self {
        Self {
            policy,
            used: HashMap::new(),
        }
    }

    /// Name for a keyed group: `{prefix}_{sanitize(key, max_len)}.{ext}`.
    pub fn group_name(&mut self, prefix: &str, key: &GroupKey, max_len: usize, ext: &str) -> String {
        let stem = format!("{prefix}_{}", sanitize(key.as_str(), max_len));
        self.claim(stem, key, ext)
    }

    /// Name for a sorted range chunk:
    /// `address_range_{NNN}_{first}_to_{last}.{ext}`.
    ///
    /// The sequence number keeps these unique, so the policy never kicks in.
    pub fn range_name(&mut self, index: usize, first: &str, last: &str, ext: &str) -> String {
        let stem = format!(
            "address_range_{index:03}_{}_to_{}",
            sanitize(first, RANGE_ENDPOINT_LIMIT),
            sanitize(last, RANGE_ENDPOINT_LIMIT)
        );
        let key = GroupKey::new(format!("{index}:{first}:{last}"));
        self.claim(stem, &key, ext)
    }

    fn claim(&mut self, mut stem: String, key: &GroupKey, ext: &str) -> String {
        if self.policy == NamingPolicy::Disambiguate {
            let suffix = short_hash(key.as_str());
            // a hashed name can itself be taken, e.g. by a literal key that looks hashed
            while let Some(owner) = self.used.get(&stem)
                && owner != key
            {
                stem = format!("{stem}_{suffix}");
            }
        }
        self.used.entry(stem.clone()).or_insert_with(|| key.clone());
        format!("{stem}.{ext}")
    }
}

/// Name for a positional chunk: `chunk_{NNN}.{ext}`.
#[must_use]
pub fn chunk_file_name(index: usize, ext: &str) -> String {
    format!("chunk_{index:03}.{ext}")
}
