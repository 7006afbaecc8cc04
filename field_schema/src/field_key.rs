// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::{BTreeMap, BTreeSet, HashMap, HashSet},
          hash::BuildHasher};

use chrono::Utc;
use rand::{Rng, rngs::ThreadRng};

use crate::{FieldSchemaError, FieldSchemaResult};

/// Keys that start with this prefix were added by the user. Everything else is part of
/// the fixed schema of the document.
pub const CUSTOM_FIELD_PREFIX: &str = "custom_";

/// Normalized keys are never longer than this.
pub const MAX_NORMALIZED_KEY_LEN: usize = 50;

/// Number of random characters after [`CUSTOM_FIELD_PREFIX`] in a generated key.
pub const GENERATED_SUFFIX_LEN: usize = 4;

/// How many random keys are tried before falling back to a timestamp key.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

const SUFFIX_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Turn a human entered label into a key. This is total, any input (including the empty
/// string) produces a possibly empty key that matches `^[a-z0-9_]{0,50}$`.
///
/// In order:
/// 1. lowercase,
/// 2. trim leading and trailing whitespace,
/// 3. collapse each internal whitespace run into a single `_`,
/// 4. drop every character outside `[a-z0-9_]`,
/// 5. truncate to [`MAX_NORMALIZED_KEY_LEN`] characters.
///
/// ```
/// use bosslog_field_schema::normalize_field_key;
///
/// assert_eq!(normalize_field_key("My Label!!"), "my_label");
/// assert_eq!(normalize_field_key("  Favorite   coffee order "), "favorite_coffee_order");
/// ```
#[must_use]
pub fn normalize_field_key(label: &str) -> String {
    let lowercase = label.to_lowercase();

    let mut acc = String::with_capacity(lowercase.len());
    let mut prev_was_whitespace = false;
    for ch in lowercase.trim().chars() {
        if ch.is_whitespace() {
            if !prev_was_whitespace {
                acc.push('_');
            }
            prev_was_whitespace = true;
        } else {
            acc.push(ch);
            prev_was_whitespace = false;
        }
    }

    acc.retain(|ch| matches!(ch, 'a'..='z' | '0'..='9' | '_'));

    // Only ASCII is left, so byte and char offsets agree.
    acc.truncate(MAX_NORMALIZED_KEY_LEN);
    acc
}

/// Returns `true` if the key starts with [`CUSTOM_FIELD_PREFIX`].
#[must_use]
pub fn is_custom_field_key(key: &str) -> bool { key.starts_with(CUSTOM_FIELD_PREFIX) }

/// Anything that can answer "is this key already taken?". Implemented for the usual
/// mapping and set types, and for slices of keys. Wrap a closure in [`KeyOracle`] to
/// use an arbitrary uniqueness check.
pub trait FieldKeyLookup {
    fn contains_field_key(&self, key: &str) -> bool;
}

impl<T: FieldKeyLookup + ?Sized> FieldKeyLookup for &T {
    fn contains_field_key(&self, key: &str) -> bool { (**self).contains_field_key(key) }
}

impl FieldKeyLookup for serde_json::Map<String, serde_json::Value> {
    fn contains_field_key(&self, key: &str) -> bool { self.contains_key(key) }
}

impl<V, S: BuildHasher> FieldKeyLookup for HashMap<String, V, S> {
    fn contains_field_key(&self, key: &str) -> bool { self.contains_key(key) }
}

impl<V> FieldKeyLookup for BTreeMap<String, V> {
    fn contains_field_key(&self, key: &str) -> bool { self.contains_key(key) }
}

impl<S: BuildHasher> FieldKeyLookup for HashSet<String, S> {
    fn contains_field_key(&self, key: &str) -> bool { self.contains(key) }
}

impl FieldKeyLookup for BTreeSet<String> {
    fn contains_field_key(&self, key: &str) -> bool { self.contains(key) }
}

impl FieldKeyLookup for [String] {
    fn contains_field_key(&self, key: &str) -> bool { self.iter().any(|it| it == key) }
}

impl FieldKeyLookup for [&str] {
    fn contains_field_key(&self, key: &str) -> bool { self.iter().any(|it| *it == key) }
}

/// Adapts a closure into a [`FieldKeyLookup`]. The closure returns `true` when the key
/// is already taken.
#[derive(Debug, Clone, Copy)]
pub struct KeyOracle<F>(pub F);

impl<F: Fn(&str) -> bool> FieldKeyLookup for KeyOracle<F> {
    fn contains_field_key(&self, key: &str) -> bool { (self.0)(key) }
}

/// `true` exactly when `key` is absent from `mapping`. A key that is present counts as
/// taken no matter what it maps to (`null`, `""`, `false`, ...).
#[must_use]
pub fn is_field_key_unique(mapping: &(impl FieldKeyLookup + ?Sized), key: &str) -> bool {
    !mapping.contains_field_key(key)
}

/// Generate a fresh `custom_xxxx` key that is not in `mapping`. After
/// [`DEFAULT_MAX_ATTEMPTS`] collisions this falls back to a timestamp based key that is
/// not checked again. The mapping is not modified; the caller inserts the key.
///
/// ```
/// use std::collections::HashMap;
/// use bosslog_field_schema::{generate_unique_field_key, is_field_key_unique};
///
/// let mut fields = HashMap::<String, String>::new();
/// fields.insert("name".into(), "Sarah".into());
/// let key = generate_unique_field_key(&fields);
/// assert!(key.starts_with("custom_"));
/// assert!(is_field_key_unique(&fields, &key));
/// ```
#[must_use]
pub fn generate_unique_field_key(mapping: &(impl FieldKeyLookup + ?Sized)) -> String {
    FieldKeyGenerator::default().generate(mapping)
}

/// Strict version of [`generate_unique_field_key`]. Instead of falling back to a
/// timestamp key, returns [`FieldSchemaError::KeySpaceExhausted`].
///
/// # Errors
///
/// Returns [`FieldSchemaError::KeySpaceExhausted`] if every attempt collided.
pub fn try_generate_unique_field_key(
    oracle: &(impl FieldKeyLookup + ?Sized),
) -> FieldSchemaResult<String> {
    FieldKeyGenerator::default().try_generate(oracle)
}

/// Source of "now" for fallback keys.
pub trait Clock {
    fn now_unix_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_millis(&self) -> i64 { Utc::now().timestamp_millis() }
}

/// Always reports the same time. Handy to pin down the fallback key.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix_millis(&self) -> i64 { self.0 }
}

/// Generates custom field keys with an injectable random source and clock.
#[derive(Debug)]
pub struct FieldKeyGenerator<R: Rng, C: Clock> {
    rng: R,
    clock: C,
    max_attempts: usize,
}

impl Default for FieldKeyGenerator<ThreadRng, SystemClock> {
    fn default() -> Self { Self::new(rand::rng(), SystemClock) }
}

impl<R: Rng, C: Clock> FieldKeyGenerator<R, C> {
    pub fn new(rng: R, clock: C) -> Self {
        Self {
            rng,
            clock,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// `0` skips the random attempts entirely.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn max_attempts(&self) -> usize { self.max_attempts }

    /// See [`generate_unique_field_key`].
    pub fn generate(&mut self, mapping: &(impl FieldKeyLookup + ?Sized)) -> String {
        match self.try_generate(mapping) {
            Ok(key) => key,
            Err(_) => {
                let key = self.fallback_key();
                // % is Display, ? is Debug.
                tracing::warn!(
                    message = "Falling back to timestamp field key.",
                    attempts = self.max_attempts,
                    key = %key
                );
                key
            }
        }
    }

    /// See [`try_generate_unique_field_key`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldSchemaError::KeySpaceExhausted`] if every attempt collided.
    pub fn try_generate(
        &mut self,
        oracle: &(impl FieldKeyLookup + ?Sized),
    ) -> FieldSchemaResult<String> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.random_candidate();
            if is_field_key_unique(oracle, &candidate) {
                return Ok(candidate);
            }
            tracing::debug!(
                message = "Generated field key collided.",
                attempt = attempt,
                candidate = %candidate
            );
        }
        Err(FieldSchemaError::KeySpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    fn random_candidate(&mut self) -> String {
        let mut acc =
            String::with_capacity(CUSTOM_FIELD_PREFIX.len() + GENERATED_SUFFIX_LEN);
        acc.push_str(CUSTOM_FIELD_PREFIX);
        for _ in 0..GENERATED_SUFFIX_LEN {
            let index = self.rng.random_range(0..SUFFIX_ALPHABET.len());
            acc.push(char::from(SUFFIX_ALPHABET[index]));
        }
        acc
    }

    /// [`CUSTOM_FIELD_PREFIX`] followed by the current time in base 36. A clock before
    /// the Unix epoch is treated as the epoch.
    #[must_use]
    pub fn fallback_key(&self) -> String {
        let millis = u64::try_from(self.clock.now_unix_millis()).unwrap_or(0);
        format!("{CUSTOM_FIELD_PREFIX}{}", to_base36(millis))
    }
}

/// Lowercase base 36, same digits as [`SUFFIX_ALPHABET`] sorted numerically.
#[must_use]
pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut acc = Vec::with_capacity(13);
    while value > 0 {
        let digit = usize::try_from(value % 36).unwrap_or(0);
        acc.push(DIGITS[digit]);
        value /= 36;
    }
    acc.reverse();
    acc.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};
    use test_case::test_case;

    use super::*;

    fn is_normalized_shape(it: &str) -> bool {
        it.len() <= MAX_NORMALIZED_KEY_LEN
            && it
                .chars()
                .all(|ch| matches!(ch, 'a'..='z' | '0'..='9' | '_'))
    }

    fn is_generated_shape(it: &str) -> bool {
        match it.strip_prefix(CUSTOM_FIELD_PREFIX) {
            Some(suffix) => {
                suffix.len() == GENERATED_SUFFIX_LEN
                    && suffix
                        .chars()
                        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
            }
            None => false,
        }
    }

    fn seeded_generator(seed: u64) -> FieldKeyGenerator<StdRng, FixedClock> {
        FieldKeyGenerator::new(StdRng::seed_from_u64(seed), FixedClock(1_700_000_000_000))
    }

    #[test_case("My Label!!", "my_label")]
    #[test_case("", "")]
    #[test_case("   ", "")]
    #[test_case("Name", "name")]
    #[test_case("  Favorite \t\n  Coffee  ", "favorite_coffee")]
    #[test_case("already_snake_case", "already_snake_case")]
    #[test_case("Kid's names (3)", "kids_names_3")]
    #[test_case("Ünïcödé wörds", "ncd_wrds")]
    #[test_case("a - b", "a__b")]
    fn test_normalize_field_key(input: &str, expected: &str) {
        assert_eq!(normalize_field_key(input), expected);
    }

    #[test]
    fn test_normalize_truncates_to_max_len() {
        let long_label = "x".repeat(80);
        let it = normalize_field_key(&long_label);
        assert_eq!(it.len(), MAX_NORMALIZED_KEY_LEN);

        // Truncation happens after stripping, so dropped characters don't count.
        let label = format!("{}{}", "!".repeat(60), "y".repeat(10));
        assert_eq!(normalize_field_key(&label), "y".repeat(10));
    }

    #[test]
    fn test_normalize_is_idempotent_and_well_formed() {
        let samples = [
            "My Label!!",
            "  Lots   of   space  ",
            "MiXeD CaSe 123",
            "emoji 🙂 in label",
            "tabs\tand\nnewlines",
            "__under__scores__",
            "",
            "İstanbul office",
            &"long label ".repeat(10),
        ];
        for sample in samples {
            let once = normalize_field_key(sample);
            let twice = normalize_field_key(&once);
            assert_eq!(once, twice, "not idempotent for {sample:?}");
            assert!(is_normalized_shape(&once), "bad shape {once:?}");
        }
    }

    #[test]
    fn test_is_field_key_unique() {
        let mut fields = serde_json::Map::new();
        fields.insert("name".into(), serde_json::json!("Sarah"));
        fields.insert("custom_empty".into(), serde_json::json!(""));
        fields.insert("custom_null".into(), serde_json::Value::Null);
        fields.insert("custom_false".into(), serde_json::json!(false));

        assert!(!is_field_key_unique(&fields, "name"));
        assert!(!is_field_key_unique(&fields, "custom_empty"));
        assert!(!is_field_key_unique(&fields, "custom_null"));
        assert!(!is_field_key_unique(&fields, "custom_false"));
        assert!(is_field_key_unique(&fields, "custom_abcd"));
    }

    #[test]
    fn test_lookup_impls() {
        let keys = ["name", "custom_ab12"];
        assert!(keys.as_slice().contains_field_key("name"));
        assert!(!keys.as_slice().contains_field_key("goal"));

        let owned: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert!(owned.as_slice().contains_field_key("custom_ab12"));

        let set: BTreeSet<String> = owned.iter().cloned().collect();
        assert!(set.contains_field_key("name"));

        let map: BTreeMap<String, i32> = owned.iter().cloned().map(|it| (it, 0)).collect();
        assert!(map.contains_field_key("name"));

        let oracle = KeyOracle(|key: &str| key == "custom_zzzz");
        assert!(oracle.contains_field_key("custom_zzzz"));
        assert!(!oracle.contains_field_key("custom_aaaa"));
    }

    #[test]
    fn test_generate_unique_field_key_shape_and_uniqueness() {
        let mut fields = HashMap::<String, u8>::new();
        fields.insert("name".into(), 1);
        for _ in 0..200 {
            let key = generate_unique_field_key(&fields);
            assert!(is_generated_shape(&key), "bad shape {key:?}");
            assert!(is_field_key_unique(&fields, &key));
            fields.insert(key, 1);
        }
    }

    #[test]
    fn test_generate_skips_colliding_candidates() {
        // Replay the same seed to learn the first candidate, then mark it taken.
        let first = seeded_generator(7).random_candidate();
        let mut taken = HashSet::<String>::new();
        taken.insert(first.clone());

        let key = seeded_generator(7).generate(&taken);
        assert_ne!(key, first);
        assert!(is_generated_shape(&key));
    }

    #[test]
    fn test_generate_falls_back_when_every_attempt_collides() {
        let everything_taken = KeyOracle(|_: &str| true);
        let mut generator = seeded_generator(42);

        let key = generator.generate(&everything_taken);
        assert_eq!(key, format!("custom_{}", to_base36(1_700_000_000_000)));
        assert!(!is_generated_shape(&key));
    }

    #[test]
    fn test_try_generate_reports_exhaustion() {
        let everything_taken = KeyOracle(|_: &str| true);
        let result = seeded_generator(1).try_generate(&everything_taken);
        assert!(matches!(
            result,
            Err(FieldSchemaError::KeySpaceExhausted {
                attempts: DEFAULT_MAX_ATTEMPTS
            })
        ));
    }

    #[test]
    fn test_try_generate_counts_attempts() {
        let calls = std::cell::Cell::new(0_usize);
        let oracle = KeyOracle(|_: &str| {
            calls.set(calls.get() + 1);
            true
        });
        let result = seeded_generator(3).with_max_attempts(4).try_generate(&oracle);
        assert!(result.is_err());
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_zero_attempts_goes_straight_to_fallback() {
        let mut generator = seeded_generator(5).with_max_attempts(0);
        let key = generator.generate(&HashSet::<String>::new());
        assert_eq!(key, generator.fallback_key());
    }

    #[test]
    fn test_fallback_before_epoch_uses_zero() {
        let generator =
            FieldKeyGenerator::new(StdRng::seed_from_u64(0), FixedClock(-5_000));
        assert_eq!(generator.fallback_key(), "custom_0");
    }

    #[test_case(0, "0")]
    #[test_case(35, "z")]
    #[test_case(36, "10")]
    #[test_case(1_295, "zz")]
    #[test_case(1_700_000_000_000, "loyw3v28")]
    fn test_to_base36(input: u64, expected: &str) {
        assert_eq!(to_base36(input), expected);
    }

    #[test]
    fn test_is_custom_field_key() {
        assert!(is_custom_field_key("custom_ab12"));
        assert!(!is_custom_field_key("name"));
        assert!(!is_custom_field_key("Custom_ab12"));
    }
}
