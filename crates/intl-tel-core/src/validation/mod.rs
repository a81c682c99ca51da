//! Generic validator and the record of validation results.

use crate::{Map, SharedString, error::Error, extension::JsonObjectExt};
use smallvec::SmallVec;
use std::fmt;

mod validator;

pub use validator::Validator;

#[cfg(feature = "validator-phone-number")]
pub use validator::{InvalidPhoneNumber, PhoneNumberValidator};

/// A record of validation results.
#[derive(Debug, Default)]
pub struct Validation {
    failed_entries: SmallVec<[(SharedString, Error); 4]>,
}

impl Validation {
    /// Creates a new instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            failed_entries: SmallVec::new(),
        }
    }

    /// Creates a new instance with the entry.
    #[inline]
    pub fn from_entry(key: impl Into<SharedString>, err: impl Into<Error>) -> Self {
        let mut failed_entries = SmallVec::new();
        failed_entries.push((key.into(), err.into()));
        Self { failed_entries }
    }

    /// Records an entry with the supplied message.
    #[inline]
    pub fn record(&mut self, key: impl Into<SharedString>, message: impl Into<SharedString>) {
        self.failed_entries.push((key.into(), Error::new(message)));
    }

    /// Records an entry for the error.
    #[inline]
    pub fn record_fail(&mut self, key: impl Into<SharedString>, err: impl Into<Error>) {
        self.failed_entries.push((key.into(), err.into()));
    }

    /// Validates the value with the validator and records the failure if any.
    /// Returns `true` if the value is valid.
    pub fn validate_with<T, V>(&mut self, key: impl Into<SharedString>, value: &T, validator: &V) -> bool
    where
        T: ?Sized,
        V: Validator<T>,
    {
        match validator.validate(value) {
            Ok(()) => true,
            Err(err) => {
                self.record_fail(key, err);
                false
            }
        }
    }

    /// Returns `true` if the validation contains a value for the specified key.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.failed_entries.iter().any(|(field, _)| field == key)
    }

    /// Returns the number of failed entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.failed_entries.len()
    }

    /// Returns `true` if the validation is success.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.failed_entries.is_empty()
    }

    /// Returns a list of invalid params.
    #[inline]
    pub fn invalid_params(&self) -> Vec<&str> {
        self.failed_entries
            .iter()
            .map(|entry| entry.0.as_ref())
            .collect()
    }

    /// Consumes the validation and returns as a json object.
    /// Only the last message is kept for a key recorded more than once.
    #[must_use]
    pub fn into_map(self) -> Map {
        let failed_entries = self.failed_entries;
        let mut map = Map::with_capacity(failed_entries.len());
        for (key, err) in failed_entries {
            map.upsert(key, err.to_string());
        }
        map
    }
}

impl fmt::Display for Validation {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let failed_entries = &self.failed_entries;
        let mut errors = Vec::with_capacity(failed_entries.len());
        for (key, err) in failed_entries {
            let message = format!("invalid value for `{key}`: {}", err.message());
            errors.push(message);
        }
        write!(f, "{}", errors.join(","))
    }
}
