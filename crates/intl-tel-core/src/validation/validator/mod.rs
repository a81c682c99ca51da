//! Common validation rules.

#[cfg(feature = "validator-phone-number")]
mod phone_number;

#[cfg(feature = "validator-phone-number")]
pub use phone_number::{InvalidPhoneNumber, PhoneNumberValidator};

/// A generic validator.
pub trait Validator<T: ?Sized> {
    /// The error type.
    type Error: Into<crate::error::Error>;

    /// Validates the data.
    fn validate(&self, data: &T) -> Result<(), Self::Error>;
}
