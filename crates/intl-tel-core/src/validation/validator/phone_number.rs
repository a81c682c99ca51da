use self::InvalidPhoneNumber::*;
use super::Validator;
use phonenumber::{ParseError, PhoneNumber, country::Id};
use std::{error, fmt};

/// A validator for a phone number.
///
/// Numbers without an explicit dial code are parsed against the default region.
/// A number is accepted only if it can be parsed and the library
/// considers it a valid number for its detected region.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PhoneNumberValidator {
    /// Fallback region for numbers without a dial code.
    default_region: Option<Id>,
}

impl PhoneNumberValidator {
    /// Creates a new instance without a default region.
    #[inline]
    pub fn new() -> Self {
        Self {
            default_region: None,
        }
    }

    /// Creates a new instance with the default region.
    #[inline]
    pub fn with_region(region: Id) -> Self {
        Self {
            default_region: Some(region),
        }
    }

    /// Parses a two-letter region code such as `EC` or `es`.
    #[inline]
    pub fn parse_region(region: &str) -> Option<Id> {
        region.trim().to_ascii_uppercase().parse().ok()
    }

    /// Returns the default region.
    #[inline]
    pub fn default_region(&self) -> Option<Id> {
        self.default_region
    }

    /// Parses the data as a valid phone number.
    pub fn parse(&self, data: &str) -> Result<PhoneNumber, InvalidPhoneNumber> {
        let number = phonenumber::parse(self.default_region, data).map_err(ParseFailed)?;
        if !phonenumber::is_valid(&number) {
            return Err(InvalidForRegion {
                region: number.country().id(),
            });
        }
        Ok(number)
    }
}

impl Validator<str> for PhoneNumberValidator {
    type Error = InvalidPhoneNumber;

    #[inline]
    fn validate(&self, data: &str) -> Result<(), Self::Error> {
        self.parse(data).map(|_| ())
    }
}

/// An error for the phone number validation.
#[derive(Debug)]
pub enum InvalidPhoneNumber {
    /// The value can not be interpreted as a phone number.
    ParseFailed(ParseError),
    /// The value is parsed but it is not a plausible number for the region.
    InvalidForRegion {
        /// The region detected from the number.
        region: Option<Id>,
    },
}

impl InvalidPhoneNumber {
    /// Returns `true` if the value can not be parsed.
    #[inline]
    pub fn is_parse_failed(&self) -> bool {
        matches!(self, ParseFailed(_))
    }

    /// Returns `true` if the value is parsed but invalid for its region.
    #[inline]
    pub fn is_invalid_for_region(&self) -> bool {
        matches!(self, InvalidForRegion { .. })
    }
}

impl fmt::Display for InvalidPhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailed(err) => write!(f, "fail to parse the phone number: {err}"),
            InvalidForRegion {
                region: Some(region),
            } => write!(f, "phone number is not valid for the region `{region:?}`"),
            InvalidForRegion { region: None } => {
                write!(f, "phone number is not valid for any region")
            }
        }
    }
}

impl error::Error for InvalidPhoneNumber {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParseFailed(err) => Some(err),
            InvalidForRegion { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PhoneNumberValidator, Validator};
    use crate::error::Error;
    use phonenumber::country::Id;

    #[test]
    fn it_validates_phone_numbers() {
        let validator = PhoneNumberValidator::with_region(Id::EC);
        assert!(validator.validate("+34911223344").is_ok());

        let err = validator.validate("12345").unwrap_err();
        assert!(err.is_invalid_for_region());

        let err = validator.validate("not-a-number").unwrap_err();
        assert!(err.is_parse_failed());
        assert!(Error::from(err).message().starts_with("fail to parse the phone number"));
    }

    #[test]
    fn it_parses_regions() {
        assert_eq!(PhoneNumberValidator::parse_region("EC"), Some(Id::EC));
        assert_eq!(PhoneNumberValidator::parse_region(" es "), Some(Id::ES));
        assert_eq!(PhoneNumberValidator::parse_region("auto"), None);
        assert_eq!(PhoneNumberValidator::parse_region(""), None);
        assert_eq!(PhoneNumberValidator::new().default_region(), None);
    }

    #[test]
    fn it_detects_the_region_of_numbers() {
        let validator = PhoneNumberValidator::with_region(Id::EC);
        let number = validator.parse("+34911223344").unwrap();
        assert_eq!(number.country().id(), Some(Id::ES));
    }
}
