use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::Error;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 128;

/// URL-safe public identifier of a campaign, e.g. `/c/{slug}`
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Slug(String);

impl FromStr for Slug {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        lazy_static::lazy_static! {
            static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9-]+$").unwrap();
        }

        let value = value.trim().to_lowercase();

        if value.is_empty() {
            return Err(Error::validation("Slug is required"));
        }
        if value.len() < MIN_LEN {
            return Err(Error::validation(format!(
                "Slug must be at least {} characters",
                MIN_LEN
            )));
        }
        if value.len() > MAX_LEN {
            return Err(Error::validation("Slug too long"));
        }
        if !SLUG_REGEX.is_match(&value) {
            return Err(Error::validation(
                "Slug may only contain lowercase letters, numbers and hyphens",
            ));
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
