use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};

const MAX_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignName(String);

impl AsRef<str> for CampaignName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CampaignName {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();

        if value.is_empty() {
            return Err(Error::validation("Name is required"));
        }
        if value.graphemes(true).count() > MAX_LEN {
            return Err(Error::validation("Name too long"));
        }
        Ok(Self(value.to_string()))
    }
}
