use std::collections::BTreeMap;

use serde::Serialize;

pub mod campaigns;
pub mod checkout;
pub mod email;
pub mod pages;
pub mod subscriptions;

/// JSON envelope shared by the API endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Site-wide values the pages and checkout endpoints need
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// Public base URL, used for links and as the fallback checkout origin
    pub base_url: String,
    /// Plan name to checkout price id
    pub prices: BTreeMap<String, String>,
}
