//! Per-site visibility statuses.
//!
//! One row per (customer, member, site) tuple tracks how visible the
//! person's data currently is on a covered directory site. The wire strings
//! are Swedish product vocabulary and are stored verbatim.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Visibility of a person's data on one covered site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteVisibility {
    /// Under review by staff.
    #[serde(rename = "Granskar")]
    Granskar,
    /// Data is publicly visible.
    #[serde(rename = "Synlig")]
    Synlig,
    /// Data is hidden.
    #[serde(rename = "Dold")]
    Dold,
    /// Only the street address is hidden.
    #[serde(rename = "Adress dold")]
    AdressDold,
    /// Data has been removed entirely.
    #[serde(rename = "Borttagen")]
    Borttagen,
}

impl SiteVisibility {
    pub fn as_str(self) -> &'static str {
        match self {
            SiteVisibility::Granskar => "Granskar",
            SiteVisibility::Synlig => "Synlig",
            SiteVisibility::Dold => "Dold",
            SiteVisibility::AdressDold => "Adress dold",
            SiteVisibility::Borttagen => "Borttagen",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "Granskar" => Ok(SiteVisibility::Granskar),
            "Synlig" => Ok(SiteVisibility::Synlig),
            "Dold" => Ok(SiteVisibility::Dold),
            "Adress dold" => Ok(SiteVisibility::AdressDold),
            "Borttagen" => Ok(SiteVisibility::Borttagen),
            other => Err(CoreError::Validation(format!(
                "Unknown site status '{other}'. Must be one of: \
                 Granskar, Synlig, Dold, Adress dold, Borttagen"
            ))),
        }
    }
}
