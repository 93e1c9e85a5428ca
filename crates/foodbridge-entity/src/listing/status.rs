//! Listing lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of a donation listing.
///
/// The lifecycle is strictly forward-progressing:
/// available → accepted → picked → delivered. `delivered` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Posted by a donor, open for acceptance.
    Available,
    /// Claimed by a recipient.
    Accepted,
    /// Picked up from the donor.
    Picked,
    /// Delivered to its destination. Terminal.
    Delivered,
}

impl ListingStatus {
    /// Return the status that immediately follows this one, if any.
    pub fn next(&self) -> Option<ListingStatus> {
        match self {
            Self::Available => Some(Self::Accepted),
            Self::Accepted => Some(Self::Picked),
            Self::Picked => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Whether no further transition is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Accepted => "accepted",
            Self::Picked => "picked",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "accepted" => Ok(Self::Accepted),
            "picked" => Ok(Self::Picked),
            "delivered" => Ok(Self::Delivered),
            _ => Err(foodbridge_core::AppError::validation(format!(
                "Invalid listing status: '{s}'. Expected one of: available, accepted, picked, delivered"
            ))),
        }
    }
}
