// WasteDesk - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use crate::util::error::CommandError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Views
// =============================================================================

/// The three list screens of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Zones,
    Collectors,
    Requests,
}

impl ViewKind {
    pub fn all() -> &'static [ViewKind] {
        &[ViewKind::Zones, ViewKind::Collectors, ViewKind::Requests]
    }

    /// Plural noun used in headings and pager footers.
    pub fn label(&self) -> &'static str {
        match self {
            ViewKind::Zones => "zones",
            ViewKind::Collectors => "collectors",
            ViewKind::Requests => "requests",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewKind {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zones" | "zone" => Ok(ViewKind::Zones),
            "collectors" | "collector" => Ok(ViewKind::Collectors),
            "requests" | "request" | "pickups" => Ok(ViewKind::Requests),
            _ => Err(CommandError::UnknownView {
                input: s.trim().to_string(),
            }),
        }
    }
}

// =============================================================================
// Zones
// =============================================================================

/// A collection zone (city district).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    pub name: String,

    /// Collectors assigned to the zone.
    pub collectors: u32,

    /// Pending collection requests.
    pub requests: u32,

    /// Completed collections.
    pub completed: u32,

    /// Capacity utilization, 0-100 percent.
    pub utilization: u8,
}

impl Zone {
    /// A freshly created zone with zeroed counters.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            collectors: 0,
            requests: 0,
            completed: 0,
            utilization: 0,
        }
    }

    pub fn band(&self) -> UtilizationBand {
        UtilizationBand::of(self.utilization)
    }
}

/// Coarse utilization level, used for colouring and the `band` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationBand {
    Low,
    Medium,
    High,
}

impl UtilizationBand {
    pub const TOKENS: &'static [&'static str] = &["low", "medium", "high"];

    pub fn of(utilization: u8) -> Self {
        if utilization >= constants::UTILIZATION_HIGH_THRESHOLD {
            UtilizationBand::High
        } else if utilization >= constants::UTILIZATION_MEDIUM_THRESHOLD {
            UtilizationBand::Medium
        } else {
            UtilizationBand::Low
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            UtilizationBand::Low => "low",
            UtilizationBand::Medium => "medium",
            UtilizationBand::High => "high",
        }
    }
}

// =============================================================================
// Collectors
// =============================================================================

/// A waste collector employed in one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collector {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,

    /// Name of the zone the collector works in.
    pub zone: String,

    pub status: CollectorStatus,
    pub collections_completed: u32,
    pub joined_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectorStatus {
    Active,
    Inactive,
    OnLeave,
}

impl CollectorStatus {
    pub const TOKENS: &'static [&'static str] = &["active", "inactive", "on-leave"];

    /// Parse a status token, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "active" => Some(CollectorStatus::Active),
            "inactive" => Some(CollectorStatus::Inactive),
            "on-leave" => Some(CollectorStatus::OnLeave),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            CollectorStatus::Active => "active",
            CollectorStatus::Inactive => "inactive",
            CollectorStatus::OnLeave => "on-leave",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CollectorStatus::Active => "Active",
            CollectorStatus::Inactive => "Inactive",
            CollectorStatus::OnLeave => "On Leave",
        }
    }
}

// =============================================================================
// Collection requests
// =============================================================================

/// A household's request for a garbage pickup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRequest {
    pub id: u32,
    pub status: RequestStatus,

    /// Approximate garbage weight in kilograms.
    pub garbage_weight: f64,

    pub date: NaiveDate,
    pub time: NaiveTime,
    pub address: Address,

    #[serde(default)]
    pub notes: String,

    /// Items weighed by the collector at pickup, in the order recorded.
    #[serde(default)]
    pub collected: Vec<CollectedItem>,
}

impl CollectionRequest {
    /// Total weight of the collected items, in kilograms.
    pub fn collected_weight(&self) -> f64 {
        self.collected.iter().map(|item| item.weight_kg).sum()
    }
}

/// One sorted batch of waste recorded against a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedItem {
    pub kind: WasteType,
    pub weight_kg: f64,
}

/// Recyclable categories a collector can weigh separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WasteType {
    PetBottles,
    AluminiumCans,
    Paper,
}

impl WasteType {
    pub const TOKENS: &'static [&'static str] = &["pet-bottles", "aluminium-cans", "paper"];

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "pet-bottles" | "pet" => Some(WasteType::PetBottles),
            "aluminium-cans" | "cans" => Some(WasteType::AluminiumCans),
            "paper" => Some(WasteType::Paper),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            WasteType::PetBottles => "pet-bottles",
            WasteType::AluminiumCans => "aluminium-cans",
            WasteType::Paper => "paper",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WasteType::PetBottles => "PET bottles",
            WasteType::AluminiumCans => "Aluminium cans",
            WasteType::Paper => "Paper",
        }
    }
}

/// Postal address of a pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub house_number: String,
    pub street: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}",
            self.house_number, self.street, self.city, self.district, self.state, self.pincode
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl RequestStatus {
    pub const TOKENS: &'static [&'static str] = &["pending", "accepted", "rejected", "completed"];

    pub fn token(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Completed => "Completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(UtilizationBand::of(95), UtilizationBand::High);
        assert_eq!(UtilizationBand::of(90), UtilizationBand::High);
        assert_eq!(UtilizationBand::of(89), UtilizationBand::Medium);
        assert_eq!(UtilizationBand::of(70), UtilizationBand::Medium);
        assert_eq!(UtilizationBand::of(69), UtilizationBand::Low);
        assert_eq!(UtilizationBand::of(0), UtilizationBand::Low);
    }

    #[test]
    fn test_status_serde_tokens() {
        let json = serde_json::to_string(&CollectorStatus::OnLeave).unwrap();
        assert_eq!(json, "\"on-leave\"");
        let status: RequestStatus = serde_json::from_str("\"accepted\"").unwrap();
        assert_eq!(status, RequestStatus::Accepted);
        for token in CollectorStatus::TOKENS {
            let parsed: CollectorStatus = serde_json::from_str(&format!("\"{token}\"")).unwrap();
            assert_eq!(parsed.token(), *token);
        }
    }

    #[test]
    fn test_view_kind_parse() {
        assert_eq!("Zones".parse::<ViewKind>(), Ok(ViewKind::Zones));
        assert_eq!("pickups".parse::<ViewKind>(), Ok(ViewKind::Requests));
        assert_eq!(
            " Trucks ".parse::<ViewKind>(),
            Err(CommandError::UnknownView {
                input: "Trucks".to_string()
            })
        );
    }

    #[test]
    fn test_token_lookup() {
        assert_eq!(CollectorStatus::from_token("On-Leave"), Some(CollectorStatus::OnLeave));
        assert_eq!(CollectorStatus::from_token("retired"), None);
        for token in WasteType::TOKENS {
            assert_eq!(WasteType::from_token(token).map(|w| w.token()), Some(*token));
        }
        assert_eq!(WasteType::from_token("cans"), Some(WasteType::AluminiumCans));
    }

    #[test]
    fn test_collected_items_default_to_empty() {
        let json = r#"{
            "id": 9, "status": "accepted", "garbageWeight": 12.5,
            "date": "2025-03-01", "time": "10:00:00",
            "address": { "houseNumber": "1", "street": "A", "city": "B",
                         "district": "C", "state": "D", "pincode": "1" }
        }"#;
        let mut request: CollectionRequest = serde_json::from_str(json).unwrap();
        assert!(request.collected.is_empty());
        request.collected.push(CollectedItem {
            kind: WasteType::Paper,
            weight_kg: 2.0,
        });
        request.collected.push(CollectedItem {
            kind: WasteType::PetBottles,
            weight_kg: 1.5,
        });
        assert_eq!(request.collected_weight(), 3.5);
        let back = serde_json::to_string(&request).unwrap();
        assert!(back.contains(r#""collected":[{"kind":"paper","weightKg":2.0}"#));
    }

    #[test]
    fn test_address_display() {
        let address = Address {
            house_number: "34".to_string(),
            street: "Main Street".to_string(),
            city: "Mohali".to_string(),
            district: "Mohali".to_string(),
            state: "Punjab".to_string(),
            pincode: "343434".to_string(),
        };
        assert_eq!(
            address.to_string(),
            "34, Main Street, Mohali, Mohali, Punjab, 343434"
        );
    }
}
