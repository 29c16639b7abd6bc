// WasteDesk - core/record.rs
//
// The `ListRecord` trait: everything the generic list view needs to know
// about a record type (identity, filters, table columns, export columns),
// plus its implementations for zones, collectors, and collection requests.

use crate::core::filter::{FilterDef, FilterSet, TextField};
use crate::core::model::{
    CollectionRequest, Collector, CollectorStatus, RequestStatus, UtilizationBand, ViewKind, Zone,
};
use crate::util::constants;
use crate::util::error::RecordIssue;
use serde::Serialize;

/// A record type that can be shown in a filterable, paginated list.
pub trait ListRecord: Clone + Serialize + 'static {
    /// The view this record type belongs to.
    const VIEW: ViewKind;

    /// Stable identifier used by delete/accept/reject commands.
    fn id(&self) -> String;

    /// Human-facing name used in notices and confirmations.
    fn title(&self) -> String;

    /// The filters the view offers over this record type.
    fn filters() -> FilterSet<Self>;

    /// Table column headings.
    fn columns() -> &'static [&'static str];

    /// Table cells, one per column.
    fn cells(&self) -> Vec<String>;

    /// CSV header for export (every field, flattened).
    fn export_header() -> &'static [&'static str];

    /// CSV row for export, one value per header column.
    fn export_row(&self) -> Vec<String>;

    /// Check field constraints on records loaded from outside.
    fn validate(&self) -> Result<(), RecordIssue> {
        Ok(())
    }
}

// =============================================================================
// Zones
// =============================================================================

fn zone_name(zone: &Zone) -> &str {
    &zone.name
}

fn zone_band(zone: &Zone) -> &str {
    zone.band().token()
}

fn zone_utilization(zone: &Zone) -> f64 {
    f64::from(zone.utilization)
}

const ZONE_SEARCH: &[TextField<Zone>] = &[zone_name];

impl ListRecord for Zone {
    const VIEW: ViewKind = ViewKind::Zones;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn filters() -> FilterSet<Self> {
        FilterSet::new(
            Self::VIEW.label(),
            vec![
                FilterDef::search("name", "Zone name", ZONE_SEARCH),
                FilterDef::range("utilization", "Utilization %", zone_utilization),
                FilterDef::choice("band", "Utilization band", zone_band, UtilizationBand::TOKENS),
            ],
        )
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Zone Name", "Collectors", "Pending Requests", "Collections", "Utilization"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.collectors.to_string(),
            self.requests.to_string(),
            self.completed.to_string(),
            format!("{}% ({})", self.utilization, self.band().token()),
        ]
    }

    fn export_header() -> &'static [&'static str] {
        &["id", "name", "collectors", "requests", "completed", "utilization"]
    }

    fn export_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.collectors.to_string(),
            self.requests.to_string(),
            self.completed.to_string(),
            self.utilization.to_string(),
        ]
    }

    fn validate(&self) -> Result<(), RecordIssue> {
        if self.name.trim().is_empty() {
            return Err(RecordIssue::EmptyField { field: "zone name" });
        }
        if self.utilization > constants::MAX_UTILIZATION {
            return Err(RecordIssue::UtilizationTooHigh {
                value: self.utilization,
                max: constants::MAX_UTILIZATION,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Collectors
// =============================================================================

fn collector_name(collector: &Collector) -> &str {
    &collector.name
}

fn collector_email(collector: &Collector) -> &str {
    &collector.email
}

fn collector_status(collector: &Collector) -> &str {
    collector.status.token()
}

fn collector_zone(collector: &Collector) -> &str {
    &collector.zone
}

fn collector_collections(collector: &Collector) -> f64 {
    f64::from(collector.collections_completed)
}

const COLLECTOR_SEARCH: &[TextField<Collector>] = &[collector_name, collector_email];

impl ListRecord for Collector {
    const VIEW: ViewKind = ViewKind::Collectors;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn filters() -> FilterSet<Self> {
        FilterSet::new(
            Self::VIEW.label(),
            vec![
                FilterDef::search("search", "Name or email", COLLECTOR_SEARCH),
                FilterDef::choice("status", "Status", collector_status, CollectorStatus::TOKENS),
                FilterDef::choice("zone", "Zone", collector_zone, &[]),
                FilterDef::range("collections", "Collections completed", collector_collections),
            ],
        )
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Zone", "Status", "Collections"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.zone.clone(),
            self.status.label().to_string(),
            self.collections_completed.to_string(),
        ]
    }

    fn export_header() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "email",
            "phone",
            "zone",
            "status",
            "collections_completed",
            "joined_date",
        ]
    }

    fn export_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.zone.clone(),
            self.status.token().to_string(),
            self.collections_completed.to_string(),
            self.joined_date.to_string(),
        ]
    }

    fn validate(&self) -> Result<(), RecordIssue> {
        if self.name.trim().is_empty() {
            return Err(RecordIssue::EmptyField {
                field: "collector name",
            });
        }
        Ok(())
    }
}

// =============================================================================
// Collection requests
// =============================================================================

fn request_street(request: &CollectionRequest) -> &str {
    &request.address.street
}

fn request_city(request: &CollectionRequest) -> &str {
    &request.address.city
}

fn request_notes(request: &CollectionRequest) -> &str {
    &request.notes
}

fn request_status(request: &CollectionRequest) -> &str {
    request.status.token()
}

fn request_weight(request: &CollectionRequest) -> f64 {
    request.garbage_weight
}

const REQUEST_SEARCH: &[TextField<CollectionRequest>] =
    &[request_street, request_city, request_notes];
const REQUEST_NOTES: &[TextField<CollectionRequest>] = &[request_notes];

impl ListRecord for CollectionRequest {
    const VIEW: ViewKind = ViewKind::Requests;

    fn id(&self) -> String {
        self.id.to_string()
    }

    fn title(&self) -> String {
        format!("Collection request #{}", self.id)
    }

    fn filters() -> FilterSet<Self> {
        FilterSet::new(
            Self::VIEW.label(),
            vec![
                FilterDef::search("search", "Street, city or notes", REQUEST_SEARCH),
                FilterDef::choice("status", "Status", request_status, RequestStatus::TOKENS),
                FilterDef::choice("city", "City", request_city, &[]),
                FilterDef::range("weight", "Weight (kg)", request_weight),
                FilterDef::pattern("notes", "Notes (regex)", REQUEST_NOTES),
            ],
        )
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Location", "Date & Time", "Weight", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.address.city.clone(),
            format!("{} {}", self.date, self.time.format("%H:%M")),
            format!("{} kg", self.garbage_weight),
            self.status.label().to_string(),
        ]
    }

    fn export_header() -> &'static [&'static str] {
        &[
            "id",
            "status",
            "garbage_weight_kg",
            "date",
            "time",
            "house_number",
            "street",
            "city",
            "district",
            "state",
            "pincode",
            "notes",
            "collected_kg",
        ]
    }

    fn export_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.status.token().to_string(),
            self.garbage_weight.to_string(),
            self.date.to_string(),
            self.time.format("%H:%M").to_string(),
            self.address.house_number.clone(),
            self.address.street.clone(),
            self.address.city.clone(),
            self.address.district.clone(),
            self.address.state.clone(),
            self.address.pincode.clone(),
            self.notes.clone(),
            self.collected_weight().to_string(),
        ]
    }

    fn validate(&self) -> Result<(), RecordIssue> {
        let weights = std::iter::once(self.garbage_weight)
            .chain(self.collected.iter().map(|item| item.weight_kg));
        for value in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(RecordIssue::NegativeWeight { value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{filter_records, FilterState};
    use crate::core::model::{CollectedItem, WasteType};
    use crate::core::sample;

    fn select<R: ListRecord>(name: &str, raw: &str) -> (FilterSet<R>, FilterState) {
        let filters = R::filters();
        let mut state = FilterState::default();
        let def = filters.lookup(name).unwrap();
        let value = def.parse(raw).unwrap();
        state.set(def.name, value);
        (filters, state)
    }

    #[test]
    fn test_zone_utilization_at_least_90() {
        let zones = sample::zones();
        let (filters, state) = select::<Zone>("utilization", ">=90");
        let kept: Vec<u8> = filter_records(&zones, &filters, &state)
            .iter()
            .map(|z| z.utilization)
            .collect();
        assert_eq!(kept, vec![90, 95, 92]);
    }

    #[test]
    fn test_zone_band_matches_threshold_filter() {
        let zones = sample::zones();
        let (filters, state) = select::<Zone>("band", "HIGH");
        let ids: Vec<String> = filter_records(&zones, &filters, &state)
            .iter()
            .map(|z| z.id.clone())
            .collect();
        assert_eq!(ids, vec!["3", "5", "9"]);
    }

    #[test]
    fn test_collector_search_covers_email() {
        let collectors = sample::collectors();
        let (filters, state) = select::<Collector>("search", "michael.j@");
        let names: Vec<&str> = filter_records(&collectors, &filters, &state)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Michael Johnson"]);
    }

    #[test]
    fn test_collector_zone_is_free_form() {
        let collectors = sample::collectors();
        let (filters, state) = select::<Collector>("zone", "north district");
        assert_eq!(filter_records(&collectors, &filters, &state).len(), 1);
    }

    #[test]
    fn test_request_status_and_notes_pattern() {
        let requests = sample::requests();
        let (filters, state) = select::<CollectionRequest>("status", "pending");
        assert!(filter_records(&requests, &filters, &state)
            .iter()
            .all(|r| r.status == RequestStatus::Pending));

        let (filters, state) = select::<CollectionRequest>("notes", "(?i)heavy");
        let ids: Vec<u32> = filter_records(&requests, &filters, &state)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_cells_match_columns() {
        for zone in sample::zones() {
            assert_eq!(zone.cells().len(), Zone::columns().len());
            assert_eq!(zone.export_row().len(), Zone::export_header().len());
        }
        for collector in sample::collectors() {
            assert_eq!(collector.cells().len(), Collector::columns().len());
            assert_eq!(collector.export_row().len(), Collector::export_header().len());
        }
        for request in sample::requests() {
            assert_eq!(request.cells().len(), CollectionRequest::columns().len());
            assert_eq!(
                request.export_row().len(),
                CollectionRequest::export_header().len()
            );
        }
    }

    #[test]
    fn test_zone_validation() {
        let mut zone = Zone::new("1", "North");
        assert!(zone.validate().is_ok());
        zone.utilization = 101;
        assert_eq!(
            zone.validate(),
            Err(RecordIssue::UtilizationTooHigh { value: 101, max: 100 })
        );
        zone.utilization = 50;
        zone.name = "  ".to_string();
        assert_eq!(
            zone.validate(),
            Err(RecordIssue::EmptyField { field: "zone name" })
        );
    }

    #[test]
    fn test_request_validation_covers_collected_items() {
        let mut request = sample::requests().remove(0);
        assert!(request.validate().is_ok());
        request.collected.push(CollectedItem {
            kind: WasteType::Paper,
            weight_kg: -1.0,
        });
        assert_eq!(
            request.validate(),
            Err(RecordIssue::NegativeWeight { value: -1.0 })
        );
    }
}
