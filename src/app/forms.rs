// WasteDesk - app/forms.rs
//
// Input forms that create or change records: the two-step collection
// request wizard, collector field edits, and collected-item entries.
// Validation lives here; `DashboardState` applies the accepted input.

use crate::core::model::{Address, CollectedItem, Collector, CollectorStatus, WasteType};
use crate::util::constants;
use crate::util::error::{ActionError, RecordIssue};
use chrono::NaiveDate;

// =============================================================================
// Request wizard
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStep {
    Address,
    Event,
}

impl FormStep {
    pub fn label(&self) -> &'static str {
        match self {
            FormStep::Address => "address",
            FormStep::Event => "event",
        }
    }
}

/// Pickup details entered on the event step.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    /// Approximate garbage weight in kilograms.
    pub garbage_weight: f64,
    pub date: NaiveDate,
    pub notes: String,
}

/// A collection request being entered: address first, then pickup details.
///
/// Going back keeps the saved address so it can be corrected and
/// resubmitted.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestForm {
    step: FormStep,
    address: Option<Address>,
}

impl Default for RequestForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestForm {
    pub fn new() -> Self {
        Self {
            step: FormStep::Address,
            address: None,
        }
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    /// The address saved by the first step, if any.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn submit_address(&mut self, address: Address) -> Result<(), ActionError> {
        self.expect_step(FormStep::Address)?;
        validate_address(&address)?;
        self.address = Some(address);
        self.step = FormStep::Event;
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), ActionError> {
        self.expect_step(FormStep::Event)?;
        self.step = FormStep::Address;
        Ok(())
    }

    /// Validate the event step and hand back the address to file it under.
    pub fn submit_event(&self, details: &EventDetails) -> Result<Address, ActionError> {
        self.expect_step(FormStep::Event)?;
        positive_weight("garbage weight", details.garbage_weight)?;
        self.address.clone().ok_or(ActionError::WrongFormStep {
            expected: FormStep::Event.label(),
            actual: FormStep::Address.label(),
        })
    }

    fn expect_step(&self, expected: FormStep) -> Result<(), ActionError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(ActionError::WrongFormStep {
                expected: expected.label(),
                actual: self.step.label(),
            })
        }
    }
}

fn validate_address(address: &Address) -> Result<(), RecordIssue> {
    required("house number", &address.house_number)?;
    min_length("street", &address.street, constants::MIN_STREET_LENGTH)?;
    min_length("city", &address.city, constants::MIN_CITY_LENGTH)?;
    required("district", &address.district)?;
    required("state", &address.state)?;
    required("pincode", &address.pincode)
}

// =============================================================================
// Collector edits
// =============================================================================

/// One field change from the collector edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorField {
    Name(String),
    Email(String),
    Phone(String),
    Zone(String),
    Status(CollectorStatus),
}

impl CollectorField {
    pub const NAMES: &'static [&'static str] = &["name", "email", "phone", "zone", "status"];

    /// Parse and validate `field value` as typed into the edit command.
    pub fn parse(field: &str, value: &str) -> Result<Self, RecordIssue> {
        let value = value.trim();
        match field.trim().to_lowercase().as_str() {
            "name" => {
                min_length("name", value, constants::MIN_COLLECTOR_NAME_LENGTH)?;
                Ok(CollectorField::Name(value.to_string()))
            }
            "email" => {
                if !looks_like_email(value) {
                    return Err(RecordIssue::InvalidEmail {
                        value: value.to_string(),
                    });
                }
                Ok(CollectorField::Email(value.to_string()))
            }
            "phone" => {
                min_length("phone", value, constants::MIN_PHONE_LENGTH)?;
                Ok(CollectorField::Phone(value.to_string()))
            }
            "zone" => {
                required("zone", value)?;
                Ok(CollectorField::Zone(value.to_string()))
            }
            "status" => CollectorStatus::from_token(value)
                .map(CollectorField::Status)
                .ok_or_else(|| RecordIssue::UnknownValue {
                    field: "status",
                    value: value.to_string(),
                    expected: CollectorStatus::TOKENS,
                }),
            other => Err(RecordIssue::UnknownValue {
                field: "collector field",
                value: other.to_string(),
                expected: Self::NAMES,
            }),
        }
    }

    pub fn apply(self, collector: &mut Collector) {
        match self {
            CollectorField::Name(name) => collector.name = name,
            CollectorField::Email(email) => collector.email = email,
            CollectorField::Phone(phone) => collector.phone = phone,
            CollectorField::Zone(zone) => collector.zone = zone,
            CollectorField::Status(status) => collector.status = status,
        }
    }
}

/// `local@domain.tld` with no whitespace.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

// =============================================================================
// Collected items
// =============================================================================

/// Build a collected item from a waste type token and a weight.
pub fn collected_item(kind: &str, weight_kg: f64) -> Result<CollectedItem, RecordIssue> {
    let kind = WasteType::from_token(kind).ok_or_else(|| RecordIssue::UnknownValue {
        field: "waste type",
        value: kind.trim().to_string(),
        expected: WasteType::TOKENS,
    })?;
    positive_weight("weight", weight_kg)?;
    Ok(CollectedItem { kind, weight_kg })
}

// =============================================================================
// Field checks
// =============================================================================

fn required(field: &'static str, value: &str) -> Result<(), RecordIssue> {
    if value.trim().is_empty() {
        Err(RecordIssue::EmptyField { field })
    } else {
        Ok(())
    }
}

fn min_length(field: &'static str, value: &str, min: usize) -> Result<(), RecordIssue> {
    required(field, value)?;
    if value.trim().chars().count() < min {
        return Err(RecordIssue::TooShort { field, min });
    }
    Ok(())
}

fn positive_weight(field: &'static str, value: f64) -> Result<(), RecordIssue> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RecordIssue::NotPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address {
            house_number: "12".to_string(),
            street: "Canal Road".to_string(),
            city: "Ludhiana".to_string(),
            district: "Ludhiana".to_string(),
            state: "Punjab".to_string(),
            pincode: "141001".to_string(),
        }
    }

    fn details(weight: f64) -> EventDetails {
        EventDetails {
            garbage_weight: weight,
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_wizard_steps_in_order() {
        let mut form = RequestForm::new();
        assert_eq!(form.step(), FormStep::Address);
        assert!(matches!(
            form.submit_event(&details(5.0)),
            Err(ActionError::WrongFormStep { expected: "event", actual: "address" })
        ));
        assert!(form.back().is_err());

        form.submit_address(address()).unwrap();
        assert_eq!(form.step(), FormStep::Event);
        assert_eq!(form.submit_event(&details(5.0)).unwrap().city, "Ludhiana");
    }

    #[test]
    fn test_back_keeps_saved_address() {
        let mut form = RequestForm::new();
        form.submit_address(address()).unwrap();
        form.back().unwrap();
        assert_eq!(form.step(), FormStep::Address);
        assert_eq!(form.address().map(|a| a.street.as_str()), Some("Canal Road"));

        let mut corrected = address();
        corrected.street = "Mall Road".to_string();
        form.submit_address(corrected).unwrap();
        assert_eq!(form.address().map(|a| a.street.as_str()), Some("Mall Road"));
    }

    #[test]
    fn test_address_field_rules() {
        let mut form = RequestForm::new();
        let mut short = address();
        short.street = "Rd".to_string();
        assert!(matches!(
            form.submit_address(short),
            Err(ActionError::InvalidInput(RecordIssue::TooShort { field: "street", min: 3 }))
        ));
        let mut blank = address();
        blank.pincode = "  ".to_string();
        assert!(matches!(
            form.submit_address(blank),
            Err(ActionError::InvalidInput(RecordIssue::EmptyField { field: "pincode" }))
        ));
        assert_eq!(form.step(), FormStep::Address);
    }

    #[test]
    fn test_event_weight_must_be_positive() {
        let mut form = RequestForm::new();
        form.submit_address(address()).unwrap();
        for weight in [0.0, -3.0, f64::NAN] {
            assert!(matches!(
                form.submit_event(&details(weight)),
                Err(ActionError::InvalidInput(RecordIssue::NotPositive { .. }))
            ));
        }
    }

    #[test]
    fn test_collector_field_parse() {
        assert_eq!(
            CollectorField::parse("Status", "on-leave"),
            Ok(CollectorField::Status(CollectorStatus::OnLeave))
        );
        assert_eq!(
            CollectorField::parse("name", " Al "),
            Ok(CollectorField::Name("Al".to_string()))
        );
        assert_eq!(
            CollectorField::parse("name", "A"),
            Err(RecordIssue::TooShort { field: "name", min: 2 })
        );
        assert!(matches!(
            CollectorField::parse("phone", "12345"),
            Err(RecordIssue::TooShort { field: "phone", .. })
        ));
        assert!(matches!(
            CollectorField::parse("salary", "10"),
            Err(RecordIssue::UnknownValue { field: "collector field", .. })
        ));
        assert!(matches!(
            CollectorField::parse("status", "retired"),
            Err(RecordIssue::UnknownValue { field: "status", .. })
        ));
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("asha.verma@example.com"));
        assert!(!looks_like_email("asha.verma"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("asha@example"));
        assert!(!looks_like_email("asha @example.com"));
        assert!(!looks_like_email("a@b@c.com"));
    }

    #[test]
    fn test_collected_item_rules() {
        let item = collected_item("PET-bottles", 4.5).unwrap();
        assert_eq!(item.kind, WasteType::PetBottles);
        assert_eq!(item.weight_kg, 4.5);
        assert!(matches!(
            collected_item("glass", 1.0),
            Err(RecordIssue::UnknownValue { field: "waste type", .. })
        ));
        assert_eq!(
            collected_item("paper", 0.0),
            Err(RecordIssue::NotPositive {
                field: "weight",
                value: 0.0
            })
        );
    }
}
