// WasteDesk - core/sample.rs
//
// Built-in demonstration dataset, used when no dataset file is given
// (or when a dataset file omits one of the views).

use crate::core::model::{
    Address, CollectedItem, CollectionRequest, Collector, CollectorStatus, RequestStatus,
    WasteType, Zone,
};
use chrono::{NaiveDate, NaiveTime};

fn zone(id: &str, name: &str, collectors: u32, requests: u32, completed: u32, utilization: u8) -> Zone {
    Zone {
        id: id.to_string(),
        name: name.to_string(),
        collectors,
        requests,
        completed,
        utilization,
    }
}

/// Ten city districts.
pub fn zones() -> Vec<Zone> {
    vec![
        zone("1", "North District", 5, 12, 45, 75),
        zone("2", "South District", 4, 8, 32, 60),
        zone("3", "East District", 3, 15, 18, 90),
        zone("4", "West District", 6, 10, 27, 50),
        zone("5", "Central District", 2, 20, 15, 95),
        zone("6", "Northeast District", 4, 11, 38, 85),
        zone("7", "Southwest District", 3, 9, 24, 70),
        zone("8", "Harbor District", 5, 4, 51, 45),
        zone("9", "Industrial Zone", 2, 18, 12, 92),
        zone("10", "Riverside District", 4, 7, 29, 65),
    ]
}

// Dates below are fixed literals, so construction cannot fail.
fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn collector(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    zone: &str,
    status: CollectorStatus,
    collections_completed: u32,
    joined: NaiveDate,
) -> Collector {
    Collector {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        zone: zone.to_string(),
        status,
        collections_completed,
        joined_date: joined,
    }
}

/// Five collectors spread over the central districts.
pub fn collectors() -> Vec<Collector> {
    vec![
        collector(
            "1",
            "John Doe",
            "john.doe@example.com",
            "+1 555-123-4567",
            "North District",
            CollectorStatus::Active,
            45,
            date(2023, 1, 15),
        ),
        collector(
            "2",
            "Jane Smith",
            "jane.smith@example.com",
            "+1 555-987-6543",
            "South District",
            CollectorStatus::Active,
            32,
            date(2023, 2, 20),
        ),
        collector(
            "3",
            "Michael Johnson",
            "michael.j@example.com",
            "+1 555-456-7890",
            "East District",
            CollectorStatus::Inactive,
            18,
            date(2023, 3, 10),
        ),
        collector(
            "4",
            "Emily Davis",
            "emily.davis@example.com",
            "+1 555-789-0123",
            "West District",
            CollectorStatus::Active,
            27,
            date(2023, 4, 5),
        ),
        collector(
            "5",
            "Robert Wilson",
            "robert.w@example.com",
            "+1 555-234-5678",
            "Central District",
            CollectorStatus::OnLeave,
            15,
            date(2023, 5, 12),
        ),
    ]
}

fn address(house: &str, street: &str, city: &str, district: &str, state: &str, pincode: &str) -> Address {
    Address {
        house_number: house.to_string(),
        street: street.to_string(),
        city: city.to_string(),
        district: district.to_string(),
        state: state.to_string(),
        pincode: pincode.to_string(),
    }
}

/// Five pickup requests in mixed states.
pub fn requests() -> Vec<CollectionRequest> {
    vec![
        CollectionRequest {
            id: 1,
            status: RequestStatus::Pending,
            garbage_weight: 100.0,
            date: date(2025, 3, 28),
            time: time(10, 0),
            address: address("34", "Main Street", "Mohali", "Mohali", "Punjab", "343434"),
            notes: String::new(),
            collected: Vec::new(),
        },
        CollectionRequest {
            id: 2,
            status: RequestStatus::Pending,
            garbage_weight: 50.0,
            date: date(2025, 3, 29),
            time: time(9, 30),
            address: address("42", "Park Avenue", "Chandigarh", "Chandigarh", "Punjab", "160022"),
            notes: "Please collect from the back entrance".to_string(),
            collected: Vec::new(),
        },
        CollectionRequest {
            id: 3,
            status: RequestStatus::Accepted,
            garbage_weight: 75.0,
            date: date(2025, 3, 30),
            time: time(14, 0),
            address: address("8", "Sector 17", "Chandigarh", "Chandigarh", "Punjab", "160017"),
            notes: "Heavy items included".to_string(),
            collected: Vec::new(),
        },
        CollectionRequest {
            id: 4,
            status: RequestStatus::Completed,
            garbage_weight: 30.0,
            date: date(2025, 3, 25),
            time: time(8, 15),
            address: address("17", "Mall Road", "Mohali", "Mohali", "Punjab", "160062"),
            notes: "Bottles and newspapers sorted".to_string(),
            collected: vec![
                CollectedItem {
                    kind: WasteType::PetBottles,
                    weight_kg: 8.0,
                },
                CollectedItem {
                    kind: WasteType::Paper,
                    weight_kg: 12.5,
                },
            ],
        },
        CollectionRequest {
            id: 5,
            status: RequestStatus::Rejected,
            garbage_weight: 20.0,
            date: date(2025, 3, 27),
            time: time(16, 45),
            address: address("5", "Lake View", "Panchkula", "Panchkula", "Haryana", "134109"),
            notes: String::new(),
            collected: Vec::new(),
        },
    ]
}
