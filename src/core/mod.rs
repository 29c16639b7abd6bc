// WasteDesk - core/mod.rs
//
// Core business logic layer: records, filters, pagination, list views.
// Dependencies: standard library, serde, regex, csv.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod filter;
pub mod list_view;
pub mod model;
pub mod paginate;
pub mod record;
pub mod sample;
