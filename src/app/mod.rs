// WasteDesk - app/mod.rs
//
// Application layer: dashboard state, actions, input forms, dataset loading,
// command parsing.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod command;
pub mod control;
pub mod dataset;
pub mod forms;
pub mod state;
