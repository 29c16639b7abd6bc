// WasteDesk - ui/mod.rs
//
// UI layer: terminal presentation only.
// Dependencies: app (state, table models), core (read-only models).
// Must NOT depend on: platform, file I/O.

pub mod render;
pub mod shell;
