//! modfix: repair NULL module assignments in a Frappe app
//!
//! Frappe apps export customizations and fixtures as JSON files inside the
//! app package. Records exported before a module was assigned carry
//! `"module": null`; this crate fills those in from the app's `modules.txt`
//! (plus optional overrides) and writes the files back.

pub mod cli;
pub mod core;
pub mod json;
