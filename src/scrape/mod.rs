//! Parsers for the dashboard's rendered pages.
//!
//! Both parsers depend on exact upstream markup conventions (CSS classes,
//! an escaped-JSON app-state encoding). A change in the upstream contract
//! should only ever touch this module.

pub mod coords;
pub mod table;
