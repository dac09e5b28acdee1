//! # Selection, Ranges and Focus
//!
//! The platform services the caret logic consumes, modelled as values:
//!
//! - **`range`**: [`BoundaryPoint`] and [`Range`] with DOM boundary semantics
//!   and range-to-text materialization
//! - **`service`**: the [`SelectionService`] capability plus the in-memory
//!   [`DocumentSelection`]
//! - **`focus`**: the [`FocusService`] capability plus [`FocusTracker`]

pub mod focus;
pub mod range;
pub mod service;

pub use focus::{FocusService, FocusTracker};
pub use range::{BoundaryPoint, Range, compare_points};
pub use service::{DocumentSelection, SelectionService};
