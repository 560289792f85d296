//! Core types and analytics for dated lake observations.
//!
//! A lake's history is a date-descending series of observations: a scalar
//! surface measurement plus, for some dates, a ground-footprint polygon
//! and a captured image. This crate holds the pieces with algorithmic
//! content and the collaborator contracts around them:
//!
//! - [`date_window`]: inclusive date-range filtering with boundary
//!   validation.
//! - [`image`]: fallback image resolution, walking outward from a boundary
//!   record of the filtered series until a stored capture turns up.
//! - [`density`]: polygon-to-density aggregation, counting exact
//!   coordinate recurrences across dated footprints into a weighted,
//!   y-flipped point cloud with the latest outline for overlay.
//! - [`partition`]: past/future split around a reference date for trend
//!   plotting.
//! - [`store`] and [`image::AssetStore`]: the injected persistence
//!   collaborators (the SQL store and image directory live in sibling
//!   crates).
//! - [`report`]: the facade composing the above per request.
//!
//! Everything here is pure and synchronous over immutable input; the only
//! I/O happens behind the collaborator traits.

pub mod coord;
pub mod date_window;
pub mod density;
pub mod error;
pub mod image;
pub mod observation;
pub mod partition;
pub mod report;
pub mod store;
