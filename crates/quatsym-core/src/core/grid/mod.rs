//! # Spatial Grid Module
//!
//! A uniform bucket index over 3D points for fast proximity queries.
//!
//! Points are binned into axis-aligned cubic cells of a fixed width; a query
//! returns everything stored in the 3x3x3 block of cells around the queried
//! point. Results are coarse: an element may be up to roughly `sqrt(3)` bin
//! widths beyond the nearest face of the query cell, so callers performing exact
//! distance tests should treat grid results as a pre-filter.
//!
//! The grid is generic over an opaque payload `T` and has no dependency on the
//! clustering pipeline.
//!
//! ## Concurrency
//!
//! [`SpatialGrid::insert`] and [`SpatialGrid::neighbors_of_cached`] take
//! `&mut self`, so a grid cannot be mutated or have its cache populated from
//! several threads at once. Read-only queries ([`SpatialGrid::neighbors_of`],
//! [`SpatialGrid::intersection`], [`SpatialGrid::neighbors_of_all`]) take
//! `&self` and may run concurrently once insertion is finished.

mod cache;
mod cell;
mod neighbors;
mod spatial_grid;

pub use cell::CellKey;
pub use neighbors::Neighbors;
pub use spatial_grid::{GridError, SpatialGrid};
