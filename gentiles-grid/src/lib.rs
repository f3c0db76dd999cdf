//! A library for projecting and partitioning 1280x1024 raster map tiles
//!
//! ## Projection
//!
//! ```rust
//! use gentiles_grid::{PixelPoint, ProjectionTable};
//!
//! let table = ProjectionTable::new(18);
//! assert_eq!(
//!     table.from_ll_to_pixel(0.0, 0.0, 0),
//!     PixelPoint { x: 128.0, y: 128.0 }
//! );
//! let ll = table.from_pixel_to_ll(128.0, 128.0, 0);
//! assert_eq!(ll.lon, 0.0);
//! assert!(ll.lat.abs() < 1e-12);
//! ```
//!
//! ## Tile planning
//!
//! ```rust
//! use gentiles_grid::{Extent, ProjectionTable, TilePlanner};
//!
//! let table = ProjectionTable::new(18);
//! let planner = TilePlanner::new(&table);
//! let munich = Extent {
//!     minx: 11.4,
//!     miny: 48.07,
//!     maxx: 11.7,
//!     maxy: 48.2,
//! };
//! for tile in planner.plan_tiles(&munich, 10, 12).unwrap() {
//!     println!("Tile {}/{}/{} 1:{:.1}", tile.zoom, tile.x, tile.y, tile.scale);
//! }
//! ```

mod extent;
mod planner;
#[cfg(test)]
mod planner_test;
mod projection;

pub use extent::{extent_wgs84_to_merc, lonlat_to_merc, Extent, LonLat};
pub use planner::{
    calc_scale, distortion, Distortion, TileDescriptor, TileIterator, TileLimits, TilePlanner,
    RENDER_HEIGHT, RENDER_WIDTH, TILE_STEP_X, TILE_STEP_Y,
};
pub use projection::{PixelPoint, ProjectionTable};
