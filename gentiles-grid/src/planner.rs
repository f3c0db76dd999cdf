//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile planning

use crate::extent::{extent_wgs84_to_merc, Extent, LonLat, EARTH_MAJOR_AXIS};
use crate::projection::ProjectionTable;
use std::f64::consts;

/// Horizontal grid step in pixels (half of the rendered width)
pub const TILE_STEP_X: u32 = 640;
/// Vertical grid step in pixels (half of the rendered height)
pub const TILE_STEP_Y: u32 = 512;
/// Width of a rendered tile
pub const RENDER_WIDTH: u32 = 1280;
/// Height of a rendered tile
pub const RENDER_HEIGHT: u32 = 1024;

/// GpsDrive's hardcoded pixels per meter ratio
const PIXELS_PER_METER: f64 = 2817.947378;

/// Lowest zoom level without noticeable Mercator distortion
const UNDISTORTED_MINZOOM: u8 = 10;

/// Map scale denominator at latitude `lat` (degrees)
pub fn calc_scale(lat: f64, zoom: u8) -> f64 {
    (EARTH_MAJOR_AXIS * 2.0 * consts::PI * lat.to_radians().cos() * PIXELS_PER_METER)
        / (256.0 * (zoom as f64).exp2())
}

/// Visual distortion of the Mercator projection at a zoom level
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Distortion {
    None,
    Noticeable,
    Severe,
}

pub fn distortion(zoom: u8) -> Distortion {
    if zoom >= UNDISTORTED_MINZOOM {
        Distortion::None
    } else if zoom == UNDISTORTED_MINZOOM - 1 {
        Distortion::Noticeable
    } else {
        Distortion::Severe
    }
}

/// Inclusive tile index ranges of one zoom level
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct TileLimits {
    pub minx: i64,
    pub miny: i64,
    pub maxx: i64,
    pub maxy: i64,
}

impl TileLimits {
    pub fn is_empty(&self) -> bool {
        self.minx > self.maxx || self.miny > self.maxy
    }
    /// Number of tiles within limits
    pub fn count(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.maxx - self.minx + 1) as u64 * (self.maxy - self.miny + 1) as u64
        }
    }
}

/// Geometry of a single tile
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct TileDescriptor {
    pub zoom: u8,
    pub x: i64,
    pub y: i64,
    /// Bottom-left corner
    pub p0: LonLat,
    /// Top-right corner
    pub p1: LonLat,
    /// Scale denominator at the center latitude
    pub scale: f64,
}

impl TileDescriptor {
    pub fn center(&self) -> LonLat {
        LonLat {
            lon: (self.p0.lon + self.p1.lon) / 2.0,
            lat: (self.p0.lat + self.p1.lat) / 2.0,
        }
    }
    /// Geographic footprint of the grid cell
    pub fn extent(&self) -> Extent {
        Extent {
            minx: self.p0.lon,
            miny: self.p0.lat,
            maxx: self.p1.lon,
            maxy: self.p1.lat,
        }
    }
    /// Spherical Mercator box drawn on the 1280x1024 canvas.
    ///
    /// Twice the footprint in each axis, so neighbouring tiles overlap by half a tile.
    pub fn render_extent(&self) -> Extent {
        extent_wgs84_to_merc(&self.extent()).scaled(2.0)
    }
}

/// Partitions extents into a grid of 640x512 pixel cells
pub struct TilePlanner<'a> {
    table: &'a ProjectionTable,
}

impl<'a> TilePlanner<'a> {
    pub fn new(table: &'a ProjectionTable) -> TilePlanner<'a> {
        TilePlanner { table }
    }
    pub fn table(&self) -> &ProjectionTable {
        self.table
    }
    /// Tile index ranges covering `extent` (degrees) at `zoom`
    pub fn tile_limits(&self, extent: &Extent, zoom: u8) -> TileLimits {
        // pixel y grows downwards
        let px0 = self.table.from_ll_to_pixel(extent.minx, extent.maxy, zoom);
        let px1 = self.table.from_ll_to_pixel(extent.maxx, extent.miny, zoom);
        let step_x = TILE_STEP_X as f64;
        let step_y = TILE_STEP_Y as f64;
        TileLimits {
            minx: (px0.x / step_x).floor() as i64,
            miny: (px0.y / step_y).floor() as i64,
            maxx: (px1.x / step_x).floor() as i64,
            maxy: (px1.y / step_y).floor() as i64,
        }
    }
    /// Footprint and scale of tile `x`, `y` at `zoom`
    pub fn tile_descriptor(&self, x: i64, y: i64, zoom: u8) -> TileDescriptor {
        let step_x = TILE_STEP_X as f64;
        let step_y = TILE_STEP_Y as f64;
        let p0 = self
            .table
            .from_pixel_to_ll(x as f64 * step_x, (y + 1) as f64 * step_y, zoom);
        let p1 = self
            .table
            .from_pixel_to_ll((x + 1) as f64 * step_x, y as f64 * step_y, zoom);
        let scale = calc_scale((p0.lat + p1.lat) / 2.0, zoom);
        TileDescriptor {
            zoom,
            x,
            y,
            p0,
            p1,
            scale,
        }
    }
    /// Number of tiles covering `extent` from `minzoom` to `maxzoom`
    pub fn count_tiles(&self, extent: &Extent, minzoom: u8, maxzoom: u8) -> u64 {
        (minzoom..=maxzoom)
            .map(|zoom| self.tile_limits(extent, zoom).count())
            .sum()
    }
    /// All tiles covering `extent` for zoom levels `minzoom..=maxzoom`.
    ///
    /// Fails if the zoom range is empty or exceeds the projection table.
    pub fn plan_tiles(
        &self,
        extent: &Extent,
        minzoom: u8,
        maxzoom: u8,
    ) -> Result<TileIterator<'a>, String> {
        if minzoom > maxzoom {
            return Err(format!(
                "Invalid zoom range {}-{}: minzoom > maxzoom",
                minzoom, maxzoom
            ));
        }
        if maxzoom >= self.table.levels() {
            return Err(format!(
                "Zoom level {} out of range (projection has {} levels)",
                maxzoom,
                self.table.levels()
            ));
        }
        Ok(TileIterator::new(
            TilePlanner { table: self.table },
            extent.clone(),
            minzoom,
            maxzoom,
        ))
    }
}

/// Level-by-level tile iterator, rows top to bottom
pub struct TileIterator<'a> {
    planner: TilePlanner<'a>,
    extent: Extent,
    z: u8,
    x: i64,
    y: i64,
    maxz: u8,
    limits: TileLimits,
    finished: bool,
}

impl<'a> TileIterator<'a> {
    fn new(planner: TilePlanner<'a>, extent: Extent, minz: u8, maxz: u8) -> TileIterator<'a> {
        let limits = planner.tile_limits(&extent, minz);
        TileIterator {
            planner,
            extent,
            z: minz,
            x: limits.minx,
            y: limits.miny,
            maxz,
            limits,
            finished: false,
        }
    }
    fn next_level(&mut self) {
        if self.z < self.maxz {
            self.z += 1;
            self.limits = self.planner.tile_limits(&self.extent, self.z);
            self.x = self.limits.minx;
            self.y = self.limits.miny;
        } else {
            self.finished = true;
        }
    }
}

impl<'a> Iterator for TileIterator<'a> {
    type Item = TileDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            if self.limits.is_empty() {
                self.next_level();
                continue;
            }
            let tile = self.planner.tile_descriptor(self.x, self.y, self.z);
            if self.x < self.limits.maxx {
                self.x += 1;
            } else if self.y < self.limits.maxy {
                self.y += 1;
                self.x = self.limits.minx;
            } else {
                self.next_level();
            }
            return Some(tile);
        }
        None
    }
}
