//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Spherical Mercator pixel projection (Google/OSM tiling scheme)

use crate::extent::LonLat;
use std::f64::consts;

/// Bound for sin(lat), the Mercator log term diverges at the poles
const SIN_LAT_LIMIT: f64 = 0.9999;

/// Pixel width of zoom level 0
const LEVEL0_SIZE: f64 = 256.0;

/// Pixel coordinates at a given zoom level, y pointing down
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Scale constants of one zoom level
#[derive(Clone, Debug)]
struct LevelConstants {
    /// Pixels per degree longitude
    bc: f64,
    /// Pixels per radian (Mercator latitude)
    cc: f64,
    /// World pixel center
    zc: (f64, f64),
    /// World pixel extent
    ac: f64,
}

/// Precomputed projection constants for zoom levels `0..levels`
#[derive(Clone, Debug)]
pub struct ProjectionTable {
    levels: Vec<LevelConstants>,
}

impl ProjectionTable {
    pub fn new(levels: u8) -> ProjectionTable {
        let levels = (0..levels)
            .map(|zoom| {
                let c = LEVEL0_SIZE * (zoom as f64).exp2();
                let e = c / 2.0;
                LevelConstants {
                    bc: c / 360.0,
                    cc: c / (2.0 * consts::PI),
                    zc: (e, e),
                    ac: c,
                }
            })
            .collect();
        ProjectionTable { levels }
    }
    /// Number of zoom levels
    pub fn levels(&self) -> u8 {
        self.levels.len() as u8
    }
    pub fn maxzoom(&self) -> Option<u8> {
        self.levels().checked_sub(1)
    }
    /// World width and height in pixels
    pub fn world_size(&self, zoom: u8) -> f64 {
        self.levels[zoom as usize].ac
    }
    /// Pixels per degree of longitude
    pub fn pixels_per_degree(&self, zoom: u8) -> f64 {
        self.levels[zoom as usize].bc
    }
    /// Project to integral pixel coordinates.
    ///
    /// Panics if `zoom` is not below [`levels`](Self::levels).
    pub fn from_ll_to_pixel(&self, lon: f64, lat: f64, zoom: u8) -> PixelPoint {
        let level = &self.levels[zoom as usize];
        let x = (level.zc.0 + lon * level.bc).round();
        let f = lat
            .to_radians()
            .sin()
            .max(-SIN_LAT_LIMIT)
            .min(SIN_LAT_LIMIT);
        let y = (level.zc.1 + 0.5 * ((1.0 + f) / (1.0 - f)).ln() * -level.cc).round();
        PixelPoint { x, y }
    }
    /// Inverse of [`from_ll_to_pixel`](Self::from_ll_to_pixel), without quantization.
    ///
    /// Panics if `zoom` is not below [`levels`](Self::levels).
    pub fn from_pixel_to_ll(&self, x: f64, y: f64, zoom: u8) -> LonLat {
        let level = &self.levels[zoom as usize];
        let lon = (x - level.zc.0) / level.bc;
        let g = (y - level.zc.1) / -level.cc;
        let lat = (2.0 * g.exp().atan() - 0.5 * consts::PI).to_degrees();
        LonLat { lon, lat }
    }
}
