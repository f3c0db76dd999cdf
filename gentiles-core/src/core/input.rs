//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Validation of user supplied extents and zoom ranges

use gentiles_grid::Extent;
use std::fmt;
use std::str::FromStr;

/// Lowest zoom level accepted from user input
pub const MIN_USER_ZOOM: u8 = 1;
/// Highest zoom level accepted from user input
pub const MAX_USER_ZOOM: u8 = 17;

/// Parse `minlon,minlat,maxlon,maxlat`
pub fn parse_extent(numlist: &str) -> Result<Extent, String> {
    let values = numlist
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| format!("Boundingbox invalid: '{}' is not a number", v.trim()))
        })
        .collect::<Result<Vec<f64>, String>>()?;
    if values.len() != 4 {
        return Err(format!(
            "Boundingbox invalid: expected 4 values, got {}",
            values.len()
        ));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err("Boundingbox invalid: values must be finite".to_string());
    }
    let extent = Extent {
        minx: values[0],
        miny: values[1],
        maxx: values[2],
        maxy: values[3],
    };
    validate_extent(&extent)?;
    Ok(extent)
}

/// Check ordering and WGS84 bounds
pub fn validate_extent(extent: &Extent) -> Result<(), String> {
    if extent.minx > extent.maxx || extent.miny > extent.maxy {
        return Err(format!("Boundingbox invalid: min > max in {:?}", extent));
    }
    if extent.minx < -180.0 || extent.maxx > 180.0 || extent.miny < -90.0 || extent.maxy > 90.0 {
        return Err(format!("Boundingbox invalid: {:?} exceeds WGS84 bounds", extent));
    }
    Ok(())
}

/// Parse a single zoom level `Z` or a range `ZMIN-ZMAX`
pub fn parse_zoom_range(scale: &str) -> Result<(u8, u8), String> {
    let zooms = scale
        .split('-')
        .map(|z| {
            z.trim()
                .parse::<u8>()
                .map_err(|_| format!("Invalid scale '{}'", scale))
        })
        .collect::<Result<Vec<u8>, String>>()?;
    let (minzoom, maxzoom) = match zooms.as_slice() {
        [zoom] => (*zoom, *zoom),
        [minzoom, maxzoom] => (*minzoom, *maxzoom),
        _ => return Err(format!("Invalid scale '{}'", scale)),
    };
    validate_zoom_range(minzoom, maxzoom)?;
    Ok((minzoom, maxzoom))
}

pub fn validate_zoom_range(minzoom: u8, maxzoom: u8) -> Result<(), String> {
    if minzoom < MIN_USER_ZOOM || maxzoom > MAX_USER_ZOOM || minzoom > maxzoom {
        return Err(format!(
            "Invalid scale {}-{} (expected {} <= min <= max <= {})",
            minzoom, maxzoom, MIN_USER_ZOOM, MAX_USER_ZOOM
        ));
    }
    Ok(())
}

/// Image format of stored tiles
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum TileFormat {
    Png,
    Jpeg,
}

impl TileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TileFormat::Png => "png",
            TileFormat::Jpeg => "jpg",
        }
    }
}

impl Default for TileFormat {
    fn default() -> Self {
        TileFormat::Png
    }
}

impl FromStr for TileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase() as &str {
            "png" => Ok(TileFormat::Png),
            "jpeg" | "jpg" => Ok(TileFormat::Jpeg),
            _ => Err(format!("Unexpected image format '{}'", s)),
        }
    }
}

impl fmt::Display for TileFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}
