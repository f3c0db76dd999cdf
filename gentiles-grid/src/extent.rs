//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Geographic extents

use std::f64::consts;

/// WGS84 major axis, also used as sphere radius by spherical Mercator
pub(crate) const EARTH_MAJOR_AXIS: f64 = 6378137.0;

/// Geographic extent
///
/// In degrees (minlon, minlat, maxlon, maxlat) unless projected with
/// [`extent_wgs84_to_merc`]. Callers guarantee `minx <= maxx` and `miny <= maxy`.
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

/// Geographic position in degrees
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }
    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
    pub fn center(&self) -> (f64, f64) {
        (
            self.minx + self.width() / 2.0,
            self.miny + self.height() / 2.0,
        )
    }
    /// Extent grown by `factor` in both axes, keeping its center
    pub fn scaled(&self, factor: f64) -> Extent {
        let (cx, cy) = self.center();
        let half_w = self.width() * factor / 2.0;
        let half_h = self.height() * factor / 2.0;
        Extent {
            minx: cx - half_w,
            miny: cy - half_h,
            maxx: cx + half_w,
            maxy: cy + half_h,
        }
    }
    /// Whether `other` lies completely inside this extent
    pub fn contains(&self, other: &Extent) -> bool {
        self.minx <= other.minx
            && self.miny <= other.miny
            && self.maxx >= other.maxx
            && self.maxy >= other.maxy
    }
}

/// Returns the Spherical Mercator (x, y) in meters
pub fn lonlat_to_merc(lon: f64, lat: f64) -> (f64, f64) {
    let x = EARTH_MAJOR_AXIS * lon.to_radians();
    let y = EARTH_MAJOR_AXIS * ((consts::PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
    (x, y)
}

/// Projected extent
pub fn extent_wgs84_to_merc(extent: &Extent) -> Extent {
    let (minx, miny) = lonlat_to_merc(extent.minx, extent.miny);
    let (maxx, maxy) = lonlat_to_merc(extent.maxx, extent.maxy);
    Extent {
        minx,
        miny,
        maxx,
        maxy,
    }
}

#[test]
fn test_scaled() {
    let ext = Extent {
        minx: 10.0,
        miny: 40.0,
        maxx: 12.0,
        maxy: 41.0,
    };
    assert_eq!(
        ext.scaled(2.0),
        Extent {
            minx: 9.0,
            miny: 39.5,
            maxx: 13.0,
            maxy: 41.5,
        }
    );
    assert!(ext.scaled(2.0).contains(&ext));
    assert!(!ext.contains(&ext.scaled(2.0)));
}

#[test]
fn test_merc() {
    let (x, y) = lonlat_to_merc(0.0, 0.0);
    assert_eq!(x, 0.0);
    assert!(y.abs() < 1e-9);

    let (x, _) = lonlat_to_merc(180.0, 0.0);
    assert!((x - 20037508.342789244).abs() < 1e-6);

    let merc = extent_wgs84_to_merc(&Extent {
        minx: -10.0,
        miny: -20.0,
        maxx: 10.0,
        maxy: 20.0,
    });
    assert!((merc.minx + merc.maxx).abs() < 1e-6);
    assert!((merc.miny + merc.maxy).abs() < 1e-6);
    assert!(merc.maxy > merc.maxx);
}
