//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! GpsDrive coordinate index (map_koord.txt)

use gentiles_grid::TileDescriptor;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Append-only index with one line per rendered tile:
/// `path center_lat center_lon scale lat0 lon0 lat1 lon1`
pub struct KoordIndex<W: Write> {
    out: W,
}

impl KoordIndex<File> {
    /// Open index file for appending, creating it if missing
    pub fn open(path: &str) -> Result<KoordIndex<File>, io::Error> {
        if let Some(dir) = Path::new(path).parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(KoordIndex::new(file))
    }
}

impl<W: Write> KoordIndex<W> {
    pub fn new(out: W) -> KoordIndex<W> {
        KoordIndex { out }
    }
    pub fn append(&mut self, tile_path: &str, tile: &TileDescriptor) -> Result<(), io::Error> {
        let center = tile.center();
        self.append_record(
            tile_path,
            center.lat,
            center.lon,
            tile.scale,
            tile.p0.lat,
            tile.p0.lon,
            tile.p1.lat,
            tile.p1.lon,
        )
    }
    pub fn append_record(
        &mut self,
        tile_path: &str,
        center_lat: f64,
        center_lon: f64,
        scale: f64,
        lat0: f64,
        lon0: f64,
        lat1: f64,
        lon1: f64,
    ) -> Result<(), io::Error> {
        let line = format!(
            "{} {} {} {} {} {} {} {}\n",
            tile_path, center_lat, center_lon, scale, lat0, lon0, lat1, lon1
        );
        self.out.write_all(line.as_bytes())?;
        self.out.flush()
    }
    pub fn into_inner(self) -> W {
        self.out
    }
}
