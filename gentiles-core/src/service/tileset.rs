//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{Config, TilesetCfg};
use crate::core::input::validate_extent;
use gentiles_grid::Extent;

pub const DEFAULT_MINZOOM: u8 = 10;
pub const DEFAULT_MAXZOOM: u8 = 16;

/// Area and zoom levels to generate
#[derive(Clone, Debug)]
pub struct Tileset {
    pub name: String,
    pub extent: Option<Extent>,
    pub minzoom: Option<u8>,
    pub maxzoom: Option<u8>,
}

impl Tileset {
    pub fn minzoom(&self) -> u8 {
        self.minzoom.unwrap_or(DEFAULT_MINZOOM)
    }
    pub fn maxzoom(&self) -> u8 {
        self.maxzoom.unwrap_or(DEFAULT_MAXZOOM)
    }
}

impl<'a> Config<'a, TilesetCfg> for Tileset {
    fn from_config(cfg: &TilesetCfg) -> Result<Self, String> {
        let extent = cfg.extent.as_ref().map(Extent::from);
        if let Some(ref extent) = extent {
            validate_extent(extent)?;
        }
        Ok(Tileset {
            name: cfg.name.clone(),
            extent,
            minzoom: cfg.minzoom,
            maxzoom: cfg.maxzoom,
        })
    }
    fn gen_config() -> String {
        let toml = r#"
[tileset]
name = "Generate:"
# Bounding box in degrees
extent = { minx = 11.4, miny = 48.07, maxx = 11.7, maxy = 48.2 }
# Below zoom level 9 Mercator becomes distorted
minzoom = 10
maxzoom = 16
"#;
        toml.to_string()
    }
}
