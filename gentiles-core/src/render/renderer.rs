//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use gentiles_grid::TileDescriptor;

/// Raster tile renderer
pub trait Renderer {
    fn info(&self) -> String;
    /// Render the tile on a `width` x `height` canvas.
    ///
    /// The drawn area is [`TileDescriptor::render_extent`], twice the tile footprint.
    fn render(&self, tile: &TileDescriptor, width: u32, height: u32) -> Result<Vec<u8>, String>;
}

#[derive(Clone)]
pub struct Norenderer;

impl Renderer for Norenderer {
    fn info(&self) -> String {
        "No renderer".to_string()
    }
    fn render(&self, tile: &TileDescriptor, _width: u32, _height: u32) -> Result<Vec<u8>, String> {
        Err(format!(
            "No renderer configured for tile {}/{}/{}",
            tile.zoom, tile.x, tile.y
        ))
    }
}
