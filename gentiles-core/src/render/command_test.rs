//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::render::command::CommandRenderer;
use crate::render::renderer::{Norenderer, Renderer};
use gentiles_grid::{ProjectionTable, TileDescriptor, TilePlanner};

fn munich_tile() -> TileDescriptor {
    let table = ProjectionTable::new(18);
    TilePlanner::new(&table).tile_descriptor(217, 177, 10)
}

#[test]
fn test_expand_args() {
    let tile = munich_tile();
    let renderer = CommandRenderer::new(
        "render-tile",
        vec![
            "{zoom}/{x}/{y}".to_string(),
            "--size={width}x{height}".to_string(),
            "{unknown}".to_string(),
            "--bbox".to_string(),
            "{minx},{miny},{maxx},{maxy}".to_string(),
        ],
    );
    let args = renderer.expand_args(&tile, 1280, 1024).unwrap();
    assert_eq!(args[0], "10/217/177");
    assert_eq!(args[1], "--size=1280x1024");
    assert_eq!(args[2], "{unknown}");
    let ext = tile.render_extent();
    assert_eq!(
        args[4],
        format!("{},{},{},{}", ext.minx, ext.miny, ext.maxx, ext.maxy)
    );
}

#[test]
#[cfg(unix)]
fn test_render_command() {
    let tile = munich_tile();
    let renderer = CommandRenderer::new("echo", vec!["{zoom}/{x}/{y}".to_string()]);
    assert_eq!(renderer.info(), "Renderer command: echo");
    let image = renderer.render(&tile, 1280, 1024).unwrap();
    assert_eq!(image, b"10/217/177\n".to_vec());
}

#[test]
#[cfg(unix)]
fn test_render_failure() {
    let tile = munich_tile();
    let renderer = CommandRenderer::new("false", Vec::new());
    assert!(renderer.render(&tile, 1280, 1024).unwrap_err().contains("failed"));

    let renderer = CommandRenderer::new("true", Vec::new());
    assert_eq!(
        renderer.render(&tile, 1280, 1024),
        Err("`true` returned no image data".to_string())
    );

    let renderer = CommandRenderer::new("gentiles-no-such-renderer", Vec::new());
    assert!(renderer
        .render(&tile, 1280, 1024)
        .unwrap_err()
        .starts_with("Error running `gentiles-no-such-renderer`"));
}

#[test]
fn test_norenderer() {
    let tile = munich_tile();
    assert_eq!(
        Norenderer.render(&tile, 1280, 1024),
        Err("No renderer configured for tile 10/217/177".to_string())
    );
}
