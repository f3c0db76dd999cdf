//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod command;
pub mod renderer;

#[cfg(test)]
mod command_test;

pub use self::command::CommandRenderer;
pub use self::renderer::{Norenderer, Renderer};
use crate::core::ApplicationCfg;
use crate::core::Config;
use gentiles_grid::TileDescriptor;

#[derive(Clone)]
pub enum Renderers {
    Norenderer(Norenderer),
    Command(CommandRenderer),
}

impl Renderer for Renderers {
    fn info(&self) -> String {
        match self {
            &Renderers::Norenderer(ref renderer) => renderer.info(),
            &Renderers::Command(ref renderer) => renderer.info(),
        }
    }
    fn render(&self, tile: &TileDescriptor, width: u32, height: u32) -> Result<Vec<u8>, String> {
        match self {
            &Renderers::Norenderer(ref renderer) => renderer.render(tile, width, height),
            &Renderers::Command(ref renderer) => renderer.render(tile, width, height),
        }
    }
}

impl<'a> Config<'a, ApplicationCfg> for Renderers {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        match config.renderer {
            Some(ref cfg) => {
                if cfg.command.trim().is_empty() {
                    return Err("Empty renderer command".to_string());
                }
                Ok(Renderers::Command(CommandRenderer::new(
                    &cfg.command,
                    cfg.args.clone(),
                )))
            }
            None => Ok(Renderers::Norenderer(Norenderer)),
        }
    }
    fn gen_config() -> String {
        let toml = r#"
[renderer]
# Executable writing a 1280x1024 image to stdout
command = "render-tile"
# Placeholders: {minx} {miny} {maxx} {maxy} (EPSG:3857, doubled tile footprint),
# {lon0} {lat0} {lon1} {lat1} (tile footprint), {width} {height} {zoom} {x} {y} {scale}
args = ["--bbox", "{minx}", "{miny}", "{maxx}", "{maxy}", "--size", "{width}", "{height}"]
"#;
        toml.to_string()
    }
}
