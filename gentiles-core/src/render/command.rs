//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::render::renderer::Renderer;
use gentiles_grid::TileDescriptor;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::process::Command;

/// Renderer running an external program which writes the image to stdout
#[derive(Clone, Debug)]
pub struct CommandRenderer {
    pub command: String,
    /// Arguments with `{name}` placeholders
    pub args: Vec<String>,
}

impl CommandRenderer {
    pub fn new(command: &str, args: Vec<String>) -> CommandRenderer {
        CommandRenderer {
            command: command.to_string(),
            args,
        }
    }
    fn placeholders(tile: &TileDescriptor, width: u32, height: u32) -> HashMap<&'static str, String> {
        let ext = tile.render_extent();
        let mut values = HashMap::new();
        values.insert("minx", ext.minx.to_string());
        values.insert("miny", ext.miny.to_string());
        values.insert("maxx", ext.maxx.to_string());
        values.insert("maxy", ext.maxy.to_string());
        values.insert("lon0", tile.p0.lon.to_string());
        values.insert("lat0", tile.p0.lat.to_string());
        values.insert("lon1", tile.p1.lon.to_string());
        values.insert("lat1", tile.p1.lat.to_string());
        values.insert("width", width.to_string());
        values.insert("height", height.to_string());
        values.insert("zoom", tile.zoom.to_string());
        values.insert("x", tile.x.to_string());
        values.insert("y", tile.y.to_string());
        values.insert("scale", tile.scale.to_string());
        values
    }
    /// Arguments with placeholders replaced. Unknown placeholders are kept.
    pub fn expand_args(
        &self,
        tile: &TileDescriptor,
        width: u32,
        height: u32,
    ) -> Result<Vec<String>, String> {
        let re = Regex::new(r"\{([[:alnum:]_]+)\}").map_err(|e| e.to_string())?;
        let values = Self::placeholders(tile, width, height);
        let args = self
            .args
            .iter()
            .map(|arg| {
                re.replace_all(arg, |caps: &Captures| match values.get(&caps[1]) {
                    Some(value) => value.clone(),
                    None => caps[0].to_string(),
                })
                .into_owned()
            })
            .collect();
        Ok(args)
    }
}

impl Renderer for CommandRenderer {
    fn info(&self) -> String {
        format!("Renderer command: {}", self.command)
    }
    fn render(&self, tile: &TileDescriptor, width: u32, height: u32) -> Result<Vec<u8>, String> {
        let args = self.expand_args(tile, width, height)?;
        debug!("{} {}", self.command, args.join(" "));
        let output = Command::new(&self.command)
            .args(&args)
            .output()
            .map_err(|e| format!("Error running `{}`: {}", self.command, e))?;
        if !output.status.success() {
            return Err(format!(
                "`{}` failed ({}): {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        if output.stdout.is_empty() {
            return Err(format!("`{}` returned no image data", self.command));
        }
        Ok(output.stdout)
    }
}
