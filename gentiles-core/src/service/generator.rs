//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile generation

use crate::core::config::{ApplicationCfg, Config};
use crate::core::input::{validate_zoom_range, TileFormat};
use crate::render::{Renderer, Renderers};
use crate::service::tileset::Tileset;
use crate::store::{KoordIndex, TileStore, Tilestore};
use gentiles_grid::{
    distortion, Distortion, Extent, ProjectionTable, TileDescriptor, TileIterator, TileLimits,
    TilePlanner, RENDER_HEIGHT, RENDER_WIDTH,
};
use pbr::ProgressBar;
use std::cmp;
use std::fmt;
use std::fs::File;
use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use tokio::task::{self, JoinError};

/// Default number of projection levels (zoom 0-17)
pub const DEFAULT_LEVELS: u8 = 18;
/// Default directory prefix of tile paths in the coordinate index
pub const DEFAULT_INDEX_PREFIX: &str = "mapnik";

type SharedIndex = Arc<Mutex<KoordIndex<File>>>;

/// Outcome of a single tile
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum TileStatus {
    Exists,
    Created,
    Simulated,
    Failed,
}

impl fmt::Display for TileStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = match self {
            TileStatus::Exists => "[exists]",
            TileStatus::Created => "[created]",
            TileStatus::Simulated => "[simulation]",
            TileStatus::Failed => "[failed]",
        };
        write!(f, "{}", tag)
    }
}

#[derive(PartialEq, Clone, Default, Debug)]
pub struct GenerateStats {
    pub created: u64,
    pub exists: u64,
    pub simulated: u64,
    pub failed: u64,
    /// Tiles assigned to other generator nodes
    pub skipped: u64,
}

impl GenerateStats {
    /// Number of tiles handled by this or other nodes
    pub fn total(&self) -> u64 {
        self.created + self.exists + self.simulated + self.failed + self.skipped
    }
    fn add(&mut self, status: TileStatus) {
        match status {
            TileStatus::Exists => self.exists += 1,
            TileStatus::Created => self.created += 1,
            TileStatus::Simulated => self.simulated += 1,
            TileStatus::Failed => self.failed += 1,
        }
    }
}

/// Overrides of the tileset configuration
#[derive(Clone, Default, Debug)]
pub struct GenerateOptions {
    pub extent: Option<Extent>,
    pub minzoom: Option<u8>,
    pub maxzoom: Option<u8>,
    /// Number of generator nodes
    pub nodes: Option<u8>,
    /// Number of this node (0 <= n < nodes)
    pub nodeno: Option<u8>,
    pub progress: bool,
    /// Render tiles already in the store again
    pub overwrite: bool,
    /// Plan only, no rendering and writing
    pub dry_run: bool,
}

/// Renders and stores all tiles of a tileset
#[derive(Clone)]
pub struct Generator {
    pub table: Arc<ProjectionTable>,
    pub tileset: Tileset,
    pub store: Tilestore,
    pub renderer: Renderers,
    pub format: TileFormat,
    /// Coordinate index file
    pub index_path: Option<String>,
    pub index_prefix: String,
}

impl Generator {
    /// Tile path relative to the store: `<zoom>/<x>/<y>.<ext>`
    pub fn tile_path(&self, tile: &TileDescriptor) -> String {
        format!(
            "{}/{}/{}.{}",
            tile.zoom,
            tile.x,
            tile.y,
            self.format.extension()
        )
    }
    /// Tile path as recorded in the coordinate index
    pub fn index_tile_path(&self, tile: &TileDescriptor) -> String {
        format!("{}/{}", self.index_prefix, self.tile_path(tile))
    }
    /// Zoom levels of `options` combined with the tileset defaults
    pub fn zoom_range(&self, options: &GenerateOptions) -> Result<(u8, u8), String> {
        let minzoom = options.minzoom.unwrap_or(self.tileset.minzoom());
        let maxzoom = options.maxzoom.unwrap_or(self.tileset.maxzoom());
        validate_zoom_range(minzoom, maxzoom)?;
        Ok((minzoom, maxzoom))
    }
    pub fn generate(&self, options: &GenerateOptions) -> Result<GenerateStats, String> {
        let extent = options
            .extent
            .as_ref()
            .or(self.tileset.extent.as_ref())
            .ok_or("No boundingbox set!".to_string())?;
        if let Tilestore::Nostore(_) = self.store {
            if !options.dry_run {
                return Err(
                    "No tile store configured. Add a [cache.file] section or use --dry-run"
                        .to_string(),
                );
            }
        }
        let (minzoom, maxzoom) = self.zoom_range(options)?;
        let nodes = options.nodes.unwrap_or(1) as u64;
        let nodeno = options.nodeno.unwrap_or(0) as u64;
        if nodeno >= nodes {
            return Err(format!("Invalid node number {} of {} nodes", nodeno, nodes));
        }

        let planner = TilePlanner::new(&self.table);
        let tiles = planner.plan_tiles(extent, minzoom, maxzoom)?;

        info!("{}", self.store.info());
        info!("{}", self.renderer.info());
        info!(
            "{} [{}-{}]: {:?} ({} tiles)",
            self.tileset.name,
            minzoom,
            maxzoom,
            extent,
            planner.count_tiles(extent, minzoom, maxzoom)
        );
        for zoom in minzoom..=maxzoom {
            match distortion(zoom) {
                Distortion::Noticeable => warn!(
                    "Zoom level {}: Mercator projection begins to be noticeably distorted",
                    zoom
                ),
                Distortion::Severe => {
                    warn!("Zoom level {}: Mercator projection is very distorted", zoom)
                }
                Distortion::None => {}
            }
        }

        let index = match self.index_path {
            Some(ref path) if !options.dry_run => {
                let index = KoordIndex::open(path)
                    .map_err(|e| format!("Can not open {}: {}", path, e))?;
                Some(Arc::new(Mutex::new(index)))
            }
            _ => None,
        };

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| format!("Couldn't initialize tokio runtime: {}", e))?;
        let stats = rt.block_on(self.generate_tiles(
            &planner, extent, tiles, index, nodes, nodeno, options,
        ));
        if options.progress {
            println!("");
        }
        info!("{} tiles: {:?}", stats.total(), stats);
        Ok(stats)
    }
    async fn generate_tiles(
        &self,
        planner: &TilePlanner<'_>,
        extent: &Extent,
        tiles: TileIterator<'_>,
        index: Option<SharedIndex>,
        nodes: u64,
        nodeno: u64,
        options: &GenerateOptions,
    ) -> GenerateStats {
        // Keep a queue of tasks waiting for parallel execution (size >= #cores).
        let task_queue_size = cmp::min(num_cpus::get() * 2, 64);
        let mut tasks = Vec::with_capacity(task_queue_size);
        let mut stats = GenerateStats::default();
        let mut tileno: u64 = 0;
        let mut pb = ProgressBar::new(0);
        let mut pb_z = None;
        for tile in tiles {
            if options.progress {
                if pb_z != Some(tile.zoom) {
                    pb_z = Some(tile.zoom);
                    let limits = planner.tile_limits(extent, tile.zoom);
                    debug!("level {}: {:?}", tile.zoom, limits);
                    pb = self.progress_bar(&format!("Level {}: ", tile.zoom), &limits);
                    pb.tick();
                }
                // Tiles of other nodes count as done
                pb.inc();
            }

            let skip = tileno % nodes != nodeno;
            tileno += 1;
            if skip {
                stats.skipped += 1;
                continue;
            }

            let path = self.tile_path(&tile);
            let exists = self.store.exists(&path);
            if !options.overwrite && exists {
                debug!(
                    "{} {} {} ({} bytes)",
                    self.tileset.name,
                    tile_info(&tile),
                    TileStatus::Exists,
                    self.store.size(&path).unwrap_or(0)
                );
                stats.add(TileStatus::Exists);
            } else if options.dry_run {
                debug!(
                    "{} {} {}",
                    self.tileset.name,
                    tile_info(&tile),
                    TileStatus::Simulated
                );
                stats.add(TileStatus::Simulated);
            } else {
                let renderer = self.renderer.clone();
                let store = self.store.clone();
                // Overwritten tiles are already indexed
                let index = if exists { None } else { index.clone() };
                let index_path = self.index_tile_path(&tile);
                let name = self.tileset.name.clone();
                tasks.push(task::spawn_blocking(move || {
                    let status = render_tile(
                        &renderer,
                        &store,
                        index.as_deref(),
                        &tile,
                        &path,
                        &index_path,
                    );
                    debug!("{} {} {}", name, tile_info(&tile), status);
                    status
                }));
                if tasks.len() >= task_queue_size {
                    let (status, remaining) = await_one_task(tasks).await;
                    stats.add(status);
                    tasks = remaining;
                }
            }
        }
        // Finish remaining tasks
        for result in futures_util::future::join_all(tasks).await {
            stats.add(task_status(result));
        }
        stats
    }
    fn progress_bar(&self, msg: &str, limits: &TileLimits) -> ProgressBar<Stdout> {
        let mut pb = ProgressBar::new(limits.count());
        pb.message(msg);
        pb.show_speed = false;
        pb.show_percent = false;
        pb.show_time_left = false;
        pb
    }
}

/// Tile geometry in log output
fn tile_info(tile: &TileDescriptor) -> String {
    format!(
        "zoom:{:2} scale=1:{:.1} x:{:5} y:{:5} p:({:.7}, {:.7})/({:.7}, {:.7})",
        tile.zoom, tile.scale, tile.x, tile.y, tile.p0.lon, tile.p0.lat, tile.p1.lon, tile.p1.lat
    )
}

fn render_tile<R: Renderer, S: TileStore>(
    renderer: &R,
    store: &S,
    index: Option<&Mutex<KoordIndex<File>>>,
    tile: &TileDescriptor,
    path: &str,
    index_path: &str,
) -> TileStatus {
    let image = match renderer.render(tile, RENDER_WIDTH, RENDER_HEIGHT) {
        Ok(image) => image,
        Err(e) => {
            error!("Error rendering {}: {}", path, e);
            return TileStatus::Failed;
        }
    };
    if let Err(ioerr) = store.write(path, &image) {
        error!("Error writing {}: {}", path, ioerr);
        return TileStatus::Failed;
    }
    debug!("{}: {} bytes", path, image.len());
    if let Some(index) = index {
        let appended = match index.lock() {
            Ok(mut index) => index.append(index_path, tile),
            Err(_) => Err(io::Error::new(
                io::ErrorKind::Other,
                "coordinate index lock poisoned",
            )),
        };
        if let Err(ioerr) = appended {
            error!("Error appending {} to coordinate index: {}", index_path, ioerr);
            // Unindexed tiles must be rendered again on the next run
            if let Err(ioerr) = store.remove(path) {
                error!("Error removing {}: {}", path, ioerr);
            }
            return TileStatus::Failed;
        }
    }
    TileStatus::Created
}

async fn await_one_task(
    tasks: Vec<task::JoinHandle<TileStatus>>,
) -> (TileStatus, Vec<task::JoinHandle<TileStatus>>) {
    let (result, _index, remaining) = futures_util::future::select_all(tasks).await;
    (task_status(result), remaining)
}

pub(crate) fn task_status(result: Result<TileStatus, JoinError>) -> TileStatus {
    result.unwrap_or_else(|e| {
        error!("Render task failed: {}", e);
        TileStatus::Failed
    })
}

impl<'a> Config<'a, ApplicationCfg> for Generator {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        let levels = config.grid.levels.unwrap_or(DEFAULT_LEVELS);
        let tileset = Tileset::from_config(&config.tileset)?;
        let store = Tilestore::from_config(config)?;
        let renderer = Renderers::from_config(config)?;
        let file_cfg = config.cache.as_ref().and_then(|cache| cache.file.as_ref());
        let format = match file_cfg.and_then(|cfg| cfg.format.as_ref()) {
            Some(format) => format.parse::<TileFormat>()?,
            None => TileFormat::default(),
        };
        Ok(Generator {
            table: Arc::new(ProjectionTable::new(levels)),
            tileset,
            store,
            renderer,
            format,
            index_path: file_cfg.and_then(|cfg| cfg.index.clone()),
            index_prefix: file_cfg
                .and_then(|cfg| cfg.index_prefix.clone())
                .unwrap_or(DEFAULT_INDEX_PREFIX.to_string()),
        })
    }
    fn gen_config() -> String {
        let mut config = String::new();
        config.push_str("# gentiles configuration\n");
        config.push_str(
            r#"
[grid]
# Number of precomputed zoom levels
levels = 18
"#,
        );
        config.push_str(&Tileset::gen_config());
        config.push_str(&Tilestore::gen_config());
        config.push_str(&Renderers::gen_config());
        config
    }
}
