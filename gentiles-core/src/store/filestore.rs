//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::store::store::TileStore;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

#[derive(Clone)]
pub struct Filestore {
    pub basepath: String,
}

impl Filestore {
    fn fullpath(&self, path: &str) -> String {
        format!("{}/{}", self.basepath, path)
    }
}

impl TileStore for Filestore {
    fn info(&self) -> String {
        format!("Tile directory: {}", self.basepath)
    }
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error> {
        let fullpath = self.fullpath(path);
        debug!("Filestore.write {}", fullpath);
        let p = Path::new(&fullpath);
        if let Some(dir) = p.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut f = File::create(&fullpath)?;
        f.write_all(obj)
    }
    fn remove(&self, path: &str) -> Result<(), io::Error> {
        let fullpath = self.fullpath(path);
        debug!("Filestore.remove {}", fullpath);
        fs::remove_file(fullpath)
    }
    fn exists(&self, path: &str) -> bool {
        Path::new(&self.fullpath(path)).is_file()
    }
    fn size(&self, path: &str) -> Option<u64> {
        fs::metadata(self.fullpath(path)).ok().map(|md| md.len())
    }
}
