//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod filestore;
pub mod koord;
pub mod store;

#[cfg(test)]
mod koord_test;

pub use self::filestore::Filestore;
pub use self::koord::KoordIndex;
pub use self::store::Nostore;
pub use self::store::TileStore;
use crate::core::ApplicationCfg;
use crate::core::Config;
use std::io;

#[derive(Clone)]
pub enum Tilestore {
    Nostore(Nostore),
    Filestore(Filestore),
}

impl TileStore for Tilestore {
    fn info(&self) -> String {
        match self {
            &Tilestore::Nostore(ref store) => store.info(),
            &Tilestore::Filestore(ref store) => store.info(),
        }
    }
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error> {
        match self {
            &Tilestore::Nostore(ref store) => store.write(path, obj),
            &Tilestore::Filestore(ref store) => store.write(path, obj),
        }
    }
    fn remove(&self, path: &str) -> Result<(), io::Error> {
        match self {
            &Tilestore::Nostore(ref store) => store.remove(path),
            &Tilestore::Filestore(ref store) => store.remove(path),
        }
    }
    fn exists(&self, path: &str) -> bool {
        match self {
            &Tilestore::Nostore(ref store) => store.exists(path),
            &Tilestore::Filestore(ref store) => store.exists(path),
        }
    }
    fn size(&self, path: &str) -> Option<u64> {
        match self {
            &Tilestore::Nostore(ref store) => store.size(path),
            &Tilestore::Filestore(ref store) => store.size(path),
        }
    }
}

impl<'a> Config<'a, ApplicationCfg> for Tilestore {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        let file_cfg = config.cache.as_ref().and_then(|cache| cache.file.as_ref());
        match file_cfg {
            Some(file_cfg) => Ok(Tilestore::Filestore(Filestore {
                basepath: file_cfg.base.clone(),
            })),
            None => Ok(Tilestore::Nostore(Nostore)),
        }
    }
    fn gen_config() -> String {
        let toml = r#"
[cache.file]
# Tiles are stored as <base>/<zoom>/<x>/<y>.<format>
base = "{{env.HOME}}/.gpsdrive/maps/mapnik"
# png or jpeg
format = "png"
# Coordinate index read by GpsDrive
index = "{{env.HOME}}/.gpsdrive/maps/map_koord.txt"
index_prefix = "mapnik"
"#;
        toml.to_string()
    }
}
