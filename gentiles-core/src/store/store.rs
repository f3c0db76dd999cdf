//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::io;

pub trait TileStore {
    fn info(&self) -> String;
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error>;
    fn remove(&self, path: &str) -> Result<(), io::Error>;
    fn exists(&self, path: &str) -> bool;
    /// Size of a stored tile in bytes
    fn size(&self, path: &str) -> Option<u64>;
}

/// Store discarding all tiles (dry run)
#[derive(Clone)]
pub struct Nostore;

impl TileStore for Nostore {
    fn info(&self) -> String {
        "No tile store".to_string()
    }
    #[allow(unused_variables)]
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error> {
        Ok(())
    }
    fn remove(&self, _path: &str) -> Result<(), io::Error> {
        Ok(())
    }
    fn exists(&self, _path: &str) -> bool {
        false
    }
    fn size(&self, _path: &str) -> Option<u64> {
        None
    }
}
