//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::store::koord::KoordIndex;
use gentiles_grid::{LonLat, TileDescriptor};
use std::fs;

fn tile() -> TileDescriptor {
    TileDescriptor {
        zoom: 10,
        x: 217,
        y: 177,
        p0: LonLat {
            lon: 10.5,
            lat: 48.0,
        },
        p1: LonLat {
            lon: 11.5,
            lat: 48.5,
        },
        scale: 287000.5,
    }
}

#[test]
fn test_record_format() {
    let mut index = KoordIndex::new(Vec::new());
    index.append("mapnik/10/217/177.png", &tile()).unwrap();
    index
        .append_record("mapnik/10/218/177.png", 1.25, 2.5, 3.0, 4.0, 5.0, 6.0, 7.0)
        .unwrap();
    let text = String::from_utf8(index.into_inner()).unwrap();
    assert_eq!(
        text,
        "mapnik/10/217/177.png 48.25 11 287000.5 48 10.5 48.5 11.5\n\
         mapnik/10/218/177.png 1.25 2.5 3 4 5 6 7\n"
    );
}

#[test]
fn test_append_file() {
    use std::env;

    let mut dir = env::temp_dir();
    dir.push("gentiles_koord_test");
    let _ = fs::remove_dir_all(&dir);
    let path = format!("{}/maps/map_koord.txt", dir.display());

    let mut index = KoordIndex::open(&path).unwrap();
    index.append("mapnik/10/217/177.png", &tile()).unwrap();
    drop(index);

    // Reopening appends
    let mut index = KoordIndex::open(&path).unwrap();
    index.append("mapnik/10/218/177.png", &tile()).unwrap();
    drop(index);

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("mapnik/10/217/177.png "));
    assert!(lines[1].starts_with("mapnik/10/218/177.png "));
    assert_eq!(lines[1].split_whitespace().count(), 8);
}
