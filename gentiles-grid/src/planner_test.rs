//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::extent::Extent;
use crate::planner::{calc_scale, distortion, Distortion, TileDescriptor, TileLimits, TilePlanner};
use crate::projection::ProjectionTable;
use std::collections::HashMap;

fn munich() -> Extent {
    Extent {
        minx: 11.4,
        miny: 48.07,
        maxx: 11.7,
        maxy: 48.2,
    }
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
}

#[test]
fn test_calc_scale() {
    assert!((calc_scale(48.0, 12) - 72063.86860263479).abs() < 1e-6);
    assert!((calc_scale(48.0, 10) - 288255.47441053914).abs() < 1e-6);
    assert!((calc_scale(0.0, 0) - 441130032.00168806).abs() < 1e-3);
}

#[test]
fn test_scale_monotonicity() {
    for &lat in &[-60.0, 0.0, 23.5, 48.0, 80.0] {
        for zoom in 0..17 {
            let scale = calc_scale(lat, zoom);
            let next = calc_scale(lat, zoom + 1);
            assert!(next < scale);
            assert_close(next * 2.0 / scale, 1.0);
        }
    }
    // Mercator scale grows towards the equator
    assert!(calc_scale(0.0, 12) > calc_scale(48.0, 12));
}

#[test]
fn test_tile_limits() {
    let table = ProjectionTable::new(18);
    let planner = TilePlanner::new(&table);
    assert_eq!(
        planner.tile_limits(&munich(), 10),
        TileLimits {
            minx: 217,
            miny: 177,
            maxx: 218,
            maxy: 177,
        }
    );
    assert_eq!(
        planner.tile_limits(&munich(), 12),
        TileLimits {
            minx: 871,
            miny: 710,
            maxx: 872,
            maxy: 711,
        }
    );
    assert_eq!(planner.tile_limits(&munich(), 12).count(), 4);

    let world = Extent {
        minx: -180.0,
        miny: -90.0,
        maxx: 180.0,
        maxy: 90.0,
    };
    // Clamped north pole lies above the pixel origin
    assert_eq!(planner.tile_limits(&world, 0).miny, -1);

    let counts: Vec<u64> = (10..17)
        .map(|z| planner.tile_limits(&munich(), z).count())
        .collect();
    assert_eq!(counts, vec![2, 2, 4, 9, 36, 120, 437]);
    assert_eq!(planner.count_tiles(&munich(), 10, 16), 610);

    let empty = TileLimits {
        minx: 3,
        miny: 0,
        maxx: 2,
        maxy: 0,
    };
    assert!(empty.is_empty());
    assert_eq!(empty.count(), 0);
}

#[test]
fn test_munich_tiles() {
    let table = ProjectionTable::new(18);
    let planner = TilePlanner::new(&table);
    let tiles: Vec<TileDescriptor> = planner.plan_tiles(&munich(), 10, 10).unwrap().collect();
    assert_eq!(tiles.len(), 2);
    let tile = &tiles[0];
    assert_eq!((tile.zoom, tile.x, tile.y), (10, 217, 177));
    assert_close(tile.p0.lon, 10.72265625);
    assert_close(tile.p0.lat, 47.98992166741417);
    assert_close(tile.p1.lon, 11.6015625);
    assert_close(tile.p1.lat, 48.45835188280866);
    assert!((tile.scale - 287000.9078875406).abs() < 1e-6);
    assert_eq!((tiles[1].x, tiles[1].y), (218, 177));

    let center = tile.center();
    assert_close(center.lon, (10.72265625 + 11.6015625) / 2.0);
    assert_eq!(tile.scale, calc_scale(center.lat, 10));
}

#[test]
fn test_row_order() {
    let table = ProjectionTable::new(18);
    let planner = TilePlanner::new(&table);
    let cells: Vec<(u8, i64, i64)> = planner
        .plan_tiles(&munich(), 11, 12)
        .unwrap()
        .map(|t| (t.zoom, t.x, t.y))
        .collect();
    let limits11 = planner.tile_limits(&munich(), 11);
    assert_eq!(limits11.count(), 2);
    assert_eq!(cells.len(), 6);
    assert_eq!(
        &cells[2..],
        &[(12, 871, 710), (12, 872, 710), (12, 871, 711), (12, 872, 711)]
    );
}

#[test]
fn test_coverage() {
    let table = ProjectionTable::new(18);
    let planner = TilePlanner::new(&table);
    let bbox = munich();
    for zoom in 10..17 {
        let tiles: Vec<TileDescriptor> = planner.plan_tiles(&bbox, zoom, zoom).unwrap().collect();
        let limits = planner.tile_limits(&bbox, zoom);
        assert_eq!(tiles.len() as u64, limits.count());

        let by_index: HashMap<(i64, i64), &TileDescriptor> =
            tiles.iter().map(|t| ((t.x, t.y), t)).collect();
        assert_eq!(by_index.len(), tiles.len());

        // union of footprints
        let union = tiles.iter().fold(tiles[0].extent(), |ext, t| Extent {
            minx: ext.minx.min(t.p0.lon),
            miny: ext.miny.min(t.p0.lat),
            maxx: ext.maxx.max(t.p1.lon),
            maxy: ext.maxy.max(t.p1.lat),
        });
        assert!(union.contains(&bbox), "zoom {}: {:?}", zoom, union);

        // neighbours share their edges exactly
        for tile in &tiles {
            if let Some(right) = by_index.get(&(tile.x + 1, tile.y)) {
                assert_eq!(tile.p1.lon, right.p0.lon);
                assert_eq!(tile.p0.lat, right.p0.lat);
            }
            if let Some(below) = by_index.get(&(tile.x, tile.y + 1)) {
                assert_eq!(tile.p0.lat, below.p1.lat);
                assert_eq!(tile.p0.lon, below.p0.lon);
            }
            assert!(tile.p0.lon < tile.p1.lon);
            assert!(tile.p0.lat < tile.p1.lat);
        }
    }
}

#[test]
fn test_render_extent() {
    let table = ProjectionTable::new(18);
    let planner = TilePlanner::new(&table);
    let tile = planner.tile_descriptor(217, 177, 10);
    let footprint = crate::extent::extent_wgs84_to_merc(&tile.extent());
    let render = tile.render_extent();
    assert!((render.width() - 2.0 * footprint.width()).abs() < 1e-6);
    assert!((render.height() - 2.0 * footprint.height()).abs() < 1e-6);
    assert!(render.contains(&footprint));
    // 640 pixels at zoom 10 (152.87 m per 256px-grid pixel)
    assert!((footprint.width() - 640.0 * 152.87405657035254).abs() < 1e-3);
}

#[test]
fn test_determinism() {
    let table = ProjectionTable::new(18);
    let planner = TilePlanner::new(&table);
    let first: Vec<TileDescriptor> = planner.plan_tiles(&munich(), 10, 14).unwrap().collect();
    let second: Vec<TileDescriptor> = planner.plan_tiles(&munich(), 10, 14).unwrap().collect();
    assert_eq!(first, second);

    let other_table = ProjectionTable::new(15);
    let third: Vec<TileDescriptor> = TilePlanner::new(&other_table)
        .plan_tiles(&munich(), 10, 14)
        .unwrap()
        .collect();
    assert_eq!(first, third);
}

#[test]
fn test_boundary_zoom() {
    assert_eq!(distortion(8), Distortion::Severe);
    assert_eq!(distortion(1), Distortion::Severe);
    assert_eq!(distortion(9), Distortion::Noticeable);
    assert_eq!(distortion(10), Distortion::None);
    assert_eq!(distortion(17), Distortion::None);

    let table = ProjectionTable::new(18);
    let planner = TilePlanner::new(&table);
    let tiles: Vec<TileDescriptor> = planner.plan_tiles(&munich(), 9, 9).unwrap().collect();
    let cells: Vec<(i64, i64)> = tiles.iter().map(|t| (t.x, t.y)).collect();
    assert_eq!(cells, vec![(108, 88), (109, 88)]);
}

#[test]
fn test_bad_zoom_range() {
    let table = ProjectionTable::new(17);
    let planner = TilePlanner::new(&table);
    assert_eq!(
        planner.plan_tiles(&munich(), 10, 17).err(),
        Some("Zoom level 17 out of range (projection has 17 levels)".to_string())
    );
    assert!(planner.plan_tiles(&munich(), 10, 16).is_ok());
    assert_eq!(
        planner.plan_tiles(&munich(), 12, 11).err(),
        Some("Invalid zoom range 12-11: minzoom > maxzoom".to_string())
    );
}

#[test]
fn test_single_point() {
    let table = ProjectionTable::new(18);
    let planner = TilePlanner::new(&table);
    let point = Extent {
        minx: 11.5,
        miny: 48.1,
        maxx: 11.5,
        maxy: 48.1,
    };
    let tiles: Vec<TileDescriptor> = planner.plan_tiles(&point, 0, 17).unwrap().collect();
    assert_eq!(tiles.len(), 18);
    for (zoom, tile) in tiles.iter().enumerate() {
        assert_eq!(tile.zoom as usize, zoom);
        let ext = tile.extent();
        assert!(ext.minx <= 11.5 && ext.maxx >= 11.5);
        assert!(ext.miny <= 48.1 && ext.maxy >= 48.1);
    }
}
