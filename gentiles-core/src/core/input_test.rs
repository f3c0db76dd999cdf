//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::input::{parse_extent, parse_zoom_range, TileFormat};
use gentiles_grid::Extent;

#[test]
fn test_parse_extent() {
    assert_eq!(
        parse_extent("11.4,48.07,11.7,48.2"),
        Ok(Extent {
            minx: 11.4,
            miny: 48.07,
            maxx: 11.7,
            maxy: 48.2,
        })
    );
    assert_eq!(
        parse_extent("-180.0, -90.0, 180.0, 90.0"),
        Ok(Extent {
            minx: -180.0,
            miny: -90.0,
            maxx: 180.0,
            maxy: 90.0,
        })
    );
    assert_eq!(
        parse_extent("11.4,48.07,11.7"),
        Err("Boundingbox invalid: expected 4 values, got 3".to_string())
    );
    assert_eq!(
        parse_extent("11.4,abc,11.7,48.2"),
        Err("Boundingbox invalid: 'abc' is not a number".to_string())
    );
    assert!(parse_extent("11.7,48.07,11.4,48.2")
        .unwrap_err()
        .contains("min > max"));
    assert!(parse_extent("11.4,48.07,11.7,95.0")
        .unwrap_err()
        .contains("exceeds WGS84 bounds"));
    assert!(parse_extent("NaN,48.07,11.7,48.2").is_err());
}

#[test]
fn test_parse_zoom_range() {
    assert_eq!(parse_zoom_range("12"), Ok((12, 12)));
    assert_eq!(parse_zoom_range("10-16"), Ok((10, 16)));
    assert_eq!(parse_zoom_range("1-17"), Ok((1, 17)));
    assert!(parse_zoom_range("0").is_err());
    assert!(parse_zoom_range("10-18").is_err());
    assert!(parse_zoom_range("16-10").is_err());
    assert!(parse_zoom_range("1-2-3").is_err());
    assert_eq!(parse_zoom_range("x"), Err("Invalid scale 'x'".to_string()));
}

#[test]
fn test_tile_format() {
    assert_eq!("png".parse::<TileFormat>(), Ok(TileFormat::Png));
    assert_eq!("JPEG".parse::<TileFormat>(), Ok(TileFormat::Jpeg));
    assert_eq!("jpg".parse::<TileFormat>(), Ok(TileFormat::Jpeg));
    assert!("gif".parse::<TileFormat>().is_err());
    assert_eq!(TileFormat::Jpeg.extension(), "jpg");
    assert_eq!(TileFormat::default().to_string(), "png");
}
