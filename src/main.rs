//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use gentiles_core::core::config::DEFAULT_CONFIG;
use gentiles_core::core::input::{parse_extent, parse_zoom_range, TileFormat};
use gentiles_core::core::{parse_config, read_config, ApplicationCfg, Config};
use gentiles_core::service::generator::{GenerateOptions, Generator};
use gentiles_grid::Extent;
use log::Record;
use std::env;
use std::io::Write;
use std::process;
use time;

/// Munich example (`--test`)
const TEST_EXTENT: Extent = Extent {
    minx: 11.4,
    miny: 48.07,
    maxx: 11.7,
    maxy: 48.2,
};
const TEST_ZOOMS: (u8, u8) = (10, 16);

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log_env = env::var("RUST_LOG").ok();
    let rust_log = match (args.value_of("loglevel"), rust_log_env.as_ref()) {
        (None, Some(rust_log)) => rust_log.as_str(),
        (loglevel, _) => match loglevel.unwrap_or("info") {
            "debug" => "debug,tokio=info",
            loglevel => loglevel,
        },
    };
    builder.parse_filters(rust_log);

    builder.init();
}

fn exit_with_error(msg: &str) -> ! {
    println!("{}", msg);
    process::exit(1)
}

fn config_from_args(args: &ArgMatches<'_>) -> ApplicationCfg {
    if let Some(cfgpath) = args.value_of("config") {
        info!("Reading configuration from '{}'", cfgpath);
        read_config(cfgpath).unwrap_or_else(|err| {
            exit_with_error(&format!("Error reading configuration - {} ", err))
        })
    } else {
        parse_config(DEFAULT_CONFIG.to_string(), "").unwrap_or_else(|err| {
            exit_with_error(&format!("Error reading configuration - {} ", err))
        })
    }
}

fn generator_from_args(config: &ApplicationCfg, args: &ArgMatches<'_>) -> Generator {
    let mut generator = Generator::from_config(config).unwrap_or_else(|err| {
        exit_with_error(&format!("Error reading configuration - {} ", err))
    });
    if args.is_present("jpeg") {
        generator.format = TileFormat::Jpeg;
    }
    generator
}

fn parse_arg<T: std::str::FromStr>(args: &ArgMatches<'_>, name: &str) -> Option<T> {
    args.value_of(name).map(|s| {
        s.parse::<T>().unwrap_or_else(|_| {
            exit_with_error(&format!("Error parsing '{}' value '{}'", name, s))
        })
    })
}

fn generate_options(args: &ArgMatches<'_>) -> GenerateOptions {
    let mut extent = args.value_of("bbox").map(|numlist| {
        parse_extent(numlist).unwrap_or_else(|err| exit_with_error(&err))
    });
    let (mut minzoom, mut maxzoom) = match args.value_of("scale") {
        Some(scale) => {
            let (minzoom, maxzoom) =
                parse_zoom_range(scale).unwrap_or_else(|err| exit_with_error(&err));
            (Some(minzoom), Some(maxzoom))
        }
        None => (parse_arg(args, "minzoom"), parse_arg(args, "maxzoom")),
    };
    if args.is_present("test") {
        extent = Some(TEST_EXTENT);
        minzoom = Some(TEST_ZOOMS.0);
        maxzoom = Some(TEST_ZOOMS.1);
    }
    GenerateOptions {
        extent,
        minzoom,
        maxzoom,
        nodes: parse_arg(args, "nodes"),
        nodeno: parse_arg(args, "nodeno"),
        progress: parse_arg(args, "progress").unwrap_or(true),
        overwrite: parse_arg(args, "overwrite").unwrap_or(false),
        dry_run: args.is_present("dry-run"),
    }
}

fn generate(args: &ArgMatches<'_>) {
    let config = config_from_args(args);
    let generator = generator_from_args(&config, args);
    let options = generate_options(args);
    match generator.generate(&options) {
        Ok(stats) => {
            println!(
                "\nFinished. {} created, {} existing, {} simulated, {} failed.",
                stats.created, stats.exists, stats.simulated, stats.failed
            );
            if stats.failed > 0 {
                process::exit(2)
            }
        }
        Err(err) => exit_with_error(&err),
    }
}

fn main() {
    dotenv().ok();
    let mut app = App::new("gentiles")
        .version(crate_version!())
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("Generates 1280x1024 raster map tiles for GpsDrive")
        .subcommand(SubCommand::with_name("genconfig")
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Generate configuration template"))
        .subcommand(SubCommand::with_name("generate")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              -b, --bbox=[minlon,minlat,maxlon,maxlat] 'Boundingbox (quote negative values)'
                                              -s, --scale=[ZOOM|MIN-MAX] 'Zoom level or range (1-17, below 9 Mercator becomes distorted)'
                                              --minzoom=[LEVEL] 'Minimum zoom level'
                                              --maxzoom=[LEVEL] 'Maximum zoom level'
                                              -j, --jpeg 'Save tiles as JPEG instead of PNG'
                                              -n, --dry-run 'Do not render or write anything'
                                              --test 'Generate Munich example (zoom 10-16)'
                                              --nodes=[NUM] 'Number of generator nodes'
                                              --nodeno=[NUM] 'Number of this nodes (0 <= n < nodes)'
                                              --progress=[true|false] 'Show progress bar'
                                              --overwrite=[false|true] 'Overwrite previously generated tiles'")
                        .about("Generate tiles"));

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("genconfig", Some(sub_m)) => {
                init_logger(sub_m);
                println!("{}", Generator::gen_config());
            }
            ("generate", Some(sub_m)) => {
                init_logger(sub_m);
                generate(sub_m);
            }
            _ => {
                let _ = app.print_help();
                println!("");
            }
        },
    }
}
