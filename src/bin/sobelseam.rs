// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{value_t, App, Arg, ArgMatches};
use failure::{format_err, Error};
use log::{debug, info, LevelFilter};
use sobelseam::blur::DEFAULT_SIGMA;
use sobelseam::{CarveOptions, EnergyUpdate, GradientKernels, PixelGrid, SeamCarver};

fn app() -> App<'static, 'static> {
    App::new("sobelseam")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image narrowing by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the carved image; the format follows the extension")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("seams")
                .short("n")
                .long("seams")
                .takes_value(true)
                .required(true)
                .help("How many vertical seams to remove"),
        )
        .arg(
            Arg::with_name("blur")
                .short("b")
                .long("blur")
                .takes_value(true)
                .min_values(0)
                .max_values(1)
                .help("Smooth noise before estimating energy, with an optional sigma (default 1.0)"),
        )
        .arg(
            Arg::with_name("kernel")
                .short("k")
                .long("kernel")
                .takes_value(true)
                .possible_values(&["sobel", "scharr"])
                .default_value("sobel")
                .help("Edge-detection kernel pair"),
        )
        .arg(
            Arg::with_name("incremental")
                .short("i")
                .long("incremental")
                .help("Patch the energy map around each seam instead of rebuilding it"),
        )
        .arg(
            Arg::with_name("energy")
                .short("e")
                .long("energy")
                .takes_value(true)
                .help("Also write the final energy map to this file"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("More logging; repeat for more"),
        )
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_default())
        .init();
}

fn options(matches: &ArgMatches) -> Result<CarveOptions, Error> {
    let mut options = CarveOptions::new();
    if matches.value_of("kernel") == Some("scharr") {
        options = options.set_kernels(GradientKernels::SCHARR);
    }
    if matches.is_present("blur") {
        let sigma = match matches.value_of("blur") {
            Some(s) => s
                .parse::<f32>()
                .map_err(|e| format_err!("invalid blur sigma {:?}: {}", s, e))?,
            None => DEFAULT_SIGMA,
        };
        options = options.set_blur_sigma(sigma);
    }
    if matches.is_present("incremental") {
        options = options.set_energy_update(EnergyUpdate::Incremental);
    }
    Ok(options)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let seams = value_t!(matches, "seams", u32).unwrap_or_else(|e| e.exit());
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();
    let carver = SeamCarver::new(options(matches)?);
    debug!("{:?}", carver.options());

    let image = PixelGrid::from_image(&image::open(input)?.to_rgba())?;
    info!(
        "read {} ({}x{}); removing {} seams",
        input,
        image.width(),
        image.height(),
        seams
    );

    let energy = carver.energy_map(&image);
    let (carved, energy) = carver.carve(&image, &energy, seams)?;

    carved.to_image().save(output)?;
    info!("wrote {} ({}x{})", output, carved.width(), carved.height());

    if let Some(path) = matches.value_of("energy") {
        energy.to_image().save(path)?;
        info!("wrote energy map to {}", path);
    }
    Ok(())
}

fn main() {
    let matches = app().get_matches();
    init_logging(matches.occurrences_of("verbose"));
    if let Err(err) = run(&matches) {
        eprintln!("sobelseam: {}", err);
        std::process::exit(1);
    }
}
