use image::Rgba;
use sobelseam::gradient::{SOBEL_HORIZONTAL, SOBEL_VERTICAL};
use sobelseam::seamfinder::{cumulative_energy, seam_end};
use sobelseam::twodmap::grey_pixel;
use sobelseam::{
    energy_to_vertical_seam, generate_energy_map, grayscale, remove_seams, CarveError,
    CarveOptions, EnergyMap, PixelGrid, SeamCarver, TwoDimensionalMap,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Soft diagonal bands with a hard-edged block, enough structure that
// the seams have real choices to make.
fn scene(width: u32, height: u32) -> PixelGrid {
    TwoDimensionalMap::from_fn(width, height, |x, y| {
        let band = ((x + y) * 9 % 256) as u8;
        if x > width / 3 && x < width / 2 && y > height / 4 {
            Rgba([250, 40, 40, 255])
        } else {
            Rgba([band, band / 2, 255 - band, 255])
        }
    })
    .unwrap()
}

fn energies(width: u32, height: u32, data: &[u8]) -> EnergyMap {
    TwoDimensionalMap::from_vec(width, height, data.iter().map(|e| grey_pixel(*e)).collect())
        .unwrap()
}

// Every connected top-to-bottom path, costed the slow way.
fn brute_force_minimum(energy: &EnergyMap) -> u32 {
    fn walk(energy: &EnergyMap, x: u32, y: u32, acc: u32, best: &mut u32) {
        let acc = acc + u32::from(energy[(x, y)].0[0]);
        if y + 1 == energy.height() {
            *best = (*best).min(acc);
            return;
        }
        let lo = x.saturating_sub(1);
        let hi = (x + 1).min(energy.width() - 1);
        for nx in lo..=hi {
            walk(energy, nx, y + 1, acc, best);
        }
    }
    let mut best = u32::max_value();
    for x in 0..energy.width() {
        walk(energy, x, 0, 0, &mut best);
    }
    best
}

fn path_cost(energy: &EnergyMap, seam: &[u32]) -> u32 {
    seam.iter()
        .enumerate()
        .map(|(y, &x)| u32::from(energy[(x, y as u32)].0[0]))
        .sum()
}

#[test]
fn uniform_black_image_convolves_to_itself() {
    let black = PixelGrid::filled(5, 5, Rgba([0, 0, 0, 255])).unwrap();
    let gray = grayscale(&black);
    assert_eq!(sobelseam::gradient::convolve(&gray, &SOBEL_HORIZONTAL), black);
    assert_eq!(sobelseam::gradient::convolve(&gray, &SOBEL_VERTICAL), black);
    assert_eq!(generate_energy_map(&black), black);
}

#[test]
fn seam_is_as_cheap_as_any_path() {
    const GRIDS: [[u8; 25]; 3] = [
        [
            5, 8, 1, 9, 3, 7, 2, 6, 4, 8, 9, 9, 3, 1, 2, 4, 0, 7, 7, 6, 3, 5, 2, 8, 1,
        ],
        [
            0, 0, 0, 0, 0, 9, 9, 9, 9, 0, 0, 9, 9, 9, 9, 9, 9, 9, 9, 0, 0, 9, 9, 9, 9,
        ],
        [
            200, 10, 200, 10, 200, 10, 200, 10, 200, 10, 200, 10, 200, 10, 200, 10, 200, 10,
            200, 10, 200, 10, 200, 10, 200,
        ],
    ];
    for data in GRIDS.iter() {
        let energy = energies(5, 5, data);
        let table = cumulative_energy(&energy).unwrap();
        let seam = energy_to_vertical_seam(&energy).unwrap();
        let best = brute_force_minimum(&energy);

        assert_eq!(table[(seam_end(&table), 4)].energy, best);
        assert_eq!(table[(seam[4], 4)].energy, best);
        assert_eq!(path_cost(&energy, &seam), best);
    }
}

#[test]
fn seams_on_real_energy_are_connected_and_optimal() {
    let image = scene(9, 7);
    let energy = generate_energy_map(&image);
    let seam = energy_to_vertical_seam(&energy).unwrap();
    assert_eq!(seam.len(), 7);
    for pair in seam.windows(2) {
        assert!(pair[0].max(pair[1]) - pair[0].min(pair[1]) <= 1);
    }
    assert_eq!(path_cost(&energy, &seam), brute_force_minimum(&energy));
}

#[test]
fn removing_seams_narrows_image_and_energy_together() {
    init();
    let original = scene(30, 12);
    for &n in &[1u32, 5, 29] {
        let mut image = original.clone();
        let mut energy = generate_energy_map(&image);
        remove_seams(&mut image, &mut energy, n).unwrap();
        assert_eq!(image.width(), 30 - n);
        assert_eq!(image.height(), 12);
        assert_eq!(energy.dimensions(), image.dimensions());
    }
}

#[test]
fn removing_no_seams_changes_nothing() {
    let mut image = scene(12, 6);
    let mut energy = generate_energy_map(&image);
    let (image_before, energy_before) = (image.clone(), energy.clone());
    remove_seams(&mut image, &mut energy, 0).unwrap();
    assert_eq!(image, image_before);
    assert_eq!(energy, energy_before);
}

#[test]
fn one_at_a_time_matches_all_at_once() {
    init();
    let carver = SeamCarver::new(CarveOptions::default());
    let original = scene(40, 16);
    let energy = generate_energy_map(&original);

    let (batched, batched_energy) = carver.carve(&original, &energy, 10).unwrap();

    let (mut image, mut energy) = (original.clone(), energy);
    for _ in 0..10 {
        carver.carve_in_place(&mut image, &mut energy, 1).unwrap();
    }

    assert_eq!(batched.width(), 30);
    assert_eq!(image.width(), 30);
    assert_eq!(image, batched);
    assert_eq!(energy, batched_energy);
}

#[test]
fn refusing_too_many_seams() {
    let mut image = scene(8, 4);
    let mut energy = generate_energy_map(&image);
    let before = image.clone();
    for &n in &[8u32, 9, 1000] {
        assert_eq!(
            remove_seams(&mut image, &mut energy, n),
            Err(CarveError::TooManySeams {
                requested: n,
                width: 8
            })
        );
    }
    assert_eq!(image, before);
}

#[test]
fn flat_regions_go_before_edges() {
    // Black on the left, white on the right.  Only the two columns
    // touching the step carry energy, and the carver eats the flat
    // columns leftmost-first: all seven flat blacks, then three whites.
    let black = Rgba([0, 0, 0, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let image = TwoDimensionalMap::from_fn(16, 8, |x, _| if x < 8 { black } else { white })
        .unwrap();
    let energy = generate_energy_map(&image);
    let levels: Vec<u8> = energy.row(3).iter().map(|p| p.0[0]).collect();
    assert_eq!(levels, vec![0, 0, 0, 0, 0, 0, 0, 255, 255, 0, 0, 0, 0, 0, 0, 0]);

    let (carved, energy) = SeamCarver::new(CarveOptions::default())
        .carve(&image, &energy, 10)
        .unwrap();
    assert_eq!(carved.width(), 6);
    for y in 0..8 {
        assert_eq!(carved.row(y), &[black, white, white, white, white, white]);
        let levels: Vec<u8> = energy.row(y).iter().map(|p| p.0[0]).collect();
        assert_eq!(levels, vec![255, 255, 0, 0, 0, 0]);
    }
}
