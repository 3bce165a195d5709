//! Median filter regression test
//!
//! Tests:
//!   (1) quickselect against a full-sort reference on random windows
//!   (2) median filtering of a real image against a sort-based filter
//!   (3) fixed seeds give reproducible output

use pgmfilter_core::GrayRaster;
use pgmfilter_filter::{MedianSelector, PaddingPolicy, median_filter, pad, pad_with_policy};
use pgmfilter_test::{RegParams, load_test_image};
use rand::prelude::*;

fn sorted_median(values: &[u8]) -> u8 {
    let mut v = values.to_vec();
    v.sort_unstable();
    let n = v.len();
    if n % 2 == 1 {
        v[n / 2]
    } else {
        ((v[n / 2 - 1] as u16 + v[n / 2] as u16) / 2) as u8
    }
}

#[test]
fn rank_reg_quickselect_vs_sort() {
    let mut rp = RegParams::new("rank_quickselect");
    let mut rng = StdRng::seed_from_u64(2024);
    let mut selector = MedianSelector::new(99);

    for _ in 0..1000 {
        let size = [3usize, 5, 7, 9][rng.random_range(0..4usize)];
        let values: Vec<u8> = (0..size * size).map(|_| rng.random_range(0..=255)).collect();
        let mut work = values.clone();
        let median = selector.select_median(&mut work).unwrap_or(0);
        rp.compare_values(sorted_median(&values) as f64, median as f64, 0.0);
    }

    assert!(rp.cleanup(), "rank_quickselect regression test failed");
}

#[test]
fn rank_reg_filter_vs_reference() {
    let mut rp = RegParams::new("rank_filter");

    let pixs = load_test_image("pattern.pgm").expect("load pattern.pgm");
    for size in [3u32, 5] {
        let padded = pad_with_policy(&pixs, PaddingPolicy::Mirror, size).expect("pad");
        let out = median_filter(&padded, size, &mut MedianSelector::default()).expect("median");
        rp.compare_values(pixs.width() as f64, out.width() as f64, 0.0);
        rp.compare_values(pixs.height() as f64, out.height() as f64, 0.0);

        let s = size as usize;
        let mut reference = Vec::with_capacity(out.data().len());
        for y in 0..out.height() {
            for x in 0..out.width() {
                let mut window = Vec::with_capacity(s * s);
                for i in 0..size {
                    window.extend_from_slice(&padded.row(y + i)[x as usize..x as usize + s]);
                }
                reference.push(sorted_median(&window));
            }
        }
        let reference = GrayRaster::from_data(out.width(), out.height(), reference).unwrap();
        rp.compare_raster(&reference, &out);
    }

    assert!(rp.cleanup(), "rank_filter regression test failed");
}

#[test]
fn rank_reg_reproducible() {
    let pixs = load_test_image("ramp.pgm").expect("load ramp.pgm");
    let padded = pad(&pixs, 0, 3).expect("pad");
    let a = median_filter(&padded, 3, &mut MedianSelector::new(5)).unwrap();
    let b = median_filter(&padded, 3, &mut MedianSelector::new(5)).unwrap();
    let c = median_filter(&padded, 3, &mut MedianSelector::new(6)).unwrap();
    assert_eq!(a, b);
    // The median is unique, so the pivot sequence never changes the result
    assert_eq!(a, c);
}
