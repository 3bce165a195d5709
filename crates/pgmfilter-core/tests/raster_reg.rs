//! Raster container regression test
//!
//! Tests:
//!   (1) add_border / remove_border round trip on a real image
//!   (2) border values and interior placement
//!   (3) map into the signed domain and min_max

use pgmfilter_core::{Error, GrayRaster, IntRaster};
use pgmfilter_test::{RegParams, load_test_image};

#[test]
fn raster_reg_border_round_trip() {
    let mut rp = RegParams::new("raster_border");

    let pixs = load_test_image("ramp.pgm").expect("load ramp.pgm");
    let (w, h) = pixs.dimensions();

    for npix in [1u32, 2, 4] {
        let bordered = pixs.add_border(npix, 0).expect("add_border");
        rp.compare_values((w + 2 * npix) as f64, bordered.width() as f64, 0.0);
        rp.compare_values((h + 2 * npix) as f64, bordered.height() as f64, 0.0);

        let back = bordered.remove_border(npix).expect("remove_border");
        rp.compare_raster(&pixs, &back);
    }

    assert!(rp.cleanup(), "raster_border regression test failed");
}

#[test]
fn raster_reg_border_placement() {
    let mut rp = RegParams::new("raster_placement");

    let pixs = load_test_image("pattern.pgm").expect("load pattern.pgm");
    let bordered = pixs.add_border(2, 77).expect("add_border");

    let (bw, bh) = bordered.dimensions();
    let ring_ok = (0..bh).all(|y| {
        (0..bw).all(|x| {
            let inside = (2..bw - 2).contains(&x) && (2..bh - 2).contains(&y);
            inside || bordered.get_pixel(x, y) == Some(77)
        })
    });
    rp.compare_values(1.0, if ring_ok { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(
        pixs.get_pixel(0, 0).unwrap_or(0) as f64,
        bordered.get_pixel(2, 2).unwrap_or(0) as f64,
        0.0,
    );

    assert!(rp.cleanup(), "raster_placement regression test failed");
}

#[test]
fn raster_reg_map_and_min_max() {
    let mut rp = RegParams::new("raster_map");

    let pixs = load_test_image("ramp.pgm").expect("load ramp.pgm");
    let signed: IntRaster = pixs.map(|v| v as i32 - 100).expect("map");
    let (min, max) = signed.min_max();
    rp.compare_values(-100.0, min as f64, 0.0);
    rp.compare_values(150.0, max as f64, 0.0);

    let back: GrayRaster = signed.map(|v| (v + 100) as u8).expect("map back");
    rp.compare_raster(&pixs, &back);

    assert!(rp.cleanup(), "raster_map regression test failed");
}

#[test]
fn raster_reg_invalid() {
    assert!(matches!(
        GrayRaster::new(0, 4),
        Err(Error::InvalidDimension { .. })
    ));
    assert!(GrayRaster::from_data(2, 2, vec![0; 3]).is_err());

    let pixs = GrayRaster::new(4, 4).unwrap();
    assert!(pixs.remove_border(2).is_err());
}
