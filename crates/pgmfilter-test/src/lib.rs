//! pgmfilter-test - Regression test framework for pgmfilter
//!
//! Each regression test creates a [`RegParams`], runs numbered checks
//! through it and asserts on [`RegParams::cleanup`] at the end. Failures
//! are collected rather than panicking, so one run reports every broken
//! check.
//!
//! # Usage
//!
//! ```ignore
//! use pgmfilter_test::RegParams;
//!
//! let mut rp = RegParams::new("padding");
//! rp.compare_values(9.0, sum as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use pgmfilter_core::GrayRaster;

/// Load a test image from the test data directory
///
/// # Arguments
///
/// * `name` - Image filename (e.g., "ramp.pgm")
pub fn load_test_image(name: &str) -> TestResult<GrayRaster> {
    let path = test_data_path(name);
    pgmfilter_io::read_pgm(&path).map_err(|e| TestError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pgmfilter-test is at crates/pgmfilter-test
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
