//! Known optimal weights for the reference instance files.
//!
//! Instances are named `graf_<n>_<k>.txt`; the table is keyed by file name so
//! callers can pass a path's final component directly.

use std::path::Path;

const KNOWN_OPTIMA: &[(&str, u64)] = &[
    ("graf_10_3.txt", 1300),
    ("graf_10_5.txt", 1885),
    ("graf_10_6.txt", 2000),
    ("graf_10_7.txt", 2348),
    ("graf_12_3.txt", 1422),
    ("graf_12_5.txt", 2219),
    ("graf_12_6.txt", 2533),
    ("graf_12_9.txt", 3437),
    ("graf_13_9.txt", 3700),
    ("graf_13_12.txt", 4182),
    ("graf_15_4.txt", 2547),
    ("graf_15_5.txt", 2892),
    ("graf_15_6.txt", 3353),
    ("graf_15_8.txt", 3984),
    ("graf_15_12.txt", 5380),
    ("graf_15_14.txt", 5578),
    ("graf_17_10.txt", 5415),
    ("graf_20_16.txt", 9353),
    ("graf_20_17.txt", 9768),
    ("graf_20_19.txt", 10288),
    ("graf_21_15.txt", 9570),
    ("graf_22_17.txt", 11015),
    ("graf_23_20.txt", 12902),
    ("graf_24_23.txt", 14844),
    ("graf_25_16.txt", 12105),
    ("graf_25_22.txt", 15594),
    ("graf_26_25.txt", 17477),
    ("graf_27_19.txt", 15470),
    ("graf_28_24.txt", 18729),
    ("graf_29_26.txt", 20810),
    ("graf_30_25.txt", 21336),
];

/// Optimal weight for a reference instance, looked up by file name.
///
/// Accepts a bare name or a path; only the final component is compared.
pub fn known_optimum(file_name: &str) -> Option<u64> {
    let name = Path::new(file_name).file_name()?.to_str()?;
    KNOWN_OPTIMA
        .iter()
        .find(|(known, _)| *known == name)
        .map(|&(_, weight)| weight)
}
