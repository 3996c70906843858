//! Fixed layout of the diamonds dataset

/// Columns in the order the reference CSV provides them
pub const ORIGINAL_COLUMNS: [&str; 10] = [
    "carat", "cut", "color", "clarity", "depth", "table", "price", "x", "y", "z",
];

/// Numeric attributes in frame order
pub const NUMERIC_COLUMNS: [&str; 7] = ["carat", "depth", "table", "price", "x", "y", "z"];

/// Categorical attributes in frame order
pub const CATEGORICAL_COLUMNS: [&str; 3] = ["cut", "color", "clarity"];

/// Cut grades from worst to best
pub const CUT_ORDER: [&str; 5] = ["Fair", "Good", "Very Good", "Premium", "Ideal"];

/// Color grades, D (colorless) first
pub const COLOR_ORDER: [&str; 7] = ["D", "E", "F", "G", "H", "I", "J"];

/// Clarity grades from best to worst
pub const CLARITY_ORDER: [&str; 8] = ["IF", "VVS1", "VVS2", "VS1", "VS2", "SI1", "SI2", "I1"];

pub const PRICE_PER_CARAT: &str = "price_per_carat";
pub const CARAT_BIN: &str = "carat_bin";

/// Shape of the published reference dataset
pub const REFERENCE_ROWS: usize = 53_940;

/// Known domain of a categorical attribute, `None` for anything else.
pub fn category_domain(column: &str) -> Option<&'static [&'static str]> {
    match column {
        "cut" => Some(&CUT_ORDER),
        "color" => Some(&COLOR_ORDER),
        "clarity" => Some(&CLARITY_ORDER),
        _ => None,
    }
}

/// Clarity grades sorted by name, the order the violin chart uses.
pub fn clarity_by_name() -> Vec<&'static str> {
    let mut grades = CLARITY_ORDER.to_vec();
    grades.sort_unstable();
    grades
}
