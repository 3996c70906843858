//! Chart colors

use plotters::style::RGBColor;

/// Ten distinguishable category colors
pub const CATEGORY_COLORS: [RGBColor; 10] = [
    RGBColor(76, 114, 176),
    RGBColor(221, 132, 82),
    RGBColor(85, 168, 104),
    RGBColor(196, 78, 82),
    RGBColor(129, 114, 179),
    RGBColor(147, 120, 96),
    RGBColor(218, 139, 195),
    RGBColor(140, 140, 140),
    RGBColor(204, 185, 116),
    RGBColor(100, 181, 205),
];

pub const HIST_FILL: RGBColor = RGBColor(76, 114, 176);
pub const HIST_LINE: RGBColor = RGBColor(40, 62, 110);

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

pub fn category_color(index: usize) -> RGBColor {
    CATEGORY_COLORS[index % CATEGORY_COLORS.len()]
}

/// Diverging blue-grey-red map over [-1, 1]; NaN maps to neutral grey
pub fn coolwarm(value: f64) -> RGBColor {
    if value.is_nan() {
        return rgb(NEUTRAL);
    }
    let v = value.clamp(-1.0, 1.0);
    if v < 0.0 {
        lerp(NEUTRAL, COOL, -v)
    } else {
        lerp(NEUTRAL, WARM, v)
    }
}

fn lerp(from: (f64, f64, f64), to: (f64, f64, f64), t: f64) -> RGBColor {
    let mix = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

fn rgb(c: (f64, f64, f64)) -> RGBColor {
    RGBColor(c.0 as u8, c.1 as u8, c.2 as u8)
}
