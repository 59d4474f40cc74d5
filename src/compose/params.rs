/// Inclusive bounds of the blur radius controls, in pixels.
pub const BLUR_RADIUS_MIN: i32 = 0;
pub const BLUR_RADIUS_MAX: i32 = 50;
/// Inclusive bounds of the foreground scale controls, in percent of natural size.
pub const SCALE_PERCENT_MIN: i32 = 10;
pub const SCALE_PERCENT_MAX: i32 = 100;

pub const DEFAULT_BLUR_RADIUS_PX: i32 = 20;
pub const DEFAULT_SCALE_PERCENT: i32 = 100;

/// How the part of the square not covered by the foreground is painted.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Blurred, cover-fit copy of the source.
    #[default]
    Blur,
    White,
    Black,
    Transparent,
}

impl FillMode {
    pub const ALL: [FillMode; 4] = [
        FillMode::Blur,
        FillMode::White,
        FillMode::Black,
        FillMode::Transparent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FillMode::Blur => "blur",
            FillMode::White => "white",
            FillMode::Black => "black",
            FillMode::Transparent => "transparent",
        }
    }
}

impl std::fmt::Display for FillMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a single composite. Re-created for every render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositeParams {
    pub fill_mode: FillMode,
    /// Only read when `fill_mode` is [`FillMode::Blur`].
    pub blur_radius_px: i32,
    pub scale_percent: i32,
}

impl Default for CompositeParams {
    fn default() -> Self {
        Self {
            fill_mode: FillMode::default(),
            blur_radius_px: DEFAULT_BLUR_RADIUS_PX,
            scale_percent: DEFAULT_SCALE_PERCENT,
        }
    }
}

impl CompositeParams {
    /// Clamp every numeric field into its control range.
    pub fn sanitized(self) -> Self {
        Self {
            fill_mode: self.fill_mode,
            blur_radius_px: clamp_int(
                i64::from(self.blur_radius_px),
                BLUR_RADIUS_MIN,
                BLUR_RADIUS_MAX,
            ),
            scale_percent: clamp_int(
                i64::from(self.scale_percent),
                SCALE_PERCENT_MIN,
                SCALE_PERCENT_MAX,
            ),
        }
    }

    /// Whether the blurred background is actually drawn.
    pub fn draws_blurred_background(&self) -> bool {
        self.fill_mode == FillMode::Blur && self.blur_radius_px > 0
    }
}

/// Validate raw widget text: parse its leading integer, fall back to `min` when there is none,
/// then clamp into `[min, max]`.
///
/// Parsing skips leading whitespace, accepts one sign and stops at the first non-digit, so
/// `"12px"` reads as 12 and `"3.9"` as 3.
pub fn clamp_input(raw: &str, min: i32, max: i32) -> i32 {
    match parse_leading_int(raw) {
        Some(v) => clamp_int(v, min, max),
        None => clamp_int(i64::from(min), min, max),
    }
}

/// Numeric flavour of [`clamp_input`]: truncates toward zero, NaN becomes `min`.
pub fn clamp_value(value: f64, min: i32, max: i32) -> i32 {
    if value.is_nan() {
        return clamp_int(i64::from(min), min, max);
    }
    let (lo, hi) = ordered(min, max);
    value.trunc().clamp(f64::from(lo), f64::from(hi)) as i32
}

fn clamp_int(value: i64, min: i32, max: i32) -> i32 {
    let (lo, hi) = ordered(min, max);
    value.clamp(i64::from(lo), i64::from(hi)) as i32
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a <= b { (a, b) } else { (b, a) }
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut seen = false;
    let mut acc: i64 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        acc = acc.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if !seen {
        return None;
    }
    Some(if negative { -acc } else { acc })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/params.rs"]
mod tests;
