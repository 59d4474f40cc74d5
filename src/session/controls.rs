use crate::compose::params::clamp_input;

/// A coarse slider and a precise numeric field bound to the same parameter.
///
/// Both widgets always hold the same validated value after any update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlPair {
    slider: i32,
    field: i32,
    min: i32,
    max: i32,
}

impl ControlPair {
    pub fn new(min: i32, max: i32, initial: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut pair = Self {
            slider: min,
            field: min,
            min,
            max,
        };
        pair.reset(initial);
        pair
    }

    /// Slider moved; the field follows.
    pub fn slide(&mut self, value: i32) -> i32 {
        self.sync(value.clamp(self.min, self.max))
    }

    /// Field text entered (typing or final commit); the slider follows.
    pub fn enter_field(&mut self, raw: &str) -> i32 {
        self.sync(clamp_input(raw, self.min, self.max))
    }

    pub fn reset(&mut self, value: i32) {
        self.sync(value.clamp(self.min, self.max));
    }

    pub fn value(&self) -> i32 {
        self.slider
    }

    pub fn slider(&self) -> i32 {
        self.slider
    }

    pub fn field(&self) -> i32 {
        self.field
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    fn sync(&mut self, value: i32) -> i32 {
        self.slider = value;
        self.field = value;
        value
    }
}

/// Which controls accept input right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ControlStates {
    pub file_input: bool,
    pub fill_mode: bool,
    pub blur: bool,
    pub scale: bool,
    pub reset: bool,
    pub export: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/session/controls.rs"]
mod tests;
