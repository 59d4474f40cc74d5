use crate::{
    assets::source::rgba8_len,
    foundation::{core::Rgba8Premul, error::SquareResult},
};

/// Square premultiplied RGBA8 raster produced by [`crate::composite`].
#[derive(Clone, PartialEq, Eq)]
pub struct CanvasSurface {
    side: u32,
    rgba8_premul: Vec<u8>,
}

impl CanvasSurface {
    /// A fully transparent `side x side` surface.
    pub(crate) fn transparent(side: u32) -> SquareResult<Self> {
        Ok(Self {
            side,
            rgba8_premul: vec![0u8; rgba8_len(side, side)?],
        })
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Pixel bytes in row-major premultiplied RGBA8.
    pub fn rgba8_premul(&self) -> &[u8] {
        &self.rgba8_premul
    }

    pub(crate) fn rgba8_premul_mut(&mut self) -> &mut [u8] {
        &mut self.rgba8_premul
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.side || y >= self.side {
            return None;
        }
        let i = ((y as usize) * (self.side as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        Some(Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }
}

impl std::fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("side", &self.side)
            .field("rgba8_premul_len", &self.rgba8_premul.len())
            .finish()
    }
}
