// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Sequential color scales used for rendering the heatmap.

use palette::{Mix, Srgb};

/// Stops of the ColorBrewer 'RdPu' sequential scale (light to dark).
const RDPU: [Srgb<u8>; 9] = [
    Srgb::new(0xff, 0xf7, 0xf3),
    Srgb::new(0xfd, 0xe0, 0xdd),
    Srgb::new(0xfc, 0xc5, 0xc0),
    Srgb::new(0xfa, 0x9f, 0xb5),
    Srgb::new(0xf7, 0x68, 0xa1),
    Srgb::new(0xdd, 0x34, 0x97),
    Srgb::new(0xae, 0x01, 0x7e),
    Srgb::new(0x7a, 0x01, 0x77),
    Srgb::new(0x49, 0x00, 0x6a),
];

/// Perceptual sequential color scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    /// White through pink to dark purple.
    #[default]
    RdPu,
}

impl Colormap {
    #[inline(always)]
    fn stops(&self) -> &'static [Srgb<u8>] {
        match self {
            Colormap::RdPu => &RDPU,
        }
    }

    /// Get the color corresponding to the relative position `t` on the scale.
    /// `t` is clamped into the range [0, 1]; 0 corresponds to the lightest color.
    pub fn color(&self, t: f64) -> (u8, u8, u8) {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let position = t * (stops.len() - 1) as f64;
        let index = (position.floor() as usize).min(stops.len() - 2);
        let factor = (position - index as f64) as f32;

        let low: Srgb<f32> = stops[index].into_format();
        let high: Srgb<f32> = stops[index + 1].into_format();
        let color: Srgb<u8> = low.mix(high, factor).into_format();
        (color.red, color.green, color.blue)
    }
}
