//! Material descriptions

use bitflags::bitflags;
use spacescape_math::{hex_to_rgb, hsl_to_rgb};

bitflags! {
    /// Render-state flags for a material
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MaterialFlags: u8 {
        /// Alpha blended, drawn after opaque geometry without depth writes
        const TRANSPARENT = 1 << 0;
        /// Additive blending (implies transparent ordering)
        const ADDITIVE = 1 << 1;
        /// Both faces are rasterized
        const DOUBLE_SIDED = 1 << 2;
        /// Per-vertex colors multiply the base color
        const VERTEX_COLORS = 1 << 3;
        /// Lighting is skipped
        const UNLIT = 1 << 4;
        /// Color comes from the surface normal
        const NORMAL_SHADED = 1 << 5;
    }
}

/// Base color plus render-state flags
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialDesc {
    /// Linear RGBA; alpha is the opacity for transparent materials
    pub color: [f32; 4],
    pub flags: MaterialFlags,
}

impl MaterialDesc {
    /// Opaque lit material
    pub fn lit(rgb: [f32; 3]) -> Self {
        Self {
            color: [rgb[0], rgb[1], rgb[2], 1.0],
            flags: MaterialFlags::empty(),
        }
    }

    /// Opaque unlit material
    pub fn unlit(rgb: [f32; 3]) -> Self {
        Self {
            color: [rgb[0], rgb[1], rgb[2], 1.0],
            flags: MaterialFlags::UNLIT,
        }
    }

    /// Material colored by surface normal
    pub fn normal_shaded() -> Self {
        Self {
            color: [1.0; 4],
            flags: MaterialFlags::NORMAL_SHADED | MaterialFlags::UNLIT,
        }
    }

    /// Torus knot material
    pub fn knot() -> Self {
        Self::normal_shaded()
    }

    /// Sun material: unlit, warm pale yellow
    pub fn sun() -> Self {
        Self::unlit(hsl_to_rgb(0.1, 0.9, 0.9))
    }

    /// Planet material for a hue in `0..1`
    pub fn planet(hue: f32) -> Self {
        Self::lit(hsl_to_rgb(hue, 0.8, 0.8))
    }

    /// Planet glow shell: pale blue, additive, 30% opacity
    pub fn planet_glow() -> Self {
        let rgb = hex_to_rgb(0x88ccff);
        Self {
            color: [rgb[0], rgb[1], rgb[2], 0.3],
            flags: MaterialFlags::TRANSPARENT | MaterialFlags::ADDITIVE | MaterialFlags::UNLIT,
        }
    }

    /// Butterfly wing: double-sided, translucent
    pub fn wing(hue: f32) -> Self {
        let rgb = hsl_to_rgb(hue, 0.9, 0.6);
        Self {
            color: [rgb[0], rgb[1], rgb[2], 0.7],
            flags: MaterialFlags::TRANSPARENT | MaterialFlags::DOUBLE_SIDED,
        }
    }

    /// Star points: vertex-colored, translucent
    pub fn stars() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 0.8],
            flags: MaterialFlags::TRANSPARENT | MaterialFlags::VERTEX_COLORS | MaterialFlags::UNLIT,
        }
    }

    /// Check if the material needs blending
    pub fn is_transparent(&self) -> bool {
        self.flags.intersects(MaterialFlags::TRANSPARENT | MaterialFlags::ADDITIVE)
    }
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self::lit([1.0, 1.0, 1.0])
    }
}
