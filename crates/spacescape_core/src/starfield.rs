//! Starfield point cloud
//!
//! Generated once at startup and never mutated afterwards.

use serde::{Serialize, Deserialize};
use spacescape_math::Vec3;

use crate::rng::SceneRng;

/// Color band for star tints
///
/// Each channel is `base + U[0,1) * spread`. The defaults keep stars pale
/// blue-white: blue starts higher and varies less than red/green.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarColorBand {
    pub base: [f32; 3],
    pub spread: [f32; 3],
}

impl Default for StarColorBand {
    fn default() -> Self {
        Self {
            base: [0.8, 0.8, 0.9],
            spread: [0.2, 0.2, 0.1],
        }
    }
}

/// Immutable set of star positions and colors
#[derive(Clone, Debug)]
pub struct StarField {
    positions: Vec<Vec3>,
    colors: Vec<[f32; 3]>,
    extent: f32,
}

impl StarField {
    /// Sample `count` stars uniformly in `[-extent/2, extent/2]^3`
    pub fn generate(count: usize, extent: f32, band: &StarColorBand, rng: &mut SceneRng) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for _ in 0..count {
            positions.push(Vec3::new(
                (rng.unit() - 0.5) * extent,
                (rng.unit() - 0.5) * extent,
                (rng.unit() - 0.5) * extent,
            ));
            colors.push([
                band.base[0] + rng.unit() * band.spread[0],
                band.base[1] + rng.unit() * band.spread[1],
                band.base[2] + rng.unit() * band.spread[2],
            ]);
        }

        log::debug!("Generated {} stars in a cube of extent {}", count, extent);

        Self { positions, colors, extent }
    }

    /// Star positions
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Star colors (RGB)
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Edge length of the bounding cube
    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Number of stars
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the field is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_bounds() {
        let mut rng = SceneRng::new(1);
        let field = StarField::generate(10_000, 1000.0, &StarColorBand::default(), &mut rng);

        assert_eq!(field.len(), 10_000);
        assert_eq!(field.colors().len(), 10_000);
        for p in field.positions() {
            for c in [p.x, p.y, p.z] {
                assert!((-500.0..=500.0).contains(&c), "coordinate {} out of range", c);
            }
        }
    }

    #[test]
    fn test_colors_stay_in_band() {
        let mut rng = SceneRng::new(2);
        let band = StarColorBand::default();
        let field = StarField::generate(10_000, 1000.0, &band, &mut rng);
        let eps = 1e-6;

        for c in field.colors() {
            assert!(c[0] >= 0.8 - eps && c[0] <= 1.0 + eps);
            assert!(c[1] >= 0.8 - eps && c[1] <= 1.0 + eps);
            assert!(c[2] >= 0.9 - eps && c[2] <= 1.0 + eps);
            // Blue never drops below the red/green baseline
            assert!(c[2] >= band.base[0] - eps);
            assert!(c[2] >= band.base[1] - eps);
        }
    }

    #[test]
    fn test_empty_field() {
        let mut rng = SceneRng::new(3);
        let field = StarField::generate(0, 1000.0, &StarColorBand::default(), &mut rng);
        assert!(field.is_empty());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = StarField::generate(64, 10.0, &StarColorBand::default(), &mut SceneRng::new(9));
        let b = StarField::generate(64, 10.0, &StarColorBand::default(), &mut SceneRng::new(9));
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.colors(), b.colors());
    }
}
