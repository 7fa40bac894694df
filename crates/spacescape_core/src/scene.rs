//! Scene layout serialization
//!
//! A [`SceneLayout`] is the explicit per-entity configuration of the
//! vignette: the sun, the ordered planet records, the starfield, the swarm,
//! the torus knot and the astronaut model. Layouts are read from RON files
//! and validated before a [`World`](crate::World) is built from them.

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::starfield::StarColorBand;
use crate::tunables::SwarmSpawn;

/// The central sun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunSpec {
    /// Sphere radius
    pub radius: f32,
    /// Texture path, loaded in the background
    #[serde(default)]
    pub texture: Option<String>,
}

impl Default for SunSpec {
    fn default() -> Self {
        Self {
            radius: 3.0,
            texture: None,
        }
    }
}

/// One planet record: orbit slot parameters in creation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSpec {
    /// Orbit radius around the origin
    pub radius: f32,
    /// Visual sphere radius
    pub size: f32,
    /// Texture path, loaded in the background
    #[serde(default)]
    pub texture: Option<String>,
}

impl PlanetSpec {
    /// Create an untextured planet record
    pub fn new(radius: f32, size: f32) -> Self {
        Self {
            radius,
            size,
            texture: None,
        }
    }
}

/// Starfield parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarSpec {
    pub count: usize,
    /// Edge length of the cube the stars fill
    pub extent: f32,
    pub colors: StarColorBand,
}

impl Default for StarSpec {
    fn default() -> Self {
        Self {
            count: 10_000,
            extent: 1000.0,
            colors: StarColorBand::default(),
        }
    }
}

/// Butterfly swarm parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmSpec {
    pub count: usize,
    pub spawn: SwarmSpawn,
}

impl Default for SwarmSpec {
    fn default() -> Self {
        Self {
            count: 20,
            spawn: SwarmSpawn::default(),
        }
    }
}

/// Torus knot parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnotSpec {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    /// Winding around the axis of rotational symmetry
    pub p: u32,
    /// Winding around the interior circle of the torus
    pub q: u32,
}

impl Default for KnotSpec {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube: 0.3,
            tubular_segments: 100,
            radial_segments: 16,
            p: 2,
            q: 3,
        }
    }
}

/// Astronaut model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AstronautSpec {
    /// Model path; `None` leaves the slot permanently unloaded
    pub model: Option<String>,
    /// Uniform scale applied to the loaded model
    pub scale: f32,
}

impl Default for AstronautSpec {
    fn default() -> Self {
        Self {
            model: None,
            scale: 0.5,
        }
    }
}

/// A serializable description of every entity in the vignette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    /// Layout name (for display/debugging)
    pub name: String,
    #[serde(default)]
    pub sun: SunSpec,
    /// Planet records; index `i` orbits at speed factor `i + 1`
    pub planets: Vec<PlanetSpec>,
    #[serde(default)]
    pub stars: StarSpec,
    #[serde(default)]
    pub butterflies: SwarmSpec,
    #[serde(default)]
    pub knot: KnotSpec,
    #[serde(default)]
    pub astronaut: AstronautSpec,
}

impl SceneLayout {
    /// Create an empty layout with default sun, stars, swarm and knot
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sun: SunSpec::default(),
            planets: Vec::new(),
            stars: StarSpec::default(),
            butterflies: SwarmSpec::default(),
            knot: KnotSpec::default(),
            astronaut: AstronautSpec::default(),
        }
    }

    /// The eight-planet solar system
    pub fn solar_system() -> Self {
        const RADII: [f32; 8] = [5.0, 8.0, 11.0, 14.0, 20.0, 26.0, 32.0, 38.0];
        const SIZES: [f32; 8] = [0.4, 0.6, 0.6, 0.5, 1.2, 1.0, 0.8, 0.8];

        let mut layout = Self::new("Solar System");
        for (&radius, &size) in RADII.iter().zip(SIZES.iter()) {
            layout.add_planet(PlanetSpec::new(radius, size));
        }
        layout
    }

    /// Load a layout from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let layout = ron::from_str(&contents)?;
        Ok(layout)
    }

    /// Append a planet record
    pub fn add_planet(&mut self, planet: PlanetSpec) {
        self.planets.push(planet);
    }

    /// Set the astronaut model path
    pub fn with_astronaut_model(mut self, path: impl Into<String>) -> Self {
        self.astronaut.model = Some(path.into());
        self
    }

    /// Reject non-positive sizes, radii, extents and speeds
    pub fn validate(&self) -> Result<(), SceneError> {
        positive("sun radius", self.sun.radius)?;
        for (i, planet) in self.planets.iter().enumerate() {
            positive(&format!("planet {} orbit radius", i), planet.radius)?;
            positive(&format!("planet {} size", i), planet.size)?;
        }
        positive("star extent", self.stars.extent)?;

        let spawn = &self.butterflies.spawn;
        positive("swarm extent", spawn.extent)?;
        range("wing frequency", spawn.wing_frequency)?;
        range("flight speed", spawn.flight_speed)?;

        positive("knot radius", self.knot.radius)?;
        positive("knot tube", self.knot.tube)?;
        if self.knot.tubular_segments < 3 || self.knot.radial_segments < 3 {
            return Err(SceneError::Invalid(
                "knot needs at least 3 tubular and radial segments".to_string(),
            ));
        }
        positive("astronaut scale", self.astronaut.scale)?;
        Ok(())
    }
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self::solar_system()
    }
}

fn positive(what: &str, value: f32) -> Result<(), SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::Invalid(format!("{} must be positive, got {}", what, value)))
    }
}

fn range(what: &str, bounds: [f32; 2]) -> Result<(), SceneError> {
    positive(what, bounds[0])?;
    if bounds[1] < bounds[0] {
        return Err(SceneError::Invalid(format!(
            "{} range is inverted: [{}, {}]",
            what, bounds[0], bounds[1]
        )));
    }
    Ok(())
}

/// Error loading a scene layout
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error building a scene
#[derive(Debug)]
pub enum SceneError {
    /// The layout file could not be read or parsed
    Load(SceneLoadError),
    /// A procedural parameter is out of range
    Invalid(String),
}

impl From<SceneLoadError> for SceneError {
    fn from(e: SceneLoadError) -> Self {
        SceneError::Load(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Load(e) => write!(f, "Scene load failed: {}", e),
            SceneError::Invalid(msg) => write!(f, "Invalid scene: {}", msg),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Load(e) => Some(e),
            SceneError::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_solar_system_layout() {
        let layout = SceneLayout::solar_system();
        assert_eq!(layout.planets.len(), 8);
        assert_eq!(layout.planets[0], PlanetSpec::new(5.0, 0.4));
        assert_eq!(layout.planets[7], PlanetSpec::new(38.0, 0.8));
        assert_eq!(layout.stars.count, 10_000);
        assert_eq!(layout.butterflies.count, 20);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_negative_radius_rejected() {
        let mut layout = SceneLayout::solar_system();
        layout.planets[3].radius = -1.0;
        match layout.validate() {
            Err(SceneError::Invalid(msg)) => assert!(msg.contains("planet 3")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut layout = SceneLayout::solar_system();
        layout.sun.radius = 0.0;
        assert!(matches!(layout.validate(), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn test_inverted_speed_range_rejected() {
        let mut layout = SceneLayout::solar_system();
        layout.butterflies.spawn.flight_speed = [0.05, 0.02];
        assert!(matches!(layout.validate(), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn test_nan_rejected() {
        let mut layout = SceneLayout::solar_system();
        layout.stars.extent = f32::NAN;
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_parse_minimal_ron() {
        let ron = r#"(
            name: "Tiny",
            planets: [
                (radius: 5.0, size: 0.4, texture: Some("textures/planet1.jpg")),
                (radius: 8.0, size: 0.6),
            ],
        )"#;
        let layout: SceneLayout = ron::from_str(ron).unwrap();
        assert_eq!(layout.name, "Tiny");
        assert_eq!(layout.planets.len(), 2);
        assert_eq!(layout.planets[0].texture.as_deref(), Some("textures/planet1.jpg"));
        assert_eq!(layout.planets[1].texture, None);
        assert_eq!(layout.sun.radius, 3.0);
        assert_eq!(layout.knot.tubular_segments, 100);
        assert_eq!(layout.astronaut.scale, 0.5);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"(name: "File", planets: [(radius: 2.0, size: 0.1)])"#).unwrap();
        let layout = SceneLayout::load(file.path()).unwrap();
        assert_eq!(layout.name, "File");
        assert_eq!(layout.planets[0].radius, 2.0);
    }

    #[test]
    fn test_load_missing_file() {
        let result = SceneLayout::load("/nonexistent/layout.ron");
        assert!(matches!(result, Err(SceneLoadError::Io(_))));
    }

    #[test]
    fn test_load_invalid_ron() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(name: ").unwrap();
        let result = SceneLayout::load(file.path());
        assert!(matches!(result, Err(SceneLoadError::Parse(_))));
    }

    #[test]
    fn test_error_display() {
        let err = SceneError::Invalid("planet 0 size must be positive, got 0".to_string());
        assert!(format!("{}", err).contains("Invalid scene"));
    }
}
