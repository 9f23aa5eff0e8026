use crate::engine::error::{ModelError, require_positive};

/// A planet embedded in the disk. Mass in grams, semimajor axis in the same
/// length unit as the radial grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planet {
    mass: f64,
    semimajor_axis: f64,
}

impl Planet {
    pub fn new(mass: f64, semimajor_axis: f64) -> Result<Self, ModelError> {
        Ok(Self {
            mass: require_positive("mass", mass)?,
            semimajor_axis: require_positive("semimajor_axis", semimajor_axis)?,
        })
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn semimajor_axis(&self) -> f64 {
        self.semimajor_axis
    }

    /// `a_p * (m_p / (3 M_star))^(1/3)`.
    pub fn hill_radius(&self, stellar_mass: f64) -> f64 {
        self.semimajor_axis * (self.mass / (3.0 * stellar_mass)).cbrt()
    }
}

/// Planets whose gaps are combined multiplicatively; the order is preserved
/// so that errors can name a planet by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanetSet {
    planets: Vec<Planet>,
}

impl PlanetSet {
    pub fn new(planets: Vec<Planet>) -> Self {
        Self { planets }
    }

    /// Pairs `masses[i]` with `radii[i]`.
    pub fn from_parallel(masses: &[f64], radii: &[f64]) -> Result<Self, ModelError> {
        if masses.len() != radii.len() {
            return Err(ModelError::shape(
                "planet masses vs. radii",
                masses.len(),
                radii.len(),
            ));
        }
        let planets = masses
            .iter()
            .zip(radii)
            .enumerate()
            .map(|(i, (&m, &a))| Planet::new(m, a).map_err(|e| e.for_planet(i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { planets })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.planets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Planet> {
        self.planets.iter()
    }

    pub fn as_slice(&self) -> &[Planet] {
        &self.planets
    }
}

impl FromIterator<Planet> for PlanetSet {
    fn from_iter<I: IntoIterator<Item = Planet>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PlanetSet {
    type Item = &'a Planet;
    type IntoIter = std::slice::Iter<'a, Planet>;

    fn into_iter(self) -> Self::IntoIter {
        self.planets.iter()
    }
}
