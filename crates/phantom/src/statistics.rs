// penvox modules
use penvox_format::{f, NumFormat};

// external crates
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Maximum values over a resolved grid
///
/// Used for the summary printed after resolution and to compare against the
/// number of materials declared for the simulation. Empty inputs give zeros.
///
/// ```rust
/// # use penvox_phantom::Statistics;
/// let stats = Statistics::compute(&[10, 20, 10], &[1.5, 2.5, 1.5], &[1, 2, 1]);
/// assert_eq!(stats.max_material, 20);
/// assert_eq!(stats.max_density, 2.5);
/// assert_eq!(stats.max_organ, 2);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Largest material number
    pub max_material: u32,
    /// Largest density (g/cm3)
    pub max_density: f64,
    /// Largest organ tag
    pub max_organ: u32,
}

impl Statistics {
    /// Reduce the three voxel arrays to their maxima
    pub fn compute(materials: &[u32], densities: &[f64], organs: &[u32]) -> Self {
        Self {
            max_material: materials.par_iter().copied().max().unwrap_or(0),
            max_density: densities
                .par_iter()
                .copied()
                .max_by(|a, b| a.total_cmp(b))
                .unwrap_or(0.0),
            max_organ: organs.par_iter().copied().max().unwrap_or(0),
        }
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Statistics {\n".to_string();
        s += &f!("    max material: {}\n", self.max_material);
        s += &f!("    max density: {} g/cm3\n", self.max_density.sci(5, 2));
        s += &f!("    max organ: {}\n}}", self.max_organ);

        write!(f, "{}", s)
    }
}
