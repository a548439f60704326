// standard library
use std::collections::BTreeSet;

// crate modules
use crate::phantom::{Dimensions, Phantom, Pitch};
use crate::statistics::Statistics;

/// Everything known about a single voxel
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Voxel {
    /// Organ tag from the phantom
    pub organ: u32,
    /// PENELOPE material number, 0 if the organ was not in the table
    pub material: u32,
    /// Mass density (g/cm3), 0.0 if the organ was not in the table
    pub density: f64,
}

/// Phantom with every voxel joined to its material and density
///
/// Three parallel arrays share the linear indexing of
/// [Dimensions::index()], so `organs()[i]`, `materials()[i]` and
/// `densities()[i]` all describe the same voxel. The grid is built once by
/// [resolve()](crate::resolve) and is immutable afterwards, writers only ever
/// borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGrid {
    pub(crate) phantom: Phantom,
    pub(crate) organs: Vec<u32>,
    pub(crate) materials: Vec<u32>,
    pub(crate) densities: Vec<f64>,
    pub(crate) unresolved: usize,
    pub(crate) missing_organs: BTreeSet<u32>,
}

impl ResolvedGrid {
    /// Geometry of the phantom
    pub fn phantom(&self) -> &Phantom {
        &self.phantom
    }

    /// Number of voxels along each axis
    pub fn dimensions(&self) -> &Dimensions {
        &self.phantom.dimensions
    }

    /// Voxel widths (cm)
    pub fn pitch(&self) -> &Pitch {
        &self.phantom.pitch
    }

    /// Organ tag of every voxel
    pub fn organs(&self) -> &[u32] {
        &self.organs
    }

    /// Material number of every voxel
    pub fn materials(&self) -> &[u32] {
        &self.materials
    }

    /// Density of every voxel (g/cm3)
    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    /// Total number of voxels
    pub fn len(&self) -> usize {
        self.organs.len()
    }

    /// Never true for a grid built from valid dimensions
    pub fn is_empty(&self) -> bool {
        self.organs.is_empty()
    }

    /// Voxel at a flat index, if in range
    pub fn voxel(&self, index: usize) -> Option<Voxel> {
        Some(Voxel {
            organ: *self.organs.get(index)?,
            material: *self.materials.get(index)?,
            density: *self.densities.get(index)?,
        })
    }

    /// Voxel at 0-based (x, y, z), if in range
    ///
    /// ```rust
    /// # use penvox_organlist::{Organ, OrganTable};
    /// # use penvox_phantom::{resolve, Dimensions, Pitch};
    /// let table = OrganTable::from_organs(vec![
    ///     Organ { organ_id: 1, material_id: 10, density: 1.5 },
    ///     Organ { organ_id: 2, material_id: 20, density: 2.5 },
    /// ])
    /// .unwrap();
    ///
    /// let dims = Dimensions::new(2, 2, 2).unwrap();
    /// let organs = vec![1, 1, 2, 2, 1, 1, 2, 2];
    /// let grid = resolve(organs, dims, Pitch::default(), &table).unwrap();
    ///
    /// let voxel = grid.voxel_at(1, 1, 0).unwrap();
    /// assert_eq!((voxel.organ, voxel.material, voxel.density), (2, 20, 2.5));
    /// assert!(grid.voxel_at(2, 0, 0).is_none());
    /// ```
    pub fn voxel_at(&self, x: usize, y: usize, z: usize) -> Option<Voxel> {
        let dims = self.dimensions();
        if x >= dims.nx || y >= dims.ny || z >= dims.nz {
            return None;
        }
        self.voxel(dims.index(x, y, z))
    }

    /// Number of voxels whose organ was not in the table
    pub fn unresolved(&self) -> usize {
        self.unresolved
    }

    /// Distinct organ tags that were not in the table, ascending
    pub fn missing_organs(&self) -> &BTreeSet<u32> {
        &self.missing_organs
    }

    /// Maximum material, density and organ over the whole grid
    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.materials, &self.densities, &self.organs)
    }
}
