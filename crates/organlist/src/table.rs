// standard library
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::format::OrganlistFormat;
use crate::{reader, writer};

// external crates
use log::warn;
use serde::{Deserialize, Serialize};

/// A single organlist row
///
/// Only the three columns needed for the voxel geometry are kept. Anything
/// else in the file (organ names, comments, ...) is discarded by the reader.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Organ {
    /// Organ tag found in the phantom voxels
    pub organ_id: u32,
    /// PENELOPE material number
    pub material_id: u32,
    /// Mass density (g/cm3)
    pub density: f64,
}

impl std::fmt::Display for Organ {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "organ {} -> material {}, density {}",
            self.organ_id, self.material_id, self.density
        )
    }
}

/// Lookup table from organ tag to (material, density)
///
/// Rows are kept in file order for reporting, and an index keyed by organ id
/// is built once so that [resolve()](OrganTable::resolve) is a hash lookup no
/// matter how large the table is.
///
/// ```rust
/// # use penvox_organlist::{Organ, OrganTable};
/// let table = OrganTable::from_organs(vec![
///     Organ { organ_id: 1, material_id: 10, density: 1.5 },
///     Organ { organ_id: 2, material_id: 20, density: 2.5 },
/// ])
/// .unwrap();
///
/// assert_eq!(table.resolve(2), Some((20, 2.5)));
/// assert_eq!(table.resolve(3), None);
/// ```
#[derive(Debug, Default, Clone)]
pub struct OrganTable {
    organs: Vec<Organ>,
    index: HashMap<u32, usize>,
}

impl OrganTable {
    /// Read an organlist file
    ///
    /// Fails if the file is missing, a row is malformed, an organ id is
    /// repeated, or the number of rows is not `expected_rows`.
    ///
    /// ```rust, no_run
    /// # use penvox_organlist::{OrganTable, OrganlistFormat};
    /// let table = OrganTable::load("organlist.dat", &OrganlistFormat::default(), 141).unwrap();
    /// ```
    pub fn load<P: AsRef<Path>>(
        path: P,
        format: &OrganlistFormat,
        expected_rows: usize,
    ) -> Result<Self> {
        let path = path.as_ref();
        let rows = reader::read_rows(path, format)?;

        if rows.len() != expected_rows {
            return Err(Error::RowCountMismatch {
                path: path.to_path_buf(),
                expected: expected_rows,
                found: rows.len(),
            });
        }

        Self::from_rows(rows)
    }

    /// Build a table directly from organ entries
    ///
    /// Row numbers stand in for line numbers in any duplicate id error.
    pub fn from_organs(organs: Vec<Organ>) -> Result<Self> {
        Self::from_rows(
            organs
                .into_iter()
                .enumerate()
                .map(|(i, organ)| (i + 1, organ))
                .collect(),
        )
    }

    fn from_rows(rows: Vec<(usize, Organ)>) -> Result<Self> {
        let mut index = HashMap::with_capacity(rows.len());
        let mut lines = Vec::with_capacity(rows.len());
        let mut organs = Vec::with_capacity(rows.len());

        for (line, organ) in rows {
            match index.entry(organ.organ_id) {
                Entry::Occupied(existing) => {
                    return Err(Error::DuplicateOrganId {
                        organ_id: organ.organ_id,
                        first_line: lines[*existing.get()],
                        second_line: line,
                    })
                }
                Entry::Vacant(slot) => {
                    slot.insert(organs.len());
                }
            }

            if organ.material_id == 0 {
                warn!(
                    "Organ {} uses material 0, which PENELOPE does not accept",
                    organ.organ_id
                );
            }

            lines.push(line);
            organs.push(organ);
        }

        Ok(Self { organs, index })
    }

    /// Material and density for an organ tag, if the organ is in the table
    pub fn resolve(&self, organ_id: u32) -> Option<(u32, f64)> {
        self.index.get(&organ_id).map(|&i| {
            let organ = &self.organs[i];
            (organ.material_id, organ.density)
        })
    }

    /// All rows in file order
    pub fn organs(&self) -> &[Organ] {
        &self.organs
    }

    /// Number of organs in the table
    pub fn len(&self) -> usize {
        self.organs.len()
    }

    /// True if there are no organs at all
    pub fn is_empty(&self) -> bool {
        self.organs.is_empty()
    }

    /// Largest material number referenced by the table
    pub fn max_material_id(&self) -> Option<u32> {
        self.organs.iter().map(|o| o.material_id).max()
    }

    /// Check for any negative density
    ///
    /// Negative densities are never fixed silently. The caller decides whether
    /// to [absolutize_densities()](OrganTable::absolutize_densities) or stop.
    pub fn has_negative_densities(&self) -> bool {
        self.organs.iter().any(|o| o.density < 0.0)
    }

    /// Every organ with a negative density, in file order
    pub fn negative_densities(&self) -> Vec<&Organ> {
        self.organs.iter().filter(|o| o.density < 0.0).collect()
    }

    /// Replace every density with its absolute value
    ///
    /// Returns the number of densities that changed.
    ///
    /// ```rust
    /// # use penvox_organlist::{Organ, OrganTable};
    /// let mut table = OrganTable::from_organs(vec![
    ///     Organ { organ_id: 1, material_id: 1, density: -1.04 },
    ///     Organ { organ_id: 2, material_id: 2, density: 0.92 },
    /// ])
    /// .unwrap();
    ///
    /// assert!(table.has_negative_densities());
    /// assert_eq!(table.absolutize_densities(), 1);
    /// assert_eq!(table.resolve(1), Some((1, 1.04)));
    /// ```
    pub fn absolutize_densities(&mut self) -> usize {
        let mut changed = 0;
        for organ in self.organs.iter_mut().filter(|o| o.density < 0.0) {
            organ.density = organ.density.abs();
            changed += 1;
        }
        changed
    }

    /// Write the normalised audit echo of the table to `path`
    ///
    /// See [write_audit()](crate::write_audit) for the format.
    pub fn write_audit<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        writer::write_audit(self, path)
    }
}
