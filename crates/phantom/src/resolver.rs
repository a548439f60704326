//! Join organ tags against an organlist
//!
//! Every voxel is an independent hash lookup, so the join is split across
//! threads with rayon. The indexed parallel iterators keep the output in the
//! same order as the input.

// standard library
use std::collections::BTreeSet;

// crate modules
use crate::error::{Error, Result};
use crate::grid::ResolvedGrid;
use crate::phantom::{Dimensions, Phantom, Pitch};

// penvox modules
use penvox_format::Thousands;
use penvox_organlist::OrganTable;

// external crates
use log::{debug, info, warn};
use rayon::prelude::*;

/// Material and density used for voxels whose organ is not in the table
const UNRESOLVED: (u32, f64) = (0, 0.0);

/// Resolve every organ tag to a material and density
///
/// Organs missing from the table never abort the join. Their voxels are
/// given material 0 and density 0.0, counted, and reported with a warning
/// since PENELOPE will not accept material 0.
///
/// Fails if the number of organ tags does not match the dimensions.
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
/// assert_eq!(grid.materials(), &[10, 10, 20, 20, 10, 10, 20, 20]);
/// assert_eq!(grid.unresolved(), 0);
/// ```
pub fn resolve(
    organs: Vec<u32>,
    dimensions: Dimensions,
    pitch: Pitch,
    table: &OrganTable,
) -> Result<ResolvedGrid> {
    let phantom = Phantom::new(dimensions, pitch)?;

    if organs.len() != phantom.number_of_voxels() {
        return Err(Error::VoxelCountMismatch {
            expected: phantom.number_of_voxels(),
            found: organs.len(),
        });
    }

    debug!(
        "Resolving {} voxels against {} organs",
        organs.len().thousands(),
        table.len()
    );

    let (materials, densities): (Vec<u32>, Vec<f64>) = organs
        .par_iter()
        .map(|&organ| table.resolve(organ).unwrap_or(UNRESOLVED))
        .unzip();

    let (unresolved, missing_organs) = organs
        .par_iter()
        .filter(|&&organ| table.resolve(organ).is_none())
        .fold(
            || (0_usize, BTreeSet::new()),
            |(count, mut missing), &organ| {
                missing.insert(organ);
                (count + 1, missing)
            },
        )
        .reduce(
            || (0_usize, BTreeSet::new()),
            |(a, mut missing_a), (b, mut missing_b)| {
                missing_a.append(&mut missing_b);
                (a + b, missing_a)
            },
        );

    if unresolved > 0 {
        warn!(
            "{} voxels have organ ids missing from the organlist {:?}, written as material 0",
            unresolved.thousands(),
            missing_organs
        );
    }

    info!("Resolved {} voxels", organs.len().thousands());

    Ok(ResolvedGrid {
        phantom,
        organs,
        materials,
        densities,
        unresolved,
        missing_organs,
    })
}
