// penvox modules
use penvox_format::{f, Thousands};

// crate modules
use crate::error::{Error, Result};

// external crates
use serde::{Deserialize, Serialize};

/// Number of voxels along each axis
///
/// Every component addresses voxels through [index()](Dimensions::index) and
/// [coordinates()](Dimensions::coordinates), with `x` varying fastest, then
/// `y`, then `z`.
///
/// ```text
/// index = x + nx * (y + ny * z)        (0-based x, y, z)
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Number of voxels in x
    pub nx: usize,
    /// Number of voxels in y
    pub ny: usize,
    /// Number of voxels in z
    pub nz: usize,
}

impl Dimensions {
    /// Checked constructor, every axis must have at least one voxel
    ///
    /// ```rust
    /// # use penvox_phantom::Dimensions;
    /// assert!(Dimensions::new(299, 137, 348).is_ok());
    /// assert!(Dimensions::new(299, 0, 348).is_err());
    /// ```
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self> {
        let dimensions = Self { nx, ny, nz };
        dimensions.validate()?;
        Ok(dimensions)
    }

    /// Make sure no axis is empty and the voxel count fits in a `usize`
    pub fn validate(&self) -> Result<()> {
        if self.nx == 0 || self.ny == 0 || self.nz == 0 {
            return Err(Error::InvalidDimensions {
                nx: self.nx,
                ny: self.ny,
                nz: self.nz,
            });
        }

        if self.checked_total().is_none() {
            return Err(Error::VoxelCountOverflow {
                nx: self.nx,
                ny: self.ny,
                nz: self.nz,
            });
        }

        Ok(())
    }

    /// Total number of voxels, or `None` if the product overflows
    ///
    /// ```rust
    /// # use penvox_phantom::Dimensions;
    /// assert_eq!(Dimensions { nx: 2, ny: 3, nz: 4 }.checked_total(), Some(24));
    /// assert_eq!(Dimensions { nx: usize::MAX, ny: 2, nz: 1 }.checked_total(), None);
    /// ```
    pub fn checked_total(&self) -> Option<usize> {
        self.nx.checked_mul(self.ny)?.checked_mul(self.nz)
    }

    /// Total number of voxels
    ///
    /// Saturates at `usize::MAX` for dimensions that fail
    /// [validate()](Dimensions::validate).
    pub fn total(&self) -> usize {
        self.checked_total().unwrap_or(usize::MAX)
    }

    /// Flat array index of the voxel at 0-based (x, y, z)
    ///
    /// ```rust
    /// # use penvox_phantom::Dimensions;
    /// let dims = Dimensions { nx: 2, ny: 3, nz: 4 };
    /// assert_eq!(dims.index(0, 0, 0), 0);
    /// assert_eq!(dims.index(1, 0, 0), 1);
    /// assert_eq!(dims.index(0, 1, 0), 2);
    /// assert_eq!(dims.index(0, 0, 1), 6);
    /// assert_eq!(dims.index(1, 2, 3), 23);
    /// ```
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.nx * (y + self.ny * z)
    }

    /// 0-based (x, y, z) of a flat array index
    ///
    /// The reverse of [index()](Dimensions::index).
    ///
    /// ```rust
    /// # use penvox_phantom::Dimensions;
    /// let dims = Dimensions { nx: 2, ny: 3, nz: 4 };
    /// assert_eq!(dims.coordinates(23), (1, 2, 3));
    /// assert_eq!(dims.coordinates(6), (0, 0, 1));
    /// ```
    #[inline]
    pub fn coordinates(&self, index: usize) -> (usize, usize, usize) {
        let plane = self.nx * self.ny;
        let z = index / plane;
        let y = (index - z * plane) / self.nx;
        let x = index - z * plane - y * self.nx;
        (x, y, z)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}

/// Size of a single voxel along each axis (cm)
///
/// Only used to work out the physical extent of the phantom for file headers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pitch {
    /// Voxel width in x (cm)
    pub x: f64,
    /// Voxel width in y (cm)
    pub y: f64,
    /// Voxel width in z (cm)
    pub z: f64,
}

impl Default for Pitch {
    fn default() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }
}

impl Pitch {
    /// Checked constructor, every width must be positive and finite
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        let pitch = Self { x, y, z };
        pitch.validate()?;
        Ok(pitch)
    }

    /// Make sure every width is positive and finite
    pub fn validate(&self) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(self.x) && valid(self.y) && valid(self.z)) {
            return Err(Error::InvalidPitch {
                x: self.x,
                y: self.y,
                z: self.z,
            });
        }
        Ok(())
    }
}

/// Geometry of a voxel phantom
///
/// Pairs the [Dimensions] with the voxel [Pitch] and provides the summary
/// printed before a conversion starts.
///
/// ```rust
/// # use penvox_phantom::{Dimensions, Phantom, Pitch};
/// let phantom = Phantom {
///     dimensions: Dimensions { nx: 299, ny: 137, nz: 348 },
///     pitch: Pitch { x: 0.21, y: 0.21, z: 0.8 },
/// };
///
/// assert_eq!(phantom.number_of_voxels(), 14_255_244);
/// println!("{phantom}");
/// ```
///
/// ```text
/// Phantom {
///     voxels: 14,255,244 (299x137x348)
///     pitch: 0.21000 0.21000 0.80000 cm
///     size: 62.79000 28.77000 278.40000 cm
/// }
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phantom {
    /// Number of voxels along each axis
    pub dimensions: Dimensions,
    /// Voxel widths (cm)
    pub pitch: Pitch,
}

impl Phantom {
    /// Validated geometry
    pub fn new(dimensions: Dimensions, pitch: Pitch) -> Result<Self> {
        dimensions.validate()?;
        pitch.validate()?;
        Ok(Self { dimensions, pitch })
    }

    /// Total number of voxels
    pub fn number_of_voxels(&self) -> usize {
        self.dimensions.total()
    }

    /// Physical size along (x, y, z), i.e. `pitch * voxels` per axis (cm)
    ///
    /// ```rust
    /// # use penvox_phantom::{Dimensions, Phantom, Pitch};
    /// let phantom = Phantom {
    ///     dimensions: Dimensions { nx: 2, ny: 4, nz: 10 },
    ///     pitch: Pitch { x: 0.5, y: 0.25, z: 2.0 },
    /// };
    /// assert_eq!(phantom.extents(), [1.0, 1.0, 20.0]);
    /// ```
    pub fn extents(&self) -> [f64; 3] {
        [
            self.pitch.x * self.dimensions.nx as f64,
            self.pitch.y * self.dimensions.ny as f64,
            self.pitch.z * self.dimensions.nz as f64,
        ]
    }
}

impl std::fmt::Display for Phantom {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [lx, ly, lz] = self.extents();
        let mut s = "Phantom {\n".to_string();
        s += &f!(
            "    voxels: {} ({})\n",
            self.number_of_voxels().thousands(),
            self.dimensions
        );
        s += &f!(
            "    pitch: {:.5} {:.5} {:.5} cm\n",
            self.pitch.x,
            self.pitch.y,
            self.pitch.z
        );
        s += &f!("    size: {lx:.5} {ly:.5} {lz:.5} cm\n}}");

        write!(f, "{}", s)
    }
}
