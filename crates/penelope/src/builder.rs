// standard library
use std::path::PathBuf;

// crate modules
use crate::config::{Config, DensityPolicy, ProjectionPaths};

// penvox modules
use penvox_organlist::OrganlistFormat;
use penvox_phantom::{Dimensions, Encoding, Pitch};

/// Builder implementation for [Config]
///
/// The fields of [Config] are left public for direct use but the module also
/// implements a builder for chained setter calls. Any number of parameters
/// can be set this way (including none), and anything not set keeps its
/// default.
///
/// ```rust
/// # use penvox_penelope::{Config, DensityPolicy};
/// # use penvox_phantom::{Dimensions, Encoding, Pitch};
/// let config = Config::builder()
///     .phantom("AF/AF.dat")
///     .encoding(Encoding::Ascii)
///     .dimensions(Dimensions { nx: 299, ny: 137, nz: 348 })
///     .pitch(Pitch { x: 0.1775, y: 0.1775, z: 0.484 })
///     .n_materials(53)
///     .n_organs(141)
///     .organlist("AF/AF_organs.dat")
///     .density_policy(DensityPolicy::Absolutize)
///     .build();
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [Config] type
    ///
    /// Nothing is checked here, see [Config::validate()].
    pub fn build(self) -> Config {
        self.config
    }

    /// Raw phantom file
    pub fn phantom<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.phantom = path.into();
        self
    }

    /// Encoding of the raw phantom file, binary by default
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.config.encoding = encoding;
        self
    }

    /// Number of voxels along each axis
    pub fn dimensions(mut self, dimensions: Dimensions) -> Self {
        self.config.dimensions = dimensions;
        self
    }

    /// Voxel widths (cm), 1 cm cubes by default
    pub fn pitch(mut self, pitch: Pitch) -> Self {
        self.config.pitch = pitch;
        self
    }

    /// Number of materials declared for the simulation
    ///
    /// Must be more than 1 for PENELOPE to accept the geometry.
    pub fn n_materials(mut self, n_materials: u32) -> Self {
        self.config.n_materials = n_materials;
        self
    }

    /// Number of rows expected in the organlist
    pub fn n_organs(mut self, n_organs: usize) -> Self {
        self.config.n_organs = n_organs;
        self
    }

    /// Organlist file
    pub fn organlist<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.organlist = path.into();
        self
    }

    /// Layout of the organlist file
    pub fn organlist_format(mut self, format: OrganlistFormat) -> Self {
        self.config.organlist_format = format;
        self
    }

    /// Output voxel geometry file, `phantom.vox` by default
    pub fn vox<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.vox = path.into();
        self
    }

    /// Output GNUPLOT slice files
    pub fn projections(mut self, paths: ProjectionPaths) -> Self {
        self.config.projections = paths;
        self
    }

    /// Output organlist echo, `organlist-echo.dat` by default
    pub fn audit<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.audit = path.into();
        self
    }

    /// Handling of negative densities, abort by default
    pub fn density_policy(mut self, policy: DensityPolicy) -> Self {
        self.config.density_policy = policy;
        self
    }

    /// Put every output file under a common directory
    ///
    /// Only the default file names are kept, any output paths set before
    /// this call are replaced.
    pub fn output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        let dir = dir.into();
        let defaults = Config::default();
        self.config.vox = dir.join(defaults.vox);
        self.config.audit = dir.join(defaults.audit);
        self.config.projections = ProjectionPaths {
            xy: dir.join(defaults.projections.xy),
            xz: dir.join(defaults.projections.xz),
            yz: dir.join(defaults.projections.yz),
        };
        self
    }
}
