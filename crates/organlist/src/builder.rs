// internal modules
use crate::format::{Layout, OrganlistFormat};

/// Builder implementation for [OrganlistFormat]
///
/// The fields of [OrganlistFormat] are public for direct use, but chained
/// setters read better when only a couple of values differ from the defaults.
///
/// ```rust
/// # use penvox_organlist::{Layout, OrganlistFormat};
/// let format = OrganlistFormat::builder()
///     .skip_rows(1)
///     .headers(["id", "name", "mat", "rho", "comment"])
///     .columns("id", "mat", "rho")
///     .delimiter(',')
///     .build();
///
/// assert_eq!(format.layout, Layout::Delimited(','));
/// assert_eq!(format.key_positions().unwrap(), [0, 2, 3]);
/// ```
#[derive(Debug, Default)]
pub struct OrganlistFormatBuilder {
    format: OrganlistFormat,
}

impl OrganlistFormatBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [OrganlistFormat] type
    pub fn build(self) -> OrganlistFormat {
        self.format
    }

    /// Leading lines to skip, including headers
    pub fn skip_rows(mut self, rows: usize) -> Self {
        self.format.skip_rows = rows;
        self
    }

    /// Names of every column in the file, in order
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.format.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Headers of the organ id, material id and density columns
    pub fn columns(
        mut self,
        organ: impl Into<String>,
        material: impl Into<String>,
        density: impl Into<String>,
    ) -> Self {
        self.format.organ_column = organ.into();
        self.format.material_column = material.into();
        self.format.density_column = density.into();
        self
    }

    /// Read columns separated by `delimiter` rather than aligned columns
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.format.layout = Layout::Delimited(delimiter);
        self
    }

    /// Explicitly set the column layout
    pub fn layout(mut self, layout: Layout) -> Self {
        self.format.layout = layout;
        self
    }
}
