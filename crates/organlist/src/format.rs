//! Description of how an organlist file is laid out

// crate modules
use crate::builder::OrganlistFormatBuilder;
use crate::error::{Error, Result};

// external crates
use serde::{Deserialize, Serialize};

/// Column separation style of an organlist file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Aligned columns separated by runs of spaces
    ///
    /// Column boundaries are inferred from the data rows. A character position
    /// belongs to a column if any row has a non-blank character there, so
    /// names such as `Adrenal, left` stay together as long as the table is
    /// aligned.
    #[default]
    FixedWidth,
    /// Columns separated by a single character, e.g. `,` or `\t`
    Delimited(char),
}

impl Layout {
    /// Delimiter byte for the csv reader, if this is a delimited layout
    pub(crate) fn delimiter_byte(&self) -> Result<Option<u8>> {
        match self {
            Layout::FixedWidth => Ok(None),
            Layout::Delimited(c) if c.is_ascii() => Ok(Some(*c as u8)),
            Layout::Delimited(c) => Err(Error::InvalidDelimiter(*c)),
        }
    }
}

/// Everything needed to read an organlist file
///
/// None of this is fixed by the file format, so it is all caller supplied.
/// The defaults match the tables distributed with the ICRP reference phantoms.
///
/// ```rust
/// # use penvox_organlist::{Layout, OrganlistFormat};
/// let format = OrganlistFormat::default();
/// assert_eq!(format.skip_rows, 4);
/// assert_eq!(format.headers, ["Organ_ID", "Organ", "Material_ID", "Density"]);
/// assert_eq!(format.organ_column, "Organ_ID");
/// assert_eq!(format.layout, Layout::FixedWidth);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganlistFormat {
    /// Leading lines to skip, including any header lines
    pub skip_rows: usize,
    /// Name of every column, in file order
    pub headers: Vec<String>,
    /// Header of the organ tag column
    pub organ_column: String,
    /// Header of the material number column
    pub material_column: String,
    /// Header of the density column (g/cm3)
    pub density_column: String,
    /// How columns are separated
    pub layout: Layout,
}

impl Default for OrganlistFormat {
    fn default() -> Self {
        Self {
            skip_rows: 4,
            headers: ["Organ_ID", "Organ", "Material_ID", "Density"]
                .map(String::from)
                .to_vec(),
            organ_column: "Organ_ID".into(),
            material_column: "Material_ID".into(),
            density_column: "Density".into(),
            layout: Layout::FixedWidth,
        }
    }
}

impl OrganlistFormat {
    /// Start a builder from the default format
    pub fn builder() -> OrganlistFormatBuilder {
        OrganlistFormatBuilder::new()
    }

    /// Positions of the (organ, material, density) columns within a row
    ///
    /// ```rust
    /// # use penvox_organlist::OrganlistFormat;
    /// assert_eq!(OrganlistFormat::default().key_positions().unwrap(), [0, 2, 3]);
    /// ```
    pub fn key_positions(&self) -> Result<[usize; 3]> {
        let find = |name: &String| {
            self.headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MissingColumn {
                    name: name.clone(),
                    headers: self.headers.clone(),
                })
        };

        Ok([
            find(&self.organ_column)?,
            find(&self.material_column)?,
            find(&self.density_column)?,
        ])
    }
}
