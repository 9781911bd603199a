use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Residue categories with separate Ramachandran reference distributions.
///
/// The discriminants are the fixed table indices used in reference data and
/// plot ordering; index 0 is the category rendered by general-only plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RamaCategory {
    General = 0,
    Glycine = 1,
    CisProline = 2,
    TransProline = 3,
    PreProline = 4,
    IleVal = 5,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown Ramachandran category: '{0}'")]
pub struct ParseRamaCategoryError(pub String);

impl RamaCategory {
    pub const ALL: [RamaCategory; 6] = [
        RamaCategory::General,
        RamaCategory::Glycine,
        RamaCategory::CisProline,
        RamaCategory::TransProline,
        RamaCategory::PreProline,
        RamaCategory::IleVal,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable label, e.g. `cis-Pro` or `Ile/Val`.
    pub fn label(self) -> &'static str {
        match self {
            RamaCategory::General => "General",
            RamaCategory::Glycine => "Gly",
            RamaCategory::CisProline => "cis-Pro",
            RamaCategory::TransProline => "trans-Pro",
            RamaCategory::PreProline => "pre-Pro",
            RamaCategory::IleVal => "Ile/Val",
        }
    }

    /// The label with path separators replaced, for use in file names.
    pub fn file_label(self) -> String {
        self.label().replace('/', "_")
    }

    fn name(self) -> &'static str {
        match self {
            RamaCategory::General => "general",
            RamaCategory::Glycine => "glycine",
            RamaCategory::CisProline => "cis-proline",
            RamaCategory::TransProline => "trans-proline",
            RamaCategory::PreProline => "pre-proline",
            RamaCategory::IleVal => "ile-val",
        }
    }
}

impl fmt::Display for RamaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RamaCategory {
    type Err = ParseRamaCategoryError;

    /// Accepts the lowercase name (`trans-proline`), the label (`trans-Pro`)
    /// or the file label (`Ile_Val`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| {
                needle.eq_ignore_ascii_case(category.name())
                    || needle.eq_ignore_ascii_case(category.label())
                    || needle.eq_ignore_ascii_case(&category.file_label())
            })
            .ok_or_else(|| ParseRamaCategoryError(s.to_string()))
    }
}
