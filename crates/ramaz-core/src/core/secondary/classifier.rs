use super::annotation::{ResiduePosition, SecondaryStructureAnnotation, SegmentKind};
use super::dihedral::DihedralClassifier;
use crate::core::models::ids::ResidueId;
use crate::core::models::selection::ResidueSelection;
use crate::core::models::system::MolecularSystem;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Helix, sheet and loop residue selections of one system.
///
/// The three selections are disjoint and together cover every amino-acid
/// residue of the classified system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecondaryStructure {
    pub helix: ResidueSelection,
    pub sheet: ResidueSelection,
    pub loop_region: ResidueSelection,
}

impl SecondaryStructure {
    /// Sorts every amino-acid residue of `system` by the kind `assign` gives it.
    pub(crate) fn from_assignment(
        system: &MolecularSystem,
        mut assign: impl FnMut(ResidueId) -> Option<SegmentKind>,
    ) -> Self {
        let mut result = Self::default();
        for residue_id in system.amino_acid_residue_ids() {
            match assign(residue_id) {
                Some(SegmentKind::Helix) => result.helix.insert(residue_id),
                Some(SegmentKind::Strand) => result.sheet.insert(residue_id),
                None => result.loop_region.insert(residue_id),
            };
        }
        result
    }
}

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("The model carries no HELIX/SHEET records to classify from")]
    MissingAnnotation,
    #[error("Invalid secondary-structure segment in chain '{chain_id}': start {start} is after end {end}")]
    InvalidSegment {
        chain_id: char,
        start: isize,
        end: isize,
    },
}

/// Assigns every amino-acid residue of a model to helix, sheet or loop.
pub trait SecondaryStructureClassifier {
    fn classify(
        &self,
        system: &MolecularSystem,
        annotation: &SecondaryStructureAnnotation,
    ) -> Result<SecondaryStructure, ClassificationError>;
}

/// Classifies residues from the `HELIX`/`SHEET` records of the input file.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationClassifier;

impl SecondaryStructureClassifier for AnnotationClassifier {
    fn classify(
        &self,
        system: &MolecularSystem,
        annotation: &SecondaryStructureAnnotation,
    ) -> Result<SecondaryStructure, ClassificationError> {
        if let Some(segment) = annotation.segments().iter().find(|s| s.start > s.end) {
            return Err(ClassificationError::InvalidSegment {
                chain_id: segment.chain_id,
                start: segment.start.number,
                end: segment.end.number,
            });
        }

        Ok(SecondaryStructure::from_assignment(system, |residue_id| {
            let residue = system.residue(residue_id)?;
            let chain = system.chain(residue.chain_id)?;
            annotation.kind_of(
                chain.id,
                ResiduePosition::new(residue.number, residue.insertion_code),
            )
        }))
    }
}

/// Where secondary-structure assignments come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecondaryStructureSource {
    /// File records when present, backbone torsions otherwise.
    #[default]
    Auto,
    /// File records only.
    Header,
    /// Backbone torsions only.
    Dihedral,
}

impl fmt::Display for SecondaryStructureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SecondaryStructureSource::Auto => "auto",
            SecondaryStructureSource::Header => "header",
            SecondaryStructureSource::Dihedral => "dihedral",
        };
        f.write_str(name)
    }
}

impl FromStr for SecondaryStructureSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "header" => Ok(Self::Header),
            "dihedral" => Ok(Self::Dihedral),
            other => Err(format!(
                "unknown secondary-structure source '{}' (expected auto, header or dihedral)",
                other
            )),
        }
    }
}

/// Picks the annotation or dihedral classifier according to a
/// [`SecondaryStructureSource`].
#[derive(Debug, Clone, Default)]
pub struct DefaultClassifier {
    source: SecondaryStructureSource,
    dihedral: DihedralClassifier,
}

impl DefaultClassifier {
    pub fn new(source: SecondaryStructureSource) -> Self {
        Self {
            source,
            dihedral: DihedralClassifier::default(),
        }
    }

    pub fn source(&self) -> SecondaryStructureSource {
        self.source
    }
}

impl SecondaryStructureClassifier for DefaultClassifier {
    fn classify(
        &self,
        system: &MolecularSystem,
        annotation: &SecondaryStructureAnnotation,
    ) -> Result<SecondaryStructure, ClassificationError> {
        let use_annotation = match self.source {
            SecondaryStructureSource::Header if annotation.is_empty() => {
                return Err(ClassificationError::MissingAnnotation);
            }
            SecondaryStructureSource::Header => true,
            SecondaryStructureSource::Dihedral => false,
            SecondaryStructureSource::Auto => !annotation.is_empty(),
        };

        if use_annotation {
            debug!(
                helices = annotation.helix_count(),
                strands = annotation.strand_count(),
                "Classifying secondary structure from file records"
            );
            AnnotationClassifier.classify(system, annotation)
        } else {
            debug!("Classifying secondary structure from backbone torsions");
            self.dihedral.classify(system, annotation)
        }
    }
}
