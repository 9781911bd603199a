use super::error::EngineError;
use super::validation::ValidatedModel;
use crate::core::models::selection::ResidueSelection;
use crate::core::models::system::MolecularSystem;
use crate::core::secondary::classifier::SecondaryStructureClassifier;
use crate::core::secondary::subset::SubsetLabel;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::debug;

/// A model subset that is scored and may get artifacts.
///
/// `selection` holds residue ids of the validated model and is what gets
/// scored, so torsions keep their neighbours across segment boundaries.
/// `model` is the extracted sub-model used for partial models and plots.
#[derive(Debug, Clone)]
pub struct Subset<'m> {
    pub label: SubsetLabel,
    pub selection: ResidueSelection,
    pub model: Cow<'m, MolecularSystem>,
    pub residue_count: usize,
}

/// The retained subsets plus the residue count of every label.
#[derive(Debug, Clone)]
pub struct Partition<'m> {
    /// `whole` first, then the non-empty partitions in report order.
    pub subsets: Vec<Subset<'m>>,
    pub residue_counts: BTreeMap<SubsetLabel, usize>,
}

/// Splits a model into whole, helix, sheet and loop subsets.
///
/// Partitions with an empty selection are counted as zero and left out of
/// `subsets`; they are never an error.
pub fn partition<'m>(
    model: &'m ValidatedModel,
    classifier: &dyn SecondaryStructureClassifier,
) -> Result<Partition<'m>, EngineError> {
    let structure = classifier.classify(&model.system, &model.annotation)?;

    let whole_count = model.system.amino_acid_residue_count();
    let mut residue_counts = BTreeMap::from([(SubsetLabel::Whole, whole_count)]);
    let mut subsets = vec![Subset {
        label: SubsetLabel::Whole,
        selection: model.system.amino_acid_residue_ids().into_iter().collect(),
        model: Cow::Borrowed(&model.system),
        residue_count: whole_count,
    }];

    for (label, selection) in [
        (SubsetLabel::Helix, &structure.helix),
        (SubsetLabel::Sheet, &structure.sheet),
        (SubsetLabel::Loop, &structure.loop_region),
    ] {
        residue_counts.insert(label, selection.len());
        if selection.is_empty() {
            debug!(subset = %label, "Partition is empty; skipping");
            continue;
        }
        subsets.push(Subset {
            label,
            selection: selection.clone(),
            model: Cow::Owned(model.system.select(selection)),
            residue_count: selection.len(),
        });
    }

    Ok(Partition {
        subsets,
        residue_counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ramachandran::dihedrals::tests::build_chain;
    use crate::core::secondary::annotation::SecondaryStructureAnnotation;
    use crate::core::secondary::classifier::{ClassificationError, SecondaryStructure};

    struct FixedClassifier {
        helix: usize,
        sheet: usize,
    }

    impl SecondaryStructureClassifier for FixedClassifier {
        fn classify(
            &self,
            system: &MolecularSystem,
            _annotation: &SecondaryStructureAnnotation,
        ) -> Result<SecondaryStructure, ClassificationError> {
            let ids = system.amino_acid_residue_ids();
            let (helix, rest) = ids.split_at(self.helix);
            let (sheet, loop_region) = rest.split_at(self.sheet);
            Ok(SecondaryStructure {
                helix: helix.iter().copied().collect(),
                sheet: sheet.iter().copied().collect(),
                loop_region: loop_region.iter().copied().collect(),
            })
        }
    }

    struct FailingClassifier;

    impl SecondaryStructureClassifier for FailingClassifier {
        fn classify(
            &self,
            _system: &MolecularSystem,
            _annotation: &SecondaryStructureAnnotation,
        ) -> Result<SecondaryStructure, ClassificationError> {
            Err(ClassificationError::MissingAnnotation)
        }
    }

    fn model(residues: usize) -> ValidatedModel {
        let mut system = MolecularSystem::new();
        build_chain(&mut system, 'A', &vec![("ALA", -60.0, -45.0, 180.0); residues]);
        ValidatedModel {
            basename: "model".into(),
            system,
            annotation: SecondaryStructureAnnotation::new(),
        }
    }

    #[test]
    fn empty_sheet_is_counted_but_not_retained() {
        let model = model(8);
        let result = partition(&model, &FixedClassifier { helix: 5, sheet: 0 }).unwrap();

        let labels: Vec<_> = result.subsets.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![SubsetLabel::Whole, SubsetLabel::Helix, SubsetLabel::Loop]);
        assert_eq!(result.residue_counts[&SubsetLabel::Whole], 8);
        assert_eq!(result.residue_counts[&SubsetLabel::Helix], 5);
        assert_eq!(result.residue_counts[&SubsetLabel::Sheet], 0);
        assert_eq!(result.residue_counts[&SubsetLabel::Loop], 3);
        assert_eq!(result.residue_counts.len(), 4);
    }

    #[test]
    fn sub_models_contain_only_selected_residues() {
        let model = model(6);
        let result = partition(&model, &FixedClassifier { helix: 2, sheet: 3 }).unwrap();
        for subset in &result.subsets {
            assert_eq!(subset.model.residue_count(), subset.residue_count);
            assert_eq!(subset.selection.len(), subset.residue_count);
        }
        assert!(matches!(result.subsets[0].model, Cow::Borrowed(_)));
    }

    #[test]
    fn selections_refer_to_the_validated_model() {
        let model = model(6);
        let result = partition(&model, &FixedClassifier { helix: 2, sheet: 0 }).unwrap();
        let ids = model.system.amino_acid_residue_ids();

        let whole = &result.subsets[0];
        assert!(ids.iter().all(|&id| whole.selection.contains(id)));
        let helix = &result.subsets[1];
        assert_eq!(helix.label, SubsetLabel::Helix);
        assert!(helix.selection.contains(ids[0]) && helix.selection.contains(ids[1]));
        assert!(!helix.selection.contains(ids[2]));
    }

    #[test]
    fn partition_counts_never_exceed_whole() {
        let model = model(7);
        let result = partition(&model, &FixedClassifier { helix: 3, sheet: 2 }).unwrap();
        let parts: usize = SubsetLabel::PARTITIONS
            .iter()
            .map(|l| result.residue_counts[l])
            .sum();
        assert!(parts <= result.residue_counts[&SubsetLabel::Whole]);
    }

    #[test]
    fn classifier_failure_aborts() {
        let model = model(4);
        let result = partition(&model, &FailingClassifier);
        assert!(matches!(result, Err(EngineError::Classification { .. })));
    }
}
