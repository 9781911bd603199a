use super::orchestrator::SubsetScores;
use crate::core::secondary::subset::SubsetLabel;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Z-score, standard error and residue count of one subset.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct ScoreRecord {
    pub zscore: Option<f64>,
    pub stderr: Option<f64>,
    pub residue_count: usize,
}

impl ScoreRecord {
    pub fn is_scored(&self) -> bool {
        self.zscore.is_some()
    }
}

/// The scores of all four subsets of a model.
///
/// Every label is present; unscored subsets carry only their residue count.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    records: BTreeMap<SubsetLabel, ScoreRecord>,
}

impl Report {
    pub fn assemble(scores: &SubsetScores, residue_counts: &BTreeMap<SubsetLabel, usize>) -> Self {
        let records = SubsetLabel::ALL
            .into_iter()
            .map(|label| {
                let score = scores.get(&label).copied().flatten();
                let record = ScoreRecord {
                    zscore: score.map(|z| z.value),
                    stderr: score.map(|z| z.stderr),
                    residue_count: residue_counts.get(&label).copied().unwrap_or(0),
                };
                (label, record)
            })
            .collect();
        Self { records }
    }

    pub fn get(&self, label: SubsetLabel) -> ScoreRecord {
        self.records.get(&label).copied().unwrap_or_default()
    }

    pub fn whole(&self) -> ScoreRecord {
        self.get(SubsetLabel::Whole)
    }

    /// Records in report order: whole, helix, sheet, loop.
    pub fn iter(&self) -> impl Iterator<Item = (SubsetLabel, &ScoreRecord)> {
        self.records.iter().map(|(label, record)| (*label, record))
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for (label, record) in &self.records {
            map.serialize_entry(label.as_str(), record)?;
        }
        map.end()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, record) in self.iter() {
            match (record.zscore, record.stderr) {
                (Some(z), Some(stderr)) => writeln!(
                    f,
                    "z-score {:<5}: {:5.2} ({:4.2}), residues: {}",
                    label, z, stderr, record.residue_count
                )?,
                _ => writeln!(
                    f,
                    "z-score {:<5}: None, residues: {}",
                    label, record.residue_count
                )?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::engine::ZScore;

    fn report() -> Report {
        let scores = SubsetScores::from([
            (
                SubsetLabel::Whole,
                Some(ZScore {
                    value: -1.234,
                    stderr: 0.456,
                }),
            ),
            (SubsetLabel::Helix, None),
            (
                SubsetLabel::Loop,
                Some(ZScore {
                    value: 0.5,
                    stderr: 0.1,
                }),
            ),
        ]);
        let counts = BTreeMap::from([
            (SubsetLabel::Whole, 120),
            (SubsetLabel::Helix, 1),
            (SubsetLabel::Sheet, 0),
            (SubsetLabel::Loop, 60),
        ]);
        Report::assemble(&scores, &counts)
    }

    #[test]
    fn report_always_has_four_labels_in_order() {
        let labels: Vec<_> = report().iter().map(|(label, _)| label).collect();
        assert_eq!(labels, SubsetLabel::ALL.to_vec());
    }

    #[test]
    fn unscored_subsets_keep_their_counts() {
        let report = report();
        assert_eq!(
            report.get(SubsetLabel::Sheet),
            ScoreRecord {
                zscore: None,
                stderr: None,
                residue_count: 0
            }
        );
        assert!(!report.get(SubsetLabel::Helix).is_scored());
        assert_eq!(report.get(SubsetLabel::Helix).residue_count, 1);
        assert_eq!(report.whole().zscore, Some(-1.234));
    }

    #[test]
    fn display_uses_fixed_width_lines() {
        let text = report().to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "z-score whole: -1.23 (0.46), residues: 120",
                "z-score helix: None, residues: 1",
                "z-score sheet: None, residues: 0",
                "z-score loop :  0.50 (0.10), residues: 60",
            ]
        );
    }

    #[test]
    fn serializes_to_toml_tables_keyed_by_label() {
        let text = toml::to_string(&report()).unwrap();
        assert!(text.contains("[whole]"));
        assert!(text.contains("residue_count = 120"));
        assert!(text.contains("[sheet]"));
    }
}
