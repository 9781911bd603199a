use super::error::EngineError;
use super::partition::Subset;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::system::MolecularSystem;
use crate::core::scoring::engine::{ZScore, ZScoreEngine};
use crate::core::secondary::subset::SubsetLabel;
use std::collections::BTreeMap;
use tracing::warn;

pub type SubsetScores = BTreeMap<SubsetLabel, Option<ZScore>>;

/// Scores every retained subset once, measuring torsions in `system`.
///
/// A failure on the whole model aborts the run. A failure on a partition
/// only leaves that partition without a score.
pub fn score_subsets(
    system: &MolecularSystem,
    subsets: &[Subset<'_>],
    engine: &dyn ZScoreEngine,
    reporter: &ProgressReporter,
) -> Result<SubsetScores, EngineError> {
    let mut scores = SubsetScores::new();
    reporter.report(Progress::TaskStart {
        total_steps: subsets.len() as u64,
    });

    for subset in subsets {
        let score = match engine.score(subset.label, system, &subset.selection) {
            Ok(score) => score,
            Err(source) if subset.label == SubsetLabel::Whole => {
                reporter.report(Progress::TaskFinish);
                return Err(EngineError::ScoreComputationFailed { source });
            }
            Err(error) => {
                warn!(
                    subset = %subset.label,
                    %error,
                    "Z-score calculation failed; reporting the subset without a score"
                );
                None
            }
        };
        reporter.report(Progress::SubsetScored {
            label: subset.label,
            residues: subset.residue_count,
        });
        reporter.report(Progress::TaskIncrement);
        scores.insert(subset.label, score);
    }

    reporter.report(Progress::TaskFinish);
    Ok(scores)
}
