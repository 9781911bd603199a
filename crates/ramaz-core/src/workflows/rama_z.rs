use crate::engine::artifacts::{ArtifactSummary, write_artifacts};
use crate::engine::config::RamaZConfig;
use crate::engine::context::{RunContext, Services};
use crate::engine::error::EngineError;
use crate::engine::orchestrator::score_subsets;
use crate::engine::partition::partition;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::report::Report;
use crate::engine::validation::{ModelInput, validate_inputs};
use tracing::{debug, info, instrument};

#[derive(Debug)]
pub struct RamaZOutcome {
    pub report: Report,
    pub artifacts: ArtifactSummary,
}

#[instrument(skip_all, name = "rama_z_workflow")]
pub fn run(
    inputs: Vec<ModelInput>,
    config: &RamaZConfig,
    services: Services<'_>,
    reporter: &ProgressReporter,
) -> Result<RamaZOutcome, EngineError> {
    // === Phase 0: Input validation ===
    reporter.report(Progress::PhaseStart { name: "Validation" });
    let model = validate_inputs(inputs)?;
    reporter.report(Progress::PhaseFinish);
    info!(model = %model.basename, "Starting Rama-Z validation.");

    let ctx = RunContext::new(&model.basename, config, services, reporter);

    // === Phase 1: Secondary-structure partitioning ===
    reporter.report(Progress::PhaseStart {
        name: "Partitioning",
    });
    let partition = partition(&model, ctx.services.classifier)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Z-score calculation ===
    reporter.report(Progress::PhaseStart { name: "Scoring" });
    let scores = score_subsets(
        &model.system,
        &partition.subsets,
        ctx.services.engine,
        reporter,
    )?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Artifacts ===
    let artifacts = if config.artifacts.any_enabled() {
        reporter.report(Progress::PhaseStart { name: "Artifacts" });
        let directory = &config.output.directory;
        std::fs::create_dir_all(directory).map_err(|source| EngineError::OutputDirectory {
            path: directory.clone(),
            source,
        })?;
        let summary = write_artifacts(&ctx, &partition.subsets);
        reporter.report(Progress::PhaseFinish);
        summary
    } else {
        debug!("No artifacts requested.");
        ArtifactSummary::default()
    };

    let report = Report::assemble(&scores, &partition.residue_counts);
    info!(
        written = artifacts.written.len(),
        failed = artifacts.failures.len(),
        "Rama-Z validation finished."
    );
    Ok(RamaZOutcome { report, artifacts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::traits::ModelSerializer;
    use crate::core::models::structure::Structure;
    use crate::core::secondary::subset::SubsetLabel;
    use crate::engine::config::{ArtifactConfig, RamaZConfigBuilder};
    use crate::engine::testing::{
        CountSerializer, FakeEngine, SplitClassifier, TextRenderer, alanine_system,
    };
    use std::collections::BTreeMap;
    use std::path::Path;
    use tempfile::tempdir;

    fn input(residues: usize) -> ModelInput {
        ModelInput::new("1abc", Structure::new(vec![alanine_system(residues)]))
    }

    fn all_artifacts() -> ArtifactConfig {
        ArtifactConfig {
            write_hsl_models: true,
            write_hsl_plot: true,
            write_hsl_general_only: true,
            write_whole_plot: true,
            write_whole_general_only: true,
        }
    }

    fn config(dir: &Path, artifacts: ArtifactConfig, overwrite: bool) -> RamaZConfig {
        RamaZConfigBuilder::new()
            .output_directory(dir.to_path_buf())
            .artifacts(artifacts)
            .overwrite(overwrite)
            .build()
            .unwrap()
    }

    fn run_with(
        inputs: Vec<ModelInput>,
        config: &RamaZConfig,
        classifier: &SplitClassifier,
        engine: &FakeEngine,
    ) -> Result<RamaZOutcome, EngineError> {
        let renderer = TextRenderer::default();
        let serializer: &dyn ModelSerializer = &CountSerializer;
        let services = Services {
            classifier,
            engine,
            renderer: &renderer,
            serializer,
        };
        run(inputs, config, services, &ProgressReporter::new())
    }

    fn dir_contents(dir: &Path) -> BTreeMap<String, String> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| {
                let path = entry.unwrap().path();
                let name = path.file_name().unwrap().to_string_lossy().to_string();
                (name, std::fs::read_to_string(&path).unwrap())
            })
            .collect()
    }

    #[test]
    fn report_always_has_four_labels_with_bounded_counts() {
        let dir = tempdir().unwrap();
        let outcome = run_with(
            vec![input(10)],
            &config(dir.path(), ArtifactConfig::default(), false),
            &SplitClassifier { helix: 4, sheet: 3 },
            &FakeEngine::default(),
        )
        .unwrap();

        let labels: Vec<_> = outcome.report.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, SubsetLabel::ALL.to_vec());
        let whole = outcome.report.whole().residue_count;
        let parts: usize = SubsetLabel::PARTITIONS
            .iter()
            .map(|&l| outcome.report.get(l).residue_count)
            .sum();
        assert_eq!(whole, 10);
        assert!(parts <= whole);
    }

    #[test]
    fn all_flags_off_writes_nothing_but_scores_whole() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let outcome = run_with(
            vec![input(6)],
            &config(&out, ArtifactConfig::default(), false),
            &SplitClassifier { helix: 3, sheet: 3 },
            &FakeEngine::default(),
        )
        .unwrap();

        assert!(!out.exists());
        assert!(outcome.artifacts.written.is_empty());
        assert_eq!(outcome.report.whole().zscore, Some(-6.0));
        assert_eq!(outcome.report.get(SubsetLabel::Loop).residue_count, 0);
    }

    #[test]
    fn empty_sheet_has_no_score_and_no_files() {
        let dir = tempdir().unwrap();
        let engine = FakeEngine::default();
        let outcome = run_with(
            vec![input(8)],
            &config(dir.path(), all_artifacts(), false),
            &SplitClassifier { helix: 5, sheet: 0 },
            &engine,
        )
        .unwrap();

        let sheet = outcome.report.get(SubsetLabel::Sheet);
        assert_eq!(sheet.zscore, None);
        assert_eq!(sheet.stderr, None);
        assert_eq!(sheet.residue_count, 0);
        assert!(!engine.calls.lock().unwrap().contains(&SubsetLabel::Sheet));
        assert!(
            dir_contents(dir.path())
                .keys()
                .all(|name| !name.contains("sheet"))
        );
        assert_eq!(
            dir_contents(dir.path()).keys().cloned().collect::<Vec<_>>(),
            vec![
                "1abc_helix.pdb",
                "1abc_helix_General.png",
                "1abc_loop.pdb",
                "1abc_loop_General.png",
                "1abc_whole_General.png",
            ]
        );
    }

    #[test]
    fn whole_plot_writes_one_or_six_files() {
        for (general_only, expected) in [(true, 1), (false, 6)] {
            let dir = tempdir().unwrap();
            let artifacts = ArtifactConfig {
                write_whole_plot: true,
                write_whole_general_only: general_only,
                ..Default::default()
            };
            run_with(
                vec![input(6)],
                &config(dir.path(), artifacts, false),
                &SplitClassifier { helix: 2, sheet: 2 },
                &FakeEngine::default(),
            )
            .unwrap();
            assert_eq!(dir_contents(dir.path()).len(), expected);
        }
    }

    #[test]
    fn second_run_without_overwrite_leaves_files_untouched() {
        let dir = tempdir().unwrap();
        let classifier = SplitClassifier { helix: 3, sheet: 2 };
        let first = run_with(
            vec![input(7)],
            &config(dir.path(), all_artifacts(), false),
            &classifier,
            &FakeEngine::default(),
        )
        .unwrap();
        assert!(first.artifacts.is_success());
        let before = dir_contents(dir.path());

        // Different residue count so a rewrite would change the partial models.
        let second = run_with(
            vec![input(9)],
            &config(dir.path(), all_artifacts(), false),
            &classifier,
            &FakeEngine::default(),
        )
        .unwrap();

        assert_eq!(second.artifacts.failures.len(), 4);
        assert!(second.artifacts.failures.iter().all(|failure| matches!(
            failure.error,
            EngineError::OutputAlreadyExists { .. }
        )));
        assert!(second.report.whole().is_scored());
        assert_eq!(dir_contents(dir.path()), before);
    }

    #[test]
    fn repeated_runs_with_overwrite_produce_identical_files() {
        let dir = tempdir().unwrap();
        let classifier = SplitClassifier { helix: 3, sheet: 2 };
        let config = config(dir.path(), all_artifacts(), true);

        let first = run_with(vec![input(7)], &config, &classifier, &FakeEngine::default()).unwrap();
        let before = dir_contents(dir.path());
        let second =
            run_with(vec![input(7)], &config, &classifier, &FakeEngine::default()).unwrap();

        assert!(first.artifacts.is_success());
        assert!(second.artifacts.is_success());
        assert_eq!(first.artifacts.written, second.artifacts.written);
        assert_eq!(dir_contents(dir.path()), before);
    }

    #[test]
    fn serial_is_appended_to_every_file_name() {
        let dir = tempdir().unwrap();
        let config = RamaZConfigBuilder::new()
            .output_directory(dir.path().to_path_buf())
            .artifacts(all_artifacts())
            .serial(Some(7))
            .build()
            .unwrap();
        run_with(
            vec![input(6)],
            &config,
            &SplitClassifier { helix: 6, sheet: 0 },
            &FakeEngine::default(),
        )
        .unwrap();
        assert_eq!(
            dir_contents(dir.path()).keys().cloned().collect::<Vec<_>>(),
            vec![
                "1abc_helix_007.pdb",
                "1abc_helix_General_007.png",
                "1abc_whole_General_007.png",
            ]
        );
    }

    #[test]
    fn wrong_input_count_is_rejected() {
        let dir = tempdir().unwrap();
        let config = config(dir.path(), ArtifactConfig::default(), false);
        let classifier = SplitClassifier { helix: 0, sheet: 0 };
        for inputs in [vec![], vec![input(3), input(3)]] {
            let expected = inputs.len();
            let result = run_with(inputs, &config, &classifier, &FakeEngine::default());
            assert!(matches!(
                result,
                Err(EngineError::InvalidInputCount { found }) if found == expected
            ));
        }
    }

    #[test]
    fn multi_state_model_is_rejected() {
        let dir = tempdir().unwrap();
        let structure = Structure::new(vec![alanine_system(3), alanine_system(3)]);
        let result = run_with(
            vec![ModelInput::new("nmr", structure)],
            &config(dir.path(), all_artifacts(), false),
            &SplitClassifier { helix: 0, sheet: 0 },
            &FakeEngine::default(),
        );
        assert!(matches!(
            result,
            Err(EngineError::UnsupportedMultiModel { states: 2 })
        ));
        assert_eq!(dir_contents(dir.path()).len(), 0);
    }

    #[test]
    fn whole_score_failure_aborts_before_artifacts() {
        let dir = tempdir().unwrap();
        let engine = FakeEngine {
            failing: [SubsetLabel::Whole].into_iter().collect(),
            ..Default::default()
        };
        let result = run_with(
            vec![input(5)],
            &config(dir.path(), all_artifacts(), false),
            &SplitClassifier { helix: 2, sheet: 2 },
            &engine,
        );
        assert!(matches!(
            result,
            Err(EngineError::ScoreComputationFailed { .. })
        ));
        assert_eq!(dir_contents(dir.path()).len(), 0);
    }

    #[test]
    fn unscorable_partition_is_reported_without_score() {
        let dir = tempdir().unwrap();
        let engine = FakeEngine {
            unscorable: [SubsetLabel::Loop].into_iter().collect(),
            failing: [SubsetLabel::Helix].into_iter().collect(),
            ..Default::default()
        };
        let outcome = run_with(
            vec![input(9)],
            &config(dir.path(), ArtifactConfig::default(), false),
            &SplitClassifier { helix: 3, sheet: 3 },
            &engine,
        )
        .unwrap();
        assert!(!outcome.report.get(SubsetLabel::Helix).is_scored());
        assert!(!outcome.report.get(SubsetLabel::Loop).is_scored());
        assert_eq!(outcome.report.get(SubsetLabel::Loop).residue_count, 3);
        assert_eq!(outcome.report.get(SubsetLabel::Sheet).zscore, Some(-3.0));
    }
}
