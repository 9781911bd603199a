use super::config::SubsetKind;
use super::context::RunContext;
use super::error::EngineError;
use super::naming::OutputArtifact;
use super::partition::Subset;
use super::progress::Progress;
use crate::core::ramachandran::category::RamaCategory;
use crate::core::secondary::subset::SubsetLabel;
use std::path::PathBuf;
use tracing::{info, warn};

/// A subset whose remaining artifacts were skipped after `error`.
#[derive(Debug)]
pub struct ArtifactFailure {
    pub subset: SubsetLabel,
    pub error: EngineError,
}

#[derive(Debug, Default)]
pub struct ArtifactSummary {
    pub written: Vec<PathBuf>,
    pub failures: Vec<ArtifactFailure>,
}

impl ArtifactSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Writes the partial models and plots configured for each subset.
///
/// A failure stops the remaining writes of its subset only; the other
/// subsets are still processed.
pub fn write_artifacts(ctx: &RunContext<'_>, subsets: &[Subset<'_>]) -> ArtifactSummary {
    let mut summary = ArtifactSummary::default();
    for subset in subsets {
        if let Err(error) = write_subset(ctx, subset, &mut summary.written) {
            warn!(subset = %subset.label, %error, "Skipping remaining outputs of subset");
            ctx.reporter.report(Progress::Message(format!(
                "{}: {}",
                subset.label, error
            )));
            summary.failures.push(ArtifactFailure {
                subset: subset.label,
                error,
            });
        }
    }
    summary
}

fn write_subset(
    ctx: &RunContext<'_>,
    subset: &Subset<'_>,
    written: &mut Vec<PathBuf>,
) -> Result<(), EngineError> {
    let kind = SubsetKind::of(subset.label);
    let artifacts = &ctx.config.artifacts;
    let output = &ctx.config.output;

    if artifacts.writes_models(kind) {
        let serializer = ctx.services.serializer;
        let artifact = OutputArtifact::new(ctx.namer.name(
            &format!("{}_", ctx.basename),
            subset.label.as_str(),
            serializer.extension(),
        ));
        artifact.check(output.overwrite)?;
        info!("Writing out partial model: {}", artifact.path().display());
        serializer
            .write_model(&subset.model, artifact.path())
            .map_err(|source| EngineError::ModelWrite {
                path: artifact.path().to_path_buf(),
                source,
            })?;
        written.push(artifact.path().to_path_buf());
    }

    let plot_options = artifacts.plot_options(kind);
    if plot_options.enabled {
        let renderer = ctx.services.renderer;
        let mut plots = renderer.render(&subset.model);
        if plot_options.general_only {
            plots.retain(|plot| plot.category == RamaCategory::General);
        }
        let prefix = format!("{}_{}_", ctx.basename, subset.label);
        for plot in &plots {
            let artifact =
                OutputArtifact::new(ctx.namer.name(&prefix, &plot.category.file_label(), "png"));
            artifact.check(output.overwrite)?;
            info!("Saving: {}", artifact.path().display());
            renderer.save_image(plot, artifact.path(), output.plot_dpi)?;
            written.push(artifact.path().to_path_buf());
        }
    }

    Ok(())
}
