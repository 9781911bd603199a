use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ramaz::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders pipeline progress events on stderr with a single indicatif bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        pb.finish_and_clear();
        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = Arc::clone(&self.pb);
        Box::new(move |event: Progress| match pb.lock() {
            Ok(guard) => apply(&guard, event),
            Err(_) => warn!("Progress bar mutex was poisoned. Cannot update progress."),
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(pb: &ProgressBar, event: Progress) {
    match event {
        Progress::PhaseStart { name } => {
            pb.reset();
            pb.set_length(0);
            pb.set_style(spinner_style());
            pb.set_message(name);
            pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
        Progress::PhaseFinish => {
            pb.disable_steady_tick();
            pb.finish_with_message("Done");
        }
        Progress::TaskStart { total_steps } => {
            pb.disable_steady_tick();
            pb.reset();
            pb.set_length(total_steps);
            pb.set_style(bar_style());
        }
        Progress::SubsetScored { label, residues } => {
            pb.set_message(format!("{} ({} residues)", label, residues));
        }
        Progress::TaskIncrement => pb.inc(1),
        Progress::TaskFinish => {
            if let Some(length) = pb.length() {
                pb.set_position(length);
            }
            pb.finish();
        }
        Progress::Message(msg) if pb.is_finished() => pb.set_message(msg),
        Progress::Message(msg) => pb.println(format!("  {}", msg)),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<24} [{bar:40.cyan/blue}] {pos}/{len} subsets")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}
