use cellgrid::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {prefix:.bold} {wide_msg}";
const BAR_TEMPLATE: &str = "{prefix:.bold} [{wide_bar:.cyan/blue}] {pos:>7}/{len:7} {elapsed_precise}";

/// Draws library [`Progress`] events as a single terminal line.
///
/// The phase name lives in the bar's prefix and details in its message.
/// Clones share the same bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// A handler that never draws, for quiet runs.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        Self { bar }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |event| apply(&bar, event))
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(bar: &ProgressBar, event: Progress) {
    match event {
        Progress::PhaseStart { name } => {
            bar.reset();
            bar.set_length(0);
            bar.set_style(spinner_style());
            bar.set_prefix(name);
            bar.set_message("");
            bar.enable_steady_tick(TICK_INTERVAL);
        }
        Progress::PhaseFinish => {
            bar.disable_steady_tick();
            bar.finish_with_message("done");
        }
        Progress::TaskStart { total_steps } => {
            bar.disable_steady_tick();
            bar.set_style(bar_style());
            bar.set_length(total_steps);
            bar.set_position(0);
        }
        Progress::TaskAdvance { steps } => bar.inc(steps),
        // Stays on screen until the phase finishes.
        Progress::TaskFinish => {
            if let Some(len) = bar.length() {
                bar.set_position(len);
            }
        }
        Progress::IndexBuilt {
            records,
            grid: [nu, nv, nw],
        } => bar.set_message(format!("{records} records in {nu}x{nv}x{nw} buckets")),
        Progress::Message(text) => bar.println(format!("  {text}")),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template(SPINNER_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}
