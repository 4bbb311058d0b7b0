//! Console output shared by the `dialogbuilder` commands

use std::time::{Duration, Instant};

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::tree::{Diagnostics, Severity};

pub static READ: Emoji<'_, '_> = Emoji("📖 ", "");
pub static WRITE: Emoji<'_, '_> = Emoji("📝 ", "");
pub static ARRANGE: Emoji<'_, '_> = Emoji("🧭 ", "");
pub static VOICE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static NOTICE: Emoji<'_, '_> = Emoji("⚠️  ", "! ");

/// Numbered steps of one command run.
///
/// ```text
/// 1/3 📖 Reading greeting.scap
/// 2/3 🧭 12 nodes, 11 edges, 1 start node(s)
/// 3/3 📝 Writing greeting.json
/// Finished in 0 seconds
/// ```
pub struct Steps {
    total: usize,
    done: usize,
    started: Instant,
}

impl Steps {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            done: 0,
            started: Instant::now(),
        }
    }

    pub fn next(&mut self, icon: Emoji<'_, '_>, msg: impl AsRef<str>) {
        self.done += 1;
        let counter = format!("{}/{}", self.done, self.total);
        println!("{} {icon}{}", style(counter).cyan().bold(), msg.as_ref());
    }

    pub fn finish(self) {
        let elapsed = HumanDuration(self.started.elapsed());
        println!("{}", style(format!("Finished in {elapsed}")).green());
    }
}

/// Indented line under the current step
pub fn detail(msg: impl AsRef<str>) {
    println!("    {}", style(msg.as_ref()).dim());
}

/// List diagnostics with their severity, then the totals
pub fn print_diagnostics(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }
    for diagnostic in diagnostics {
        let label = match diagnostic.severity() {
            Severity::Skipped => style("skipped").red(),
            Severity::Warning => style("warning").yellow(),
        };
        println!("  {NOTICE}{label}: {diagnostic}");
    }
    println!(
        "  {} skipped, {} warning(s)",
        diagnostics.count(Severity::Skipped),
        diagnostics.count(Severity::Warning)
    );
}

/// Spinner shown while a directory is walked
///
/// # Panics
/// Panics if the constant template is invalid.
#[must_use]
pub fn scan_spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(msg.to_string());
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}").expect("constant spinner template"),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
