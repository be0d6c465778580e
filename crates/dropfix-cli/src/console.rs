//! Operator-facing progress on stdout

use std::path::Path;

use colored::Colorize;
use dropfix_core::{Outcome, Progress, Stage};

/// Prints one line per target followed by its stages, indented.
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn on_target(&mut self, target: &Path) {
        println!("{}", target.display().to_string().cyan());
    }

    fn on_stage(&mut self, stage: Stage) {
        println!("\t{}", stage.label());
    }

    fn on_target_done(&mut self, _target: &Path, outcome: Outcome) {
        match outcome {
            Outcome::AlreadyExcluded => println!("\t{}", outcome.to_string().dimmed()),
            Outcome::WouldExclude => println!("\t{}", outcome.to_string().yellow()),
            Outcome::Excluded => println!(),
        }
    }
}
