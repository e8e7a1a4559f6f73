use serde::Serialize;
use std::fmt;

use crate::form::{FileField, FormState};
use crate::mode::Mode;

/// Something the form still needs before the run control unlocks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    PeaksFile,
    GenomeReference,
    ExpressionFile,
    GenomeSequenceFile,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Requirement::PeaksFile => "a peaks file",
            Requirement::GenomeReference => "a built-in genome or a reference genome file",
            Requirement::ExpressionFile => "an expression file",
            Requirement::GenomeSequenceFile => "a genome sequence file",
        };
        f.write_str(text)
    }
}

impl FormState {
    /// Unmet requirements, in the order the form lists them.
    pub fn missing_requirements(&self) -> Vec<Requirement> {
        let mut missing = Vec::new();
        if self.file(FileField::Peaks).is_none() {
            missing.push(Requirement::PeaksFile);
        }
        if !self.genome().is_builtin() && self.file(FileField::Reference).is_none() {
            missing.push(Requirement::GenomeReference);
        }
        if self.mode() != Mode::Minus && self.file(FileField::Expression).is_none() {
            missing.push(Requirement::ExpressionFile);
        }
        if self.mode().uses_motifs() && self.file(FileField::GenomeSequence).is_none() {
            missing.push(Requirement::GenomeSequenceFile);
        }
        missing
    }

    /// Run gate: true exactly when nothing is missing.
    pub fn is_runnable(&self) -> bool {
        self.missing_requirements().is_empty()
    }
}
