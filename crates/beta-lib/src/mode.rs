use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BetaError;

/// Operating profile of a BETA invocation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Plus,
    Basic,
    Minus,
}

impl Mode {
    pub fn all() -> [Mode; 3] {
        [Mode::Plus, Mode::Basic, Mode::Minus]
    }

    /// Word passed to the executable right after its name.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Mode::Plus => "plus",
            Mode::Basic => "basic",
            Mode::Minus => "minus",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Mode::Plus => "BETA Plus",
            Mode::Basic => "BETA Basic",
            Mode::Minus => "BETA Minus",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mode::Plus => {
                "Predict direct targets of TF and the active/repressive function prediction.\n\
                 Do motif analysis at targets region as well."
            }
            Mode::Basic => {
                "Predict direct targets of TF and the active/repressive function prediction."
            }
            Mode::Minus => {
                "Detect TF target genes based on regulatory potential score only by binding data."
            }
        }
    }

    /// Whether expression-related fields exist in this mode.
    pub fn uses_expression(&self) -> bool {
        !matches!(self, Mode::Minus)
    }

    /// Whether motif-analysis fields exist in this mode.
    pub fn uses_motifs(&self) -> bool {
        matches!(self, Mode::Plus)
    }

    /// Logger name used inside run log files, e.g. `BETA-plus`.
    pub fn log_name(&self) -> String {
        format!("BETA-{}", self.cli_name())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for Mode {
    type Err = BetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plus" => Ok(Mode::Plus),
            "basic" => Ok(Mode::Basic),
            "minus" => Ok(Mode::Minus),
            other => Err(BetaError::UnknownOption {
                what: "mode",
                value: other.to_string(),
            }),
        }
    }
}

/// Reference genome choice. `Other` means a reference file supplies it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Genome {
    #[default]
    Other,
    Hg38,
    Hg19,
    Hg18,
    Mm10,
    Mm9,
}

impl Genome {
    /// Dropdown order.
    pub fn all() -> [Genome; 6] {
        [
            Genome::Other,
            Genome::Hg38,
            Genome::Hg19,
            Genome::Hg18,
            Genome::Mm10,
            Genome::Mm9,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Genome::Other => "Other",
            Genome::Hg38 => "hg38",
            Genome::Hg19 => "hg19",
            Genome::Hg18 => "hg18",
            Genome::Mm10 => "mm10",
            Genome::Mm9 => "mm9",
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Genome::Other)
    }

    /// BETA ships CTCF boundaries for hg19 and mm9 only.
    pub fn has_bundled_boundaries(&self) -> bool {
        matches!(self, Genome::Hg19 | Genome::Mm9)
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genome {
    type Err = BetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Genome::all()
            .into_iter()
            .find(|genome| genome.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BetaError::UnknownOption {
                what: "genome",
                value: wanted.to_string(),
            })
    }
}

/// Differential-expression tool that produced the expression file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExpressionKind {
    #[default]
    Deseq2,
    Limma,
    EdgeR,
    Cuffdiff,
    BetaSpecific,
    Other,
}

/// 1-based column numbers handed to `--info`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InfoColumns {
    pub id: u32,
    pub change: u32,
    pub stat: u32,
}

impl ExpressionKind {
    pub fn all() -> [ExpressionKind; 6] {
        [
            ExpressionKind::Deseq2,
            ExpressionKind::Limma,
            ExpressionKind::EdgeR,
            ExpressionKind::Cuffdiff,
            ExpressionKind::BetaSpecific,
            ExpressionKind::Other,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpressionKind::Deseq2 => "DESeq2",
            ExpressionKind::Limma => "Limma",
            ExpressionKind::EdgeR => "EdgeR",
            ExpressionKind::Cuffdiff => "Cuffdiff",
            ExpressionKind::BetaSpecific => "BETA-Specific Format",
            ExpressionKind::Other => "Other",
        }
    }

    /// Value of the `-k` flag.
    pub fn code(&self) -> &'static str {
        match self {
            ExpressionKind::Limma => "LIM",
            ExpressionKind::Cuffdiff => "CUF",
            ExpressionKind::BetaSpecific => "BSF",
            ExpressionKind::Deseq2 | ExpressionKind::EdgeR | ExpressionKind::Other => "O",
        }
    }

    pub fn default_columns(&self) -> InfoColumns {
        let (id, change, stat) = match self {
            ExpressionKind::Deseq2 => (1, 3, 7),
            ExpressionKind::Limma => (1, 2, 6),
            ExpressionKind::EdgeR => (1, 2, 5),
            ExpressionKind::Cuffdiff => (2, 10, 13),
            ExpressionKind::BetaSpecific => (1, 2, 3),
            ExpressionKind::Other => (1, 2, 3),
        };
        InfoColumns { id, change, stat }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpressionKind {
    type Err = BetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let short = match wanted.to_ascii_lowercase().as_str() {
            "deseq2" => Some(ExpressionKind::Deseq2),
            "limma" => Some(ExpressionKind::Limma),
            "edger" => Some(ExpressionKind::EdgeR),
            "cuffdiff" => Some(ExpressionKind::Cuffdiff),
            "bsf" | "beta-specific" => Some(ExpressionKind::BetaSpecific),
            "other" => Some(ExpressionKind::Other),
            _ => None,
        };
        short
            .or_else(|| {
                ExpressionKind::all()
                    .into_iter()
                    .find(|kind| kind.label().eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| BetaError::UnknownOption {
                what: "expression kind",
                value: wanted.to_string(),
            })
    }
}

/// How BETA ranks targets when predicting TF/CR function.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Method {
    #[default]
    Score,
    Distance,
}

impl Method {
    pub fn all() -> [Method; 2] {
        [Method::Score, Method::Distance]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Method::Score => "score",
            Method::Distance => "distance",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Method {
    type Err = BetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "score" => Ok(Method::Score),
            "distance" => Ok(Method::Distance),
            other => Err(BetaError::UnknownOption {
                what: "method",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_plus_uses_motifs() {
        assert!(Mode::Plus.uses_motifs());
        assert!(!Mode::Basic.uses_motifs());
        assert!(!Mode::Minus.uses_motifs());
        assert!(!Mode::Minus.uses_expression());
    }

    #[test]
    fn kind_codes_and_columns() {
        assert_eq!(ExpressionKind::Limma.code(), "LIM");
        assert_eq!(ExpressionKind::EdgeR.code(), "O");
        let cuff = ExpressionKind::Cuffdiff.default_columns();
        assert_eq!((cuff.id, cuff.change, cuff.stat), (2, 10, 13));
    }

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("HG19".parse::<Genome>().unwrap(), Genome::Hg19);
        assert_eq!("other".parse::<Genome>().unwrap(), Genome::Other);
        assert_eq!(
            "BETA-Specific Format".parse::<ExpressionKind>().unwrap(),
            ExpressionKind::BetaSpecific
        );
        assert!("hg99".parse::<Genome>().is_err());
        assert!("sideways".parse::<Mode>().is_err());
    }

    #[test]
    fn bundled_boundaries_only_for_hg19_and_mm9() {
        let bundled: Vec<_> = Genome::all()
            .into_iter()
            .filter(Genome::has_bundled_boundaries)
            .collect();
        assert_eq!(bundled, vec![Genome::Hg19, Genome::Mm9]);
    }
}
