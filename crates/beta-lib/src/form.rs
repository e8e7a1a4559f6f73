//! Form state behind one mode tab.
//!
//! Every editable value is kept as text, exactly as typed, and only turned
//! into flags by [`crate::command::build_command`]. Dropdowns are enums and
//! file pickers are optional paths. Setters enforce the enablement rules so
//! the struct can never hold a reference file for a built-in genome or a
//! boundary file the tool would ignore.

use std::path::{Path, PathBuf};

use crate::error::{BetaError, Result};
use crate::input::InputFilter;
use crate::mode::{ExpressionKind, Genome, Method, Mode};

pub const DEFAULT_OUTPUT_DIR: &str = "./";
pub const DEFAULT_PEAK_NUMBER: &str = "10000";
pub const DEFAULT_DISTANCE: &str = "100000";
pub const DEFAULT_FDR: &str = "1";
pub const DEFAULT_GENE_AMOUNT: &str = "0.5";
pub const DEFAULT_PVALUE_CUTOFF: &str = "0.001";
pub const DEFAULT_MOTIF_NUMBER: &str = "10";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextField {
    PeakNumber,
    Distance,
    NamePrefix,
    InfoId,
    InfoChange,
    InfoStat,
    Fdr,
    GeneAmount,
    PvalueCutoff,
    MotifNumber,
}

impl TextField {
    pub fn all() -> [TextField; 10] {
        [
            TextField::PeakNumber,
            TextField::Distance,
            TextField::NamePrefix,
            TextField::InfoId,
            TextField::InfoChange,
            TextField::InfoStat,
            TextField::Fdr,
            TextField::GeneAmount,
            TextField::PvalueCutoff,
            TextField::MotifNumber,
        ]
    }

    pub fn filter(&self) -> InputFilter {
        match self {
            TextField::PeakNumber
            | TextField::Distance
            | TextField::InfoId
            | TextField::InfoChange
            | TextField::InfoStat => InputFilter::Integer,
            TextField::Fdr
            | TextField::GeneAmount
            | TextField::PvalueCutoff
            | TextField::MotifNumber => InputFilter::Float,
            TextField::NamePrefix => InputFilter::Any,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TextField::PeakNumber => "Number of peaks:",
            TextField::Distance => "Distance of peaks to TSS (bp):",
            TextField::NamePrefix => "Prefix for output files:",
            TextField::InfoId => "Column of gene IDs:",
            TextField::InfoChange => "Column of logFC:",
            TextField::InfoStat => "Column of FDR:",
            TextField::Fdr => "FDR threshold:",
            TextField::GeneAmount => "Number or percent of genes:",
            TextField::PvalueCutoff => "P-value cutoff for results:",
            TextField::MotifNumber => "Number or p-value cutoff for motif results:",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            TextField::PeakNumber => "The number of peaks you want to consider.",
            TextField::Distance => "Get peaks within this distance from gene TSS.",
            TextField::NamePrefix => {
                "Used as prefix of the result file.\nIf not set, 'NA' will be used instead"
            }
            TextField::InfoId => {
                "Column number in the expression file designated as the gene ID (starting from 1)."
            }
            TextField::InfoChange => {
                "Column number in the expression file designated as metric for magnitude of change (starting from 1)."
            }
            TextField::InfoStat => {
                "Column number in the expression file designated as the statistical significance (starting from 1)."
            }
            TextField::Fdr => {
                "False discovery rate threshold to pick out from differential expressed genes (number from 0 to 1)."
            }
            TextField::GeneAmount => {
                "Number (>1) or percentage (0-1).\nIf you want to use FDR, set this to 1, otherwise it uses the intersection of these two parameters."
            }
            TextField::PvalueCutoff => {
                "Number (0-1) as threshold to select the target gene list (up regulated or down regulated or both) with p value called by one side ks-test"
            }
            TextField::MotifNumber => {
                "Number of motifs (>1) or p-value cutoff (0-1) to retrieve motifs."
            }
        }
    }

    pub fn available_in(&self, mode: Mode) -> bool {
        match self {
            TextField::PeakNumber | TextField::Distance | TextField::NamePrefix => true,
            TextField::MotifNumber => mode.uses_motifs(),
            _ => mode.uses_expression(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            TextField::PeakNumber => "peak number",
            TextField::Distance => "distance",
            TextField::NamePrefix => "name prefix",
            TextField::InfoId => "gene ID column",
            TextField::InfoChange => "logFC column",
            TextField::InfoStat => "FDR column",
            TextField::Fdr => "FDR threshold",
            TextField::GeneAmount => "gene amount",
            TextField::PvalueCutoff => "p-value cutoff",
            TextField::MotifNumber => "motif number",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FileField {
    Peaks,
    Expression,
    Reference,
    Boundary,
    GenomeSequence,
}

impl FileField {
    pub fn all() -> [FileField; 5] {
        [
            FileField::Peaks,
            FileField::Expression,
            FileField::Reference,
            FileField::Boundary,
            FileField::GenomeSequence,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileField::Peaks => "peaks file",
            FileField::Expression => "expression file",
            FileField::Reference => "reference genome file",
            FileField::Boundary => "CTCF boundary file",
            FileField::GenomeSequence => "genome sequence file",
        }
    }

    pub fn available_in(&self, mode: Mode) -> bool {
        match self {
            FileField::Peaks | FileField::Reference | FileField::Boundary => true,
            FileField::Expression => mode.uses_expression(),
            FileField::GenomeSequence => mode.uses_motifs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    mode: Mode,
    default_output_dir: PathBuf,

    peaks_file: Option<PathBuf>,
    genome: Genome,
    reference_file: Option<PathBuf>,
    boundary_limit: bool,
    boundary_file: Option<PathBuf>,
    peak_number: String,
    distance: String,
    name_prefix: String,
    output_dir: PathBuf,

    expression_file: Option<PathBuf>,
    kind: ExpressionKind,
    info_id: String,
    info_change: String,
    info_stat: String,
    gene_symbols: bool,
    method: Method,
    fdr: String,
    gene_amount: String,
    pvalue_cutoff: String,

    genome_sequence_file: Option<PathBuf>,
    motif_number: String,
}

impl FormState {
    pub fn new(mode: Mode) -> Self {
        Self::with_output_dir(mode, DEFAULT_OUTPUT_DIR)
    }

    /// Fresh form whose output directory (and reset target) is `output_dir`.
    pub fn with_output_dir(mode: Mode, output_dir: impl Into<PathBuf>) -> Self {
        let default_output_dir = output_dir.into();
        let kind = ExpressionKind::default();
        let columns = kind.default_columns();
        Self {
            mode,
            peaks_file: None,
            genome: Genome::default(),
            reference_file: None,
            boundary_limit: false,
            boundary_file: None,
            peak_number: DEFAULT_PEAK_NUMBER.to_string(),
            distance: DEFAULT_DISTANCE.to_string(),
            name_prefix: String::new(),
            output_dir: default_output_dir.clone(),
            expression_file: None,
            kind,
            info_id: columns.id.to_string(),
            info_change: columns.change.to_string(),
            info_stat: columns.stat.to_string(),
            gene_symbols: false,
            method: Method::default(),
            fdr: DEFAULT_FDR.to_string(),
            gene_amount: DEFAULT_GENE_AMOUNT.to_string(),
            pvalue_cutoff: DEFAULT_PVALUE_CUTOFF.to_string(),
            genome_sequence_file: None,
            motif_number: DEFAULT_MOTIF_NUMBER.to_string(),
            default_output_dir,
        }
    }

    /// Back to the documented defaults, keeping the mode.
    pub fn reset(&mut self) {
        *self = Self::with_output_dir(self.mode, self.default_output_dir.clone());
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn genome(&self) -> Genome {
        self.genome
    }

    pub fn set_genome(&mut self, genome: Genome) {
        self.genome = genome;
        self.enforce_enablement();
    }

    pub fn boundary_limit(&self) -> bool {
        self.boundary_limit
    }

    pub fn set_boundary_limit(&mut self, enabled: bool) {
        self.boundary_limit = enabled;
        self.enforce_enablement();
    }

    pub fn gene_symbols(&self) -> bool {
        self.gene_symbols
    }

    pub fn set_gene_symbols(&mut self, enabled: bool) -> Result<()> {
        self.require_expression("gene symbol flag")?;
        self.gene_symbols = enabled;
        Ok(())
    }

    pub fn kind(&self) -> ExpressionKind {
        self.kind
    }

    /// Selecting a kind also loads its default `--info` columns.
    pub fn set_kind(&mut self, kind: ExpressionKind) -> Result<()> {
        self.require_expression("expression kind")?;
        let columns = kind.default_columns();
        self.kind = kind;
        self.info_id = columns.id.to_string();
        self.info_change = columns.change.to_string();
        self.info_stat = columns.stat.to_string();
        Ok(())
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn set_method(&mut self, method: Method) -> Result<()> {
        self.require_expression("method")?;
        self.method = method;
        Ok(())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.output_dir = dir.into();
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::PeakNumber => &self.peak_number,
            TextField::Distance => &self.distance,
            TextField::NamePrefix => &self.name_prefix,
            TextField::InfoId => &self.info_id,
            TextField::InfoChange => &self.info_change,
            TextField::InfoStat => &self.info_stat,
            TextField::Fdr => &self.fdr,
            TextField::GeneAmount => &self.gene_amount,
            TextField::PvalueCutoff => &self.pvalue_cutoff,
            TextField::MotifNumber => &self.motif_number,
        }
    }

    /// Apply an edit. The field keeps its previous value when the input
    /// filter rejects the candidate.
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) -> Result<()> {
        if !field.available_in(self.mode) {
            return Err(BetaError::FieldNotInMode {
                field: field.name(),
                mode: self.mode.cli_name(),
            });
        }
        let value = value.into();
        if !field.filter().accepts(&value) {
            return Err(BetaError::RejectedInput {
                field: field.name(),
                value,
            });
        }
        *self.text_slot(field) = value;
        Ok(())
    }

    fn text_slot(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::PeakNumber => &mut self.peak_number,
            TextField::Distance => &mut self.distance,
            TextField::NamePrefix => &mut self.name_prefix,
            TextField::InfoId => &mut self.info_id,
            TextField::InfoChange => &mut self.info_change,
            TextField::InfoStat => &mut self.info_stat,
            TextField::Fdr => &mut self.fdr,
            TextField::GeneAmount => &mut self.gene_amount,
            TextField::PvalueCutoff => &mut self.pvalue_cutoff,
            TextField::MotifNumber => &mut self.motif_number,
        }
    }

    /// Prefix as it appears on the command line and in log names.
    pub fn joined_name_prefix(&self) -> String {
        self.name_prefix.split_whitespace().collect::<Vec<_>>().join("-")
    }

    pub fn file(&self, field: FileField) -> Option<&Path> {
        match field {
            FileField::Peaks => self.peaks_file.as_deref(),
            FileField::Expression => self.expression_file.as_deref(),
            FileField::Reference => self.reference_file.as_deref(),
            FileField::Boundary => self.boundary_file.as_deref(),
            FileField::GenomeSequence => self.genome_sequence_file.as_deref(),
        }
    }

    /// Whether the picker for `field` should accept a selection right now.
    pub fn file_enabled(&self, field: FileField) -> bool {
        if !field.available_in(self.mode) {
            return false;
        }
        match field {
            FileField::Reference => self.reference_enabled(),
            FileField::Boundary => self.boundary_enabled(),
            _ => true,
        }
    }

    /// `None` clears the field, as a cancelled picker does.
    pub fn set_file(&mut self, field: FileField, path: Option<PathBuf>) -> Result<()> {
        if !field.available_in(self.mode) {
            return Err(BetaError::FieldNotInMode {
                field: field.name(),
                mode: self.mode.cli_name(),
            });
        }
        if path.is_some() && !self.file_enabled(field) {
            let reason = match field {
                FileField::Reference => "select genome 'Other' to supply a reference file",
                _ => "enable the CTCF boundary limit with a genome other than hg19/mm9",
            };
            return Err(BetaError::FieldDisabled {
                field: field.name(),
                reason,
            });
        }
        let slot = match field {
            FileField::Peaks => &mut self.peaks_file,
            FileField::Expression => &mut self.expression_file,
            FileField::Reference => &mut self.reference_file,
            FileField::Boundary => &mut self.boundary_file,
            FileField::GenomeSequence => &mut self.genome_sequence_file,
        };
        *slot = path;
        Ok(())
    }

    fn reference_enabled(&self) -> bool {
        !self.genome.is_builtin()
    }

    fn boundary_enabled(&self) -> bool {
        self.boundary_limit && !self.genome.has_bundled_boundaries()
    }

    fn enforce_enablement(&mut self) {
        if !self.reference_enabled() {
            self.reference_file = None;
        }
        if !self.boundary_enabled() {
            self.boundary_file = None;
        }
    }

    fn require_expression(&self, field: &'static str) -> Result<()> {
        if self.mode.uses_expression() {
            Ok(())
        } else {
            Err(BetaError::FieldNotInMode {
                field,
                mode: self.mode.cli_name(),
            })
        }
    }
}
