use anyhow::{bail, Context, Result};
use beta_lib::{
    build_command, AppConfig, ExpressionKind, FileField, FormState, Genome, Method, Mode,
    Requirement, RunSession, TextField,
};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::info;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "beta",
    version,
    about = "Assemble and launch BETA command lines without the desktop window"
)]
struct Cli {
    /// TOML config file (defaults to $BETA_GUI_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// BETA executable to launch, overriding the config
    #[arg(long, global = true)]
    beta_bin: Option<String>,
    /// Logging verbosity (e.g., debug, info, warn)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the command line the form would launch
    Preview {
        #[command(flatten)]
        form: FormArgs,
        /// Emit command, arguments and run readiness as JSON
        #[arg(long)]
        json: bool,
    },
    /// Launch BETA and relay its output to stdout and the run log
    Run {
        #[command(flatten)]
        form: FormArgs,
    },
}

/// Mirrors the fields of one mode tab. Unset options keep the form default.
#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    mode: Mode,
    /// Peaks bed file
    #[arg(long)]
    peaks: Option<PathBuf>,
    /// Built-in genome (hg38, hg19, hg18, mm10, mm9) or Other
    #[arg(long)]
    genome: Option<Genome>,
    /// RefGene file, only with --genome Other
    #[arg(long)]
    reference: Option<PathBuf>,
    /// Use CTCF boundaries to assign peaks to genes
    #[arg(long)]
    bl: bool,
    /// CTCF boundary bed file, only with --bl and a genome other than hg19/mm9
    #[arg(long)]
    boundary: Option<PathBuf>,
    #[arg(long)]
    peak_number: Option<String>,
    #[arg(long)]
    distance: Option<String>,
    /// Output file prefix; whitespace is joined with '-'
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Tab-delimited expression file (plus, basic)
    #[arg(long)]
    expression: Option<PathBuf>,
    /// DESeq2, Limma, EdgeR, Cuffdiff, BSF or Other (plus, basic)
    #[arg(long)]
    kind: Option<ExpressionKind>,
    #[arg(long)]
    info_id: Option<String>,
    #[arg(long)]
    info_change: Option<String>,
    #[arg(long)]
    info_stat: Option<String>,
    /// Treat expression IDs as official gene symbols (plus, basic)
    #[arg(long)]
    gene_symbols: bool,
    /// score or distance (plus, basic)
    #[arg(long)]
    method: Option<Method>,
    #[arg(long)]
    fdr: Option<String>,
    #[arg(long)]
    gene_amount: Option<String>,
    #[arg(long)]
    pvalue_cutoff: Option<String>,
    /// Fasta genome sequence (plus)
    #[arg(long)]
    genome_sequence: Option<PathBuf>,
    #[arg(long)]
    motif_number: Option<String>,
}

impl FormArgs {
    /// Applies choices in the order the window would: dropdowns and
    /// checkboxes first so enablement is settled before files are set.
    fn into_form(self, config: &AppConfig) -> Result<FormState> {
        let mut form = FormState::with_output_dir(self.mode, config.output_dir.clone());
        if let Some(genome) = self.genome {
            form.set_genome(genome);
        }
        form.set_boundary_limit(self.bl);
        if let Some(kind) = self.kind {
            form.set_kind(kind)?;
        }
        if let Some(method) = self.method {
            form.set_method(method)?;
        }
        if self.gene_symbols {
            form.set_gene_symbols(true)?;
        }
        if let Some(dir) = self.output_dir {
            form.set_output_dir(dir);
        }

        let files = [
            (FileField::Peaks, self.peaks),
            (FileField::Reference, self.reference),
            (FileField::Boundary, self.boundary),
            (FileField::Expression, self.expression),
            (FileField::GenomeSequence, self.genome_sequence),
        ];
        for (field, path) in files {
            if path.is_some() {
                form.set_file(field, path)?;
            }
        }

        let texts = [
            (TextField::PeakNumber, self.peak_number),
            (TextField::Distance, self.distance),
            (TextField::NamePrefix, self.name),
            (TextField::InfoId, self.info_id),
            (TextField::InfoChange, self.info_change),
            (TextField::InfoStat, self.info_stat),
            (TextField::Fdr, self.fdr),
            (TextField::GeneAmount, self.gene_amount),
            (TextField::PvalueCutoff, self.pvalue_cutoff),
            (TextField::MotifNumber, self.motif_number),
        ];
        for (field, value) in texts {
            if let Some(value) = value {
                form.set_text(field, value)?;
            }
        }
        Ok(form)
    }
}

#[derive(Serialize)]
struct PreviewOutput<'a> {
    command: String,
    program: &'a str,
    args: &'a [String],
    ready: bool,
    missing: Vec<Requirement>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(bin) = cli.beta_bin {
        config.beta_program = bin;
    }

    match cli.command {
        Commands::Preview { form, json } => cmd_preview(form.into_form(&config)?, &config, json),
        Commands::Run { form } => cmd_run(form.into_form(&config)?, &config),
    }
}

fn cmd_preview(form: FormState, config: &AppConfig, json: bool) -> Result<()> {
    let command = build_command(&form, &config.beta_program);
    let missing = form.missing_requirements();
    if json {
        let output = PreviewOutput {
            command: command.to_string(),
            program: &command.program,
            args: &command.args,
            ready: missing.is_empty(),
            missing,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{command}");
        if !missing.is_empty() {
            log::warn!("not runnable yet; missing {}", describe(&missing));
        }
    }
    Ok(())
}

fn cmd_run(form: FormState, config: &AppConfig) -> Result<()> {
    let missing = form.missing_requirements();
    if !missing.is_empty() {
        bail!(
            "BETA {} cannot run yet: missing {}",
            form.mode(),
            describe(&missing)
        );
    }
    let mut session =
        RunSession::launch(&form, &config.beta_program).context("starting BETA run")?;
    if let Some(path) = session.log_path() {
        info!("mirroring output to {}", path.display());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    while !session.is_finished() {
        for line in session.wait_for_output(config.poll_interval()) {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
    }
    Ok(())
}

fn describe(missing: &[Requirement]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
