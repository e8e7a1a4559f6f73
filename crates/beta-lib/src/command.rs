use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::form::{FileField, FormState, TextField};
use crate::mode::Mode;

pub const DEFAULT_PROGRAM: &str = "BETA";

/// Fully assembled invocation. `args` is what gets spawned; `Display`
/// renders the line shown in the form and written to the run log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BetaCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl BetaCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// True when `flag` appears as its own argument.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|arg| arg == flag)
    }

    /// Value following `flag`, if present.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|idx| self.args.get(idx + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for BetaCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(arg: &str) -> String {
    if !arg.is_empty() && !arg.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Accumulates arguments in order.
struct ArgList(Vec<String>);

impl ArgList {
    fn flag(&mut self, flag: &str) {
        self.0.push(flag.to_string());
    }

    fn pair(&mut self, flag: &str, value: impl Into<String>) {
        self.0.push(flag.to_string());
        self.0.push(value.into());
    }

    fn text(&mut self, flag: &str, value: &str) {
        if !value.is_empty() {
            self.pair(flag, value);
        }
    }

    fn path(&mut self, flag: &str, value: Option<&Path>) {
        if let Some(path) = value {
            self.pair(flag, path.display().to_string());
        }
    }
}

/// Map the form onto `program <mode> [flags...]` in BETA's documented order.
pub fn build_command(form: &FormState, program: &str) -> BetaCommand {
    let mode = form.mode();
    let mut args = ArgList(vec![mode.cli_name().to_string()]);

    if form.genome().is_builtin() {
        args.pair("-g", form.genome().label());
    } else {
        args.path("-r", form.file(FileField::Reference));
    }
    if form.boundary_limit() {
        args.flag("--bl");
    }
    args.text("--pn", form.text(TextField::PeakNumber));
    args.text("-d", form.text(TextField::Distance));
    args.path("-o", Some(form.output_dir()).filter(|dir| !dir.as_os_str().is_empty()));
    args.text("-n", &form.joined_name_prefix());
    args.path("--bf", form.file(FileField::Boundary));

    if mode.uses_expression() {
        if form.gene_symbols() {
            args.flag("--gname2");
        }
        args.path("-e", form.file(FileField::Expression));
        args.pair("-k", form.kind().code());
        let id = form.text(TextField::InfoId);
        let change = form.text(TextField::InfoChange);
        let stat = form.text(TextField::InfoStat);
        if !id.is_empty() && !change.is_empty() && !stat.is_empty() {
            args.pair("--info", format!("{id},{change},{stat}"));
        }
        args.pair("--method", form.method().label());
        args.text("--df", form.text(TextField::Fdr));
        args.text("--da", form.text(TextField::GeneAmount));
        args.text("-c", form.text(TextField::PvalueCutoff));
        if mode == Mode::Plus {
            args.path("--gs", form.file(FileField::GenomeSequence));
            args.text("--mn", form.text(TextField::MotifNumber));
        }
    }

    args.path("-p", form.file(FileField::Peaks));

    BetaCommand {
        program: program.to_string(),
        args: args.0,
    }
}
