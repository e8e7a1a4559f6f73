use beta_lib::form::FileField;
use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// Text shown around one file picker row.
pub struct PickerText {
    pub button: &'static str,
    pub title: &'static str,
    pub placeholder: &'static str,
    pub selected: &'static str,
    pub hint: &'static str,
}

pub fn picker_text(field: FileField) -> PickerText {
    match field {
        FileField::Peaks => PickerText {
            button: "Browse peak files",
            title: "Select Peaks File",
            placeholder: "No peaks file selected.",
            selected: "Peaks file",
            hint: "The bed format of peaks binding sites (with no header).\n\
                   (BETA support 3 or 5 columns bed format, CHROM, START, END (NAME, SCORE)",
        },
        FileField::Expression => PickerText {
            button: "Browse expression files",
            title: "Select Expression File",
            placeholder: "No expression file selected.",
            selected: "Expression file",
            hint: "Select a tab-delimited expression file (with no header).",
        },
        FileField::Reference => PickerText {
            button: "Browse reference genome files",
            title: "Select Reference Genome File",
            placeholder: "No reference genome file selected.\n(Required only if genome is Other).",
            selected: "Reference Genome file",
            hint: "RefGene info file downloaded from UCSC genome browser.\n\
                   Input this file only if your genome is neither hg18, hg19, hg38, mm9, or mm10.",
        },
        FileField::Boundary => PickerText {
            button: "Browse CTCF boundary files",
            title: "Select CTCF Boundary File",
            placeholder: "No CTCF boundary file selected.",
            selected: "CTCF file",
            hint: "CTCF conserved peaks bed file.\n\
                   Use this only when you set boundary limit and the genome is neither hg19 nor mm9.",
        },
        FileField::GenomeSequence => PickerText {
            button: "Browse genome sequence files",
            title: "Select Genome Sequence File",
            placeholder: "No genome sequence file selected.",
            selected: "Genome sequence file",
            hint: "Genome sequence file in fasta format, used for motif analysis.",
        },
    }
}

fn filters(field: FileField) -> &'static [(&'static str, &'static [&'static str])] {
    match field {
        FileField::Peaks => &[
            ("Bed", &["bed"]),
            ("NarrowPeak", &["narrowPeak"]),
            ("BroadPeak", &["broadPeak"]),
        ],
        FileField::Expression => &[("Tab-delimited", &["tsv"])],
        FileField::Reference => &[
            ("GTF", &["gtf"]),
            ("Text", &["txt"]),
            ("Fasta", &["fa"]),
            ("Tab-delimited", &["tsv"]),
            ("Comma-separated", &["csv"]),
        ],
        FileField::Boundary => &[("Bed", &["bed"])],
        FileField::GenomeSequence => &[("Fasta", &["fa", "fasta"])],
    }
}

/// Native picker for `field`. `None` when the user cancels.
pub fn pick_file(field: FileField) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title(picker_text(field).title)
        .set_directory(".");
    for &(name, extensions) in filters(field) {
        dialog = dialog.add_filter(name, extensions);
    }
    dialog.add_filter("All files", &["*"]).pick_file()
}

pub fn pick_output_dir() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select output directory")
        .set_directory(".")
        .pick_folder()
}

/// Label next to a picker: the chosen file's base name or the placeholder.
pub fn file_label(field: FileField, path: Option<&Path>) -> String {
    let text = picker_text(field);
    match path {
        Some(path) => format!("{}:\n{}", text.selected, base_name(path)),
        None => text.placeholder.to_string(),
    }
}

pub fn output_dir_label(dir: &Path) -> String {
    let name = base_name(dir);
    if name.is_empty() || name == "." {
        "Output directory: ./".to_string()
    } else {
        format!("Output directory: {}/", name.trim_end_matches('/'))
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
