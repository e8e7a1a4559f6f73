use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::{error::Error, fs, path::PathBuf};
use tempfile::{tempdir, TempDir};

fn config_dir(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn preview_prints_default_minus_command() {
    let (_dir, config) = config_dir("");
    let mut cmd = cargo_bin_cmd!("beta");
    cmd.args(["preview", "--mode", "minus", "--config"])
        .arg(&config);
    cmd.assert()
        .success()
        .stdout("BETA minus --pn 10000 -d 100000 -o ./\n");
}

#[test]
fn preview_orders_flags_like_the_form() {
    let (_dir, config) = config_dir("beta_program = \"/opt/BETA\"\n");
    let mut cmd = cargo_bin_cmd!("beta");
    cmd.arg("--config").arg(&config).args([
        "preview",
        "--mode",
        "basic",
        "--peaks",
        "peaks.bed",
        "--genome",
        "hg19",
        "--expression",
        "expr.tsv",
        "--kind",
        "cuffdiff",
        "--method",
        "distance",
        "--name",
        "AR treated",
        "--fdr",
        "0.05",
    ]);
    cmd.assert().success().stdout(
        "/opt/BETA basic -g hg19 --pn 10000 -d 100000 -o ./ -n AR-treated -e expr.tsv -k CUF \
         --info 2,10,13 --method distance --df 0.05 --da 0.5 -c 0.001 -p peaks.bed\n",
    );
}

#[test]
fn preview_json_reports_missing_requirements() -> Result<(), Box<dyn Error>> {
    let (_dir, config) = config_dir("");
    let mut cmd = cargo_bin_cmd!("beta");
    cmd.arg("--config").arg(&config).args([
        "preview",
        "--mode",
        "plus",
        "--peaks",
        "peaks.bed",
        "--json",
    ]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let json: Value = serde_json::from_slice(&output)?;
    assert_eq!(json["ready"], false);
    assert_eq!(json["program"], "BETA");
    assert_eq!(json["args"][0], "plus");
    assert_eq!(
        json["missing"],
        serde_json::json!(["genome_reference", "expression_file", "genome_sequence_file"])
    );
    Ok(())
}

#[test]
fn beta_bin_flag_overrides_config() {
    let (_dir, config) = config_dir("beta_program = \"from-config\"\n");
    let mut cmd = cargo_bin_cmd!("beta");
    cmd.arg("--config")
        .arg(&config)
        .args(["--beta-bin", "from-flag", "preview", "--mode", "minus"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    assert!(String::from_utf8(output).unwrap().starts_with("from-flag minus"));
}

#[test]
fn rejects_fields_outside_the_mode() {
    let (_dir, config) = config_dir("");
    let mut cmd = cargo_bin_cmd!("beta");
    cmd.arg("--config").arg(&config).args([
        "preview",
        "--mode",
        "minus",
        "--expression",
        "expr.tsv",
    ]);
    cmd.assert().failure();
}

#[test]
fn rejects_reference_with_builtin_genome() {
    let (_dir, config) = config_dir("");
    let mut cmd = cargo_bin_cmd!("beta");
    cmd.arg("--config").arg(&config).args([
        "preview",
        "--mode",
        "minus",
        "--genome",
        "mm10",
        "--reference",
        "refGene.txt",
    ]);
    cmd.assert().failure();
}

#[test]
fn rejects_non_numeric_peak_number() {
    let (_dir, config) = config_dir("");
    let mut cmd = cargo_bin_cmd!("beta");
    cmd.arg("--config").arg(&config).args([
        "preview",
        "--mode",
        "minus",
        "--peak-number",
        "lots",
    ]);
    cmd.assert().failure();
}
