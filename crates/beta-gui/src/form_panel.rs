use beta_lib::{
    build_command, ExpressionKind, FileField, FormState, Genome, Method, Mode, TextField,
};
use eframe::egui::{self, Button, ComboBox, Grid, RichText, TextEdit};
use log::debug;
use std::path::PathBuf;

use crate::pickers::{file_label, output_dir_label, pick_file, pick_output_dir, picker_text};

/// One row in a mode tab, in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Row {
    File(FileField),
    Text(TextField),
    Kind,
    Genome,
    Method,
    GeneSymbols,
    BoundaryLimit,
    OutputDir,
}

pub fn required_rows(mode: Mode) -> Vec<Row> {
    let mut rows = Vec::new();
    if mode.uses_expression() {
        rows.extend([
            Row::File(FileField::Expression),
            Row::Kind,
            Row::Text(TextField::InfoId),
            Row::Text(TextField::InfoChange),
            Row::Text(TextField::InfoStat),
            Row::Text(TextField::Fdr),
            Row::Text(TextField::GeneAmount),
        ]);
    }
    rows.extend([
        Row::File(FileField::Peaks),
        Row::Genome,
        Row::File(FileField::Reference),
    ]);
    if mode.uses_expression() {
        rows.extend([Row::Method, Row::Text(TextField::PvalueCutoff)]);
    }
    if mode.uses_motifs() {
        rows.extend([
            Row::File(FileField::GenomeSequence),
            Row::Text(TextField::MotifNumber),
        ]);
    }
    rows
}

pub fn optional_rows(mode: Mode) -> Vec<Row> {
    let mut rows = Vec::new();
    if mode.uses_expression() {
        rows.push(Row::GeneSymbols);
    }
    rows.extend([
        Row::BoundaryLimit,
        Row::File(FileField::Boundary),
        Row::Text(TextField::PeakNumber),
        Row::Text(TextField::Distance),
        Row::Text(TextField::NamePrefix),
        Row::OutputDir,
    ]);
    rows
}

pub enum PanelAction {
    Run,
}

/// A mode tab: its form plus the last status message.
pub struct FormPanel {
    pub form: FormState,
    status: Option<String>,
}

impl FormPanel {
    pub fn new(mode: Mode, output_dir: PathBuf) -> Self {
        Self {
            form: FormState::with_output_dir(mode, output_dir),
            status: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.form.mode()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn show(&mut self, ui: &mut egui::Ui, program: &str) -> Option<PanelAction> {
        let mode = self.mode();
        let mut action = None;

        ui.add_space(6.0);
        ui.label(RichText::new(mode.description()).strong().size(15.0));
        ui.add_space(6.0);

        ui.group(|ui| {
            ui.label("Command to be executed:");
            let command = build_command(&self.form, program).to_string();
            ui.add(egui::Label::new(RichText::new(command).monospace()).wrap());
        });

        section_heading(ui, "--------- REQUIRED PARAMETERS ---------");
        Grid::new(("required", mode.cli_name()))
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                for row in required_rows(mode) {
                    self.show_row(ui, row);
                    ui.end_row();
                }
            });

        section_heading(ui, "--------- OPTIONAL PARAMETERS ---------");
        Grid::new(("optional", mode.cli_name()))
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                for row in optional_rows(mode) {
                    self.show_row(ui, row);
                    ui.end_row();
                }
            });

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            let missing = self.form.missing_requirements();
            let run = ui
                .add_enabled(
                    missing.is_empty(),
                    Button::new(RichText::new(format!("Run {}", mode.title())).strong().size(16.0)),
                )
                .on_disabled_hover_text(missing_text(&missing));
            if run.clicked() {
                action = Some(PanelAction::Run);
            }
            if ui.button(RichText::new("Reset to Default").size(15.0)).clicked() {
                self.form.reset();
                self.status = Some("Form reset to defaults".into());
            }
            if let Some(status) = &self.status {
                ui.label(status);
            }
        });

        action
    }

    fn show_row(&mut self, ui: &mut egui::Ui, row: Row) {
        match row {
            Row::File(field) => self.file_row(ui, field),
            Row::Text(field) => self.text_row(ui, field),
            Row::Kind => {
                ui.label("Kind of expression file:");
                let mut selected = self.form.kind();
                ComboBox::from_id_salt(("kind", self.mode().cli_name()))
                    .selected_text(selected.label())
                    .show_ui(ui, |ui| {
                        for kind in ExpressionKind::all() {
                            ui.selectable_value(&mut selected, kind, kind.label());
                        }
                    })
                    .response
                    .on_hover_text("Select the kind of expression file.");
                if selected != self.form.kind() {
                    self.apply(|form| form.set_kind(selected));
                }
            }
            Row::Genome => {
                ui.label("Reference genome:");
                let mut selected = self.form.genome();
                ComboBox::from_id_salt(("genome", self.mode().cli_name()))
                    .selected_text(selected.label())
                    .show_ui(ui, |ui| {
                        for genome in Genome::all() {
                            ui.selectable_value(&mut selected, genome, genome.label());
                        }
                    })
                    .response
                    .on_hover_text("Select the reference genome.");
                if selected != self.form.genome() {
                    self.form.set_genome(selected);
                }
            }
            Row::Method => {
                ui.label("Method for TF/CR function prediction:");
                let mut selected = self.form.method();
                ComboBox::from_id_salt(("method", self.mode().cli_name()))
                    .selected_text(selected.label())
                    .show_ui(ui, |ui| {
                        for method in Method::all() {
                            ui.selectable_value(&mut selected, method, method.label());
                        }
                    })
                    .response
                    .on_hover_text(
                        "Define method for TF/CR function prediction.\n\
                         score for regulatory potential, distance for the distance to the proximal binding peak.",
                    );
                if selected != self.form.method() {
                    self.apply(|form| form.set_method(selected));
                }
            }
            Row::GeneSymbols => {
                let mut checked = self.form.gene_symbols();
                ui.checkbox(&mut checked, "IDs are gene symbols").on_hover_text(
                    "Gene/transcript IDs in expression file will be considered as official gene symbols.",
                );
                ui.label("");
                if checked != self.form.gene_symbols() {
                    self.apply(|form| form.set_gene_symbols(checked));
                }
            }
            Row::BoundaryLimit => {
                let mut checked = self.form.boundary_limit();
                if ui
                    .checkbox(&mut checked, "CTCF boundary limit")
                    .on_hover_text("Use CTCF boundary to get a peak's associated gene.")
                    .changed()
                {
                    self.form.set_boundary_limit(checked);
                }
                ui.label("");
            }
            Row::OutputDir => {
                if ui
                    .button("Browse output directories")
                    .on_hover_text("Directory to store all BETA analysis output files.")
                    .clicked()
                {
                    if let Some(dir) = pick_output_dir() {
                        self.form.set_output_dir(dir);
                    }
                }
                ui.label(output_dir_label(self.form.output_dir()));
            }
        }
    }

    fn file_row(&mut self, ui: &mut egui::Ui, field: FileField) {
        let text = picker_text(field);
        let enabled = self.form.file_enabled(field);
        if ui
            .add_enabled(enabled, Button::new(text.button))
            .on_hover_text(text.hint)
            .on_disabled_hover_text(text.hint)
            .clicked()
        {
            let picked = pick_file(field);
            self.apply(|form| form.set_file(field, picked));
        }
        ui.label(file_label(field, self.form.file(field)));
    }

    fn text_row(&mut self, ui: &mut egui::Ui, field: TextField) {
        ui.label(field.label()).on_hover_text(field.hint());
        let width = match field {
            TextField::InfoId | TextField::InfoChange | TextField::InfoStat => 50.0,
            _ => 100.0,
        };
        let mut buffer = self.form.text(field).to_owned();
        let response = ui.add(TextEdit::singleline(&mut buffer).desired_width(width));
        if response.changed() {
            if let Err(err) = self.form.set_text(field, buffer) {
                debug!("ignored keystroke: {err}");
            }
        }
    }

    fn apply(&mut self, edit: impl FnOnce(&mut FormState) -> beta_lib::Result<()>) {
        if let Err(err) = edit(&mut self.form) {
            self.status = Some(err.to_string());
        }
    }
}

fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.add_space(8.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(text).strong());
    });
    ui.add_space(4.0);
}

fn missing_text(missing: &[beta_lib::Requirement]) -> String {
    let items: Vec<String> = missing.iter().map(|req| format!("- {req}")).collect();
    format!("Still needed:\n{}", items.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_rows(mode: Mode) -> Vec<Row> {
        let mut rows = required_rows(mode);
        rows.extend(optional_rows(mode));
        rows
    }

    #[test]
    fn every_available_field_gets_exactly_one_row() {
        for mode in Mode::all() {
            let rows = all_rows(mode);
            for field in TextField::all() {
                let count = rows.iter().filter(|row| **row == Row::Text(field)).count();
                let expected = usize::from(field.available_in(mode));
                assert_eq!(count, expected, "{field:?} in {mode}");
            }
            for field in FileField::all() {
                let count = rows.iter().filter(|row| **row == Row::File(field)).count();
                let expected = usize::from(field.available_in(mode));
                assert_eq!(count, expected, "{field:?} in {mode}");
            }
        }
    }

    #[test]
    fn minus_layout_is_short() {
        assert_eq!(
            required_rows(Mode::Minus),
            vec![
                Row::File(FileField::Peaks),
                Row::Genome,
                Row::File(FileField::Reference)
            ]
        );
        assert!(!optional_rows(Mode::Minus).contains(&Row::GeneSymbols));
    }

    #[test]
    fn missing_text_lists_requirements() {
        let form = FormState::new(Mode::Plus);
        let text = missing_text(&form.missing_requirements());
        assert!(text.contains("a peaks file"));
        assert!(text.contains("a genome sequence file"));
    }
}
