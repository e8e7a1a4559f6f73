use anyhow::{anyhow, Context, Result};
use beta_lib::{AppConfig, Mode, RunSession};
use clap::Parser;
use eframe::{egui, egui::ViewportBuilder};
use env_logger::Env;
use log::{info, warn};
use std::path::PathBuf;

mod form_panel;
mod pickers;
mod run_window;

use form_panel::{FormPanel, PanelAction};
use run_window::RunWindow;

#[derive(Parser)]
#[command(
    name = "beta-gui",
    version,
    about = "Desktop front-end for the BETA target-analysis tool"
)]
struct Cli {
    /// TOML config file (defaults to $BETA_GUI_CONFIG or the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
    /// BETA executable to launch, overriding the config
    #[arg(long)]
    beta_bin: Option<String>,
    /// Logging verbosity (e.g., debug, info, warn)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(bin) = cli.beta_bin {
        config.beta_program = bin;
    }
    info!(
        "Starting beta-gui with program={} output_dir={}",
        config.beta_program,
        config.output_dir.display()
    );

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([750.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "BETA",
        native_options,
        Box::new(move |_cc| Ok(Box::new(BetaApp::new(config)))),
    )
    .map_err(|err| anyhow!("BETA window failed: {err}"))
}

#[derive(Copy, Clone, PartialEq)]
enum GuiTab {
    Mode(Mode),
    Citation,
}

impl GuiTab {
    fn title(&self) -> &'static str {
        match self {
            GuiTab::Mode(mode) => mode.title(),
            GuiTab::Citation => "Citation",
        }
    }

    fn all() -> [GuiTab; 4] {
        [
            GuiTab::Mode(Mode::Plus),
            GuiTab::Mode(Mode::Basic),
            GuiTab::Mode(Mode::Minus),
            GuiTab::Citation,
        ]
    }
}

struct BetaApp {
    config: AppConfig,
    active_tab: GuiTab,
    panels: Vec<FormPanel>,
    runs: Vec<RunWindow>,
    next_run_id: u64,
}

impl BetaApp {
    fn new(config: AppConfig) -> Self {
        let panels = Mode::all()
            .into_iter()
            .map(|mode| FormPanel::new(mode, config.output_dir.clone()))
            .collect();
        Self {
            config,
            active_tab: GuiTab::Mode(Mode::Plus),
            panels,
            runs: Vec::new(),
            next_run_id: 1,
        }
    }

    fn launch(&mut self, index: usize) {
        let panel = &mut self.panels[index];
        match RunSession::launch(&panel.form, &self.config.beta_program) {
            Ok(session) => {
                let id = self.next_run_id;
                self.next_run_id += 1;
                panel.set_status(format!("Started run #{id}"));
                self.runs.push(RunWindow::new(id, session));
            }
            Err(err) => {
                warn!("could not start {}: {err}", panel.mode().title());
                panel.set_status(format!("Could not start run: {err}"));
            }
        }
    }

    fn show_mode_tab(&mut self, ui: &mut egui::Ui, mode: Mode) {
        let Some(index) = self.panels.iter().position(|panel| panel.mode() == mode) else {
            return;
        };
        let program = self.config.beta_program.clone();
        let action = egui::ScrollArea::vertical()
            .id_salt(("form", mode.cli_name()))
            .auto_shrink([false; 2])
            .show(ui, |ui| self.panels[index].show(ui, &program))
            .inner;
        if let Some(PanelAction::Run) = action {
            self.launch(index);
        }
    }

    fn show_citation_tab(&self, ui: &mut egui::Ui) {
        ui.add_space(10.0);
        ui.label(egui::RichText::new("BETA Paper:").strong().size(15.0));
        ui.label(
            "Wang, S., Sun, H., Ma, J., Zang, C., Wang, C., Wang, J., ... & Liu, X. S. (2013). \
             Target analysis by integration of transcriptome and ChIP-seq data with BETA. \
             Nature protocols, 8(12), 2502-2515.",
        );
        ui.add_space(10.0);
        ui.label(egui::RichText::new("BETA Documentation:").strong().size(15.0));
        ui.hyperlink("http://cistrome.org/BETA/");
        ui.add_space(10.0);
        ui.label(egui::RichText::new("GUI Contact:").strong().size(15.0));
        ui.label("earezza@ohri.ca");
        ui.hyperlink("https://github.com/earezza");
    }
}

impl eframe::App for BetaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for run in &mut self.runs {
            run.poll();
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in GuiTab::all() {
                    let selected = self.active_tab == tab;
                    if ui.selectable_label(selected, tab.title()).clicked() {
                        self.active_tab = tab;
                    }
                }
            });
        });

        egui::TopBottomPanel::bottom("bottom").show(ctx, |ui| {
            let running = self.runs.iter().filter(|run| run.is_running()).count();
            ui.horizontal(|ui| {
                ui.label(format!("BETA executable: {}", self.config.beta_program));
                ui.separator();
                ui.label(format!("{running} run(s) in progress"));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.active_tab {
            GuiTab::Mode(mode) => self.show_mode_tab(ui, mode),
            GuiTab::Citation => self.show_citation_tab(ui),
        });

        for run in &mut self.runs {
            run.show(ctx);
        }
        let before = self.runs.len();
        self.runs.retain(RunWindow::is_open);
        if self.runs.len() < before {
            info!("run window closed; its process keeps running but is no longer logged");
        }

        if self.runs.iter().any(RunWindow::is_running) {
            ctx.request_repaint_after(self.config.poll_interval());
        }
    }
}
