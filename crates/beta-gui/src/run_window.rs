use beta_lib::RunSession;
use eframe::egui::{self, Color32, RichText, ScrollArea};

/// Floating output window for one launched run.
pub struct RunWindow {
    id: u64,
    session: RunSession,
    open: bool,
}

impl RunWindow {
    pub fn new(id: u64, session: RunSession) -> Self {
        Self {
            id,
            session,
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_running(&self) -> bool {
        !self.session.is_finished()
    }

    /// Pull whatever the relay has queued; never blocks.
    pub fn poll(&mut self) {
        self.session.drain();
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        let Self { id, session, open } = self;
        egui::Window::new(format!("{} #{}", session.title(), id))
            .id(egui::Id::new(("run-window", *id)))
            .open(open)
            .default_size([800.0, 600.0])
            .resizable(true)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if session.is_finished() {
                        ui.colored_label(Color32::LIGHT_GREEN, "Finished");
                    } else {
                        ui.spinner();
                        ui.label("Running");
                    }
                    match session.log_path() {
                        Some(path) => ui.label(format!("Log: {}", path.display())),
                        None => ui.colored_label(Color32::LIGHT_RED, "No log file"),
                    };
                });
                ui.separator();
                ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in session.lines() {
                            ui.label(RichText::new(line).monospace());
                        }
                    });
            });
    }
}
