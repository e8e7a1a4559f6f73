use chrono::Local;
use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use log::warn;
use std::path::Path;
use std::time::Duration;

use crate::command::{build_command, BetaCommand};
use crate::error::Result;
use crate::form::FormState;
use crate::mode::Mode;
use crate::relay::{spawn_relay, RelayEvent, COMPLETED_MESSAGE};
use crate::run_log::RunLog;

/// Display-side half of one run: the accumulated output plus its log file.
pub struct RunSession {
    mode: Mode,
    command: BetaCommand,
    lines: Vec<String>,
    events: Receiver<RelayEvent>,
    log: Option<RunLog>,
    /// Shown right after the `Command:` line when the log could not be opened.
    log_notice: Option<String>,
    finished: bool,
}

impl RunSession {
    /// Build the command from `form` and start it. The run log goes into
    /// the form's output directory.
    pub fn launch(form: &FormState, program: &str) -> Result<Self> {
        let command = build_command(form, program);
        Self::start(
            form.mode(),
            command,
            form.output_dir(),
            &form.joined_name_prefix(),
        )
    }

    pub fn start(mode: Mode, command: BetaCommand, log_dir: &Path, prefix: &str) -> Result<Self> {
        let (log, log_notice) = match RunLog::create(log_dir, mode, prefix, Local::now()) {
            Ok(log) => (Some(log), None),
            Err(err) => {
                warn!("{err}");
                (None, Some(format!("Run log unavailable: {err}")))
            }
        };
        let events = spawn_relay(command.clone())?;
        Ok(Self {
            mode,
            command,
            lines: Vec::new(),
            events,
            log,
            log_notice,
            finished: false,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn title(&self) -> String {
        format!("Running {}", self.mode.log_name())
    }

    pub fn command(&self) -> &BetaCommand {
        &self.command
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log.as_ref().map(RunLog::path)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Take everything queued so far without blocking. Returns the lines
    /// appended by this call.
    pub fn drain(&mut self) -> &[String] {
        let start = self.lines.len();
        while !self.finished {
            match self.events.try_recv() {
                Ok(event) => self.accept(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.finish(),
            }
        }
        &self.lines[start..]
    }

    /// Block up to `timeout` for the next event, then drain the rest.
    pub fn wait_for_output(&mut self, timeout: Duration) -> &[String] {
        let start = self.lines.len();
        if !self.finished {
            match self.events.recv_timeout(timeout) {
                Ok(event) => self.accept(event),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => self.finish(),
            }
        }
        self.drain();
        &self.lines[start..]
    }

    fn accept(&mut self, event: RelayEvent) {
        match event {
            RelayEvent::Line(line) => {
                self.push(line);
                if let Some(notice) = self.log_notice.take() {
                    self.push(notice);
                }
            }
            RelayEvent::Finished => self.finish(),
        }
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            self.push(COMPLETED_MESSAGE.to_string());
        }
    }

    fn push(&mut self, line: String) {
        if let Some(log) = self.log.as_mut() {
            if let Err(err) = log.append(&line) {
                warn!("dropping run log {}: {err}", log.path().display());
                self.log = None;
            }
        }
        self.lines.push(line);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::form::{FileField, TextField};
    use crate::mode::Genome;
    use std::fs;
    use std::time::Instant;
    use tempfile::tempdir;

    fn run_to_end(session: &mut RunSession) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !session.is_finished() && Instant::now() < deadline {
            session.wait_for_output(Duration::from_millis(10));
        }
        assert!(session.is_finished(), "run did not finish in time");
    }

    #[test]
    fn display_and_log_agree_line_for_line() {
        let dir = tempdir().unwrap();
        let cmd = BetaCommand::new("sh", ["-c", "for i in 1 2 3 4 5; do echo step $i; done"]);
        let mut session = RunSession::start(Mode::Minus, cmd, dir.path(), "demo").unwrap();
        run_to_end(&mut session);

        let lines = session.lines().to_vec();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("Command: sh -c"));
        assert_eq!(&lines[1..6], &["step 1", "step 2", "step 3", "step 4", "step 5"]);
        assert_eq!(lines[6], COMPLETED_MESSAGE);

        let path = session.log_path().unwrap().to_path_buf();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("BETA-minus-demo_"));
        assert!(name.ends_with(".log"));
        let logged: Vec<String> = fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(|record| {
                record
                    .strip_prefix("INFO : BETA-minus : ")
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(logged, lines);
    }

    #[test]
    fn drain_never_blocks_and_finishes_once() {
        let dir = tempdir().unwrap();
        let cmd = BetaCommand::new("sh", ["-c", "sleep 0.2; echo late"]);
        let mut session = RunSession::start(Mode::Basic, cmd, dir.path(), "").unwrap();
        let started = Instant::now();
        session.drain();
        assert!(started.elapsed() < Duration::from_millis(150));
        run_to_end(&mut session);
        assert!(session.drain().is_empty());
        let completed = session
            .lines()
            .iter()
            .filter(|line| line.as_str() == COMPLETED_MESSAGE)
            .count();
        assert_eq!(completed, 1);
        assert!(session.lines().iter().any(|line| line == "late"));
    }

    #[test]
    fn launch_uses_form_output_dir_and_prefix() {
        let dir = tempdir().unwrap();
        let mut form = FormState::with_output_dir(Mode::Minus, dir.path());
        form.set_genome(Genome::Hg19);
        form.set_file(FileField::Peaks, Some("peaks.bed".into())).unwrap();
        form.set_text(TextField::NamePrefix, "AR run").unwrap();
        let mut session = RunSession::launch(&form, "echo").unwrap();
        run_to_end(&mut session);

        assert_eq!(session.title(), "Running BETA-minus");
        assert!(session
            .lines()
            .iter()
            .any(|line| line.starts_with("minus -g hg19 --pn 10000")));
        let log = session.log_path().unwrap();
        assert_eq!(log.parent(), Some(dir.path()));
        assert!(log
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("BETA-minus-AR-run_"));
    }

    #[test]
    fn unwritable_log_dir_does_not_stop_the_run() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();
        let cmd = BetaCommand::new("sh", ["-c", "echo still runs"]);
        let mut session = RunSession::start(Mode::Plus, cmd, &blocker, "").unwrap();
        run_to_end(&mut session);
        assert!(session.log_path().is_none());
        let lines = session.lines();
        assert!(lines[0].starts_with("Command: sh -c"));
        assert!(lines[1].starts_with("Run log unavailable"));
        assert_eq!(&lines[2..], &["still runs", COMPLETED_MESSAGE]);
    }

    #[test]
    fn mixed_stream_output_matches_log() {
        let dir = tempdir().unwrap();
        let script = "for i in 1 2 3 4 5 6; do echo out $i; echo err $i >&2; done";
        let cmd = BetaCommand::new("sh", ["-c", script]);
        let mut session = RunSession::start(Mode::Basic, cmd, dir.path(), "mixed").unwrap();
        run_to_end(&mut session);

        let lines = session.lines().to_vec();
        let expected: Vec<String> = (1..=6)
            .flat_map(|i| [format!("out {i}"), format!("err {i}")])
            .collect();
        assert_eq!(lines.len(), 14);
        assert_eq!(&lines[1..13], expected.as_slice());
        assert_eq!(lines[13], COMPLETED_MESSAGE);

        let logged: Vec<String> = fs::read_to_string(session.log_path().unwrap())
            .unwrap()
            .lines()
            .map(|record| {
                record
                    .strip_prefix("INFO : BETA-basic : ")
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(logged, lines);
    }
}
