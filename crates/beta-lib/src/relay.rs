//! Child-process output relay.
//!
//! One worker thread per run owns the child. Its stdout and stderr share a
//! single pipe, so lines arrive in the order the tool wrote them, and the
//! worker drains that pipe line by line into an unbounded channel. The
//! receiving side is polled without blocking by
//! [`crate::session::RunSession`].

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};
use os_pipe::{pipe, PipeReader};
use std::io::{self, BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::thread;

use crate::command::BetaCommand;
use crate::error::Result;

pub const COMPLETED_MESSAGE: &str = "Process completed.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// One non-blank output line, line terminator stripped.
    Line(String),
    /// The child exited and its output hit EOF. Always the last event.
    Finished,
}

/// Start `command` on a background worker and return the event stream.
///
/// The first event is always `Command: <command>`. Failure to spawn the
/// program is reported as a line, never as an error, so the caller sees it
/// exactly where the tool's own output would have appeared.
pub fn spawn_relay(command: BetaCommand) -> Result<Receiver<RelayEvent>> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("beta-relay".into())
        .spawn(move || relay_child(command, tx))?;
    Ok(rx)
}

fn relay_child(command: BetaCommand, tx: Sender<RelayEvent>) {
    let _ = tx.send(RelayEvent::Line(format!("Command: {command}")));
    info!("launching {command}");

    let (mut child, output) = match launch(&command) {
        Ok(launched) => launched,
        Err(err) => {
            warn!("failed to launch {}: {err}", command.program);
            let _ = tx.send(RelayEvent::Line(format!(
                "Failed to launch {}: {err}",
                command.program
            )));
            let _ = tx.send(RelayEvent::Finished);
            return;
        }
    };

    pump_lines(output, &tx);
    match child.wait() {
        Ok(status) => info!("{} exited with {status}", command.program),
        Err(err) => warn!("waiting on {} failed: {err}", command.program),
    }
    let _ = tx.send(RelayEvent::Finished);
}

/// Spawn the child with stdout and stderr on one pipe and hand back the
/// read end. The parent's write ends are gone once this returns, so the
/// reader sees EOF when the child exits.
fn launch(command: &BetaCommand) -> io::Result<(Child, PipeReader)> {
    let (reader, writer) = pipe()?;
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer);
    let child = cmd.spawn()?;
    drop(cmd);
    Ok((child, reader))
}

/// Keeps reading after the receiver is gone so the child never blocks on a
/// full pipe.
fn pump_lines(stream: PipeReader, tx: &Sender<RelayEvent>) {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let line = text.trim_end_matches(['\n', '\r']);
                if line.trim().is_empty() {
                    continue;
                }
                let _ = tx.send(RelayEvent::Line(line.to_string()));
            }
            Err(err) => {
                debug!("output stream closed: {err}");
                break;
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    fn collect(rx: Receiver<RelayEvent>) -> Vec<RelayEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.recv_timeout(Duration::from_secs(10)) {
            let done = event == RelayEvent::Finished;
            events.push(event);
            if done {
                break;
            }
        }
        events
    }

    fn lines(events: &[RelayEvent]) -> Vec<&str> {
        events
            .iter()
            .filter_map(|event| match event {
                RelayEvent::Line(line) => Some(line.as_str()),
                RelayEvent::Finished => None,
            })
            .collect()
    }

    #[test]
    fn relays_stdout_in_order_and_skips_blank_lines() {
        let cmd = BetaCommand::new("sh", ["-c", "printf 'one\\n\\n   \\ntwo\\r\\nthree'"]);
        let events = collect(spawn_relay(cmd).unwrap());
        let text = lines(&events);
        assert!(text[0].starts_with("Command: sh -c "));
        assert_eq!(&text[1..], &["one", "two", "three"]);
        assert_eq!(events.last(), Some(&RelayEvent::Finished));
    }

    #[test]
    fn stderr_is_relayed_too() {
        let cmd = BetaCommand::new("sh", ["-c", "echo oops >&2"]);
        let events = collect(spawn_relay(cmd).unwrap());
        assert_eq!(&lines(&events)[1..], &["oops"]);
    }

    #[test]
    fn interleaved_streams_keep_write_order() {
        let script = "i=0; while [ $i -lt 300 ]; do echo o$i; echo e$i >&2; i=$((i+1)); done";
        let cmd = BetaCommand::new("sh", ["-c", script]);
        let events = collect(spawn_relay(cmd).unwrap());
        let text = lines(&events);
        let expected: Vec<String> = (0..300)
            .flat_map(|i| [format!("o{i}"), format!("e{i}")])
            .collect();
        assert_eq!(text.len(), 601);
        assert_eq!(&text[1..], expected.as_slice());
        assert_eq!(events.last(), Some(&RelayEvent::Finished));
    }

    #[test]
    fn program_name_with_nul_is_a_launch_failure() {
        let cmd = BetaCommand::new("BE\0TA", ["minus"]);
        let events = collect(spawn_relay(cmd).unwrap());
        let text = lines(&events);
        assert_eq!(text.len(), 2);
        assert!(text[1].starts_with("Failed to launch BE"));
        assert_eq!(events.last(), Some(&RelayEvent::Finished));
    }

    #[test]
    fn spawn_failure_becomes_a_line() {
        let cmd = BetaCommand::new("definitely-not-a-beta-binary", ["plus"]);
        let events = collect(spawn_relay(cmd).unwrap());
        let text = lines(&events);
        assert_eq!(text.len(), 2);
        assert!(text[1].starts_with("Failed to launch definitely-not-a-beta-binary"));
        assert_eq!(events.last(), Some(&RelayEvent::Finished));
    }

    #[test]
    fn large_output_is_not_lost() {
        let cmd = BetaCommand::new("sh", ["-c", "i=0; while [ $i -lt 2000 ]; do echo line$i; i=$((i+1)); done"]);
        let events = collect(spawn_relay(cmd).unwrap());
        let text = lines(&events);
        assert_eq!(text.len(), 2001);
        assert_eq!(text[1], "line0");
        assert_eq!(text[2000], "line1999");
    }
}
