//! Help-text harvester: runs `<tool> [subcommand...] -h` and `man <tool>`.
//!
//! Every call spawns exactly one child process with stdin closed and both
//! output streams captured. Nothing escapes as an error; each failure path
//! is turned into the descriptive text of a [`HelpResult`].

use explainer_domain::util::{cap_output, strip_overstrike};
use explainer_domain::{HarvestKind, HelpFlag, HelpRequest, HelpResult, ToolQuery};
use std::io::{ErrorKind, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Default per-call timeout (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum captured output handed to the model (64 KiB)
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 64 * 1024;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Stateless runner for help and man page requests.
#[derive(Debug, Clone)]
pub struct Harvester {
    help_flag: HelpFlag,
    /// `None` waits forever
    timeout: Option<Duration>,
    max_output_bytes: usize,
    man_command: String,
}

impl Default for Harvester {
    fn default() -> Self {
        Self {
            help_flag: HelpFlag::default(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            man_command: "man".to_string(),
        }
    }
}

impl Harvester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_help_flag(mut self, flag: HelpFlag) -> Self {
        self.help_flag = flag;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_output_bytes(mut self, max: usize) -> Self {
        self.max_output_bytes = max;
        self
    }

    /// Program used for man pages (`man` by default)
    pub fn with_man_command(mut self, command: impl Into<String>) -> Self {
        self.man_command = command.into();
        self
    }

    pub fn help_flag(&self) -> HelpFlag {
        self.help_flag
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Help output of `tool`, or of `tool subcommand` when given.
    pub fn fetch_help(&self, tool: &ToolQuery, subcommand: Option<&str>) -> HelpResult {
        let request = HelpRequest::help(tool.clone(), subcommand).with_flag(self.help_flag);
        self.run(&request)
    }

    /// Man page of `tool`, rendered as plain text.
    pub fn fetch_manpage(&self, tool: &ToolQuery) -> HelpResult {
        self.run(&HelpRequest::manpage(tool.clone()))
    }

    /// Execute a prepared request.
    pub fn run(&self, request: &HelpRequest) -> HelpResult {
        let argv = request.argv(&self.man_command);
        let command_line = argv.join(" ");
        debug!("Harvesting: {}", command_line);

        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if request.kind() == HarvestKind::Manpage {
            // Plain text on stdout, never an interactive pager
            cmd.env("MANPAGER", "cat")
                .env("PAGER", "cat")
                .env_remove("MAN_KEEP_FORMATTING");
        }

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => return self.spawn_error(request, &argv[0], e),
        };

        let captured = match wait_with_timeout(child, self.timeout) {
            Ok(captured) => captured,
            Err(WaitError::TimedOut) => {
                let secs = self.timeout.map(|t| t.as_secs()).unwrap_or_default();
                warn!("Harvest timed out after {}s: {}", secs, command_line);
                return HelpResult::timed_out(&command_line, secs);
            }
            Err(WaitError::Io(e)) => return HelpResult::spawn_failed(&argv[0], e),
        };

        let stdout = String::from_utf8_lossy(&captured.stdout);
        let stderr = String::from_utf8_lossy(&captured.stderr);
        trace!(
            "{} exited with {:?}: {} bytes stdout, {} bytes stderr",
            command_line,
            captured.status.code(),
            stdout.len(),
            stderr.len()
        );

        let result = match (request.kind(), captured.status.success()) {
            (HarvestKind::Help(_), true) => HelpResult::captured(stdout.into_owned()),
            (HarvestKind::Help(_), false) => {
                HelpResult::help_failed(captured.status.code(), &stderr, &stdout)
            }
            (HarvestKind::Manpage, true) => HelpResult::captured(strip_overstrike(&stdout)),
            (HarvestKind::Manpage, false) => {
                HelpResult::manpage_failed(captured.status.code(), &stderr)
            }
        };

        HelpResult {
            text: cap_output(result.text, self.max_output_bytes),
            ..result
        }
    }

    fn spawn_error(&self, request: &HelpRequest, program: &str, e: std::io::Error) -> HelpResult {
        debug!("Failed to spawn {}: {}", program, e);
        match (e.kind(), request.kind()) {
            (ErrorKind::NotFound, HarvestKind::Help(_)) => {
                HelpResult::not_found(request.tool().as_str())
            }
            (ErrorKind::NotFound, HarvestKind::Manpage) => HelpResult::man_unavailable(),
            _ => HelpResult::spawn_failed(program, e),
        }
    }
}

struct Captured {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

enum WaitError {
    TimedOut,
    Io(std::io::Error),
}

/// Drain a pipe on its own thread so a chatty child never blocks on a full
/// pipe while we poll for its exit. The buffer arrives once the pipe closes.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        // The receiver is gone after a timeout
        let _ = tx.send(buf);
    });
    rx
}

/// Wait for a drained pipe, giving up at `deadline`.
fn collect(pipe: &Receiver<Vec<u8>>, deadline: Option<Instant>) -> Result<Vec<u8>, WaitError> {
    let Some(deadline) = deadline else {
        return Ok(pipe.recv().unwrap_or_default());
    };
    match pipe.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(buf) => Ok(buf),
        Err(RecvTimeoutError::Timeout) => Err(WaitError::TimedOut),
        Err(RecvTimeoutError::Disconnected) => Ok(Vec::new()),
    }
}

/// Wait for a child process and its output, killing it once `timeout` has
/// elapsed.
///
/// The budget covers the pipes too: a background process that inherited
/// stdout or stderr can keep them open after the child exits. Its reader
/// threads are detached and end when that process closes the pipe.
fn wait_with_timeout(mut child: Child, timeout: Option<Duration>) -> Result<Captured, WaitError> {
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());
    let deadline = timeout.map(|t| Instant::now() + t);

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(WaitError::TimedOut);
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                return Err(WaitError::Io(e));
            }
        }
    };

    Ok(Captured {
        status,
        stdout: collect(&stdout, deadline)?,
        stderr: collect(&stderr, deadline)?,
    })
}
