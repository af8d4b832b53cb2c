//! External SDK encoder adapter.
//!
//! Delegates FIT encoding to a vendor SDK running in a separate runtime
//! (typically a JVM with the Garmin FIT SDK on the classpath).
//!
//! # Protocol
//!
//! The configured command is spawned with its arguments followed by the path
//! of an output file. The workout is written to its stdin as JSON:
//!
//! ```json
//! {
//!   "routine_name": "Mi Rutina",
//!   "sport": "running",
//!   "steps": [
//!     { "index": 0, "name": "EEC 1", "type": "EEC", "duration_secs": 300, "intensity": "warmup" }
//!   ]
//! }
//! ```
//!
//! A zero exit status and a non-empty output file mean success.
//!
//! # Readiness
//!
//! The same command and arguments followed by `--check` (instead of an
//! output path) must exit 0 once the program can encode, for instance after
//! loading the SDK classes. Nothing is read from stdin. The service runs this
//! once at startup; see [`ExternalSdkEncoder::with_readiness_args`] to replace it.
//!
//! No SDK program ships with this service. One that honours this contract
//! must be deployed next to it before `backend = "sdk"` is useful.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::workout::{Intensity, Sport, Workout};
use crate::ports::{EncodeError, FitArtifact, WorkoutEncoder};

/// Longest stderr excerpt carried in an error message.
const MAX_STDERR_CHARS: usize = 500;

/// Appended to the encoding arguments for the default readiness check.
const READINESS_FLAG: &str = "--check";

/// Encoder that shells out to an external FIT SDK runtime.
#[derive(Debug, Clone)]
pub struct ExternalSdkEncoder {
    /// Executable to spawn (searched in PATH when not absolute).
    command: String,

    /// Arguments placed before the output path.
    args: Vec<String>,

    /// Full argument list for the readiness check. `None` means the encoding
    /// arguments followed by `--check`.
    readiness_args: Option<Vec<String>>,

    /// Timeout for one encoding run in seconds.
    timeout_secs: u64,

    /// Sport forwarded to the SDK.
    sport: Sport,
}

#[derive(Serialize)]
struct SdkPayload<'a> {
    routine_name: &'a str,
    sport: Sport,
    steps: Vec<SdkStep<'a>>,
}

#[derive(Serialize)]
struct SdkStep<'a> {
    index: u16,
    name: &'a str,
    #[serde(rename = "type")]
    step_type: &'a str,
    duration_secs: u32,
    intensity: Intensity,
}

impl<'a> SdkPayload<'a> {
    fn from_workout(workout: &'a Workout, sport: Sport) -> Self {
        Self {
            routine_name: workout.name().as_str(),
            sport,
            steps: workout
                .steps()
                .iter()
                .map(|step| SdkStep {
                    index: step.index(),
                    name: step.name(),
                    step_type: step.step_type().as_str(),
                    duration_secs: step.duration().as_secs(),
                    intensity: step.intensity(),
                })
                .collect(),
        }
    }
}

impl ExternalSdkEncoder {
    /// Create an encoder that runs `command` with no extra arguments.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            readiness_args: None,
            timeout_secs: 60,
            sport: Sport::default(),
        }
    }

    /// Set the arguments placed before the output path.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Replace the argument list used by [`WorkoutEncoder::is_available`].
    pub fn with_readiness_args(mut self, readiness_args: Vec<String>) -> Self {
        self.readiness_args = Some(readiness_args);
        self
    }

    /// Set the timeout for one encoding run.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_sport(mut self, sport: Sport) -> Self {
        self.sport = sport;
        self
    }

    fn spawn_error(&self, err: std::io::Error) -> EncodeError {
        if err.kind() == ErrorKind::NotFound {
            EncodeError::unavailable(format!("'{}' was not found", self.command))
        } else {
            EncodeError::unavailable(format!("failed to start '{}': {}", self.command, err))
        }
    }
}

#[async_trait]
impl WorkoutEncoder for ExternalSdkEncoder {
    async fn encode(&self, workout: &Workout) -> Result<FitArtifact, EncodeError> {
        let started = Instant::now();

        let payload = serde_json::to_vec(&SdkPayload::from_workout(workout, self.sport))
            .map_err(|e| EncodeError::failed(format!("failed to serialize workout: {}", e)))?;

        // Removed together with its contents when dropped.
        let scratch = tempfile::Builder::new()
            .prefix("fit-workout-")
            .tempdir()
            .map_err(|e| EncodeError::io(format!("failed to create scratch directory: {}", e)))?;
        let output_path = scratch.path().join("workout.fit");

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .arg(&output_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // stdin is fed while stdout and stderr drain, all under one deadline,
        // so an SDK that never reads its input still times out.
        let stdin = child.stdin.take();
        let feed_stdin = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(&payload).await {
                // The SDK may exit without reading stdin; its status decides.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!("FIT SDK closed stdin before reading the workout");
                    Ok(())
                }
                other => other,
            }
        };

        let (fed, output) = tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            async { tokio::join!(feed_stdin, child.wait_with_output()) },
        )
        .await
        .map_err(|_| {
            tracing::warn!(
                command = %self.command,
                timeout_secs = self.timeout_secs,
                "FIT SDK timed out"
            );
            EncodeError::Timeout(self.timeout_secs)
        })?;

        fed.map_err(|e| EncodeError::io(format!("failed to write workout to SDK: {}", e)))?;
        let output =
            output.map_err(|e| EncodeError::io(format!("FIT SDK execution failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let excerpt: String = stderr.trim().chars().take(MAX_STDERR_CHARS).collect();
            tracing::warn!(
                command = %self.command,
                status = %output.status,
                stderr = %excerpt,
                "FIT SDK exited with an error"
            );
            return Err(EncodeError::failed(format!(
                "FIT SDK exited with {}: {}",
                output.status, excerpt
            )));
        }

        let content = match tokio::fs::read(&output_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(EncodeError::failed("FIT SDK did not write an output file"))
            }
            Err(e) => {
                return Err(EncodeError::io(format!(
                    "failed to read FIT SDK output: {}",
                    e
                )))
            }
        };

        if content.is_empty() {
            return Err(EncodeError::failed("FIT SDK produced an empty file"));
        }

        tracing::info!(
            workout = %workout.name(),
            bytes = content.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Encoded FIT workout with external SDK"
        );

        Ok(FitArtifact::new(content, workout.name()))
    }

    async fn is_available(&self) -> bool {
        let mut command = Command::new(&self.command);
        match &self.readiness_args {
            Some(args) => command.args(args),
            None => command.args(&self.args).arg(READINESS_FLAG),
        };

        let check = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        match tokio::time::timeout(Duration::from_secs(self.timeout_secs), check).await {
            Ok(Ok(status)) => status.success(),
            Ok(Err(e)) => {
                tracing::debug!(command = %self.command, error = %e, "FIT SDK could not be started");
                false
            }
            Err(_) => {
                tracing::debug!(command = %self.command, "FIT SDK readiness check timed out");
                false
            }
        }
    }

    fn name(&self) -> &str {
        "sdk"
    }
}
