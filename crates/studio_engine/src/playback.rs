use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};

use studio_logging::{studio_debug, studio_info, studio_warn};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("playback blocked: {0}")]
    Blocked(String),
}

/// Starts muted playback of a resolved asset.
pub trait Player: Send + Sync {
    fn play_muted(&self, target: &str) -> Result<(), PlaybackError>;
}

/// Hands the asset url to an external program, e.g. `mpv --mute=yes`.
///
/// Without a configured program every start is reported as blocked, which
/// leaves the manual resume affordance to the user.
#[derive(Debug, Clone, Default)]
pub struct CommandPlayer {
    program: Option<String>,
    args: Vec<String>,
}

impl CommandPlayer {
    /// `command_line` is split on whitespace: program first, then fixed args.
    pub fn new(command_line: Option<&str>) -> Self {
        let mut parts = command_line
            .unwrap_or_default()
            .split_whitespace()
            .map(ToOwned::to_owned);
        Self {
            program: parts.next(),
            args: parts.collect(),
        }
    }
}

impl Player for CommandPlayer {
    fn play_muted(&self, target: &str) -> Result<(), PlaybackError> {
        let Some(program) = self.program.as_deref() else {
            return Err(PlaybackError::Blocked("no player configured".into()));
        };
        match Command::new(program)
            .args(&self.args)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => {
                studio_info!("Playing {} with {}", target, program);
                reap(child, program.to_string());
                Ok(())
            }
            Err(err) => {
                studio_warn!("Autoplay blocked; {} could not start: {}", program, err);
                Err(PlaybackError::Blocked(err.to_string()))
            }
        }
    }
}

/// Waits for the player on a detached thread so it does not linger as a zombie.
fn reap(mut child: Child, program: String) -> JoinHandle<()> {
    thread::spawn(move || match child.wait() {
        Ok(status) => studio_debug!("{} exited with {}", program, status),
        Err(err) => studio_warn!("Failed to wait for {}: {}", program, err),
    })
}
