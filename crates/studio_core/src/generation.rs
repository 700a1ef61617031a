//! Generation attempts: prompt -> candidates -> timed progress -> outcome.

use std::time::Duration;

use studio_logging::{studio_debug, studio_info};
use thiserror::Error;

use crate::classify::{classify, CandidateId};
use crate::matcher::strip_extension;

pub type AttemptId = u64;

pub const PROGRESS_COMPLETE: u8 = 100;
/// Highest value a pending attempt may show; 100 is reserved for resolution.
pub const PROGRESS_PENDING_MAX: u8 = PROGRESS_COMPLETE - 1;
/// Number of checked candidates listed in the failure diagnostic.
pub const DIAGNOSTIC_CANDIDATE_LIMIT: usize = 6;
pub const NO_MATCH_CAPTION: &str = "⚠️ No matching model/video found in database.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("No match for prompt — try a suggestion or different phrasing.")]
    NoCandidates,
    #[error("No video file found for prompt. Checked candidates: {}...", .checked.join(", "))]
    NoAssetFound { checked: Vec<CandidateId> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Generating,
    Resolved,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub path: String,
    pub display_name: String,
    pub caption: String,
}

impl ResolvedAsset {
    pub fn new(path: impl Into<String>, prompt: &str) -> Self {
        let path = path.into();
        let display_name = asset_display_name(&path).to_string();
        let caption = format!("Generated: {display_name} · {}", prompt.trim());
        Self {
            path,
            display_name,
            caption,
        }
    }

    /// File name announced to other parts of the app once the asset exists.
    pub fn published_name(&self) -> String {
        format!("{}.mp4", self.display_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Resolved(ResolvedAsset),
    Failed(GenerationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationAttempt {
    pub id: AttemptId,
    pub prompt: String,
    pub candidates: Vec<CandidateId>,
    pub progress: u8,
    pub outcome: Outcome,
    pub autoplay_blocked: bool,
}

impl GenerationAttempt {
    pub fn phase(&self) -> GenerationPhase {
        match self.outcome {
            Outcome::Pending => GenerationPhase::Generating,
            Outcome::Resolved(_) => GenerationPhase::Resolved,
            Outcome::Failed(_) => GenerationPhase::Failed,
        }
    }

    pub fn resolved(&self) -> Option<&ResolvedAsset> {
        match &self.outcome {
            Outcome::Resolved(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&GenerationError> {
        match &self.outcome {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    fn is_pending(&self) -> bool {
        matches!(self.outcome, Outcome::Pending)
    }
}

/// Returned by [`Generator::start`] so the caller can arm the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedAttempt {
    pub id: AttemptId,
    pub candidates: Vec<CandidateId>,
    /// Pending attempt that was superseded and whose timer must be cancelled.
    pub superseded: Option<AttemptId>,
}

/// Returned by [`Generator::start`] when the new attempt failed up front.
///
/// A pending attempt may still have been superseded on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedAttempt {
    pub error: GenerationError,
    pub superseded: Option<AttemptId>,
}

/// Owns the single current generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Generator {
    next_id: AttemptId,
    current: Option<GenerationAttempt>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GenerationPhase {
        self.current
            .as_ref()
            .map_or(GenerationPhase::Idle, GenerationAttempt::phase)
    }

    pub fn current(&self) -> Option<&GenerationAttempt> {
        self.current.as_ref()
    }

    /// Starts a new attempt, superseding any pending one.
    ///
    /// A prompt with no candidates fails immediately and never enters
    /// `Generating`.
    pub fn start(&mut self, prompt: &str) -> Result<StartedAttempt, RejectedAttempt> {
        let superseded = self.cancel();
        self.next_id += 1;
        let id = self.next_id;
        let candidates = classify(prompt);

        if candidates.is_empty() {
            studio_info!("Attempt {} has no candidates for prompt {:?}", id, prompt);
            self.current = Some(GenerationAttempt {
                id,
                prompt: prompt.to_string(),
                candidates,
                progress: 0,
                outcome: Outcome::Failed(GenerationError::NoCandidates),
                autoplay_blocked: false,
            });
            return Err(RejectedAttempt {
                error: GenerationError::NoCandidates,
                superseded,
            });
        }

        studio_info!(
            "Attempt {} started with {} candidates",
            id,
            candidates.len()
        );
        self.current = Some(GenerationAttempt {
            id,
            prompt: prompt.to_string(),
            candidates: candidates.clone(),
            progress: 0,
            outcome: Outcome::Pending,
            autoplay_blocked: false,
        });
        Ok(StartedAttempt {
            id,
            candidates,
            superseded,
        })
    }

    /// Drops a pending attempt and returns its id; finished attempts stay visible.
    pub fn cancel(&mut self) -> Option<AttemptId> {
        let pending = self.current.as_ref().filter(|a| a.is_pending())?.id;
        studio_info!("Attempt {} cancelled", pending);
        self.current = None;
        Some(pending)
    }

    /// Applies a progress sample. Stale or regressing samples are ignored.
    pub fn apply_progress(&mut self, id: AttemptId, progress: u8) -> bool {
        let Some(attempt) = self.pending_mut(id) else {
            studio_debug!("Ignoring progress for stale attempt {}", id);
            return false;
        };
        let clamped = progress.min(PROGRESS_PENDING_MAX);
        if clamped <= attempt.progress {
            return false;
        }
        attempt.progress = clamped;
        true
    }

    /// Finishes a pending attempt with the prober's answer.
    pub fn complete(&mut self, id: AttemptId, resolved: Option<String>) -> Option<&GenerationAttempt> {
        let attempt = self.pending_mut(id)?;
        match resolved {
            Some(path) => {
                let asset = ResolvedAsset::new(path, &attempt.prompt);
                studio_info!("Attempt {} resolved to {}", id, asset.path);
                attempt.progress = PROGRESS_COMPLETE;
                attempt.outcome = Outcome::Resolved(asset);
            }
            None => {
                let checked = attempt
                    .candidates
                    .iter()
                    .take(DIAGNOSTIC_CANDIDATE_LIMIT)
                    .cloned()
                    .collect();
                studio_info!("Attempt {} found no asset", id);
                attempt.outcome = Outcome::Failed(GenerationError::NoAssetFound { checked });
            }
        }
        self.current.as_ref()
    }

    pub fn set_autoplay_blocked(&mut self, id: AttemptId, blocked: bool) -> bool {
        match self.current.as_mut() {
            Some(attempt) if attempt.id == id && attempt.resolved().is_some() => {
                let changed = attempt.autoplay_blocked != blocked;
                attempt.autoplay_blocked = blocked;
                changed
            }
            _ => false,
        }
    }

    fn pending_mut(&mut self, id: AttemptId) -> Option<&mut GenerationAttempt> {
        self.current
            .as_mut()
            .filter(|attempt| attempt.id == id && attempt.is_pending())
    }
}

/// Cubic ease-out of the elapsed fraction, as a whole percentage in `0..=100`.
pub fn eased_progress(elapsed: Duration, duration: Duration) -> u8 {
    let fraction = if duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    };
    let eased = 1.0 - (1.0 - fraction).powi(3);
    (eased * f64::from(PROGRESS_COMPLETE)).floor() as u8
}

/// File stem of a candidate path, e.g. `NeuralNetworks` for `/Videos/NeuralNetworks.mp4`.
pub fn asset_display_name(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    strip_extension(file)
}
