//! Headless playback controller for the motorsong stepper-music player.
//!
//! Provides a unified API for loading songs and driving a motion backend
//! that both offline planning and a live machine connection can share.

use ms_engine::Player;
use ms_ir::{ConfigError, MachineConfig, AXIS_COUNT};
use ms_motion::MotionOutput;

// Re-export common types so callers don't need ms-ir/ms-engine directly.
pub use ms_engine::{MoveRequest, StepCommand};
pub use ms_formats::FormatError;
pub use ms_ir::Score;

/// Error type for playback.
#[derive(Debug)]
pub enum PlayError {
    /// The machine configuration fails validation
    Config(ConfigError),
}

impl std::fmt::Display for PlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayError::Config(err) => write!(f, "bad machine configuration: {}", err),
        }
    }
}

impl std::error::Error for PlayError {}

impl From<ConfigError> for PlayError {
    fn from(err: ConfigError) -> Self {
        PlayError::Config(err)
    }
}

/// What one playback run did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackSummary {
    /// Rows translated
    pub rows: usize,
    /// Moves queued
    pub moves: usize,
    /// Dwells issued
    pub dwells: usize,
    /// Working position after the last row
    pub final_position: [f32; AXIS_COUNT],
}

/// Owns a score and a machine configuration and drives a motion backend.
///
/// Playback reshapes the configuration: motion limits are lifted for the
/// song and stay lifted afterwards, which [`Controller::config`] makes
/// visible to the caller.
pub struct Controller {
    score: Score,
    config: MachineConfig,
}

impl Controller {
    /// Create a controller with an empty score.
    pub fn new(config: MachineConfig) -> Self {
        Self {
            score: Score::default(),
            config,
        }
    }

    // --- Song management ---

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Decode a raw note-code stream and make it the current score.
    pub fn load_song(&mut self, data: &[u8]) -> Result<(), FormatError> {
        self.score = ms_formats::load_song(data)?;
        Ok(())
    }

    /// Replace the current score.
    pub fn set_score(&mut self, score: Score) {
        self.score = score;
    }

    // --- Playback ---

    /// Play the score front to back on `output`.
    ///
    /// Programs each channel's microstep divisor to its timbre, lifts the
    /// motion limits, then feeds the backend one command per row: moves
    /// are queued, silent rows drain the queue and hold.
    pub fn play(
        &mut self,
        output: &mut impl MotionOutput,
    ) -> Result<PlaybackSummary, PlayError> {
        self.config.validate()?;

        log::info!(
            "playing \"{}\" ({} rows)",
            self.score.title,
            self.score.len()
        );

        for (channel, divisor) in self.config.timbre_divisors().into_iter().enumerate() {
            output.set_microstep_mode(channel, divisor);
        }
        self.config.lift_motion_limits();

        let mut player = Player::new(self.score.clone(), self.config, output.position());
        let mut summary = PlaybackSummary::default();

        while let Some(cmd) = player.next_step() {
            summary.rows += 1;
            match cmd {
                StepCommand::Move(mv) => {
                    output.enqueue_move(&mv);
                    summary.moves += 1;
                }
                StepCommand::Dwell { ms } => {
                    output.synchronize();
                    output.dwell(ms);
                    summary.dwells += 1;
                }
            }
        }

        summary.final_position = player.position();
        log::info!(
            "done: {} moves, {} dwells over {} rows",
            summary.moves,
            summary.dwells,
            summary.rows
        );
        Ok(summary)
    }

    // --- Offline planning ---

    /// Translate the score into its command sequence without a backend.
    pub fn plan(&self, start: [f32; AXIS_COUNT]) -> Result<Vec<StepCommand>, PlayError> {
        self.config.validate()?;

        let mut player = Player::new(self.score.clone(), self.config, start);
        let mut commands = Vec::with_capacity(self.score.len());
        while let Some(cmd) = player.next_step() {
            commands.push(cmd);
        }
        Ok(commands)
    }

    /// Wall-clock playback duration in seconds.
    pub fn duration_seconds(&self) -> f32 {
        self.score.slice_count() as f32 * ms_engine::NOTE_SECONDS
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}
