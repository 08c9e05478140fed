//! Score cursor: walks a score row by row, producing step commands.

use ms_ir::{MachineConfig, Score, AXIS_COUNT, CHANNEL_COUNT};

use crate::channel::ChannelState;
use crate::step::StepCommand;
use crate::translate::translate_row;

/// Plays one score front to back.
///
/// Owns every piece of playback state, so two players never interfere.
/// The caller pulls commands with [`Player::next_step`] and hands them to
/// whatever motion backend it drives.
pub struct Player {
    /// The score being played
    score: Score,
    /// Per-channel synthesis state
    channels: [ChannelState; CHANNEL_COUNT],
    /// Working position per axis, in mm
    position: [f32; AXIS_COUNT],
    /// Machine parameters read during translation
    config: MachineConfig,
    /// Index of the next row to translate
    cursor: usize,
}

impl Player {
    /// Create a player positioned at `start`, channels seeded from the
    /// config's timbre divisors.
    pub fn new(score: Score, config: MachineConfig, start: [f32; AXIS_COUNT]) -> Self {
        Self {
            score,
            channels: config.timbre_divisors().map(ChannelState::new),
            position: start,
            config,
            cursor: 0,
        }
    }

    /// Translate the next row, or `None` once the score is exhausted.
    pub fn next_step(&mut self) -> Option<StepCommand> {
        let row = *self.score.rows.get(self.cursor)?;
        self.cursor += 1;
        let cmd = translate_row(&row, &mut self.channels, &mut self.position, &self.config);
        log::trace!("row {}/{}: {:?}", self.cursor, self.score.len(), cmd);
        Some(cmd)
    }

    /// True once every row has been translated.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.score.len()
    }

    /// Current working position.
    pub fn position(&self) -> [f32; AXIS_COUNT] {
        self.position
    }

    /// Index of the next row to translate.
    pub fn row_index(&self) -> usize {
        self.cursor
    }
}
