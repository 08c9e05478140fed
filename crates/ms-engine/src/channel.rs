//! Channel state for stepper-music playback.

use ms_ir::NoteEvent;

/// Mutable state for a single synthesis channel.
///
/// Owned by the player and passed explicitly, so playback is re-entrant:
/// two players never share channel state.
#[derive(Clone, Copy, Debug)]
pub struct ChannelState {
    /// Last resolved pitch, `None` after a rest. Seeds sustain resolution.
    pub last_pitch: Option<u8>,
    /// Current bounce direction (true = toward the travel limit)
    pub forward: bool,
    /// Timbre divisor: the microstep mode programmed during playback
    pub timbre: u8,
}

impl ChannelState {
    /// Create a fresh channel: silent, moving forward.
    pub fn new(timbre: u8) -> Self {
        Self {
            last_pitch: None,
            forward: true,
            timbre,
        }
    }

    /// Resolve a note event to a pitch, or `None` for silence.
    ///
    /// Sustain reuses the stored pitch, which is already resolved, so
    /// resolution never recurses. Sustain of a rest is a legal rest. The
    /// terminator never reaches a channel; it resolves to silence if it
    /// does.
    pub fn resolve(&self, event: NoteEvent) -> Option<u8> {
        match event {
            NoteEvent::Play(pitch) => Some(pitch),
            NoteEvent::Sustain => self.last_pitch,
            NoteEvent::Rest | NoteEvent::End => None,
        }
    }

    /// Record the effective played value for the row, rest included.
    pub fn commit(&mut self, resolved: Option<u8>) {
        self.last_pitch = resolved;
    }

    /// Flip the bounce direction.
    pub fn reverse(&mut self) {
        self.forward = !self.forward;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_channel_is_silent_and_forward() {
        let ch = ChannelState::new(4);
        assert_eq!(ch.last_pitch, None);
        assert!(ch.forward);
        assert_eq!(ch.timbre, 4);
    }

    #[test]
    fn resolve_play() {
        let ch = ChannelState::new(4);
        assert_eq!(ch.resolve(NoteEvent::Play(60)), Some(60));
    }

    #[test]
    fn resolve_sustain_of_pitch() {
        let mut ch = ChannelState::new(4);
        ch.commit(Some(60));
        assert_eq!(ch.resolve(NoteEvent::Sustain), Some(60));
    }

    #[test]
    fn resolve_sustain_of_rest_is_rest() {
        let ch = ChannelState::new(4);
        assert_eq!(ch.resolve(NoteEvent::Sustain), None);
    }

    #[test]
    fn resolve_rest_and_end_are_silent() {
        let mut ch = ChannelState::new(4);
        ch.commit(Some(60));
        assert_eq!(ch.resolve(NoteEvent::Rest), None);
        assert_eq!(ch.resolve(NoteEvent::End), None);
    }

    #[test]
    fn commit_overwrites_unconditionally() {
        let mut ch = ChannelState::new(4);
        ch.commit(Some(40));
        assert_eq!(ch.last_pitch, Some(40));
        ch.commit(None);
        assert_eq!(ch.last_pitch, None);
    }

    #[test]
    fn reverse_toggles() {
        let mut ch = ChannelState::new(4);
        ch.reverse();
        assert!(!ch.forward);
        ch.reverse();
        assert!(ch.forward);
    }
}
