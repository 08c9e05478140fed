//! Note codes and their decoded form.
//!
//! A song source is a flat stream of 8-bit note codes, three per row (one
//! per channel). The raw encoding is decoded exactly once, at the source
//! boundary, into the closed [`NoteEvent`] enum; everything downstream
//! operates on the enum, never on raw byte comparisons.

use crate::pitch::PITCH_COUNT;

/// Raw code: rest/stop this channel for the row.
pub const CODE_REST: u8 = 128;

/// Raw code: sustain the channel's previously resolved pitch.
pub const CODE_SUSTAIN: u8 = 129;

/// Raw code: end of song. Only meaningful in channel 0.
pub const CODE_END: u8 = 255;

/// A decoded note event for one channel in one row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoteEvent {
    /// Play this pitch code (0..=107) for the row.
    Play(u8),
    /// Silence the channel for the row.
    #[default]
    Rest,
    /// Keep sounding whatever the channel last resolved to.
    Sustain,
    /// Song terminator.
    End,
}

impl NoteEvent {
    /// Decode a raw note code.
    ///
    /// Codes outside the contract (108..=127 and 130..=254) decode to
    /// `Rest`: a damaged song plays with holes rather than derailing the
    /// motors. Total over all byte values, never panics.
    pub const fn from_code(code: u8) -> Self {
        match code {
            CODE_REST => NoteEvent::Rest,
            CODE_SUSTAIN => NoteEvent::Sustain,
            CODE_END => NoteEvent::End,
            p if (p as usize) < PITCH_COUNT => NoteEvent::Play(p),
            _ => NoteEvent::Rest,
        }
    }

    /// Create a note event from octave (0-8) and semitone (0-11).
    pub const fn from_octave_semitone(octave: u8, semitone: u8) -> Self {
        NoteEvent::Play(octave * 12 + semitone)
    }

    /// The pitch code if this is a play event.
    pub const fn pitch(self) -> Option<u8> {
        match self {
            NoteEvent::Play(p) => Some(p),
            _ => None,
        }
    }

    /// Returns true for events that produce no motion on their own.
    pub const fn is_silent(self) -> bool {
        matches!(self, NoteEvent::Rest | NoteEvent::End)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_play_range() {
        assert_eq!(NoteEvent::from_code(0), NoteEvent::Play(0));
        assert_eq!(NoteEvent::from_code(60), NoteEvent::Play(60));
        assert_eq!(NoteEvent::from_code(107), NoteEvent::Play(107));
    }

    #[test]
    fn decode_markers() {
        assert_eq!(NoteEvent::from_code(CODE_REST), NoteEvent::Rest);
        assert_eq!(NoteEvent::from_code(CODE_SUSTAIN), NoteEvent::Sustain);
        assert_eq!(NoteEvent::from_code(CODE_END), NoteEvent::End);
    }

    #[test]
    fn out_of_contract_codes_decode_to_rest() {
        for code in 108..=127u8 {
            assert_eq!(NoteEvent::from_code(code), NoteEvent::Rest);
        }
        for code in 130..=254u8 {
            assert_eq!(NoteEvent::from_code(code), NoteEvent::Rest);
        }
    }

    #[test]
    fn octave_semitone() {
        // A4 = pitch 57
        assert_eq!(NoteEvent::from_octave_semitone(4, 9), NoteEvent::Play(57));
        assert_eq!(NoteEvent::from_octave_semitone(0, 0), NoteEvent::Play(0));
    }

    #[test]
    fn pitch_accessor() {
        assert_eq!(NoteEvent::Play(40).pitch(), Some(40));
        assert_eq!(NoteEvent::Rest.pitch(), None);
        assert_eq!(NoteEvent::Sustain.pitch(), None);
    }

    #[test]
    fn silence() {
        assert!(NoteEvent::Rest.is_silent());
        assert!(NoteEvent::End.is_silent());
        assert!(!NoteEvent::Play(12).is_silent());
        assert!(!NoteEvent::Sustain.is_silent());
    }
}
