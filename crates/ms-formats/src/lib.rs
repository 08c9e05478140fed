//! Song decoders for the motorsong stepper-music player.
//!
//! Parses raw note-code streams into the IR score.

#![cfg_attr(not(feature = "std"), no_std)]

mod song_format;

pub use song_format::load_song;

/// Error type for song decoding.
#[derive(Debug, PartialEq, Eq)]
pub enum FormatError {
    /// The stream ended without a terminator code in the first channel slot
    MissingTerminator,
    /// The stream ended inside a row
    UnexpectedEof,
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FormatError::MissingTerminator => write!(f, "song data has no terminator"),
            FormatError::UnexpectedEof => write!(f, "song data ends inside a row"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}
