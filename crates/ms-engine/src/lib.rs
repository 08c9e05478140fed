//! Playback engine for the motorsong stepper-music player.
//!
//! Translates score rows into axis moves whose step pulse rate reproduces
//! the notes' frequencies.

#![cfg_attr(not(feature = "std"), no_std)]

mod channel;
mod player;
mod step;
mod translate;

pub use channel::ChannelState;
pub use player::Player;
pub use step::{MoveRequest, StepCommand};
pub use translate::{
    effective_limit, pitch_displacement, translate_row, FREQUENCY_SCALE, NOTE_SECONDS,
    REST_DWELL_MS,
};
