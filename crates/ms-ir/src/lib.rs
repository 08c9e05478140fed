//! Core IR types for the motorsong stepper-music player.
//!
//! This crate defines the representation shared by the whole workspace: the
//! pitch table, decoded note events, the score, and the machine
//! configuration the playback driver reads and overrides. The song decoder
//! emits IR, and the playback engine consumes IR.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod config;
mod note;
mod pitch;
mod score;

pub use config::{
    AxisConfig, ConfigError, MachineConfig, AXIS_COUNT, DEFAULT_TIMBRE, E_AXIS,
};
pub use note::{NoteEvent, CODE_END, CODE_REST, CODE_SUSTAIN};
pub use pitch::{frequency_of, PITCH_COUNT, PITCH_TABLE};
pub use score::{Row, Score, CHANNEL_COUNT};
