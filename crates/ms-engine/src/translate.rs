//! Pitch-to-displacement translation for one score row.
//!
//! A sounding channel moves its axis at the speed whose step pulse rate
//! equals the note's frequency; the audible coil switching reproduces the
//! pitch. The move covers exactly one time slice, and a channel about to
//! cross its travel envelope reverses instead, so a held note keeps
//! sounding by bouncing between the endstops.

use ms_ir::{frequency_of, MachineConfig, Row, CHANNEL_COUNT};

use crate::channel::ChannelState;
use crate::step::{MoveRequest, StepCommand};

/// Wall-clock duration of one row, in seconds. Fixes the playback tempo:
/// every row, rest or not, consumes exactly this long.
pub const NOTE_SECONDS: f32 = 0.3125;

/// Hold time for an all-silent row, in milliseconds. Kept consistent with
/// [`NOTE_SECONDS`]; the two jointly define the tempo.
pub const REST_DWELL_MS: u32 = 312;

/// Divisor relating step pulse rate to note frequency.
pub const FREQUENCY_SCALE: f32 = 4.0;

/// Axis displacement that sounds `pitch` on channel `channel` for one row.
///
/// speed (mm/s) = frequency (steps/s) * (microsteps/step) / (microsteps/mm * scale),
/// distance (mm) = speed * slice duration.
pub fn pitch_displacement(pitch: u8, channel: usize, config: &MachineConfig) -> f32 {
    let microsteps = config.microstep_modes[channel] as f32;
    frequency_of(pitch) * microsteps / (config.axes[channel].steps_per_unit * FREQUENCY_SCALE)
        * NOTE_SECONDS
}

/// The travel envelope a channel bounces inside.
pub fn effective_limit(channel: &ChannelState, index: usize, config: &MachineConfig) -> f32 {
    let microsteps = config.microstep_modes[index] as f32;
    config.axes[index].travel_limit / (microsteps / channel.timbre as f32)
}

/// Translate one row into a step command, updating channel states and the
/// working position in place.
///
/// Bounce decisions are per-axis: one channel can reverse while the others
/// move on, and channels never resynchronize.
pub fn translate_row(
    row: &Row,
    channels: &mut [ChannelState; CHANNEL_COUNT],
    position: &mut [f32; ms_ir::AXIS_COUNT],
    config: &MachineConfig,
) -> StepCommand {
    let mut delta = [0.0f32; CHANNEL_COUNT];
    let mut target = *position;

    for (c, state) in channels.iter_mut().enumerate() {
        let resolved = state.resolve(row[c]);
        if let Some(pitch) = resolved {
            delta[c] = pitch_displacement(pitch, c, config);
            if !state.forward {
                delta[c] = -delta[c];
            }
            log::trace!(
                "ch{}: pitch {} ({} Hz) delta {}",
                c,
                pitch,
                frequency_of(pitch),
                delta[c]
            );
        }

        // Bounce off the endstops: same magnitude, flipped sign, and only
        // the direction flag changes.
        let limit = effective_limit(state, c, config);
        let mut next = position[c] + delta[c];
        if next > limit || next < 0.0 {
            next = position[c] - delta[c];
            state.reverse();
        }
        target[c] = next;
        position[c] = next;

        state.commit(resolved);
    }

    if delta.iter().all(|d| *d == 0.0) {
        StepCommand::Dwell { ms: REST_DWELL_MS }
    } else {
        // Euclidean speed needed to cover the 3-axis displacement within
        // the slice. The extruder target stays at its current value.
        let hyp = libm::sqrtf(
            delta[0] * delta[0] + delta[1] * delta[1] + delta[2] * delta[2],
        );
        StepCommand::Move(MoveRequest {
            target,
            feed_rate: hyp / NOTE_SECONDS,
        })
    }
}
