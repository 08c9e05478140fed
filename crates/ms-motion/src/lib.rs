//! Motion output backends for the motorsong stepper-music player.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod sim;
mod traits;

pub use sim::{SimPlanner, PLAN_QUEUE_DEPTH};
pub use traits::MotionOutput;
