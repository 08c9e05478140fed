//! Simulated motion planner.
//!
//! Models the firmware planner closely enough for offline playback and
//! tests: a fixed-depth move queue retired in order, with every retired
//! move, dwell, and microstep change recorded for inspection. Time does
//! not pass; a dwell is a log entry, not a sleep.

use alloc::vec::Vec;
use heapless::Deque;

use ms_engine::MoveRequest;
use ms_ir::AXIS_COUNT;

use crate::traits::MotionOutput;

/// Queue depth of the simulated planner.
pub const PLAN_QUEUE_DEPTH: usize = 16;

/// In-memory motion backend.
///
/// Retires the oldest queued move when the queue fills, standing in for
/// the stepper interrupt consuming blocks while a real planner would park
/// the caller.
pub struct SimPlanner {
    position: [f32; AXIS_COUNT],
    pending: Deque<MoveRequest, PLAN_QUEUE_DEPTH>,
    completed: Vec<MoveRequest>,
    dwells: Vec<u32>,
    microstep_changes: Vec<(usize, u8)>,
}

impl SimPlanner {
    /// Create a planner parked at `start`.
    pub fn new(start: [f32; AXIS_COUNT]) -> Self {
        Self {
            position: start,
            pending: Deque::new(),
            completed: Vec::new(),
            dwells: Vec::new(),
            microstep_changes: Vec::new(),
        }
    }

    /// Moves retired from the queue, in execution order.
    pub fn completed_moves(&self) -> &[MoveRequest] {
        &self.completed
    }

    /// Recorded dwell durations, in ms.
    pub fn dwells(&self) -> &[u32] {
        &self.dwells
    }

    /// Microstep divisor changes as `(channel, divisor)`, in order.
    pub fn microstep_changes(&self) -> &[(usize, u8)] {
        &self.microstep_changes
    }

    /// Number of moves still queued.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn retire_oldest(&mut self) {
        if let Some(mv) = self.pending.pop_front() {
            self.completed.push(mv);
        }
    }
}

impl MotionOutput for SimPlanner {
    fn position(&self) -> [f32; AXIS_COUNT] {
        self.position
    }

    fn enqueue_move(&mut self, request: &MoveRequest) {
        if self.pending.is_full() {
            self.retire_oldest();
        }
        // Cannot fail: a slot was just freed if none was available.
        let _ = self.pending.push_back(*request);
        self.position = request.target;
        log::trace!(
            "queued move to {:?} at {} mm/s ({} pending)",
            request.target,
            request.feed_rate,
            self.pending.len()
        );
    }

    fn synchronize(&mut self) {
        while !self.pending.is_empty() {
            self.retire_oldest();
        }
    }

    fn dwell(&mut self, ms: u32) {
        self.dwells.push(ms);
        log::trace!("dwell {} ms", ms);
    }

    fn set_microstep_mode(&mut self, channel: usize, divisor: u8) {
        self.microstep_changes.push((channel, divisor));
        log::debug!("channel {} microstep divisor set to {}", channel, divisor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(x: f32) -> MoveRequest {
        MoveRequest {
            target: [x, 0.0, 0.0, 0.0],
            feed_rate: 10.0,
        }
    }

    #[test]
    fn new_planner_is_parked_and_empty() {
        let planner = SimPlanner::new([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(planner.position(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(planner.pending_len(), 0);
        assert!(planner.completed_moves().is_empty());
    }

    #[test]
    fn enqueue_updates_position() {
        let mut planner = SimPlanner::new([0.0; AXIS_COUNT]);
        planner.enqueue_move(&mv(5.0));
        assert_eq!(planner.position(), [5.0, 0.0, 0.0, 0.0]);
        assert_eq!(planner.pending_len(), 1);
    }

    #[test]
    fn full_queue_retires_oldest() {
        let mut planner = SimPlanner::new([0.0; AXIS_COUNT]);
        for i in 0..PLAN_QUEUE_DEPTH + 3 {
            planner.enqueue_move(&mv(i as f32));
        }
        assert_eq!(planner.pending_len(), PLAN_QUEUE_DEPTH);
        assert_eq!(planner.completed_moves().len(), 3);
        assert_eq!(planner.completed_moves()[0].target[0], 0.0);
        assert_eq!(planner.completed_moves()[2].target[0], 2.0);
    }

    #[test]
    fn synchronize_drains_in_order() {
        let mut planner = SimPlanner::new([0.0; AXIS_COUNT]);
        planner.enqueue_move(&mv(1.0));
        planner.enqueue_move(&mv(2.0));
        planner.synchronize();

        assert_eq!(planner.pending_len(), 0);
        let done = planner.completed_moves();
        assert_eq!(done.len(), 2);
        assert_eq!(done[0].target[0], 1.0);
        assert_eq!(done[1].target[0], 2.0);
    }

    #[test]
    fn dwell_records_without_motion() {
        let mut planner = SimPlanner::new([7.0, 0.0, 0.0, 0.0]);
        planner.dwell(312);
        planner.dwell(312);
        assert_eq!(planner.dwells(), &[312, 312]);
        assert_eq!(planner.position(), [7.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn microstep_changes_are_logged_in_order() {
        let mut planner = SimPlanner::new([0.0; AXIS_COUNT]);
        planner.set_microstep_mode(0, 4);
        planner.set_microstep_mode(1, 16);
        planner.set_microstep_mode(2, 16);
        assert_eq!(planner.microstep_changes(), &[(0, 4), (1, 16), (2, 16)]);
    }
}
