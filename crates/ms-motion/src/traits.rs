//! Motion output trait.

use ms_engine::MoveRequest;
use ms_ir::AXIS_COUNT;

/// Trait for motion output backends.
///
/// The playback driver pushes moves in score order and never reorders or
/// retracts them. Backends own their queue; `enqueue_move` parks until a
/// slot frees up, so a full queue slows the caller down instead of
/// dropping motion.
pub trait MotionOutput {
    /// Current planned position, i.e. the target of the last queued move.
    fn position(&self) -> [f32; AXIS_COUNT];

    /// Queue one linear move (blocking while the queue is full).
    fn enqueue_move(&mut self, request: &MoveRequest);

    /// Park until every queued move has finished.
    fn synchronize(&mut self);

    /// Hold still for `ms` milliseconds.
    fn dwell(&mut self, ms: u32);

    /// Program the microstep divisor for one channel's driver.
    fn set_microstep_mode(&mut self, channel: usize, divisor: u8);
}
