use crate::core::ticks::Ticks;

/// Timing snapshot handed to `Game::update` for one fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateState {
    /// Duration of this step: the target step duration, or zero for the
    /// synthetic first update issued by `Engine::run`.
    pub elapsed_game_time: Ticks,
    /// Host session time as of the previous step.
    pub total_game_time: Ticks,
    /// True while the loop keeps needing catch-up bursts.
    pub is_running_slowly: bool,
}

/// Timing snapshot handed to `Game::draw`.
///
/// `elapsed_game_time` is the sum of step durations run since the previous
/// draw, so a frame that ran two steps reports two steps' worth of time.
#[derive(Debug)]
pub struct DrawState<'a, D> {
    pub total_game_time: Ticks,
    pub elapsed_game_time: Ticks,
    pub is_running_slowly: bool,
    /// Rendering context owned by the host surface.
    pub graphics_device: &'a D,
}

impl<D> Clone for DrawState<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for DrawState<'_, D> {}
