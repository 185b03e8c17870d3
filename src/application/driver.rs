//! Frame-driven animation driver.
//!
//! Turns discrete generation transitions into a continuous per-cell scalar:
//! the host calls [`AnimationDriver::advance`] once per frame with the
//! elapsed time, and reads back one "extrusion" height per cell for the
//! renderer to upload.

use crate::domain::{Engine, Generation};

/// Extrusion bound for dead cells, from the reference renderer convention.
pub const DEFAULT_MIN_EXTRUSION: f32 = -0.01;
/// Extrusion bound for alive cells.
pub const DEFAULT_MAX_EXTRUSION: f32 = 0.1;

/// AnimationDriver coordinates engine stepping with wall-clock time.
///
/// It accumulates a phase in fractional generations; each time the phase
/// crosses 1.0 the next generation is promoted and a fresh one is requested
/// from the engine. Between crossings, [`AnimationDriver::cell_scale`]
/// blends each cell between the previous and next generation's extremal
/// heights.
pub struct AnimationDriver {
    previous: Generation,
    next: Generation,
    /// Fractional progress toward the next generation, kept in [0, 1)
    phase: f32,
    /// Generations per second
    rate: f32,
    min_extrusion: f32,
    max_extrusion: f32,
    is_running: bool,
}

impl AnimationDriver {
    /// Create a driver synchronized to the engine's current generation
    pub fn new(engine: &Engine, rate: f32) -> Self {
        Self {
            previous: Generation::dead(engine.num_cells()),
            next: engine.current().clone(),
            phase: 0.0,
            rate,
            min_extrusion: DEFAULT_MIN_EXTRUSION,
            max_extrusion: DEFAULT_MAX_EXTRUSION,
            is_running: true,
        }
    }

    /// Override the extrusion bounds (builder pattern)
    pub fn with_extrusion(mut self, min: f32, max: f32) -> Self {
        self.min_extrusion = min;
        self.max_extrusion = max;
        self
    }

    /// Re-synchronize after the host randomized or cleared the engine:
    /// previous all dead, next = the engine's current generation, phase 0.
    pub fn reset(&mut self, engine: &Engine) {
        self.previous = Generation::dead(engine.num_cells());
        self.next = engine.current().clone();
        self.phase = 0.0;
    }

    /// Advance the phase by `elapsed_seconds * rate`. On crossing 1.0 the
    /// next generation is promoted to previous and a new one is requested
    /// from the engine; the phase keeps its fractional remainder. At most
    /// one step is taken per call: a large delta that crosses several
    /// integer boundaries still advances a single generation (reference
    /// behavior under frame stalls).
    pub fn advance(&mut self, engine: &mut Engine, elapsed_seconds: f32) {
        if !self.is_running {
            return;
        }

        self.phase += elapsed_seconds * self.rate;
        if self.phase >= 1.0 {
            self.previous = std::mem::replace(&mut self.next, engine.next_generation().clone());
            self.phase = self.phase.fract();
        }
    }

    /// The blended extrusion scale of one cell at the current phase:
    /// stable cells sit at their extremal height, transitioning cells are
    /// linearly interpolated by the fractional phase.
    pub fn cell_scale(&self, cell: usize) -> f32 {
        match (self.previous.is_alive(cell), self.next.is_alive(cell)) {
            (false, false) => self.min_extrusion,
            (true, true) => self.max_extrusion,
            (false, true) => lerp(self.min_extrusion, self.max_extrusion, self.phase),
            (true, false) => lerp(self.max_extrusion, self.min_extrusion, self.phase),
        }
    }

    /// Fill one scale per cell, for bulk upload into a vertex attribute
    /// buffer. Writes `min(out.len(), num_cells)` entries.
    pub fn write_scales(&self, out: &mut [f32]) {
        let count = out.len().min(self.next.len());
        for (cell, slot) in out[..count].iter_mut().enumerate() {
            *slot = self.cell_scale(cell);
        }
    }

    /// Fractional progress toward the next generation, in [0, 1)
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Stepping rate in generations per second
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Change the stepping rate
    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate;
    }

    /// Whether the driver is accumulating phase
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Toggle play/pause state
    pub fn toggle_running(&mut self) {
        self.is_running = !self.is_running;
    }

    /// The generation being interpolated from
    pub fn previous(&self) -> &Generation {
        &self.previous
    }

    /// The generation being interpolated toward
    pub fn next(&self) -> &Generation {
        &self.next
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
