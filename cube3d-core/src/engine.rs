//! Slice rotation engine
//!
//! Tracks which sub-cube occupies which grid position, animates one quarter
//! turn at a time, and on completion commits the turn: the affected sub-cubes
//! record the reorientation in their transforms and the arrangement is
//! permuted.
use nalgebra::Vector3;
use std::f32::consts::FRAC_PI_2;

use crate::layout::{position_coords, RotationDirection, Slice, NUM_SUB_CUBES, SUB_CUBE_SCALE};
use crate::registry::SubCubeRegistry;

/// Slack when deciding that a turn has reached 90 degrees, so that summing
/// equal f32 steps still finishes on the expected frame.
const COMPLETION_EPSILON: f32 = 1e-4;

/// The turn currently being animated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveRotation {
    pub slice: Slice,
    /// Direction captured when the turn was requested
    pub direction: RotationDirection,
    /// Elapsed angle in radians, from 0 up to π/2
    pub angle: f32,
}

impl ActiveRotation {
    /// Signed orbit angle to draw this frame, never past a quarter turn
    pub fn orbit_angle(&self) -> f32 {
        self.direction.sign() * self.angle.min(FRAC_PI_2)
    }

    fn is_finished(&self) -> bool {
        self.angle >= FRAC_PI_2 - COMPLETION_EPSILON
    }
}

/// A turn that has been committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedRotation {
    pub slice: Slice,
    pub direction: RotationDirection,
}

#[derive(Debug, Clone)]
pub struct SliceRotationEngine {
    /// Sub-cube identity at each position
    arrangement: [usize; NUM_SUB_CUBES],
    /// Direction given to the next requested turn
    direction: RotationDirection,
    active: Option<ActiveRotation>,
}

impl SliceRotationEngine {
    /// Solved arrangement: sub-cube `i` at position `i`
    pub fn new() -> Self {
        Self {
            arrangement: std::array::from_fn(|i| i),
            direction: RotationDirection::default(),
            active: None,
        }
    }

    pub fn arrangement(&self) -> &[usize; NUM_SUB_CUBES] {
        &self.arrangement
    }

    /// Sub-cube identity currently at `position`
    pub fn occupant(&self, position: usize) -> usize {
        self.arrangement[position]
    }

    pub fn active(&self) -> Option<&ActiveRotation> {
        self.active.as_ref()
    }

    pub fn is_rotating(&self) -> bool {
        self.active.is_some()
    }

    pub fn direction(&self) -> RotationDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: RotationDirection) {
        self.direction = direction;
    }

    /// Flip the direction of future turns. A turn in progress is unaffected.
    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
        log::debug!("rotation direction is now {}", self.direction);
    }

    /// Start turning `slice` unless a turn is already in progress.
    ///
    /// Returns whether the request was accepted.
    pub fn request_rotation(&mut self, slice: Slice) -> bool {
        if let Some(active) = &self.active {
            log::debug!("ignoring {slice} turn while {} is turning", active.slice);
            return false;
        }
        self.active = Some(ActiveRotation {
            slice,
            direction: self.direction,
            angle: 0.0,
        });
        log::debug!("turning {slice} {}", self.direction);
        true
    }

    /// Advance by one frame.
    ///
    /// Adds `delta_angle` to the turn in progress, rewrites the transform of
    /// every sub-cube from its position, and commits the turn once it reaches
    /// a quarter turn. Must be called every frame, also while idle, so that
    /// sub-cubes always reflect the current arrangement.
    pub fn advance_frame(
        &mut self,
        delta_angle: f32,
        cubes: &mut SubCubeRegistry,
    ) -> Option<CompletedRotation> {
        if let Some(active) = &mut self.active {
            active.angle += delta_angle;
        }

        self.apply_transforms(cubes);

        match self.active {
            Some(active) if active.is_finished() => Some(self.complete(cubes)),
            _ => None,
        }
    }

    /// Rewrite each sub-cube transform from its position and the turn in
    /// progress.
    fn apply_transforms(&self, cubes: &mut SubCubeRegistry) {
        let scale = Vector3::repeat(SUB_CUBE_SCALE);
        for position in 0..NUM_SUB_CUBES {
            let transform = cubes.transform_mut(self.arrangement[position]);
            transform.load_identity();
            if let Some(active) = self.active.filter(|a| a.slice.contains(position)) {
                // Rotate before translating so the sub-cube orbits the center.
                transform.rotate(active.orbit_angle(), &active.slice.axis().unit_vector());
            }
            transform.translate(&position_coords(position));
            transform.replay_permanent_rotations();
            transform.scale(&scale);
        }
    }

    /// Commit the turn in progress.
    ///
    /// Panics if no turn is in progress.
    pub fn complete(&mut self, cubes: &mut SubCubeRegistry) -> CompletedRotation {
        let Some(active) = self.active.take() else {
            panic!("no rotation in progress");
        };
        let ActiveRotation {
            slice, direction, ..
        } = active;
        let positions = slice.positions();

        let previous: [usize; 9] = (*positions).map(|position| self.arrangement[position]);
        for &id in &previous {
            cubes
                .transform_mut(id)
                .record_permanent_rotation(slice.axis(), direction.sign() * FRAC_PI_2);
        }
        for (cell, &id) in previous.iter().enumerate() {
            self.arrangement[positions[direction.destination_cell(cell)]] = id;
        }

        log::info!("committed {slice} turn {direction}");
        CompletedRotation { slice, direction }
    }
}

impl Default for SliceRotationEngine {
    fn default() -> Self {
        Self::new()
    }
}
