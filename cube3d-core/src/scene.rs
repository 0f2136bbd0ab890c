//! Top-level puzzle state and per-frame orchestration
use std::f32::consts::FRAC_PI_2;
use std::ops::ControlFlow;
use std::time::Duration;

use crate::camera::Camera;
use crate::engine::{CompletedRotation, SliceRotationEngine};
use crate::geometry::Mesh;
use crate::layout::Slice;
use crate::registry::SubCubeRegistry;

/// Number of frames a quarter turn takes with [`AnimationTiming::PerFrame`]
pub const FRAMES_PER_TURN: u32 = 40;

/// How fast a turn is animated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationTiming {
    /// Fixed angle per frame, so the perceived speed follows the frame rate
    PerFrame { step: f32 },
    /// Fixed duration per quarter turn, independent of the frame rate
    WallClock { turn_duration: Duration },
}

impl AnimationTiming {
    /// Angle to advance a turn by for a frame that took `frame_time`
    pub fn delta_angle(&self, frame_time: Duration) -> f32 {
        match *self {
            AnimationTiming::PerFrame { step } => step,
            AnimationTiming::WallClock { turn_duration } => {
                if turn_duration.is_zero() {
                    FRAC_PI_2
                } else {
                    FRAC_PI_2 * frame_time.as_secs_f32() / turn_duration.as_secs_f32()
                }
            }
        }
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        AnimationTiming::PerFrame {
            step: FRAC_PI_2 / FRAMES_PER_TURN as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    pub timing: AnimationTiming,
    /// Distance moved per camera movement command
    pub camera_speed: f32,
    /// Radians of view rotation per unit of mouse movement
    pub look_sensitivity: f32,
    /// Width / height of the viewport
    pub aspect: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            timing: AnimationTiming::default(),
            camera_speed: 1.0,
            look_sensitivity: crate::camera::DEFAULT_LOOK_SENSITIVITY,
            aspect: 800.0 / 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMove {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Everything the input layer can ask of the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Rotate(Slice),
    ToggleDirection,
    ResetCamera,
    MoveCamera(CameraMove),
    Look { x: f32, y: f32 },
    Quit,
}

/// The puzzle, its sub-cubes and the camera looking at them
pub struct Scene {
    pub camera: Camera,
    pub cubes: SubCubeRegistry,
    pub engine: SliceRotationEngine,
    settings: SceneSettings,
}

impl Scene {
    pub fn new(settings: SceneSettings, mesh: &Mesh) -> Self {
        let mut camera = Camera::new(settings.aspect);
        camera.look_sensitivity = settings.look_sensitivity;

        let mut scene = Self {
            camera,
            cubes: SubCubeRegistry::new(mesh),
            engine: SliceRotationEngine::new(),
            settings,
        };
        // Place the sub-cubes before the first frame is drawn.
        scene.engine.advance_frame(0.0, &mut scene.cubes);
        scene
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Carry out one input command. Returns `Break` when the program should
    /// stop.
    pub fn apply(&mut self, command: Command) -> ControlFlow<()> {
        let speed = self.settings.camera_speed;
        match command {
            Command::Rotate(slice) => {
                self.engine.request_rotation(slice);
            }
            Command::ToggleDirection => self.engine.toggle_direction(),
            Command::ResetCamera => self.camera.reset(),
            Command::MoveCamera(direction) => match direction {
                CameraMove::Forward => self.camera.move_forward(speed),
                CameraMove::Backward => self.camera.move_backward(speed),
                CameraMove::Left => self.camera.move_left(speed),
                CameraMove::Right => self.camera.move_right(speed),
                CameraMove::Up => self.camera.move_up(speed),
                CameraMove::Down => self.camera.move_down(speed),
            },
            Command::Look { x, y } => self.camera.mouse_look(x, y),
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Advance the animation by one frame that took `frame_time`
    pub fn update(&mut self, frame_time: Duration) -> Option<CompletedRotation> {
        let delta = self.settings.timing.delta_angle(frame_time);
        self.engine.advance_frame(delta, &mut self.cubes)
    }
}
