use std::path::PathBuf;
use std::time::Duration;

use cube3d_core::{AnimationTiming, SceneSettings};

/// Longest accepted `--turn-seconds`
const MAX_TURN_SECONDS: f32 = 3600.0;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingMode {
    /// Fixed angle per frame; a turn always takes 40 frames
    PerFrame,
    /// Fixed duration per turn, whatever the frame rate
    WallClock,
}

/// Interactive 3x3x3 puzzle rendered in the terminal
#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct Args {
    /// Wavefront OBJ mesh to use for every sub-cube (defaults to a plain cube)
    #[arg(long, value_name = "OBJ")]
    pub mesh: Option<PathBuf>,

    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// How turn animations are timed
    #[arg(long, value_enum, default_value_t = TimingMode::PerFrame)]
    pub timing: TimingMode,

    /// Seconds per quarter turn with `--timing wall-clock`
    #[arg(long, default_value_t = 0.6, value_parser = parse_turn_seconds)]
    pub turn_seconds: f32,

    /// Distance the camera moves per key press
    #[arg(long, default_value_t = 1.0)]
    pub camera_speed: f32,

    /// Radians the view turns per terminal cell of mouse movement
    #[arg(long, default_value_t = 0.02)]
    pub look_sensitivity: f32,

    /// Write log messages to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn parse_turn_seconds(s: &str) -> Result<f32, String> {
    let seconds: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if seconds.is_finite() && (0.0..=MAX_TURN_SECONDS).contains(&seconds) {
        Ok(seconds)
    } else {
        Err(format!("expected a number of seconds between 0 and {MAX_TURN_SECONDS}"))
    }
}

impl Args {
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    pub fn scene_settings(&self) -> SceneSettings {
        let timing = match self.timing {
            TimingMode::PerFrame => AnimationTiming::default(),
            TimingMode::WallClock => AnimationTiming::WallClock {
                turn_duration: Duration::from_secs_f32(self.turn_seconds),
            },
        };
        SceneSettings {
            timing,
            camera_speed: self.camera_speed,
            look_sensitivity: self.look_sensitivity,
            ..SceneSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["cube3d"]);
        assert_eq!(args.fps, 30);
        assert_eq!(args.timing, TimingMode::PerFrame);
        assert!(args.mesh.is_none());

        let settings = args.scene_settings();
        assert_eq!(settings.timing, AnimationTiming::default());
        assert_eq!(settings.camera_speed, 1.0);
    }

    #[test]
    fn test_wall_clock_settings() {
        let args = Args::parse_from([
            "cube3d",
            "--timing",
            "wall-clock",
            "--turn-seconds",
            "0.5",
            "--fps",
            "60",
        ]);
        assert_eq!(args.frame_time(), Duration::from_secs(1) / 60);
        assert_eq!(
            args.scene_settings().timing,
            AnimationTiming::WallClock {
                turn_duration: Duration::from_millis(500)
            }
        );
    }

    #[test]
    fn test_zero_fps_is_rejected() {
        assert!(Args::try_parse_from(["cube3d", "--fps", "0"]).is_err());
    }

    #[test]
    fn test_turn_seconds_must_be_finite_and_bounded() {
        for bad in ["inf", "NaN", "1e30", "-1"] {
            let result = Args::try_parse_from(["cube3d", "--timing", "wall-clock", "--turn-seconds", bad]);
            assert!(result.is_err(), "accepted --turn-seconds {bad}");
        }
        let args = Args::try_parse_from(["cube3d", "--turn-seconds", "0"]).unwrap();
        assert_eq!(args.turn_seconds, 0.0);
        assert_eq!(
            args.scene_settings().timing,
            AnimationTiming::default(),
        );
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
