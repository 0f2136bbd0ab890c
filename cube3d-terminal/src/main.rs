//! Cube3D Terminal - interactive 3x3x3 puzzle
//!
//! Turn slices with the number keys, fly around with WASD/R/F and the mouse.
//! Run with `--help` for options.

use clap::Parser;
use cube3d_core::{obj, Mesh};
use cube3d_terminal::{cli::Args, TerminalApp, CONTROLS};
use eyre::WrapErr;

/// Size of the built-in sub-cube mesh
const DEFAULT_CUBE_SIZE: f32 = 2.0;

fn init_logging(args: &Args) -> eyre::Result<()> {
    let env = env_logger::Env::default();
    let mut builder = match &args.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .wrap_err_with(|| format!("creating log file {}", path.display()))?;
            let mut builder = env_logger::Builder::from_env(env.default_filter_or("info"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        // stderr shares the screen with the puzzle view, so keep it quiet.
        None => env_logger::Builder::from_env(env.default_filter_or("warn")),
    };
    builder.init();
    Ok(())
}

fn load_mesh(args: &Args) -> Mesh {
    let Some(path) = &args.mesh else {
        return Mesh::cube(DEFAULT_CUBE_SIZE);
    };
    match obj::load_obj(path) {
        Ok(mesh) => {
            log::info!(
                "loaded {} triangles from {}",
                mesh.triangles.len(),
                path.display()
            );
            mesh
        }
        Err(e) => {
            log::error!("{e}; using the built-in cube instead");
            eprintln!("Could not load mesh: {e}");
            Mesh::cube(DEFAULT_CUBE_SIZE)
        }
    }
}

fn main() -> eyre::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    println!("Cube3D Terminal - Loading...");
    let mesh = load_mesh(&args);

    println!("{CONTROLS}");
    println!("Starting in a moment (press q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(2));

    let mut app = TerminalApp::new(&mesh, args.scene_settings(), args.frame_time())
        .wrap_err("initializing terminal")?;
    app.run().wrap_err("running terminal renderer")?;

    log::info!("exiting");
    Ok(())
}
