// Screen Viewer - headless runner for the 360 viewing scene
//
// Loads a JSON config, drives the component host for a number of frames
// against a synthetic or still-image camera, prints what each surface
// received and can export the generated screen meshes as OBJ files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine::logging::init_logging;
use engine::scene::save_obj;
use engine::RecordingSurface;
use tracing::{info, warn};
use vr360::{AppConfig, ViewerScene};

#[derive(Parser)]
#[command(name = "screen_viewer")]
#[command(about = "Run the 360 camera screens without a headset")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON config file. Defaults are used when it does not exist.
    #[arg(long, default_value = "vr360.json")]
    config: PathBuf,

    /// Dual-lens image to show instead of the test pattern
    #[arg(long)]
    image: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Simulated frame time in milliseconds
    #[arg(long, default_value_t = 11)]
    frame_ms: u64,

    /// Directory to write front_dome.obj, rear_dome.obj and curved_screen.obj into
    #[arg(long)]
    export_obj: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective config as JSON
    DumpConfig,
}

fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        warn!("config {} not found, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    AppConfig::load(path).with_context(|| format!("loading {}", path.display()))
}

fn report(name: &str, surface: &RecordingSurface) {
    let record = surface.record();
    let texture = record
        .texture
        .as_ref()
        .map(|t| format!("{}x{}", t.width, t.height))
        .unwrap_or_else(|| "none".to_string());
    println!(
        "{:<14} vertices {:>6}  triangles {:>6}  mesh uploads {:>3}  texture {} ({} uploads)",
        name,
        record.mesh.vertex_count(),
        record.mesh.triangle_count(),
        record.mesh_uploads,
        texture,
        record.texture_uploads
    );
}

fn export(dir: &Path, scene: &ViewerScene) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    for (name, surface) in [
        ("front_dome", &scene.front_dome),
        ("rear_dome", &scene.rear_dome),
        ("curved_screen", &scene.curved_screen),
    ] {
        let path = dir.join(format!("{name}.obj"));
        save_obj(&surface.record().mesh, &path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging("VR360_LOG");
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(image) = cli.image {
        config.camera_feed.image_path = Some(image);
    }

    if let Some(Commands::DumpConfig) = cli.command {
        println!("{}", config.to_json_string()?);
        return Ok(());
    }

    let mut scene = ViewerScene::from_config(&config);
    scene.start();
    scene.run(cli.frames, Duration::from_millis(cli.frame_ms));

    // Export before shutdown clears the meshes.
    if let Some(dir) = &cli.export_obj {
        export(dir, &scene)?;
    }

    println!("simulated {} frames", cli.frames);
    report("front_dome", &scene.front_dome);
    report("rear_dome", &scene.rear_dome);
    report("curved_screen", &scene.curved_screen);
    let rig = scene.rig();
    println!("rig position {:?}", rig.position);

    scene.stop();
    Ok(())
}
