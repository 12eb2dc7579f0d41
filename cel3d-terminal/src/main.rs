/// cel3d Terminal Viewer - cel-shaded scenes in the terminal
///
/// Controls:
///   - Arrow Keys: Rotate the view
///   - +/-: Zoom in and out
///   - Q/ESC: Quit
///   - Any other key: Reset the view and show the next scene
use std::path::PathBuf;

use anyhow::Context;
use cel3d_core::LoaderConfig;
use cel3d_terminal::config::DEFAULT_MESH_PATH;
use cel3d_terminal::logging::{init_logging, LoggingConfig};
use cel3d_terminal::{AppConfig, SceneKind, TerminalApp};
use clap::Parser;

#[derive(Parser)]
#[command(name = "cel3d-terminal")]
#[command(version, about = "Cel-shaded 3D viewer for the terminal")]
struct Cli {
    /// Raw mesh file shown in the mesh scene.
    #[arg(short, long, default_value = DEFAULT_MESH_PATH)]
    mesh: PathBuf,

    /// Scene shown at start-up.
    #[arg(short, long, value_enum, default_value_t = SceneKind::Basic)]
    scene: SceneKind,

    /// Target frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Cells an outline stroke reaches on each side of an edge.
    #[arg(long, default_value_t = 1)]
    outline_width: usize,

    /// Refuse mesh files declaring more vertices than this.
    #[arg(long)]
    max_vertices: Option<u32>,

    /// Log filter, e.g. "info" or "cel3d_core=debug" (overrides RUST_LOG).
    #[arg(long)]
    log: Option<String>,

    /// Write log records to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn app_config(&self) -> AppConfig {
        let mut loader = LoaderConfig::default();
        if let Some(max_vertices) = self.max_vertices {
            loader.max_vertices = max_vertices;
        }
        AppConfig {
            mesh_path: self.mesh.clone(),
            start_scene: self.scene,
            target_fps: self.fps,
            outline_width: self.outline_width,
            loader,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        log_file: cli.log_file.clone(),
        ..LoggingConfig::default()
    });

    let config = cli.app_config();
    log::info!("starting with {:?}", config);

    let mut app = TerminalApp::new(config).context("terminal size unavailable")?;
    app.run().context("terminal viewer failed")?;

    Ok(())
}
