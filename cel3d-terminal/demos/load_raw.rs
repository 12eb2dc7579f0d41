/// Example: Load and render a raw mesh file in the terminal
///
/// Usage: cargo run --example load_raw -- path/to/file.raw
///
/// Without a path, a torus is written to a temporary raw file first and
/// that file is shown instead.
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use cel3d_core::{mesh_loader::write_raw_mesh, primitives, MeshLoader, Vector3f, Vertex};
use cel3d_terminal::logging::{init_logging, LoggingConfig};
use cel3d_terminal::{AppConfig, SceneKind, TerminalApp};

fn export_torus() -> io::Result<PathBuf> {
    let path = env::temp_dir().join("cel3d-demo-torus.raw");
    let torus =
        primitives::torus(1.5, 4.0, 16, 32).with_color(Vector3f::from_array([0.9, 0.3, 0.6]));

    let vertices: Vec<Vertex> = torus.vertices().copied().collect();

    let mut writer = BufWriter::new(File::create(&path)?);
    write_raw_mesh(&mut writer, &vertices)?;
    writer.flush()?;

    println!("Wrote {} vertices to {}", vertices.len(), path.display());
    Ok(path)
}

fn main() -> io::Result<()> {
    init_logging(LoggingConfig::default());

    let path = match env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("No raw file provided, exporting a torus...");
            export_torus()?
        }
    };

    // Report what the file holds before handing it to the viewer
    let mut loader = MeshLoader::new();
    let count = loader.try_load(&path).map_err(|e| {
        let message = format!("Failed to load {}: {}", path.display(), e);
        io::Error::new(io::ErrorKind::InvalidData, message)
    })?;
    println!(
        "Loaded {} of {} declared vertices ({} complete)",
        count,
        loader.size(),
        loader.complete_count()
    );
    loader.release_arrays();

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let config = AppConfig {
        mesh_path: path,
        start_scene: SceneKind::Mesh,
        ..AppConfig::default()
    };
    let mut app = TerminalApp::new(config)?;
    app.run()?;

    Ok(())
}
