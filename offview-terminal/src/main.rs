/// offview - view OFF meshes in the terminal
///
/// Controls:
///   - WASD / Arrow Keys: Rotate the mesh
///   - E/R: Roll rotation
///   - P: Toggle perspective / orthographic projection
///   - Space: Pause the idle spin
///   - Q/ESC: Quit

use anyhow::{bail, Context, Result};
use clap::Parser;
use offview_core::{load_off, Mesh, ProjectionMode};
use offview_terminal::{TerminalApp, ViewerConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "offview-terminal")]
#[command(about = "Render an OFF mesh in the terminal")]
struct Cli {
    /// OFF file to load; prompted for when omitted
    path: Option<PathBuf>,

    /// Show the built-in cube instead of loading a file
    #[arg(long, conflicts_with = "path")]
    demo: bool,

    /// Start in orthographic projection
    #[arg(long)]
    orthographic: bool,

    /// Frame rate cap
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Do not rotate the mesh on its own
    #[arg(long)]
    no_spin: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mesh = if cli.demo {
        Mesh::cube(2.0)
    } else {
        let path = match cli.path {
            Some(path) => path,
            None => prompt_for_path(io::stdin().lock(), &mut io::stdout())?,
        };
        println!("Loading {}", path.display());
        load_off(&path).with_context(|| format!("failed to load {}", path.display()))?
    };

    let sphere = mesh
        .bounding_sphere()
        .context("mesh has nothing to display")?;
    println!(
        "Loaded {} vertices, {} faces, bounding radius {:.4}",
        mesh.vertex_count(),
        mesh.face_count(),
        sphere.radius
    );
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let config = ViewerConfig {
        target_fps: cli.fps,
        spin: !cli.no_spin,
        projection: if cli.orthographic {
            ProjectionMode::Orthographic
        } else {
            ProjectionMode::Perspective
        },
        ..ViewerConfig::default()
    };

    let mut app = TerminalApp::new(mesh, config)?;
    app.run()?;

    Ok(())
}

/// Shown when no path is given on the command line
const PATH_PROMPT: &str = "Enter OFF file path\\name: ";

/// Ask for a file path; any length, line terminator stripped
fn prompt_for_path<R: BufRead, W: Write>(mut input: R, output: &mut W) -> Result<PathBuf> {
    write!(output, "{PATH_PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read file path")?;

    let path = line.trim_end_matches(['\r', '\n']);
    if path.is_empty() {
        bail!("no file path given");
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_reads_long_path() {
        let long = format!("/tmp/{}/mesh.off", "nested".repeat(20));
        let mut shown = Vec::new();
        let path = prompt_for_path(format!("{long}\r\n").as_bytes(), &mut shown).unwrap();

        assert_eq!(path, PathBuf::from(long));
        assert_eq!(String::from_utf8(shown).unwrap(), "Enter OFF file path\\name: ");
    }

    #[test]
    fn test_prompt_rejects_empty_answer() {
        let mut shown = Vec::new();
        assert!(prompt_for_path("\n".as_bytes(), &mut shown).is_err());
        assert!(prompt_for_path("".as_bytes(), &mut shown).is_err());
    }
}
