/// Command line front end for inspecting and transforming OBJ meshes
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;
use nalgebra::Vector3;
use objview_core::{write_obj, LoadError, LoadOptions, Mesh};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "objview", version, about = "Inspect and transform OBJ meshes")]
pub struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print vertex, polygon and edge counts, bounds and centroid
    Info {
        file: PathBuf,

        #[command(flatten)]
        load: LoadArgs,
    },
    /// Apply a transform and write the displayed geometry as OBJ
    Transform(TransformArgs),
}

#[derive(Debug, Clone, Copy, Args)]
pub struct LoadArgs {
    /// Keep the file's coordinates instead of fitting them to a unit volume
    #[arg(long)]
    pub raw: bool,

    /// Accept face references past the last vertex
    #[arg(long)]
    pub no_validate: bool,
}

impl LoadArgs {
    pub fn options(&self) -> LoadOptions {
        LoadOptions::default()
            .with_normalize(!self.raw)
            .with_validate_indices(!self.no_validate)
    }
}

#[derive(Debug, Args)]
pub struct TransformArgs {
    pub file: PathBuf,

    /// Translation as X,Y,Z
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
    pub translate: Option<Vector3<f32>>,

    /// Rotation about X,Y,Z (radians unless --degrees)
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
    pub rotate: Option<Vector3<f32>>,

    /// Read --rotate angles as degrees
    #[arg(long)]
    pub degrees: bool,

    /// Uniform scale factor
    #[arg(long, allow_hyphen_values = true)]
    pub scale: Option<f32>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub load: LoadArgs,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// Parse `X,Y,Z` into a vector
pub fn parse_triple(value: &str) -> Result<Vector3<f32>, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in `{value}`: {e}"))?;

    match parts.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(format!("expected three comma separated values, got `{value}`")),
    }
}

/// Run a parsed command, writing results to `out`
pub fn run<W: Write>(command: &Command, out: &mut W) -> Result<(), CliError> {
    match command {
        Command::Info { file, load } => {
            let mut mesh = Mesh::new();
            mesh.load_with(file, &load.options())?;
            print_info(&mesh, out)?;
        }
        Command::Transform(args) => {
            let mut mesh = Mesh::new();
            mesh.load_with(&args.file, &args.load.options())?;
            apply_transform(&mut mesh, args);

            match &args.output {
                Some(path) => {
                    let mut writer = BufWriter::new(File::create(path)?);
                    write_obj(&mut writer, mesh.vertices(), mesh.polygons())?;
                    writer.flush()?;
                    info!("Wrote {} vertices to {}", mesh.vertex_count(), path.display());
                }
                None => write_obj(out, mesh.vertices(), mesh.polygons())?,
            }
        }
    }
    Ok(())
}

fn apply_transform(mesh: &mut Mesh, args: &TransformArgs) {
    if let Some(mut r) = args.rotate {
        if args.degrees {
            r = r.map(f32::to_radians);
        }
        mesh.set_rotation(r.x, r.y, r.z);
    }
    if let Some(scale) = args.scale {
        mesh.set_scale(scale);
    }
    if let Some(t) = args.translate {
        mesh.set_translation(t.x, t.y, t.z);
    }
}

fn print_info<W: Write>(mesh: &Mesh, out: &mut W) -> io::Result<()> {
    if let Some(path) = mesh.source() {
        writeln!(out, "file:      {}", path.display())?;
    }
    writeln!(out, "vertices:  {}", mesh.vertex_count())?;
    writeln!(out, "polygons:  {}", mesh.polygon_count())?;
    writeln!(out, "edges:     {}", mesh.edge_count())?;

    if let Some(bounds) = mesh.bounds() {
        let (min, max) = (bounds.min, bounds.max);
        writeln!(
            out,
            "bounds:    ({}, {}, {}) .. ({}, {}, {})",
            min.x, min.y, min.z, max.x, max.y, max.z
        )?;
        let c = mesh.centroid();
        writeln!(out, "centroid:  ({}, {}, {})", c.x, c.y, c.z)?;
    }
    Ok(())
}
