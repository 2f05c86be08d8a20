//! Prints a summary of a level file and checks its textures against the given archives.
//!
//! Usage: `bspview-info [-v] [--json] <level.bsp> [archive.wad ...]`

use std::{fs, path::Path, process};

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::Serialize;

use bspview_levels::bsp::LumpEntry;
use bspview_levels::prelude::*;

/// What was asked for on the command line.
struct Args {
    verbose: bool,
    json: bool,
    level: String,
    archives: Vec<String>,
}

impl Args {
    fn from_env() -> Result<Args> {
        let mut verbose = false;
        let mut json = false;
        let mut paths = Vec::new();
        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "-v" | "--verbose" => verbose = true,
                "--json" => json = true,
                flag if flag.starts_with('-') => return Err(anyhow!("Unknown flag {}", flag)),
                _ => paths.push(arg),
            }
        }

        if paths.is_empty() {
            return Err(anyhow!(
                "Usage: bspview-info [-v] [--json] <level.bsp> [archive.wad ...]"
            ));
        }
        let level = paths.remove(0);

        Ok(Args {
            verbose,
            json,
            level,
            archives: paths,
        })
    }
}

#[derive(Debug, Serialize)]
struct Counts {
    entities: usize,
    planes: usize,
    textures: usize,
    vertices: usize,
    nodes: usize,
    texinfo: usize,
    faces: usize,
    leaves: usize,
    clip_nodes: usize,
    mark_surfaces: usize,
    edges: usize,
    surfedges: usize,
    models: usize,
    lighting_bytes: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    version: BspVersion,
    lumps: Vec<LumpEntry>,
    counts: Counts,
    warnings: Vec<String>,
    required_archives: Vec<String>,
    missing_archives: Vec<String>,
    loaded_archives: Vec<String>,
    unresolved_textures: Vec<String>,
    drawable_faces: usize,
    triangles: usize,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::from_env()?;

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_max_level(log::LevelFilter::Debug)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .context("Error initialising logger")?;

    let data = fs::read(&args.level).with_context(|| format!("Error reading {}", args.level))?;
    let file = BspFile::parse(&data).with_context(|| format!("Error parsing {}", args.level))?;
    info!("Loaded {} ({:?})", args.level, file.version());

    let mut archives = ArchiveSet::new();
    for path in args.archives.iter() {
        let data = fs::read(path).with_context(|| format!("Error reading {}", path))?;
        let archive = Archive::parse(&data).with_context(|| format!("Error parsing {}", path))?;
        archives.insert(file_name(path), archive);
    }

    let report = build_report(&file, &archives);

    if args.json {
        let out = serde_json::to_string_pretty(&report).context("Error writing report")?;
        println!("{}", out);
    } else {
        print_report(&args.level, &report);
    }

    Ok(())
}

/// File name of `path`, which is how levels refer to archives.
fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_owned())
}

fn build_report(file: &BspFile, archives: &ArchiveSet) -> Report {
    let counts = Counts {
        entities: file.entities().len(),
        planes: file.planes().len(),
        textures: file.textures().len(),
        vertices: file.vertices().len(),
        nodes: file.nodes().len(),
        texinfo: file.texinfo().len(),
        faces: file.faces().len(),
        leaves: file.leaves().len(),
        clip_nodes: file.clip_nodes().len(),
        mark_surfaces: file.mark_surfaces().len(),
        edges: file.edges().len(),
        surfedges: file.surfedges().len(),
        models: file.models().len(),
        lighting_bytes: file.lighting().len(),
    };

    let required_archives = match file.required_archives() {
        Ok(names) => names,
        Err(e) => {
            debug!("No archive list: {}", e);
            Vec::new()
        }
    };
    let loaded_archives: Vec<String> = archives.names().map(str::to_owned).collect();
    let missing_archives = required_archives
        .iter()
        .filter(|name| !loaded_archives.iter().any(|l| l.eq_ignore_ascii_case(name)))
        .cloned()
        .collect();

    let unresolved_textures = file
        .textures()
        .iter()
        .filter(|t| !t.name.is_empty() && !t.is_skipped())
        .filter(|t| resolve_texture(t, archives).is_err())
        .map(|t| t.name.clone())
        .collect();

    let mut drawable_faces = 0;
    let mut triangles = 0;
    for idx in 0..file.faces().len() as u32 {
        match file.face_geometry(idx) {
            Ok(Some(geometry)) => {
                drawable_faces += 1;
                triangles += geometry.triangles.len();
            }
            Ok(None) => {}
            Err(e) => warn!("Face {}: {}", idx, e),
        }
    }

    Report {
        version: file.version(),
        lumps: file.header().lumps.to_vec(),
        counts,
        warnings: file.warnings().iter().map(|w| w.to_string()).collect(),
        required_archives,
        missing_archives,
        loaded_archives,
        unresolved_textures,
        drawable_faces,
        triangles,
    }
}

fn print_report(path: &str, report: &Report) {
    println!("{}: {:?}", path, report.version);

    println!("\nLumps:");
    for lump in report.lumps.iter() {
        println!("  {:<14} {:>10} {:>10}", lump.kind.name(), lump.offset, lump.size);
    }

    let c = &report.counts;
    println!("\nRecords:");
    for (name, count) in [
        ("entities", c.entities),
        ("planes", c.planes),
        ("textures", c.textures),
        ("vertices", c.vertices),
        ("nodes", c.nodes),
        ("texinfo", c.texinfo),
        ("faces", c.faces),
        ("leaves", c.leaves),
        ("clipnodes", c.clip_nodes),
        ("marksurfaces", c.mark_surfaces),
        ("edges", c.edges),
        ("surfedges", c.surfedges),
        ("models", c.models),
        ("lighting bytes", c.lighting_bytes),
    ]
    .iter()
    {
        println!("  {:<14} {:>10}", name, count);
    }
    println!(
        "\n{} drawable faces, {} triangles",
        report.drawable_faces, report.triangles
    );

    if !report.warnings.is_empty() {
        println!("\n{} warnings:", report.warnings.len());
        for w in report.warnings.iter() {
            println!("  {}", w);
        }
    }

    println!("\nRequired archives: {}", report.required_archives.join(", "));
    if !report.missing_archives.is_empty() {
        println!("Not loaded: {}", report.missing_archives.join(", "));
    }
    if !report.unresolved_textures.is_empty() {
        println!(
            "Unresolved textures: {}",
            report.unresolved_textures.join(", ")
        );
    }
}
