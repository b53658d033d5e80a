use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "maskpaint", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the images found in a bundle.
    List(ListArgs),
    /// Replay labeling actions on one image and export the annotated image and mask.
    Label(LabelArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Input `.zip` of PNGs, or a single image.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct LabelArgs {
    /// Input `.zip` of PNGs, or a single image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Image to label (defaults to the first one in the bundle).
    #[arg(long)]
    image: Option<String>,

    /// JSON array of surface actions (down/move/up/leave/undo/reset/zoom_in/zoom_out).
    #[arg(long)]
    actions: PathBuf,

    /// Label config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output archive path (defaults to the configured archive name).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also write the visible canvas as a PNG.
    #[arg(long)]
    preview: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Label(args) => cmd_label(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let bundle = maskpaint::ImageBundle::from_path(&args.in_path)
        .with_context(|| format!("load images from '{}'", args.in_path.display()))?;
    for img in bundle.iter() {
        println!("{}\t{}x{}", img.name(), img.width(), img.height());
    }
    Ok(())
}

fn cmd_label(args: LabelArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => maskpaint::LabelConfig::from_path(path)?,
        None => maskpaint::LabelConfig::default(),
    };

    let bundle = maskpaint::ImageBundle::from_path(&args.in_path)
        .with_context(|| format!("load images from '{}'", args.in_path.display()))?;
    let mut session = maskpaint::LabelSession::new(&config);
    session.open(bundle);
    if let Some(name) = &args.image {
        session.select(name)?;
    }

    let actions_json = std::fs::read_to_string(&args.actions)
        .with_context(|| format!("read actions '{}'", args.actions.display()))?;
    let actions = maskpaint::SurfaceAction::parse_list(&actions_json)?;

    let surface = session.surface_mut();
    let outcomes = surface.apply_all(actions);
    let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
    let discarded = outcomes.iter().filter(|o| o.is_discarded()).count();
    eprintln!(
        "strokes: {} ({} accepted, {} discarded), scale: {}",
        surface.strokes().len(),
        accepted,
        discarded,
        surface.view().scale()
    );

    if let Some(preview) = &args.preview {
        let frame = surface
            .canvas()?
            .context("no image loaded")?
            .clone();
        write_png(preview, &frame)?;
        eprintln!("wrote {}", preview.display());
    }

    let archive = maskpaint::export_labels(surface, &config.export)?;
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&archive.name));
    archive.write_to(&out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn write_png(path: &Path, frame: &maskpaint::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let png = maskpaint::encode_png(frame)?;
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
