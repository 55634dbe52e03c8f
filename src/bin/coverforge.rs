use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use coverforge::{
    CompositionState, CompositorSettings, DirectorySink, Editor, ExportTarget, FontBook,
    ImageRef, LoadOutcome, SharePlatform, encode_png,
};

#[derive(Parser, Debug)]
#[command(name = "coverforge", version)]
struct Cli {
    /// Log level written to stderr (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a cover at the background's native size as a PNG.
    Render(RenderArgs),
    /// Render a cover and export it at social-media sizes.
    Export(ExportArgs),
    /// List the export targets.
    Targets,
    /// Print the share-intent URL for a published post.
    Share(ShareArgs),
}

#[derive(Parser, Debug)]
struct ShareArgs {
    /// twitter, linkedin or facebook.
    #[arg(long)]
    platform: SharePlatform,

    /// Public URL of the post.
    #[arg(long)]
    url: String,

    /// Post title (used by Twitter only).
    #[arg(long, default_value = "")]
    title: String,
}

#[derive(Parser, Debug)]
struct JobArgs {
    /// Job JSON: `{ "background"?, "state", "settings"? }`.
    #[arg(long)]
    job: PathBuf,

    /// Directory of .ttf/.otf/.ttc files (repeatable).
    #[arg(long = "fonts")]
    font_dirs: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Output directory for `cover-<target>.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Target label (repeatable); all targets when omitted.
    #[arg(long = "target")]
    targets: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Job {
    /// `imageUrl` value or image path, relative to the job file.
    background: Option<String>,
    #[serde(default)]
    state: CompositionState,
    #[serde(default)]
    settings: CompositorSettings,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Export(args) => cmd_export(args),
        Command::Targets => cmd_targets(),
        Command::Share(args) => cmd_share(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let editor = open_job(&args.job)?;
    let png = encode_png(editor.composed_frame())?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let targets = if args.targets.is_empty() {
        ExportTarget::catalog().to_vec()
    } else {
        args.targets
            .iter()
            .map(|label| {
                ExportTarget::find(label)
                    .with_context(|| format!("unknown export target '{label}'"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let editor = open_job(&args.job)?;
    let mut sink = DirectorySink::new(&args.out_dir);
    for target in targets {
        editor.export(target, &mut sink)?;
    }
    for path in sink.written() {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_targets() -> anyhow::Result<()> {
    for target in ExportTarget::catalog() {
        println!("{target}\t{}", target.file_name());
    }
    Ok(())
}

fn cmd_share(args: ShareArgs) -> anyhow::Result<()> {
    let popup = args.platform.popup();
    tracing::debug!(platform = args.platform.name(), popup.width, popup.height, "share intent");
    println!("{}", args.platform.intent_url(&args.url, &args.title));
    Ok(())
}

fn open_job(args: &JobArgs) -> anyhow::Result<Editor> {
    let text = std::fs::read_to_string(&args.job)
        .with_context(|| format!("read job '{}'", args.job.display()))?;
    let job: Job = serde_json::from_str(&text)
        .with_context(|| format!("parse job '{}'", args.job.display()))?;
    let root = args.job.parent().unwrap_or_else(|| Path::new("."));

    let mut fonts = FontBook::new();
    for dir in &args.font_dirs {
        let added = fonts.load_dir(dir)?;
        tracing::info!(dir = %dir.display(), added, "loaded fonts");
    }
    if fonts.is_empty() && !job.state.text_value.trim().is_empty() {
        anyhow::bail!("job has title text but no fonts were loaded; pass --fonts <dir>");
    }

    let mut editor = Editor::new(Box::new(fonts), job.settings)?;
    if let Some(background) = &job.background {
        let image_ref = ImageRef::parse(background)?;
        if editor.load_background(&image_ref, root) != LoadOutcome::Applied {
            anyhow::bail!("background failed to load: {:?}", editor.status());
        }
    }
    editor.apply_state(job.state)?;
    Ok(editor)
}
