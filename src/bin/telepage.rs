use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use telepage::{
    ClipartLibrary, CodeGrid, CrtPreset, CrtSettings, FrameRGBA, GlyphRasterizer, ImportMode,
    PageDocument, PageSession, PageSessionOpts, RasterOpts, SvgGlyphRasterizer, TemplateCatalogue,
    decode_page, encode_identifier, extract,
};

#[derive(Parser, Debug)]
#[command(name = "telepage", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a page document to PNG.
    Render(RenderArgs),
    /// Import an edit.tf identifier and render it to PNG.
    Import(ImportArgs),
    /// Print a decoded identifier as JSON.
    Decode(DecodeArgs),
    /// Print the identifier for a code grid JSON file.
    Encode(EncodeArgs),
    /// List the built-in templates.
    Templates,
}

#[derive(Args, Debug)]
struct FontArgs {
    /// Extra directory of .ttf/.otf/.ttc fonts.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Do not load system fonts.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input page document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// CRT preset, overriding the document's effects.
    #[arg(long)]
    effects: Option<CrtPreset>,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// Identifier URL or bare fragment.
    #[arg(long)]
    url: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = ModeArg::Mosaics)]
    mode: ModeArg,

    /// CRT preset applied after rasterizing.
    #[arg(long)]
    effects: Option<CrtPreset>,

    /// Integer output scale.
    #[arg(long, default_value_t = 1)]
    scale: u32,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    #[arg(long)]
    url: String,
}

#[derive(Args, Debug)]
struct EncodeArgs {
    /// Code grid JSON: 25 rows of 40 codes, or the object printed by `decode`.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Metadata written before the payload.
    #[arg(long)]
    metadata: Option<String>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Mosaics,
    Full,
    Rendered,
}

impl From<ModeArg> for ImportMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Mosaics => ImportMode::Mosaics,
            ModeArg::Full => ImportMode::Full,
            ModeArg::Rendered => ImportMode::Rendered,
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum GridInput {
    Bare(CodeGrid),
    Decoded {
        codes: CodeGrid,
        #[serde(default)]
        metadata: Option<String>,
    },
}

#[derive(serde::Serialize)]
struct DecodeReport {
    metadata: Option<String>,
    mosaic_cells: usize,
    text_cells: usize,
    codes: CodeGrid,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Import(args) => cmd_import(args),
        Command::Decode(args) => cmd_decode(args),
        Command::Encode(args) => cmd_encode(args),
        Command::Templates => cmd_templates(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn rasterizer(args: &FontArgs) -> Box<dyn GlyphRasterizer> {
    let mut r = if args.no_system_fonts {
        SvgGlyphRasterizer::with_fontdb(usvg::fontdb::Database::new())
    } else {
        SvgGlyphRasterizer::with_system_fonts()
    };
    if let Some(dir) = &args.fonts {
        let added = r.load_fonts_dir(dir);
        tracing::info!(dir = %dir.display(), added, "loaded font directory");
    }
    Box::new(r)
}

fn write_png(frame: &FrameRGBA, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame
        .save_png(out)
        .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let doc = PageDocument::from_path(&args.in_path)?;
    let mut opts = doc.opts()?;
    if let Some(preset) = args.effects {
        opts.effects = Some(CrtSettings::preset(preset));
    }
    let mut session =
        PageSession::new(TemplateCatalogue::builtin()?, rasterizer(&args.fonts), opts);
    doc.apply(&mut session, &ClipartLibrary::builtin()?)
        .with_context(|| format!("apply page '{}'", args.in_path.display()))?;
    let frame = session.render()?;
    write_png(frame, &args.out)
}

fn cmd_import(args: ImportArgs) -> anyhow::Result<()> {
    let opts = PageSessionOpts {
        raster: RasterOpts {
            scale: args.scale,
            ..RasterOpts::default()
        },
        effects: args.effects.map(CrtSettings::preset),
    };
    let mut session =
        PageSession::new(TemplateCatalogue::builtin()?, rasterizer(&args.fonts), opts);
    let summary = session
        .import(&args.url, args.mode.into())
        .context("import identifier")?;
    tracing::info!(?summary, "imported");
    let frame = session.render()?;
    write_png(frame, &args.out)
}

fn cmd_decode(args: DecodeArgs) -> anyhow::Result<()> {
    let page = decode_page(&args.url).context("decode identifier")?;
    let layers = extract(&page.codes, true);
    let report = DecodeReport {
        metadata: page.metadata,
        mosaic_cells: layers.mosaics.count(),
        text_cells: layers.text.count(),
        codes: page.codes,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read code grid '{}'", args.in_path.display()))?;
    let input: GridInput = serde_json::from_str(&raw)
        .with_context(|| format!("parse code grid '{}'", args.in_path.display()))?;
    let (codes, metadata) = match input {
        GridInput::Bare(codes) => (codes, None),
        GridInput::Decoded { codes, metadata } => (codes, metadata),
    };
    let metadata = args.metadata.or(metadata);
    println!("{}", encode_identifier(&codes, metadata.as_deref()));
    Ok(())
}

fn cmd_templates() -> anyhow::Result<()> {
    let catalogue = TemplateCatalogue::builtin()?;
    for (id, template) in catalogue.iter() {
        println!("{id:<12} {}", template.name);
    }
    Ok(())
}
