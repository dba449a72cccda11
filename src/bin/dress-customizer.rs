use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;

use dress_customizer::avatar::canonicalize_value;
use dress_customizer::{
    AvatarStyle, Composition, DressParameters, ExportFormat, Exporter, SizePx, avatar_geometry,
    canonicalize, generate_dress, parse_prompt,
};

#[derive(Parser, Debug)]
#[command(name = "dress-customizer", version)]
struct Cli {
    /// Log at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a dress as SVG or PNG.
    Dress(DressArgs),
    /// Render a body avatar as SVG or PNG.
    Avatar(AvatarArgs),
    /// Apply prompt keywords and print the resulting parameters.
    Parse(ParseArgs),
}

#[derive(Parser, Debug)]
struct DressArgs {
    /// Dress parameter JSON. Defaults are used when omitted.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Free-text prompt applied on top of the parameters.
    #[arg(long)]
    prompt: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct AvatarArgs {
    /// Body profile JSON, metric or legacy shape.
    #[arg(long)]
    profile: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = StyleChoice::Flat)]
    style: StyleChoice,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct ParseArgs {
    prompt: String,

    /// Base parameter JSON.
    #[arg(long)]
    params: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct OutputArgs {
    /// Rasterize to PNG at WIDTHxHEIGHT instead of writing SVG.
    #[arg(long, value_parser = parse_size)]
    png: Option<SizePx>,

    /// Output path. SVG goes to stdout when omitted.
    #[arg(long, short)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    Flat,
    Realistic,
}

impl From<StyleChoice> for AvatarStyle {
    fn from(choice: StyleChoice) -> Self {
        match choice {
            StyleChoice::Flat => AvatarStyle::Flat,
            StyleChoice::Realistic => AvatarStyle::Realistic,
        }
    }
}

fn parse_size(s: &str) -> Result<SizePx, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = w.trim().parse::<u32>().map_err(|e| format!("bad width '{w}': {e}"))?;
    let height = h.trim().parse::<u32>().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok(SizePx::new(width, height))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Dress(args) => cmd_dress(args),
        Command::Avatar(args) => cmd_avatar(args),
        Command::Parse(args) => cmd_parse(args),
    }
}

fn read_params(path: Option<&Path>) -> anyhow::Result<DressParameters> {
    let Some(path) = path else {
        return Ok(DressParameters::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read params '{}'", path.display()))?;
    let params = DressParameters::from_json(&json)
        .with_context(|| format!("parse params '{}'", path.display()))?;
    Ok(params.clamped())
}

fn cmd_dress(args: DressArgs) -> anyhow::Result<()> {
    let mut params = read_params(args.params.as_deref())?;
    if let Some(prompt) = &args.prompt {
        params = parse_prompt(prompt, &params);
    }
    write_output(&generate_dress(&params), &args.output)
}

fn cmd_avatar(args: AvatarArgs) -> anyhow::Result<()> {
    let body = match &args.profile {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read profile '{}'", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&json)
                .with_context(|| format!("parse profile '{}'", path.display()))?;
            canonicalize_value(&value)
        }
        None => canonicalize(None),
    };
    let style = AvatarStyle::from(args.style);
    write_output(&style.render(&avatar_geometry(&body)), &args.output)
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<()> {
    let base = read_params(args.params.as_deref())?;
    let params = parse_prompt(&args.prompt, &base);
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

fn write_output(composition: &Composition, output: &OutputArgs) -> anyhow::Result<()> {
    let format = match output.png {
        Some(size) => ExportFormat::Png(size),
        None => ExportFormat::Svg,
    };
    if output.out.is_none() && matches!(format, ExportFormat::Png(_)) {
        anyhow::bail!("PNG output needs --out");
    }
    let bytes = Exporter.export_composition(composition, format)?.into_bytes();

    let Some(out) = &output.out else {
        println!("{}", String::from_utf8(bytes)?);
        return Ok(());
    };

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, &bytes).with_context(|| format!("write '{}'", out.display()))?;
    tracing::info!(path = %out.display(), "wrote output");
    Ok(())
}
