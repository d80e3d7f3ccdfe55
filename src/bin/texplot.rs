use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "texplot", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a recipe to PNG (requires make, lualatex, pdftoppm on PATH).
    Render(RenderArgs),
    /// Write the LaTeX source, data tables, and Makefile without compiling.
    Emit(EmitArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input recipe JSON ({"axes": [...]}).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path without extension; produces <out>.png.
    #[arg(long)]
    out: PathBuf,

    /// Keep the working directory instead of archiving it.
    #[arg(long)]
    keep_data: bool,

    /// Delete the working directory instead of archiving it.
    #[arg(long, conflicts_with = "keep_data")]
    delete_data: bool,
}

#[derive(Parser, Debug)]
struct EmitArgs {
    /// Input recipe JSON ({"axes": [...]}).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path without extension; the working directory lands beside it.
    #[arg(long)]
    out: PathBuf,
}

#[derive(serde::Deserialize)]
struct Recipe {
    axes: Vec<texplot::Axis>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Emit(args) => cmd_emit(args),
    }
}

fn read_recipe(path: &Path) -> anyhow::Result<Recipe> {
    let f = File::open(path).with_context(|| format!("open recipe '{}'", path.display()))?;
    let r = BufReader::new(f);
    let recipe: Recipe = serde_json::from_reader(r).with_context(|| "parse recipe JSON")?;
    Ok(recipe)
}

fn render_for(recipe: &Recipe, out: &Path) -> anyhow::Result<texplot::Document> {
    let out_dir = out.parent().filter(|d| !d.as_os_str().is_empty());
    Ok(texplot::render_document(&recipe.axes, out_dir)?)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let recipe = read_recipe(&args.in_path)?;
    let doc = render_for(&recipe, &args.out)?;

    let opts = texplot::CompileOptions {
        cleanup: if args.keep_data {
            texplot::Cleanup::Keep
        } else if args.delete_data {
            texplot::Cleanup::Delete
        } else {
            texplot::Cleanup::Archive
        },
        emit_only: false,
    };
    texplot::compile(&args.out, &doc, &opts)?;
    Ok(())
}

fn cmd_emit(args: EmitArgs) -> anyhow::Result<()> {
    let recipe = read_recipe(&args.in_path)?;
    let doc = render_for(&recipe, &args.out)?;
    let workdir = texplot::emit_workdir(&args.out, &doc)?;
    eprintln!("wrote {}", workdir.display());
    Ok(())
}
