//! Compiler driver: writes the rendered document and a generated Makefile to
//! a working directory, runs the external toolchain, relocates the resulting
//! PNG, and archives or deletes the intermediates.
//!
//! The heavy lifting (typesetting, rasterizing, contouring) is delegated to
//! `make`, `lualatex`, `pdf2ps`, `ps2pdf14`, `pdftoppm`, and `zip`; failures
//! past the render stage are logged as warnings rather than returned, since a
//! missing TeX installation should not abort the caller's run.

use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::Context as _;
use tracing::{info, warn};

use crate::{
    axis::Axis,
    error::{TexplotError, TexplotResult},
    render::{Document, render_document},
};

/// Suffix appended to the output path to form the working directory.
pub const DATA_SUFFIX: &str = "_plot_data";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cleanup {
    /// Zip the working directory to `<path>_plot_data.zip`, then delete it.
    #[default]
    Archive,
    /// Delete the working directory outright.
    Delete,
    /// Leave the working directory in place.
    Keep,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CompileOptions {
    pub cleanup: Cleanup,
    /// Write the working directory and stop before invoking `make`.
    pub emit_only: bool,
}

/// Render and compile a stack of subplots to `<path>.png`.
///
/// An empty axis slice is a no-op warning, so callers can plot whatever a
/// data run happened to produce without guarding the call.
pub fn plot(path: impl AsRef<Path>, axes: &[Axis]) -> TexplotResult<()> {
    let path = path.as_ref();
    if axes.is_empty() {
        warn!("no axes provided for \"{}.png\"", path.display());
        return Ok(());
    }
    let out_dir = path.parent().filter(|d| !d.as_os_str().is_empty());
    let doc = render_document(axes, out_dir)?;
    compile(path, &doc, &CompileOptions::default())
}

/// Single-subplot convenience for [`plot`].
pub fn plot_one(path: impl AsRef<Path>, axis: &Axis) -> TexplotResult<()> {
    plot(path, std::slice::from_ref(axis))
}

/// Split the extensionless output path into directory and plot name,
/// rejecting names the Makefile cannot handle.
fn split_path(path: &Path) -> TexplotResult<(PathBuf, String)> {
    let display = path.display().to_string();
    if display.contains('"') {
        return Err(TexplotError::validation(
            "plot path cannot contain a double quote character",
        ));
    }
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| TexplotError::validation("plot name is empty or not valid UTF-8"))?;
    if name.chars().any(char::is_whitespace) {
        return Err(TexplotError::validation("plot name cannot contain whitespace"));
    }
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok((dir, name.to_string()))
}

fn workdir_for(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}{DATA_SUFFIX}", path.display()))
}

/// Write `<name>.tex`, every data table, and the Makefile into
/// `<path>_plot_data/`, creating the directory if needed. Returns the
/// working directory path.
pub fn emit_workdir(path: impl AsRef<Path>, doc: &Document) -> TexplotResult<PathBuf> {
    let path = path.as_ref();
    let (_, name) = split_path(path)?;
    let workdir = workdir_for(path);

    if workdir.exists() {
        if !workdir.is_dir() {
            return Err(TexplotError::validation(format!(
                "'{}' already exists but is not a directory",
                workdir.display()
            )));
        }
    } else {
        std::fs::create_dir_all(&workdir)
            .with_context(|| format!("create plot data directory '{}'", workdir.display()))?;
    }

    let tex_path = workdir.join(format!("{name}.tex"));
    std::fs::write(&tex_path, &doc.tex)
        .with_context(|| format!("write '{}'", tex_path.display()))?;

    for table in &doc.tables {
        let table_path = workdir.join(&table.file_name);
        std::fs::write(&table_path, &table.contents)
            .with_context(|| format!("write '{}'", table_path.display()))?;
    }

    let makefile_path = workdir.join("Makefile");
    std::fs::write(&makefile_path, makefile(&name))
        .with_context(|| format!("write '{}'", makefile_path.display()))?;

    Ok(workdir)
}

/// Build recipe for one plot: tex -> ps -> pdf -> png, deleting each
/// intermediate as soon as the next stage has consumed it. The ps detour
/// flattens transparency so `ps2pdf14 -dPDFSETTINGS=/prepress` can embed
/// fonts the way journals expect.
fn makefile(name: &str) -> String {
    let mut m = String::new();
    let _ = writeln!(m, "print-% : ; @echo $* = $($*)");
    let _ = writeln!(m);
    let _ = writeln!(m, "{name}.png: export TERM = dumb");
    let _ = writeln!(m, "{name}.png: {name}.pdf");
    let _ = writeln!(m, "\tpdftoppm -png -r 300 {name}.pdf > {name}.png \\");
    let _ = writeln!(m, "\t    && $(RM) {name}.pdf");
    let _ = writeln!(m);
    let _ = writeln!(m, "ifeq ($(OS), Windows_NT)");
    let _ = writeln!(m, "{name}.pdf: {name}.ps");
    let _ = writeln!(
        m,
        "\tMSYS2_ARG_CONV_EXCL=\"*\" ps2pdf14 -dPDFSETTINGS=/prepress {name}.ps {name}.pdf \\"
    );
    let _ = writeln!(m, "\t    && $(RM) {name}.ps");
    let _ = writeln!(m, "else");
    let _ = writeln!(m, "{name}.pdf: {name}.ps");
    let _ = writeln!(
        m,
        "\tps2pdf14 -dPDFSETTINGS=/prepress {name}.ps {name}.pdf \\"
    );
    let _ = writeln!(m, "\t    && $(RM) {name}.ps");
    let _ = writeln!(m, "endif");
    let _ = writeln!(m);
    let _ = writeln!(
        m,
        "{name}.ps: {name}.tex $(wildcard *.data) $(wildcard *.surf)"
    );
    let _ = writeln!(
        m,
        "\tlualatex -halt-on-error -shell-escape -interaction=batchmode {name} \\"
    );
    let _ = writeln!(m, "\t    && mv {name}.pdf {name}_unpressed.pdf \\");
    let _ = writeln!(m, "\t    && $(RM) {name}.aux \\");
    let _ = writeln!(m, "\t    && $(RM) {name}.log \\");
    let _ = writeln!(m, "\t    && $(RM) {name}_contortmp*.dat \\");
    let _ = writeln!(m, "\t    && $(RM) {name}_contortmp*.script \\");
    let _ = writeln!(m, "\t    && $(RM) {name}_contortmp*.table \\");
    let _ = writeln!(m, "\t    && pdf2ps {name}_unpressed.pdf \\");
    let _ = writeln!(m, "\t    && mv {name}_unpressed.ps {name}.ps \\");
    let _ = writeln!(m, "\t    && $(RM) {name}_unpressed.pdf");
    m
}

/// Run an external tool to completion with its output suppressed.
fn run_tool(program: &str, args: &[&str]) -> TexplotResult<()> {
    let status = Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| {
            TexplotError::toolchain(format!(
                "failed to run `{program}` (is it installed and on PATH?): {e}"
            ))
        })?;
    if !status.success() {
        return Err(TexplotError::toolchain(format!(
            "`{program}` exited with status {status}"
        )));
    }
    Ok(())
}

/// Drive the toolchain for an already rendered document.
pub fn compile(
    path: impl AsRef<Path>,
    doc: &Document,
    opts: &CompileOptions,
) -> TexplotResult<()> {
    let path = path.as_ref();
    let (dir, name) = split_path(path)?;
    let workdir = emit_workdir(path, doc)?;

    if opts.emit_only {
        info!("emitted plot data to \"{}\"", workdir.display());
        return Ok(());
    }

    let workdir_arg = workdir.display().to_string();
    if let Err(e) = run_tool("make", &["-C", &workdir_arg]) {
        warn!("failed to plot \"{name}.png\": {e}");
        return Ok(());
    }

    let png = workdir.join(format!("{name}.png"));
    let target = if dir.as_os_str().is_empty() {
        PathBuf::from(format!("{name}.png"))
    } else {
        dir.join(format!("{name}.png"))
    };
    if let Err(e) = std::fs::rename(&png, &target) {
        warn!("failed to move \"{}\": {e}", png.display());
        return Ok(());
    }

    info!("plotted \"{}.png\"", path.display());

    match opts.cleanup {
        Cleanup::Keep => {}
        Cleanup::Delete => {
            if let Err(e) = std::fs::remove_dir_all(&workdir) {
                warn!(
                    "failed to delete plot data for \"{}\": {e}",
                    path.display()
                );
            }
        }
        Cleanup::Archive => {
            let zip_path = format!("{}.zip", workdir.display());
            let archived = run_tool("zip", &["-jqr", &zip_path, &workdir_arg])
                .and_then(|()| {
                    std::fs::remove_dir_all(&workdir)
                        .with_context(|| format!("remove '{}'", workdir.display()))
                        .map_err(TexplotError::from)
                });
            if let Err(e) = archived {
                warn!(
                    "failed to archive and clean up plot data for \"{}\": {e}",
                    path.display()
                );
            }
        }
    }

    Ok(())
}
