//! Pure renderer: walks accumulated axis state and produces the LaTeX source
//! plus the side-car data tables. No filesystem access happens here; the
//! compiler driver decides where the files land.

use std::path::Path;

use crate::{
    axis::{Axis, CoordOpts, Series, SurfaceKind},
    error::{TexplotError, TexplotResult},
    number::{fmt, fmt_list},
    style::{
        BIDIR_COLORMAP, DEFAULT_CYCLE, LineStyle, MarkerChoice, SeriesColor, TickFormat,
        mark_cycle,
    },
};

const FONT_SIZE: &str = "footnotesize";
const LEGEND_FONT_SIZE: &str = "scriptsize";
const TITLE_SIZE: &str = "normalsize";

/// One flat whitespace-delimited table referenced by the markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataTable {
    /// File name relative to the working directory, `<subplot>.<index>.data`
    /// for series and `<subplot>.<index>.surf` for surfaces.
    pub file_name: String,
    /// Header line plus one row per sample, newline-terminated.
    pub contents: String,
}

/// A rendered document: the `.tex` source and every table it references.
#[derive(Clone, Debug)]
pub struct Document {
    pub tex: String,
    pub tables: Vec<DataTable>,
}

// The newtx date sniffing selects the `newsu` option on versions that have it
// (2023-08-21 and later); older TeX distributions fall back to
// newtxtext/newtxmath.
const PREAMBLE: &str = r#"\IfFileExists{standalone.cls}{}{\errmessage{The "standalone" package is required.}}
\documentclass{standalone}
\usepackage{xstring}
\makeatletter
\@ifclasslater{standalone}{2018/03/26}{}{\usepackage{luatex85}}
\IfFileExists{newtx.sty}%
{%
    \newread\myread
    \openin\myread=newtx.sty
    \@whilesw\ifx\mydone\undefined\fi%
    {%
        \readline\myread to \myline
        \StrGobbleLeft{\myline}{5}[\mytempa]
        \StrSplit{\mytempa}{8}{\mytempa}{\mytempb}
        \ifnum\pdf@strcmp{\mytempa}{filedate}=0\relax\def\mydone\fi
    }
    \closein\myread
    \makeatother
    \StrGobbleLeft{\myline}{14}[\newtxdate]
    \StrLeft{\newtxdate}{10}[\newtxdate]
    \StrSplit{\newtxdate}{4}{\newtxyear}{\newtxmonth}
    \StrGobbleLeft{\newtxmonth}{1}[\newtxmonth]
    \StrSplit{\newtxmonth}{2}{\newtxmonth}{\newtxday}
    \StrGobbleLeft{\newtxday}{1}[\newtxday]
    \def\usenewsu{1} \ifnum\newtxyear<2023\def\usenewsu{0}\fi \ifnum\newtxyear=2023\ifnum\newtxmonth<8\def\usenewsu{0}\fi\fi \ifnum\newtxyear=2023\ifnum\newtxmonth=8\ifnum\newtxday<21\def\usenewsu{0}\fi\fi\fi
    \ifnum\usenewsu=1\usepackage[newsu]{newtx}\else\usepackage{newtx}\fi
}{%
    \usepackage{newtxtext}
    \usepackage{newtxmath}
}
\usepackage{bm}
\usepackage{tikz}
\usepackage{pgfplots}
\usepackage{xcolor}
\usepackage{siunitx}
\sisetup{exponent-product = \ensuremath{\cdot}, inter-unit-product = \ensuremath{\cdot}, group-separator = {,}, group-digits = integer, per-mode = symbol}
\DeclareSIUnit[number-unit-product = ]\percent{\char`\%}
\DeclareSIUnit\au{AU}
\DeclareSIUnit\lu{LU}
\DeclareSIUnit\tu{TU}
\DeclareSIUnit\mu{MU}
\DeclareSIUnit\arcsec{arcsec}
\pgfplotsset{compat = 1.12}
\usetikzlibrary{pgfplots.groupplots}
\NewDocumentCommand\trans{}{\mathsf{T}}
\NewDocumentCommand\args{m}{\mathchoice{\!\left(#1\right)}{\!\left(#1\right)}{\left(#1\right)}{\left(#1\right)}}
\NewDocumentCommand\notimplies{}{\centernot\implies}
\NewDocumentCommand\prob{m}{\operatorname{P}\!\left\{#1\right\}}
\NewDocumentCommand\expect{m}{\operatorname{E}\!\left[#1\right]}
\NewDocumentCommand\given{}{\;\middle|\;}
\NewDocumentCommand\placeholder{}{\cdot}
\NewDocumentCommand\argmax{}{\operatornamewithlimits{arg\,max}}
\NewDocumentCommand\lab{}{\operatorname{lab}}
\NewDocumentCommand\kronecker{mm}{\delta_{#1}\!\left[#2\right]}
\NewDocumentCommand\dd{}{\operatorname{d}}
\NewDocumentCommand\dv{mm}{\frac{\dd#1}{\dd#2}}
\NewDocumentCommand\pdv{mm}{\frac{\partial#1}{\partial#2}}
"#;

/// `\definecolor`s for the cycle list plus the bidir colormap.
fn palette_defs() -> String {
    let mut s = String::new();
    for (i, rgb) in DEFAULT_CYCLE.iter().enumerate() {
        s.push_str(&format!(
            "\\definecolor{{color{i}}}{{RGB}}{{{:>3}, {:>3}, {:>3}}}\n",
            rgb[0], rgb[1], rgb[2]
        ));
    }
    s.push_str("\\pgfplotscreateplotcyclelist{colorcycle}{");
    for i in 0..DEFAULT_CYCLE.len() {
        s.push_str(&format!("{{color{i}}}"));
        if i + 1 < DEFAULT_CYCLE.len() {
            s.push_str(", ");
        }
    }
    s.push_str("}\n");
    s.push_str("\\pgfplotsset{colormap = {bidir}{");
    for (i, rgb) in BIDIR_COLORMAP.iter().enumerate() {
        s.push_str(&format!(
            "rgb255 = ({:>3}, {:>3}, {:>3})",
            rgb[0], rgb[1], rgb[2]
        ));
        if i + 1 < BIDIR_COLORMAP.len() {
            s.push_str(", ");
        }
    }
    s.push_str("}}\n");
    s
}

/// Render the full document for a stack of subplots.
///
/// `out_dir` is the directory the final image is headed for; contour plots
/// embed it in the gnuplot invocation so `-shell-escape` runs in the right
/// place. Pass `None` when the output lands in the current directory.
#[tracing::instrument(skip_all, fields(axes = axes.len()))]
pub fn render_document(axes: &[Axis], out_dir: Option<&Path>) -> TexplotResult<Document> {
    if axes.is_empty() {
        return Err(TexplotError::validation(
            "document requires at least one axis",
        ));
    }

    let mut tex = String::with_capacity(PREAMBLE.len() + 4096);
    tex.push_str(PREAMBLE);
    tex.push_str(&palette_defs());
    tex.push_str("\\begin{document}\n");
    tex.push_str(
        "\\begin{tikzpicture}[define rgb/.code = {\\definecolor{mycolor}{RGB}{#1}}, \
         rgb color/.style = {define rgb = {#1}, mycolor}]\n",
    );
    let sep = if axes.iter().any(|a| a.no_sep) {
        "0.5cm"
    } else {
        "1.3cm"
    };
    tex.push_str(&format!(
        "\\begin{{groupplot}}[group style = {{columns = 1, rows = {}, vertical sep = {sep}}}]\n",
        axes.len()
    ));

    let mut tables = Vec::new();
    for (subplot, axis) in axes.iter().enumerate() {
        render_axis(axis, subplot, out_dir, &mut tex, &mut tables)?;
    }

    tex.push_str("\\end{groupplot}\n\\end{tikzpicture}\n\\end{document}\n");
    Ok(Document { tex, tables })
}

fn render_axis(
    axis: &Axis,
    subplot: usize,
    out_dir: Option<&Path>,
    tex: &mut String,
    tables: &mut Vec<DataTable>,
) -> TexplotResult<()> {
    let mut src = format!(
        "\\nextgroupplot[width = {}\\textwidth, height = {}\\textwidth, colormap name = {}",
        fmt(axis.rel_width),
        fmt(axis.rel_height),
        if axis.bidir_colormap { "bidir" } else { "viridis" }
    );

    src.push_str(
        ", every axis plot/.append style = {ultra thick, line join = bevel, \
         mark options = {line join = miter}}",
    );
    src.push_str(&format!(
        ", view = {{{}}}{{{}}}, clip mode = individual",
        fmt(axis.view.0),
        fmt(axis.view.1)
    ));

    // Colorbar cosmetics reuse the z formatting knobs; its tick axis is "y".
    src.push_str(&format!(
        ", colorbar style = {{font = \\{FONT_SIZE}, y tick label style = {{"
    ));
    src.push_str(&tick_format_bits(&axis.z, 'y'));
    src.push_str(&format!(
        "}}, label style = {{font = \\{FONT_SIZE}}}, ylabel near ticks"
    ));
    if let Some(label) = &axis.z.label {
        src.push_str(&format!(", ylabel = {{{label}}}"));
    }
    src.push('}');

    if axis.x.log {
        src.push_str(", xmode = log");
    }
    if axis.y.log {
        src.push_str(", ymode = log");
    }
    if axis.z.log {
        src.push_str(", zmode = log");
    }

    if let Some(spacing) = axis.x.scale_spacing {
        src.push_str(&coord_trafo_scale('x', spacing));
    } else if let Some(offset) = axis.x_offset {
        src.push_str(&format!(
            ", x coord trafo/.code = {{\\pgfluamathparse{{\\pgfmathresult - {o}}}}}, \
             x coord inv trafo/.code = {{\\pgfluamathparse{{\\pgfmathresult + {o}}}}}",
            o = fmt(offset)
        ));
    }
    if let Some(spacing) = axis.y.scale_spacing {
        src.push_str(&coord_trafo_scale('y', spacing));
    }
    if let Some(spacing) = axis.z.scale_spacing {
        src.push_str(&coord_trafo_scale('z', spacing));
    }

    if axis.colorbar {
        src.push_str(", colorbar");
    }

    let x_extent = squeeze_extent(&axis.series, |s| &s.x, axis.x.squeeze);
    let y_extent = squeeze_extent(&axis.series, |s| &s.y, axis.y.squeeze);

    if let Some(v) = axis.x.min.or(x_extent.map(|e| e.0)) {
        src.push_str(&format!(", xmin = {}", fmt(v)));
    }
    if let Some(v) = axis.x.max.or(x_extent.map(|e| e.1)) {
        src.push_str(&format!(", xmax = {}", fmt(v)));
    }
    if let Some(v) = axis.y.min.or(y_extent.map(|e| e.0)) {
        src.push_str(&format!(", ymin = {}", fmt(v)));
    }
    if let Some(v) = axis.y.max.or(y_extent.map(|e| e.1)) {
        src.push_str(&format!(", ymax = {}", fmt(v)));
    }

    // Explicit z limits double as the point meta range; in the flat view only
    // the meta range matters (z limits would not affect contour placement).
    if let Some(v) = axis.z.min {
        if !axis.is_flat_view() {
            src.push_str(&format!(", zmin = {}", fmt(v)));
        }
        src.push_str(&format!(", point meta min = {}", fmt(v)));
    }
    if let Some(v) = axis.z.max {
        if !axis.is_flat_view() {
            src.push_str(&format!(", zmax = {}", fmt(v)));
        }
        src.push_str(&format!(", point meta max = {}", fmt(v)));
    }

    if let Some(label) = &axis.x.label {
        src.push_str(&format!(", xlabel = {{{label}}}"));
    }
    if let Some(label) = &axis.y.label {
        src.push_str(&format!(", ylabel = {{{label}}}"));
    }
    if let Some(label) = &axis.z.label {
        src.push_str(&format!(", zlabel = {{{label}}}"));
    }
    if let Some(title) = &axis.title {
        src.push_str(&format!(", title = {{\\{TITLE_SIZE} {title}}}"));
    }

    if let Some(pos) = axis.legend {
        src.push_str(&format!(
            ", legend style = {{font = \\{LEGEND_FONT_SIZE}, {}, legend style = {{row sep = -2pt}}}}",
            pos.placement()
        ));
        src.push_str(
            ", legend image post style = {fill opacity = 1, draw opacity = 1, mark size = 2.}",
        );
    }

    if axis.axis_equal {
        src.push_str(", axis equal");
    } else if axis.axis_equal_image {
        src.push_str(", axis equal image");
    }

    src.push_str(
        ", cycle list name = colorcycle, grid = major, minor tick num = 4, \
         legend cell align = {left}",
    );
    if axis.is_flat_view() {
        src.push_str(", xlabel near ticks, ylabel near ticks");
    }

    src.push_str(&format!(", x tick label style = {{font = \\{FONT_SIZE}"));
    src.push_str(&tick_format_bits(&axis.x, 'x'));
    if axis.rotate_x_tick_labels {
        src.push_str(", rotate = 45, anchor = north east");
    }
    src.push_str(&format!("}}, y tick label style = {{font = \\{FONT_SIZE}"));
    src.push_str(&tick_format_bits(&axis.y, 'y'));
    src.push_str(&format!("}}, z tick label style = {{font = \\{FONT_SIZE}"));
    src.push_str(&tick_format_bits(&axis.z, 'z'));
    src.push('}');

    src.push_str(&explicit_ticks(&axis.x, 'x'));
    src.push_str(&explicit_ticks(&axis.y, 'y'));
    src.push_str(&explicit_ticks(&axis.z, 'z'));

    src.push_str(&format!(", label style = {{font = \\{FONT_SIZE}}}]\n"));

    src.push_str(&bg_bands(axis)?);

    for (i, surface) in axis.surfaces.iter().enumerate() {
        let num_points = surface.x.len();
        if surface.y.len() != num_points || surface.z.len() != num_points {
            return Err(TexplotError::render(format!(
                "surface '{}': x, y, and z lengths must match",
                surface.name
            )));
        }
        if num_points == 0 {
            return Err(TexplotError::render(format!(
                "surface '{}': grid is empty",
                surface.name
            )));
        }

        // y varies fastest, so the first run of repeated x values gives the
        // mesh row count.
        let num_rows = 1 + surface.x[1..]
            .iter()
            .take_while(|&&v| v == surface.x[0])
            .count();

        match surface.kind {
            SurfaceKind::Contour { levels } => {
                src.push_str(&format!(
                    "\\addplot3[contour gnuplot = {{labels = false, number = {levels}"
                ));
                if let Some(dir) = out_dir {
                    src.push_str(&format!(
                        ", cmd = {{cd '{}' && gnuplot \\\"\\script\\\"}}",
                        dir.display()
                    ));
                }
                src.push_str(&format!(
                    "}}, mesh/rows = {num_rows}, mesh/num points = {num_points}] table {{"
                ));
            }
            SurfaceKind::Matrix => {
                src.push_str(&format!(
                    "\\addplot[matrix plot*, mesh/rows = {num_rows}, \
                     mesh/ordering = y varies, point meta = explicit] table[meta = z] {{"
                ));
            }
            SurfaceKind::Mesh => {
                src.push_str(&format!(
                    "\\addplot3[unbounded coords = jump, surf, mesh/rows = {num_rows}, \
                     mesh/ordering = y varies, shader = interp, opacity = {}, \
                     z buffer = sort] table {{",
                    fmt(axis.surface_opacity)
                ));
            }
        }

        let file_name = format!("{subplot}.{i}.surf");
        src.push_str(&file_name);
        src.push_str("};\n");

        let mut contents = String::from("x y z\n");
        for j in 0..num_points {
            contents.push_str(&format!(
                "{} {} {}\n",
                fmt(surface.x[j]),
                fmt(surface.y[j]),
                fmt(surface.z[j])
            ));
        }
        tables.push(DataTable { file_name, contents });
    }

    for fill in &axis.fills {
        if fill.y.len() != fill.x.len() {
            return Err(TexplotError::render(
                "fill: x and y lengths must match".to_string(),
            ));
        }
        src.push_str("\\fill[");
        match fill.color {
            Some([r, g, b]) => src.push_str(&format!("rgb color = {{{r}, {g}, {b}}}")),
            None => src.push_str("black"),
        }
        src.push_str("] ");
        for j in 0..fill.x.len() {
            src.push_str(&format!("({}, {})--", fmt(fill.x[j]), fmt(fill.y[j])));
        }
        src.push_str("cycle;\n");
    }

    for (i, series) in axis.series.iter().enumerate() {
        src.push_str(&render_series(series, subplot, i, tables)?);
    }

    if axis.legend.is_some() {
        src.push_str("\\legend{");
        for surface in &axis.surfaces {
            src.push_str(&surface.name);
            src.push_str(", ");
        }
        for series in &axis.series {
            src.push_str(&series.name);
            src.push_str(", ");
        }
        src.push_str("}\n");
    }

    tex.push_str(&src);
    Ok(())
}

fn render_series(
    series: &Series,
    subplot: usize,
    index: usize,
    tables: &mut Vec<DataTable>,
) -> TexplotResult<String> {
    let num_points = series.x.len();
    let is_3d = !series.z.is_empty();
    let has_meta = !series.w.is_empty();
    if series.y.len() != num_points {
        return Err(TexplotError::render(format!(
            "series '{}': x and y lengths must match",
            series.name
        )));
    }
    if is_3d && series.z.len() != num_points {
        return Err(TexplotError::render(format!(
            "series '{}': x and z lengths must match",
            series.name
        )));
    }
    if has_meta && series.w.len() != num_points {
        return Err(TexplotError::render(format!(
            "series '{}': x and w lengths must match",
            series.name
        )));
    }
    if series.style.color == SeriesColor::FromWeight && !has_meta {
        return Err(TexplotError::render(format!(
            "series '{}': weight-mapped color requires w data",
            series.name
        )));
    }

    let style = &series.style;
    let has_lines = style.line != LineStyle::None;

    let mut src = String::from(if is_3d { "\\addplot3+[" } else { "\\addplot+[" });
    match style.line {
        LineStyle::Dashed => src.push_str("densely dashed, "),
        LineStyle::Dotted => src.push_str("densely dotted, "),
        LineStyle::None => src.push_str("only marks, "),
        LineStyle::Solid => {}
    }

    let marker = match style.mark.marker {
        MarkerChoice::Marker(m) => Some(m),
        MarkerChoice::Cycle => Some(mark_cycle(index)),
        MarkerChoice::None => None,
    };
    match marker {
        Some(m) => {
            src.push_str(&format!(
                "mark = {}, mark size = {}",
                m.to_pgf(),
                fmt(3.0 * style.mark.size)
            ));
            if let Some(spacing) = style.mark.spacing {
                src.push_str(&format!(", mark repeat = {spacing}"));
            }
        }
        None => src.push_str("mark = none"),
    }

    match style.color {
        SeriesColor::Rgb([r, g, b]) => {
            src.push_str(&format!(", rgb color = {{{r}, {g}, {b}}}"));
        }
        SeriesColor::FromWeight => {
            if has_lines {
                src.push_str(", mesh, point meta = explicit, shader = interp");
            }
            if marker.is_some() {
                src.push_str(
                    ", scatter, scatter src = explicit, scatter/use mapped color = \
                     {draw = mapped color, fill = mapped color}",
                );
            }
        }
        SeriesColor::Auto => {}
    }

    src.push_str(&format!(
        ", fill opacity = {o}, draw opacity = {o}",
        o = fmt(style.opacity)
    ));
    if style.width != 1.0 {
        src.push_str(&format!(", line width = {}pt", fmt(1.6 * style.width)));
    }

    let file_name = format!("{subplot}.{index}.data");
    src.push_str("] table");
    if has_meta {
        src.push_str("[meta = w]");
    }
    src.push_str(&format!(" {{{file_name}}};\n"));

    let mut contents = String::from("x y");
    if is_3d {
        contents.push_str(" z");
    }
    if has_meta {
        contents.push_str(" w");
    }
    contents.push('\n');
    for j in 0..num_points {
        contents.push_str(&fmt(series.x[j]));
        contents.push(' ');
        contents.push_str(&fmt(series.y[j]));
        if is_3d {
            contents.push(' ');
            contents.push_str(&fmt(series.z[j]));
        }
        if has_meta {
            contents.push(' ');
            contents.push_str(&fmt(series.w[j]));
        }
        contents.push('\n');
    }
    tables.push(DataTable { file_name, contents });

    Ok(src)
}

/// `/pgf/number format` fragments for one coordinate's tick labels.
/// `scaled_axis` names the axis whose automatic scaling is disabled; for the
/// colorbar this is always `y`.
fn tick_format_bits(opts: &CoordOpts, scaled_axis: char) -> String {
    let mut s = String::new();
    if let Some(precision) = opts.precision {
        s.push_str(&format!(
            ", /pgf/number format/precision = {precision}, /pgf/number format/zerofill"
        ));
    }
    if opts.format != TickFormat::Default {
        s.push_str(&format!(", scaled {scaled_axis} ticks = false"));
    }
    match opts.format {
        TickFormat::Fixed => {
            s.push_str(", /pgf/number format/fixed, /pgf/number format/fixed zerofill = true");
        }
        TickFormat::Sci => s.push_str(", /pgf/number format/sci"),
        TickFormat::Default => {}
    }
    s
}

fn coord_trafo_scale(coord: char, spacing: f64) -> String {
    format!(
        ", {c} coord trafo/.code = {{\\pgfluamathparse{{\\pgfmathresult/{s}}}}}, \
         {c} coord inv trafo/.code = {{\\pgfluamathparse{{\\pgfmathresult*{s}}}}}",
        c = coord,
        s = fmt(spacing)
    )
}

fn explicit_ticks(opts: &CoordOpts, coord: char) -> String {
    let mut s = String::new();
    if !opts.ticks.is_empty() {
        s.push_str(&format!(", {coord}tick = {{{}}}", fmt_list(&opts.ticks)));
    }
    if !opts.tick_labels.is_empty() {
        s.push_str(&format!(
            ", {coord}ticklabels = {{{}}}",
            opts.tick_labels.join(", ")
        ));
    }
    s
}

fn bg_bands(axis: &Axis) -> TexplotResult<String> {
    if axis.bg_bands.is_empty() {
        return Ok(String::new());
    }
    let (Some(y_min), Some(y_max)) = (axis.y.min, axis.y.max) else {
        return Err(TexplotError::validation(
            "background bands require explicit y limits",
        ));
    };
    if axis.bg_bands.len() % 2 != 0 {
        return Err(TexplotError::validation(
            "background bands require an even number of transitions",
        ));
    }
    let mut s = String::new();
    for pair in axis.bg_bands.chunks_exact(2) {
        s.push_str(&format!(
            "\\fill[black, opacity = 0.1] ({}, {}) rectangle ({}, {});\n",
            fmt(pair[0]),
            fmt(y_min),
            fmt(pair[1]),
            fmt(y_max)
        ));
    }
    Ok(s)
}

/// Tight limits over the series data for one coordinate. NaN samples are
/// skipped; `None` when squeezing is off or no finite samples exist.
fn squeeze_extent(
    series: &[Series],
    pick: impl Fn(&Series) -> &Vec<f64>,
    squeeze: bool,
) -> Option<(f64, f64)> {
    if !squeeze {
        return None;
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for s in series {
        for &v in pick(s) {
            min = min.min(v);
            max = max.max(v);
        }
    }
    (min <= max).then_some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::DrawStyle;

    fn series(x: Vec<f64>, y: Vec<f64>) -> Series {
        Series {
            name: "s".to_string(),
            x,
            y,
            ..Series::default()
        }
    }

    #[test]
    fn empty_axis_list_is_rejected() {
        assert!(render_document(&[], None).is_err());
    }

    #[test]
    fn mismatched_series_lengths_are_rejected() {
        let mut axis = Axis::new();
        axis.draw(series(vec![0.0, 1.0], vec![0.0]));
        assert!(render_document(&[axis], None).is_err());
    }

    #[test]
    fn weight_color_without_weights_is_rejected() {
        let mut axis = Axis::new();
        axis.draw(Series {
            style: DrawStyle {
                color: SeriesColor::FromWeight,
                ..DrawStyle::default()
            },
            ..series(vec![0.0], vec![0.0])
        });
        assert!(render_document(&[axis], None).is_err());
    }

    #[test]
    fn mesh_row_detection_counts_leading_repeats() {
        let mut axis = Axis::new();
        // 2x3 grid flattened x-major: each x appears three times in a row.
        axis.surf(
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![0.0, 0.5, 1.0, 0.0, 0.5, 1.0],
            vec![1.0; 6],
            "g",
        );
        let doc = render_document(&[axis], None).unwrap();
        assert!(doc.tex.contains("mesh/rows = 3"));
    }

    #[test]
    fn squeeze_skips_nan_and_finds_extent() {
        let s = vec![series(vec![0.0, f64::NAN, 2.0], vec![0.0, 1.0, 2.0])];
        assert_eq!(squeeze_extent(&s, |s| &s.x, true), Some((0.0, 2.0)));
        assert_eq!(squeeze_extent(&s, |s| &s.x, false), None);
        assert_eq!(squeeze_extent(&[], |s| &s.x, true), None);
    }

    #[test]
    fn bg_bands_require_y_limits_and_pairs() {
        let mut axis = Axis::new();
        axis.bg_bands(vec![0.0, 1.0]);
        assert!(render_document(std::slice::from_ref(&axis), None).is_err());
        axis.set_y_min(0.0);
        axis.set_y_max(1.0);
        let doc = render_document(std::slice::from_ref(&axis), None).unwrap();
        assert!(
            doc.tex
                .contains("\\fill[black, opacity = 0.1] (0, 0) rectangle (1, 1);")
        );
        axis.bg_bands(vec![0.0, 1.0, 2.0]);
        assert!(render_document(&[axis], None).is_err());
    }

    #[test]
    fn legend_lists_surfaces_before_series() {
        let mut axis = Axis::new();
        axis.line(vec![0.0], vec![0.0], "trace");
        axis.surf(vec![0.0], vec![0.0], vec![0.0], "mesh");
        axis.legend(crate::style::LegendPosition::NorthEast);
        let doc = render_document(&[axis], None).unwrap();
        assert!(doc.tex.contains("\\legend{mesh, trace, }"));
    }

    #[test]
    fn default_traces_cycle_markers() {
        let mut axis = Axis::new();
        axis.line(vec![0.0, 1.0], vec![0.0, 1.0], "a");
        axis.dashed(vec![0.0, 1.0], vec![1.0, 0.0], "b");
        let doc = render_document(&[axis], None).unwrap();
        assert!(!doc.tex.contains("mark = none"));
        assert!(doc.tex.contains("mark = triangle, mark size = 3"));
        assert!(doc.tex.contains("mark = square, mark size = 3"));
    }

    #[test]
    fn spacing_scale_wins_over_offset() {
        let mut axis = Axis::new();
        axis.scale_x_spacing(1000.0);
        axis.set_x_offset(5.0);
        let doc = render_document(&[axis], None).unwrap();
        assert!(doc.tex.contains(
            "x coord trafo/.code = {\\pgfluamathparse{\\pgfmathresult/1000}}"
        ));
        assert!(doc.tex.contains(
            "x coord inv trafo/.code = {\\pgfluamathparse{\\pgfmathresult*1000}}"
        ));
        assert!(!doc.tex.contains("\\pgfmathresult - 5"));
    }

    #[test]
    fn offset_alone_shifts_both_trafos() {
        let mut axis = Axis::new();
        axis.set_x_offset(5.0);
        let doc = render_document(&[axis], None).unwrap();
        assert!(doc.tex.contains(
            "x coord trafo/.code = {\\pgfluamathparse{\\pgfmathresult - 5}}"
        ));
        assert!(doc.tex.contains(
            "x coord inv trafo/.code = {\\pgfluamathparse{\\pgfmathresult + 5}}"
        ));
        assert!(!doc.tex.contains("\\pgfluamathpares"));
    }

    #[test]
    fn colorbar_toggle_is_emitted() {
        let mut on = Axis::new();
        on.show_colorbar();
        let doc = render_document(&[Axis::new(), on], None).unwrap();
        assert_eq!(doc.tex.matches(", colorbar,").count(), 1);
    }

    #[test]
    fn explicit_ticks_and_rotation() {
        let mut axis = Axis::new();
        axis.set_x_ticks(
            vec![0.0, 1.5],
            vec!["lo".to_string(), "hi".to_string()],
            true,
        );
        let doc = render_document(&[axis], None).unwrap();
        assert!(doc.tex.contains(", xtick = {0, 1.5}"));
        assert!(doc.tex.contains(", xticklabels = {lo, hi}"));
        assert!(doc.tex.contains(", rotate = 45, anchor = north east"));
    }

    #[test]
    fn precision_and_formats_reach_tick_styles() {
        let mut axis = Axis::new();
        axis.set_y_precision(2);
        axis.set_y_format(TickFormat::Fixed);
        axis.set_x_format(TickFormat::Sci);
        let doc = render_document(&[axis], None).unwrap();
        assert!(doc.tex.contains(
            ", /pgf/number format/precision = 2, /pgf/number format/zerofill"
        ));
        assert!(doc.tex.contains(
            ", scaled y ticks = false, /pgf/number format/fixed, \
             /pgf/number format/fixed zerofill = true"
        ));
        assert!(doc.tex.contains(", scaled x ticks = false, /pgf/number format/sci"));
    }

    #[test]
    fn contour_embeds_output_dir() {
        let mut axis = Axis::new();
        axis.contour(
            vec![0.0, 0.0, 1.0, 1.0],
            vec![0.0, 1.0, 0.0, 1.0],
            vec![0.0, 1.0, 1.0, 0.0],
            7,
            "c",
        );
        let doc = render_document(&[axis], Some(Path::new("out"))).unwrap();
        assert!(
            doc.tex
                .contains("contour gnuplot = {labels = false, number = 7")
        );
        assert!(doc.tex.contains("cd 'out' && gnuplot"));
    }
}
