//! The plot accumulator: one `Axis` per subplot.

use crate::style::{DrawStyle, LegendPosition, Marker, TickFormat};

/// One line/scatter trace. `z` makes the trace 3-D; `w` attaches a scalar
/// weight per point (used for colormap-driven coloring).
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Series {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub z: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub w: Vec<f64>,
    pub style: DrawStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SurfaceKind {
    /// Shaded interpolated mesh.
    Mesh,
    /// Label-free contour lines, computed by gnuplot at compile time.
    Contour { levels: u32 },
    /// Discrete per-cell matrix plot.
    Matrix,
}

/// One 2-D grid of (x, y, z) samples, flattened x-major (y varies fastest).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Surface {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub kind: SurfaceKind,
}

/// Closed filled polygon drawn beneath the traces.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Fill {
    /// `None` fills black.
    pub color: Option<[u8; 3]>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Per-coordinate cosmetics; one each for x, y, and z.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CoordOpts {
    pub label: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Tighten limits to the extent of the series data.
    pub squeeze: bool,
    pub log: bool,
    /// Tick label digits after the point, zero-filled.
    pub precision: Option<u32>,
    pub format: TickFormat,
    /// Divide displayed coordinates by this factor (unit rescaling).
    pub scale_spacing: Option<f64>,
    pub ticks: Vec<f64>,
    pub tick_labels: Vec<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Axis {
    pub title: Option<String>,
    pub x: CoordOpts,
    pub y: CoordOpts,
    pub z: CoordOpts,
    /// Subtract this offset from displayed x coordinates. Ignored when
    /// `x.scale_spacing` is set.
    pub x_offset: Option<f64>,
    pub rotate_x_tick_labels: bool,
    pub legend: Option<LegendPosition>,
    pub axis_equal: bool,
    pub axis_equal_image: bool,
    /// Subplot size as a fraction of `\textwidth`.
    pub rel_width: f64,
    pub rel_height: f64,
    /// (azimuth, elevation); (0, 90) is the flat 2-D view.
    pub view: (f64, f64),
    pub colorbar: bool,
    pub surface_opacity: f64,
    /// Request reduced vertical separation between subplots.
    pub no_sep: bool,
    /// Pairs of x transitions delimiting grey background bands.
    pub bg_bands: Vec<f64>,
    pub bidir_colormap: bool,
    pub series: Vec<Series>,
    pub surfaces: Vec<Surface>,
    pub fills: Vec<Fill>,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            title: None,
            x: CoordOpts::default(),
            y: CoordOpts::default(),
            z: CoordOpts::default(),
            x_offset: None,
            rotate_x_tick_labels: false,
            legend: None,
            axis_equal: false,
            axis_equal_image: false,
            rel_width: 1.0,
            rel_height: 1.0,
            view: (0.0, 90.0),
            colorbar: false,
            surface_opacity: 1.0,
            no_sep: false,
            bg_bands: Vec::new(),
            bidir_colormap: false,
            series: Vec::new(),
            surfaces: Vec::new(),
            fills: Vec::new(),
        }
    }
}

impl Axis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.x.label = Some(label.into());
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.y.label = Some(label.into());
    }

    pub fn set_z_label(&mut self, label: impl Into<String>) {
        self.z.label = Some(label.into());
    }

    /// The weight channel shares the z cosmetics.
    pub fn set_w_label(&mut self, label: impl Into<String>) {
        self.set_z_label(label);
    }

    /// Add a fully specified trace.
    pub fn draw(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Solid line through (x, y).
    pub fn line(&mut self, x: Vec<f64>, y: Vec<f64>, name: impl Into<String>) {
        self.draw(Series {
            name: name.into(),
            x,
            y,
            ..Series::default()
        });
    }

    /// Solid line through (x, y, z).
    pub fn line3(&mut self, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>, name: impl Into<String>) {
        self.draw(Series {
            name: name.into(),
            x,
            y,
            z,
            ..Series::default()
        });
    }

    pub fn dashed(&mut self, x: Vec<f64>, y: Vec<f64>, name: impl Into<String>) {
        self.draw(Series {
            name: name.into(),
            x,
            y,
            style: DrawStyle::dashed(),
            ..Series::default()
        });
    }

    pub fn dotted(&mut self, x: Vec<f64>, y: Vec<f64>, name: impl Into<String>) {
        self.draw(Series {
            name: name.into(),
            x,
            y,
            style: DrawStyle::dotted(),
            ..Series::default()
        });
    }

    /// Marks only, no connecting line.
    pub fn scatter(&mut self, x: Vec<f64>, y: Vec<f64>, marker: Marker, name: impl Into<String>) {
        self.draw(Series {
            name: name.into(),
            x,
            y,
            style: DrawStyle::scatter(marker),
            ..Series::default()
        });
    }

    /// Staircase trace: each y value is held until the next x.
    pub fn stairs(&mut self, x: &[f64], y: &[f64], name: impl Into<String>) {
        let (sx, sy) = expand_stairs(x, y);
        self.line(sx, sy, name);
    }

    pub fn dashed_stairs(&mut self, x: &[f64], y: &[f64], name: impl Into<String>) {
        let (sx, sy) = expand_stairs(x, y);
        self.dashed(sx, sy, name);
    }

    /// Line given in polar coordinates, converted to Cartesian.
    pub fn polar_line(&mut self, r: &[f64], theta: &[f64], name: impl Into<String>) {
        let (x, y) = polar_to_cartesian(r, theta);
        self.line(x, y, name);
    }

    pub fn polar_scatter(&mut self, r: &[f64], theta: &[f64], marker: Marker, name: impl Into<String>) {
        let (x, y) = polar_to_cartesian(r, theta);
        self.scatter(x, y, marker, name);
    }

    pub fn surf(&mut self, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>, name: impl Into<String>) {
        self.surfaces.push(Surface {
            name: name.into(),
            x,
            y,
            z,
            kind: SurfaceKind::Mesh,
        });
    }

    pub fn contour(
        &mut self,
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
        levels: u32,
        name: impl Into<String>,
    ) {
        self.surfaces.push(Surface {
            name: name.into(),
            x,
            y,
            z,
            kind: SurfaceKind::Contour { levels },
        });
    }

    pub fn matrix(&mut self, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>, name: impl Into<String>) {
        self.surfaces.push(Surface {
            name: name.into(),
            x,
            y,
            z,
            kind: SurfaceKind::Matrix,
        });
    }

    pub fn fill(&mut self, color: Option<[u8; 3]>, x: Vec<f64>, y: Vec<f64>) {
        self.fills.push(Fill { color, x, y });
    }

    pub fn legend(&mut self, position: LegendPosition) {
        self.legend = Some(position);
    }

    pub fn squeeze(&mut self) {
        self.x.squeeze = true;
        self.y.squeeze = true;
    }

    pub fn squeeze_x(&mut self) {
        self.x.squeeze = true;
    }

    pub fn squeeze_y(&mut self) {
        self.y.squeeze = true;
    }

    pub fn set_x_min(&mut self, v: f64) {
        self.x.min = Some(v);
    }

    pub fn set_x_max(&mut self, v: f64) {
        self.x.max = Some(v);
    }

    pub fn set_y_min(&mut self, v: f64) {
        self.y.min = Some(v);
    }

    pub fn set_y_max(&mut self, v: f64) {
        self.y.max = Some(v);
    }

    pub fn set_z_min(&mut self, v: f64) {
        self.z.min = Some(v);
    }

    pub fn set_z_max(&mut self, v: f64) {
        self.z.max = Some(v);
    }

    pub fn set_w_min(&mut self, v: f64) {
        self.set_z_min(v);
    }

    pub fn set_w_max(&mut self, v: f64) {
        self.set_z_max(v);
    }

    pub fn axis_equal(&mut self) {
        self.axis_equal = true;
    }

    pub fn axis_equal_image(&mut self) {
        self.axis_equal_image = true;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.rel_width = width;
        self.rel_height = height;
    }

    pub fn resize_square(&mut self, size: f64) {
        self.resize(size, size);
    }

    pub fn set_x_precision(&mut self, digits: u32) {
        self.x.precision = Some(digits);
    }

    pub fn set_y_precision(&mut self, digits: u32) {
        self.y.precision = Some(digits);
    }

    pub fn set_z_precision(&mut self, digits: u32) {
        self.z.precision = Some(digits);
    }

    pub fn set_w_precision(&mut self, digits: u32) {
        self.set_z_precision(digits);
    }

    pub fn set_x_format(&mut self, format: TickFormat) {
        self.x.format = format;
    }

    pub fn set_y_format(&mut self, format: TickFormat) {
        self.y.format = format;
    }

    pub fn set_z_format(&mut self, format: TickFormat) {
        self.z.format = format;
    }

    pub fn set_w_format(&mut self, format: TickFormat) {
        self.set_z_format(format);
    }

    pub fn x_log(&mut self) {
        self.x.log = true;
    }

    pub fn y_log(&mut self) {
        self.y.log = true;
    }

    pub fn z_log(&mut self) {
        self.z.log = true;
    }

    pub fn show_colorbar(&mut self) {
        self.colorbar = true;
    }

    pub fn scale_x_spacing(&mut self, factor: f64) {
        self.x.scale_spacing = Some(factor);
    }

    pub fn scale_y_spacing(&mut self, factor: f64) {
        self.y.scale_spacing = Some(factor);
    }

    pub fn scale_z_spacing(&mut self, factor: f64) {
        self.z.scale_spacing = Some(factor);
    }

    pub fn set_x_offset(&mut self, offset: f64) {
        self.x_offset = Some(offset);
    }

    pub fn set_view(&mut self, azimuth: f64, elevation: f64) {
        self.view = (azimuth, elevation);
    }

    pub fn set_surface_opacity(&mut self, opacity: f64) {
        self.surface_opacity = opacity;
    }

    pub fn no_sep(&mut self) {
        self.no_sep = true;
    }

    pub fn set_x_ticks(&mut self, locations: Vec<f64>, labels: Vec<String>, rotate: bool) {
        self.x.ticks = locations;
        self.x.tick_labels = labels;
        self.rotate_x_tick_labels = rotate;
    }

    pub fn set_y_ticks(&mut self, locations: Vec<f64>, labels: Vec<String>) {
        self.y.ticks = locations;
        self.y.tick_labels = labels;
    }

    pub fn set_z_ticks(&mut self, locations: Vec<f64>, labels: Vec<String>) {
        self.z.ticks = locations;
        self.z.tick_labels = labels;
    }

    pub fn bg_bands(&mut self, transitions: Vec<f64>) {
        self.bg_bands = transitions;
    }

    pub fn bidir_colormap(&mut self) {
        self.bidir_colormap = true;
    }

    /// Flat 2-D view, where z limits apply only to the point meta range.
    pub(crate) fn is_flat_view(&self) -> bool {
        self.view == (0.0, 90.0)
    }
}

fn expand_stairs(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = x.len().min(y.len());
    if n == 0 {
        return (Vec::new(), Vec::new());
    }
    let mut sx = Vec::with_capacity(2 * n);
    let mut sy = Vec::with_capacity(2 * n);
    for i in 0..n {
        sx.push(x[i]);
        sx.push(x[i]);
        sy.push(if i == 0 { y[0] } else { y[i - 1] });
        sy.push(y[i]);
    }
    (sx, sy)
}

fn polar_to_cartesian(r: &[f64], theta: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = r.len().min(theta.len());
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for i in 0..n {
        x.push(r[i] * theta[i].cos());
        y.push(r[i] * theta[i].sin());
    }
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{LineStyle, MarkerChoice};

    #[test]
    fn stairs_holds_each_value() {
        let (sx, sy) = expand_stairs(&[0.0, 1.0, 2.0], &[5.0, 6.0, 7.0]);
        assert_eq!(sx, vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
        assert_eq!(sy, vec![5.0, 5.0, 5.0, 6.0, 6.0, 7.0]);
    }

    #[test]
    fn stairs_on_empty_input_is_empty() {
        let (sx, sy) = expand_stairs(&[], &[]);
        assert!(sx.is_empty());
        assert!(sy.is_empty());
    }

    #[test]
    fn polar_conversion() {
        let mut axis = Axis::new();
        axis.polar_line(&[1.0, 2.0], &[0.0, std::f64::consts::FRAC_PI_2], "r");
        let s = &axis.series[0];
        assert!((s.x[0] - 1.0).abs() < 1e-12);
        assert!(s.y[0].abs() < 1e-12);
        assert!(s.x[1].abs() < 1e-12);
        assert!((s.y[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn w_cosmetics_alias_z() {
        let mut axis = Axis::new();
        axis.set_w_label("$w$");
        axis.set_w_min(-1.0);
        axis.set_w_max(1.0);
        axis.set_w_precision(2);
        assert_eq!(axis.z.label.as_deref(), Some("$w$"));
        assert_eq!(axis.z.min, Some(-1.0));
        assert_eq!(axis.z.max, Some(1.0));
        assert_eq!(axis.z.precision, Some(2));
    }

    #[test]
    fn conveniences_set_expected_styles() {
        let mut axis = Axis::new();
        axis.line(vec![0.0], vec![0.0], "a");
        axis.dashed(vec![0.0], vec![0.0], "b");
        axis.scatter(vec![0.0], vec![0.0], Marker::Square, "c");
        assert_eq!(axis.series[0].style.line, LineStyle::Solid);
        assert_eq!(axis.series[0].style.mark.marker, MarkerChoice::Cycle);
        assert_eq!(axis.series[1].style.line, LineStyle::Dashed);
        assert_eq!(axis.series[1].style.mark.marker, MarkerChoice::Cycle);
        assert_eq!(axis.series[2].style.line, LineStyle::None);
        assert_eq!(
            axis.series[2].style.mark.marker,
            MarkerChoice::Marker(Marker::Square)
        );
    }

    #[test]
    fn default_view_is_flat() {
        let mut axis = Axis::new();
        assert!(axis.is_flat_view());
        axis.set_view(45.0, 45.0);
        assert!(!axis.is_flat_view());
    }

    #[test]
    fn json_roundtrip() {
        let mut axis = Axis::new();
        axis.line(vec![0.0, 1.0], vec![0.0, 1.0], "trace");
        axis.set_title("t");
        axis.legend(LegendPosition::NorthEast);
        let s = serde_json::to_string(&axis).unwrap();
        let de: Axis = serde_json::from_str(&s).unwrap();
        assert_eq!(de.series.len(), 1);
        assert_eq!(de.series[0].name, "trace");
        assert_eq!(de.title.as_deref(), Some("t"));
    }
}
