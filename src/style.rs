//! Cosmetic vocabulary shared by the axis accumulator and the renderer.

/// Default color cycle, also used to size the marker cycle.
pub const DEFAULT_CYCLE: [[u8; 3]; 5] = [
    [0, 57, 181],
    [202, 46, 0],
    [44, 151, 225],
    [141, 202, 58],
    [255, 227, 0],
];

/// Three-stop blue/white/red colormap for signed data.
pub const BIDIR_COLORMAP: [[u8; 3]; 3] = [[10, 10, 143], [255, 255, 255], [160, 10, 10]];

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Marker {
    Triangle,
    Square,
    SquareFilled,
    /// Rotated, slightly shrunk square.
    Diamond,
    DiamondFilled,
    Cross,
    Dot,
    /// Any other PGFPlots mark name, passed through verbatim.
    Other(char),
}

impl Marker {
    /// PGFPlots `mark = ...` value, including mark options where needed.
    pub fn to_pgf(self) -> String {
        match self {
            Self::Triangle => "triangle".to_string(),
            Self::Square => "square".to_string(),
            Self::SquareFilled => "square*".to_string(),
            Self::Diamond => {
                "square, mark options = {line join = miter, rotate = 45, scale = 0.6}".to_string()
            }
            Self::DiamondFilled => {
                "square*, mark options = {line join = miter, rotate = 45, scale = 0.6}".to_string()
            }
            Self::Cross => "x, mark options = {line join = miter, scale = 1.5}".to_string(),
            Self::Dot => "*, mark options = {scale = 0.5}".to_string(),
            Self::Other(c) => c.to_string(),
        }
    }
}

/// Marker cycle aligned with [`DEFAULT_CYCLE`].
pub const MARK_CYCLE: [Marker; 5] = [
    Marker::Triangle,
    Marker::Square,
    Marker::Diamond,
    Marker::Cross,
    Marker::Dot,
];

pub fn mark_cycle(index: usize) -> Marker {
    MARK_CYCLE[index % MARK_CYCLE.len()]
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MarkerChoice {
    /// No marker on this trace.
    #[default]
    None,
    /// Pick from [`MARK_CYCLE`] by series index.
    Cycle,
    Marker(Marker),
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MarkStyle {
    pub marker: MarkerChoice,
    /// Relative size; the renderer scales to points.
    pub size: f64,
    /// `mark repeat` spacing; every point is marked when `None`.
    pub spacing: Option<u32>,
}

impl Default for MarkStyle {
    fn default() -> Self {
        Self {
            marker: MarkerChoice::Cycle,
            size: 1.0,
            spacing: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    /// Marks only, no connecting line.
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SeriesColor {
    /// Take the next color from the document cycle list.
    #[default]
    Auto,
    Rgb([u8; 3]),
    /// Map the per-point weight channel through the colormap.
    FromWeight,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DrawStyle {
    pub mark: MarkStyle,
    pub color: SeriesColor,
    pub line: LineStyle,
    /// Relative line width; 1 is the document default.
    pub width: f64,
    pub opacity: f64,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            mark: MarkStyle::default(),
            color: SeriesColor::Auto,
            line: LineStyle::Solid,
            width: 1.0,
            opacity: 1.0,
        }
    }
}

impl DrawStyle {
    pub fn line_rgb(rgb: [u8; 3]) -> Self {
        Self {
            color: SeriesColor::Rgb(rgb),
            ..Self::default()
        }
    }

    pub fn dashed() -> Self {
        Self {
            line: LineStyle::Dashed,
            ..Self::default()
        }
    }

    pub fn dotted() -> Self {
        Self {
            line: LineStyle::Dotted,
            ..Self::default()
        }
    }

    /// Marks only, with the given marker.
    pub fn scatter(marker: Marker) -> Self {
        Self {
            mark: MarkStyle {
                marker: MarkerChoice::Marker(marker),
                ..MarkStyle::default()
            },
            line: LineStyle::None,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LegendPosition {
    NorthWest,
    SouthWest,
    SouthEast,
    NorthEast,
}

impl LegendPosition {
    /// PGFPlots `at`/`anchor` pair for the legend node.
    pub fn placement(self) -> &'static str {
        match self {
            Self::NorthWest => "at = {(0, 1)}, anchor = north west",
            Self::SouthWest => "at = {(0, 0)}, anchor = south west",
            Self::SouthEast => "at = {(1, 0)}, anchor = south east",
            Self::NorthEast => "at = {(1, 1)}, anchor = north east",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TickFormat {
    #[default]
    Default,
    Fixed,
    Sci,
}
