#![forbid(unsafe_code)]

pub mod axis;
pub mod compile;
pub mod error;
pub mod mesh;
pub mod number;
pub mod render;
pub mod style;

pub use axis::{Axis, CoordOpts, Fill, Series, Surface, SurfaceKind};
pub use compile::{Cleanup, CompileOptions, DATA_SUFFIX, compile, emit_workdir, plot, plot_one};
pub use error::{TexplotError, TexplotResult};
pub use mesh::{MeshGrid, mesh_grid, mesh_grid_rect};
pub use render::{DataTable, Document, render_document};
pub use style::{
    DrawStyle, LegendPosition, LineStyle, MarkStyle, Marker, MarkerChoice, SeriesColor, TickFormat,
};
