pub mod bar_geometry;
pub mod data;
pub mod range;
pub mod rectangle;
pub mod registry;
pub mod scale;
pub mod types;

pub use bar_geometry::BarGeometry;
pub use data::{ChartData, Dataset};
pub use range::{ScaleRange, calculate_scale_range};
pub use rectangle::{Bar, BarProperty, BarShape, Rectangle, TRANSITION_PROPERTIES};
pub use registry::BarRegistry;
pub use scale::{CategoryScale, RangeMode, RangeSource, Scale, ScaleStyle};
pub use types::{Point, Viewport};
