//! chart-ready geometry for the cost and energy models and its rendering
/// affine map from a window of the plane onto a padded pixel canvas
pub mod coordinate_mapper;
/// equally spaced sampling of a function into a polyline
pub mod curve_sampler;
/// windows, paths, markers and ticks of the two charts
pub mod chart_geometry;
/// drawing chart geometry into SVG/PNG files with plotters
pub mod render;
