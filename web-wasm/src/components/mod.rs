pub mod arsenal_grid;
pub mod header;
pub mod loader;
pub mod results_display;
pub mod upload_area;
