pub mod auto_layout;
pub mod blueprints;
pub mod buildings;
pub mod config;
pub mod connections;
pub mod csv_import;
pub mod error;
pub mod generated;
pub mod grid;
pub mod grouping;
pub mod interaction;
pub mod layout_actions;
pub mod observation;
pub mod palette;
pub mod plugin;
pub mod projection;
pub mod protocol;
pub mod rng;
pub mod road_path;
pub mod synthesis;
pub mod world;

#[cfg(test)]
pub mod test_harness;

pub use error::LayoutError;
pub use plugin::LayoutPlugin;
