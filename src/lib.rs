pub mod area;
pub mod config;
pub mod continent;
pub mod cube;
pub mod error;
pub mod split;
pub mod template;
pub mod voronoi;

pub use config::GenerationParams;
pub use continent::Continent;
pub use continent::assemble::generate_continents;
pub use cube::Cube;
pub use voronoi::{Partition, Weights};
