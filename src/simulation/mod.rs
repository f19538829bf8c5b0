pub mod geometry;
pub mod surface;
pub mod solid;
pub mod collision;
pub mod updater;
pub mod world;
pub mod params;
pub mod scenario;
