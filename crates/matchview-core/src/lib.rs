pub mod api;
pub mod color;
pub mod config;
pub mod consts;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod matches;
pub mod model;
pub mod pixels;
pub mod raster;
pub mod render;
pub mod viewport;
