pub mod config;
pub mod image;
pub mod images;
pub mod matches;
pub mod pairs;
pub mod render;
pub mod sources;
pub mod summary;

use matchview_core::api::HttpApi;
use matchview_core::config::ViewerConfig;

pub fn connect(config: &ViewerConfig) -> HttpApi {
    HttpApi::new(&config.server_url, config.request_timeout())
}
