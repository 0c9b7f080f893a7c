#![deny(warnings)]

pub mod game;
pub mod model;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "esp"
    }

    pub const fn title() -> &'static str {
        "Entertaining Spice Pretending"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
