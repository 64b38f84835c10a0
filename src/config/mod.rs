mod settings;

pub use settings::{CloudflareConfig, LogConfig, Settings};
