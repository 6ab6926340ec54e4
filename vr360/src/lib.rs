pub mod camera_feed;
pub mod component;
pub mod config;
pub mod input_context;
pub mod locomotion;
pub mod screens;
pub mod teleport;
pub mod time;
pub mod viewer;

pub use component::{Component, ComponentHost};
pub use config::{AppConfig, CameraFeedConfig, ConfigError};
pub use input_context::{Hand, InputContext};
pub use time::Time;
pub use viewer::ViewerScene;
