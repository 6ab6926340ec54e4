//! Procedural display surfaces for the camera feed.

pub mod curved;
pub mod hemisphere;

pub use curved::{build_curved_screen, build_curved_screen_into, CurvedScreen, CurvedScreenParams};
pub use hemisphere::{
    build_hemisphere, build_hemisphere_into, CutMode, HemisphereHalf, HemisphereParams,
    HemisphereScreen,
};
