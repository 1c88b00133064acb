//! Splatview Scene Crate
//!
//! Scene data, camera bounds, asset loading and viewer configuration.
//! This crate is GPU-agnostic; rendering lives in splatview-gpu and the
//! windowed viewer in splatview-window.

pub mod bounds;
pub mod config;
pub mod loader;
pub mod scene;

pub use bounds::BoundingVolume;
pub use config::{
    BoundsConfig, CameraConfig, ConfigError, ControlsConfig, LoaderConfig, ViewerConfig,
    WindowConfig,
};
pub use loader::{AssetLoader, LoadError, LoadProgress, ProgressReporter, StubLoader};
pub use scene::{Geometry, Material, Mesh, NodeId, SceneGraph, SceneNode};
