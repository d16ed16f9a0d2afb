use thiserror::Error;

use crate::scenario::ParsePathwayError;

/// Failures that can stop the application from starting or presenting.
/// The simulation itself has no failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read settings file: {0}")]
    SettingsIo(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    SettingsParse(#[from] toml::de::Error),
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
    #[error("invalid setting `pathway_keys`: {0}")]
    UnknownPathway(#[from] ParsePathwayError),
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create GPU surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("GPU surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
