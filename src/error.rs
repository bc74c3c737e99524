//! Platform and GPU setup errors
//!
//! Gameplay itself never fails; these only cover acquiring the environment.

/// Errors produced while wiring the engine to its host
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A required browser object (window, document, canvas) is missing.
    #[error("host environment is missing {0}")]
    MissingHost(&'static str),

    /// The surface could not be created for the canvas.
    #[error("failed to create render surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// No GPU adapter is compatible with the surface.
    #[error("no compatible GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    /// The adapter refused to hand out a device.
    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    /// Presenting a frame failed.
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    /// The persistent store rejected a read or write.
    #[error("storage unavailable: {0}")]
    Storage(String),

    /// A tuning file could not be read.
    #[error("cannot read tuning file: {0}")]
    Config(String),

    /// A tuning file is not valid JSON for `Tuning`.
    #[error("invalid tuning: {0}")]
    Tuning(#[from] serde_json::Error),

    /// A browser API call threw.
    #[error("browser call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for EngineError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        EngineError::Js(format!("{:?}", value))
    }
}
