//! Interactive animation of mitochondrial protein import.
//!
//! A precursor protein docks at TOM, crosses the outer membrane and is then
//! routed by the player to TIM23, TIM22, the small TIMs or SAM. The
//! simulation core is windowing-free; `main` wires it to winit, wgpu and egui.

pub mod app_settings;
pub mod error;
pub mod layout;
pub mod physics;
pub mod rendering;
pub mod scenario;
pub mod simulation;
pub mod ui;
pub mod ui_renderer;
