pub mod capability;
pub mod config;
pub mod detail_panel;
pub mod geometry;
pub mod list_panel;
pub mod panel;
pub mod registry;
pub mod serde_ext;
pub mod tab;
pub mod view_model;
