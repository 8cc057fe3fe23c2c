//! Sidebar generation and VitePress configuration assembly.
//!
//! The crate has three parts:
//! - [`sidebar`]: derives the navigation sidebar from the notes directory
//!   (the only algorithmic piece of the system)
//! - [`model`]: serde types shaped like the VitePress configuration object
//! - [`generate`]: merges a loaded [`vpress_config::Config`] with the
//!   generated sidebar into a complete [`model::VitePressConfig`]

pub mod generate;
pub mod model;
pub mod sidebar;

pub use generate::{GenerateError, generate};
pub use model::VitePressConfig;
pub use sidebar::{Category, SidebarError, SidebarGroup, SidebarItem, build_sidebar};
