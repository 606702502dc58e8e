#[cfg(feature = "cli")]
pub mod admin;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod hydrate;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, BuildConfig};

pub use crate::core::{build::BuildEngine, client::HttpTransport};
pub use hydrate::{Hydrator, HydratorConfig};
pub use utils::error::{CmsError, Result};
