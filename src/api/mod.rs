pub mod client;
pub mod models;
pub mod site_info;

pub use client::{ApiClient, ApiError, Result};
pub use models::{ApiConfig, Manifest, SiteInfo};
pub use site_info::extract_site_info;
