//! Configuration module

mod content;

pub use content::ContentConfig;
pub use content::RemoteConfig;
