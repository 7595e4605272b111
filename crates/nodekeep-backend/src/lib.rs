mod error;
mod traits;
mod types;

pub use error::BackendError;
pub use traits::{PackageManager, VersionManager};
pub use types::{ActiveRuntime, NodeVersion, VersionParseError};
