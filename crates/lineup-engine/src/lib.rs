//! lineup-engine — Gallery construction and query orchestration.
//!
//! Ties the core matcher to the external boundaries: builds the gallery
//! by fanning out per-sample fetch+detect tasks, then serves queries
//! from a dedicated session thread that discards superseded results.

pub mod builder;
pub mod config;
pub mod manifest;
pub mod session;

pub use builder::{build_gallery, BuildError, BuildReport};
pub use config::Config;
pub use manifest::{GalleryManifest, IdentityEntry, ManifestError};
pub use session::{spawn_session, FaceMatch, QueryOutcome, SessionError, SessionHandle};
