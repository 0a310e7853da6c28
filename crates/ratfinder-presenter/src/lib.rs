//! Presenter state for the nearby-site list: location, preferences,
//! filtering, windowed rendering.

pub mod filters;
pub mod location;
pub mod prefs;
pub mod presenter;
pub mod render;
pub mod source;
pub mod window;

pub use filters::{apply_filters, DistanceFilter, FilterState, SortField, StatusFilter};
pub use location::{LocationError, LocationProvider, StaticLocation};
pub use prefs::{FileStore, MemoryStore, PreferenceError, PreferenceStore, Preferences};
pub use presenter::{Presenter, ViewState};
pub use source::{ApiClient, SiteSource, SourceError};
pub use window::{VirtualRow, VirtualWindow, Virtualizer};
