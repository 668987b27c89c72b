//! fencecore: snapping, fence layout and desktop data for the fences shell

pub mod data_uri;
pub mod desktop_data;
pub mod fences;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod native;
pub mod settings;
pub mod snap;
pub mod storage;
pub mod theme;

pub use desktop_data::{DesktopApi, DesktopFile};
pub use fences::{Fence, FenceLayout, Selection, SortOrder};
pub use geometry::{BoundingBox, ResizeEdges, Viewport};
pub use gesture::{FenceGesture, FileDrag, GestureKind};
pub use host::{Host, HostError};
pub use native::NativeHost;
pub use settings::{FenceSettings, ViewMode};
pub use snap::{BoxSet, GuideLine, Orientation, SnapEngine, SnapOutcome};
pub use theme::FenceTheme;
