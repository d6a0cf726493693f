// Grid module
// Headless scheduling-grid engine shared by the day, week and month views

pub mod day_grid;
pub mod drag;
pub mod editor;
pub mod gesture;
pub mod layout;
pub mod mapper;
pub mod month;
pub mod now_indicator;
pub mod timer;
pub mod week;

pub use day_grid::{DayGrid, DragPreview, GridHost, HoverLine};
pub use drag::{DragController, DragSession, Reschedule};
pub use editor::{DraftError, EditorCoordinator, EditorState, SharedSurfaces, SurfaceKind, SurfaceStack, SurfaceToken};
pub use gesture::{Gesture, GestureClassifier, GestureConfig, GestureState};
pub use layout::{layout_day, DayLayout, EventLayout, LayoutConfig};
pub use mapper::{GridGeometry, TimeSpaceMapper};
pub use month::{MonthCell, MonthGrid};
pub use now_indicator::NowIndicator;
pub use timer::{Clock, ManualClock, SystemClock};
pub use week::{WeekColumn, WeekGrid};
