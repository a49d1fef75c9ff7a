//! Task collection, filtering and rendering shared by the terminal and
//! browser front ends of taskboard.

pub mod clock;
pub mod controller;
pub mod error;
pub mod filter;
pub mod storage;
pub mod store;
pub mod task;
pub mod theme;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{Confirm, Controller, EditForm, Focus, TaskForm};
pub use error::{ControllerError, FormKind, StoreError, ValidationError};
pub use filter::{CategoryFilter, Filters, StatusFilter};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::Store;
pub use task::{Categories, Category, Task, TaskId, TaskPatch};
pub use theme::Theme;
pub use view::{DeleteOutcome, Rendered, Stats, TaskCard, View};
