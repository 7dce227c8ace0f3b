// UI module root: state in `model`, transitions in `update`, drawing in `render`,
// and the bubbletea-rs adapter in `run`.

pub mod model;
pub mod render;
pub mod run;
pub mod update;

pub use model::{Model, PageKind, ViewportClass, initial_model};
pub use render::{render_body, render_full, render_modeline};
pub use run::run;
pub use update::handle_update;

use crate::catalog::{Collection, ProductId};
use crate::error::AccessorError;

// Messages used by the update logic
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    WindowSize { width: usize, height: usize },
    KeyUp,
    KeyDown,
    KeyLeft,
    KeyRight,
    KeyTab,
    KeyBackTab,
    KeyEnter,
    KeySpace,
    KeyBackspace,
    KeyEsc,
    Rune(char),
    Fetched {
        attempt: u32,
        result: Result<Collection, AccessorError>,
    },
    Deleted {
        id: ProductId,
        result: Result<(), AccessorError>,
    },
}
