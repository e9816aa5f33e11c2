//! Text edits, edit application and unified patches.

mod apply;
mod edit;
mod patch;

pub use self::apply::{apply_edits, apply_to_file};
pub use self::edit::{EditSet, Position, TextEdit, TextRange};
pub use self::patch::Patch;
