//! Transformations shipped with recast.
//!
//! These are deliberately small: `rename` performs a whole-word rename inside
//! the selected file and `null` exercises the protocol without changing
//! anything.

mod null;
mod rename;

pub use self::null::NullTransformation;
pub use self::rename::Rename;
