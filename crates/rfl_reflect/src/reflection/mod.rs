// -----------------------------------------------------------------------------
// Modules

mod cast;
mod reflect;

// -----------------------------------------------------------------------------
// Exports

pub use cast::{cast, cast_mut};
pub use reflect::Reflect;
