mod simplify;
mod transform;

pub use simplify::{reduce_ring, simplify};
pub(crate) use simplify::simplify_with_progress;
pub use transform::{transform, Transform};
