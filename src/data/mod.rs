mod bind;
mod scale;

pub use bind::{bind_by_identifier, bind_by_position};
pub use scale::scale_heights;
