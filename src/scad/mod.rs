mod emit;
mod writer;

pub use emit::{emit, EmitOptions};
pub(crate) use writer::ScadWriter;
