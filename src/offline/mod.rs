mod render;
mod wav;

pub use render::render_offline;
pub use wav::{write_wav, WavOptions};
