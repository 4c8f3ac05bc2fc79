//! ブラウザからの通信

pub mod assets;
pub mod gemini;
