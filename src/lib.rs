//! weapon-ai: ゲームスクリーンショットの武器出現数カウント（CLI）

pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod input;
pub mod reference;
pub mod report;
