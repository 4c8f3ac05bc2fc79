//! Weapon AI Common Library
//!
//! CLIとWeb(WASM)で共有される型とロジック

pub mod types;
pub mod error;
pub mod weapon_map;
pub mod aggregate;
pub mod report;
pub mod prompts;
pub mod gemini;
pub mod parser;
pub mod payload;
pub mod session;
pub mod analyzer;

pub use types::{AggregatedCount, GridCoord, GridCount, GRID_COLS, GRID_ROWS, GRID_SLOTS};
pub use error::{Error, Result, INFERENCE_FAILURE_MESSAGE};
pub use weapon_map::{WeaponNameTable, UNMAPPED_LABEL};
pub use aggregate::aggregate;
pub use report::{AnalysisReport, IDLE_MESSAGE, NO_WEAPONS_MESSAGE};
pub use prompts::build_count_prompt;
pub use gemini::{build_count_request, generate_content_url, GeminiRequest, GeminiResponse, DEFAULT_MODEL, GEMINI_API_BASE};
pub use parser::{extract_json_object, parse_grid_count, parse_response_body};
pub use payload::ImagePayload;
pub use session::{AnalysisSession, FlightGuard};
pub use analyzer::{Analyzer, InferenceClient};
