//! Genetable Core - Common infrastructure for gene table pipelines
//!
//! Shared HTTP plumbing, logging and progress reporting used by the
//! data-source crates and the CLI.

pub mod http;
pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use http::{
    HttpConfig, HttpError, HttpResponse, SHARED_RUNTIME, get_text, http_client, http_config,
    set_http_config,
};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
