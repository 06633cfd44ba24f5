//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `error`  | Configuration error types                    |
//! | `field`  | Field paths for diagnostics                  |
//! | `handle` | Global configuration handle (thread-safe)    |
//! | `path`   | Output path and URL resolution               |

mod error;
mod field;
pub mod handle;
mod path;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
pub use handle::{cfg, clear_clean_flag, init_config, reload_config};
pub use path::{PathResolver, is_external};
