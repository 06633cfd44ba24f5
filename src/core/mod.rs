//! Process-wide state shared across commands.

mod state;

pub use state::{
    build_error, build_version, is_healthy, is_shutdown, record_build_failure,
    record_build_success, register_server, setup_shutdown_handler,
};
