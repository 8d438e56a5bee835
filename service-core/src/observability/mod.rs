pub mod logging;

pub use logging::{LogFormat, LogOutput, LogSettings, LogTarget, init_tracing, resolve_output};
