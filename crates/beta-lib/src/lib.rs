pub mod command;
pub mod config;
pub mod error;
pub mod form;
pub mod gate;
pub mod input;
pub mod mode;
pub mod relay;
pub mod run_log;
pub mod session;

pub use command::{build_command, BetaCommand};
pub use config::AppConfig;
pub use error::{BetaError, Result};
pub use form::{FileField, FormState, TextField};
pub use gate::Requirement;
pub use mode::{ExpressionKind, Genome, Method, Mode};
pub use session::RunSession;
