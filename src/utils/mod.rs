pub mod environment;

pub use environment::{HOME_ENV_VAR, default_data_dir, home_override};
