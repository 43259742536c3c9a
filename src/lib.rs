pub mod cli;
pub mod config;
pub mod error;
pub mod language;
pub mod observability;
pub mod relative_time;
pub mod routes;
pub mod timestamp;

pub use config::Config;
pub use relative_time::{RelativeLabel, RelativeTimeFormatter, format_relative_time};
pub use routes::AppState;
pub use timestamp::{LocalZone, parse_timestamp};

rust_i18n::i18n!("locales", fallback = "en");
