//! Heuristic extraction of calendar events from free-form email text.
//!
//! ```
//! use chrono::NaiveDate;
//! use mailevent::{EventExtractor, FixedClock};
//!
//! let now = NaiveDate::from_ymd_opt(2024, 3, 10)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let extractor = EventExtractor::with_clock(FixedClock(now));
//! let event = extractor.extract("Tuesday, March 15th at 2:00 PM in Conference Room A");
//!
//! assert_eq!(event.location(), Some("Conference Room A"));
//! assert_eq!(event.start().to_string(), "2024-03-15 14:00:00");
//! assert_eq!(event.confidence(), 100);
//! ```

pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod extractor;
pub mod notice;
pub mod utils;

use anyhow::Result;
use env_logger::Env;
use log::*;

pub fn run(cli: cli::Cli, config: Config) -> Result<()> {
    debug!("Running command: {:?}", cli.command);
    commands::run(cli, config)
}

/// Install the stderr logger; `RUST_LOG` overrides `default_level`
pub fn init_logger(default_level: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use extractor::{extract, EventExtractor, ExtractError, ExtractedEvent, ExtractionTrace};
pub use notice::{Notice, NoticeLevel};
