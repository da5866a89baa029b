//! cough-screen — single-shot screening CLI
//!
//! Usage: `cough-screen <audio_path> <age>`
//!
//! Emits exactly one JSON result line on stdout. Diagnostics go to stderr
//! and stay off unless `RUST_LOG` enables them, so the host's single-line
//! parse is never corrupted.

use cough_screen::{runner, Report, ScreenConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let mut args = std::env::args().skip(1);
    let report = match (args.next(), args.next()) {
        (Some(audio_path), Some(raw_age)) => {
            runner::run(&audio_path, &raw_age, &ScreenConfig::from_env())
        }
        _ => Report::error("Parameter kurang"),
    };

    println!("{}", report.to_json_line());
}
