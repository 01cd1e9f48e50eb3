mod headless;
mod loop_handler;

pub use headless::{build_report, export_svgs, render_text, run_check, run_headless, HeadlessReport};
pub use loop_handler::run;
