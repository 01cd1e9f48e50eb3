use clap::{CommandFactory, Parser};

#[derive(Debug, Default, Parser)]
#[command(name = "data-modules", version, about = "Scroll-revealed data-module pages")]
pub struct CliArgs {
    /// Print page stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Validate every bundled page and exit
    #[arg(long)]
    pub check: bool,

    /// Page to open (slug)
    #[arg(long, value_name = "SLUG")]
    pub page: Option<String>,

    /// Write one SVG per chart section into this directory
    #[arg(long = "export-dir", value_name = "PATH")]
    pub export_dir: Option<String>,

    /// Fraction of a section that must be visible before it reveals
    #[arg(long, value_name = "RATIO")]
    pub threshold: Option<f64>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(page) = &self.page {
            std::env::set_var("DATA_MODULES_PAGE", page);
        }
        if let Some(dir) = &self.export_dir {
            std::env::set_var("DATA_MODULES_EXPORT_DIR", dir);
        }
        if let Some(threshold) = self.threshold {
            std::env::set_var("DATA_MODULES_REVEAL_THRESHOLD", threshold.to_string());
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = CliArgs::parse_from([
            "data-modules",
            "--headless",
            "--json",
            "--page",
            "rice-seasons",
            "--threshold",
            "0.25",
        ]);
        assert!(args.headless);
        assert!(args.json);
        assert_eq!(args.page.as_deref(), Some("rice-seasons"));
        assert_eq!(args.threshold, Some(0.25));
        assert!(args.export_dir.is_none());
    }

    #[test]
    fn help_mentions_export_dir() {
        assert!(CliArgs::help_text().contains("--export-dir"));
    }
}
