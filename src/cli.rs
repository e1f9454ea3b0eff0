//! Command-line surface and the flow of a single `bakeit` invocation.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::api::{resolve_duration, PasteRequest, PasteryClient};
use crate::config::Config;
use crate::input::{self, ResolvedInput};
use crate::ui::{self, SystemBrowser, SystemClipboard};

#[derive(Parser, Debug)]
#[command(
    name = "bakeit",
    version,
    about = "Upload a file to Pastery, the best pastebin in the world."
)]
pub struct Cli {
    /// The name of the file to upload (or stdin, if omitted)
    pub filename: Option<PathBuf>,

    /// The title of the paste
    #[arg(short, long, value_name = "title")]
    pub title: Option<String>,

    /// The language highlighter to use
    #[arg(short, long, value_name = "lang")]
    pub language: Option<String>,

    /// The duration (in minutes) before the paste expires
    #[arg(short, long, value_name = "minutes", allow_negative_numbers = true)]
    pub duration: Option<i64>,

    /// How many times this paste can be viewed before it expires
    #[arg(
        short = 'v',
        long,
        value_name = "views",
        allow_negative_numbers = true
    )]
    pub max_views: Option<i64>,

    /// Automatically open a browser window when done
    #[arg(short = 'b', long)]
    pub open_browser: bool,
}

/// Load the config from its default location, then upload.
///
/// Config problems surface here, before stdin or any file is touched.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let path = Config::default_path()?;
    let config = Config::load(&path)?;
    run_with_config(cli, &config)
}

/// Read the input, upload it and report. A failed upload is printed as
/// `ERROR: ...` and turns into a failing exit code, not an `Err`.
pub fn run_with_config(cli: Cli, config: &Config) -> Result<ExitCode> {
    let client = PasteryClient::new(config)?;
    let input = input::resolve(cli.filename.as_deref(), cli.title)?;
    let request = build_request(config, input, cli.language, cli.duration, cli.max_views);

    let result = ui::with_spinner("Uploading...", || client.upload(request));

    let mut stdout = io::stdout().lock();
    ui::report_result(&mut stdout, &result)?;

    match result {
        Ok(url) => {
            ui::copy_url(SystemClipboard::probe(), &url, &mut stdout);
            if cli.open_browser {
                ui::open_in_browser(&SystemBrowser::default(), &url, &mut stdout);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(transport = e.is_transport(), "upload failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn build_request(
    config: &Config,
    input: ResolvedInput,
    language: Option<String>,
    duration: Option<i64>,
    max_views: Option<i64>,
) -> PasteRequest {
    PasteRequest {
        api_key: config.api_key.clone(),
        content: input.content,
        title: input.title,
        language,
        duration: resolve_duration(duration, config.duration),
        max_views,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PasteBody;
    use crate::config::DEFAULT_API_URL;

    fn config(duration: Option<i64>) -> Config {
        Config {
            api_key: "KEY".into(),
            duration,
            api_url: DEFAULT_API_URL.into(),
            timeout: None,
        }
    }

    fn input() -> ResolvedInput {
        ResolvedInput {
            content: PasteBody::Text("body".into()),
            title: Some("notes.txt".into()),
        }
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "bakeit", "-t", "T", "-l", "rust", "-d", "60", "-v", "3", "-b", "notes.txt",
        ])
        .unwrap();
        assert_eq!(cli.filename, Some(PathBuf::from("notes.txt")));
        assert_eq!(cli.title.as_deref(), Some("T"));
        assert_eq!(cli.language.as_deref(), Some("rust"));
        assert_eq!(cli.duration, Some(60));
        assert_eq!(cli.max_views, Some(3));
        assert!(cli.open_browser);
    }

    #[test]
    fn no_filename_means_stdin() {
        let cli = Cli::try_parse_from(["bakeit"]).unwrap();
        assert!(cli.filename.is_none());
        assert!(cli.duration.is_none());
        assert!(!cli.open_browser);
    }

    #[test]
    fn negative_numbers_are_accepted() {
        let cli = Cli::try_parse_from(["bakeit", "-d", "-5", "--max-views", "-1"]).unwrap();
        assert_eq!(cli.duration, Some(-5));
        assert_eq!(cli.max_views, Some(-1));
    }

    #[test]
    fn request_uses_configured_duration_without_flag() {
        let req = build_request(&config(Some(1440)), input(), None, None, None);
        assert_eq!(req.duration, Some(1440));
        assert_eq!(req.api_key, "KEY");
        assert_eq!(req.title.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn request_flag_beats_configured_duration() {
        let req = build_request(&config(Some(1440)), input(), None, Some(5), None);
        assert_eq!(req.duration, Some(5));
    }

    #[test]
    fn request_without_any_duration_omits_it() {
        let req = build_request(&config(None), input(), Some("python".into()), None, Some(2));
        assert_eq!(req.duration, None);
        assert_eq!(req.language.as_deref(), Some("python"));
        assert_eq!(req.max_views, Some(2));
        assert!(req.query_pairs().iter().all(|(k, _)| *k != "duration"));
    }
}
