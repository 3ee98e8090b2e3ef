//! Main app runner for a picking session

use std::env;
use std::process::ExitCode;

use serde::Serialize;
use tokio::io::AsyncReadExt;

use crate::application::ports::{Clipboard, ConfigStore, SampleError};
use crate::application::{PickCallbacks, PickColorUseCase, PickInput, PickOutcome};
use crate::domain::color::SampledColor;
use crate::domain::config::AppConfig;
use crate::gui::{GlyphSource, TooltipRenderer};
use crate::infrastructure::clipboard::{hold_selection, ParseClipboardToolError};
use crate::infrastructure::display;
use crate::infrastructure::notification::ParseNotifierError;
use crate::infrastructure::{
    create_clipboard, create_notifier, ClipboardTool, NotifierKind, XdgConfigStore,
};

use super::args::PickOptions;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_CANCELLED: u8 = 3;

/// Environment variable overriding the configured format
pub const FORMAT_ENV: &str = "COLORGRAB_FORMAT";

/// Machine-readable result for `--json`
#[derive(Debug, Serialize)]
struct PickReport<'a> {
    hex: String,
    rgb: [u8; 3],
    text: &'a str,
    copied: bool,
}

impl<'a> PickReport<'a> {
    fn new(color: SampledColor, text: &'a str, copied: bool) -> Self {
        Self {
            hex: color.to_hex(),
            rgb: color.channels(),
            text,
            copied,
        }
    }
}

/// Run one picking session
pub async fn run_pick(options: PickOptions) -> ExitCode {
    let presenter = Presenter::new().with_verbose(options.verbose);

    let renderer = TooltipRenderer::new(GlyphSource::load(options.font.as_deref()));
    if let Some(font) = &options.font {
        if !renderer.glyphs().is_loaded_from(font) {
            presenter.warn(&format!(
                "Could not load font {}, using {}",
                font.display(),
                renderer.glyphs()
            ));
        }
    }
    presenter.debug(&format!("Tooltip font: {}", renderer.glyphs()));

    let (screen, overlay) = match display::connect(renderer) {
        Ok(pair) => pair,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let clipboard = create_clipboard(options.clipboard_tool);
    let notifier = create_notifier(options.notifier);
    presenter.debug(&format!(
        "Clipboard: {}, notifier: {}",
        clipboard.name(),
        options.notifier
    ));

    let mut use_case = PickColorUseCase::new(screen, overlay, clipboard, notifier);

    // Ctrl+C / SIGTERM cancel the session
    let shutdown = ShutdownSignal::with_flag(use_case.cancel_flag());
    if let Err(e) = shutdown.setup() {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let input = PickInput {
        format: options.format,
        interval: options.interval,
        offset: options.offset,
        notify_on_copy: options.notify,
        failure_linger: options.failure_linger,
    };

    let callbacks = PickCallbacks {
        on_sample_error: Some(Box::new(move |e: &SampleError| {
            presenter.debug(&e.to_string())
        })),
        on_warning: Some(Box::new(move |message: &str| presenter.warn(message))),
    };

    presenter.debug(&format!(
        "Sampling every {}, left click or Enter copies, Escape or right click cancels",
        options.interval
    ));

    match use_case.execute(input, callbacks).await {
        Ok(PickOutcome::Copied { color, text }) => {
            report(&presenter, color, &text, true, options.json);
            presenter.success(&format!("Copied {} to clipboard", text));
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(PickOutcome::CopyFailed { color, text, error }) => {
            report(&presenter, color, &text, false, options.json);
            presenter.error(&error.to_string());
            ExitCode::from(EXIT_ERROR)
        }
        Ok(PickOutcome::Cancelled) => {
            if shutdown.is_shutdown() {
                presenter.info("Interrupted");
            } else {
                presenter.info("Cancelled");
            }
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Serve the text read from stdin as clipboard contents until replaced
pub async fn run_clipboard_holder() -> ExitCode {
    let presenter = Presenter::new();

    let mut text = String::new();
    if let Err(e) = tokio::io::stdin().read_to_string(&mut text).await {
        presenter.error(&format!("Failed to read clipboard text: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    match tokio::task::spawn_blocking(move || hold_selection(text)).await {
        Ok(Ok(())) => ExitCode::from(EXIT_SUCCESS),
        Ok(Err(e)) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            presenter.error(&format!("Clipboard holder failed: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print the picked color to stdout
fn report(presenter: &Presenter, color: SampledColor, text: &str, copied: bool, json: bool) {
    if !json {
        presenter.output(text);
        return;
    }

    match serde_json::to_string(&PickReport::new(color, text, copied)) {
        Ok(line) => presenter.output(&line),
        Err(e) => {
            presenter.warn(&format!("Failed to encode JSON: {}", e));
            presenter.output(text);
        }
    }
}

/// Turn the merged config into validated pick options
pub fn pick_options(config: &AppConfig, json: bool, verbose: bool) -> Result<PickOptions, String> {
    let format = config.parse_format().map_err(|e| e.to_string())?;
    let interval = config.parse_interval().map_err(|e| e.to_string())?;
    let offset = config.parse_offset().map_err(|e| e.to_string())?;
    let clipboard_tool: ClipboardTool = config
        .clipboard_tool_or_default()
        .parse()
        .map_err(|e: ParseClipboardToolError| e.to_string())?;
    let notifier: NotifierKind = config
        .notifier_or_default()
        .parse()
        .map_err(|e: ParseNotifierError| e.to_string())?;

    Ok(PickOptions {
        format,
        interval,
        offset,
        notify: config.notify_or_default(),
        failure_linger: config.failure_linger_or_default(),
        font: config.font_path(),
        clipboard_tool,
        notifier,
        json,
        verbose,
    })
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig, presenter: &Presenter) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.warn(&format!("{}; using defaults", e));
            AppConfig::empty()
        }
    };

    // Build env config
    let env_config = AppConfig {
        format: env::var(FORMAT_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::color::ColorFormat;
    use crate::domain::picker::Offset;
    use std::time::Duration as StdDuration;

    #[test]
    fn defaults_produce_options() {
        let options = pick_options(&AppConfig::defaults(), false, false).unwrap();
        assert_eq!(options.format, ColorFormat::Hex);
        assert_eq!(options.interval.as_millis(), 40);
        assert_eq!(options.offset, Offset::new(16, 16));
        assert_eq!(options.failure_linger, StdDuration::from_millis(1500));
        assert_eq!(options.clipboard_tool, ClipboardTool::Arboard);
        assert_eq!(options.notifier, NotifierKind::NotifyRust);
        assert!(options.font.is_none());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let options = pick_options(&AppConfig::empty(), true, true).unwrap();
        assert_eq!(options.format, ColorFormat::Hex);
        assert!(options.json);
        assert!(options.verbose);
    }

    #[test]
    fn invalid_values_are_reported() {
        let bad_interval = AppConfig {
            interval: Some("5ms".to_string()),
            ..AppConfig::defaults()
        };
        assert!(pick_options(&bad_interval, false, false)
            .unwrap_err()
            .contains("5ms"));

        let bad_format = AppConfig {
            format: Some("cmyk".to_string()),
            ..AppConfig::defaults()
        };
        assert!(pick_options(&bad_format, false, false).is_err());

        let bad_tool = AppConfig {
            linux: Some(crate::domain::config::LinuxConfig {
                clipboard_tool: Some("pbcopy".to_string()),
                notifier: None,
            }),
            ..AppConfig::defaults()
        };
        assert!(pick_options(&bad_tool, false, false).is_err());
    }

    #[test]
    fn configured_values_are_parsed() {
        let config = AppConfig {
            format: Some("rgb".to_string()),
            interval: Some("100ms".to_string()),
            offset: Some("-8,24".to_string()),
            ..AppConfig::defaults()
        };
        let options = pick_options(&config, false, false).unwrap();
        assert_eq!(options.format, ColorFormat::Rgb);
        assert_eq!(options.interval.as_millis(), 100);
        assert_eq!(options.offset, Offset::new(-8, 24));
    }

    #[test]
    fn out_of_range_offset_is_reported() {
        let config = AppConfig {
            offset: Some("2147483647,0".to_string()),
            ..AppConfig::defaults()
        };
        let err = pick_options(&config, false, false).unwrap_err();
        assert!(err.contains("2147483647"));
    }

    #[test]
    fn json_report_shape() {
        let color = SampledColor::new(255, 0, 0);
        let json = serde_json::to_value(PickReport::new(color, "#FF0000", true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "hex": "#FF0000",
                "rgb": [255, 0, 0],
                "text": "#FF0000",
                "copied": true
            })
        );
    }
}
