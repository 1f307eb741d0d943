use std::io::IsTerminal;

use anstyle::{AnsiColor, Effects, Style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ntm_installer::DownloadProgress;

const PROGRESS_REDRAW_HZ: u8 = 10;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputStyle {
    Plain,
    Rich,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,
    Warn,
    Err,
}

impl Status {
    pub fn badge(self) -> &'static str {
        match self {
            Status::Ok => "[OK]",
            Status::Warn => "[WARN]",
            Status::Err => "[ERR]",
        }
    }

    fn style(self) -> Style {
        let color = match self {
            Status::Ok => AnsiColor::Green,
            Status::Warn => AnsiColor::Yellow,
            Status::Err => AnsiColor::Red,
        };
        Style::new().fg_color(Some(color.into())).effects(Effects::BOLD)
    }
}

pub fn current_output_style() -> OutputStyle {
    resolve_output_style(
        std::io::stdout().is_terminal(),
        std::io::stderr().is_terminal(),
    )
}

/// Status lines land on stdout and the progress bar on stderr, so rich
/// rendering needs both to be terminals.
pub fn resolve_output_style(stdout_tty: bool, stderr_tty: bool) -> OutputStyle {
    if stdout_tty && stderr_tty {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

pub fn render_status_line(style: OutputStyle, status: Status, message: &str) -> String {
    match style {
        OutputStyle::Plain => format!("{} {message}", status.badge()),
        OutputStyle::Rich => format!("{} {message}", colorize(status.style(), status.badge())),
    }
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

/// Terminal download bar. Stays silent in plain mode and redraws at a
/// bounded rate so piped stderr does not fill with frames.
pub struct DownloadBar {
    style: OutputStyle,
    bar: Option<ProgressBar>,
}

impl DownloadBar {
    pub fn new(style: OutputStyle) -> Self {
        Self { style, bar: None }
    }
}

impl DownloadProgress for DownloadBar {
    fn start(&mut self, total: Option<u64>) {
        if self.style != OutputStyle::Rich {
            return;
        }
        let bar = ProgressBar::with_draw_target(
            total,
            ProgressDrawTarget::stderr_with_hz(PROGRESS_REDRAW_HZ),
        );
        if let Ok(template) = ProgressStyle::with_template(
            "{msg:<9} [{bar:24.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
        ) {
            bar.set_style(template.progress_chars("=>-"));
        }
        bar.set_message("download");
        self.bar = Some(bar);
    }

    fn advance(&mut self, bytes: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(bytes);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
