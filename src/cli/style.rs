//! Terminal styling for command output
//!
//! Every colour used by the commands goes through a [`Tone`]. Colour is
//! dropped automatically when the target stream is not a terminal or
//! `NO_COLOR` is set (detection is done by `owo-colors`).
//!
//! | Tone       | Look   | Default stream | Used for                          |
//! |------------|--------|----------------|-----------------------------------|
//! | `Accent`   | cyan   | stdout         | URLs and counts                   |
//! | `Success`  | green  | stdout         | accepted submissions              |
//! | `Error`    | red    | stderr         | failed submissions, aborted runs  |
//! | `Warn`     | yellow | stderr         | quota reached, empty input        |
//! | `Muted`    | dim    | stdout         | hints and secondary details       |
//! | `Emphasis` | bold   | stdout         | headings and the run summary      |

use std::fmt::{self, Display};
use std::time::Duration;

use bulk_indexer::types::{SubmitOutcome, TerminalState};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream, Style};

/// Semantic colour of a piece of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    Success,
    Error,
    Warn,
    Muted,
    Emphasis,
}

impl Tone {
    const fn style(self) -> Style {
        match self {
            Self::Accent => Style::new().cyan(),
            Self::Success => Style::new().green(),
            Self::Error => Style::new().red(),
            Self::Warn => Style::new().yellow(),
            Self::Muted => Style::new().dimmed(),
            Self::Emphasis => Style::new().bold(),
        }
    }

    const fn stream(self) -> Stream {
        match self {
            Self::Error | Self::Warn => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }

    /// Tone for a run's final state
    pub const fn for_terminal(terminal: TerminalState) -> Self {
        match terminal {
            TerminalState::Completed => Self::Success,
            TerminalState::QuotaExhausted => Self::Warn,
            TerminalState::Aborted => Self::Error,
        }
    }
}

/// A value rendered with a [`Tone`] when its stream supports colour
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    tone: Tone,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, tone: Tone) -> Self {
        Self {
            value,
            tone,
            stream: tone.stream(),
        }
    }

    /// Check colour support against stdout, for stderr tones printed there
    #[must_use]
    pub const fn to_stdout(mut self) -> Self {
        self.stream = Stream::Stdout;
        self
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.tone.style();
        write!(
            f,
            "{}",
            self.value.if_supports_color(self.stream, |v| v.style(style))
        )
    }
}

/// Tone shorthands for anything printable
pub trait Stylize: Display {
    /// Render with an explicit tone
    fn tone(&self, tone: Tone) -> Styled<&Self> {
        Styled::new(self, tone)
    }

    fn accent(&self) -> Styled<&Self> {
        self.tone(Tone::Accent)
    }

    fn error(&self) -> Styled<&Self> {
        self.tone(Tone::Error)
    }

    fn warn(&self) -> Styled<&Self> {
        self.tone(Tone::Warn)
    }

    fn muted(&self) -> Styled<&Self> {
        self.tone(Tone::Muted)
    }

    fn emphasis(&self) -> Styled<&Self> {
        self.tone(Tone::Emphasis)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green tick
pub const fn check() -> Styled<&'static str> {
    Styled::new("✓", Tone::Success)
}

/// Red cross, checked against stderr
pub const fn cross() -> Styled<&'static str> {
    Styled::new("✗", Tone::Error)
}

/// Cyan step marker
pub const fn arrow() -> Styled<&'static str> {
    Styled::new("→", Tone::Accent)
}

/// Per-item result word on the progress line (always stdout)
pub const fn outcome_label(outcome: &SubmitOutcome) -> Styled<&'static str> {
    match outcome {
        SubmitOutcome::Success => Styled::new("done", Tone::Success),
        SubmitOutcome::Failure { .. } => Styled::new("failed", Tone::Error).to_stdout(),
    }
}

/// `(n/total)` counter in front of each submitted URL
pub fn item_counter(index: usize, planned: usize) -> Styled<String> {
    Styled::new(format!("({}/{planned})", index + 1), Tone::Muted)
}

/// URL printed to stdout, clickable where the terminal supports OSC 8
pub fn link(url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner shown while waiting on a single slow step
pub fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("hardcoded spinner template is valid")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
