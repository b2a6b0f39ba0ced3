// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date-column projection for a single lead.
//!
//! `project` is deterministic: identical inputs always yield an identical
//! ordered list of lines, which callers render verbatim.

use crate::reconcile::ReconciledHistory;
use fieldops_domain::{DateSpan, LeadStatus};

/// The label shown in front of a display line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayLabel {
    /// A lead confirmed once on its original date.
    SimpleConfirmed,
    /// A confirmation within a longer history.
    Confirmed,
    /// A reschedule within a longer history.
    Rescheduled,
    /// A cancelled lead.
    Cancelled,
}

impl DisplayLabel {
    /// Returns the label text.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SimpleConfirmed => "Confirmed For",
            Self::Confirmed => "CONFIRMED FOR",
            Self::Rescheduled => "RESCHEDULED TO",
            Self::Cancelled => "CANCELLED",
        }
    }

    const fn for_status(status: LeadStatus) -> Option<Self> {
        match status {
            LeadStatus::Confirm => Some(Self::Confirmed),
            LeadStatus::Reschedule => Some(Self::Rescheduled),
            LeadStatus::Cancelled => Some(Self::Cancelled),
            LeadStatus::Bid => None,
        }
    }

    const fn tone(self) -> Tone {
        match self {
            Self::SimpleConfirmed | Self::Confirmed => Tone::Green,
            Self::Rescheduled => Tone::Amber,
            Self::Cancelled => Tone::Red,
        }
    }
}

impl std::fmt::Display for DisplayLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color hint for a display line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// No emphasis.
    Plain,
    /// A confirmation.
    Green,
    /// A reschedule.
    Amber,
    /// A cancellation.
    Red,
}

impl Tone {
    /// Returns the string representation of the tone.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Red => "red",
        }
    }
}

/// One rendered row of a lead's date column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLine {
    /// The label, if the line has one.
    pub label: Option<DisplayLabel>,
    /// The dates shown on the line.
    pub window: DateSpan,
    /// Whether the dates are struck through.
    pub struck: bool,
    /// Color hint.
    pub tone: Tone,
    /// Whether this line is the lead's current value.
    pub current: bool,
}

impl DisplayLine {
    const fn new(
        label: Option<DisplayLabel>,
        window: DateSpan,
        struck: bool,
        current: bool,
    ) -> Self {
        let tone: Tone = match label {
            Some(label) => label.tone(),
            None => Tone::Plain,
        };
        Self {
            label,
            window,
            struck,
            tone,
            current,
        }
    }

    /// Returns the line as text, e.g. `RESCHEDULED TO: 2026-03-10`.
    #[must_use]
    pub fn text(&self) -> String {
        self.label.map_or_else(
            || self.window.to_string(),
            |label| format!("{label}: {}", self.window),
        )
    }
}

/// Projects a lead's date column.
///
/// # Arguments
///
/// * `status` - The lead's current status
/// * `history` - The lead's reconciled history and derived dates
#[must_use]
pub fn project(status: LeadStatus, history: &ReconciledHistory) -> Vec<DisplayLine> {
    match status {
        LeadStatus::Bid => vec![DisplayLine::new(None, history.original(), false, true)],
        LeadStatus::Cancelled => vec![DisplayLine::new(
            Some(DisplayLabel::Cancelled),
            history.effective(),
            true,
            true,
        )],
        LeadStatus::Confirm if history.entries().is_empty() || history.is_simple_confirm() => {
            vec![DisplayLine::new(
                Some(DisplayLabel::SimpleConfirmed),
                history.effective(),
                false,
                true,
            )]
        }
        LeadStatus::Confirm | LeadStatus::Reschedule => project_changes(status, history),
    }
}

fn project_changes(status: LeadStatus, history: &ReconciledHistory) -> Vec<DisplayLine> {
    let changes: Vec<(DisplayLabel, DateSpan)> = history
        .entries()
        .iter()
        .filter(|entry| entry.to_status.sets_schedule())
        .filter_map(|entry| {
            let label: DisplayLabel = DisplayLabel::for_status(entry.to_status)?;
            Some((label, entry.new_window()?))
        })
        .collect();

    let mut lines: Vec<DisplayLine> = Vec::with_capacity(changes.len() + 1);
    lines.push(DisplayLine::new(None, history.original(), true, false));

    if changes.is_empty() {
        // Scheduled status without a recorded change, e.g. imported data.
        lines.push(DisplayLine::new(
            DisplayLabel::for_status(status),
            history.effective(),
            false,
            true,
        ));
        return lines;
    }

    // The current line always shows the window in effect.
    let last: usize = changes.len() - 1;
    for (i, (label, window)) in changes.into_iter().enumerate() {
        let line: DisplayLine = if i == last {
            DisplayLine::new(Some(label), history.effective(), false, true)
        } else {
            DisplayLine::new(Some(label), window, true, false)
        };
        lines.push(line);
    }
    lines
}
