// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod apply;
mod clock;
mod command;
mod error;
mod reconcile;
mod state;
mod transition;
mod view;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, apply_create};
pub use clock::{BusinessClock, Clock, FixedClock};
pub use command::Command;
pub use error::CoreError;
pub use reconcile::{ReconciledHistory, reconcile};
pub use state::{CommitToken, TransitionResult};
pub use transition::propose_transition;
pub use view::{DisplayLabel, DisplayLine, Tone, project};
