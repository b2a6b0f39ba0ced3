// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fieldops_domain::{HistoryEntry, Lead, LeadStatus};

/// The precondition a lead store must check before committing a transition.
///
/// The transition was computed against a snapshot with this status and
/// this many history entries. If the stored lead no longer matches, the
/// commit must be rejected as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitToken {
    /// The lead the transition applies to.
    pub lead_id: i64,
    /// The status observed when the transition was proposed.
    pub expected_status: LeadStatus,
    /// The history length observed when the transition was proposed.
    pub expected_revision: usize,
}

/// The result of a successful status transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The lead after the transition.
    pub new_lead: Lead,
    /// The history entry recording this transition.
    pub entry: HistoryEntry,
    /// The optimistic-concurrency precondition for the commit.
    pub token: CommitToken,
}
