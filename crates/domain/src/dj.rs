// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! DJ reference data.
//!
//! The roster is a closed set. Each identity carries its short name,
//! two-letter initials used as the calendar event marker, invitation
//! email, and paid/unpaid backup classification.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the fixed set of DJs tracked by the availability matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DjIdentity {
    /// Henry — weekday-only backup rule.
    Henry,
    /// Woody — bold-sensitive OUT rule.
    Woody,
    /// Paul — standard rules.
    Paul,
    /// Stefano — uncertain-blank rule.
    Stefano,
    /// Felipe — backup-only default from 2026.
    Felipe,
    /// Stephanie — weekend-only activation from 2027.
    Stephanie,
}

impl DjIdentity {
    /// Every DJ identity, in matrix column order for 2025/2026.
    pub const ALL: [Self; 6] = [
        Self::Henry,
        Self::Woody,
        Self::Paul,
        Self::Stefano,
        Self::Felipe,
        Self::Stephanie,
    ];

    /// Returns the DJ's short name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Henry => "Henry",
            Self::Woody => "Woody",
            Self::Paul => "Paul",
            Self::Stefano => "Stefano",
            Self::Felipe => "Felipe",
            Self::Stephanie => "Stephanie",
        }
    }

    /// Returns the two-letter initials used in calendar event titles.
    #[must_use]
    pub const fn initials(&self) -> &'static str {
        match self {
            Self::Henry => "HK",
            Self::Woody => "WM",
            Self::Paul => "PB",
            Self::Stefano => "SB",
            Self::Felipe => "FS",
            Self::Stephanie => "SD",
        }
    }

    /// Returns the bracketed initials marker matched against calendar
    /// event titles, e.g. `"[PB]"`.
    #[must_use]
    pub fn initials_marker(&self) -> String {
        format!("[{}]", self.initials())
    }

    /// Returns the DJ's invitation email address.
    #[must_use]
    pub const fn email(&self) -> &'static str {
        match self {
            Self::Henry => "henry@bigfundj.com",
            Self::Woody => "woody@bigfundj.com",
            Self::Paul => "paul@bigfundj.com",
            Self::Stefano => "stefano@bigfundj.com",
            Self::Felipe => "felipe@bigfundj.com",
            Self::Stephanie => "stephanie@bigfundj.com",
        }
    }

    /// Whether the DJ is compensated for standby duty.
    #[must_use]
    pub const fn is_paid_backup(&self) -> bool {
        matches!(self, Self::Stefano | Self::Felipe | Self::Stephanie)
    }

    /// Returns the calendar title for a backup assignment, e.g.
    /// `"[WM] BACKUP DJ"` or `"[SB] PAID BACKUP DJ"`.
    #[must_use]
    pub fn backup_event_title(&self) -> String {
        if self.is_paid_backup() {
            format!("[{}] PAID BACKUP DJ", self.initials())
        } else {
            format!("[{}] BACKUP DJ", self.initials())
        }
    }

    /// Parses a short name or a full name as entered in the gig database
    /// (matched by first word, case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownDj` if the name matches no roster entry.
    pub fn parse_name(name: &str) -> Result<Self, DomainError> {
        let first = name
            .split_whitespace()
            .next()
            .ok_or_else(|| DomainError::UnknownDj(name.to_string()))?;
        for dj in Self::ALL {
            if dj.as_str().eq_ignore_ascii_case(first) {
                return Ok(dj);
            }
        }
        Err(DomainError::UnknownDj(name.to_string()))
    }
}

impl FromStr for DjIdentity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s)
    }
}

impl std::fmt::Display for DjIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the initials marker used for an unassigned booking: `"U"` plus
/// the first letter of the secondary DJ's name, or `"UP"` when no
/// secondary DJ is named.
#[must_use]
pub fn unassigned_initials(secondary_dj: Option<&str>) -> String {
    let letter = secondary_dj
        .and_then(|name| name.trim().chars().next())
        .map_or('P', |c| c.to_ascii_uppercase());
    format!("U{letter}")
}
