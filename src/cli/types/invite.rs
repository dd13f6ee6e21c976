//! League invite codes.

use crate::cli::types::ids::LeagueId;
use crate::error::PronosError;
use std::fmt;
use std::str::FromStr;

/// A league invitation as shared between friends: the league id and the
/// league's secret joined with a colon, e.g. `12:A7KQ2M`.
///
/// The join endpoint wants the two halves separately; this type does the
/// splitting once, up front, so a malformed code fails before any request
/// goes out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteCode {
    pub league_id: LeagueId,
    pub code: String,
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.league_id, self.code)
    }
}

impl FromStr for InviteCode {
    type Err = PronosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PronosError::InvalidInviteCode { raw: s.to_string() };

        let (league_part, code_part) = s.split_once(':').ok_or_else(invalid)?;
        if code_part.is_empty() {
            return Err(invalid());
        }
        let league_id: LeagueId = league_part.parse().map_err(|_| invalid())?;

        Ok(Self {
            league_id,
            code: code_part.to_string(),
        })
    }
}
