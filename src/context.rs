//! League context: metadata and member list for one league.
//!
//! Both fetches run concurrently and are joined before the context is
//! handed out. A failure lands in the `error` field rather than aborting or
//! redirecting — each view decides how to degrade.

use crate::api::{
    leagues,
    types::{League, LeagueMember, MemberRole},
    ApiClient,
};
use crate::cli::types::{LeagueId, UserId};

pub struct LeagueContext {
    pub league_id: LeagueId,
    pub league: Option<League>,
    pub members: Vec<LeagueMember>,
    pub error: Option<String>,
}

impl LeagueContext {
    /// Fetch league details and members for `league_id`.
    pub async fn load(client: &ApiClient, league_id: LeagueId) -> Self {
        let mut ctx = Self {
            league_id,
            league: None,
            members: Vec::new(),
            error: None,
        };
        ctx.refresh(client).await;
        ctx
    }

    /// Re-run both fetches. On any failure the previous state is kept and
    /// the error recorded.
    pub async fn refresh(&mut self, client: &ApiClient) {
        self.error = None;

        let (league, members) = tokio::join!(
            leagues::league(client, self.league_id),
            leagues::members(client, self.league_id),
        );

        match (league, members) {
            (Ok(league), Ok(members)) => {
                self.league = Some(league);
                self.members = members;
            }
            (Err(e), _) | (_, Err(e)) => {
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.league.is_some()
    }

    /// Role of `user_id` in this league, if they are a member.
    pub fn role_of(&self, user_id: UserId) -> Option<MemberRole> {
        self.members
            .iter()
            .find(|m| m.user.as_ref().map(|u| u.id) == Some(user_id))
            .map(|m| m.role)
    }
}
