//! CLI argument definitions and parsing.

pub mod types;

use clap::{Parser, Subcommand};
use types::{InviteCode, LeagueId, RaceId, RiderId, Season};

#[derive(Debug, Parser)]
#[clap(name = "velo-pronos", about = "Vélo Pronos cycling betting CLI")]
pub struct VeloPronos {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session token.
    Login {
        #[clap(long, short)]
        email: String,

        #[clap(long, short)]
        password: String,
    },

    /// Create an account. No session is opened; log in afterwards.
    Register {
        /// Public display name.
        #[clap(long)]
        pseudo: String,

        #[clap(long, short)]
        email: String,

        #[clap(long, short)]
        password: String,
    },

    /// Drop the stored session.
    Logout,

    /// Show the account behind the stored session.
    Whoami,

    /// League directory and membership.
    Leagues {
        #[clap(subcommand)]
        cmd: LeagueCmd,
    },

    /// Race calendar.
    Races {
        #[clap(subcommand)]
        cmd: RaceCmd,
    },

    /// Riders registered for a race.
    Startlist {
        #[clap(long, short)]
        race_id: RaceId,

        /// Filter by rider or team name (case-insensitive substring).
        #[clap(long, short)]
        search: Option<String>,

        /// Force refresh from the API, overwriting the local cache.
        #[clap(long)]
        refresh: bool,
    },

    /// Winner/bonus bets (classics, monuments, stage races, championships).
    Bet {
        #[clap(subcommand)]
        cmd: BetCmd,
    },

    /// 8-rider fantasy teams (grand tours).
    Team {
        #[clap(subcommand)]
        cmd: TeamCmd,
    },

    /// Everyone's bets on a race, best score first.
    Leaderboard {
        #[clap(long, short)]
        race_id: RaceId,

        /// Restrict to one league (or set `VELO_PRONOS_LEAGUE_ID`).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Ignore the league filter and the env var.
        #[clap(long, conflicts_with = "league_id")]
        global: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Trigger server-side scoring for a finished race (admin).
    Score {
        #[clap(long, short)]
        race_id: RaceId,
    },
}

#[derive(Debug, Subcommand)]
pub enum LeagueCmd {
    /// Leagues you belong to, with your role in each.
    List,

    /// League details and member list.
    Show {
        /// League ID (or set `VELO_PRONOS_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,
    },

    /// Create a league; you become its admin.
    Create {
        name: String,

        #[clap(long, short)]
        description: Option<String>,
    },

    /// Join a league with an invite code (`leagueId:code`).
    Join { invite: InviteCode },
}

#[derive(Debug, Subcommand)]
pub enum RaceCmd {
    /// Season calendar (cached locally; `--refresh` to refetch).
    List {
        /// Season year (e.g. 2026).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Force refresh from the API, overwriting the local cache.
        #[clap(long)]
        refresh: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Race detail, with stages for multi-stage races.
    Show {
        #[clap(long, short)]
        race_id: RaceId,

        /// Force refresh from the API, overwriting the local cache.
        #[clap(long)]
        refresh: bool,
    },

    /// Import a race from the external race-data source (admin).
    Import { slug: String },
}

#[derive(Debug, Subcommand)]
pub enum BetCmd {
    /// Current selection and bet status for a race.
    Show {
        #[clap(long, short)]
        race_id: RaceId,
    },

    /// Click riders, in order. An empty winner slot fills first, then the
    /// bonus slot; clicking a selected rider clears it (clearing the
    /// winner clears both).
    Pick {
        #[clap(long, short)]
        race_id: RaceId,

        /// Rider IDs, applied in order.
        #[clap(required = true)]
        riders: Vec<RiderId>,
    },

    /// Validate and lock the selection.
    Submit {
        #[clap(long, short)]
        race_id: RaceId,
    },

    /// Reopen a confirmed bet for changes (before race start).
    Edit {
        #[clap(long, short)]
        race_id: RaceId,
    },

    /// Delete the bet and reset the selection.
    Delete {
        #[clap(long, short)]
        race_id: RaceId,

        /// Skip the confirmation prompt.
        #[clap(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TeamCmd {
    /// Current roster and team status for a grand tour.
    Show {
        #[clap(long, short)]
        race_id: RaceId,
    },

    /// Click riders, in order: on the roster removes, off the roster adds
    /// (up to 8; further adds are ignored).
    Pick {
        #[clap(long, short)]
        race_id: RaceId,

        /// Rider IDs, applied in order.
        #[clap(required = true)]
        riders: Vec<RiderId>,
    },

    /// Validate and lock the roster (exactly 8 riders).
    Submit {
        #[clap(long, short)]
        race_id: RaceId,
    },

    /// Reopen a confirmed roster for changes (before race start).
    Edit {
        #[clap(long, short)]
        race_id: RaceId,
    },

    /// Delete the team and reset the roster.
    Delete {
        #[clap(long, short)]
        race_id: RaceId,

        /// Skip the confirmation prompt.
        #[clap(long, short = 'y')]
        yes: bool,
    },
}
