//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use velo_pronos::{
    cli::{BetCmd, Commands, LeagueCmd, RaceCmd, TeamCmd, VeloPronos},
    commands::{auth, bet, leaderboard, leagues, races, team},
    Result,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr behind RUST_LOG; stdout stays clean output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let app = VeloPronos::parse();

    match app.command {
        Commands::Login { email, password } => auth::handle_login(&email, &password).await?,

        Commands::Register {
            pseudo,
            email,
            password,
        } => auth::handle_register(&pseudo, &email, &password).await?,

        Commands::Logout => auth::handle_logout().await?,

        Commands::Whoami => auth::handle_whoami().await?,

        Commands::Leagues { cmd } => match cmd {
            LeagueCmd::List => leagues::handle_list().await?,
            LeagueCmd::Show { league_id } => leagues::handle_show(league_id).await?,
            LeagueCmd::Create { name, description } => {
                leagues::handle_create(&name, description.as_deref()).await?
            }
            LeagueCmd::Join { invite } => leagues::handle_join(&invite).await?,
        },

        Commands::Races { cmd } => match cmd {
            RaceCmd::List {
                season,
                refresh,
                json,
            } => races::handle_list(season, refresh, json).await?,
            RaceCmd::Show { race_id, refresh } => races::handle_show(race_id, refresh).await?,
            RaceCmd::Import { slug } => races::handle_import(&slug).await?,
        },

        Commands::Startlist {
            race_id,
            search,
            refresh,
        } => races::handle_startlist(race_id, search.as_deref(), refresh).await?,

        Commands::Bet { cmd } => match cmd {
            BetCmd::Show { race_id } => bet::handle_show(race_id).await?,
            BetCmd::Pick { race_id, riders } => bet::handle_pick(race_id, &riders).await?,
            BetCmd::Submit { race_id } => bet::handle_submit(race_id).await?,
            BetCmd::Edit { race_id } => bet::handle_edit(race_id).await?,
            BetCmd::Delete { race_id, yes } => bet::handle_delete(race_id, yes).await?,
        },

        Commands::Team { cmd } => match cmd {
            TeamCmd::Show { race_id } => team::handle_show(race_id).await?,
            TeamCmd::Pick { race_id, riders } => team::handle_pick(race_id, &riders).await?,
            TeamCmd::Submit { race_id } => team::handle_submit(race_id).await?,
            TeamCmd::Edit { race_id } => team::handle_edit(race_id).await?,
            TeamCmd::Delete { race_id, yes } => team::handle_delete(race_id, yes).await?,
        },

        Commands::Leaderboard {
            race_id,
            league_id,
            global,
            json,
        } => leaderboard::handle_leaderboard(race_id, league_id, global, json).await?,

        Commands::Score { race_id } => leaderboard::handle_score(race_id).await?,
    }

    Ok(())
}
