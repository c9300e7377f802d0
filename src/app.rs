use chrono::Utc;

use crate::cli::{Cli, Commands, GameFields, ListArgs, PlayerCommands};
use crate::core::{
    GameId, Player, RawGame, StartingServer, aggregate, filter_by_opponent, normalize_game,
    normalize_games,
};
use crate::error::AppError;
use crate::output::{
    GamesReport, output_game_json, output_games_json, print_game_detail, print_games_report,
};
use crate::state::FilterState;
use crate::store::GameStore;
use crate::utils::Timezone;
use crate::validate::GameForm;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) store: &'a GameStore,
    pub(crate) timezone: Timezone,
}

impl CommandContext<'_> {
    /// The player games are shown and recorded for
    fn viewer(&self) -> Result<Player, AppError> {
        let username = self.cli.player.as_deref().ok_or(AppError::NoViewer)?;
        self.store.require_player(username)
    }

    fn print_game(&self, game: &RawGame) {
        if self.cli.json {
            println!("{}", output_game_json(game, self.timezone));
        } else {
            print_game_detail(game, self.timezone, self.cli.use_color());
        }
    }

    fn stored_game(&self, id: GameId) -> Result<RawGame, AppError> {
        self.store.game(id)?.ok_or(AppError::GameNotFound { id })
    }
}

/// An opponent filter naming the viewer would match every game
fn reject_own_name(opponent: &Player, viewer: &Player) -> Result<(), AppError> {
    if opponent.id == viewer.id {
        return Err(AppError::OwnOpponent {
            username: opponent.username.clone(),
        });
    }
    Ok(())
}

/// Pick the opponent to filter on: an explicit `--opponent` must exist and
/// not be the viewer, a remembered one that doesn't qualify is dropped with a
/// warning.
fn resolve_filter(
    ctx: &CommandContext<'_>,
    viewer: &Player,
    args: &ListArgs,
    state: &FilterState,
) -> Result<Option<Player>, AppError> {
    if let Some(name) = &args.opponent {
        let opponent = ctx.store.require_player(name)?;
        reject_own_name(&opponent, viewer)?;
        return Ok(Some(opponent));
    }
    if args.all {
        return Ok(None);
    }
    let Some(name) = &state.opponent else {
        return Ok(None);
    };
    match ctx.store.find_player(name)? {
        None => {
            log::warn!("Ignoring remembered filter for unknown player \"{name}\"");
            Ok(None)
        }
        Some(opponent) if opponent.id == viewer.id => {
            log::warn!("Ignoring remembered filter naming the current player \"{name}\"");
            Ok(None)
        }
        Some(opponent) => Ok(Some(opponent)),
    }
}

fn handle_games(ctx: &CommandContext<'_>, args: &ListArgs) -> Result<(), AppError> {
    let viewer = ctx.viewer()?;
    let state = FilterState::load(&ctx.cli.state_path())?;
    let filter = resolve_filter(ctx, &viewer, args, &state)?;

    let (deleted, mut active): (Vec<RawGame>, Vec<RawGame>) = ctx
        .store
        .games_for_player(viewer.id)?
        .into_iter()
        .partition(|g| g.is_deleted);
    if let Some(opponent) = &filter {
        log::debug!("Filtering games to opponent {}", opponent.username);
        active = filter_by_opponent(&active, opponent.id);
    }

    let normalized = normalize_games(&active, viewer.id, ctx.timezone);
    let overview = aggregate(&normalized);
    let deleted = normalize_games(&deleted, viewer.id, ctx.timezone);

    let report = GamesReport {
        player: &viewer,
        filter: filter.as_ref(),
        overview: &overview,
        deleted: &deleted,
        timezone: ctx.timezone,
    };
    if ctx.cli.json {
        println!("{}", output_games_json(&report));
    } else {
        print_games_report(&report, ctx.cli.use_color());
    }
    Ok(())
}

fn handle_show(ctx: &CommandContext<'_>, id: GameId) -> Result<(), AppError> {
    let game = ctx.stored_game(id)?;
    ctx.print_game(&game);
    Ok(())
}

fn handle_add(ctx: &CommandContext<'_>, fields: GameFields) -> Result<(), AppError> {
    let viewer = ctx.viewer()?;
    let roster = ctx.store.players()?;
    let command = GameForm::from(fields)
        .validate(&viewer, &roster, ctx.timezone, Utc::now())
        .map_err(AppError::Invalid)?;

    let id = ctx.store.insert_game(&command.to_new_game(viewer.id, true))?;
    if !ctx.cli.json {
        println!("Recorded game {id}");
    }
    ctx.print_game(&ctx.stored_game(id)?);
    Ok(())
}

/// The stored game as the form that would have produced it, from `viewer`'s side
fn form_for(game: &RawGame, viewer: &Player) -> GameForm {
    let normalized = normalize_game(game, viewer.id, Timezone::default());
    GameForm {
        opponent: Some(normalized.opponent.username),
        player_score: Some(normalized.player_score.to_string()),
        opponent_score: Some(normalized.opponent_score.to_string()),
        served: Some(
            match normalized.starting_server {
                StartingServer::Player => "player",
                StartingServer::Opponent => "opponent",
            }
            .to_string(),
        ),
        played_at: Some(game.played_at.to_rfc3339()),
    }
}

fn handle_edit(ctx: &CommandContext<'_>, id: GameId, fields: GameFields) -> Result<(), AppError> {
    let viewer = ctx.viewer()?;
    let existing = ctx.stored_game(id)?;
    if !existing.involves(viewer.id) {
        return Err(AppError::NotYourGame {
            game: id,
            player: viewer.id,
        });
    }

    let roster = ctx.store.players()?;
    let command = form_for(&existing, &viewer)
        .merged_with(GameForm::from(fields))
        .validate(&viewer, &roster, ctx.timezone, Utc::now())
        .map_err(AppError::Invalid)?;

    let viewer_is_player1 = existing.player1_id == viewer.id;
    ctx.store
        .update_game(id, &command.to_new_game(viewer.id, viewer_is_player1))?;
    if !ctx.cli.json {
        println!("Updated game {id}");
    }
    ctx.print_game(&ctx.stored_game(id)?);
    Ok(())
}

fn handle_set_deleted(ctx: &CommandContext<'_>, id: GameId, deleted: bool) -> Result<(), AppError> {
    let viewer = ctx.viewer()?;
    ctx.store.set_deleted(id, viewer.id, deleted)?;
    if ctx.cli.json {
        println!("{}", output_game_json(&ctx.stored_game(id)?, ctx.timezone));
    } else if deleted {
        println!("Deleted game {id}");
    } else {
        println!("Restored game {id}");
    }
    Ok(())
}

fn handle_players(ctx: &CommandContext<'_>, command: Option<PlayerCommands>) -> Result<(), AppError> {
    match command {
        Some(PlayerCommands::Add { username }) => {
            let player = ctx.store.add_player(&username)?;
            if ctx.cli.json {
                println!("{}", serde_json::to_string_pretty(&player)?);
            } else {
                println!("Added player {} ({})", player.username, player.id);
            }
        }
        Some(PlayerCommands::List) | None => {
            let players = ctx.store.players()?;
            if ctx.cli.json {
                println!("{}", serde_json::to_string_pretty(&players)?);
            } else if players.is_empty() {
                println!("No players yet. Add one with `pingstats players add <NAME>`.");
            } else {
                for player in players {
                    println!("{}", player.username);
                }
            }
        }
    }
    Ok(())
}

fn handle_filter(
    ctx: &CommandContext<'_>,
    opponent: Option<String>,
    clear: bool,
) -> Result<(), AppError> {
    let path = ctx.cli.state_path();
    let mut state = FilterState::load(&path)?;

    if clear {
        state.opponent = None;
        state.save(&path)?;
        println!("Filter cleared; showing all opponents");
    } else if let Some(name) = opponent {
        let player = ctx.store.require_player(&name)?;
        if ctx.cli.player.is_some() {
            reject_own_name(&player, &ctx.viewer()?)?;
        }
        println!("Showing only games against {}", player.username);
        state.opponent = Some(player.username);
        state.save(&path)?;
    } else {
        match &state.opponent {
            Some(name) => println!("Showing only games against {name}"),
            None => println!("Showing all opponents"),
        }
        if ctx.cli.player.is_some() {
            let viewer = ctx.viewer()?;
            let names: Vec<String> = ctx
                .store
                .opponents_of(viewer.id)?
                .into_iter()
                .map(|p| p.username)
                .collect();
            if !names.is_empty() {
                println!("Opponents of {}: {}", viewer.username, names.join(", "));
            }
        }
    }
    Ok(())
}

fn handle_seed(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let summary = ctx.store.seed(Utc::now())?;
    println!(
        "Added {} players and {} games",
        summary.players_added, summary.games_added
    );
    Ok(())
}

/// Run one CLI invocation
pub(crate) fn run(mut cli: Cli) -> Result<(), AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let store = GameStore::open(&cli.db_path())?;
    let command = cli
        .command
        .take()
        .unwrap_or_else(|| Commands::Games(ListArgs::default()));

    let ctx = CommandContext {
        cli: &cli,
        store: &store,
        timezone,
    };

    match command {
        Commands::Games(args) => handle_games(&ctx, &args),
        Commands::Show { id } => handle_show(&ctx, id),
        Commands::Add(fields) => handle_add(&ctx, fields),
        Commands::Edit { id, fields } => handle_edit(&ctx, id, fields),
        Commands::Delete { id } => handle_set_deleted(&ctx, id, true),
        Commands::Undelete { id } => handle_set_deleted(&ctx, id, false),
        Commands::Players { command } => handle_players(&ctx, command),
        Commands::Filter { opponent, clear } => handle_filter(&ctx, opponent, clear),
        Commands::Seed => handle_seed(&ctx),
    }
}
