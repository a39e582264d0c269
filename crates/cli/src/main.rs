//! questlog CLI - per-game task, note and resource tracker.

use anyhow::Result;
use clap::{Parser, Subcommand};
use questlog_board::{MoveOutcome, TaskBoard};
use questlog_core::{
    GameId, NoteId, NoteQuery, Preferences, ResourceId, ResourceQuery, TaskId, TaskKind,
    TaskStatus,
};
use questlog_library::{
    GameCatalog, NoteInput, NoteLibrary, ResourceInput, ResourceShelf, TagOp, TagScope,
};
use questlog_storage::{JsonStorage, Storage};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "questlog")]
#[command(about = "Track per-game tasks, notes and resources", long_about = None)]
struct Cli {
    /// Data directory (defaults to .questlog, or QUESTLOG_DIR)
    #[arg(long, env = "QUESTLOG_DIR", default_value = ".questlog")]
    dir: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage games
    Game {
        #[command(subcommand)]
        command: GameCommands,
    },
    /// Manage tasks on a game's board
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Manage bookmarked resources
    Resource {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Print a game's tag vocabulary
    Tags {
        /// Game ID (defaults to the last used game)
        #[arg(long)]
        game: Option<String>,
    },
}

#[derive(Subcommand)]
enum GameCommands {
    /// Add a game
    Add {
        /// Game title
        title: String,
    },
    /// List games
    List,
    /// Select the default game for later commands
    Use {
        /// Game ID
        id: String,
    },
    /// Rename a game
    Rename {
        /// Game ID
        id: String,
        /// New title
        title: String,
    },
    /// Replace a game's own tags
    Tag {
        /// Game ID
        id: String,
        /// Tags to set
        tags: Vec<String>,
    },
    /// Delete a game and everything attached to it
    Rm {
        /// Game ID
        id: String,
    },
    /// Edit the note/resource tag vocabulary
    Vocab {
        /// Game ID
        id: String,
        /// Vocabulary half: notes or resources
        #[arg(long, default_value = "notes")]
        scope: String,
        /// Tags to add
        #[arg(long)]
        add: Vec<String>,
        /// Tags to remove
        #[arg(long)]
        remove: Vec<String>,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task at the end of its column
    Add {
        /// Task text
        text: String,
        /// Column: daily, weekly or other
        #[arg(long, default_value = "daily")]
        kind: TaskKind,
        /// Game ID (defaults to the last used game)
        #[arg(long)]
        game: Option<String>,
    },
    /// List tasks in display order
    List {
        /// Game ID (defaults to the last used game)
        #[arg(long)]
        game: Option<String>,
    },
    /// Toggle a task between open and done
    Toggle {
        /// Task ID
        id: String,
    },
    /// Move a task to a new slot in its column
    Move {
        /// Task ID
        id: String,
        /// Target slot (0-based)
        index: usize,
        /// Game ID (defaults to the last used game)
        #[arg(long)]
        game: Option<String>,
    },
    /// Delete a task
    Rm {
        /// Task ID
        id: String,
    },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// Add a note
    Add {
        /// Note title
        title: String,
        /// Note body
        #[arg(long, default_value = "")]
        content: String,
        /// Tags to attach
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Game ID (defaults to the last used game)
        #[arg(long)]
        game: Option<String>,
    },
    /// Search notes
    Search {
        /// Title substring
        #[arg(long)]
        title: Option<String>,
        /// Tags that must all match
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Game ID (defaults to the last used game)
        #[arg(long)]
        game: Option<String>,
    },
    /// Delete a note
    Rm {
        /// Note ID
        id: String,
        /// Game ID (defaults to the last used game)
        #[arg(long)]
        game: Option<String>,
    },
}

#[derive(Subcommand)]
enum ResourceCommands {
    /// Add a resource
    Add {
        /// Display title
        title: String,
        /// Target URL
        url: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Tags to attach
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Game ID (defaults to the last used game)
        #[arg(long)]
        game: Option<String>,
    },
    /// Search resources
    Search {
        /// Substring matched against title or URL
        #[arg(long)]
        text: Option<String>,
        /// Tags that must all match
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Game ID (defaults to the last used game)
        #[arg(long)]
        game: Option<String>,
    },
    /// Delete a resource
    Rm {
        /// Resource ID
        id: String,
        /// Game ID (defaults to the last used game)
        #[arg(long)]
        game: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let storage = JsonStorage::new(&cli.dir).await?;
    let prefs = storage.load_preferences().await?;
    let storage = Arc::new(Mutex::new(storage));

    match cli.command {
        Commands::Game { command } => run_game(command, storage, &prefs).await,
        Commands::Task { command } => run_task(command, storage, &prefs).await,
        Commands::Note { command } => run_note(command, storage, &prefs).await,
        Commands::Resource { command } => run_resource(command, storage, &prefs).await,
        Commands::Tags { game } => {
            let game_id = resolve_game(game.as_deref(), &prefs)?;
            let catalog = GameCatalog::with_shared(storage);
            let vocab = catalog.vocabulary(game_id).await?;
            println!("note tags: {}", vocab.note_tags.join(", "));
            println!("resource tags: {}", vocab.resource_tags.join(", "));
            Ok(())
        }
    }
}

/// Pick the game from an explicit argument or fall back to the preference.
fn resolve_game(arg: Option<&str>, prefs: &Preferences) -> Result<GameId> {
    if let Some(s) = arg {
        return Ok(s.parse().map_err(|_| anyhow::anyhow!("Invalid game ID"))?);
    }
    prefs
        .last_game_id
        .ok_or_else(|| anyhow::anyhow!("No game selected; pass --game or run `questlog game use`"))
}

async fn run_game(
    command: GameCommands,
    storage: Arc<Mutex<JsonStorage>>,
    _prefs: &Preferences,
) -> Result<()> {
    let catalog = GameCatalog::with_shared(storage.clone());

    match command {
        GameCommands::Add { title } => {
            let game = catalog.create_game(title).await?;
            println!("Added game: {} - {}", game.id, game.title);
        }
        GameCommands::List => {
            let games = catalog.list_games().await?;
            println!("Games ({})", games.len());
            for game in games {
                println!("  {} | {}", game.id, game.title);
            }
        }
        GameCommands::Use { id } => {
            let game_id: GameId = id.parse().map_err(|_| anyhow::anyhow!("Invalid game ID"))?;
            // Validate before persisting the preference.
            let game = catalog.get_game(game_id).await?;
            let prefs = Preferences {
                last_game_id: Some(game.id),
            };
            storage.lock().await.save_preferences(&prefs).await?;
            println!("Using game: {}", game.title);
        }
        GameCommands::Rename { id, title } => {
            let game_id: GameId = id.parse().map_err(|_| anyhow::anyhow!("Invalid game ID"))?;
            let game = catalog.rename_game(game_id, title).await?;
            println!("Renamed game: {}", game.title);
        }
        GameCommands::Tag { id, tags } => {
            let game_id: GameId = id.parse().map_err(|_| anyhow::anyhow!("Invalid game ID"))?;
            let game = catalog.set_game_tags(game_id, &tags).await?;
            println!("Tags: {}", game.tags.join(", "));
        }
        GameCommands::Rm { id } => {
            let game_id: GameId = id.parse().map_err(|_| anyhow::anyhow!("Invalid game ID"))?;
            catalog.delete_game(game_id).await?;
            println!("Deleted game {game_id}");
        }
        GameCommands::Vocab {
            id,
            scope,
            add,
            remove,
        } => {
            let game_id: GameId = id.parse().map_err(|_| anyhow::anyhow!("Invalid game ID"))?;
            let scope = match scope.as_str() {
                "notes" => TagScope::Notes,
                "resources" => TagScope::Resources,
                other => anyhow::bail!("Unknown scope: {other}"),
            };
            if !add.is_empty() {
                catalog
                    .edit_vocabulary(game_id, scope, TagOp::Add, &add)
                    .await?;
            }
            if !remove.is_empty() {
                catalog
                    .edit_vocabulary(game_id, scope, TagOp::Remove, &remove)
                    .await?;
            }
            let vocab = catalog.vocabulary(game_id).await?;
            let tags = match scope {
                TagScope::Notes => vocab.note_tags,
                TagScope::Resources => vocab.resource_tags,
            };
            println!("Vocabulary: {}", tags.join(", "));
        }
    }
    Ok(())
}

async fn run_task(
    command: TaskCommands,
    storage: Arc<Mutex<JsonStorage>>,
    prefs: &Preferences,
) -> Result<()> {
    let board = TaskBoard::with_shared(storage);

    match command {
        TaskCommands::Add { text, kind, game } => {
            let game_id = resolve_game(game.as_deref(), prefs)?;
            let task = board.create_task(game_id, text, kind).await?;
            println!("Added task: {} - {}", task.id, task.text);
        }
        TaskCommands::List { game } => {
            let game_id = resolve_game(game.as_deref(), prefs)?;
            let tasks = board.list_tasks(game_id).await?;
            for kind in TaskKind::ALL {
                let column: Vec<_> = tasks.iter().filter(|t| t.kind == kind).collect();
                if column.is_empty() {
                    continue;
                }
                println!("{kind} tasks ({})", column.len());
                for task in column {
                    let mark = match task.status {
                        TaskStatus::Done => "x",
                        TaskStatus::Open => " ",
                    };
                    println!("  [{mark}] {} | {}", task.id, task.text);
                }
            }
        }
        TaskCommands::Toggle { id } => {
            let task_id: TaskId = id.parse().map_err(|_| anyhow::anyhow!("Invalid task ID"))?;
            let task = board.toggle_task(task_id).await?;
            println!(
                "{} is now {}",
                task.text,
                match task.status {
                    TaskStatus::Done => "done",
                    TaskStatus::Open => "open",
                }
            );
        }
        TaskCommands::Move { id, index, game } => {
            let game_id = resolve_game(game.as_deref(), prefs)?;
            let task_id: TaskId = id.parse().map_err(|_| anyhow::anyhow!("Invalid task ID"))?;
            match board.move_task(game_id, task_id, index).await? {
                MoveOutcome::Moved { position } => {
                    println!("Moved to slot {index} (position {position})");
                }
                MoveOutcome::Rebalanced { writes } => {
                    println!("Moved to slot {index} (column rebalanced, {writes} records updated)");
                }
            }
        }
        TaskCommands::Rm { id } => {
            let task_id: TaskId = id.parse().map_err(|_| anyhow::anyhow!("Invalid task ID"))?;
            board.delete_task(task_id).await?;
            println!("Deleted task {task_id}");
        }
    }
    Ok(())
}

async fn run_note(
    command: NoteCommands,
    storage: Arc<Mutex<JsonStorage>>,
    prefs: &Preferences,
) -> Result<()> {
    let library = NoteLibrary::with_shared(storage);

    match command {
        NoteCommands::Add {
            title,
            content,
            tags,
            game,
        } => {
            let game_id = resolve_game(game.as_deref(), prefs)?;
            let note = library
                .create_note(
                    game_id,
                    NoteInput {
                        title,
                        content,
                        tags,
                    },
                )
                .await?;
            println!("Added note: {} - {}", note.id, note.title);
        }
        NoteCommands::Search {
            title,
            tags,
            page,
            game,
        } => {
            let game_id = resolve_game(game.as_deref(), prefs)?;
            let mut query = NoteQuery::for_game(game_id);
            query.title = title;
            query.tags = tags;
            query.page = page;
            let results = library.search(&query).await?;
            println!(
                "Notes ({} total, page {}/{})",
                results.total, query.page, results.total_pages
            );
            for note in results.items {
                println!("  {} | {} [{}]", note.id, note.title, note.tags.join(", "));
            }
        }
        NoteCommands::Rm { id, game } => {
            let game_id = resolve_game(game.as_deref(), prefs)?;
            let note_id: NoteId = id.parse().map_err(|_| anyhow::anyhow!("Invalid note ID"))?;
            library.delete_note(game_id, note_id).await?;
            println!("Deleted note {note_id}");
        }
    }
    Ok(())
}

async fn run_resource(
    command: ResourceCommands,
    storage: Arc<Mutex<JsonStorage>>,
    prefs: &Preferences,
) -> Result<()> {
    let shelf = ResourceShelf::with_shared(storage);

    match command {
        ResourceCommands::Add {
            title,
            url,
            description,
            tags,
            game,
        } => {
            let game_id = resolve_game(game.as_deref(), prefs)?;
            let resource = shelf
                .create_resource(
                    game_id,
                    ResourceInput {
                        title,
                        url,
                        description,
                        tags,
                    },
                )
                .await?;
            println!("Added resource: {} - {}", resource.id, resource.title);
        }
        ResourceCommands::Search {
            text,
            tags,
            page,
            game,
        } => {
            let game_id = resolve_game(game.as_deref(), prefs)?;
            let mut query = ResourceQuery::for_game(game_id);
            query.text = text;
            query.tags = tags;
            query.page = page;
            let results = shelf.search(&query).await?;
            println!(
                "Resources ({} total, page {}/{})",
                results.total, query.page, results.total_pages
            );
            for resource in results.items {
                println!("  {} | {} | {}", resource.id, resource.title, resource.url);
            }
        }
        ResourceCommands::Rm { id, game } => {
            let game_id = resolve_game(game.as_deref(), prefs)?;
            let resource_id: ResourceId = id
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid resource ID"))?;
            shelf.delete_resource(game_id, resource_id).await?;
            println!("Deleted resource {resource_id}");
        }
    }
    Ok(())
}
