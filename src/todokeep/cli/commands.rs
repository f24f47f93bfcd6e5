use super::render::{
    print_messages, render_config, render_deleted_list, render_greeting, render_status,
    render_todo_list,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use log::{debug, warn};
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;
use todokeep::api::{ConfigAction, TodoKeepApi};
use todokeep::clock::SystemClock;
use todokeep::config::TodoKeepConfig;
use todokeep::error::{Result, TodoKeepError};
use todokeep::model::TodoFilter;
use todokeep::store::fs_backend::FsBackend;

const HOME_ENV: &str = "TODOKEEP_HOME";

struct AppContext {
    api: TodoKeepApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context()?;

    match cli.command {
        Some(Commands::Name { name }) => handle_name(&ctx, name.join(" ")),
        Some(Commands::Add { text }) => handle_add(&ctx, text.join(" ")),
        Some(Commands::List { filter }) => handle_list(&ctx, filter),
        Some(Commands::Toggle { indexes }) => handle_toggle(&ctx, indexes),
        Some(Commands::Edit { index, text }) => handle_edit(&ctx, index, text.join(" ")),
        Some(Commands::Delete { indexes }) => handle_delete(&ctx, indexes),
        Some(Commands::ClearCompleted) => handle_clear_completed(&ctx),
        Some(Commands::Trash) => handle_trash(&ctx),
        Some(Commands::Restore { indexes, all }) => handle_restore(&ctx, indexes, all),
        Some(Commands::Purge { indexes, yes }) => handle_purge(&ctx, indexes, yes),
        Some(Commands::Sweep) => handle_sweep(&ctx),
        Some(Commands::Status) => handle_status(&ctx),
        Some(Commands::Reset { yes }) => handle_reset(&ctx, yes),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, TodoFilter::All),
    }
}

// RUST_LOG wins over the flag.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("com", "todokeep", "todokeep")
        .ok_or_else(|| TodoKeepError::Config("Could not determine data directory".into()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn init_context() -> Result<AppContext> {
    let dir = data_dir()?;
    debug!("Using data directory {}", dir.display());

    let config = TodoKeepConfig::load(&dir).unwrap_or_else(|e| {
        warn!("Ignoring unreadable config: {}", e);
        TodoKeepConfig::default()
    });

    let backend = FsBackend::new(dir.clone()).with_quota(config.storage_quota_bytes);
    let api = TodoKeepApi::new(
        backend,
        Rc::new(SystemClock),
        config.trash_policy(),
        dir,
    );
    Ok(AppContext { api })
}

fn handle_name(ctx: &AppContext, name: String) -> Result<()> {
    let result = ctx.api.set_user_name(&name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &AppContext, text: String) -> Result<()> {
    let result = ctx.api.add_todo(&text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, filter: TodoFilter) -> Result<()> {
    let result = ctx.api.list_todos(filter)?;
    print!("{}", render_greeting(result.user_name.as_deref()));
    print!("{}", render_todo_list(&result.listed_todos, ctx.api.now()));
    print_messages(&result.messages);

    let in_trash = ctx.api.trash_count();
    if in_trash > 0 {
        println!();
        println!("{} recently deleted (see `todokeep trash`)", in_trash);
    }
    Ok(())
}

fn handle_toggle(ctx: &AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.toggle_todos(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &AppContext, index: String, text: String) -> Result<()> {
    let result = ctx.api.update_todo(&index, &text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_todos(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear_completed(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.clear_completed()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_trash(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_deleted()?;
    let policy = ctx.api.trash_policy();
    print!(
        "{}",
        render_deleted_list(&result.listed_deleted, &policy, ctx.api.now())
    );
    print_messages(&result.messages);
    Ok(())
}

fn handle_restore(ctx: &AppContext, indexes: Vec<String>, all: bool) -> Result<()> {
    if indexes.is_empty() && !all {
        return Err(TodoKeepError::Api(
            "Give the indexes to restore (e.g. d1), or --all".into(),
        ));
    }
    let result = ctx.api.restore_todos(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_purge(ctx: &AppContext, indexes: Vec<String>, yes: bool) -> Result<()> {
    let prompt = if indexes.is_empty() {
        "This will permanently remove everything in recently deleted.".to_string()
    } else {
        format!("This will permanently remove {}.", indexes.join(" "))
    };
    if !yes && !confirm(&prompt)? {
        println!("Operation cancelled.");
        return Ok(());
    }

    let result = if indexes.is_empty() {
        ctx.api.empty_trash()?
    } else {
        ctx.api.purge_deleted(&indexes)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_sweep(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.sweep_trash()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.status()?;
    if let Some(report) = &result.status {
        print!("{}", render_status(report, ctx.api.now()));
        println!("Data directory:   {}", ctx.api.data_dir().display());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset(ctx: &AppContext, yes: bool) -> Result<()> {
    if !yes && !confirm("This will remove your name, all todos and recently deleted.")? {
        println!("Operation cancelled.");
        return Ok(());
    }
    let result = ctx.api.reset()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    println!("{}", prompt);
    print!("[Y] To continue: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim() == "Y")
}
