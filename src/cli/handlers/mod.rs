use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::paths::DataPaths;
use crate::model::{HistoryId, ItemId, normalize_content};
use crate::store::{Gateway, SqliteGateway};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run one subcommand against the store at `paths.db`.
pub fn dispatch(command: Commands, json: bool, paths: &DataPaths) -> CmdResult {
    let mut gw = SqliteGateway::open(&paths.db)?;

    match command {
        // Read commands
        Commands::List(args) => cmd_list(&gw, args, json),
        Commands::History(args) => cmd_history(&gw, args, json),

        // Write commands
        Commands::Add(args) => cmd_add(&mut gw, args, json),
        Commands::Done(args) => cmd_done(&mut gw, args, json),
        Commands::Restore(args) => cmd_restore(&mut gw, args, json),
        Commands::Edit(args) => cmd_edit(&mut gw, args, json),
        Commands::Rm(args) => cmd_rm(&mut gw, args),
        Commands::ClearHistory(args) => cmd_clear_history(&mut gw, args, json),
    }
}

fn print_id(id: i64, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string(&IdJson { id })?);
    } else {
        println!("{}", id);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(gw: &impl Gateway, args: FilterArgs, json: bool) -> CmdResult {
    let keyword = args.search.as_deref().unwrap_or("").trim();
    let items = gw.search_items(keyword)?;

    if json {
        let items: Vec<ItemJson> = items.iter().map(item_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in &items {
            println!("{}", format_item_line(item));
        }
        println!("{}", format_count(items.len(), "Todos"));
    }
    Ok(())
}

fn cmd_history(gw: &impl Gateway, args: FilterArgs, json: bool) -> CmdResult {
    let keyword = args.search.as_deref().unwrap_or("").trim();
    let items = gw.search_history(keyword)?;

    if json {
        let items: Vec<HistoryJson> = items.iter().map(history_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in &items {
            println!("{}", format_history_line(item));
        }
        println!("{}", format_count(items.len(), "Histories"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(gw: &mut impl Gateway, args: AddArgs, json: bool) -> CmdResult {
    let text = args.text.join(" ");
    let id = gw.create_item(&text)?;
    print_id(id.0, json)
}

fn cmd_done(gw: &mut impl Gateway, args: IdArgs, json: bool) -> CmdResult {
    let id = ItemId(args.id);
    let item = gw
        .find_item(id)?
        .ok_or_else(|| format!("no to-do with id {}", id))?;
    let history_id = gw
        .archive_item(id, &item.content)?
        .ok_or_else(|| format!("no to-do with id {}", id))?;
    print_id(history_id.0, json)
}

fn cmd_restore(gw: &mut impl Gateway, args: IdArgs, json: bool) -> CmdResult {
    let id = HistoryId(args.id);
    let entry = gw
        .find_history(id)?
        .ok_or_else(|| format!("no history entry with id {}", id))?;
    let item_id = gw
        .restore_item(id, &entry.content)?
        .ok_or_else(|| format!("no history entry with id {}", id))?;
    print_id(item_id.0, json)
}

fn cmd_edit(gw: &mut impl Gateway, args: EditArgs, json: bool) -> CmdResult {
    let id = ItemId(args.id);
    let text = args.text.join(" ");
    let content = normalize_content(&text).ok_or("new text is empty")?;
    if gw.find_item(id)?.is_none() {
        return Err(format!("no to-do with id {}", id).into());
    }
    gw.update_item_content(id, content)?;
    print_id(id.0, json)
}

/// Unknown ids are not an error.
fn cmd_rm(gw: &mut impl Gateway, args: RmArgs) -> CmdResult {
    if args.history {
        gw.delete_history(HistoryId(args.id))?;
    } else {
        gw.delete_item(ItemId(args.id))?;
    }
    Ok(())
}

fn cmd_clear_history(gw: &mut impl Gateway, args: ClearHistoryArgs, json: bool) -> CmdResult {
    if !args.yes {
        return Err("refusing to clear history without --yes".into());
    }
    gw.clear_history()?;
    if json {
        println!("{}", serde_json::to_string(&ClearedJson { cleared: true })?);
    }
    Ok(())
}
