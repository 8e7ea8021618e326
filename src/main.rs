//! Binary entry point: resolve configuration, open the store, then run either
//! a one-shot command or the terminal UI.
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use feihua::config::{ListArgs, ShowArgs};
use feihua::{
    detail_markdown, init_logging, open_database, preview_markdown, run_app, App, Cli, Command,
    Config, PoemStore, Search,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    init_logging(&config.log_target)?;

    let conn = open_database(&config.db_path)?;
    let mut store = PoemStore::open_or_seed(conn)?;
    info!(db = %config.db_path.display(), poems = store.len(), "store ready");

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let mut app = App::new(store);
            run_app(&mut app)
        }
        Command::List(args) => list(&store, &args),
        Command::Show(args) => show(&store, &args),
        Command::Import { file } => import(&mut store, &file),
        Command::Export { file } => export(&store, &file),
    }
}

fn list(store: &PoemStore, args: &ListArgs) -> Result<()> {
    let search = Search::parse(&args.rule.join(" "), args.favorites);
    let mut out = io::stdout().lock();
    for poem in store.filter(&search) {
        if args.preview {
            writeln!(out, "{}\n", preview_markdown(poem, &search))?;
        } else {
            writeln!(out, "{}", poem.abstract_line())?;
        }
    }
    out.flush()?;
    Ok(())
}

fn show(store: &PoemStore, args: &ShowArgs) -> Result<()> {
    let poem = store
        .get(args.id)
        .ok_or_else(|| anyhow!("no poem numbered {}", args.id))?;
    let search = Search::parse(&args.rule.join(" "), false);
    println!("{}", detail_markdown(poem, &search));
    Ok(())
}

fn import(store: &mut PoemStore, path: &Path) -> Result<()> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let count = store.import(BufReader::new(file))?;
    println!("imported {count} poems from {}", path.display());
    Ok(())
}

fn export(store: &PoemStore, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let count = store.export(BufWriter::new(file))?;
    println!("exported {count} poems to {}", path.display());
    Ok(())
}
