use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use layout::layout_actions::{ActionResult, ActionSource, LayoutAction};

mod agent_mode;

#[derive(Parser, Debug)]
#[command(name = "datacity")]
#[command(about = "Headless Data City layout engine")]
struct Args {
    /// Drive the layout over newline-delimited JSON on stdin/stdout
    #[arg(long)]
    agent: bool,

    /// Building records CSV to import, auto-map and commit; the resulting
    /// buildings are printed as JSON
    csv: Option<PathBuf>,

    /// Seed for link colours (defaults to 42)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.agent {
        agent_mode::run_agent_mode(args.seed);
        return ExitCode::SUCCESS;
    }

    let Some(path) = args.csv else {
        let _ = Args::command().print_help();
        return ExitCode::FAILURE;
    };

    match import_and_commit(&path, args.seed) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("datacity: {}: {message}", path.display());
            ExitCode::FAILURE
        }
    }
}

/// Import a building CSV, auto-map one block per record, commit, and return
/// the synthesized city as pretty JSON.
fn import_and_commit(path: &Path, seed: Option<u64>) -> Result<String, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let mut app = agent_mode::headless_app(seed);

    let steps = [
        LayoutAction::ImportBuildingsCsv { text },
        LayoutAction::AutoLayout,
        LayoutAction::CommitBlueprint,
    ];
    for action in steps {
        match agent_mode::run_action(&mut app, ActionSource::Player, action) {
            ActionResult::Error(e) => return Err(e.to_string()),
            ActionResult::SuccessWithWarning(w) => eprintln!("warning: {w}"),
            ActionResult::Success => {}
        }
    }

    let city = app.world().resource::<layout::world::CityWorld>();
    serde_json::to_string_pretty(city.buildings()).map_err(|e| e.to_string())
}
