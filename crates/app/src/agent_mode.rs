//! Headless `--agent` mode: a blocking synchronous loop that reads JSON
//! commands from stdin and writes JSON responses to stdout.
//!
//! ## Protocol
//!
//! Each line of stdin is a JSON object with a `"cmd"` discriminator.
//! Each line of stdout is a JSON response with `"protocol_version"` and
//! `"type"` fields. See [`layout::protocol`] for the full schema.

use std::io::{BufRead, Write};

use bevy::log::LogPlugin;
use bevy::prelude::*;

use layout::layout_actions::{ActionQueue, ActionResult, ActionResultLog, ActionSource, LayoutAction};
use layout::observation::LayoutObservation;
use layout::protocol::{
    action_response, make_response, AgentCommand, AgentResponse, ResponsePayload, PROTOCOL_VERSION,
};
use layout::rng::LayoutRng;
use layout::{LayoutError, LayoutPlugin};

/// A minimal Bevy app with the layout plugin and no rendering. Logs go to
/// stderr.
pub fn headless_app(seed: Option<u64>) -> App {
    let mut app = App::new();
    app.add_plugins(LogPlugin::default());
    add_layout(&mut app, seed);
    app
}

fn add_layout(app: &mut App, seed: Option<u64>) {
    app.add_plugins(MinimalPlugins);
    if let Some(seed) = seed {
        app.insert_resource(LayoutRng::from_seed_u64(seed));
    }
    app.add_plugins(LayoutPlugin);

    // Initial update so every resource is in place before the first command.
    app.update();
}

/// Queue one action, run one update so the executor processes it, and
/// return its result. An action the executor never recorded is reported as
/// an error rather than assumed to have succeeded.
pub fn run_action(app: &mut App, source: ActionSource, action: LayoutAction) -> ActionResult {
    let name = action.name();
    let before = app.world().resource::<ActionResultLog>().recorded();
    app.world_mut()
        .resource_mut::<ActionQueue>()
        .push(source, action);
    app.update();

    let log = app.world().resource::<ActionResultLog>();
    match log.last_result() {
        Some(result) if log.recorded() > before => result.clone(),
        _ => ActionResult::Error(LayoutError::NotExecuted(name.to_string())),
    }
}

pub fn run_agent_mode(seed: Option<u64>) {
    let mut app = headless_app(seed);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    // Send the "ready" message so the external program knows we are live.
    write_response(&mut stdout, &make_response(ResponsePayload::Ready));
    eprintln!("datacity agent mode v{PROTOCOL_VERSION} ready, waiting for commands on stdin");

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("stdin read error: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let cmd: AgentCommand = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => {
                let resp = make_response(ResponsePayload::Error {
                    message: format!("Parse error: {e}"),
                });
                write_response(&mut stdout, &resp);
                continue;
            }
        };

        let response = process_command(cmd, &mut app);
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        write_response(&mut stdout, &response);

        if is_goodbye {
            break;
        }
    }

    eprintln!("datacity agent mode shutting down");
}

fn write_response(out: &mut impl Write, response: &AgentResponse) {
    let line = match serde_json::to_string(response) {
        Ok(line) => line,
        Err(e) => {
            eprintln!("response serialization failed: {e}");
            return;
        }
    };
    let _ = writeln!(out, "{line}");
    let _ = out.flush();
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

fn process_command(cmd: AgentCommand, app: &mut App) -> AgentResponse {
    match cmd {
        AgentCommand::Observe => {
            let observation = LayoutObservation::from_world(app.world());
            make_response(ResponsePayload::Observation {
                observation: Box::new(observation),
            })
        }

        AgentCommand::BatchAct { actions } => {
            let results = actions
                .into_iter()
                .map(|action| run_action(app, ActionSource::Agent, action))
                .collect();
            make_response(ResponsePayload::BatchResult { results })
        }

        AgentCommand::Quit => make_response(ResponsePayload::Goodbye),

        other => match other.into_action() {
            Some(action) => action_response(run_action(app, ActionSource::Agent, action)),
            None => make_response(ResponsePayload::Error {
                message: "command has no layout action".to_string(),
            }),
        },
    }
}
