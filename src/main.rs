//! Application entry point: resolves the launcher's session parameters, runs one session in a
//! Bevy app, and reports back to the launcher once every resource has been released.
//!
//! The launcher reads exactly one line from stdout: `session ended` after a normal `Won`/`Quit`,
//! or `session failed: <reason>` when the session could not run. The exit code mirrors it.

mod app;
mod apparition;
mod background;
mod collision;
mod config;
mod error;
mod input;
mod level;
mod physics;
mod player;
mod session;
mod state;
mod ui;

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use app::DreamPlatformerPlugin;
use bevy::prelude::*;
use bevy::window::{ExitCondition, Window, WindowResolution};
use clap::Parser;
use config::{SessionArgs, SessionParams};
use error::SessionError;
use level::{Level, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use session::Session;

const WINDOW_TITLE: &str = "SMM64_Dream.z64";

fn main() -> ExitCode {
    let args = match SessionArgs::try_parse() {
        Ok(args) => args,
        // --help and --version are not failures.
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            return signal_launcher(Err(err.into()));
        }
    };
    let params = args.resolve();

    if args.dump_level {
        return match dump_level(&params) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        };
    }

    signal_launcher(run_session(params))
}

fn dump_level(params: &SessionParams) -> Result<(), SessionError> {
    let json = serde_json::to_string_pretty(&Level::from_seed(params.seed))?;
    println!("{json}");
    Ok(())
}

/// Runs the app to completion. The app is dropped before this returns, so the window is gone by
/// the time the launcher hears about it.
fn run_session(params: SessionParams) -> Result<(), SessionError> {
    let exit = panic::catch_unwind(AssertUnwindSafe(|| build_app(params).run()));

    match exit {
        Ok(AppExit::Success) => Ok(()),
        Ok(AppExit::Error(code)) => Err(SessionError::AbnormalExit(code.get())),
        // Window or renderer setup panicked inside Bevy; the hook already printed it to stderr.
        Err(payload) => Err(SessionError::from_panic(payload)),
    }
}

fn build_app(params: SessionParams) -> App {
    // Fixed 768×432 logical canvas; the simulation's screen space maps onto it 1:1.
    let primary_window = Window {
        title: format!("{WINDOW_TITLE} - {}", params.level_name),
        resolution: WindowResolution::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
        resizable: false,
        ..default()
    };

    // Close requests are routed into the session as a quit signal instead of closing the window
    // behind its back, so teardown always goes through the same `Quit` path.
    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(primary_window),
        exit_condition: ExitCondition::OnPrimaryClosed,
        close_when_requested: false,
    });

    let mut app = App::new();
    app.insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Session::new(params))
        .add_plugins(default_plugins)
        .add_plugins(DreamPlatformerPlugin);
    app
}

fn signal_launcher(outcome: Result<(), SessionError>) -> ExitCode {
    let (line, code) = match outcome {
        Ok(()) => ("session ended".to_owned(), ExitCode::SUCCESS),
        Err(err) => (format!("session failed: {err}"), ExitCode::FAILURE),
    };

    let mut stdout = std::io::stdout().lock();
    if writeln!(stdout, "{line}").and_then(|()| stdout.flush()).is_err() {
        return ExitCode::FAILURE;
    }
    code
}
