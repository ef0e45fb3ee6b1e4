use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use portal_core::{update, AppState, Msg};
use portal_engine::{EngineHandle, EngineServices, PortalConfig};
use portal_logging::{portal_debug, portal_info};

use super::effects::EffectRunner;
use super::ui;
use super::ui::console::ConsolePainter;
use super::ui::input::ConsoleAction;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

enum LoopInput {
    Msg(Msg),
    /// Blank line at the prompt.
    Repaint,
    Help,
    Unknown(String),
    Quit,
}

pub fn run_app(config: PortalConfig) -> Result<()> {
    let services =
        EngineServices::from_config(&config).context("setting up the wallet and program clients")?;
    let engine = EngineHandle::new(services).context("starting the engine thread")?;

    let (input_tx, input_rx) = mpsc::channel::<LoopInput>();
    let effect_tx = input_tx.clone();
    let runner = EffectRunner::new(engine, move |msg| {
        effect_tx.send(LoopInput::Msg(msg)).is_ok()
    });
    spawn_stdin_reader(input_tx.clone())?;

    // Background tick to coalesce repaints.
    let tick_tx = input_tx;
    thread::spawn(move || {
        while tick_tx.send(LoopInput::Msg(Msg::Tick)).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    let mut painter = ConsolePainter::stdout();
    let mut state = dispatch(AppState::new(), Msg::Started, &runner);

    for input in input_rx {
        match input {
            LoopInput::Msg(Msg::Tick) => {
                state = dispatch(state, Msg::Tick, &runner);
                if state.consume_dirty() {
                    paint(&mut painter, &state)?;
                }
            }
            LoopInput::Msg(msg) => state = dispatch(state, msg, &runner),
            LoopInput::Repaint => paint(&mut painter, &state)?,
            LoopInput::Help => {
                painter.print_block(ui::constants::HELP_TEXT)?;
                paint(&mut painter, &state)?;
            }
            LoopInput::Unknown(command) => {
                painter.print_block(&format!("Unknown command `{command}`. Type /help."))?;
                paint(&mut painter, &state)?;
            }
            LoopInput::Quit => break,
        }
    }

    portal_info!("Shutting down");
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    portal_debug!("dispatch {:?}", msg);
    let (state, effects) = update(state, msg);
    runner.enqueue(effects);
    state
}

fn paint(painter: &mut ConsolePainter<io::Stdout>, state: &AppState) -> Result<()> {
    let frame = ui::render::render(&state.view());
    painter.paint(&frame).context("writing to the console")
}

fn spawn_stdin_reader(tx: mpsc::Sender<LoopInput>) -> Result<()> {
    thread::Builder::new()
        .name("portal-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                let inputs = match ui::input::parse_line(&line) {
                    ConsoleAction::Dispatch(msgs) if msgs.is_empty() => vec![LoopInput::Repaint],
                    ConsoleAction::Dispatch(msgs) => msgs.into_iter().map(LoopInput::Msg).collect(),
                    ConsoleAction::Help => vec![LoopInput::Help],
                    ConsoleAction::Unknown(command) => vec![LoopInput::Unknown(command)],
                    ConsoleAction::Quit => vec![LoopInput::Quit],
                };
                for input in inputs {
                    if tx.send(input).is_err() {
                        return;
                    }
                }
            }
            // End of input behaves like /quit.
            let _ = tx.send(LoopInput::Quit);
        })
        .context("starting the console reader")?;
    Ok(())
}
