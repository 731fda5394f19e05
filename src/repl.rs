//! Interactive chat session
//!
//! Three kinds of thread take part. A reader turns stdin lines into events,
//! one worker per turn runs the network call, and the controller (the
//! caller) owns the `ChatState` and applies events in the order they arrive.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use chrono::Utc;

use crate::api::ChatBackend;
use crate::core::{ChatState, TurnOutcome, spawn_turn};
use crate::error::AppError;
use crate::output::{ThreadView, rows};

const HELP: &str = "Commands: /help  /whoami  /quit";

#[derive(Debug)]
pub(crate) enum Event {
    Input(String),
    InputClosed,
    Reply(TurnOutcome),
}

impl From<TurnOutcome> for Event {
    fn from(outcome: TurnOutcome) -> Self {
        Event::Reply(outcome)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Send(&'a str),
    Help,
    WhoAmI,
    Quit,
    Nothing,
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "" => Command::Nothing,
        "/quit" | "/exit" => Command::Quit,
        "/help" => Command::Help,
        "/whoami" => Command::WhoAmI,
        _ => Command::Send(line),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenderMode {
    /// Clear the screen and draw the whole thread on every change
    Redraw,
    /// Print only rows that are new since the last refresh
    Append,
}

pub(crate) struct LiveRenderer<'a, W: Write> {
    out: W,
    view: ThreadView<'a>,
    mode: RenderMode,
    shown: usize,
    typing_shown: bool,
    started: bool,
    pending_notice: Option<String>,
}

impl<'a, W: Write> LiveRenderer<'a, W> {
    pub(crate) fn new(out: W, view: ThreadView<'a>, mode: RenderMode) -> Self {
        Self {
            out,
            view,
            mode,
            shown: 0,
            typing_shown: false,
            started: false,
            pending_notice: None,
        }
    }

    fn refresh(&mut self, state: &ChatState) -> io::Result<()> {
        let now = Utc::now();
        match self.mode {
            RenderMode::Redraw => {
                write!(
                    self.out,
                    "\x1b[2J\x1b[H{}\n\n",
                    self.view.render(state.messages(), state.is_typing(), now)
                )?;
                if let Some(notice) = &self.pending_notice {
                    writeln!(self.out, "{notice}")?;
                }
                write!(self.out, "> ")?;
            }
            RenderMode::Append => {
                if !self.started {
                    writeln!(self.out, "{}\n", self.view.header(false))?;
                    self.started = true;
                }
                let fresh = &state.messages()[self.shown..];
                for row in rows(fresh, state.is_typing() && !self.typing_shown) {
                    writeln!(self.out, "{}\n", self.view.render_row(row, now))?;
                }
                self.shown = state.messages().len();
                self.typing_shown = state.is_typing();
            }
        }
        self.out.flush()
    }

    fn notice(&mut self, text: String, state: &ChatState) -> io::Result<()> {
        match self.mode {
            RenderMode::Redraw => {
                self.pending_notice = Some(text);
                self.refresh(state)
            }
            RenderMode::Append => {
                writeln!(self.out, "{text}\n")?;
                self.out.flush()
            }
        }
    }
}

fn spawn_input_reader(events: Sender<Event>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if events.send(Event::Input(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stopped reading input");
                    break;
                }
            }
        }
        let _ = events.send(Event::InputClosed);
    });
}

/// Drive the session until `/quit`, or until input ends and every
/// outstanding reply has come back.
pub(crate) fn run_loop<W: Write>(
    state: &mut ChatState,
    backend: &Arc<dyn ChatBackend>,
    events: &Receiver<Event>,
    replies: &Sender<Event>,
    renderer: &mut LiveRenderer<'_, W>,
) -> Result<(), AppError> {
    let mut in_flight = 0usize;
    let mut input_open = true;
    renderer.refresh(state)?;

    while input_open || in_flight > 0 {
        let Ok(event) = events.recv() else {
            break;
        };
        match event {
            Event::Input(line) => match parse_command(&line) {
                Command::Nothing => continue,
                Command::Quit => break,
                Command::Help => renderer.notice(HELP.to_string(), state)?,
                Command::WhoAmI => {
                    renderer.notice(format!("You are {}", state.user_name()), state)?
                }
                Command::Send(text) => {
                    if let Some(request) = state.begin_turn(text) {
                        spawn_turn(Arc::clone(backend), request, replies.clone());
                        in_flight += 1;
                        renderer.pending_notice = None;
                        renderer.refresh(state)?;
                    }
                }
            },
            Event::InputClosed => {
                input_open = false;
                if in_flight > 0 {
                    tracing::debug!(in_flight, "input closed, waiting for replies");
                }
            }
            Event::Reply(outcome) => {
                in_flight = in_flight.saturating_sub(1);
                state.settle_turn(outcome);
                renderer.refresh(state)?;
            }
        }
    }

    if renderer.mode == RenderMode::Redraw {
        writeln!(renderer.out)?;
    }
    Ok(())
}

/// Run the interactive session on stdin/stdout
pub(crate) fn run_chat(
    mut state: ChatState,
    backend: Arc<dyn ChatBackend>,
    view: ThreadView<'_>,
    mode: RenderMode,
) -> Result<(), AppError> {
    let (tx, rx) = mpsc::channel();
    spawn_input_reader(tx.clone());

    let stdout = io::stdout();
    let mut renderer = LiveRenderer::new(stdout.lock(), view, mode);
    run_loop(&mut state, &backend, &rx, &tx, &mut renderer)
}
