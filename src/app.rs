use std::io::{self, IsTerminal};
use std::sync::Arc;

use chrono::{TimeDelta, Utc};

use crate::api::{ChatBackend, HttpBackend};
use crate::cli::{Action, Cli};
use crate::config::Config;
use crate::consts::GREETING_AGE;
use crate::core::{ChatState, NameGate, TurnResult, dispatch};
use crate::error::AppError;
use crate::logging;
use crate::output::{
    StatusReport, ThreadView, ViewOptions, output_status_json, output_thread_json,
    print_status_table,
};
use crate::repl::{RenderMode, run_chat};
use crate::store::FileStore;
use crate::utils::Timezone;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) config: &'a Config,
    pub(crate) store: &'a FileStore,
    pub(crate) timezone: Timezone,
}

impl CommandContext<'_> {
    fn view(&self) -> ThreadView<'_> {
        ThreadView::new(
            self.cli.peer(),
            ViewOptions {
                use_color: self.cli.use_color(),
                time_style: self.cli.time_style(),
                timezone: self.timezone,
                width: self.cli.width(),
            },
        )
    }

    fn backend(&self) -> HttpBackend {
        HttpBackend::new(self.cli.endpoint(), self.cli.timeout())
    }

    fn new_state(&self, user_name: String) -> ChatState {
        let state = ChatState::new(user_name);
        match self.config.greeting() {
            Some(greeting) => {
                let age = TimeDelta::from_std(GREETING_AGE).unwrap_or_default();
                state.with_greeting(greeting, Utc::now() - age)
            }
            None => state,
        }
    }
}

fn handle_chat(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let gate = NameGate::new(ctx.store);
    let Some(name) = gate.prompt(io::stdin().lock(), io::stdout())? else {
        return Ok(());
    };

    let backend = ctx.backend();
    tracing::debug!(user = %name, endpoint = backend.endpoint(), "starting chat");
    let backend: Arc<dyn ChatBackend> = Arc::new(backend);

    let mode = if io::stdout().is_terminal() {
        RenderMode::Redraw
    } else {
        RenderMode::Append
    };
    run_chat(ctx.new_state(name), backend, ctx.view(), mode)
}

fn handle_send(ctx: &CommandContext<'_>, text: &str) -> Result<(), AppError> {
    let name = NameGate::new(ctx.store).stored().ok_or(AppError::NoName)?;
    if text.trim().is_empty() {
        return Err(AppError::EmptyMessage);
    }

    let backend = ctx.backend();
    let mut state = ctx.new_state(name);
    if dispatch(&mut state, &backend, text) == Some(TurnResult::Dropped) {
        tracing::debug!("no reply for this turn");
    }

    if ctx.cli.json {
        println!("{}", output_thread_json(&state, ctx.cli.peer()));
    } else {
        println!(
            "{}",
            ctx.view()
                .render(state.messages(), state.is_typing(), Utc::now())
        );
    }
    Ok(())
}

fn handle_name(ctx: &CommandContext<'_>, action: Action) -> Result<(), AppError> {
    let gate = NameGate::new(ctx.store);
    match action {
        Action::SetName(raw) => {
            let name = gate.accept(&raw)?;
            println!("Display name set to {name}");
        }
        Action::ResetName => {
            gate.forget()?;
            println!("Display name cleared.");
        }
        _ => match gate.stored() {
            Some(name) => println!("{name}"),
            None => println!("No display name set."),
        },
    }
    Ok(())
}

fn handle_status(ctx: &CommandContext<'_>) {
    let report = StatusReport {
        user: NameGate::new(ctx.store).stored(),
        peer: ctx.cli.peer().to_string(),
        endpoint: ctx.cli.endpoint().to_string(),
        timeout: ctx.cli.timeout(),
        greeting: ctx.config.greeting().map(str::to_string),
        time_style: ctx.cli.time_style().as_str(),
        timezone: ctx.timezone.label(),
        config_file: ctx.config.source.clone(),
        store_file: ctx.store.path().to_path_buf(),
        log_file: logging::log_path(ctx.config.log_file.as_deref()),
    };
    if ctx.cli.json {
        println!("{}", output_status_json(&report));
    } else {
        print_status_table(&report, ctx.cli.use_color());
    }
}

pub(crate) fn run(action: Action, cli: &Cli, config: &Config) -> Result<(), AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let store = FileStore::open_default()?;
    let ctx = CommandContext {
        cli,
        config,
        store: &store,
        timezone,
    };

    match action {
        Action::Chat => handle_chat(&ctx),
        Action::Send(text) => handle_send(&ctx, &text),
        Action::Status => {
            handle_status(&ctx);
            Ok(())
        }
        name_action => handle_name(&ctx, name_action),
    }
}
