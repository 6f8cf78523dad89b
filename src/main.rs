#[macro_use]
extern crate derive_more;

use ggez::{event::run, ContextBuilder};
use tracing_subscriber::EnvFilter;

use crate::app::{App, AppError, AppErrorConversion, AppResult, Prefs};

mod app;
mod basic;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> AppResult {
    init_tracing();

    let app = App::new(Prefs::default()).with_trace_step("main")?;

    let (ctx, event_loop) = ContextBuilder::new("grid_snake", "gorilskij")
        .window_mode(app.wm())
        .window_setup(app.ws())
        .build()
        .map_err(AppError::from)
        .with_trace_step("building context")?;

    run(ctx, event_loop, app)
}
