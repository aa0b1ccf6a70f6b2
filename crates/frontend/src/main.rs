mod app;
mod auth;
mod client;
mod components;
mod pages;
mod storage;
mod theme;

use app::App;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_web::MakeWebConsoleWriter;

fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    yew::Renderer::<App>::new().render();
}

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());
    // A second init (hot reload) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(level)
        .with(fmt_layer)
        .try_init();
}
