mod app;
mod catalog;
mod commands;
mod config;
mod facts;
mod mpris;
mod player;
mod runtime;
mod theme;
mod transport;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    colog::init();
    runtime::run()
}
