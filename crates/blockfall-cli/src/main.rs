mod command;
mod config;
mod input;
mod logging;
mod tui;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
