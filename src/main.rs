mod config;
mod core;
mod physics;
mod render;
mod types;
mod ui;

fn main() -> anyhow::Result<()> {
    ui::run()
}
