mod cli;
mod config;
mod replay;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    cli::run()
}
