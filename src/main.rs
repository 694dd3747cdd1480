use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = fileutils::cli::parse();
    app::run(args)
}
