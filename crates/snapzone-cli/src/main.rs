mod command;
mod ingest;
mod report;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
