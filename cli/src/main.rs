mod commands;
mod report;
mod terminal;

use commands::{CommandLine, inventory};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);
    print::banner();

    inventory::inventory(&commands).await
}
