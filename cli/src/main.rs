mod commands;
mod terminal;

use commands::{CommandLine, Commands, narrate, summary};
use terminal::logging;

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    match commands.command {
        Commands::Narrate {
            trace,
            hosting,
            server,
        } => {
            let cfg = server.config(&hosting);
            narrate::narrate_trace(&trace, &cfg)
        }
        Commands::Summary {
            trace,
            hosting,
            json,
        } => summary::summarize_trace(&trace, &hosting.provider(), json),
    }
}
