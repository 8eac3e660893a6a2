use std::path::Path;

use anyhow::Context;
use hoptale_common::config::Config;
use hoptale_core::narrate;
use tracing::info;

use crate::commands::load_trace;
use crate::hprint;
use crate::terminal::print;

pub fn narrate_trace(path: &Path, cfg: &Config) -> anyhow::Result<()> {
    let trace = load_trace(path)?;
    let paragraphs = narrate(&trace.hops, cfg)
        .with_context(|| format!("cannot narrate {}", path.display()))?;

    info!("narrative has {} paragraphs", paragraphs.len());
    print::banner();
    print::header("your packet's journey");

    for (idx, paragraph) in paragraphs.iter().enumerate() {
        if idx > 0 {
            hprint!();
        }
        print::print_status(paragraph.as_str());
    }

    print::end_of_program();
    Ok(())
}
