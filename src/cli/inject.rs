//! Inject command - print what a host would load for a view.

use anyhow::Result;

use crate::config::AppConfig;
use crate::debug;
use crate::inject::{WebContent, inject};

use super::InjectArgs;
use super::sync::open_library;

/// Run the inject command
pub fn run_inject(config: &AppConfig, args: &InjectArgs) -> Result<()> {
    let library = open_library(config)?;

    let mut content = WebContent::new();
    let count = inject(
        library.registry(),
        &config.exports(),
        &config.policy(),
        args.view,
        &mut content,
    );
    debug!("inject"; "{} urls for {:?}", count, args.view);

    if args.html {
        print!("{}", content.render_tags());
    } else {
        for url in content.css.iter().chain(&content.js) {
            println!("{url}");
        }
    }
    Ok(())
}
