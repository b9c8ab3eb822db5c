mod actions;
mod app_state;
mod code_panel;
mod compiler;
mod preview;
mod settings;
mod share;
mod states;
mod templates;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use log::warn;

fn main() -> Result<()> {
    env_logger::init();

    // A share link (or its bare payload) may be passed as the first argument;
    // it becomes the initial document before the first render.
    let initial_source = std::env::args().nth(1).and_then(|arg| {
        let decoded = share::decode_link(&arg);
        if decoded.is_none() {
            warn!("ignoring argument that is not a valid share link");
        }
        decoded
    });

    let compiler: Arc<dyn compiler::Compiler> = Arc::new(compiler::LesscCompiler::default());

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "LESS Playground",
        native_options,
        Box::new(move |cc| Box::new(ui::create_app(cc, compiler, initial_source))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start UI: {e}"))?;
    Ok(())
}
