use buildboard_lib::cli::Cli;
use buildboard_lib::display::OutputRenderer;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    buildboard_lib::logging::init(cli.verbose);

    let renderer = OutputRenderer::new(cli.json);
    match buildboard_lib::run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            renderer.render_error(&e);
            if e.is_config() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
