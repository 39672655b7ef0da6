//! buildboard - terminal dashboard for buildserver builds.
//!
//! Fetches the build list once from the configured endpoint and shows it
//! as a table with client-side pagination.

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

use cli::Cli;
use commands::{apply_command, CommandOutcome, ViewCommand, HELP_TEXT};
use config::ClientConfig;
use display::OutputRenderer;
use error::AppError;
use services::{BuildListView, BuildsClient, BuildsClientConfig, PageView};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

/// Run the client with parsed command line arguments.
///
/// Returns the page that was on screen when the client finished. Fetch
/// failures are not errors here: they are logged and an empty table is
/// shown. Only configuration and argument problems are returned.
pub async fn run(cli: Cli) -> Result<PageView, AppError> {
    let config =
        ClientConfig::load(cli.config.as_deref())?.with_overrides(cli.api_host, cli.builds_route);
    config.validate()?;

    let client = BuildsClient::new(BuildsClientConfig::from_config(&config)?)?;
    let renderer = OutputRenderer::new(cli.json);
    let view = BuildListView::from_config(&config);

    if let Some(rows) = cli.rows_per_page {
        apply_command(&view, &config.rows_per_page_options, ViewCommand::Rows(rows)).await?;
    }

    let fetch = view.mount(client)?;
    let initial_page = cli.page.map(|p| p as usize);

    let result = if cli.interactive {
        let input = BufReader::new(tokio::io::stdin());
        run_interactive(&view, &config, &renderer, fetch, initial_page, input).await
    } else {
        run_once(&view, &config, &renderer, fetch, initial_page).await
    };

    view.unmount().await;
    result
}

/// Wait for the fetch, render one page, done.
async fn run_once(
    view: &BuildListView,
    config: &ClientConfig,
    renderer: &OutputRenderer,
    fetch: JoinHandle<()>,
    initial_page: Option<usize>,
) -> Result<PageView, AppError> {
    await_fetch(fetch).await;
    go_to_initial_page(view, config, renderer, initial_page).await;

    let page = view.current_page().await;
    renderer.render_page(&page)?;
    Ok(page)
}

/// Render right away, then redraw on every state change until `quit` or
/// the end of `input`.
async fn run_interactive<R>(
    view: &BuildListView,
    config: &ClientConfig,
    renderer: &OutputRenderer,
    mut fetch: JoinHandle<()>,
    initial_page: Option<usize>,
    input: R,
) -> Result<PageView, AppError>
where
    R: AsyncBufRead + Unpin,
{
    let mut changes = view.subscribe();
    let mut lines = input.lines();
    let mut fetch_done = false;

    changes.borrow_and_update();
    renderer.render_page(&view.current_page().await)?;
    eprintln!("Type 'help' for commands.");

    loop {
        tokio::select! {
            joined = &mut fetch, if !fetch_done => {
                fetch_done = true;
                if let Err(e) = joined {
                    log::error!("[builds] Fetch task failed: {}", e);
                }
                go_to_initial_page(view, config, renderer, initial_page).await;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                changes.borrow_and_update();
                renderer.render_page(&view.current_page().await)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // Input closed with the fetch still out: show its result once.
                    if !fetch_done {
                        await_fetch(fetch).await;
                        go_to_initial_page(view, config, renderer, initial_page).await;
                        renderer.render_page(&view.current_page().await)?;
                    }
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let outcome = match line.parse::<ViewCommand>() {
                    Ok(command) => apply_command(view, &config.rows_per_page_options, command).await,
                    Err(e) => Err(e),
                };

                match outcome {
                    Ok(CommandOutcome::Quit) => break,
                    Ok(CommandOutcome::ShowHelp) => eprintln!("{HELP_TEXT}"),
                    Ok(CommandOutcome::Changed) | Ok(CommandOutcome::Unchanged) => {}
                    Err(e) => renderer.render_error(&e),
                }
            }
        }
    }

    Ok(view.current_page().await)
}

async fn await_fetch(fetch: JoinHandle<()>) {
    if let Err(e) = fetch.await {
        log::error!("[builds] Fetch task failed: {}", e);
    }
}

/// Apply `--page` once the data is there. A page that does not exist is
/// reported and the first page is kept.
async fn go_to_initial_page(
    view: &BuildListView,
    config: &ClientConfig,
    renderer: &OutputRenderer,
    initial_page: Option<usize>,
) {
    let Some(page) = initial_page else {
        return;
    };

    if let Err(e) = apply_command(view, &config.rows_per_page_options, ViewCommand::Page(page)).await {
        renderer.render_error(&e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn builds(n: i64) -> serde_json::Value {
        (0..n)
            .map(|id| {
                json!({
                    "build_id": id,
                    "git_repository_url": format!("https://git.example.com/app-{}.git", id),
                    "commit_hash": format!("{:08x}", id),
                    "build_status": "success",
                })
            })
            .collect()
    }

    async fn mounted(server: &MockServer) -> (BuildListView, ClientConfig, JoinHandle<()>) {
        let config = ClientConfig::default().with_overrides(Some(server.base_url()), None);
        let client = BuildsClient::new(BuildsClientConfig::from_config(&config).unwrap()).unwrap();
        let view = BuildListView::from_config(&config);
        let fetch = view.mount(client).unwrap();
        (view, config, fetch)
    }

    #[tokio::test]
    async fn test_interactive_eof_waits_for_fetch() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/builds/");
                then.status(200)
                    .delay(Duration::from_millis(300))
                    .json_body(builds(12));
            })
            .await;

        let (view, config, fetch) = mounted(&server).await;
        let input: &[u8] = b"";
        let page = run_interactive(&view, &config, &OutputRenderer::new(false), fetch, Some(2), input)
            .await
            .unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(page.page, 1);
        assert_eq!(page.rows.len(), 5);
    }

    #[tokio::test]
    async fn test_interactive_commands_then_quit() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/builds/");
                then.status(200).json_body(builds(12));
            })
            .await;

        let (view, config, fetch) = mounted(&server).await;
        fetch.await.unwrap();
        let finished = tokio::spawn(async {});

        let input: &[u8] = b"next\nbogus\nrows 10\nnext\nq\nnext\n";
        let page = run_interactive(&view, &config, &OutputRenderer::new(false), finished, None, input)
            .await
            .unwrap();

        assert_eq!(page.rows_per_page, crate::models::RowsPerPage::Limited(10));
        assert_eq!(page.page, 1);
        assert_eq!(page.rows.len(), 2);
    }
}
