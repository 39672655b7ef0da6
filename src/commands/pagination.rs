//! Pagination control commands.
//!
//! Turns a line of user input into a page or page-size change and applies
//! it to a [`BuildListView`], enforcing the bounds a pagination widget
//! would: no stepping past either end, only offered page sizes.

use crate::error::AppError;
use crate::models::RowsPerPage;
use crate::services::BuildListView;
use std::str::FromStr;

/// Help text listing every command.
pub const HELP_TEXT: &str = "\
Commands:
  n, next          next page
  p, prev          previous page
  first            first page
  last             last page
  page <N>         go to page N
  rows <N|all>     change rows per page
  h, help          show this help
  q, quit          exit";

/// A parsed pagination command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    Next,
    Prev,
    First,
    Last,
    /// Go to a page, one-based as typed by the user.
    Page(usize),
    Rows(RowsPerPage),
    Help,
    Quit,
}

impl FromStr for ViewCommand {
    type Err = AppError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| AppError::invalid_input("Empty command"))?
            .to_ascii_lowercase();
        let arg = parts.next();

        if parts.next().is_some() {
            return Err(AppError::invalid_input(format!("Too many arguments: '{}'", input.trim())));
        }

        let command = match (name.as_str(), arg) {
            ("n" | "next", None) => Self::Next,
            ("p" | "prev", None) => Self::Prev,
            ("first", None) => Self::First,
            ("last", None) => Self::Last,
            ("h" | "help" | "?", None) => Self::Help,
            ("q" | "quit" | "exit", None) => Self::Quit,
            ("page", Some(arg)) => {
                let page = arg
                    .parse::<usize>()
                    .map_err(|_| AppError::invalid_input_field(format!("Not a page number: '{}'", arg), "page"))?;
                Self::Page(page)
            }
            ("rows", Some(arg)) => {
                let rows = arg
                    .parse::<RowsPerPage>()
                    .map_err(|e| AppError::invalid_input_field(e, "rows_per_page"))?;
                Self::Rows(rows)
            }
            ("page" | "rows", None) => {
                return Err(AppError::invalid_input(format!("'{}' needs an argument", name)))
            }
            _ => return Err(AppError::invalid_input(format!("Unknown command: '{}'", input.trim()))),
        };

        Ok(command)
    }
}

/// What applying a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The view changed and should be redrawn.
    Changed,
    /// The command was valid but had nothing to do (e.g. `next` on the last page).
    Unchanged,
    ShowHelp,
    Quit,
}

/// Apply `command` to `view`. `options` are the page sizes on offer.
pub async fn apply_command(
    view: &BuildListView,
    options: &[RowsPerPage],
    command: ViewCommand,
) -> Result<CommandOutcome, AppError> {
    let pagination = view.pagination().await;
    let total = view.total().await;
    let page_count = pagination.page_count(total);

    let target = match command {
        ViewCommand::Help => return Ok(CommandOutcome::ShowHelp),
        ViewCommand::Quit => return Ok(CommandOutcome::Quit),
        ViewCommand::Rows(rows) => {
            if !options.contains(&rows) {
                let offered: Vec<String> = options.iter().map(ToString::to_string).collect();
                return Err(AppError::invalid_input_field(
                    format!("Rows per page must be one of: {}", offered.join(", ")),
                    "rows_per_page",
                ));
            }
            if rows == pagination.rows_per_page() {
                return Ok(CommandOutcome::Unchanged);
            }
            view.change_rows_per_page(rows).await;
            return Ok(CommandOutcome::Changed);
        }
        ViewCommand::Next if pagination.is_last_page(total) => return Ok(CommandOutcome::Unchanged),
        ViewCommand::Next => pagination.page() + 1,
        ViewCommand::Prev if pagination.is_first_page() => return Ok(CommandOutcome::Unchanged),
        ViewCommand::Prev => pagination.page() - 1,
        ViewCommand::First => 0,
        ViewCommand::Last => page_count - 1,
        ViewCommand::Page(n) => {
            if n == 0 || n > page_count {
                return Err(AppError::invalid_input_field(
                    format!("Page must be between 1 and {}", page_count),
                    "page",
                ));
            }
            n - 1
        }
    };

    if target == pagination.page() {
        return Ok(CommandOutcome::Unchanged);
    }

    view.change_page(target).await;
    Ok(CommandOutcome::Changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pagination::default_rows_per_page_options;

    #[test]
    fn test_parse_commands() {
        assert_eq!("n".parse::<ViewCommand>().unwrap(), ViewCommand::Next);
        assert_eq!(" PREV ".parse::<ViewCommand>().unwrap(), ViewCommand::Prev);
        assert_eq!("page 3".parse::<ViewCommand>().unwrap(), ViewCommand::Page(3));
        assert_eq!(
            "rows all".parse::<ViewCommand>().unwrap(),
            ViewCommand::Rows(RowsPerPage::All)
        );
        assert_eq!(
            "rows 10".parse::<ViewCommand>().unwrap(),
            ViewCommand::Rows(RowsPerPage::Limited(10))
        );
        assert_eq!("q".parse::<ViewCommand>().unwrap(), ViewCommand::Quit);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<ViewCommand>().is_err());
        assert!("page".parse::<ViewCommand>().is_err());
        assert!("page two".parse::<ViewCommand>().is_err());
        assert!("rows 0".parse::<ViewCommand>().is_err());
        assert!("next 2".parse::<ViewCommand>().is_err());
        assert!("sort".parse::<ViewCommand>().is_err());
    }

    #[tokio::test]
    async fn test_bounds_on_empty_view() {
        let view = BuildListView::default();
        let options = default_rows_per_page_options();

        assert_eq!(
            apply_command(&view, &options, ViewCommand::Next).await.unwrap(),
            CommandOutcome::Unchanged
        );
        assert_eq!(
            apply_command(&view, &options, ViewCommand::Prev).await.unwrap(),
            CommandOutcome::Unchanged
        );
        assert!(apply_command(&view, &options, ViewCommand::Page(2)).await.is_err());
        assert!(apply_command(&view, &options, ViewCommand::Page(0)).await.is_err());
    }

    #[tokio::test]
    async fn test_rows_must_be_offered() {
        let view = BuildListView::default();
        let options = default_rows_per_page_options();

        let err = apply_command(&view, &options, ViewCommand::Rows(RowsPerPage::Limited(7)))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("5, 10, 25, All"));

        assert_eq!(
            apply_command(&view, &options, ViewCommand::Rows(RowsPerPage::Limited(10)))
                .await
                .unwrap(),
            CommandOutcome::Changed
        );
        assert_eq!(view.pagination().await.rows_per_page(), RowsPerPage::Limited(10));
    }

    #[tokio::test]
    async fn test_help_and_quit() {
        let view = BuildListView::default();
        assert_eq!(
            apply_command(&view, &[], ViewCommand::Help).await.unwrap(),
            CommandOutcome::ShowHelp
        );
        assert_eq!(
            apply_command(&view, &[], ViewCommand::Quit).await.unwrap(),
            CommandOutcome::Quit
        );
    }
}
