//! Interactive loop: reads commands, refines the coordinator, prints the view.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::cli::command::{self, Command, CommandError, USAGE};
use crate::cli::render::render;
use crate::coordinator::RequestCoordinator;
use crate::view::ViewState;

/// What a command means against the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refine { query: String, page: u64 },
    Print,
    Help,
    Quit,
    /// The command cannot apply right now; the message says why.
    Ignored(&'static str),
}

/// Translate a command into an action.
///
/// Page navigation needs a loaded, non-empty page to know the bounds.
pub fn resolve(command: Command, view: &ViewState, page_size: u64) -> Action {
    let query = view.query().to_string();
    let pagination = view.pagination(page_size);

    match command {
        Command::Search(text) => Action::Refine {
            query: text,
            page: view.page(),
        },
        Command::GoTo(page) => match pagination {
            Some(p) if p.contains(page) => Action::Refine { query, page },
            Some(_) => Action::Ignored("Page out of range"),
            None => Action::Ignored("No page loaded yet"),
        },
        Command::Next => match pagination.map(|p| p.next()) {
            Some(Some(page)) => Action::Refine { query, page },
            Some(None) => Action::Ignored("Already on the last page"),
            None => Action::Ignored("No page loaded yet"),
        },
        Command::Previous => match pagination.map(|p| p.previous()) {
            Some(Some(page)) => Action::Refine { query, page },
            Some(None) => Action::Ignored("Already on the first page"),
            None => Action::Ignored("No page loaded yet"),
        },
        Command::Reprint => Action::Print,
        Command::Help => Action::Help,
        Command::Quit => Action::Quit,
    }
}

/// Drive `coordinator` from `input` until quit or end of input.
///
/// Every published view change is rendered to `out`.
pub async fn run<R, W>(coordinator: RequestCoordinator, input: R, mut out: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let page_size = coordinator.page_size();
    let mut views = coordinator.subscribe();
    let mut lines = input.lines();

    write!(out, "{}", render(&views.borrow_and_update(), page_size))?;
    out.flush()?;

    loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                write!(out, "{}", render(&views.borrow_and_update(), page_size))?;
                out.flush()?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let command = match command::parse(&line) {
                    Ok(command) => command,
                    Err(CommandError::Empty) => continue,
                    Err(err) => {
                        writeln!(out, "{}", err)?;
                        continue;
                    }
                };

                let view = coordinator.observe();
                match resolve(command, &view, page_size) {
                    Action::Refine { query, page } => {
                        tracing::debug!(%query, page, "Refining selection");
                        coordinator.refine(query, page);
                    }
                    Action::Print => write!(out, "{}", render(&view, page_size))?,
                    Action::Help => writeln!(out, "{}", USAGE)?,
                    Action::Quit => break,
                    Action::Ignored(reason) => writeln!(out, "{}", reason)?,
                }
                out.flush()?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageResult;
    use crate::view::{Phase, Selection};

    fn ready(query: &str, page: u64, total: u64) -> ViewState {
        ViewState {
            selection: Selection::new(query, page),
            result: Some(PageResult::new(Vec::new(), total)),
            phase: Phase::Ready,
        }
    }

    #[test]
    fn test_search_passes_current_page() {
        let view = ready("old", 2, 20);
        assert_eq!(
            resolve(Command::Search("new".to_string()), &view, 4),
            Action::Refine {
                query: "new".to_string(),
                page: 2
            }
        );
    }

    #[test]
    fn test_next_and_previous() {
        let view = ready("q", 1, 9);
        assert_eq!(
            resolve(Command::Next, &view, 4),
            Action::Refine {
                query: "q".to_string(),
                page: 2
            }
        );
        assert_eq!(
            resolve(Command::Previous, &view, 4),
            Action::Refine {
                query: "q".to_string(),
                page: 0
            }
        );
    }

    #[test]
    fn test_bounds_are_respected() {
        let last = ready("q", 2, 9);
        assert_eq!(
            resolve(Command::Next, &last, 4),
            Action::Ignored("Already on the last page")
        );
        assert_eq!(
            resolve(Command::GoTo(3), &last, 4),
            Action::Ignored("Page out of range")
        );

        let first = ready("q", 0, 9);
        assert_eq!(
            resolve(Command::Previous, &first, 4),
            Action::Ignored("Already on the first page")
        );
    }

    #[test]
    fn test_navigation_while_loading_ignored() {
        let view = ViewState::new(Selection::new("q", 0));
        assert_eq!(
            resolve(Command::Next, &view, 4),
            Action::Ignored("No page loaded yet")
        );
        assert_eq!(
            resolve(Command::GoTo(1), &view, 4),
            Action::Ignored("No page loaded yet")
        );
    }

    #[tokio::test]
    async fn test_run_prints_initial_view_and_quits() {
        use crate::provider::InMemoryProvider;
        use std::sync::Arc;

        let provider = Arc::new(InMemoryProvider::numbered(10));
        let coordinator = RequestCoordinator::start(provider, "abc", 4, 0).unwrap();

        let mut out = Vec::new();
        run(coordinator, &b"x\nq\n"[..], &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Search: \"abc\"\n"));
        assert!(text.contains("Unknown command 'x'"));
    }
}
