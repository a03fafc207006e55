//! Shared utilities for argument processing.

use crate::app::render::status_line;
use crate::i18n;
use crate::state::Collection;

/// What: Determine the log level based on command-line arguments and environment variables.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
/// - `STOREFRONT_TRACE=1` enables TRACE level for request-level detail.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else if std::env::var("STOREFRONT_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Print a loaded collection for a one-shot command.
///
/// Inputs:
/// - `collection`: Collection after its pages were loaded
/// - `line`: Renders one item
///
/// Output:
/// - Exit code: `1` when the last load failed, `0` otherwise.
///
/// Details:
/// - Items go to stdout, the error message to stderr, the count and status line to stdout.
pub fn print_collection<T, L>(collection: &Collection<T>, line: L) -> i32
where
    L: Fn(&T) -> String,
{
    for item in collection.items() {
        println!("{}", line(item));
    }
    if let Some(error) = collection.error() {
        eprintln!("{error}");
        return 1;
    }
    if !collection.is_empty() {
        println!("{}", i18n::t_fmt1("app.lists.count", collection.len()));
    }
    if let Some(status) = status_line(collection) {
        println!("{status}");
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Page;
    use clap::Parser;

    #[test]
    /// What: Verbose wins over the explicit level.
    ///
    /// - Input: `--log-level warn -v`, then `--log-level warn`
    /// - Output: "debug", then "warn" (unless tracing is forced by the environment)
    fn determine_log_level_prefers_verbose() {
        let args = crate::args::Args::try_parse_from(["storefront", "--log-level", "warn", "-v"])
            .expect("valid");
        assert_eq!(determine_log_level(&args), "debug");
        let args =
            crate::args::Args::try_parse_from(["storefront", "--log-level", "warn"]).expect("valid");
        let level = determine_log_level(&args);
        assert!(level == "warn" || level == "trace");
    }

    #[test]
    /// What: Exit code reflects the stored error.
    ///
    /// - Input: Loaded collection; collection whose first load failed
    /// - Output: 0, then 1
    fn print_collection_exit_codes() {
        let mut ok: Collection<u32> = Collection::new();
        let t = ok.begin_load(None, false).expect("ticket");
        ok.apply_page(&t, Page::bare(vec![1, 2]));
        assert_eq!(print_collection(&ok, u32::to_string), 0);

        let mut failed: Collection<u32> = Collection::new();
        let t = failed.begin_load(None, false).expect("ticket");
        failed.apply_error(&t, "offline".to_string());
        assert_eq!(print_collection(&failed, u32::to_string), 1);
    }
}
