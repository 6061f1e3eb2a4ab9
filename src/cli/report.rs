//! Report formatting and printing.
//!
//! Kept apart from the pipeline so the library can be used without any
//! terminal output.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::context::ProjectContext;
use crate::pipeline::{FileError, RunReport, ScanReport};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

pub fn print_scan(ctx: &ProjectContext, scan: &ScanReport) {
    print_scan_to(ctx, scan, &mut io::stdout().lock());
    print_file_errors_to(ctx, &scan.errors, scan.skipped_paths, &mut io::stderr().lock());
}

fn print_scan_to<W: Write>(ctx: &ProjectContext, scan: &ScanReport, writer: &mut W) {
    let mut files: Vec<_> = scan.files.iter().filter(|f| !f.texts.is_empty()).collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    for file in &files {
        let _ = writeln!(writer, "{}", ctx.display_path(&file.path).bold());
        let width = file.texts.iter().map(|t| t.width()).max().unwrap_or(0);
        for text in &file.texts {
            if scan.new_texts.contains(text) {
                let padding = " ".repeat(width - text.width());
                let _ = writeln!(writer, "  {}{}  {}", text, padding, "new".yellow());
            } else {
                let _ = writeln!(writer, "  {}", text);
            }
        }
    }

    let total = scan.all_texts().len();
    let summary = format!(
        "Scanned {} source {}: {} {}, {} new",
        scan.files.len(),
        plural(scan.files.len(), "file", "files"),
        total,
        plural(total, "text", "texts"),
        scan.new_texts.len()
    );
    if scan.new_texts.is_empty() {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), summary.green());
    } else {
        let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), summary);
    }
}

pub fn print_run(ctx: &ProjectContext, result: &RunReport) {
    print_run_to(ctx, result, &mut io::stdout().lock());
    print_file_errors_to(ctx, &result.errors, result.skipped_paths, &mut io::stderr().lock());
}

fn print_run_to<W: Write>(ctx: &ProjectContext, result: &RunReport, writer: &mut W) {
    let verb = if result.applied {
        "Rewrote".green().bold()
    } else {
        "Would rewrite".yellow().bold()
    };
    for rewrite in &result.rewrites {
        let _ = writeln!(
            writer,
            "{} {} ({} {})",
            verb,
            ctx.display_path(&rewrite.path),
            rewrite.replacements,
            plural(rewrite.replacements, "replacement", "replacements")
        );
    }

    if result.translated > 0 || result.untranslated > 0 {
        let _ = writeln!(
            writer,
            "Translations: {} added, {} missing",
            result.translated, result.untranslated
        );
    }

    if result.applied {
        for path in &result.locale_files_written {
            let _ = writeln!(writer, "{} {}", "Wrote".green().bold(), ctx.display_path(path));
        }
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Processed {} source {}, {} new {}",
                result.files_scanned,
                plural(result.files_scanned, "file", "files"),
                result.new_texts.len(),
                plural(result.new_texts.len(), "text", "texts")
            )
            .green()
        );
    } else if result.has_pending_work() {
        let _ = writeln!(
            writer,
            "{} {} new {} for {}, {} {} to rewrite.",
            FAILURE_MARK.red(),
            result.new_texts.len(),
            plural(result.new_texts.len(), "text", "texts"),
            ctx.display_path(&ctx.output_dir),
            result.rewrites.len(),
            plural(result.rewrites.len(), "file", "files")
        );
        let _ = writeln!(writer, "Run with {} to write these changes.", "--apply".cyan());
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} source {} - nothing to do",
                result.files_scanned,
                plural(result.files_scanned, "file", "files")
            )
            .green()
        );
    }
}

fn print_file_errors_to<W: Write>(
    ctx: &ProjectContext,
    errors: &[FileError],
    skipped_paths: usize,
    writer: &mut W,
) {
    if skipped_paths > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} skipped due to access errors",
            "warning:".bold().yellow(),
            skipped_paths,
            plural(skipped_paths, "path", "paths")
        );
    }
    for error in errors {
        let _ = writeln!(
            writer,
            "{} {}: {}",
            "warning:".bold().yellow(),
            ctx.display_path(&error.path),
            error.error
        );
    }
}
