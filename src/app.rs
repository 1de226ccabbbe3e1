use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use sheetsplit::core::CalamineWorkbook;
use sheetsplit::sample::create_sample_tree;
use sheetsplit::{AppError, OutcomeStatus, WorkbookReader, count_output_files, run, scan};

use crate::cli::{Cli, Commands, FolderArgs};
use crate::config::Config;
use crate::output::{
    output_preview_json, output_report_json, output_scan_json, print_json, print_preview_table,
    print_report, print_scan_table,
};
use crate::paths::SavedPaths;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) config: &'a Config,
    pub(crate) saved: SavedPaths,
    pub(crate) paths_file: PathBuf,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(cli: &'a Cli, config: &'a Config) -> Self {
        let paths_file = cli.paths_file();
        let saved = SavedPaths::load(&paths_file);
        CommandContext {
            cli,
            config,
            saved,
            paths_file,
        }
    }

    /// CLI flag, then saved paths, then config
    fn input(&self, args: &FolderArgs) -> Option<PathBuf> {
        args.input
            .clone()
            .or_else(|| self.saved.input())
            .or_else(|| self.config.input_folder.clone())
    }

    fn output(&self, args: &FolderArgs) -> Option<PathBuf> {
        args.output
            .clone()
            .or_else(|| self.saved.output())
            .or_else(|| self.config.output_folder.clone())
    }
}

pub(crate) fn handle_command(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let args = ctx.cli.command.folders();
    match &ctx.cli.command {
        Commands::Scan(_) => handle_scan(ctx, args),
        Commands::Convert(_) => handle_convert(ctx, args),
        Commands::Preview(_) => handle_preview(ctx, args),
        Commands::Sample(_) => handle_sample(ctx, args),
    }
}

fn handle_scan(ctx: &CommandContext<'_>, args: &FolderArgs) -> Result<(), AppError> {
    let input = ctx.input(args).ok_or(AppError::MissingInput)?;
    let result = scan(&input)?;
    let existing = ctx.output(args).map(|out| count_output_files(&out));

    if ctx.cli.json {
        print_json(&output_scan_json(&input, &result, existing));
    } else {
        print_scan_table(&input, &result, existing, ctx.cli.use_color());
    }
    Ok(())
}

fn handle_convert(ctx: &CommandContext<'_>, args: &FolderArgs) -> Result<(), AppError> {
    let input = ctx.input(args).ok_or(AppError::MissingInput)?;
    let output = ctx.output(args).ok_or(AppError::MissingOutput)?;

    let result = scan(&input)?;
    if result.total_files() == 0 {
        warn!(root = %input.display(), "no spreadsheet files found");
    }

    if !output.exists() {
        fs::create_dir_all(&output).map_err(|source| AppError::CreateDir {
            path: output.clone(),
            source,
        })?;
        info!("Created output directory: {}", output.display());
    }
    save_paths(&ctx.paths_file, &input, &output);

    let report = run(&result.files, &output, |progress| {
        let record = progress.record;
        let line = format!(
            "[{}/{}] {} / {} -> {}",
            progress.file_index + 1,
            progress.file_count,
            progress
                .file
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            record.sheet_name,
            record.status
        );
        match record.status {
            OutcomeStatus::Error => warn!("{line}"),
            _ => info!("{line}"),
        }
        ControlFlow::Continue(())
    });

    if ctx.cli.json {
        print_json(&output_report_json(&report));
    } else {
        print_report(&report, ctx.cli.use_color());
    }
    Ok(())
}

fn handle_preview(ctx: &CommandContext<'_>, args: &FolderArgs) -> Result<(), AppError> {
    let input = ctx.input(args).ok_or(AppError::MissingInput)?;
    let result = scan(&input)?;
    let Some(first) = result.files.first() else {
        return Err(AppError::NoWorkbooks { path: input });
    };

    let workbook = CalamineWorkbook::open(&first.path)?;
    let names = workbook.sheet_names();
    if ctx.cli.json {
        print_json(&output_preview_json(&first.path, &names));
    } else {
        print_preview_table(&first.path, &names, ctx.cli.use_color());
    }
    Ok(())
}

fn handle_sample(ctx: &CommandContext<'_>, args: &FolderArgs) -> Result<(), AppError> {
    let input = ctx.input(args).ok_or(AppError::MissingInput)?;
    let sample_root = create_sample_tree(&input)?;
    if ctx.cli.json {
        print_json(&serde_json::json!({ "sample_root": sample_root }));
    } else {
        println!("Sample structure created at: {}", sample_root.display());
    }
    Ok(())
}

fn save_paths(paths_file: &Path, input: &Path, output: &Path) {
    match SavedPaths::save(paths_file, input, output) {
        Ok(()) => info!("Saved folders to {}", paths_file.display()),
        Err(e) => warn!(file = %paths_file.display(), error = %e, "failed to save folders"),
    }
}
