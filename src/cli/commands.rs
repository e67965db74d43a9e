//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::script::Edit;
use crate::application::services::EditOutcome;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{DomTree, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::stdio;

const STDIN: &str = "-";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `tagtree --help`".to_string(),
        ));
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => _config(cli, command),
        Commands::Print { input } => {
            let container = container(cli)?;
            let tree = read_document(&container, input)?;
            write_document(cli, &container, &tree, input)
        }
        Commands::Tree { input } => {
            reject_write_flags(cli, "tree")?;
            let container = container(cli)?;
            let tree = read_document(&container, input)?;
            output::info(&tree.to_tree_string());
            Ok(())
        }
        Commands::Stats { input } => {
            reject_write_flags(cli, "stats")?;
            _stats(cli, input)
        }
        Commands::Rename { input, old, new } => _edit(
            cli,
            input,
            vec![Edit::Rename {
                from: old.clone(),
                to: new.clone(),
            }],
        ),
        Commands::BoldRow { input, row } => _edit(cli, input, vec![Edit::BoldRow { row: *row }]),
        Commands::Remove { input, tag } => _edit(cli, input, vec![Edit::Remove { tag: tag.clone() }]),
        Commands::AddTag { input, word, tag } => _edit(
            cli,
            input,
            vec![Edit::AddTag {
                word: word.clone(),
                tag: tag.clone(),
            }],
        ),
        Commands::Apply { input, script } => {
            let container = container(cli)?;
            let script = container.document_service.load_script(script)?;
            _edit_with(cli, &container, input, &script.edits)
        }
    }
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = Settings::load(cli.config.as_deref())?;
    Ok(ServiceContainer::new(settings))
}

fn reject_write_flags(cli: &Cli, command: &str) -> CliResult<()> {
    if cli.in_place || cli.output.is_some() {
        return Err(CliError::InvalidArgs(format!(
            "`{}` does not produce a document, drop --in-place/--output",
            command
        )));
    }
    Ok(())
}

/// Build the tree from a file, or from stdin for "-".
fn read_document(container: &ServiceContainer, input: &Path) -> CliResult<DomTree> {
    let service = &container.document_service;
    if input == Path::new(STDIN) {
        let content = stdio::read_stdin()?;
        return Ok(service.parse(&content, Path::new("<stdin>"))?);
    }
    Ok(service.load(input)?)
}

/// Send the serialized tree to stdout, --output or back to the input file.
fn write_document(cli: &Cli, container: &ServiceContainer, tree: &DomTree, input: &Path) -> CliResult<()> {
    let service = &container.document_service;
    let target: Option<PathBuf> = if cli.in_place {
        if input == Path::new(STDIN) {
            return Err(CliError::Usage(
                "--in-place needs a file input, not stdin".to_string(),
            ));
        }
        Some(input.to_path_buf())
    } else {
        cli.output.clone()
    };

    match target {
        Some(path) => {
            service.save(tree, &path)?;
            output::action("Written", &path.display());
        }
        None => stdio::write_stdout(&tree.to_string())?,
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _edit(cli: &Cli, input: &Path, edits: Vec<Edit>) -> CliResult<()> {
    let container = container(cli)?;
    _edit_with(cli, &container, input, &edits)
}

fn _edit_with(cli: &Cli, container: &ServiceContainer, input: &Path, edits: &[Edit]) -> CliResult<()> {
    if cli.in_place && input == Path::new(STDIN) {
        return Err(CliError::Usage(
            "--in-place needs a file input, not stdin".to_string(),
        ));
    }
    let mut tree = read_document(container, input)?;
    debug!("applying {} edit(s)", edits.len());
    let outcomes = container.document_service.apply_all(&mut tree, edits)?;
    report(&outcomes);
    write_document(cli, container, &tree, input)
}

fn report(outcomes: &[EditOutcome]) {
    for outcome in outcomes {
        if outcome.affected == 0 {
            output::warning(&format!("{}: nothing matched", outcome.edit));
        } else {
            output::success(&format!("{}: {} node(s)", outcome.edit, outcome.affected));
        }
    }
}

fn _stats(cli: &Cli, input: &Path) -> CliResult<()> {
    let container = container(cli)?;
    let tree = read_document(&container, input)?;
    let stats = container.document_service.stats(&tree);
    output::header(&input.display());
    output::detail("nodes", &stats.nodes);
    output::detail("tags", &stats.tags);
    output::detail("texts", &stats.texts);
    output::detail("depth", &stats.depth);
    output::detail("rows", &stats.rows);
    Ok(())
}

fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            stdio::write_stdout(&settings.to_toml()?)?;
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => {
                return Err(CliError::Usage(
                    "cannot determine config directory on this platform".to_string(),
                ))
            }
        },
        ConfigCommands::Template => stdio::write_stdout(&Settings::template())?,
    }
    Ok(())
}
