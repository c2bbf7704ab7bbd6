use std::path::PathBuf;

use anyhow::{bail, Result};

pub const USAGE: &str = "Usage: wk2op [--dry-run] [--mappings <file>] <path_to_wekan_json>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Migrate(MigrateArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateArgs {
    pub board_path: PathBuf,
    pub mappings_path: Option<PathBuf>,
    pub dry_run: bool,
}

/// Parse the arguments following the program name.
///
/// Supported forms:
///   wk2op board.json
///   wk2op --dry-run board.json
///   wk2op --mappings mappings.toml board.json
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut board_path: Option<PathBuf> = None;
    let mut mappings_path: Option<PathBuf> = None;
    let mut dry_run = false;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-n" | "--dry-run" => dry_run = true,
            "-m" | "--mappings" => {
                i += 1;
                match args.get(i) {
                    Some(path) => mappings_path = Some(PathBuf::from(path)),
                    None => bail!("Missing value for --mappings flag\n\n{USAGE}"),
                }
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                bail!("Unknown option {flag}\n\n{USAGE}");
            }
            path => {
                if board_path.is_some() {
                    bail!("Unexpected argument {path}\n\n{USAGE}");
                }
                board_path = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    let Some(board_path) = board_path else {
        bail!("{USAGE}");
    };

    Ok(Command::Migrate(MigrateArgs {
        board_path,
        mappings_path,
        dry_run,
    }))
}

pub fn print_help() {
    println!("wk2op — migrate a Wekan board export into an OpenProject project\n");
    println!("{USAGE}");
    println!();
    println!("OPTIONS:");
    println!("  -n, --dry-run          Print payloads instead of creating anything");
    println!("  -m, --mappings <file>  TOML file with version, status and user mappings");
    println!("                         (default: ~/.wk2op/mappings.toml if present)");
    println!();
    println!("ENVIRONMENT:");
    println!("  OP_API_TOKEN     OpenProject API token");
    println!("  OP_API_ENDPOINT  API base URL, e.g. https://op.example.com/api/v3");
    println!("  OP_PROJECT_ID    Target project identifier");
    println!("  WK2OP_LOG        Log filter (default: info)");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    fn migrate(strs: &[&str]) -> MigrateArgs {
        match parse_args(&args(strs)).unwrap() {
            Command::Migrate(m) => m,
            Command::Help => panic!("expected migrate command"),
        }
    }

    #[test]
    fn parse_board_path() {
        let m = migrate(&["board.json"]);
        assert_eq!(m.board_path, PathBuf::from("board.json"));
        assert_eq!(m.mappings_path, None);
        assert!(!m.dry_run);
    }

    #[test]
    fn parse_dry_run_and_mappings() {
        let m = migrate(&["--dry-run", "board.json", "-m", "map.toml"]);
        assert!(m.dry_run);
        assert_eq!(m.mappings_path, Some(PathBuf::from("map.toml")));
        assert_eq!(m.board_path, PathBuf::from("board.json"));
    }

    #[test]
    fn parse_help() {
        assert_eq!(parse_args(&args(&["board.json", "-h"])).unwrap(), Command::Help);
    }

    #[test]
    fn parse_empty_args_shows_usage() {
        let err = parse_args(&args(&[])).unwrap_err();
        assert!(err.to_string().starts_with("Usage: wk2op"));
    }

    #[test]
    fn parse_missing_mappings_value_fails() {
        let err = parse_args(&args(&["board.json", "--mappings"])).unwrap_err();
        assert!(err.to_string().contains("Missing value"));
    }

    #[test]
    fn parse_second_path_fails() {
        let err = parse_args(&args(&["a.json", "b.json"])).unwrap_err();
        assert!(err.to_string().contains("Unexpected argument b.json"));
    }

    #[test]
    fn parse_unknown_flag_fails() {
        let err = parse_args(&args(&["--force", "a.json"])).unwrap_err();
        assert!(err.to_string().contains("Unknown option --force"));
    }
}
