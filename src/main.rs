use clap::{ArgAction, Parser};
use descmark::logging::{init_logging, level_for_verbosity};
use descmark::{Error, RenderOptions, Theme};
use log::info;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

/// Format a plain-text description as HTML
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Input file (default: standard input)
    input: Option<PathBuf>,

    /// Output file (default: standard output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with render options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Style preset; overrides the theme from --config
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Print the document tree as JSON instead of HTML
    #[arg(long, action = ArgAction::SetTrue)]
    ast: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(level_for_verbosity(cli.verbose));

    if let Err(err) = run(&cli) {
        eprintln!("descmark: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let options = resolve_options(cli.config.as_deref(), cli.theme)?;

    let input = match &cli.input {
        Some(path) => fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(Error::Stdin)?;
            input
        }
    };
    info!("formatting {} bytes with {:?} theme", input.len(), options.theme);

    let mut output = render(&input, &options, cli.ast)?;
    output.push('\n');

    match &cli.output {
        Some(path) => fs::write(path, output).map_err(Error::Write)?,
        None => io::stdout()
            .write_all(output.as_bytes())
            .map_err(Error::Write)?,
    }
    Ok(())
}

/// Options from the config file, if any, with `--theme` taking precedence.
fn resolve_options(config: Option<&Path>, theme: Option<Theme>) -> Result<RenderOptions, Error> {
    let mut options = match config {
        Some(path) => RenderOptions::from_path(path)?,
        None => RenderOptions::default(),
    };
    if let Some(theme) = theme {
        options.theme = theme;
    }
    Ok(options)
}

/// HTML for `input`, or its document tree as pretty JSON when `ast` is set.
fn render(input: &str, options: &RenderOptions, ast: bool) -> Result<String, Error> {
    if ast {
        let document = descmark::parser::Parser::new().parse(input);
        serde_json::to_string_pretty(&document).map_err(Error::Serialize)
    } else {
        Ok(descmark::format_description_with(input, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_config(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("descmark.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn theme_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"theme":"portal","styles":{"link":"color:red"}}"#);

        let options = resolve_options(Some(path.as_path()), Some(Theme::Plain)).unwrap();
        assert_eq!(options.theme, Theme::Plain);
        // explicit styles from the file survive the theme switch
        assert_eq!(options.styles.link.as_deref(), Some("color:red"));

        let options = resolve_options(Some(path.as_path()), None).unwrap();
        assert_eq!(options.theme, Theme::Portal);
    }

    #[test]
    fn defaults_without_config() {
        assert_eq!(resolve_options(None, None).unwrap(), RenderOptions::default());
        assert_eq!(
            resolve_options(None, Some(Theme::Portal)).unwrap().theme,
            Theme::Portal
        );
    }

    #[test]
    fn missing_config_reports_readable_message() {
        let err = resolve_options(Some(Path::new("/nonexistent/descmark.json")), None).unwrap_err();
        assert!(
            err.to_string()
                .starts_with("failed to read /nonexistent/descmark.json: "),
            "{err}"
        );
    }

    #[test]
    fn invalid_config_reports_readable_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"colour":"red"}"#);
        let err = resolve_options(Some(path.as_path()), None).unwrap_err();
        assert!(err.to_string().starts_with("invalid render options: "), "{err}");
    }

    #[test]
    fn ast_dump_has_node_shape() {
        let json = render("**Setup** - run `ls`", &RenderOptions::default(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            json!({
                "Document": [
                    {"Heading": [{"Text": "Setup"}]},
                    {"UnorderedList": [
                        {"ListItem": [{"Text": "run "}, {"Code": "ls"}]}
                    ]}
                ]
            })
        );
    }

    #[test]
    fn html_output_uses_options() {
        let options = RenderOptions::with_theme(Theme::Portal);
        assert_eq!(
            render("Hi", &options, false).unwrap(),
            "<p style=\"margin:6px 0;line-height:1.7;\">Hi</p>"
        );
    }
}
