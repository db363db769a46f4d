use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use docxide_html::{InjectOptions, SafeFs, StyleExtraction};

#[derive(Parser)]
#[command(name = "docxide-html", version)]
#[command(about = "Project DOCX styles onto HTML so it renders like the Word document")]
struct Cli {
    /// Directory every input and output path must stay inside
    #[arg(long, global = true, env = "DOCXIDE_BASE_DIR", default_value = ".")]
    base_dir: PathBuf,

    /// Log progress and timing
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the CSS stylesheet for a DOCX file
    Css {
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Dump the extracted styles as JSON
    Extract {
        input: PathBuf,

        #[arg(long)]
        pretty: bool,
    },

    /// Print a mammoth-compatible style map
    StyleMap { input: PathBuf },

    /// Merge CSS files into an HTML document's head
    Inject {
        input: PathBuf,

        /// CSS file to inject, in order (repeatable)
        #[arg(long = "css", value_name = "FILE")]
        css: Vec<PathBuf>,

        #[arg(short, long)]
        output: PathBuf,

        /// Keep declarations as they are instead of marking them !important
        #[arg(long)]
        no_important: bool,

        /// Skip validation and the fallback stylesheet
        #[arg(long)]
        no_validate: bool,
    },

    /// Extract a DOCX file's styles and inject them into an HTML document
    Style {
        input: PathBuf,

        /// HTML produced from the same document
        #[arg(long)]
        html: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> docxide_html::Result<()> {
    let fs = SafeFs::new(&cli.base_dir)?;

    match cli.command {
        Command::Css { input, output } => {
            let extraction = extract(&fs, &input)?;
            match output {
                Some(output) => {
                    let written = fs.write(&output, &extraction.css)?;
                    eprintln!("Wrote {}", written.display());
                }
                None => print!("{}", extraction.css),
            }
        }
        Command::Extract { input, pretty } => {
            let extraction = extract(&fs, &input)?;
            let json = if pretty {
                serde_json::to_string_pretty(&extraction)?
            } else {
                serde_json::to_string(&extraction)?
            };
            println!("{json}");
        }
        Command::StyleMap { input } => {
            for line in extract(&fs, &input)?.style_map {
                println!("{line}");
            }
        }
        Command::Inject {
            input,
            css,
            output,
            no_important,
            no_validate,
        } => {
            let html = fs.read_to_string(&input)?;
            let mut sheets = Vec::with_capacity(css.len());
            for path in &css {
                sheets.push(fs.read_to_string(path)?);
            }
            let options = InjectOptions {
                force_important: !no_important,
                validate: !no_validate,
                ..InjectOptions::default()
            };
            let result = docxide_html::inject_styles_with(&html, &sheets.join("\n\n"), &options);
            let written = fs.write(&output, result)?;
            eprintln!("Wrote {}", written.display());
        }
        Command::Style {
            input,
            html,
            output,
        } => {
            let written = docxide_html::write_styled_html(&fs, &input, &html, &output)?;
            eprintln!("Wrote {}", written.display());
        }
    }

    Ok(())
}

fn extract(fs: &SafeFs, input: &Path) -> docxide_html::Result<StyleExtraction> {
    let bytes = fs.read(input)?;
    docxide_html::extract_styles_from_bytes(&bytes)
}
