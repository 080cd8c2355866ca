use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;
use playground::{
    config::{CONFIG_FILE, PlaygroundConfig},
    ctx::AppContext,
    menuconfig::MenuConfigHandler,
    uischema::{
        SchemaKind, classify,
        data::{format_document, parse_document, synthesize_defaults},
    },
    utils::{Assignment, read_input},
};

#[derive(Parser)]
#[command(name = "playground")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Preview form and component schemas in the terminal", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in examples
    Examples,

    /// Load a built-in example and render it
    Show {
        /// Example id
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Apply a schema document as an edit and render it
    Render {
        /// Schema file, or `-` for stdin
        file: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Load the starter form schema and render it
    Reset {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the registered widget names
    Widgets,

    /// Tell whether a document is a form or a component schema
    Classify {
        /// Schema file, or `-` for stdin
        file: String,
    },

    /// Pretty-print a document
    Format {
        /// Schema file, or `-` for stdin
        file: String,
    },

    /// Print the default form data for a form schema
    Defaults {
        /// Schema file, or `-` for stdin
        file: String,
    },

    /// Show or edit the playground settings
    Config {
        /// Set a setting, e.g. `--set show_keys=true`
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<Assignment>,

        /// Print the settings JSON Schema
        #[arg(long)]
        schema: bool,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Print the panel as JSON
    #[arg(long)]
    json: bool,

    /// Set a form field, e.g. `--set address.city=Paris`
    #[arg(long = "set", value_name = "PATH=VALUE")]
    set: Vec<Assignment>,

    /// Submit the form after applying edits
    #[arg(long)]
    submit: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = PlaygroundConfig::load(&cli.config)?;
    if !config.color {
        colored::control::set_override(false);
    }
    debug!("config: {config:?}");

    match cli.command {
        Commands::Examples => {
            let ctx = AppContext::new(config, cli.config)?;
            ctx.print_examples();
        }
        Commands::Show { id, output } => {
            let mut ctx = AppContext::new(config, cli.config)?;
            ctx.select_example(&id)?;
            finish(&mut ctx, &output)?;
        }
        Commands::Render { file, output } => {
            let mut ctx = AppContext::new(config, cli.config)?;
            let text = read_input(&file)?;
            ctx.edit(&text)?;
            finish(&mut ctx, &output)?;
        }
        Commands::Reset { output } => {
            let mut ctx = AppContext::new(config, cli.config)?;
            ctx.reset();
            finish(&mut ctx, &output)?;
        }
        Commands::Widgets => {
            let ctx = AppContext::new(config, cli.config)?;
            ctx.print_widgets();
        }
        Commands::Classify { file } => {
            let doc = parse_document(&read_input(&file)?)?;
            match classify(&doc) {
                Some(kind) => println!("{kind}"),
                None => println!("ambiguous"),
            }
        }
        Commands::Format { file } => {
            let mut ctx = AppContext::new(config, cli.config)?;
            println!("{}", ctx.format_text(&read_input(&file)?)?);
        }
        Commands::Defaults { file } => {
            let doc = parse_document(&read_input(&file)?)?;
            if classify(&doc) != Some(SchemaKind::Form) {
                log::warn!("document is not a form schema");
            }
            println!("{}", format_document(&synthesize_defaults(&doc)));
        }
        Commands::Config { set, schema } => {
            let mut ctx = AppContext::new(config, cli.config)?;
            MenuConfigHandler::handle_config(&mut ctx, &set, schema)?;
        }
    }

    Ok(())
}

/// Apply field edits, optionally submit, then print the panel.
fn finish(ctx: &mut AppContext, output: &OutputArgs) -> Result<()> {
    ctx.apply_assignments(&output.set)?;
    let submitted = if output.submit {
        Some(ctx.submit()?)
    } else {
        None
    };
    ctx.print_panel(output.json)?;
    if let Some(data) = submitted {
        println!("\nSubmitted:\n{}", format_document(&data));
    }
    Ok(())
}
