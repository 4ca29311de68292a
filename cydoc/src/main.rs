use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use colored::Colorize;

use cydoc::ctx::AppContext;
use cydoc::export::{archive, llms, markdown, pages};
use cydoc::settings::{ApiRenderer, Theme};

#[derive(Parser)]
#[command(version, about = "Documentation site export toolkit")]
struct Cli {
    /// Project root directory.
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Site configuration file, defaults to `docsite.toml` under the root.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export processed markdown copies of all documentation pages.
    ExportMarkdown,
    /// Generate the llms.txt page index.
    LlmsTxt,
    /// Generate documentation pages for all JSON schemas.
    SchemaPages,
    /// Package schema sources into dist/schemas.zip.
    PackageSchemas,
    /// Run the full export pipeline.
    Build,
    /// Inspect or change persisted user settings.
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Show the current settings.
    Show,
    /// Change one or more settings.
    Set {
        /// Colour theme: dark, light, or auto.
        #[arg(long)]
        theme: Option<String>,
        /// API reference renderer: scalar or redoc.
        #[arg(long)]
        renderer: Option<String>,
    },
    /// Reset all settings to their defaults.
    Reset,
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("{} {e:#}", "error:".red().bold());
        exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut ctx = AppContext::load(cli.root, cli.config)?;
    match cli.command {
        Command::ExportMarkdown => export_markdown(&ctx),
        Command::LlmsTxt => llms_txt(&ctx),
        Command::SchemaPages => schema_pages(&ctx),
        Command::PackageSchemas => package_schemas(&ctx),
        Command::Build => {
            schema_pages(&ctx)?;
            export_markdown(&ctx)?;
            llms_txt(&ctx)?;
            package_schemas(&ctx)?;
            println!("{}", "Build complete.".green().bold());
            Ok(())
        }
        Command::Settings { command } => settings(&mut ctx, command),
    }
}

fn export_markdown(ctx: &AppContext) -> anyhow::Result<()> {
    println!("{}", "Exporting markdown documentation...".bold().purple());
    let count = markdown::export_markdown(ctx)?;
    println!("{}", format!("Exported {count} markdown files.").green());
    Ok(())
}

fn llms_txt(ctx: &AppContext) -> anyhow::Result<()> {
    println!("{}", "Generating llms.txt...".bold().purple());
    let path = llms::export_llms_txt(ctx)?;
    println!("{}", format!("Wrote {}.", path.display()).green());
    Ok(())
}

fn schema_pages(ctx: &AppContext) -> anyhow::Result<()> {
    println!("{}", "Generating schema pages...".bold().purple());
    let count = pages::generate_schema_pages(ctx)?;
    println!("{}", format!("Generated {count} schema pages.").green());
    Ok(())
}

fn package_schemas(ctx: &AppContext) -> anyhow::Result<()> {
    println!("{}", "Packaging schema archive...".bold().purple());
    let path = archive::package_schemas(ctx)?;
    println!("{}", format!("Wrote {}.", path.display()).green());
    Ok(())
}

fn settings(ctx: &mut AppContext, command: SettingsCommand) -> anyhow::Result<()> {
    ctx.attach_settings_env();
    ctx.settings.initialize();
    match command {
        SettingsCommand::Show => {
            let settings = ctx.settings.settings();
            println!("theme: {}", settings.theme);
            println!("apiRenderer: {}", settings.api_renderer);
        }
        SettingsCommand::Set { theme, renderer } => {
            if let Some(raw) = theme {
                let theme: Theme = raw.parse()?;
                ctx.settings.set_theme(theme);
                println!("{}", format!("theme set to {theme}").green());
            }
            if let Some(raw) = renderer {
                let renderer: ApiRenderer = raw.parse()?;
                ctx.settings.set_api_renderer(renderer);
                println!("{}", format!("apiRenderer set to {renderer}").green());
            }
        }
        SettingsCommand::Reset => {
            ctx.settings.reset();
            println!("{}", "Settings reset to defaults.".green());
        }
    }
    Ok(())
}
