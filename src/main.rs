//! craft's main application entry point.
//! Parses arguments and dispatches to the init wizard or the generation pipeline.

use craft::{
    cli::{get_args, Args, Command, GenerateArgs},
    config,
    constants::CONFIG_FILE,
    detector::Detectors,
    error::{default_error_handler, Result},
    fs::{EmbedFs, OsFs, TemplateFs},
    generate::Options,
    handler,
    logger::init_logger,
    pipeline::Pipeline,
    prompt::{ask_config, DialoguerPrompter, Prompter},
    renderer::{Delimiters, MiniJinjaRenderer},
};
use log::info;
use std::path::Path;

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Init { dest } => init(&dest),
        Command::Generate(generate_args) => generate(generate_args),
    }
}

fn init(dest: &Path) -> Result<()> {
    let prompt = DialoguerPrompter::new();

    if dest.join(CONFIG_FILE).exists()
        && !prompt.confirm(&format!("'{CONFIG_FILE}' already exists. Replace it?"), false)?
    {
        return Ok(());
    }

    let config = ask_config(&prompt)?;
    std::fs::create_dir_all(dest)?;
    config::save(dest, &config)?;
    info!("Configuration written, run 'craft generate' to scaffold the project");
    Ok(())
}

/// Runs the pipeline and writes the configuration back when detectors
/// changed it, even when some steps failed: their errors are reported once
/// everything else completed.
fn generate(args: GenerateArgs) -> Result<()> {
    let config = config::load(&args.dest)?;

    let fs: Box<dyn TemplateFs> = match &args.templates {
        Some(dir) => Box::new(OsFs::new(dir)),
        None => Box::new(EmbedFs::new()),
    };
    let renderer = MiniJinjaRenderer::new();
    let detectors = Detectors::default();
    let handlers = handler::defaults();

    let options = Options {
        destdir: args.dest.clone(),
        delimiters: Delimiters::new(args.start_delim, args.end_delim),
        force: args.force,
        force_all: args.force_all,
    };

    let pipeline = Pipeline::new(&detectors, &handlers, fs.as_ref(), &renderer);
    let (patched, result) = pipeline.run(config.clone(), &options);

    config::save_if_changed(&args.dest, &config, &patched)?;
    result?;
    info!("Project generated in {}", args.dest.display());
    Ok(())
}
