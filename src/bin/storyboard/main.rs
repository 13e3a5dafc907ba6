//! Interactive storyboard editor for the terminal.
//!
//! Usage:
//!   storyboard [--endpoint URL] [--style cartoon] [--aspect 1:1] [--resolution 960]
//!   storyboard --scene "A knight at dawn" --scene "The castle gates" --export-dir out/

mod command;
mod console;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use command::{Command, HELP};
use console::ConsoleNotifier;
use storyboard_editor::{
    AspectRatio, EditorError, GeneratedImage, GenerationError, GeneratorConfig,
    HttpImageGenerator, ImageGenerator, ImageStyle, MoveDirection, PendingGeneration,
    StoryboardEditor, DEFAULT_ENDPOINT,
};

#[derive(Parser, Debug)]
#[command(
    name = "storyboard",
    about = "Build a storyboard of AI-generated scenes",
    version
)]
struct Args {
    /// Image generation endpoint (or set STORYBOARD_ENDPOINT env var)
    #[arg(short = 'e', long, env = "STORYBOARD_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Initial image style
    #[arg(long, default_value = "realistic")]
    style: ImageStyle,

    /// Initial aspect ratio
    #[arg(long, default_value = "16:9")]
    aspect: AspectRatio,

    /// Initial resolution (480..1080, step 120)
    #[arg(long, default_value = "720")]
    resolution: u32,

    /// Generate these scenes in order, export, and exit
    #[arg(short = 's', long = "scene")]
    scenes: Vec<String>,

    /// Directory for storyboard.txt
    #[arg(short = 'o', long, default_value = ".")]
    export_dir: PathBuf,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

type Editor = StoryboardEditor<ConsoleNotifier>;

type Response<'a> = Pin<Box<dyn Future<Output = Result<GeneratedImage, GenerationError>> + 'a>>;

/// The one request the prompt is waiting on.
struct InFlight<'a> {
    pending: PendingGeneration,
    response: Response<'a>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let generator = HttpImageGenerator::new(&GeneratorConfig::new(&args.endpoint))
        .context("Failed to create HTTP client")?;

    let mut editor = StoryboardEditor::new(ConsoleNotifier);
    editor.set_style(args.style);
    editor.set_aspect_ratio(args.aspect);
    editor
        .set_resolution(args.resolution)
        .context("Invalid --resolution")?;

    if !args.scenes.is_empty() {
        return run_batch(&mut editor, &generator, &args.scenes, &args.export_dir).await;
    }

    println!("Storyboard editor - generating with {}", generator.endpoint());
    println!("Type `help` for commands.\n");
    run_interactive(&mut editor, &generator, &args.export_dir).await
}

/// Generates every `--scene` in order, then exports. Fails on the first scene that fails.
async fn run_batch(
    editor: &mut Editor,
    generator: &HttpImageGenerator,
    scenes: &[String],
    export_dir: &Path,
) -> Result<()> {
    for (i, text) in scenes.iter().enumerate() {
        editor.set_description(text.as_str());
        let spinner = spinner(format!("Generating scene {}/{}...", i + 1, scenes.len()));
        let result = editor.generate_scene(generator).await;
        spinner.finish_and_clear();
        result.with_context(|| format!("Scene {} failed", i + 1))?;
    }

    let path = editor
        .export()
        .write_to_dir(export_dir)
        .context("Failed to write export")?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Reads commands while at most one generation runs in the background, so the
/// list can be edited, previewed and exported while a scene is pending.
async fn run_interactive(
    editor: &mut Editor,
    generator: &HttpImageGenerator,
    export_dir: &Path,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut in_flight: Option<InFlight<'_>> = None;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                let command = match Command::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        eprintln!("{e:#}");
                        continue;
                    }
                };

                if command == Command::Quit {
                    break;
                }
                if let Err(e) = execute(editor, generator, export_dir, &mut in_flight, command) {
                    eprintln!("{e:#}");
                }
            }
            outcome = wait_for(&mut in_flight) => {
                let Some(InFlight { pending, .. }) = in_flight.take() else {
                    continue;
                };
                println!();
                match editor.complete_generation(pending, outcome) {
                    Ok(index) => println!("Scene {} added.", index + 1),
                    // Already reported through the notifier.
                    Err(EditorError::Remote(_)) => {}
                    Err(e) => eprintln!("{e:#}"),
                }
            }
        }
    }

    if let Some(InFlight { pending, .. }) = in_flight.take() {
        editor.abandon_generation(pending)?;
    }
    Ok(())
}

/// Resolves with the in-flight response; never resolves when idle.
async fn wait_for(in_flight: &mut Option<InFlight<'_>>) -> Result<GeneratedImage, GenerationError> {
    match in_flight {
        Some(in_flight) => in_flight.response.as_mut().await,
        None => std::future::pending().await,
    }
}

fn execute<'a>(
    editor: &mut Editor,
    generator: &'a HttpImageGenerator,
    export_dir: &Path,
    in_flight: &mut Option<InFlight<'a>>,
    command: Command,
) -> Result<()> {
    match command {
        Command::Style(style) => editor.set_style(style),
        Command::Aspect(ratio) => editor.set_aspect_ratio(ratio),
        Command::Resolution(pixels) => editor.set_resolution(pixels)?,
        Command::Describe(text) => editor.set_description(text),
        Command::Add(text) => {
            if !editor.can_generate() {
                bail!("A scene is already being generated.");
            }
            if let Some(text) = text {
                editor.set_description(text);
            }
            let pending = match editor.begin_generation() {
                Ok(pending) => pending,
                // Already reported through the notifier.
                Err(EditorError::Validation(_)) => return Ok(()),
                Err(e) => return Err(e.into()),
            };
            println!("Generating \"{}\"...", pending.description());
            let request = pending.request().clone();
            let response: Response<'a> =
                Box::pin(async move { generator.generate(&request).await });
            *in_flight = Some(InFlight { pending, response });
        }
        Command::Up(index) => move_scene(editor, index, MoveDirection::Up),
        Command::Down(index) => move_scene(editor, index, MoveDirection::Down),
        Command::Delete(index) => {
            editor.delete_scene(index)?;
        }
        Command::List => console::print_list(editor),
        Command::Preview => console::print_preview(&editor.preview()),
        Command::Export(dir) => {
            let dir = dir.as_deref().unwrap_or(export_dir);
            let path = editor.export().write_to_dir(dir)?;
            println!("Wrote {}", path.display());
        }
        Command::Input => console::print_input(editor),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

fn move_scene(editor: &mut Editor, index: usize, direction: MoveDirection) {
    if !editor.move_scene(index, direction) {
        let word = match direction {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
        };
        eprintln!("Scene {} cannot move {}.", index + 1, word);
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
