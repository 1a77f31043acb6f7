//! Lesson Typer - narrated home-row typing lessons in the terminal
//!
//! Single-session CLI: pick a lesson (or one of its levels), type every
//! word, get the results written to a file at the end.

use clap::Parser;
use crossterm::event::Event;
use lesson_typer::cli::{print_summary, Action, Display, ElapsedClock, InputHandler};
use lesson_typer::config::TutorConfig;
use lesson_typer::lesson::Lesson;
use lesson_typer::logging;
use lesson_typer::narration::{
    CommandNarrator, Muted, Narrator, SilentNarrator, SoundSink, TerminalBell, Voice,
};
use lesson_typer::session::{LessonRunner, Phase, ResultsFormat};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Longest wait for the closing narration before exiting
const CLOSING_NARRATION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(name = "lesson-typer")]
#[command(about = "Narrated home-row typing lessons")]
struct Args {
    /// Lesson file (JSON); the built-in lesson when omitted
    #[arg(short, long)]
    lesson: Option<PathBuf>,

    /// Play a single level (1-based)
    #[arg(short = 'L', long)]
    level: Option<usize>,

    /// List the lesson's levels and exit
    #[arg(long)]
    list: bool,

    /// Settings file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Player name for the results (asked at the end when omitted)
    #[arg(short, long)]
    player: Option<String>,

    /// Directory the results file is written to
    #[arg(short, long)]
    results_dir: Option<PathBuf>,

    /// Results file format
    #[arg(short, long, value_enum)]
    format: Option<ResultsFormat>,

    /// Narration voice
    #[arg(long, value_enum)]
    voice: Option<Voice>,

    /// Disable narration
    #[arg(long)]
    no_voice: bool,

    /// Text-to-speech command, e.g. "espeak-ng -v {voice}"
    #[arg(long)]
    narrator: Option<String>,

    /// Times each sentence must be typed before moving on
    #[arg(long)]
    repeat: Option<u32>,

    /// No sound cues
    #[arg(short, long)]
    mute: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Settings file first, then command-line overrides
fn build_config(args: &Args) -> TutorConfig {
    let mut config = TutorConfig::load_or_default(args.config.as_deref());

    if let Some(voice) = args.voice {
        config.voice = voice;
    }
    if args.no_voice {
        config.narration_enabled = false;
    }
    if let Some(command) = &args.narrator {
        config.narrator_command = command.split_whitespace().map(str::to_string).collect();
    }
    if let Some(repeat) = args.repeat {
        config.repeat_threshold = repeat;
    }
    if args.mute {
        config.sounds = false;
    }
    if let Some(dir) = &args.results_dir {
        config.results_dir = dir.clone();
    }
    if let Some(format) = args.format {
        config.results_format = format;
    }

    config
}

fn load_lesson(args: &Args) -> lesson_typer::Result<Lesson> {
    let lesson = match &args.lesson {
        Some(path) => Lesson::load(path)?,
        None => Lesson::builtin()?,
    };

    match args.level {
        Some(number) => lesson.into_single_level(number),
        None => Ok(lesson),
    }
}

fn list_levels(lesson: &Lesson) {
    println!("{}", lesson.name);
    for (i, level) in lesson.levels.iter().enumerate() {
        println!(
            "  Leçon {}: {} ({} exercice(s))",
            i + 1,
            level.name,
            level.exercises.len()
        );
    }
}

/// Event loop; returns when the lesson ends or the user quits
fn run_session(
    runner: &mut LessonRunner,
    display: &Display,
    narrator: &mut dyn Narrator,
    sounds: &mut dyn SoundSink,
) -> lesson_typer::Result<()> {
    let input = InputHandler::new();
    let mut clock = ElapsedClock::new();
    let mut transcript = String::new();
    let mut dirty = true;

    loop {
        if let Some(utterance) = runner.take_narration() {
            transcript = utterance.text();
            narrator.speak(&utterance);
            dirty = true;
        }

        if runner.state().is_ended() {
            return Ok(());
        }

        if dirty {
            if runner.state().phase == Phase::NotStarted {
                display.clear()?;
                display.show_start(runner)?;
            } else {
                display.render_lesson(runner, &transcript)?;
            }
            dirty = false;
        }

        let Some(event) = input.read_event()? else {
            // Idle: redraw only to move the timer
            dirty = clock.tick(runner.state(), Instant::now());
            continue;
        };
        if matches!(event, Event::Resize(..)) {
            dirty = true;
        }

        let state = runner.state();
        let Some(action) = InputHandler::action(&event, state.phase, state.focused) else {
            continue;
        };
        dirty = true;

        match action {
            Action::Quit => {
                log::info!("lesson abandoned");
                return Ok(());
            }
            Action::Start => {
                runner.start();
            }
            Action::Type(key) => {
                for cue in runner.handle_key(key).sounds {
                    sounds.play(cue);
                }
            }
            Action::Repeat => {
                runner.repeat_narration();
            }
            Action::Spell => {
                runner.spell_word();
            }
            Action::ToggleVoice => sounds.play(runner.toggle_voice()),
            Action::ToggleNarration => {
                let disabled = !runner.state().voice_disabled;
                runner.set_voice_disabled(disabled);
                if disabled {
                    narrator.cancel();
                }
            }
            Action::Focus => runner.focus(),
            Action::Blur => runner.blur(),
        }
    }
}

fn prompt_player() -> io::Result<String> {
    print!("Veuillez entrer votre nom: ");
    io::stdout().flush()?;

    let mut name = String::new();
    io::stdin().read_line(&mut name)?;
    Ok(name.trim().to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.debug, args.log_file.as_deref())?;

    let config = build_config(&args);
    let lesson = load_lesson(&args)?;

    if args.list {
        list_levels(&lesson);
        return Ok(());
    }

    let mut narrator: Box<dyn Narrator> = match CommandNarrator::new(
        &config.narrator_command,
        &config.male_voice,
        &config.female_voice,
    ) {
        Some(narrator) => Box::new(narrator),
        None => Box::new(SilentNarrator),
    };
    let mut sounds: Box<dyn SoundSink> = if config.sounds {
        Box::new(TerminalBell)
    } else {
        Box::new(Muted)
    };

    let mut runner = LessonRunner::new(lesson, config.runner_options());

    // Terminal setup
    let mut display = Display::alternate()?;
    InputHandler::enable_raw_mode()?;

    let outcome = run_session(&mut runner, &display, narrator.as_mut(), sounds.as_mut());

    // Cleanup
    InputHandler::disable_raw_mode()?;
    display.shutdown()?;
    outcome?;

    if !runner.state().is_ended() {
        println!("Leçon interrompue.");
        return Ok(());
    }

    let player = match &args.player {
        Some(player) => player.clone(),
        None => prompt_player()?,
    };

    if let Some(summary) = runner.summary(&player) {
        print_summary(&summary);
        let path = summary.export(&config.results_dir, config.results_format)?;
        println!("Résultats enregistrés dans {}", path.display());
    }

    // Let the closing narration play out
    narrator.finish(CLOSING_NARRATION_TIMEOUT);
    Ok(())
}
