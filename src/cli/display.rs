//! Terminal display and UI rendering
//!
//! Features:
//! - Start screen with instructions and options
//! - Lesson screen: target word with typed prefix colour coding
//! - Live errors/accuracy/progress overlay
//! - Narration transcript line

use crate::error::Result;
use crate::lesson::ExerciseKind;
use crate::session::{LessonRunner, Phase, SessionState, SessionSummary};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{
    cursor, execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};
use std::time::Instant;

const RULE_WIDTH: usize = 60;

/// Terminal display manager
pub struct Display {
    /// Whether we're using alternate screen
    use_alternate_screen: bool,
}

impl Display {
    /// Full-screen display, restored on shutdown
    pub fn alternate() -> Result<Self> {
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Display {
            use_alternate_screen: true,
        })
    }

    /// Clear screen
    pub fn clear(&self) -> Result<()> {
        execute!(stdout(), terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        Ok(())
    }

    /// Title, instructions and options before the lesson starts
    pub fn show_start(&self, runner: &LessonRunner) -> Result<()> {
        let mut stdout = stdout();
        let state = runner.state();
        let level = runner.current_level().map_or("", |l| l.name.as_str());
        let exercise = runner.current_exercise().map_or("", |e| e.name.as_str());

        execute!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Cyan),
            SetAttribute(Attribute::Bold),
            Print(&runner.lesson().name),
            SetAttribute(Attribute::Reset),
            ResetColor,
            cursor::MoveTo(0, 1),
            Print(format!("{} - {}", level, exercise)),
            cursor::MoveTo(0, 3),
            SetForegroundColor(Color::Magenta),
            Print("Instructions"),
            ResetColor,
        )?;

        let instructions = [
            "Placez vos pouces sur la barre d'espacement, puis vos index sur les repères des lettres F et J.",
            "Les lettres A, S, D, F, J, K, L et le POINT-VIRGULE (;) sont les touches de la rangée de BASE.",
            "Appuyez sur la touche espace après chaque caractère, mot ou expression demandé.",
            "Ctrl+R répète l'information, Ctrl+S épelle le mot en cours.",
        ];
        for (i, line) in instructions.iter().enumerate() {
            execute!(stdout, cursor::MoveTo(0, 4 + i as u16), Print(line))?;
        }

        let narration = if state.voice_disabled {
            "désactivée"
        } else {
            "activée"
        };
        execute!(
            stdout,
            cursor::MoveTo(0, 9),
            Print(format!("Synthèse vocale: {}  |  Voix: {}", narration, state.voice)),
            cursor::MoveTo(0, 11),
            SetForegroundColor(Color::DarkGrey),
            Print("ENTRÉE pour commencer  |  N synthèse vocale  |  V changer de voix  |  Échap pour quitter"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Names of the current level and exercise
    pub fn show_header(&self, runner: &LessonRunner) -> Result<()> {
        let level = runner.current_level().map_or("", |l| l.name.as_str());
        let exercise = runner.current_exercise().map_or("", |e| e.name.as_str());

        execute!(
            stdout(),
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Cyan),
            SetAttribute(Attribute::Bold),
            Print(level),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("  "),
            Print(exercise),
        )?;
        Ok(())
    }

    /// Errors, accuracy, exercise kind and progress counters
    pub fn show_stats(&self, runner: &LessonRunner) -> Result<()> {
        let state = runner.state();
        let position = state.position;
        let exercises = runner.current_level().map_or(0, |l| l.exercises.len());
        let words = runner.current_sentence().len();
        let accuracy = state.tally.percent();

        execute!(
            stdout(),
            cursor::MoveTo(0, 2),
            Print(format!("Erreurs: {}  |  Précision: ", state.errors())),
            SetForegroundColor(if accuracy > 90.0 {
                Color::Green
            } else if accuracy > 80.0 {
                Color::Yellow
            } else {
                Color::Red
            }),
            Print(format!("{}%", state.tally.display())),
            ResetColor,
            Print(format!(
                "  |  Type: {}  |  Exercice: {}/{}  |  Mot: {}/{}  |  Temps: {}s",
                runner.current_kind().label(),
                position.exercise + 1,
                exercises,
                position.word + 1,
                words,
                state.duration_secs() as u64
            )),
        )?;
        Ok(())
    }

    /// Full sentence for phrases, current word highlighted
    pub fn show_sentence(&self, runner: &LessonRunner) -> Result<()> {
        if runner.current_kind() != ExerciseKind::Phrase {
            return Ok(());
        }

        let mut stdout = stdout();
        execute!(stdout, cursor::MoveTo(0, 4))?;
        for (i, word) in runner.current_sentence().iter().enumerate() {
            let color = if i == runner.state().position.word {
                Color::White
            } else {
                Color::DarkGrey
            };
            execute!(stdout, SetForegroundColor(color), Print(word), Print(" "), ResetColor)?;
        }
        Ok(())
    }

    /// Target word: typed prefix in green, remaining characters dimmed
    pub fn show_input(&self, target: &str, typed: &str) -> Result<()> {
        let mut stdout = stdout();
        let remaining: String = target.chars().skip(typed.chars().count()).collect();

        execute!(
            stdout,
            cursor::MoveTo(0, 6),
            SetForegroundColor(Color::Yellow),
            Print("Mot: "),
            SetForegroundColor(Color::Green),
            Print(typed),
            SetForegroundColor(Color::DarkGrey),
            Print(remaining),
            ResetColor,
        )?;
        Ok(())
    }

    /// Latest narration text
    pub fn show_transcript(&self, transcript: &str) -> Result<()> {
        execute!(
            stdout(),
            cursor::MoveTo(0, 8),
            SetForegroundColor(Color::Blue),
            Print("─".repeat(RULE_WIDTH)),
            ResetColor,
            cursor::MoveTo(0, 9),
            Print("♪ "),
            Print(transcript),
        )?;
        Ok(())
    }

    pub fn show_paused(&self) -> Result<()> {
        execute!(
            stdout(),
            cursor::MoveTo(0, 11),
            SetForegroundColor(Color::Magenta),
            Print("En pause: appuyez sur ENTRÉE pour reprendre"),
            ResetColor,
        )?;
        Ok(())
    }

    /// Show help text
    pub fn show_help(&self) -> Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 13),
            SetForegroundColor(Color::DarkGrey),
            Print("ESPACE valide le mot  |  Ctrl+R répéter  |  Ctrl+S épeler  |  Ctrl+V voix  |  Échap pause  |  Ctrl+Q quitter"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Render the whole lesson screen
    pub fn render_lesson(&self, runner: &LessonRunner, transcript: &str) -> Result<()> {
        self.clear()?;
        self.show_header(runner)?;
        self.show_stats(runner)?;
        self.show_sentence(runner)?;
        self.show_input(runner.current_word(), &runner.state().partial)?;
        self.show_transcript(transcript)?;
        if !runner.state().focused {
            self.show_paused()?;
        }
        self.show_help()
    }

    /// Reset terminal state and cleanup
    pub fn shutdown(&mut self) -> Result<()> {
        if self.use_alternate_screen {
            self.use_alternate_screen = false;
            execute!(stdout(), LeaveAlternateScreen, cursor::Show)?;
        }
        Ok(())
    }
}

/// Tracks the elapsed second last drawn by the stats line
#[derive(Debug, Default)]
pub struct ElapsedClock {
    shown: Option<u64>,
}

impl ElapsedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the lesson is running and the shown time is stale
    pub fn tick(&mut self, state: &SessionState, now: Instant) -> bool {
        if state.phase != Phase::InProgress {
            return false;
        }
        let secs = state.duration_at(now).as_secs();
        if self.shown == Some(secs) {
            return false;
        }
        self.shown = Some(secs);
        true
    }
}

/// Plain-text end of session report, printed after the terminal is restored
pub fn print_summary(summary: &SessionSummary) {
    println!("\nVous avez terminé la leçon");
    if let Some(ended_at) = summary.ended_at {
        println!("Fin du jeu à : {}", ended_at.format("%H:%M:%S"));
    }
    println!(
        "Erreurs: {} | Précision: {:.2}% | Temps: {} secondes",
        summary.errors, summary.accuracy, summary.elapsed_secs
    );
    if !summary.problematic_chars.is_empty() {
        println!(
            "Caractères problématiques: {}",
            summary
                .problematic_chars
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if !summary.confusions.is_empty() {
        println!(
            "Confusions fréquentes: {}",
            summary
                .confusions
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_clock_ticks_once_per_second() {
        let t0 = Instant::now();
        let state = SessionState {
            phase: Phase::InProgress,
            started_at: Some(t0),
            ..SessionState::default()
        };
        let mut clock = ElapsedClock::new();

        assert!(clock.tick(&state, t0));
        assert!(!clock.tick(&state, t0 + Duration::from_millis(400)));
        assert!(clock.tick(&state, t0 + Duration::from_millis(1_100)));
        assert!(!clock.tick(&state, t0 + Duration::from_millis(1_900)));
        assert!(clock.tick(&state, t0 + Duration::from_secs(2)));
    }

    #[test]
    fn test_clock_idle_outside_lesson() {
        let mut clock = ElapsedClock::new();
        let mut state = SessionState::new();
        assert!(!clock.tick(&state, Instant::now()));

        state.phase = Phase::Ended;
        state.elapsed = Some(Duration::from_secs(3));
        assert!(!clock.tick(&state, Instant::now()));
    }
}
