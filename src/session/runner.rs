//! Lesson runner: the keystroke-driven state machine
//!
//! `NotStarted → InProgress → Ended`. Characters are checked one at a
//! time against the current word; the delimiter (space) submits the word.
//! A correct word moves the position forward through
//! word → sentence → exercise → level; the last word of the last level
//! ends the session.
//!
//! Every transition queues a narration cue in a single-slot queue that the
//! front end drains after each event. Sound cues are returned directly.

use super::errors::ErrorDetector;
use super::results::SessionSummary;
use super::state::{Phase, SessionState};
use crate::lesson::{Exercise, ExerciseKind, Lesson, Level};
use crate::narration::{cues, NarrationSlot, SoundCue, Utterance, Voice};
use chrono::Local;
use std::time::Instant;

/// Key that submits a word
pub const DELIMITER: char = ' ';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delimiter,
}

impl Key {
    /// Classify a typed character; control characters are not keys
    pub fn from_char(c: char) -> Option<Self> {
        if c == DELIMITER {
            Some(Key::Delimiter)
        } else if c.is_control() {
            None
        } else {
            Some(Key::Char(c))
        }
    }
}

/// What a keystroke did to the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Not started, unfocused or already ended
    Ignored,
    /// Character appended to the partial input
    Accepted,
    /// Character did not match the expected one
    Mismatch,
    /// Delimiter on an incomplete or wrong word
    Retry,
    NextWord,
    /// Sentence finished but more passes are required
    RepeatSentence,
    NextSentence,
    NextExercise,
    NextLevel,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub transition: Transition,
    pub sounds: Vec<SoundCue>,
}

impl Feedback {
    fn new(transition: Transition, sounds: Vec<SoundCue>) -> Self {
        Feedback { transition, sounds }
    }

    fn ignored() -> Self {
        Self::new(Transition::Ignored, Vec::new())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RunnerOptions {
    pub voice: Voice,
    pub narration_enabled: bool,
    /// Passes required over each sentence before moving on (min 1)
    pub repeat_threshold: u32,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        RunnerOptions {
            voice: Voice::Male,
            narration_enabled: true,
            repeat_threshold: 1,
        }
    }
}

pub struct LessonRunner {
    lesson: Lesson,
    state: SessionState,
    detector: ErrorDetector,
    narration: NarrationSlot,
    repeat_threshold: u32,
}

impl LessonRunner {
    pub fn new(lesson: Lesson, options: RunnerOptions) -> Self {
        let state = SessionState {
            voice: options.voice,
            voice_disabled: !options.narration_enabled,
            ..SessionState::new()
        };

        LessonRunner {
            lesson,
            state,
            detector: ErrorDetector::new(),
            narration: NarrationSlot::new(),
            repeat_threshold: options.repeat_threshold.max(1),
        }
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn detector(&self) -> &ErrorDetector {
        &self.detector
    }

    /// Next narration request for the narrator, if any
    pub fn take_narration(&mut self) -> Option<Utterance> {
        self.narration.take()
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.lesson.level(self.state.position.level)
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.current_level()
            .and_then(|level| level.exercise(self.state.position.exercise))
    }

    pub fn current_kind(&self) -> ExerciseKind {
        self.current_exercise()
            .map_or(ExerciseKind::WordList, |exercise| exercise.kind)
    }

    pub fn current_sentence(&self) -> &[String] {
        self.current_exercise()
            .map(|exercise| exercise.sentence(self.state.position.sentence))
            .unwrap_or(&[])
    }

    /// Word being typed; empty when the content is empty here
    pub fn current_word(&self) -> &str {
        self.current_sentence()
            .get(self.state.position.word)
            .map_or("", String::as_str)
    }

    fn level_name(&self) -> String {
        self.current_level()
            .map(|level| level.name.clone())
            .unwrap_or_default()
    }

    fn exercise_name(&self) -> String {
        self.current_exercise()
            .map(|exercise| exercise.name.clone())
            .unwrap_or_default()
    }

    fn announcement(&self) -> Vec<String> {
        cues::announce(
            self.current_kind(),
            self.current_sentence(),
            self.current_word(),
        )
    }

    fn narrate(&mut self, segments: Vec<String>) {
        if self.state.voice_disabled {
            return;
        }
        self.narration
            .request(Utterance::new(segments, self.state.voice));
    }

    pub fn start(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    /// Begin the lesson; false if it was already started
    pub fn start_at(&mut self, now: Instant) -> bool {
        if self.state.phase != Phase::NotStarted {
            return false;
        }

        self.state.phase = Phase::InProgress;
        self.state.started_at = Some(now);
        self.state.focused = true;
        self.state.sentence_passes = 0;

        log::info!(
            "lesson {:?} started: {} level(s), {} word(s)",
            self.lesson.name,
            self.lesson.levels.len(),
            self.lesson.word_count()
        );

        let mut segments = cues::opening(&self.level_name(), &self.exercise_name());
        segments.extend(self.announcement());
        self.narrate(segments);
        true
    }

    pub fn handle_key(&mut self, key: Key) -> Feedback {
        self.handle_key_at(key, Instant::now())
    }

    /// Process one keystroke received at `now`
    pub fn handle_key_at(&mut self, key: Key, now: Instant) -> Feedback {
        if !self.state.accepts_input() {
            log::trace!("ignored {:?} in {:?}", key, self.state.phase);
            return Feedback::ignored();
        }

        match key {
            Key::Char(c) => self.handle_char(c),
            Key::Delimiter => self.handle_delimiter(now),
        }
    }

    fn handle_char(&mut self, c: char) -> Feedback {
        let (expected, upcoming) = {
            let typed = self.state.partial.chars().count();
            let mut rest = self.current_word().chars().skip(typed);
            (rest.next(), rest.next())
        };

        if expected == Some(c) {
            self.state.partial.push(c);
            self.state.tally.record(true);
            if let Some(next) = upcoming {
                self.narrate(vec![cues::letter_name(next)]);
            }
            return Feedback::new(Transition::Accepted, vec![SoundCue::Type]);
        }

        self.state.tally.record(false);
        if let Some(expected) = expected {
            self.detector.record_error(expected, c);
        }
        log::debug!(
            "mismatch: expected {:?}, got {:?} in {:?}",
            expected,
            c,
            self.current_word()
        );

        self.narrate(cues::mismatch(self.current_kind()));
        Feedback::new(Transition::Mismatch, vec![SoundCue::Type, SoundCue::Error])
    }

    fn handle_delimiter(&mut self, now: Instant) -> Feedback {
        let complete = self.state.partial == self.current_word();
        self.state.partial.clear();

        if complete {
            self.state.tally.record(true);
            let transition = self.advance(now);
            return Feedback::new(transition, vec![SoundCue::Type, SoundCue::Success]);
        }

        self.state.tally.record(false);
        self.narrate(cues::retry());
        Feedback::new(Transition::Retry, vec![SoundCue::Type, SoundCue::Error])
    }

    /// Move past a correctly typed word
    fn advance(&mut self, now: Instant) -> Transition {
        let kind = self.current_kind();
        let pos = self.state.position;
        let mut segments = vec![cues::word_correct(kind)];

        if pos.word + 1 < self.current_sentence().len() {
            self.state.position.word += 1;
            segments.extend(cues::next_word(self.current_word()));
            self.narrate(segments);
            return Transition::NextWord;
        }

        segments.push(cues::sentence_done(kind));

        self.state.sentence_passes += 1;
        if self.state.sentence_passes < self.repeat_threshold {
            self.state.reset_word();
            segments.push(cues::replay(self.state.sentence_passes, self.repeat_threshold));
            segments.extend(self.announcement());
            self.narrate(segments);
            return Transition::RepeatSentence;
        }
        self.state.sentence_passes = 0;

        let sentence_count = self
            .current_exercise()
            .map_or(0, |exercise| exercise.sentences.len());
        let exercise_count = self
            .current_level()
            .map_or(0, |level| level.exercises.len());

        let transition = if pos.sentence + 1 < sentence_count {
            self.state.position.sentence += 1;
            self.state.reset_word();
            Transition::NextSentence
        } else if pos.exercise + 1 < exercise_count {
            self.state.position.exercise += 1;
            self.state.position.sentence = 0;
            self.state.reset_word();
            segments.push(cues::next_exercise(&self.exercise_name()));
            Transition::NextExercise
        } else if pos.level + 1 < self.lesson.levels.len() {
            let finished = self.level_name();
            self.state.position.level += 1;
            self.state.position.exercise = 0;
            self.state.position.sentence = 0;
            self.state.reset_word();
            segments.extend(cues::level_done(&finished, &self.level_name()));
            Transition::NextLevel
        } else {
            self.finish(now);
            segments.push(cues::lesson_done());
            self.narrate(segments);
            return Transition::Completed;
        };

        log::debug!("{:?} → {:?}", transition, self.state.position);
        segments.extend(self.announcement());
        self.narrate(segments);
        transition
    }

    fn finish(&mut self, now: Instant) {
        let elapsed = self
            .state
            .started_at
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default();

        self.state.phase = Phase::Ended;
        self.state.ended_wall = Some(Local::now());
        self.state.elapsed = Some(elapsed);
        self.state.focused = false;

        log::info!(
            "lesson finished: {} error(s), {} keystroke(s), {}% in {:.1}s",
            self.state.errors(),
            self.state.keystrokes(),
            self.state.tally.display(),
            elapsed.as_secs_f64()
        );
        log::debug!(
            "{} narration request(s) superseded before being spoken",
            self.narration.superseded()
        );
    }

    /// Re-announce the current sentence and word
    pub fn repeat_narration(&mut self) -> bool {
        if !self.state.accepts_input() {
            return false;
        }
        let segments = self.announcement();
        self.narrate(segments);
        true
    }

    /// Narrate the current word one character at a time
    pub fn spell_word(&mut self) -> bool {
        if !self.state.accepts_input() {
            return false;
        }
        let segments = cues::spell(self.current_kind(), self.current_word());
        self.narrate(segments);
        true
    }

    pub fn toggle_voice(&mut self) -> SoundCue {
        self.state.voice = self.state.voice.toggled();
        log::debug!("voice switched to {:?}", self.state.voice);
        SoundCue::VoiceChange
    }

    pub fn set_voice_disabled(&mut self, disabled: bool) {
        self.state.voice_disabled = disabled;
        if disabled {
            self.narration.take();
        }
    }

    pub fn focus(&mut self) {
        if self.state.phase == Phase::InProgress {
            self.state.focused = true;
        }
    }

    pub fn blur(&mut self) {
        self.state.focused = false;
    }

    /// Results of an ended session
    pub fn summary(&self, player: &str) -> Option<SessionSummary> {
        if !self.state.is_ended() {
            return None;
        }
        Some(SessionSummary::new(player, &self.state, &self.detector))
    }
}
