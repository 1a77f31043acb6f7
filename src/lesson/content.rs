//! Lesson content: levels, exercises and sentences
//!
//! Content is read-only for the whole session. Two level layouts are
//! accepted on load:
//! - `{ "name", "exercises": [...] }` with typed exercises
//! - `{ "name", "sentences": [[...]] }`, normalised into a single word list

use crate::error::{Result, TutorError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

const BUILTIN_LESSON: &str = include_str!("../../data/lessons.json");

/// One sentence is an ordered list of words
pub type Sentence = Vec<String>;

/// How an exercise is narrated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseKind {
    /// Words belong to one sentence; the full sentence is read out first
    #[serde(rename = "phrase")]
    Phrase,
    /// Independent words
    #[serde(rename = "word-list", alias = "mots")]
    WordList,
}

impl ExerciseKind {
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseKind::Phrase => "Phrase",
            ExerciseKind::WordList => "Mots",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "type")]
    pub kind: ExerciseKind,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "content", default)]
    pub sentences: Vec<Sentence>,
}

impl Exercise {
    /// Sentence at `idx`, or an empty slice when out of range
    pub fn sentence(&self, idx: usize) -> &[String] {
        self.sentences.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLevel")]
pub struct Level {
    pub name: String,
    pub exercises: Vec<Exercise>,
}

impl Level {
    pub fn exercise(&self, idx: usize) -> Option<&Exercise> {
        self.exercises.get(idx)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Exercises {
        name: String,
        exercises: Vec<Exercise>,
    },
    Sentences {
        name: String,
        sentences: Vec<Sentence>,
    },
}

impl From<RawLevel> for Level {
    fn from(raw: RawLevel) -> Self {
        match raw {
            RawLevel::Exercises { name, exercises } => Level { name, exercises },
            RawLevel::Sentences { name, sentences } => Level {
                exercises: vec![Exercise {
                    kind: ExerciseKind::WordList,
                    name: name.clone(),
                    sentences,
                }],
                name,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(default)]
    pub name: String,
    pub levels: Vec<Level>,
}

/// Content that loads but will behave oddly during a session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentWarning {
    EmptyLevel { level: usize },
    EmptyExercise { level: usize, exercise: usize },
    EmptySentence { level: usize, exercise: usize, sentence: usize },
    EmptyWord { level: usize, exercise: usize, sentence: usize, word: usize },
    WordWithWhitespace { level: usize, exercise: usize, word: String },
}

impl fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentWarning::EmptyLevel { level } => write!(f, "level {} has no exercises", level + 1),
            ContentWarning::EmptyExercise { level, exercise } => {
                write!(f, "level {} exercise {} has no sentences", level + 1, exercise + 1)
            }
            ContentWarning::EmptySentence { level, exercise, sentence } => write!(
                f,
                "level {} exercise {} sentence {} has no words",
                level + 1,
                exercise + 1,
                sentence + 1
            ),
            ContentWarning::EmptyWord { level, exercise, sentence, word } => write!(
                f,
                "level {} exercise {} sentence {} word {} is empty",
                level + 1,
                exercise + 1,
                sentence + 1,
                word + 1
            ),
            ContentWarning::WordWithWhitespace { level, exercise, word } => write!(
                f,
                "level {} exercise {}: word {:?} contains whitespace and can never be completed",
                level + 1,
                exercise + 1,
                word
            ),
        }
    }
}

impl Lesson {
    /// Lesson compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_LESSON, Path::new("<builtin>"))
    }

    /// Load a lesson from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| TutorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, path)
    }

    /// Parse a lesson; `origin` is only used in error messages
    pub fn from_json(content: &str, origin: &Path) -> Result<Self> {
        let lesson: Lesson = serde_json::from_str(content).map_err(|source| TutorError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        for warning in lesson.validate()? {
            log::warn!("{}: {}", origin.display(), warning);
        }

        Ok(lesson)
    }

    /// Reject unusable content, report degraded content
    pub fn validate(&self) -> Result<Vec<ContentWarning>> {
        if self.levels.is_empty() {
            return Err(TutorError::Content("lesson has no levels".to_string()));
        }

        let mut warnings = Vec::new();
        for (l, level) in self.levels.iter().enumerate() {
            if level.exercises.is_empty() {
                warnings.push(ContentWarning::EmptyLevel { level: l });
            }
            for (e, exercise) in level.exercises.iter().enumerate() {
                if exercise.sentences.is_empty() {
                    warnings.push(ContentWarning::EmptyExercise { level: l, exercise: e });
                }
                for (s, sentence) in exercise.sentences.iter().enumerate() {
                    if sentence.is_empty() {
                        warnings.push(ContentWarning::EmptySentence {
                            level: l,
                            exercise: e,
                            sentence: s,
                        });
                    }
                    for (w, word) in sentence.iter().enumerate() {
                        if word.is_empty() {
                            warnings.push(ContentWarning::EmptyWord {
                                level: l,
                                exercise: e,
                                sentence: s,
                                word: w,
                            });
                        } else if word.chars().any(char::is_whitespace) {
                            warnings.push(ContentWarning::WordWithWhitespace {
                                level: l,
                                exercise: e,
                                word: word.clone(),
                            });
                        }
                    }
                }
            }
        }

        Ok(warnings)
    }

    pub fn level(&self, idx: usize) -> Option<&Level> {
        self.levels.get(idx)
    }

    /// Keep only level `number` (1-based), like opening a single lesson page
    pub fn into_single_level(mut self, number: usize) -> Result<Self> {
        let available = self.levels.len();
        if number == 0 || number > available {
            return Err(TutorError::NoSuchLevel {
                requested: number,
                available,
            });
        }

        let level = self.levels.swap_remove(number - 1);
        Ok(Lesson {
            name: self.name,
            levels: vec![level],
        })
    }

    /// Total number of words across all levels
    pub fn word_count(&self) -> usize {
        self.levels
            .iter()
            .flat_map(|level| &level.exercises)
            .flat_map(|exercise| &exercise.sentences)
            .map(Vec::len)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lesson_loads() {
        let lesson = Lesson::builtin().unwrap();
        assert!(!lesson.levels.is_empty());
        assert!(lesson.validate().unwrap().is_empty());

        let first = &lesson.levels[0];
        assert_eq!(first.exercises[0].kind, ExerciseKind::Phrase);
        assert_eq!(first.exercises[1].kind, ExerciseKind::WordList);
    }

    #[test]
    fn test_sentences_layout_becomes_word_list() {
        let json = r#"{ "levels": [ { "name": "s", "sentences": [["s", "ss"]] } ] }"#;
        let lesson = Lesson::from_json(json, Path::new("test")).unwrap();

        let level = &lesson.levels[0];
        assert_eq!(level.exercises.len(), 1);
        assert_eq!(level.exercises[0].kind, ExerciseKind::WordList);
        assert_eq!(level.exercises[0].sentence(0), ["s", "ss"]);
    }

    #[test]
    fn test_kind_accepts_both_spellings() {
        let mots: ExerciseKind = serde_json::from_str(r#""mots""#).unwrap();
        let list: ExerciseKind = serde_json::from_str(r#""word-list""#).unwrap();
        assert_eq!(mots, ExerciseKind::WordList);
        assert_eq!(list, ExerciseKind::WordList);
    }

    #[test]
    fn test_empty_lesson_rejected() {
        let result = Lesson::from_json(r#"{ "levels": [] }"#, Path::new("test"));
        assert!(matches!(result, Err(TutorError::Content(_))));
    }

    #[test]
    fn test_degraded_content_warns() {
        let json = r#"{ "levels": [
            { "name": "a", "exercises": [] },
            { "name": "b", "exercises": [ { "type": "phrase", "name": "x", "content": [[], ["", "two words"]] } ] }
        ] }"#;
        let lesson = Lesson::from_json(json, Path::new("test")).unwrap();
        let warnings = lesson.validate().unwrap();

        assert!(warnings.contains(&ContentWarning::EmptyLevel { level: 0 }));
        assert!(warnings.contains(&ContentWarning::EmptySentence {
            level: 1,
            exercise: 0,
            sentence: 0
        }));
        assert!(warnings.contains(&ContentWarning::EmptyWord {
            level: 1,
            exercise: 0,
            sentence: 1,
            word: 0
        }));
        assert_eq!(warnings.len(), 4);
    }

    #[test]
    fn test_single_level_selection() {
        let lesson = Lesson::builtin().unwrap();
        let name = lesson.levels[2].name.clone();

        let single = lesson.clone().into_single_level(3).unwrap();
        assert_eq!(single.levels.len(), 1);
        assert_eq!(single.levels[0].name, name);

        assert!(matches!(
            lesson.into_single_level(0),
            Err(TutorError::NoSuchLevel { requested: 0, .. })
        ));
    }

    #[test]
    fn test_out_of_range_sentence_is_empty() {
        let exercise = Exercise {
            kind: ExerciseKind::WordList,
            name: String::new(),
            sentences: vec![],
        };
        assert!(exercise.sentence(3).is_empty());
    }
}
