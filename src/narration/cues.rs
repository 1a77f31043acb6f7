//! Narration wording
//!
//! Every cue is a list of segments read one after another. Lessons target
//! French speakers, so the wording is French.

use crate::lesson::ExerciseKind;

/// Spoken name of a single character
pub fn letter_name(c: char) -> String {
    if c == ';' {
        "le point virgule".to_string()
    } else if c.is_uppercase() {
        format!("{} majuscule", c.to_lowercase())
    } else {
        c.to_string()
    }
}

/// Name of the first letter of `word`; empty for an empty word
pub fn first_letter(word: &str) -> String {
    word.chars().next().map(letter_name).unwrap_or_default()
}

pub fn opening(level: &str, exercise: &str) -> Vec<String> {
    vec![format!(
        "Commencez: {}, {}. Appuyez sur espace après chaque mot.",
        level, exercise
    )]
}

/// Sentence (for phrases), current word and its first letter
pub fn announce(kind: ExerciseKind, sentence: &[String], word: &str) -> Vec<String> {
    let mut segments = Vec::with_capacity(4);
    match kind {
        ExerciseKind::Phrase => {
            segments.push("Phrase à taper:".to_string());
            segments.push(sentence.join(" "));
            segments.push(format!("Mot actuel dans la phrase: {}", word));
        }
        ExerciseKind::WordList => segments.push(format!("Mot à taper: {}", word)),
    }
    segments.push(format!("Première lettre: {}", first_letter(word)));
    segments
}

pub fn mismatch(kind: ExerciseKind) -> Vec<String> {
    let text = match kind {
        ExerciseKind::Phrase => "Erreur dans la phrase! Réessayez.",
        ExerciseKind::WordList => "Erreur! Réessayez ce mot.",
    };
    vec![text.to_string()]
}

pub fn retry() -> Vec<String> {
    vec!["Erreur! Réessayez!".to_string()]
}

pub fn word_correct(kind: ExerciseKind) -> String {
    match kind {
        ExerciseKind::Phrase => "Mot correct dans la phrase!".to_string(),
        ExerciseKind::WordList => "Mot correct!".to_string(),
    }
}

pub fn next_word(word: &str) -> Vec<String> {
    vec![
        "Prochain mot:".to_string(),
        word.to_string(),
        format!("Première lettre: {}", first_letter(word)),
    ]
}

pub fn sentence_done(kind: ExerciseKind) -> String {
    match kind {
        ExerciseKind::Phrase => "Phrase complétée avec succès!".to_string(),
        ExerciseKind::WordList => "Liste de mots complétée!".to_string(),
    }
}

/// `pass` sentences done out of `required`
pub fn replay(pass: u32, required: u32) -> String {
    format!("Rejouez encore! Passage {} sur {}.", pass + 1, required)
}

pub fn next_exercise(name: &str) -> String {
    format!("Prêt pour: {}", name)
}

pub fn level_done(finished: &str, next: &str) -> Vec<String> {
    vec![
        format!("Niveau {} terminé!", finished),
        format!("Niveau suivant: {}", next),
    ]
}

pub fn lesson_done() -> String {
    "Vous avez terminé la leçon! Voulez-vous télécharger vos résultats?".to_string()
}

/// Spell `word` one character at a time
pub fn spell(kind: ExerciseKind, word: &str) -> Vec<String> {
    let intro = match kind {
        ExerciseKind::Phrase => "Épellation du mot dans la phrase:",
        ExerciseKind::WordList => "Épellation du mot:",
    };
    std::iter::once(intro.to_string())
        .chain(word.chars().map(letter_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_names() {
        assert_eq!(letter_name('a'), "a");
        assert_eq!(letter_name('P'), "p majuscule");
        assert_eq!(letter_name('É'), "é majuscule");
        assert_eq!(letter_name(';'), "le point virgule");
    }

    #[test]
    fn test_first_letter_of_empty_word() {
        assert_eq!(first_letter(""), "");
        assert_eq!(
            announce(ExerciseKind::WordList, &[], ""),
            vec!["Mot à taper: ", "Première lettre: "]
        );
    }

    #[test]
    fn test_phrase_announcement_reads_sentence() {
        let sentence = vec!["Les".to_string(), "Pommes".to_string()];
        let segments = announce(ExerciseKind::Phrase, &sentence, "Les");
        assert_eq!(segments[1], "Les Pommes");
        assert_eq!(segments[3], "Première lettre: l majuscule");
    }

    #[test]
    fn test_spell_names_each_letter() {
        let segments = spell(ExerciseKind::WordList, "l;A");
        assert_eq!(
            segments,
            vec!["Épellation du mot:", "l", "le point virgule", "a majuscule"]
        );
    }
}
