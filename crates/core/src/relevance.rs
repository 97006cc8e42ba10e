use std::sync::LazyLock;

use pawguide_shared::Variant;
use regex::Regex;

/// Vocabulary of the guided assistant. Greetings and question words are
/// included so small talk is never refused.
const GUIDED_KEYWORDS: &[&str] = &[
  "thanks", "hi", "hello", "why", "what", "who", "pet", "dog", "cat", "bird", "fish", "rabbit",
  "hamster", "guinea pig", "animal", "veterinarian", "vet", "breed", "food", "feed", "training",
  "behavior", "health", "care", "groom", "walk", "toy", "treat", "leash", "collar", "cage",
  "aquarium", "terrarium", "medicine", "vaccination", "puppy", "kitten", "adoption", "shelter",
  "rescue", "spay", "neuter",
];

const INLINE_KEYWORDS: &[&str] = &[
  "pet", "dog", "cat", "bird", "fish", "rabbit", "hamster", "guinea pig", "turtle", "reptile",
  "parrot", "canary", "goldfish", "puppy", "kitten", "animal", "veterinarian", "vet", "feed",
  "food", "treat", "toy", "leash", "collar", "cage", "tank", "aquarium", "terrarium", "breed",
  "training", "behavior", "groom", "walk", "health", "medicine", "vaccination", "flea", "tick",
  "parasite", "adoption", "rescue", "shelter", "neuter", "spay", "litter", "bedding", "habitat",
  "fur", "feather", "scale", "paw", "claw", "beak", "tail", "wing", "fin", "bark", "meow",
  "chirp", "lizard", "snake", "ferret", "gerbil", "mouse", "rat", "chinchilla", "hedgehog",
  "horse", "pony", "goat", "sheep", "chicken", "duck", "goose", "cow", "pig", "farm animal",
];

/// Whole-word core vocabulary, optionally plural, plus veterinary terms.
static INLINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\b(pet|animal|dog|cat|bird|fish)s?\b|\b(veterinar(y|ian)|vet)\b")
    .expect("relevance pattern is valid")
});

#[must_use]
pub const fn keywords(variant: Variant) -> &'static [&'static str] {
  match variant {
    Variant::Guided => GUIDED_KEYWORDS,
    Variant::Inline => INLINE_KEYWORDS,
  }
}

/// Decide whether `query` is something the pet assistant should answer.
///
/// Keywords are matched as plain substrings of the lower-cased query, so a
/// keyword buried inside a longer word ("cat" in "education") still counts.
/// The inline variant additionally accepts whole-word matches of its core
/// vocabulary.
#[must_use]
pub fn is_on_topic(variant: Variant, query: &str) -> bool {
  let query = query.to_lowercase();

  if keywords(variant).iter().any(|k| query.contains(k)) {
    return true;
  }

  match variant {
    Variant::Guided => false,
    Variant::Inline => INLINE_PATTERN.is_match(&query),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keyword_match_is_case_insensitive() {
    for variant in [Variant::Guided, Variant::Inline] {
      assert!(is_on_topic(variant, "Does my Dog need a vaccination?"));
      assert!(is_on_topic(variant, "GUINEA PIG diet"));
    }
  }

  #[test]
  fn unrelated_question_is_off_topic() {
    assert!(!is_on_topic(Variant::Inline, "What is the capital of France?"));
    assert!(!is_on_topic(Variant::Guided, "Explain quantum entanglement"));
  }

  #[test]
  fn guided_accepts_small_talk() {
    assert!(is_on_topic(Variant::Guided, "Hello there"));
    assert!(is_on_topic(Variant::Guided, "What is the capital of France?"));
    assert!(!is_on_topic(Variant::Inline, "Good morning"));
  }

  #[test]
  fn empty_query_is_off_topic() {
    assert!(!is_on_topic(Variant::Guided, ""));
    assert!(!is_on_topic(Variant::Inline, ""));
  }

  #[test]
  fn embedded_keywords_still_match() {
    // "cat" inside "education", "rat" inside "generate".
    assert!(is_on_topic(Variant::Guided, "Public education budgets"));
    assert!(is_on_topic(Variant::Inline, "Generate a report"));
  }

  #[test]
  fn inline_pattern_matches_whole_words() {
    assert!(INLINE_PATTERN.is_match("my cats are noisy"));
    assert!(INLINE_PATTERN.is_match("call the veterinary clinic"));
    assert!(INLINE_PATTERN.is_match("vet"));
    assert!(!INLINE_PATTERN.is_match("petrol prices"));
  }

  #[test]
  fn every_keyword_is_lower_case() {
    for variant in [Variant::Guided, Variant::Inline] {
      for keyword in keywords(variant) {
        assert_eq!(*keyword, keyword.to_lowercase());
      }
    }
  }
}
