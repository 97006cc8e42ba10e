use std::fmt::Write;

use pawguide_ai::Turn;
use pawguide_shared::{Message, PetContext, Variant};

const GUIDED_PERSONA: &str = "\
You are PawGuide, a helpful and friendly pet assistant. \
You only answer questions about pets and animals.";

const INLINE_PERSONA: &str = "\
You are PawGuide, a friendly and knowledgeable pet assistant. \
You provide helpful, accurate information about pet care, behavior, training, nutrition, and health. \
You're conversational, empathetic, and always focus on the wellbeing of pets. \
Only answer questions related to pets and animals.";

const SCOPE: &str = "\
Provide helpful, accurate, and concise information about pet care, behavior, training, nutrition, or health.";

/// Mirrors what the reply formatter expects, so the two don't fight.
const FORMAT_GUIDE: &str = "\
Format your response using markdown: start sections with `## ` headings, \
use `- ` bullets or `1. ` numbered lists, and put tips or cautions on their own line \
starting with `Tip:`, `Note:`, `Warning:` or `Important:`.";

const VET_DEFERRAL: &str = "\
If you're unsure about something, acknowledge the limitations of your knowledge. \
For medical questions you cannot answer with certainty, or any emergency, \
advise consulting a veterinarian.";

/// What the model is actually sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
  pub history: Vec<Turn>,
  pub query: String,
}

fn present(value: Option<&String>) -> Option<&str> {
  value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn describe_pet(out: &mut String, pet: &PetContext) {
  let _ = write!(out, " The user has a {} named {}.", pet.species, pet.name);
  if let Some(breed) = present(pet.breed.as_ref()) {
    let _ = write!(out, " Breed: {breed}.");
  }
  if let Some(age) = present(pet.age.as_ref()) {
    let _ = write!(out, " Age: {age}.");
  }
  if let Some(notes) = present(pet.notes.as_ref()) {
    let _ = write!(out, " Additional information: {notes}.");
  }
  out.push_str(" Please consider this information when providing advice.");
}

/// Build the persona instruction for `variant`. Pet context is only used by
/// the guided variant.
#[must_use]
pub fn persona_instruction(variant: Variant, pet: Option<&PetContext>) -> String {
  let mut out = String::new();
  match variant {
    Variant::Guided => {
      out.push_str(GUIDED_PERSONA);
      if let Some(pet) = pet {
        describe_pet(&mut out, pet);
      }
      let _ = write!(out, " {SCOPE}");
    }
    Variant::Inline => out.push_str(INLINE_PERSONA),
  }
  let _ = write!(out, " {FORMAT_GUIDE} {VET_DEFERRAL}");
  out
}

/// Reshape the conversation for the model.
///
/// `latest` is the index of the latest user message; it becomes the query and
/// is left out of the history. The guided variant sends the persona as the
/// first history turn, the inline variant prepends it to the query.
#[must_use]
pub fn assemble_prompt(
  variant: Variant,
  messages: &[Message],
  latest: usize,
  pet: Option<&PetContext>,
) -> AssembledPrompt {
  let persona = persona_instruction(variant, pet);
  let prior = messages
    .iter()
    .enumerate()
    .filter(|(i, _)| *i != latest)
    .map(|(_, m)| Turn::from(m));
  let latest_query = messages.get(latest).map_or("", |m| m.content.as_str());

  match variant {
    Variant::Guided => AssembledPrompt {
      history: std::iter::once(Turn::model(persona)).chain(prior).collect(),
      query: latest_query.to_owned(),
    },
    Variant::Inline => AssembledPrompt {
      history: prior.collect(),
      query: format!("{persona}\n\nUser query: {latest_query}"),
    },
  }
}
