//! Light markdown clean-up applied to every model reply.
//!
//! The steps run in a fixed order, each one consuming the previous step's
//! output exactly once. Headings and lists are skipped when the text already
//! carries that kind of markup. Emphasis and callouts have no such guard, so
//! formatting a reply twice is not a no-op.

use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};

macro_rules! pattern {
  ($name:ident, $re:literal) => {
    static $name: LazyLock<Regex> =
      LazyLock::new(|| Regex::new($re).expect(concat!("invalid pattern ", stringify!($name))));
  };
}

pattern!(HAS_HEADING, r"(?m)^#+ ");
pattern!(SENTENCE_LINE, r"(?m)^[A-Z][^.!?\n]*(?:[.!?]|$)");

pattern!(HAS_BULLET, r"(?m)^[ \t]*[-*+] ");
pattern!(HAS_ORDERED, r"(?m)^[ \t]*\d+\. ");
pattern!(NUMBERED_LINE, r"(?m)^(\d+)[.)] (.+)$");
pattern!(GLYPH_LINE, r"(?m)^[•○◦] (.+)$");

pattern!(EMPHASIS, r"(?i)\b(important|note|warning|caution|remember)\b");

pattern!(CALLOUT_LABEL, r"^(?:Tip|Note|Warning|Important):");
// The label may already be bold from the emphasis step.
pattern!(
  CALLOUT_LINE,
  r"(?m)^(?:\*\*)?(Tip|Note|Warning|Important)(?:\*\*)?:[ \t]*(.*)$"
);

/// Promote sentence-like lines to `##` headings unless the text already has
/// headings. Callout lines are left for [`callouts`].
fn headings(text: &str) -> Cow<'_, str> {
  if HAS_HEADING.is_match(text) {
    return Cow::Borrowed(text);
  }

  SENTENCE_LINE.replace_all(text, |caps: &Captures<'_>| {
    let line = &caps[0];
    if CALLOUT_LABEL.is_match(line) {
      line.to_owned()
    } else {
      format!("## {line}")
    }
  })
}

/// Normalize `1)` numbering and bullet glyphs unless the text already has
/// markdown lists.
fn lists(text: &str) -> Cow<'_, str> {
  if HAS_BULLET.is_match(text) || HAS_ORDERED.is_match(text) {
    return Cow::Borrowed(text);
  }

  let numbered = NUMBERED_LINE.replace_all(text, "${1}. ${2}");
  Cow::Owned(GLYPH_LINE.replace_all(&numbered, "- ${1}").into_owned())
}

fn emphasis(text: &str) -> Cow<'_, str> {
  EMPHASIS.replace_all(text, "**${1}**")
}

fn callouts(text: &str) -> Cow<'_, str> {
  CALLOUT_LINE.replace_all(text, "> **${1}:** ${2}")
}

/// Run the full formatting pipeline over a raw model reply.
#[must_use]
pub fn format_markdown(raw: &str) -> String {
  let text = headings(raw);
  let text = lists(&text);
  let text = emphasis(&text);
  callouts(&text).into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn warning_line_becomes_callout() {
    assert_eq!(
      format_markdown("Warning: keep away from chocolate."),
      "> **Warning:** keep away from chocolate."
    );
  }

  #[test]
  fn tip_and_note_callouts() {
    let out = format_markdown("# Feeding\nTip: use a slow feeder\nNote: measure portions");
    assert_eq!(
      out,
      "# Feeding\n> **Tip:** use a slow feeder\n> **Note:** measure portions"
    );
  }

  #[test]
  fn emphasis_preserves_case() {
    let out = format_markdown("This is important information.");
    assert!(out.contains("**important**"));
    assert_eq!(out, "## This is **important** information.");

    let out = format_markdown("# Title\nREMEMBER the leash, and Caution near roads.");
    assert!(out.contains("**REMEMBER**"));
    assert!(out.contains("**Caution**"));
  }

  #[test]
  fn emphasis_needs_whole_words() {
    assert_eq!(format_markdown("# x\nnotebook"), "# x\nnotebook");
    assert_eq!(format_markdown("# x\nunimportant"), "# x\nunimportant");
  }

  #[test]
  fn sentence_lines_become_headings() {
    assert_eq!(
      format_markdown("Feeding your puppy\nsmall meals help.\nKeep water fresh!"),
      "## Feeding your puppy\nsmall meals help.\n## Keep water fresh!"
    );
  }

  #[test]
  fn heading_takes_only_first_sentence() {
    assert_eq!(
      format_markdown("Dogs love walks. They also love treats."),
      "## Dogs love walks. They also love treats."
    );
  }

  #[test]
  fn existing_headings_disable_heading_step() {
    let text = "## Care\nBrush daily";
    assert_eq!(headings(text), text);
  }

  #[test]
  fn numbered_and_glyph_lists_are_normalized() {
    assert_eq!(
      lists("steps:\n1) feed\n2) walk\n• brush\n◦ bathe"),
      "steps:\n1. feed\n2. walk\n- brush\n- bathe"
    );
  }

  #[test]
  fn existing_lists_disable_list_step() {
    let text = "- feed\n2) walk\n• brush";
    assert_eq!(lists(text), text);

    let text = "1. feed\n2) walk";
    assert_eq!(lists(text), text);
  }

  #[test]
  fn guarded_steps_are_idempotent() {
    let once = headings("Hello there");
    assert_eq!(headings(&once), once);

    let once = lists("1) feed\n○ walk").into_owned();
    assert_eq!(lists(&once), once);
  }

  #[test]
  fn full_pipeline_is_not_idempotent() {
    let once = format_markdown("Warning: hot pavement");
    let twice = format_markdown(&once);
    assert_ne!(once, twice);
  }

  #[test]
  fn plain_lowercase_text_is_untouched() {
    assert_eq!(format_markdown("just a reply"), "just a reply");
    assert_eq!(format_markdown(""), "");
  }
}
