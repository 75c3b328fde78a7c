use crate::oracle::Verdict;
use std::fmt::Write;

const INSTRUCTION: &str = "Analyze the list of decrypted texts below. Identify the single \
text that reads most like natural English, either a complete sentence or a real word. \
Ignore texts that are gibberish. Output ONLY:\n\n\
**Best Sentence/word: [BEST_SENTENCE/BEST_WORD] (Key: [KEY]) (Confidence: XX%)**\n\n\
List:\n";

const MARKERS: [&str; 2] = ["Best Sentence/word:", "Best Sentence:"];
const KEY_MARKER: &str = "(Key:";

/// Instruction followed by one `- Text: ... (Key: ...)` line per entry.
pub fn build_prompt(entries: &[(String, String)]) -> String {
    let mut prompt = String::from(INSTRUCTION);
    for (text, label) in entries {
        let _ = writeln!(prompt, "- Text: {} (Key: {})", text, label);
    }
    prompt
}

/// Pulls `Best Sentence/word: sentence (Key: label)` out of a model reply.
/// Replies without a `Best Sentence` marker are not verdicts.
pub fn parse_verdict(reply: &str) -> Option<Verdict> {
    let cleaned = reply.replace("**", "");
    let (pos, marker) = MARKERS
        .iter()
        .filter_map(|m| cleaned.find(m).map(|pos| (pos, *m)))
        .min_by_key(|(pos, _)| *pos)?;
    let body = &cleaned[pos + marker.len()..];

    let key_at = body.find(KEY_MARKER)?;
    let sentence = body[..key_at].trim();
    let rest = &body[key_at + KEY_MARKER.len()..];
    let close = rest.find(')')?;
    let key_label = rest[..close].trim();

    if sentence.is_empty() {
        return None;
    }
    Some(Verdict {
        sentence: sentence.to_string(),
        key_label: key_label.to_string(),
    })
}
