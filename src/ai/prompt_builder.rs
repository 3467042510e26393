//! Prompt text for the two summarization passes.

use crate::core::models::SummaryLevel;

/// Instruction shared by both passes so the model does not pad its answer.
const GROUND_RULES: &str = "Write in the language the conversation is written in. \
Do not translate or interpret, and do not add anything that is not in the text. \
Output only the summary.";

/// Prompt for one chunk of raw conversation (`timestamp | author: content` lines).
#[must_use]
pub fn build_chunk_prompt(level: SummaryLevel, chunk: &str) -> String {
    format!(
        "Summarize the following chat conversation {}. Keep only the key points. {GROUND_RULES}\n\n{chunk}",
        level.instruction()
    )
}

/// Prompt for the reduction pass over the joined per-chunk summaries.
#[must_use]
pub fn build_final_prompt(level: SummaryLevel, combined: &str) -> String {
    format!(
        "The following are summaries of consecutive parts of one chat conversation, in order. \
Merge them into a single coherent summary of the whole conversation, written {}. \
{GROUND_RULES}\n\n{combined}",
        level.instruction()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_prompt_ends_with_chunk() {
        let prompt = build_chunk_prompt(SummaryLevel::Simple, "2024-01-01 10:00:00 | ann: hi\n");
        assert!(prompt.ends_with("\n\n2024-01-01 10:00:00 | ann: hi\n"));
        assert!(prompt.contains(SummaryLevel::Simple.instruction()));
    }

    #[test]
    fn test_final_prompt_uses_level() {
        let prompt = build_final_prompt(SummaryLevel::Detailed, "A\nC");
        assert!(prompt.contains(SummaryLevel::Detailed.instruction()));
        assert!(prompt.ends_with("\n\nA\nC"));
    }
}
