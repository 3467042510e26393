use tracing::{Instrument, debug, info, info_span, warn};

use crate::ai::Summarize;
use crate::ai::prompt_builder::{build_chunk_prompt, build_final_prompt};
use crate::core::models::{SummaryLevel, SummaryRequest};
use crate::errors::SummaryError;
use crate::utils::segment::segment;

/// Largest chunk of raw conversation sent in one chunk-level call.
pub const MAX_CHUNK_CHARS: usize = 2000;

/// Map-then-reduce summarization over a [`Summarize`] backend.
///
/// Chunks are summarized one after another so partial summaries stay in
/// conversation order, then the partials are merged by one final call.
pub struct SummaryPipeline<S> {
    summarizer: S,
    chunk_chars: usize,
}

impl<S: Summarize> SummaryPipeline<S> {
    #[must_use]
    pub fn new(summarizer: S) -> Self {
        Self {
            summarizer,
            chunk_chars: MAX_CHUNK_CHARS,
        }
    }

    #[must_use]
    pub fn with_chunk_chars(mut self, chunk_chars: usize) -> Self {
        self.chunk_chars = chunk_chars;
        self
    }

    /// Runs [`Self::produce_summary`] inside a span tagged with the request's
    /// correlation id.
    ///
    /// # Errors
    ///
    /// See [`Self::produce_summary`].
    pub async fn run(&self, request: &SummaryRequest) -> Result<String, SummaryError> {
        let span = info_span!(
            "summary",
            correlation_id = %request.correlation_id,
            level = %request.level,
        );
        async {
            info!(
                "Summarizing conversation from {} to {}",
                request.start_time, request.end_time
            );
            self.produce_summary(&request.conversation, request.level)
                .await
        }
        .instrument(span)
        .await
    }

    /// # Errors
    ///
    /// Returns `Summarization` if any chunk call or the final call fails (no
    /// partial result is returned), and `EmptyResult` if there was nothing to
    /// summarize or the final summary is empty.
    pub async fn produce_summary(
        &self,
        conversation: &str,
        level: SummaryLevel,
    ) -> Result<String, SummaryError> {
        if conversation.trim().is_empty() {
            return Err(SummaryError::EmptyResult);
        }

        let chunks = segment(conversation, self.chunk_chars);
        info!("Split conversation into {} chunk(s)", chunks.len());

        let mut partials = Vec::with_capacity(chunks.len());
        for (idx, chunk) in chunks.iter().enumerate() {
            if chunk.trim().is_empty() {
                debug!("Chunk {} is blank, not sending it", idx + 1);
                continue;
            }
            info!("Summarizing chunk {}/{}", idx + 1, chunks.len());
            let partial = self
                .summarizer
                .summarize(&build_chunk_prompt(level, chunk))
                .await?;
            if partial.trim().is_empty() {
                warn!("Chunk {} produced an empty summary, skipping it", idx + 1);
            } else {
                partials.push(partial);
            }
        }

        if partials.is_empty() {
            warn!("Every chunk summary was empty");
            return Err(SummaryError::EmptyResult);
        }

        let combined = partials.join("\n");
        #[cfg(feature = "debug-logs")]
        debug!("Combined chunk summaries:\n{}", combined);
        debug!("Combined {} chunk summaries", partials.len());

        info!("Merging chunk summaries into the final summary");
        let final_summary = self
            .summarizer
            .summarize(&build_final_prompt(level, &combined))
            .await?;

        let final_summary = final_summary.trim();
        if final_summary.is_empty() {
            warn!("Final summary was empty");
            return Err(SummaryError::EmptyResult);
        }
        info!("Final summary generated");
        Ok(final_summary.to_string())
    }
}
