// Narration pipeline: walk the pages, skip blanks, queue the rest
use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::pdf_extraction::PageSource;
use crate::speech::Voice;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NarrationSummary {
    pub pages_total: usize,
    pub pages_spoken: usize,
    pub pages_skipped: usize,
}

/// Queue every non-blank page of `source` on `voice`, then flush once so
/// the whole document plays back to back. `from`/`to` are 1-based and
/// clamped to the document.
pub fn narrate(
    source: &dyn PageSource,
    voice: &mut dyn Voice,
    from: Option<usize>,
    to: Option<usize>,
) -> Result<NarrationSummary> {
    let page_count = source.page_count();
    if page_count == 0 {
        return Ok(NarrationSummary::default());
    }

    let (first, last) = resolve_range(page_count, from, to)?;
    let mut summary = NarrationSummary {
        pages_total: last - first + 1,
        ..Default::default()
    };

    for index in first..=last {
        let text = source.page_text(index)?;
        let text = text.trim();
        if text.is_empty() {
            debug!(page = index + 1, "skipping blank page");
            summary.pages_skipped += 1;
            continue;
        }

        info!(page = index + 1, chars = text.len(), "queueing page");
        voice.enqueue(text)?;
        summary.pages_spoken += 1;
    }

    debug!(queued = voice.queued(), "flushing speech queue");
    voice.flush()?;
    Ok(summary)
}

// Map the 1-based user range onto 0-based page indices. Out-of-range
// values are clamped to the document; an inverted range is an error.
fn resolve_range(
    page_count: usize,
    from: Option<usize>,
    to: Option<usize>,
) -> Result<(usize, usize)> {
    let first = from.unwrap_or(1).clamp(1, page_count);
    let last = to.unwrap_or(page_count).clamp(1, page_count);
    if first > last {
        bail!("inverted page range: {}..{}", first, last);
    }
    Ok((first - 1, last - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::SpeechError;

    struct FakeSource {
        pages: Vec<&'static str>,
    }

    impl PageSource for FakeSource {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_text(&self, page_index: usize) -> Result<String> {
            Ok(self.pages[page_index].to_string())
        }
    }

    #[derive(Default)]
    struct RecordingVoice {
        utterances: Vec<String>,
        pending: usize,
        flushes: usize,
    }

    impl Voice for RecordingVoice {
        fn enqueue(&mut self, text: &str) -> Result<(), SpeechError> {
            self.utterances.push(text.to_string());
            self.pending += 1;
            Ok(())
        }

        fn flush(&mut self) -> Result<(), SpeechError> {
            self.pending = 0;
            self.flushes += 1;
            Ok(())
        }

        fn queued(&self) -> usize {
            self.pending
        }
    }

    #[test]
    fn queues_one_utterance_per_non_blank_page() {
        let source = FakeSource {
            pages: vec!["page one", "   \n\t ", "page three", ""],
        };
        let mut voice = RecordingVoice::default();

        let summary = narrate(&source, &mut voice, None, None).unwrap();

        assert_eq!(voice.utterances, vec!["page one", "page three"]);
        assert_eq!(voice.flushes, 1);
        assert_eq!(summary.pages_total, 4);
        assert_eq!(summary.pages_spoken, 2);
        assert_eq!(summary.pages_skipped, 2);
    }

    #[test]
    fn all_blank_pages_speak_nothing() {
        let source = FakeSource {
            pages: vec!["", "  ", "\n"],
        };
        let mut voice = RecordingVoice::default();

        let summary = narrate(&source, &mut voice, None, None).unwrap();

        assert!(voice.utterances.is_empty());
        assert_eq!(summary.pages_spoken, 0);
        assert_eq!(summary.pages_skipped, 3);
    }

    #[test]
    fn single_page_hello() {
        let source = FakeSource {
            pages: vec!["Hello"],
        };
        let mut voice = RecordingVoice::default();

        let summary = narrate(&source, &mut voice, None, None).unwrap();

        assert_eq!(voice.utterances, vec!["Hello"]);
        assert_eq!(summary.pages_spoken, 1);
    }

    #[test]
    fn page_text_is_trimmed_before_speaking() {
        let source = FakeSource {
            pages: vec!["  Hello\n"],
        };
        let mut voice = RecordingVoice::default();

        narrate(&source, &mut voice, None, None).unwrap();

        assert_eq!(voice.utterances, vec!["Hello"]);
    }

    #[test]
    fn range_narrows_the_loop() {
        let source = FakeSource {
            pages: vec!["one", "two", "three", "four"],
        };
        let mut voice = RecordingVoice::default();

        let summary = narrate(&source, &mut voice, Some(2), Some(3)).unwrap();

        assert_eq!(voice.utterances, vec!["two", "three"]);
        assert_eq!(summary.pages_total, 2);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(resolve_range(3, Some(10), None).unwrap(), (2, 2));
        assert_eq!(resolve_range(3, None, Some(10)).unwrap(), (0, 2));
        assert_eq!(resolve_range(3, Some(0), Some(0)).unwrap(), (0, 0));
        assert_eq!(resolve_range(5, Some(2), Some(4)).unwrap(), (1, 3));
    }

    #[test]
    fn inverted_range_is_an_error() {
        assert!(resolve_range(5, Some(4), Some(2)).is_err());

        let source = FakeSource {
            pages: vec!["one", "two", "three", "four"],
        };
        let mut voice = RecordingVoice::default();

        assert!(narrate(&source, &mut voice, Some(4), Some(2)).is_err());
        assert!(voice.utterances.is_empty());
        assert_eq!(voice.flushes, 0);
    }

    #[test]
    fn queued_tracks_pending_utterances_across_flush() {
        let mut voice = RecordingVoice::default();
        voice.enqueue("one").unwrap();
        voice.enqueue("two").unwrap();
        assert_eq!(voice.queued(), 2);

        voice.flush().unwrap();
        assert_eq!(voice.queued(), 0);

        let source = FakeSource {
            pages: vec!["one", "", "two"],
        };
        let summary = narrate(&source, &mut voice, None, None).unwrap();
        assert_eq!(summary.pages_spoken, 2);
        // narrate flushes once at the end, so nothing is left queued
        assert_eq!(voice.queued(), 0);
    }

    #[test]
    fn empty_document_is_a_no_op() {
        let source = FakeSource { pages: vec![] };
        let mut voice = RecordingVoice::default();

        let summary = narrate(&source, &mut voice, None, None).unwrap();

        assert_eq!(summary, NarrationSummary::default());
        assert_eq!(voice.flushes, 0);
    }
}
