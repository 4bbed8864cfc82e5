/*!
 * End-to-end tests for the extraction pipeline: orchestration, bounded
 * retry, and the alignment/purity invariants over accepted results.
 */

use bicorpus::errors::ExtractionError;
use bicorpus::providers::MockChatProvider;
use bicorpus::ExtractionPipeline;

use crate::common::payloads;

const SOURCE: &str = "Hello there 你好";

#[tokio::test]
async fn test_extract_withCleanResponse_shouldAcceptOnFirstCall() {
    let provider = MockChatProvider::scripted(&[&payloads::clean_reply(SOURCE)]);
    let pipeline = ExtractionPipeline::new(&provider);

    let result = pipeline.extract(SOURCE).await.unwrap();

    assert_eq!(provider.call_count(), 1);
    assert_eq!(result.original_text, SOURCE);
    assert_eq!(result.english_text, "Hello there");
    assert_eq!(result.chinese_text, "你好");
}

#[tokio::test]
async fn test_extract_withFencedResponse_shouldNormalizeAndAccept() {
    let reply = payloads::fenced(&payloads::clean_reply(SOURCE));
    let provider = MockChatProvider::scripted(&[&reply]);
    let pipeline = ExtractionPipeline::new(&provider);

    let result = pipeline.extract(SOURCE).await.unwrap();
    assert_eq!(result.english_lines().len(), result.chinese_lines().len());
}

#[tokio::test]
async fn test_extract_acceptedResult_shouldSatisfyAlignmentInvariant() {
    let reply = payloads::extraction_reply(
        SOURCE,
        &[
            ("I would like to check in please", "我想办理入住"),
            ("Where is the station?", "车站在哪里？"),
        ],
        &[("hotel", "酒店"), ("station", "车站")],
    );
    let provider = MockChatProvider::scripted(&[&reply]);
    let pipeline = ExtractionPipeline::new(&provider);

    let result = pipeline.extract(SOURCE).await.unwrap();

    let en_count = result.english_text.split('\n').count();
    let zh_count = result.chinese_text.split('\n').count();
    assert_eq!(en_count, 4);
    assert_eq!(en_count, zh_count);
    // Sentence pairs come first; classification downstream is positional.
    assert!(result.english_lines()[0].contains("check in"));
}

#[tokio::test]
async fn test_extract_withImpureThenCleanResponse_shouldRetryOnceAndAccept() {
    let provider = MockChatProvider::scripted(&[
        &payloads::impure_reply(SOURCE),
        &payloads::clean_reply(SOURCE),
    ]);
    let pipeline = ExtractionPipeline::new(&provider);

    let result = pipeline.extract(SOURCE).await.unwrap();

    assert_eq!(provider.call_count(), 2);
    assert_eq!(result.chinese_text, "你好");
}

#[tokio::test]
async fn test_extract_retryPrompt_shouldEmbedViolationAndContract() {
    let provider = MockChatProvider::scripted(&[
        &payloads::impure_reply(SOURCE),
        &payloads::clean_reply(SOURCE),
    ]);
    let pipeline = ExtractionPipeline::new(&provider);
    pipeline.extract(SOURCE).await.unwrap();

    let prompts = provider.recorded_prompts();
    assert_eq!(prompts.len(), 2);

    let retry_prompt = &prompts[1].1;
    // The model-facing correction names the offending line and column.
    assert!(retry_prompt.contains("Line 1"));
    assert!(retry_prompt.contains("hello there"));
    // The output contract is restated in full.
    assert!(retry_prompt.contains("\"sentencePairs\""));
    assert!(retry_prompt.contains("no part-of-speech tags"));
    // The unchanged source context is repeated.
    assert!(retry_prompt.contains(SOURCE));
}

#[tokio::test]
async fn test_extract_withTwoImpureResponses_shouldMakeExactlyTwoCallsAndFail() {
    let provider = MockChatProvider::scripted(&[
        &payloads::impure_reply(SOURCE),
        &payloads::impure_reply(SOURCE),
        // A third reply is queued; a compliant orchestrator never asks for it.
        &payloads::clean_reply(SOURCE),
    ]);
    let pipeline = ExtractionPipeline::new(&provider);

    let result = pipeline.extract(SOURCE).await;

    assert_eq!(provider.call_count(), 2);
    assert!(matches!(result, Err(ExtractionError::Validation(_))));
}

#[tokio::test]
async fn test_extract_withUnparseableResponse_shouldFailWithoutRetry() {
    let clean = payloads::clean_reply(SOURCE);
    let provider = MockChatProvider::scripted(&["this is not json", clean.as_str()]);
    let pipeline = ExtractionPipeline::new(&provider);

    let result = pipeline.extract(SOURCE).await;

    assert_eq!(provider.call_count(), 1);
    assert!(matches!(result, Err(ExtractionError::InvalidJson(_))));
}

#[tokio::test]
async fn test_extract_withEmptyResponse_shouldFailHard() {
    let provider = MockChatProvider::empty();
    let pipeline = ExtractionPipeline::new(&provider);

    let result = pipeline.extract(SOURCE).await;

    assert_eq!(provider.call_count(), 1);
    assert!(matches!(result, Err(ExtractionError::EmptyResponse)));
}

#[tokio::test]
async fn test_extract_withNoRecognizedShape_shouldFailWithoutRetry() {
    let provider = MockChatProvider::scripted(&[
        r#"{"originalText": "Hello", "something": "else"}"#,
    ]);
    let pipeline = ExtractionPipeline::new(&provider);

    let result = pipeline.extract(SOURCE).await;

    assert_eq!(provider.call_count(), 1);
    assert!(matches!(result, Err(ExtractionError::NoPairs)));
}

#[tokio::test]
async fn test_extract_withParallelLinesFallback_shouldAccept() {
    let reply = payloads::parallel_lines_reply(
        "Hello. World.",
        &["Hello", "World"],
        &["你好", "世界"],
    );
    let provider = MockChatProvider::scripted(&[&reply]);
    let pipeline = ExtractionPipeline::new(&provider);

    let result = pipeline.extract(SOURCE).await.unwrap();
    assert_eq!(result.line_count(), 2);
}

#[tokio::test]
async fn test_extract_withGenuineLengthMismatch_shouldFailWithBothLengths() {
    // Trailing Chinese entry is blank but English row 2 is not, so nothing
    // may be truncated and the mismatch surfaces as a hard error.
    let reply = payloads::parallel_lines_reply("Hello.", &["Hello", "World"], &["你好"]);
    let provider = MockChatProvider::scripted(&[&reply]);
    let pipeline = ExtractionPipeline::new(&provider);

    let result = pipeline.extract(SOURCE).await;
    assert!(matches!(
        result,
        Err(ExtractionError::LengthMismatch { en: 2, zh: 1 })
    ));
}

#[tokio::test]
async fn test_extract_withTransportFailure_shouldSurfaceProviderError() {
    let provider = MockChatProvider::failing("connection refused");
    let pipeline = ExtractionPipeline::new(&provider);

    let result = pipeline.extract(SOURCE).await;
    assert!(matches!(result, Err(ExtractionError::Provider(_))));
}

#[tokio::test]
async fn test_extract_acceptedResult_shouldSatisfyPurityInvariant() {
    let reply = payloads::extraction_reply(
        SOURCE,
        &[("Good morning", "早上好")],
        &[("morning", "早上")],
    );
    let provider = MockChatProvider::scripted(&[&reply]);
    let pipeline = ExtractionPipeline::new(&provider);

    let result = pipeline.extract(SOURCE).await.unwrap();

    for line in result.english_lines() {
        assert!(!line.chars().any(|c| ('\u{3400}'..='\u{9FFF}').contains(&c)));
    }
    for line in result.chinese_lines() {
        assert!(line.chars().any(|c| ('\u{3400}'..='\u{9FFF}').contains(&c)));
    }
}
