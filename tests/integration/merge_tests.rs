/*!
 * Integration tests for the incremental merge engine.
 */

use bicorpus::errors::ExtractionError;
use bicorpus::providers::MockChatProvider;
use bicorpus::{BilingualPair, ClassifyPolicy, ExtractionPipeline, ExtractionResult, MergeEngine};

use crate::common::payloads;

#[tokio::test]
async fn test_merge_emptyAccumulatedPlusOneBatch_shouldYieldAlignedValidResult() {
    let reply = payloads::extraction_reply("Hi.", &[], &[("Hi", "你好")]);
    let provider = MockChatProvider::scripted(&[&reply]);
    let engine = MergeEngine::new(&provider, ClassifyPolicy::default());

    let accumulated = ExtractionResult {
        original_text: String::new(),
        chinese_text: String::new(),
        english_text: String::new(),
    };
    let batch = ExtractionResult {
        original_text: "Hi.".to_string(),
        chinese_text: "你好。".to_string(),
        english_text: "Hi.".to_string(),
    };

    let merged = engine.merge(&accumulated, &[batch]).await.unwrap();

    assert_eq!(merged.english_lines().len(), 1);
    assert_eq!(merged.chinese_lines().len(), 1);
    assert!(bicorpus::validate_purity(&merged.english_lines(), &merged.chinese_lines()).is_ok());
}

#[tokio::test]
async fn test_merge_singleBatch_shouldMatchDirectExtractionPairForPair() {
    // With a model whose dedup is a no-op on a single input, merging an empty
    // corpus with one batch is equivalent to extracting that batch directly.
    let reply = payloads::extraction_reply(
        "Good morning. 早上好。",
        &[("Good morning to you", "祝你早上好")],
        &[("morning", "早上")],
    );

    let extract_provider = MockChatProvider::scripted(&[&reply]);
    let pipeline = ExtractionPipeline::new(&extract_provider);
    let direct = pipeline.extract("Good morning. 早上好。").await.unwrap();

    let merge_provider = MockChatProvider::scripted(&[&reply]);
    let engine = MergeEngine::new(&merge_provider, ClassifyPolicy::default());
    let merged = engine
        .merge(&ExtractionResult::default(), &[direct.clone()])
        .await
        .unwrap();

    assert_eq!(merged.pairs(), direct.pairs());
}

#[tokio::test]
async fn test_merge_withUnparseableResponse_shouldFailAsMergeFailure() {
    let provider = MockChatProvider::scripted(&["not json at all"]);
    let engine = MergeEngine::new(&provider, ClassifyPolicy::default());

    let batch = ExtractionResult::from_pairs("Hi.", &[BilingualPair::new("Hi", "你好")]);
    let result = engine.merge(&ExtractionResult::default(), &[batch]).await;

    match result {
        Err(ExtractionError::MergeFailed(message)) => {
            assert!(message.contains("JSON"));
        }
        other => panic!("expected MergeFailed, got {:?}", other),
    }
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_merge_withImpureResponse_shouldNotRetry() {
    let impure = payloads::extraction_reply("Hi.", &[("Hi", "hi")], &[]);
    let clean = payloads::extraction_reply("Hi.", &[("Hi", "你好")], &[]);
    let provider = MockChatProvider::scripted(&[&impure, &clean]);
    let engine = MergeEngine::new(&provider, ClassifyPolicy::default());

    let batch = ExtractionResult::from_pairs("Hi.", &[BilingualPair::new("Hi", "你好")]);
    let result = engine.merge(&ExtractionResult::default(), &[batch]).await;

    assert!(matches!(result, Err(ExtractionError::MergeFailed(_))));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_merge_withMultipleBatches_shouldPresentLinesInBatchOrder() {
    let reply = payloads::extraction_reply(
        "One. Two.",
        &[],
        &[("one", "一"), ("two", "二")],
    );
    let provider = MockChatProvider::scripted(&[&reply]);
    let engine = MergeEngine::new(&provider, ClassifyPolicy::default());

    let first = ExtractionResult::from_pairs("One.", &[BilingualPair::new("one", "一")]);
    let second = ExtractionResult::from_pairs("Two.", &[BilingualPair::new("two", "二")]);
    engine
        .merge(&ExtractionResult::default(), &[first, second])
        .await
        .unwrap();

    let prompts = provider.recorded_prompts();
    let user_prompt = &prompts[0].1;
    let one_at = user_prompt.find("one | 一").unwrap();
    let two_at = user_prompt.find("two | 二").unwrap();
    assert!(one_at < two_at);
}
