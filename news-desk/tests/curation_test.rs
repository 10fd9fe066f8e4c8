mod common;

use common::{init_tracing, ScriptedLlm};
use news_desk::types::Headline;
use news_desk::Curator;
use std::sync::Arc;

fn headlines() -> Vec<Headline> {
    [
        "Bitcoin ETF inflows hit record",
        "Fed holds rates steady",
        "SEC sues exchange over staking",
        "Memecoin rallies 40%",
        "Ethereum upgrade date set",
    ]
    .iter()
    .enumerate()
    .map(|(id, title)| Headline {
        id,
        title: title.to_string(),
        source: "Wire".to_string(),
    })
    .collect()
}

#[tokio::test]
async fn uses_ranked_ids_from_the_model() {
    init_tracing();
    let llm = Arc::new(ScriptedLlm::new(Ok("<think>2 looks big</think>2, 0, 4"), Ok("")));
    let curator = Curator::new(llm.clone());

    assert_eq!(curator.select_top(&headlines(), 2, None).await, vec![2, 0]);
    assert_eq!(llm.ranking_calls(), 1);
}

#[tokio::test]
async fn ranking_prompt_is_dated_and_lists_every_candidate() {
    init_tracing();
    let llm = Arc::new(ScriptedLlm::new(Ok("1"), Ok("")));
    let curator = Curator::new(llm.clone());

    curator.select_top(&headlines(), 1, None).await;

    let request = &llm.requests()[0];
    assert!(request.system.starts_with("CRITICAL CONTEXT: Today is "));
    assert!(request.system.contains("spread of distinct stories"));
    assert!(request.user.contains("[0] Bitcoin ETF inflows hit record (Source: Wire)"));
    assert!(request.user.contains("[4] Ethereum upgrade date set (Source: Wire)"));
    assert!(request.user.contains("TOP 1"));
}

#[tokio::test]
async fn model_failure_falls_back_to_input_order() {
    init_tracing();
    let llm = Arc::new(ScriptedLlm::new(Err("timeout"), Ok("")));
    let curator = Curator::new(llm);

    assert_eq!(curator.select_top(&headlines(), 3, None).await, vec![0, 1, 2]);
}

#[tokio::test]
async fn unusable_answer_falls_back_to_input_order() {
    init_tracing();
    let llm = Arc::new(ScriptedLlm::new(Ok("I'd go with the ETF story and 17."), Ok("")));
    let curator = Curator::new(llm);

    assert_eq!(curator.select_top(&headlines(), 2, None).await, vec![0, 1]);
}

#[tokio::test]
async fn empty_input_skips_the_model() {
    init_tracing();
    let llm = Arc::new(ScriptedLlm::new(Ok("0"), Ok("")));
    let curator = Curator::new(llm.clone());

    assert!(curator.select_top(&[], 1, Some("etf")).await.is_empty());
    assert_eq!(llm.ranking_calls(), 0);
}

#[tokio::test]
async fn topic_narrows_candidates() {
    init_tracing();
    let llm = Arc::new(ScriptedLlm::new(Err("down"), Ok("")));
    let curator = Curator::new(llm.clone());

    // fallback order shows which candidates survived the filter
    assert_eq!(curator.select_top(&headlines(), 5, Some("sec")).await, vec![2]);
    assert_eq!(curator.select_top(&headlines(), 5, Some("ETHEREUM")).await, vec![4]);
}

#[tokio::test]
async fn unmatched_topic_behaves_like_no_topic() {
    init_tracing();
    let llm = Arc::new(ScriptedLlm::new(Ok("3, 1"), Ok("")));
    let curator = Curator::new(llm);

    let with_topic = curator.select_top(&headlines(), 2, Some("zzz-no-match")).await;
    let without = curator.select_top(&headlines(), 2, None).await;
    assert_eq!(with_topic, without);
    assert_eq!(without, vec![3, 1]);
}
