mod common;

use common::init_tracing;
use news_desk::DraftArchive;
use tempfile::TempDir;

fn archive_in(dir: &TempDir) -> DraftArchive {
    DraftArchive::new(dir.path().join("latest_tweet.md"), dir.path().join("tweet_archive.md"))
}

#[tokio::test]
async fn latest_is_overwritten_and_archive_grows() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let drafts = archive_in(&dir);

    drafts.save(&["first draft".to_string()]).await.unwrap();
    drafts
        .save(&["second draft".to_string(), "follow-up".to_string()])
        .await
        .unwrap();

    let latest = std::fs::read_to_string(drafts.latest_path()).unwrap();
    assert_eq!(latest, "second draft\n\n---\n\nfollow-up");

    let archive = std::fs::read_to_string(drafts.archive_path()).unwrap();
    assert_eq!(archive.matches("\n\n--- [").count(), 2);
    let first = archive.find("first draft").unwrap();
    let second = archive.find("second draft\n\n---\n\nfollow-up").unwrap();
    assert!(first < second);

    assert_eq!(drafts.read_latest().await.unwrap().as_deref(), Some(latest.as_str()));
}

#[tokio::test]
async fn missing_draft_reads_as_none() {
    init_tracing();
    let dir = TempDir::new().unwrap();

    assert_eq!(archive_in(&dir).read_latest().await.unwrap(), None);
}
