use super::*;
use crate::testing::FakePage;

#[tokio::test]
async fn test_semantic_matches_first() {
    let page = FakePage::new().with_count(".submit", 2);
    let found = MatchStrategy::semantic(".submit").resolve(&page).await.unwrap();
    assert_eq!(found, Some(ElementRef::new(".submit", 0)));
}

#[tokio::test]
async fn test_semantic_no_match() {
    let page = FakePage::new();
    let found = MatchStrategy::semantic(".submit").resolve(&page).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_positional_needs_enough_matches() {
    let page = FakePage::new().with_count("input[type=\"text\"]", 2);

    let second = MatchStrategy::positional("input[type=\"text\"]", 1)
        .resolve(&page)
        .await
        .unwrap();
    assert_eq!(second, Some(ElementRef::new("input[type=\"text\"]", 1)));

    let third = MatchStrategy::positional("input[type=\"text\"]", 2)
        .resolve(&page)
        .await
        .unwrap();
    assert!(third.is_none());
}

#[tokio::test]
async fn test_text_strategy_uses_index() {
    let page = FakePage::new()
        .with_count("button", 3)
        .with_buttons(&["Menu", "Help", "Plan Trip"]);
    let found = MatchStrategy::text("button", &SUBMIT_TEXT_NEEDLES)
        .resolve(&page)
        .await
        .unwrap();
    assert_eq!(found, Some(ElementRef::new("button", 2)));
}

#[tokio::test]
async fn test_submit_chain_prefers_explicit_submit() {
    let page = FakePage::new()
        .with_count("button", 2)
        .with_buttons(&["Calculate", "Other"])
        .with_count("input[type=\"submit\"]", 1);
    let found = resolve_first(&page, &submit_chain()).await.unwrap();
    assert_eq!(found, Some(ElementRef::new("input[type=\"submit\"]", 0)));
}

#[tokio::test]
async fn test_submit_chain_falls_back_to_any_button() {
    let page = FakePage::new()
        .with_count("button", 2)
        .with_buttons(&["Menu", "Close"]);
    let found = resolve_first(&page, &submit_chain()).await.unwrap();
    assert_eq!(found, Some(ElementRef::new("button", 0)));
}

#[tokio::test]
async fn test_resolve_first_skips_failing_strategy() {
    let page = FakePage::new()
        .with_failing_selector("input[bad")
        .with_count("#submit", 1);
    let chain = vec![
        MatchStrategy::semantic("input[bad"),
        MatchStrategy::semantic("#submit"),
    ];
    let found = resolve_first(&page, &chain).await.unwrap();
    assert_eq!(found, Some(ElementRef::new("#submit", 0)));
}

#[tokio::test]
async fn test_resolve_first_propagates_closed_session() {
    let page = FakePage::new().closed();
    let err = resolve_first(&page, &submit_chain()).await.unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_attribute_selector() {
    let selector = attribute_selector(&["pickup"]);
    assert_eq!(
        selector,
        "input[placeholder*=\"pickup\" i], input[aria-label*=\"pickup\" i], \
         input[name*=\"pickup\" i], input[id*=\"pickup\" i]"
    );
}

#[test]
fn test_submit_chain_order() {
    let chain = submit_chain();
    assert_eq!(chain.len(), 6);
    assert_eq!(chain[0], MatchStrategy::semantic("button[type=\"submit\"]"));
    assert!(matches!(chain[2], MatchStrategy::Text { .. }));
    assert_eq!(chain[5], MatchStrategy::positional("button", 0));
}
