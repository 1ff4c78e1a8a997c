mod helpers;

use helpers::{test_config, test_tools};
use projectmemory::embedding::mock::HashEmbedder;
use projectmemory::store::ContextStore;
use projectmemory::summarizer::basic::BasicSummarizer;
use projectmemory::summarizer::Summarizer;
use projectmemory::tools::clear_all_context::ClearAllContextParams;
use projectmemory::tools::delete_context::DeleteContextParams;
use projectmemory::tools::replace_context::ReplaceContextParams;
use projectmemory::tools::retrieve_context::RetrieveContextParams;
use projectmemory::tools::save_context::SaveContextParams;
use projectmemory::tools::ContextTools;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn save_params(text: &str) -> SaveContextParams {
    SaveContextParams {
        context_text: text.into(),
    }
}

fn retrieve_params(query: &str, limit: Option<i64>) -> RetrieveContextParams {
    RetrieveContextParams {
        query: query.into(),
        limit,
    }
}

#[tokio::test]
async fn save_and_retrieve_roundtrip() {
    let tools = test_tools();

    let saved = tools.save(save_params("hello world")).await;
    assert_eq!(saved.status, "success");
    assert!(saved.error.is_none());
    let id = saved.id.unwrap();
    assert_eq!(id.len(), 16);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    let retrieved = tools.retrieve(retrieve_params("hello world", Some(1))).await;
    assert_eq!(retrieved.status, "success");
    assert_eq!(retrieved.results, vec!["hello world".to_string()]);
}

#[tokio::test]
async fn replace_overwrites_prior_content() {
    let tools = test_tools();

    let saved = tools.save(save_params("first")).await;
    let id = saved.id.unwrap();

    let replaced = tools
        .replace(ReplaceContextParams {
            id: id.clone(),
            context_text: "second".into(),
        })
        .await;
    assert_eq!(replaced.status, "success");

    let retrieved = tools.retrieve(retrieve_params("second", Some(1))).await;
    assert_eq!(retrieved.results, vec!["second".to_string()]);

    // The prior content is no longer reachable under any query.
    let retrieved = tools.retrieve(retrieve_params("first", Some(10))).await;
    assert_eq!(retrieved.results, vec!["second".to_string()]);
}

#[tokio::test]
async fn clear_all_requires_the_exact_confirmation_literal() {
    let tools = test_tools();
    tools.save(save_params("remember this")).await;

    for bad in ["yes", "Confirm", " confirm ", ""] {
        let response = tools
            .clear_all(ClearAllContextParams {
                confirmation: bad.into(),
            })
            .await;
        assert_eq!(response.status, "error", "accepted {bad:?}");
        assert!(!response.error.as_deref().unwrap().is_empty());
        assert!(response.deleted_count.is_none());
    }

    // The store is unchanged after every rejected attempt.
    let retrieved = tools.retrieve(retrieve_params("remember this", Some(10))).await;
    assert_eq!(retrieved.results.len(), 1);

    let response = tools
        .clear_all(ClearAllContextParams {
            confirmation: "confirm".into(),
        })
        .await;
    assert_eq!(response.status, "success");
    assert_eq!(response.deleted_count, Some(1));

    let retrieved = tools.retrieve(retrieve_params("remember this", Some(10))).await;
    assert_eq!(retrieved.status, "success");
    assert!(retrieved.results.is_empty());
}

#[tokio::test]
async fn delete_is_idempotent_on_missing_ids() {
    let tools = test_tools();

    let first = tools
        .delete(DeleteContextParams {
            id: "deadbeefcafef00d".into(),
        })
        .await;
    assert_eq!(first.status, "success");

    let second = tools
        .delete(DeleteContextParams {
            id: "deadbeefcafef00d".into(),
        })
        .await;
    assert_eq!(second.status, "success");
}

#[tokio::test]
async fn delete_removes_a_saved_entry() {
    let tools = test_tools();
    let id = tools.save(save_params("short lived")).await.id.unwrap();

    let deleted = tools.delete(DeleteContextParams { id }).await;
    assert_eq!(deleted.status, "success");

    let retrieved = tools.retrieve(retrieve_params("short lived", Some(10))).await;
    assert!(retrieved.results.is_empty());
}

#[tokio::test]
async fn omitted_or_non_positive_limit_uses_the_default() {
    let tools = test_tools();
    for i in 0..10 {
        let saved = tools.save(save_params(&format!("snippet number {i}"))).await;
        assert_eq!(saved.status, "success");
    }

    for limit in [None, Some(0), Some(-3)] {
        let retrieved = tools.retrieve(retrieve_params("anything", limit)).await;
        assert_eq!(retrieved.status, "success");
        assert_eq!(retrieved.results.len(), 5, "limit {limit:?}");
    }
}

#[tokio::test]
async fn identical_saves_get_distinct_ids() {
    let tools = test_tools();

    let first = tools.save(save_params("same")).await.id.unwrap();
    let second = tools.save(save_params("same")).await.id.unwrap();
    assert_ne!(first, second);

    let retrieved = tools.retrieve(retrieve_params("same", Some(2))).await;
    assert_eq!(retrieved.results, vec!["same".to_string(), "same".to_string()]);
}

#[tokio::test]
async fn empty_context_text_is_rejected() {
    let tools = test_tools();
    let response = tools.save(save_params("")).await;
    assert_eq!(response.status, "error");
    assert!(response.id.is_none());
    assert!(!response.error.unwrap().is_empty());
}

#[tokio::test]
async fn replace_with_empty_id_is_rejected() {
    let tools = test_tools();
    let response = tools
        .replace(ReplaceContextParams {
            id: String::new(),
            context_text: "text".into(),
        })
        .await;
    assert_eq!(response.status, "error");
    assert!(response.error.unwrap().contains("id"));
}

#[tokio::test]
async fn retrieve_on_empty_store_succeeds_with_no_results() {
    let tools = test_tools();
    let retrieved = tools.retrieve(retrieve_params("anything", None)).await;
    assert_eq!(retrieved.status, "success");
    assert!(retrieved.results.is_empty());
    assert!(retrieved.error.is_none());
}

#[tokio::test]
async fn long_text_is_summarized_before_storage() {
    let tools = test_tools();
    let long_text = format!(
        "This is the part that survives summarization. {}",
        "Filler words to push the text well past the configured bound. ".repeat(10)
    );

    let saved = tools.save(save_params(&long_text)).await;
    assert_eq!(saved.status, "success");

    // With the deterministic embedder, the stored entry is the reference
    // summary of the input.
    let expected = BasicSummarizer::new(200).summarize(&long_text).unwrap();
    assert!(expected.len() <= 200);

    let retrieved = tools.retrieve(retrieve_params(&expected, Some(1))).await;
    assert_eq!(retrieved.results, vec![expected]);
}

#[tokio::test]
async fn success_envelopes_match_the_wire_shape() {
    let tools = test_tools();

    let saved = tools.save(save_params("shape check")).await;
    let value = serde_json::to_value(&saved).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(object["status"], "success");
    assert!(object["id"].is_string());

    let retrieved = tools.retrieve(retrieve_params("shape check", Some(1))).await;
    let value = serde_json::to_value(&retrieved).unwrap();
    assert_eq!(
        value,
        json!({"status": "success", "results": ["shape check"]})
    );

    let deleted = tools
        .delete(DeleteContextParams { id: "absent".into() })
        .await;
    assert_eq!(serde_json::to_value(&deleted).unwrap(), json!({"status": "success"}));

    let replaced = tools
        .replace(ReplaceContextParams {
            id: "1234567890abcdef".into(),
            context_text: "replacement".into(),
        })
        .await;
    assert_eq!(serde_json::to_value(&replaced).unwrap(), json!({"status": "success"}));

    let cleared = tools
        .clear_all(ClearAllContextParams {
            confirmation: "confirm".into(),
        })
        .await;
    assert_eq!(
        serde_json::to_value(&cleared).unwrap(),
        json!({"status": "success", "deleted_count": 2})
    );
}

#[tokio::test]
async fn error_envelopes_match_the_wire_shape() {
    // A store opened at 4 dimensions paired with an 8-dimension embedder:
    // retrieval embeds the query fine, then the scan hits the mismatch.
    let store = ContextStore::open_in_memory(4).unwrap();
    store
        .put(
            "1234567890abcdef",
            "stored entry",
            &projectmemory::vector::encode_vector(&[1.0, 0.0, 0.0, 0.0]),
            100,
        )
        .unwrap();

    let tools = ContextTools::new(
        Arc::new(Mutex::new(store)),
        Arc::new(BasicSummarizer::new(200)),
        Arc::new(HashEmbedder::new(8)),
        Arc::new(test_config()),
    );

    let retrieved = tools.retrieve(retrieve_params("query", Some(3))).await;
    let value = serde_json::to_value(&retrieved).unwrap();
    assert_eq!(value["status"], "error");
    assert_eq!(value["results"], json!([]));
    assert!(!value["error"].as_str().unwrap().is_empty());

    let cleared = tools
        .clear_all(ClearAllContextParams {
            confirmation: "nope".into(),
        })
        .await;
    let value = serde_json::to_value(&cleared).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(object["status"], "error");
    assert!(!object["error"].as_str().unwrap().is_empty());
}
