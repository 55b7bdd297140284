//! Behavior of the workflow context driven through its public actions.

mod common {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use listing_scout::error::SearchError;
    use listing_scout::models::SearchFilters;
    use listing_scout::search::{SearchBackend, SearchResults};
    use listing_scout::storage::{KeyValueStore, MemoryStore, SavedSearchRepository};
    use listing_scout::WorkflowContext;

    /// One scripted backend answer
    pub enum Reply {
        Total { total: u32, after: Duration },
        Fail,
    }

    /// Backend answering from a script, one reply per call, recording the filters it saw
    #[derive(Default)]
    pub struct ScriptedBackend {
        replies: Mutex<VecDeque<Reply>>,
        pub seen: Mutex<Vec<SearchFilters>>,
    }

    impl ScriptedBackend {
        pub fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SearchBackend for ScriptedBackend {
        async fn search(&self, filters: &SearchFilters) -> Result<SearchResults, SearchError> {
            self.seen.lock().expect("seen lock").push(filters.clone());
            let reply = self.replies.lock().expect("replies lock").pop_front();
            match reply {
                Some(Reply::Total { total, after }) => {
                    tokio::time::sleep(after).await;
                    Ok(SearchResults::count_only(total))
                }
                Some(Reply::Fail) | None => {
                    Err(SearchError::Unavailable("scripted failure".to_string()))
                }
            }
        }

        fn backend_name(&self) -> &'static str {
            "scripted"
        }
    }

    pub fn immediate(total: u32) -> Reply {
        Reply::Total {
            total,
            after: Duration::ZERO,
        }
    }

    pub async fn context_with(
        backend: Arc<dyn SearchBackend>,
    ) -> (WorkflowContext, Arc<dyn KeyValueStore>) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let context = WorkflowContext::load(backend, SavedSearchRepository::new(store.clone())).await;
        (context, store)
    }
}

use std::sync::Arc;
use std::time::Duration;

use common::{context_with, immediate, Reply, ScriptedBackend};
use listing_scout::models::{MapBounds, MapView, NotificationFrequency};
use listing_scout::search::SimulatedBackend;
use listing_scout::storage::{KeyValueStore, SAVED_SEARCHES_KEY};
use listing_scout::{FilterUpdate, SavedSearchDraft, SavedSearchUpdate, WorkflowStep};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[tokio::test]
async fn filter_update_merges_and_bumps_progress_without_moving_step() {
    let (context, _) = context_with(Arc::new(ScriptedBackend::default())).await;

    context
        .update_filters(FilterUpdate {
            bedrooms: Some("3".to_string()),
            amenities: Some(tags(&["pool"])),
            ..Default::default()
        })
        .await;

    let state = context.snapshot().await;
    assert_eq!(state.filters.bedrooms, "3");
    assert_eq!(state.filters.amenities, tags(&["pool"]));
    assert!(state.filters.features.is_empty());
    assert_eq!(state.filters.price_min, 0);
    assert_eq!(state.filters.price_max, 2_000_000);
    assert_eq!(state.workflow_step(), WorkflowStep::Search);
    assert_eq!(state.workflow_progress(), 10);
}

#[tokio::test]
async fn repeated_filter_updates_cap_progress_at_one_hundred() {
    let (context, _) = context_with(Arc::new(ScriptedBackend::default())).await;
    context.set_workflow_step(WorkflowStep::Save).await;

    for _ in 0..4 {
        context.update_filters(FilterUpdate::default()).await;
    }

    let state = context.snapshot().await;
    assert_eq!(state.workflow_step(), WorkflowStep::Save);
    assert_eq!(state.workflow_progress(), 100);
}

#[tokio::test]
async fn apply_filters_reports_in_flight_then_completes() {
    let backend = Arc::new(SimulatedBackend::with_delay(Duration::from_millis(20)));
    let (context, _) = context_with(backend).await;

    let handle = context.apply_filters().await;

    let pending = context.snapshot().await;
    assert_eq!(pending.workflow_step(), WorkflowStep::Results);
    assert_eq!(pending.workflow_progress(), 80);
    assert!(pending.is_loading);

    handle.await.expect("search task completes");

    let done = context.snapshot().await;
    assert!(!done.is_loading);
    assert_eq!(done.workflow_progress(), 100);
    assert!((10..=59).contains(&done.total_results));
}

#[tokio::test]
async fn apply_filters_sends_the_live_filters() {
    let backend = Arc::new(ScriptedBackend::new(vec![immediate(12)]));
    let (context, _) = context_with(backend.clone()).await;
    context
        .update_filters(FilterUpdate {
            location: Some("Austin".to_string()),
            ..Default::default()
        })
        .await;

    context.apply_filters().await.await.expect("search task completes");

    let seen = backend.seen.lock().expect("seen lock");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].location, "Austin");
    drop(seen);
    assert_eq!(context.snapshot().await.total_results, 12);
}

#[tokio::test]
async fn overlapping_searches_both_land_and_the_later_completion_wins() {
    let backend = Arc::new(ScriptedBackend::new(vec![
        Reply::Total {
            total: 11,
            after: Duration::from_millis(60),
        },
        immediate(22),
    ]));
    let (context, _) = context_with(backend).await;

    let slow = context.apply_filters().await;
    let fast = context.apply_filters().await;

    fast.await.expect("fast search completes");
    assert_eq!(context.snapshot().await.total_results, 22);

    slow.await.expect("slow search completes");
    let state = context.snapshot().await;
    assert_eq!(state.total_results, 11);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn failed_search_clears_loading_and_records_error() {
    let backend = Arc::new(ScriptedBackend::new(vec![Reply::Fail]));
    let (context, _) = context_with(backend).await;

    context.apply_filters().await.await.expect("search task completes");

    let state = context.snapshot().await;
    assert!(!state.is_loading);
    assert_eq!(state.workflow_step(), WorkflowStep::Results);
    assert_eq!(state.workflow_progress(), 80);
    assert!(state.last_error.is_some());
    assert_eq!(state.total_results, 0);
}

#[tokio::test]
async fn perform_search_enters_results_when_it_lands() {
    let backend = Arc::new(ScriptedBackend::new(vec![Reply::Total {
        total: 31,
        after: Duration::from_millis(30),
    }]));
    let (context, _) = context_with(backend).await;
    context.set_workflow_step(WorkflowStep::Map).await;

    let handle = context.perform_search().await;
    let pending = context.snapshot().await;
    assert!(pending.is_loading);
    assert_eq!(pending.workflow_step(), WorkflowStep::Map);

    handle.await.expect("search task completes");
    let state = context.snapshot().await;
    assert!(!state.is_loading);
    assert_eq!(state.total_results, 31);
    assert_eq!(state.workflow_step(), WorkflowStep::Results);
    assert_eq!(state.workflow_progress(), 100);
}

#[tokio::test]
async fn save_snapshots_filters_and_closes_dialog() {
    let (context, _) = context_with(Arc::new(ScriptedBackend::default())).await;
    context
        .update_filters(FilterUpdate {
            bedrooms: Some("2".to_string()),
            ..Default::default()
        })
        .await;
    context.save_search(SavedSearchDraft::named("Earlier")).await;
    assert!(context.toggle_save_dialog().await);

    let saved = context.save_search(SavedSearchDraft::named("My Search")).await;

    let state = context.snapshot().await;
    assert_eq!(state.saved_searches()[0], saved);
    assert_eq!(saved.filters.bedrooms, "2");
    assert_eq!(saved.name, "My Search");
    assert_eq!(saved.frequency, NotificationFrequency::Daily);
    assert!(saved.is_active);
    assert!(!state.show_save_dialog);
    assert_eq!(state.workflow_step(), WorkflowStep::Save);
}

#[tokio::test]
async fn saved_copy_is_unaffected_by_later_filter_edits() {
    let (context, _) = context_with(Arc::new(ScriptedBackend::default())).await;
    context
        .update_filters(FilterUpdate {
            amenities: Some(tags(&["pool"])),
            ..Default::default()
        })
        .await;
    let saved = context.save_search(SavedSearchDraft::default()).await;

    context
        .update_filters(FilterUpdate {
            amenities: Some(tags(&["gym"])),
            bedrooms: Some("4".to_string()),
            ..Default::default()
        })
        .await;

    let stored = context.saved_searches().await;
    assert_eq!(stored[0].id, saved.id);
    assert_eq!(stored[0].filters.amenities, tags(&["pool"]));
    assert_eq!(stored[0].filters.bedrooms, "");
}

#[tokio::test]
async fn back_to_back_saves_get_unique_ids() {
    let (context, _) = context_with(Arc::new(ScriptedBackend::default())).await;

    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(context.save_search(SavedSearchDraft::default()).await.id);
    }

    let numeric: Vec<i64> = ids.iter().map(|id| id.parse().expect("numeric id")).collect();
    assert!(numeric.windows(2).all(|pair| pair[0] < pair[1]));

    let listed: Vec<String> = context
        .saved_searches()
        .await
        .into_iter()
        .map(|search| search.id)
        .collect();
    let newest_first: Vec<String> = ids.into_iter().rev().collect();
    assert_eq!(listed, newest_first);
}

#[tokio::test]
async fn delete_and_update_of_unknown_id_leave_collection_alone() {
    let (context, _) = context_with(Arc::new(ScriptedBackend::default())).await;
    context.save_search(SavedSearchDraft::named("Only")).await;
    let before = context.saved_searches().await;

    assert!(!context.delete_saved_search("nope").await);
    assert!(
        !context
            .update_saved_search("nope", SavedSearchUpdate::default())
            .await
    );

    assert_eq!(context.saved_searches().await, before);
}

#[tokio::test]
async fn saved_search_changes_are_written_through() {
    let (context, store) = context_with(Arc::new(ScriptedBackend::default())).await;

    let saved = context.save_search(SavedSearchDraft::named("Persisted")).await;
    let raw = store
        .get_item(SAVED_SEARCHES_KEY)
        .await
        .expect("readable")
        .expect("written on save");
    assert!(raw.contains("Persisted"));

    context
        .update_saved_search(
            &saved.id,
            SavedSearchUpdate {
                frequency: Some(NotificationFrequency::Weekly),
                ..Default::default()
            },
        )
        .await;
    let raw = store.get_item(SAVED_SEARCHES_KEY).await.expect("readable").expect("present");
    assert!(raw.contains("\"weekly\""));

    assert!(context.delete_saved_search(&saved.id).await);
    let raw = store.get_item(SAVED_SEARCHES_KEY).await.expect("readable").expect("present");
    assert_eq!(raw, "[]");
}

#[tokio::test]
async fn load_saved_search_restores_its_filters() {
    let (context, _) = context_with(Arc::new(ScriptedBackend::default())).await;
    context
        .update_filters(FilterUpdate {
            zip_code: Some("78701".to_string()),
            ..Default::default()
        })
        .await;
    let saved = context.save_search(SavedSearchDraft::default()).await;
    context.reset_filters().await;
    assert_eq!(context.filters().await.zip_code, "");

    assert!(context.load_saved_search(&saved.id).await);
    assert_eq!(context.filters().await.zip_code, "78701");
    assert!(!context.load_saved_search("missing").await);
}

#[tokio::test]
async fn step_navigation_is_clamped() {
    let (context, _) = context_with(Arc::new(ScriptedBackend::default())).await;

    assert_eq!(context.previous_step().await, WorkflowStep::Search);
    assert_eq!(context.snapshot().await.workflow_progress(), 0);

    for expected in [
        WorkflowStep::Filter,
        WorkflowStep::Map,
        WorkflowStep::Save,
        WorkflowStep::Results,
        WorkflowStep::Results,
    ] {
        assert_eq!(context.next_step().await, expected);
        assert_eq!(context.snapshot().await.workflow_progress(), expected.progress());
    }

    assert_eq!(context.previous_step().await, WorkflowStep::Save);
    assert_eq!(context.snapshot().await.workflow_progress(), 75);
}

#[tokio::test]
async fn panel_toggles_move_step_but_not_progress() {
    let (context, _) = context_with(Arc::new(ScriptedBackend::default())).await;
    context.update_filters(FilterUpdate::default()).await;

    assert!(context.toggle_advanced_filters().await);
    let state = context.snapshot().await;
    assert_eq!(state.workflow_step(), WorkflowStep::Filter);
    assert_eq!(state.workflow_progress(), 10);

    assert!(context.toggle_map_view().await);
    assert_eq!(context.snapshot().await.workflow_step(), WorkflowStep::Map);

    assert!(!context.toggle_map_view().await);
    assert!(!context.toggle_advanced_filters().await);
    let state = context.snapshot().await;
    assert_eq!(state.workflow_step(), WorkflowStep::Search);
    assert_eq!(state.workflow_progress(), 10);
}

#[tokio::test]
async fn map_fields_are_replaced_as_given() {
    let (context, _) = context_with(Arc::new(ScriptedBackend::default())).await;
    let bounds = MapBounds {
        north: 30.0,
        south: 31.0,
        east: -97.0,
        west: -98.0,
    };

    context.set_map_view(MapView::Satellite).await;
    context
        .select_property(Some(serde_json::json!({ "id": "mls-42" })))
        .await;
    context.update_map_bounds(Some(bounds)).await;

    let state = context.snapshot().await;
    assert_eq!(state.map_view, MapView::Satellite);
    assert_eq!(state.selected_property, Some(serde_json::json!({ "id": "mls-42" })));
    assert_eq!(state.map_bounds, Some(bounds));

    context.select_property(None).await;
    assert_eq!(context.snapshot().await.selected_property, None);
}
