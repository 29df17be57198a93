use std::sync::Arc;

use client_core::{AppContext, Point, TriageController, TriageOutcome};
use shared::{domain::ItemStatus, repository::ItemRepository};
use storage::Storage;

async fn swipe(controller: &mut TriageController, dx: f64, dy: f64) -> TriageOutcome {
    assert!(controller.pointer_down(Point::new(100.0, 100.0)));
    controller.pointer_move(Point::new(100.0 + dx, 100.0 + dy));
    let outcome = controller.pointer_up().await.expect("swipe");
    controller.settle();
    outcome
}

#[tokio::test]
async fn capture_then_triage_whole_inbox_against_sqlite() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let user = storage.create_user("triage-alice").await.expect("user");
    let repository: Arc<dyn ItemRepository> = Arc::new(storage.clone());

    let mut controller = TriageController::new(AppContext::new(repository, Some(user)));
    controller.load().await.expect("load");
    for text in ["junk mail", "book flights", "quote from Bob", "learn cello"] {
        controller.capture(text).await.expect("capture");
    }
    assert_eq!(controller.queue_len(), 4);

    let trashed = swipe(&mut controller, 0.0, -160.0).await;
    assert!(matches!(trashed, TriageOutcome::Trashed(_)));

    assert!(matches!(
        swipe(&mut controller, 170.0, 10.0).await,
        TriageOutcome::DetailsRequested(_)
    ));
    controller
        .confirm_details("Book flights", "Before the 12th")
        .await
        .expect("confirm");

    assert!(matches!(
        swipe(&mut controller, 70.0, -80.0).await,
        TriageOutcome::DetailsRequested(_)
    ));
    controller.skip_details().await.expect("skip");

    assert!(matches!(
        swipe(&mut controller, -130.0, 20.0).await,
        TriageOutcome::DetailsRequested(_)
    ));
    controller.skip_details().await.expect("skip");
    assert!(controller.current_item().is_none());

    let mut fresh = TriageController::new(AppContext::new(Arc::new(storage), Some(user)));
    fresh.load().await.expect("reload");
    assert_eq!(fresh.items().len(), 3);
    assert_eq!(fresh.queue_len(), 0);

    let lists = fresh.lists();
    let next = &lists[0];
    assert_eq!(next.status, ItemStatus::Next);
    assert_eq!(next.items[0].display_title(), "Book flights");
    assert_eq!(next.items[0].description.as_deref(), Some("Before the 12th"));
    assert_eq!(lists[2].items[0].text, "learn cello");
    assert_eq!(lists[3].items[0].display_title(), "quote from Bob");
    assert_eq!(lists[3].items[0].description, None);
}
