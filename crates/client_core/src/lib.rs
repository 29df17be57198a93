//! Swipe-driven inbox triage.
//!
//! [`gesture`] turns pointer drags into triage intents; [`triage`] owns the
//! items and applies those intents through an [`ItemRepository`].

use std::sync::Arc;

use shared::{domain::UserId, repository::ItemRepository};

pub mod error;
pub mod gesture;
pub mod triage;

pub use error::TriageError;
pub use gesture::{
    classify, resolve_commit, GestureAction, GestureInterpreter, Offset, Point, PointerEvent,
    SwipeDirection, SwipeFeedback,
};
pub use triage::{triage_queue, PendingDetails, StatusList, TriageController, TriageOutcome};

/// What a triage session runs against: a store and, once signed in, a user.
#[derive(Clone)]
pub struct AppContext {
    pub repository: Arc<dyn ItemRepository>,
    pub user_id: Option<UserId>,
}

impl AppContext {
    pub fn new(repository: Arc<dyn ItemRepository>, user_id: Option<UserId>) -> Self {
        Self {
            repository,
            user_id,
        }
    }

    pub fn signed_out(repository: Arc<dyn ItemRepository>) -> Self {
        Self::new(repository, None)
    }
}
