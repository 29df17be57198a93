//! Inbox triage: the untriaged queue, the current card, and the two-phase
//! commit from swipe to stored status.

use std::sync::Arc;

use serde::Serialize;
use shared::{
    domain::{Item, ItemId, ItemPatch, ItemStatus, UserId},
    repository::ItemRepository,
};
use tracing::{debug, info, warn};

use crate::{
    error::TriageError,
    gesture::{GestureAction, GestureInterpreter, Point, SwipeDirection, SwipeFeedback},
    AppContext,
};

/// Untriaged items, oldest first. The head is the card being triaged.
pub fn triage_queue(items: &[Item]) -> Vec<&Item> {
    let mut queue: Vec<&Item> = items.iter().filter(|item| item.is_untriaged()).collect();
    queue.sort_by_key(|item| (item.created_at, item.id));
    queue
}

/// Second phase of a filing swipe: the bucket is chosen, title and
/// description are still being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingDetails {
    pub item_id: ItemId,
    pub status: ItemStatus,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Default)]
enum DetailsStep {
    #[default]
    Idle,
    Pending(PendingDetails),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageOutcome {
    /// The drag did not cross a commit threshold; the card stays at the head.
    Discarded,
    Trashed(ItemId),
    DetailsRequested(PendingDetails),
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusList<'a> {
    pub status: ItemStatus,
    pub label: &'static str,
    pub items: Vec<&'a Item>,
}

pub struct TriageController {
    repository: Arc<dyn ItemRepository>,
    user_id: Option<UserId>,
    items: Vec<Item>,
    details: DetailsStep,
    gesture: GestureInterpreter,
}

impl TriageController {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            repository: ctx.repository,
            user_id: ctx.user_id,
            items: Vec::new(),
            details: DetailsStep::Idle,
            gesture: GestureInterpreter::new(),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Switches the signed-in user. Any loaded items, open details step and
    /// in-flight drag belong to the previous session and are dropped.
    pub fn set_session(&mut self, user_id: Option<UserId>) {
        if self.user_id == user_id {
            return;
        }
        info!(from = ?self.user_id, to = ?user_id, "triage session changed");
        self.user_id = user_id;
        self.items.clear();
        self.details = DetailsStep::Idle;
        self.gesture.reset();
    }

    /// Replaces local state with the user's stored items.
    pub async fn load(&mut self) -> Result<usize, TriageError> {
        let user_id = self.require_user()?;
        let items = self
            .repository
            .list_items(user_id)
            .await
            .inspect_err(|err| warn!(user_id = user_id.0, error = %err, "failed to load items"))?;
        self.items = items;
        debug!(user_id = user_id.0, count = self.items.len(), "loaded items");
        Ok(self.items.len())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn queue(&self) -> Vec<&Item> {
        triage_queue(&self.items)
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.queue().into_iter().next()
    }

    pub fn queue_len(&self) -> usize {
        self.items.iter().filter(|item| item.is_untriaged()).count()
    }

    /// Active items grouped by durable bucket, in display order.
    pub fn lists(&self) -> Vec<StatusList<'_>> {
        ItemStatus::DURABLE
            .into_iter()
            .map(|status| StatusList {
                status,
                label: status.list_label(),
                items: self
                    .items
                    .iter()
                    .filter(|item| item.is_active() && item.status == status)
                    .collect(),
            })
            .collect()
    }

    pub async fn capture(&mut self, text: &str) -> Result<Item, TriageError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TriageError::EmptyCapture);
        }
        let user_id = self.require_user()?;

        let item = self
            .repository
            .create_item(user_id, text)
            .await
            .inspect_err(|err| warn!(user_id = user_id.0, error = %err, "capture failed"))?;
        info!(item_id = item.id.0, "captured item");
        self.items.push(item.clone());
        Ok(item)
    }

    /// Whether a new drag may start on the current card.
    pub fn accepts_gestures(&self) -> bool {
        self.user_id.is_some()
            && matches!(self.details, DetailsStep::Idle)
            && self.current_item().is_some()
    }

    pub fn pointer_down(&mut self, at: Point) -> bool {
        if !self.accepts_gestures() {
            return false;
        }
        self.gesture.pointer_down(at)
    }

    pub fn pointer_move(&mut self, at: Point) -> Option<SwipeDirection> {
        self.gesture.pointer_move(at)
    }

    pub async fn pointer_up(&mut self) -> Result<TriageOutcome, TriageError> {
        let action = self.gesture.pointer_up();
        self.on_gesture_committed(action).await
    }

    pub async fn pointer_cancel(&mut self) -> Result<TriageOutcome, TriageError> {
        let action = self.gesture.pointer_cancel();
        self.on_gesture_committed(action).await
    }

    /// Ends the post-release window early so the next card starts from rest.
    pub fn settle(&mut self) {
        self.gesture.settle();
    }

    pub fn feedback(&self) -> SwipeFeedback {
        self.gesture.feedback()
    }

    /// Applies a released swipe to the current card.
    ///
    /// Trash deletes right away. Filing swipes only open the details step;
    /// nothing is stored until [`confirm_details`](Self::confirm_details) or
    /// [`skip_details`](Self::skip_details).
    pub async fn on_gesture_committed(
        &mut self,
        action: GestureAction,
    ) -> Result<TriageOutcome, TriageError> {
        if !action.is_commit() {
            return Ok(TriageOutcome::Discarded);
        }
        let user_id = self.require_user()?;
        if let DetailsStep::Pending(pending) = &self.details {
            return Err(TriageError::DetailsPending(pending.item_id));
        }
        let current = self.current_item().ok_or(TriageError::NoCurrentItem)?;
        let item_id = current.id;

        match action.target_status() {
            None => {
                self.repository
                    .delete_item(user_id, item_id)
                    .await
                    .inspect_err(|err| warn!(item_id = item_id.0, error = %err, "trash failed"))?;
                self.items.retain(|item| item.id != item_id);
                info!(item_id = item_id.0, "trashed item");
                Ok(TriageOutcome::Trashed(item_id))
            }
            Some(status) => {
                let pending = PendingDetails {
                    item_id,
                    status,
                    title: current.text.clone(),
                    description: String::new(),
                };
                debug!(item_id = item_id.0, %status, "details requested");
                self.details = DetailsStep::Pending(pending.clone());
                Ok(TriageOutcome::DetailsRequested(pending))
            }
        }
    }

    pub fn pending_details(&self) -> Option<&PendingDetails> {
        match &self.details {
            DetailsStep::Pending(pending) => Some(pending),
            DetailsStep::Idle => None,
        }
    }

    pub async fn confirm_details(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<ItemId, TriageError> {
        let pending = self.pending()?;
        let patch = ItemPatch {
            status: Some(pending.status),
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            completed: None,
        };
        self.finish_details(pending.item_id, patch).await
    }

    /// Files the item under the chosen bucket with its captured text as title
    /// and no description.
    pub async fn skip_details(&mut self) -> Result<ItemId, TriageError> {
        let pending = self.pending()?;
        let item = self
            .find(pending.item_id)
            .ok_or(TriageError::UnknownItem(pending.item_id))?;
        let patch = ItemPatch {
            status: Some(pending.status),
            title: Some(item.text.clone()),
            description: None,
            completed: None,
        };
        self.finish_details(pending.item_id, patch).await
    }

    pub async fn complete_item(&mut self, item_id: ItemId) -> Result<(), TriageError> {
        let user_id = self.require_user()?;
        if self.find(item_id).is_none() {
            return Err(TriageError::UnknownItem(item_id));
        }
        if let Some(pending) = self.pending_details().filter(|p| p.item_id == item_id) {
            return Err(TriageError::DetailsPending(pending.item_id));
        }
        let patch = ItemPatch::completed();
        self.repository
            .update_item(user_id, item_id, &patch)
            .await
            .inspect_err(|err| warn!(item_id = item_id.0, error = %err, "complete failed"))?;
        self.apply_local(item_id, &patch);
        info!(item_id = item_id.0, "completed item");
        Ok(())
    }

    async fn finish_details(
        &mut self,
        item_id: ItemId,
        patch: ItemPatch,
    ) -> Result<ItemId, TriageError> {
        let user_id = self.require_user()?;
        self.repository
            .update_item(user_id, item_id, &patch)
            .await
            .inspect_err(|err| warn!(item_id = item_id.0, error = %err, "filing failed"))?;
        self.apply_local(item_id, &patch);
        self.details = DetailsStep::Idle;
        info!(item_id = item_id.0, status = ?patch.status, "filed item");
        Ok(item_id)
    }

    fn pending(&self) -> Result<PendingDetails, TriageError> {
        self.pending_details()
            .cloned()
            .ok_or(TriageError::NoPendingDetails)
    }

    fn require_user(&self) -> Result<UserId, TriageError> {
        self.user_id.ok_or(TriageError::SignedOut)
    }

    fn find(&self, item_id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    fn apply_local(&mut self, item_id: ItemId, patch: &ItemPatch) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) {
            patch.apply_to(item);
        }
    }
}

#[cfg(test)]
#[path = "tests/triage_tests.rs"]
mod tests;
