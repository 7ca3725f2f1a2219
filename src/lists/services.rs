use tracing::{debug, info};

use super::{
    dto::{CreateListRequest, CreatedList, ListDetails, UpdateListRequest, UpdatedList},
    repo_types::{List, ListField},
};
use crate::{
    activities::{Action, Activity, EntityKind},
    cards::dto::CardSummary,
    error::{ModelError, ModelResult},
    ids,
    model::{required, EntityId, UpdateField},
    store::Store,
};

impl List {
    /// Insert a list under `board_id` and record a `Created` activity.
    pub async fn create(
        store: &dyn Store,
        user_id: &str,
        board_id: &str,
        data: CreateListRequest,
    ) -> ModelResult<CreatedList> {
        let title = required("title", data.title, ListField::Title)?;
        let id = ids::generate();

        let list = store.insert_list(board_id, &id, title.value()).await?;
        let activity =
            Activity::create(store, user_id, &list.id, EntityKind::List, Action::Created).await?;

        info!(list_id = %list.id, %board_id, "list created");
        Ok(CreatedList {
            id: list.id,
            title: list.title,
            archived: list.archived,
            activity,
        })
    }

    /// Apply the recognized fields of `data`. `Ok(None)` when there are none;
    /// nothing is written in that case.
    pub async fn update(
        store: &dyn Store,
        user_id: &str,
        list_id: &str,
        data: UpdateListRequest,
    ) -> ModelResult<Option<UpdatedList>> {
        let fields = data.into_fields();
        if fields.is_empty() {
            debug!(%list_id, "no recognized fields, skipping update");
            return Ok(None);
        }
        fields.iter().try_for_each(|f| f.validate())?;

        let id = store
            .update_list(list_id, &fields)
            .await?
            .ok_or_else(|| ModelError::not_found("list", list_id))?;
        let activity =
            Activity::create(store, user_id, &id, EntityKind::List, Action::Updated).await?;

        let mut updated = UpdatedList {
            id,
            title: None,
            activity,
        };
        for field in fields {
            match field {
                ListField::Title(v) => updated.title = Some(v),
            }
        }
        info!(list_id = %updated.id, "list updated");
        Ok(Some(updated))
    }

    /// Hard delete of the list, its cards and their comments.
    pub async fn drop(store: &dyn Store, list_id: &str) -> ModelResult<EntityId> {
        let id = store
            .delete_list(list_id)
            .await?
            .ok_or_else(|| ModelError::not_found("list", list_id))?;
        info!(list_id = %id, "list dropped");
        Ok(EntityId::from(id))
    }

    /// Soft delete: sets `archived`, keeps the row.
    pub async fn archive(store: &dyn Store, list_id: &str) -> ModelResult<EntityId> {
        let id = store
            .archive_list(list_id)
            .await?
            .ok_or_else(|| ModelError::not_found("list", list_id))?;
        info!(list_id = %id, "list archived");
        Ok(EntityId::from(id))
    }

    pub async fn find_by_id(store: &dyn Store, list_id: &str) -> ModelResult<ListDetails> {
        let list = store
            .find_list(list_id)
            .await?
            .ok_or_else(|| ModelError::not_found("list", list_id))?;
        let cards = store.cards_for_list(&list.id).await?;
        Ok(ListDetails {
            id: list.id,
            title: list.title,
            archived: list.archived,
            cards: cards.into_iter().map(CardSummary::from).collect(),
        })
    }
}
