use tracing::{debug, info};

use super::{
    dto::{CardDetails, CreateCardRequest, CreatedCard, DroppedCard, UpdateCardRequest, UpdatedCard},
    repo_types::{Card, CardField},
};
use crate::{
    activities::{Action, Activity, EntityKind},
    error::{ModelError, ModelResult},
    ids,
    model::{required, EntityId, UpdateField},
    store::Store,
};

impl Card {
    /// Insert a card under `list_id` and record a `Created` activity.
    pub async fn create(
        store: &dyn Store,
        user_id: &str,
        list_id: &str,
        data: CreateCardRequest,
    ) -> ModelResult<CreatedCard> {
        let text = required("text", data.text, CardField::Text)?;
        let id = ids::generate();

        let card = store.insert_card(list_id, &id, text.value()).await?;
        let activity =
            Activity::create(store, user_id, &card.id, EntityKind::Card, Action::Created).await?;

        info!(card_id = %card.id, %list_id, board_id = %card.board_id, "card created");
        Ok(CreatedCard {
            link: card.link(),
            id: card.id,
            text: card.text,
            board_id: card.board_id,
            activity,
        })
    }

    /// Apply the recognized fields of `data`. `Ok(None)` when there are none;
    /// nothing is written in that case.
    pub async fn update(
        store: &dyn Store,
        user_id: &str,
        card_id: &str,
        data: UpdateCardRequest,
    ) -> ModelResult<Option<UpdatedCard>> {
        let fields = data.into_fields();
        if fields.is_empty() {
            debug!(%card_id, "no recognized fields, skipping update");
            return Ok(None);
        }
        fields.iter().try_for_each(|f| f.validate())?;

        let id = store
            .update_card(card_id, &fields)
            .await?
            .ok_or_else(|| ModelError::not_found("card", card_id))?;
        let activity =
            Activity::create(store, user_id, &id, EntityKind::Card, Action::Updated).await?;

        let mut updated = UpdatedCard {
            id,
            text: None,
            activity,
        };
        for field in fields {
            match field {
                CardField::Text(v) => updated.text = Some(v),
            }
        }
        info!(card_id = %updated.id, "card updated");
        Ok(Some(updated))
    }

    /// Hard delete of the card and its comments; returns the id and the board
    /// the card belonged to.
    pub async fn drop(store: &dyn Store, card_id: &str) -> ModelResult<DroppedCard> {
        let card = store
            .delete_card(card_id)
            .await?
            .ok_or_else(|| ModelError::not_found("card", card_id))?;
        info!(card_id = %card.id, board_id = %card.board_id, "card dropped");
        Ok(DroppedCard {
            id: card.id,
            board_id: card.board_id,
        })
    }

    /// Card with its comments, oldest first, each with its author.
    pub async fn find_by_id(store: &dyn Store, card_id: &str) -> ModelResult<CardDetails> {
        let card = store
            .find_card(card_id)
            .await?
            .ok_or_else(|| ModelError::not_found("card", card_id))?;
        let comments = store.comments_for_card(&card.id).await?;
        Ok(CardDetails {
            link: card.link(),
            id: card.id,
            text: card.text,
            board_id: card.board_id,
            comments,
        })
    }

    /// Soft delete: sets `archived`, keeps the row.
    pub async fn archive(store: &dyn Store, card_id: &str) -> ModelResult<EntityId> {
        let id = store
            .archive_card(card_id)
            .await?
            .ok_or_else(|| ModelError::not_found("card", card_id))?;
        info!(card_id = %id, "card archived");
        Ok(EntityId::from(id))
    }
}
