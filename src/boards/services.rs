use tracing::{debug, info};

use super::{
    dto::{BoardDetails, BoardList, CreateBoardRequest, CreatedBoard, UpdateBoardRequest, UpdatedBoard},
    repo_types::{Board, BoardField},
};
use crate::{
    activities::{Action, Activity, EntityKind},
    cards::dto::CardSummary,
    error::{ModelError, ModelResult},
    ids,
    model::{required, EntityId, UpdateField},
    store::Store,
};

impl Board {
    pub async fn create(
        store: &dyn Store,
        user_id: &str,
        data: CreateBoardRequest,
    ) -> ModelResult<CreatedBoard> {
        let title = required("title", data.title, BoardField::Title)?;
        let id = ids::generate();

        let board = store.insert_board(&id, title.value()).await?;
        let activity =
            Activity::create(store, user_id, &board.id, EntityKind::Board, Action::Created)
                .await?;

        info!(board_id = %board.id, "board created");
        Ok(CreatedBoard {
            link: board.link(),
            id: board.id,
            title: board.title,
            activity,
        })
    }

    pub async fn update(
        store: &dyn Store,
        user_id: &str,
        board_id: &str,
        data: UpdateBoardRequest,
    ) -> ModelResult<Option<UpdatedBoard>> {
        let fields = data.into_fields();
        if fields.is_empty() {
            debug!(%board_id, "no recognized fields, skipping update");
            return Ok(None);
        }
        fields.iter().try_for_each(|f| f.validate())?;

        let id = store
            .update_board(board_id, &fields)
            .await?
            .ok_or_else(|| ModelError::not_found("board", board_id))?;
        let activity =
            Activity::create(store, user_id, &id, EntityKind::Board, Action::Updated).await?;

        let mut updated = UpdatedBoard {
            id,
            title: None,
            activity,
        };
        for field in fields {
            match field {
                BoardField::Title(v) => updated.title = Some(v),
            }
        }
        info!(board_id = %updated.id, "board updated");
        Ok(Some(updated))
    }

    /// Hard delete of the board, its lists, their cards and comments.
    pub async fn drop(store: &dyn Store, board_id: &str) -> ModelResult<EntityId> {
        let id = store
            .delete_board(board_id)
            .await?
            .ok_or_else(|| ModelError::not_found("board", board_id))?;
        info!(board_id = %id, "board dropped");
        Ok(EntityId::from(id))
    }

    pub async fn find_by_id(store: &dyn Store, board_id: &str) -> ModelResult<BoardDetails> {
        let board = store
            .find_board(board_id)
            .await?
            .ok_or_else(|| ModelError::not_found("board", board_id))?;

        let mut lists = Vec::new();
        for list in store.lists_for_board(&board.id).await? {
            let cards = store.cards_for_list(&list.id).await?;
            lists.push(BoardList {
                id: list.id,
                title: list.title,
                cards: cards.into_iter().map(CardSummary::from).collect(),
            });
        }

        Ok(BoardDetails {
            link: board.link(),
            id: board.id,
            title: board.title,
            lists,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        activities::ActivityRepo, boards::BoardRepo, cards::CardRepo, lists::ListRepo,
        store::MemoryStore,
    };
    use serde_json::json;

    const USER: &str = "user00001";

    fn request(title: &str) -> CreateBoardRequest {
        CreateBoardRequest {
            title: Some(title.into()),
        }
    }

    #[tokio::test]
    async fn create_returns_board_with_link_and_activity() {
        let store = MemoryStore::default();
        let board = Board::create(&store, USER, request("roadmap")).await.unwrap();
        let link = format!("/boards/{}", board.id);

        assert!(ids::is_valid(&board.id));
        let mut json = serde_json::to_value(&board).unwrap();
        json["activity"].as_object_mut().unwrap().remove("created_at");
        json.as_object_mut().unwrap().remove("id");
        assert_eq!(
            json,
            json!({
                "title": "roadmap",
                "link": link,
                "activity": {
                    "id": 1,
                    "action": "Created",
                    "type": "board",
                    "entry": { "title": "roadmap", "link": link }
                }
            })
        );
    }

    #[tokio::test]
    async fn create_requires_title() {
        let store = MemoryStore::default();
        let err = Board::create(&store, USER, CreateBoardRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));
    }

    #[tokio::test]
    async fn update_title_and_noop() {
        let store = MemoryStore::default();
        let board = Board::create(&store, USER, request("roadmap")).await.unwrap();

        let none = Board::update(&store, USER, &board.id, UpdateBoardRequest::default())
            .await
            .unwrap();
        assert!(none.is_none());

        let data = UpdateBoardRequest {
            title: Some("q3 roadmap".into()),
        };
        let updated = Board::update(&store, USER, &board.id, data)
            .await
            .unwrap()
            .expect("title is recognized");
        assert_eq!(updated.title.as_deref(), Some("q3 roadmap"));
        assert_eq!(updated.activity.action, Action::Updated);

        let log = store.activities_for_entity(&board.id).await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].entry.title, "q3 roadmap");
    }

    #[tokio::test]
    async fn update_missing_board_is_not_found() {
        let store = MemoryStore::default();
        let data = UpdateBoardRequest {
            title: Some("x".into()),
        };
        let err = Board::update(&store, USER, "nosuchbrd", data).await.unwrap_err();
        assert!(matches!(err, ModelError::NotFound { entity: "board", .. }));
    }

    #[tokio::test]
    async fn find_by_id_nests_live_lists_and_cards() {
        let store = MemoryStore::default();
        let board = Board::create(&store, USER, request("roadmap")).await.unwrap();
        store.insert_list(&board.id, "list00001", "todo").await.unwrap();
        store.insert_list(&board.id, "list00002", "old").await.unwrap();
        store.archive_list("list00002").await.unwrap();
        store.insert_card("list00001", "card00001", "write docs").await.unwrap();
        store.insert_card("list00001", "card00002", "stale").await.unwrap();
        store.archive_card("card00002").await.unwrap();

        let details = Board::find_by_id(&store, &board.id).await.unwrap();
        assert_eq!(
            serde_json::to_value(&details).unwrap(),
            json!({
                "id": board.id,
                "title": "roadmap",
                "link": board.link,
                "lists": [{
                    "id": "list00001",
                    "title": "todo",
                    "cards": [{
                        "id": "card00001",
                        "text": "write docs",
                        "link": format!("{}/cards/card00001", board.link)
                    }]
                }]
            })
        );
    }

    #[tokio::test]
    async fn drop_removes_board_with_its_lists_and_cards() {
        let store = MemoryStore::default();
        let board = Board::create(&store, USER, request("roadmap")).await.unwrap();
        store.insert_list(&board.id, "list00001", "todo").await.unwrap();
        store.insert_card("list00001", "card00001", "write docs").await.unwrap();

        let dropped = Board::drop(&store, &board.id).await.unwrap();
        assert_eq!(dropped.id, board.id);
        assert!(store.find_board(&board.id).await.unwrap().is_none());
        assert!(store.lists_for_board(&board.id).await.unwrap().is_empty());
        assert!(store.find_list("list00001").await.unwrap().is_none());
        assert!(store.find_card("card00001").await.unwrap().is_none());
        // activity rows outlive the entity
        assert_eq!(store.activities_for_entity(&board.id).await.unwrap().len(), 1);
    }
}
