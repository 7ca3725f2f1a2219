use tracing::{debug, info};

use super::{
    dto::{CreateCommentRequest, CreatedComment, DroppedComment, UpdateCommentRequest, UpdatedComment},
    repo_types::{Comment, CommentField},
};
use crate::{
    activities::{Action, Activity, EntityKind},
    auth::{PublicUser, User},
    error::{ModelError, ModelResult},
    ids,
    model::{required, UpdateField},
    store::Store,
};

impl Comment {
    /// Insert a comment by `user_id` on `card_id` and record a `Created` activity.
    pub async fn create(
        store: &dyn Store,
        user_id: &str,
        card_id: &str,
        data: CreateCommentRequest,
    ) -> ModelResult<CreatedComment> {
        let text = required("text", data.text, CommentField::Text)?;
        let id = ids::generate();

        let comment = store
            .insert_comment(card_id, user_id, &id, text.value())
            .await?;
        let author = User::find_by_id(store, &comment.user_id).await?;
        let activity = Activity::create(
            store,
            user_id,
            &comment.id,
            EntityKind::Comment,
            Action::Created,
        )
        .await?;

        info!(comment_id = %comment.id, %card_id, "comment created");
        Ok(CreatedComment {
            id: comment.id,
            text: comment.text,
            created_at: comment.created_at,
            card_id: comment.card_id,
            user: PublicUser::from(&author),
            activity,
        })
    }

    pub async fn update(
        store: &dyn Store,
        user_id: &str,
        comment_id: &str,
        data: UpdateCommentRequest,
    ) -> ModelResult<Option<UpdatedComment>> {
        let fields = data.into_fields();
        if fields.is_empty() {
            debug!(%comment_id, "no recognized fields, skipping update");
            return Ok(None);
        }
        fields.iter().try_for_each(|f| f.validate())?;

        let id = store
            .update_comment(comment_id, &fields)
            .await?
            .ok_or_else(|| ModelError::not_found("comment", comment_id))?;
        let activity =
            Activity::create(store, user_id, &id, EntityKind::Comment, Action::Updated).await?;

        let mut updated = UpdatedComment {
            id,
            text: None,
            activity,
        };
        for field in fields {
            match field {
                CommentField::Text(v) => updated.text = Some(v),
            }
        }
        info!(comment_id = %updated.id, "comment updated");
        Ok(Some(updated))
    }

    pub async fn drop(store: &dyn Store, comment_id: &str) -> ModelResult<DroppedComment> {
        let comment = store
            .delete_comment(comment_id)
            .await?
            .ok_or_else(|| ModelError::not_found("comment", comment_id))?;
        info!(comment_id = %comment.id, card_id = %comment.card_id, "comment dropped");
        Ok(DroppedComment {
            id: comment.id,
            card_id: comment.card_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        activities::ActivityRepo,
        auth::UserRepo,
        boards::BoardRepo,
        cards::CardRepo,
        comments::CommentRepo,
        lists::ListRepo,
        store::MemoryStore,
    };
    use serde_json::json;
    use time::OffsetDateTime;

    const USER: &str = "user00001";
    const BOARD: &str = "board0001";
    const CARD: &str = "card00001";

    async fn setup() -> MemoryStore {
        let store = MemoryStore::default();
        store
            .insert_user(&User {
                id: USER.into(),
                username: "testuser".into(),
                email: "testuser@test.com".into(),
                hash: "hash".into(),
                salt: "salt".into(),
                avatar: Some("/avatars/testuser.png".into()),
                created_at: OffsetDateTime::now_utc(),
            })
            .await
            .unwrap();
        store.insert_board(BOARD, "test board").await.unwrap();
        store.insert_list(BOARD, "list00001", "test list").await.unwrap();
        store.insert_card("list00001", CARD, "test card").await.unwrap();
        store
    }

    fn request(text: &str) -> CreateCommentRequest {
        CreateCommentRequest {
            text: Some(text.into()),
        }
    }

    #[tokio::test]
    async fn create_returns_comment_with_author_and_activity() {
        let store = setup().await;
        let comment = Comment::create(&store, USER, CARD, request("looks good"))
            .await
            .unwrap();

        assert!(ids::is_valid(&comment.id));
        let mut json = serde_json::to_value(&comment).unwrap();
        let obj = json.as_object_mut().unwrap();
        assert!(obj.remove("created_at").is_some());
        obj.remove("id");
        json["activity"].as_object_mut().unwrap().remove("created_at");
        assert_eq!(
            json,
            json!({
                "text": "looks good",
                "card_id": CARD,
                "user": {
                    "id": USER,
                    "username": "testuser",
                    "avatar": "/avatars/testuser.png"
                },
                "activity": {
                    "id": 1,
                    "action": "Created",
                    "type": "comment",
                    "entry": {
                        "title": "looks good",
                        "link": format!("/boards/{BOARD}/cards/{CARD}")
                    }
                }
            })
        );
    }

    #[tokio::test]
    async fn create_on_missing_card_fails() {
        let store = setup().await;
        let err = Comment::create(&store, USER, "nosuchcrd", request("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Constraint(_)));
        assert!(store.comments_for_card(CARD).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_text_and_noop() {
        let store = setup().await;
        let comment = Comment::create(&store, USER, CARD, request("looks good"))
            .await
            .unwrap();

        let none = Comment::update(&store, USER, &comment.id, UpdateCommentRequest::default())
            .await
            .unwrap();
        assert!(none.is_none());

        let data = UpdateCommentRequest {
            text: Some("looks great".into()),
        };
        let updated = Comment::update(&store, USER, &comment.id, data)
            .await
            .unwrap()
            .expect("text is recognized");
        assert_eq!(updated.text.as_deref(), Some("looks great"));
        assert_eq!(updated.activity.action, Action::Updated);
        assert_eq!(updated.activity.entry.title, "looks great");
        assert_eq!(store.activities_for_entity(&comment.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn drop_returns_id_and_card_id() {
        let store = setup().await;
        let comment = Comment::create(&store, USER, CARD, request("looks good"))
            .await
            .unwrap();

        let dropped = Comment::drop(&store, &comment.id).await.unwrap();
        assert_eq!(
            dropped,
            DroppedComment {
                id: comment.id.clone(),
                card_id: CARD.into()
            }
        );
        assert!(store.find_comment(&comment.id).await.unwrap().is_none());
        assert!(store.comments_for_card(CARD).await.unwrap().is_empty());

        let err = Comment::drop(&store, &comment.id).await.unwrap_err();
        assert!(matches!(err, ModelError::NotFound { entity: "comment", .. }));
    }
}
