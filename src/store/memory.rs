use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::{
    activities::{repo_types::NewActivity, Activity, ActivityRepo},
    auth::{PublicUser, User, UserRepo},
    boards::{repo_types::BoardField, Board, BoardRepo},
    cards::{repo_types::CardField, Card, CardRepo},
    comments::{
        repo_types::{CommentField, CommentWithAuthor},
        Comment, CommentRepo,
    },
    error::{ModelError, ModelResult},
    lists::{repo_types::ListField, List, ListRepo},
};

/// In-process store with the same observable behavior as Postgres:
/// join rows, foreign keys, cascading drops and sequential activity ids.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    boards: Vec<Board>,
    lists: Vec<List>,
    cards: Vec<CardRecord>,
    comments: Vec<CommentRecord>,
    activities: Vec<Activity>,
    boards_lists: Vec<Link>,
    lists_cards: Vec<Link>,
    cards_comments: Vec<Link>,
    users_comments: Vec<Link>,
}

struct CardRecord {
    id: String,
    text: String,
    archived: bool,
}

struct CommentRecord {
    id: String,
    text: String,
    created_at: OffsetDateTime,
}

/// Join row `(parent, child)`; a child has at most one parent.
struct Link {
    parent: String,
    child: String,
}

fn parent_of<'a>(links: &'a [Link], child: &str) -> Option<&'a str> {
    links
        .iter()
        .find(|l| l.child == child)
        .map(|l| l.parent.as_str())
}

fn foreign_key(constraint: &str) -> ModelError {
    ModelError::Constraint(format!(
        "insert or update violates foreign key constraint \"{constraint}\""
    ))
}

fn duplicate(constraint: &str) -> ModelError {
    ModelError::Constraint(format!(
        "duplicate key value violates unique constraint \"{constraint}\""
    ))
}

impl Tables {
    fn card(&self, id: &str) -> Option<Card> {
        let rec = self.cards.iter().find(|c| c.id == id)?;
        let list_id = parent_of(&self.lists_cards, id)?;
        let board_id = parent_of(&self.boards_lists, list_id)?;
        Some(Card {
            id: rec.id.clone(),
            text: rec.text.clone(),
            archived: rec.archived,
            list_id: list_id.to_owned(),
            board_id: board_id.to_owned(),
        })
    }

    fn comment(&self, id: &str) -> Option<Comment> {
        let rec = self.comments.iter().find(|c| c.id == id)?;
        Some(Comment {
            id: rec.id.clone(),
            text: rec.text.clone(),
            created_at: rec.created_at,
            card_id: parent_of(&self.cards_comments, id)?.to_owned(),
            user_id: parent_of(&self.users_comments, id)?.to_owned(),
        })
    }

    fn children(links: &[Link], parent: &str) -> Vec<String> {
        links
            .iter()
            .filter(|l| l.parent == parent)
            .map(|l| l.child.clone())
            .collect()
    }

    fn remove_comment(&mut self, id: &str) {
        self.comments.retain(|c| c.id != id);
        self.cards_comments.retain(|l| l.child != id);
        self.users_comments.retain(|l| l.child != id);
    }

    /// Removes the card together with its comments.
    fn remove_card(&mut self, id: &str) {
        for comment_id in Self::children(&self.cards_comments, id) {
            self.remove_comment(&comment_id);
        }
        self.cards.retain(|c| c.id != id);
        self.lists_cards.retain(|l| l.child != id);
    }

    /// Removes the list together with its cards.
    fn remove_list(&mut self, id: &str) {
        for card_id in Self::children(&self.lists_cards, id) {
            self.remove_card(&card_id);
        }
        self.lists.retain(|l| l.id != id);
        self.boards_lists.retain(|l| l.child != id);
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn insert_user(&self, user: &User) -> ModelResult<User> {
        let mut t = self.tables.lock().await;
        if t.users.iter().any(|u| u.id == user.id) {
            return Err(duplicate("users_pkey"));
        }
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(duplicate("users_email_key"));
        }
        t.users.push(user.clone());
        Ok(user.clone())
    }

    async fn find_user_by_email(&self, email: &str) -> ModelResult<Option<User>> {
        let t = self.tables.lock().await;
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: &str) -> ModelResult<Option<User>> {
        let t = self.tables.lock().await;
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl BoardRepo for MemoryStore {
    async fn insert_board(&self, id: &str, title: &str) -> ModelResult<Board> {
        let mut t = self.tables.lock().await;
        if t.boards.iter().any(|b| b.id == id) {
            return Err(duplicate("boards_pkey"));
        }
        let board = Board {
            id: id.to_owned(),
            title: title.to_owned(),
        };
        t.boards.push(board.clone());
        Ok(board)
    }

    async fn update_board(&self, id: &str, fields: &[BoardField]) -> ModelResult<Option<String>> {
        let mut t = self.tables.lock().await;
        let Some(board) = t.boards.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        for field in fields {
            match field {
                BoardField::Title(v) => board.title = v.clone(),
            }
        }
        Ok(Some(board.id.clone()))
    }

    async fn delete_board(&self, id: &str) -> ModelResult<Option<String>> {
        let mut t = self.tables.lock().await;
        let Some(pos) = t.boards.iter().position(|b| b.id == id) else {
            return Ok(None);
        };
        for list_id in Tables::children(&t.boards_lists, id) {
            t.remove_list(&list_id);
        }
        let board = t.boards.remove(pos);
        Ok(Some(board.id))
    }

    async fn find_board(&self, id: &str) -> ModelResult<Option<Board>> {
        let t = self.tables.lock().await;
        Ok(t.boards.iter().find(|b| b.id == id).cloned())
    }
}

#[async_trait]
impl ListRepo for MemoryStore {
    async fn insert_list(&self, board_id: &str, id: &str, title: &str) -> ModelResult<List> {
        let mut t = self.tables.lock().await;
        if t.lists.iter().any(|l| l.id == id) {
            return Err(duplicate("lists_pkey"));
        }
        if !t.boards.iter().any(|b| b.id == board_id) {
            return Err(foreign_key("boards_lists_board_id_fkey"));
        }
        let list = List {
            id: id.to_owned(),
            title: title.to_owned(),
            archived: false,
        };
        t.lists.push(list.clone());
        t.boards_lists.push(Link {
            parent: board_id.to_owned(),
            child: id.to_owned(),
        });
        Ok(list)
    }

    async fn update_list(&self, id: &str, fields: &[ListField]) -> ModelResult<Option<String>> {
        let mut t = self.tables.lock().await;
        let Some(list) = t.lists.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        for field in fields {
            match field {
                ListField::Title(v) => list.title = v.clone(),
            }
        }
        Ok(Some(list.id.clone()))
    }

    async fn delete_list(&self, id: &str) -> ModelResult<Option<String>> {
        let mut t = self.tables.lock().await;
        if !t.lists.iter().any(|l| l.id == id) {
            return Ok(None);
        }
        t.remove_list(id);
        Ok(Some(id.to_owned()))
    }

    async fn archive_list(&self, id: &str) -> ModelResult<Option<String>> {
        let mut t = self.tables.lock().await;
        let Some(list) = t.lists.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        list.archived = true;
        Ok(Some(list.id.clone()))
    }

    async fn find_list(&self, id: &str) -> ModelResult<Option<List>> {
        let t = self.tables.lock().await;
        Ok(t.lists.iter().find(|l| l.id == id).cloned())
    }

    async fn lists_for_board(&self, board_id: &str) -> ModelResult<Vec<List>> {
        let t = self.tables.lock().await;
        Ok(t.lists
            .iter()
            .filter(|l| !l.archived && parent_of(&t.boards_lists, &l.id) == Some(board_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CardRepo for MemoryStore {
    async fn insert_card(&self, list_id: &str, id: &str, text: &str) -> ModelResult<Card> {
        let mut t = self.tables.lock().await;
        if t.cards.iter().any(|c| c.id == id) {
            return Err(duplicate("cards_pkey"));
        }
        if !t.lists.iter().any(|l| l.id == list_id) {
            return Err(foreign_key("lists_cards_list_id_fkey"));
        }
        t.cards.push(CardRecord {
            id: id.to_owned(),
            text: text.to_owned(),
            archived: false,
        });
        t.lists_cards.push(Link {
            parent: list_id.to_owned(),
            child: id.to_owned(),
        });
        // a list detached from every board cannot yield a joined card row
        t.card(id).ok_or(ModelError::Database(sqlx::Error::RowNotFound))
    }

    async fn update_card(&self, id: &str, fields: &[CardField]) -> ModelResult<Option<String>> {
        let mut t = self.tables.lock().await;
        let Some(card) = t.cards.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        for field in fields {
            match field {
                CardField::Text(v) => card.text = v.clone(),
            }
        }
        Ok(Some(card.id.clone()))
    }

    async fn delete_card(&self, id: &str) -> ModelResult<Option<Card>> {
        let mut t = self.tables.lock().await;
        let Some(card) = t.card(id) else {
            return Ok(None);
        };
        t.remove_card(id);
        Ok(Some(card))
    }

    async fn archive_card(&self, id: &str) -> ModelResult<Option<String>> {
        let mut t = self.tables.lock().await;
        let Some(card) = t.cards.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        card.archived = true;
        Ok(Some(card.id.clone()))
    }

    async fn find_card(&self, id: &str) -> ModelResult<Option<Card>> {
        let t = self.tables.lock().await;
        Ok(t.card(id))
    }

    async fn cards_for_list(&self, list_id: &str) -> ModelResult<Vec<Card>> {
        let t = self.tables.lock().await;
        Ok(t.lists_cards
            .iter()
            .filter(|l| l.parent == list_id)
            .filter_map(|l| t.card(&l.child))
            .filter(|c| !c.archived)
            .collect())
    }
}

#[async_trait]
impl CommentRepo for MemoryStore {
    async fn insert_comment(
        &self,
        card_id: &str,
        user_id: &str,
        id: &str,
        text: &str,
    ) -> ModelResult<Comment> {
        let mut t = self.tables.lock().await;
        if t.comments.iter().any(|c| c.id == id) {
            return Err(duplicate("comments_pkey"));
        }
        if !t.cards.iter().any(|c| c.id == card_id) {
            return Err(foreign_key("cards_comments_card_id_fkey"));
        }
        if !t.users.iter().any(|u| u.id == user_id) {
            return Err(foreign_key("users_comments_user_id_fkey"));
        }
        let created_at = OffsetDateTime::now_utc();
        t.comments.push(CommentRecord {
            id: id.to_owned(),
            text: text.to_owned(),
            created_at,
        });
        t.cards_comments.push(Link {
            parent: card_id.to_owned(),
            child: id.to_owned(),
        });
        t.users_comments.push(Link {
            parent: user_id.to_owned(),
            child: id.to_owned(),
        });
        Ok(Comment {
            id: id.to_owned(),
            text: text.to_owned(),
            created_at,
            card_id: card_id.to_owned(),
            user_id: user_id.to_owned(),
        })
    }

    async fn update_comment(
        &self,
        id: &str,
        fields: &[CommentField],
    ) -> ModelResult<Option<String>> {
        let mut t = self.tables.lock().await;
        let Some(comment) = t.comments.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        for field in fields {
            match field {
                CommentField::Text(v) => comment.text = v.clone(),
            }
        }
        Ok(Some(comment.id.clone()))
    }

    async fn delete_comment(&self, id: &str) -> ModelResult<Option<Comment>> {
        let mut t = self.tables.lock().await;
        let Some(comment) = t.comment(id) else {
            return Ok(None);
        };
        t.remove_comment(id);
        Ok(Some(comment))
    }

    async fn find_comment(&self, id: &str) -> ModelResult<Option<Comment>> {
        let t = self.tables.lock().await;
        Ok(t.comment(id))
    }

    async fn comments_for_card(&self, card_id: &str) -> ModelResult<Vec<CommentWithAuthor>> {
        let t = self.tables.lock().await;
        Ok(t.cards_comments
            .iter()
            .filter(|l| l.parent == card_id)
            .filter_map(|l| {
                let comment = t.comment(&l.child)?;
                let author = t.users.iter().find(|u| u.id == comment.user_id)?;
                Some(CommentWithAuthor {
                    id: comment.id,
                    text: comment.text,
                    created_at: comment.created_at,
                    user: PublicUser::from(author),
                })
            })
            .collect())
    }
}

#[async_trait]
impl ActivityRepo for MemoryStore {
    async fn insert_activity(&self, new: NewActivity<'_>) -> ModelResult<Activity> {
        let mut t = self.tables.lock().await;
        let activity = Activity {
            id: t.activities.len() as i64 + 1,
            action: new.action,
            kind: new.kind,
            entry: new.entry,
            created_at: OffsetDateTime::now_utc(),
            user_id: new.user_id.to_owned(),
            entity_id: new.entity_id.to_owned(),
        };
        t.activities.push(activity.clone());
        Ok(activity)
    }

    async fn activities_for_entity(&self, entity_id: &str) -> ModelResult<Vec<Activity>> {
        let t = self.tables.lock().await;
        Ok(t.activities
            .iter()
            .filter(|a| a.entity_id == entity_id)
            .cloned()
            .collect())
    }
}
