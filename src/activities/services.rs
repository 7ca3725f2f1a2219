use tracing::debug;

use super::{
    repo_types::{Action, Activity, EntityKind, Entry, NewActivity},
};
use crate::{
    error::{ModelError, ModelResult},
    store::Store,
};

impl Activity {
    /// Append an activity for `entity_id`, snapshotting the entity as it is now.
    pub async fn create(
        store: &dyn Store,
        user_id: &str,
        entity_id: &str,
        kind: EntityKind,
        action: Action,
    ) -> ModelResult<Activity> {
        let entry = snapshot(store, entity_id, kind).await?;
        let activity = store
            .insert_activity(NewActivity {
                user_id,
                entity_id,
                kind,
                action,
                entry,
            })
            .await?;
        debug!(
            activity_id = activity.id,
            %user_id,
            %entity_id,
            kind = %kind,
            action = action.as_str(),
            "activity recorded"
        );
        Ok(activity)
    }

    pub async fn find_by_entity(store: &dyn Store, entity_id: &str) -> ModelResult<Vec<Activity>> {
        store.activities_for_entity(entity_id).await
    }
}

async fn snapshot(store: &dyn Store, id: &str, kind: EntityKind) -> ModelResult<Entry> {
    let entry = match kind {
        EntityKind::Board => store.find_board(id).await?.map(|b| Entry {
            link: Some(b.link()),
            title: b.title,
        }),
        EntityKind::List => store.find_list(id).await?.map(|l| Entry {
            title: l.title,
            link: None,
        }),
        EntityKind::Card => store.find_card(id).await?.map(|c| Entry {
            link: Some(c.link()),
            title: c.text,
        }),
        EntityKind::Comment => match store.find_comment(id).await? {
            Some(comment) => {
                let link = store.find_card(&comment.card_id).await?.map(|c| c.link());
                Some(Entry {
                    title: comment.text,
                    link,
                })
            }
            None => None,
        },
    };
    entry.ok_or_else(|| ModelError::not_found(kind.as_str(), id))
}
