use async_trait::async_trait;
use resource_actor::{FrameworkError, ResourceActor, StoreEntity};
use std::collections::HashSet;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Bookmark {
    id: u64,
    url: String,
    pinned: bool,
}

#[derive(Debug)]
struct BookmarkFields {
    url: String,
    pinned: bool,
}

#[derive(Debug, thiserror::Error)]
enum BookmarkError {
    #[error("url must start with http")]
    BadUrl,
    #[error("pinned bookmarks cannot be deleted")]
    Pinned,
}

#[async_trait]
impl StoreEntity for Bookmark {
    type Id = u64;
    type Fields = BookmarkFields;
    type Error = BookmarkError;

    fn from_fields(id: u64, fields: BookmarkFields) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            url: fields.url,
            pinned: fields.pinned,
        })
    }

    fn id(&self) -> &u64 {
        &self.id
    }

    async fn on_create(&mut self) -> Result<(), Self::Error> {
        self.url = self.url.trim().to_string();
        if !self.url.starts_with("http") {
            return Err(BookmarkError::BadUrl);
        }
        Ok(())
    }

    async fn on_update(&mut self, fields: BookmarkFields) -> Result<(), Self::Error> {
        if !fields.url.starts_with("http") {
            return Err(BookmarkError::BadUrl);
        }
        self.url = fields.url;
        self.pinned = fields.pinned;
        Ok(())
    }

    async fn on_delete(&self) -> Result<(), Self::Error> {
        if self.pinned {
            return Err(BookmarkError::Pinned);
        }
        Ok(())
    }
}

fn bookmark(url: &str, pinned: bool) -> BookmarkFields {
    BookmarkFields {
        url: url.to_string(),
        pinned,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Bookmark>::new(10);
    let handle = tokio::spawn(actor.run());

    // 1. Create: the reply is the stored entity, normalized by on_create
    let created = client
        .create(bookmark("  https://example.org ", false))
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.url, "https://example.org");

    // 2. Read back
    let fetched = client.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    // 3. Update
    let updated = client
        .update(created.id, bookmark("https://example.com", true))
        .await
        .unwrap();
    assert_eq!(updated.url, "https://example.com");
    assert!(updated.pinned);

    // 4. Delete is vetoed while pinned
    let vetoed = client.delete(created.id).await;
    assert!(matches!(vetoed, Err(FrameworkError::EntityError(_))));
    assert!(client.get(created.id).await.unwrap().is_some());

    // 5. Unpin, then delete
    client
        .update(created.id, bookmark("https://example.com", false))
        .await
        .unwrap();
    client.delete(created.id).await.unwrap();
    assert!(client.get(created.id).await.unwrap().is_none());
    assert!(client.list().await.unwrap().is_empty());

    // 6. Shutdown when the last client goes away
    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_entity_error_can_be_downcast() {
    let (actor, client) = ResourceActor::<Bookmark>::new(10);
    tokio::spawn(actor.run());

    let err = client.create(bookmark("ftp://nope", false)).await.unwrap_err();
    let FrameworkError::EntityError(inner) = err else {
        panic!("expected an entity error, got {err:?}");
    };
    assert!(matches!(
        inner.downcast_ref::<BookmarkError>(),
        Some(BookmarkError::BadUrl)
    ));
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let (actor, client) = ResourceActor::<Bookmark>::new(4);
    tokio::spawn(actor.run());

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .create(bookmark(&format!("https://site{i}.test"), false))
                    .await
                    .unwrap()
                    .id
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap());
    }
    assert_eq!(ids.len(), 20);
    assert_eq!(client.list().await.unwrap().len(), 20);
}
