use person_sync::client::dom::BOTTOM_ID;
use person_sync::client::registry::ViewState;
use person_sync::client::transport::{LoopbackTransport, PersonTransport};
use person_sync::client::{ClientSyncAgent, SyncError};
use person_sync::config::ServerConfig;
use person_sync::lifecycle::PersonSystem;
use person_sync::model::{PersonFields, PersonId};

/// Full end-to-end flow through the real store and controller, without a socket.
#[tokio::test]
async fn test_full_person_sync_integration() {
    let system = PersonSystem::new(&ServerConfig::default());
    let transport = LoopbackTransport::new(system.controller());

    // Seed one person directly through the transport
    let seeded = transport
        .create(&PersonFields::new("Ana", 30, true))
        .await
        .expect("Failed to seed person");

    let mut agent = ClientSyncAgent::new(transport);
    assert_eq!(agent.load_all().await.expect("Failed to load"), 1);
    assert_eq!(
        agent.document().keys(),
        vec![seeded.dom_key().as_str(), BOTTOM_ID]
    );

    // Create a second person through the form; the server trims the name
    agent.begin_create().unwrap();
    agent.document_mut().set_value("create-name", "  Bo ");
    agent.document_mut().set_value("create-age", "4");
    agent.document_mut().set_checked("create-active", true);
    agent.document_mut().set_value("create-date", "2023-12-24");
    let bo = agent.submit_create().await.expect("Failed to create");
    assert_eq!(bo.name, "Bo");
    assert_ne!(bo.id, seeded.id);
    assert!(agent
        .document()
        .get(&bo.dom_key())
        .unwrap()
        .text_content()
        .contains("Created: 24.12.2023"));

    // Edit Ana; the id never changes
    agent.begin_edit(seeded.id).unwrap();
    agent.document_mut().set_value(&format!("{}-age", seeded.dom_key()), "31");
    agent.document_mut().set_checked(&format!("{}-active", seeded.dom_key()), false);
    let updated = agent.submit_edit(seeded.id).await.expect("Failed to update");
    assert_eq!(updated.id, seeded.id);
    assert_eq!(updated.age, 31);
    assert!(!updated.is_active);
    assert_eq!(updated.created_at, seeded.created_at);
    assert_eq!(agent.registry().state(seeded.id), Some(ViewState::Rendered));

    // Delete Ana
    agent.submit_delete(seeded.id).await.expect("Failed to delete");
    assert_eq!(
        agent.document().keys(),
        vec![bo.dom_key().as_str(), BOTTOM_ID]
    );

    // The server agrees with the view
    let remaining = agent.transport().list().await.unwrap();
    assert_eq!(remaining, vec![bo]);
    assert!(agent.notices().is_empty());

    drop(agent);
    system.shutdown().await.expect("Failed to shutdown");
}

/// Another client deleting a person makes this client's edit fail with a 404,
/// and the view keeps the form open instead of guessing.
#[tokio::test]
async fn test_stale_view_edit_is_rejected() {
    let system = PersonSystem::new(&ServerConfig::default());
    let other = LoopbackTransport::new(system.controller());
    let ana = other
        .create(&PersonFields::new("Ana", 30, true))
        .await
        .unwrap();

    let mut agent = ClientSyncAgent::new(LoopbackTransport::new(system.controller()));
    agent.load_all().await.unwrap();
    agent.begin_edit(ana.id).unwrap();

    other.delete(ana.id).await.unwrap();
    let before = agent.document().to_html();

    let result = agent.submit_edit(ana.id).await;
    match result {
        Err(SyncError::Transport(e)) => assert!(e.is_not_found()),
        unexpected => panic!("expected a 404, got {unexpected:?}"),
    }
    assert_eq!(agent.document().to_html(), before);
    assert_eq!(agent.notices(), ["Update failed on the server."]);
}

/// Ids are never reused, even after the highest id was deleted.
#[tokio::test]
async fn test_ids_are_stable_and_unique() {
    let system = PersonSystem::new(&ServerConfig::default());
    let transport = LoopbackTransport::new(system.controller());

    let first = transport
        .create(&PersonFields::new("A", 1, true))
        .await
        .unwrap();
    let second = transport
        .create(&PersonFields::new("B", 2, true))
        .await
        .unwrap();
    transport.delete(second.id).await.unwrap();
    let third = transport
        .create(&PersonFields::new("C", 3, true))
        .await
        .unwrap();

    assert_eq!(first.id, PersonId(1));
    assert_eq!(second.id, PersonId(2));
    assert_eq!(third.id, PersonId(3));
}
