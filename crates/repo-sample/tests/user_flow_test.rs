use repo_framework::{IdentityValue, RepoError, RepoModule};
use repo_sample::dto::PostDto;
use repo_sample::modules::{PostModule, UserError, UserModule};
use repo_sample::storage::build_context;
use uuid::Uuid;

#[tokio::test]
async fn test_user_crud_flow() {
    let context = build_context().unwrap();
    let users = UserModule::new(&context).unwrap();

    // Create and read back.
    let alice = users.register("a@x.com").await.unwrap();
    let fetched = users.get_by_id(IdentityValue::new(alice.id)).await.unwrap();
    assert_eq!(fetched.id, alice.id);
    assert_eq!(fetched.email, "a@x.com");

    // Unknown identity is an error, not an empty result.
    let missing = users.get_by_id(IdentityValue::new(Uuid::new_v4())).await;
    assert!(matches!(
        missing,
        Err(UserError::Repository(RepoError::NotFound { .. }))
    ));

    // Update rewrites the stored record.
    let updated = users.change_email(alice.id, "b@x.com").await.unwrap();
    assert_eq!(updated.email, "b@x.com");
    let found = users.find_by_email("b@x.com").await.unwrap();
    assert_eq!(found.id, alice.id);

    // Delete empties the collection; deleting again is a silent no-op.
    users.delete(IdentityValue::new(alice.id)).await.unwrap();
    assert!(users.get_all().await.unwrap().is_empty());
    users.delete(IdentityValue::new(alice.id)).await.unwrap();
}

#[tokio::test]
async fn test_register_validates_email() {
    let context = build_context().unwrap();
    let users = UserModule::new(&context).unwrap();

    let result = users.register("  ").await;
    assert!(matches!(result, Err(UserError::EmptyEmail)));
}

#[tokio::test]
async fn test_updating_missing_user_fails() {
    let context = build_context().unwrap();
    let users = UserModule::new(&context).unwrap();

    let result = users.change_email(Uuid::new_v4(), "ghost@x.com").await;
    assert!(matches!(
        result,
        Err(UserError::Repository(RepoError::NotFound { .. }))
    ));
}

#[tokio::test]
async fn test_integer_keyed_posts_share_the_context() {
    let context = build_context().unwrap();
    let posts = PostModule::new(&context).unwrap();

    posts
        .publish(PostDto {
            id: 1,
            text: "first".into(),
        })
        .await
        .unwrap();

    // The integer key matches its textual form.
    let fetched = posts.get_by_id(IdentityValue::from("1")).await.unwrap();
    assert_eq!(fetched.text, "first");

    let edited = posts
        .edit(PostDto {
            id: 1,
            text: "first, edited".into(),
        })
        .await
        .unwrap();
    assert_eq!(edited.text, "first, edited");

    posts.delete(IdentityValue::from(1)).await.unwrap();
    assert!(posts.get_all().await.unwrap().is_empty());
}
