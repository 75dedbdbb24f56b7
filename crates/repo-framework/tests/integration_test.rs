use repo_framework::mock::{FlakyCollection, FlakySession};
use repo_framework::{
    IdentityValue, KeySelector, MemoryCollection, MemorySession, RepoError, Repository,
    StorageContext,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// --- Test Models ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Account {
    id: i64,
    email: String,
    active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AccountDto {
    id: i64,
    email: String,
}

// A DTO that names its identity field differently from the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AccountPatch {
    key: i64,
    email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Tag {
    slug: String,
    label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TagDto {
    slug: String,
    label: String,
}

fn account(id: i64, email: &str) -> Account {
    Account {
        id,
        email: email.to_string(),
        active: true,
    }
}

fn context_with_accounts(
    accounts: Vec<Account>,
) -> (StorageContext, Arc<MemorySession>) {
    let session = Arc::new(MemorySession::new());
    let mut context = StorageContext::new(session.clone());
    context
        .register::<Account>(
            "accounts",
            Arc::new(MemoryCollection::with_items(accounts)),
        )
        .unwrap();
    (context, session)
}

fn account_repo(context: &StorageContext) -> Repository<Account, AccountDto> {
    Repository::new(context, KeySelector::accessor("id", |a: &Account| {
        IdentityValue::new(a.id)
    }))
    .unwrap()
}

// --- Tests ---

#[tokio::test]
async fn test_full_crud_lifecycle() {
    let (context, _session) = context_with_accounts(vec![]);
    let repo = account_repo(&context);

    // Add
    let created = repo
        .add(AccountDto {
            id: 1,
            email: "a@x.com".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.email, "a@x.com");

    // GetAll
    let all = repo.get_all().await.unwrap();
    assert_eq!(all.len(), 1);

    // GetById
    let fetched = repo.get_by_id(1i64).await.unwrap();
    assert_eq!(fetched.email, "a@x.com");

    // Update rewrites matched fields and leaves model-only fields alone.
    let updated = repo
        .update(AccountDto {
            id: 1,
            email: "b@x.com".into(),
        })
        .await
        .unwrap();
    assert_eq!(updated.email, "b@x.com");
    let stored = repo
        .filter(|a| a.id == 1)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);

    // `active` has no DTO counterpart; the update must not have touched it.
    let survivors = repo.filter(|a| a.active).await.unwrap();
    assert_eq!(survivors.len(), 1);

    // Delete
    repo.delete(1i64).await.unwrap();
    assert!(repo.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_where_filters_on_stored_models() {
    let (context, _session) = context_with_accounts(vec![
        account(1, "a@x.com"),
        account(2, "b@x.com"),
        Account {
            id: 3,
            email: "c@x.com".into(),
            active: false,
        },
    ]);
    let repo = account_repo(&context);

    let active = repo.filter(|a| a.active).await.unwrap();
    assert_eq!(active.len(), 2);

    let none = repo.filter(|a| a.email == "nobody").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_get_requires_exactly_one_match() {
    let (context, _session) =
        context_with_accounts(vec![account(1, "a@x.com"), account(2, "a@x.com")]);
    let repo = account_repo(&context);

    let one = repo.get(|a| a.id == 2).await.unwrap();
    assert_eq!(one.id, 2);

    let missing = repo.get(|a| a.id == 99).await;
    assert!(matches!(missing, Err(RepoError::NotFound { .. })));

    let several = repo.get(|a| a.email == "a@x.com").await;
    assert!(matches!(several, Err(RepoError::MultipleMatches { .. })));
}

#[tokio::test]
async fn test_get_by_id_not_found_and_duplicates() {
    let (context, _session) =
        context_with_accounts(vec![account(7, "a@x.com"), account(7, "b@x.com")]);
    let repo = account_repo(&context);

    let missing = repo.get_by_id(2i64).await;
    assert!(matches!(missing, Err(RepoError::NotFound { .. })));

    let duplicated = repo.get_by_id(7i64).await;
    assert!(matches!(
        duplicated,
        Err(RepoError::MultipleMatches { .. })
    ));
}

#[tokio::test]
async fn test_identity_equivalence_across_representations() {
    // Numeric model key matched by its textual form.
    let (context, _session) = context_with_accounts(vec![account(42, "n@x.com")]);
    let repo = account_repo(&context);
    let by_text = repo.get_by_id("42").await.unwrap();
    assert_eq!(by_text.id, 42);

    // String model key, field-based selector.
    let session = Arc::new(MemorySession::new());
    let mut context = StorageContext::new(session);
    context
        .register::<Tag>(
            "tags",
            Arc::new(MemoryCollection::with_items(vec![Tag {
                slug: "rust".into(),
                label: "Rust".into(),
            }])),
        )
        .unwrap();
    let tags: Repository<Tag, TagDto> =
        Repository::new(&context, KeySelector::field("slug")).unwrap();
    let tag = tags.get_by_id("rust").await.unwrap();
    assert_eq!(tag.label, "Rust");
}

#[tokio::test]
async fn test_update_missing_record_fails() {
    let (context, _session) = context_with_accounts(vec![]);
    let repo = account_repo(&context);

    let result = repo
        .update(AccountDto {
            id: 5,
            email: "ghost@x.com".into(),
        })
        .await;
    assert!(matches!(result, Err(RepoError::NotFound { .. })));
}

#[tokio::test]
async fn test_update_duplicate_identity_is_fatal() {
    let (context, _session) =
        context_with_accounts(vec![account(3, "a@x.com"), account(3, "b@x.com")]);
    let repo = account_repo(&context);

    let result = repo
        .update(AccountDto {
            id: 3,
            email: "c@x.com".into(),
        })
        .await;
    assert!(matches!(
        result,
        Err(RepoError::DuplicateIdentity { count: 2, .. })
    ));
}

#[tokio::test]
async fn test_update_with_differently_named_dto_key() {
    let (context, _session) = context_with_accounts(vec![account(8, "old@x.com")]);
    let repo: Repository<Account, AccountPatch> = Repository::new(
        &context,
        KeySelector::accessor("id", |a: &Account| IdentityValue::new(a.id)),
    )
    .unwrap()
    .with_dto_key(KeySelector::field("key"));

    let updated = repo
        .update(AccountPatch {
            key: 8,
            email: "new@x.com".into(),
        })
        .await
        .unwrap();
    assert_eq!(updated.email, "new@x.com");
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (context, session) = context_with_accounts(vec![account(1, "a@x.com")]);
    let repo = account_repo(&context);

    repo.delete(1i64).await.unwrap();
    assert!(repo.get_all().await.unwrap().is_empty());
    let commits_after_first = session.commits();

    // Second delete: no error, no state change, no extra commit.
    repo.delete(1i64).await.unwrap();
    assert!(repo.get_all().await.unwrap().is_empty());
    assert_eq!(session.commits(), commits_after_first);
}

#[tokio::test]
async fn test_resolver_uniqueness() {
    let session = Arc::new(MemorySession::new());
    let mut context = StorageContext::new(session);

    // Zero collections: construction fails loudly.
    let unresolved = Repository::<Account, AccountDto>::new(&context, KeySelector::field("id"));
    assert!(matches!(
        unresolved,
        Err(RepoError::NoCollectionFound { .. })
    ));

    // Exactly one: fine.
    context
        .register::<Account>("accounts", Arc::new(MemoryCollection::<Account>::new()))
        .unwrap();
    assert!(Repository::<Account, AccountDto>::new(&context, KeySelector::field("id")).is_ok());

    // A second collection for the same model type is a configuration error.
    let ambiguous =
        context.register::<Account>("more_accounts", Arc::new(MemoryCollection::<Account>::new()));
    assert!(matches!(
        ambiguous,
        Err(RepoError::AmbiguousCollection { .. })
    ));
}

#[tokio::test]
async fn test_detached_collection_is_unavailable() {
    let session = Arc::new(MemorySession::new());
    let mut context = StorageContext::new(session);
    context
        .register::<Account>("accounts", Arc::new(MemoryCollection::<Account>::new()))
        .unwrap();
    let repo: Repository<Account, AccountDto> =
        Repository::new(&context, KeySelector::field("id")).unwrap();

    assert!(context.detach::<Account>());

    let result = repo.get_all().await;
    assert!(matches!(
        result,
        Err(RepoError::CollectionUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_backend_failures_surface_without_poisoning() {
    let session = Arc::new(MemorySession::new());
    let mut context = StorageContext::new(session);
    let store = Arc::new(FlakyCollection::<Account>::with_items(vec![account(
        1, "a@x.com",
    )]));
    context
        .register::<Account>("accounts", store.clone())
        .unwrap();
    let repo = account_repo(&context);

    store.fail_reads(true);
    let read = repo.get_all().await;
    assert!(matches!(read, Err(RepoError::BackendReadFailure { .. })));
    store.fail_reads(false);

    store.fail_writes(true);
    let write = repo
        .add(AccountDto {
            id: 2,
            email: "b@x.com".into(),
        })
        .await;
    assert!(matches!(write, Err(RepoError::BackendWriteFailure { .. })));
    store.fail_writes(false);

    // The same instance keeps working after both failures.
    let all = repo.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_failed_commit_is_a_write_failure() {
    let session = Arc::new(FlakySession::new());
    let mut context = StorageContext::new(session.clone());
    context
        .register::<Account>("accounts", Arc::new(MemoryCollection::<Account>::new()))
        .unwrap();
    let repo = account_repo(&context);

    session.fail_commits(true);
    let result = repo
        .add(AccountDto {
            id: 1,
            email: "a@x.com".into(),
        })
        .await;
    assert!(matches!(
        result,
        Err(RepoError::BackendWriteFailure { .. })
    ));
}

#[tokio::test]
async fn test_every_write_is_one_commit_unit() {
    let (context, session) = context_with_accounts(vec![]);
    let repo = account_repo(&context);

    repo.add(AccountDto {
        id: 1,
        email: "a@x.com".into(),
    })
    .await
    .unwrap();
    assert_eq!(session.commits(), 1);

    repo.update(AccountDto {
        id: 1,
        email: "b@x.com".into(),
    })
    .await
    .unwrap();
    assert_eq!(session.commits(), 2);

    repo.delete(1i64).await.unwrap();
    assert_eq!(session.commits(), 3);

    // Reads never commit.
    repo.get_all().await.unwrap();
    assert_eq!(session.commits(), 3);
}
