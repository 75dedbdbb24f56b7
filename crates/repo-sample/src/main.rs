use repo_framework::tracing::setup_tracing;
use repo_framework::{IdentityValue, RepoModule};
use repo_sample::dto::PostDto;
use repo_sample::modules::{PostModule, UserModule};
use repo_sample::storage::build_context;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting sample repository walkthrough");

    let context = build_context()?;
    let users = UserModule::new(&context)?;
    let posts = PostModule::new(&context)?;

    // Create
    let alice = users.register("alice@example.com").await?;
    info!(user_id = %alice.id, "User created");

    // Read back by identity; the id round-trips through its string form.
    let fetched = users.get_by_id(IdentityValue::new(alice.id)).await?;
    info!(email = %fetched.email, "User fetched");

    // Update
    let renamed = users.change_email(alice.id, "alice@new.example.com").await?;
    info!(email = %renamed.email, "Email changed");

    // A second resource type sharing the same context and session.
    let post = posts
        .publish(PostDto {
            id: 1,
            text: "hello world".into(),
        })
        .await?;
    info!(post_id = post.id, "Post published");

    // Delete is idempotent; running it twice is fine.
    users.delete(IdentityValue::new(alice.id)).await?;
    users.delete(IdentityValue::new(alice.id)).await?;
    let remaining = users.get_all().await?;
    info!(remaining = remaining.len(), "User deleted");

    Ok(())
}
