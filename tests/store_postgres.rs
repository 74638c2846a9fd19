//! Postgres-backed integration tests. They run against the database named by
//! DATABASE_URL and are no-ops when that variable is absent, so the rest of
//! the suite stays runnable without a server.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::time::{sleep, Duration};

use recipebook::auth::AuthUser;
use recipebook::services::{CommentService, ProfileService, RegisterProfile};
use recipebook::store::{NewProfile, Store};
use recipebook::ApiError;

async fn connect() -> Option<Arc<Store>> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL is not set, skipping Postgres-backed test");
            return None;
        }
    };
    let store = Store::connect(&url).await.expect("Postgres connection");
    store.init().await.expect("schema init");
    Some(Arc::new(store))
}

fn unique_login(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}_{nanos}")
}

async fn seed_profile(store: &Store, login: &str) -> i32 {
    store
        .register_profile(NewProfile {
            name: "Test",
            surname: "Author",
            email: "author@example.com",
            reference_link: "https://example.com/author",
            login,
            password_hash: "not-a-real-hash",
        })
        .await
        .expect("profile insert")
}

async fn seed_recipe(store: &Store, publisher_id: i32, name: &str) -> (i32, i32) {
    let category_id = store.insert_category("Soups").await.expect("category insert");
    let recipe_id = store
        .insert_recipe(name, None, None, publisher_id, category_id, &[])
        .await
        .expect("recipe insert");
    (recipe_id, category_id)
}

#[tokio::test]
async fn comment_round_trip_preserves_text_and_rating() {
    let Some(store) = connect().await else { return };

    let login = unique_login("roundtrip");
    let profile_id = seed_profile(&store, &login).await;
    let (recipe_id, category_id) = seed_recipe(&store, profile_id, "Borscht").await;

    let comment_id = store
        .insert_comment(profile_id, recipe_id, Some("Rich and hearty"), 4.0)
        .await
        .expect("comment insert");

    let comment = store
        .get_comment(comment_id)
        .await
        .expect("comment lookup")
        .expect("comment exists");
    assert_eq!(comment.id, comment_id);
    assert_eq!(comment.text.as_deref(), Some("Rich and hearty"));
    assert_eq!(comment.rating, 4.0);
    assert_eq!(comment.profile_id, profile_id);
    assert_eq!(comment.recipe_id, recipe_id);
    assert!(comment.publication_time <= chrono::Utc::now());

    store.delete_profile(profile_id).await.expect("cleanup");
    store.delete_category(category_id).await.expect("cleanup");
}

#[tokio::test]
async fn profile_comment_listing_filters_and_orders() {
    let Some(store) = connect().await else { return };

    let login = unique_login("listing");
    let profile_id = seed_profile(&store, &login).await;
    let (first_recipe, category_id) = seed_recipe(&store, profile_id, "Pancakes").await;
    let second_recipe = store
        .insert_recipe("Okroshka", None, None, profile_id, category_id, &[])
        .await
        .expect("recipe insert");

    let older = store
        .insert_comment(profile_id, first_recipe, Some("Fluffy and light"), 5.0)
        .await
        .expect("comment insert");
    // Distinct publication times so the ordering assertions are unambiguous.
    sleep(Duration::from_millis(20)).await;
    let newer = store
        .insert_comment(profile_id, second_recipe, Some("Too salty"), 2.0)
        .await
        .expect("comment insert");

    // The text filter keeps exactly the matching subset, case-insensitively.
    let filtered = store
        .list_profile_comments(profile_id, Some("FLUFFY"), false)
        .await
        .expect("filtered listing");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, older);

    let none = store
        .list_profile_comments(profile_id, Some("no such text"), false)
        .await
        .expect("filtered listing");
    assert!(none.is_empty());

    // reverseOrder flips publication-time order.
    let ascending = store
        .list_profile_comments(profile_id, None, false)
        .await
        .expect("ascending listing");
    let descending = store
        .list_profile_comments(profile_id, None, true)
        .await
        .expect("descending listing");
    assert_eq!(ascending.len(), 2);
    assert_eq!(ascending[0].id, older);
    assert_eq!(ascending[1].id, newer);
    assert_eq!(descending[0].id, newer);
    assert_eq!(descending[1].id, older);

    store.delete_profile(profile_id).await.expect("cleanup");
    store.delete_category(category_id).await.expect("cleanup");
}

#[tokio::test]
async fn delete_by_token_requires_an_existing_comment() {
    let Some(store) = connect().await else { return };

    let author_login = unique_login("author");
    let bystander_login = unique_login("bystander");
    let author_id = seed_profile(&store, &author_login).await;
    let bystander_id = seed_profile(&store, &bystander_login).await;
    let (recipe_id, category_id) = seed_recipe(&store, author_id, "Solyanka").await;

    store
        .insert_comment(author_id, recipe_id, Some("My own recipe, five stars"), 5.0)
        .await
        .expect("comment insert");

    // The bystander never commented on this recipe, so the by-token delete
    // fails not-found and the author's comment survives.
    let service = CommentService::new(store.clone());
    let bystander = AuthUser {
        profile_id: bystander_id,
        is_admin: false,
    };
    let err = service
        .delete_own(&bystander, recipe_id)
        .await
        .expect_err("nothing to delete");
    assert!(matches!(err, ApiError::NotFound(_)));

    let remaining = store
        .list_profile_comments(author_id, None, false)
        .await
        .expect("listing");
    assert_eq!(remaining.len(), 1);

    // The owner's by-token delete succeeds.
    let author = AuthUser {
        profile_id: author_id,
        is_admin: false,
    };
    service
        .delete_own(&author, recipe_id)
        .await
        .expect("owner delete");
    let remaining = store
        .list_profile_comments(author_id, None, false)
        .await
        .expect("listing");
    assert!(remaining.is_empty());

    store.delete_profile(author_id).await.expect("cleanup");
    store.delete_profile(bystander_id).await.expect("cleanup");
    store.delete_category(category_id).await.expect("cleanup");
}

#[tokio::test]
async fn profile_delete_cascades_to_dependents() {
    let Some(store) = connect().await else { return };

    let login = unique_login("cascade");
    let profile_id = seed_profile(&store, &login).await;
    let (recipe_id, category_id) = seed_recipe(&store, profile_id, "Kompot").await;
    let comment_id = store
        .insert_comment(profile_id, recipe_id, Some("Refreshing"), 4.0)
        .await
        .expect("comment insert");
    store
        .insert_bookmark(profile_id, recipe_id)
        .await
        .expect("bookmark insert");

    let deleted = store.delete_profile(profile_id).await.expect("delete");
    assert_eq!(deleted, 1);

    // Authorization, published recipes, comments and bookmarks all go with
    // the profile.
    assert!(store
        .credentials_by_login(&login)
        .await
        .expect("credential lookup")
        .is_none());
    assert!(!store.recipe_exists(recipe_id).await.expect("recipe lookup"));
    assert!(store
        .get_comment(comment_id)
        .await
        .expect("comment lookup")
        .is_none());
    assert!(store
        .list_bookmarks(profile_id)
        .await
        .expect("bookmark listing")
        .is_empty());

    store.delete_category(category_id).await.expect("cleanup");
}

#[tokio::test]
async fn registration_appends_an_audit_row() {
    let Some(store) = connect().await else { return };

    let service = ProfileService::new(store.clone());
    let login = unique_login("register");
    let profile_id = service
        .register(RegisterProfile {
            name: "Anna".into(),
            surname: "Petrova".into(),
            email: "anna@example.com".into(),
            reference_link: "https://example.com/anna".into(),
            login: login.clone(),
            password: "correct horse battery".into(),
        })
        .await
        .expect("registration");

    let entries = store
        .count_audit_entries("Profiles.Register", &format!("profile {}", profile_id))
        .await
        .expect("audit count");
    assert_eq!(entries, 1);

    store.delete_profile(profile_id).await.expect("cleanup");
}
