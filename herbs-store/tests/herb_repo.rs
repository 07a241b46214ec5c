//! Herb repository against a real PostgreSQL server.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p herbs-store -- --ignored
//!
//! Every test works in its own freshly created schema, so counts and
//! "exactly one" assertions are not disturbed by other data.

use chrono::{DateTime, Utc};
use herbs_core::{DatabaseConfig, Herb, ValidationError};
use herbs_store::db::pool_options;
use herbs_store::{migrations, ErrorKind, HerbRepo, StoreError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use uuid::Uuid;

struct TestDb {
    pool: PgPool,
    base: PgConnectOptions,
    schema: String,
}

impl TestDb {
    async fn new() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let base: PgConnectOptions = url.parse().expect("invalid DATABASE_URL");
        let schema = format!("herbs_test_{}", Uuid::new_v4().simple());

        let admin = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(base.clone())
            .await
            .expect("admin connection failed");
        sqlx::query(&format!("CREATE SCHEMA {schema}"))
            .execute(&admin)
            .await
            .expect("create schema failed");
        admin.close().await;

        let options = base.clone().options([("search_path", schema.as_str())]);
        let pool = pool_options(&DatabaseConfig::default())
            .connect_with(options)
            .await
            .expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");

        Self { pool, base, schema }
    }

    fn repo(&self) -> HerbRepo<'_> {
        HerbRepo::new(&self.pool)
    }

    async fn now(&self) -> DateTime<Utc> {
        sqlx::query_scalar("SELECT NOW()")
            .fetch_one(&self.pool)
            .await
            .expect("clock query failed")
    }

    async fn teardown(self) {
        self.pool.close().await;
        let admin = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(self.base)
            .await
            .expect("admin connection failed");
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&admin)
            .await
            .expect("drop schema failed");
        admin.close().await;
    }
}

fn chamomile() -> Herb {
    Herb {
        name: "Chamomile".into(),
        latin_name: Some("Matricaria chamomilla".into()),
        description: Some("Anti-inflammatory, mild sedative".into()),
        is_poisonous: false,
        image_path: Some("images/chamomile.jpg".into()),
        ..Default::default()
    }
}

fn henbane() -> Herb {
    Herb {
        name: "Henbane".into(),
        latin_name: Some("Hyoscyamus niger".into()),
        description: Some("Toxic nightshade".into()),
        is_poisonous: true,
        ..Default::default()
    }
}

fn names(herbs: &[Herb]) -> Vec<&str> {
    herbs.iter().map(|h| h.name.as_str()).collect()
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_then_get_round_trips() {
    let db = TestDb::new().await;
    let repo = db.repo();

    let before = db.now().await;
    let mut herb = chamomile();
    repo.create(&mut herb).await.unwrap();

    assert!(herb.id > 0);
    assert!(herb.created_at >= before);

    let fetched = repo.get_by_id(herb.id).await.unwrap();
    assert_eq!(fetched, herb);
    assert_eq!(fetched.name, "Chamomile");
    assert_eq!(fetched.latin_name.as_deref(), Some("Matricaria chamomilla"));
    assert_eq!(
        fetched.description.as_deref(),
        Some("Anti-inflammatory, mild sedative")
    );
    assert!(!fetched.is_poisonous);
    assert_eq!(fetched.image_path.as_deref(), Some("images/chamomile.jpg"));

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn absent_optionals_round_trip_as_none() {
    let db = TestDb::new().await;
    let repo = db.repo();

    let mut herb = Herb::new("Sage");
    repo.create(&mut herb).await.unwrap();

    let fetched = repo.get_by_id(herb.id).await.unwrap();
    assert_eq!(fetched.latin_name, None);
    assert_eq!(fetched.description, None);
    assert_eq!(fetched.image_path, None);

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn invalid_create_writes_nothing() {
    let db = TestDb::new().await;
    let repo = db.repo();

    let mut herb = Herb::new("x");
    let err = repo.create(&mut herb).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::TooShort { .. })
    ));
    assert!(repo.get_all().await.unwrap().is_empty());

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn get_missing_id_is_not_found() {
    let db = TestDb::new().await;

    let err = db.repo().get_by_id(9999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "herb with ID 9999 not found");

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_is_idempotent_and_keeps_identity() {
    let db = TestDb::new().await;
    let repo = db.repo();

    let mut herb = chamomile();
    repo.create(&mut herb).await.unwrap();
    let original = herb.clone();

    herb.name = "German chamomile".into();
    herb.image_path = None;
    herb.is_poisonous = true;

    repo.update(&herb).await.unwrap();
    let first = repo.get_by_id(herb.id).await.unwrap();
    repo.update(&herb).await.unwrap();
    let second = repo.get_by_id(herb.id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second.id, original.id);
    assert_eq!(second.created_at, original.created_at);
    assert_eq!(second.name, "German chamomile");
    assert_eq!(second.image_path, None);
    assert!(second.is_poisonous);

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_ignores_caller_timestamp() {
    let db = TestDb::new().await;
    let repo = db.repo();

    let mut herb = chamomile();
    repo.create(&mut herb).await.unwrap();
    let stored_at = herb.created_at;

    herb.created_at = DateTime::<Utc>::UNIX_EPOCH;
    repo.update(&herb).await.unwrap();

    assert_eq!(repo.get_by_id(herb.id).await.unwrap().created_at, stored_at);

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_missing_id_is_not_found() {
    let db = TestDb::new().await;

    let herb = Herb {
        id: 4242,
        ..chamomile()
    };
    let err = db.repo().update(&herb).await.unwrap_err();
    assert!(err.is_not_found());

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_then_get_is_not_found() {
    let db = TestDb::new().await;
    let repo = db.repo();

    let mut herb = chamomile();
    repo.create(&mut herb).await.unwrap();
    repo.delete(herb.id).await.unwrap();

    assert!(repo.get_by_id(herb.id).await.unwrap_err().is_not_found());
    assert!(repo.delete(herb.id).await.unwrap_err().is_not_found());

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn lists_are_sorted_by_name() {
    let db = TestDb::new().await;
    let repo = db.repo();

    assert!(repo.get_all().await.unwrap().is_empty());

    for (name, poisonous) in [
        ("Yarrow", false),
        ("Hemlock", true),
        ("Arnica", false),
        ("Foxglove", true),
    ] {
        let mut herb = Herb {
            is_poisonous: poisonous,
            ..Herb::new(name)
        };
        repo.create(&mut herb).await.unwrap();
    }

    let all = repo.get_all().await.unwrap();
    assert_eq!(names(&all), ["Arnica", "Foxglove", "Hemlock", "Yarrow"]);

    let poisonous = repo.get_poisonous().await.unwrap();
    assert_eq!(names(&poisonous), ["Foxglove", "Hemlock"]);

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_is_case_insensitive_over_both_names() {
    let db = TestDb::new().await;
    let repo = db.repo();

    let mut c = chamomile();
    repo.create(&mut c).await.unwrap();
    let mut h = henbane();
    repo.create(&mut h).await.unwrap();

    assert_eq!(names(&repo.search("CHAMO").await.unwrap()), ["Chamomile"]);
    assert_eq!(names(&repo.search("mile").await.unwrap()), ["Chamomile"]);
    assert_eq!(names(&repo.search("hyoscyamus").await.unwrap()), ["Henbane"]);
    assert!(repo.search("mandrake").await.unwrap().is_empty());

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_treats_wildcards_literally() {
    let db = TestDb::new().await;
    let repo = db.repo();

    let mut herb = Herb::new("St John's wort");
    repo.create(&mut herb).await.unwrap();

    assert!(repo.search("%").await.unwrap().is_empty());
    assert!(repo.search("St_John").await.unwrap().is_empty());
    assert_eq!(names(&repo.search("john's").await.unwrap()), ["St John's wort"]);

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn chamomile_and_henbane_scenario() {
    let db = TestDb::new().await;
    let repo = db.repo();

    let mut c = Herb {
        name: "Chamomile".into(),
        latin_name: Some("Matricaria chamomilla".into()),
        is_poisonous: false,
        ..Default::default()
    };
    repo.create(&mut c).await.unwrap();
    assert!(c.id > 0);
    assert!(!c.is_poisonous);

    let mut h = Herb {
        name: "Henbane".into(),
        latin_name: Some("Hyoscyamus niger".into()),
        is_poisonous: true,
        ..Default::default()
    };
    repo.create(&mut h).await.unwrap();

    assert_eq!(repo.get_poisonous().await.unwrap(), vec![h.clone()]);
    assert_eq!(repo.search("chamo").await.unwrap(), vec![c.clone()]);

    repo.delete(c.id).await.unwrap();
    let err = repo.get_by_id(c.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    db.teardown().await;
}
