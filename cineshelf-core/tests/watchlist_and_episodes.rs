//! Postgres-backed coverage for the watchlist toggle and the episode
//! uniqueness invariant, which both live in SQL.

use cineshelf_core::{
    CatalogError, MovieRepository, ShowRepository, WatchlistRepository,
};
use cineshelf_model::{NewCatalogItem, NewEpisode, ToggleOutcome, WatchTarget};
use sqlx::PgPool;
use uuid::Uuid;

async fn seed_user(pool: &PgPool) -> Uuid {
    let id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO users (id, email, display_name, password_hash) \
         VALUES ($1, $2, 'Viewer', 'x')",
    )
    .bind(id)
    .bind(format!("{id}@example.com"))
    .execute(pool)
    .await
    .expect("insert user");
    id
}

fn catalog_item(title: &str) -> NewCatalogItem {
    NewCatalogItem {
        title: title.to_string(),
        description: "Seeded for tests.".to_string(),
        poster: "/media/posters/seed.jpg".to_string(),
        banner: None,
        video: None,
        trailer: None,
        release_year: 2020,
        language: "English".to_string(),
        is_trending: false,
        is_hindi: false,
        is_english: true,
        top_rank: None,
        watch_link: None,
        more_info_link: None,
    }
}

fn episode(show_id: i64, season: i32, number: i32) -> NewEpisode {
    NewEpisode {
        tvshow_id: show_id,
        season,
        episode_number: number,
        title: format!("S{season}E{number}"),
        description: "Seeded for tests.".to_string(),
        video: "/media/episodes/seed.mp4".to_string(),
        thumbnail: None,
    }
}

#[sqlx::test(migrator = "cineshelf_core::MIGRATOR")]
async fn toggle_alternates_membership_without_duplicate_rows(pool: PgPool) {
    let user = seed_user(&pool).await;
    let movies = MovieRepository::new(pool.clone());
    let movie = movies
        .insert(&catalog_item("Night Train"))
        .await
        .expect("insert movie");
    let watchlist = WatchlistRepository::new(pool.clone());
    let target = WatchTarget::Movie(movie.id);

    assert_eq!(
        watchlist.toggle(user, target).await.unwrap(),
        ToggleOutcome::Added
    );
    assert!(watchlist.contains(user, target).await.unwrap());

    assert_eq!(
        watchlist.toggle(user, target).await.unwrap(),
        ToggleOutcome::Removed
    );
    assert!(!watchlist.contains(user, target).await.unwrap());

    assert_eq!(
        watchlist.toggle(user, target).await.unwrap(),
        ToggleOutcome::Added
    );

    let rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM watchlist_entries WHERE user_id = $1")
            .bind(user)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrator = "cineshelf_core::MIGRATOR")]
async fn movie_and_show_entries_toggle_independently(pool: PgPool) {
    let user = seed_user(&pool).await;
    let movies = MovieRepository::new(pool.clone());
    let shows = ShowRepository::new(pool.clone());
    let movie = movies.insert(&catalog_item("Night Train")).await.unwrap();
    let show = shows.insert(&catalog_item("Harbor Lights")).await.unwrap();
    let watchlist = WatchlistRepository::new(pool);

    watchlist
        .toggle(user, WatchTarget::Movie(movie.id))
        .await
        .unwrap();
    watchlist
        .toggle(user, WatchTarget::Show(show.id))
        .await
        .unwrap();
    watchlist
        .toggle(user, WatchTarget::Movie(movie.id))
        .await
        .unwrap();

    assert!(!watchlist
        .contains(user, WatchTarget::Movie(movie.id))
        .await
        .unwrap());
    assert!(watchlist
        .contains(user, WatchTarget::Show(show.id))
        .await
        .unwrap());

    let items = watchlist.list(user).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].target, WatchTarget::Show(show.id));
    assert_eq!(items[0].title, "Harbor Lights");
}

#[sqlx::test(migrator = "cineshelf_core::MIGRATOR")]
async fn toggling_a_missing_target_is_not_found(pool: PgPool) {
    let user = seed_user(&pool).await;
    let watchlist = WatchlistRepository::new(pool);

    let err = watchlist
        .toggle(user, WatchTarget::Movie(999))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[sqlx::test(migrator = "cineshelf_core::MIGRATOR")]
async fn duplicate_episode_triple_is_rejected_as_validation(pool: PgPool) {
    let shows = ShowRepository::new(pool);
    let show = shows.insert(&catalog_item("Harbor Lights")).await.unwrap();

    shows
        .insert_episode(&episode(show.id, 1, 1))
        .await
        .expect("first episode");

    let err = shows
        .insert_episode(&episode(show.id, 1, 1))
        .await
        .unwrap_err();
    match err {
        CatalogError::Validation(fields) => {
            assert!(fields.field("episode_number").is_some());
        }
        other => panic!("expected a validation error, got {other}"),
    }
    assert_eq!(shows.count_episodes().await.unwrap(), 1);

    // A different season or number is a different episode.
    shows.insert_episode(&episode(show.id, 2, 1)).await.unwrap();
    shows.insert_episode(&episode(show.id, 1, 2)).await.unwrap();
    assert_eq!(shows.count_episodes().await.unwrap(), 3);
}

#[sqlx::test(migrator = "cineshelf_core::MIGRATOR")]
async fn episode_for_an_unknown_show_is_a_field_error(pool: PgPool) {
    let shows = ShowRepository::new(pool);

    let err = shows.insert_episode(&episode(999, 1, 1)).await.unwrap_err();
    match err {
        CatalogError::Validation(fields) => {
            assert!(fields.field("tvshow").is_some());
        }
        other => panic!("expected a validation error, got {other}"),
    }
}
