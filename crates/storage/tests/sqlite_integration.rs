use indent_core::model::{AppSettings, ThemeMode};
use storage::repository::SettingsRepository;
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_persists_theme() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_settings?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.get_settings().await.unwrap().is_none());

    repo.save_settings(&AppSettings::new(ThemeMode::Dark))
        .await
        .unwrap();
    let fetched = repo.get_settings().await.unwrap().expect("settings row");
    assert_eq!(fetched.theme(), ThemeMode::Dark);

    // Saving again overwrites the single row instead of inserting.
    repo.save_settings(&AppSettings::new(ThemeMode::Light))
        .await
        .unwrap();
    let fetched = repo.get_settings().await.unwrap().expect("settings row");
    assert_eq!(fetched.theme(), ThemeMode::Light);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    repo.save_settings(&AppSettings::new(ThemeMode::Dark))
        .await
        .unwrap();
    assert!(repo.get_settings().await.unwrap().is_some());
}
