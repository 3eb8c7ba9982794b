// ABOUTME: Integration test for file-backed database creation
// ABOUTME: Verifies the store creates its file and survives reconnection

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::create_test_user;
use stride_server::database::Database;

#[tokio::test]
async fn test_file_database_is_created_and_persists() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stride.db");
    let url = format!("sqlite:{}", path.display());

    let user_id = {
        let db = Database::new(&url).await.unwrap();
        let (user_id, _) = create_test_user(&db).await.unwrap();
        user_id
    };

    assert!(path.exists());

    // A fresh connection sees the previously written account
    let db = Database::new(&url).await.unwrap();
    let user = db.get_user(user_id).await.unwrap().unwrap();
    assert_eq!(user.email, "test@example.com");
}
