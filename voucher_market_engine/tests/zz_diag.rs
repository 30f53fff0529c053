mod support;
use support::{prepare_test_env, random_db_url, seed_user};
use voucher_market_engine::{db_types::User, SqliteDatabase};

#[tokio::test]
async fn diag_fetch() {
    let db = prepare_test_env(&random_db_url()).await;
    let id = seed_user(&db, "Asha", "asha@example.com", "hunter2").await;
    println!("SEEDED id={id}");

    // raw count
    let (c,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(db.pool())
        .await
        .unwrap();
    println!("RAW COUNT={c}");

    // raw scalar email match
    let (c2,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind("asha@example.com")
        .fetch_one(db.pool())
        .await
        .unwrap();
    println!("RAW COUNT email match={c2}");

    // query_as into User
    let r: Result<Option<User>, sqlx::Error> =
        sqlx::query_as("SELECT * FROM users WHERE email = ?")
            .bind("asha@example.com")
            .fetch_optional(db.pool())
            .await;
    match r {
        Ok(Some(u)) => println!("GOT USER id={} email={}", u.id, u.email),
        Ok(None) => println!("GOT NONE"),
        Err(e) => println!("GOT ERR: {e:?}"),
    }
    let _ = SqliteDatabase::new_with_url; // silence unused import if any
}
