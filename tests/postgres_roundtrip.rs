//! End-to-end round trip against a real PostgreSQL
//!
//! Needs a Docker daemon: `cargo test -- --ignored`.

mod common;

use std::{collections::HashSet, time::Duration};

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;

use common::{ADMIN_EMAIL, BRIDGE_SECRET, app_with_pool, get, json, send};
use gradebook::{
    db::{self, repositories::ExamRepository},
    grading::{GradingPolicy, PgScoreSource, load_and_aggregate},
    services::{
        BackupService, ExamService, LoginLogService, ScoreService, StudentService,
        score_service::ScoreSheet, student_service::StudentRow,
    },
};

/// Fresh migrated database; the container lives as long as the handle
async fn start_postgres() -> (ContainerAsync<Postgres>, PgPool, String) {
    let container = Postgres::default()
        .with_tag("16-alpine")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPool::connect(&url).await.expect("connect");
    db::run_migrations(&pool).await.expect("migrations");

    (container, pool, url)
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn import_grade_backup_restore() {
    let (_container, pool, url) = start_postgres().await;

    // roster
    let rows: Vec<StudentRow> = serde_json::from_value(json!([
        { "seat_number": 2, "name": "Bo", "email": "bo@school.test" },
        { "seat_number": "1", "name": "Ann", "email": "ann@school.test" },
        { "seat_number": 12.0, "name": "Cy", "email": "cy@school.test" },
        { "seat_number": "1", "name": "Dup", "email": "dup@school.test" },
    ]))
    .unwrap();
    let stats = StudentService::import_students(&pool, &rows).await.unwrap();
    assert_eq!((stats.created, stats.errors), (3, 1));

    let students = StudentService::list_students(&pool).await.unwrap();
    let seats: Vec<_> = students
        .iter()
        .map(|s| s.seat_number.clone().unwrap())
        .collect();
    assert_eq!(seats, vec!["1", "2", "12"]);

    // scores
    let sheet: ScoreSheet = serde_json::from_value(json!({
        "headers": ["Seat Number", "Math", "Art", "History"],
        "rows": [
            [1, 90, 70, 80],
            ["2", "60", null, 100],
            [12, null, null, null],
            [99, 50, 50, 50],
        ]
    }))
    .unwrap();
    let stats = ScoreService::import_sheet(&pool, &sheet).await.unwrap();
    assert_eq!(stats.created_exams, 3);
    assert_eq!(stats.processed_scores, 5);
    assert_eq!(stats.errors, 1);

    let exams = ExamService::list_exams(&pool).await.unwrap();
    let math = exams.iter().find(|e| e.name == "Math").unwrap().id;
    ExamService::set_mandatory_exams(&pool, &[math]).await.unwrap();

    // grades, limit 2: mandatory Math plus the best optional
    let source = PgScoreSource::new(pool.clone());
    let ids: HashSet<_> = students.iter().map(|s| s.id).collect();
    let policy = GradingPolicy::with_limit(2);
    let results = load_and_aggregate(&source, &ids, &policy).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[&students[0].id].average(), Some(85.0));
    assert_eq!(results[&students[1].id].average(), Some(80.0));
    assert_eq!(results[&students[2].id].average(), None);

    // same data through the HTTP surface
    let app = app_with_pool(pool.clone(), &url);
    let mut request = json(
        "POST",
        "/api/v1/auth/session",
        None,
        json!({ "email": ADMIN_EMAIL, "name": "Admin" }),
    );
    let headers = request.headers_mut();
    headers.insert("x-auth-bridge-secret", BRIDGE_SECRET.parse().unwrap());
    headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.2".parse().unwrap());
    headers.insert("user-agent", "gradebook-tests/1.0".parse().unwrap());
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, table) = send(&app, get("/api/v1/admin/grades", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        table["columns"],
        json!(["Seat Number", "Name", "Top 20 Avg", "Math", "Art", "History"])
    );
    assert_eq!(table["rows"][0]["average"], json!(80.0));
    assert_eq!(table["rows"][2]["average"], json!(null));

    let mut request = json(
        "POST",
        "/api/v1/auth/session",
        None,
        json!({ "email": "stranger@school.test", "name": "Stranger" }),
    );
    request
        .headers_mut()
        .insert("x-auth-bridge-secret", BRIDGE_SECRET.parse().unwrap());
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // only the successful sign-in is logged
    let (status, logs) = send(&app, get("/api/v1/admin/login-logs", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logs["retention_days"], json!(3));
    assert_eq!(logs["logs"].as_array().map(Vec::len), Some(1));
    assert_eq!(logs["logs"][0]["email"], ADMIN_EMAIL);
    assert_eq!(logs["logs"][0]["role"], "admin");
    assert_eq!(logs["logs"][0]["ip_address"], "203.0.113.7");
    assert_eq!(logs["logs"][0]["user_agent"], "gradebook-tests/1.0");

    // backup, damage, restore
    let backup = BackupService::export(&pool).await.unwrap();
    assert_eq!(backup.data.users.len(), 4);
    assert_eq!(backup.data.scores.len(), 5);

    ExamService::delete_exam(&pool, &math).await.unwrap();
    let counts = BackupService::restore(&pool, &backup).await.unwrap();
    assert_eq!((counts.users, counts.exams, counts.scores), (4, 3, 5));

    let restored = load_and_aggregate(&source, &ids, &policy).await.unwrap();
    assert_eq!(restored, results);

    let mut tampered = backup.clone();
    tampered.data.scores[0].value += 1.0;
    assert!(BackupService::restore(&pool, &tampered).await.is_err());

    // restore keeps the audit trail, retention prunes it
    assert_eq!(LoginLogService::recent(&pool, None).await.unwrap().len(), 1);
    sqlx::query("UPDATE login_logs SET created_at = NOW() - INTERVAL '10 days'")
        .execute(&pool)
        .await
        .unwrap();
    assert_eq!(LoginLogService::cleanup(&pool, 0).await.unwrap(), 0);
    assert_eq!(LoginLogService::cleanup(&pool, 3).await.unwrap(), 1);
    assert!(LoginLogService::recent(&pool, None).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn concurrent_exam_creation_returns_one_exam() {
    let (_container, pool, _url) = start_postgres().await;

    // first insert stays uncommitted while the second one arrives
    let mut tx = pool.begin().await.unwrap();
    let (first, created) = ExamRepository::find_or_create(&mut *tx, "Physics").await.unwrap();
    assert!(created);

    let other_pool = pool.clone();
    let racing = tokio::spawn(async move {
        ExamRepository::find_or_create(&other_pool, "Physics").await
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    tx.commit().await.unwrap();

    let (second, created) = racing.await.unwrap().unwrap();
    assert!(!created);
    assert_eq!(second.id, first.id);

    let (again, created) = ExamRepository::find_or_create(&pool, "Physics").await.unwrap();
    assert!(!created);
    assert_eq!(again.id, first.id);

    let (results, _) = tokio::join!(
        ExamRepository::find_or_create(&pool, "Chemistry"),
        ExamRepository::find_or_create(&pool, "Chemistry"),
    );
    let (chemistry, _) = results.unwrap();
    let listed = ExamService::list_exams(&pool).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().any(|e| e.id == chemistry.id));
}
