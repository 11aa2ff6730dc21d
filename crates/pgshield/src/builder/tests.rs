use crate::condition::Condition;
use crate::error::QueryError;
use crate::query::{JoinSpec, QueryRequest, SortDir};
use crate::value::SqlValue;

use super::*;

fn placeholders(sql: &str) -> Vec<usize> {
    let re = regex::Regex::new(r"\$(\d+)").unwrap();
    re.captures_iter(sql)
        .map(|c| c[1].parse().unwrap())
        .collect()
}

/// Every built statement must reference exactly $1..=$n for n parameters.
fn assert_placeholders_dense(query: &crate::query::PreparedQuery) {
    let mut seen = placeholders(&query.sql);
    seen.sort_unstable();
    seen.dedup();
    let expect: Vec<usize> = (1..=query.parameters.len()).collect();
    assert_eq!(seen, expect, "sql: {}", query.sql);
}

#[test]
fn select_star_defaults() {
    let q = build_select(&QueryRequest::table("users")).unwrap();
    assert_eq!(q.sql, r#"SELECT * FROM "users""#);
    assert!(q.parameters.is_empty());
}

#[test]
fn select_or_filter_with_limit() {
    let q = build_select(
        &QueryRequest::table("orders")
            .filter(Condition::or(vec![
                Condition::eq("status", "paid"),
                Condition::eq("status", "pending"),
            ]))
            .limit(10),
    )
    .unwrap();
    assert_eq!(
        q.sql,
        r#"SELECT * FROM "orders" WHERE ("status" = $1 OR "status" = $2) LIMIT $3"#
    );
    assert_eq!(
        q.parameters,
        vec![
            SqlValue::Text("paid".into()),
            SqlValue::Text("pending".into()),
            SqlValue::Int(10),
        ]
    );
}

#[test]
fn select_clause_order_is_fixed() {
    let q = build_select(
        &QueryRequest::table("orders")
            .columns(&["id", "total"])
            .join(JoinSpec::inner("users", "orders.user_id", "users.id"))
            .filter(Condition::eq("status", "paid"))
            .order_by("created_at", SortDir::Desc)
            .limit(20)
            .offset(40),
    )
    .unwrap();
    assert_eq!(
        q.sql,
        r#"SELECT "id", "total" FROM "orders" INNER JOIN "users" ON "orders"."user_id" = "users"."id" WHERE "status" = $1 ORDER BY "created_at" DESC LIMIT $2 OFFSET $3"#
    );
    assert_eq!(q.parameters.len(), 3);
    assert_placeholders_dense(&q);
}

#[test]
fn having_continues_where_numbering() {
    let q = build_select(
        &QueryRequest::table("orders")
            .filter(Condition::eq("status", "paid"))
            .group_by(&["region"])
            .having(Condition::gt("total", 100_i64)),
    )
    .unwrap();
    assert_eq!(
        q.sql,
        r#"SELECT * FROM "orders" WHERE "status" = $1 GROUP BY "region" HAVING "total" > $2"#
    );
    assert_placeholders_dense(&q);
}

#[test]
fn join_table_is_validated() {
    let err = build_select(
        &QueryRequest::table("orders").join(JoinSpec::inner("users; --", "orders.user_id", "users.id")),
    )
    .unwrap_err();
    assert!(matches!(err, QueryError::InvalidIdentifier { .. }));
}

#[test]
fn reserved_table_rejected() {
    let err = build_select(&QueryRequest::table("select")).unwrap_err();
    assert!(matches!(err, QueryError::InvalidIdentifier { .. }));
}

#[test]
fn order_by_column_is_validated() {
    let err = build_select(
        &QueryRequest::table("users").order_by("name DESC; DROP TABLE users", SortDir::Asc),
    )
    .unwrap_err();
    assert!(matches!(err, QueryError::InvalidIdentifier { .. }));
}

#[test]
fn insert_orders_placeholders_by_column() {
    let q = build_insert(
        "users",
        &[("name", "alice".into()), ("email", "a@example.com".into())],
        &["id"],
    )
    .unwrap();
    assert_eq!(
        q.sql,
        r#"INSERT INTO "users" ("name", "email") VALUES ($1, $2) RETURNING "id""#
    );
    assert_eq!(q.parameters.len(), 2);
}

#[test]
fn insert_rejects_empty_row() {
    let err = build_insert("users", &[], &[]).unwrap_err();
    assert_eq!(err, QueryError::EmptyAssignments("INSERT"));
}

#[test]
fn bulk_insert_numbers_row_major() {
    let rows = vec![
        vec![("a", SqlValue::Int(1)), ("b", SqlValue::Int(2))],
        vec![("a", SqlValue::Int(3)), ("b", SqlValue::Int(4))],
    ];
    let q = build_bulk_insert("t", &rows, &[]).unwrap();
    assert_eq!(
        q.sql,
        r#"INSERT INTO "t" ("a", "b") VALUES ($1, $2), ($3, $4)"#
    );
    assert_eq!(
        q.parameters,
        vec![
            SqlValue::Int(1),
            SqlValue::Int(2),
            SqlValue::Int(3),
            SqlValue::Int(4),
        ]
    );
}

#[test]
fn bulk_insert_rejects_empty_batch() {
    let err = build_bulk_insert("t", &[], &[]).unwrap_err();
    assert_eq!(err, QueryError::EmptyBatch);
}

#[test]
fn bulk_insert_rejects_row_shape_drift() {
    let rows = vec![
        vec![("a", SqlValue::Int(1)), ("b", SqlValue::Int(2))],
        vec![("a", SqlValue::Int(3))],
    ];
    let err = build_bulk_insert("t", &rows, &[]).unwrap_err();
    assert_eq!(err, QueryError::RowShapeMismatch { row: 1 });

    let rows = vec![
        vec![("a", SqlValue::Int(1))],
        vec![("b", SqlValue::Int(2))],
    ];
    let err = build_bulk_insert("t", &rows, &[]).unwrap_err();
    assert_eq!(err, QueryError::RowShapeMismatch { row: 1 });
}

#[test]
fn update_numbers_set_before_where() {
    let q = build_update(
        "users",
        &[("name", "bob".into()), ("age", SqlValue::Int(30))],
        Some(&Condition::eq("id", SqlValue::Int(7))),
        &[],
    )
    .unwrap();
    assert_eq!(
        q.sql,
        r#"UPDATE "users" SET "name" = $1, "age" = $2 WHERE "id" = $3"#
    );
    assert_placeholders_dense(&q);
}

#[test]
fn update_without_filter_touches_all_rows() {
    let q = build_update("users", &[("active", false.into())], None, &[]).unwrap();
    assert_eq!(q.sql, r#"UPDATE "users" SET "active" = $1"#);
}

#[test]
fn update_rejects_empty_assignments() {
    let err = build_update("users", &[], None, &[]).unwrap_err();
    assert_eq!(err, QueryError::EmptyAssignments("UPDATE"));
}

#[test]
fn delete_requires_filter() {
    let err = build_delete("sessions", None, &[]).unwrap_err();
    assert_eq!(err, QueryError::MissingWhereClause);
}

#[test]
fn delete_with_filter_and_returning() {
    let q = build_delete(
        "sessions",
        Some(&Condition::eq("token", "abc")),
        &["id"],
    )
    .unwrap();
    assert_eq!(
        q.sql,
        r#"DELETE FROM "sessions" WHERE "token" = $1 RETURNING "id""#
    );
    assert_eq!(q.parameters.len(), 1);
}

#[test]
fn transaction_frames_statements() {
    let inner = build_insert("t", &[("a", SqlValue::Int(1))], &[]).unwrap();
    let stmts = build_transaction(vec![inner]);
    assert_eq!(stmts.len(), 3);
    assert_eq!(stmts[0].sql, "BEGIN");
    assert!(stmts[0].parameters.is_empty());
    assert_eq!(stmts[1].sql, r#"INSERT INTO "t" ("a") VALUES ($1)"#);
    assert_eq!(stmts[2].sql, "COMMIT");
    assert!(stmts[2].parameters.is_empty());
}

#[test]
fn empty_transaction_is_just_frames() {
    let stmts = build_transaction(Vec::new());
    assert_eq!(stmts.len(), 2);
    assert_eq!(stmts[0].sql, "BEGIN");
    assert_eq!(stmts[1].sql, "COMMIT");
}

#[test]
fn sanitizer_runs_on_bound_values() {
    let q = build_insert("notes", &[("body", "it's; fine".into())], &[]).unwrap();
    assert_eq!(q.parameters, vec![SqlValue::Text("its fine".into())]);
}

#[test]
fn placeholder_count_matches_parameter_count() {
    let q = build_select(
        &QueryRequest::table("orders")
            .filter(
                Condition::in_list("status", ["paid", "pending", "failed"])
                    .and_with(Condition::between("total", [10_i64, 500_i64]).unwrap()),
            )
            .limit(5)
            .offset(10),
    )
    .unwrap();
    assert_eq!(placeholders(&q.sql).len(), q.parameters.len());
    assert_placeholders_dense(&q);
}
