use super::*;
use crate::condition::{Condition, HashValue, LikeEscape, LikeJoiner, LikeOp, Operand};
use crate::dialect::{MySql, Postgres};
use crate::error::QueryError;
use crate::query::{ColumnSpec, Query, SortOrder, TableSpec};
use crate::value::Value;

fn mysql() -> QueryBuilder<'static> {
    QueryBuilder::new(&MySql)
}

fn compile_condition(condition: &Condition) -> QueryResult<(String, Params)> {
    let mut alloc = PlaceholderAllocator::new(Params::new());
    let sql = mysql().build_condition(condition, &mut alloc)?;
    Ok((sql, alloc.into_params()))
}

fn keys(params: &Params) -> Vec<&str> {
    params.keys().collect()
}

// ==================== Conditions ====================

#[test]
fn test_hash_equality() {
    let (sql, params) = compile_condition(&Condition::eq("id", 1)).unwrap();
    assert_eq!(sql, "`id`=:qp0");
    assert_eq!(params.get(":qp0"), Some(&Value::Int(1)));
}

#[test]
fn test_hash_null_binds_nothing() {
    let (sql, params) = compile_condition(&Condition::eq("id", Value::Null)).unwrap();
    assert_eq!(sql, "`id` IS NULL");
    assert!(params.is_empty());
}

#[test]
fn test_hash_multi_key_and() {
    let cond = Condition::hash([("id", Value::from(1)), ("name", Value::from("x"))]);
    let (sql, params) = compile_condition(&cond).unwrap();
    assert_eq!(sql, "(`id`=:qp0) AND (`name`=:qp1)");
    assert_eq!(keys(&params), vec![":qp0", ":qp1"]);
    assert_eq!(params.get(":qp1"), Some(&Value::from("x")));
}

#[test]
fn test_hash_list_and_subquery() {
    let sub = Query::new().select("user_id").from("orders");
    let cond = Condition::hash([
        ("status", HashValue::from(vec!["a", "b"])),
        ("id", HashValue::from(sub)),
    ]);
    let (sql, _) = compile_condition(&cond).unwrap();
    assert_eq!(
        sql,
        "(`status` IN (:qp0, :qp1)) AND (`id` IN (SELECT `user_id` FROM `orders`))"
    );
}

#[test]
fn test_raw_condition_passthrough() {
    let (sql, params) = compile_condition(&Condition::raw("a = b")).unwrap();
    assert_eq!(sql, "a = b");
    assert!(params.is_empty());
}

#[test]
fn test_empty_condition() {
    let (sql, _) = compile_condition(&Condition::Hash(vec![])).unwrap();
    assert_eq!(sql, "");
}

#[test]
fn test_and_or_nesting() {
    let cond = Condition::and([
        Condition::eq("a", 1),
        Condition::or([Condition::eq("b", 2), Condition::raw("c > 3")]),
    ]);
    let (sql, params) = compile_condition(&cond).unwrap();
    assert_eq!(sql, "(`a`=:qp0) AND ((`b`=:qp1) OR (c > 3))");
    assert_eq!(params.len(), 2);
}

#[test]
fn test_and_skips_empty_operands() {
    let cond = Condition::and([Condition::Hash(vec![]), Condition::raw("x = 1")]);
    assert_eq!(compile_condition(&cond).unwrap().0, "(x = 1)");

    let all_empty = Condition::or([Condition::Hash(vec![]), Condition::raw("")]);
    assert_eq!(compile_condition(&all_empty).unwrap().0, "");
}

#[test]
fn test_not_condition() {
    let cond = Condition::not(Condition::eq("active", true));
    assert_eq!(compile_condition(&cond).unwrap().0, "NOT (`active`=:qp0)");

    let empty = Condition::not(Condition::Hash(vec![]));
    assert_eq!(compile_condition(&empty).unwrap().0, "");
}

#[test]
fn test_not_requires_one_operand() {
    let cond = Condition::op("not", [Operand::from("a"), Operand::from("b")]);
    let err = compile_condition(&cond).unwrap_err();
    assert_eq!(err.to_string(), "Operator 'NOT' requires exactly one operand.");
}

#[test]
fn test_between() {
    let (sql, params) = compile_condition(&Condition::between("age", 18, 65)).unwrap();
    assert_eq!(sql, "`age` BETWEEN :qp0 AND :qp1");
    assert_eq!(params.get(":qp1"), Some(&Value::Int(65)));

    let (sql, _) = compile_condition(&Condition::not_between("age", 1, 2)).unwrap();
    assert_eq!(sql, "`age` NOT BETWEEN :qp0 AND :qp1");
}

#[test]
fn test_between_arity_error() {
    let cond = Condition::op("BETWEEN", [Operand::from("age"), Value::from(1).into()]);
    let err = compile_condition(&cond).unwrap_err();
    assert!(matches!(err, QueryError::Arity { expected: "three operands", .. }));
}

#[test]
fn test_in_single_value_collapses() {
    let (sql, params) = compile_condition(&Condition::in_list("id", [5])).unwrap();
    assert_eq!(sql, "`id`=:qp0");
    assert_eq!(params.get(":qp0"), Some(&Value::Int(5)));

    let (sql, _) = compile_condition(&Condition::not_in("id", [5])).unwrap();
    assert_eq!(sql, "`id`<>:qp0");
}

#[test]
fn test_in_empty() {
    let empty: [i32; 0] = [];
    assert_eq!(compile_condition(&Condition::in_list("id", empty)).unwrap().0, "0=1");
    assert_eq!(compile_condition(&Condition::not_in("id", empty)).unwrap().0, "");
}

#[test]
fn test_in_list_with_null() {
    let cond = Condition::in_list("id", [Value::from(1), Value::Null, Value::from(3)]);
    let (sql, params) = compile_condition(&cond).unwrap();
    assert_eq!(sql, "`id` IN (:qp0, NULL, :qp1)");
    assert_eq!(params.len(), 2);
}

#[test]
fn test_in_single_null() {
    let (sql, params) = compile_condition(&Condition::in_list("id", [Value::Null])).unwrap();
    assert_eq!(sql, "`id`=NULL");
    assert!(params.is_empty());

    let (sql, _) = compile_condition(&Condition::not_in("id", [Value::Null])).unwrap();
    assert_eq!(sql, "`id`<>NULL");
}

#[test]
fn test_in_subquery() {
    let sub = Query::new()
        .select("user_id")
        .from("orders")
        .where_(Condition::gt("total", 100));
    let cond = Condition::in_query("id", sub);
    let (sql, params) = compile_condition(&cond).unwrap();
    assert_eq!(
        sql,
        "`id` IN (SELECT `user_id` FROM `orders` WHERE `total` > :qp0)"
    );
    assert_eq!(params.len(), 1);
}

#[test]
fn test_in_subquery_composite_columns() {
    let sub = Query::new().select("a, b").from("t");
    let cond = Condition::op(
        "not in",
        [Operand::Columns(vec!["a".into(), "b".into()]), sub.into()],
    );
    assert_eq!(
        compile_condition(&cond).unwrap().0,
        "(`a`, `b`) NOT IN (SELECT `a`, `b` FROM `t`)"
    );
}

#[test]
fn test_composite_in() {
    let cond = Condition::in_rows(
        ["a", "b"],
        [vec![("a", 1), ("b", 2)], vec![("a", 3), ("b", 4)]],
    );
    let (sql, params) = compile_condition(&cond).unwrap();
    assert_eq!(sql, "(`a`, `b`) IN ((:qp0, :qp1), (:qp2, :qp3))");
    assert_eq!(keys(&params), vec![":qp0", ":qp1", ":qp2", ":qp3"]);
    assert_eq!(params.get(":qp2"), Some(&Value::Int(3)));
}

#[test]
fn test_composite_in_missing_key_is_null() {
    let cond = Condition::in_rows(["a", "b"], [vec![("a", 1)]]);
    let (sql, params) = compile_condition(&cond).unwrap();
    assert_eq!(sql, "(`a`, `b`) IN ((:qp0, NULL))");
    assert_eq!(params.len(), 1);
}

#[test]
fn test_in_requires_two_operands() {
    let cond = Condition::op("IN", [Operand::from("id")]);
    let err = compile_condition(&cond).unwrap_err();
    assert_eq!(err.to_string(), "Operator 'IN' requires two operands.");
}

#[test]
fn test_like_default_escape() {
    let (sql, params) = compile_condition(&Condition::like("name", ["50%_off"])).unwrap();
    assert_eq!(sql, "`name` LIKE :qp0");
    assert_eq!(params.get(":qp0"), Some(&Value::from(r"%50\%\_off%")));
}

#[test]
fn test_like_multiple_values_joiner() {
    let (sql, _) = compile_condition(&Condition::like("name", ["a", "b"])).unwrap();
    assert_eq!(sql, "`name` LIKE :qp0 AND `name` LIKE :qp1");

    let (sql, _) = compile_condition(&Condition::or_not_like("name", ["a", "b"])).unwrap();
    assert_eq!(sql, "`name` NOT LIKE :qp0 OR `name` NOT LIKE :qp1");
}

#[test]
fn test_like_without_escape_binds_raw() {
    let cond = Condition::like_with(LikeOp::default(), "name", ["ab%"], LikeEscape::None);
    let (_, params) = compile_condition(&cond).unwrap();
    assert_eq!(params.get(":qp0"), Some(&Value::from("ab%")));
}

#[test]
fn test_mixed_column_lists_quote_plain_entries() {
    let query = Query::new()
        .select("id, COUNT(*) AS c")
        .from("user")
        .group_by("user.id, DATE(created)");
    let (sql, _) = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(
        sql,
        "SELECT `id`, COUNT(*) AS c FROM `user` GROUP BY `user`.`id`, DATE(created)"
    );
}

#[test]
fn test_like_empty_escape_map_binds_raw() {
    let cond = Condition::like_with(
        LikeOp::default(),
        "name",
        ["50%"],
        LikeEscape::Custom(vec![]),
    );
    let (sql, params) = compile_condition(&cond).unwrap();
    assert_eq!(sql, "`name` LIKE :qp0");
    assert_eq!(params.get(":qp0"), Some(&Value::from("50%")));
}

#[test]
fn test_like_custom_escape_wraps() {
    let escape = LikeEscape::Custom(vec![("%".into(), "!%".into())]);
    let cond = Condition::like_with(LikeOp::default(), "name", ["50%"], escape);
    let (_, params) = compile_condition(&cond).unwrap();
    assert_eq!(params.get(":qp0"), Some(&Value::from("%50!%%")));
}

#[test]
fn test_like_empty_values() {
    let empty: [&str; 0] = [];
    assert_eq!(compile_condition(&Condition::like("n", empty)).unwrap().0, "0=1");
    assert_eq!(compile_condition(&Condition::not_like("n", empty)).unwrap().0, "");
}

#[test]
fn test_like_from_operator_text() {
    let cond = Condition::op("or like", [Operand::from("name"), Value::from("x").into()]);
    let (sql, _) = compile_condition(&cond).unwrap();
    assert_eq!(sql, "`name` LIKE :qp0");

    let ilike = LikeOp {
        joiner: LikeJoiner::Or,
        negated: false,
        case_insensitive: true,
    };
    let cond = Condition::like_with(ilike, "name", ["a", "b"], LikeEscape::Default);
    let (sql, _) = QueryBuilder::new(&Postgres)
        .build(&Query::new().from("t").where_(cond), Params::new())
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "t" WHERE "name" ILIKE :qp0 OR "name" ILIKE :qp1"#
    );
}

#[test]
fn test_exists() {
    let sub = Query::new()
        .select("1")
        .from("orders o")
        .where_("o.user_id = u.id");
    let (sql, _) = compile_condition(&Condition::exists(sub.clone())).unwrap();
    assert_eq!(
        sql,
        "EXISTS (SELECT `1` FROM `orders` `o` WHERE o.user_id = u.id)"
    );
    let (sql, _) = compile_condition(&Condition::not_exists(sub)).unwrap();
    assert!(sql.starts_with("NOT EXISTS ("));
}

#[test]
fn test_exists_requires_subquery() {
    let cond = Condition::op("EXISTS", [Operand::from("SELECT 1")]);
    let err = compile_condition(&cond).unwrap_err();
    assert!(matches!(err, QueryError::InvalidOperand { .. }));
}

#[test]
fn test_simple_condition() {
    let (sql, _) = compile_condition(&Condition::gte("age", 18)).unwrap();
    assert_eq!(sql, "`age` >= :qp0");

    let (sql, params) = compile_condition(&Condition::compare("is not", "deleted_at", Value::Null)).unwrap();
    assert_eq!(sql, "`deleted_at` IS NOT NULL");
    assert!(params.is_empty());

    let sub = Query::new().select("MAX(total)").from("orders");
    let (sql, _) = compile_condition(&Condition::compare_query("=", "total", sub)).unwrap();
    assert_eq!(sql, "`total` = (SELECT MAX(total) FROM `orders`)");
}

#[test]
fn test_unknown_operator_falls_back_to_binary() {
    let cond = Condition::op("@>", [Operand::from("tags"), Value::from("{a}").into()]);
    assert_eq!(compile_condition(&cond).unwrap().0, "`tags` @> :qp0");

    let bad = Condition::op("@>", [Operand::from("tags")]);
    assert!(compile_condition(&bad).is_err());
}

#[test]
fn test_function_columns_not_quoted() {
    let (sql, _) = compile_condition(&Condition::eq("LOWER(name)", "bob")).unwrap();
    assert_eq!(sql, "LOWER(name)=:qp0");
}

#[test]
fn test_placeholders_unique_across_calls() {
    let mut alloc = PlaceholderAllocator::new(Params::new());
    let qb = mysql();
    qb.build_condition(&Condition::eq("a", 1), &mut alloc).unwrap();
    qb.build_condition(&Condition::between("b", 1, 2), &mut alloc).unwrap();
    qb.build_condition(&Condition::in_list("c", [1, 2, 3]), &mut alloc).unwrap();
    let params = alloc.into_params();
    let mut names: Vec<_> = params.keys().collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(total, 6);
    assert_eq!(names.len(), 6);
}

// ==================== Clauses ====================

#[test]
fn test_end_to_end_select() {
    let query = Query::new()
        .select("id,name")
        .from("user")
        .where_(Condition::eq("status", "active"))
        .limit(10);
    let (sql, params) = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(sql, "SELECT `id`, `name` FROM `user` WHERE `status`=:qp0 LIMIT 10");
    assert_eq!(keys(&params), vec![":qp0"]);
    assert_eq!(params.get(":qp0"), Some(&Value::from("active")));
}

#[test]
fn test_select_star_and_distinct_option() {
    let (sql, _) = mysql().build(&Query::new().from("t"), Params::new()).unwrap();
    assert_eq!(sql, "SELECT * FROM `t`");

    let query = Query::new()
        .select_with_option("email", "SQL_CALC_FOUND_ROWS")
        .distinct(true)
        .from("t");
    let (sql, _) = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(sql, "SELECT DISTINCT SQL_CALC_FOUND_ROWS `email` FROM `t`");

    let query = Query::new().distinct(true).from("t");
    let (sql, _) = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(sql, "SELECT DISTINCT * FROM `t`");
}

#[test]
fn test_select_aliases() {
    let query = Query::new()
        .select(vec![
            ColumnSpec::Bare("u.name AS n".into()),
            ColumnSpec::Bare("email e".into()),
            ColumnSpec::Bare("COUNT(*) AS total".into()),
            ColumnSpec::aliased("full", "u.full_name"),
            ColumnSpec::Bare("u.*".into()),
        ])
        .from("user u");
    let (sql, _) = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(
        sql,
        "SELECT `u`.`name` AS `n`, `email` AS `e`, COUNT(*) AS total, `u`.`full_name` AS `full`, `u`.* FROM `user` `u`"
    );
}

#[test]
fn test_select_subquery_column() {
    let sub = Query::new()
        .select("COUNT(*)")
        .from("orders o")
        .where_(Condition::eq("o.status", "paid"));
    let query = Query::new()
        .select(vec![ColumnSpec::Bare("id".into()), ColumnSpec::subquery("paid", sub)])
        .from("user")
        .where_(Condition::eq("active", 1));
    let (sql, params) = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(
        sql,
        "SELECT `id`, (SELECT COUNT(*) FROM `orders` `o` WHERE `o`.`status`=:qp0) AS `paid` FROM `user` WHERE `active`=:qp1"
    );
    assert_eq!(params.get(":qp0"), Some(&Value::from("paid")));
    assert_eq!(params.get(":qp1"), Some(&Value::Int(1)));
}

#[test]
fn test_from_aliases_and_subquery() {
    let sub = Query::new().select("id").from("archived");
    let query = Query::new().from(vec![
        TableSpec::Bare("user AS u".into()),
        TableSpec::aliased("p", "profile"),
        TableSpec::subquery("a", sub),
        TableSpec::Bare("db.log".into()),
    ]);
    let (sql, _) = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM `user` `u`, `profile` `p`, (SELECT `id` FROM `archived`) `a`, `db`.`log`"
    );
}

#[test]
fn test_joins() {
    let query = Query::new()
        .select("u.id, p.title")
        .from("user u")
        .inner_join("post p", "p.user_id = u.id")
        .left_join("profile pr", Condition::eq("pr.visible", true))
        .join("CROSS JOIN", "settings", None);
    let (sql, params) = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(
        sql,
        "SELECT `u`.`id`, `p`.`title` FROM `user` `u` INNER JOIN `post` `p` ON p.user_id = u.id LEFT JOIN `profile` `pr` ON `pr`.`visible`=:qp0 CROSS JOIN `settings`"
    );
    assert_eq!(params.get(":qp0"), Some(&Value::Bool(true)));
}

#[test]
fn test_join_with_empty_condition_has_no_on() {
    let query = Query::new()
        .from("a")
        .left_join("b", Condition::Hash(vec![]));
    let (sql, _) = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(sql, "SELECT * FROM `a` LEFT JOIN `b`");
}

#[test]
fn test_join_missing_type_is_error() {
    let query = Query::new().from("a").join("  ", "b", None);
    let err = mysql().build(&query, Params::new()).unwrap_err();
    assert!(matches!(err, QueryError::InvalidJoin(_)));

    let empty_tables: Vec<&str> = Vec::new();
    let query = Query::new().from("a").join("LEFT JOIN", empty_tables, None);
    assert!(mysql().build(&query, Params::new()).is_err());
}

#[test]
fn test_group_by_having_order_limit() {
    let query = Query::new()
        .select(vec!["team", "COUNT(*) AS n"])
        .from("player")
        .group_by("team")
        .having(Condition::gt("COUNT(*)", 5))
        .order_by("team asc, n desc")
        .limit(20)
        .offset(40);
    let (sql, _) = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(
        sql,
        "SELECT `team`, COUNT(*) AS n FROM `player` GROUP BY `team` HAVING COUNT(*) > :qp0 ORDER BY `team`, `n` DESC LIMIT 20 OFFSET 40"
    );
}

#[test]
fn test_limit_edge_cases() {
    let qb = mysql();
    assert_eq!(qb.build_limit(Some(0), None), "LIMIT 0");
    assert_eq!(qb.build_limit(Some(-1), None), "");
    assert_eq!(qb.build_limit(Some(10), Some(0)), "LIMIT 10");
    assert_eq!(qb.build_limit(None, Some(5)), "OFFSET 5");
    assert_eq!(qb.build_limit(None, Some(-5)), "");
}

#[test]
fn test_union() {
    let second = Query::new()
        .select("id")
        .from("archived")
        .where_(Condition::eq("kind", "b"));
    let query = Query::new()
        .select("id")
        .from("live")
        .where_(Condition::eq("kind", "a"))
        .union(second)
        .union_raw("SELECT id FROM extra", true);
    let (sql, params) = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(
        sql,
        "(SELECT `id` FROM `live` WHERE `kind`=:qp0) UNION ( SELECT `id` FROM `archived` WHERE `kind`=:qp1 ) UNION ALL ( SELECT id FROM extra )"
    );
    assert_eq!(params.len(), 2);
}

#[test]
fn test_build_merges_seed_and_query_params() {
    let mut seed = Params::new();
    seed.insert(":shared", "seed");
    seed.insert(":only_seed", 1);
    let query = Query::new()
        .from("t")
        .where_("a = :shared AND b = :id")
        .add_param(":shared", "query")
        .add_param(":id", 7)
        .and_where(Condition::eq("c", 3));
    let (sql, params) = mysql().build(&query, seed).unwrap();
    assert_eq!(sql, "SELECT * FROM `t` WHERE (a = :shared AND b = :id) AND (`c`=:qp3)");
    assert_eq!(params.get(":shared"), Some(&Value::from("query")));
    assert_eq!(params.get(":only_seed"), Some(&Value::Int(1)));
    assert_eq!(params.get(":qp3"), Some(&Value::Int(3)));
}

#[test]
fn test_seeded_placeholder_is_not_reused() {
    let mut seed = Params::new();
    seed.insert(":qp1", "taken");
    let query = Query::new()
        .from("t")
        .where_(Condition::hash([("a", 1), ("b", 2)]));
    let (sql, params) = mysql().build(&query, seed).unwrap();
    assert_eq!(sql, "SELECT * FROM `t` WHERE (`a`=:qp2) AND (`b`=:qp3)");
    assert_eq!(params.get(":qp1"), Some(&Value::from("taken")));
}

#[test]
fn test_subquery_params_reserve_their_names() {
    let sub = Query::new()
        .select("id")
        .from("s")
        .where_("x = :qp0")
        .add_param(":qp0", 99);
    let query = Query::new()
        .from("t")
        .where_(Condition::eq("a", 1))
        .and_where(Condition::in_query("id", sub));
    let (sql, params) = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM `t` WHERE (`a`=:qp1) AND (`id` IN (SELECT `id` FROM `s` WHERE x = :qp0))"
    );
    assert_eq!(keys(&params), vec![":qp0", ":qp1"]);
    assert_eq!(params.get(":qp0"), Some(&Value::Int(99)));
    assert_eq!(params.get(":qp1"), Some(&Value::Int(1)));
}

#[test]
fn test_build_does_not_mutate_query() {
    let query = Query::new()
        .select("name n")
        .from("user u")
        .where_(Condition::eq("id", 1))
        .order_by("name desc");
    let snapshot = query.clone();
    let first = mysql().build(&query, Params::new()).unwrap();
    let second = mysql().build(&query, Params::new()).unwrap();
    assert_eq!(first, second);
    assert_eq!(query, snapshot);
}

#[test]
fn test_separator() {
    let query = Query::new().from("t").where_("a = 1").order_by("a");
    let (sql, _) = mysql()
        .with_separator("\n")
        .build(&query, Params::new())
        .unwrap();
    assert_eq!(sql, "SELECT *\nFROM `t`\nWHERE a = 1\nORDER BY `a`");
}

#[test]
fn test_postgres_quoting() {
    let query = Query::new()
        .select("id, name")
        .from("public.user")
        .where_(Condition::in_list("id", [1, 2]))
        .add_order_by(("id", SortOrder::Desc));
    let (sql, _) = QueryBuilder::new(&Postgres)
        .build(&query, Params::new())
        .unwrap();
    assert_eq!(
        sql,
        r#"SELECT "id", "name" FROM "public"."user" WHERE "id" IN (:qp0, :qp1) ORDER BY "id" DESC"#
    );
}

// ==================== DDL ====================

#[test]
fn test_column_type_mapping() {
    let qb = mysql();
    assert_eq!(qb.column_type("pk"), "int(11) NOT NULL AUTO_INCREMENT PRIMARY KEY");
    assert_eq!(qb.column_type("string(200) NOT NULL"), "varchar(200) NOT NULL");
    assert_eq!(qb.column_type("decimal(12,2)"), "decimal(12,2)");
    assert_eq!(qb.column_type("integer NOT NULL"), "int(11) NOT NULL");
    assert_eq!(qb.column_type("text(100)"), "text");
    assert_eq!(qb.column_type("varchar(1000)"), "varchar(1000)");
    assert_eq!(qb.column_type("jsonb"), "jsonb");
}

#[test]
fn test_create_table() {
    let sql = mysql().create_table(
        "tbl_user",
        [
            ("id", "pk"),
            ("firstName", "string(200) NOT NULL"),
            ("lastName", "varchar(255) NOT NULL"),
        ],
        Some("ENGINE=InnoDB"),
    );
    assert_eq!(
        sql,
        "CREATE TABLE `tbl_user` (\n\t`id` int(11) NOT NULL AUTO_INCREMENT PRIMARY KEY,\n\t`firstName` varchar(200) NOT NULL,\n\t`lastName` varchar(255) NOT NULL\n) ENGINE=InnoDB"
    );
}

#[test]
fn test_create_table_raw_line() {
    let sql = mysql().create_table("t", [("a", "integer"), ("", "UNIQUE (a)")], None);
    assert_eq!(sql, "CREATE TABLE `t` (\n\t`a` int(11),\n\tUNIQUE (a)\n)");
}

#[test]
fn test_table_statements() {
    let qb = mysql();
    assert_eq!(qb.rename_table("tbl_user", "tbl_person"), "RENAME TABLE `tbl_user` TO `tbl_person`");
    assert_eq!(qb.drop_table("tbl_person"), "DROP TABLE `tbl_person`");
    assert_eq!(qb.truncate_table("tbl_person"), "TRUNCATE TABLE `tbl_person`");
}

#[test]
fn test_column_statements() {
    let qb = mysql();
    assert_eq!(
        qb.add_column("tbl_person", "fullName", "string"),
        "ALTER TABLE `tbl_person` ADD `fullName` varchar(255)"
    );
    assert_eq!(
        qb.drop_column("tbl_person", "fullName"),
        "ALTER TABLE `tbl_person` DROP COLUMN `fullName`"
    );
    assert_eq!(
        qb.rename_column("tbl_person", "fullName", "completeName", "string"),
        "ALTER TABLE `tbl_person` CHANGE `fullName` `completeName` varchar(255)"
    );
    assert_eq!(
        qb.alter_column("tbl_person", "fullName", "varchar(1000)"),
        "ALTER TABLE `tbl_person` CHANGE `fullName` `fullName` varchar(1000)"
    );
}

#[test]
fn test_key_statements() {
    let qb = mysql();
    assert_eq!(
        qb.add_primary_key("PRIMARY_KEY", "tbl_person", ["id"]),
        "ALTER TABLE `tbl_person` ADD CONSTRAINT `PRIMARY_KEY` PRIMARY KEY (`id`)"
    );
    assert_eq!(
        qb.drop_primary_key("PRIMARY_KEY", "tbl_person"),
        "ALTER TABLE `tbl_person` DROP CONSTRAINT `PRIMARY_KEY`"
    );
    assert_eq!(
        qb.add_foreign_key(
            "FK_person_post",
            "tbl_post",
            "person_id",
            "tbl_person",
            "id",
            Some("CASCADE"),
            Some("CASCADE"),
        ),
        "ALTER TABLE `tbl_post` ADD CONSTRAINT `FK_person_post` FOREIGN KEY (`person_id`) REFERENCES `tbl_person` (`id`) ON DELETE CASCADE ON UPDATE CASCADE"
    );
    assert_eq!(
        qb.drop_foreign_key("FK_person_post", "tbl_post"),
        "ALTER TABLE `tbl_post` DROP CONSTRAINT `FK_person_post`"
    );
}

#[test]
fn test_index_statements() {
    let qb = mysql();
    assert_eq!(
        qb.create_index("IX_post_name", "tbl_post", "postName", false),
        "ALTER TABLE `tbl_post` ADD INDEX `IX_post_name` (`postName`)"
    );
    assert_eq!(
        qb.create_index("IX_post_name", "tbl_post", "postName, author", true),
        "ALTER TABLE `tbl_post` ADD UNIQUE INDEX `IX_post_name` (`postName`, `author`)"
    );
    assert_eq!(
        qb.drop_index("IX_post_name", "tbl_post"),
        "DROP INDEX `IX_post_name` ON `tbl_post`"
    );
}

#[test]
fn test_mysql_vendor_statements() {
    let qb = mysql();
    assert_eq!(
        qb.reset_sequence("tbl_person", Some(1)).unwrap(),
        "ALTER TABLE `tbl_person` AUTO_INCREMENT=1"
    );
    assert_eq!(qb.check_integrity(false, "", "").unwrap(), "SET FOREIGN_KEY_CHECKS = 0");
    assert_eq!(qb.check_integrity(true, "", "").unwrap(), "SET FOREIGN_KEY_CHECKS = 1");
}

#[test]
fn test_postgres_ddl() {
    let qb = QueryBuilder::new(&Postgres);
    assert_eq!(qb.column_type("pk"), "serial NOT NULL PRIMARY KEY");
    assert_eq!(qb.column_type("string(64)"), "varchar(64)");
    assert_eq!(
        qb.rename_table("a", "b"),
        r#"ALTER TABLE "a" RENAME TO "b""#
    );
    assert_eq!(
        qb.rename_column("t", "old", "new", "string"),
        r#"ALTER TABLE "t" RENAME COLUMN "old" TO "new""#
    );
    assert_eq!(
        qb.alter_column("t", "c", "text"),
        r#"ALTER TABLE "t" ALTER COLUMN "c" TYPE text"#
    );
    assert_eq!(
        qb.create_index("ix", "t", ["a", "b"], true),
        r#"CREATE UNIQUE INDEX "ix" ON "t" ("a", "b")"#
    );
    assert_eq!(qb.drop_index("ix", "t"), r#"DROP INDEX "ix""#);
    assert!(matches!(
        qb.reset_sequence("t", None),
        Err(QueryError::NotSupported { .. })
    ));
}
