#[cfg(test)]
mod tests {
    use batchbuilder_core::{
        Argument, BasicBatch, Batch, DEFAULT_MAX_ARGUMENTS, DeferredArgumentFailed, Error,
        Result, Statement, TooManyArguments, Value,
    };
    use indoc::indoc;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn two_arguments() -> Statement {
        Statement::raw("UPDATE t SET a = ? WHERE b = ?")
            .bind(1)
            .bind(2)
    }

    #[test]
    fn default_ceiling() {
        let batch = BasicBatch::new();
        assert_eq!(batch.max_arguments(), DEFAULT_MAX_ARGUMENTS);
        assert_eq!(batch.max_arguments(), 65536);
        assert_eq!(batch.total_arguments(), 0);
        assert!(batch.is_empty());
    }

    #[test]
    fn ceiling_rejects_without_mutating() {
        let mut batch = BasicBatch::with_max_arguments(3);
        batch.push(two_arguments()).expect("First statement fits");
        assert_eq!(batch.total_arguments(), 2);
        let error = batch
            .push(two_arguments())
            .expect_err("Second statement exceeds the ceiling");
        assert_eq!(
            error.downcast_ref::<TooManyArguments>(),
            Some(&TooManyArguments {
                adding: 2,
                current: 2,
                max: 3
            })
        );
        assert_eq!(
            error.to_string(),
            "Can't add a statement with 2 arguments, the batch already has 2 (max 3)"
        );
        assert_eq!(batch.total_arguments(), 2);
        assert_eq!(batch.len(), 1);

        // Exactly reaching the ceiling is accepted
        batch
            .push(Statement::raw("DELETE FROM t WHERE a = ?").bind(9))
            .expect("Statement reaching the ceiling fits");
        assert_eq!(batch.total_arguments(), 3);
        assert!(batch.push(Statement::raw("TRUNCATE t")).is_ok());
        assert!(batch.push(Statement::raw("DELETE FROM t WHERE a = ?").bind(1)).is_err());
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn zero_ceiling_is_unlimited() {
        let mut batch = BasicBatch::with_max_arguments(0);
        for _ in 0..100 {
            batch.push(two_arguments()).unwrap();
        }
        assert_eq!(batch.total_arguments(), 200);
        assert_eq!(batch.len(), 100);
    }

    #[test]
    fn join_with_markers() {
        let mut batch = BasicBatch::new();
        batch.push(Statement::insert("users", [("id", 1)])).unwrap();
        batch.push(Statement::delete("users", [("id", 2)])).unwrap();

        let (text, arguments) = batch.join("\n", "BEGIN", "END").unwrap();
        assert_eq!(
            text,
            indoc! {"
                BEGIN
                INSERT INTO users (id) VALUES (?)
                DELETE FROM users WHERE id = ?
                END"}
        );
        assert_eq!(arguments, [Value::Int32(Some(1)), Value::Int32(Some(2))]);

        let (text, _) = batch.join("; ", "", "").unwrap();
        assert_eq!(
            text,
            "INSERT INTO users (id) VALUES (?); DELETE FROM users WHERE id = ?"
        );
        let (text, _) = batch.join("; ", "BEGIN", "").unwrap();
        assert_eq!(
            text,
            "BEGIN; INSERT INTO users (id) VALUES (?); DELETE FROM users WHERE id = ?"
        );
    }

    #[test]
    fn join_empty_batch() {
        let batch = BasicBatch::new();
        assert_eq!(batch.join(", ", "", "").unwrap(), (String::new(), vec![]));
        assert_eq!(
            batch.join(", ", "BEGIN", "END").unwrap(),
            ("BEGIN, END".to_string(), vec![])
        );
    }

    #[test]
    fn arguments_aligned_with_placeholders() {
        let mut batch = BasicBatch::new();
        batch
            .push(Statement::update(
                "accounts",
                [("balance", 10), ("active", 1)],
                [("owner", 3)],
            ))
            .unwrap();
        batch.push(Statement::raw("SELECT now()")).unwrap();
        batch
            .push(
                Statement::raw("INSERT INTO log (a, b) VALUES (?, ?)")
                    .bind("first")
                    .bind(Value::Null),
            )
            .unwrap();
        let (text, arguments) = batch.join(" ", "", "").unwrap();
        assert_eq!(text.matches('?').count(), arguments.len());
        assert_eq!(arguments.len(), batch.total_arguments());
        assert_eq!(
            arguments,
            [
                Value::Int32(Some(1)),
                Value::Int32(Some(10)),
                Value::Int32(Some(3)),
                Value::Varchar(Some("first".into())),
                Value::Null,
            ]
        );
    }

    #[test]
    fn deferred_resolved_at_join() {
        let counter = Arc::new(AtomicUsize::new(0));
        let calls = counter.clone();
        let mut batch = BasicBatch::new();
        batch
            .push(
                Statement::raw("INSERT INTO t (a, b, c) VALUES (?, ?, ?)")
                    .bind("before")
                    .bind(Argument::deferred(move || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(42)
                    }))
                    .bind("after"),
            )
            .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        let (_, arguments) = batch.join("\n", "", "").unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(
            arguments,
            [
                Value::Varchar(Some("before".into())),
                Value::Int32(Some(42)),
                Value::Varchar(Some("after".into())),
            ]
        );

        // Every join resolves again
        batch.join("\n", "", "").unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn deferred_failure_aborts_join() {
        let later = Arc::new(AtomicUsize::new(0));
        let calls = later.clone();
        let mut batch = BasicBatch::new();
        batch
            .push(Statement::raw("DELETE FROM t WHERE a = ?").bind(1))
            .unwrap();
        batch
            .push(
                Statement::raw("UPDATE t SET a = ? WHERE b = ?")
                    .bind(2)
                    .bind(Argument::deferred(|| -> Result<i32> {
                        Err(Error::msg("sequence exhausted"))
                    })),
            )
            .unwrap();
        batch
            .push(
                Statement::raw("DELETE FROM t WHERE a = ?").bind(Argument::deferred(move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(3)
                })),
            )
            .unwrap();

        let result = batch.join("\n", "BEGIN", "END");
        let Err(error) = result else {
            panic!("Join was expected to fail");
        };
        assert_eq!(
            error.downcast_ref::<DeferredArgumentFailed>(),
            Some(&DeferredArgumentFailed {
                statement: 1,
                argument: 1
            })
        );
        assert_eq!(error.root_cause().to_string(), "sequence exhausted");
        assert!(format!("{error:#}").contains("sequence exhausted"));
        // Resolution stops at the first failure
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn join_is_repeatable_and_batch_keeps_growing() {
        let mut batch = BasicBatch::new();
        batch.push(Statement::delete("t", [("a", 1)])).unwrap();
        let first = batch.join(", ", "", "").unwrap();
        assert_eq!(first, batch.join(", ", "", "").unwrap());
        batch.push(Statement::delete("t", [("a", 2)])).unwrap();
        let (text, arguments) = batch.join(", ", "", "").unwrap();
        assert_eq!(text, "DELETE FROM t WHERE a = ?, DELETE FROM t WHERE a = ?");
        assert_eq!(arguments.len(), 2);
        assert_eq!(batch.statements()[1].text(), "DELETE FROM t WHERE a = ?");
        assert_eq!(batch.into_statements().len(), 2);
    }
}
