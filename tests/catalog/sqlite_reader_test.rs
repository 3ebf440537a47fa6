#[cfg(test)]
mod tests {
    use ermap::catalog::{CatalogError, CatalogReader, InspectOptions, SqliteReader};
    use ermap::inference::infer;
    use ermap::EdgeDirection;
    use pretty_assertions::assert_eq;
    use rusqlite::Connection;

    const DDL: &str = r#"
        CREATE TABLE user (
            id INTEGER PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            age SMALLINT,
            nickname TEXT UNIQUE
        );
        CREATE TABLE pet (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            user_pets INTEGER REFERENCES user(id) ON DELETE SET NULL
        );
        CREATE TABLE card (
            id INTEGER PRIMARY KEY,
            number TEXT NOT NULL DEFAULT 'unknown',
            user_card INTEGER UNIQUE REFERENCES user(id)
        );
        CREATE TABLE node (
            id INTEGER PRIMARY KEY,
            value INTEGER NOT NULL,
            node_parent INTEGER REFERENCES node(id)
        );
        CREATE TABLE team (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL
        );
        CREATE TABLE team_users (
            team_id INTEGER NOT NULL REFERENCES team(id),
            user_id INTEGER NOT NULL REFERENCES user(id),
            PRIMARY KEY (team_id, user_id)
        );
    "#;

    fn reader() -> SqliteReader {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(DDL).unwrap();
        SqliteReader::from_connection(conn)
    }

    #[tokio::test]
    async fn test_reads_tables_in_creation_order() {
        let catalog = reader()
            .inspect_schema("main", &InspectOptions::default())
            .await
            .unwrap();

        assert_eq!(catalog.name, "main");
        let names: Vec<_> = catalog.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["user", "pet", "card", "node", "team", "team_users"]);
    }

    #[tokio::test]
    async fn test_reads_columns_and_keys() {
        let catalog = reader()
            .inspect_schema("main", &InspectOptions::default())
            .await
            .unwrap();

        let user = catalog.table("user").unwrap();
        let columns: Vec<_> = user
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.data_type.as_str(), c.is_nullable))
            .collect();
        assert_eq!(
            columns,
            vec![
                ("id", "INTEGER", true),
                ("name", "VARCHAR(255)", false),
                ("age", "SMALLINT", true),
                ("nickname", "TEXT", true),
            ]
        );
        assert_eq!(user.primary_key_columns(), ["id".to_string()]);
        assert!(user.has_unique_index_on("nickname"));
        assert!(!user.has_unique_index_on("name"));

        let card = catalog.table("card").unwrap();
        assert_eq!(
            card.column("number").unwrap().default_value.as_deref(),
            Some("'unknown'")
        );

        let pet = catalog.table("pet").unwrap();
        assert_eq!(pet.foreign_keys.len(), 1);
        let fk = &pet.foreign_keys[0];
        assert_eq!(fk.columns, vec!["user_pets"]);
        assert_eq!(fk.referenced_table, "user");
        assert_eq!(fk.referenced_columns, vec!["id"]);
        assert_eq!(fk.on_delete.as_deref(), Some("SET NULL"));
        assert_eq!(fk.on_update, None);
    }

    #[tokio::test]
    async fn test_composite_primary_key() {
        let catalog = reader()
            .inspect_schema("main", &InspectOptions::default())
            .await
            .unwrap();

        let join = catalog.table("team_users").unwrap();
        assert_eq!(
            join.primary_key_columns(),
            ["team_id".to_string(), "user_id".to_string()]
        );
        assert!(join.indexes.iter().any(|i| i.is_primary));
    }

    #[tokio::test]
    async fn test_foreign_keys_in_declaration_order() {
        let catalog = reader()
            .inspect_schema("main", &InspectOptions::default())
            .await
            .unwrap();

        let join = catalog.table("team_users").unwrap();
        let keys: Vec<_> = join
            .foreign_keys
            .iter()
            .map(|fk| (fk.columns.clone(), fk.referenced_table.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (vec!["team_id".to_string()], "team"),
                (vec!["user_id".to_string()], "user"),
            ]
        );
    }

    #[tokio::test]
    async fn test_allow_list() {
        let options = InspectOptions::default().with_tables(["pet", "user"]);
        let catalog = reader().inspect_schema("main", &options).await.unwrap();
        let names: Vec<_> = catalog.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["user", "pet"]);
    }

    #[tokio::test]
    async fn test_empty_schema_means_main() {
        let catalog = reader()
            .inspect_schema("", &InspectOptions::default())
            .await
            .unwrap();
        assert_eq!(catalog.name, "main");
    }

    #[tokio::test]
    async fn test_unknown_schema() {
        let err = reader()
            .inspect_schema("aux", &InspectOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::SchemaNotFound(ref s) if s == "aux"));
    }

    #[tokio::test]
    async fn test_inferred_graph() {
        let catalog = reader()
            .inspect_schema("main", &InspectOptions::default())
            .await
            .unwrap();
        let mutations = infer(&catalog).unwrap();

        assert_eq!(
            mutations.names().collect::<Vec<_>>(),
            vec!["User", "Pet", "Card", "Node", "Team"]
        );

        let user = mutations.get("User").unwrap();
        assert_eq!(user.edge("pets").unwrap().to_string(), r#"to("pets", Pet)"#);
        assert_eq!(
            user.edge("card").unwrap().to_string(),
            r#"to("card", Card).unique()"#
        );

        let node = mutations.get("Node").unwrap();
        assert_eq!(
            node.edges.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                r#"to("child_nodes", Node)"#,
                r#"from("parent_node", Node).ref("child_nodes").unique().field("node_parent")"#,
            ]
        );

        // The first declared key of the join table owns the To edge.
        let team = mutations.get("Team").unwrap();
        assert_eq!(
            team.edges.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![r#"to("users", User)"#]
        );
        let user_edge = user.edge("teams").unwrap();
        assert_eq!(user_edge.direction, EdgeDirection::From);
        assert_eq!(user_edge.to_string(), r#"from("teams", Team).ref("users")"#);
    }
}
